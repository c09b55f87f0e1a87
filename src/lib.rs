pub mod cli;
pub mod config;
pub mod controller;
pub mod device;
pub mod event_loop;
pub mod logging;
pub mod midi;
pub mod shutdown;

pub use cli::Args;
pub use config::Config;
pub use controller::ControllerState;
pub use event_loop::EventLoop;
