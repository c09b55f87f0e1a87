use crossbeam::channel::{bounded, Receiver};
use log::info;

/// Installs a SIGINT/SIGTERM handler.
///
/// The returned receiver yields once per signal; the event loop waits on it
/// next to the device channel.
pub fn shutdown_signal() -> Result<Receiver<()>, ctrlc::Error> {
    let (tx, rx) = bounded(1);
    ctrlc::set_handler(move || {
        info!("Shutdown signal received");
        let _ = tx.try_send(());
    })?;
    Ok(rx)
}
