use crossbeam::channel::unbounded;
use powermodrs::{
    cli::{parse_args, Args},
    device::{spawn_reader, EventReader},
    logging,
    midi::{DefaultMidiEngine, MidiEngine},
    shutdown::shutdown_signal,
    Config, EventLoop,
};
use std::fs::File;

fn main() {
    let args = parse_command_line_arguments();
    initialize_logging(&args);
    print_banner();

    let config = load_configuration(&args);
    let mut engine = open_midi_engine(&config);
    let reader = open_device(&config, &mut engine);

    println!(
        "Device opened OK, using MIDI channel {}",
        config.channel.number()
    );

    let shutdown = match shutdown_signal() {
        Ok(rx) => rx,
        Err(e) => {
            engine.close();
            fail(&format!("Failed to install signal handler: {}", e));
        }
    };

    let (event_tx, event_rx) = unbounded();
    spawn_reader(reader, event_tx, config.idle_backoff);

    let event_loop = EventLoop::new(&config, engine, event_rx, shutdown);
    if let Err(e) = event_loop.run() {
        fail(&e.to_string());
    }

    log::info!("Application exiting");
}

fn parse_command_line_arguments() -> Args {
    parse_args()
}

fn initialize_logging(args: &Args) {
    let level = logging::level_for_verbosity(args.verbose);
    if let Err(e) = logging::init_logger(level, args.log_file.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    log::info!("Application starting");
}

fn print_banner() {
    println!(
        "PowerMod: modwheel controller for the Griffin PowerMate, version {}",
        env!("CARGO_PKG_VERSION")
    );
    println!("{}\n", env!("CARGO_PKG_DESCRIPTION"));
}

fn load_configuration(args: &Args) -> Config {
    match Config::from_args(args) {
        Ok(config) => {
            log::debug!("Using configuration: {:?}", config);
            config
        }
        Err(e) => fail(&format!("ERROR: {}", e)),
    }
}

fn open_midi_engine(config: &Config) -> DefaultMidiEngine {
    match DefaultMidiEngine::new(&config.client_name, &config.port_name) {
        Ok(engine) => engine,
        Err(e) => fail(&format!("ERROR: {}", e)),
    }
}

fn open_device(config: &Config, engine: &mut DefaultMidiEngine) -> EventReader<File> {
    match EventReader::open(&config.device_path) {
        Ok(reader) => reader,
        Err(e) => {
            engine.close();
            fail(&e.to_string());
        }
    }
}

fn fail(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    std::process::exit(1);
}
