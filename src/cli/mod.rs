use clap::{ArgAction, Parser};
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
Takes input from a Griffin PowerMate or compatible device and outputs it as a \
MIDI CC control for use with synthesizers.

By default it will function as a modwheel. The button will zero the wheel.

Settings can also come from a config file (--config) or POWERMOD_* environment \
variables; command line flags take precedence.";

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Args {
    /// Set MIDI channel, 1-16 (defaults to 1)
    #[arg(short = 'c', long, value_name = "CHANNEL")]
    pub channel: Option<i64>,

    /// Set device path (defaults to /dev/input/powermate)
    #[arg(short = 'd', long, value_name = "PATH")]
    pub device: Option<String>,

    /// Set a different CC control code, e.g. --cc 7 (volume)
    #[arg(long = "cc", visible_alias = "controller", value_name = "CC")]
    pub controller: Option<i64>,

    /// Change acceleration, 1-8, e.g. -a 2 is twice as fast
    #[arg(short = 'a', long, value_name = "MULTIPLIER")]
    pub acceleration: Option<i64>,

    /// Name of the MIDI client other applications see
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Name of the virtual output port
    #[arg(long, value_name = "NAME")]
    pub port_name: Option<String>,

    /// Read settings from this file before applying flags
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also append log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses the process arguments.
///
/// Help and version output exit with 0, every parse error with 1.
pub fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
