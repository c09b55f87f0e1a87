// config.rs

use crate::cli::Args;
use log::{debug, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DEVICE_PATH: &str = "/dev/input/powermate";
pub const DEFAULT_CLIENT_NAME: &str = "Griffin PowerMate modwheel";
pub const DEFAULT_PORT_NAME: &str = "PowerMate";
/// Modwheel
pub const DEFAULT_CONTROLLER: u8 = 1;
pub const DEFAULT_IDLE_BACKOFF_US: u64 = 100;
/// Prefix for environment overrides, e.g. `POWERMOD_CHANNEL=3`
pub const ENV_PREFIX: &str = "POWERMOD";

/// Errors found while loading or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The config file or environment could not be read or deserialized
    Load(::config::ConfigError),
    InvalidChannel(i64),
    InvalidController(i64),
    InvalidAcceleration(i64),
    EmptyDevicePath,
    EmptyClientName,
    EmptyPortName,
    ZeroIdleBackoff,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {}", e),
            ConfigError::InvalidChannel(got) => write!(
                f,
                "channel needs a channel from 1-16, e.g. powermod -c 12 (got {})",
                got
            ),
            ConfigError::InvalidController(got) => write!(
                f,
                "controller needs a controller number from 0-127, e.g. powermod --cc 7 (got {})",
                got
            ),
            ConfigError::InvalidAcceleration(got) => write!(
                f,
                "acceleration needs a multiplier from 1-8, e.g. powermod -a 2 (got {})",
                got
            ),
            ConfigError::EmptyDevicePath => write!(
                f,
                "device needs a device path, e.g. powermod -d /dev/input/powermate"
            ),
            ConfigError::EmptyClientName => write!(f, "MIDI client name must not be empty"),
            ConfigError::EmptyPortName => write!(f, "MIDI port name must not be empty"),
            ConfigError::ZeroIdleBackoff => {
                write!(f, "idle backoff must be at least 1 microsecond")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(e: ::config::ConfigError) -> Self {
        ConfigError::Load(e)
    }
}

/// MIDI channel, stored 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel(u8);

impl Channel {
    /// Builds a channel from the 1-16 numbering users see.
    pub fn from_user(number: i64) -> Result<Self, ConfigError> {
        match number {
            1..=16 => Ok(Channel(number as u8 - 1)),
            _ => Err(ConfigError::InvalidChannel(number)),
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// 1-based, for display
    pub fn number(self) -> u8 {
        self.0 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerNumber(u8);

impl ControllerNumber {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ControllerNumber {
    type Error = ConfigError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        match n {
            0..=127 => Ok(ControllerNumber(n as u8)),
            _ => Err(ConfigError::InvalidController(n)),
        }
    }
}

/// CC units moved per detent of the knob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acceleration(u8);

impl Acceleration {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Acceleration {
    type Error = ConfigError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        match n {
            1..=8 => Ok(Acceleration(n as u8)),
            _ => Err(ConfigError::InvalidAcceleration(n)),
        }
    }
}

impl TryFrom<u8> for Acceleration {
    type Error = ConfigError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(n))
    }
}

/// Raw, unvalidated settings as merged from file, environment and flags
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub channel: i64,
    pub device: String,
    pub controller: i64,
    pub acceleration: i64,
    pub client_name: String,
    pub port_name: String,
    pub idle_backoff_us: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            channel: 1,
            device: DEFAULT_DEVICE_PATH.to_string(),
            controller: i64::from(DEFAULT_CONTROLLER),
            acceleration: 1,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            port_name: DEFAULT_PORT_NAME.to_string(),
            idle_backoff_us: DEFAULT_IDLE_BACKOFF_US,
        }
    }
}

impl Settings {
    /// Merges defaults, an optional config file and `POWERMOD_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, ENV_PREFIX)
    }

    pub fn load_from(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = file {
            info!("Loading configuration file {}", path.display());
            builder = builder.add_source(::config::File::from(path));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(env_prefix).try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        debug!("Settings before command line overrides: {:?}", settings);
        Ok(settings)
    }

    /// Command line flags win over everything else.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(channel) = args.channel {
            self.channel = channel;
        }
        if let Some(device) = &args.device {
            self.device = device.clone();
        }
        if let Some(controller) = args.controller {
            self.controller = controller;
        }
        if let Some(acceleration) = args.acceleration {
            self.acceleration = acceleration;
        }
        if let Some(client_name) = &args.client_name {
            self.client_name = client_name.clone();
        }
        if let Some(port_name) = &args.port_name {
            self.port_name = port_name.clone();
        }
    }
}

/// Validated startup configuration, fixed for the life of the process
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub channel: Channel,
    pub controller: ControllerNumber,
    pub acceleration: Acceleration,
    pub device_path: PathBuf,
    pub client_name: String,
    pub port_name: String,
    pub idle_backoff: Duration,
}

impl Config {
    /// Loads every layer and validates the result.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let mut settings = Settings::load(args.config.as_deref())?;
        settings.apply_args(args);
        Self::try_from(settings)
    }
}

impl TryFrom<Settings> for Config {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let channel = Channel::from_user(settings.channel)?;
        let controller = ControllerNumber::try_from(settings.controller)?;
        let acceleration = Acceleration::try_from(settings.acceleration)?;

        if settings.device.trim().is_empty() {
            return Err(ConfigError::EmptyDevicePath);
        }
        if settings.client_name.trim().is_empty() {
            return Err(ConfigError::EmptyClientName);
        }
        if settings.port_name.trim().is_empty() {
            return Err(ConfigError::EmptyPortName);
        }
        if settings.idle_backoff_us == 0 {
            return Err(ConfigError::ZeroIdleBackoff);
        }

        Ok(Config {
            channel,
            controller,
            acceleration,
            device_path: PathBuf::from(settings.device),
            client_name: settings.client_name,
            port_name: settings.port_name,
            idle_backoff: Duration::from_micros(settings.idle_backoff_us),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            channel: Channel(0),
            controller: ControllerNumber(DEFAULT_CONTROLLER),
            acceleration: Acceleration(1),
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            port_name: DEFAULT_PORT_NAME.to_string(),
            idle_backoff: Duration::from_micros(DEFAULT_IDLE_BACKOFF_US),
        }
    }
}
