use super::{DeviceError, RawEvent, RECORD_SIZE};
use crossbeam::channel::Sender;
use log::{debug, error, info, trace};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the reader thread forwards to the event loop
pub type DeviceMessage = Result<RawEvent, DeviceError>;

/// Pulls whole `input_event` records off a byte stream
pub struct EventReader<R> {
    stream: R,
    path: PathBuf,
}

impl EventReader<File> {
    /// Opens the device node read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        info!("Opening input device {}", path.display());
        let file = File::open(&path).map_err(|source| DeviceError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self::new(file, path))
    }
}

impl<R: Read> EventReader<R> {
    pub fn new(stream: R, path: PathBuf) -> Self {
        EventReader { stream, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blocks for one record.
    ///
    /// Returns `Ok(None)` when the stream runs dry before a full record has
    /// been assembled; whatever partial bytes were read are discarded.
    pub fn read_event(&mut self) -> Result<Option<RawEvent>, DeviceError> {
        let mut record = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match self.stream.read(&mut record[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(DeviceError::Read {
                        path: self.path.clone(),
                        source,
                    })
                }
            }
        }

        if filled < RECORD_SIZE {
            if filled > 0 {
                debug!("Dropping short read of {} bytes", filled);
            }
            return Ok(None);
        }

        let event = RawEvent::decode(&record);
        trace!("Decoded {:?}", event);
        Ok(Some(event))
    }
}

/// Runs the blocking reads on a dedicated thread.
///
/// Every decoded event is forwarded on `tx`. When the stream has nothing to
/// offer the thread sleeps for `idle_backoff` before trying again. A read
/// failure is forwarded once and ends the thread, as does the receiving side
/// going away.
pub fn spawn_reader<R>(
    mut reader: EventReader<R>,
    tx: Sender<DeviceMessage>,
    idle_backoff: Duration,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        info!("Device reader thread started for {}", reader.path().display());
        loop {
            match reader.read_event() {
                Ok(Some(event)) => {
                    if tx.send(Ok(event)).is_err() {
                        debug!("Event loop gone, stopping device reader");
                        break;
                    }
                }
                Ok(None) => thread::sleep(idle_backoff),
                Err(e) => {
                    error!("{}", e);
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
        info!("Device reader thread stopping");
    })
}
