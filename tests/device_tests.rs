use crossbeam::channel::unbounded;
use powermodrs::device::{
    spawn_reader, DeviceError, EventKind, EventReader, RawEvent, BTN_PRIMARY, EV_KEY, EV_REL,
    RECORD_SIZE, REL_WHEEL, TIME_FIELD_SIZE,
};
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;

/// Lays out one `struct input_event` the way the kernel writes it.
fn record(ev_type: u16, code: u16, value: i32) -> Vec<u8> {
    let mut buf = vec![0u8; TIME_FIELD_SIZE];
    buf.extend_from_slice(&ev_type.to_ne_bytes());
    buf.extend_from_slice(&code.to_ne_bytes());
    buf.extend_from_slice(&value.to_ne_bytes());
    assert_eq!(buf.len(), RECORD_SIZE);
    buf
}

fn reader_over(bytes: Vec<u8>) -> EventReader<Cursor<Vec<u8>>> {
    EventReader::new(Cursor::new(bytes), PathBuf::from("/dev/input/test"))
}

/// Hands out at most `chunk` bytes per read call.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Fails every read after being interrupted once.
struct Broken {
    interrupted: bool,
}

impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        Err(io::Error::new(io::ErrorKind::Other, "No such device"))
    }
}

#[test]
fn test_reads_consecutive_records() {
    let mut bytes = record(EV_REL, REL_WHEEL, 1);
    bytes.extend(record(0, 0, 0));
    bytes.extend(record(EV_KEY, BTN_PRIMARY, 1));
    let mut reader = reader_over(bytes);

    assert_eq!(reader.read_event().unwrap(), Some(RawEvent::relative(1)));
    assert_eq!(reader.read_event().unwrap().unwrap().kind, EventKind::Other);
    assert_eq!(reader.read_event().unwrap(), Some(RawEvent::key(1)));
    assert_eq!(reader.read_event().unwrap(), None);
}

#[test]
fn test_short_read_is_no_event() {
    let mut bytes = record(EV_REL, REL_WHEEL, -1);
    bytes.truncate(RECORD_SIZE - 3);
    let mut reader = reader_over(bytes);

    assert_eq!(reader.read_event().unwrap(), None);
}

#[test]
fn test_empty_stream_is_no_event() {
    let mut reader = reader_over(Vec::new());
    assert_eq!(reader.read_event().unwrap(), None);
}

#[test]
fn test_record_split_across_reads() {
    let stream = Trickle {
        data: record(EV_REL, REL_WHEEL, -1),
        pos: 0,
        chunk: 5,
    };
    let mut reader = EventReader::new(stream, PathBuf::from("/dev/input/test"));

    assert_eq!(reader.read_event().unwrap(), Some(RawEvent::relative(-1)));
}

#[test]
fn test_read_failure_is_reported_with_path() {
    let mut reader = EventReader::new(
        Broken { interrupted: false },
        PathBuf::from("/dev/input/gone"),
    );

    match reader.read_event() {
        Err(DeviceError::Read { path, .. }) => assert_eq!(path, PathBuf::from("/dev/input/gone")),
        other => panic!("Expected read error, got {:?}", other),
    }
}

#[test]
fn test_open_missing_device_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("powermate");

    let err = EventReader::open(&path).err().expect("open should fail");
    assert!(matches!(err, DeviceError::Open { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_open_reads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events");
    std::fs::write(&path, record(EV_KEY, BTN_PRIMARY, 0)).unwrap();

    let mut reader = EventReader::open(&path).unwrap();
    assert_eq!(reader.read_event().unwrap(), Some(RawEvent::key(0)));
}

#[test]
fn test_reader_thread_forwards_events_then_failure() {
    struct Script {
        chunks: Vec<io::Result<Vec<u8>>>,
    }

    impl Read for Script {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "unplugged"));
            }
            let data = self.chunks.remove(0)?;
            buf[..data.len()].copy_from_slice(&data);
            Ok(data.len())
        }
    }

    let stream = Script {
        chunks: vec![
            Ok(record(EV_REL, REL_WHEEL, 1)),
            Ok(Vec::new()),
            Ok(record(EV_KEY, BTN_PRIMARY, 1)),
        ],
    };
    let reader = EventReader::new(stream, PathBuf::from("/dev/input/test"));
    let (tx, rx) = unbounded();

    let handle = spawn_reader(reader, tx, Duration::from_micros(100));

    assert_eq!(rx.recv().unwrap().unwrap(), RawEvent::relative(1));
    assert_eq!(rx.recv().unwrap().unwrap(), RawEvent::key(1));
    assert!(matches!(rx.recv().unwrap(), Err(DeviceError::Read { .. })));

    handle.join().expect("Reader thread panicked");
    assert!(rx.recv().is_err());
}
