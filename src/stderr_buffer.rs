use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log output is stored instead of
/// being printed to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected output, in order.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Log sink for the tracing subscriber. Writes go to stderr unless
/// buffering is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrWriter;

impl Write for StderrWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = lock();
        if let Some(lines) = guard.as_mut() {
            lines.push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        } else {
            drop(guard);
            io::stderr().write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// `MakeWriter` constructor for `tracing_subscriber::fmt().with_writer(..)`
pub fn writer() -> StderrWriter {
    StderrWriter
}
