use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Destination of formatted log lines.
///
/// The demo draws on the alternate screen, so anything written to stderr
/// would corrupt the display; without a log file, output is discarded.
#[derive(Clone, Debug)]
pub enum LogTarget {
    File(Arc<Mutex<File>>),
    Discard,
}

impl LogTarget {
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(LogTarget::File(Arc::new(Mutex::new(file))))
            }
            None => Ok(LogTarget::Discard),
        }
    }
}

pub struct LogWriter {
    target: LogTarget,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.target {
            LogTarget::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            LogTarget::Discard => io::sink().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.target {
            LogTarget::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            LogTarget::Discard => Ok(()),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogTarget {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            target: self.clone(),
        }
    }
}

/// Install the global subscriber, appending to `log_file` when given.
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_default(log_file: Option<&Path>) -> io::Result<()> {
    let target = LogTarget::open(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(target)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
