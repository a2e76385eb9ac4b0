use std::io::{self, Stderr, Write};
use std::sync::Mutex;

use tracing::debug;

use crate::services::Reporter;

/// Writes `Warning: <message>` lines to a stream, stderr in production.
pub struct StreamReporter<W> {
    stream: Mutex<W>,
}

impl StreamReporter<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> StreamReporter<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream: Mutex::new(stream),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.stream.into_inner().unwrap()
    }
}

impl<W: Write + Send> Reporter for StreamReporter<W> {
    fn warn(&self, message: &str) {
        let Ok(mut stream) = self.stream.lock() else {
            return;
        };
        if let Err(err) = writeln!(stream, "Warning: {message}") {
            debug!("could not print warning: {err}");
        }
    }
}

#[cfg(test)]
pub use memory::MemoryReporter;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_each_warning() {
        let reporter = StreamReporter::new(Vec::new());
        reporter.warn("first");
        reporter.warn("second");

        let printed = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(printed, "Warning: first\nWarning: second\n");
    }
}
