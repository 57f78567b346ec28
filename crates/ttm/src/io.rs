//! Pluggable standard streams.
//!
//! `ps`/`rs` and friends never touch `std::io` directly: they go through
//! [`OutputSink`] and [`InputSource`] so the interpreter can run headless
//! inside a host process (tests, an embedding application) or attached to
//! the process's real stdio (the CLI collaborator).

use std::io::{self, Write as _};

/// Destination for `ps` and the trace logger.
pub trait OutputSink {
    fn write_stdout(&mut self, s: &str);
    fn write_stderr(&mut self, s: &str);
}

/// Source for `rs` and `psr`.
pub trait InputSource {
    /// Reads characters up to and including the first occurrence of `stop`,
    /// returning the characters read without `stop`. `None` at EOF with
    /// nothing read.
    fn read_until(&mut self, stop: char) -> Option<String>;
}

/// Writes to the process's real stdout/stderr.
#[derive(Debug, Default)]
pub struct StdSink;

impl OutputSink for StdSink {
    fn write_stdout(&mut self, s: &str) {
        let _ = io::stdout().write_all(s.as_bytes());
        let _ = io::stdout().flush();
    }

    fn write_stderr(&mut self, s: &str) {
        let _ = io::stderr().write_all(s.as_bytes());
        let _ = io::stderr().flush();
    }
}

/// Reads from the process's real stdin.
#[derive(Debug, Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_until(&mut self, stop: char) -> Option<String> {
        let mut out = String::new();
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        loop {
            let mut byte = [0u8; 1];
            match io::Read::read(&mut lock, &mut byte) {
                Ok(0) => return if out.is_empty() { None } else { Some(out) },
                Ok(_) => {
                    let c = byte[0] as char;
                    if c == stop {
                        return Some(out);
                    }
                    out.push(c);
                }
                Err(_) => return if out.is_empty() { None } else { Some(out) },
            }
        }
    }
}

/// Collects everything written to stdout/stderr into in-memory strings.
///
/// Used by tests and by embedders that want the final output as a `String`
/// rather than a side effect on real stdio.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub stdout: String,
    pub stderr: String,
}

impl OutputSink for CollectSink {
    fn write_stdout(&mut self, s: &str) {
        self.stdout.push_str(s);
    }

    fn write_stderr(&mut self, s: &str) {
        self.stderr.push_str(s);
    }
}

/// Feeds a fixed string to `rs`, one `read_until` call consuming a prefix at a time.
#[derive(Debug, Default)]
pub struct StringSource {
    remaining: String,
}

impl StringSource {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self { remaining: s.into() }
    }
}

impl InputSource for StringSource {
    fn read_until(&mut self, stop: char) -> Option<String> {
        if self.remaining.is_empty() {
            return None;
        }
        match self.remaining.find(stop) {
            Some(idx) => {
                let head = self.remaining[..idx].to_string();
                self.remaining.replace_range(..=idx, "");
                Some(head)
            }
            None => Some(std::mem::take(&mut self.remaining)),
        }
    }
}

/// Discards all output, returns EOF on every read. Useful for fuzzing and
/// benchmarking where stdio noise is unwanted.
#[derive(Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write_stdout(&mut self, _s: &str) {}
    fn write_stderr(&mut self, _s: &str) {}
}
