//! Logging setup and the stderr buffer used while the TUI owns the terminal

use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static BUFFER: Mutex<Option<Vec<u8>>> = Mutex::new(None);

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "fantasy_hoops=debug" } else { "fantasy_hoops=warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(|| BufferedStderr)
        .with_ansi(false)
        .without_time();

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
}

/// Activate buffering. While active, log output is stored instead of
/// printed to stderr.
pub fn activate_buffer() {
    *BUFFER.lock().unwrap_or_else(|e| e.into_inner()) = Some(Vec::new());
}

/// Deactivate buffering and return all collected lines.
pub fn drain_buffer() -> Vec<String> {
    let bytes = BUFFER
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .take()
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Flush buffered lines to stderr now that the terminal is restored.
pub fn flush_buffer() {
    for line in drain_buffer() {
        eprintln!("{}", line);
    }
}

/// stderr, or the in-memory buffer when it is active
struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = BUFFER.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_mut() {
            Some(buf) => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
            None => {
                drop(guard);
                io::stderr().write(data)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_collects_lines_until_drained() {
        activate_buffer();
        let mut writer = BufferedStderr;
        writer.write_all(b"first line\nsecond line\n").unwrap();

        let lines = drain_buffer();
        assert_eq!(lines, vec!["first line".to_string(), "second line".to_string()]);
        assert!(drain_buffer().is_empty());
    }
}
