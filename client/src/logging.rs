use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Buffers one formatted event and hands it to the console when dropped.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => console::error_1(&line.into()),
            Level::WARN => console::warn_1(&line.into()),
            _ => console::log_1(&line.into()),
        }
    }
}

struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> ConsoleWriter {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleWriter {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Routes `tracing` output to the browser console. The wasm target has no
/// clock, so events are written without timestamps.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(Level::DEBUG)
        .without_time()
        .try_init();
    if installed.is_err() {
        console::warn_1(&"logger already installed".into());
    }
}
