//! Destination of `puts` output.
//!
//! The REPL and file runner print to stdout and tests capture into a buffer.
//! `Silent` discards everything. Handlers are shared with launched tasks,
//! so each line is written atomically.

use std::sync::Arc;

use parking_lot::Mutex;

/// Output destination, dispatched by enum rather than trait object.
pub enum PrintHandlerImpl {
    /// Lines go to the process's stdout.
    Stdout,
    /// Lines accumulate in memory.
    Buffer(Mutex<String>),
    /// Output is dropped.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `line` followed by a newline.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far. Empty unless this is a buffer.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Discard captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared between an interpreter and the tasks it launches.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// Handler that captures output for later inspection with
/// [`PrintHandlerImpl::get_output`].
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
