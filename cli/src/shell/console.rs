use std::io::Write;
use std::sync::{Arc, Mutex};

/// Where the shell writes its output. Shared with background wait reporters.
pub trait Console: Send + Sync {
    fn print(&self, text: &str);

    fn println(&self, text: &str) {
        self.print(&format!("{}\n", text));
    }
}

#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn print(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error=%e, "Failed to write to stdout");
        }
    }
}

/// Collects output in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    buf: Arc<Mutex<String>>,
}

impl BufferConsole {
    pub fn contents(&self) -> String {
        self.buf.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut b) = self.buf.lock() {
            b.clear();
        }
    }
}

impl Console for BufferConsole {
    fn print(&self, text: &str) {
        if let Ok(mut b) = self.buf.lock() {
            b.push_str(text);
        }
    }
}
