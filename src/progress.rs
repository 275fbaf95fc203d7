use std::io::{self, Write};

/// Progress reporting for extractors that walk many sub-pages.
pub trait Progress {
    /// Called once with the number of items about to be processed.
    fn begin(&mut self, _total: usize) {}

    /// Called when one item completes.
    fn item_done(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Redraws a `[done/total] label` line on stderr.
#[derive(Default)]
pub struct TerminalProgress {
    total: usize,
    done: usize,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for TerminalProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        // best effort: a broken stderr must not stop the scrape
        let mut err = io::stderr().lock();
        write!(err, "\r\x1b[2K[{}/{}] {}", self.done, self.total, label).ok();
        err.flush().ok();
    }

    fn finish(&mut self) {
        if self.done > 0 {
            writeln!(io::stderr()).ok();
        }
    }
}

/// Records every callback; handy for asserting traversal order.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub items: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn item_done(&mut self, label: &str) {
        self.items.push(label.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
