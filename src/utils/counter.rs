//! A simple counter for tracking the result of a run.
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

/// A counter for tracking packed files, warnings and errors.
pub struct Counter {
    files: AtomicUsize,
    bytes: AtomicU64,
    error: AtomicUsize,
    warning: AtomicUsize,
}

impl Counter {
    /// Creates a new Counter instance.
    pub fn new() -> Self {
        Self {
            files: AtomicUsize::new(0),
            bytes: AtomicU64::new(0),
            error: AtomicUsize::new(0),
            warning: AtomicUsize::new(0),
        }
    }

    /// Records one file of `size` bytes.
    pub fn inc_file(&self, size: u64) {
        self.files.fetch_add(1, SeqCst);
        self.bytes.fetch_add(size, SeqCst);
    }

    /// Increments the count of errors.
    pub fn inc_error(&self) {
        self.error.fetch_add(1, SeqCst);
    }

    /// Increments the count of warnings.
    pub fn inc_warning(&self) {
        self.warning.fetch_add(1, SeqCst);
    }

    pub fn warnings(&self) -> usize {
        self.warning.load(SeqCst)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Files: {}, Bytes: {}, Error: {}, Warning: {}",
            self.files.load(SeqCst),
            self.bytes.load(SeqCst),
            self.error.load(SeqCst),
            self.warning.load(SeqCst),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_display() {
        let counter = Counter::new();
        counter.inc_file(5);
        counter.inc_file(11);
        counter.inc_warning();
        assert_eq!(counter.warnings(), 1);
        assert_eq!(
            counter.to_string(),
            "Files: 2, Bytes: 16, Error: 0, Warning: 1"
        );
    }
}
