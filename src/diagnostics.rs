//! Where a pool reports the events it recovers from on its own.

use std::cell::RefCell;
use std::fmt;

use tracing::{error, warn};

pub trait Diagnostics: fmt::Debug {
    /// A non-fatal problem, e.g. a rejected duplicate record.
    fn error(&self, message: &str);

    fn warn(&self, message: &str);

    /// Messages the user should see even without a log subscriber.
    fn echo(&self, message: &str);
}

/// Logs through `tracing` and echoes to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    fn echo(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Level {
    Error,
    Warn,
    Echo,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: RefCell<Vec<(Level, String)>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    fn push(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_owned()));
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn echo(&self, message: &str) {
        self.push(Level::Echo, message);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for std::rc::Rc<D> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn echo(&self, message: &str) {
        (**self).echo(message)
    }
}
