use crate::diagnostics::{Warning, WarningCode};
use crate::warn;

/// Sink for non-fatal diagnostics.
pub trait Reporter {
    fn report(&mut self, warning: Warning);
}

impl<F: FnMut(Warning)> Reporter for F {
    fn report(&mut self, warning: Warning) {
        self(warning)
    }
}

/// Keeps every reported warning in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub warnings: Vec<Warning>,
}

impl CollectingReporter {
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// True if at least one warning with `code` was reported.
    pub fn has(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    pub fn into_inner(self) -> Vec<Warning> {
        self.warnings
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, warning: Warning) {
        warn!(code = %warning.code, "{}", warning.message);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _warning: Warning) {}
}
