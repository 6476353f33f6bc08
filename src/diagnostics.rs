//! Advisory diagnostics
//! Non-fatal findings (sandbox mode, unrecognized vocabulary, id prefixes) are
//! delivered as values to a [`DiagnosticSink`] so callers can capture or mute them.

use std::fmt;
use std::sync::Mutex;

use tracing::{debug, warn};

/// A non-fatal finding. The request still goes out; PayPal decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Client was configured for the sandbox host
    SandboxEnvironment { base_url: String },
    /// Value outside the known vocabulary
    UnknownValue {
        vocabulary: &'static str,
        value: String,
    },
    /// Expected vocabulary value left out
    MissingValue { vocabulary: &'static str },
    /// Idempotency id without the recommended prefix
    MissingIdPrefix {
        expected: &'static str,
        request_id: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SandboxEnvironment { base_url } => {
                write!(f, "ENVIRONMENT=sandbox ({})", base_url)
            }
            Advisory::UnknownValue { vocabulary, value } => {
                write!(f, "unknown {} '{}'", vocabulary, value)
            }
            Advisory::MissingValue { vocabulary } => write!(f, "missing {}", vocabulary),
            Advisory::MissingIdPrefix {
                expected,
                request_id,
            } => write!(f, "request id '{}' should start with \"{}\"", request_id, expected),
        }
    }
}

/// Receives advisories emitted by the client
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, advisory: &Advisory);
}

/// Default sink: forwards advisories to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, advisory: &Advisory) {
        match advisory {
            Advisory::SandboxEnvironment { base_url } => {
                debug!(base_url = %base_url, "[PayPal Checkout] ENVIRONMENT=sandbox");
            }
            other => warn!("[PayPal Checkout] {}", other),
        }
    }
}

/// Drops every advisory
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl DiagnosticSink for SilentDiagnostics {
    fn emit(&self, _advisory: &Advisory) {}
}

/// Keeps advisories in memory for later inspection
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    advisories: Mutex<Vec<Advisory>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything collected so far
    pub fn advisories(&self) -> Vec<Advisory> {
        match self.advisories.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain collected advisories
    pub fn take(&self) -> Vec<Advisory> {
        match self.advisories.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn emit(&self, advisory: &Advisory) {
        match self.advisories.lock() {
            Ok(mut guard) => guard.push(advisory.clone()),
            Err(poisoned) => poisoned.into_inner().push(advisory.clone()),
        }
    }
}
