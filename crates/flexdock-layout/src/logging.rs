#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Re-exports the tracing macros the engine uses when the `tracing` feature
//! is enabled, and no-op stand-ins when it is not, so call sites never need
//! their own `cfg` gates.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    pub(crate) use {debug, debug_span, warn};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop_macros::{debug, debug_span, warn};

/// Span stand-in when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub(crate) struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub(crate) fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) struct NoopGuard;
