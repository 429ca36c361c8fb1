use chrono::{DateTime, Utc};

/// Injected time source.
///
/// Visibility is always computed against an explicit instant, read once
/// per request, so the filter stays deterministic and testable. Two
/// concurrent requests may observe different instants for a post whose
/// `pub_date` sits on the boundary; that is accepted.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the running server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant, for tests exercising the
/// visibility boundary.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
