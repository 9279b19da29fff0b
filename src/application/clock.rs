// Clock seam so services never read wall-clock time directly
use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
