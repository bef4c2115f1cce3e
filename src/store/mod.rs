//! Persistence seam used by the core.
//!
//! The core never talks to a storage engine directly: it needs an append-only event log
//! ([`EventStore`]) and an employee lookup ([`EmployeeDirectory`]). `memory` is the
//! reference implementation; `crate::db::store` backs both traits with SQLite.
//!
//! Every operation receives an [`OpContext`] carrying a cancellation token and an optional
//! deadline, and must give up with [`StoreError::Cancelled`] instead of blocking forever.

pub mod memory;

use crate::errors::{CancelReason, StoreError};
use crate::models::employee::Employee;
use crate::models::event::{AttendanceEvent, EventId, NewEvent};
use crate::utils::time::Timestamp;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, TryLockError, TryLockResult};
use std::thread;
use std::time::{Duration, Instant};

pub use memory::{MemoryDirectory, MemoryStore};

const LOCK_POLL: Duration = Duration::from_millis(2);

/// Shared flag a caller flips to abandon in-flight operations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-call cancellation state handed to every store operation.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    cancel: CancelToken,
    deadline: Option<Instant>,
}

impl OpContext {
    pub fn new(cancel: CancelToken, timeout: Option<Duration>) -> Self {
        Self {
            cancel,
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    /// No deadline, never cancelled.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn check(&self) -> Result<(), StoreError> {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled(CancelReason::Requested));
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(StoreError::Cancelled(CancelReason::TimedOut));
        }
        Ok(())
    }

    /// Spin on a `try_lock`-style acquisition until it succeeds or the context expires.
    pub fn acquire<G>(
        &self,
        mut try_acquire: impl FnMut() -> TryLockResult<G>,
    ) -> Result<G, StoreError> {
        loop {
            self.check()?;
            match try_acquire() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::WouldBlock) => thread::sleep(LOCK_POLL),
                Err(TryLockError::Poisoned(_)) => {
                    return Err(StoreError::Unavailable("lock poisoned".into()));
                }
            }
        }
    }
}

/// Append-only attendance log.
///
/// Ranges are half-open: `from` inclusive, `to` exclusive. Listings are ordered by
/// `(timestamp, event_id)` ascending.
/// Timestamps are kept to the millisecond, the precision the validator produces.
pub trait EventStore: Send + Sync {
    /// Record the event atomically and return its id. Appends for one employee are
    /// serialized so that id order matches submission order.
    fn append(&self, event: NewEvent, ctx: &OpContext) -> Result<EventId, StoreError>;

    fn list_by_employee(
        &self,
        employee_id: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        ctx: &OpContext,
    ) -> Result<Vec<AttendanceEvent>, StoreError>;

    /// Employees without events in range are absent from the map.
    fn list_all(
        &self,
        from: Timestamp,
        to: Timestamp,
        ctx: &OpContext,
    ) -> Result<BTreeMap<String, Vec<AttendanceEvent>>, StoreError>;

    /// Most recent event strictly before `before`.
    fn last_before(
        &self,
        employee_id: &str,
        before: Timestamp,
        ctx: &OpContext,
    ) -> Result<Option<AttendanceEvent>, StoreError>;
}

/// Read access to the employee directory.
pub trait EmployeeDirectory: Send + Sync {
    fn resolve(&self, employee_id: &str, ctx: &OpContext) -> Result<Option<Employee>, StoreError>;

    /// All employees ordered by name, then id.
    fn list_employees(&self, ctx: &OpContext) -> Result<Vec<Employee>, StoreError>;
}

impl<T: EventStore + ?Sized> EventStore for &T {
    fn append(&self, event: NewEvent, ctx: &OpContext) -> Result<EventId, StoreError> {
        (**self).append(event, ctx)
    }

    fn list_by_employee(
        &self,
        employee_id: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        ctx: &OpContext,
    ) -> Result<Vec<AttendanceEvent>, StoreError> {
        (**self).list_by_employee(employee_id, from, to, ctx)
    }

    fn list_all(
        &self,
        from: Timestamp,
        to: Timestamp,
        ctx: &OpContext,
    ) -> Result<BTreeMap<String, Vec<AttendanceEvent>>, StoreError> {
        (**self).list_all(from, to, ctx)
    }

    fn last_before(
        &self,
        employee_id: &str,
        before: Timestamp,
        ctx: &OpContext,
    ) -> Result<Option<AttendanceEvent>, StoreError> {
        (**self).last_before(employee_id, before, ctx)
    }
}

impl<T: EmployeeDirectory + ?Sized> EmployeeDirectory for &T {
    fn resolve(&self, employee_id: &str, ctx: &OpContext) -> Result<Option<Employee>, StoreError> {
        (**self).resolve(employee_id, ctx)
    }

    fn list_employees(&self, ctx: &OpContext) -> Result<Vec<Employee>, StoreError> {
        (**self).list_employees(ctx)
    }
}

/// `true` when `ts` lies in `[from, to)`, open bounds being unbounded.
pub(crate) fn in_range(ts: &Timestamp, from: Option<&Timestamp>, to: Option<&Timestamp>) -> bool {
    from.is_none_or(|f| ts >= f) && to.is_none_or(|t| ts < t)
}
