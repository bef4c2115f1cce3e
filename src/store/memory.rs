//! In-memory reference implementation of the store traits.
//!
//! Events are sharded per employee: appends for different employees only contend on the
//! shard map for the lookup, and appends for one employee are serialized by that
//! employee's shard lock, which is also where the id is handed out.

use super::{EmployeeDirectory, EventStore, OpContext, in_range};
use crate::errors::StoreError;
use crate::models::employee::Employee;
use crate::models::event::{AttendanceEvent, EventId, NewEvent};
use crate::utils::time::Timestamp;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

type Shard = Arc<Mutex<Vec<AttendanceEvent>>>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    last_id: AtomicI64,
    shards: RwLock<HashMap<String, Shard>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events across all employees.
    pub fn len(&self) -> usize {
        self.shards
            .read()
            .map(|m| {
                m.values()
                    .map(|s| s.lock().map(|v| v.len()).unwrap_or(0))
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn existing_shard(&self, employee_id: &str, ctx: &OpContext) -> Result<Option<Shard>, StoreError> {
        let map = ctx.acquire(|| self.shards.try_read())?;
        Ok(map.get(employee_id).cloned())
    }

    fn shard_for(&self, employee_id: &str, ctx: &OpContext) -> Result<Shard, StoreError> {
        if let Some(shard) = self.existing_shard(employee_id, ctx)? {
            return Ok(shard);
        }
        let mut map = ctx.acquire(|| self.shards.try_write())?;
        Ok(map.entry(employee_id.to_string()).or_default().clone())
    }

    fn snapshot_shards(&self, ctx: &OpContext) -> Result<Vec<(String, Shard)>, StoreError> {
        let map = ctx.acquire(|| self.shards.try_read())?;
        Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl EventStore for MemoryStore {
    fn append(&self, event: NewEvent, ctx: &OpContext) -> Result<EventId, StoreError> {
        let shard = self.shard_for(&event.employee_id, ctx)?;
        let mut events = ctx.acquire(|| shard.try_lock())?;

        // Last point where the append can still be abandoned without side effects.
        ctx.check()?;

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = event.into_stored(id);
        let pos = events.partition_point(|e| e.order_key() <= stored.order_key());
        events.insert(pos, stored);

        Ok(id)
    }

    fn list_by_employee(
        &self,
        employee_id: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        ctx: &OpContext,
    ) -> Result<Vec<AttendanceEvent>, StoreError> {
        let Some(shard) = self.existing_shard(employee_id, ctx)? else {
            return Ok(Vec::new());
        };
        let events = ctx.acquire(|| shard.try_lock())?;

        Ok(events
            .iter()
            .filter(|e| in_range(&e.timestamp, from.as_ref(), to.as_ref()))
            .cloned()
            .collect())
    }

    fn list_all(
        &self,
        from: Timestamp,
        to: Timestamp,
        ctx: &OpContext,
    ) -> Result<BTreeMap<String, Vec<AttendanceEvent>>, StoreError> {
        let mut out = BTreeMap::new();

        for (employee_id, shard) in self.snapshot_shards(ctx)? {
            let events = ctx.acquire(|| shard.try_lock())?;
            let in_window: Vec<AttendanceEvent> = events
                .iter()
                .filter(|e| in_range(&e.timestamp, Some(&from), Some(&to)))
                .cloned()
                .collect();

            if !in_window.is_empty() {
                out.insert(employee_id, in_window);
            }
        }

        Ok(out)
    }

    fn last_before(
        &self,
        employee_id: &str,
        before: Timestamp,
        ctx: &OpContext,
    ) -> Result<Option<AttendanceEvent>, StoreError> {
        let Some(shard) = self.existing_shard(employee_id, ctx)? else {
            return Ok(None);
        };
        let events = ctx.acquire(|| shard.try_lock())?;

        Ok(events.iter().rev().find(|e| e.timestamp < before).cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryDirectory {
    employees: RwLock<BTreeMap<String, Employee>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let map = employees
            .into_iter()
            .map(|e| (e.employee_id.clone(), e))
            .collect();
        Self {
            employees: RwLock::new(map),
        }
    }

    /// Insert or replace a directory entry.
    pub fn insert(&self, employee: Employee, ctx: &OpContext) -> Result<(), StoreError> {
        let mut map = ctx.acquire(|| self.employees.try_write())?;
        map.insert(employee.employee_id.clone(), employee);
        Ok(())
    }
}

impl EmployeeDirectory for MemoryDirectory {
    fn resolve(&self, employee_id: &str, ctx: &OpContext) -> Result<Option<Employee>, StoreError> {
        let map = ctx.acquire(|| self.employees.try_read())?;
        Ok(map.get(employee_id).cloned())
    }

    fn list_employees(&self, ctx: &OpContext) -> Result<Vec<Employee>, StoreError> {
        let map = ctx.acquire(|| self.employees.try_read())?;
        let mut out: Vec<Employee> = map.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.employee_id.cmp(&b.employee_id)));
        Ok(out)
    }
}
