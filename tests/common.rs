#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::models::action::Action;
use rattendance::models::employee::Employee;
use rattendance::models::event::AttendanceEvent;
use rattendance::models::location::GeoPoint;
use rattendance::store::{MemoryDirectory, MemoryStore};
use rattendance::utils::time::{Timestamp, parse_instant};
use std::path::PathBuf;
use tempfile::TempDir;

/// Parse an RFC 3339 instant, panicking on bad test input.
pub fn ts(s: &str) -> Timestamp {
    parse_instant(s).unwrap_or_else(|| panic!("bad test timestamp {s}"))
}

/// Monday 2025-01-06 at `hh:mm` Mexico City time.
pub fn mon(hhmm: &str) -> Timestamp {
    ts(&format!("2025-01-06T{hhmm}:00-06:00"))
}

pub fn event(id: i64, employee: &str, action: Action, at: Timestamp) -> AttendanceEvent {
    AttendanceEvent {
        event_id: id,
        employee_id: employee.to_string(),
        action,
        timestamp: at,
        location: None,
    }
}

pub fn located(mut ev: AttendanceEvent, lat: f64, lon: f64) -> AttendanceEvent {
    ev.location = GeoPoint::new(lat, lon);
    ev
}

pub fn staff() -> Vec<Employee> {
    vec![
        Employee::new("E001", "Ana Torres", "Guardia"),
        Employee::new("E002", "Bruno Díaz", "Supervisor"),
        Employee::new("E003", "Ana Torres", "Limpieza"),
    ]
}

pub fn memory() -> (MemoryStore, MemoryDirectory) {
    (MemoryStore::new(), MemoryDirectory::with_employees(staff()))
}

/// Isolated HOME + database file for CLI tests.
pub struct TestEnv {
    pub home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = TempDir::new().expect("tempdir");
        let db = home
            .path()
            .join("attendance.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db }
    }

    /// Binary with HOME pointed at the sandbox and `--db` set.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rattendance");
        cmd.env("HOME", self.home.path())
            .env("APPDATA", self.home.path())
            .env_remove("RATTENDANCE_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    pub fn out_file(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    /// `init` plus the standard staff.
    pub fn init_with_staff(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
        for e in staff() {
            self.cmd()
                .args([
                    "employee",
                    "add",
                    &e.employee_id,
                    "--name",
                    &e.name,
                    "--role",
                    &e.role,
                ])
                .assert()
                .success();
        }
    }

    pub fn scan(&self, employee: &str, action: &str, at: &str) {
        self.cmd()
            .args(["scan", "--employee", employee, "--action", action, "--at", at])
            .assert()
            .success();
    }
}
