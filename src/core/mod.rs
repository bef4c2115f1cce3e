pub mod aggregator;
pub mod config;
pub mod log;
pub mod reconstructor;
pub mod report;
pub mod service;
pub mod validator;
pub mod window;

pub use service::{AttendanceService, ServiceOptions};
