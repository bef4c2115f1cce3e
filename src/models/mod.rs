pub mod action;
pub mod employee;
pub mod event;
pub mod interval;
pub mod location;
pub mod raw_scan;
pub mod weekly_total;
