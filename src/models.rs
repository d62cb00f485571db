// src/models.rs

pub mod availability;
pub mod reconciliation;
pub mod scheduling;
pub mod timesheet;
