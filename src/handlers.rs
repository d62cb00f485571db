pub mod availability;
pub mod scheduling;
pub mod reconciliation;
pub mod attendance;
