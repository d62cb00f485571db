pub mod availability_service;
pub use availability_service::AvailabilityService;
pub mod scheduling_service;
pub use scheduling_service::SchedulingService;
pub mod reconciliation_service;
pub use reconciliation_service::ReconciliationService;
pub mod confirmation_service;
pub use confirmation_service::ConfirmationService;
pub mod export_service;

#[cfg(test)]
mod reconciliation_tests;
#[cfg(test)]
mod export_tests;
