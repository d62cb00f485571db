pub mod scheduling_repo;
pub use scheduling_repo::SchedulingRepository;
pub mod timesheet_repo;
pub use timesheet_repo::TimesheetRepository;
pub mod availability_repo;
pub use availability_repo::AvailabilityRepository;
pub mod confirmation_repo;
pub use confirmation_repo::ConfirmationRepository;
