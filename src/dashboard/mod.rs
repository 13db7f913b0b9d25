pub mod controller;
pub mod snapshot;

pub use controller::DashboardController;
pub use snapshot::DashboardSnapshot;
