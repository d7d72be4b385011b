pub mod billing;
pub mod dashboard;
pub mod error;
pub mod reading;
pub mod reconcile;
