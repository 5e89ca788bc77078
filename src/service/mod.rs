pub mod notifier;
pub mod reports;
pub mod schedule;
