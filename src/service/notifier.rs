use tracing::info;

use crate::db::models::Reminder;
use crate::service::schedule::DATE_FORMAT;

/// Delivers a reminder for one dose to the child's guardian.
pub trait Notifier: Send + Sync {
    /// Returns `(delivered, message for the operator)`.
    fn send(&self, reminder: &Reminder) -> (bool, String);
}

/// Text of the reminder sent to a guardian.
pub fn format_reminder(reminder: &Reminder) -> String {
    let greeting = match reminder.parent_name.as_deref().map(str::trim) {
        Some(parent) if !parent.is_empty() => format!("Dear {parent}, "),
        _ => String::new(),
    };
    format!(
        "{greeting}Reminder: {}'s {} vaccination is due on {}. Please visit the clinic.",
        reminder.child_name,
        reminder.vaccine,
        reminder.due_date.format(DATE_FORMAT)
    )
}

/// Stand-in for an SMS gateway: logs the message instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSmsNotifier;

impl Notifier for MockSmsNotifier {
    fn send(&self, reminder: &Reminder) -> (bool, String) {
        let Some(phone) = reminder
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        else {
            return (
                false,
                format!("No phone number on file for {}", reminder.child_name),
            );
        };
        let message = format_reminder(reminder);
        info!(phone, dose_id = reminder.dose_id, %message, "mock SMS sent");
        (true, format!("SMS sent to {phone}: {message}"))
    }
}
