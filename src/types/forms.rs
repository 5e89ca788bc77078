use serde::Deserialize;

use crate::db::models::ChildFields;

/// Body of the add/edit child forms. Every field is optional on the wire so a
/// missing name can be reported instead of rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ChildForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default, alias = "parent")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ChildForm {
    /// Trimmed field values, or `None` when the required name is blank.
    pub fn into_fields(self) -> Option<ChildFields> {
        Some(ChildFields {
            name: present(self.name)?,
            dob: present(self.dob),
            parent_name: present(self.parent_name),
            phone: present(self.phone),
            notes: present(self.notes),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// `days` stays raw text so bad input can fall back to the default window.
#[derive(Debug, Default, Deserialize)]
pub struct ReminderQuery {
    #[serde(default)]
    pub days: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(ChildForm::default().into_fields().is_none());
        let form = ChildForm {
            name: Some("   ".to_string()),
            ..ChildForm::default()
        };
        assert!(form.into_fields().is_none());
    }

    #[test]
    fn fields_are_trimmed_and_blanks_dropped() {
        let form = ChildForm {
            name: Some(" Asha ".to_string()),
            dob: Some("2024-01-01".to_string()),
            parent_name: Some("".to_string()),
            phone: Some(" 9999999999".to_string()),
            notes: None,
        };
        let fields = form.into_fields().unwrap();
        assert_eq!(fields.name, "Asha");
        assert_eq!(fields.dob.as_deref(), Some("2024-01-01"));
        assert_eq!(fields.parent_name, None);
        assert_eq!(fields.phone.as_deref(), Some("9999999999"));
    }
}
