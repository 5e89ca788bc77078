use crate::db::models::{DbChild, DbDose};
use crate::service::schedule::DATE_FORMAT;

fn field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Schedule export: two header rows for the child, a blank line, then one
/// `Vaccine,Due Date,Status` row per dose.
pub fn schedule_csv(child: &DbChild, doses: &[DbDose]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Child Name,{}\r\n", field(&child.name)));
    out.push_str(&format!(
        "Date of Birth,{}\r\n",
        field(child.dob.as_deref().unwrap_or(""))
    ));
    out.push_str("\r\n");
    out.push_str("Vaccine,Due Date,Status\r\n");
    for dose in doses {
        out.push_str(&format!(
            "{},{},{}\r\n",
            field(&dose.vaccine),
            dose.due_date.format(DATE_FORMAT),
            dose.status
        ));
    }
    out
}

/// File name offered for download, limited to characters safe in a header.
pub fn export_filename(child: &DbChild) -> String {
    let stem: String = child
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_vaccination_schedule.csv")
}
