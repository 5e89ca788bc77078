use chrono::NaiveDate;
use std::fmt::Write;

use super::{escape, layout, opt};
use crate::db::models::{DbChild, DbDose, DoseStatus, Reminder};
use crate::service::reports::{AdminOverview, ReportSummary};
use crate::service::schedule::{DATE_FORMAT, VACCINE_SCHEDULE};

/// Values shown in the add/edit form.
#[derive(Debug, Clone, Default)]
pub struct ChildFormView<'a> {
    pub name: &'a str,
    pub dob: &'a str,
    pub parent_name: &'a str,
    pub phone: &'a str,
    pub notes: &'a str,
}

impl<'a> From<&'a DbChild> for ChildFormView<'a> {
    fn from(c: &'a DbChild) -> Self {
        Self {
            name: &c.name,
            dob: c.dob.as_deref().unwrap_or(""),
            parent_name: c.parent_name.as_deref().unwrap_or(""),
            phone: c.phone.as_deref().unwrap_or(""),
            notes: c.notes.as_deref().unwrap_or(""),
        }
    }
}

fn date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

fn dose_label(dose: Option<&DbDose>) -> String {
    match dose {
        Some(d) => format!("{} ({})", escape(&d.vaccine), date(d.due_date)),
        None => "None".to_string(),
    }
}

pub fn children_index(
    children: &[(DbChild, Option<DbDose>)],
    search: Option<&str>,
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h2>Children</h2>
<form method="get" action="/">
<input type="text" name="q" value="{}" placeholder="Search name, parent or phone">
<button type="submit">Search</button>
</form>
"#,
        opt(search)
    );
    if children.is_empty() {
        body.push_str("<p>No children found.</p>\n");
        return layout("Children", flash, &body);
    }
    body.push_str(
        "<table>\n<tr><th>Name</th><th>Date of birth</th><th>Parent</th><th>Phone</th><th>Next dose</th><th></th></tr>\n",
    );
    for (child, next) in children {
        let _ = writeln!(
            body,
            r#"<tr><td><a href="/child/{id}">{name}</a></td><td>{dob}</td><td>{parent}</td><td>{phone}</td><td>{next}</td><td><a href="/edit/{id}">Edit</a> <a href="/delete/{id}" onclick="return confirm('Delete this child?')">Delete</a></td></tr>"#,
            id = child.id,
            name = escape(&child.name),
            dob = opt(child.dob.as_deref()),
            parent = opt(child.parent_name.as_deref()),
            phone = opt(child.phone.as_deref()),
            next = dose_label(next.as_ref()),
        );
    }
    body.push_str("</table>\n");
    layout("Children", flash, &body)
}

pub fn child_form(
    heading: &str,
    action: &str,
    values: &ChildFormView<'_>,
    flash: Option<&str>,
) -> String {
    let body = format!(
        r#"<h2>{heading}</h2>
<form method="post" action="{action}">
<p><label>Name* <input type="text" name="name" value="{name}" required></label></p>
<p><label>Date of birth <input type="date" name="dob" value="{dob}"></label></p>
<p><label>Parent name <input type="text" name="parent_name" value="{parent}"></label></p>
<p><label>Phone <input type="tel" name="phone" value="{phone}"></label></p>
<p><label>Notes <textarea name="notes">{notes}</textarea></label></p>
<p><button type="submit">Save</button> <a href="/">Cancel</a></p>
</form>
"#,
        heading = escape(heading),
        action = escape(action),
        name = escape(values.name),
        dob = escape(values.dob),
        parent = escape(values.parent_name),
        phone = escape(values.phone),
        notes = escape(values.notes),
    );
    layout(heading, flash, &body)
}

fn dose_rows(doses: &[DbDose], child_id: i64, actions: bool) -> String {
    let mut rows = String::new();
    for dose in doses {
        let _ = write!(
            rows,
            r#"<tr><td>{vaccine}</td><td>{due}</td><td class="{status}">{status}</td>"#,
            vaccine = escape(&dose.vaccine),
            due = date(dose.due_date),
            status = dose.status,
        );
        if actions {
            let toggle = match dose.status {
                DoseStatus::Upcoming => "Mark done",
                DoseStatus::Done => "Mark upcoming",
            };
            let _ = write!(
                rows,
                r#"<td><a href="/vaccine_toggle/{dose_id}">{toggle}</a> <a href="/send_sms/{child_id}/{dose_id}">Send SMS</a></td>"#,
                dose_id = dose.id,
            );
        }
        rows.push_str("</tr>\n");
    }
    rows
}

pub fn child_detail(
    child: &DbChild,
    doses: &[DbDose],
    next: Option<&DbDose>,
    flash: Option<&str>,
) -> String {
    let mut body = format!(
        r#"<h2>{name}</h2>
<p>Date of birth: {dob}<br>Parent: {parent}<br>Phone: {phone}</p>
<p>Notes: {notes}</p>
<p>Next dose: {next}</p>
<p><a href="/edit/{id}">Edit</a> | <a href="/print/{id}">Print</a> | <a href="/export/{id}/csv">Export CSV</a></p>
"#,
        id = child.id,
        name = escape(&child.name),
        dob = opt(child.dob.as_deref()),
        parent = opt(child.parent_name.as_deref()),
        phone = opt(child.phone.as_deref()),
        notes = opt(child.notes.as_deref()),
        next = dose_label(next),
    );
    if doses.is_empty() {
        body.push_str("<p>No schedule yet. Add a date of birth to generate one.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Vaccine</th><th>Due date</th><th>Status</th><th></th></tr>\n",
        );
        body.push_str(&dose_rows(doses, child.id, true));
        body.push_str("</table>\n");
    }
    layout(&child.name, flash, &body)
}

/// Standalone page without navigation, meant for the browser's print dialog.
pub fn print_schedule(child: &DbChild, doses: &[DbDose]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Vaccination schedule: {name}</title></head>
<body onload="window.print()">
<h1>Vaccination schedule</h1>
<p>Child: {name}<br>Date of birth: {dob}<br>Parent: {parent}<br>Phone: {phone}</p>
<table border="1" cellpadding="4">
<tr><th>Vaccine</th><th>Due date</th><th>Status</th></tr>
{rows}</table>
</body>
</html>
"#,
        name = escape(&child.name),
        dob = opt(child.dob.as_deref()),
        parent = opt(child.parent_name.as_deref()),
        phone = opt(child.phone.as_deref()),
        rows = dose_rows(doses, child.id, false),
    )
}

fn reminder_table(reminders: &[Reminder]) -> String {
    let mut table = String::from(
        "<table>\n<tr><th>Due date</th><th>Child</th><th>Vaccine</th><th>Parent</th><th>Phone</th><th></th></tr>\n",
    );
    for r in reminders {
        let _ = writeln!(
            table,
            r#"<tr><td>{due}</td><td><a href="/child/{child_id}">{child}</a></td><td>{vaccine}</td><td>{parent}</td><td>{phone}</td><td><a href="/send_sms/{child_id}/{dose_id}">Send SMS</a></td></tr>"#,
            due = date(r.due_date),
            child_id = r.child_id,
            dose_id = r.dose_id,
            child = escape(&r.child_name),
            vaccine = escape(&r.vaccine),
            parent = opt(r.parent_name.as_deref()),
            phone = opt(r.phone.as_deref()),
        );
    }
    table.push_str("</table>\n");
    table
}

pub fn reminders(list: &[Reminder], days: u64, flash: Option<&str>) -> String {
    let mut body = format!(
        r#"<h2>Reminders</h2>
<form method="get" action="/reminders">
<label>Due within <input type="number" name="days" min="0" value="{days}"> days</label>
<button type="submit">Show</button>
</form>
"#
    );
    if list.is_empty() {
        let _ = writeln!(body, "<p>No doses due in the next {days} days.</p>");
    } else {
        body.push_str(&reminder_table(list));
    }
    layout("Reminders", flash, &body)
}

pub fn admin(overview: &AdminOverview, flash: Option<&str>) -> String {
    let stats = &overview.stats;
    let mut body = format!(
        r#"<h2>Admin dashboard</h2>
<ul>
<li>Children: {children}</li>
<li>Total doses: {total}</li>
<li>Done: {done}</li>
<li>Upcoming: {upcoming}</li>
<li>Overdue: {overdue}</li>
<li>Completion rate: {rate}</li>
</ul>
<h3>Overdue doses</h3>
"#,
        children = overview.children,
        total = stats.total,
        done = stats.done,
        upcoming = stats.upcoming,
        overdue = stats.overdue,
        rate = stats.completion_rate(),
    );
    if overview.overdue.is_empty() {
        body.push_str("<p>Nothing overdue.</p>\n");
    } else {
        body.push_str(&reminder_table(&overview.overdue));
    }
    layout("Admin", flash, &body)
}

pub fn reports(summary: &ReportSummary, flash: Option<&str>) -> String {
    let stats = &summary.stats;
    let mut body = format!(
        r#"<h2>Reports</h2>
<table>
<tr><th>Done</th><th>Upcoming</th><th>Overdue</th><th>Total</th><th>Completion rate</th></tr>
<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>
</table>
<h3>Coverage by vaccine</h3>
"#,
        stats.done,
        stats.upcoming,
        stats.overdue,
        stats.total,
        stats.completion_rate(),
    );
    if summary.coverage.is_empty() {
        body.push_str("<p>No doses recorded yet.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Vaccine</th><th>Done</th><th>Total</th></tr>\n");
        for c in &summary.coverage {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&c.vaccine),
                c.done,
                c.total
            );
        }
        body.push_str("</table>\n");
    }
    layout("Reports", flash, &body)
}

pub fn schedule_reference(flash: Option<&str>) -> String {
    let mut body = String::from(
        "<h2>Vaccine Schedule</h2>\n<table>\n<tr><th>Vaccine</th><th>Days after birth</th></tr>\n",
    );
    for (vaccine, offset) in VACCINE_SCHEDULE {
        let _ = writeln!(body, "<tr><td>{vaccine}</td><td>{offset}</td></tr>");
    }
    body.push_str("</table>\n");
    layout("Vaccine Schedule", flash, &body)
}
