use crate::db::models::{
    ChildFields, DbChild, DbDose, DoseStatus, Reminder, VaccineCoverage,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::VaxError;
use crate::service::reports::DoseStats;
use crate::service::schedule::{self, DATE_FORMAT, RegeneratePolicy};
use chrono::{DateTime, Days, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Connection factory for the record store.
///
/// Every request opens its own connection through [`Store::connect`]; nothing
/// is pooled or shared between requests.
#[derive(Clone, Debug)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        Self { options }
    }

    pub async fn connect(&self) -> Result<Records, VaxError> {
        let conn = self.options.connect().await?;
        Ok(Records { conn })
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VaxError> {
        let mut records = self.connect().await?;
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut records.conn).await?;
        }
        records.close().await
    }
}

/// One open connection to the record store.
pub struct Records {
    conn: SqliteConnection,
}

const CHILD_COLUMNS: &str = "id, name, dob, parent_name, phone, notes, created_at";
const DOSE_COLUMNS: &str = "id, child_id, vaccine, due_date, status, updated_at";
const REMINDER_SELECT: &str = r#"
    SELECT v.id AS dose_id, v.child_id, c.name AS child_name, c.parent_name, c.phone,
           v.vaccine, v.due_date
    FROM vaccinations v
    JOIN children c ON c.id = v.child_id"#;

impl Records {
    pub async fn close(self) -> Result<(), VaxError> {
        self.conn.close().await?;
        Ok(())
    }

    pub async fn create_child(&mut self, fields: &ChildFields) -> Result<i64, VaxError> {
        let created_at = Utc::now().to_rfc3339();
        let res = sqlx::query(
            r#"INSERT INTO children (name, dob, parent_name, phone, notes, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&fields.name)
        .bind(&fields.dob)
        .bind(&fields.parent_name)
        .bind(&fields.phone)
        .bind(&fields.notes)
        .bind(created_at)
        .execute(&mut self.conn)
        .await?;
        let id = res.last_insert_rowid();
        info!(child_id = id, name = %fields.name, "child created");
        Ok(id)
    }

    /// Overwrite every editable field. Returns `false` when no such child exists.
    pub async fn update_child(&mut self, id: i64, fields: &ChildFields) -> Result<bool, VaxError> {
        let res = sqlx::query(
            r#"UPDATE children SET
                name = ?,
                dob = ?,
                parent_name = ?,
                phone = ?,
                notes = ?
              WHERE id = ?"#,
        )
        .bind(&fields.name)
        .bind(&fields.dob)
        .bind(&fields.parent_name)
        .bind(&fields.phone)
        .bind(&fields.notes)
        .bind(id)
        .execute(&mut self.conn)
        .await?;
        let updated = res.rows_affected() > 0;
        if updated {
            info!(child_id = id, "child updated");
        }
        Ok(updated)
    }

    pub async fn get_child(&mut self, id: i64) -> Result<Option<DbChild>, VaxError> {
        let row = sqlx::query(&format!("SELECT {CHILD_COLUMNS} FROM children WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut self.conn)
            .await?;
        row.map(Self::row_to_child).transpose()
    }

    /// Delete a child; its doses go with it through `ON DELETE CASCADE`.
    pub async fn delete_child(&mut self, id: i64) -> Result<bool, VaxError> {
        let res = sqlx::query("DELETE FROM children WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?;
        let deleted = res.rows_affected() > 0;
        if deleted {
            info!(child_id = id, "child deleted");
        }
        Ok(deleted)
    }

    /// List children, optionally filtered by a case-insensitive substring of
    /// name, parent name or phone.
    ///
    /// Matching happens here rather than in SQL: SQLite's `LIKE` only folds
    /// ASCII letters.
    pub async fn list_children(&mut self, search: Option<&str>) -> Result<Vec<DbChild>, VaxError> {
        let rows = sqlx::query(&format!(
            "SELECT {CHILD_COLUMNS} FROM children ORDER BY name COLLATE NOCASE, id"
        ))
        .fetch_all(&mut self.conn)
        .await?;
        let children = rows
            .into_iter()
            .map(Self::row_to_child)
            .collect::<Result<Vec<_>, _>>()?;

        let Some(needle) = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
        else {
            return Ok(children);
        };
        let matches = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        Ok(children
            .into_iter()
            .filter(|c| {
                matches(Some(c.name.as_str()))
                    || matches(c.parent_name.as_deref())
                    || matches(c.phone.as_deref())
            })
            .collect())
    }

    pub async fn count_children(&mut self) -> Result<i64, VaxError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM children")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(rec.0)
    }

    /// Replace a child's doses with a fresh plan derived from `dob`.
    ///
    /// Delete and insert share one transaction. A blank or malformed dob
    /// leaves the child with no doses. Returns the number of rows inserted.
    pub async fn regenerate_schedule(
        &mut self,
        child_id: i64,
        dob: Option<&str>,
        today: NaiveDate,
        policy: RegeneratePolicy,
    ) -> Result<usize, VaxError> {
        let mut tx = self.conn.begin().await?;

        let completed: HashSet<String> = match policy {
            RegeneratePolicy::Replace => HashSet::new(),
            RegeneratePolicy::PreserveDone => {
                sqlx::query_as::<_, (String,)>(
                    "SELECT vaccine FROM vaccinations WHERE child_id = ? AND status = ?",
                )
                .bind(child_id)
                .bind(DoseStatus::Done.as_str())
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .map(|(vaccine,)| vaccine)
                .collect()
            }
        };

        sqlx::query("DELETE FROM vaccinations WHERE child_id = ?")
            .bind(child_id)
            .execute(&mut *tx)
            .await?;

        let planned = schedule::plan_from_text(dob, today);
        let updated_at = Utc::now().to_rfc3339();
        for dose in &planned {
            let status = if completed.contains(dose.vaccine) {
                DoseStatus::Done
            } else {
                dose.status
            };
            sqlx::query(
                r#"INSERT INTO vaccinations (child_id, vaccine, due_date, status, updated_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(child_id)
            .bind(dose.vaccine)
            .bind(iso_date(dose.due_date))
            .bind(status.as_str())
            .bind(&updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(child_id, doses = planned.len(), ?policy, "schedule regenerated");
        Ok(planned.len())
    }

    pub async fn doses_for_child(&mut self, child_id: i64) -> Result<Vec<DbDose>, VaxError> {
        let rows = sqlx::query(&format!(
            "SELECT {DOSE_COLUMNS} FROM vaccinations WHERE child_id = ? ORDER BY due_date, id"
        ))
        .bind(child_id)
        .fetch_all(&mut self.conn)
        .await?;
        rows.into_iter().map(Self::row_to_dose).collect()
    }

    pub async fn get_dose(&mut self, dose_id: i64) -> Result<Option<DbDose>, VaxError> {
        let row = sqlx::query(&format!("SELECT {DOSE_COLUMNS} FROM vaccinations WHERE id = ?"))
            .bind(dose_id)
            .fetch_optional(&mut self.conn)
            .await?;
        row.map(Self::row_to_dose).transpose()
    }

    /// Earliest `Upcoming` dose of a child; ties go to the lower id.
    pub async fn next_dose(&mut self, child_id: i64) -> Result<Option<DbDose>, VaxError> {
        let row = sqlx::query(&format!(
            r#"SELECT {DOSE_COLUMNS} FROM vaccinations
               WHERE child_id = ? AND status = ?
               ORDER BY due_date, id
               LIMIT 1"#
        ))
        .bind(child_id)
        .bind(DoseStatus::Upcoming.as_str())
        .fetch_optional(&mut self.conn)
        .await?;
        row.map(Self::row_to_dose).transpose()
    }

    /// Flip a dose between `Upcoming` and `Done`. `None` if the dose is unknown.
    pub async fn toggle_dose(&mut self, dose_id: i64) -> Result<Option<DbDose>, VaxError> {
        let Some(dose) = self.get_dose(dose_id).await? else {
            debug!(dose_id, "toggle requested for unknown dose");
            return Ok(None);
        };
        let status = dose.status.toggled();
        let updated_at = Utc::now();
        sqlx::query("UPDATE vaccinations SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(updated_at.to_rfc3339())
            .bind(dose_id)
            .execute(&mut self.conn)
            .await?;
        info!(dose_id, child_id = dose.child_id, status = %status, "dose toggled");
        Ok(Some(DbDose {
            status,
            updated_at,
            ..dose
        }))
    }

    /// Dose counts by status, with `overdue` = `Upcoming` and due strictly before `today`.
    pub async fn dose_stats(&mut self, today: NaiveDate) -> Result<DoseStats, VaxError> {
        let grouped: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM vaccinations GROUP BY status")
                .fetch_all(&mut self.conn)
                .await?;
        let mut stats = DoseStats::default();
        for (status, count) in grouped {
            match status.parse::<DoseStatus>()? {
                DoseStatus::Done => stats.done += count,
                DoseStatus::Upcoming => stats.upcoming += count,
            }
            stats.total += count;
        }

        let overdue: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vaccinations WHERE status = ? AND due_date < ?",
        )
        .bind(DoseStatus::Upcoming.as_str())
        .bind(iso_date(today))
        .fetch_one(&mut self.conn)
        .await?;
        stats.overdue = overdue.0;
        Ok(stats)
    }

    /// `Upcoming` doses due within `[today, today + days]`, soonest first.
    pub async fn reminders_in_window(
        &mut self,
        today: NaiveDate,
        days: u64,
    ) -> Result<Vec<Reminder>, VaxError> {
        let end = today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
            .min(schedule::last_storable_date());
        let rows = sqlx::query(&format!(
            r#"{REMINDER_SELECT}
               WHERE v.status = ? AND v.due_date >= ? AND v.due_date <= ?
               ORDER BY v.due_date, v.id"#
        ))
        .bind(DoseStatus::Upcoming.as_str())
        .bind(iso_date(today))
        .bind(iso_date(end))
        .fetch_all(&mut self.conn)
        .await?;
        rows.into_iter().map(Self::row_to_reminder).collect()
    }

    /// `Upcoming` doses due strictly before `today`, oldest first.
    pub async fn overdue_doses(&mut self, today: NaiveDate) -> Result<Vec<Reminder>, VaxError> {
        let rows = sqlx::query(&format!(
            r#"{REMINDER_SELECT}
               WHERE v.status = ? AND v.due_date < ?
               ORDER BY v.due_date, v.id"#
        ))
        .bind(DoseStatus::Upcoming.as_str())
        .bind(iso_date(today))
        .fetch_all(&mut self.conn)
        .await?;
        rows.into_iter().map(Self::row_to_reminder).collect()
    }

    /// Contact details for one dose, provided it belongs to `child_id`.
    pub async fn reminder_for_dose(
        &mut self,
        child_id: i64,
        dose_id: i64,
    ) -> Result<Option<Reminder>, VaxError> {
        let row = sqlx::query(&format!("{REMINDER_SELECT} WHERE v.id = ? AND v.child_id = ?"))
            .bind(dose_id)
            .bind(child_id)
            .fetch_optional(&mut self.conn)
            .await?;
        row.map(Self::row_to_reminder).transpose()
    }

    pub async fn vaccine_coverage(&mut self) -> Result<Vec<VaccineCoverage>, VaxError> {
        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            r#"SELECT vaccine,
                      SUM(CASE WHEN status = 'Done' THEN 1 ELSE 0 END),
                      COUNT(*)
               FROM vaccinations
               GROUP BY vaccine
               ORDER BY vaccine"#,
        )
        .fetch_all(&mut self.conn)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(vaccine, done, total)| VaccineCoverage {
                vaccine,
                done,
                total,
            })
            .collect())
    }

    fn row_to_child(row: SqliteRow) -> Result<DbChild, VaxError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(DbChild {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            dob: row.try_get("dob")?,
            parent_name: row.try_get("parent_name")?,
            phone: row.try_get("phone")?,
            notes: row.try_get("notes")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }

    fn row_to_dose(row: SqliteRow) -> Result<DbDose, VaxError> {
        let due_date: String = row.try_get("due_date")?;
        let status: String = row.try_get("status")?;
        let updated_at: String = row.try_get("updated_at")?;
        Ok(DbDose {
            id: row.try_get("id")?,
            child_id: row.try_get("child_id")?,
            vaccine: row.try_get("vaccine")?,
            due_date: NaiveDate::parse_from_str(&due_date, DATE_FORMAT)?,
            status: status.parse()?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_reminder(row: SqliteRow) -> Result<Reminder, VaxError> {
        let due_date: String = row.try_get("due_date")?;
        Ok(Reminder {
            dose_id: row.try_get("dose_id")?,
            child_id: row.try_get("child_id")?,
            child_name: row.try_get("child_name")?,
            parent_name: row.try_get("parent_name")?,
            phone: row.try_get("phone")?,
            vaccine: row.try_get("vaccine")?,
            due_date: NaiveDate::parse_from_str(&due_date, DATE_FORMAT)?,
        })
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, VaxError> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempStore {
        store: Store,
        path: std::path::PathBuf,
    }

    impl TempStore {
        async fn new(tag: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system time before UNIX_EPOCH")
                .as_nanos();
            let mut path = std::env::temp_dir();
            path.push(format!(
                "vaxbook-store-{tag}-{}-{}.sqlite",
                std::process::id(),
                nanos
            ));
            let store = Store::new(&path);
            store.init_schema().await.expect("init schema");
            Self { store, path }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn child(name: &str, dob: Option<&str>) -> ChildFields {
        ChildFields {
            name: name.to_string(),
            dob: dob.map(str::to_string),
            parent_name: Some("Meera".to_string()),
            phone: Some("9999999999".to_string()),
            notes: None,
        }
    }

    async fn add_with_schedule(
        records: &mut Records,
        fields: &ChildFields,
        today: NaiveDate,
    ) -> i64 {
        let id = records.create_child(fields).await.unwrap();
        records
            .regenerate_schedule(id, fields.dob.as_deref(), today, RegeneratePolicy::Replace)
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn asha_gets_eleven_sorted_doses() {
        let tmp = TempStore::new("asha").await;
        let mut records = tmp.store.connect().await.unwrap();
        let id = add_with_schedule(
            &mut records,
            &child("Asha", Some("2024-01-01")),
            date("2024-01-01"),
        )
        .await;

        let doses = records.doses_for_child(id).await.unwrap();
        assert_eq!(doses.len(), 11);
        assert!(doses.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        let bcg = doses.iter().find(|d| d.vaccine == "BCG").unwrap();
        assert_eq!(bcg.due_date, date("2024-01-01"));
        let dpt1 = doses.iter().find(|d| d.vaccine == "DPT 1").unwrap();
        assert_eq!(dpt1.due_date, date("2024-02-12"));
    }

    #[tokio::test]
    async fn blank_and_invalid_dob_produce_no_doses() {
        let tmp = TempStore::new("nodob").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-06-01");
        for dob in [None, Some(""), Some("not-a-date"), Some("+12024-01-01")] {
            let id = records.create_child(&child("Ravi", dob)).await.unwrap();
            let inserted = records
                .regenerate_schedule(id, dob, today, RegeneratePolicy::Replace)
                .await
                .unwrap();
            assert_eq!(inserted, 0);
            assert!(records.doses_for_child(id).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn regeneration_always_leaves_full_table() {
        let tmp = TempStore::new("regen").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-06-01");
        let id = add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;

        for dob in ["2024-01-01", "2024-03-15", "2024-03-15"] {
            records
                .regenerate_schedule(id, Some(dob), today, RegeneratePolicy::Replace)
                .await
                .unwrap();
            assert_eq!(records.doses_for_child(id).await.unwrap().len(), 11);
        }

        // Clearing the dob empties the schedule again.
        records
            .regenerate_schedule(id, Some(""), today, RegeneratePolicy::Replace)
            .await
            .unwrap();
        assert!(records.doses_for_child(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_drops_manual_completion_and_preserve_keeps_it() {
        let tmp = TempStore::new("policy").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-01-05");
        let id = add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;

        let bcg = records
            .doses_for_child(id)
            .await
            .unwrap()
            .into_iter()
            .find(|d| d.vaccine == "BCG")
            .unwrap();
        records.toggle_dose(bcg.id).await.unwrap();

        records
            .regenerate_schedule(id, Some("2024-01-01"), today, RegeneratePolicy::PreserveDone)
            .await
            .unwrap();
        let status_of_bcg = |doses: Vec<DbDose>| {
            doses
                .into_iter()
                .find(|d| d.vaccine == "BCG")
                .map(|d| d.status)
        };
        assert_eq!(
            status_of_bcg(records.doses_for_child(id).await.unwrap()),
            Some(DoseStatus::Done)
        );

        records
            .regenerate_schedule(id, Some("2024-01-01"), today, RegeneratePolicy::Replace)
            .await
            .unwrap();
        assert_eq!(
            status_of_bcg(records.doses_for_child(id).await.unwrap()),
            Some(DoseStatus::Upcoming)
        );
    }

    #[tokio::test]
    async fn toggle_round_trip_restores_state_and_next_dose() {
        let tmp = TempStore::new("toggle").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-01-01");
        let id = add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;

        let before = records.next_dose(id).await.unwrap().unwrap();
        assert_eq!(before.status, DoseStatus::Upcoming);
        assert_eq!(before.due_date, date("2024-01-01"));

        let toggled = records.toggle_dose(before.id).await.unwrap().unwrap();
        assert_eq!(toggled.status, DoseStatus::Done);
        let during = records.next_dose(id).await.unwrap().unwrap();
        assert_ne!(during.id, before.id);

        let restored = records.toggle_dose(before.id).await.unwrap().unwrap();
        assert_eq!(restored.status, DoseStatus::Upcoming);
        let after = records.next_dose(id).await.unwrap().unwrap();
        assert_eq!(after.id, before.id);
    }

    #[tokio::test]
    async fn toggle_unknown_dose_is_none() {
        let tmp = TempStore::new("toggle-missing").await;
        let mut records = tmp.store.connect().await.unwrap();
        assert!(records.toggle_dose(4242).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn next_dose_none_when_all_done_or_empty() {
        let tmp = TempStore::new("next-none").await;
        let mut records = tmp.store.connect().await.unwrap();
        let id = records.create_child(&child("Ravi", None)).await.unwrap();
        assert!(records.next_dose(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_doses() {
        let tmp = TempStore::new("cascade").await;
        let mut records = tmp.store.connect().await.unwrap();
        let id = add_with_schedule(
            &mut records,
            &child("Asha", Some("2024-01-01")),
            date("2024-01-01"),
        )
        .await;
        assert!(records.delete_child(id).await.unwrap());
        assert!(records.doses_for_child(id).await.unwrap().is_empty());
        assert!(records.get_child(id).await.unwrap().is_none());
        assert!(!records.delete_child(id).await.unwrap());
    }

    #[tokio::test]
    async fn stats_count_statuses_and_strict_overdue() {
        let tmp = TempStore::new("stats").await;
        let mut records = tmp.store.connect().await.unwrap();
        let empty = records.dose_stats(date("2024-01-01")).await.unwrap();
        assert_eq!(empty, DoseStats::default());

        // Generated on 2024-02-12: the three birth doses stay upcoming, the two
        // 42-day doses are due that day and start done.
        let generated_on = date("2024-02-12");
        add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), generated_on).await;

        let stats = records.dose_stats(generated_on).await.unwrap();
        assert_eq!(stats.total, 11);
        assert_eq!(stats.done, 2);
        assert_eq!(stats.upcoming, 9);
        assert_eq!(stats.overdue, 3);

        // A dose due today is not overdue.
        let stats = records.dose_stats(date("2024-01-01")).await.unwrap();
        assert_eq!(stats.overdue, 0);
    }

    #[tokio::test]
    async fn reminder_window_is_inclusive_and_sorted() {
        let tmp = TempStore::new("reminders").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-01-01");
        add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;

        let due_today = records.reminders_in_window(today, 0).await.unwrap();
        assert_eq!(due_today.len(), 3);
        assert!(due_today.iter().all(|r| r.due_date == today));
        assert_eq!(due_today[0].child_name, "Asha");
        assert_eq!(due_today[0].phone.as_deref(), Some("9999999999"));

        let six_weeks = records.reminders_in_window(today, 42).await.unwrap();
        assert_eq!(six_weeks.len(), 5);
        assert!(six_weeks.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        assert_eq!(six_weeks[4].due_date, date("2024-02-12"));

        let later = records
            .reminders_in_window(date("2024-01-02"), 14)
            .await
            .unwrap();
        assert!(later.is_empty());
    }

    #[tokio::test]
    async fn huge_reminder_window_still_matches() {
        let tmp = TempStore::new("reminders-huge").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-01-01");
        add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;

        for days in [1_000, 3_000_000, u64::MAX] {
            let all = records.reminders_in_window(today, days).await.unwrap();
            assert_eq!(all.len(), 11, "window of {days} days");
        }
    }

    #[tokio::test]
    async fn signed_year_dob_is_not_scheduled() {
        let tmp = TempStore::new("signed-year").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-06-01");
        add_with_schedule(&mut records, &child("Asha", Some("+12024-01-01")), today).await;

        assert_eq!(records.dose_stats(today).await.unwrap(), DoseStats::default());
    }

    #[tokio::test]
    async fn search_matches_name_parent_and_phone() {
        let tmp = TempStore::new("search").await;
        let mut records = tmp.store.connect().await.unwrap();
        records.create_child(&child("Asha", None)).await.unwrap();
        records
            .create_child(&ChildFields {
                name: "Ravi".to_string(),
                parent_name: Some("Kiran".to_string()),
                phone: Some("12345".to_string()),
                ..ChildFields::default()
            })
            .await
            .unwrap();

        let names = |v: Vec<DbChild>| v.into_iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(names(records.list_children(None).await.unwrap()), ["Asha", "Ravi"]);
        assert_eq!(names(records.list_children(Some("asH")).await.unwrap()), ["Asha"]);
        assert_eq!(names(records.list_children(Some("kir")).await.unwrap()), ["Ravi"]);
        assert_eq!(names(records.list_children(Some("234")).await.unwrap()), ["Ravi"]);
        assert!(records.list_children(Some("%")).await.unwrap().is_empty());

        records
            .create_child(&ChildFields {
                name: "Émile".to_string(),
                parent_name: Some("Ölçer".to_string()),
                ..ChildFields::default()
            })
            .await
            .unwrap();
        assert_eq!(names(records.list_children(Some("émi")).await.unwrap()), ["Émile"]);
        assert_eq!(names(records.list_children(Some("ÖLÇ")).await.unwrap()), ["Émile"]);
        assert_eq!(records.list_children(Some("  ")).await.unwrap().len(), 3);
        assert_eq!(records.count_children().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn coverage_groups_by_vaccine() {
        let tmp = TempStore::new("coverage").await;
        let mut records = tmp.store.connect().await.unwrap();
        let today = date("2024-03-01");
        add_with_schedule(&mut records, &child("Asha", Some("2024-01-01")), today).await;
        add_with_schedule(&mut records, &child("Ravi", Some("2024-02-20")), today).await;

        let coverage = records.vaccine_coverage().await.unwrap();
        assert_eq!(coverage.len(), 11);
        let dpt1 = coverage.iter().find(|c| c.vaccine == "DPT 1").unwrap();
        assert_eq!((dpt1.done, dpt1.total), (1, 2));
        let bcg = coverage.iter().find(|c| c.vaccine == "BCG").unwrap();
        assert_eq!((bcg.done, bcg.total), (0, 2));
    }
}
