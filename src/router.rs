use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::db::Store;
use crate::handlers::{children, dashboards, doses, export};
use crate::service::notifier::{MockSmsNotifier, Notifier};
use crate::service::schedule::RegeneratePolicy;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub notifier: Arc<dyn Notifier>,
    pub policy: RegeneratePolicy,
    key: Key,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Store, key: Key) -> Self {
        Self {
            store,
            notifier: Arc::new(MockSmsNotifier),
            policy: RegeneratePolicy::default(),
            key,
            fixed_today: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let key = match cfg.cookie_key.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|e| {
                warn!(error = %e, "cookie_key unusable; generating a random key");
                Key::generate()
            }),
            None => Key::generate(),
        };
        Self::new(Store::new(&cfg.database_path), key)
            .with_policy(RegeneratePolicy::from_preserve_flag(cfg.preserve_completed))
    }

    pub fn with_policy(mut self, policy: RegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(children::index))
        .route("/add", get(children::add_form).post(children::add_child))
        .route(
            "/edit/{id}",
            get(children::edit_form).post(children::edit_child),
        )
        .route("/delete/{id}", get(children::delete_child))
        .route("/child/{id}", get(children::child_detail))
        .route("/vaccine_toggle/{dose_id}", get(doses::toggle))
        .route("/send_sms/{child_id}/{dose_id}", get(doses::send_sms))
        .route("/admin", get(dashboards::admin))
        .route("/reports", get(dashboards::reports))
        .route("/reminders", get(dashboards::reminders))
        .route("/schedule", get(dashboards::schedule))
        .route("/export/{id}/csv", get(export::export_csv))
        .route("/print/{id}", get(export::print_schedule))
        .with_state(state)
}
