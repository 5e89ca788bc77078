use axum::{
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{info, warn};

use super::children::CHILD_NOT_FOUND;
use crate::error::VaxError;
use crate::middleware::flash;
use crate::router::AppState;

pub const DOSE_NOT_FOUND: &str = "Dose not found";

/// GET /vaccine_toggle/{dose_id} -> flip Upcoming/Done, back to the child page.
pub async fn toggle(
    State(state): State<AppState>,
    Path(dose_id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let Some(dose) = records.toggle_dose(dose_id).await? else {
        warn!(dose_id, "toggle requested for unknown dose");
        return Ok(flash::redirect(jar, DOSE_NOT_FOUND, "/"));
    };
    Ok(flash::redirect(
        jar,
        format!("{} marked as {}", dose.vaccine, dose.status),
        &format!("/child/{}", dose.child_id),
    ))
}

/// GET /send_sms/{child_id}/{dose_id} -> hand the reminder to the notifier.
pub async fn send_sms(
    State(state): State<AppState>,
    Path((child_id, dose_id)): Path<(i64, i64)>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    if records.get_child(child_id).await?.is_none() {
        warn!(child_id, "SMS requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    }
    let back = format!("/child/{child_id}");
    let Some(reminder) = records.reminder_for_dose(child_id, dose_id).await? else {
        warn!(child_id, dose_id, "SMS requested for unknown dose");
        return Ok(flash::redirect(jar, DOSE_NOT_FOUND, &back));
    };

    let (sent, message) = state.notifier.send(&reminder);
    info!(child_id, dose_id, sent, "notifier invoked");
    Ok(flash::redirect(jar, message, &back))
}
