use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::warn;

use super::children::CHILD_NOT_FOUND;
use crate::error::VaxError;
use crate::middleware::flash;
use crate::render::{self, csv};
use crate::router::AppState;

/// GET /export/{id}/csv
pub async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let Some(child) = records.get_child(id).await? else {
        warn!(child_id = id, "export requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    };
    let doses = records.doses_for_child(id).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        csv::export_filename(&child)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv::schedule_csv(&child, &doses),
    )
        .into_response())
}

/// GET /print/{id}
pub async fn print_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let Some(child) = records.get_child(id).await? else {
        warn!(child_id = id, "print requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    };
    let doses = records.doses_for_child(id).await?;
    Ok(Html(render::print_schedule(&child, &doses)).into_response())
}
