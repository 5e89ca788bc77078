use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::error::VaxError;
use crate::middleware::flash;
use crate::render;
use crate::router::AppState;
use crate::service::reports::{AdminOverview, ReportSummary, parse_window_days};
use crate::types::forms::ReminderQuery;

/// GET /admin
pub async fn admin(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let overview = AdminOverview::load(&mut records, state.today()).await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(render::admin(&overview, message.as_deref()))).into_response())
}

/// GET /reports
pub async fn reports(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let summary = ReportSummary::load(&mut records, state.today()).await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(render::reports(&summary, message.as_deref()))).into_response())
}

/// GET /reminders?days=N
pub async fn reminders(
    State(state): State<AppState>,
    Query(query): Query<ReminderQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let days = parse_window_days(query.days.as_deref());
    let mut records = state.store.connect().await?;
    let list = records.reminders_in_window(state.today(), days).await?;
    let (jar, message) = flash::take(jar);
    Ok((jar, Html(render::reminders(&list, days, message.as_deref()))).into_response())
}

/// GET /schedule -> the reference offset table.
pub async fn schedule(jar: PrivateCookieJar) -> Response {
    let (jar, message) = flash::take(jar);
    (jar, Html(render::schedule_reference(message.as_deref()))).into_response()
}
