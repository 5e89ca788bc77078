use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::warn;

use crate::error::VaxError;
use crate::middleware::flash;
use crate::render::{self, ChildFormView};
use crate::router::AppState;
use crate::types::forms::{ChildForm, SearchQuery};

pub const CHILD_NOT_FOUND: &str = "Child not found";
pub const NAME_REQUIRED: &str = "Name is required";

/// GET / -> children list with their next upcoming dose.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let children = records.list_children(query.q.as_deref()).await?;
    let mut rows = Vec::with_capacity(children.len());
    for child in children {
        let next = records.next_dose(child.id).await?;
        rows.push((child, next));
    }

    let (jar, message) = flash::take(jar);
    let page = render::children_index(&rows, query.q.as_deref(), message.as_deref());
    Ok((jar, Html(page)).into_response())
}

/// GET /add
pub async fn add_form(jar: PrivateCookieJar) -> Response {
    let (jar, message) = flash::take(jar);
    let page = render::child_form(
        "Add child",
        "/add",
        &ChildFormView::default(),
        message.as_deref(),
    );
    (jar, Html(page)).into_response()
}

/// POST /add -> store the child and generate its schedule.
pub async fn add_child(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<ChildForm>,
) -> Result<Response, VaxError> {
    let Some(fields) = form.into_fields() else {
        return Ok(flash::redirect(jar, NAME_REQUIRED, "/add"));
    };

    let mut records = state.store.connect().await?;
    let id = records.create_child(&fields).await?;
    records
        .regenerate_schedule(id, fields.dob.as_deref(), state.today(), state.policy)
        .await?;

    Ok(flash::redirect(
        jar,
        "Child added successfully",
        &format!("/child/{id}"),
    ))
}

/// GET /edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let Some(child) = records.get_child(id).await? else {
        warn!(child_id = id, "edit requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    };

    let (jar, message) = flash::take(jar);
    let page = render::child_form(
        "Edit child",
        &format!("/edit/{id}"),
        &ChildFormView::from(&child),
        message.as_deref(),
    );
    Ok((jar, Html(page)).into_response())
}

/// POST /edit/{id} -> update the child and rebuild its schedule from the
/// submitted dob.
pub async fn edit_child(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
    Form(form): Form<ChildForm>,
) -> Result<Response, VaxError> {
    let Some(fields) = form.into_fields() else {
        return Ok(flash::redirect(jar, NAME_REQUIRED, &format!("/edit/{id}")));
    };

    let mut records = state.store.connect().await?;
    if !records.update_child(id, &fields).await? {
        warn!(child_id = id, "update requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    }
    records
        .regenerate_schedule(id, fields.dob.as_deref(), state.today(), state.policy)
        .await?;

    Ok(flash::redirect(
        jar,
        "Child updated successfully",
        &format!("/child/{id}"),
    ))
}

/// GET /delete/{id}
pub async fn delete_child(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let message = if records.delete_child(id).await? {
        "Child deleted"
    } else {
        warn!(child_id = id, "delete requested for unknown child");
        CHILD_NOT_FOUND
    };
    Ok(flash::redirect(jar, message, "/"))
}

/// GET /child/{id} -> details, full schedule and next dose.
pub async fn child_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: PrivateCookieJar,
) -> Result<Response, VaxError> {
    let mut records = state.store.connect().await?;
    let Some(child) = records.get_child(id).await? else {
        warn!(child_id = id, "detail requested for unknown child");
        return Ok(flash::redirect(jar, CHILD_NOT_FOUND, "/"));
    };
    let doses = records.doses_for_child(id).await?;
    let next = records.next_dose(id).await?;

    let (jar, message) = flash::take(jar);
    let page = render::child_detail(&child, &doses, next.as_ref(), message.as_deref());
    Ok((jar, Html(page)).into_response())
}
