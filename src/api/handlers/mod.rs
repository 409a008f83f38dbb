use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::error::ApiError;
use super::AppState;
use crate::forms;
use crate::models::*;

/// Fixed journal title served by `/title`.
pub const JOURNAL_TITLE: &str = "Journal of Applied Computing (JAC)";

// ============================================================
// Service endpoints
// ============================================================

/// Liveness probe.
pub async fn hello() -> impl IntoResponse {
    Json(json!({ "hello": "world" }))
}

/// Live documentation of every registered route pattern.
pub async fn endpoints(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "Available endpoints": state.endpoints.as_slice() }))
}

pub async fn journal_title() -> impl IntoResponse {
    Json(json!({ "Title": JOURNAL_TITLE }))
}

// ============================================================
// People
// ============================================================

pub async fn read_people(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, Person>>, ApiError> {
    Ok(Json(state.db.read_people()?))
}

pub async fn read_one_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    state
        .db
        .read_one_person(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No such person: {id}")))
}

pub async fn create_person(
    State(state): State<AppState>,
    Json(input): Json<CreatePersonInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .create_person(&input.name, &input.affiliation, &input.email, &input.roles)
        .map_err(|err| ApiError::not_acceptable(format!("Could not add person: {err}")))?;
    Ok(Json(Envelope::new("Person added!", ret)))
}

pub async fn update_person(
    State(state): State<AppState>,
    Json(input): Json<UpdatePersonInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let field = PersonField::from_name(&input.field).ok_or_else(|| {
        ApiError::not_acceptable(format!(
            "Could not update person: invalid field name: {}",
            input.field
        ))
    })?;

    let ret = match field {
        PersonField::Name => state.db.update_person_name(&input.email, &input.value),
        PersonField::Affiliation => state
            .db
            .update_person_affiliation(&input.email, &input.value),
    }
    .map_err(|err| ApiError::not_acceptable(format!("Could not update person: {err}")))?
    .ok_or_else(|| ApiError::not_found(format!("No such person: {}", input.email)))?;

    Ok(Json(Envelope::new(
        format!("{} updated for {}!", field.as_str(), input.email),
        ret,
    )))
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted<String>>, ApiError> {
    state
        .db
        .delete_person(&id)?
        .map(|deleted| Json(Deleted { deleted }))
        .ok_or_else(|| ApiError::not_found(format!("No such person: {id}")))
}

pub async fn add_role(
    State(state): State<AppState>,
    Json(input): Json<RoleChangeInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .add_person_role(&input.email, &input.role)
        .map_err(|err| ApiError::not_acceptable(format!("Could not add role: {err}")))?;
    Ok(Json(Envelope::new("Role added!", ret)))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Json(input): Json<RoleChangeInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .delete_person_role(&input.email, &input.role)
        .map_err(|err| ApiError::not_acceptable(format!("Could not delete role: {err}")))?;
    Ok(Json(Envelope::new("Role deleted!", ret)))
}

pub async fn masthead(State(state): State<AppState>) -> Result<Json<MastheadResponse>, ApiError> {
    Ok(Json(MastheadResponse {
        masthead: state.db.get_masthead()?,
    }))
}

pub async fn people_form() -> impl IntoResponse {
    Json(forms::PEOPLE_FORM)
}

// ============================================================
// Text pages
// ============================================================

pub async fn read_text(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, TextPage>>, ApiError> {
    Ok(Json(state.db.read_text_pages()?))
}

pub async fn read_one_text(
    State(state): State<AppState>,
    Path(page_number): Path<String>,
) -> Result<Json<TextPage>, ApiError> {
    state
        .db
        .read_one_text_page(&page_number)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No such text: {page_number}")))
}

pub async fn create_text(
    State(state): State<AppState>,
    Json(input): Json<CreateTextPageInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .create_text_page(&input.page_number, &input.title, &input.text)
        .map_err(|err| ApiError::not_acceptable(format!("Could not add text: {err}")))?;
    Ok(Json(Envelope::new("Text added!", ret)))
}

pub async fn update_text(
    State(state): State<AppState>,
    Json(input): Json<UpdateTextPageInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .update_text_page(&input.page_number, &input.title, &input.text)
        .map_err(|err| ApiError::not_acceptable(format!("Could not update text: {err}")))?
        .ok_or_else(|| ApiError::not_found(format!("No such page: {}", input.page_number)))?;
    Ok(Json(Envelope::new(
        format!("text updated for {}!", input.page_number),
        ret,
    )))
}

pub async fn delete_text(
    State(state): State<AppState>,
    Path(page_number): Path<String>,
) -> Result<Json<Deleted<String>>, ApiError> {
    state
        .db
        .delete_text_page(&page_number)?
        .map(|deleted| Json(Deleted { deleted }))
        .ok_or_else(|| ApiError::not_found(format!("No such text: {page_number}")))
}

pub async fn text_form() -> impl IntoResponse {
    Json(forms::TEXT_FORM)
}

// ============================================================
// Manuscripts
// ============================================================

pub async fn read_manuscripts(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, Manuscript>>, ApiError> {
    Ok(Json(state.db.read_manuscripts()?))
}

pub async fn read_one_manuscript(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Manuscript>, ApiError> {
    state
        .db
        .read_one_manuscript(&title)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No such manuscript: {title}")))
}

pub async fn create_manuscript(
    State(state): State<AppState>,
    Json(input): Json<ManuscriptInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .create_manuscript(&input)
        .map_err(|err| ApiError::not_acceptable(format!("Could not add manuscript: {err}")))?;
    Ok(Json(Envelope::new("Manuscript added!", ret)))
}

pub async fn update_manuscript(
    State(state): State<AppState>,
    Json(input): Json<ManuscriptInput>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let ret = state
        .db
        .update_manuscript(&input)
        .map_err(|err| ApiError::not_acceptable(format!("Could not update manuscript: {err}")))?
        .ok_or_else(|| ApiError::not_found(format!("No such manuscript: {}", input.title)))?;
    Ok(Json(Envelope::new(
        format!("manuscript updated for {}!", input.title),
        ret,
    )))
}

pub async fn delete_manuscript(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Deleted<String>>, ApiError> {
    state
        .db
        .delete_manuscript(&title)?
        .map(|deleted| Json(Deleted { deleted }))
        .ok_or_else(|| ApiError::not_found(format!("No such manuscript: {title}")))
}

pub async fn manuscript_form() -> impl IntoResponse {
    Json(forms::MANUSCRIPT_FORM)
}
