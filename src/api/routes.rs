//! API route handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use serde_json::json;

use super::server::AppState;
use crate::auth::{Claims, CreateUserRequest, LoginRequest, RegisterRequest};
use crate::error::{Error, Result};
use crate::tracking::{
    self, companies, methods, CommunicationInput, CompanyInput, MethodInput,
};

/// Unwrap a JSON body, reporting malformed input as a validation error
fn payload<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

// Auth routes

pub async fn register(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    state.auth.register(payload(body)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully." })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let response = state.auth.login(payload(body)?).await?;
    Ok(Json(response))
}

/// Claims are put in place by the gate; this route is always restricted
pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    state.auth.create_user(&claims, payload(body)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully." })),
    ))
}

// Company routes

pub async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(companies::list_companies(state.store.as_ref()).await?))
}

pub async fn create_company(
    State(state): State<AppState>,
    body: std::result::Result<Json<CompanyInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let company = companies::create_company(state.store.as_ref(), payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<CompanyInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let company = companies::update_company(state.store.as_ref(), &id, payload(body)?).await?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    companies::delete_company(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Communication method routes

pub async fn list_methods(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(methods::list_methods(state.store.as_ref()).await?))
}

pub async fn create_method(
    State(state): State<AppState>,
    body: std::result::Result<Json<MethodInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let method = methods::create_method(state.store.as_ref(), payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

pub async fn update_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<MethodInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let method = methods::update_method(state.store.as_ref(), &id, payload(body)?).await?;
    Ok(Json(method))
}

pub async fn delete_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    methods::delete_method(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// User routes

pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let summaries = tracking::compute_dashboard(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(summaries))
}

pub async fn record_communication(
    State(state): State<AppState>,
    body: std::result::Result<Json<CommunicationInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let log = tracking::record_communication(state.store.as_ref(), payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn notifications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let notifications = tracking::compute_notifications(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(notifications))
}

pub async fn calendar(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let calendar = tracking::compute_calendar(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(calendar))
}
