// src/handlers/companies.rs

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::{
        rbac::{AdminRole, RequireRole},
        tenancy::TenantContext,
    },
    models::company::{Company, UpdateCompanyPayload},
};

#[utoipa::path(
    get,
    path = "/api/companies/me",
    tag = "Companies",
    responses((status = 200, body = Company), (status = 401, body = ErrorBody)),
    security(("session_cookie" = []))
)]
pub async fn get_my_company(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .company_repo
        .find_by_id(tenant.0)
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/api/companies/me",
    tag = "Companies",
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, body = Company),
        (status = 400, body = ErrorBody),
        (status = 403, description = "Requer cargo Admin", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn update_my_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    tenant: TenantContext,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateCompanyPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.name.is_none() && payload.address.is_none() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let company = app_state
        .company_repo
        .update_company(tenant.0, payload.name.as_deref(), payload.address.as_deref())
        .await?
        .ok_or(AppError::NotFound("Company"))?;

    Ok(Json(company))
}
