// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::tenancy::TenantContext,
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores da empresa da sessão", body = DashboardSummary),
        (status = 401, description = "Não autenticado", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_repo.get_summary(tenant.0).await?;
    Ok(Json(summary))
}
