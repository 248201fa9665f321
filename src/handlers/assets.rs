// src/handlers/assets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    db::AssetFilter,
    middleware::tenancy::{ensure_same_tenant, CompanyScope, TenantContext},
    models::{
        asset::{Asset, AssetListQuery, CreateAssetPayload, UpdateAssetPayload},
        auth::OkResponse,
        dashboard::{CompanyIdQuery, CountResponse, TotalValueResponse},
    },
};

// GET /api/assets
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "Assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Ativos da empresa da sessão", body = [Asset]),
        (status = 401, description = "Não autenticado", body = ErrorBody),
        (status = 404, description = "company_id de outra empresa", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_assets(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Query(query), _): WithRejection<Query<AssetListQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(requested) = query.company_id {
        ensure_same_tenant(tenant, requested)?;
    }

    let filter = AssetFilter { search: query.search, status: query.status };
    let assets = app_state.asset_repo.list(tenant.0, &filter).await?;

    Ok(Json(assets))
}

// POST /api/assets
#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "Assets",
    request_body = CreateAssetPayload,
    responses(
        (status = 201, description = "Ativo criado", body = Asset),
        (status = 400, description = "Dados inválidos", body = ErrorBody),
        (status = 409, description = "Número de série ou NFC duplicado", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAssetPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let new_asset = payload.into_new_asset()?;

    let asset = app_state
        .asset_repo
        .create_asset(&app_state.db_pool, tenant.0, &new_asset)
        .await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

// GET /api/assets/{id}
#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    responses(
        (status = 200, body = Asset),
        (status = 404, description = "Inexistente ou de outra empresa", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn get_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let asset = app_state
        .asset_repo
        .find_by_id(tenant.0, id)
        .await?
        .ok_or(AppError::NotFound("Asset"))?;

    Ok(Json(asset))
}

// PUT /api/assets/{id}
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    request_body = UpdateAssetPayload,
    responses(
        (status = 200, body = Asset),
        (status = 400, description = "Campo inválido ou não editável", body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn update_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateAssetPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let asset = app_state
        .asset_repo
        .update_asset(tenant.0, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Asset"))?;

    Ok(Json(asset))
}

// DELETE /api/assets/{id} (soft delete)
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do ativo")),
    responses(
        (status = 200, body = OkResponse),
        (status = 404, body = ErrorBody),
        (status = 409, description = "Ativo emprestado (Check-Out em aberto)", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_asset(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.asset_repo.soft_delete(tenant.0, id).await? {
        return Err(AppError::NotFound("Asset"));
    }

    Ok(Json(OkResponse::ok()))
}

// GET /api/assets/count?company_id=
#[utoipa::path(
    get,
    path = "/api/assets/count",
    tag = "Assets",
    params(CompanyIdQuery),
    responses(
        (status = 200, body = CountResponse),
        (status = 400, description = "company_id ausente", body = ErrorBody),
        (status = 404, description = "company_id de outra empresa", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn count_assets(
    State(app_state): State<AppState>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let total = app_state.dashboard_repo.count_assets(company_id).await?;
    Ok(Json(CountResponse { total }))
}

// GET /api/assets/total-value?company_id=
#[utoipa::path(
    get,
    path = "/api/assets/total-value",
    tag = "Assets",
    params(CompanyIdQuery),
    responses(
        (status = 200, body = TotalValueResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn total_value(
    State(app_state): State<AppState>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let total_value = app_state.dashboard_repo.total_asset_value(company_id).await?;
    Ok(Json(TotalValueResponse { total_value }))
}
