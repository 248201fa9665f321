// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::SessionContext, dashboard::CompanyIdQuery},
};

// O tenant da requisição. Vem SEMPRE da sessão, nunca do cliente.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .map(|session| TenantContext(session.company_id))
            .ok_or(AppError::Unauthenticated)
    }
}

/// Um `company_id` vindo do cliente só é aceito se for o da sessão.
/// Outro valor responde como recurso inexistente.
pub fn ensure_same_tenant(tenant: TenantContext, requested: Uuid) -> Result<(), AppError> {
    if tenant.0 != requested {
        return Err(AppError::NotFound("Company"));
    }
    Ok(())
}

// Extrator dos endpoints agregados: exige `?company_id=` e confere com a sessão.
#[derive(Debug, Clone, Copy)]
pub struct CompanyScope(pub Uuid);

impl<S> FromRequestParts<S> for CompanyScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tenant = TenantContext::from_request_parts(parts, state).await?;

        let Query(query) = Query::<CompanyIdQuery>::try_from_uri(&parts.uri)?;
        let raw = query
            .company_id
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("company_id is required".to_string()))?;

        let requested = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest("company_id must be a valid UUID".to_string()))?;

        ensure_same_tenant(tenant, requested)?;
        Ok(CompanyScope(requested))
    }
}
