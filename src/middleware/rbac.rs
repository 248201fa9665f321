// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::SessionContext,
        employee::{EmployeeStatus, ADMIN_ROLE},
    },
};

/// 1. O Trait que define um cargo exigido
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionContext>()
            .ok_or(AppError::Unauthenticated)?;

        // A. Claims: quem nunca foi do cargo é recusado sem ir ao banco
        let required = T::name();
        let forbidden = || AppError::Forbidden(format!("This action requires the '{}' role.", required));
        if session.role.as_deref() != Some(required) {
            return Err(forbidden());
        }

        // B. Banco: o token vale 7 dias, o cargo atual é o que está gravado
        let app_state = AppState::from_ref(state);
        let employee = app_state
            .employee_repo
            .find_by_id(session.company_id, session.employee_id)
            .await?
            .ok_or(AppError::InvalidSession)?;

        if employee.role.as_deref() != Some(required) || employee.status != EmployeeStatus::Active {
            tracing::debug!(employee_id = %employee.id, "role in session is stale");
            return Err(forbidden());
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// CARGOS
// ---

pub struct AdminRole;
impl RoleDef for AdminRole {
    fn name() -> &'static str { ADMIN_ROLE }
}
