// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Estrutura de dados ("claims") dentro do JWT do cookie de sessão
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,        // Subject (ID do funcionário)
    pub company_id: Uuid, // Tenant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// Contexto produzido pelo guard de sessão e repassado explicitamente
/// para repositórios e serviços.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub employee_id: Uuid,
    pub company_id: Uuid,
    pub role: Option<String>,
}

impl From<Claims> for SessionContext {
    fn from(claims: Claims) -> Self {
        Self {
            employee_id: claims.sub,
            company_id: claims.company_id,
            role: claims.role,
        }
    }
}

// Dados para login. Os campos são opcionais para que a ausência
// vire 400 com mensagem, e não uma rejeição genérica do extrator.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(required(message = "email is required"))]
    #[schema(example = "admin@example.com")]
    pub email: Option<String>,
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

// Cria Company + Employee administrador numa única transação
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(
        required(message = "companyName is required"),
        length(min = 1, message = "companyName is required")
    )]
    #[schema(example = "Acme Corp")]
    pub company_name: Option<String>,

    pub company_address: Option<String>,

    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,

    #[validate(required(message = "email is required"), email(message = "email is not a valid address"))]
    #[schema(example = "ada@acme.example")]
    pub email: Option<String>,

    #[validate(
        required(message = "password is required"),
        length(min = 6, message = "password must have at least 6 characters")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub company_id: Uuid,
    pub employee_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
