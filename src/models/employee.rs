// src/models/employee.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "employee_status")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Terminated,
}

// Representa um funcionário vindo do banco de dados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing, default)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub department: Option<String>,
    pub role: Option<String>,

    // Código interno (crachá); na API continua "employeeId" como no sistema legado
    #[serde(rename = "employeeId")]
    pub employee_code: Option<String>,

    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeListQuery {
    /// Substring do nome ou do cargo
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
}

// Dados validados para criação
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    pub name: Option<String>,

    #[validate(required(message = "email is required"), email(message = "email is not a valid address"))]
    pub email: Option<String>,

    #[validate(
        required(message = "password is required"),
        length(min = 6, message = "password must have at least 6 characters")
    )]
    pub password: Option<String>,

    pub department: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_code: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,
}

/// Campos já validados, prontos para o INSERT.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub employee_code: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

// Allow-list explícita de campos atualizáveis (nada de "spread" no UPDATE).
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_code: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,
}

impl UpdateEmployeePayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.department.is_none()
            && self.role.is_none()
            && self.employee_code.is_none()
            && self.avatar.is_none()
            && self.phone_number.is_none()
            && self.hire_date.is_none()
            && self.status.is_none()
    }

    /// No próprio perfil o funcionário não promove a si mesmo nem muda o status.
    pub fn for_self_service(self) -> Self {
        Self { role: None, status: None, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_secrets() {
        let employee = Employee {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password_hash: "$2b$12$hash".into(),
            department: None,
            role: Some(ADMIN_ROLE.into()),
            employee_code: Some("E-001".into()),
            avatar: None,
            phone_number: None,
            hire_date: None,
            status: EmployeeStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("deletedAt").is_none());
        assert_eq!(json["employeeId"], "E-001");
        assert_eq!(json["status"], "Active");
        assert!(employee.is_admin());
    }

    #[test]
    fn self_service_strips_privileged_fields() {
        let payload = UpdateEmployeePayload {
            name: Some("New".into()),
            role: Some(ADMIN_ROLE.into()),
            status: Some(EmployeeStatus::Terminated),
            ..Default::default()
        }
        .for_self_service();

        assert_eq!(payload.name.as_deref(), Some("New"));
        assert!(payload.role.is_none());
        assert!(payload.status.is_none());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateEmployeePayload::default().is_empty());
        let payload = UpdateEmployeePayload { department: Some("IT".into()), ..Default::default() };
        assert!(!payload.is_empty());
    }
}
