// src/services/employee_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EmployeeRepository,
    models::employee::{CreateEmployeePayload, Employee, EmployeeStatus, NewEmployee, UpdateEmployeePayload},
    services::auth::hash_password,
};

// Regras de escrita de funcionários: toda senha recebida é convertida em hash aqui.
#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(employee_repo: EmployeeRepository, pool: PgPool) -> Self {
        Self { employee_repo, pool }
    }

    pub async fn create(&self, company_id: Uuid, payload: CreateEmployeePayload) -> Result<Employee, AppError> {
        let (Some(name), Some(email), Some(password)) = (payload.name, payload.email, payload.password) else {
            return Err(AppError::BadRequest("name, email and password are required".to_string()));
        };

        let password_hash = hash_password(&password).await?;
        let new_employee = NewEmployee {
            name,
            email,
            department: payload.department,
            role: payload.role,
            employee_code: payload.employee_code,
            avatar: payload.avatar,
            phone_number: payload.phone_number,
            hire_date: payload.hire_date,
            status: payload.status.unwrap_or(EmployeeStatus::Active),
        };

        let employee = self
            .employee_repo
            .create_employee(&self.pool, company_id, &new_employee, &password_hash)
            .await?;

        tracing::info!(company_id = %company_id, employee_id = %employee.id, "employee created");
        Ok(employee)
    }

    /// Atualiza um funcionário do tenant. `None` quando não existe (ou é de outra empresa).
    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        changes: &UpdateEmployeePayload,
    ) -> Result<Option<Employee>, AppError> {
        let password_hash = match changes.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        self.employee_repo
            .update_employee(&self.pool, company_id, id, changes, password_hash.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::EmployeeFilter, test_utils::seed_company};

    fn create_payload(email: &str) -> CreateEmployeePayload {
        serde_json::from_value(serde_json::json!({
            "name": "Linus",
            "email": email,
            "password": "kernel42",
            "department": "IT",
            "employeeId": "EMP-77"
        }))
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn created_employee_reads_back_with_submitted_fields(pool: PgPool) {
        let repo = EmployeeRepository::new(pool.clone());
        let service = EmployeeService::new(repo.clone(), pool.clone());
        let (acme, _) = seed_company(&pool, "Acme", "admin@acme.test").await;

        let created = service.create(acme.id, create_payload("linus@acme.test")).await.unwrap();
        let read = repo.find_by_id(acme.id, created.id).await.unwrap().unwrap();

        assert_eq!(read.name, "Linus");
        assert_eq!(read.department.as_deref(), Some("IT"));
        assert_eq!(read.employee_code.as_deref(), Some("EMP-77"));
        assert_eq!(read.status, EmployeeStatus::Active);
        assert_ne!(read.password_hash, "kernel42");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn password_change_is_rehashed(pool: PgPool) {
        let repo = EmployeeRepository::new(pool.clone());
        let service = EmployeeService::new(repo.clone(), pool.clone());
        let (acme, _) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let created = service.create(acme.id, create_payload("linus@acme.test")).await.unwrap();

        let changes = UpdateEmployeePayload { password: Some("new-secret".into()), ..Default::default() };
        let updated = service.update(acme.id, created.id, &changes).await.unwrap().unwrap();

        assert_ne!(updated.password_hash, created.password_hash);
        assert!(bcrypt::verify("new-secret", &updated.password_hash).unwrap());
        assert_eq!(repo.list(acme.id, &EmployeeFilter::default()).await.unwrap().len(), 2);
    }
}
