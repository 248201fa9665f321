// src/db/employee_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{like_pattern, map_unique_violation},
        error::AppError,
    },
    models::employee::{Employee, EmployeeStatus, NewEmployee, UpdateEmployeePayload},
};

/// Filtros da listagem de funcionários.
#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
}

// O repositório de funcionários, responsável por todas as interações com a tabela 'employees'
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca pelo e-mail em TODAS as empresas: é o único caminho sem tenant,
    // usado pelo login antes de existir uma sessão.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT * FROM employees
            WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Igual a `find_by_id`, mas enxerga também os removidos (soft delete)
    /// e roda dentro da transação do chamador.
    pub async fn find_including_deleted<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(executor)
        .await?;

        Ok(employee)
    }

    pub async fn list(&self, company_id: Uuid, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        let search = filter.search.as_deref().map(like_pattern);

        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT * FROM employees
            WHERE company_id = $1
              AND deleted_at IS NULL
              AND ($2::text IS NULL OR name ILIKE $2 OR role ILIKE $2)
              AND ($3::employee_status IS NULL OR status = $3)
            ORDER BY name ASC
            "#,
        )
        .bind(company_id)
        .bind(search)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    // Cria um novo funcionário já ligado à empresa.
    // Violações de UNIQUE (email, employeeId) viram Conflict.
    pub async fn create_employee<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        employee: &NewEmployee,
        password_hash: &str,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                company_id, name, email, password_hash, department, role,
                employee_code, avatar, phone_number, hire_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(password_hash)
        .bind(&employee.department)
        .bind(&employee.role)
        .bind(&employee.employee_code)
        .bind(&employee.avatar)
        .bind(&employee.phone_number)
        .bind(employee.hire_date)
        .bind(employee.status)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
    }

    /// UPDATE com allow-list: só as colunas listadas podem mudar.
    pub async fn update_employee<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        changes: &UpdateEmployeePayload,
        password_hash: Option<&str>,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                department = COALESCE($6, department),
                role = COALESCE($7, role),
                employee_code = COALESCE($8, employee_code),
                avatar = COALESCE($9, avatar),
                phone_number = COALESCE($10, phone_number),
                hire_date = COALESCE($11, hire_date),
                status = COALESCE($12, status),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(password_hash)
        .bind(&changes.department)
        .bind(&changes.role)
        .bind(&changes.employee_code)
        .bind(&changes.avatar)
        .bind(&changes.phone_number)
        .bind(changes.hire_date)
        .bind(changes.status)
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)
    }

    // Soft delete: a linha continua para o histórico de transações.
    pub async fn soft_delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{new_employee, seed_company};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn email_is_unique_across_companies(pool: PgPool) {
        let repo = EmployeeRepository::new(pool.clone());
        let (company_a, _) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let (company_b, _) = seed_company(&pool, "Globex", "admin@globex.test").await;

        repo.create_employee(&pool, company_a.id, &new_employee("Ana", "shared@corp.test"), "hash")
            .await
            .unwrap();
        let err = repo
            .create_employee(&pool, company_b.id, &new_employee("Bia", "shared@corp.test"), "hash")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("email")));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn lookups_never_cross_tenants(pool: PgPool) {
        let repo = EmployeeRepository::new(pool.clone());
        let (company_a, admin_a) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let (company_b, _) = seed_company(&pool, "Globex", "admin@globex.test").await;

        assert!(repo.find_by_id(company_a.id, admin_a.id).await.unwrap().is_some());
        assert!(repo.find_by_id(company_b.id, admin_a.id).await.unwrap().is_none());

        let listed = repo.list(company_b.id, &EmployeeFilter::default()).await.unwrap();
        assert!(listed.iter().all(|e| e.company_id == company_b.id));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn soft_deleted_rows_disappear_from_reads(pool: PgPool) {
        let repo = EmployeeRepository::new(pool.clone());
        let (company, _) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let worker = repo
            .create_employee(&pool, company.id, &new_employee("Caio", "caio@acme.test"), "hash")
            .await
            .unwrap();

        assert!(repo.soft_delete(company.id, worker.id).await.unwrap());
        assert!(repo.find_by_id(company.id, worker.id).await.unwrap().is_none());
        assert!(repo
            .find_including_deleted(&pool, company.id, worker.id)
            .await
            .unwrap()
            .is_some());

        let search = EmployeeFilter { search: Some("caio".into()), status: None };
        assert!(repo.list(company.id, &search).await.unwrap().is_empty());
    }
}
