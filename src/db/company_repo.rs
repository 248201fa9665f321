// src/db/company_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::company::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria a empresa (tenant). Só é chamado dentro da transação de registro.
    pub async fn create_company<'e, E>(
        &self,
        executor: E,
        name: &str,
        address: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, address)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .fetch_one(executor)
        .await?;

        Ok(company)
    }

    pub async fn find_by_id(&self, company_id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn update_company(
        &self,
        company_id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }
}
