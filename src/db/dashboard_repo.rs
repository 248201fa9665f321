// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

// Consultas agregadas (contagens e somas) por empresa.
// Linhas com soft delete nunca entram nos números.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_assets(&self, company_id: Uuid) -> Result<i64, AppError> {
        count_assets(&self.pool, company_id).await
    }

    pub async fn total_asset_value(&self, company_id: Uuid) -> Result<Decimal, AppError> {
        total_asset_value(&self.pool, company_id).await
    }

    pub async fn count_pending_returns(&self, company_id: Uuid) -> Result<i64, AppError> {
        count_pending_returns(&self.pool, company_id).await
    }

    pub async fn count_active_employees(&self, company_id: Uuid) -> Result<i64, AppError> {
        count_active_employees(&self.pool, company_id).await
    }

    // Resumo geral do painel
    pub async fn get_summary(&self, company_id: Uuid) -> Result<DashboardSummary, AppError> {
        // Snapshot consistente: as quatro leituras enxergam o mesmo estado
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        // A. Ativos
        let total_assets = count_assets(&mut *tx, company_id).await?;

        // B. Valor patrimonial
        let total_value = total_asset_value(&mut *tx, company_id).await?;

        // C. Devoluções pendentes
        let pending_returns = count_pending_returns(&mut *tx, company_id).await?;

        // D. Funcionários ativos
        let active_employees = count_active_employees(&mut *tx, company_id).await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            company_id,
            total_assets,
            total_value,
            pending_returns,
            active_employees,
        })
    }
}

async fn count_assets<'e, E>(executor: E, company_id: Uuid) -> Result<i64, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM assets WHERE company_id = $1 AND deleted_at IS NULL",
    )
    .bind(company_id)
    .fetch_one(executor)
    .await?;

    Ok(total)
}

// Ativos sem preço contam como zero
async fn total_asset_value<'e, E>(executor: E, company_id: Uuid) -> Result<Decimal, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let total = sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(purchase_price), 0)
        FROM assets
        WHERE company_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(company_id)
    .fetch_one(executor)
    .await?;

    Ok(total)
}

async fn count_pending_returns<'e, E>(executor: E, company_id: Uuid) -> Result<i64, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM assets
        WHERE company_id = $1 AND deleted_at IS NULL AND status = 'Checked Out'
        "#,
    )
    .bind(company_id)
    .fetch_one(executor)
    .await?;

    Ok(total)
}

async fn count_active_employees<'e, E>(executor: E, company_id: Uuid) -> Result<i64, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM employees
        WHERE company_id = $1 AND deleted_at IS NULL AND status = 'Active'
        "#,
    )
    .bind(company_id)
    .fetch_one(executor)
    .await?;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::AssetRepository,
        models::asset::AssetStatus,
        test_utils::{new_asset, seed_company},
    };

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn aggregates_skip_deleted_and_foreign_rows(pool: PgPool) {
        let assets = AssetRepository::new(pool.clone());
        let dashboard = DashboardRepository::new(pool.clone());
        let (acme, admin) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let (globex, _) = seed_company(&pool, "Globex", "admin@globex.test").await;

        let mut priced = new_asset("Laptop");
        priced.purchase_price = Some(Decimal::new(150050, 2));
        let laptop = assets.create_asset(&pool, acme.id, &priced).await.unwrap();
        assets.create_asset(&pool, acme.id, &new_asset("Cable")).await.unwrap();
        let mut deleted = new_asset("Old phone");
        deleted.purchase_price = Some(Decimal::new(999, 0));
        let deleted = assets.create_asset(&pool, acme.id, &deleted).await.unwrap();
        assets.soft_delete(acme.id, deleted.id).await.unwrap();
        assets.create_asset(&pool, globex.id, &new_asset("Foreign")).await.unwrap();

        assets
            .apply_transition(&pool, acme.id, laptop.id, AssetStatus::CheckedOut, Some(admin.id))
            .await
            .unwrap();

        assert_eq!(dashboard.count_assets(acme.id).await.unwrap(), 2);
        assert_eq!(dashboard.total_asset_value(acme.id).await.unwrap(), Decimal::new(150050, 2));
        assert_eq!(dashboard.count_pending_returns(acme.id).await.unwrap(), 1);

        let summary = dashboard.get_summary(acme.id).await.unwrap();
        assert_eq!(summary.total_assets, 2);
        assert_eq!(summary.active_employees, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn empty_company_has_zero_value(pool: PgPool) {
        let dashboard = DashboardRepository::new(pool.clone());
        let (acme, _) = seed_company(&pool, "Acme", "admin@acme.test").await;

        assert_eq!(dashboard.total_asset_value(acme.id).await.unwrap(), Decimal::ZERO);
        assert_eq!(dashboard.count_assets(acme.id).await.unwrap(), 0);
    }
}
