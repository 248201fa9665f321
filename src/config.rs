// src/config.rs

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{AssetRepository, CompanyRepository, DashboardRepository, EmployeeRepository, TransactionRepository},
    services::{
        auth::{AuthService, SessionSigner},
        employee_service::EmployeeService,
        transaction_service::TransactionService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida uma única vez na inicialização.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave/valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got '{}'", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cookie_secure = match lookup("COOKIE_SECURE").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => bail!("COOKIE_SECURE must be true or false, got '{}'", other),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            cookie_secure,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,

    // Serviços (regras de negócio)
    pub auth_service: AuthService,
    pub employee_service: EmployeeService,
    pub transaction_service: TransactionService,

    // Repositórios usados diretamente pelos handlers de leitura
    pub asset_repo: AssetRepository,
    pub company_repo: CompanyRepository,
    pub employee_repo: EmployeeRepository,
    pub transaction_repo: TransactionRepository,
    pub dashboard_repo: DashboardRepository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let asset_repo = AssetRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let signer = SessionSigner::new(&config.jwt_secret);
        let auth_service = AuthService::new(
            employee_repo.clone(),
            company_repo.clone(),
            signer,
            db_pool.clone(),
        );
        let employee_service = EmployeeService::new(employee_repo.clone(), db_pool.clone());
        let transaction_service = TransactionService::new(
            asset_repo.clone(),
            employee_repo.clone(),
            transaction_repo.clone(),
            db_pool.clone(),
        );

        Self {
            db_pool,
            config,
            auth_service,
            employee_service,
            transaction_service,
            asset_repo,
            company_repo,
            employee_repo,
            transaction_repo,
            dashboard_repo,
        }
    }
}
