// src/services/auth.rs

use std::sync::OnceLock;

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, EmployeeRepository},
    models::{
        auth::{Claims, SessionContext},
        company::Company,
        employee::{Employee, EmployeeStatus, NewEmployee, ADMIN_ROLE},
    },
};

const SESSION_DAYS: i64 = 7;

// Hash usado quando o e-mail não existe, para o login custar o mesmo tempo.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> Result<&'static str, BcryptError> {
    if let Some(existing) = DUMMY_HASH.get() {
        return Ok(existing);
    }
    let generated = hash("not-a-real-password", DEFAULT_COST)?;
    Ok(DUMMY_HASH.get_or_init(|| generated))
}

/// Gera o hash bcrypt numa thread de bloqueio (bcrypt é CPU-bound).
pub(crate) async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {}", e))??;

    Ok(hashed)
}

// ---
// Assinatura e verificação do token de sessão (HS256)
// ---
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, employee: &Employee) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(SESSION_DAYS);

        let claims = Claims {
            sub: employee.id,
            company_id: employee.company_id,
            role: employee.role.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Assinatura inválida, token expirado ou malformado: tudo vira `InvalidSession`.
    pub fn verify(&self, token: &str) -> Result<SessionContext, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("session rejected: {}", e);
            AppError::InvalidSession
        })?;

        Ok(token_data.claims.into())
    }
}

#[derive(Clone)]
pub struct AuthService {
    employee_repo: EmployeeRepository,
    company_repo: CompanyRepository,
    signer: SessionSigner,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        employee_repo: EmployeeRepository,
        company_repo: CompanyRepository,
        signer: SessionSigner,
        pool: PgPool,
    ) -> Self {
        Self { employee_repo, company_repo, signer, pool }
    }

    /// Cria a empresa e o funcionário administrador. Ou os dois existem, ou nenhum.
    pub async fn register(
        &self,
        company_name: &str,
        company_address: Option<&str>,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(Company, Employee), AppError> {
        // 1. Hashing fora da transação, não toca no banco
        let password_hash = hash_password(password).await?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Empresa (tenant)
        let company = self
            .company_repo
            .create_company(&mut *tx, company_name, company_address)
            .await?;

        // 3. Administrador. Se o e-mail colidir, o drop do tx desfaz a empresa.
        let admin = NewEmployee {
            name: name.to_owned(),
            email: email.to_owned(),
            department: None,
            role: Some(ADMIN_ROLE.to_owned()),
            employee_code: None,
            avatar: None,
            phone_number: None,
            hire_date: None,
            status: EmployeeStatus::Active,
        };
        let employee = self
            .employee_repo
            .create_employee(&mut *tx, company.id, &admin, &password_hash)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(company_id = %company.id, employee_id = %employee.id, "company registered");

        Ok((company, employee))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Employee), AppError> {
        let employee = self.employee_repo.find_by_email(email).await?;

        let stored_hash = employee.as_ref().map(|e| e.password_hash.clone());
        let password = password.to_owned();

        // Executa a verificação em um thread separado. Sem funcionário, compara
        // contra o hash dummy e descarta o resultado.
        let is_password_valid = tokio::task::spawn_blocking(move || -> Result<bool, BcryptError> {
            match stored_hash {
                Some(stored) => verify(&password, &stored),
                None => verify(&password, dummy_hash()?).map(|_| false),
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;

        let employee = match employee {
            Some(employee) if is_password_valid => employee,
            _ => return Err(AppError::InvalidCredentials),
        };

        if employee.deleted_at.is_some() || employee.status == EmployeeStatus::Terminated {
            tracing::debug!(employee_id = %employee.id, "login refused for inactive account");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.signer.issue(&employee)?;
        tracing::info!(
            employee_id = %employee.id,
            company_id = %employee.company_id,
            admin = employee.is_admin(),
            "employee logged in"
        );

        Ok((token, employee))
    }

    pub fn verify_session(&self, token: &str) -> Result<SessionContext, AppError> {
        self.signer.verify(token)
    }

    #[cfg(test)]
    pub(crate) fn signer(&self) -> &SessionSigner {
        &self.signer
    }
}
