use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use models::user::{self, NewUser, Role};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { bcrypt_cost: DEFAULT_BCRYPT_COST }
    }
}

impl From<&configs::AuthSettings> for AuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self { bcrypt_cost: s.bcrypt_cost }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
    // verified against on unknown emails so both login failures cost one bcrypt run
    dummy_hash: OnceCell<String>,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg, dummy_hash: OnceCell::new() }
    }

    /// Register a new user with a bcrypt-hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { bcrypt_cost: 4 });
    /// let input = RegisterInput {
    ///     email: "ada@example.com".into(),
    ///     password: "s3cret!".into(),
    ///     first_name: "Ada".into(),
    ///     last_name: None,
    ///     phone: None,
    ///     birth_date: Some("1990-12-10".into()),
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "ada@example.com");
    /// assert_eq!(user.role.as_str(), "USER");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        user::validate_email(&input.email)?;
        user::validate_name(&input.first_name)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if input.password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::Validation(format!("password too long (<={MAX_PASSWORD_BYTES} bytes)")));
        }
        let birth_date = input.birth_date.as_deref().map(parse_birth_date).transpose()?;

        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!(user_id = %existing.user.id, "email already registered");
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_password(input.password, self.cfg.bcrypt_cost).await?;
        let user = self
            .repo
            .create_user(NewUser {
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: blank_to_none(input.last_name),
                phone: blank_to_none(input.phone),
                birth_date,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Check credentials. The caller issues the token for the returned user.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { bcrypt_cost: 4 });
    /// let reg = RegisterInput {
    ///     email: "u@e.com".into(), password: "Passw0rd".into(), first_name: "U".into(),
    ///     last_name: None, phone: None, birth_date: None,
    /// };
    /// tokio_test::block_on(svc.register(reg)).unwrap();
    /// let user = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthUser, AuthError> {
        let Some(record) = self.repo.find_user_by_email(&input.email).await? else {
            let dummy = self.dummy_hash().await?;
            verify_password(input.password, dummy).await?;
            warn!("login_unknown_email");
            return Err(AuthError::NotFound);
        };

        if !verify_password(input.password, record.password_hash).await? {
            warn!(user_id = %record.user.id, "login_bad_password");
            return Err(AuthError::Unauthorized);
        }

        info!(user_id = %record.user.id, "user_logged_in");
        Ok(record.user)
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let cost = self.cfg.bcrypt_cost;
        self.dummy_hash
            .get_or_try_init(|| hash_password("no-such-account".to_string(), cost))
            .await
            .cloned()
    }

    /// Load the account behind a verified token subject.
    pub async fn current_user(&self, id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.find_user_by_id(id).await?.ok_or(AuthError::NotFound)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (truncated to its date).
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, AuthError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AuthError::Validation(format!("invalid birthDate: {raw}")))
}

fn blank_to_none(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .map_err(|e| AuthError::HashError(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .map_err(|e| AuthError::HashError(e.to_string()))
}
