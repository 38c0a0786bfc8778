//! Authentication service: registration, login, token issuance

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::AppError,
    models::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        user::{Role, User, UserResponse},
    },
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self { db, jwt_service }
    }

    /// Register a new account. The role defaults to student; only the
    /// enumerated roles are representable in the request. The plaintext
    /// password exists only long enough to be hashed.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let role = req.role.unwrap_or(Role::Student);

        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        // The unique index on email closes the race between the existence
        // check above and this insert.
        let user: User = match user_repo
            .create(&req.name, &req.email, &password_hash, role)
            .await
        {
            Ok(user) => user,
            Err(AppError::Database(sqlx::Error::Database(db_err)))
                if db_err.is_unique_violation() =>
            {
                return Err(AppError::Conflict(
                    "An account with this email already exists".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = user.id, role = %user.role, "User registered");

        Ok(UserResponse::from(user))
    }

    /// Log in with email and password, issuing a signed session token on
    /// success.
    ///
    /// Unknown email and wrong password collapse into the same
    /// `InvalidCredentials` response so callers cannot probe which
    /// accounts exist; the branches are only distinguishable in the
    /// debug log.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: User = match user_repo.find_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login failed: no account for submitted email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let hasher = PasswordHasher::new();
        if !hasher.verify(&req.password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Login failed: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.issue_token(&user)?;

        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(LoginResponse {
            token,
            expires_in: self.jwt_service.token_ttl_secs(),
            user: UserResponse::from(user),
        })
    }
}
