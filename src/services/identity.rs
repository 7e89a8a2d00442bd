use crate::helpers::api_error::ApiError;
use crate::models::user::UserIdentity;

/// bcrypt work factor used for registered passwords.
pub const BCRYPT_COST: u32 = 10;

/// Verifies credentials and resolves requests to a user. Controllers only
/// talk to this trait, so a real provider can replace [`MockIdentity`]
/// without touching route logic.
pub trait IdentityProvider: Send + Sync {
    fn verify_credentials(&self, email: &str, password: &str) -> bool;

    fn issue_token(&self, email: &str) -> String;

    fn current_user(&self, token: Option<&str>) -> UserIdentity;
}

/// Accepts every login and attributes every request to one fixed user.
#[derive(Clone, Debug, Default)]
pub struct MockIdentity;

impl MockIdentity {
    pub const USER_ID: u64 = 1;
    pub const TOKEN: &'static str = "mock-token";
}

impl IdentityProvider for MockIdentity {
    fn verify_credentials(&self, _email: &str, _password: &str) -> bool {
        true
    }

    fn issue_token(&self, _email: &str) -> String {
        Self::TOKEN.to_string()
    }

    fn current_user(&self, _token: Option<&str>) -> UserIdentity {
        UserIdentity {
            id: Self::USER_ID,
            name: "Test User".to_string(),
            email: "testuser@example.com".to_string(),
        }
    }
}

pub async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| ApiError::PasswordHash(e.to_string()))?
        .map_err(|e| ApiError::PasswordHash(e.to_string()))
}
