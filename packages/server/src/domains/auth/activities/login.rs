//! Admin login
//!
//! A single back-office account configured through the environment. The
//! password is only ever held as a SHA-256 digest.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::utils::{digests_match, sha256_hex};
use crate::common::ApiError;
use crate::domains::auth::errors::AuthError;
use crate::domains::auth::jwt::TOKEN_TTL_HOURS;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub token: String,
    pub email: String,
    pub expires_in: i64,
}

pub async fn admin_login(input: LoginInput, deps: &ServerDeps) -> Result<LoginOutput> {
    let settings = &deps.settings;
    let (Some(admin_email), Some(password_digest)) = (
        settings.admin_email.as_deref(),
        settings.admin_password_sha256.as_deref(),
    ) else {
        return Err(ApiError::NotConfigured("admin login".into()).into());
    };

    let email = input.email.trim();
    let email_ok = email.eq_ignore_ascii_case(admin_email);
    let password_ok = digests_match(&sha256_hex(&input.password), password_digest);

    if !(email_ok && password_ok) {
        warn!(email = %email, "Rejected admin login");
        return Err(ApiError::from(AuthError::InvalidCredentials).into());
    }

    let token = deps.jwt_service.create_token(admin_email, true)?;
    info!(email = %admin_email, "Admin logged in");

    Ok(LoginOutput {
        token,
        email: admin_email.to_string(),
        expires_in: TOKEN_TTL_HOURS * 3600,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;
    use sqlx::postgres::PgPoolOptions;

    fn deps(admin: bool) -> ServerDeps {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let test_deps = TestDependencies::new();
        let test_deps = if admin {
            test_deps.with_admin("admin@eventos.mx", "s3creto")
        } else {
            test_deps
        };
        test_deps.into_server_deps(pool)
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_valid_credentials_issue_admin_token() {
        let deps = deps(true);
        let out = admin_login(input("Admin@Eventos.mx", "s3creto"), &deps)
            .await
            .unwrap();

        let claims = deps.jwt_service.verify_token(&out.token).unwrap();
        assert!(claims.is_admin);
        assert_eq!(claims.sub, "admin@eventos.mx");
        assert_eq!(out.expires_in, 86_400);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let err = admin_login(input("admin@eventos.mx", "otro"), &deps(true))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_admin() {
        let err = admin_login(input("admin@eventos.mx", "s3creto"), &deps(false))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotConfigured(_))
        ));
    }
}
