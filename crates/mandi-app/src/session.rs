//! Sign-in capability and the signed-in session.
//!
//! There is no identity backend: [`SimulatedAuthService`] waits a fixed delay
//! and fabricates a [`User`] from the form input.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mandi_core::{AppConfig, Credentials, Role, SignUp, User, DEMO_BUYER_ID, DEMO_VENDOR_ID};
use thiserror::Error;

pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_DEMO_AUTH_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("email is required")]
    MissingEmail,

    #[error("password is required")]
    MissingPassword,

    #[error("name is required")]
    MissingName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;

    async fn sign_up(&self, form: &SignUp) -> Result<User, AuthError>;

    /// One-tap login as the fixed demo buyer or demo vendor.
    async fn demo_login(&self, role: Role) -> Result<User, AuthError>;
}

/// Accepts any well-formed input after a fixed delay. Never retries.
#[derive(Debug, Clone)]
pub struct SimulatedAuthService {
    delay: Duration,
    demo_delay: Duration,
}

impl Default for SimulatedAuthService {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_DELAY, DEFAULT_DEMO_AUTH_DELAY)
    }
}

impl SimulatedAuthService {
    #[must_use]
    pub fn new(delay: Duration, demo_delay: Duration) -> Self {
        Self { delay, demo_delay }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Duration::from_millis(config.auth_delay_ms),
            Duration::from_millis(config.demo_auth_delay_ms),
        )
    }
}

#[async_trait]
impl AuthService for SimulatedAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let email = validate_email(&credentials.email)?;
        if credentials.password.trim().is_empty() {
            return Err(AuthError::MissingPassword);
        }

        tokio::time::sleep(self.delay).await;

        let (name, role) = if email.contains("vendor") {
            ("Demo Vendor", Role::Vendor)
        } else {
            ("Demo User", Role::Buyer)
        };
        tracing::info!(%role, "simulated login");
        Ok(User {
            id: fresh_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        })
    }

    async fn sign_up(&self, form: &SignUp) -> Result<User, AuthError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = validate_email(&form.email)?;
        if form.password.trim().is_empty() {
            return Err(AuthError::MissingPassword);
        }

        tokio::time::sleep(self.delay).await;

        tracing::info!(role = %form.role, "simulated sign-up");
        Ok(User {
            id: fresh_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            role: form.role,
        })
    }

    async fn demo_login(&self, role: Role) -> Result<User, AuthError> {
        tokio::time::sleep(self.demo_delay).await;

        let user = match role {
            Role::Buyer => User {
                id: DEMO_BUYER_ID.to_string(),
                name: "Alex User (Demo)".to_string(),
                email: "buyer@demo.com".to_string(),
                role,
            },
            Role::Vendor => User {
                id: DEMO_VENDOR_ID.to_string(),
                name: "Ram's Vegetables (Demo)".to_string(),
                email: "vendor@demo.com".to_string(),
                role,
            },
        };
        tracing::info!(%role, "demo login");
        Ok(user)
    }
}

fn validate_email(email: &str) -> Result<&str, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    Ok(email)
}

fn fresh_user_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            signed_in_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SimulatedAuthService {
        SimulatedAuthService::default()
    }

    #[tokio::test(start_paused = true)]
    async fn login_with_vendor_email_yields_vendor() {
        let user = service()
            .login(&Credentials::new("vendor@mandi.in", "secret"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Vendor);
        assert_eq!(user.name, "Demo Vendor");
        assert_eq!(user.email, "vendor@mandi.in");
        assert!(user.id.parse::<i64>().is_ok(), "id: {}", user.id);
    }

    #[tokio::test(start_paused = true)]
    async fn login_with_other_email_yields_buyer() {
        let user = service()
            .login(&Credentials::new("asha@mandi.in", "secret"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Buyer);
        assert_eq!(user.name, "Demo User");
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_the_configured_delay() {
        let started = tokio::time::Instant::now();
        service()
            .login(&Credentials::new("asha@mandi.in", "secret"))
            .await
            .unwrap();
        assert!(started.elapsed() >= DEFAULT_AUTH_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn login_rejects_blank_and_malformed_input() {
        let svc = service();
        assert_eq!(
            svc.login(&Credentials::new("  ", "secret")).await,
            Err(AuthError::MissingEmail)
        );
        assert_eq!(
            svc.login(&Credentials::new("asha@mandi.in", "")).await,
            Err(AuthError::MissingPassword)
        );
        assert_eq!(
            svc.login(&Credentials::new("asha", "secret")).await,
            Err(AuthError::InvalidEmail("asha".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sign_up_keeps_name_and_role() {
        let form = SignUp {
            name: "  Ramu  ".to_string(),
            email: "ramu@mandi.in".to_string(),
            password: "pw".to_string(),
            role: Role::Vendor,
        };
        let user = service().sign_up(&form).await.unwrap();
        assert_eq!(user.name, "Ramu");
        assert_eq!(user.role, Role::Vendor);
    }

    #[tokio::test(start_paused = true)]
    async fn sign_up_requires_a_name() {
        let form = SignUp {
            name: String::new(),
            email: "ramu@mandi.in".to_string(),
            password: "pw".to_string(),
            role: Role::Buyer,
        };
        assert_eq!(service().sign_up(&form).await, Err(AuthError::MissingName));
    }

    #[tokio::test(start_paused = true)]
    async fn demo_logins_use_fixed_ids() {
        let svc = service();
        let started = tokio::time::Instant::now();
        let vendor = svc.demo_login(Role::Vendor).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_DEMO_AUTH_DELAY);
        assert_eq!(vendor.id, DEMO_VENDOR_ID);
        assert_eq!(vendor.name, "Ram's Vegetables (Demo)");
        assert!(vendor.is_vendor());

        let buyer = svc.demo_login(Role::Buyer).await.unwrap();
        assert_eq!(buyer.id, DEMO_BUYER_ID);
        assert_eq!(buyer.name, "Alex User (Demo)");
        assert_eq!(buyer.role, Role::Buyer);
    }
}
