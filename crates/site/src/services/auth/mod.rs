//! Client for the hosted identity provider.
//!
//! The provider owns credentials, email verification, and social login;
//! this site only exchanges tokens with it over its REST surface:
//!
//! - `POST /auth/v1/token?grant_type=password` - email/password sign-in
//! - `POST /auth/v1/signup` - account creation (sends a confirmation email)
//! - `POST /auth/v1/verify` - verify a type-tagged emailed one-time token
//! - `GET  /auth/v1/user` - resolve an access token to a user
//! - `GET  /auth/v1/authorize?provider=...` - social login entry point
//! - `POST /auth/v1/logout` - revoke an access token
//!
//! Every request carries the publishable API key; user-scoped calls add a
//! bearer token.

mod error;

pub use error::AuthError;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use steer_core::UserId;

use crate::config::AuthConfig;

/// A user as reported by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Provider-issued identity; keys profiles and preferences.
    pub id: UserId,
    /// Primary email, when the provider knows one.
    pub email: Option<String>,
}

/// An authenticated session returned by sign-in or token verification.
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent user-scoped calls.
    pub access_token: String,
    /// The user the token belongs to.
    pub user: AuthUser,
}

/// The type tag carried by emailed one-time tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpType {
    Signup,
    Invite,
    Magiclink,
    Recovery,
    Email,
    EmailChange,
}

impl std::str::FromStr for OtpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "invite" => Ok(Self::Invite),
            "magiclink" => Ok(Self::Magiclink),
            "recovery" => Ok(Self::Recovery),
            "email" => Ok(Self::Email),
            "email_change" => Ok(Self::EmailChange),
            other => Err(format!("unknown token type: {other}")),
        }
    }
}

/// Social login providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Facebook => write!(f, "facebook"),
        }
    }
}

/// HTTP client for the identity provider.
///
/// Constructed once from configuration and shared through `AppState`.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| AuthError::Parse(format!("invalid API key format: {e}")))?;
        headers.insert("apikey", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a rejected login and
    /// `AuthError::Provider` for other provider failures.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }

    /// Create an account. The provider emails a type-tagged confirmation
    /// token that lands on `/auth/confirm`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the provider rejects the signup
    /// (e.g., email already registered, weak password).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        let url = format!(
            "{}/auth/v1/signup?redirect_to={}",
            self.base_url,
            urlencoding::encode(redirect_to)
        );
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        Ok(())
    }

    /// Resolve an access token to its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSession` when the token is expired or
    /// revoked.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidSession);
        }
        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }

    /// Verify an emailed one-time token and resolve it to a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` carrying the provider's human-readable
    /// message when the token is invalid or expired.
    pub async fn verify_otp(
        &self,
        token_hash: &str,
        otp_type: OtpType,
    ) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/verify", self.base_url);
        let body = serde_json::json!({ "type": otp_type, "token_hash": token_hash });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }

    /// Build the social login URL for a provider.
    ///
    /// The provider completes its OAuth dance and sends the browser back to
    /// `redirect_to` with a verification token.
    #[must_use]
    pub fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        format!(
            "{}/auth/v1/authorize?provider={provider}&redirect_to={}",
            self.base_url,
            urlencoding::encode(redirect_to)
        )
    }

    /// Revoke an access token.
    ///
    /// An already-dead token is not an error; logout must always succeed
    /// locally.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` for unexpected provider failures.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        Err(provider_error(status, response.text().await.ok()))
    }
}

/// Build an `AuthError::Provider` from a response body, digging the
/// human-readable message out of the common error envelope keys.
fn provider_error(status: StatusCode, body: Option<String>) -> AuthError {
    let message = body
        .as_deref()
        .and_then(extract_error_message)
        .unwrap_or_else(|| "The sign-in service returned an error.".to_owned());

    AuthError::Provider {
        status: status.as_u16(),
        message,
    }
}

/// Pull a message out of a provider error body.
///
/// The provider uses several envelope shapes (`error_description`, `msg`,
/// `message`) depending on the endpoint.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error_description", "msg", "message"] {
        if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
            return Some(message.to_owned());
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> AuthClient {
        AuthClient::new(&AuthConfig {
            api_url: "https://auth.test/".to_string(),
            api_key: SecretString::from("k3y"),
        })
        .unwrap()
    }

    #[test]
    fn test_authorize_url_encodes_redirect() {
        let client = test_client();
        let url = client.authorize_url(OAuthProvider::Google, "https://steer.test/auth/confirm");
        assert_eq!(
            url,
            "https://auth.test/auth/v1/authorize?provider=google&redirect_to=https%3A%2F%2Fsteer.test%2Fauth%2Fconfirm"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = test_client();
        let url = client.authorize_url(OAuthProvider::Facebook, "/next");
        assert!(url.starts_with("https://auth.test/auth/v1/authorize?provider=facebook"));
    }

    #[test]
    fn test_extract_error_message_shapes() {
        assert_eq!(
            extract_error_message(r#"{"error_description":"Token has expired"}"#),
            Some("Token has expired".to_owned())
        );
        assert_eq!(
            extract_error_message(r#"{"msg":"Email not confirmed"}"#),
            Some("Email not confirmed".to_owned())
        );
        assert_eq!(
            extract_error_message(r#"{"message":"nope"}"#),
            Some("nope".to_owned())
        );
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message(r#"{"other":"x"}"#), None);
    }

    #[test]
    fn test_otp_type_from_str() {
        assert_eq!("signup".parse::<OtpType>().unwrap(), OtpType::Signup);
        assert_eq!("magiclink".parse::<OtpType>().unwrap(), OtpType::Magiclink);
        assert_eq!(
            "email_change".parse::<OtpType>().unwrap(),
            OtpType::EmailChange
        );
        assert!("password".parse::<OtpType>().is_err());
    }

    #[test]
    fn test_otp_type_serializes_snake_case() {
        let json = serde_json::to_string(&OtpType::EmailChange).unwrap();
        assert_eq!(json, "\"email_change\"");
    }
}
