//! Session token signing and cookie plumbing.

use std::fmt;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AdminError;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// A verified session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Random per-login identifier.
    pub id: Uuid,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens, and checks the admin password.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
    password: Option<String>,
    ttl_secs: u64,
    secure_cookies: bool,
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("password_configured", &self.password.is_some())
            .field("ttl_secs", &self.ttl_secs)
            .field("secure_cookies", &self.secure_cookies)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    /// Creates a signer keyed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Internal`] if the key is rejected by HMAC.
    pub fn new(
        secret: &[u8],
        password: Option<String>,
        ttl_secs: u64,
        secure_cookies: bool,
    ) -> Result<Self, AdminError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| AdminError::Internal(format!("session key: {e}")))?;
        Ok(Self {
            mac,
            password,
            ttl_secs,
            secure_cookies,
        })
    }

    /// Builds a signer from configuration.
    ///
    /// Without `ADMIN_SESSION_SECRET` a random key is generated, so
    /// sessions do not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Internal`] if the key is rejected by HMAC.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AdminError> {
        let secret = match &config.session_secret {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                tracing::warn!("ADMIN_SESSION_SECRET not set; sessions end on restart");
                let mut key = Uuid::new_v4().as_bytes().to_vec();
                key.extend_from_slice(Uuid::new_v4().as_bytes());
                key
            }
        };
        if config.admin_password.is_none() {
            tracing::warn!("ADMIN_PASSWORD not set; admin login is disabled");
        }
        Self::new(
            &secret,
            config.admin_password.clone(),
            config.session_ttl_secs,
            config.secure_cookies,
        )
    }

    /// Session lifetime in seconds.
    #[must_use]
    pub const fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Whether cookies carry the `Secure` attribute.
    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Checks a submitted password against the configured one.
    ///
    /// Both sides are MACed and the tags compared in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotConfigured`] when no password is set and
    /// [`AdminError::InvalidCredentials`] on mismatch.
    pub fn check_password(&self, submitted: &str) -> Result<(), AdminError> {
        let Some(expected) = &self.password else {
            return Err(AdminError::NotConfigured(
                "Admin login is not configured.".to_string(),
            ));
        };
        let mut expected_mac = self.mac.clone();
        expected_mac.update(b"password:");
        expected_mac.update(expected.as_bytes());
        let expected_tag = expected_mac.finalize().into_bytes();

        let mut submitted_mac = self.mac.clone();
        submitted_mac.update(b"password:");
        submitted_mac.update(submitted.as_bytes());
        submitted_mac
            .verify_slice(&expected_tag)
            .map_err(|_| AdminError::InvalidCredentials)
    }

    /// Issues a fresh token valid for the configured lifetime.
    #[must_use]
    pub fn issue(&self, now: DateTime<Utc>) -> (String, Session) {
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let expires_at = DateTime::from_timestamp(now.timestamp().saturating_add(ttl), 0)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let session = Session {
            id: Uuid::new_v4(),
            expires_at,
        };
        let payload = format!("{}.{}", session.id, expires_at.timestamp());
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&payload));
        (format!("{payload}.{signature}"), session)
    }

    /// Verifies a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] for malformed, tampered, or
    /// expired tokens.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Session, AdminError> {
        let (payload, signature) = token.rsplit_once('.').ok_or(AdminError::Unauthorized)?;
        let (id, expires) = payload.split_once('.').ok_or(AdminError::Unauthorized)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AdminError::Unauthorized)?;
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AdminError::Unauthorized)?;

        let id = Uuid::parse_str(id).map_err(|_| AdminError::Unauthorized)?;
        let expires_at = expires
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(AdminError::Unauthorized)?;
        if expires_at <= now {
            return Err(AdminError::Unauthorized);
        }
        Ok(Session { id, expires_at })
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// `Set-Cookie` value installing `token`.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Reads the session token from the request's `Cookie` headers.
#[must_use]
pub fn session_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}
