//! Admin authentication: password login, signed session cookies, and the
//! middleware guarding `/admin`.
//!
//! A successful login issues `{session_id}.{expires_unix}.{signature}`
//! where the signature is base64url HMAC-SHA256 over the first two parts.
//! Nothing is stored server-side; every protected request re-verifies the
//! signature and the expiry.

pub mod guard;
pub mod session;

pub use guard::require_session;
pub use session::{
    SESSION_COOKIE, Session, SessionSigner, clear_session_cookie, session_cookie,
    session_from_headers,
};
