//! # GreenAudit client
//!
//! `greenaudit` is the client SDK and terminal front end for the GreenAudit
//! sustainability platform. The backend tracks three audit families —
//! carbon-emission, IGBC green-building, and ESG — behind a JSON API with
//! bearer-token authentication.
//!
//! ## Components
//!
//! - [`api`] — stateless request layer. Every operation returns an
//!   [`api::ApiOutcome`]: either the typed payload from a `success: true`
//!   envelope, or a failure carrying the server's message. Transport and
//!   parse errors collapse into a uniform network failure; nothing panics
//!   on a bad response.
//! - [`session`] — file-backed session store holding the bearer token and
//!   user profile (written and cleared together), plus the transient email
//!   used by the two-step password-reset flow.
//! - [`validate`] — pre-network input checks: the five-requirement password
//!   policy, OTP sanitizing, and email shape.
//! - [`flows`] — orchestration tying the three together: login persists the
//!   session, `current_user` drops it when the server rejects the token,
//!   logout clears first and notifies the server best-effort.
//! - [`cli`] — clap command tree for the `greenaudit` binary.
//!
//! ## Token lifecycle
//!
//! The client performs no expiry bookkeeping. A stored token is presumed
//! valid until the server rejects it, at which point the flows clear the
//! local session and the user must log in again.

pub mod api;
pub mod cli;
pub mod flows;
pub mod session;
pub mod validate;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
