//! # Storefront (Identity Lifecycle & Catalog Gateway)
//!
//! `storefront` is a stateless HTTP gateway in front of two external systems:
//!
//! - an **identity provider** (a Cognito user pool) that owns accounts,
//!   credentials and confirmation codes, and
//! - a **product catalog** API whose data is proxied read-only.
//!
//! ## Identity Lifecycle
//!
//! Accounts move through `Unregistered -> PendingConfirmation -> Confirmed ->
//! SessionIssued` via `POST /signup`, `POST /confirm` and `POST /signin`. The
//! provider owns every transition; this service validates requests, performs
//! exactly one provider call per request and translates provider failures into
//! a stable HTTP error taxonomy.
//!
//! ## Error Responses
//!
//! Every failure body carries two fields: `message` (stable, safe to display)
//! and `error` (raw diagnostic, may be provider specific).
//!
//! ## Configuration
//!
//! A missing user pool client id does not prevent startup. Identity routes then
//! answer `500 Server misconfiguration` before looking at the request body.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod identity;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
