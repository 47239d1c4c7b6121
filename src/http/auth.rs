//! Bearer-token authorization for the REST API.
//!
//! Tokens and their permission grants come from an `access.toml` file (or a
//! single-token environment fallback). There is no implicit admin: a request
//! without a valid token is rejected with 401, and a valid token without the
//! required permission with 403. A server started without any configured
//! policy denies every `/v1` request.
//!
//! ```toml
//! [[tokens]]
//! token = "s3cret"
//! name = "front-desk"
//! permissions = ["booking.view", "booking.create", "booking.confirm"]
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::AppError;
use super::state::AppState;

/// Permission names understood by the API.
pub mod permissions {
    pub const BOOKING_VIEW: &str = "booking.view";
    pub const BOOKING_CREATE: &str = "booking.create";
    pub const BOOKING_CONFIRM: &str = "booking.confirm";
    pub const BOOKING_EDIT: &str = "booking.edit";
    pub const BOOKING_DELETE: &str = "booking.delete";

    /// Every permission the API knows about.
    pub const ALL: &[&str] = &[
        BOOKING_VIEW,
        BOOKING_CREATE,
        BOOKING_CONFIRM,
        BOOKING_EDIT,
        BOOKING_DELETE,
    ];
}

/// One token entry in the policy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenEntry {
    token: String,
    name: String,
    #[serde(default)]
    permissions: Vec<String>,
}

/// Policy file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    tokens: Vec<TokenEntry>,
}

/// What a validated token is allowed to do.
#[derive(Debug, Clone)]
pub struct Grant {
    pub name: String,
    pub permissions: HashSet<String>,
}

/// Token-to-grant mapping for the whole server.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    grants: HashMap<String, Grant>,
}

impl AccessPolicy {
    /// A policy that rejects every request. This is the startup fallback
    /// when no policy is configured: fail closed, never a default admin.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Load a policy from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let file: PolicyFile = toml::from_str(&content)?;

        let mut policy = Self::default();
        for entry in file.tokens {
            policy.grants.insert(
                entry.token,
                Grant {
                    name: entry.name,
                    permissions: entry.permissions.into_iter().collect(),
                },
            );
        }
        Ok(policy)
    }

    /// Load a policy from the default locations (`access.toml` in the
    /// current or parent directory).
    pub fn from_default_location() -> anyhow::Result<Self> {
        let search_paths = [
            PathBuf::from("access.toml"),
            PathBuf::from("../access.toml"),
        ];
        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        anyhow::bail!("No access.toml found in standard locations")
    }

    /// Single-token fallback from `ACS_API_TOKEN`.
    ///
    /// The token is granted every permission; setting the variable is the
    /// operator's explicit opt-in.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("ACS_API_TOKEN").ok()?;
        if token.is_empty() {
            return None;
        }
        let mut policy = Self::default();
        policy.grants.insert(
            token,
            Grant {
                name: "env-token".to_string(),
                permissions: permissions::ALL.iter().map(|p| p.to_string()).collect(),
            },
        );
        Some(policy)
    }

    /// Look up the grant for a presented token.
    pub fn authenticate(&self, token: &str) -> Option<&Grant> {
        self.grants.get(token)
    }

    /// Whether any token is configured at all.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub name: String,
    permissions: HashSet<String>,
}

impl CurrentUser {
    pub fn has(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Check a permission, rejecting with 403 when missing.
    pub fn require(&self, permission: &str) -> Result<(), AppError> {
        if self.has(permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Missing permission: {}",
                permission
            )))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))?;

        let grant = state
            .access
            .authenticate(token)
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        Ok(CurrentUser {
            name: grant.name.clone(),
            permissions: grant.permissions.clone(),
        })
    }
}
