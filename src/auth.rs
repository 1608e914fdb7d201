//! Session authentication: username/password accounts, bearer tokens, config
//! from env, dev bypass.
//!
//! When `DISABLE_AUTH=true`, all requests pass through with no acting user,
//! and movements are recorded unattributed. Otherwise `/products` and
//! `/movements` require `Authorization: Bearer <token>` from a prior
//! login/register; the middleware injects [`AuthUser`] so handlers can
//! attribute movements to a username.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use log::info;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AuthError;

/// bcrypt work factor for stored passwords (roughly 250ms per hash at 12).
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
/// Length of session tokens (alphanumeric).
const TOKEN_LEN: usize = 48;
/// Minimum accepted password length, in characters.
const MIN_PASSWORD_LEN: usize = 4;

/// Acting user injected by the session middleware. `username` is `None` when
/// auth is disabled; mutations are then recorded without attribution.
#[derive(Clone, Debug, Default)]
pub struct AuthUser {
    pub username: Option<String>,
}

/// A live session: the bearer token plus the username it maps to.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// User directory and session table. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Auth {
    pub disable: bool,
    cost: u32,
    /// username -> bcrypt hash
    users: Arc<Mutex<HashMap<String, String>>>,
    /// token -> username
    sessions: Arc<Mutex<HashMap<String, String>>>,
}

impl Auth {
    /// Auth disabled: all requests accepted, no actor attributed.
    pub fn disabled() -> Self {
        Self {
            disable: true,
            cost: HASH_COST,
            users: Arc::new(Mutex::new(HashMap::new())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Build from (username, password) pairs with an explicit bcrypt cost.
    /// Tests pass a low cost to keep hashing fast.
    pub fn from_users(users: &[(&str, &str)], cost: u32) -> Result<Self, AuthError> {
        let mut map = HashMap::new();
        for &(username, password) in users {
            map.insert(username.trim().to_string(), bcrypt::hash(password, cost)?);
        }
        Ok(Self {
            disable: false,
            cost,
            users: Arc::new(Mutex::new(map)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Load from env: `DISABLE_AUTH=true` (or `1`) bypasses auth entirely.
    /// Seeds one admin account, `ADMIN_USER`/`ADMIN_PASSWORD` (default
    /// `admin`/`admin`).
    pub fn from_env() -> Result<Self, AuthError> {
        let disable = std::env::var("DISABLE_AUTH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let admin_user = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
        let auth = Self::from_users(&[(&admin_user, &admin_password)], HASH_COST)?;
        Ok(Self { disable, ..auth })
    }

    /// Create an account and log it straight in. The username is trimmed and
    /// must be non-empty and unused; the password must have at least
    /// [`MIN_PASSWORD_LEN`] characters.
    pub fn register(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let hash = bcrypt::hash(password, self.cost)?;
        {
            let mut users = self.users.lock().expect("users lock");
            if users.contains_key(username) {
                return Err(AuthError::UsernameTaken);
            }
            users.insert(username.to_string(), hash);
        }
        info!("user registered username={:?}", username);
        Ok(self.start_session(username))
    }

    /// Verify credentials and start a session.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        let hash = {
            let users = self.users.lock().expect("users lock");
            users.get(username).cloned()
        };
        let hash = match hash {
            Some(h) => h,
            None => return Err(AuthError::InvalidCredentials),
        };
        // Verify outside the lock; bcrypt is deliberately slow.
        if !bcrypt::verify(password, &hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        info!("user logged in username={:?}", username);
        Ok(self.start_session(username))
    }

    /// Revoke a session token. Returns whether a session existed. Idempotent.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.lock().expect("sessions lock").remove(token);
        if let Some(username) = &removed {
            info!("user logged out username={:?}", username);
        }
        removed.is_some()
    }

    /// The username a token maps to, if the session is live.
    pub fn username_for(&self, token: &str) -> Option<String> {
        self.sessions
            .lock()
            .expect("sessions lock")
            .get(token)
            .cloned()
    }

    fn start_session(&self, username: &str) -> Session {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        self.sessions
            .lock()
            .expect("sessions lock")
            .insert(token.clone(), username.to_string());
        Session {
            token,
            username: username.to_string(),
        }
    }
}

/// Returns the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let v = headers.get(header::AUTHORIZATION)?;
    let s = v.to_str().ok()?.trim();
    if s.len() >= 7
        && s.get(..7)
            .map(|p| p.eq_ignore_ascii_case("bearer "))
            .unwrap_or(false)
    {
        Some(s.get(7..).unwrap_or("").trim().to_string())
    } else {
        None
    }
}

/// Session middleware: when auth is disabled, injects a blank [`AuthUser`]
/// and continues. Otherwise requires a live bearer token and injects
/// `AuthUser { username }`; returns 401 if the token is missing or unknown.
pub async fn require_session(mut req: Request<Body>, next: Next, auth: Auth) -> Response {
    if auth.disable {
        req.extensions_mut().insert(AuthUser::default());
        return next.run(req).await;
    }

    let username = bearer_token(req.headers())
        .filter(|t| !t.is_empty())
        .and_then(|t| auth.username_for(&t));

    match username {
        Some(username) => {
            req.extensions_mut().insert(AuthUser {
                username: Some(username),
            });
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": AuthError::NotAuthenticated.to_string() })),
        )
            .into_response(),
    }
}
