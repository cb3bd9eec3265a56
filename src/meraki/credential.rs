//! API key resolution.
//!
//! The key comes from the environment or an interactive hidden prompt and is
//! checked against `GET /organizations`. A rejected key (HTTP 401) is cleared
//! and the operator is asked again; any other failure ends the run.
//!
//! The loop is a small state machine. [`CredentialState::next`] is the pure
//! transition table; [`resolve`] performs the I/O each state asks for.

use crate::config::API_KEY_ENV;
use crate::error::{ApiError, CredentialError};
use crate::models::Organization;
use crate::output::{failure, warning, Console};
use std::env;
use std::fmt;

const KEY_PROMPT: &str = "Please enter your Meraki Dashboard API key (input is hidden): ";

/// Dashboard API key. Never printed: `Debug` shows a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> ApiKey {
        ApiKey(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Where a previously supplied key may be found.
pub trait CredentialStore {
    fn load(&self) -> Option<ApiKey>;
    /// Forget the stored key so the next [`load`](CredentialStore::load) returns `None`.
    fn clear(&mut self);
}

/// Key held in a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    var: String,
}

impl EnvCredentialStore {
    pub fn new(var: impl Into<String>) -> EnvCredentialStore {
        EnvCredentialStore { var: var.into() }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        EnvCredentialStore::new(API_KEY_ENV)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn load(&self) -> Option<ApiKey> {
        env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(ApiKey)
    }

    fn clear(&mut self) {
        log::info!("Clearing {} from the environment", self.var);
        env::remove_var(&self.var);
    }
}

#[derive(Debug)]
pub enum CredentialState {
    NeedCredential,
    Validating(ApiKey),
    Valid(ApiKey),
    AuthError,
    FatalError(ApiError),
}

/// What happened while in a state.
#[derive(Debug)]
pub enum Input {
    /// A key was read from the store or the operator.
    Supplied(ApiKey),
    /// The validation call returned.
    Checked(Result<(), ApiError>),
    /// The rejected key was removed from the store.
    Cleared,
}

impl CredentialState {
    pub fn next(self, input: Input) -> CredentialState {
        use CredentialState::*;
        match (self, input) {
            (NeedCredential, Input::Supplied(key)) => Validating(key),
            (Validating(key), Input::Checked(Ok(()))) => Valid(key),
            (Validating(_), Input::Checked(Err(e))) if e.is_auth() => AuthError,
            (Validating(_), Input::Checked(Err(e))) => FatalError(e),
            (AuthError, Input::Cleared) => NeedCredential,
            // Inputs that do not apply leave the state as is.
            (state, _) => state,
        }
    }
}

/// A validated key and the organizations it can see.
#[derive(Debug)]
pub struct ResolvedCredential {
    pub api_key: ApiKey,
    pub organizations: Vec<Organization>,
}

/// Loop until a key passes `validate`, or a non-auth error occurs.
///
/// `validate` performs `GET /organizations` with the candidate key; its
/// result is handed back so the organization list is fetched only once.
pub fn resolve<S, C, V>(
    store: &mut S,
    console: &mut C,
    mut validate: V,
) -> Result<ResolvedCredential, CredentialError>
where
    S: CredentialStore + ?Sized,
    C: Console + ?Sized,
    V: FnMut(&ApiKey) -> Result<Vec<Organization>, ApiError>,
{
    let mut state = CredentialState::NeedCredential;
    let mut organizations = Vec::new();

    loop {
        let input = match state {
            CredentialState::Valid(api_key) => {
                log::info!("API key accepted, {} organizations visible", organizations.len());
                return Ok(ResolvedCredential {
                    api_key,
                    organizations,
                });
            }
            CredentialState::FatalError(err) => {
                log::error!("API key validation failed: {err}");
                return Err(CredentialError::Api(err));
            }
            CredentialState::NeedCredential => Input::Supplied(acquire(store, console)?),
            CredentialState::Validating(ref key) => {
                log::debug!("Validating API key");
                Input::Checked(validate(key).map(|orgs| organizations = orgs))
            }
            CredentialState::AuthError => {
                log::warn!("API key rejected with HTTP 401");
                console.say(&failure("Invalid API key. Please try again."));
                store.clear();
                Input::Cleared
            }
        };
        state = state.next(input);
    }
}

/// Take the stored key, or ask the operator until they type a non-empty one.
fn acquire<S, C>(store: &S, console: &mut C) -> Result<ApiKey, CredentialError>
where
    S: CredentialStore + ?Sized,
    C: Console + ?Sized,
{
    if let Some(key) = store.load() {
        log::info!("Using API key from {API_KEY_ENV}");
        return Ok(key);
    }

    console.say(&warning("Meraki API key not found in environment."));
    loop {
        let entered = console.read_secret(KEY_PROMPT)?;
        let entered = entered.trim();
        if !entered.is_empty() {
            return Ok(ApiKey::new(entered));
        }
        console.say(&warning("The API key cannot be empty."));
    }
}
