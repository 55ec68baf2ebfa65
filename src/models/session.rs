use serde::{Deserialize, Serialize};

/// An authenticated user session returned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier; owns every record created in this session
    pub owner_id: String,
    pub email: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Which screen stack the application should show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Persisted session not yet resolved
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated(session) => Some(&session.owner_id),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}
