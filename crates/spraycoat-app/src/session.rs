//! Signed-in session, passed explicitly to whatever needs the current user.
//!
//! Sign-in only records who is using the dashboard; credentials are checked
//! by the hosted identity provider and never reach this crate.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use spraycoat_types::{AuthError, ConfigError, Error, Result};
use tracing::{debug, info};

/// Persisted session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub signed_in_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_active_at > timeout
    }
}

/// What the rest of the app sees of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user_identifier: Option<String>,
}

impl SessionState {
    pub fn signed_out() -> Self {
        Self {
            is_authenticated: false,
            user_identifier: None,
        }
    }
}

pub trait IdentityProvider {
    fn sign_in(&self, user: &str) -> Result<Session>;

    fn sign_out(&self) -> Result<()>;

    fn current_session(&self) -> Result<SessionState>;

    /// Current user, refreshing the inactivity timer. Fails when signed out or expired.
    fn require_user(&self) -> Result<String>;
}

/// Session stored as a JSON file, expiring after a period of inactivity
pub struct FileIdentityProvider {
    session_path: PathBuf,
    timeout: Duration,
}

impl FileIdentityProvider {
    pub fn new(session_path: PathBuf, timeout_minutes: i64) -> Result<Self> {
        let timeout = Duration::try_minutes(timeout_minutes)
            .filter(|timeout| *timeout > Duration::zero())
            .ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "session timeout of {} minutes is out of range",
                    timeout_minutes
                ))
            })?;
        Ok(Self {
            session_path,
            timeout,
        })
    }

    fn load(&self) -> Result<Option<Session>> {
        if !self.session_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.session_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.session_path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path)?;
        }
        Ok(())
    }

    pub fn sign_in_at(&self, user: &str, now: DateTime<Utc>) -> Result<Session> {
        let user = user.trim();
        if user.is_empty() {
            return Err(Error::validation("user", "required"));
        }
        let session = Session {
            user: user.to_string(),
            signed_in_at: now,
            last_active_at: now,
        };
        self.save(&session)?;
        info!(user = %session.user, "signed in");
        Ok(session)
    }

    /// Live session at `now`; an expired session is removed
    pub fn active_session_at(&self, now: DateTime<Utc>) -> Result<Session> {
        let session = self.load()?.ok_or(AuthError::NotSignedIn)?;
        if session.is_expired(now, self.timeout) {
            self.clear()?;
            info!(user = %session.user, "session expired");
            return Err(AuthError::Expired(self.timeout.num_minutes()).into());
        }
        Ok(session)
    }

    pub fn current_session_at(&self, now: DateTime<Utc>) -> Result<SessionState> {
        match self.active_session_at(now) {
            Ok(session) => Ok(SessionState {
                is_authenticated: true,
                user_identifier: Some(session.user),
            }),
            Err(Error::Auth(_)) => Ok(SessionState::signed_out()),
            Err(e) => Err(e),
        }
    }

    pub fn require_user_at(&self, now: DateTime<Utc>) -> Result<String> {
        let mut session = self.active_session_at(now)?;
        session.last_active_at = now;
        self.save(&session)?;
        debug!(user = %session.user, "session refreshed");
        Ok(session.user)
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn sign_in(&self, user: &str) -> Result<Session> {
        self.sign_in_at(user, Utc::now())
    }

    fn sign_out(&self) -> Result<()> {
        self.clear()?;
        info!("signed out");
        Ok(())
    }

    fn current_session(&self) -> Result<SessionState> {
        self.current_session_at(Utc::now())
    }

    fn require_user(&self) -> Result<String> {
        self.require_user_at(Utc::now())
    }
}
