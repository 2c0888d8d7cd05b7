//! Session store: the locally persisted "who is using the client" marker.
//!
//! The session is a full [`User`] snapshot stored under [`SESSION_KEY`]. It is
//! the only local state the client keeps, and the only gate in front of the
//! protected views.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::models::User;
use crate::common::safe_email_log;

/// Storage key for the serialized session user.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait SessionStore: Send + Sync {
    /// Persists `user` as the current session, replacing any previous one.
    fn sign_in(&self, user: &User) -> Result<(), SessionError>;

    /// The persisted user, or `None`. Never creates a session.
    fn current_user(&self) -> Option<User>;

    /// Erases the session. Remote data is untouched.
    fn sign_out(&self) -> Result<(), SessionError>;
}

/// Session persisted as `<dir>/user.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SESSION_KEY))
    }

    fn read_user(path: &Path) -> Option<User> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn sign_in(&self, user: &User) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(user)?)?;
        fs::rename(&tmp, &path)?;

        info!(
            user_id = user.id,
            email = %safe_email_log(&user.email),
            "Session started"
        );
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        let user = Self::read_user(&self.path());
        debug!(present = user.is_some(), "Session checked");
        user
    }

    fn sign_out(&self) -> Result<(), SessionError> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session for tests. Stores the serialized form so round-trips are
/// exercised the same way as on disk.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: &User) -> Result<Self, SessionError> {
        let store = Self::new();
        store.sign_in(user)?;
        Ok(store)
    }
}

impl SessionStore for MemorySessionStore {
    fn sign_in(&self, user: &User) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(user)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(serialized);
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    fn sign_out(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
