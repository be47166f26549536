use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{BoothError, BoothResult};
use crate::session::state::SessionState;

/// Environment variable overriding the session file location.
pub const SESSION_ENV: &str = "STRIPBOOTH_SESSION";

/// Default session file, relative to the working directory.
pub const DEFAULT_SESSION_PATH: &str = ".stripbooth/session.json";

/// Where screens read and write the shared [`SessionState`].
pub trait SessionStore {
    /// Current state; a store that was never written yields the default state.
    fn load(&self) -> BoothResult<SessionState>;

    /// Replace the stored state.
    fn save(&mut self, state: &SessionState) -> BoothResult<()>;

    /// Like [`SessionStore::load`], but a stored document that cannot be parsed or fails
    /// validation yields the default state. Errors reaching the store itself still propagate.
    fn load_or_default(&self) -> BoothResult<SessionState> {
        match self.load() {
            Ok(state) => Ok(state),
            Err(e @ (BoothError::Session(_) | BoothError::Serde(_))) => {
                tracing::warn!(error = %e, "discarding unreadable session state");
                Ok(SessionState::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Read-modify-write helper. An unreadable stored document is replaced, not merged.
    fn update(&mut self, f: &mut dyn FnMut(&mut SessionState)) -> BoothResult<SessionState> {
        let mut state = self.load_or_default()?;
        f(&mut state);
        state.validate()?;
        self.save(&state)?;
        Ok(state)
    }
}

/// JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$STRIPBOOTH_SESSION`, or [`DEFAULT_SESSION_PATH`].
    pub fn from_env() -> Self {
        let path = std::env::var_os(SESSION_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));
        Self::new(path)
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> BoothResult<SessionState> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionState::default());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read session '{}'", self.path.display()))
                    .into());
            }
        };
        SessionState::from_json(&bytes)
    }

    #[tracing::instrument(skip(self, state), fields(path = %self.path.display()))]
    fn save(&mut self, state: &SessionState) -> BoothResult<()> {
        let bytes = state.to_json()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create session dir '{}'", parent.display()))?;
        }

        // Write-then-rename: a reader never sees a partially written session.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes)
            .with_context(|| format!("write session '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace session '{}'", self.path.display()))?;
        tracing::debug!(bytes = bytes.len(), "session saved");
        Ok(())
    }
}

/// In-memory store; keeps the serialized form so the JSON schema is exercised.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    json: Option<Vec<u8>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document, if any.
    pub fn raw(&self) -> Option<&[u8]> {
        self.json.as_deref()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> BoothResult<SessionState> {
        match &self.json {
            Some(bytes) => SessionState::from_json(bytes),
            None => Ok(SessionState::default()),
        }
    }

    fn save(&mut self, state: &SessionState) -> BoothResult<()> {
        self.json = Some(state.to_json()?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/store.rs"]
mod tests;
