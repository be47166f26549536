use crate::foundation::core::ShotCount;
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::BakedShots;

/// Schema version written by this build.
pub const SESSION_VERSION: u32 = 1;

/// Everything one screen hands to the next.
///
/// Field names on the wire keep the historical storage keys (`selectedShots`,
/// `photoBoothImages`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    /// Schema version; anything but [`SESSION_VERSION`] is rejected.
    pub version: u32,
    /// Count chosen on the selector screen.
    #[serde(
        rename = "selectedShots",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_shots: Option<ShotCount>,
    /// Filter-baked shots produced by the capture screen.
    #[serde(
        rename = "photoBoothImages",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub baked: Option<BakedShots>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            selected_shots: None,
            baked: None,
        }
    }
}

impl SessionState {
    /// Parse and validate a stored session document.
    pub fn from_json(bytes: &[u8]) -> BoothResult<Self> {
        let state: Self = serde_json::from_slice(bytes)
            .map_err(|e| BoothError::serde(format!("parse session JSON: {e}")))?;
        state.validate()?;
        Ok(state)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> BoothResult<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| BoothError::serde(format!("write session JSON: {e}")))
    }

    /// Check schema version and cross-field consistency.
    pub fn validate(&self) -> BoothResult<()> {
        if self.version != SESSION_VERSION {
            return Err(BoothError::session(format!(
                "unsupported session version {} (expected {SESSION_VERSION})",
                self.version
            )));
        }
        if let (Some(selected), Some(baked)) = (self.selected_shots, &self.baked)
            && baked.target() != selected
        {
            return Err(BoothError::session(format!(
                "stored strip has {} shots but {} were selected",
                baked.target(),
                selected
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
