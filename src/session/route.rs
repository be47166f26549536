use std::fmt;

use crate::foundation::core::ShotCount;
use crate::foundation::error::{BoothError, BoothResult};

/// A screen plus the navigation parameters it is opened with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Landing screen, start of the flow.
    Home,
    /// Shot selector.
    Booth,
    /// Capture screen for `shots` photos.
    Capture {
        /// Target count carried in `?shots=`.
        shots: ShotCount,
    },
    /// Strip composer; `complete` is the `?complete=` flag.
    Strip {
        /// Set by the capture screen once a baked strip is stored.
        complete: bool,
    },
}

impl Route {
    /// Parse a path with an optional query string, e.g. `/capture?shots=3`.
    ///
    /// A missing or unparsable `shots` parameter falls back to a single shot.
    pub fn parse(s: &str) -> BoothResult<Self> {
        let s = s.trim();
        let (path, query) = s.split_once('?').unwrap_or((s, ""));
        let param = |key: &str| -> Option<&str> {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v)
        };

        match path.trim_end_matches('/') {
            "" => Ok(Self::Home),
            "/booth" => Ok(Self::Booth),
            "/capture" | "/instructions" | "/photoCapture" => {
                let shots = param("shots")
                    .and_then(|v| v.parse::<ShotCount>().ok())
                    .unwrap_or(ShotCount::One);
                Ok(Self::Capture { shots })
            }
            "/background" | "/strip" => Ok(Self::Strip {
                complete: param("complete") == Some("true"),
            }),
            other => Err(BoothError::validation(format!("unknown route \"{other}\""))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Booth => f.write_str("/booth"),
            Self::Capture { shots } => write!(f, "/capture?shots={shots}"),
            Self::Strip { complete } => write!(f, "/background?complete={complete}"),
        }
    }
}

impl std::str::FromStr for Route {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/route.rs"]
mod tests;
