use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of one of the four energy-system modules.
///
/// The set is closed: anything that does not parse into one of these
/// variants is an unknown module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Solar,
    Wind,
    Hydro,
    Biomass,
}

impl ModuleId {
    /// All modules in curriculum order.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::Solar,
        ModuleId::Wind,
        ModuleId::Hydro,
        ModuleId::Biomass,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Solar => "solar",
            ModuleId::Wind => "wind",
            ModuleId::Hydro => "hydro",
            ModuleId::Biomass => "biomass",
        }
    }

    /// Position in curriculum order (0-based).
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            ModuleId::Solar => 0,
            ModuleId::Wind => 1,
            ModuleId::Hydro => 2,
            ModuleId::Biomass => 3,
        }
    }

    #[must_use]
    pub fn previous(&self) -> Option<ModuleId> {
        self.position()
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    #[must_use]
    pub fn next(&self) -> Option<ModuleId> {
        Self::ALL.get(self.position() + 1).copied()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `ModuleId` from string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown module id: {raw}")]
pub struct ParseModuleIdError {
    raw: String,
}

impl ParseModuleIdError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ModuleId {
    type Err = ParseModuleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar" => Ok(ModuleId::Solar),
            "wind" => Ok(ModuleId::Wind),
            "hydro" => Ok(ModuleId::Hydro),
            "biomass" => Ok(ModuleId::Biomass),
            other => Err(ParseModuleIdError {
                raw: other.to_string(),
            }),
        }
    }
}

// ─── Session keys ──────────────────────────────────────────────────────────────

pub const SESSION_KEY_MAX_LEN: usize = 128;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionKeyError {
    #[error("session key cannot be empty")]
    Empty,

    #[error("session key is too long: {len} > {SESSION_KEY_MAX_LEN}")]
    TooLong { len: usize },
}

/// Key under which one visitor's progress is stored.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a session key from user-provided text.
    ///
    /// # Errors
    ///
    /// Returns `SessionKeyError::Empty` for blank input and
    /// `SessionKeyError::TooLong` above `SESSION_KEY_MAX_LEN` characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SessionKeyError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SessionKeyError::Empty);
        }
        let len = trimmed.chars().count();
        if len > SESSION_KEY_MAX_LEN {
            return Err(SessionKeyError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({})", self.0)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionKey {
    type Err = SessionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionKey {
    type Error = SessionKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
