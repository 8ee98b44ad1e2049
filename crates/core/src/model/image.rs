use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageRefError {
    #[error("image path cannot be empty")]
    Empty,

    #[error("image path must be relative to the asset root: {0}")]
    NotRelative(String),
}

//
// ─── IMAGE REFERENCE ───────────────────────────────────────────────────────────
//

/// Relative locator of a diagram or component image under the asset root.
///
/// The core never reads image bytes; resolving the path and deciding what to
/// show when the file is absent belongs to the presentation side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(PathBuf);

impl ImageRef {
    /// Validates a relative asset path.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError::Empty` for blank input and
    /// `ImageRefError::NotRelative` for absolute paths or paths escaping the root.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(ImageRefError::Empty);
        }
        let path = PathBuf::from(s);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ImageRefError::NotRelative(s.to_string()));
        }
        Ok(Self(path))
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ImageRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative_paths() {
        let image = ImageRef::new("images/components/gearbox.png").unwrap();
        assert_eq!(image.to_string(), "images/components/gearbox.png");
    }

    #[test]
    fn rejects_empty_and_escaping_paths() {
        assert_eq!(ImageRef::new("  "), Err(ImageRefError::Empty));
        assert!(matches!(
            ImageRef::new("/etc/passwd"),
            Err(ImageRefError::NotRelative(_))
        ));
        assert!(matches!(
            ImageRef::new("../secret.png"),
            Err(ImageRefError::NotRelative(_))
        ));
    }

    #[test]
    fn deserialization_validates_paths() {
        let image: ImageRef = serde_json::from_str("\"images/wind_system.png\"").unwrap();
        assert_eq!(image.as_path(), Path::new("images/wind_system.png"));
        assert_eq!(
            serde_json::to_string(&image).unwrap(),
            "\"images/wind_system.png\""
        );

        assert!(serde_json::from_str::<ImageRef>("\"\"").is_err());
        assert!(serde_json::from_str::<ImageRef>("\"/etc/passwd\"").is_err());
        assert!(serde_json::from_str::<ImageRef>("\"../up.png\"").is_err());
    }
}
