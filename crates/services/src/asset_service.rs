use std::path::{Path, PathBuf};

use energy_core::model::ImageRef;

/// Outcome of looking an image up under the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Available(PathBuf),
    /// The file is absent; show `placeholder` instead.
    Missing { path: PathBuf, placeholder: String },
}

impl AssetStatus {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, AssetStatus::Available(_))
    }
}

/// Resolves relative image references against a directory on disk.
///
/// A missing file is an expected state while diagrams are being authored, so
/// resolution never fails.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Image of a single component.
    #[must_use]
    pub fn component_image(&self, image: &ImageRef) -> AssetStatus {
        self.resolve(image, "Component image")
    }

    /// Diagram of a whole energy system.
    #[must_use]
    pub fn system_diagram(&self, image: &ImageRef) -> AssetStatus {
        self.resolve(image, "Place your diagram here")
    }

    fn resolve(&self, image: &ImageRef, label: &str) -> AssetStatus {
        let path = self.root.join(image.as_path());
        if path.is_file() {
            AssetStatus::Available(path)
        } else {
            tracing::debug!(path = %path.display(), "asset missing, using placeholder");
            AssetStatus::Missing {
                placeholder: format!("{label}: `{image}`"),
                path,
            }
        }
    }
}
