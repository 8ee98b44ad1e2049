use serde::Serialize;

use crate::model::image::ImageRef;

/// One physical component of an energy system.
///
/// `name` is the display name used in assembly submissions; `key` is the
/// compact identifier (`HubPitchSystem` for "Hub & Pitch System").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub key: String,
    pub name: String,
    pub description: String,
    pub specs: String,
    pub function: String,
    pub image: ImageRef,
}

impl ComponentRecord {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        specs: impl Into<String>,
        function: impl Into<String>,
        image: ImageRef,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            specs: specs.into(),
            function: function.into(),
            image,
        }
    }
}
