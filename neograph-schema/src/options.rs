//! Generation options
//!
//! Features that switch whole families of generated schema members on or off.
//! Options can be embedded in a type graph document under `"features"`.

use serde::Deserialize;

/// Options steering schema augmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AugmentOptions {
    /// Generate subscription event types, filters and root fields
    pub subscriptions: bool,
}

impl AugmentOptions {
    /// Enable subscription generation
    pub fn with_subscriptions(mut self) -> Self {
        self.subscriptions = true;
        self
    }
}
