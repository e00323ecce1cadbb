use thiserror::Error;

/// Default slot size. Also the distance a neighbor shifts to open or close a gap.
pub const ITEM_WIDTH: f32 = 64.0;
pub const TARGET_SCALE: f32 = 1.1;
pub const DRAGGED_SCALE: f32 = 0.8;
/// Seconds.
pub const RETURN_DURATION: f32 = 0.3;
/// How far along the release velocity the release position is projected, in seconds. One frame
/// at 60Hz.
pub const RELEASE_EXTRAPOLATION: f32 = 1.0 / 60.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("item width must be finite and positive, got {0}")]
    InvalidItemWidth(f32),
    #[error("{field} must be finite and positive, got {value}")]
    InvalidScale { field: &'static str, value: f32 },
    #[error("return duration must be finite and positive, got {0}s")]
    InvalidDuration(f32),
    #[error("release extrapolation must be finite and not negative, got {0}s")]
    InvalidExtrapolation(f32),
}

/// Layout and animation settings of a [`crate::Dock`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DockConfig {
    pub item_width: f32,
    /// Scale of the slot currently under the pointer.
    pub target_scale: f32,
    /// Scale of the dragged item.
    pub dragged_scale: f32,
    /// Length of the snap back after a cancelled drag, in seconds.
    pub return_duration: f32,
    pub release_extrapolation: f32,
    /// Padding between the row background and the slots.
    pub row_margin: f32,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            item_width: ITEM_WIDTH,
            target_scale: TARGET_SCALE,
            dragged_scale: DRAGGED_SCALE,
            return_duration: RETURN_DURATION,
            release_extrapolation: RELEASE_EXTRAPOLATION,
            row_margin: 4.0,
        }
    }
}

impl DockConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.check()
            .inspect_err(|err| tracing::warn!(%err, "rejected dock config"))
    }

    fn check(self) -> Result<Self, ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.item_width) {
            return Err(ConfigError::InvalidItemWidth(self.item_width));
        }
        for (field, value) in [
            ("target_scale", self.target_scale),
            ("dragged_scale", self.dragged_scale),
        ] {
            if !positive(value) {
                return Err(ConfigError::InvalidScale { field, value });
            }
        }
        if !positive(self.return_duration) {
            return Err(ConfigError::InvalidDuration(self.return_duration));
        }
        if !self.release_extrapolation.is_finite() || self.release_extrapolation < 0.0 {
            return Err(ConfigError::InvalidExtrapolation(
                self.release_extrapolation,
            ));
        }
        Ok(self)
    }
}
