use serde::{Deserialize, Serialize};

use crate::StripError;

/// Cell and track dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackGeometry {
    pub item_width: f32,
    pub item_height: f32,
    pub track_height: f32,
    pub item_spacing: f32,
}

impl Default for TrackGeometry {
    fn default() -> Self { Self { item_width: 100.0, item_height: 100.0, track_height: 150.0, item_spacing: 10.0 } }
}

impl TrackGeometry {
    pub fn new(item_width: f32, item_height: f32, track_height: f32, item_spacing: f32) -> Result<Self, StripError> {
        let geometry = Self { item_width, item_height, track_height, item_spacing };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), StripError> {
        for (name, v) in [("item_width", self.item_width), ("item_height", self.item_height), ("track_height", self.track_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StripError::InvalidGeometry(format!("{name} must be positive, got {v}")));
            }
        }
        if !self.item_spacing.is_finite() || self.item_spacing < 0.0 {
            return Err(StripError::InvalidGeometry(format!("item_spacing must be non-negative, got {}", self.item_spacing)));
        }
        if self.item_height > self.track_height {
            return Err(StripError::InvalidGeometry(format!(
                "item_height {} exceeds track_height {}",
                self.item_height, self.track_height
            )));
        }
        Ok(())
    }

    /// Half of the track's vertical slack around a cell.
    pub fn dismissal_threshold(&self) -> f32 { (self.track_height - self.item_height) / 2.0 }

    /// Smallest |offset| that still keeps the cell; anything strictly
    /// beyond it dismisses.
    pub fn dismiss_distance(&self) -> f32 { self.dismissal_threshold() + self.item_height / 2.0 }

    pub fn should_dismiss(&self, vertical_offset: f32) -> bool {
        vertical_offset.abs() - self.dismissal_threshold() > self.item_height / 2.0
    }

    pub fn item_left(&self, index: usize) -> f32 { index as f32 * (self.item_width + self.item_spacing) }

    pub fn content_width(&self, len: usize) -> f32 {
        if len == 0 { return 0.0; }
        len as f32 * self.item_width + (len - 1) as f32 * self.item_spacing
    }

    /// Horizontal scroll offset that puts item `index` in the middle of a
    /// viewport, clamped to the scrollable range.
    pub fn scroll_offset_to_center(&self, index: usize, len: usize, viewport_width: f32) -> f32 {
        let center = self.item_left(index) + self.item_width / 2.0;
        let max = (self.content_width(len) - viewport_width).max(0.0);
        (center - viewport_width / 2.0).clamp(0.0, max)
    }
}
