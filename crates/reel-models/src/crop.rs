//! Centered crop rectangle for aspect-ratio conversion.

use serde::{Deserialize, Serialize};

/// A centered crop region cut from a source frame before scaling.
///
/// Derived from the source dimensions for one render invocation and not
/// persisted beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSpec {
    /// Crop width in pixels, never exceeding the source width.
    pub width: u32,
    /// Crop height in pixels, never exceeding the source height.
    pub height: u32,
}

impl CropSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render as an FFmpeg crop filter. Omitting x:y makes FFmpeg center
    /// the crop region.
    pub fn to_filter(&self) -> String {
        format!("crop={}:{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_filter() {
        assert_eq!(CropSpec::new(607, 1080).to_filter(), "crop=607:1080");
    }
}
