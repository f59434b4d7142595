//! Crop computation for aspect-ratio conversion.

use reel_models::CropSpec;

/// Target width-over-height ratio for vertical shorts (9:16).
pub const VERTICAL_TARGET_RATIO: f64 = 9.0 / 16.0;

/// Compute a centered crop of the source frame matching `target_ratio`.
///
/// A source wider than the target keeps its full height and crops the
/// width down to `height * target_ratio`; otherwise the full width stays
/// and the height crops down to `width / target_ratio`. Dimensions
/// truncate to integers, so the crop never exceeds the source bounds.
pub fn crop_for_ratio(source_width: u32, source_height: u32, target_ratio: f64) -> CropSpec {
    let source_ratio = source_width as f64 / source_height as f64;

    if source_ratio > target_ratio {
        let width = (source_height as f64 * target_ratio) as u32;
        CropSpec::new(width, source_height)
    } else {
        let height = (source_width as f64 / target_ratio) as u32;
        CropSpec::new(source_width, height)
    }
}

/// Compute the centered 9:16 crop for a source frame.
pub fn crop_for(source_width: u32, source_height: u32) -> CropSpec {
    crop_for_ratio(source_width, source_height, VERTICAL_TARGET_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_source_crops_width() {
        // 1920/1080 = 1.778 > 0.5625, so width becomes 1080 * 9/16 = 607
        let crop = crop_for(1920, 1080);
        assert_eq!(crop.width, 607);
        assert_eq!(crop.height, 1080);
    }

    #[test]
    fn test_tall_source_crops_height() {
        // 1080/2400 = 0.45 < 0.5625, so height becomes 1080 * 16/9 = 1920
        let crop = crop_for(1080, 2400);
        assert_eq!(crop.width, 1080);
        assert_eq!(crop.height, 1920);
    }

    #[test]
    fn test_square_source() {
        let crop = crop_for(1000, 1000);
        assert_eq!(crop.width, 562);
        assert_eq!(crop.height, 1000);
    }

    #[test]
    fn test_already_vertical_source_keeps_full_frame() {
        let crop = crop_for(1080, 1920);
        assert_eq!(crop.width, 1080);
        assert_eq!(crop.height, 1920);
    }

    #[test]
    fn test_crop_never_exceeds_source() {
        for &(w, h) in &[(640u32, 480u32), (480, 640), (3840, 2160), (1, 1), (7, 1000)] {
            let crop = crop_for(w, h);
            assert!(crop.width <= w, "width overflow for {}x{}", w, h);
            assert!(crop.height <= h, "height overflow for {}x{}", w, h);
        }
    }

    #[test]
    fn test_crop_ratio_approximates_target() {
        for &(w, h) in &[(1920u32, 1080u32), (1280, 720), (1080, 2400), (999, 777)] {
            let crop = crop_for(w, h);
            let ratio = crop.width as f64 / crop.height as f64;
            // Integer truncation bounds the error by one pixel on the
            // derived dimension
            let max_err = 1.0 / crop.height.min(crop.width) as f64 * 2.0;
            assert!(
                (ratio - VERTICAL_TARGET_RATIO).abs() <= max_err.max(0.002),
                "ratio {} too far from 9/16 for {}x{}",
                ratio,
                w,
                h
            );
        }
    }
}
