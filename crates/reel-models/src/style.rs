//! Subtitle styling configuration.
//!
//! One style definition for the burned-in caption track. Colours use the
//! ASS `&HAABBGGRR` notation.

use serde::{Deserialize, Serialize};

/// Default caption font
pub const DEFAULT_SUBTITLE_FONT: &str = "Impact";
/// Default caption font size (on the 1080x1920 canvas)
pub const DEFAULT_SUBTITLE_FONT_SIZE: u32 = 55;
/// Default primary colour (white)
pub const DEFAULT_PRIMARY_COLOUR: &str = "&H00FFFFFF";
/// Default outline colour (black)
pub const DEFAULT_OUTLINE_COLOUR: &str = "&H00000000";
/// Default outline width
pub const DEFAULT_OUTLINE_WIDTH: u32 = 4;

/// Styling for the burned-in caption track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleStyle {
    /// Font family name
    #[serde(default = "default_font")]
    pub font: String,

    /// Font size on the play-resolution canvas
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Fill colour, ASS notation
    #[serde(default = "default_primary_colour")]
    pub primary_colour: String,

    /// Outline colour, ASS notation
    #[serde(default = "default_outline_colour")]
    pub outline_colour: String,

    /// Outline width in pixels
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,

    /// Vertical margin from the bottom-center anchor
    #[serde(default = "default_margin_v")]
    pub margin_v: u32,
}

fn default_font() -> String {
    DEFAULT_SUBTITLE_FONT.to_string()
}
fn default_font_size() -> u32 {
    DEFAULT_SUBTITLE_FONT_SIZE
}
fn default_primary_colour() -> String {
    DEFAULT_PRIMARY_COLOUR.to_string()
}
fn default_outline_colour() -> String {
    DEFAULT_OUTLINE_COLOUR.to_string()
}
fn default_outline_width() -> u32 {
    DEFAULT_OUTLINE_WIDTH
}
fn default_margin_v() -> u32 {
    250
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            primary_colour: default_primary_colour(),
            outline_colour: default_outline_colour(),
            outline_width: default_outline_width(),
            margin_v: default_margin_v(),
        }
    }
}

impl SubtitleStyle {
    /// Render the ASS `Style:` line for this configuration.
    ///
    /// Alignment 2 anchors captions bottom-center; bold is forced on.
    pub fn to_style_line(&self) -> String {
        format!(
            "Style: Default,{},{},{},&H000000FF,{},&H00000000,-1,0,0,0,100,100,0,0,1,{},0,2,50,50,{},1",
            self.font,
            self.font_size,
            self.primary_colour,
            self.outline_colour,
            self.outline_width,
            self.margin_v,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_line() {
        let line = SubtitleStyle::default().to_style_line();
        assert!(line.starts_with("Style: Default,Impact,55,"));
        assert!(line.contains("&H00FFFFFF"));
        assert!(line.ends_with(",2,50,50,250,1"));
    }
}
