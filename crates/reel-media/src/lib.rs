#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper and media pipeline primitives.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building for multi-input graphs
//! - FFprobe-based media probing
//! - Subtitle timeline generation and ASS caption track writing
//! - 9:16 crop computation
//! - The single-pass render graph (crop, scale, caption burn, mux)
//! - Background-video acquisition with per-kind fallback ladders

pub mod acquire;
pub mod command;
pub mod crop;
pub mod error;
pub mod probe;
pub mod render;
pub mod subtitles;

pub use acquire::{acquire, BACKGROUND_FILE_NAME};
pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use crop::{crop_for, crop_for_ratio, VERTICAL_TARGET_RATIO};
pub use error::{MediaError, MediaResult};
pub use probe::{audio_duration, probe_media, video_dimensions, MediaInfo};
pub use render::{build_filter_graph, escape_filter_path, render_short, RenderJob};
pub use subtitles::{
    format_ass_time, generate_caption_events, write_caption_track, FALLBACK_SCRIPT,
    WORDS_PER_CAPTION,
};
