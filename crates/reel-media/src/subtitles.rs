//! Subtitle timeline generation and ASS caption track writing.
//!
//! Timing is a deterministic estimate derived from the script text and
//! the narration duration alone; there is no speech recognizer. Every
//! sentence gets an equal slice of the audio, each sentence is shown in
//! chunks of up to six words, and the final caption is pinned to the
//! exact audio duration so the timeline covers it without drift.

use std::path::Path;
use tracing::debug;

use reel_models::{CaptionEvent, SubtitleStyle};
use reel_models::encoding::{OUTPUT_HEIGHT, OUTPUT_WIDTH};

use crate::error::MediaResult;

/// Substitute sentence for an empty script.
pub const FALLBACK_SCRIPT: &str = "Story content";

/// Maximum words shown in one caption.
pub const WORDS_PER_CAPTION: usize = 6;

/// Generate the timed caption sequence for a script.
///
/// The produced events are ordered, non-overlapping and contiguous over
/// `[0, total_duration]`; for any positive duration the last event ends
/// at `total_duration` exactly. Identical inputs produce identical
/// output.
pub fn generate_caption_events(script: &str, total_duration: f64) -> Vec<CaptionEvent> {
    let script = script.trim();
    let script = if script.is_empty() {
        FALLBACK_SCRIPT
    } else {
        script
    };

    let mut sentences = split_sentences(script);
    if sentences.is_empty() {
        sentences.push(script.to_string());
    }

    // Uniform allocation by sentence count, deliberately not weighted by
    // sentence length
    let per_sentence = total_duration / sentences.len() as f64;

    let mut events = Vec::new();
    let mut current_time = 0.0_f64;

    for sentence in &sentences {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let chunk_count = words.chunks(WORDS_PER_CAPTION).count().max(1);
        let per_chunk = per_sentence / chunk_count as f64;

        for chunk in words.chunks(WORDS_PER_CAPTION) {
            let start = current_time;
            let end = (current_time + per_chunk).min(total_duration);
            events.push(CaptionEvent::new(
                start,
                end,
                clean_caption_text(&chunk.join(" ")),
            ));
            current_time = end;
        }
    }

    // Pin the last caption to the full duration; the accumulated slices
    // sum to it only up to floating-point error
    if let Some(last) = events.last_mut() {
        last.end_secs = total_duration;
    }

    debug!(
        sentences = sentences.len(),
        events = events.len(),
        "Generated caption timeline"
    );

    events
}

/// Split a script into sentences on terminal punctuation followed by
/// whitespace. A script without such a boundary is one sentence.
fn split_sentences(script: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);

        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
        }
    }

    let sentence = current.trim().to_string();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }

    sentences
}

/// Upper-case caption text and strip characters that are structurally
/// significant to the ASS format.
fn clean_caption_text(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| !matches!(c, '\\' | '{' | '}'))
        .collect()
}

/// Format seconds as an ASS timestamp (`H:MM:SS.CC`).
pub fn format_ass_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;
    format!("{}:{:02}:{:05.2}", hours, minutes, secs)
}

/// Render a caption sequence as a complete ASS document.
pub fn render_caption_track(events: &[CaptionEvent], style: &SubtitleStyle) -> String {
    let mut content = format!(
        "[Script Info]\n\
         Title: Narration Captions\n\
         ScriptType: v4.00+\n\
         PlayResX: {}\n\
         PlayResY: {}\n\
         WrapStyle: 0\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         {}\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        OUTPUT_WIDTH,
        OUTPUT_HEIGHT,
        style.to_style_line(),
    );

    for event in events {
        if event.text.is_empty() {
            continue;
        }
        content.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
            format_ass_time(event.start_secs),
            format_ass_time(event.end_secs),
            event.text,
        ));
    }

    content
}

/// Write the caption track file for a caption sequence.
pub async fn write_caption_track(
    events: &[CaptionEvent],
    style: &SubtitleStyle,
    path: impl AsRef<Path>,
) -> MediaResult<()> {
    let path = path.as_ref();
    let content = render_caption_track(events, style);
    tokio::fs::write(path, content).await?;
    debug!(path = %path.display(), events = events.len(), "Wrote caption track");
    Ok(())
}
