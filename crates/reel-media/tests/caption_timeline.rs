//! Caption timeline invariants across a spread of scripts and durations.

use reel_media::subtitles::{generate_caption_events, WORDS_PER_CAPTION};
use reel_models::CaptionEvent;

fn assert_valid_timeline(events: &[CaptionEvent], total: f64, context: &str) {
    assert!(!events.is_empty(), "{}: empty timeline", context);
    assert!(
        events[0].start_secs.abs() < 1e-9,
        "{}: timeline must start at zero",
        context
    );

    for pair in events.windows(2) {
        assert!(
            pair[0].start_secs < pair[0].end_secs,
            "{}: event has non-positive duration: {:?}",
            context,
            pair[0]
        );
        assert!(
            (pair[0].end_secs - pair[1].start_secs).abs() < 1e-9,
            "{}: gap or overlap between {:?} and {:?}",
            context,
            pair[0],
            pair[1]
        );
    }

    for event in events {
        assert!(
            event.end_secs <= total + 1e-9,
            "{}: event ends past the audio: {:?}",
            context,
            event
        );
    }

    let last = events.last().unwrap();
    assert_eq!(
        last.end_secs, total,
        "{}: last event must end exactly at the audio duration",
        context
    );
}

#[test]
fn timelines_cover_the_audio_exactly() {
    let scripts = [
        "One sentence only.",
        "Two parts. Second part here!",
        "No terminal punctuation at all just words",
        "A much longer script with several sentences. Each one of them has a different number of \
         words inside it. Short one? And then a final sentence that is long enough to need more \
         than one caption chunk to display fully on screen.",
        "Ellipsis... then more. Done.",
    ];
    let durations = [0.5, 3.0, 10.0, 17.31, 59.9, 600.0];

    for script in &scripts {
        for &duration in &durations {
            let events = generate_caption_events(script, duration);
            assert_valid_timeline(&events, duration, script);
        }
    }
}

#[test]
fn every_sentence_yields_at_least_one_chunk() {
    let script = "Tiny. A sentence of exactly six words! One more sentence to close out.";
    let events = generate_caption_events(script, 12.0);

    // Three sentences, each short enough for a single caption
    assert_eq!(events.len(), 3);
    for event in &events {
        let words = event.text.split_whitespace().count();
        assert!(words >= 1 && words <= WORDS_PER_CAPTION);
    }
}

#[test]
fn empty_script_still_covers_the_audio() {
    let events = generate_caption_events("", 7.25);
    assert_valid_timeline(&events, 7.25, "empty script");
    assert_eq!(events.len(), 1);
}

#[test]
fn identical_inputs_produce_identical_timelines() {
    let script = "Determinism matters. The same input must always give the same captions!";
    let runs: Vec<_> = (0..3)
        .map(|_| generate_caption_events(script, 23.7))
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
