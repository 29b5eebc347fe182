use dim_overlay::shortcut::{parse_chord, Button, ShortcutDetector, DEFAULT_CHORD};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[path = "fake_services.rs"]
mod fake_services;
use fake_services::FakeCapture;

fn counting_detector(capture: &FakeCapture) -> (ShortcutDetector, Arc<AtomicUsize>) {
    let detector = ShortcutDetector::new(DEFAULT_CHORD.to_vec(), capture);
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    detector.on_shortcut_pressed(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (detector, count)
}

#[test]
fn parse_simple_chord() {
    let chord = parse_chord("Select").expect("should parse Select");
    assert_eq!(chord, vec![Button::Select]);
}

#[test]
fn parse_combo_chord() {
    let chord = parse_chord("QuickAccess+Select").expect("should parse combination");
    assert_eq!(chord, vec![Button::QuickAccess, Button::Select]);
    assert_eq!(parse_chord("qam+select"), Some(chord));
}

#[test]
fn parse_invalid_chord() {
    assert!(parse_chord("QuickAccess+Foo").is_none());
    assert!(parse_chord("").is_none());
    assert!(parse_chord("+").is_none());
}

#[test]
fn chord_fires_once_per_concurrent_hold() {
    let capture = FakeCapture::default();
    let (_detector, count) = counting_detector(&capture);

    capture.press(Button::QuickAccess);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    capture.press(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Still held: further edges of other buttons do not re-fire.
    capture.press(Button::A);
    capture.release(Button::A);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    capture.release(Button::Select);
    capture.press(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn extra_held_buttons_do_not_inhibit_chord() {
    let capture = FakeCapture::default();
    let (_detector, count) = counting_detector(&capture);

    capture.press(Button::R1);
    capture.press(Button::QuickAccess);
    capture.press(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn partial_chord_never_fires() {
    let capture = FakeCapture::default();
    let (_detector, count) = counting_detector(&capture);

    capture.press(Button::QuickAccess);
    capture.release(Button::QuickAccess);
    capture.press(Button::Select);
    capture.release(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn removed_callback_stops_receiving_events() {
    let capture = FakeCapture::default();
    let detector = ShortcutDetector::new(DEFAULT_CHORD.to_vec(), &capture);
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    let id = detector.on_shortcut_pressed(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    detector.off_shortcut_pressed(id);
    capture.press(Button::QuickAccess);
    capture.press(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn unregister_releases_capture_hook() {
    let capture = FakeCapture::default();
    let (mut detector, count) = counting_detector(&capture);
    assert!(capture.hooked());

    detector.unregister();
    assert!(!capture.hooked());

    capture.press(Button::QuickAccess);
    capture.press(Button::Select);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_detector_releases_capture_hook() {
    let capture = FakeCapture::default();
    {
        let (_detector, _count) = counting_detector(&capture);
        assert!(capture.hooked());
    }
    assert!(!capture.hooked());
}
