use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::state::ListenerId;

/// Logical buttons on the handheld. The capture service reports edges for
/// these; physical mapping is its concern, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Steam,
    QuickAccess,
    Select,
    Start,
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    L5,
    R5,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftStick,
    RightStick,
}

/// Chord toggling the overlay when no shortcut is configured.
pub const DEFAULT_CHORD: [Button; 2] = [Button::QuickAccess, Button::Select];

/// Parse a chord string like "QuickAccess+Select" into its button set.
pub fn parse_chord(s: &str) -> Option<Vec<Button>> {
    let mut buttons = Vec::new();
    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        if upper.is_empty() {
            continue;
        }
        buttons.push(parse_button(&upper)?);
    }
    if buttons.is_empty() {
        return None;
    }
    Some(buttons)
}

fn parse_button(upper: &str) -> Option<Button> {
    match upper {
        "STEAM" => Some(Button::Steam),
        "QUICKACCESS" | "QUICK_ACCESS" | "QAM" => Some(Button::QuickAccess),
        "SELECT" => Some(Button::Select),
        "START" => Some(Button::Start),
        "A" => Some(Button::A),
        "B" => Some(Button::B),
        "X" => Some(Button::X),
        "Y" => Some(Button::Y),
        "L1" => Some(Button::L1),
        "R1" => Some(Button::R1),
        "L2" => Some(Button::L2),
        "R2" => Some(Button::R2),
        "L5" => Some(Button::L5),
        "R5" => Some(Button::R5),
        "UP" | "DPADUP" => Some(Button::DpadUp),
        "DOWN" | "DPADDOWN" => Some(Button::DpadDown),
        "LEFT" | "DPADLEFT" => Some(Button::DpadLeft),
        "RIGHT" | "DPADRIGHT" => Some(Button::DpadRight),
        "LSTICK" | "LEFTSTICK" => Some(Button::LeftStick),
        "RSTICK" | "RIGHTSTICK" => Some(Button::RightStick),
        _ => None,
    }
}

/// One physical button edge as delivered by the capture service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(Button),
    Released(Button),
}

pub type CaptureCallback = Box<dyn FnMut(ButtonEvent) + Send>;

/// Scoped registration against the raw button-capture service. Dropping the
/// handle releases the underlying input hook, so a leaked handle cannot keep
/// blocking other consumers of the same buttons.
pub struct CaptureHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl CaptureHandle {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unregister(mut self) {
        self.release_hook();
    }

    fn release_hook(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.release_hook();
    }
}

/// Opaque raw-input service delivering button edges to one registered hook.
pub trait ButtonCapture: Send + Sync {
    fn register(&self, callback: CaptureCallback) -> CaptureHandle;
}

struct DetectorInner {
    chord: Vec<Button>,
    held: HashSet<Button>,
    triggered: bool,
    listeners: Vec<(ListenerId, Box<dyn FnMut() + Send>)>,
}

fn handle_event(inner: &Mutex<DetectorInner>, event: ButtonEvent) {
    let mut inner = inner.lock().unwrap();
    match event {
        ButtonEvent::Pressed(button) => {
            inner.held.insert(button);
        }
        ButtonEvent::Released(button) => {
            inner.held.remove(&button);
        }
    }

    let combo = inner.chord.iter().all(|button| inner.held.contains(button));
    if combo {
        if !inner.triggered {
            inner.triggered = true;
            tracing::debug!(chord = ?inner.chord, "shortcut chord pressed");
            for (_, callback) in inner.listeners.iter_mut() {
                callback();
            }
        }
    } else {
        inner.triggered = false;
    }
}

/// Detects "all chord buttons newly concurrently held" transitions on top of
/// the raw edge stream. Fires its callbacks once per transition and latches
/// until the chord is no longer fully held; extra held buttons do not
/// inhibit the chord.
pub struct ShortcutDetector {
    inner: Arc<Mutex<DetectorInner>>,
    capture: Option<CaptureHandle>,
}

impl ShortcutDetector {
    pub fn new(chord: Vec<Button>, capture: &dyn ButtonCapture) -> Self {
        let inner = Arc::new(Mutex::new(DetectorInner {
            chord,
            held: HashSet::new(),
            triggered: false,
            listeners: Vec::new(),
        }));
        let hook_inner = Arc::clone(&inner);
        let handle = capture.register(Box::new(move |event| handle_event(&hook_inner, event)));
        Self {
            inner,
            capture: Some(handle),
        }
    }

    pub fn on_shortcut_pressed(&self, callback: impl FnMut() + Send + 'static) -> ListenerId {
        let id = ListenerId::next();
        self.inner
            .lock()
            .unwrap()
            .listeners
            .push((id, Box::new(callback)));
        id
    }

    pub fn off_shortcut_pressed(&self, id: ListenerId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(index) = inner.listeners.iter().position(|(entry_id, _)| *entry_id == id) {
            inner.listeners.remove(index);
        }
    }

    /// Release the capture hook. Further raw events have no effect.
    pub fn unregister(&mut self) {
        if let Some(handle) = self.capture.take() {
            handle.unregister();
        }
        self.inner.lock().unwrap().listeners.clear();
    }
}

impl Drop for ShortcutDetector {
    fn drop(&mut self) {
        self.unregister();
    }
}
