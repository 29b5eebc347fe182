use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Identifies one listener registration. Registering the same closure logic
/// twice yields two distinct ids, each removable independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback<T> = Box<dyn FnMut(T) + Send>;

/// Ordered listener registry. Insertion order is invocation order; removal
/// deletes the first id match and ignores unknown ids.
struct Listeners<T> {
    entries: Mutex<Vec<(ListenerId, Callback<T>)>>,
}

impl<T: Copy> Listeners<T> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self, callback: Callback<T>) -> ListenerId {
        let id = ListenerId::next();
        self.entries.lock().unwrap().push((id, callback));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(index) = entries.iter().position(|(entry_id, _)| *entry_id == id) {
            entries.remove(index);
        }
    }

    fn notify(&self, value: T) {
        let mut entries = self.entries.lock().unwrap();
        for (_, callback) in entries.iter_mut() {
            callback(value);
        }
    }
}

/// Shared overlay state: a visibility flag and an opacity scalar, each with
/// its own listener channel. Setters suppress notifications when the stored
/// value does not change, so listeners fire exactly once per distinct
/// consecutive value, in registration order, before the setter returns.
///
/// Listeners must not subscribe or unsubscribe on the channel that is
/// currently notifying them.
pub struct OverlayState {
    visible: AtomicBool,
    opacity: Mutex<f32>,
    visibility_listeners: Listeners<bool>,
    opacity_listeners: Listeners<f32>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            visible: AtomicBool::new(false),
            opacity: Mutex::new(1.0),
            visibility_listeners: Listeners::new(),
            opacity_listeners: Listeners::new(),
        }
    }

    pub fn visibility(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Set the visibility flag. A redundant write is a silent no-op.
    pub fn set_visibility(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::SeqCst) == visible {
            return;
        }
        tracing::debug!(visible, "overlay visibility updated");
        self.visibility_listeners.notify(visible);
    }

    pub fn on_visibility_changed(
        &self,
        callback: impl FnMut(bool) + Send + 'static,
    ) -> ListenerId {
        self.visibility_listeners.subscribe(Box::new(callback))
    }

    pub fn off_visibility_changed(&self, id: ListenerId) {
        self.visibility_listeners.unsubscribe(id);
    }

    pub fn opacity(&self) -> f32 {
        *self.opacity.lock().unwrap()
    }

    /// Set the overlay opacity, clamped to `[0, 1]`. Notification fires only
    /// when the clamped value differs from the stored one, so two raw inputs
    /// clamping to the same value produce a single redraw.
    pub fn set_opacity(&self, opacity: f32) {
        let clamped = opacity.clamp(0.0, 1.0);
        {
            let mut stored = self.opacity.lock().unwrap();
            if *stored == clamped {
                return;
            }
            *stored = clamped;
        }
        tracing::debug!(opacity = clamped, "overlay opacity updated");
        self.opacity_listeners.notify(clamped);
    }

    pub fn on_opacity_changed(&self, callback: impl FnMut(f32) + Send + 'static) -> ListenerId {
        self.opacity_listeners.subscribe(Box::new(callback))
    }

    pub fn off_opacity_changed(&self, id: ListenerId) {
        self.opacity_listeners.unsubscribe(id);
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}
