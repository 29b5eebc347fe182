use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::compositor::{CompositionRequest, CompositionService, CompositionTier};
use crate::shortcut::{Button, ButtonCapture, ShortcutDetector};
use crate::state::{ListenerId, OverlayState};
use crate::suspend::{SuspendService, SuspendSubscription};

/// Stacking priority of the dim layer: above ordinary shell UI, below any
/// true system-modal overlay.
pub const DIM_LAYER_Z_INDEX: i32 = 7002;

/// Render description of the dimming surface: a fixed, full-viewport, solid
/// black layer that does not intercept pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimLayer {
    pub opacity: f32,
    pub z_index: i32,
    pub pointer_transparent: bool,
}

/// Render-side view of the shared state, updated by the subscriptions of the
/// current mount. The composition request lives here so it flips together
/// with the visible flag.
struct RenderState {
    visible: AtomicBool,
    opacity: Mutex<f32>,
    request: Mutex<Option<CompositionRequest>>,
}

impl RenderState {
    fn apply_visibility(&self, visible: bool, composition: Option<&Arc<dyn CompositionService>>) {
        self.visible.store(visible, Ordering::SeqCst);
        let mut request = self.request.lock().unwrap();
        // The previous request must be gone before a new one is issued.
        *request = None;
        if visible {
            if let Some(service) = composition {
                *request = Some(service.request_minimum(CompositionTier::Notification));
            }
        }
    }
}

struct MountedParts {
    render: Arc<RenderState>,
    visibility_sub: ListenerId,
    opacity_sub: ListenerId,
    suspend_sub: SuspendSubscription,
    shortcut_sub: ListenerId,
    detector: ShortcutDetector,
}

/// Lifecycle owner of the dimming overlay.
///
/// While mounted it holds exactly one registration against each collaborator:
/// the shared [`OverlayState`] (both channels), the suspend notification, and
/// the shortcut detector built over the injected button-capture service. The
/// shortcut toggles visibility; a suspend event forces it off so the device
/// never resumes behind an opaque layer. Unmount tears all of it down
/// regardless of exit path.
///
/// The composition binding is injected and may be absent; toggling and
/// rendering work the same without it, composition requests are just skipped.
pub struct OverlayController {
    state: Arc<OverlayState>,
    chord: Vec<Button>,
    capture: Arc<dyn ButtonCapture>,
    suspend: Arc<dyn SuspendService>,
    composition: Option<Arc<dyn CompositionService>>,
    mounted: Option<MountedParts>,
}

impl OverlayController {
    pub fn new(
        state: Arc<OverlayState>,
        chord: Vec<Button>,
        capture: Arc<dyn ButtonCapture>,
        suspend: Arc<dyn SuspendService>,
        composition: Option<Arc<dyn CompositionService>>,
    ) -> Self {
        Self {
            state,
            chord,
            capture,
            suspend,
            composition,
            mounted: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Subscribe to all collaborators and seed the render state from the
    /// shared state's current values. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.mounted.is_some() {
            return;
        }

        let render = Arc::new(RenderState {
            visible: AtomicBool::new(false),
            opacity: Mutex::new(self.state.opacity()),
            request: Mutex::new(None),
        });
        render.apply_visibility(self.state.visibility(), self.composition.as_ref());

        let visibility_render = Arc::clone(&render);
        let composition = self.composition.clone();
        let visibility_sub = self.state.on_visibility_changed(move |visible| {
            visibility_render.apply_visibility(visible, composition.as_ref());
        });

        let opacity_render = Arc::clone(&render);
        let opacity_sub = self.state.on_opacity_changed(move |opacity| {
            *opacity_render.opacity.lock().unwrap() = opacity;
        });

        let suspend_state = Arc::clone(&self.state);
        let suspend_sub = self
            .suspend
            .register_for_suspend_progress(Box::new(move || {
                tracing::debug!("suspend in progress; hiding overlay");
                suspend_state.set_visibility(false);
            }));

        let detector = ShortcutDetector::new(self.chord.clone(), self.capture.as_ref());
        let toggle_state = Arc::clone(&self.state);
        let shortcut_sub = detector.on_shortcut_pressed(move || {
            toggle_state.set_visibility(!toggle_state.visibility());
        });

        tracing::debug!(chord = ?self.chord, "overlay controller mounted");
        self.mounted = Some(MountedParts {
            render,
            visibility_sub,
            opacity_sub,
            suspend_sub,
            shortcut_sub,
            detector,
        });
    }

    /// Tear down every registration of the current mount and release any
    /// live composition request. Safe to call when unmounted; after return,
    /// capture or state events have no observable effect on this controller.
    pub fn unmount(&mut self) {
        let Some(parts) = self.mounted.take() else {
            return;
        };
        self.state.off_visibility_changed(parts.visibility_sub);
        self.state.off_opacity_changed(parts.opacity_sub);
        parts.suspend_sub.unregister();
        let mut detector = parts.detector;
        detector.off_shortcut_pressed(parts.shortcut_sub);
        detector.unregister();
        parts.render.request.lock().unwrap().take();
        tracing::debug!("overlay controller unmounted");
    }

    /// The layer to draw this frame, or `None` while hidden or unmounted.
    pub fn layer(&self) -> Option<DimLayer> {
        let parts = self.mounted.as_ref()?;
        if !parts.render.visible.load(Ordering::SeqCst) {
            return None;
        }
        Some(DimLayer {
            opacity: *parts.render.opacity.lock().unwrap(),
            z_index: DIM_LAYER_Z_INDEX,
            pointer_transparent: true,
        })
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.unmount();
    }
}
