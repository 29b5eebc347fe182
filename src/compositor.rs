use std::sync::Arc;

/// Priority level the host compositor uses to decide which surface stays
/// visible above others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionTier {
    Hidden = 0,
    Notification = 1,
    Overlay = 2,
    Opaque = 3,
    OverlayKeyboard = 4,
}

/// Live minimum-composition-state request. Dropping the token (or calling
/// [`release`](Self::release)) withdraws the request from the compositor.
pub struct CompositionRequest {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl CompositionRequest {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(self) {}
}

impl Drop for CompositionRequest {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Host compositor binding for minimum-composition-state requests.
pub trait CompositionService: Send + Sync {
    fn request_minimum(&self, tier: CompositionTier) -> CompositionRequest;
}

// Descriptor markers identifying the composition request entry point among a
// host module's exports.
const ADD_REQUEST_MARKER: &str = "AddMinimumCompositionStateRequest";
const CHANGE_REQUEST_MARKER: &str = "ChangeMinimumCompositionStateRequest";
const REMOVE_REQUEST_MARKER: &str = "RemoveMinimumCompositionStateRequest";
// Internal state map of the compositor itself, not a callable entry point.
const STATE_MAP_MARKER: &str = "m_mapCompositionStateRequests";

/// One export of a host module: its descriptor text plus the service binding
/// behind it.
pub struct ModuleExport {
    pub descriptor: String,
    pub binding: Arc<dyn CompositionService>,
}

/// A host module as seen through the shell's registry.
pub struct HostModule {
    pub exports: Vec<ModuleExport>,
}

/// Best-effort scan of the host registry for the composition-state entry
/// point: the export whose descriptor carries all three request method names
/// while not being the compositor's internal state map. Absence is normal;
/// callers skip composition requests and fall back to plain stacking order.
pub fn resolve_composition_service(modules: &[HostModule]) -> Option<Arc<dyn CompositionService>> {
    for module in modules {
        for export in &module.exports {
            let descriptor = &export.descriptor;
            if descriptor.contains(ADD_REQUEST_MARKER)
                && descriptor.contains(CHANGE_REQUEST_MARKER)
                && descriptor.contains(REMOVE_REQUEST_MARKER)
                && !descriptor.contains(STATE_MAP_MARKER)
            {
                return Some(Arc::clone(&export.binding));
            }
        }
    }
    tracing::warn!("composition state service not found; overlay will rely on stacking order only");
    None
}
