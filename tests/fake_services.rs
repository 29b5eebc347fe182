//! Shared in-memory stand-ins for the host services the overlay consumes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dim_overlay::compositor::{CompositionRequest, CompositionService, CompositionTier};
use dim_overlay::shortcut::{Button, ButtonCapture, ButtonEvent, CaptureCallback, CaptureHandle};
use dim_overlay::suspend::{SuspendCallback, SuspendService, SuspendSubscription};

#[derive(Default)]
pub struct FakeCapture {
    callback: Arc<Mutex<Option<CaptureCallback>>>,
}

impl FakeCapture {
    pub fn hooked(&self) -> bool {
        self.callback.lock().unwrap().is_some()
    }

    pub fn emit(&self, event: ButtonEvent) {
        let mut slot = self.callback.lock().unwrap();
        if let Some(callback) = slot.as_mut() {
            callback(event);
        }
    }

    pub fn press(&self, button: Button) {
        self.emit(ButtonEvent::Pressed(button));
    }

    pub fn release(&self, button: Button) {
        self.emit(ButtonEvent::Released(button));
    }
}

impl ButtonCapture for FakeCapture {
    fn register(&self, callback: CaptureCallback) -> CaptureHandle {
        *self.callback.lock().unwrap() = Some(callback);
        let slot = Arc::clone(&self.callback);
        CaptureHandle::new(move || {
            slot.lock().unwrap().take();
        })
    }
}

#[derive(Default)]
pub struct FakeSuspend {
    callback: Arc<Mutex<Option<SuspendCallback>>>,
}

impl FakeSuspend {
    pub fn registered(&self) -> bool {
        self.callback.lock().unwrap().is_some()
    }

    pub fn fire(&self) {
        let mut slot = self.callback.lock().unwrap();
        if let Some(callback) = slot.as_mut() {
            callback();
        }
    }
}

impl SuspendService for FakeSuspend {
    fn register_for_suspend_progress(&self, callback: SuspendCallback) -> SuspendSubscription {
        *self.callback.lock().unwrap() = Some(callback);
        let slot = Arc::clone(&self.callback);
        SuspendSubscription::new(move || {
            slot.lock().unwrap().take();
        })
    }
}

#[derive(Default)]
pub struct FakeComposition {
    active: Arc<AtomicUsize>,
    total: AtomicUsize,
    last_tier: Mutex<Option<CompositionTier>>,
}

impl FakeComposition {
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn last_tier(&self) -> Option<CompositionTier> {
        *self.last_tier.lock().unwrap()
    }
}

impl CompositionService for FakeComposition {
    fn request_minimum(&self, tier: CompositionTier) -> CompositionRequest {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.last_tier.lock().unwrap() = Some(tier);
        let active = Arc::clone(&self.active);
        CompositionRequest::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
        })
    }
}
