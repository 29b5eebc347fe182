pub type SuspendCallback = Box<dyn FnMut() + Send>;

/// Scoped registration against the suspend-progress notification. The
/// registration is released exactly once, on [`unregister`](Self::unregister)
/// or on drop.
pub struct SuspendSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SuspendSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unregister(self) {}
}

impl Drop for SuspendSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Host service announcing that the device is about to enter suspend.
pub trait SuspendService: Send + Sync {
    fn register_for_suspend_progress(&self, callback: SuspendCallback) -> SuspendSubscription;
}
