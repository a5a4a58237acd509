use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// True strictly while a submission is in flight.
///
/// Clones share the same flag so the presentation layer can disable its
/// trigger while the controller owns the guard.
#[derive(Clone, Debug, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag and returns a guard that clears it on drop, or `None`
    /// when a submission already holds it.
    #[must_use]
    pub fn acquire(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(self.0.clone()))
    }
}

#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
