use shared_types::{RemoteError, ServiceId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Late-bound handle to another service's API.
///
/// Clones share the binding, so a client can be handed out before the
/// service it talks to has been built.
pub struct Endpoint<T: ?Sized> {
    service: ServiceId,
    target: Arc<OnceLock<Arc<T>>>,
    reachable: Arc<AtomicBool>,
}

impl<T: ?Sized> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service,
            target: Arc::clone(&self.target),
            reachable: Arc::clone(&self.reachable),
        }
    }
}

impl<T: ?Sized> Endpoint<T> {
    pub fn new(service: ServiceId) -> Self {
        Self {
            service,
            target: Arc::new(OnceLock::new()),
            reachable: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Bind the endpoint. Returns `false` if it was already bound.
    pub fn bind(&self, target: Arc<T>) -> bool {
        self.target.set(target).is_ok()
    }

    pub fn service(&self) -> ServiceId {
        self.service
    }

    /// Simulate the remote service going away or coming back.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn get(&self) -> Result<Arc<T>, RemoteError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(RemoteError::unavailable(self.service, "unreachable"));
        }
        self.target
            .get()
            .cloned()
            .ok_or_else(|| RemoteError::unavailable(self.service, "not started"))
    }
}
