//! Shared handler state.

use std::sync::Arc;

use fitspace_core::AvatarStore;

/// State injected into every handler: the avatar store behind its port trait,
/// so tests can swap the backing database freely.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AvatarStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AvatarStore>) -> Self {
        Self { store }
    }
}
