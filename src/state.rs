//! Shared server state passed to all handlers.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PortalError;
use crate::portal::Portal;

pub type SharedPortal = Arc<Mutex<Portal>>;

#[derive(Clone)]
pub struct ServerState {
    /// The one portal instance; every command runs to completion under this lock
    pub portal: SharedPortal,

    /// Where avatar uploads are written
    pub uploads_dir: PathBuf,
}

impl ServerState {
    pub fn new(portal: Portal, uploads_dir: PathBuf) -> Self {
        Self {
            portal: Arc::new(Mutex::new(portal)),
            uploads_dir,
        }
    }

    /// Lock the portal, failing if a previous holder panicked
    pub fn lock(&self) -> Result<MutexGuard<'_, Portal>, PortalError> {
        self.portal.lock().map_err(|_| {
            tracing::error!("Portal mutex poisoned - a thread panicked while holding the lock");
            PortalError::Unavailable
        })
    }
}
