use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Cooperative stop request shared between the signal handler, the input
/// handler and the monitor loop. Only checked between cycles.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Route SIGINT and SIGTERM to this flag.
    pub fn install_signal_handler(&self) {
        let flag = self.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("received shutdown signal");
            flag.request();
        }) {
            warn!("failed to set signal handler: {}", e);
        }
    }
}
