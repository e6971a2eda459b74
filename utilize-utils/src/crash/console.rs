use tracing::{error, info};

/// Operator-facing output of the forwarder.
pub trait Console: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// [`Console`] writing through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}
