//! Error forwarding: intercepted errors go to the console and, optionally, a webhook.
//!
//! ```ignore
//! let (reporter, process_events) = ErrorReporter::channel();
//! let forwarder = ErrorForwarder::new(ForwarderOptions::default());
//! forwarder.install_panic_hook(reporter.clone());
//! forwarder.with_process_events(process_events).init()?;
//! ```

mod console;
mod event;
mod reporter;
mod sink;

use std::sync::Arc;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::debug;

use utilize_core::{EventSource, UtilizeError, UtilizeResult};

pub use console::{Console, TracingConsole};
pub use event::{ErrorEvent, ErrorKind};
pub use reporter::{ErrorReporter, PanicHookOptions, install_panic_hook};
pub use sink::{
    MESSAGE_CONTENT_LIMIT, TwilightWebhook, WebhookConfig, WebhookSink, parse_webhook_url,
    truncate_content,
};

#[derive(Clone, Default)]
pub struct ForwarderOptions {
    /// Suppress all console output.
    pub hidden: bool,
    /// Print traces along with error messages.
    pub include_stack: bool,
    /// Where to relay `"{kind}: {message}"`.
    pub sink: Option<Arc<dyn WebhookSink>>,
}

type ErrorSource = Box<dyn EventSource<ErrorEvent>>;

pub struct ErrorForwarder {
    options: ForwarderOptions,
    console: Arc<dyn Console>,
    process: Option<ErrorSource>,
    client: Option<ErrorSource>,
}

impl ErrorForwarder {
    pub fn new(options: ForwarderOptions) -> Self {
        Self {
            options,
            console: Arc::new(TracingConsole),
            process: None,
            client: None,
        }
    }

    pub fn with_console(mut self, console: impl Console + 'static) -> Self {
        self.console = Arc::new(console);
        self
    }

    /// Panics and failed background tasks, usually fed by an [`ErrorReporter`].
    pub fn with_process_events(mut self, source: impl EventSource<ErrorEvent> + 'static) -> Self {
        self.process = Some(Box::new(source));
        self
    }

    /// Errors raised by the Discord client.
    pub fn with_client_events(mut self, source: impl EventSource<ErrorEvent> + 'static) -> Self {
        self.client = Some(Box::new(source));
        self
    }

    pub fn options(&self) -> &ForwarderOptions {
        &self.options
    }

    /// Install a panic hook that honours this forwarder's console settings.
    pub fn install_panic_hook(&self, reporter: ErrorReporter) {
        install_panic_hook(
            reporter,
            PanicHookOptions {
                hidden: self.options.hidden,
                include_stack: self.options.include_stack,
                console: Arc::clone(&self.console),
            },
        );
    }

    /// Start listening. The task ends once every attached source has ended.
    pub fn init(mut self) -> UtilizeResult<JoinHandle<()>> {
        let runtime = Handle::try_current().map_err(|_| {
            UtilizeError::precondition("init() must be called inside a tokio runtime")
        })?;

        if !self.options.hidden {
            self.console.info("error forwarder initialized");
        }

        Ok(runtime.spawn(async move {
            loop {
                let event = tokio::select! {
                    Some(event) = next_from(&mut self.process) => event,
                    Some(event) = next_from(&mut self.client) => event,
                    else => break,
                };

                // Webhook delivery runs detached.
                let _ = self.handle_event(&event);
            }

            debug!("error forwarder stopped");
        }))
    }

    /// Print `event` and start relaying it to the sink.
    ///
    /// Returns the delivery task when a sink is configured and a runtime is
    /// available. Delivery failures are only logged at debug level.
    pub fn handle_event(&self, event: &ErrorEvent) -> Option<JoinHandle<()>> {
        if !self.options.hidden && !event.console_written {
            self.console
                .error(&event.console_text(self.options.include_stack));
        }

        let sink = Arc::clone(self.options.sink.as_ref()?);
        let Ok(runtime) = Handle::try_current() else {
            debug!(kind = %event.kind, "no tokio runtime, skipping webhook delivery");
            return None;
        };
        let content = event.webhook_content();
        let kind = event.kind;

        Some(runtime.spawn(async move {
            if let Err(source) = sink.send(&content).await {
                debug!(?source, %kind, "failed to forward error to webhook");
            }
        }))
    }
}

async fn next_from(source: &mut Option<ErrorSource>) -> Option<ErrorEvent> {
    let event = source.as_mut()?.next_event().await;
    if event.is_none() {
        *source = None;
    }
    event
}
