//! Feeding process-level errors into the forwarder.

use std::{backtrace::Backtrace, error::Error, future::Future, panic::PanicHookInfo, sync::Arc};

use tokio::{sync::mpsc, task::JoinHandle};

use super::{
    console::{Console, TracingConsole},
    event::{ErrorEvent, ErrorKind},
};

/// Cloneable emitter of [`ErrorEvent`]s.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    tx: mpsc::UnboundedSender<ErrorEvent>,
}

impl ErrorReporter {
    /// Create a reporter and the receiving end to hand to the forwarder.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ErrorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` once the receiving side is gone.
    pub fn report(&self, event: ErrorEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn uncaught(&self, message: impl Into<String>, trace: Option<String>) -> bool {
        let event = ErrorEvent::new(ErrorKind::UncaughtException, message);
        self.report(match trace {
            Some(trace) => event.with_trace(trace),
            None => event,
        })
    }

    pub fn rejection(&self, error: &anyhow::Error) -> bool {
        self.report(ErrorEvent::from_anyhow(ErrorKind::UnhandledRejection, error))
    }

    pub fn client_error(&self, error: &(dyn Error + 'static)) -> bool {
        self.report(ErrorEvent::from_error(ErrorKind::ClientError, error))
    }

    /// Spawn a fallible task whose `Err` is reported as an unhandled rejection.
    ///
    /// Must be called inside a tokio runtime, like [`tokio::spawn`].
    pub fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let reporter = self.clone();
        tokio::spawn(async move {
            if let Err(error) = future.await {
                reporter.rejection(&error);
            }
        })
    }
}

/// How the panic hook treats the console.
#[derive(Clone)]
pub struct PanicHookOptions {
    pub hidden: bool,
    pub include_stack: bool,
    pub console: Arc<dyn Console>,
}

impl Default for PanicHookOptions {
    fn default() -> Self {
        Self {
            hidden: false,
            include_stack: false,
            console: Arc::new(TracingConsole),
        }
    }
}

/// Replace the default panic printer with one that reports through `reporter`.
///
/// Unless `hidden`, the console line is written inside the hook, before the
/// panic unwinds any further. Webhook delivery happens later on the forwarder
/// task, so it is best effort for panics that end the process.
pub fn install_panic_hook(reporter: ErrorReporter, options: PanicHookOptions) {
    std::panic::set_hook(Box::new(move |info| {
        let trace = Backtrace::force_capture().to_string();
        let event =
            ErrorEvent::new(ErrorKind::UncaughtException, panic_message(info)).with_trace(trace);

        let event = if options.hidden {
            event
        } else {
            options
                .console
                .error(&event.console_text(options.include_stack));
            event.mark_console_written()
        };

        reporter.report(event);
    }));
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("Box<dyn Any>");

    match info.location() {
        Some(location) => format!("{text} at {location}"),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_tasks_are_reported_as_rejections() {
        let (reporter, mut rx) = ErrorReporter::channel();

        reporter
            .spawn(async { Err(anyhow::anyhow!("lost connection")) })
            .await
            .unwrap();
        reporter.spawn(async { Ok(()) }).await.unwrap();
        drop(reporter);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, ErrorKind::UnhandledRejection);
        assert_eq!(event.message, "lost connection");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn report_fails_once_the_receiver_is_dropped() {
        let (reporter, rx) = ErrorReporter::channel();
        assert!(reporter.uncaught("first", None));
        drop(rx);
        assert!(!reporter.uncaught("second", None));
    }

    #[test]
    fn client_errors_carry_the_discord_label() {
        let (reporter, mut rx) = ErrorReporter::channel();
        reporter.client_error(&std::io::Error::other("gateway closed"));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.webhook_content(), "Discord Error: gateway closed");
    }
}
