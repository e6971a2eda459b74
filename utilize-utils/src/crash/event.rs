use std::{error::Error, fmt};

/// Where an error was intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A panic caught by the panic hook.
    UncaughtException,
    /// An `Err` returned by a task nobody awaited.
    UnhandledRejection,
    /// An error raised by the Discord client (gateway or HTTP).
    ClientError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UncaughtException => "Uncaught Exception",
            Self::UnhandledRejection => "Unhandled Rejection",
            Self::ClientError => "Discord Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single intercepted error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub kind: ErrorKind,
    /// One-line rendering of the error.
    pub message: String,
    /// Backtrace or cause chain, shown only when stacks are enabled.
    pub trace: Option<String>,
    /// Already printed where it was raised; the forwarder only relays it.
    pub console_written: bool,
}

impl ErrorEvent {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
            console_written: false,
        }
    }

    pub fn mark_console_written(mut self) -> Self {
        self.console_written = true;
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Build an event from an error, keeping its `source()` chain as the trace.
    pub fn from_error(kind: ErrorKind, error: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let event = Self::new(kind, error.to_string());
        if causes.is_empty() {
            event
        } else {
            event.with_trace(causes.join("\n"))
        }
    }

    /// Build an event from an `anyhow` error; the trace is its debug rendering.
    pub fn from_anyhow(kind: ErrorKind, error: &anyhow::Error) -> Self {
        Self::new(kind, error.to_string()).with_trace(format!("{error:?}"))
    }

    /// Text written to the console.
    pub fn console_text(&self, include_stack: bool) -> String {
        match (&self.trace, include_stack) {
            (Some(trace), true) => format!("{}\n{trace}", self.message),
            _ => self.message.clone(),
        }
    }

    /// Text sent to the webhook.
    pub fn webhook_content(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}
