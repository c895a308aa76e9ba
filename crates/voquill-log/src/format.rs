//! Rendering of log arguments into a single message string.
//!
//! Every argument is rendered on its own and the results are joined with a
//! single space, in call order:
//!
//! - text passes through unchanged
//! - an error renders as its stack trace when one is available, otherwise
//!   as its message followed by its `source()` chain (`"outer: inner"`)
//! - any other value is rendered as JSON, falling back to its `Debug`
//!   output when JSON serialization fails. A value that serializes to a
//!   bare JSON string renders unquoted, like text
//!
//! Rendering never panics and never fails.

use std::borrow::Cow;
use std::backtrace::BacktraceStatus;
use std::fmt;

use serde::Serialize;

/// A value that can be rendered as JSON, with a textual fallback.
///
/// Blanket-implemented for every `Serialize + Debug` type so that
/// [`LogArg::Value`] can hold any such value behind a trait object.
pub trait LogValue {
    fn to_json(&self) -> serde_json::Result<String>;
    fn coerce(&self) -> String;
}

impl<T> LogValue for T
where
    T: Serialize + fmt::Debug + ?Sized,
{
    fn to_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        if json.starts_with('"') {
            return serde_json::from_str::<String>(&json);
        }
        Ok(json)
    }

    fn coerce(&self) -> String {
        format!("{:?}", self)
    }
}

/// One argument of a log call.
///
/// Arguments borrow their data and are only rendered when a record is
/// actually emitted.
pub enum LogArg<'a> {
    Text(Cow<'a, str>),
    Error {
        message: String,
        stack: Option<String>,
    },
    Value(&'a dyn LogValue),
}

impl<'a> LogArg<'a> {
    /// A structured value, rendered as JSON.
    pub fn value<T>(value: &'a T) -> Self
    where
        T: Serialize + fmt::Debug,
    {
        Self::Value(value)
    }

    /// An error without a stack trace; renders as its message and the
    /// messages of its `source()` chain, joined with `": "`.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Error {
            message,
            stack: None,
        }
    }

    /// The failure of a timed operation.
    pub fn failure<E, Via>(err: &'a E) -> Self
    where
        E: LogFailure<Via> + ?Sized,
    {
        err.to_log_arg()
    }

    /// An error carrying an explicit stack trace.
    pub fn error_with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// Render this argument on its own.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(&**text),
            Self::Error { message, stack } => {
                Cow::Borrowed(stack.as_deref().unwrap_or(message.as_str()))
            }
            Self::Value(value) => match value.to_json() {
                Ok(json) => Cow::Owned(json),
                Err(_) => Cow::Owned(value.coerce()),
            },
        }
    }
}

impl<'a> From<&'a str> for LogArg<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for LogArg<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for LogArg<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a anyhow::Error> for LogArg<'a> {
    fn from(err: &'a anyhow::Error) -> Self {
        let stack = match err.backtrace().status() {
            BacktraceStatus::Captured => Some(format!("{:?}", err)),
            _ => None,
        };
        Self::Error {
            message: format!("{:#}", err),
            stack,
        }
    }
}

/// Marker for failures that implement [`std::error::Error`].
pub enum ViaError {}

/// Marker for [`anyhow::Error`].
pub enum ViaAnyhow {}

/// Marker for boxed trait-object errors.
pub enum ViaBoxed {}

/// A failure value that can be rendered as an error argument.
///
/// `Via` only keeps the impls apart; it is always inferred. Implemented for
/// every `std::error::Error`, for `anyhow::Error` and for boxed
/// `dyn Error` values.
pub trait LogFailure<Via> {
    fn to_log_arg(&self) -> LogArg<'_>;
}

impl<E> LogFailure<ViaError> for E
where
    E: std::error::Error + 'static,
{
    fn to_log_arg(&self) -> LogArg<'_> {
        LogArg::error(self)
    }
}

impl LogFailure<ViaAnyhow> for anyhow::Error {
    fn to_log_arg(&self) -> LogArg<'_> {
        LogArg::from(self)
    }
}

impl LogFailure<ViaBoxed> for Box<dyn std::error::Error + Send + Sync + 'static> {
    fn to_log_arg(&self) -> LogArg<'_> {
        LogArg::error(&**self)
    }
}

impl LogFailure<ViaBoxed> for Box<dyn std::error::Error + 'static> {
    fn to_log_arg(&self) -> LogArg<'_> {
        LogArg::error(&**self)
    }
}

impl fmt::Debug for LogArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Error { message, stack } => f
                .debug_struct("Error")
                .field("message", message)
                .field("stack", stack)
                .finish(),
            Self::Value(_) => f.debug_tuple("Value").field(&self.render()).finish(),
        }
    }
}

/// Render all arguments and join them with a single space.
pub fn render<'a, I>(args: I) -> String
where
    I: IntoIterator<Item = LogArg<'a>>,
{
    let mut out = String::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&arg.render());
    }
    out
}
