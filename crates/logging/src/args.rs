//! crates/logging/src/args.rs
//! The optional message, error and closer carried by a check call.

use std::fmt;

use crate::printf::{Value, sprintf};

/// Message text of a check.
#[derive(Clone, Debug, PartialEq)]
pub enum Text {
    /// Already rendered text, typically from `format!`.
    Rendered(String),
    /// printf-style template with positional values.
    Template {
        /// Template containing `%` verbs.
        template: String,
        /// Values substituted in order.
        values: Vec<Value>,
    },
}

impl Text {
    /// Renders the text, substituting template values.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Rendered(text) => text.clone(),
            Self::Template { template, values } => sprintf(template, values),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rendered(text) => f.write_str(text),
            Self::Template { .. } => f.write_str(&self.render()),
        }
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::Rendered(text.to_owned())
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::Rendered(text)
    }
}

/// Zero-argument cleanup callback run once before a terminating action.
pub struct Closer(Box<dyn FnOnce()>);

impl Closer {
    /// Wraps `f`.
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Runs the callback, consuming it.
    pub fn call(self) {
        (self.0)();
    }
}

impl fmt::Debug for Closer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Closer")
    }
}

/// Arguments of a check: optional text, optional error value, optional closer.
///
/// The closer is never rendered. Report-only checks drop it without calling
/// it; terminating checks take it with [`take_closer`](Self::take_closer) and
/// run it before the message is produced.
///
/// # Examples
///
/// ```
/// use logging::CheckArgs;
///
/// let args = CheckArgs::template("%s-%d", ["x".into(), 3.into()]);
/// assert_eq!(args.text_ref().unwrap().render(), "x-3");
///
/// let args = CheckArgs::error("disk full").with_text(": /var");
/// assert_eq!(args.error_ref(), Some("disk full"));
/// ```
#[derive(Debug, Default)]
pub struct CheckArgs {
    text: Option<Text>,
    error: Option<String>,
    closer: Option<Closer>,
}

impl CheckArgs {
    /// No text, no error, no closer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Args carrying rendered text.
    pub fn text(text: impl Into<Text>) -> Self {
        Self::new().with_text(text)
    }

    /// Args carrying a printf-style template.
    pub fn template(template: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self::new().with_template(template, values)
    }

    /// Args carrying an error value's text.
    pub fn error(error: impl fmt::Display) -> Self {
        Self::new().with_error(error)
    }

    /// Args carrying only a closer.
    pub fn closer(closer: impl FnOnce() + 'static) -> Self {
        Self::new().with_closer(closer)
    }

    /// Sets the text.
    pub fn with_text(mut self, text: impl Into<Text>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets a printf-style template.
    pub fn with_template(
        mut self,
        template: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.text = Some(Text::Template {
            template: template.into(),
            values: values.into_iter().collect(),
        });
        self
    }

    /// Sets the error value; its text leads the message.
    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Sets the closer.
    pub fn with_closer(mut self, closer: impl FnOnce() + 'static) -> Self {
        self.closer = Some(Closer::new(closer));
        self
    }

    /// Reports whether neither text nor error is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.error.is_none()
    }

    /// Returns the text, if any.
    #[must_use]
    pub const fn text_ref(&self) -> Option<&Text> {
        self.text.as_ref()
    }

    /// Returns the error text, if any.
    #[must_use]
    pub fn error_ref(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reports whether a closer is attached.
    #[must_use]
    pub const fn has_closer(&self) -> bool {
        self.closer.is_some()
    }

    /// Detaches the closer.
    pub fn take_closer(&mut self) -> Option<Closer> {
        self.closer.take()
    }

    /// Runs and detaches the closer, if any.
    pub(crate) fn run_closer(&mut self) {
        if let Some(closer) = self.take_closer() {
            closer.call();
        }
    }
}

impl From<()> for CheckArgs {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<&str> for CheckArgs {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for CheckArgs {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<Text> for CheckArgs {
    fn from(text: Text) -> Self {
        Self::text(text)
    }
}
