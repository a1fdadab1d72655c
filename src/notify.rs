//! The explicit state-update channel between the `Tracker` and whatever renders it.
//!
//! The `Tracker` never draws anything. Every change it makes to its own state, and every outcome
//! of a gateway call, is sent as an `Event` down an unbounded channel. The rendering layer owns
//! the receiving end and decides what to show.

use crate::model::Expense;
use crate::FormError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// How a toast should be presented.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

serde_plain::derive_display_from_serialize!(Severity);
serde_plain::derive_fromstr_from_deserialize!(Severity);

/// A transient notification shown after an operation resolves.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    title: String,
    message: String,
    severity: Severity,
}

impl Toast {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Success)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// True for warnings and errors.
    pub fn is_failure(&self) -> bool {
        matches!(self.severity, Severity::Warning | Severity::Error)
    }
}

impl From<&FormError> for Toast {
    fn from(e: &FormError) -> Self {
        Toast::new(e.title(), e.to_string(), e.severity())
    }
}

/// Something the rendering layer may want to redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Toast(Toast),
    /// The displayed list was replaced by a fresh copy from the record store.
    Expenses(Vec<Expense>),
    /// The draft was replaced.
    Draft(Expense),
    Budget(Decimal),
}

/// The sending half of the event channel. Sends never fail from the caller's point of view; if
/// nobody is listening the event is dropped.
#[derive(Debug, Clone)]
pub(crate) struct Emitter {
    tx: UnboundedSender<Event>,
}

impl Emitter {
    pub(crate) fn channel() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub(crate) fn emit(&self, event: Event) {
        if let Err(e) = self.tx.send(event) {
            trace!("No listener for event {:?}", e.0);
        }
    }

    pub(crate) fn toast(&self, toast: Toast) {
        self.emit(Event::Toast(toast))
    }
}
