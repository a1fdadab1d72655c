//! Command handlers for the expense CLI.
//!
//! Each handler drives a `Tracker` the way a user would drive the form, then renders the events it
//! emitted. A handler fails when the toast for its own operation was a warning or an error.

mod add;
mod budget;
mod categories;
mod delete;
mod init;
mod list;

use crate::{api, Config, Event, Mode, Result, Toast, Tracker};
use serde::Serialize;
use std::fmt::Debug;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

pub use add::add;
pub use budget::budget;
pub use categories::categories;
pub use delete::delete;
pub use init::init;
pub use list::list;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Creates a `Tracker` for `mode` without mounting it, for commands that do not need the list up
/// front.
async fn connect(config: &Config, mode: Mode) -> Result<(Tracker, UnboundedReceiver<Event>)> {
    let gateway = api::gateway(config, mode).await?;
    Ok(Tracker::new(gateway, Box::new(config.storage())))
}

/// Drains every event emitted so far and returns the first toast, which reports the operation the
/// command ran. The command fails when that toast is a warning or an error. Later toasts come from
/// follow-up work such as reloading the list and are only logged.
fn render(rx: &mut UnboundedReceiver<Event>) -> Result<Option<Toast>> {
    let mut outcome: Option<Toast> = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            Event::Toast(toast) => {
                if toast.is_failure() {
                    if outcome.is_some() {
                        warn!("{}: {}", toast.title(), toast.message());
                    }
                } else {
                    info!("{}: {}", toast.title(), toast.message());
                }
                outcome.get_or_insert(toast);
            }
            other => debug!("{other:?}"),
        }
    }
    match outcome {
        Some(toast) if toast.is_failure() => {
            anyhow::bail!("{}: {}", toast.title(), toast.message())
        }
        outcome => Ok(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Emitter, Severity};

    #[test]
    fn test_render_returns_first_toast() {
        let (emitter, mut rx) = Emitter::channel();
        emitter.toast(Toast::success("Success", "Expense saved"));
        emitter.emit(Event::Expenses(Vec::new()));
        emitter.toast(Toast::success("Deleted", "Expense removed"));
        let first = render(&mut rx).unwrap().unwrap();
        assert_eq!(first.message(), "Expense saved");
    }

    #[test]
    fn test_render_failed_reload_after_success_is_not_a_failure() {
        let (emitter, mut rx) = Emitter::channel();
        emitter.toast(Toast::success("Success", "Expense saved"));
        emitter.toast(Toast::new("Error", "Session expired", Severity::Error));
        let outcome = render(&mut rx).unwrap().unwrap();
        assert_eq!(outcome.message(), "Expense saved");
    }

    #[test]
    fn test_render_fails_on_final_error() {
        let (emitter, mut rx) = Emitter::channel();
        emitter.toast(Toast::new("Error", "Session expired", Severity::Error));
        let err = render(&mut rx).unwrap_err();
        assert_eq!(err.to_string(), "Error: Session expired");
    }

    #[test]
    fn test_render_without_toasts() {
        let (_emitter, mut rx) = Emitter::channel();
        assert!(render(&mut rx).unwrap().is_none());
    }
}
