//! Access to the remote record store that owns expenses.
//!
//! The `Gateway` trait is the whole boundary: three calls, each a single request and response.
//! `RestGateway` talks to the real store over HTTP and `TestGateway` keeps everything in memory so
//! the program can run top-to-bottom without a network.

mod rest;
mod test_gateway;

use crate::model::{Expense, ExpenseId, NewExpense};
use crate::{Config, Result};
use tracing::debug;

pub(crate) use rest::RestGateway;
pub(crate) use test_gateway::TestGateway;
#[cfg(test)]
pub(crate) use test_gateway::TestGatewayState;

/// When set and non-empty, the program uses `TestGateway` instead of the remote record store.
pub const TEST_MODE_ENV: &str = "EXPENSE_TRACKER_IN_TEST_MODE";

/// The remote call boundary for expense CRUD.
///
/// Implementations should not retry. A failure is reported once, with a message fit to show a
/// user, and the caller decides what to do with it.
#[async_trait::async_trait]
pub trait Gateway {
    /// Fetches every expense. There is no filtering and no pagination.
    async fn list_expenses(&mut self) -> Result<Vec<Expense>>;

    /// Saves a new expense. The store assigns the id; callers reload the list to see it.
    async fn create_expense(&mut self, expense: &NewExpense) -> Result<()>;

    /// Removes the expense with `id`. Fails if it does not exist or may not be deleted.
    async fn delete_expense(&mut self, id: &ExpenseId) -> Result<()>;
}

/// Which `Gateway` implementation to use.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Talk to the record store configured in `config.json`.
    #[default]
    Remote,
    /// Use an in-memory store seeded with sample expenses.
    Test,
}

impl Mode {
    /// Reads `EXPENSE_TRACKER_IN_TEST_MODE` to decide between `Mode::Test` and `Mode::Remote`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Remote,
        }
    }
}

/// Creates the `Gateway` for `mode`.
pub(crate) async fn gateway(config: &Config, mode: Mode) -> Result<Box<dyn Gateway + Send>> {
    debug!("Creating gateway in {mode:?} mode");
    Ok(match mode {
        Mode::Remote => Box::new(RestGateway::new(config).await?),
        Mode::Test => Box::new(TestGateway::seeded()?),
    })
}
