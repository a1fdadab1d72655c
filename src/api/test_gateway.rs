//! Implements the `Gateway` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a record store.

use crate::api::Gateway;
use crate::model::{Amount, Category, Expense, ExpenseId, NewExpense};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::trace;
use uuid::Uuid;

/// An in-memory record store. Clones share the same state, so a test can hand one clone to a
/// `Tracker` and inspect the other.
#[derive(Debug, Default, Clone)]
pub(crate) struct TestGateway {
    state: Arc<Mutex<TestGatewayState>>,
}

/// Everything the `TestGateway` holds, plus a record of the calls made against it.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct TestGatewayState {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) list_calls: usize,
    pub(crate) created: Vec<NewExpense>,
    pub(crate) deleted: Vec<ExpenseId>,
    /// When set, the next call of any kind fails with this message.
    pub(crate) reject_next: Option<String>,
}

impl TestGateway {
    pub(crate) fn new(expenses: Vec<Expense>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TestGatewayState {
                expenses,
                ..TestGatewayState::default()
            })),
        }
    }

    /// A `TestGateway` holding the sample expenses from this module.
    pub(crate) fn seeded() -> Result<Self> {
        Ok(Self::new(load_seed(SEED_DATA)?))
    }

    /// A copy of the current state.
    #[cfg(test)]
    pub(crate) async fn state(&self) -> TestGatewayState {
        self.state.lock().await.clone()
    }

    /// Makes the next call fail with `message`, the way the record store would.
    #[cfg(test)]
    pub(crate) async fn reject_next(&self, message: impl Into<String>) {
        self.state.lock().await.reject_next = Some(message.into());
    }
}

impl TestGatewayState {
    fn check_rejection(&mut self) -> Result<()> {
        if let Some(message) = self.reject_next.take() {
            bail!(message);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Gateway for TestGateway {
    async fn list_expenses(&mut self) -> Result<Vec<Expense>> {
        let mut state = self.state.lock().await;
        state.list_calls += 1;
        state.check_rejection()?;
        trace!("Listing {} test expenses", state.expenses.len());
        Ok(state.expenses.clone())
    }

    async fn create_expense(&mut self, expense: &NewExpense) -> Result<()> {
        let mut state = self.state.lock().await;
        state.created.push(expense.clone());
        state.check_rejection()?;
        let id = ExpenseId::new(format!("test-{}", Uuid::new_v4().simple()));
        trace!("Creating test expense {id}");
        state.expenses.push(expense.clone().into_expense(id));
        Ok(())
    }

    async fn delete_expense(&mut self, id: &ExpenseId) -> Result<()> {
        let mut state = self.state.lock().await;
        state.deleted.push(id.clone());
        state.check_rejection()?;
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id.as_ref() != Some(id));
        if state.expenses.len() == before {
            bail!("Expense not found: {id}");
        }
        trace!("Deleted test expense {id}");
        Ok(())
    }
}

/// Loads expenses from CSV text with the columns `Id,Amount,Category,Date,Note`.
fn load_seed(csv_data: &str) -> Result<Vec<Expense>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let mut expenses = Vec::new();
    for (ix, result) in rdr.records().enumerate() {
        let record = result.context("Unable to read seed expense data")?;
        let field = |i: usize| record.get(i).unwrap_or_default();
        let category = Category::from_str(field(2))
            .with_context(|| format!("Bad category in seed row {}", ix + 1))?;
        let date = NaiveDate::parse_from_str(field(3), "%Y-%m-%d")
            .with_context(|| format!("Bad date in seed row {}", ix + 1))?;
        expenses.push(Expense {
            id: Some(ExpenseId::new(field(0))),
            amount: Amount::from_input(field(1)),
            category,
            date,
            note: field(4).to_string(),
        });
    }
    Ok(expenses)
}

/// Seed expense data.
const SEED_DATA: &str = r##"Id,Amount,Category,Date,Note
a015g00000Exp001,12.50,Food,2025-10-01,Lunch at the noodle bar
a015g00000Exp002,86.20,Bills,2025-10-02,Electricity
a015g00000Exp003,1450.00,Travel,2025-10-04,Flights for the conference
a015g00000Exp004,39.99,Shopping,2025-10-06,
a015g00000Exp005,220.00,Education,2025-10-09,Evening course fee
a015g00000Exp006,18.75,Health,2025-10-11,Pharmacy
a015g00000Exp007,7.00,Misc,2025-10-12,Parking
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data_loads() {
        let expenses = load_seed(SEED_DATA).unwrap();
        assert_eq!(expenses.len(), 7);
        assert_eq!(expenses[2].category, Category::Travel);
        assert_eq!(expenses[2].amount, Amount::from_input("1450"));
        assert_eq!(expenses[3].note, "");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_lists() {
        let mut gateway = TestGateway::new(Vec::new());
        let new = NewExpense {
            amount: Amount::from_input("4.50").unwrap(),
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            note: "coffee".into(),
        };
        gateway.create_expense(&new).await.unwrap();
        let listed = gateway.list_expenses().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].id.is_some());
        assert_eq!(listed[0].note, "coffee");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let mut gateway = TestGateway::seeded().unwrap();
        let err = gateway
            .delete_expense(&ExpenseId::new("nonexistent"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Expense not found: nonexistent");
        assert_eq!(gateway.state().await.expenses.len(), 7);
    }

    #[tokio::test]
    async fn test_reject_next_applies_once() {
        let mut gateway = TestGateway::seeded().unwrap();
        gateway.reject_next("Service unavailable").await;
        let err = gateway.list_expenses().await.unwrap_err();
        assert_eq!(err.to_string(), "Service unavailable");
        assert!(gateway.list_expenses().await.is_ok());
        assert_eq!(gateway.state().await.list_calls, 2);
    }
}
