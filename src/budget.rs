//! The budget: one number the user sets, kept in local storage and unrelated to any expense.

use crate::storage::Storage;
use crate::Result;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

/// The local storage key the budget lives under.
pub const BUDGET_KEY: &str = "expense_budget";

/// The budget until the user saves a different one.
pub const DEFAULT_BUDGET: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Holds the current budget and the `Storage` it is read from and written to.
///
/// Edits only change the in-memory value; nothing reaches storage until `save` is called.
pub struct Budget {
    value: Decimal,
    storage: Box<dyn Storage + Send + Sync>,
}

impl Budget {
    /// A budget at `DEFAULT_BUDGET`, backed by `storage`. Call `load` to pick up a stored value.
    pub fn new(storage: Box<dyn Storage + Send + Sync>) -> Self {
        Self {
            value: DEFAULT_BUDGET,
            storage,
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Reads the stored budget. When nothing is stored, or what is stored is not a number, the
    /// current value is kept.
    pub async fn load(&mut self) -> Result<Decimal> {
        match self.storage.get_item(BUDGET_KEY).await? {
            None => debug!("No stored budget, keeping {}", self.value),
            Some(stored) => match Decimal::from_str(stored.trim()) {
                Ok(value) => self.value = clamp(value),
                Err(e) => warn!("Ignoring stored budget '{stored}': {e}"),
            },
        }
        Ok(self.value)
    }

    /// Sets the budget from user input. Anything that is not a number, and any negative number,
    /// becomes 0.
    pub fn set(&mut self, input: &str) -> Decimal {
        self.value = parse_input(input);
        self.value
    }

    /// Writes the current budget to storage.
    pub async fn save(&mut self) -> Result<()> {
        let value = self.value.to_string();
        self.storage.set_item(BUDGET_KEY, &value).await
    }
}

fn parse_input(input: &str) -> Decimal {
    Decimal::from_str(input.trim())
        .map(clamp)
        .unwrap_or(Decimal::ZERO)
}

fn clamp(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn budget_with(stored: &str) -> Budget {
        let mut storage = MemoryStorage::new();
        storage.set_item(BUDGET_KEY, stored).await.unwrap();
        Budget::new(Box::new(storage))
    }

    #[tokio::test]
    async fn test_load_without_stored_value_keeps_default() {
        let mut budget = Budget::new(Box::new(MemoryStorage::new()));
        assert_eq!(budget.load().await.unwrap(), dec("10000"));
    }

    #[tokio::test]
    async fn test_load_stored_value() {
        let mut budget = budget_with("500").await;
        assert_eq!(budget.load().await.unwrap(), dec("500"));
        assert_eq!(budget.value(), dec("500"));
    }

    #[tokio::test]
    async fn test_load_garbage_keeps_default() {
        let mut budget = budget_with("lots").await;
        assert_eq!(budget.load().await.unwrap(), DEFAULT_BUDGET);
    }

    #[test]
    fn test_set_clamps_non_numeric_to_zero() {
        let mut budget = Budget::new(Box::new(MemoryStorage::new()));
        assert_eq!(budget.set("abc"), Decimal::ZERO);
        assert_eq!(budget.set(""), Decimal::ZERO);
        assert_eq!(budget.set("-20"), Decimal::ZERO);
        assert_eq!(budget.set(" 2500.50 "), dec("2500.5"));
    }

    #[tokio::test]
    async fn test_save_writes_string_number() {
        let mut budget = Budget::new(Box::new(MemoryStorage::new()));
        budget.set("750.00");
        budget.save().await.unwrap();
        assert_eq!(
            budget.storage.get_item(BUDGET_KEY).await.unwrap().as_deref(),
            Some("750")
        );

        let mut reloaded = Budget::new(budget.storage);
        assert_eq!(reloaded.load().await.unwrap(), dec("750"));
    }
}
