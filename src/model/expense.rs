use crate::model::{Amount, Category};
use crate::FormError;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The message shown when a draft is submitted without an amount.
pub(crate) const ENTER_AMOUNT: &str = "Enter amount";

/// The opaque identifier the record store assigns to an expense.
#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// An expense, either as listed from the record store or as a draft being edited in the form.
///
/// A draft has no `id`. Everything except the amount always has a usable value, so the only thing
/// that can stop a draft from being submitted is a missing amount.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub id: Option<ExpenseId>,
    pub amount: Option<Amount>,
    pub category: Category,
    pub date: NaiveDate,
    pub note: String,
}

impl Expense {
    /// A fresh draft: no amount, the default category, today's date and an empty note.
    pub fn draft() -> Self {
        Self {
            id: None,
            amount: None,
            category: Category::default(),
            date: today(),
            note: String::new(),
        }
    }

    /// Checks the one required field and, if it is present, produces the payload for a create
    /// call.
    pub fn to_new_expense(&self) -> Result<NewExpense, FormError> {
        let amount = self
            .amount
            .ok_or_else(|| FormError::Validation(ENTER_AMOUNT.to_string()))?;
        Ok(NewExpense {
            amount,
            category: self.category,
            date: self.date,
            note: self.note.clone(),
        })
    }
}

impl Default for Expense {
    fn default() -> Self {
        Self::draft()
    }
}

/// The fields sent to the record store when creating an expense. The store assigns the id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: Category,
    pub date: NaiveDate,
    pub note: String,
}

impl NewExpense {
    /// What the record store would hand back once it has saved this expense as `id`.
    pub(crate) fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id: Some(id),
            amount: Some(self.amount),
            category: self.category,
            date: self.date,
            note: self.note,
        }
    }
}

/// Today's date on the local clock.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = Expense::draft();
        assert_eq!(draft.id, None);
        assert_eq!(draft.amount, None);
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.date, today());
        assert_eq!(draft.note, "");
    }

    #[test]
    fn test_to_new_expense_requires_amount() {
        let draft = Expense::draft();
        let err = draft.to_new_expense().unwrap_err();
        assert_eq!(err, FormError::Validation("Enter amount".to_string()));
    }

    #[test]
    fn test_to_new_expense_copies_fields() {
        let draft = Expense {
            amount: Amount::from_input("25.5"),
            category: Category::Travel,
            note: "train".into(),
            ..Expense::draft()
        };
        let new = draft.to_new_expense().unwrap();
        assert_eq!(new.amount, Amount::from_input("25.50").unwrap());
        assert_eq!(new.category, Category::Travel);
        assert_eq!(new.date, draft.date);
        assert_eq!(new.note, "train");
    }

    #[test]
    fn test_expense_id_display() {
        let id: ExpenseId = "a0B5g000001".parse().unwrap();
        assert_eq!(id.to_string(), "a0B5g000001");
        assert_eq!(id, ExpenseId::new("a0B5g000001"));
    }
}
