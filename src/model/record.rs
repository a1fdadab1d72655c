//! The wire shape of expenses as the record store sends and receives them.
//!
//! The record store names its fields with platform conventions (`Amount__c`, `Notes__c`, ...) and
//! is not consistent between calls: a create takes `amount`, `category` and `date` in lower case
//! but the note as `Notes__c`. These structs pin that mapping down in one place.

use crate::model::{Amount, Category, Expense, ExpenseId, NewExpense};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// One row of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExpenseRecord {
    #[serde(rename = "Id")]
    pub(crate) id: ExpenseId,

    #[serde(
        rename = "Amount__c",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub(crate) amount: Option<Decimal>,

    #[serde(rename = "Category__c", default)]
    pub(crate) category: Option<String>,

    #[serde(rename = "Date__c", default)]
    pub(crate) date: Option<NaiveDate>,

    #[serde(rename = "Notes__c", default)]
    pub(crate) notes: Option<String>,
}

impl ExpenseRecord {
    /// Maps the row to an `Expense`. A row without a date cannot be shown, so it is skipped with a
    /// warning instead of failing the whole list.
    pub(crate) fn into_expense(self) -> Option<Expense> {
        let Some(date) = self.date else {
            warn!("Expense {} has no date, leaving it out of the list", self.id);
            return None;
        };
        let category = match self.category.as_deref() {
            None => Category::Misc,
            Some(s) => Category::from_str(s).unwrap_or_else(|_| {
                warn!("Expense {} has unknown category '{s}', showing it as Misc", self.id);
                Category::Misc
            }),
        };
        Some(Expense {
            id: Some(self.id),
            amount: self.amount.map(Amount::new),
            category,
            date,
            note: self.notes.unwrap_or_default(),
        })
    }
}

/// The body of a create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CreateExpenseRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) date: NaiveDate,
    #[serde(rename = "Notes__c")]
    pub(crate) note: String,
}

impl From<&NewExpense> for CreateExpenseRequest {
    fn from(value: &NewExpense) -> Self {
        Self {
            amount: value.amount.value(),
            category: value.category,
            date: value.date,
            note: value.note.clone(),
        }
    }
}

/// The body of a delete call.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteExpenseRequest {
    pub(crate) expense_id: ExpenseId,
}

/// The body the record store sends back when it rejects a call. Custom methods answer with one
/// object; the platform itself answers with a list of them.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorBody {
    Many(Vec<ErrorDetail>),
    One(ErrorDetail),
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ErrorBody {
    /// The first message in the body, if there is one.
    pub(crate) fn into_message(self) -> Option<String> {
        match self {
            ErrorBody::One(detail) => detail.message,
            ErrorBody::Many(details) => details.into_iter().find_map(|d| d.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_row_maps_platform_fields() {
        let row = json!({
            "Id": "a015g00000XyZ1",
            "Amount__c": 25.5,
            "Category__c": "Food",
            "Date__c": "2024-01-01",
            "Notes__c": "lunch"
        });
        let record: ExpenseRecord = serde_json::from_value(row).unwrap();
        let expense = record.into_expense().unwrap();
        assert_eq!(expense.id, Some(ExpenseId::new("a015g00000XyZ1")));
        assert_eq!(expense.amount, Amount::from_input("25.5"));
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(expense.note, "lunch");
    }

    #[test]
    fn test_list_row_with_missing_optional_fields() {
        let row = json!({
            "Id": "a015g00000XyZ2",
            "Amount__c": null,
            "Category__c": "Groceries",
            "Date__c": "2024-02-29"
        });
        let record: ExpenseRecord = serde_json::from_value(row).unwrap();
        let expense = record.into_expense().unwrap();
        assert_eq!(expense.amount, None);
        assert_eq!(expense.category, Category::Misc);
        assert_eq!(expense.note, "");
    }

    #[test]
    fn test_list_rows_without_date_are_skipped() {
        let rows = json!([
            {"Id": "a01", "Amount__c": 12.5, "Category__c": "Food", "Date__c": "2024-01-01"},
            {"Id": "a02", "Amount__c": 8, "Category__c": "Bills", "Date__c": null},
            {"Id": "a03", "Amount__c": 3}
        ]);
        let records: Vec<ExpenseRecord> = serde_json::from_value(rows).unwrap();
        let expenses: Vec<Expense> = records
            .into_iter()
            .filter_map(ExpenseRecord::into_expense)
            .collect();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, Some(ExpenseId::new("a01")));
    }

    #[test]
    fn test_error_body_shapes() {
        let one: ErrorBody = serde_json::from_str(r#"{"message":"Insufficient access"}"#).unwrap();
        assert_eq!(one.into_message().as_deref(), Some("Insufficient access"));

        let many: ErrorBody = serde_json::from_str(
            r#"[{"errorCode":"REQUIRED_FIELD_MISSING","message":"Required fields are missing: [Amount__c]"},
                {"errorCode":"OTHER","message":"second"}]"#,
        )
        .unwrap();
        assert_eq!(
            many.into_message().as_deref(),
            Some("Required fields are missing: [Amount__c]")
        );

        let empty: ErrorBody = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_message(), None);
        let silent: ErrorBody = serde_json::from_str(r#"{"status":"failed"}"#).unwrap();
        assert_eq!(silent.into_message(), None);
    }

    #[test]
    fn test_create_request_field_names() {
        let new = NewExpense {
            amount: Amount::from_input("25.5").unwrap(),
            category: Category::Health,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            note: "pharmacy".into(),
        };
        let value = serde_json::to_value(CreateExpenseRequest::from(&new)).unwrap();
        assert_eq!(
            value,
            json!({
                "amount": 25.5,
                "category": "Health",
                "date": "2024-01-01",
                "Notes__c": "pharmacy"
            })
        );
    }

    #[test]
    fn test_delete_request_field_name() {
        let body = DeleteExpenseRequest {
            expense_id: ExpenseId::new("a015g00000XyZ1"),
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value, json!({ "expenseId": "a015g00000XyZ1" }));
    }
}
