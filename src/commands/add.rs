use crate::args::AddArgs;
use crate::commands::{connect, render, Out};
use crate::model::Expense;
use crate::{Config, Mode, Result};

/// Fills in the form with `args` and submits it. On success the output carries the reloaded list
/// of expenses.
pub async fn add(config: Config, mode: Mode, args: AddArgs) -> Result<Out<Vec<Expense>>> {
    let (mut tracker, mut rx) = connect(&config, mode).await?;

    tracker.set_amount(args.amount());
    tracker.set_category(args.category());
    if let Some(date) = args.date() {
        tracker.set_date(date);
    }
    if let Some(note) = args.note() {
        tracker.set_note(note);
    }
    tracker.submit().await;

    let toast = render(&mut rx)?;
    let message = toast
        .map(|t| t.message().to_string())
        .unwrap_or_else(|| "Nothing was saved".to_string());
    Ok(Out::new(message, tracker.expenses().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_add_expense() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(
            "25.50",
            Category::Travel,
            NaiveDate::from_ymd_opt(2025, 10, 14),
            Some("Train ticket".to_string()),
        );

        let out = add(env.config(), Mode::Test, args).await.unwrap();

        assert_eq!(out.message(), "Expense saved");
        let expenses = out.structure().unwrap();
        assert_eq!(expenses.len(), 8);
        let added = expenses.iter().find(|e| e.note == "Train ticket").unwrap();
        assert_eq!(added.category, Category::Travel);
        assert!(added.id.as_ref().unwrap().as_str().starts_with("test-"));
    }

    #[tokio::test]
    async fn test_add_without_amount_fails_validation() {
        let env = TestEnv::new().await;
        let args = AddArgs::new("", Category::Food, None, None);
        let err = add(env.config(), Mode::Test, args).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation: Enter amount");
    }

    #[tokio::test]
    async fn test_add_non_numeric_amount_fails_validation() {
        let env = TestEnv::new().await;
        let args = AddArgs::new("twelve", Category::Food, None, None);
        let err = add(env.config(), Mode::Test, args).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation: Enter amount");
    }
}
