use crate::commands::{render, Out};
use crate::model::{Amount, Expense};
use crate::{Config, Mode, Result, Tracker};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Fetches every expense and shows them along with the total spent and the budget.
pub async fn list(config: Config, mode: Mode) -> Result<Out<Vec<Expense>>> {
    let (tracker, mut rx) = Tracker::open(&config, mode).await?;
    render(&mut rx)?;

    let expenses = tracker.expenses().to_vec();
    let message = summarize(&expenses, tracker.budget());
    Ok(Out::new(message, expenses))
}

fn summarize(expenses: &[Expense], budget: Decimal) -> String {
    let mut s = String::new();
    for e in expenses {
        let id = e.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        let amount = e.amount.map(|a| a.to_string()).unwrap_or_default();
        let _ = writeln!(
            s,
            "{id}  {}  {:<9}  {amount:>12}  {}",
            e.date,
            e.category.to_string(),
            e.note
        );
    }
    let total: Decimal = expenses.iter().filter_map(|e| e.amount).map(Decimal::from).sum();
    let _ = write!(
        s,
        "{} expense{}, total {} of a {} budget",
        expenses.len(),
        if expenses.len() == 1 { "" } else { "s" },
        Amount::new(total),
        Amount::new(budget)
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_list_seeded_expenses() {
        let env = TestEnv::new().await;
        let out = list(env.config(), Mode::Test).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 7);
        assert!(out
            .message()
            .ends_with("7 expenses, total $1,834.44 of a $10,000.00 budget"));
        assert!(out.message().contains("a015g00000Exp003"));
    }

    #[tokio::test]
    async fn test_list_uses_saved_budget() {
        let env = TestEnv::new().await;
        env.save_budget("2500").await;
        let out = list(env.config(), Mode::Test).await.unwrap();
        assert!(out.message().ends_with("of a $2,500.00 budget"));
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[], Decimal::from(10000)),
            "0 expenses, total $0.00 of a $10,000.00 budget"
        );
    }
}
