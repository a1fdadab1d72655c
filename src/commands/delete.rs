use crate::commands::{connect, render, Out};
use crate::model::{Expense, ExpenseId};
use crate::{Config, Mode, Result};

/// Deletes the expense with `id`. On success the output carries the reloaded list of expenses.
pub async fn delete(config: Config, mode: Mode, id: &ExpenseId) -> Result<Out<Vec<Expense>>> {
    let (mut tracker, mut rx) = connect(&config, mode).await?;
    tracker.delete(id).await;

    let toast = render(&mut rx)?;
    let message = match toast {
        Some(t) => format!("{}: {id}", t.message()),
        None => format!("Nothing happened to {id}"),
    };
    Ok(Out::new(message, tracker.expenses().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_expense() {
        let env = TestEnv::new().await;
        let id = ExpenseId::new("a015g00000Exp003");

        let out = delete(env.config(), Mode::Test, &id).await.unwrap();

        assert_eq!(out.message(), "Expense removed: a015g00000Exp003");
        let expenses = out.structure().unwrap();
        assert_eq!(expenses.len(), 6);
        assert!(expenses.iter().all(|e| e.id.as_ref() != Some(&id)));
    }

    #[tokio::test]
    async fn test_delete_unknown_expense() {
        let env = TestEnv::new().await;
        let id = ExpenseId::new("a015g00000Exp999");
        let err = delete(env.config(), Mode::Test, &id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Expense not found: a015g00000Exp999"
        );
    }
}
