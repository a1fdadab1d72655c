//! Types that represent the core data model, such as `Expense` and `Category`.
mod amount;
mod category;
mod expense;
pub(crate) mod record;

pub use amount::{Amount, AmountError};
pub use category::{Category, CategoryOption};
#[cfg(test)]
pub(crate) use expense::today;
pub use expense::{Expense, ExpenseId, NewExpense};
