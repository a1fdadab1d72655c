//! The expense form controller.
//!
//! `Tracker` holds the list of expenses as last fetched, a draft expense being edited, and the
//! budget. It never renders anything: each change is announced as an `Event` on the channel
//! returned by `Tracker::new`, and every gateway call ends in exactly one toast.
//!
//! Every failure is caught here and becomes a toast. None of the operations return errors, and the
//! tracker stays usable after any of them fails.

use crate::api::{self, Gateway};
use crate::budget::Budget;
use crate::model::{Amount, Category, CategoryOption, Expense, ExpenseId};
use crate::notify::{Emitter, Event, Toast};
use crate::storage::Storage;
use crate::{Config, FormError, Mode, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, trace};

pub struct Tracker {
    gateway: Box<dyn Gateway + Send>,
    budget: Budget,
    expenses: Vec<Expense>,
    draft: Expense,
    emitter: Emitter,
}

impl Tracker {
    /// Creates a `Tracker` with an empty list, a fresh draft and the default budget, along with
    /// the receiving end of its event channel. Call `mount` to fetch expenses and the stored
    /// budget.
    pub fn new(
        gateway: Box<dyn Gateway + Send>,
        storage: Box<dyn Storage + Send + Sync>,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (emitter, rx) = Emitter::channel();
        let tracker = Self {
            gateway,
            budget: Budget::new(storage),
            expenses: Vec::new(),
            draft: Expense::draft(),
            emitter,
        };
        (tracker, rx)
    }

    /// Creates a `Tracker` wired to the gateway for `mode` and to the file storage in the home
    /// directory, then mounts it.
    pub async fn open(config: &Config, mode: Mode) -> Result<(Self, UnboundedReceiver<Event>)> {
        let gateway = api::gateway(config, mode).await?;
        let (mut tracker, rx) = Tracker::new(gateway, Box::new(config.storage()));
        tracker.mount().await;
        Ok((tracker, rx))
    }

    /// Fetches all expenses and reads the stored budget.
    pub async fn mount(&mut self) {
        self.load_expenses().await;
        self.load_budget().await;
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn draft(&self) -> &Expense {
        &self.draft
    }

    pub fn budget(&self) -> Decimal {
        self.budget.value()
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        Category::options()
    }

    /// Replaces the displayed list with a fresh copy from the record store. On failure the
    /// previous list stays.
    pub async fn load_expenses(&mut self) {
        match self.gateway.list_expenses().await {
            Ok(expenses) => {
                debug!("Loaded {} expenses", expenses.len());
                self.expenses = expenses;
                self.emitter.emit(Event::Expenses(self.expenses.clone()));
            }
            Err(e) => self.fail(FormError::remote(&e)),
        }
    }

    /// Sets the draft's amount from text typed by the user. Blank or non-numeric text unsets it.
    pub fn set_amount(&mut self, input: &str) {
        self.update_draft(Expense {
            amount: Amount::from_input(input),
            ..self.draft.clone()
        })
    }

    pub fn set_category(&mut self, category: Category) {
        self.update_draft(Expense {
            category,
            ..self.draft.clone()
        })
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.update_draft(Expense {
            date,
            ..self.draft.clone()
        })
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.update_draft(Expense {
            note: note.into(),
            ..self.draft.clone()
        })
    }

    /// Discards the draft and starts a fresh one.
    pub fn reset(&mut self) {
        self.update_draft(Expense::draft())
    }

    /// Sends the draft to the record store.
    ///
    /// Without an amount this only raises a validation toast. Otherwise the expense is created,
    /// and on success the list is reloaded and the draft reset. On failure the draft is kept so
    /// the user can try again.
    pub async fn submit(&mut self) {
        let new_expense = match self.draft.to_new_expense() {
            Ok(new_expense) => new_expense,
            Err(e) => return self.fail(e),
        };
        match self.gateway.create_expense(&new_expense).await {
            Ok(()) => {
                self.emitter.toast(Toast::success("Success", "Expense saved"));
                self.load_expenses().await;
                self.reset();
            }
            Err(e) => self.fail(FormError::remote(&e)),
        }
    }

    /// Deletes the expense with `id` from the record store and reloads the list. The displayed
    /// list is only ever replaced by the reload, never edited here.
    pub async fn delete(&mut self, id: &ExpenseId) {
        match self.gateway.delete_expense(id).await {
            Ok(()) => {
                self.emitter.toast(Toast::success("Deleted", "Expense removed"));
                self.load_expenses().await;
            }
            Err(e) => self.fail(FormError::remote(&e)),
        }
    }

    /// Sets the budget from text typed by the user. Nothing is stored until `save_budget`.
    pub fn set_budget(&mut self, input: &str) {
        let value = self.budget.set(input);
        self.emitter.emit(Event::Budget(value));
    }

    pub async fn save_budget(&mut self) {
        match self.budget.save().await {
            Ok(()) => self.emitter.toast(Toast::success("Success", "Budget saved")),
            Err(e) => self.fail(FormError::Storage(format!("{e:#}"))),
        }
    }

    /// Reads the stored budget. A storage problem is reported and the current budget is kept.
    pub async fn load_budget(&mut self) {
        match self.budget.load().await {
            Ok(value) => self.emitter.emit(Event::Budget(value)),
            Err(e) => self.fail(FormError::Storage(format!("{e:#}"))),
        }
    }

    fn update_draft(&mut self, draft: Expense) {
        trace!("Draft is now {draft:?}");
        self.draft = draft;
        self.emitter.emit(Event::Draft(self.draft.clone()));
    }

    fn fail(&self, e: FormError) {
        debug!("{}: {e}", e.title());
        self.emitter.toast(Toast::from(&e));
    }
}
