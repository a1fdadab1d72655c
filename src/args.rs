//! These structs provide the CLI interface for the expense CLI.

use crate::model::{Category, ExpenseId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expense: record personal expenses and keep an eye on a budget.
///
/// Expenses live in a remote record store; this program lists them, adds new ones and deletes
/// them. The budget is a single number kept on this machine.
///
/// Run `expense init --api-url <URL>` first. If the record store needs a bearer token, put it in
/// $EXPENSE_HOME/.secrets/token.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and the configuration file.
    Init(InitArgs),
    /// Show every expense, the total spent and the budget.
    List,
    /// Record a new expense.
    Add(AddArgs),
    /// Delete an expense by its id.
    Delete(DeleteArgs),
    /// Show the budget, or set and save a new one.
    Budget(BudgetArgs),
    /// Show the categories an expense can be filed under.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where configuration and local preferences are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSE_HOME", default_value_t = default_expense_home())]
    expense_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expense_home: PathBuf) -> Self {
        Self {
            log_level,
            expense_home: expense_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expense_home(&self) -> &DisplayPath {
        &self.expense_home
    }
}

/// Args for the `expense init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the record store's remote methods, for example
    /// https://example.my.salesforce.com/services/apexrest/expenses
    #[arg(long)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `expense add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// How much was spent, e.g. 25.50 or $1,200
    #[arg(long)]
    amount: String,

    /// What the money was spent on
    #[arg(long, value_enum, default_value_t = Category::Food)]
    category: Category,

    /// The day of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// A free-text note
    #[arg(long)]
    note: Option<String>,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        category: Category,
        date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category,
            date,
            note,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Args for the `expense delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the expense, as shown by `expense list`
    id: ExpenseId,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::new(id),
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }
}

/// Args for the `expense budget` command.
#[derive(Debug, Parser, Clone)]
pub struct BudgetArgs {
    /// The new budget. Anything that is not a number sets the budget to 0. Omit to show the
    /// current budget.
    #[arg(allow_negative_numbers = true)]
    value: Option<String>,
}

impl BudgetArgs {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn default_expense_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expense-home or EXPENSE_HOME instead of relying on the \
                default directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "expense",
            "--expense-home",
            "/tmp/expenses",
            "add",
            "--amount",
            "25.50",
            "--category",
            "travel",
            "--date",
            "2024-01-01",
            "--note",
            "train",
        ])
        .unwrap();
        assert_eq!(args.common().expense_home().path(), Path::new("/tmp/expenses"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.amount(), "25.50");
                assert_eq!(add.category(), Category::Travel);
                assert_eq!(add.date(), NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(add.note(), Some("train"));
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = Args::try_parse_from(["expense", "add", "--amount", "3"]).unwrap();
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.category(), Category::Food);
                assert_eq!(add.date(), None);
                assert_eq!(add.note(), None);
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_and_budget() {
        let args = Args::try_parse_from(["expense", "delete", "a015g00000Exp001"]).unwrap();
        assert!(
            matches!(args.command(), Command::Delete(d) if d.id().as_str() == "a015g00000Exp001")
        );

        let args = Args::try_parse_from(["expense", "budget"]).unwrap();
        assert!(matches!(args.command(), Command::Budget(b) if b.value().is_none()));

        let args = Args::try_parse_from(["expense", "--log-level", "debug", "budget", "800"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(matches!(args.command(), Command::Budget(b) if b.value() == Some("800")));
    }

    #[test]
    fn test_parse_negative_budget() {
        let args = Args::try_parse_from(["expense", "budget", "-5"]).unwrap();
        assert!(matches!(args.command(), Command::Budget(b) if b.value() == Some("-5")));
    }
}
