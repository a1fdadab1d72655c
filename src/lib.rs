mod api;
pub mod args;
mod budget;
pub mod commands;
mod config;
mod error;
pub mod model;
mod notify;
mod storage;
mod tracker;
mod utils;


pub use api::{Gateway, Mode};
pub use budget::Budget;
pub use config::Config;
pub use error::{Error, FormError, Result};
pub use notify::{Event, Severity, Toast};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tracker::Tracker;
