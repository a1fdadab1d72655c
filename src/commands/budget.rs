use crate::commands::{connect, render, Out};
use crate::model::Amount;
use crate::{Config, Mode, Result};
use rust_decimal::Decimal;

/// Shows the stored budget or, when `value` is given, sets and saves a new one.
pub async fn budget(config: Config, mode: Mode, value: Option<&str>) -> Result<Out<Decimal>> {
    let (mut tracker, mut rx) = connect(&config, mode).await?;
    let message = match value {
        None => {
            tracker.load_budget().await;
            render(&mut rx)?;
            format!("The budget is {}", Amount::new(tracker.budget()))
        }
        Some(input) => {
            tracker.set_budget(input);
            tracker.save_budget().await;
            render(&mut rx)?;
            format!("Budget saved: {}", Amount::new(tracker.budget()))
        }
    };
    Ok(Out::new(message, tracker.budget()))
}
