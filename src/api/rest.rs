//! Implements the `Gateway` trait by calling the record store's remote methods over HTTP.
//!
//! Each remote method is exposed as `POST {api_url}/{method}` with a JSON body:
//! - `getExpenses` takes `{}` and returns a list of `ExpenseRecord`
//! - `createExpense` takes a `CreateExpenseRequest`
//! - `deleteExpense` takes a `DeleteExpenseRequest`
//!
//! A rejected call answers with a non-success status and, usually, `{"message": "..."}` or a list
//! of `{"errorCode": "...", "message": "..."}`.

use crate::api::Gateway;
use crate::model::record::{CreateExpenseRequest, DeleteExpenseRequest, ErrorBody, ExpenseRecord};
use crate::model::{Expense, ExpenseId, NewExpense};
use crate::{utils, Config, Result};
use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

const GET_EXPENSES: &str = "getExpenses";
const CREATE_EXPENSE: &str = "createExpense";
const DELETE_EXPENSE: &str = "deleteExpense";

pub(crate) struct RestGateway {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl RestGateway {
    /// Creates a `RestGateway` for the record store at `config.api_url()`. If a token file exists
    /// at `config.token_path()`, its contents are sent as a bearer token with every call.
    pub(crate) async fn new(config: &Config) -> Result<Self> {
        let token_path = config.token_path();
        let token = if token_path.is_file() {
            let token = utils::read(&token_path).await?.trim().to_string();
            debug!("Using the access token from {}", token_path.display());
            Some(token).filter(|t| !t.is_empty())
        } else {
            None
        };
        Ok(Self::with_token(config.api_url().clone(), token))
    }

    pub(crate) fn with_token(mut base: Url, token: Option<String>) -> Self {
        // Url::join replaces the last path segment unless the base ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            client: reqwest::Client::new(),
            base,
            token,
        }
    }

    /// Sends `body` to the remote `method` and returns the successful response. Any failure is
    /// turned into an error whose message is fit to show the user.
    async fn call<B>(&self, method: &str, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + Sync,
    {
        let url = self
            .base
            .join(method)
            .with_context(|| format!("Unable to build the URL for {method}"))?;
        trace!("POST {url}");

        let mut request = self.client.post(url.clone()).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("Unable to reach the expense service at {url}"))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());
        debug!("{method} failed with status {status}: {text}");
        match serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
        {
            Some(message) => bail!(message),
            None => bail!("{status}: {text}"),
        }
    }
}

#[async_trait::async_trait]
impl Gateway for RestGateway {
    async fn list_expenses(&mut self) -> Result<Vec<Expense>> {
        let response = self.call(GET_EXPENSES, &serde_json::json!({})).await?;
        let records: Vec<ExpenseRecord> = response
            .json()
            .await
            .context("Unable to parse the list of expenses")?;
        Ok(records
            .into_iter()
            .filter_map(ExpenseRecord::into_expense)
            .collect())
    }

    async fn create_expense(&mut self, expense: &NewExpense) -> Result<()> {
        let body = CreateExpenseRequest::from(expense);
        self.call(CREATE_EXPENSE, &body).await?;
        Ok(())
    }

    async fn delete_expense(&mut self, id: &ExpenseId) -> Result<()> {
        let body = DeleteExpenseRequest {
            expense_id: id.clone(),
        };
        self.call(DELETE_EXPENSE, &body).await?;
        Ok(())
    }
}
