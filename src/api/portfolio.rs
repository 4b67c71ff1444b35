use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};

use crate::{
    db,
    models::{AccountType, DividendForecast, Holding, NewTransaction, Transaction},
    portfolio::{BucketEntry, DistributionMode, aggregate_holdings, monthly_distribution},
};

use super::{
    AppState,
    error::{ApiError, ApiResult},
    identity::UserId,
};

/// Securities code: four characters, leading digit, e.g. "7203" or "285A".
fn ticker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9][0-9A-Z]{3}$").expect("valid ticker pattern"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRequest {
    ticker: String,
    shares: Decimal,
    price: Decimal,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    account_type: Option<AccountType>,
}

impl NewTransactionRequest {
    fn validate(self) -> Result<NewTransaction, ApiError> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ApiError::BadRequest("Missing ticker".to_string()));
        }
        if !ticker_pattern().is_match(&ticker) {
            return Err(ApiError::BadRequest(format!(
                "Invalid ticker code '{}'",
                ticker
            )));
        }

        let transaction_date = match self.date.as_deref() {
            Some(s) if !s.is_empty() => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", s))
                })?,
            ),
            _ => None,
        };

        Ok(NewTransaction::new(
            ticker,
            self.shares,
            self.price,
            transaction_date,
            self.account_type.unwrap_or_default(),
        ))
    }
}

#[derive(Serialize)]
pub struct TransactionWithDividend {
    #[serde(flatten)]
    transaction: Transaction,
    latest_dividend: Option<DividendForecast>,
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    transactions: Vec<TransactionWithDividend>,
}

pub async fn list_portfolio(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<TransactionsResponse>> {
    let transactions = db::read::list_transactions(&state.pool, user.0).await?;

    let mut enriched = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        let latest_dividend = lookup_dividend(&state.pool, transaction.ticker()).await;
        enriched.push(TransactionWithDividend {
            transaction,
            latest_dividend,
        });
    }

    Ok(Json(TransactionsResponse {
        transactions: enriched,
    }))
}

#[derive(Serialize)]
pub struct CreatedResponse {
    id: i64,
}

pub async fn add_transaction(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Json(request): Json<NewTransactionRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let transaction = request.validate()?;
    let id = db::write::insert_transaction(&state.pool, user.0, &transaction).await?;
    tracing::debug!("user {} added transaction {}", user.0, id);
    Ok(Json(CreatedResponse { id }))
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    id: i64,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    success: bool,
}

pub async fn remove_transaction(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<Json<DeletedResponse>> {
    if db::write::delete_transaction(&state.pool, query.id, user.0).await? {
        Ok(Json(DeletedResponse { success: true }))
    } else {
        Err(ApiError::NotFound)
    }
}

#[derive(Serialize)]
pub struct HoldingsResponse {
    holdings: Vec<Holding>,
}

pub async fn get_holdings(
    State(state): State<Arc<AppState>>,
    user: UserId,
) -> ApiResult<Json<HoldingsResponse>> {
    let holdings = compute_holdings(&state.pool, user.0).await?;
    Ok(Json(HoldingsResponse { holdings }))
}

#[derive(Deserialize)]
pub struct DividendsQuery {
    #[serde(default)]
    mode: DistributionMode,
}

#[derive(Serialize)]
pub struct MonthView {
    month: u32,
    total: Decimal,
    entries: Vec<BucketEntry>,
}

#[derive(Serialize)]
pub struct MonthlyDividendsResponse {
    mode: DistributionMode,
    months: Vec<MonthView>,
}

pub async fn get_monthly_dividends(
    State(state): State<Arc<AppState>>,
    user: UserId,
    Query(query): Query<DividendsQuery>,
) -> ApiResult<Json<MonthlyDividendsResponse>> {
    let holdings = compute_holdings(&state.pool, user.0).await?;
    let buckets = monthly_distribution(&holdings, query.mode);

    let months = buckets
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| {
            let (total, entries) = bucket.into_parts();
            MonthView {
                month: index as u32 + 1,
                total,
                entries,
            }
        })
        .collect();

    Ok(Json(MonthlyDividendsResponse {
        mode: query.mode,
        months,
    }))
}

/// Fetches each distinct ticker's latest forecast once, then folds the ledger.
async fn compute_holdings(pool: &Pool<Sqlite>, user_id: i64) -> ApiResult<Vec<Holding>> {
    let transactions = db::read::list_transactions(pool, user_id).await?;

    let mut forecasts: HashMap<String, Option<DividendForecast>> = HashMap::new();
    for transaction in &transactions {
        if !forecasts.contains_key(transaction.ticker()) {
            let forecast = lookup_dividend(pool, transaction.ticker()).await;
            forecasts.insert(transaction.ticker().clone(), forecast);
        }
    }

    Ok(aggregate_holdings(transactions, |ticker| {
        forecasts.get(ticker).cloned().flatten()
    }))
}

/// A failed or empty lookup degrades to no dividend data, never an error.
async fn lookup_dividend(pool: &Pool<Sqlite>, ticker: &str) -> Option<DividendForecast> {
    match db::read::latest_dividend(pool, ticker).await {
        Ok(forecast) => forecast,
        Err(err) => {
            tracing::warn!("dividend lookup failed for {}: {:#}", ticker, err);
            None
        }
    }
}
