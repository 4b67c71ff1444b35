use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::models::{DividendForecast, Transaction};

use super::utils::{parse_dividend_forecast, parse_transaction};

/// Full ledger for one user in insertion order, which keeps the fold's
/// tie-break on equal dates stable.
pub async fn list_transactions(
    connection: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Transaction>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, ticker, shares, price, transaction_date, account_type, created_at
        FROM portfolio_transactions
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(connection)
    .await?;

    rows.iter().map(parse_transaction).collect()
}

/// Most recent dividend forecast for a ticker, if any was ever disclosed.
pub async fn latest_dividend(
    connection: &Pool<Sqlite>,
    ticker: &str,
) -> Result<Option<DividendForecast>> {
    let row = sqlx::query(
        r#"
        SELECT ticker, company_name, dividend_per_share, rights_month, payment_month
        FROM dividend_forecasts
        WHERE ticker = ?
        ORDER BY announced_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(ticker)
    .fetch_optional(connection)
    .await?;

    row.as_ref().map(parse_dividend_forecast).transpose()
}
