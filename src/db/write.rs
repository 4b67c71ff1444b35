use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Pool, Sqlite};

use crate::models::{DividendForecast, NewTransaction};

pub async fn insert_transaction(
    connection: &Pool<Sqlite>,
    user_id: i64,
    transaction: &NewTransaction,
) -> Result<i64> {
    let shares = transaction
        .shares()
        .round_dp(4)
        .to_f64()
        .with_context(|| "Failed to convert shares to f64")?;
    let price = transaction
        .price()
        .round_dp(4)
        .to_f64()
        .with_context(|| "Failed to convert price to f64")?;

    let id = sqlx::query(
        r#"
        INSERT INTO portfolio_transactions
        (user_id, ticker, shares, price, transaction_date, account_type)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(transaction.ticker())
    .bind(shares)
    .bind(price)
    .bind(transaction.transaction_date())
    .bind(transaction.account_type().to_string())
    .execute(connection)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Deletes one transaction scoped to its owner. Returns false when no row
/// matched, which covers both unknown ids and rows owned by someone else.
pub async fn delete_transaction(connection: &Pool<Sqlite>, id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM portfolio_transactions
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(connection)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn insert_dividend_forecast(
    connection: &Pool<Sqlite>,
    forecast: &DividendForecast,
) -> Result<i64> {
    let dividend_per_share = forecast
        .dividend_per_share()
        .round_dp(4)
        .to_f64()
        .with_context(|| "Failed to convert dividend_per_share to f64")?;

    let id = sqlx::query(
        r#"
        INSERT INTO dividend_forecasts
        (ticker, company_name, dividend_per_share, rights_month, payment_month)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(forecast.ticker())
    .bind(forecast.company_name())
    .bind(dividend_per_share)
    .bind((*forecast.rights_month()).map(|m| m as i64))
    .bind((*forecast.payment_month()).map(|m| m as i64))
    .execute(connection)
    .await?
    .last_insert_rowid();

    Ok(id)
}
