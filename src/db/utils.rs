use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{AccountType, DividendForecast, Transaction};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    row.try_get::<f64, _>(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_optional_date_from_row(row: &SqliteRow, column: &str) -> Result<Option<NaiveDate>> {
    row.try_get::<Option<NaiveDate>, _>(column)
        .with_context(|| format!("Failed to parse date from column '{}'", column))
}

pub fn parse_datetime_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDateTime> {
    row.try_get::<NaiveDateTime, _>(column)
        .with_context(|| format!("Failed to parse datetime from column '{}'", column))
}

pub fn parse_optional_month_from_row(row: &SqliteRow, column: &str) -> Result<Option<u32>> {
    let value = row
        .try_get::<Option<i64>, _>(column)
        .with_context(|| format!("Failed to parse month from column '{}'", column))?;
    Ok(value.and_then(|m| u32::try_from(m).ok()).filter(|m| (1..=12).contains(m)))
}

pub fn parse_account_type_from_row(row: &SqliteRow, column: &str) -> Result<AccountType> {
    let type_str = parse_string_from_row(row, column)?;
    AccountType::from_str(&type_str)
        .with_context(|| format!("Failed to parse AccountType from column '{}'", column))
}

pub fn parse_transaction(row: &SqliteRow) -> Result<Transaction> {
    let id = parse_i64_from_row(row, "id")?;
    let user_id = parse_i64_from_row(row, "user_id")?;
    let ticker = parse_string_from_row(row, "ticker")?;
    let shares = parse_decimal_from_row(row, "shares")?;
    let price = parse_decimal_from_row(row, "price")?;
    let transaction_date = parse_optional_date_from_row(row, "transaction_date")?;
    let account_type = parse_account_type_from_row(row, "account_type")?;
    let created_at = parse_datetime_from_row(row, "created_at")?;

    Ok(Transaction::new(
        id,
        user_id,
        ticker,
        shares,
        price,
        transaction_date,
        account_type,
        created_at,
    ))
}

pub fn parse_dividend_forecast(row: &SqliteRow) -> Result<DividendForecast> {
    let ticker = parse_string_from_row(row, "ticker")?;
    let company_name = row
        .try_get::<Option<String>, _>("company_name")
        .with_context(|| "Failed to parse company_name")?;
    let dividend_per_share = parse_decimal_from_row(row, "dividend_per_share")?;
    let rights_month = parse_optional_month_from_row(row, "rights_month")?;
    let payment_month = parse_optional_month_from_row(row, "payment_month")?;

    Ok(DividendForecast::new(
        ticker,
        company_name,
        dividend_per_share,
        rights_month,
        payment_month,
    ))
}
