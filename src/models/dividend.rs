use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest known dividend forecast for a ticker, taken from the most recent
/// disclosure record. Months are calendar months 1..=12.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct DividendForecast {
    ticker: String,
    company_name: Option<String>,
    dividend_per_share: Decimal,
    rights_month: Option<u32>,
    payment_month: Option<u32>,
}
