use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::AccountType;

/// Derived position per (ticker, account type). Never persisted; recomputed
/// from the full transaction history on every read.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct Holding {
    ticker: String,
    account_type: AccountType,
    total_shares: Decimal,
    average_price: Decimal,
    total_invested: Decimal,
    company_name: Option<String>,
    dividend_per_share: Decimal,
    rights_month: Option<u32>,
    payment_month: Option<u32>,
    projected_dividend: Decimal,
    net_dividend: Decimal,
}
