use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Ledger entry as stored. Positive shares are buys, negative shares sells.
#[derive(Clone, Debug, Getters, Serialize, new)]
pub struct Transaction {
    id: i64,
    user_id: i64,
    ticker: String,
    shares: Decimal,
    price: Decimal,
    transaction_date: Option<NaiveDate>,
    account_type: AccountType,
    created_at: NaiveDateTime,
}

impl Transaction {
    /// Sort key for folding; undated entries sort as the epoch.
    pub fn effective_date(&self) -> NaiveDate {
        self.transaction_date.unwrap_or_default()
    }
}

/// Validated input for a new ledger entry.
#[derive(Clone, Debug, Getters, new)]
pub struct NewTransaction {
    ticker: String,
    shares: Decimal,
    price: Decimal,
    transaction_date: Option<NaiveDate>,
    account_type: AccountType,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountType {
    #[default]
    General,
    Nisa,
}

impl AccountType {
    /// Japanese dividend withholding; NISA accounts are tax free.
    pub fn dividend_tax_rate(&self) -> Decimal {
        match self {
            AccountType::General => dec!(0.20315),
            AccountType::Nisa => Decimal::ZERO,
        }
    }
}
