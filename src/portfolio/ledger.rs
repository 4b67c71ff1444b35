use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AccountType, DividendForecast, Holding, Transaction};

/// Running fold state for one (ticker, account type) key.
#[derive(Clone, Debug, Default)]
struct LedgerState {
    total_shares: Decimal,
    total_invested: Decimal,
    average_price: Decimal,
}

impl LedgerState {
    fn apply(&mut self, shares: Decimal, price: Decimal) {
        if shares > Decimal::ZERO {
            let new_shares = self.total_shares + shares;
            let new_invested = self.total_invested + shares * price;
            self.average_price = if new_shares.is_zero() {
                Decimal::ZERO
            } else {
                new_invested / new_shares
            };
            self.total_shares = new_shares;
            self.total_invested = new_invested;
        } else if shares < Decimal::ZERO {
            // Sells keep the average price; realized gains are out of scope.
            let sold = shares.abs();
            self.total_shares -= sold;
            if self.total_shares <= Decimal::ZERO {
                // Full exit; an oversell is clamped, not reported.
                *self = LedgerState::default();
            } else {
                self.total_invested = self.total_shares * self.average_price;
            }
        }
        // Zero-share entries are vacuous.
    }
}

/// Folds the full transaction history for one user into current holdings.
///
/// Transactions are sorted ascending by date before folding (missing dates
/// sort as the epoch; ties keep input order). Only keys left with a positive
/// share count materialize as holdings, enriched via `lookup`. A lookup miss
/// leaves the dividend fields at zero.
pub fn aggregate_holdings<F>(mut transactions: Vec<Transaction>, mut lookup: F) -> Vec<Holding>
where
    F: FnMut(&str) -> Option<DividendForecast>,
{
    transactions.sort_by_key(|tx| tx.effective_date());

    let mut states: HashMap<(String, AccountType), LedgerState> = HashMap::new();
    for tx in &transactions {
        states
            .entry((tx.ticker().clone(), *tx.account_type()))
            .or_default()
            .apply(*tx.shares(), *tx.price());
    }

    let mut holdings: Vec<Holding> = states
        .into_iter()
        .filter(|(_, state)| state.total_shares > Decimal::ZERO)
        .map(|((ticker, account_type), state)| {
            let forecast = lookup(&ticker);
            let (company_name, dividend_per_share, rights_month, payment_month) = match forecast {
                Some(f) => (
                    f.company_name().clone(),
                    *f.dividend_per_share(),
                    *f.rights_month(),
                    *f.payment_month(),
                ),
                None => (None, Decimal::ZERO, None, None),
            };
            let projected_dividend = state.total_shares * dividend_per_share;
            let net_dividend =
                projected_dividend * (Decimal::ONE - account_type.dividend_tax_rate());
            Holding::new(
                ticker,
                account_type,
                state.total_shares,
                state.average_price,
                state.total_invested,
                company_name,
                dividend_per_share,
                rights_month,
                payment_month,
                projected_dividend,
                net_dividend,
            )
        })
        .collect();

    holdings.sort_by(|a, b| {
        a.ticker()
            .cmp(b.ticker())
            .then(a.account_type().cmp(b.account_type()))
    });

    holdings
}
