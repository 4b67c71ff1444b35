use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::Holding;

/// Which calendar month a holding's dividend income is attributed to.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMode {
    /// Bucket by the month cash is disbursed.
    #[default]
    Payment,
    /// Bucket by the month the entitlement is fixed.
    Rights,
}

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct BucketEntry {
    ticker: String,
    company_name: Option<String>,
    amount: Decimal,
}

#[derive(Clone, Debug, Default, Getters, PartialEq, Serialize)]
pub struct MonthBucket {
    total: Decimal,
    entries: Vec<BucketEntry>,
}

impl MonthBucket {
    fn add(&mut self, entry: BucketEntry) {
        self.total += *entry.amount();
        self.entries.push(entry);
    }

    pub fn into_parts(self) -> (Decimal, Vec<BucketEntry>) {
        (self.total, self.entries)
    }
}

/// Buckets projected net dividend income into the 12 calendar months.
///
/// Each holding with at least one known month pays two equal installments of
/// half the net dividend, six months apart. Holdings with neither month known
/// contribute nothing. Recomputed from scratch whenever the holdings set or
/// the mode changes.
pub fn monthly_distribution(holdings: &[Holding], mode: DistributionMode) -> [MonthBucket; 12] {
    let mut buckets: [MonthBucket; 12] = Default::default();

    for holding in holdings {
        let Some(primary) = primary_month(mode, holding) else {
            continue;
        };
        let secondary = wrap_month(primary as i32 + 6);
        let installment = *holding.net_dividend() / dec!(2);

        for month in [primary, secondary] {
            buckets[(month - 1) as usize].add(BucketEntry::new(
                holding.ticker().clone(),
                holding.company_name().clone(),
                installment,
            ));
        }
    }

    buckets
}

fn primary_month(mode: DistributionMode, holding: &Holding) -> Option<u32> {
    match mode {
        // Payment typically trails the record date by about a quarter.
        DistributionMode::Payment => (*holding.payment_month())
            .or_else(|| (*holding.rights_month()).map(|m| wrap_month(m as i32 + 3))),
        DistributionMode::Rights => (*holding.rights_month())
            .or_else(|| (*holding.payment_month()).map(|m| wrap_month(m as i32 - 3))),
    }
}

fn wrap_month(month: i32) -> u32 {
    ((month - 1).rem_euclid(12) + 1) as u32
}
