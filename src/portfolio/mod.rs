pub mod dividends;
pub mod ledger;

pub use dividends::{BucketEntry, DistributionMode, MonthBucket, monthly_distribution};
pub use ledger::aggregate_holdings;
