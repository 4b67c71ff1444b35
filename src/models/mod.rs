pub mod dividend;
pub mod holding;
pub mod transaction;

pub use dividend::DividendForecast;
pub use holding::Holding;
pub use transaction::{AccountType, NewTransaction, Transaction};
