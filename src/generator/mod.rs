// 🏭 Generators - baseline transaction set
// Recurring templates first, then random transactions to fill the target count

pub mod random;
pub mod recurring;

pub use random::{random_transaction_count, RandomGenerator};
pub use recurring::RecurringGenerator;

use rand::Rng;

/// Account reference of the form `ACCT-<4 digits>`
pub fn random_account<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("ACCT-{}", rng.gen_range(1000..=9999))
}
