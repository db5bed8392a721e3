// 🎲 Random Generator - fill the remainder of the target count

use super::random_account;
use crate::amount::{benford_amount, round_cents};
use crate::config::Configuration;
use crate::identity::new_transaction_id;
use crate::model::{format_date, Transaction, TransactionType};
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Description suffixes for random transactions
pub const DESCRIPTION_CATEGORIES: [&str; 4] =
    ["Office Supplies", "Equipment", "Services", "Miscellaneous"];

/// Scale applied to Benford amounts in [1, 10)
pub const AMOUNT_SCALE: f64 = 1000.0;

/// Number of random transactions to add on top of the recurring ones
///
/// Heuristic: `target - templates * (days / 30)` with integer division.
/// It approximates how many recurring occurrences already exist and does
/// not guarantee an exact total. A negative result is clamped to zero.
pub fn random_transaction_count(config: &Configuration) -> usize {
    let templates = config.recurring_transactions.len() as i64;
    let estimated_recurring = templates * (config.date_range_days() / 30);
    let count = config.num_transactions as i64 - estimated_recurring;

    if count < 0 {
        warn!(
            target_count = config.num_transactions,
            estimated_recurring,
            "recurring templates exceed the target count; adding no random transactions"
        );
        return 0;
    }
    count as usize
}

pub struct RandomGenerator<'a> {
    config: &'a Configuration,
}

impl<'a> RandomGenerator<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        RandomGenerator { config }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Transaction> {
        let count = random_transaction_count(self.config);
        let days = self.config.date_range_days();
        let vendors = self.config.vendor_pool();

        (0..count)
            .map(|_| {
                let offset = rng.gen_range(0..=days);
                let date = self.config.start_date + Duration::days(offset);
                let transaction_type = *TransactionType::ALL
                    .choose(rng)
                    .unwrap_or(&TransactionType::Purchase);
                let amount = round_cents(benford_amount(rng) * AMOUNT_SCALE);
                let account = random_account(rng);
                let vendor = vendors.choose(rng).cloned().unwrap_or_default();
                let category = DESCRIPTION_CATEGORIES
                    .choose(rng)
                    .copied()
                    .unwrap_or("Miscellaneous");

                Transaction {
                    id: new_transaction_id(rng),
                    date: format_date(date),
                    transaction_type,
                    amount,
                    account,
                    description: format!("{} - {}", transaction_type, category),
                    vendor,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecurringTemplate, DEFAULT_VENDOR};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn january() -> Configuration {
        Configuration::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_count_heuristic() {
        let config = january()
            .with_num_transactions(50)
            .with_recurring(vec![RecurringTemplate::new(15, 1000.0, "Rent", "Landlord")]);
        // 30 days / 30 = 1 estimated occurrence
        assert_eq!(random_transaction_count(&config), 49);

        let year = Configuration::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .with_num_transactions(100)
        .with_recurring(vec![
            RecurringTemplate::new(1, 1.0, "A", "A"),
            RecurringTemplate::new(2, 1.0, "B", "B"),
        ]);
        // 365 / 30 = 12 per template
        assert_eq!(random_transaction_count(&year), 76);
    }

    #[test]
    fn test_count_clamped_at_zero() {
        let config = Configuration::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .with_num_transactions(5)
        .with_recurring(vec![RecurringTemplate::new(1, 1.0, "A", "A")]);

        assert_eq!(random_transaction_count(&config), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(RandomGenerator::new(&config).generate(&mut rng).is_empty());
    }

    #[test]
    fn test_generated_fields_are_valid() {
        let config = january()
            .with_num_transactions(500)
            .with_vendors(vec!["Acme".to_string(), "Globex".to_string()]);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let txs = RandomGenerator::new(&config).generate(&mut rng);

        assert_eq!(txs.len(), 500);
        for tx in &txs {
            let date = tx.calendar_date().expect("valid date");
            assert!(date >= config.start_date && date <= config.end_date);
            assert_eq!(tx.date.len(), 10);
            assert!(tx.amount >= 1000.0 && tx.amount <= 10000.0, "amount {}", tx.amount);
            assert!(tx.account.starts_with("ACCT-"));
            assert!(tx.vendor == "Acme" || tx.vendor == "Globex");

            let (prefix, category) = tx.description.split_once(" - ").unwrap();
            assert_eq!(prefix, tx.transaction_type.name());
            assert!(DESCRIPTION_CATEGORIES.contains(&category));
            assert!(!tx.id.is_empty());
        }
    }

    #[test]
    fn test_fallback_vendor() {
        let config = january().with_num_transactions(20);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let txs = RandomGenerator::new(&config).generate(&mut rng);
        assert!(txs.iter().all(|t| t.vendor == DEFAULT_VENDOR));
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let config = Configuration::new(day, day).with_num_transactions(10);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let txs = RandomGenerator::new(&config).generate(&mut rng);
        assert_eq!(txs.len(), 10);
        assert!(txs.iter().all(|t| t.date == "2024-06-01"));
    }
}
