// 🔁 Recurring Generator - expand monthly templates across the date range

use super::random_account;
use crate::amount::round_cents;
use crate::config::Configuration;
use crate::identity::new_transaction_id;
use crate::model::{format_date, Transaction, TransactionType};
use chrono::Datelike;
use rand::Rng;

/// Multiplicative jitter applied to every occurrence
pub const JITTER_RANGE: (f64, f64) = (0.95, 1.05);

pub struct RecurringGenerator<'a> {
    config: &'a Configuration,
}

impl<'a> RecurringGenerator<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        RecurringGenerator { config }
    }

    /// One Payment per template per matching day-of-month in [start, end]
    ///
    /// Templates whose day does not exist in a month (e.g. 31 in April)
    /// simply do not fire that month.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        let templates = &self.config.recurring_transactions;
        if templates.is_empty() {
            return transactions;
        }

        let mut current = self.config.start_date;
        while current <= self.config.end_date {
            for template in templates.iter().filter(|t| t.day == current.day()) {
                let jitter = rng.gen_range(JITTER_RANGE.0..=JITTER_RANGE.1);
                transactions.push(Transaction {
                    id: new_transaction_id(rng),
                    date: format_date(current),
                    transaction_type: TransactionType::Payment,
                    amount: round_cents(template.amount * jitter),
                    account: random_account(rng),
                    description: template.description.clone(),
                    vendor: template.vendor.clone(),
                });
            }

            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        transactions
    }
}
