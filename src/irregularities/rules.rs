// 🧪 Mutation rules - one function per catalog entry
// Each rule mutates in place and reports what changed

use crate::amount::{
    benford_violation_amount, leading_digit, round_cents, round_hundreds, truncate_cents,
};
use crate::config::{Configuration, DEFAULT_PERSONAL_DESCRIPTION, DEFAULT_PERSONAL_VENDOR};
use crate::identity::new_transaction_id;
use crate::model::{format_date, Transaction, TransactionType};
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;

pub const HIGH_AMOUNT_RANGE: (f64, f64) = (50_000.0, 100_000.0);
pub const PERSONAL_AMOUNT_RANGE: (f64, f64) = (100.0, 5_000.0);
pub const SEASONAL_AMOUNT_RANGE: (f64, f64) = (5_000.0, 10_000.0);
pub const SEASONAL_DESCRIPTION: &str = "Summer Equipment Purchase";
/// Months in which a summer purchase looks out of place
pub const WINTER_MONTHS: [u32; 3] = [1, 2, 12];
pub const SKIMMING_WINDOW: usize = 10;
pub const SKIMMING_FACTOR: f64 = 0.99;

/// What a rule did: the affected id (as mutated) and a readable summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub transaction_id: String,
    pub description: String,
}

impl RuleOutcome {
    fn new(transaction_id: &str, description: String) -> Self {
        RuleOutcome {
            transaction_id: transaction_id.to_string(),
            description,
        }
    }
}

fn set_amount(tx: &mut Transaction, amount: f64) -> String {
    let before = tx.amount;
    tx.amount = amount;
    format!("Amount changed from {:.2} to {:.2}", before, amount)
}

pub fn high_amount<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    let amount = round_cents(rng.gen_range(HIGH_AMOUNT_RANGE.0..=HIGH_AMOUNT_RANGE.1));
    let description = set_amount(tx, amount);
    RuleOutcome::new(&tx.id, description)
}

/// Move a recurring payment to another day of the same month
pub fn frequency_change<R: Rng + ?Sized>(
    config: &Configuration,
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    let is_recurring = config
        .recurring_transactions
        .iter()
        .any(|t| tx.description.contains(&t.description));

    // `YYYY-MM-` prefix; anything shorter has already been mangled
    let prefix = match tx.date.get(..8) {
        Some(prefix) if is_recurring => prefix.to_string(),
        _ => {
            return RuleOutcome::new(
                &tx.id,
                "Not a recurring transaction; no change".to_string(),
            )
        }
    };

    let before = tx.date.clone();
    tx.date = format!("{}{:02}", prefix, rng.gen_range(1..=28));
    RuleOutcome::new(
        &tx.id,
        format!("Recurring date shifted from {} to {}", before, tx.date),
    )
}

/// Append a copy with a fresh id, timestamped 1-60 minutes after midnight
pub fn double_spend<R: Rng + ?Sized>(
    transactions: &mut Vec<Transaction>,
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let original = &transactions[index];
    let mut duplicate = original.clone();
    duplicate.id = new_transaction_id(rng);

    let minutes = rng.gen_range(1..=60);
    if let Some(midnight) = original.calendar_date().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        let stamp = midnight + Duration::minutes(minutes);
        duplicate.date = stamp.format("%Y-%m-%d %H:%M").to_string();
    }

    let description = format!(
        "Duplicate of {} created as {} dated {}",
        original.id, duplicate.id, duplicate.date
    );
    let outcome = RuleOutcome::new(&duplicate.id, description);
    transactions.push(duplicate);
    outcome
}

pub fn missing_id(transactions: &mut [Transaction], index: usize) -> RuleOutcome {
    let tx = &mut transactions[index];
    let before = std::mem::take(&mut tx.id);
    RuleOutcome::new(&tx.id, format!("Transaction ID {} removed", before))
}

/// Push the date 1-30 days past the end of the configured range
pub fn incorrect_date<R: Rng + ?Sized>(
    config: &Configuration,
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    let future = config.end_date + Duration::days(rng.gen_range(1..=30));
    let before = std::mem::replace(&mut tx.date, format_date(future));
    RuleOutcome::new(
        &tx.id,
        format!("Date changed from {} to {}", before, tx.date),
    )
}

pub fn mismatched_description(transactions: &mut [Transaction], index: usize) -> RuleOutcome {
    let tx = &mut transactions[index];
    let replacement = match tx.transaction_type {
        TransactionType::Deposit => "Withdrawal - Miscellaneous",
        TransactionType::Withdrawal => "Deposit - Miscellaneous",
        other => {
            return RuleOutcome::new(
                &tx.id,
                format!("{} has no opposite description; no change", other),
            )
        }
    };

    let before = std::mem::replace(&mut tx.description, replacement.to_string());
    RuleOutcome::new(
        &tx.id,
        format!("Description changed from '{}' to '{}'", before, replacement),
    )
}

pub fn wrong_account<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    let account = format!("WRONG-{}", rng.gen_range(100..=999));
    let before = std::mem::replace(&mut tx.account, account);
    RuleOutcome::new(
        &tx.id,
        format!("Account changed from {} to {}", before, tx.account),
    )
}

pub fn personal_expense<R: Rng + ?Sized>(
    config: &Configuration,
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let vendor = config
        .personal_vendors
        .choose(rng)
        .map_or(DEFAULT_PERSONAL_VENDOR, String::as_str)
        .to_string();
    let description = config
        .personal_expense_descriptions
        .choose(rng)
        .map_or(DEFAULT_PERSONAL_DESCRIPTION, String::as_str)
        .to_string();
    let amount = round_cents(rng.gen_range(PERSONAL_AMOUNT_RANGE.0..=PERSONAL_AMOUNT_RANGE.1));

    let tx = &mut transactions[index];
    let before_vendor = std::mem::replace(&mut tx.vendor, vendor);
    let before_description = std::mem::replace(&mut tx.description, description);
    let amount_change = set_amount(tx, amount);
    RuleOutcome::new(
        &tx.id,
        format!(
            "Vendor changed from '{}' to '{}', description from '{}' to '{}'; {}",
            before_vendor, tx.vendor, before_description, tx.description, amount_change
        ),
    )
}

/// Amount with a leading 5 or 6, in the thousands
pub fn benford_violation<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    // truncate, not round: 6999.999 must not become 7000.00
    let amount = truncate_cents(benford_violation_amount(rng) * 1000.0);
    let mut description = set_amount(tx, amount);
    if let Some(digit) = leading_digit(amount) {
        description.push_str(&format!(" (leading digit {})", digit));
    }
    RuleOutcome::new(&tx.id, description)
}

/// Shave 1% off up to SKIMMING_WINDOW consecutive transactions
pub fn subtle_skimming(transactions: &mut [Transaction], index: usize) -> RuleOutcome {
    let end = (index + SKIMMING_WINDOW).min(transactions.len());
    let changes: Vec<String> = transactions[index..end]
        .iter_mut()
        .map(|tx| {
            let before = tx.amount;
            tx.amount = round_cents(tx.amount * SKIMMING_FACTOR);
            format!("{}: {:.2} -> {:.2}", tx.id, before, tx.amount)
        })
        .collect();

    RuleOutcome::new(
        &transactions[index].id,
        format!(
            "Skimmed 1% from {} transactions ({})",
            changes.len(),
            changes.join("; ")
        ),
    )
}

pub fn seasonal_anomaly<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    index: usize,
    rng: &mut R,
) -> RuleOutcome {
    let tx = &mut transactions[index];
    let in_winter = tx.month().is_some_and(|m| WINTER_MONTHS.contains(&m));
    if !in_winter {
        return RuleOutcome::new(&tx.id, "Not a winter-month transaction; no change".to_string());
    }

    let before = std::mem::replace(&mut tx.description, SEASONAL_DESCRIPTION.to_string());
    let amount = round_cents(rng.gen_range(SEASONAL_AMOUNT_RANGE.0..=SEASONAL_AMOUNT_RANGE.1));
    let amount_change = set_amount(tx, amount);
    RuleOutcome::new(
        &tx.id,
        format!(
            "Description changed from '{}' to '{}'; {}",
            before, SEASONAL_DESCRIPTION, amount_change
        ),
    )
}

pub fn round_number_bias(transactions: &mut [Transaction], index: usize) -> RuleOutcome {
    let tx = &mut transactions[index];
    let amount = round_hundreds(tx.amount);
    let description = set_amount(tx, amount);
    RuleOutcome::new(&tx.id, description)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecurringTemplate;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config() -> Configuration {
        Configuration::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .with_recurring(vec![RecurringTemplate::new(15, 1000.0, "Rent", "Landlord")])
    }

    fn tx(id: &str, date: &str, transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            transaction_type,
            amount,
            account: "ACCT-4242".to_string(),
            description: format!("{} - Services", transaction_type),
            vendor: "Acme".to_string(),
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    #[test]
    fn test_high_amount() {
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        let outcome = high_amount(&mut txs, 0, &mut rng());

        assert!(txs[0].amount >= 50_000.0 && txs[0].amount <= 100_000.0);
        assert_eq!(outcome.transaction_id, "a");
        assert!(outcome.description.starts_with("Amount changed from 10.00 to "));
    }

    #[test]
    fn test_frequency_change_on_recurring() {
        let mut recurring = tx("r", "2024-02-15", TransactionType::Payment, 1000.0);
        recurring.description = "Rent".to_string();
        let mut txs = vec![recurring];
        frequency_change(&config(), &mut txs, 0, &mut rng());

        let date = txs[0].calendar_date().unwrap();
        assert!(txs[0].date.starts_with("2024-02-"));
        assert!((1..=28).contains(&chrono::Datelike::day(&date)));
    }

    #[test]
    fn test_frequency_change_ignores_non_recurring() {
        let mut txs = vec![tx("a", "2024-02-15", TransactionType::Purchase, 99.0)];
        let before = txs.clone();
        let outcome = frequency_change(&config(), &mut txs, 0, &mut rng());

        assert_eq!(txs, before);
        assert!(outcome.description.contains("no change"));
    }

    #[test]
    fn test_double_spend() {
        let mut txs = vec![tx("a", "2024-03-09", TransactionType::Purchase, 42.0)];
        let outcome = double_spend(&mut txs, 0, &mut rng());

        assert_eq!(txs.len(), 2);
        let dup = &txs[1];
        assert_ne!(dup.id, "a");
        assert_eq!(outcome.transaction_id, dup.id);
        assert!(dup.date.starts_with("2024-03-09 00:") || dup.date == "2024-03-09 01:00");
        assert_eq!(dup.date.len(), 16);
        assert_eq!(dup.amount, 42.0);
        assert_eq!(txs[0].date, "2024-03-09");
    }

    #[test]
    fn test_missing_id() {
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        let outcome = missing_id(&mut txs, 0);

        assert!(txs[0].id.is_empty());
        assert!(outcome.transaction_id.is_empty());
        assert!(outcome.description.contains("a"));
    }

    #[test]
    fn test_incorrect_date_is_after_range() {
        let config = config();
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        incorrect_date(&config, &mut txs, 0, &mut rng());

        let date = txs[0].calendar_date().unwrap();
        assert!(date > config.end_date);
        assert!(date <= config.end_date + Duration::days(30));
    }

    #[test]
    fn test_mismatched_description() {
        let mut txs = vec![
            tx("d", "2024-01-05", TransactionType::Deposit, 10.0),
            tx("w", "2024-01-05", TransactionType::Withdrawal, 10.0),
            tx("t", "2024-01-05", TransactionType::Transfer, 10.0),
        ];
        mismatched_description(&mut txs, 0);
        mismatched_description(&mut txs, 1);
        let outcome = mismatched_description(&mut txs, 2);

        assert_eq!(txs[0].description, "Withdrawal - Miscellaneous");
        assert_eq!(txs[1].description, "Deposit - Miscellaneous");
        assert_eq!(txs[2].description, "Transfer - Services");
        assert!(outcome.description.contains("no change"));
    }

    #[test]
    fn test_wrong_account() {
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        wrong_account(&mut txs, 0, &mut rng());

        let digits = txs[0].account.strip_prefix("WRONG-").unwrap();
        assert_eq!(digits.len(), 3);
    }

    #[test]
    fn test_personal_expense_uses_pools() {
        let mut config = config();
        config.personal_vendors = vec!["Spa".to_string()];
        config.personal_expense_descriptions = vec!["Massage".to_string()];
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        personal_expense(&config, &mut txs, 0, &mut rng());

        assert_eq!(txs[0].vendor, "Spa");
        assert_eq!(txs[0].description, "Massage");
        assert!(txs[0].amount >= 100.0 && txs[0].amount <= 5000.0);
    }

    #[test]
    fn test_personal_expense_defaults_when_unconfigured() {
        let mut config = config();
        config.personal_vendors.clear();
        config.personal_expense_descriptions.clear();
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
        personal_expense(&config, &mut txs, 0, &mut rng());

        assert_eq!(txs[0].vendor, DEFAULT_PERSONAL_VENDOR);
        assert_eq!(txs[0].description, DEFAULT_PERSONAL_DESCRIPTION);
    }

    #[test]
    fn test_benford_violation_leading_digit() {
        let mut rng = rng();
        for _ in 0..500 {
            let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 10.0)];
            let outcome = benford_violation(&mut txs, 0, &mut rng);
            let digit = leading_digit(txs[0].amount).unwrap();
            assert!(digit == 5 || digit == 6, "amount {}", txs[0].amount);
            assert!(txs[0].amount >= 5000.0 && txs[0].amount < 7000.0);
            assert!(outcome
                .description
                .ends_with(&format!("(leading digit {})", digit)));
        }
    }

    #[test]
    fn test_subtle_skimming_window() {
        let mut txs: Vec<Transaction> = (0..15)
            .map(|i| tx(&format!("t{}", i), "2024-01-05", TransactionType::Purchase, 100.0))
            .collect();
        let outcome = subtle_skimming(&mut txs, 2);

        assert_eq!(outcome.transaction_id, "t2");
        assert!(outcome.description.contains("10 transactions"));
        for (i, t) in txs.iter().enumerate() {
            let expected = if (2..12).contains(&i) { 99.0 } else { 100.0 };
            assert_eq!(t.amount, expected, "index {}", i);
        }
    }

    #[test]
    fn test_subtle_skimming_near_end() {
        let mut txs: Vec<Transaction> = (0..5)
            .map(|i| tx(&format!("t{}", i), "2024-01-05", TransactionType::Purchase, 100.0))
            .collect();
        let outcome = subtle_skimming(&mut txs, 3);

        assert!(outcome.description.contains("2 transactions"));
        assert_eq!(txs[2].amount, 100.0);
        assert_eq!(txs[4].amount, 99.0);
    }

    #[test]
    fn test_seasonal_anomaly_in_winter() {
        let mut txs = vec![tx("a", "2024-12-05", TransactionType::Purchase, 10.0)];
        seasonal_anomaly(&mut txs, 0, &mut rng());

        assert_eq!(txs[0].description, SEASONAL_DESCRIPTION);
        assert!(txs[0].amount >= 5000.0 && txs[0].amount <= 10000.0);
    }

    #[test]
    fn test_seasonal_anomaly_outside_winter() {
        let mut txs = vec![tx("a", "2024-07-05", TransactionType::Purchase, 10.0)];
        let before = txs.clone();
        let outcome = seasonal_anomaly(&mut txs, 0, &mut rng());

        assert_eq!(txs, before);
        assert!(outcome.description.contains("no change"));
    }

    #[test]
    fn test_round_number_bias() {
        let mut txs = vec![tx("a", "2024-01-05", TransactionType::Purchase, 4321.99)];
        let outcome = round_number_bias(&mut txs, 0);

        assert_eq!(txs[0].amount, 4300.0);
        assert_eq!(outcome.description, "Amount changed from 4321.99 to 4300.00");
    }
}
