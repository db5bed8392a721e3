// 📈 Cumulative irregularity - gradual skimming bounded by a monetary threshold

use crate::amount::round_cents;
use crate::config::{CumulativeSettings, CUMULATIVE_IRREGULARITY};
use crate::model::{AuditEntry, Transaction};
use rand::Rng;
use tracing::{debug, info};

/// Range of the small increment added to each affected expense
pub const INCREMENT_RANGE: (f64, f64) = (1.0, 10.0);

/// Sum of Purchase/Payment amounts
pub fn expense_base(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Add small increments to expenses in collection order
///
/// Stops at whichever comes first: `count` affected transactions, or the
/// running total exceeding `expense_base * threshold`. The check happens
/// after each increment, so the total overshoots the threshold by at most
/// one increment.
pub fn apply_cumulative_irregularity<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    settings: &CumulativeSettings,
    rng: &mut R,
) -> Vec<AuditEntry> {
    let mut audit_trail = Vec::new();
    if !settings.enabled || transactions.is_empty() {
        return audit_trail;
    }

    let threshold = expense_base(transactions) * settings.threshold;
    let max_affected = settings.count.unwrap_or(usize::MAX);
    let probability = settings.probability;
    let mut running_total = 0.0;

    for tx in transactions.iter_mut() {
        if audit_trail.len() >= max_affected {
            break;
        }
        if !tx.is_expense() {
            continue;
        }
        let considered = if probability >= 1.0 {
            true
        } else if probability > 0.0 {
            rng.gen_bool(probability)
        } else {
            false
        };
        if !considered {
            continue;
        }

        let increment = round_cents(rng.gen_range(INCREMENT_RANGE.0..=INCREMENT_RANGE.1));
        let before = tx.amount;
        tx.amount = round_cents(tx.amount + increment);
        running_total += increment;

        audit_trail.push(AuditEntry::new(
            tx.id.clone(),
            CUMULATIVE_IRREGULARITY,
            format!(
                "Added {:.2} (amount {:.2} -> {:.2}); running total {:.2} of threshold {:.2}",
                increment, before, tx.amount, running_total, threshold
            ),
        ));

        if running_total > threshold {
            debug!(running_total, threshold, "cumulative threshold exceeded");
            break;
        }
    }

    info!(
        affected = audit_trail.len(),
        total = round_cents(running_total),
        threshold = round_cents(threshold),
        "cumulative irregularity injected"
    );
    audit_trail
}
