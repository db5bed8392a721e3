// 🚰 Pipeline - generate → inject → cumulative → sort
// One synchronous run over a single explicitly-passed random generator

use crate::config::{ConfigError, Configuration};
use crate::generator::{RandomGenerator, RecurringGenerator};
use crate::irregularities::IrregularityEngine;
use crate::model::{AuditEntry, Transaction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::info;

/// Output of one run: sorted transactions plus the audit trail
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDataset {
    /// Sorted ascending by the `date` string
    pub transactions: Vec<Transaction>,

    /// Catalog entries in application order, then cumulative entries
    pub audit_trail: Vec<AuditEntry>,
}

impl GeneratedDataset {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_dataset(self)
    }
}

/// Counts by category, printed by the CLI after a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub transaction_count: usize,
    pub irregularity_count: usize,
    pub by_transaction_type: BTreeMap<String, usize>,
    pub by_irregularity_type: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn from_dataset(dataset: &GeneratedDataset) -> Self {
        let mut summary = RunSummary {
            transaction_count: dataset.transactions.len(),
            irregularity_count: dataset.audit_trail.len(),
            ..Default::default()
        };
        for tx in &dataset.transactions {
            *summary
                .by_transaction_type
                .entry(tx.transaction_type.to_string())
                .or_insert(0) += 1;
        }
        for entry in &dataset.audit_trail {
            *summary
                .by_irregularity_type
                .entry(entry.irregularity_type.clone())
                .or_insert(0) += 1;
        }
        summary
    }
}

/// Recurring + random transactions, before any irregularity
pub fn generate_baseline<R: Rng + ?Sized>(
    config: &Configuration,
    rng: &mut R,
) -> Vec<Transaction> {
    let mut transactions = RecurringGenerator::new(config).generate(rng);
    let recurring = transactions.len();
    transactions.extend(RandomGenerator::new(config).generate(rng));
    info!(
        recurring,
        random = transactions.len() - recurring,
        "baseline generated"
    );
    transactions
}

/// Full run with the given generator
///
/// The configuration is validated first; nothing is generated when it is
/// invalid.
pub fn generate_transactions_with<R: Rng + ?Sized>(
    config: &Configuration,
    rng: &mut R,
) -> Result<GeneratedDataset, ConfigError> {
    config.validate()?;

    let mut transactions = generate_baseline(config, rng);

    let engine = IrregularityEngine::new(config);
    let mut audit_trail = engine.apply_irregularities(&mut transactions, rng);
    // Cumulative pass walks generation order, before sorting
    audit_trail.extend(engine.apply_cumulative(&mut transactions, rng));

    transactions.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(GeneratedDataset {
        transactions,
        audit_trail,
    })
}

/// Full run, seeded from `config.seed` (or entropy when unset)
pub fn generate_transactions(config: &Configuration) -> Result<GeneratedDataset, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_transactions_with(config, &mut rng)
}

// ============================================================================
// TESTS
// ============================================================================
