// 🚨 Irregularity Engine - labeled mutations with an audit trail
// Catalog of 12 named rules dispatched under per-kind quotas, plus a
// threshold-bounded cumulative skimming pass

pub mod cumulative;
pub mod rules;

pub use cumulative::apply_cumulative_irregularity;
pub use rules::RuleOutcome;

use crate::config::{Configuration, IrregularityPlan};
use crate::model::{AuditEntry, Transaction};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// RULE CATALOG
// ============================================================================

/// IrregularityKind - the closed catalog of mutation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrregularityKind {
    HighAmount,
    FrequencyChange,
    DoubleSpend,
    MissingId,
    IncorrectDate,
    MismatchedDescription,
    WrongAccount,
    PersonalExpense,
    BenfordViolation,
    SubtleSkimming,
    SeasonalAnomaly,
    RoundNumberBias,
}

impl IrregularityKind {
    pub const ALL: [IrregularityKind; 12] = [
        IrregularityKind::HighAmount,
        IrregularityKind::FrequencyChange,
        IrregularityKind::DoubleSpend,
        IrregularityKind::MissingId,
        IrregularityKind::IncorrectDate,
        IrregularityKind::MismatchedDescription,
        IrregularityKind::WrongAccount,
        IrregularityKind::PersonalExpense,
        IrregularityKind::BenfordViolation,
        IrregularityKind::SubtleSkimming,
        IrregularityKind::SeasonalAnomaly,
        IrregularityKind::RoundNumberBias,
    ];

    /// Name used in configuration files and the audit table
    pub fn name(&self) -> &'static str {
        match self {
            IrregularityKind::HighAmount => "high_amount",
            IrregularityKind::FrequencyChange => "frequency_change",
            IrregularityKind::DoubleSpend => "double_spend",
            IrregularityKind::MissingId => "missing_id",
            IrregularityKind::IncorrectDate => "incorrect_date",
            IrregularityKind::MismatchedDescription => "mismatched_description",
            IrregularityKind::WrongAccount => "wrong_account",
            IrregularityKind::PersonalExpense => "personal_expense",
            IrregularityKind::BenfordViolation => "benford_violation",
            IrregularityKind::SubtleSkimming => "subtle_skimming",
            IrregularityKind::SeasonalAnomaly => "seasonal_anomaly",
            IrregularityKind::RoundNumberBias => "round_number_bias",
        }
    }

    /// Apply this rule at `index`
    ///
    /// Caller guarantees `index < transactions.len()`. Only `DoubleSpend`
    /// grows the collection; nothing ever removes a transaction.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        config: &Configuration,
        transactions: &mut Vec<Transaction>,
        index: usize,
        rng: &mut R,
    ) -> RuleOutcome {
        match self {
            IrregularityKind::HighAmount => rules::high_amount(transactions, index, rng),
            IrregularityKind::FrequencyChange => {
                rules::frequency_change(config, transactions, index, rng)
            }
            IrregularityKind::DoubleSpend => rules::double_spend(transactions, index, rng),
            IrregularityKind::MissingId => rules::missing_id(transactions, index),
            IrregularityKind::IncorrectDate => {
                rules::incorrect_date(config, transactions, index, rng)
            }
            IrregularityKind::MismatchedDescription => {
                rules::mismatched_description(transactions, index)
            }
            IrregularityKind::WrongAccount => rules::wrong_account(transactions, index, rng),
            IrregularityKind::PersonalExpense => {
                rules::personal_expense(config, transactions, index, rng)
            }
            IrregularityKind::BenfordViolation => {
                rules::benford_violation(transactions, index, rng)
            }
            IrregularityKind::SubtleSkimming => rules::subtle_skimming(transactions, index),
            IrregularityKind::SeasonalAnomaly => {
                rules::seasonal_anomaly(transactions, index, rng)
            }
            IrregularityKind::RoundNumberBias => rules::round_number_bias(transactions, index),
        }
    }
}

impl fmt::Display for IrregularityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned for names outside the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown irregularity type '{0}'")]
pub struct UnknownIrregularity(pub String);

impl FromStr for IrregularityKind {
    type Err = UnknownIrregularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IrregularityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownIrregularity(s.to_string()))
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct IrregularityEngine<'a> {
    config: &'a Configuration,
}

impl<'a> IrregularityEngine<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        IrregularityEngine { config }
    }

    /// Shuffled list of rule names to invoke, one entry per invocation
    ///
    /// Names are not validated here; unknown ones are skipped at dispatch.
    pub fn plan<R: Rng + ?Sized>(&self, baseline_len: usize, rng: &mut R) -> Vec<String> {
        let mut plan: Vec<String> = match &self.config.irregularities {
            IrregularityPlan::Quotas(quotas) => quotas
                .iter()
                .flat_map(|(name, &quota)| std::iter::repeat(name.clone()).take(quota as usize))
                .collect(),
            IrregularityPlan::Percentage { enabled, fraction } => {
                let invocations = (baseline_len as f64 * fraction).floor() as usize;
                (0..invocations)
                    .filter_map(|_| enabled.choose(rng).cloned())
                    .collect()
            }
        };
        plan.shuffle(rng);
        plan
    }

    /// Catalog pass: apply every planned invocation at a uniformly random index
    ///
    /// Returns one audit entry per applied invocation, in application order.
    /// The index is drawn against the current length, so duplicates appended
    /// by earlier `double_spend` invocations are eligible targets.
    pub fn apply_irregularities<R: Rng + ?Sized>(
        &self,
        transactions: &mut Vec<Transaction>,
        rng: &mut R,
    ) -> Vec<AuditEntry> {
        if self.config.irregularities.is_empty() {
            info!("no irregularities enabled; leaving baseline untouched");
            return Vec::new();
        }
        if transactions.is_empty() {
            warn!("no transactions to mutate; skipping irregularity injection");
            return Vec::new();
        }

        let plan = self.plan(transactions.len(), rng);
        let mut audit_trail = Vec::with_capacity(plan.len());

        for name in &plan {
            let kind = match name.parse::<IrregularityKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!("{}; skipping", e);
                    continue;
                }
            };

            let index = rng.gen_range(0..transactions.len());
            let outcome = kind.apply(self.config, transactions, index, rng);
            debug!(rule = kind.name(), index, "{}", outcome.description);

            audit_trail.push(AuditEntry::new(
                outcome.transaction_id,
                kind.name(),
                outcome.description,
            ));
        }

        info!(
            applied = audit_trail.len(),
            planned = plan.len(),
            "catalog irregularities injected"
        );
        audit_trail
    }

    /// Cumulative pass over the collection in its current (unsorted) order
    pub fn apply_cumulative<R: Rng + ?Sized>(
        &self,
        transactions: &mut [Transaction],
        rng: &mut R,
    ) -> Vec<AuditEntry> {
        apply_cumulative_irregularity(transactions, &self.config.cumulative, rng)
    }
}

// ============================================================================
// TESTS
// ============================================================================
