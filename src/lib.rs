// Fake Transactions - Core Library
// Baseline ledger generation + labeled irregularity injection, used by the CLI and tests

pub mod amount;
pub mod config;
pub mod export;
pub mod generator;
pub mod identity;
pub mod irregularities;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use amount::{benford_amount, benford_violation_amount, BENFORD_WEIGHTS};
pub use config::{
    ConfigError, Configuration, CumulativeSettings, IrregularityPlan, RecurringTemplate,
    CUMULATIVE_IRREGULARITY,
};
pub use export::{
    load_transactions, read_transactions, save_audit_trail, save_transactions,
    write_audit_trail, write_transactions,
};
pub use generator::{random_transaction_count, RandomGenerator, RecurringGenerator};
pub use identity::new_transaction_id;
pub use irregularities::{IrregularityEngine, IrregularityKind, RuleOutcome, UnknownIrregularity};
pub use model::{AuditEntry, Transaction, TransactionType};
pub use pipeline::{
    generate_baseline, generate_transactions, generate_transactions_with, GeneratedDataset,
    RunSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
