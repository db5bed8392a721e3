// 📒 Data Model - Transactions and the audit trail
// Records produced by the generators and mutated by the irregularity engine

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// TransactionType - closed set of transaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    Purchase,
    Payment,
    Transfer,
    Deposit,
    Withdrawal,
}

impl TransactionType {
    /// Every variant, in declaration order (uniform draws pick from this)
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Purchase,
        TransactionType::Payment,
        TransactionType::Transfer,
        TransactionType::Deposit,
        TransactionType::Withdrawal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "Purchase",
            TransactionType::Payment => "Payment",
            TransactionType::Transfer => "Transfer",
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
        }
    }

    /// Purchases and payments make up the expense base
    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionType::Purchase | TransactionType::Payment)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// Transaction - one row of the generated ledger
///
/// Generators always populate every field with valid values. The irregularity
/// engine is free to break any of them afterwards (empty id, future date,
/// date with a time component, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (empty string once `missing_id` has been applied)
    #[serde(rename = "Transaction ID")]
    pub id: String,

    /// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM` for double-spend duplicates
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Type")]
    pub transaction_type: TransactionType,

    /// Signed amount, two decimals by convention
    #[serde(rename = "Amount", serialize_with = "serialize_cents")]
    pub amount: f64,

    #[serde(rename = "Account")]
    pub account: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Vendor")]
    pub vendor: String,
}

fn serialize_cents<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", amount))
}

impl Transaction {
    /// Calendar date part of `date`, ignoring any time-of-day suffix
    ///
    /// Returns None when the date has been mangled beyond `YYYY-MM-DD`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day_part = self.date.get(..10)?;
        NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
    }

    /// Month number (1-12) of the transaction date
    pub fn month(&self) -> Option<u32> {
        self.calendar_date().map(|d| d.month())
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type.is_expense()
    }
}

/// Format a date the way every generated transaction stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// AUDIT ENTRY
// ============================================================================

/// AuditEntry - one record per applied mutation
///
/// Immutable once created; the audit trail keeps them in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Id of the affected transaction, as it reads after the mutation
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,

    /// Rule name, e.g. `high_amount` or `cumulative_irregularity`
    #[serde(rename = "Irregularity Type")]
    pub irregularity_type: String,

    /// Human-readable summary with before/after values
    #[serde(rename = "Description")]
    pub description: String,
}

impl AuditEntry {
    pub fn new(
        transaction_id: impl Into<String>,
        irregularity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        AuditEntry {
            transaction_id: transaction_id.into(),
            irregularity_type: irregularity_type.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
