// ⚙️ Configuration - parsed before any generation starts
// JSON document → validated Configuration (dates, templates, pools, irregularity plan)

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_NUM_TRANSACTIONS: usize = 1000;
pub const DEFAULT_VENDOR: &str = "Default Vendor";
pub const DEFAULT_PERSONAL_VENDOR: &str = "Personal Vendor";
pub const DEFAULT_PERSONAL_DESCRIPTION: &str = "Personal Expense";
pub const DEFAULT_CUMULATIVE_THRESHOLD: f64 = 0.005;
pub const DEFAULT_IRREGULARITY_PERCENTAGE: f64 = 0.05;
/// Per-transaction probability for the cumulative pass in percentage mode
pub const DEFAULT_PERCENTAGE_CUMULATIVE_PROBABILITY: f64 = 0.1;

/// Rule name reserved for the cumulative pass
pub const CUMULATIVE_IRREGULARITY: &str = "cumulative_irregularity";

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// ERRORS
// ============================================================================

/// Fatal configuration problems. Nothing is generated when one of these occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`{field}` is not a YYYY-MM-DD date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("start_date {start} is after end_date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("`{field}` {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ============================================================================
// CONFIGURATION TYPES
// ============================================================================

/// Recurring payment fired on `day` of every month in the range
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecurringTemplate {
    /// Day of month (a template for day 31 skips shorter months)
    pub day: u32,
    pub amount: f64,
    pub description: String,
    pub vendor: String,
}

impl RecurringTemplate {
    pub fn new(day: u32, amount: f64, description: &str, vendor: &str) -> Self {
        RecurringTemplate {
            day,
            amount,
            description: description.to_string(),
            vendor: vendor.to_string(),
        }
    }
}

/// Settings for the threshold-bounded cumulative skimming pass
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CumulativeSettings {
    pub enabled: bool,

    /// Max transactions touched (None = bounded by threshold only)
    pub count: Option<usize>,

    /// Fraction of the expense base the running total may reach
    pub threshold: f64,

    /// Chance each Purchase/Payment is considered (1.0 = every one)
    pub probability: f64,
}

impl Default for CumulativeSettings {
    fn default() -> Self {
        CumulativeSettings {
            enabled: false,
            count: None,
            threshold: DEFAULT_CUMULATIVE_THRESHOLD,
            probability: 1.0,
        }
    }
}

impl CumulativeSettings {
    pub fn enabled(count: Option<usize>, threshold: f64) -> Self {
        CumulativeSettings {
            enabled: true,
            count,
            threshold,
            ..Default::default()
        }
    }
}

/// How many times each catalog rule fires
#[derive(Debug, Clone, PartialEq)]
pub enum IrregularityPlan {
    /// Rule name → exact number of invocations. Names are kept raw so
    /// unknown ones reach the engine, which warns and skips them.
    Quotas(BTreeMap<String, u32>),

    /// floor(baseline size × fraction) invocations, each picking a rule
    /// uniformly from `enabled`
    Percentage { enabled: Vec<String>, fraction: f64 },
}

impl Default for IrregularityPlan {
    fn default() -> Self {
        IrregularityPlan::Quotas(BTreeMap::new())
    }
}

impl IrregularityPlan {
    /// True when no catalog rule can fire
    pub fn is_empty(&self) -> bool {
        match self {
            IrregularityPlan::Quotas(quotas) => quotas.values().all(|&q| q == 0),
            IrregularityPlan::Percentage { enabled, fraction } => {
                enabled.is_empty() || *fraction <= 0.0
            }
        }
    }
}

/// Configuration - everything the core needs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// First day of the range (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the range (inclusive)
    pub end_date: NaiveDate,

    pub recurring_transactions: Vec<RecurringTemplate>,

    /// Target size of the baseline (approximate, see RandomGenerator)
    pub num_transactions: usize,

    /// Vendor pool for random transactions (empty → DEFAULT_VENDOR)
    pub vendors: Vec<String>,

    pub personal_vendors: Vec<String>,
    pub personal_expense_descriptions: Vec<String>,

    pub irregularities: IrregularityPlan,
    pub cumulative: CumulativeSettings,

    /// Seed for reproducible runs (None = fresh entropy)
    pub seed: Option<u64>,
}

impl Configuration {
    /// Configuration with defaults for everything but the date range
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Configuration {
            start_date,
            end_date,
            recurring_transactions: Vec::new(),
            num_transactions: DEFAULT_NUM_TRANSACTIONS,
            vendors: Vec::new(),
            personal_vendors: vec![DEFAULT_PERSONAL_VENDOR.to_string()],
            personal_expense_descriptions: vec![DEFAULT_PERSONAL_DESCRIPTION.to_string()],
            irregularities: IrregularityPlan::default(),
            cumulative: CumulativeSettings::default(),
            seed: None,
        }
    }

    /// Load and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: ConfigFile = serde_json::from_str(json)?;
        raw.into_configuration()
    }

    /// Builder pattern: add recurring templates
    pub fn with_recurring(mut self, templates: Vec<RecurringTemplate>) -> Self {
        self.recurring_transactions = templates;
        self
    }

    /// Builder pattern: set the baseline target size
    pub fn with_num_transactions(mut self, num_transactions: usize) -> Self {
        self.num_transactions = num_transactions;
        self
    }

    /// Builder pattern: set the vendor pool
    pub fn with_vendors(mut self, vendors: Vec<String>) -> Self {
        self.vendors = vendors;
        self
    }

    /// Builder pattern: set a quota (switches to quota mode if needed)
    pub fn with_quota(mut self, rule: &str, quota: u32) -> Self {
        if let IrregularityPlan::Percentage { .. } = self.irregularities {
            self.irregularities = IrregularityPlan::default();
        }
        if let IrregularityPlan::Quotas(quotas) = &mut self.irregularities {
            quotas.insert(rule.to_string(), quota);
        }
        self
    }

    /// Builder pattern: configure the cumulative pass
    pub fn with_cumulative(mut self, cumulative: CumulativeSettings) -> Self {
        self.cumulative = cumulative;
        self
    }

    /// Builder pattern: fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whole days between start and end (0 for a single-day range)
    pub fn date_range_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Vendor pool with the single fallback vendor substituted when empty
    pub fn vendor_pool(&self) -> Vec<String> {
        if self.vendors.is_empty() {
            vec![DEFAULT_VENDOR.to_string()]
        } else {
            self.vendors.clone()
        }
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let threshold = self.cumulative.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "cumulative_irregularity.threshold",
                reason: format!("must be a non-negative fraction, got {}", threshold),
            });
        }

        let probability = self.cumulative.probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidValue {
                field: "cumulative_irregularity.probability",
                reason: format!("must be within [0, 1], got {}", probability),
            });
        }

        if let IrregularityPlan::Percentage { fraction, .. } = &self.irregularities {
            if !fraction.is_finite() || *fraction < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "irregularity_percentage",
                    reason: format!("must be a non-negative fraction, got {}", fraction),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// RAW DOCUMENT
// ============================================================================

#[derive(Debug, Deserialize)]
struct ConfigFile {
    start_date: Option<String>,
    end_date: Option<String>,

    #[serde(default = "default_num_transactions")]
    num_transactions: usize,

    #[serde(default)]
    vendors: Vec<String>,

    #[serde(default)]
    recurring_transactions: Vec<RecurringTemplate>,

    personal_vendors: Option<Vec<String>>,
    personal_expense_descriptions: Option<Vec<String>>,

    /// Quota mode
    irregularities: Option<QuotaSection>,

    /// Percentage mode
    #[serde(default)]
    enabled_irregularities: Vec<String>,

    #[serde(default = "default_irregularity_percentage")]
    irregularity_percentage: f64,

    #[serde(default = "default_cumulative_threshold")]
    cumulative_threshold: f64,

    #[serde(default = "default_cumulative_probability")]
    cumulative_probability: f64,

    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct QuotaSection {
    #[serde(default)]
    cumulative_irregularity: CumulativeSettings,

    #[serde(flatten)]
    quotas: BTreeMap<String, u32>,
}

fn default_num_transactions() -> usize {
    DEFAULT_NUM_TRANSACTIONS
}

fn default_irregularity_percentage() -> f64 {
    DEFAULT_IRREGULARITY_PERCENTAGE
}

fn default_cumulative_threshold() -> f64 {
    DEFAULT_CUMULATIVE_THRESHOLD
}

fn default_cumulative_probability() -> f64 {
    DEFAULT_PERCENTAGE_CUMULATIVE_PROBABILITY
}

fn parse_date(field: &'static str, value: Option<String>) -> Result<NaiveDate, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField(field))?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidDate { field, value })
}

/// Empty or missing pools fall back to a single default entry
fn pool_or_default(pool: Option<Vec<String>>, default: &str) -> Vec<String> {
    match pool {
        Some(pool) if !pool.is_empty() => pool,
        _ => vec![default.to_string()],
    }
}

impl ConfigFile {
    fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let start_date = parse_date("start_date", self.start_date)?;
        let end_date = parse_date("end_date", self.end_date)?;

        let (irregularities, cumulative) = match self.irregularities {
            Some(section) => (
                IrregularityPlan::Quotas(section.quotas),
                section.cumulative_irregularity,
            ),
            None => {
                let cumulative = if self
                    .enabled_irregularities
                    .iter()
                    .any(|name| name == CUMULATIVE_IRREGULARITY)
                {
                    CumulativeSettings {
                        probability: self.cumulative_probability,
                        ..CumulativeSettings::enabled(None, self.cumulative_threshold)
                    }
                } else {
                    CumulativeSettings::default()
                };
                let enabled = self
                    .enabled_irregularities
                    .into_iter()
                    .filter(|name| name != CUMULATIVE_IRREGULARITY)
                    .collect();
                (
                    IrregularityPlan::Percentage {
                        enabled,
                        fraction: self.irregularity_percentage,
                    },
                    cumulative,
                )
            }
        };

        let config = Configuration {
            start_date,
            end_date,
            recurring_transactions: self.recurring_transactions,
            num_transactions: self.num_transactions,
            vendors: self.vendors,
            personal_vendors: pool_or_default(self.personal_vendors, DEFAULT_PERSONAL_VENDOR),
            personal_expense_descriptions: pool_or_default(
                self.personal_expense_descriptions,
                DEFAULT_PERSONAL_DESCRIPTION,
            ),
            irregularities,
            cumulative,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// TESTS
// ============================================================================
