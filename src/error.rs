//! Structured error handling for the rule and query engine
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured error responses (JSON-friendly)
//! - Cause preservation through error chains
//!
//! # Error Categories
//!
//! - Query errors (1xxx) - unknown queries/rules, structurally invalid queries
//! - Result errors (2xxx) - phase violations and bad result accesses
//! - Literal errors (3xxx) - typed projections against incompatible datatypes
//! - Engine errors (4xxx) - built-in, target reasoner, and orchestrator failures
//! - Config errors (5xxx) - configuration loading issues
//!
//! # Example
//!
//! ```rust,ignore
//! use sqwrl::error::{SqwrlError, SqwrlResult};
//!
//! fn lookup(name: &str) -> SqwrlResult<()> {
//!     Err(SqwrlError::invalid_query_name(name)
//!         .with_context("operation", "sqwrl_result"))
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Query errors (1xxx)
    /// Unknown SQWRL query name
    InvalidQueryName = 1000,
    /// Unknown SWRL rule name
    InvalidRuleName = 1001,
    /// Structurally invalid query
    InvalidQuery = 1002,

    // Result errors (2xxx)
    /// Operation attempted in the wrong result phase or row state
    ResultState = 2000,
    /// Unknown column name
    InvalidColumnName = 2001,
    /// Column index out of bounds
    InvalidColumnIndex = 2002,
    /// Row index out of bounds
    InvalidRowIndex = 2003,
    /// Typed accessor does not match the stored cell kind
    InvalidColumnType = 2004,
    /// Unknown aggregate function name
    InvalidAggregateFunction = 2005,

    // Literal errors (3xxx)
    /// Typed literal projection against an incompatible datatype
    LiteralType = 3000,

    // Engine errors (4xxx)
    /// Built-in processing failed
    BuiltIn = 4000,
    /// The target reasoner failed
    TargetEngine = 4001,
    /// The rule engine orchestrator failed
    RuleEngine = 4002,

    // Config errors (5xxx)
    /// Configuration error
    ConfigError = 5000,
    /// Invalid configuration syntax
    InvalidConfigSyntax = 5001,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidQueryName => "Invalid SQWRL query name",
            ErrorCode::InvalidRuleName => "Invalid SWRL rule name",
            ErrorCode::InvalidQuery => "Invalid query",
            ErrorCode::ResultState => "Invalid result state",
            ErrorCode::InvalidColumnName => "Invalid column name",
            ErrorCode::InvalidColumnIndex => "Invalid column index",
            ErrorCode::InvalidRowIndex => "Invalid row index",
            ErrorCode::InvalidColumnType => "Invalid column type",
            ErrorCode::InvalidAggregateFunction => "Invalid aggregate function",
            ErrorCode::LiteralType => "Literal type error",
            ErrorCode::BuiltIn => "Built-in error",
            ErrorCode::TargetEngine => "Target rule engine error",
            ErrorCode::RuleEngine => "Rule engine error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqwrlError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl SqwrlError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: HashMap::new(),
            causes: Vec::new(),
        }
    }

    // ========================================================================
    // Factory methods for the error taxonomy
    // ========================================================================

    /// Create an invalid-query-name error
    pub fn invalid_query_name(name: &str) -> Self {
        Self::new(
            ErrorCode::InvalidQueryName,
            format!("invalid SQWRL query name {}", name),
        )
    }

    /// Create an invalid-rule-name error
    pub fn invalid_rule_name(name: &str) -> Self {
        Self::new(
            ErrorCode::InvalidRuleName,
            format!("invalid SWRL rule name {}", name),
        )
    }

    /// Create an invalid-query error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidQuery, message)
    }

    /// Create a result-state error
    pub fn result_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResultState, message)
    }

    /// Create an invalid-column-name error
    pub fn invalid_column_name(name: &str) -> Self {
        Self::new(
            ErrorCode::InvalidColumnName,
            format!("invalid column name {}", name),
        )
    }

    /// Create an invalid-column-index error
    pub fn invalid_column_index(index: usize) -> Self {
        Self::new(
            ErrorCode::InvalidColumnIndex,
            format!("column index {} out of bounds", index),
        )
    }

    /// Create an invalid-row-index error
    pub fn invalid_row_index(index: usize) -> Self {
        Self::new(
            ErrorCode::InvalidRowIndex,
            format!("row index {} out of bounds", index),
        )
    }

    /// Create an invalid-column-type error
    pub fn invalid_column_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidColumnType, message)
    }

    /// Create an invalid-aggregate-function error
    pub fn invalid_aggregate_function(name: &str) -> Self {
        Self::new(
            ErrorCode::InvalidAggregateFunction,
            format!("invalid aggregate function {}", name),
        )
    }

    /// Create a literal-type error
    pub fn literal_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LiteralType, message)
    }

    /// Create a built-in error
    pub fn built_in(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BuiltIn, message)
    }

    /// Create a target-engine error
    pub fn target_engine(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TargetEngine, message)
    }

    /// Create a rule-engine error
    pub fn rule_engine(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RuleEngine, message)
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Wrap a lower-layer error as a rule-engine failure, preserving it as a cause
    pub fn wrap_rule_engine(message: impl Into<String>, inner: SqwrlError) -> Self {
        Self::rule_engine(format!("{}: {}", message.into(), inner.message))
            .with_cause(inner.to_string())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if this error carries the given code
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"RULE_ENGINE","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for SqwrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if !self.causes.is_empty() {
            write!(f, "\nCaused by:")?;
            for cause in &self.causes {
                write!(f, "\n  - {}", cause)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for SqwrlError {}

impl From<toml::de::Error> for SqwrlError {
    fn from(err: toml::de::Error) -> Self {
        SqwrlError::new(ErrorCode::InvalidConfigSyntax, err.to_string())
    }
}

impl From<std::io::Error> for SqwrlError {
    fn from(err: std::io::Error) -> Self {
        SqwrlError::config(err.to_string())
    }
}

/// A Result type using SqwrlError
pub type SqwrlResult<T> = Result<T, SqwrlError>;

// ============================================================================
// Tests
// ============================================================================
