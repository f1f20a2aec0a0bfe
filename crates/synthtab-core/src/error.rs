use thiserror::Error;

/// Declaration errors detected before any model is assembled or solved.
///
/// Every variant names the offending declaration so the caller can correct
/// the input; conflicting-but-well-formed declarations are not represented
/// here, those surface as solver infeasibility.
#[derive(Debug, Error)]
pub enum Error {
    /// Two categorical variables share the same name.
    #[error("duplicate variable name: {0}")]
    DuplicateVariable(String),
    /// A categorical variable declares no categories.
    #[error("variable '{0}' has no categories")]
    EmptyCategories(String),
    /// No categorical variables were declared at all.
    #[error("at least one categorical variable is required")]
    NoVariables,
    /// The same category label appears twice. Labels resolve conditional
    /// declarations on their own, so they must be unique across variables.
    #[error("category '{label}' declared by '{first}' is redeclared by '{second}'")]
    DuplicateCategory {
        label: String,
        first: String,
        second: String,
    },
    /// A probability declaration references a variable that was never declared.
    #[error("declaration '{declaration}' references unknown variable '{variable}'")]
    UnknownVariable {
        declaration: String,
        variable: String,
    },
    /// A probability declaration references a category that was never declared.
    #[error("declaration '{declaration}' references unknown category '{category}'")]
    UnknownCategory {
        declaration: String,
        category: String,
    },
    /// A conditional declaration relates two categories of the same variable;
    /// such categories are mutually exclusive and the ratio is meaningless.
    #[error("declaration '{declaration}' conditions within variable '{variable}'")]
    SameVariableCondition {
        declaration: String,
        variable: String,
    },
    /// A declared probability lies outside [0, 1].
    #[error("declaration '{declaration}' has probability {value} outside [0, 1]")]
    InvalidProbability { declaration: String, value: f64 },
    /// The sample size must be a positive finite number.
    #[error("sample size must be positive and finite, got {0}")]
    InvalidSampleSize(f64),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Synthtab crates.
pub type Result<T> = std::result::Result<T, Error>;
