use thiserror::Error;

/// Which of the two snapshots handed to the engine was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRole {
    Current,
    Previous,
}

impl std::fmt::Display for SnapshotRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotRole::Current => f.write_str("current"),
            SnapshotRole::Previous => f.write_str("previous"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ReasoningError {
    #[error("invalid {role} snapshot: required field '{field}' is missing")]
    InvalidSnapshot {
        role: SnapshotRole,
        field: &'static str,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),

    #[error("unknown field '{0}' in placeholder")]
    UnknownField(String),

    #[error("invalid precision '{0}' in placeholder")]
    InvalidPrecision(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate rule id '{0}'")]
    DuplicateRuleId(String),

    #[error("rule '{rule}' has an invalid template: {source}")]
    Template {
        rule: String,
        #[source]
        source: TemplateError,
    },
}
