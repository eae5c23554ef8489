use std::fmt;

use thiserror::Error;

/// Identity component rejected by [`SpawnRuleKey::new`](crate::SpawnRuleKey::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Creature,
    GroupId,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::Creature => write!(f, "creature"),
            IdentityField::GroupId => write!(f, "group id"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnRuleError {
    #[error("invalid spawn rule identity: {field} cannot be empty")]
    InvalidIdentity { field: IdentityField },
    #[error("malformed spawn record '{record}': expected 4 scalar fields, found {fields}")]
    MalformedRecord { fields: usize, record: String },
    #[error("optional parameters '{text}' must start with '{{'")]
    InvalidOptionalText { text: String },
    #[error("'{0}' cannot be used as a spawn record delimiter")]
    InvalidDelimiter(char),
}
