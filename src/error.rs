use std::fmt::{self, Display};

/// Errors returned while building a sales report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The sales data is missing a collection, has an empty or duplicated
    /// collection, or could not be parsed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required strategy was not supplied, or a strategy name is unknown.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A purchase record refers to a seller or product that doesn't exist.
    ///
    /// Only returned under [`IntegrityPolicy::Reject`](crate::IntegrityPolicy::Reject).
    #[error("purchase record {record}: unknown {missing}")]
    ReferentialIntegrity { record: usize, missing: MissingRef },
}

/// The dangling reference found in a purchase record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MissingRef {
    Seller(String),
    Product(String),
}

impl Display for MissingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller(id) => write!(f, "seller {id:?}"),
            Self::Product(sku) => write!(f, "product {sku:?}"),
        }
    }
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referential_integrity_error_names_record_and_missing_id() {
        let err = ReportError::ReferentialIntegrity {
            record: 3,
            missing: MissingRef::Product("SKU_042".into()),
        };
        assert_eq!(
            err.to_string(),
            "purchase record 3: unknown product \"SKU_042\""
        );
    }
}
