use thiserror::Error;

use crate::behaviors::reservation::Field;

#[derive(Debug, Error)]
pub enum SiteError {
    /// An element a behavior hangs off is not on the page. The behavior is
    /// skipped.
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SiteError {
    pub fn missing(what: impl Into<String>) -> Self {
        SiteError::MissingElement(what.into())
    }
}

/// User input rejected on the client. Always rendered as feedback on the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required reservation fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("implausible email address {0:?}")]
    ImplausibleEmail(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.id())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_field_ids() {
        let err = ValidationError::MissingFields(vec![Field::Phone, Field::Time]);
        assert_eq!(
            err.to_string(),
            "missing required reservation fields: phone, time"
        );
    }

    #[test]
    fn missing_element_message_names_the_element() {
        assert_eq!(
            SiteError::missing("#menu-toggle").to_string(),
            "missing element: #menu-toggle"
        );
    }
}
