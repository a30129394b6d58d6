use thiserror::Error;

use crate::domain::contact::ContactField;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("required contact field `{field}` is empty")]
    MissingContactField { field: ContactField },
    #[error("cannot request a quotation for an empty cart")]
    EmptyCart,
}

impl DomainError {
    /// Text shown to the shopper in the blocking alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingContactField { field } => field.prompt(),
            Self::EmptyCart => "Your cart is empty",
        }
    }

    /// Form input to refocus after the alert, if any.
    pub fn focus_field(&self) -> Option<ContactField> {
        match self {
            Self::MissingContactField { field } => Some(*field),
            Self::EmptyCart => None,
        }
    }
}

impl From<ContactField> for DomainError {
    fn from(field: ContactField) -> Self {
        Self::MissingContactField { field }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::MissingContactField { .. }) => "rfq_validation",
            Self::Domain(DomainError::EmptyCart) => "empty_cart",
            Self::Persistence(_) => "storage",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(error) => error.user_message(),
            Self::Persistence(_) => "The cart could not be saved. Please retry shortly.",
        }
    }
}
