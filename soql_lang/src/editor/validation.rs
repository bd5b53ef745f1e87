use soql_core::LogicError;

/// Validation state of the custom logic input
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValidationState {
    /// Not checked since the last edit
    #[default]
    Idle,
    Valid,
    Invalid(LogicError),
}

impl ValidationState {
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationState::Invalid(_))
    }

    /// Message to show next to the logic input, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ValidationState::Invalid(error) => Some(error.user_message()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LogicError> {
        match self {
            ValidationState::Invalid(error) => Some(error),
            _ => None,
        }
    }
}
