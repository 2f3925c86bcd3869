use serde::Serialize;

use crate::models::Field;
use crate::validation::FieldRules;

pub const BORDER_VALID: &str = "#2ecc71";
pub const BORDER_INVALID: &str = "#e74c3c";
pub const BORDER_NEUTRAL: &str = "#ccc";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    Empty,
    Valid,
    Invalid,
}

// Live styling for one input, refreshed on change/blur
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldFeedback {
    pub field: Field,
    pub state: FieldState,
    pub border_color: &'static str,
    pub message: Option<String>,
}

impl FieldFeedback {
    pub fn for_value(rules: &FieldRules, field: Field, value: &str) -> Self {
        if value.trim().is_empty() {
            return Self {
                field,
                state: FieldState::Empty,
                border_color: BORDER_NEUTRAL,
                message: None,
            };
        }

        match rules.check_field(field, value) {
            Some(error) => Self {
                field,
                state: FieldState::Invalid,
                border_color: BORDER_INVALID,
                message: Some(error.to_string()),
            },
            None => Self {
                field,
                state: FieldState::Valid,
                border_color: BORDER_VALID,
                message: None,
            },
        }
    }
}
