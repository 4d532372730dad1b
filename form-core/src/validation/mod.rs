pub mod patterns;
pub mod rules;

pub use rules::{FieldError, FieldErrors, FieldName, FieldRules, Rule, RuleSet};
