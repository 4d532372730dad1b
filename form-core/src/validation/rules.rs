//! Declarative per-field validation.
//!
//! A [`RuleSet`] lists, for each field, an ordered chain of checks. Every
//! field is evaluated; within a field the first failing check supplies the
//! message and the rest of that field's chain is skipped.

use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

/// Identifies a form field. The `Ord` impl defines error priority.
pub trait FieldName: Copy + Ord + fmt::Debug {
    fn as_str(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy)]
pub enum Rule<F> {
    /// Value must be non-empty.
    Required,
    /// Value must be non-empty after trimming whitespace.
    NotBlank,
    /// Value must match the whole pattern.
    Pattern(&'static Regex),
    /// Value must contain at least this many characters.
    MinChars(usize),
    /// Value must equal the value of another field.
    EqualsField(F),
}

impl<F: FieldName> Rule<F> {
    fn code(&self) -> &'static str {
        match self {
            Rule::Required | Rule::NotBlank => "required",
            Rule::Pattern(_) => "pattern",
            Rule::MinChars(_) => "length",
            Rule::EqualsField(_) => "must_match",
        }
    }

    fn passes<'a>(&self, value: &str, lookup: &impl Fn(F) -> &'a str) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::NotBlank => !value.trim().is_empty(),
            Rule::Pattern(re) => re.is_match(value),
            Rule::MinChars(min) => value.chars().count() >= *min,
            Rule::EqualsField(other) => value == lookup(*other),
        }
    }
}

#[derive(Debug, Clone)]
struct Check<F> {
    rule: Rule<F>,
    message: &'static str,
}

/// Ordered checks for a single field.
#[derive(Debug, Clone)]
pub struct FieldRules<F> {
    field: F,
    checks: Vec<Check<F>>,
}

impl<F: FieldName> FieldRules<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule<F>, message: &'static str) -> Self {
        self.checks.push(Check { rule, message });
        self
    }

    pub fn required(self, message: &'static str) -> Self {
        self.rule(Rule::Required, message)
    }

    pub fn not_blank(self, message: &'static str) -> Self {
        self.rule(Rule::NotBlank, message)
    }

    pub fn pattern(self, re: &'static Regex, message: &'static str) -> Self {
        self.rule(Rule::Pattern(re), message)
    }

    pub fn min_chars(self, min: usize, message: &'static str) -> Self {
        self.rule(Rule::MinChars(min), message)
    }

    pub fn equals(self, other: F, message: &'static str) -> Self {
        self.rule(Rule::EqualsField(other), message)
    }

    fn first_failure<'a>(&self, lookup: &impl Fn(F) -> &'a str) -> Option<&Check<F>> {
        let value = lookup(self.field);
        self.checks
            .iter()
            .find(|check| !check.rule.passes(value, lookup))
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet<F> {
    fields: Vec<FieldRules<F>>,
}

impl<F: FieldName> Default for RuleSet<F> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<F: FieldName> RuleSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules<F>) -> Self {
        self.fields.push(rules);
        self
    }

    /// Run every field's chain against the values returned by `lookup`.
    pub fn evaluate<'a>(&self, lookup: impl Fn(F) -> &'a str) -> FieldErrors<F> {
        let mut errors = FieldErrors::default();
        for rules in &self.fields {
            if let Some(check) = rules.first_failure(&lookup) {
                errors.insert(rules.field, check.rule.code(), check.message);
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub code: &'static str,
    pub message: &'static str,
}

/// Field → message mapping; empty iff the form is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, FieldError>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: FieldName> FieldErrors<F> {
    fn insert(&mut self, field: F, code: &'static str, message: &'static str) {
        self.errors.insert(field, FieldError { code, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).map(|e| e.message)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Highest-priority error.
    pub fn first(&self) -> Option<(F, &'static str)> {
        self.errors.iter().next().map(|(f, e)| (*f, e.message))
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, e.message))
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }
}

impl<F: FieldName> From<&FieldErrors<F>> for ValidationErrors {
    fn from(errors: &FieldErrors<F>) -> Self {
        let mut out = ValidationErrors::new();
        for (field, error) in &errors.errors {
            let mut err = ValidationError::new(error.code);
            err.message = Some(Cow::Borrowed(error.message));
            out.add(field.as_str(), err);
        }
        out
    }
}
