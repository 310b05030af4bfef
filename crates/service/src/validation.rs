//! Field validation for product submissions.
//!
//! A [`Validator`] is an ordered list of rules. Every rule runs on every
//! input, so a caller sees all violations at once. The built-in rules cover
//! `name`, `price` and `available` in that order; extra content rules such as
//! [`NameContains`] are appended with [`Validator::with_rule`].

use std::fmt;

use crate::product::domain::ProductInput;

/// A single reason an input fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.message) }
}

/// One independent check. Returning `None` means the input passes.
pub trait ValidationRule: Send + Sync {
    fn check(&self, input: &ProductInput) -> Option<Violation>;
}

impl<F> ValidationRule for F
where
    F: Fn(&ProductInput) -> Option<Violation> + Send + Sync,
{
    fn check(&self, input: &ProductInput) -> Option<Violation> { self(input) }
}

pub const NAME_MIN_CHARS: usize = 3;

struct NameRule;

impl ValidationRule for NameRule {
    fn check(&self, input: &ProductInput) -> Option<Violation> {
        let ok = match input.name.as_deref() {
            Some(name) => !name.trim().is_empty() && name.chars().count() >= NAME_MIN_CHARS,
            None => false,
        };
        (!ok).then(|| Violation::new("name", "Product name cannot be null, empty, or less than 3 characters"))
    }
}

struct PriceRule;

impl ValidationRule for PriceRule {
    fn check(&self, input: &ProductInput) -> Option<Violation> {
        // `!(p >= 0.0)` also rejects NaN
        match input.price {
            Some(p) if !(p >= 0.0) => Some(Violation::new("price", "Price must be at least 0")),
            Some(_) => None,
            None => Some(Violation::new("price", "Price must be at least 0")),
        }
    }
}

struct AvailableRule;

impl ValidationRule for AvailableRule {
    fn check(&self, input: &ProductInput) -> Option<Violation> {
        input.available.is_none().then(|| Violation::new("available", "Available status cannot be null"))
    }
}

/// Requires `name` to contain a fixed substring, e.g. an organizational tag.
/// A missing name passes here; [`NameRule`] already reports it.
#[derive(Debug, Clone)]
pub struct NameContains {
    needle: String,
}

impl NameContains {
    pub fn new(needle: impl Into<String>) -> Self { Self { needle: needle.into() } }
}

impl ValidationRule for NameContains {
    fn check(&self, input: &ProductInput) -> Option<Violation> {
        let name = input.name.as_deref()?;
        (!name.contains(&self.needle))
            .then(|| Violation::new("name", format!("Product name must contain '{}'", self.needle)))
    }
}

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    fn default() -> Self { Self::standard() }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("rules", &self.rules.len()).finish()
    }
}

impl Validator {
    /// The `name`, `price`, `available` checks.
    pub fn standard() -> Self {
        Self { rules: vec![Box::new(NameRule), Box::new(PriceRule), Box::new(AvailableRule)] }
    }

    /// Standard rules plus an optional required name tag, as configured.
    pub fn from_config(cfg: &configs::ValidationConfig) -> Self {
        match cfg.required_name_tag.as_deref() {
            Some(tag) => Self::standard().with_rule(NameContains::new(tag)),
            None => Self::standard(),
        }
    }

    /// Append a rule; it runs after every rule already registered.
    pub fn with_rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn validate(&self, input: &ProductInput) -> Vec<Violation> {
        self.rules.iter().filter_map(|r| r.check(input)).collect()
    }
}

/// Join violation messages into the single user-facing string.
pub fn join_violations(violations: &[Violation]) -> String {
    violations.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join(", ")
}
