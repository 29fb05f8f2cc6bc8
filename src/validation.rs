//! Field-level invariants guarding every product write.
//!
//! Every check runs independently so a caller sees all problems at once.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ProductDraft, ProductPatch};

/// One violated field and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

#[cfg(test)]
impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Borrowed view of the fields under validation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub price: f64,
    pub quantity: i64,
    pub reorder_threshold: i64,
}

impl<'a> From<&'a ProductDraft> for Candidate<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            name: &draft.name,
            price: draft.price,
            quantity: draft.quantity,
            reorder_threshold: draft.reorder_threshold,
        }
    }
}

/// Field values as received from a caller, before any type or range check.
///
/// `None` means the field was absent (or null).
#[derive(Debug, Clone, PartialEq)]
pub struct UncheckedProduct {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
    pub reorder_threshold: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductValidator;

impl ProductValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Result<(), ValidationError> {
        let candidate = candidate.into();
        let violations: Vec<FieldViolation> = [
            name_rule(candidate.name),
            price_rule(candidate.price),
            non_negative("quantity", candidate.quantity),
            non_negative("reorderThreshold", candidate.reorder_threshold),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// Type-check and validate a complete field set (create or replace).
    ///
    /// `name`, `price` and `quantity` are required; `reorderThreshold`
    /// defaults to 0 and `description` to none.
    pub fn check_draft(&self, input: UncheckedProduct) -> Result<ProductDraft, ValidationError> {
        let mut violations = Vec::new();

        let name = keep(
            &mut violations,
            required("name", input.name).and_then(|v| text("name", v)),
            |n: &String| name_rule(n),
        );
        let description = keep(
            &mut violations,
            input.description.map(|v| text("description", v)).transpose(),
            |_: &Option<String>| None,
        );
        let price = keep(
            &mut violations,
            required("price", input.price).and_then(|v| number("price", v)),
            |p: &f64| price_rule(*p),
        );
        let quantity = keep(
            &mut violations,
            required("quantity", input.quantity).and_then(|v| integer("quantity", v)),
            |q: &i64| non_negative("quantity", *q),
        );
        let reorder_threshold = keep(
            &mut violations,
            input
                .reorder_threshold
                .map_or(Ok(0), |v| integer("reorderThreshold", v)),
            |t: &i64| non_negative("reorderThreshold", *t),
        );

        match (name, description, price, quantity, reorder_threshold) {
            (Some(name), Some(description), Some(price), Some(quantity), Some(reorder_threshold))
                if violations.is_empty() =>
            {
                Ok(ProductDraft {
                    name,
                    description,
                    price,
                    quantity,
                    reorder_threshold,
                })
            }
            _ => Err(ValidationError { violations }),
        }
    }

    /// Type-check and validate the fields present in a partial update.
    ///
    /// The merged record still goes through [`ProductValidator::validate`].
    pub fn check_patch(&self, input: UncheckedProduct) -> Result<ProductPatch, ValidationError> {
        let mut violations = Vec::new();

        let name = input
            .name
            .map(|v| keep(&mut violations, text("name", v), |n: &String| name_rule(n)));
        let description = input
            .description
            .map(|v| keep(&mut violations, text("description", v), |_: &String| None));
        let price = input
            .price
            .map(|v| keep(&mut violations, number("price", v), |p: &f64| price_rule(*p)));
        let quantity = input.quantity.map(|v| {
            keep(&mut violations, integer("quantity", v), |q: &i64| {
                non_negative("quantity", *q)
            })
        });
        let reorder_threshold = input.reorder_threshold.map(|v| {
            keep(&mut violations, integer("reorderThreshold", v), |t: &i64| {
                non_negative("reorderThreshold", *t)
            })
        });

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        Ok(ProductPatch {
            name: name.flatten(),
            description: description.flatten(),
            price: price.flatten(),
            quantity: quantity.flatten(),
            reorder_threshold: reorder_threshold.flatten(),
        })
    }
}

/// Record the type or range violation for one field, or hand back its value.
fn keep<T>(
    violations: &mut Vec<FieldViolation>,
    typed: Result<T, FieldViolation>,
    rule: impl FnOnce(&T) -> Option<FieldViolation>,
) -> Option<T> {
    match typed.map_err(Some).and_then(|value| match rule(&value) {
        None => Ok(value),
        broken => Err(broken),
    }) {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.extend(violation);
            None
        }
    }
}

fn required(field: &'static str, value: Option<Value>) -> Result<Value, FieldViolation> {
    value.ok_or_else(|| FieldViolation::new(field, "is required"))
}

fn text(field: &'static str, value: Value) -> Result<String, FieldViolation> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(FieldViolation::new(field, "must be a string")),
    }
}

fn number(field: &'static str, value: Value) -> Result<f64, FieldViolation> {
    value
        .as_f64()
        .ok_or_else(|| FieldViolation::new(field, "must be a number"))
}

fn integer(field: &'static str, value: Value) -> Result<i64, FieldViolation> {
    value
        .as_i64()
        .ok_or_else(|| FieldViolation::new(field, "must be a whole number"))
}

fn name_rule(name: &str) -> Option<FieldViolation> {
    name.trim()
        .is_empty()
        .then(|| FieldViolation::new("name", "must not be empty"))
}

// NaN fails the comparison and is rejected along with zero and negatives.
fn price_rule(price: f64) -> Option<FieldViolation> {
    (!(price.is_finite() && price > 0.0))
        .then(|| FieldViolation::new("price", "must be a finite number greater than zero"))
}

fn non_negative(field: &'static str, value: i64) -> Option<FieldViolation> {
    (value < 0).then(|| FieldViolation::new(field, "must not be negative"))
}
