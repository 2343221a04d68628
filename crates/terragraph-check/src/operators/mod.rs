//! The predicate operator family.
//!
//! A policy check questions one resolved attribute of a vertex's exported
//! mapping through a named operator. The operator set is closed and known at
//! build time — a check compiler maps configuration-file operator names onto
//! [`OperatorKind`] when a check document loads, so an unknown operator
//! surfaces eagerly rather than at evaluation time.
//!
//! Operators are pure: evaluation never mutates anything and never fails.
//! Absence of the tested attribute is a defined outcome per operator —
//! positive operators (membership included) are false on absence, negated
//! operators are true, and emptiness treats absence as empty.

mod compare;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use terragraph_core::{fields, AttrValue, BlockKind};

use crate::error::CheckError;
use compare::{number_of, text_of, value_contains, value_is_empty};

/// The supported comparison semantics, one variant per operator name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Within,
    Equals,
    NotEquals,
    Exists,
    NotExists,
    Contains,
    NotContains,
    StartingWith,
    EndingWith,
    RegexMatch,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    IsEmpty,
    IsNotEmpty,
}

impl OperatorKind {
    /// Maps a check-document operator name to the closed set.
    pub fn parse(name: &str) -> Result<OperatorKind, CheckError> {
        match name {
            "within" => Ok(OperatorKind::Within),
            "equals" => Ok(OperatorKind::Equals),
            "not_equals" => Ok(OperatorKind::NotEquals),
            "exists" => Ok(OperatorKind::Exists),
            "not_exists" => Ok(OperatorKind::NotExists),
            "contains" => Ok(OperatorKind::Contains),
            "not_contains" => Ok(OperatorKind::NotContains),
            "starting_with" => Ok(OperatorKind::StartingWith),
            "ending_with" => Ok(OperatorKind::EndingWith),
            "regex_match" => Ok(OperatorKind::RegexMatch),
            "greater_than" => Ok(OperatorKind::GreaterThan),
            "greater_than_or_equal" => Ok(OperatorKind::GreaterThanOrEqual),
            "less_than" => Ok(OperatorKind::LessThan),
            "less_than_or_equal" => Ok(OperatorKind::LessThanOrEqual),
            "is_empty" => Ok(OperatorKind::IsEmpty),
            "is_not_empty" => Ok(OperatorKind::IsNotEmpty),
            other => Err(CheckError::UnknownOperator {
                name: other.to_string(),
            }),
        }
    }

    /// The operator name as written in check documents.
    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::Within => "within",
            OperatorKind::Equals => "equals",
            OperatorKind::NotEquals => "not_equals",
            OperatorKind::Exists => "exists",
            OperatorKind::NotExists => "not_exists",
            OperatorKind::Contains => "contains",
            OperatorKind::NotContains => "not_contains",
            OperatorKind::StartingWith => "starting_with",
            OperatorKind::EndingWith => "ending_with",
            OperatorKind::RegexMatch => "regex_match",
            OperatorKind::GreaterThan => "greater_than",
            OperatorKind::GreaterThanOrEqual => "greater_than_or_equal",
            OperatorKind::LessThan => "less_than",
            OperatorKind::LessThanOrEqual => "less_than_or_equal",
            OperatorKind::IsEmpty => "is_empty",
            OperatorKind::IsNotEmpty => "is_not_empty",
        }
    }
}

/// Comparison payload, validated against the operator at construction.
#[derive(Debug, Clone)]
enum Comparison {
    /// Operators that take no comparison value.
    None,
    /// A single expected value.
    Value(AttrValue),
    /// A membership set.
    Set(Vec<AttrValue>),
    /// A textual prefix or suffix.
    Text(String),
    /// A compiled pattern.
    Pattern(Regex),
    /// A numeric bound.
    Bound(f64),
}

/// One configured predicate: an operator, the attribute path it tests, and
/// the construct kinds it applies to.
#[derive(Debug, Clone)]
pub struct AttributePredicate {
    kind: OperatorKind,
    block_kinds: Vec<BlockKind>,
    attribute: String,
    comparison: Comparison,
}

impl AttributePredicate {
    /// Builds a predicate from a check-document operator name.
    ///
    /// The comparison value is validated against the operator's semantics
    /// here — membership needs a sequence, patterns must compile, bounds
    /// must be numeric, existence and emptiness operators take none — so a
    /// malformed check document fails when it loads, not when it runs.
    pub fn new(
        operator: &str,
        block_kinds: Vec<BlockKind>,
        attribute: impl Into<String>,
        value: Option<AttrValue>,
    ) -> Result<Self, CheckError> {
        let kind = OperatorKind::parse(operator)?;
        let comparison = validate_comparison(kind, value)?;
        Ok(AttributePredicate {
            kind,
            block_kinds,
            attribute: attribute.into(),
            comparison,
        })
    }

    pub fn operator(&self) -> OperatorKind {
        self.kind
    }

    /// The dotted attribute path this predicate tests.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns `true` if the predicate applies to the given construct kind.
    pub fn applies_to(&self, kind: BlockKind) -> bool {
        self.block_kinds.contains(&kind)
    }

    /// Evaluates the predicate against one exported attribute mapping.
    pub fn evaluate(&self, exported: &IndexMap<String, AttrValue>) -> bool {
        self.evaluate_value(exported.get(&self.attribute))
    }

    /// Partitions exported mappings into (passed, failed), skipping
    /// mappings whose construct kind the predicate does not apply to.
    pub fn run<'a>(
        &self,
        exported: &'a [IndexMap<String, AttrValue>],
    ) -> (
        Vec<&'a IndexMap<String, AttrValue>>,
        Vec<&'a IndexMap<String, AttrValue>>,
    ) {
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for mapping in exported {
            let kind = mapping
                .get(fields::BLOCK_TYPE)
                .and_then(AttrValue::as_str)
                .and_then(BlockKind::parse);
            match kind {
                Some(kind) if self.applies_to(kind) => {
                    if self.evaluate(mapping) {
                        passed.push(mapping);
                    } else {
                        failed.push(mapping);
                    }
                }
                _ => {}
            }
        }
        (passed, failed)
    }

    fn evaluate_value(&self, actual: Option<&AttrValue>) -> bool {
        match (self.kind, &self.comparison) {
            (OperatorKind::Within, Comparison::Set(expected)) => {
                actual.map_or(false, |value| expected.contains(value))
            }
            (OperatorKind::Equals, Comparison::Value(expected)) => actual == Some(expected),
            (OperatorKind::NotEquals, Comparison::Value(expected)) => actual != Some(expected),
            (OperatorKind::Exists, Comparison::None) => actual.is_some(),
            (OperatorKind::NotExists, Comparison::None) => actual.is_none(),
            (OperatorKind::Contains, Comparison::Value(expected)) => {
                actual.map_or(false, |value| value_contains(value, expected))
            }
            (OperatorKind::NotContains, Comparison::Value(expected)) => {
                actual.map_or(true, |value| !value_contains(value, expected))
            }
            (OperatorKind::StartingWith, Comparison::Text(prefix)) => actual
                .and_then(text_of)
                .map_or(false, |text| text.starts_with(prefix.as_str())),
            (OperatorKind::EndingWith, Comparison::Text(suffix)) => actual
                .and_then(text_of)
                .map_or(false, |text| text.ends_with(suffix.as_str())),
            (OperatorKind::RegexMatch, Comparison::Pattern(pattern)) => actual
                .and_then(text_of)
                .map_or(false, |text| pattern.is_match(text)),
            (OperatorKind::GreaterThan, Comparison::Bound(bound)) => actual
                .and_then(number_of)
                .map_or(false, |number| number > *bound),
            (OperatorKind::GreaterThanOrEqual, Comparison::Bound(bound)) => actual
                .and_then(number_of)
                .map_or(false, |number| number >= *bound),
            (OperatorKind::LessThan, Comparison::Bound(bound)) => actual
                .and_then(number_of)
                .map_or(false, |number| number < *bound),
            (OperatorKind::LessThanOrEqual, Comparison::Bound(bound)) => actual
                .and_then(number_of)
                .map_or(false, |number| number <= *bound),
            (OperatorKind::IsEmpty, Comparison::None) => {
                actual.map_or(true, value_is_empty)
            }
            (OperatorKind::IsNotEmpty, Comparison::None) => {
                actual.map_or(false, |value| !value_is_empty(value))
            }
            // Comparison shape mismatches are prevented at construction.
            _ => false,
        }
    }
}

fn validate_comparison(
    kind: OperatorKind,
    value: Option<AttrValue>,
) -> Result<Comparison, CheckError> {
    let operator = kind.name();
    match kind {
        OperatorKind::Exists
        | OperatorKind::NotExists
        | OperatorKind::IsEmpty
        | OperatorKind::IsNotEmpty => match value {
            None => Ok(Comparison::None),
            Some(_) => Err(CheckError::InvalidComparison {
                operator,
                reason: "operator takes no comparison value".to_string(),
            }),
        },
        OperatorKind::Within => match value {
            Some(AttrValue::Seq(items)) if !items.is_empty() => Ok(Comparison::Set(items)),
            Some(other) => Err(CheckError::InvalidComparison {
                operator,
                reason: format!("expected a non-empty sequence, got {}", other.type_name()),
            }),
            None => Err(CheckError::InvalidComparison {
                operator,
                reason: "missing membership set".to_string(),
            }),
        },
        OperatorKind::Equals
        | OperatorKind::NotEquals
        | OperatorKind::Contains
        | OperatorKind::NotContains => match value {
            Some(expected) => Ok(Comparison::Value(expected)),
            None => Err(CheckError::InvalidComparison {
                operator,
                reason: "missing comparison value".to_string(),
            }),
        },
        OperatorKind::StartingWith | OperatorKind::EndingWith => match value {
            Some(AttrValue::String(text)) => Ok(Comparison::Text(text)),
            Some(other) => Err(CheckError::InvalidComparison {
                operator,
                reason: format!("expected a string, got {}", other.type_name()),
            }),
            None => Err(CheckError::InvalidComparison {
                operator,
                reason: "missing comparison string".to_string(),
            }),
        },
        OperatorKind::RegexMatch => match value {
            Some(AttrValue::String(pattern)) => {
                Regex::new(&pattern).map(Comparison::Pattern).map_err(|e| {
                    CheckError::InvalidComparison {
                        operator,
                        reason: format!("pattern does not compile: {e}"),
                    }
                })
            }
            Some(other) => Err(CheckError::InvalidComparison {
                operator,
                reason: format!("expected a pattern string, got {}", other.type_name()),
            }),
            None => Err(CheckError::InvalidComparison {
                operator,
                reason: "missing pattern".to_string(),
            }),
        },
        OperatorKind::GreaterThan
        | OperatorKind::GreaterThanOrEqual
        | OperatorKind::LessThan
        | OperatorKind::LessThanOrEqual => match value.as_ref().and_then(AttrValue::as_f64) {
            Some(bound) => Ok(Comparison::Bound(bound)),
            None => Err(CheckError::InvalidComparison {
                operator,
                reason: "expected a numeric bound".to_string(),
            }),
        },
    }
}
