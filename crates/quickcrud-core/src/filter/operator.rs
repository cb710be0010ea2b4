use crate::{Error, Result};
use std::fmt;

/// Querystring key suffixes, each selecting a predicate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// No suffix: exact match
    Eq,

    /// `____from`: inclusive lower bound
    From,

    /// `____to`: inclusive upper bound
    To,

    /// `____list`: membership, one candidate per occurrence
    List,

    /// `____str`: `LIKE` pattern
    Str,

    /// `____str_____matching_pattern`: case sensitivity of the paired `____str`
    StrMatchMode,
}

const SUFFIXES: &[(&str, Operator)] = &[
    ("____str_____matching_pattern", Operator::StrMatchMode),
    ("____from", Operator::From),
    ("____list", Operator::List),
    ("____str", Operator::Str),
    ("____to", Operator::To),
];

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::From,
        Operator::To,
        Operator::List,
        Operator::Str,
        Operator::StrMatchMode,
    ];

    /// Splits a querystring key into field name and operator.
    pub fn split(key: &str) -> (&str, Operator) {
        for (suffix, op) in SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                if !field.is_empty() {
                    return (field, *op);
                }
            }
        }
        (key, Operator::Eq)
    }

    /// The key suffix, or `exact` for bare keys.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Eq => "exact",
            Operator::From => "____from",
            Operator::To => "____to",
            Operator::List => "____list",
            Operator::Str => "____str",
            Operator::StrMatchMode => "____str_____matching_pattern",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case sensitivity of a `____str` match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Result<MatchMode> {
        match raw {
            "case_sensitive" => Ok(MatchMode::CaseSensitive),
            "case_insensitive" => Ok(MatchMode::CaseInsensitive),
            _ => Err(Error::type_coercion(raw, "matching pattern")),
        }
    }

    pub fn is_case_insensitive(self) -> bool {
        self == MatchMode::CaseInsensitive
    }
}
