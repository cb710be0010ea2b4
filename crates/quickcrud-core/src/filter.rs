//! Translation of querystring filter parameters into predicates.
//!
//! A key is a field name optionally followed by an operator suffix:
//!
//! ```text
//! date_value____from=2021-07-22        lower bound (inclusive)
//! date_value____to=2021-07-25          upper bound (inclusive)
//! id____list=1&id____list=2            membership
//! char_value____str=str%               LIKE pattern
//! char_value____str_____matching_pattern=case_insensitive
//! bool_value=true                      exact
//! ```
//!
//! Every predicate must hold: there is no OR at this layer.

mod operator;
pub use operator::{MatchMode, Operator};

mod params;
pub use params::Params;

mod predicate;
pub use predicate::Predicate;

use crate::schema::Model;
use crate::stmt::{Expr, Value, ValueSet};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Validated per-field predicates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedFilter {
    fields: IndexMap<String, Vec<Predicate>>,
}

impl ParsedFilter {
    /// Parses `params` against the fields of `model`.
    ///
    /// Fails with an unknown field error for keys naming no field, an
    /// unsupported operator error when the suffix does not apply to the
    /// field's type, and a type coercion error for values that do not parse.
    pub fn parse(params: &Params, model: &Model) -> Result<ParsedFilter> {
        let mut filter = ParsedFilter::default();
        let mut modes = IndexMap::new();

        for (key, values) in params.iter() {
            let (name, op) = Operator::split(key);

            let field = model
                .field(name)
                .ok_or_else(|| Error::unknown_field(&model.name, name))?;

            let coercer = field.ty.coercer();
            if !coercer.supports(op) {
                return Err(Error::unsupported_operator(
                    name,
                    op.name(),
                    field.ty.to_string(),
                ));
            }

            match op {
                Operator::Eq => {
                    for raw in values {
                        let value = coercer.from_param(raw)?;
                        filter.push(name, Predicate::Eq(value));
                    }
                }
                Operator::From | Operator::To => {
                    for raw in values {
                        let value = coercer.from_param(raw)?;
                        filter.push_bound(name, op, value);
                    }
                }
                Operator::List => {
                    let set = values
                        .iter()
                        .map(|raw| coercer.from_param(raw))
                        .collect::<Result<ValueSet>>()?;
                    filter.push(name, Predicate::In(set));
                }
                Operator::Str => {
                    for raw in values {
                        filter.push(
                            name,
                            Predicate::Like {
                                pattern: raw.clone(),
                                mode: MatchMode::default(),
                            },
                        );
                    }
                }
                Operator::StrMatchMode => {
                    for raw in values {
                        modes.insert(name, MatchMode::parse(raw)?);
                    }
                }
            }
        }

        // Modifiers apply to the field's `____str` predicates, wherever the
        // keys appeared. Without one they do nothing.
        for (name, mode) in modes {
            if let Some(predicates) = filter.fields.get_mut(name) {
                for predicate in predicates {
                    if let Predicate::Like { mode: m, .. } = predicate {
                        *m = mode;
                    }
                }
            }
        }

        Ok(filter)
    }

    /// Adds a predicate on `field`.
    pub fn push(&mut self, field: &str, predicate: Predicate) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(predicate);
    }

    /// A `from` or `to` bound fills the first range on the field still
    /// missing that bound, otherwise it starts a new range.
    fn push_bound(&mut self, field: &str, op: Operator, value: Value) {
        let predicates = self.fields.entry(field.to_string()).or_default();

        for predicate in predicates.iter_mut() {
            match (op, predicate) {
                (Operator::From, Predicate::Range { from: slot @ None, .. })
                | (Operator::To, Predicate::Range { to: slot @ None, .. }) => {
                    *slot = Some(value);
                    return;
                }
                _ => {}
            }
        }

        predicates.push(match op {
            Operator::From => Predicate::Range {
                from: Some(value),
                to: None,
            },
            _ => Predicate::Range {
                from: None,
                to: Some(value),
            },
        });
    }

    pub fn get(&self, field: &str) -> Option<&[Predicate]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Predicate])> {
        self.fields
            .iter()
            .map(|(field, predicates)| (field.as_str(), predicates.as_slice()))
    }

    /// The conjunction of every predicate; `true` when there are none.
    pub fn to_expr(&self) -> Expr {
        Expr::and_from_vec(
            self.fields
                .iter()
                .flat_map(|(field, predicates)| {
                    predicates.iter().map(|predicate| predicate.to_expr(field))
                })
                .collect(),
        )
    }
}
