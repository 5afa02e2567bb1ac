use crate::{
    stmt::{Predicate, WhereClause},
    validate_ident,
};

use quarry_core::{
    stmt::{Criterion, Filter, Value},
    Error, Result,
};
use std::collections::HashSet;

/// Hands out placeholder names that are unique within one statement.
///
/// The first request for a base name gets the name itself; later requests
/// get `_2`, `_3`, ... appended.
#[derive(Debug, Default)]
pub struct Placeholders {
    used: HashSet<String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh placeholder name derived from `base` (typically a
    /// column name). Qualifying dots are replaced with underscores.
    pub fn fresh(&mut self, base: &str) -> String {
        let base = base.replace('.', "_");
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// WHERE clauses plus the values to bind for them, in placeholder order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Translated {
    pub clauses: Vec<WhereClause>,
    pub binds: Vec<(String, Value)>,
}

/// Translates a filter into WHERE clauses and a bind plan.
///
/// Per condition:
///
/// 1. `Null` becomes `column IS NULL` and binds nothing.
/// 2. A list of N values becomes `column IN (:column0, ...)` with N binds,
///    in order.
/// 3. A string starting or ending with `%` becomes `column LIKE :column`.
/// 4. Any other scalar becomes `column = :column`.
///
/// Objects and arrays have no column comparison and are rejected.
///
/// Empty lists are rejected: `IN ()` is not valid SQL and a list that can
/// never match is almost always a caller bug.
pub fn translate(filter: &Filter, placeholders: &mut Placeholders) -> Result<Translated> {
    let mut translated = Translated::default();

    for condition in filter.iter() {
        let column = &condition.column;
        validate_ident(column)?;

        let predicate = match &condition.criterion {
            Criterion::Null => Predicate::IsNull {
                column: column.clone(),
            },
            Criterion::List(values) => {
                if values.is_empty() {
                    return Err(Error::invalid_criteria(format!(
                        "empty IN list for column `{column}`"
                    )));
                }

                let mut names = Vec::with_capacity(values.len());
                for (index, value) in values.iter().enumerate() {
                    if !value.is_scalar() {
                        return Err(Error::invalid_criteria(format!(
                            "IN list for column `{column}` contains a {} value",
                            value.kind_name()
                        )));
                    }
                    let name = placeholders.fresh(&format!("{column}{index}"));
                    translated.binds.push((name.clone(), value.clone()));
                    names.push(name);
                }

                Predicate::InList {
                    column: column.clone(),
                    placeholders: names,
                }
            }
            Criterion::Value(value) => {
                if !value.is_scalar() {
                    return Err(Error::invalid_criteria(format!(
                        "column `{column}` cannot be compared with a {} value",
                        value.kind_name()
                    )));
                }

                let name = placeholders.fresh(column);
                translated.binds.push((name.clone(), value.clone()));

                if is_like_pattern(value) {
                    Predicate::Like {
                        column: column.clone(),
                        placeholder: name,
                    }
                } else {
                    Predicate::Eq {
                        column: column.clone(),
                        placeholder: name,
                    }
                }
            }
        };

        translated.clauses.push(WhereClause {
            conjunction: condition.conjunction,
            predicate,
        });
    }

    Ok(translated)
}

fn is_like_pattern(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with('%') || s.ends_with('%'))
}
