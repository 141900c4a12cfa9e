//! Query evaluation: conjunction within a formula, set algebra between
//! formulas, and the final report ordering.

use std::collections::HashMap;

use tranzit_core::{clean, Collection, Locale, Record};

use crate::comparator::Comparator;
use crate::error::QueryError;
use crate::prepare::prepare;
use crate::token::{compile, Token};

const UNION: u8 = b'+';
const DIFFERENCE: u8 = b'-';

/// Filtering with the process-wide [`Locale`].
pub trait Filter {
    /// Evaluate a query against this collection and return the matching
    /// records, sorted by date descending with amount ascending as the
    /// tie-break.
    ///
    /// An empty query returns the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] for malformed queries; the collection is
    /// untouched either way.
    fn filter(&self, query: &str) -> Result<Collection, QueryError>;
}

impl Filter for Collection {
    fn filter(&self, query: &str) -> Result<Collection, QueryError> {
        filter_with(self, query, &Locale::snapshot())
    }
}

/// Evaluate a query against a collection under an explicit locale.
///
/// This is [`Filter::filter`] with the locale passed in; the process-wide
/// locale is never consulted.
///
/// # Errors
///
/// Returns a [`QueryError`] for malformed queries.
pub fn filter_with(
    collection: &Collection,
    query: &str,
    locale: &Locale,
) -> Result<Collection, QueryError> {
    let tokens = compile(&clean(query))?;
    tracing::debug!(tokens = tokens.len(), query, "query compiled");
    if tokens.is_empty() {
        return Ok(collection.clone());
    }

    let Token::Formula(first) = &tokens[0] else {
        return Err(QueryError::IncorrectQuery(query.to_string()));
    };

    // Stage the first formula's results; the map tracks canonical keys for
    // the set operations that follow.
    let mut results: Vec<Record> = Vec::new();
    let mut seen: HashMap<String, Record> = HashMap::new();
    for record in apply(collection.records(), &prepare(first, locale)?, locale)? {
        seen.insert(record.key(), record.clone());
        results.push(record);
    }

    let mut index = 1;
    while index < tokens.len() {
        let operator = match &tokens[index] {
            Token::Operator(operator) => *operator,
            Token::Formula(formula) => {
                return Err(QueryError::MissingOperator(formula.body.clone()));
            }
        };
        let Some(Token::Formula(formula)) = tokens.get(index + 1) else {
            return Err(QueryError::MissingFormula((operator as char).to_string()));
        };

        let comparators = prepare(formula, locale)?;
        match operator {
            UNION => {
                // Unions draw from the original input, not the running
                // result.
                for record in apply(collection.records(), &comparators, locale)? {
                    if !seen.contains_key(&record.key()) {
                        seen.insert(record.key(), record.clone());
                        results.push(record);
                    }
                }
            }
            DIFFERENCE => {
                // Differences narrow the running result; the sequence is
                // rebuilt from the key map and stays unordered until the
                // final sort.
                for record in apply(&results, &comparators, locale)? {
                    seen.remove(&record.key());
                }
                results = seen.values().cloned().collect();
            }
            other => return Err(QueryError::UnsupportedOperator(other)),
        }

        index += 2;
    }

    results.sort_by(|left, right| {
        right
            .date
            .cmp(&left.date)
            .then_with(|| left.amount.cmp(&right.amount))
    });

    Ok(Collection::from(results))
}

/// Conjunction: every comparator must accept, in declaration order.
///
/// Comparators past the point where the survivor set empties are never
/// evaluated, so their validity is never checked either. An empty
/// comparator list keeps the records as they are.
fn apply(
    records: &[Record],
    comparators: &[Comparator],
    locale: &Locale,
) -> Result<Vec<Record>, QueryError> {
    let mut survivors = records.to_vec();

    for comparator in comparators {
        if survivors.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for record in survivors {
            if comparator.compare(&record, locale)? {
                next.push(record);
            }
        }
        survivors = next;
    }

    Ok(survivors)
}
