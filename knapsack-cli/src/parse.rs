//! Parsing the plain-text instance format.
//!
//! The first line holds `<item_count> <capacity>`; each of the next
//! `item_count` lines holds `<value> <weight>`. Line order assigns item
//! indices. Trailing blank lines are ignored.

use std::num::ParseIntError;

use knapsack_core::{Instance, InstanceError};
use thiserror::Error;

/// Errors raised while reading an instance from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input held no header line.
    #[error("instance text is empty")]
    Empty,
    /// A line did not have exactly two fields.
    #[error("line {line}: expected 2 fields, found {found}")]
    FieldCount {
        /// One-based line number.
        line: usize,
        /// Number of whitespace-separated fields present.
        found: usize,
    },
    /// A field was not a signed 64-bit integer.
    #[error("line {line}: '{field}' is not an integer: {source}")]
    InvalidInteger {
        /// One-based line number.
        line: usize,
        /// The offending field.
        field: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The header declared a negative item count.
    #[error("item count must be non-negative, got {count}")]
    NegativeItemCount {
        /// Declared count.
        count: i64,
    },
    /// The number of item lines differs from the header.
    #[error("header declares {declared} items but {found} item lines follow")]
    ItemCountMismatch {
        /// Count from the header.
        declared: u64,
        /// Item lines actually present.
        found: usize,
    },
    /// The numbers parsed but do not form a valid instance.
    #[error("invalid instance: {0}")]
    Invalid(#[from] InstanceError),
}

/// Parse instance text into a validated [`Instance`].
///
/// # Errors
/// Returns a [`ParseError`] describing the first malformed line, a count
/// mismatch, or the validation failure reported by
/// [`Instance::from_signed`].
///
/// # Examples
/// ```
/// use knapsack_cli::parse_instance;
///
/// # fn main() -> Result<(), knapsack_cli::ParseError> {
/// let instance = parse_instance("3 50\n60 10\n100 20\n120 30\n")?;
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.capacity(), 50);
/// # Ok(())
/// # }
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    let mut lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(offset, content)| (offset + 1, content))
        .collect();
    while lines.last().is_some_and(|(_, content)| content.trim().is_empty()) {
        lines.pop();
    }

    let mut rows = lines.into_iter();
    let (header_line, header) = rows.next().ok_or(ParseError::Empty)?;
    let (count, capacity) = parse_pair(header_line, header)?;
    let declared = u64::try_from(count).map_err(|_| ParseError::NegativeItemCount { count })?;

    let pairs = rows
        .map(|(line, content)| parse_pair(line, content))
        .collect::<Result<Vec<_>, _>>()?;
    if u64::try_from(pairs.len()).ok() != Some(declared) {
        return Err(ParseError::ItemCountMismatch {
            declared,
            found: pairs.len(),
        });
    }
    Ok(Instance::from_signed(pairs, capacity)?)
}

fn parse_pair(line: usize, content: &str) -> Result<(i64, i64), ParseError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let [first, second] = fields.as_slice() else {
        return Err(ParseError::FieldCount {
            line,
            found: fields.len(),
        });
    };
    Ok((parse_field(line, first)?, parse_field(line, second)?))
}

fn parse_field(line: usize, field: &str) -> Result<i64, ParseError> {
    field
        .parse()
        .map_err(|source| ParseError::InvalidInteger {
            line,
            field: field.to_owned(),
            source,
        })
}
