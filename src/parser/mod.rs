//! Smart time expression parsing.
//!
//! Three grammars are recognized:
//!
//! | Grammar     | Examples                  | Meaning                         |
//! |-------------|---------------------------|---------------------------------|
//! | Bare number | `90`, `0`                 | seconds                         |
//! | Unit tokens | `5m`, `1h30m`, `1h 15s`   | sum of `<n>h`, `<n>m`, `<n>s`   |
//! | Clock       | `2:30`, `1:02:03`         | `MM:SS` or `H:MM:SS`            |
//!
//! A bare number is only taken as seconds when there is no colon and no
//! unit suffix. Unit tokens must appear in descending order (`h`, `m`, `s`),
//! each at most once.
//!
//! # Usage
//!
//! ```
//! use minimal_timer::parser::parse_duration;
//!
//! assert_eq!(parse_duration("1h30m").unwrap().as_secs(), 5400);
//! assert_eq!(parse_duration("2:30").unwrap().as_secs(), 150);
//! assert!(parse_duration("abc").is_err());
//! ```

mod error;

use std::str::FromStr;

use tracing::debug;

pub use error::ParseError;

use crate::types::TimerDuration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Maximum number of `:`-separated clock components (`H:MM:SS`).
const MAX_CLOCK_COMPONENTS: usize = 3;

/// Parses a time expression into a duration.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns a `ParseError` if the expression is empty, negative, matches no
/// recognized grammar, or overflows.
pub fn parse_duration(expression: &str) -> Result<TimerDuration, ParseError> {
    let input = expression.trim();

    if input.is_empty() {
        return Err(ParseError::Empty {
            input: expression.to_string(),
        });
    }

    if input
        .strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    {
        return Err(ParseError::Negative {
            input: input.to_string(),
        });
    }

    let seconds = if input.contains(':') {
        parse_clock(input)?
    } else if is_digits(input) {
        parse_number(input, input)?
    } else {
        parse_units(input)?
    };

    debug!("Parsed '{}' as {} seconds", input, seconds);
    Ok(TimerDuration::from_secs(seconds))
}

impl FromStr for TimerDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

/// Parses `H:MM:SS` or `MM:SS`.
fn parse_clock(input: &str) -> Result<u64, ParseError> {
    let components: Vec<&str> = input.split(':').collect();
    if components.len() > MAX_CLOCK_COMPONENTS {
        return Err(invalid_format(input));
    }

    let last = components.len() - 1;
    components
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (index, component)| {
            if !is_digits(component) {
                return Err(invalid_format(input));
            }
            let value = parse_number(component, input)?;
            if index > 0 && value >= SECONDS_PER_MINUTE {
                return Err(ParseError::OutOfRange {
                    input: input.to_string(),
                    component: if index == last { "秒" } else { "分" },
                });
            }
            total
                .checked_mul(SECONDS_PER_MINUTE)
                .and_then(|shifted| shifted.checked_add(value))
                .ok_or_else(|| overflow(input))
        })
}

/// Parses a sequence of `<n>h`, `<n>m`, `<n>s` tokens.
fn parse_units(input: &str) -> Result<u64, ParseError> {
    let lowered = input.to_ascii_lowercase();
    let mut rest = lowered.as_str();
    let mut total: u64 = 0;
    let mut last_rank: Option<u8> = None;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Err(invalid_format(input));
        }
        let (digits, tail) = rest.split_at(digits_len);

        let mut chars = tail.chars();
        let (rank, factor) = match chars.next() {
            Some('h') => (0, SECONDS_PER_HOUR),
            Some('m') => (1, SECONDS_PER_MINUTE),
            Some('s') => (2, 1),
            _ => return Err(invalid_format(input)),
        };
        if last_rank.is_some_and(|last| rank <= last) {
            return Err(invalid_format(input));
        }
        last_rank = Some(rank);

        let value = parse_number(digits, input)?;
        total = value
            .checked_mul(factor)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(|| overflow(input))?;

        rest = chars.as_str();
    }

    Ok(total)
}

/// Parses a run of ASCII digits, reporting overflow against the full input.
fn parse_number(digits: &str, input: &str) -> Result<u64, ParseError> {
    digits.parse::<u64>().map_err(|_| overflow(input))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn invalid_format(input: &str) -> ParseError {
    ParseError::InvalidFormat {
        input: input.to_string(),
    }
}

fn overflow(input: &str) -> ParseError {
    ParseError::Overflow {
        input: input.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
