// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.

use std::fmt;
use std::str::FromStr;

use chumsky::prelude::*;
use jiff::SignedDuration;

use crate::value::ValueError;

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Duration value: a signed, exact amount of elapsed time.
///
/// Only weeks, days, hours, minutes and seconds are expressible, all of
/// fixed length, so the value is a plain number of seconds. A zero duration
/// counts as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration(SignedDuration);

impl Duration {
    /// The zero duration.
    pub const ZERO: Self = Self(SignedDuration::ZERO);

    /// Create a duration from a number of seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(SignedDuration::from_secs(secs))
    }

    /// Parse a raw wire value such as `P15DT5H0M20S` or `-P7W`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidDurationFormat`] if the value does not
    /// follow the duration grammar.
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        value_duration()
            .parse(value)
            .into_result()
            .map_err(|errs| {
                tracing::debug!(value, ?errs, "not a duration");
                ValueError::InvalidDurationFormat {
                    value: value.to_owned(),
                }
            })
    }

    /// Whole seconds, negative for a negative duration.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0.as_secs()
    }

    /// The duration as a `jiff::SignedDuration`.
    #[must_use]
    pub const fn as_signed_duration(self) -> SignedDuration {
        self.0
    }

    /// Whether this duration is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Sub-second precision is dropped.
impl From<SignedDuration> for Duration {
    fn from(value: SignedDuration) -> Self {
        Self::from_secs(value.as_secs())
    }
}

impl From<Duration> for SignedDuration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl FromStr for Duration {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        let mut rest = self.0.as_secs().unsigned_abs();
        if rest == 0 {
            return write!(f, "T0S");
        }

        let weeks = take(&mut rest, WEEK);
        let days = take(&mut rest, DAY);
        write_unit(f, weeks, 'W')?;
        write_unit(f, days, 'D')?;
        if rest > 0 {
            write!(f, "T")?;
            let hours = take(&mut rest, HOUR);
            let minutes = take(&mut rest, MINUTE);
            write_unit(f, hours, 'H')?;
            write_unit(f, minutes, 'M')?;
            write_unit(f, rest, 'S')?;
        }
        Ok(())
    }
}

/// Split off the whole `unit`s of `rest`, leaving the remainder.
fn take(rest: &mut u64, unit: u64) -> u64 {
    let n = *rest / unit;
    *rest %= unit;
    n
}

fn write_unit(f: &mut fmt::Formatter<'_>, n: u64, designator: char) -> fmt::Result {
    if n > 0 {
        write!(f, "{n}{designator}")?;
    }
    Ok(())
}

/// Format Definition:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" [dur-week] [dur-day] ["T" dur-time]
/// dur-time   = [dur-hour] [dur-minute] [dur-second]   ; at least one
/// dur-week   = 1*DIGIT "W"
/// dur-day    = 1*DIGIT "D"
/// dur-hour   = 1*DIGIT "H"
/// dur-minute = 1*DIGIT "M"
/// dur-second = 1*DIGIT "S"
/// ```
///
/// This is looser than RFC 5545 in that weeks may be combined with other
/// units, and at least one unit must be present overall.
fn value_duration<'src>() -> impl Parser<'src, &'src str, Duration, extra::Err<Rich<'src, char>>>
{
    // case-sensitive
    let int = text::digits(10)
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .to_slice()
        .try_map(|digits: &str, span| {
            lexical::parse::<u32, _>(digits).map_err(|_| Rich::custom(span, "number out of range"))
        });

    let component = |designator: char| int.clone().then_ignore(just(designator)).or_not();

    let time = just('T')
        .ignore_then(component('H').then(component('M')).then(component('S')))
        .try_map(|((hour, minute), second), span| match (hour, minute, second) {
            (None, None, None) => Err(Rich::custom(span, "empty time part")),
            _ => Ok((hour, minute, second)),
        });

    let sign = choice((just('+').to(false), just('-').to(true))).or_not();

    sign.then_ignore(just('P'))
        .then(component('W'))
        .then(component('D'))
        .then(time.or_not())
        .then_ignore(end())
        .try_map(|(((negative, week), day), time), span| {
            let (hour, minute, second) = time.unwrap_or((None, None, None));
            let parts = [(week, WEEK), (day, DAY), (hour, HOUR), (minute, MINUTE), (second, SECOND)];
            if parts.iter().all(|(n, _)| n.is_none()) {
                return Err(Rich::custom(span, "duration without any unit"));
            }

            // at most 5 * (2^32 - 1) * WEEK, well within i64
            let total: u64 = parts
                .iter()
                .map(|(n, unit)| u64::from(n.unwrap_or(0)) * unit)
                .sum();
            let secs = i64::try_from(total).map_err(|_| Rich::custom(span, "duration too long"))?;
            Ok(Duration::from_secs(if negative == Some(true) { -secs } else { secs }))
        })
}
