// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time values as defined in RFC 5545 Sections 3.3.4 and 3.3.5.

use std::fmt;

use chumsky::prelude::*;
use jiff::civil::{self, Date, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use lexical::FromLexical;

use crate::keyword::KW_TZID;
use crate::value::ValueError;

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// How a [`DateOrDateTime`] is represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// `YYYYMMDD`, no time of day
    Date,

    /// `YYYYMMDDTHHMMSSZ`
    Utc,

    /// `YYYYMMDDTHHMMSS`, interpreted in the codec's local zone
    Local,

    /// `TZID=<label>:YYYYMMDDTHHMMSS`
    Zoned {
        /// The zone label exactly as written on the wire
        tzid: String,
    },
}

/// Date or date-time value.
///
/// Holds the instant together with the form it was parsed from, so that
/// formatting reproduces the same representation class: a date stays a date,
/// UTC keeps its `Z` and a zoned value keeps its `TZID` label.
///
/// Values carry whole seconds only; sub-second parts are dropped on
/// construction because the wire format cannot express them.
#[derive(Debug, Clone)]
pub struct DateOrDateTime {
    zoned: Zoned,
    form: DateTimeForm,
}

impl DateOrDateTime {
    /// Parse a raw wire value.
    ///
    /// Forms are tried in a fixed order: bare date, `TZID=`-prefixed
    /// date-time, UTC date-time, local date-time. Values without a zone
    /// suffix or label are placed in `local_zone`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownTimeZone`] if a `TZID` label cannot be
    /// resolved and [`ValueError::InvalidTemporalFormat`] if no form matches.
    pub fn parse(value: &str, local_zone: &TimeZone) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidTemporalFormat {
            value: value.to_owned(),
        };

        if let Some(param) = value
            .strip_prefix(KW_TZID)
            .and_then(|rest| rest.strip_prefix('='))
        {
            let (tzid, rest) = param.split_once(':').ok_or_else(invalid)?;
            let zone = resolve_tzid(tzid)?;
            let raw = parse_raw(rest).ok_or_else(invalid)?;
            let Some((time, utc)) = raw.time else {
                return Err(invalid());
            };
            let datetime = raw.date.to_datetime(time);
            let datetime = if utc {
                datetime
                    .to_zoned(TimeZone::UTC)
                    .map_err(|_| invalid())?
                    .with_time_zone(zone.clone())
                    .datetime()
            } else {
                datetime
            };
            let zoned = canonical(datetime, zone).map_err(|_| invalid())?;
            return Ok(Self {
                zoned,
                form: DateTimeForm::Zoned {
                    tzid: tzid.to_owned(),
                },
            });
        }

        let raw = parse_raw(value).ok_or_else(invalid)?;
        let (zoned, form) = match raw.time {
            None => (raw.date.to_zoned(TimeZone::UTC), DateTimeForm::Date),
            Some((time, true)) => (
                raw.date.to_datetime(time).to_zoned(TimeZone::UTC),
                DateTimeForm::Utc,
            ),
            Some((time, false)) => (
                raw.date.to_datetime(time).to_zoned(local_zone.clone()),
                DateTimeForm::Local,
            ),
        };
        Ok(Self {
            zoned: zoned.map_err(|_| invalid())?,
            form,
        })
    }

    /// Create a date-only value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemporalFormat`] if midnight UTC of the
    /// date is out of the supported range.
    pub fn from_date(date: Date) -> Result<Self, ValueError> {
        let zoned =
            date.to_zoned(TimeZone::UTC)
                .map_err(|_| ValueError::InvalidTemporalFormat {
                    value: date.to_string(),
                })?;
        Ok(Self {
            zoned,
            form: DateTimeForm::Date,
        })
    }

    /// Create a UTC date-time value.
    #[must_use]
    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self {
            zoned: whole_seconds(timestamp).to_zoned(TimeZone::UTC),
            form: DateTimeForm::Utc,
        }
    }

    /// Create a local date-time value from a wall-clock time.
    ///
    /// Only the wall-clock time is written, and decoding places it in
    /// [`CodecOptions::local_zone`](crate::CodecOptions::local_zone). Pass
    /// that same zone here: a value built in any other zone decodes to a
    /// different instant and does not compare equal after a round trip.
    /// Ambiguous and skipped wall-clock times resolve the way decoding does.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemporalFormat`] if the date-time is out
    /// of the supported range in `local_zone`.
    pub fn from_local(
        datetime: civil::DateTime,
        local_zone: &TimeZone,
    ) -> Result<Self, ValueError> {
        Ok(Self {
            zoned: canonical(datetime, local_zone.clone())?,
            form: DateTimeForm::Local,
        })
    }

    /// Create an explicitly zoned value labelled with the zone's IANA name.
    ///
    /// The label is written with its first `/` replaced by `-`, the inverse
    /// of the translation applied when parsing. Only the wall-clock time is
    /// written, so an instant in the repeated hour of a backward transition
    /// is stored as the earlier occurrence, the one decoding yields.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownTimeZone`] if the zone has no IANA name,
    /// e.g. a fixed offset, and [`ValueError::InvalidTemporalFormat`] if the
    /// wall-clock time is out of the supported range.
    pub fn from_zoned(zoned: &Zoned) -> Result<Self, ValueError> {
        let tz = zoned.time_zone();
        let Some(name) = tz.iana_name() else {
            return Err(ValueError::UnknownTimeZone {
                tzid: format!("{}", zoned.offset()),
            });
        };
        Ok(Self {
            zoned: canonical(zoned.datetime(), tz.clone())?,
            form: DateTimeForm::Zoned {
                tzid: name.replacen('/', "-", 1),
            },
        })
    }

    /// The instant, viewed in the zone it was parsed or created in.
    #[must_use]
    pub const fn zoned(&self) -> &Zoned {
        &self.zoned
    }

    /// The instant as a UTC timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.zoned.timestamp()
    }

    /// The wire form of this value.
    #[must_use]
    pub const fn form(&self) -> &DateTimeForm {
        &self.form
    }

    /// Whether the value carries no time of day.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self.form, DateTimeForm::Date)
    }

    /// Whether the value carries an explicit `TZID` label.
    #[must_use]
    pub const fn has_tzid(&self) -> bool {
        matches!(self.form, DateTimeForm::Zoned { .. })
    }

    /// Whether the value is a UTC date-time.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// The `TZID` label, if any.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }
}

impl PartialEq for DateOrDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.form == other.form && self.zoned.timestamp() == other.zoned.timestamp()
    }
}

impl Eq for DateOrDateTime {}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let datetime = self.zoned.datetime();
        match &self.form {
            DateTimeForm::Date => write_date(f, datetime.date()),
            DateTimeForm::Utc => {
                write_date_time(f, datetime)?;
                write!(f, "Z")
            }
            DateTimeForm::Local => write_date_time(f, datetime),
            DateTimeForm::Zoned { tzid } => {
                write!(f, "{KW_TZID}={tzid}:")?;
                write_date_time(f, datetime)
            }
        }
    }
}

/// Format a date as `YYYYMMDD`.
fn write_date(f: &mut fmt::Formatter<'_>, date: Date) -> fmt::Result {
    write!(f, "{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Format a civil date-time as `YYYYMMDDTHHMMSS`.
fn write_date_time(f: &mut fmt::Formatter<'_>, datetime: civil::DateTime) -> fmt::Result {
    write_date(f, datetime.date())?;
    write!(
        f,
        "T{:02}{:02}{:02}",
        datetime.hour(),
        datetime.minute(),
        datetime.second()
    )
}

/// Resolve a wall-clock time in `zone` at whole seconds, as decoding does.
fn canonical(datetime: civil::DateTime, zone: TimeZone) -> Result<Zoned, ValueError> {
    let invalid = || ValueError::InvalidTemporalFormat {
        value: datetime.to_string(),
    };
    let time = Time::new(datetime.hour(), datetime.minute(), datetime.second(), 0)
        .map_err(|_| invalid())?;
    datetime
        .date()
        .to_datetime(time)
        .to_zoned(zone)
        .map_err(|_| invalid())
}

fn whole_seconds(timestamp: Timestamp) -> Timestamp {
    Timestamp::from_second(timestamp.as_second()).unwrap_or(timestamp)
}

/// Resolve a wire `TZID` label, translating its first `-` to `/`.
fn resolve_tzid(tzid: &str) -> Result<TimeZone, ValueError> {
    let name = tzid.replacen('-', "/", 1);
    TimeZone::get(&name)
        .or_else(|_| TimeZone::get(tzid))
        .map_err(|err| {
            tracing::debug!(tzid, %err, "cannot resolve time zone");
            ValueError::UnknownTimeZone {
                tzid: tzid.to_owned(),
            }
        })
}

/// A date with an optional time of day and UTC marker, before any zone is
/// applied.
struct RawDateTime {
    date: Date,
    time: Option<(Time, bool)>,
}

fn parse_raw(src: &str) -> Option<RawDateTime> {
    value_date_time()
        .parse(src)
        .into_result()
        .map_err(|errs| tracing::debug!(src, ?errs, "not a date or date-time"))
        .ok()
}

/// Format Definition:
///
/// ```txt
/// date-value  = date-fullyear date-month date-mday
/// date-time   = date-value ["T" time-hour time-minute [time-second] ["Z"]]
/// ```
fn value_date_time<'src>() -> impl Parser<'src, &'src str, RawDateTime, Extra<'src>> {
    let date = number::<i16>(4)
        .then(number::<i8>(2))
        .then(number::<i8>(2))
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day).map_err(|err| Rich::custom(span, err))
        });

    let time = number::<i8>(2)
        .then(number::<i8>(2))
        .then(number::<i8>(2).or_not())
        .try_map(|((hour, minute), second), span| {
            Time::new(hour, minute, second.unwrap_or(0), 0).map_err(|err| Rich::custom(span, err))
        });

    let utc = just('Z').or_not().map(|z| z.is_some());

    date.then(just('T').ignore_then(time).then(utc).or_not())
        .then_ignore(end())
        .map(|(date, time)| RawDateTime { date, time })
}

/// Exactly `width` ASCII digits, converted to `T`.
fn number<'src, T>(width: usize) -> impl Parser<'src, &'src str, T, Extra<'src>> + Clone
where
    T: FromLexical,
{
    text::digits(10)
        .exactly(width)
        .to_slice()
        .try_map(|digits: &str, span| {
            lexical::parse::<T, _>(digits).map_err(|_| Rich::custom(span, "number out of range"))
        })
}
