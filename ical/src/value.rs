// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value types and their wire grammars.
//!
//! Each value type owns both directions of its conversion: parsing a raw
//! wire string and formatting back to the canonical wire form.

mod datetime;
mod duration;
mod text;

pub use crate::value::datetime::{DateOrDateTime, DateTimeForm};
pub use crate::value::duration::Duration;
pub use crate::value::text::{escape, unescape};

/// Errors raised while parsing a single property value.
///
/// The offending property is not known at this layer; the codec attaches
/// it when wrapping the error in
/// [`CodecError::InvalidValue`](crate::CodecError::InvalidValue).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value matches none of the date or date-time forms.
    #[error("invalid date or date-time '{value}'")]
    InvalidTemporalFormat {
        /// The rejected raw value
        value: String,
    },

    /// A `TZID` label does not name a known time zone.
    #[error("unknown time zone '{tzid}'")]
    UnknownTimeZone {
        /// The label as it appeared on the wire
        tzid: String,
    },

    /// The value is not a valid duration.
    #[error("invalid duration '{value}'")]
    InvalidDurationFormat {
        /// The rejected raw value
        value: String,
    },

    /// The value is not a non-negative integer.
    #[error("invalid integer '{value}'")]
    InvalidInteger {
        /// The rejected raw value
        value: String,
    },

    /// A list item cannot be represented in a comma-joined list: it is
    /// empty or contains a comma or a line break.
    #[error("list item '{item}' is empty or contains a comma or a line break")]
    InvalidListItem {
        /// The offending item
        item: String,
    },
}
