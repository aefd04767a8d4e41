// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

use crate::event::ValidationError;
use crate::property::{PropertyKind, ValueKind};
use crate::value::ValueError;

/// Errors raised while encoding or decoding an event.
///
/// Every variant is recoverable: malformed input never panics, and a failed
/// call produces neither a partial record nor a partial component.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A logical line has no `:` separator.
    #[error("line {line}: missing ':' separator in '{content}'")]
    MalformedLine {
        /// Physical line number where the logical line starts, 1-based
        line: usize,
        /// The unfolded line
        content: String,
    },

    /// A property outside the supported set.
    #[error("unsupported property '{property}'")]
    UnsupportedProperty {
        /// The property name as found
        property: String,
    },

    /// A `BEGIN` or `END` line naming anything but `VEVENT`.
    #[error("unsupported component '{component}'")]
    UnsupportedComponent {
        /// The component name as found
        component: String,
    },

    /// A known property whose value failed its typed parse or render.
    #[error("invalid value for property {property}: {source}")]
    InvalidValue {
        /// The property the value belongs to
        property: PropertyKind,
        /// What was wrong with the value
        #[source]
        source: ValueError,
    },

    /// A field getter produced a value kind its table entry does not declare.
    #[error("cannot render {found} value for property {property}, expected {expected}")]
    UnsupportedValueType {
        /// The property being encoded
        property: PropertyKind,
        /// The kind declared by the dispatch table
        expected: ValueKind,
        /// The kind the getter produced
        found: ValueKind,
    },

    /// A physical line is not valid UTF-8.
    #[error("line {line}: invalid UTF-8")]
    InvalidUtf8 {
        /// Physical line number, 1-based
        line: usize,
    },

    /// The record violates a field constraint (strict mode only).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
