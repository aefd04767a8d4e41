// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;

use crate::folding::{FOLD_WIDTH, MIN_FOLD_WIDTH};

/// Options shared by [`EventEncoder`](crate::EventEncoder) and
/// [`EventDecoder`](crate::EventDecoder).
///
/// Nothing is read from the environment implicitly: the zone used for
/// date-times without a `Z` suffix or `TZID` label is part of the options,
/// defaulting to UTC.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Zone in which local (floating) date-times are interpreted.
    ///
    /// Default: `TimeZone::UTC`.
    pub local_zone: TimeZone,

    /// Maximum physical line width in characters, excluding CRLF.
    ///
    /// Default: `78`.
    pub fold_width: usize,

    /// Validate records before encoding and after decoding.
    ///
    /// Default: `false`.
    pub strict: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            local_zone: TimeZone::UTC,
            fold_width: FOLD_WIDTH,
            strict: false,
        }
    }
}

impl CodecOptions {
    /// Default options with the local zone taken from the running system.
    #[must_use]
    pub fn system() -> Self {
        Self::default().local_zone(TimeZone::system())
    }

    /// Set the local zone.
    #[must_use]
    pub fn local_zone(mut self, zone: TimeZone) -> Self {
        self.local_zone = zone;
        self
    }

    /// Set the fold width, clamped to the smallest width that still leaves
    /// room for content after the continuation marker.
    #[must_use]
    pub fn fold_width(mut self, width: usize) -> Self {
        self.fold_width = width.max(MIN_FOLD_WIDTH);
        self
    }

    /// Enable or disable record validation.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
