// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structural keywords of the `VEVENT` wire format.
//!
//! Property names live on [`PropertyKind`](crate::property::PropertyKind).

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";
pub const KW_VEVENT: &str = "VEVENT";

/// Parameter carried inline at the head of a zoned date-time value.
pub const KW_TZID: &str = "TZID";
