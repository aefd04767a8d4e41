// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Encode and decode iCalendar event components (`VEVENT`, RFC 5545).
//!
//! An event is a flat record of the properties listed on [`PropertyKind`].
//! Encoding writes a folded, escaped `BEGIN:VEVENT` ... `END:VEVENT` block;
//! decoding reads one back.
//!
//! ```
//! use qrcodeapi_ical::{CodecOptions, decode_str, encode_to_string};
//!
//! let src = "BEGIN:VEVENT\r\nDTSTART:20180601T070000Z\r\nSUMMARY:Summer Vacation!\r\nEND:VEVENT\r\n";
//! let options = CodecOptions::default();
//! let event = decode_str(src, &options).unwrap();
//! assert_eq!(event.summary, "Summer Vacation!");
//! assert_eq!(encode_to_string(&event, &options).unwrap(), src);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::module_name_repetitions)]

mod codec;
mod error;
mod event;
pub mod folding;
pub(crate) mod keyword;
mod options;
pub mod property;
pub mod value;

pub use crate::codec::{EventDecoder, EventEncoder, decode_str, encode_to_string};
pub use crate::error::CodecError;
pub use crate::event::{VEvent, ValidationError};
pub use crate::options::CodecOptions;
pub use crate::property::{PropertyKind, ValueKind};
pub use crate::value::{
    DateOrDateTime, DateTimeForm, Duration, ValueError, escape, unescape,
};
