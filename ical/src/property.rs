// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property kinds and the field dispatch table.
//!
//! [`FIELDS`] is the single source of truth shared by the encoder and the
//! decoder: its order is the encoding order, and decoding looks up setters
//! in it by property kind.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::event::VEvent;
use crate::options::CodecOptions;
use crate::value::{DateOrDateTime, Duration, ValueError, escape, unescape};

/// Kind of event property.
///
/// Names are matched ASCII case-insensitively when parsed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum PropertyKind {
    #[strum(to_string = "CLASS")]
    Class,
    #[strum(to_string = "CREATED")]
    Created,
    #[strum(to_string = "DESCRIPTION")]
    Description,
    #[strum(to_string = "DTSTART")]
    DtStart,
    #[strum(to_string = "GEO")]
    Geo,
    #[strum(to_string = "LAST-MODIFIED")]
    LastModified,
    #[strum(to_string = "LOCATION")]
    Location,
    #[strum(to_string = "ORGANIZER")]
    Organizer,
    #[strum(to_string = "PRIORITY")]
    Priority,
    #[strum(to_string = "DTSTAMP")]
    DtStamp,
    /// Sequence number; `SEQUENCE` is accepted when parsing
    #[strum(to_string = "SEQ", serialize = "SEQUENCE")]
    Seq,
    #[strum(to_string = "STATUS")]
    Status,
    #[strum(to_string = "SUMMARY")]
    Summary,
    #[strum(to_string = "TRANSP")]
    Transp,
    #[strum(to_string = "UID")]
    Uid,
    #[strum(to_string = "URL")]
    Url,
    #[strum(to_string = "RECURRENCE-ID")]
    RecurrenceId,
    #[strum(to_string = "DTEND")]
    DtEnd,
    #[strum(to_string = "DURATION")]
    Duration,
    #[strum(to_string = "ATTACH")]
    Attach,
    #[strum(to_string = "ATTENDEE")]
    Attendee,
    #[strum(to_string = "CATEGORIES")]
    Categories,
    #[strum(to_string = "COMMENT")]
    Comment,
    #[strum(to_string = "CONTACT")]
    Contact,
    #[strum(to_string = "EXDATE")]
    ExDate,
    #[strum(to_string = "EXRULE")]
    ExRule,
    #[strum(to_string = "RSTATUS")]
    RStatus,
    #[strum(to_string = "RELATED")]
    Related,
    #[strum(to_string = "RESOURCES")]
    Resources,
    #[strum(to_string = "RDATE")]
    RDate,
    #[strum(to_string = "RRULE")]
    RRule,
    #[strum(to_string = "X-PROP")]
    XProp,
}

impl PropertyKind {
    /// The wire name written for this property.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Kind of value a property carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ValueKind {
    /// Escaped free text
    #[strum(to_string = "TEXT")]
    Text,
    /// Comma-joined list of text items
    #[strum(to_string = "TEXT-LIST")]
    TextList,
    /// Date or date-time
    #[strum(to_string = "DATE-TIME")]
    DateTime,
    /// Duration
    #[strum(to_string = "DURATION")]
    Duration,
    /// Non-negative integer
    #[strum(to_string = "INTEGER")]
    Integer,
}

/// A field value borrowed from a [`VEvent`], ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldValue<'a> {
    Text(&'a str),
    TextList(&'a [String]),
    DateTime(Option<&'a DateOrDateTime>),
    Duration(Duration),
    Integer(u32),
}

impl FieldValue<'_> {
    pub(crate) const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::TextList(_) => ValueKind::TextList,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Duration(_) => ValueKind::Duration,
            Self::Integer(_) => ValueKind::Integer,
        }
    }

    /// Render the wire value, or `None` if the field is empty.
    pub(crate) fn render(&self) -> Result<Option<String>, ValueError> {
        let rendered = match self {
            Self::Text(text) => (!text.is_empty()).then(|| escape(text)),
            Self::TextList(items) => {
                let unrepresentable =
                    |item: &&String| item.is_empty() || item.contains([',', '\r', '\n']);
                if let Some(item) = items.iter().find(unrepresentable) {
                    return Err(ValueError::InvalidListItem { item: item.clone() });
                }
                (!items.is_empty()).then(|| items.join(","))
            }
            Self::DateTime(value) => value.map(ToString::to_string),
            Self::Duration(duration) => (!duration.is_zero()).then(|| duration.to_string()),
            Self::Integer(n) => (*n != 0).then(|| n.to_string()),
        };
        Ok(rendered)
    }
}

type Getter = for<'a> fn(&'a VEvent) -> FieldValue<'a>;
type Setter = fn(&mut VEvent, &str, &CodecOptions) -> Result<(), ValueError>;

/// One row of the dispatch table.
pub(crate) struct Field {
    pub(crate) kind: PropertyKind,
    pub(crate) value: ValueKind,
    pub(crate) get: Getter,
    pub(crate) set: Setter,
}

impl Field {
    /// Find the table row for `kind`.
    pub(crate) fn of(kind: PropertyKind) -> Option<&'static Self> {
        FIELDS.iter().find(|field| field.kind == kind)
    }
}

macro_rules! text_field {
    ($kind:ident, $field:ident) => {
        Field {
            kind: PropertyKind::$kind,
            value: ValueKind::Text,
            get: |event| FieldValue::Text(&event.$field),
            set: |event, raw, _| {
                event.$field = unescape(raw);
                Ok(())
            },
        }
    };
}

macro_rules! date_time_field {
    ($kind:ident, $field:ident) => {
        Field {
            kind: PropertyKind::$kind,
            value: ValueKind::DateTime,
            get: |event| FieldValue::DateTime(event.$field.as_ref()),
            set: |event, raw, options| {
                event.$field = Some(DateOrDateTime::parse(raw, &options.local_zone)?);
                Ok(())
            },
        }
    };
}

/// The dispatch table, in encoding order.
pub(crate) static FIELDS: &[Field] = &[
    text_field!(Class, class),
    date_time_field!(Created, created),
    text_field!(Description, description),
    date_time_field!(DtStart, dt_start),
    text_field!(Geo, geo),
    date_time_field!(LastModified, last_modified),
    text_field!(Location, location),
    text_field!(Organizer, organizer),
    text_field!(Priority, priority),
    date_time_field!(DtStamp, dt_stamp),
    Field {
        kind: PropertyKind::Seq,
        value: ValueKind::Integer,
        get: |event| FieldValue::Integer(event.sequence),
        set: |event, raw, _| {
            event.sequence =
                lexical::parse::<u32, _>(raw).map_err(|_| ValueError::InvalidInteger {
                    value: raw.to_owned(),
                })?;
            Ok(())
        },
    },
    text_field!(Status, status),
    text_field!(Summary, summary),
    text_field!(Transp, transp),
    text_field!(Uid, uid),
    text_field!(Url, url),
    text_field!(RecurrenceId, recurrence_id),
    date_time_field!(DtEnd, dt_end),
    Field {
        kind: PropertyKind::Duration,
        value: ValueKind::Duration,
        get: |event| FieldValue::Duration(event.duration),
        set: |event, raw, _| {
            event.duration = Duration::parse(raw)?;
            Ok(())
        },
    },
    text_field!(Attach, attach),
    text_field!(Attendee, attendee),
    Field {
        kind: PropertyKind::Categories,
        value: ValueKind::TextList,
        get: |event| FieldValue::TextList(&event.categories),
        set: |event, raw, _| {
            // empty items are dropped
            event.categories = raw
                .split(',')
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect();
            Ok(())
        },
    },
    text_field!(Comment, comment),
    text_field!(Contact, contact),
    date_time_field!(ExDate, ex_date),
    text_field!(ExRule, ex_rule),
    text_field!(RStatus, r_status),
    text_field!(Related, related),
    text_field!(Resources, resources),
    date_time_field!(RDate, r_date),
    text_field!(RRule, r_rule),
    text_field!(XProp, x_prop),
];
