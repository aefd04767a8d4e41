// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT) as defined in RFC 5545 Section 3.6.1.

use crate::property::PropertyKind;
use crate::value::{DateOrDateTime, Duration};

const MAX_TEXT_CHARS: usize = 100;
const MAX_LONG_TEXT_CHARS: usize = 500;
const MAX_CATEGORIES: usize = 100;

/// Event component (VEVENT)
///
/// A flat record: empty strings, `None`, a zero duration and a zero sequence
/// all mean the property is absent and is not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VEvent {
    /// Access classification, e.g. `PUBLIC`, `PRIVATE`, `CONFIDENTIAL`
    pub class: String,

    /// When the event was created in the calendar store
    pub created: Option<DateOrDateTime>,

    /// Long description of the event
    pub description: String,

    /// Start of the event
    pub dt_start: Option<DateOrDateTime>,

    /// Geographic position, kept as the raw `lat;lon` text
    pub geo: String,

    /// Last revision of the event in the calendar store
    pub last_modified: Option<DateOrDateTime>,

    /// Venue of the event
    pub location: String,

    /// Organizer address
    pub organizer: String,

    /// Priority, kept as raw text
    pub priority: String,

    /// When this representation of the event was created; required
    pub dt_stamp: Option<DateOrDateTime>,

    /// Revision counter
    pub sequence: u32,

    /// Overall status, e.g. `CONFIRMED`
    pub status: String,

    /// Short title of the event
    pub summary: String,

    /// Time transparency, e.g. `OPAQUE`
    pub transp: String,

    /// Globally unique identifier
    pub uid: String,

    /// URL associated with the event
    pub url: String,

    /// Recurrence instance identifier, kept as raw text
    pub recurrence_id: String,

    /// End of the event
    pub dt_end: Option<DateOrDateTime>,

    /// Length of the event, alternative to `dt_end`
    pub duration: Duration,

    /// Attachment reference
    pub attach: String,

    /// Attendee address
    pub attendee: String,

    /// Categories, comma-joined on the wire
    pub categories: Vec<String>,

    /// Free-form comment
    pub comment: String,

    /// Contact information
    pub contact: String,

    /// Exception date
    pub ex_date: Option<DateOrDateTime>,

    /// Exception rule, passed through unparsed
    pub ex_rule: String,

    /// Request status
    pub r_status: String,

    /// Related component reference
    pub related: String,

    /// Resources needed for the event
    pub resources: String,

    /// Recurrence date
    pub r_date: Option<DateOrDateTime>,

    /// Recurrence rule, passed through unparsed
    pub r_rule: String,

    /// Extension property
    pub x_prop: String,
}

impl VEvent {
    /// Check the record against its field constraints.
    ///
    /// Text fields hold at most 100 characters except the description, which
    /// holds up to 500; categories hold at most 100 items, and `DTSTAMP` must
    /// be present.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, in dispatch-table order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        use PropertyKind as P;

        let texts: [(PropertyKind, &str, usize); 22] = [
            (P::Class, &self.class, MAX_TEXT_CHARS),
            (P::Description, &self.description, MAX_LONG_TEXT_CHARS),
            (P::Geo, &self.geo, MAX_TEXT_CHARS),
            (P::Location, &self.location, MAX_TEXT_CHARS),
            (P::Organizer, &self.organizer, MAX_TEXT_CHARS),
            (P::Priority, &self.priority, MAX_TEXT_CHARS),
            (P::Status, &self.status, MAX_TEXT_CHARS),
            (P::Summary, &self.summary, MAX_TEXT_CHARS),
            (P::Transp, &self.transp, MAX_TEXT_CHARS),
            (P::Uid, &self.uid, MAX_TEXT_CHARS),
            (P::Url, &self.url, MAX_TEXT_CHARS),
            (P::RecurrenceId, &self.recurrence_id, MAX_TEXT_CHARS),
            (P::Attach, &self.attach, MAX_TEXT_CHARS),
            (P::Attendee, &self.attendee, MAX_TEXT_CHARS),
            (P::Comment, &self.comment, MAX_TEXT_CHARS),
            (P::Contact, &self.contact, MAX_TEXT_CHARS),
            (P::ExRule, &self.ex_rule, MAX_TEXT_CHARS),
            (P::RStatus, &self.r_status, MAX_TEXT_CHARS),
            (P::Related, &self.related, MAX_TEXT_CHARS),
            (P::Resources, &self.resources, MAX_TEXT_CHARS),
            (P::RRule, &self.r_rule, MAX_TEXT_CHARS),
            (P::XProp, &self.x_prop, MAX_TEXT_CHARS),
        ];
        for (property, text, max) in texts {
            let len = text.chars().count();
            if len > max {
                return Err(ValidationError::TooLong { property, max, len });
            }
        }

        if self.categories.len() > MAX_CATEGORIES {
            return Err(ValidationError::TooManyItems {
                property: P::Categories,
                max: MAX_CATEGORIES,
                len: self.categories.len(),
            });
        }

        if self.dt_stamp.is_none() {
            return Err(ValidationError::MissingProperty {
                property: P::DtStamp,
            });
        }
        Ok(())
    }
}

/// A violated field constraint.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A text field exceeds its length bound.
    #[error("property {property} is {len} characters long, at most {max} allowed")]
    TooLong {
        /// The offending property
        property: PropertyKind,
        /// The bound in characters
        max: usize,
        /// The actual length in characters
        len: usize,
    },

    /// A list field has too many items.
    #[error("property {property} has {len} items, at most {max} allowed")]
    TooManyItems {
        /// The offending property
        property: PropertyKind,
        /// The bound in items
        max: usize,
        /// The actual item count
        len: usize,
    },

    /// A required property is absent.
    #[error("missing required property '{property}'")]
    MissingProperty {
        /// The property that is missing
        property: PropertyKind,
    },
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn stamped() -> VEvent {
        VEvent {
            dt_stamp: Some(DateOrDateTime::from_timestamp(Timestamp::UNIX_EPOCH)),
            ..VEvent::default()
        }
    }

    #[test]
    fn default_event_is_empty() {
        let event = VEvent::default();
        assert!(event.summary.is_empty());
        assert!(event.dt_start.is_none());
        assert!(event.duration.is_zero());
        assert_eq!(event.sequence, 0);
    }

    #[test]
    fn requires_dt_stamp() {
        assert_eq!(
            VEvent::default().validate(),
            Err(ValidationError::MissingProperty {
                property: PropertyKind::DtStamp
            })
        );
        assert_eq!(stamped().validate(), Ok(()));
    }

    #[test]
    fn bounds_are_counted_in_characters() {
        let mut event = stamped();
        event.summary = "가".repeat(100);
        assert_eq!(event.validate(), Ok(()));

        event.summary.push('가');
        assert_eq!(
            event.validate(),
            Err(ValidationError::TooLong {
                property: PropertyKind::Summary,
                max: 100,
                len: 101
            })
        );
    }

    #[test]
    fn description_allows_more_than_comment() {
        let mut event = stamped();
        event.description = "d".repeat(500);
        event.comment = "c".repeat(100);
        assert_eq!(event.validate(), Ok(()));

        event.comment.push('c');
        assert_eq!(
            event.validate(),
            Err(ValidationError::TooLong {
                property: PropertyKind::Comment,
                max: 100,
                len: 101
            })
        );

        event.comment.pop();
        event.description.push('d');
        assert!(matches!(
            event.validate(),
            Err(ValidationError::TooLong {
                property: PropertyKind::Description,
                max: 500,
                ..
            })
        ));
    }

    #[test]
    fn limits_category_count() {
        let mut event = stamped();
        event.categories = vec!["x".to_owned(); 101];
        assert!(matches!(
            event.validate(),
            Err(ValidationError::TooManyItems { len: 101, .. })
        ));
    }
}
