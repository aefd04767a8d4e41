// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event encoder and decoder.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::CodecError;
use crate::event::VEvent;
use crate::folding::{LineFolder, LineUnfolder, LogicalLine};
use crate::keyword::{KW_BEGIN, KW_END, KW_VEVENT};
use crate::options::CodecOptions;
use crate::property::{FIELDS, Field, PropertyKind};

/// Writes events as folded `VEVENT` components.
#[derive(Debug)]
pub struct EventEncoder<W: Write> {
    writer: W,
    options: CodecOptions,
}

impl<W: Write> EventEncoder<W> {
    /// Create a new encoder writing to `writer`.
    #[must_use]
    pub fn new(writer: W, options: CodecOptions) -> Self {
        Self { writer, options }
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this encoder, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Encode one event as a complete `BEGIN:VEVENT` ... `END:VEVENT` block.
    ///
    /// Non-empty fields are written in dispatch-table order. The component is
    /// rendered in memory first, so nothing reaches the writer on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be rendered, if the event fails
    /// validation in strict mode, or if writing fails.
    #[tracing::instrument(skip_all)]
    pub fn encode(&mut self, event: &VEvent) -> Result<(), CodecError> {
        if self.options.strict {
            event.validate()?;
        }
        let rendered = render(FIELDS, event, self.options.fold_width)?;
        self.writer.write_all(&rendered)?;
        Ok(())
    }
}

fn render(fields: &[Field], event: &VEvent, width: usize) -> Result<Vec<u8>, CodecError> {
    let mut folder = LineFolder::new(Vec::new(), width);
    folder.write_line(&format!("{KW_BEGIN}:{KW_VEVENT}"))?;

    let mut count = 0;
    for field in fields {
        let value = (field.get)(event);
        if value.kind() != field.value {
            return Err(CodecError::UnsupportedValueType {
                property: field.kind,
                expected: field.value,
                found: value.kind(),
            });
        }

        let rendered = value.render().map_err(|source| CodecError::InvalidValue {
            property: field.kind,
            source,
        })?;
        if let Some(rendered) = rendered {
            tracing::trace!(property = %field.kind, "writing property");
            folder.write_line(&format!("{}:{rendered}", field.kind))?;
            count += 1;
        }
    }

    folder.write_line(&format!("{KW_END}:{KW_VEVENT}"))?;
    tracing::debug!(properties = count, "encoded event");
    Ok(folder.into_writer())
}

/// Reads a `VEVENT` component into an event record.
#[derive(Debug)]
pub struct EventDecoder<R: BufRead> {
    unfolder: LineUnfolder<R>,
    options: CodecOptions,
}

impl<R: BufRead> EventDecoder<R> {
    /// Create a new decoder reading from `reader`.
    #[must_use]
    pub fn new(reader: R, options: CodecOptions) -> Self {
        Self {
            unfolder: LineUnfolder::new(reader),
            options,
        }
    }

    /// Decode one event.
    ///
    /// Reading stops after `END:VEVENT` or at end of stream. Property names
    /// are matched case-insensitively; a later occurrence of a property
    /// overwrites an earlier one.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line, unsupported property or component,
    /// invalid value, or I/O failure. No partial record is returned.
    #[tracing::instrument(skip_all)]
    pub fn decode(&mut self) -> Result<VEvent, CodecError> {
        let mut event = VEvent::default();
        for line in &mut self.unfolder {
            let LogicalLine { line, content } = line?;
            tracing::trace!(line, %content, "dispatching line");

            let Some((name, value)) = content.split_once(':') else {
                return Err(CodecError::MalformedLine { line, content });
            };

            if name.eq_ignore_ascii_case(KW_BEGIN) || name.eq_ignore_ascii_case(KW_END) {
                if !value.eq_ignore_ascii_case(KW_VEVENT) {
                    tracing::debug!(line, value, "unsupported component");
                    return Err(CodecError::UnsupportedComponent {
                        component: value.to_owned(),
                    });
                }
                if name.eq_ignore_ascii_case(KW_END) {
                    break;
                }
                continue;
            }

            let Some(field) = PropertyKind::from_str(name).ok().and_then(Field::of) else {
                tracing::debug!(line, name, "unsupported property");
                return Err(CodecError::UnsupportedProperty {
                    property: name.to_owned(),
                });
            };
            (field.set)(&mut event, value, &self.options).map_err(|source| {
                tracing::debug!(line, property = %field.kind, %source, "invalid value");
                CodecError::InvalidValue {
                    property: field.kind,
                    source,
                }
            })?;
        }

        if self.options.strict {
            event.validate()?;
        }
        Ok(event)
    }
}

/// Encode one event into a string.
///
/// # Errors
///
/// See [`EventEncoder::encode`].
pub fn encode_to_string(event: &VEvent, options: &CodecOptions) -> Result<String, CodecError> {
    let mut encoder = EventEncoder::new(Vec::new(), options.clone());
    encoder.encode(event)?;
    String::from_utf8(encoder.into_writer())
        .map_err(|err| CodecError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Decode one event from a string.
///
/// # Errors
///
/// See [`EventDecoder::decode`].
pub fn decode_str(text: &str, options: &CodecOptions) -> Result<VEvent, CodecError> {
    EventDecoder::new(text.as_bytes(), options.clone()).decode()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::event::ValidationError;
    use crate::property::{FieldValue, ValueKind};
    use crate::value::{DateOrDateTime, Duration, ValueError};

    fn options() -> CodecOptions {
        CodecOptions::default()
    }

    fn encode(event: &VEvent) -> String {
        encode_to_string(event, &options()).unwrap()
    }

    fn decode(text: &str) -> Result<VEvent, CodecError> {
        decode_str(text, &options())
    }

    fn utc(s: &str) -> DateOrDateTime {
        DateOrDateTime::from_timestamp(s.parse::<Timestamp>().unwrap())
    }

    #[test]
    fn encodes_empty_event_as_framing_only() {
        assert_eq!(
            encode(&VEvent::default()),
            "BEGIN:VEVENT\r\nEND:VEVENT\r\n"
        );
    }

    #[test]
    fn encodes_in_table_order() {
        let event = VEvent {
            x_prop: "x".to_owned(),
            summary: "s".to_owned(),
            class: "PUBLIC".to_owned(),
            sequence: 3,
            dt_stamp: Some(utc("2018-06-01T07:00:00Z")),
            duration: Duration::from_secs(90),
            categories: vec!["a".to_owned(), "b".to_owned()],
            ..VEvent::default()
        };
        #[rustfmt::skip]
        let expected = concat!(
            "BEGIN:VEVENT\r\n",
            "CLASS:PUBLIC\r\n",
            "DTSTAMP:20180601T070000Z\r\n",
            "SEQ:3\r\n",
            "SUMMARY:s\r\n",
            "DURATION:PT1M30S\r\n",
            "CATEGORIES:a,b\r\n",
            "X-PROP:x\r\n",
            "END:VEVENT\r\n",
        );
        assert_eq!(encode(&event), expected);
    }

    #[test]
    fn escapes_text_values() {
        let event = VEvent {
            description: "a,b;c\\d\ne".to_owned(),
            ..VEvent::default()
        };
        assert!(encode(&event).contains("DESCRIPTION:a\\,b\\;c\\\\d\\ne\r\n"));
    }

    #[test]
    fn decodes_properties_case_insensitively() {
        let event = decode("begin:vevent\r\nsummary:hi\r\nSequence:4\r\nend:vevent\r\n").unwrap();
        assert_eq!(event.summary, "hi");
        assert_eq!(event.sequence, 4);
    }

    #[test]
    fn later_property_overwrites_earlier() {
        let event = decode("BEGIN:VEVENT\r\nUID:a\r\nUID:b\r\nEND:VEVENT\r\n").unwrap();
        assert_eq!(event.uid, "b");
    }

    #[test]
    fn value_may_contain_colons() {
        let event = decode("BEGIN:VEVENT\r\nURL:https://example.com:8080/\r\nEND:VEVENT\r\n")
            .unwrap();
        assert_eq!(event.url, "https://example.com:8080/");
    }

    #[test]
    fn stops_after_end() {
        let event = decode("BEGIN:VEVENT\r\nUID:a\r\nEND:VEVENT\r\nUID:b\r\nBOGUS:1\r\n").unwrap();
        assert_eq!(event.uid, "a");
    }

    #[test]
    fn empty_input_yields_empty_event() {
        assert_eq!(decode("").unwrap(), VEvent::default());
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = decode("BEGIN:VEVENT\r\nSUMMARY:a\r\nGARBAGE\r\nEND:VEVENT\r\n").unwrap_err();
        assert!(
            matches!(err, CodecError::MalformedLine { line: 3, ref content } if content == "GARBAGE"),
            "{err:?}"
        );
    }

    #[test]
    fn rejects_unknown_property() {
        let err = decode("BEGIN:VEVENT\r\nX-CUSTOM:1\r\nEND:VEVENT\r\n").unwrap_err();
        assert!(
            matches!(err, CodecError::UnsupportedProperty { ref property } if property == "X-CUSTOM"),
            "{err:?}"
        );
    }

    #[test]
    fn rejects_other_components() {
        for src in [
            "BEGIN:VCALENDAR\r\n",
            "BEGIN:VEVENT\r\nEND:VTODO\r\n",
            "BEGIN:\r\n",
        ] {
            assert!(
                matches!(decode(src), Err(CodecError::UnsupportedComponent { .. })),
                "{src:?}"
            );
        }
    }

    #[test]
    fn attaches_property_to_value_errors() {
        #[rustfmt::skip]
        let fail_cases = [
            ("DTSTART:2018-06-01", PropertyKind::DtStart),
            ("DTEND:TZID=Nowhere-Land:20180601T070000", PropertyKind::DtEnd),
            ("DURATION:P", PropertyKind::Duration),
            ("SEQ:-1", PropertyKind::Seq),
        ];
        for (line, expected) in fail_cases {
            let src = format!("BEGIN:VEVENT\r\n{line}\r\nEND:VEVENT\r\n");
            match decode(&src) {
                Err(CodecError::InvalidValue { property, .. }) => assert_eq!(property, expected),
                other => panic!("{line}: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unrepresentable_categories() {
        let event = VEvent {
            categories: vec!["a,b".to_owned()],
            ..VEvent::default()
        };
        let mut encoder = EventEncoder::new(Vec::new(), options());
        let err = encoder.encode(&event).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                property: PropertyKind::Categories,
                source: ValueError::InvalidListItem { .. }
            }
        ));
        assert!(encoder.writer().is_empty());
    }

    #[test]
    fn rejects_getter_of_wrong_kind() {
        let bogus = [Field {
            kind: PropertyKind::Summary,
            value: ValueKind::Text,
            get: |event| FieldValue::Integer(event.sequence),
            set: |_, _, _| Ok(()),
        }];
        let err = render(&bogus, &VEvent::default(), 78).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedValueType {
                property: PropertyKind::Summary,
                expected: ValueKind::Text,
                found: ValueKind::Integer,
            }
        ));
    }

    #[test]
    fn strict_mode_validates_both_directions() {
        let strict = options().strict(true);

        let mut encoder = EventEncoder::new(Vec::new(), strict.clone());
        let err = encoder.encode(&VEvent::default()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Validation(ValidationError::MissingProperty {
                property: PropertyKind::DtStamp
            })
        ));
        assert!(encoder.writer().is_empty());

        let src = "BEGIN:VEVENT\r\nSUMMARY:no stamp\r\nEND:VEVENT\r\n";
        assert!(decode(src).is_ok());
        assert!(matches!(
            decode_str(src, &strict),
            Err(CodecError::Validation(_))
        ));
    }

    #[test]
    fn string_output_matches_stream_output() {
        let event = VEvent {
            summary: "여름 🎉".repeat(30),
            ..VEvent::default()
        };
        let mut encoder = EventEncoder::new(Vec::new(), options());
        encoder.encode(&event).unwrap();
        let bytes = encoder.into_writer();
        assert_eq!(encode(&event).into_bytes(), bytes);
        assert!(!String::from_utf8_lossy(&bytes).contains('\u{FFFD}'));
    }

    #[test]
    fn honours_fold_width() {
        let event = VEvent {
            summary: "x".repeat(30),
            ..VEvent::default()
        };
        let text = encode_to_string(&event, &options().fold_width(20)).unwrap();
        assert!(text.lines().all(|l| l.trim_end_matches('\r').chars().count() <= 20));
        assert_eq!(decode(&text).unwrap(), event);
    }
}
