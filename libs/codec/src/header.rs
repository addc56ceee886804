//! Native header codec.
//!
//! Wire layout, immediately after the 4-byte format tag:
//!
//! ```text
//! [span: u32 BE][flags: u8][priority: u8][to: str][subject: str][content_type: str]
//! ```
//!
//! where `str` is a u16 BE length followed by UTF-8 bytes and `span` counts
//! every byte after itself. The span makes the header self-describing:
//! decode consumes exactly `span` bytes and leaves the cursor at the first
//! payload byte, so the same on-disk record stays readable as the header
//! grows fields in later versions.

use crate::{CodecError, CodecResult, RecordBuffer};
use ironbus_types::MessageHeader;

const FLAG_DURABLE: u8 = 0x01;

const MAX_FIELD_LEN: usize = u16::MAX as usize;

fn span_len(header: &MessageHeader) -> usize {
    // flags + priority + three length-prefixed strings
    2 + (2 + header.to.len()) + (2 + header.subject.len()) + (2 + header.content_type.len())
}

/// Total encoded size of a header, span word included.
pub fn encoded_len(header: &MessageHeader) -> usize {
    4 + span_len(header)
}

/// Encode a header into its wire form.
pub fn encode_header(header: &MessageHeader) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len(header));
    out.extend_from_slice(&(span_len(header) as u32).to_be_bytes());

    let mut flags = 0u8;
    if header.durable {
        flags |= FLAG_DURABLE;
    }
    out.push(flags);
    out.push(header.priority);

    put_str(&mut out, "to", &header.to)?;
    put_str(&mut out, "subject", &header.subject)?;
    put_str(&mut out, "content_type", &header.content_type)?;
    Ok(out)
}

fn put_str(out: &mut Vec<u8>, field: &'static str, value: &str) -> CodecResult<()> {
    if value.len() > MAX_FIELD_LEN {
        return Err(CodecError::FieldTooLong {
            field,
            len: value.len(),
            limit: MAX_FIELD_LEN,
        });
    }
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Decode a header from the buffer's current position.
///
/// Consumes exactly the declared span and leaves the cursor at the first
/// payload byte. Any truncation or corruption inside a record that already
/// claimed the native format is [`CodecError::MalformedHeader`]; dropping
/// such a record silently would lose durable data, so the fault always
/// propagates.
pub fn decode_header(buf: &mut RecordBuffer<'_>) -> CodecResult<MessageHeader> {
    let span = buf.get_u32().map_err(|_| truncated("span word"))? as usize;
    let body = buf.get_bytes(span).map_err(|_| truncated("declared span"))?;

    let mut inner = RecordBuffer::new(body);
    let flags = inner.get_u8().map_err(|_| truncated("flags"))?;
    let priority = inner.get_u8().map_err(|_| truncated("priority"))?;
    let to = get_str(&mut inner, "to")?;
    let subject = get_str(&mut inner, "subject")?;
    let content_type = get_str(&mut inner, "content_type")?;

    if inner.remaining() != 0 {
        return Err(CodecError::MalformedHeader(format!(
            "{} trailing bytes inside header span",
            inner.remaining()
        )));
    }

    Ok(MessageHeader {
        durable: flags & FLAG_DURABLE != 0,
        priority,
        to,
        subject,
        content_type,
    })
}

fn get_str(buf: &mut RecordBuffer<'_>, field: &'static str) -> CodecResult<String> {
    let len = buf.get_u16().map_err(|_| truncated(field))? as usize;
    let bytes = buf.get_bytes(len).map_err(|_| truncated(field))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| CodecError::MalformedHeader(format!("field {field} is not valid UTF-8")))
}

fn truncated(what: &str) -> CodecError {
    CodecError::MalformedHeader(format!("truncated at {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> MessageHeader {
        MessageHeader {
            durable: true,
            priority: 4,
            to: "market/ticks.eu".to_string(),
            subject: "ticks.eu".to_string(),
            content_type: "application/octet-stream".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let header = sample_header();
        let encoded = encode_header(&header).unwrap();
        assert_eq!(encoded.len(), encoded_len(&header));

        let mut buf = RecordBuffer::new(&encoded);
        let decoded = decode_header(&mut buf).unwrap();
        assert_eq!(decoded, header);
        // Cursor lands exactly at the first payload byte
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_round_trip_empty_fields() {
        let header = MessageHeader::default();
        let encoded = encode_header(&header).unwrap();
        let mut buf = RecordBuffer::new(&encoded);
        assert_eq!(decode_header(&mut buf).unwrap(), header);
    }

    #[test]
    fn test_payload_left_untouched() {
        let mut encoded = encode_header(&sample_header()).unwrap();
        encoded.extend_from_slice(b"payload bytes");

        let mut buf = RecordBuffer::new(&encoded);
        decode_header(&mut buf).unwrap();
        assert_eq!(buf.take_remaining(), b"payload bytes");
    }

    #[test]
    fn test_truncated_span_is_malformed() {
        let encoded = encode_header(&sample_header()).unwrap();
        let mut buf = RecordBuffer::new(&encoded[..encoded.len() - 3]);
        assert!(matches!(
            decode_header(&mut buf),
            Err(CodecError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_overrunning_inner_field_is_malformed() {
        let mut encoded = encode_header(&MessageHeader::default()).unwrap();
        // Claim a 200-byte `to` field inside a span that cannot hold it
        encoded[6] = 0x00;
        encoded[7] = 0xc8;
        let mut buf = RecordBuffer::new(&encoded);
        assert!(matches!(
            decode_header(&mut buf),
            Err(CodecError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_in_span_are_malformed() {
        let header = MessageHeader::default();
        let mut encoded = encode_header(&header).unwrap();
        // Widen the declared span by one and append a stray byte inside it
        let span = span_len(&header) as u32 + 1;
        encoded[..4].copy_from_slice(&span.to_be_bytes());
        encoded.push(0xee);

        let mut buf = RecordBuffer::new(&encoded);
        assert!(matches!(
            decode_header(&mut buf),
            Err(CodecError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_non_utf8_field_is_malformed() {
        let header = MessageHeader {
            to: "q".to_string(),
            ..MessageHeader::default()
        };
        let mut encoded = encode_header(&header).unwrap();
        // Corrupt the single `to` byte into an invalid UTF-8 sequence
        let to_byte = encoded.len() - 4 - 1;
        encoded[to_byte] = 0xff;
        let mut buf = RecordBuffer::new(&encoded);
        assert!(matches!(
            decode_header(&mut buf),
            Err(CodecError::MalformedHeader(_))
        ));
    }
}
