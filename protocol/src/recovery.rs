//! Store-recovery path: claim or decline over the leading format tag.

use bytes::Bytes;
use ironbus_broker::{ProtocolResult, RecoveryOutcome};
use ironbus_codec::{decode_header, RecordBuffer, AMQP_FORMAT_TAG};
use ironbus_types::{GenericMessage, RecoverableMessage};
use std::sync::Arc;
use tracing::debug;

/// Inspect a persisted record's leading tag and reconstruct the message
/// when it is in the native format.
///
/// The tag is peeked, not consumed: a declined buffer keeps its position,
/// so the store can hand the same cursor to the next protocol's recoverer
/// without rewinding. Once the tag is claimed, a header that will not
/// decode is a data-integrity fault and propagates; the remaining bytes
/// after the header become the message payload.
pub fn recover_record(buffer: &mut RecordBuffer<'_>) -> ProtocolResult<RecoveryOutcome> {
    debug!("recovering, checking for native format tag");
    let tag = buffer.peek_u32()?;
    if tag != AMQP_FORMAT_TAG {
        debug!("record tag {:#010x} is not the native format", tag);
        return Ok(RecoveryOutcome::NotMine);
    }

    buffer.get_u32()?;
    debug!("record is in native format");
    let header = decode_header(buffer)?;
    let payload = Bytes::copy_from_slice(buffer.take_remaining());
    let message = GenericMessage::new(header.clone(), payload);
    Ok(RecoveryOutcome::Recovered(Arc::new(
        RecoverableMessage::new(header, message),
    )))
}
