//! Pure-rust aligned-PER codec for the H.323 message set: H.225.0 RAS and
//! call-signaling UUIEs, H.245 multimedia system control, and H.235
//! security tokens.
//!
//! The codec is synchronous and CPU-only. A decode call borrows a complete
//! PDU buffer, produces an owned value tree plus the count of consumed
//! octets, and never performs I/O. Encoding is the inverse. An optional
//! [`EventSink`] can observe a decode as a depth-first trace.

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate lazy_static;

mod error;
mod traits;

pub mod h225;
pub mod h235;
pub mod h245;
pub mod per;

pub use error::{Error, ErrorKind, Result};
pub use per::{CodecOption, CodecOptions, EventSink, TraceSink};

use h225::{H323UserInformation, RasMessage};
use h245::MultimediaSystemControlMessage;
use per::{PerReader, PerWriter};

/// Decode a RAS PDU, yielding the message and the count of consumed octets.
pub fn decode_ras_message(data: &[u8]) -> Result<(RasMessage, usize)> {
    decode_ras_message_with(data, CodecOptions::default(), None)
}

pub fn decode_ras_message_with(
    data: &[u8],
    options: CodecOptions,
    sink: Option<&mut dyn EventSink>,
) -> Result<(RasMessage, usize)> {
    let mut reader = PerReader::with_options(data, options);
    if let Some(sink) = sink {
        reader.attach_event_sink(sink);
    }
    let value = RasMessage::decode(&mut reader)?;
    Ok((value, reader.consumed_octets()))
}

/// Decode an H.225 call-signaling payload (the user-user information
/// element carried inside a Q.931 message).
pub fn decode_h323_user_information(data: &[u8]) -> Result<(H323UserInformation, usize)> {
    decode_h323_user_information_with(data, CodecOptions::default(), None)
}

pub fn decode_h323_user_information_with(
    data: &[u8],
    options: CodecOptions,
    sink: Option<&mut dyn EventSink>,
) -> Result<(H323UserInformation, usize)> {
    let mut reader = PerReader::with_options(data, options);
    if let Some(sink) = sink {
        reader.attach_event_sink(sink);
    }
    let value = H323UserInformation::decode(&mut reader)?;
    Ok((value, reader.consumed_octets()))
}

/// Decode an H.245 control PDU.
pub fn decode_multimedia_system_control(
    data: &[u8],
) -> Result<(MultimediaSystemControlMessage, usize)> {
    decode_multimedia_system_control_with(data, CodecOptions::default(), None)
}

pub fn decode_multimedia_system_control_with(
    data: &[u8],
    options: CodecOptions,
    sink: Option<&mut dyn EventSink>,
) -> Result<(MultimediaSystemControlMessage, usize)> {
    let mut reader = PerReader::with_options(data, options);
    if let Some(sink) = sink {
        reader.attach_event_sink(sink);
    }
    let value = MultimediaSystemControlMessage::decode(&mut reader)?;
    Ok((value, reader.consumed_octets()))
}

pub fn encode_ras_message(value: &RasMessage) -> Result<Vec<u8>> {
    PerWriter::encode_to_bytes(|writer| value.encode(writer))
}

pub fn encode_h323_user_information(value: &H323UserInformation) -> Result<Vec<u8>> {
    PerWriter::encode_to_bytes(|writer| value.encode(writer))
}

pub fn encode_multimedia_system_control(
    value: &MultimediaSystemControlMessage,
) -> Result<Vec<u8>> {
    PerWriter::encode_to_bytes(|writer| value.encode(writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::h245::msg::{RequestMessage, RoundTripDelayRequest};
    use crate::per::ObjectId;

    #[test]
    fn public_api_round_trips_a_control_message() {
        let msg = MultimediaSystemControlMessage::Request(RequestMessage::RoundTripDelayRequest(
            RoundTripDelayRequest {
                sequence_number: 4,
                unknown_extensions: Vec::new(),
            },
        ));

        let encoded = encode_multimedia_system_control(&msg).unwrap();
        let (decoded, consumed) = decode_multimedia_system_control(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(msg, decoded);
    }

    #[test]
    fn event_sink_observes_without_changing_results() {
        let msg = h225::RasMessage::UnknownMessageResponse(h225::ras::UnknownMessageResponse {
            request_seq_num: 3,
            unknown_extensions: Vec::new(),
        });
        let encoded = encode_ras_message(&msg).unwrap();

        struct CountingSink {
            values: usize,
        }
        impl EventSink for CountingSink {
            fn uint_value(&mut self, _value: u64) {
                self.values += 1;
            }
        }

        let mut sink = CountingSink { values: 0 };
        let (with_sink, consumed_with) =
            decode_ras_message_with(&encoded, CodecOptions::default(), Some(&mut sink)).unwrap();
        let (without_sink, consumed_without) = decode_ras_message(&encoded).unwrap();

        assert!(sink.values > 0);
        assert_eq!(with_sink, without_sink);
        assert_eq!(consumed_with, consumed_without);
    }

    #[test]
    fn decode_failure_reports_kind_and_offset() {
        // A choice index pointing past the root alternatives.
        let data = [0b0_11011_00];
        let err = decode_ras_message(&data).unwrap_err();
        assert_eq!(ErrorKind::InvalidChoiceIndex, err.kind);
        assert_eq!(0, err.offset);

        // Truncated: GRQ header promises fields the buffer does not hold.
        let err = decode_ras_message(&[0x00]).unwrap_err();
        assert_eq!(ErrorKind::EndOfBuffer, err.kind);
    }

    #[test]
    fn trace_sink_is_a_valid_observer() {
        let msg = h225::RasMessage::GatekeeperConfirm(h225::ras::GatekeeperConfirm {
            request_seq_num: 1,
            protocol_identifier: ObjectId::new(vec![0, 0, 8, 2250, 0, 4]),
            non_standard_data: None,
            gatekeeper_identifier: Some("GK".into()),
            ras_address: h225::TransportAddress::IpAddress(h225::types::IpAddress {
                ip: vec![10, 0, 0, 1],
                port: 1719,
            }),
            alternate_gatekeeper: None,
            unknown_extensions: Vec::new(),
        });
        let encoded = encode_ras_message(&msg).unwrap();

        let mut sink = TraceSink::new();
        let (decoded, _) =
            decode_ras_message_with(&encoded, CodecOptions::default(), Some(&mut sink)).unwrap();
        assert_eq!(msg, decoded);
    }
}
