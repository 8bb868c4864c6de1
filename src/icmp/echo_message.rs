use crate::icmp::checksum::internet_checksum;
use crate::icmp::IcmpType;
use crate::{FailureKind, PingError, PingResult};

/// Type, code and checksum.
const ICMP_HEADER_SIZE: usize = 4;
/// ICMP header plus identifier and sequence number.
pub const ECHO_HEADER_SIZE: usize = ICMP_HEADER_SIZE + 4;

/// The part of an echo message that follows the ICMP header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EchoBody {
    pub identifier: u16,
    pub sequence_number: u16,
    pub payload: Vec<u8>,
}

/// Message bodies, one variant per supported message shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageBody {
    Echo(EchoBody),
    /// Bytes after the ICMP header of a message we do not interpret.
    Raw(Vec<u8>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EchoMessage {
    pub icmp_type: IcmpType,
    pub code: u8,
    /// As read from the wire; `encode` ignores it and computes its own.
    pub checksum: u16,
    pub body: MessageBody,
}

impl EchoMessage {
    #[must_use]
    pub fn new(icmp_type: IcmpType, identifier: u16, sequence_number: u16, payload: &[u8]) -> Self {
        EchoMessage {
            icmp_type,
            code: 0,
            checksum: 0,
            body: MessageBody::Echo(EchoBody { identifier, sequence_number, payload: payload.to_vec() }),
        }
    }

    fn echo_body(&self) -> Option<&EchoBody> {
        match &self.body {
            MessageBody::Echo(echo) => Some(echo),
            MessageBody::Raw(_) => None,
        }
    }

    /// Zero for messages without an echo body.
    #[must_use]
    pub fn identifier(&self) -> u16 {
        self.echo_body().map_or(0, |echo| echo.identifier)
    }

    /// Zero for messages without an echo body.
    #[must_use]
    pub fn sequence_number(&self) -> u16 {
        self.echo_body().map_or(0, |echo| echo.sequence_number)
    }

    /// Empty for messages without an echo body.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.echo_body().map_or(&[][..], |echo| echo.payload.as_slice())
    }

    /// Serializes the message in network byte order.
    ///
    /// IPv4 messages get the Internet checksum over the whole message. IPv6 messages leave the
    /// checksum zero because it covers a pseudo-header only the kernel knows.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let body_len = match &self.body {
            MessageBody::Echo(echo) => 4 + echo.payload.len(),
            MessageBody::Raw(bytes) => bytes.len(),
        };
        let mut buf = Vec::with_capacity(ICMP_HEADER_SIZE + body_len);
        buf.push(self.icmp_type.id());
        buf.push(self.code);
        buf.extend_from_slice(&[0, 0]);
        match &self.body {
            MessageBody::Echo(echo) => {
                buf.extend_from_slice(&echo.identifier.to_be_bytes());
                buf.extend_from_slice(&echo.sequence_number.to_be_bytes());
                buf.extend_from_slice(&echo.payload);
            }
            MessageBody::Raw(bytes) => buf.extend_from_slice(bytes),
        }

        if !self.icmp_type.is_v6() {
            let checksum = internet_checksum(&buf);
            buf[2..4].copy_from_slice(&checksum.to_be_bytes());
        }
        buf
    }

    /// Parses an ICMP message without an IP header in front of it.
    ///
    /// Only the type, code and checksum are required. An echo body is read when the type belongs
    /// to the echo family and the full echo header is present; everything else becomes a raw body.
    pub fn decode(bytes: &[u8]) -> PingResult<EchoMessage> {
        if bytes.len() < ICMP_HEADER_SIZE {
            return Err(PingError::new(
                FailureKind::MalformedReply,
                format!("ICMP message too short: {} bytes", bytes.len()),
            ));
        }
        let icmp_type = IcmpType::from(bytes[0]);
        let code = bytes[1];
        let checksum = u16::from_be_bytes([bytes[2], bytes[3]]);

        let body = if icmp_type.is_echo() && bytes.len() >= ECHO_HEADER_SIZE {
            MessageBody::Echo(EchoBody {
                identifier: u16::from_be_bytes([bytes[4], bytes[5]]),
                sequence_number: u16::from_be_bytes([bytes[6], bytes[7]]),
                payload: bytes[ECHO_HEADER_SIZE..].to_vec(),
            })
        } else {
            MessageBody::Raw(bytes[ICMP_HEADER_SIZE..].to_vec())
        };

        Ok(EchoMessage { icmp_type, code, checksum, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icmp::checksum::tests::ones_complement_sum;
    use pnet_packet::icmp::echo_request::EchoRequestPacket;
    use pnet_packet::icmp::{checksum, IcmpPacket};
    use pnet_packet::Packet;

    #[test]
    fn encode_layout() {
        let message = EchoMessage::new(IcmpType::EchoRequestV4, 0x1234, 0x0102, b"hi");
        let bytes = message.encode();

        assert_eq!(ECHO_HEADER_SIZE + 2, bytes.len());
        assert_eq!(bytes[..2], [8u8, 0]);
        assert_eq!(bytes[4..8], [0x12u8, 0x34, 0x01, 0x02]);
        assert_eq!(b"hi", &bytes[8..]);
    }

    #[test]
    fn encode_matches_pnet_packet() {
        let message = EchoMessage::new(IcmpType::EchoRequestV4, 7, 3, &[0xA5; 56]);
        let bytes = message.encode();

        let packet = EchoRequestPacket::new(&bytes).unwrap();
        assert_eq!(7, packet.get_identifier());
        assert_eq!(3, packet.get_sequence_number());
        assert_eq!(&[0xA5u8; 56][..], packet.payload());
        assert_eq!(checksum(&IcmpPacket::new(&bytes).unwrap()), packet.get_checksum());
    }

    #[test]
    fn encode_is_deterministic() {
        let message = EchoMessage::new(IcmpType::EchoRequestV4, 1, 1, b"[ping-herd]");
        assert_eq!(message.encode(), message.clone().encode());
    }

    #[test]
    fn ipv4_checksum_sums_to_all_ones() {
        for payload_len in 0..=9 {
            let payload: Vec<u8> = (0..payload_len).map(|i| 0xF0 | i).collect();
            for icmp_type in [IcmpType::EchoRequestV4, IcmpType::EchoReplyV4] {
                let bytes = EchoMessage::new(icmp_type, 0xFFFE, 0x8001, &payload).encode();
                assert_eq!(0xFFFF, ones_complement_sum(&bytes), "payload length {payload_len}");
            }
        }
    }

    #[test]
    fn ipv6_checksum_is_left_to_the_kernel() {
        let bytes = EchoMessage::new(IcmpType::EchoRequestV6, 0xFFFF, 1, b"abc").encode();
        assert_eq!(bytes[..4], [128u8, 0, 0, 0]);
    }

    #[test]
    fn decode_reproduces_echo_fields() {
        let echo_types = [IcmpType::EchoRequestV4, IcmpType::EchoReplyV4, IcmpType::EchoRequestV6, IcmpType::EchoReplyV6];
        for icmp_type in echo_types {
            let message = EchoMessage::new(icmp_type, 0xBEEF, 513, b"payload");
            let decoded = EchoMessage::decode(&message.encode()).unwrap();
            assert_eq!(icmp_type, decoded.icmp_type);
            assert_eq!(0xBEEF, decoded.identifier());
            assert_eq!(513, decoded.sequence_number());
            assert_eq!(b"payload", decoded.payload());
        }
    }

    #[test]
    fn decode_keeps_wire_checksum() {
        let bytes = EchoMessage::new(IcmpType::EchoRequestV4, 1, 1, &[]).encode();
        assert_eq!(0xF7FD, EchoMessage::decode(&bytes).unwrap().checksum);
    }

    #[test]
    fn decode_empty_payload() {
        let decoded = EchoMessage::decode(&[0, 0, 0, 0, 0, 9, 0, 4]).unwrap();
        let expected = EchoBody { identifier: 9, sequence_number: 4, payload: vec![] };
        assert_eq!(MessageBody::Echo(expected), decoded.body);
    }

    #[test]
    fn decode_too_short_is_malformed() {
        let error = EchoMessage::decode(&[0, 0, 0]).unwrap_err();
        assert_eq!(FailureKind::MalformedReply, error.kind);
    }

    #[test]
    fn decode_truncated_echo_has_zero_fields() {
        let decoded = EchoMessage::decode(&[0, 0, 0xFF, 0xFF, 0, 1]).unwrap();
        assert_eq!(IcmpType::EchoReplyV4, decoded.icmp_type);
        assert_eq!(0, decoded.identifier());
        assert_eq!(0, decoded.sequence_number());
        assert!(decoded.payload().is_empty());
    }

    #[test]
    fn decode_non_echo_message() {
        // Destination unreachable, port unreachable, followed by the start of the original datagram.
        let bytes = [3, 3, 0x12, 0x34, 0, 0, 0, 0, 0x45, 0];
        let decoded = EchoMessage::decode(&bytes).unwrap();
        assert_eq!(IcmpType::Other(3), decoded.icmp_type);
        assert_eq!(3, decoded.code);
        assert_eq!(0, decoded.identifier());
        assert_eq!(0, decoded.sequence_number());
        assert_eq!(MessageBody::Raw(bytes[4..].to_vec()), decoded.body);
    }

    #[test]
    fn raw_body_round_trips() {
        let message =
            EchoMessage { icmp_type: IcmpType::Other(13), code: 0, checksum: 0, body: MessageBody::Raw(vec![1, 2, 3]) };
        let bytes = message.encode();
        assert_eq!(0xFFFF, ones_complement_sum(&bytes));
        assert_eq!(message.body, EchoMessage::decode(&bytes).unwrap().body);
    }
}
