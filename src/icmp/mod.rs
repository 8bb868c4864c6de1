mod checksum;
mod echo_message;
mod icmp_type;
mod ip_payload;
mod sequence_number;

pub use echo_message::{EchoBody, EchoMessage, MessageBody, ECHO_HEADER_SIZE};
pub use icmp_type::IcmpType;
pub use ip_payload::strip_ip_header;
pub(crate) use sequence_number::SequenceNumber;
