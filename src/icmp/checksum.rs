/// Word index of the checksum field inside an ICMP header.
const CHECKSUM_WORD: usize = 1;

/// Internet checksum (RFC 1071) over a whole ICMP message.
///
/// The checksum field is treated as zero while summing. A trailing odd byte is
/// padded with a zero byte to form the last 16-bit word.
pub(crate) fn internet_checksum(message: &[u8]) -> u16 {
    pnet_packet::util::checksum(message, CHECKSUM_WORD)
}
