use pnet_packet::ipv4::Ipv4Packet;

/// Returns the ICMP part of a datagram read from a raw IPv4 socket.
///
/// Raw IPv4 sockets deliver the IP header in front of the ICMP message. The header length is
/// read from the IHL field (low nibble of the first byte, in 32-bit words). Input shorter than a
/// minimal IPv4 header is returned unchanged: it was either stripped already or is a bare ICMPv6
/// message. A header length pointing past the end yields an empty slice, which decodes as malformed.
#[must_use]
pub fn strip_ip_header(datagram: &[u8]) -> &[u8] {
    match Ipv4Packet::new(datagram) {
        None => datagram,
        Some(ipv4_packet) => {
            let header_length = usize::from(ipv4_packet.get_header_length()) * 4;
            datagram.get(header_length..).unwrap_or_default()
        }
    }
}
