/// The ICMP message types this crate builds and recognises.
///
/// Everything that is not part of the echo family is kept as `Other` so that
/// further message types can be added as new variants later.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum IcmpType {
    EchoReplyV4,
    EchoRequestV4,
    EchoRequestV6,
    EchoReplyV6,
    Other(u8),
}

impl IcmpType {
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            IcmpType::EchoReplyV4 => 0,
            IcmpType::EchoRequestV4 => 8,
            IcmpType::EchoRequestV6 => 128,
            IcmpType::EchoReplyV6 => 129,
            IcmpType::Other(id) => id,
        }
    }

    #[must_use]
    pub fn is_echo(self) -> bool {
        !matches!(self, IcmpType::Other(_))
    }

    /// ICMPv6 messages carry no checksum of ours; the kernel fills it in from the pseudo-header.
    #[must_use]
    pub fn is_v6(self) -> bool {
        matches!(self, IcmpType::EchoRequestV6 | IcmpType::EchoReplyV6)
    }

    #[must_use]
    pub fn echo_request(ipv6: bool) -> IcmpType {
        if ipv6 {
            IcmpType::EchoRequestV6
        } else {
            IcmpType::EchoRequestV4
        }
    }

    #[must_use]
    pub fn echo_reply(ipv6: bool) -> IcmpType {
        if ipv6 {
            IcmpType::EchoReplyV6
        } else {
            IcmpType::EchoReplyV4
        }
    }
}

impl From<u8> for IcmpType {
    fn from(id: u8) -> Self {
        match id {
            0 => IcmpType::EchoReplyV4,
            8 => IcmpType::EchoRequestV4,
            128 => IcmpType::EchoRequestV6,
            129 => IcmpType::EchoReplyV6,
            id => IcmpType::Other(id),
        }
    }
}

impl From<IcmpType> for u8 {
    fn from(icmp_type: IcmpType) -> Self {
        icmp_type.id()
    }
}
