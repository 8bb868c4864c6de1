type SequenceNumberInnerType = u16;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SequenceNumber(SequenceNumberInnerType);

impl SequenceNumber {
    fn start_value_inner_type() -> SequenceNumberInnerType {
        // ICMP sequence numbers start from 1.
        SequenceNumberInnerType::from(1u8)
    }

    pub(crate) fn start_value() -> SequenceNumber {
        SequenceNumber(Self::start_value_inner_type())
    }

    pub(crate) fn max_value() -> SequenceNumberInnerType {
        SequenceNumberInnerType::MAX
    }

    pub(crate) fn next(self) -> Self {
        if self.0 == Self::max_value() {
            Self::start_value()
        } else {
            SequenceNumber(self.0 + 1)
        }
    }

    /// Sequence numbers `1..=count`, in send order.
    pub(crate) fn first_n(count: u16) -> impl Iterator<Item = SequenceNumber> {
        std::iter::successors(Some(Self::start_value()), |sequence_number| Some(sequence_number.next()))
            .take(usize::from(count))
    }
}

impl From<SequenceNumber> for SequenceNumberInnerType {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

impl From<SequenceNumberInnerType> for SequenceNumber {
    fn from(value: SequenceNumberInnerType) -> Self {
        SequenceNumber(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        assert_eq!(1u16, SequenceNumber::start_value().into());
    }

    #[test]
    fn next_wraps_to_start_value() {
        assert_eq!(SequenceNumber::from(2), SequenceNumber::from(1).next());
        assert_eq!(SequenceNumber::start_value(), SequenceNumber::from(u16::MAX).next());
    }

    #[test]
    fn first_n() {
        let numbers: Vec<u16> = SequenceNumber::first_n(4).map(u16::from).collect();
        assert_eq!(vec![1, 2, 3, 4], numbers);
        assert_eq!(0, SequenceNumber::first_n(0).count());
    }
}
