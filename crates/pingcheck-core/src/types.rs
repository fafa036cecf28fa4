/// `Sequence` number newtype.
///
/// The sequence number carried by an echo request and returned in the
/// matching echo reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Sequence(pub u16);
