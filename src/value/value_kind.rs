use strum::{Display, EnumIter};

/// The shape of a [`RuleValue`](super::RuleValue), used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}
