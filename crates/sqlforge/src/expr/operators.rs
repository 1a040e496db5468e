//! Operator kinds used by comparison, range and bitwise nodes.

use std::fmt;

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BooleanOp {
    Eq,
    Neq,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    RegexpLike,
    RegexpNotLike,
    RegexpILike,
    RegexpNotILike,
}

impl BooleanOp {
    /// The lowercase name used as an `Op` map key.
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Eq => "eq",
            BooleanOp::Neq => "neq",
            BooleanOp::Is => "is",
            BooleanOp::IsNot => "isnot",
            BooleanOp::Gt => "gt",
            BooleanOp::Gte => "gte",
            BooleanOp::Lt => "lt",
            BooleanOp::Lte => "lte",
            BooleanOp::In => "in",
            BooleanOp::NotIn => "notin",
            BooleanOp::Like => "like",
            BooleanOp::NotLike => "notlike",
            BooleanOp::ILike => "ilike",
            BooleanOp::NotILike => "notilike",
            BooleanOp::RegexpLike => "regexplike",
            BooleanOp::RegexpNotLike => "regexpnotlike",
            BooleanOp::RegexpILike => "regexpilike",
            BooleanOp::RegexpNotILike => "regexpnotilike",
        }
    }

    /// Look up an operator by its case-insensitive `Op` key.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name.to_ascii_lowercase().as_str() {
            "eq" => BooleanOp::Eq,
            "neq" => BooleanOp::Neq,
            "is" => BooleanOp::Is,
            "isnot" => BooleanOp::IsNot,
            "gt" => BooleanOp::Gt,
            "gte" => BooleanOp::Gte,
            "lt" => BooleanOp::Lt,
            "lte" => BooleanOp::Lte,
            "in" => BooleanOp::In,
            "notin" => BooleanOp::NotIn,
            "like" => BooleanOp::Like,
            "notlike" => BooleanOp::NotLike,
            "ilike" => BooleanOp::ILike,
            "notilike" => BooleanOp::NotILike,
            "regexplike" => BooleanOp::RegexpLike,
            "regexpnotlike" => BooleanOp::RegexpNotLike,
            "regexpilike" => BooleanOp::RegexpILike,
            "regexpnotilike" => BooleanOp::RegexpNotILike,
            _ => return None,
        };
        Some(op)
    }

    /// The negated form of this operator.
    pub fn invert(self) -> Self {
        match self {
            BooleanOp::Eq => BooleanOp::Neq,
            BooleanOp::Neq => BooleanOp::Eq,
            BooleanOp::Is => BooleanOp::IsNot,
            BooleanOp::IsNot => BooleanOp::Is,
            BooleanOp::Gt => BooleanOp::Lte,
            BooleanOp::Gte => BooleanOp::Lt,
            BooleanOp::Lt => BooleanOp::Gte,
            BooleanOp::Lte => BooleanOp::Gt,
            BooleanOp::In => BooleanOp::NotIn,
            BooleanOp::NotIn => BooleanOp::In,
            BooleanOp::Like => BooleanOp::NotLike,
            BooleanOp::NotLike => BooleanOp::Like,
            BooleanOp::ILike => BooleanOp::NotILike,
            BooleanOp::NotILike => BooleanOp::ILike,
            BooleanOp::RegexpLike => BooleanOp::RegexpNotLike,
            BooleanOp::RegexpNotLike => BooleanOp::RegexpLike,
            BooleanOp::RegexpILike => BooleanOp::RegexpNotILike,
            BooleanOp::RegexpNotILike => BooleanOp::RegexpILike,
        }
    }

    pub(crate) fn is_regexp(self) -> bool {
        matches!(
            self,
            BooleanOp::RegexpLike
                | BooleanOp::RegexpNotLike
                | BooleanOp::RegexpILike
                | BooleanOp::RegexpNotILike
        )
    }

    pub(crate) fn is_identity(self) -> bool {
        matches!(self, BooleanOp::Is | BooleanOp::IsNot)
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOp {
    Between,
    NotBetween,
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RangeOp::Between => "between",
            RangeOp::NotBetween => "notbetween",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    Inversion,
    Or,
    And,
    Xor,
    LeftShift,
    RightShift,
}

impl fmt::Display for BitwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BitwiseOp::Inversion => "inversion",
            BitwiseOp::Or => "or",
            BitwiseOp::And => "and",
            BitwiseOp::Xor => "xor",
            BitwiseOp::LeftShift => "left shift",
            BitwiseOp::RightShift => "right shift",
        })
    }
}

/// Connective of an [`ExpressionList`](super::ExpressionList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    And,
    Or,
}
