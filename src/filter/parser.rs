use std::fmt;

/// A raw comparison split into an operator token and an operand
///
/// The operator token is kept as written; it is only interpreted when a
/// numeric filter maps it to a [`Bound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub operator: String,
    pub operand: String,
}

impl Comparison {
    pub fn new(operator: impl Into<String>, operand: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            operand: operand.into(),
        }
    }

    /// Parse a comparison from a raw filter value
    ///
    /// An explicit `op:value` form wins over symbolic prefixes. Two-character
    /// prefixes are checked before one-character ones so `>=` is never read as `>`.
    pub fn parse(raw: &str) -> Self {
        if let Some((operator, operand)) = raw.split_once(':') {
            return Self::new(operator, operand);
        }

        if let Some(rest) = raw.strip_prefix(">=") {
            Self::new("gte", rest)
        } else if let Some(rest) = raw.strip_prefix("<=") {
            Self::new("lte", rest)
        } else if let Some(rest) = raw.strip_prefix('>') {
            Self::new("gt", rest)
        } else if let Some(rest) = raw.strip_prefix('<') {
            Self::new("lt", rest)
        } else {
            Self::new("eq", raw)
        }
    }

    pub fn bound(&self) -> Bound {
        Bound::from_operator(&self.operator)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operator, self.operand)
    }
}

/// How a numeric filter compares a record value against the operand
///
/// Strict and non-strict operators collapse onto the same inclusive bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    AtLeast,
    AtMost,
    Exactly,
}

impl Bound {
    pub fn from_operator(operator: &str) -> Self {
        match operator {
            "gte" | "ge" | "gt" => Bound::AtLeast,
            "lte" | "le" | "lt" => Bound::AtMost,
            _ => Bound::Exactly,
        }
    }

    pub fn holds<T: PartialOrd>(self, actual: T, expected: T) -> bool {
        match self {
            Bound::AtLeast => actual >= expected,
            Bound::AtMost => actual <= expected,
            Bound::Exactly => actual == expected,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Bound::AtLeast => ">=",
            Bound::AtMost => "<=",
            Bound::Exactly => "=",
        }
    }
}
