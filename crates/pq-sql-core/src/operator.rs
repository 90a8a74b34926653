//! Operator and control tokens.
//!
//! Keys of a keyed filter are either column names, control tokens
//! (`-and`, `-or`, `-nest`) or, one level down, operator tokens. Special
//! operators have their own fragment rules; any other operator token is a
//! comparison symbol pasted between column and placeholder.

use std::fmt;

/// Keyword used to join sibling fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// ` AND `
    And,
    /// ` OR `
    Or,
}

impl Join {
    /// The keyword with its surrounding spaces.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Tokens that select a join keyword when they are the only key of an
/// operator map.
pub const LOGICAL_JOINS: [(&str, Join); 2] = [("-or", Join::Or), ("-and", Join::And)];

/// Looks up a logical join token.
#[must_use]
pub fn logical_join(token: &str) -> Option<Join> {
    LOGICAL_JOINS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|&(_, join)| join)
}

/// Control tokens accepted in column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// `-and`
    And,
    /// `-or`
    Or,
    /// `-nest`
    Nest,
}

impl Control {
    /// Parses a control token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "-and" => Some(Self::And),
            "-or" => Some(Self::Or),
            "-nest" => Some(Self::Nest),
            _ => None,
        }
    }

    /// The join used inside the group this token opens.
    #[must_use]
    pub const fn join(self) -> Join {
        match self {
            Self::And | Self::Nest => Join::And,
            Self::Or => Join::Or,
        }
    }

    /// The token text.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::And => "-and",
            Self::Or => "-or",
            Self::Nest => "-nest",
        }
    }
}

/// Operator applied between a column and its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator<'a> {
    /// `-like`
    Like,
    /// `-not_like`
    NotLike,
    /// `-between`
    Between,
    /// `-not_between`
    NotBetween,
    /// `-in`
    In,
    /// `-inject`: operand pasted as raw SQL.
    Inject,
    /// Any other token, used verbatim as the comparison symbol.
    Compare(&'a str),
}

impl<'a> Operator<'a> {
    /// Implicit operator for bare values.
    pub const EQ: Operator<'static> = Operator::Compare("=");

    /// Parses an operator token. Never fails: unknown tokens are comparisons.
    #[must_use]
    pub fn parse(token: &'a str) -> Self {
        match token {
            "-like" => Self::Like,
            "-not_like" => Self::NotLike,
            "-between" => Self::Between,
            "-not_between" => Self::NotBetween,
            "-in" => Self::In,
            "-inject" => Self::Inject,
            other => Self::Compare(other),
        }
    }

    /// The token text.
    #[must_use]
    pub const fn token(self) -> &'a str {
        match self {
            Self::Like => "-like",
            Self::NotLike => "-not_like",
            Self::Between => "-between",
            Self::NotBetween => "-not_between",
            Self::In => "-in",
            Self::Inject => "-inject",
            Self::Compare(symbol) => symbol,
        }
    }

    /// Whether a NULL operand compiles to `IS NOT NULL`.
    #[must_use]
    pub fn negates_null(self) -> bool {
        self.token() == "!="
    }
}

impl fmt::Display for Operator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
