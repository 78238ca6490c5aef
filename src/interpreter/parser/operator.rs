use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::tokenizer::Operator,
};

/// How operators of equal precedence group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

/// An entry of the operator table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    /// Higher binds tighter.
    pub precedence:    u8,
    /// Grouping among equal precedence.
    pub associativity: Associativity,
}

impl Operator {
    /// Looks the operator up in the operator table.
    ///
    /// | operator | precedence | associativity |
    /// |----------|------------|---------------|
    /// | `+` `-`  | 1          | left          |
    /// | `*` `/`  | 2          | left          |
    /// | `^`      | 3          | right         |
    /// | unary `-`| 3          | right         |
    ///
    /// Unary negation sits at the level of `^` so that `-2^2` is `-(2^2)`
    /// while `-2*3` is `(-2)*3`.
    ///
    /// # Example
    /// ```
    /// use shuntcalc::{
    ///     ast::BinaryOperator,
    ///     interpreter::{parser::operator::Associativity, tokenizer::Operator},
    /// };
    ///
    /// let info = Operator::Binary(BinaryOperator::Pow).info();
    /// assert_eq!(info.precedence, 3);
    /// assert_eq!(info.associativity, Associativity::Right);
    /// ```
    #[must_use]
    pub const fn info(self) -> OperatorInfo {
        use Associativity::{Left, Right};

        let (precedence, associativity) = match self {
            Self::Binary(BinaryOperator::Add | BinaryOperator::Sub) => (1, Left),
            Self::Binary(BinaryOperator::Mul | BinaryOperator::Div) => (2, Left),
            Self::Binary(BinaryOperator::Pow) | Self::Unary(UnaryOperator::Negate) => (3, Right),
        };

        OperatorInfo { precedence,
                       associativity }
    }

    /// Prefix operators come before their only operand.
    #[must_use]
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::Unary(_))
    }

    /// Whether `top`, waiting on the operator stack, has to be output before
    /// `self` is pushed.
    #[must_use]
    pub const fn yields_to(self, top: Self) -> bool {
        let current = self.info();
        let top = top.info();

        match current.associativity {
            Associativity::Left => top.precedence >= current.precedence,
            Associativity::Right => top.precedence > current.precedence,
        }
    }
}
