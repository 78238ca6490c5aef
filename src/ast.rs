/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// Trees are folded out of a postfix sequence by the evaluator. Every node
/// keeps the position of the token it was built from so that runtime errors
/// can point back into the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The constant value.
        value:    f64,
        /// Position in the expression.
        position: usize,
    },
    /// A unary operation (negation).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position in the expression.
        position: usize,
    },
    /// A binary operation (addition, subtraction, etc.).
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position in the expression.
        position: usize,
    },
    /// Function call expression (e.g. `sin(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:          String,
        /// The argument expression.
        argument:      Box<Self>,
        /// The argument exactly as written between the parentheses.
        argument_text: String,
        /// Position in the expression.
        position:      usize,
    },
}

impl Expr {
    /// Gets the position from `self`.
    /// ## Example
    /// ```
    /// use shuntcalc::ast::Expr;
    ///
    /// let expr = Expr::Number { value:    2.0,
    ///                           position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Number { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }

    /// Returns how deeply the tree nests, counting a lone literal as one.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];

        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            match node {
                Self::Number { .. } => {},
                Self::UnaryOp { expr, .. } | Self::FunctionCall { argument: expr, .. } => {
                    pending.push((expr.as_ref(), level + 1));
                },
                Self::BinaryOp { left, right, .. } => {
                    pending.push((left.as_ref(), level + 1));
                    pending.push((right.as_ref(), level + 1));
                },
            }
        }

        deepest
    }

    /// Moves the children of `self` into `pending`, leaving literals behind.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        let mut take = |child: &mut Box<Self>| {
            pending.push(std::mem::replace(child.as_mut(),
                                           Self::Number { value:    0.0,
                                                          position: 0, }));
        };

        match self {
            Self::Number { .. } => {},
            Self::UnaryOp { expr, .. } | Self::FunctionCall { argument: expr, .. } => take(expr),
            Self::BinaryOp { left, right, .. } => {
                take(left);
                take(right);
            },
        }
    }
}

/// Long chains such as `1+1+...+1` nest one node per operator, so the tree
/// is taken apart with a work list instead of recursive drops.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
}

impl BinaryOperator {
    /// Maps an operator symbol to its operator, if it is one.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// The symbol the operator is written with.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "neg"),
        }
    }
}

/// Renders the tree fully parenthesized, so grouping is always explicit.
///
/// ```
/// use shuntcalc::parse;
///
/// let expr = parse("2^3^2").unwrap();
/// assert_eq!(expr.to_string(), "(2 ^ (3 ^ 2))");
/// ```
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pieces = vec![Piece::Node(self)];

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Operator(op) => write!(f, " {op} ")?,
                Piece::Node(Self::Number { value, .. }) => write!(f, "{value}")?,
                Piece::Node(Self::UnaryOp { op: UnaryOperator::Negate,
                                            expr,
                                            .. }) => {
                    pieces.extend([Piece::Text(")"), Piece::Node(expr), Piece::Text("(-")]);
                },
                Piece::Node(Self::BinaryOp { left, op, right, .. }) => {
                    pieces.extend([Piece::Text(")"),
                                   Piece::Node(right),
                                   Piece::Operator(*op),
                                   Piece::Node(left),
                                   Piece::Text("(")]);
                },
                Piece::Node(Self::FunctionCall { name, argument, .. }) => {
                    pieces.extend([Piece::Text(")"),
                                   Piece::Node(argument),
                                   Piece::Text("("),
                                   Piece::Text(name)]);
                },
            }
        }

        Ok(())
    }
}

/// Output still to be written, last item first.
enum Piece<'a> {
    Node(&'a Expr),
    Text(&'a str),
    Operator(BinaryOperator),
}
