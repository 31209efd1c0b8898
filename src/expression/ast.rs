use crate::error::EvaluationFault;

/// Abstract syntax tree of a scalar expression in `t`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal or a named constant.
    Number(f64),
    /// The free variable `t`.
    Variable,
    /// Unary negation.
    Neg(Box<Expr>),
    /// A binary arithmetic operation.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A call to an allow-listed function.
    Call { function: Function, args: Vec<Expr> },
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Expr {
    /// Evaluates the tree at `t`.
    ///
    /// # Errors
    ///
    /// Returns a fault on division by zero, a function domain error, or a
    /// non-finite intermediate result.
    pub fn evaluate(&self, t: f64) -> Result<f64, EvaluationFault> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Variable => t,
            Self::Neg(inner) => -inner.evaluate(t)?,
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.evaluate(t)?;
                let b = rhs.evaluate(t)?;
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => {
                        if b == 0.0 {
                            return Err(EvaluationFault::DivisionByZero);
                        }
                        a / b
                    }
                    BinaryOp::Pow => pow(a, b)?,
                }
            }
            Self::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(t))
                    .collect::<Result<Vec<_>, _>>()?;
                function.apply(&values)?
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationFault::NonFinite)
        }
    }
}

fn pow(base: f64, exponent: f64) -> Result<f64, EvaluationFault> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationFault::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationFault::Domain("pow"));
    }
    Ok(base.powf(exponent))
}

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Returns `true` if `count` arguments are acceptable.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

/// The allow-listed mathematical functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Trunc,
    Pow,
    Min,
    Max,
    Hypot,
}

impl Function {
    /// Looks up a function by its source name. `log` is the natural logarithm.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "asinh" => Self::Asinh,
            "acosh" => Self::Acosh,
            "atanh" => Self::Atanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "pow" => Self::Pow,
            "min" => Self::Min,
            "max" => Self::Max,
            "hypot" => Self::Hypot,
            _ => return None,
        };
        Some(function)
    }

    /// Canonical name, used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::Pow => "pow",
            Self::Min => "min",
            Self::Max => "max",
            Self::Hypot => "hypot",
        }
    }

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Atan2 | Self::Pow => Arity::Exactly(2),
            Self::Min | Self::Max | Self::Hypot => Arity::AtLeast(1),
            _ => Arity::Exactly(1),
        }
    }

    /// Applies the function to already-evaluated arguments.
    ///
    /// The parser guarantees the argument count matches [`Function::arity`].
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationFault::Domain`] when an argument lies outside the
    /// function's real domain.
    pub fn apply(self, args: &[f64]) -> Result<f64, EvaluationFault> {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied().unwrap_or(f64::NAN);
        let domain = |ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(EvaluationFault::Domain(self.name()))
            }
        };

        let value = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => {
                domain((-1.0..=1.0).contains(&x))?;
                x.asin()
            }
            Self::Acos => {
                domain((-1.0..=1.0).contains(&x))?;
                x.acos()
            }
            Self::Atan => x.atan(),
            Self::Atan2 => x.atan2(y),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Asinh => x.asinh(),
            Self::Acosh => {
                domain(x >= 1.0)?;
                x.acosh()
            }
            Self::Atanh => {
                domain(x > -1.0 && x < 1.0)?;
                x.atanh()
            }
            Self::Exp => x.exp(),
            Self::Ln => {
                domain(x > 0.0)?;
                x.ln()
            }
            Self::Log10 => {
                domain(x > 0.0)?;
                x.log10()
            }
            Self::Log2 => {
                domain(x > 0.0)?;
                x.log2()
            }
            Self::Sqrt => {
                domain(x >= 0.0)?;
                x.sqrt()
            }
            Self::Cbrt => x.cbrt(),
            Self::Abs => x.abs(),
            Self::Sign => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Round => x.round(),
            Self::Trunc => x.trunc(),
            Self::Pow => pow(x, y)?,
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Hypot => args.iter().copied().fold(0.0, f64::hypot),
        };
        Ok(value)
    }
}
