use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::CompileError;

use super::ast::{BinaryOp, Expr, Function};

#[derive(Parser)]
#[grammar = "src/expression/formula.pest"]
struct FormulaParser;

/// Name of the free variable.
pub const VARIABLE: &str = "t";

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 64;

/// Deepest syntax tree accepted, counted in nodes from root to leaf.
pub const MAX_DEPTH: usize = 256;

const MATH_PREFIX: &str = "Math.";
const TOO_DEEP: &str = "expression is nested too deeply";

/// Parses an expression into an AST.
pub(crate) fn parse(source: &str) -> Result<Expr, CompileError> {
    if source.trim().is_empty() {
        return Err(CompileError::new(source, "expression is empty", 0));
    }
    check_nesting(source)?;

    let expr = FormulaParser::parse(Rule::formula, source)
        .map_err(|err| syntax_error(source, &err))?
        .next()
        .and_then(|formula| formula.into_inner().next())
        .ok_or_else(|| CompileError::new(source, "expression is empty", 0))?;

    let builder = Builder { source };
    Ok(builder.build(expr)?.expr)
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(std::f64::consts::PI),
        "e" | "E" => Some(std::f64::consts::E),
        _ => None,
    }
}

// Runs before the grammar so that parenthesis depth never reaches the
// recursive descent.
fn check_nesting(source: &str) -> Result<(), CompileError> {
    let mut depth = 0usize;
    for (offset, c) in source.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(CompileError::new(source, TOO_DEEP, offset));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn syntax_error(source: &str, err: &pest::error::Error<Rule>) -> CompileError {
    let (InputLocation::Pos(offset) | InputLocation::Span((offset, _))) = err.location;
    let rest = source.get(offset..).unwrap_or_default().trim_start();
    let reason = match rest.chars().next() {
        None => "unexpected end of expression".to_owned(),
        Some(c) => match &err.variant {
            ErrorVariant::ParsingError { positives, .. } if positives.contains(&Rule::EOI) => {
                format!("unexpected '{c}' after end of expression")
            }
            _ => format!("unexpected '{c}'"),
        },
    };
    CompileError::new(source, reason, offset)
}

/// A built subtree and its depth.
struct Node {
    expr: Expr,
    depth: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, depth: 1 }
    }
}

/// Turns the grammar's pairs into an [`Expr`], applying the allow-list,
/// arity checks and the depth limit.
struct Builder<'a> {
    source: &'a str,
}

impl Builder<'_> {
    fn build(&self, pair: Pair<'_, Rule>) -> Result<Node, CompileError> {
        match pair.as_rule() {
            Rule::expr | Rule::term => self.chain(pair),
            Rule::unary => {
                let (negations, operand) = self.split_signs(pair)?;
                self.negate(operand, &negations)
            }
            Rule::power => self.power(pair),
            Rule::number => self.number(&pair),
            Rule::call => self.call(pair),
            Rule::name => self.name(&pair),
            rule => Err(self.error(
                format!("unexpected rule {rule:?}"),
                pair.as_span().start(),
            )),
        }
    }

    // Left-associative `operand (op operand)*`.
    fn chain(&self, pair: Pair<'_, Rule>) -> Result<Node, CompileError> {
        let start = pair.as_span().start();
        let mut pairs = pair.into_inner();
        let mut node = self.build(self.required(pairs.next(), start)?)?;
        while let Some(op) = pairs.next() {
            let rhs = self.build(self.required(pairs.next(), op.as_span().end())?)?;
            node = self.binary(binary_op(&op), node, rhs, op.as_span().start())?;
        }
        Ok(node)
    }

    // Right-associative, and a sign in an exponent covers the rest of the
    // chain: a^-b^c == a^(-(b^c)).
    fn power(&self, pair: Pair<'_, Rule>) -> Result<Node, CompileError> {
        let start = pair.as_span().start();
        let mut pairs = pair.into_inner();
        let base = self.build(self.required(pairs.next(), start)?)?;

        let mut factors = Vec::new();
        while let Some(op) = pairs.next() {
            let signed = self.required(pairs.next(), op.as_span().end())?;
            let (negations, operand) = self.split_signs(signed)?;
            factors.push((op.as_span().start(), negations, operand));
        }

        let mut exponent: Option<(usize, Node)> = None;
        for (offset, negations, operand) in factors.into_iter().rev() {
            let value = match exponent.take() {
                Some((op_offset, rhs)) => self.binary(BinaryOp::Pow, operand, rhs, op_offset)?,
                None => operand,
            };
            exponent = Some((offset, self.negate(value, &negations)?));
        }
        match exponent {
            Some((offset, rhs)) => self.binary(BinaryOp::Pow, base, rhs, offset),
            None => Ok(base),
        }
    }

    /// Splits `sign* operand` into the offsets of its minus signs and the
    /// built operand. Plus signs are dropped.
    fn split_signs(&self, pair: Pair<'_, Rule>) -> Result<(Vec<usize>, Node), CompileError> {
        let start = pair.as_span().start();
        let mut negations = Vec::new();
        let mut operand = None;
        for child in pair.into_inner() {
            if child.as_rule() == Rule::sign {
                if child.as_str() == "-" {
                    negations.push(child.as_span().start());
                }
            } else {
                operand = Some(self.build(child)?);
            }
        }
        let operand =
            operand.ok_or_else(|| self.error("unexpected end of expression", start))?;
        Ok((negations, operand))
    }

    fn negate(&self, mut node: Node, negations: &[usize]) -> Result<Node, CompileError> {
        for &offset in negations.iter().rev() {
            let depth = node.depth + 1;
            node = self.node(Expr::Neg(Box::new(node.expr)), depth, offset)?;
        }
        Ok(node)
    }

    fn number(&self, pair: &Pair<'_, Rule>) -> Result<Node, CompileError> {
        pair.as_str()
            .parse::<f64>()
            .map(|value| Node::leaf(Expr::Number(value)))
            .map_err(|_| {
                self.error(
                    format!("invalid number '{}'", pair.as_str()),
                    pair.as_span().start(),
                )
            })
    }

    fn name(&self, pair: &Pair<'_, Rule>) -> Result<Node, CompileError> {
        let text = pair.as_str();
        let offset = pair.as_span().start();

        let value = match text.strip_prefix(MATH_PREFIX) {
            Some("PI") => Some(std::f64::consts::PI),
            Some("E") => Some(std::f64::consts::E),
            Some(_) => None,
            None if text == VARIABLE => return Ok(Node::leaf(Expr::Variable)),
            None => constant(text),
        };
        if let Some(value) = value {
            return Ok(Node::leaf(Expr::Number(value)));
        }

        let bare = text.strip_prefix(MATH_PREFIX).unwrap_or(text);
        let reason = if Function::from_name(bare).is_some() {
            format!("function '{text}' must be called with parentheses")
        } else {
            format!("unknown identifier '{text}'")
        };
        Err(self.error(reason, offset))
    }

    fn call(&self, pair: Pair<'_, Rule>) -> Result<Node, CompileError> {
        let start = pair.as_span().start();
        let mut pairs = pair.into_inner();
        let name = self.required(pairs.next(), start)?;
        let text = name.as_str();
        let Some(function) = Function::from_name(text.strip_prefix(MATH_PREFIX).unwrap_or(text))
        else {
            return Err(self.error(format!("function '{text}' is not allowed"), start));
        };

        let args = pairs
            .map(|arg| self.build(arg))
            .collect::<Result<Vec<_>, _>>()?;
        if !function.arity().accepts(args.len()) {
            return Err(self.error(
                format!(
                    "wrong number of arguments to '{}': {} given",
                    function.name(),
                    args.len()
                ),
                start,
            ));
        }

        let depth = 1 + args.iter().map(|arg| arg.depth).max().unwrap_or(0);
        let args = args.into_iter().map(|arg| arg.expr).collect();
        self.node(Expr::Call { function, args }, depth, start)
    }

    fn binary(
        &self,
        op: BinaryOp,
        lhs: Node,
        rhs: Node,
        offset: usize,
    ) -> Result<Node, CompileError> {
        let depth = 1 + lhs.depth.max(rhs.depth);
        let expr = Expr::Binary {
            op,
            lhs: Box::new(lhs.expr),
            rhs: Box::new(rhs.expr),
        };
        self.node(expr, depth, offset)
    }

    fn node(&self, expr: Expr, depth: usize, offset: usize) -> Result<Node, CompileError> {
        if depth > MAX_DEPTH {
            return Err(self.error(TOO_DEEP, offset));
        }
        Ok(Node { expr, depth })
    }

    fn required<'i>(
        &self,
        pair: Option<Pair<'i, Rule>>,
        offset: usize,
    ) -> Result<Pair<'i, Rule>, CompileError> {
        pair.ok_or_else(|| self.error("unexpected end of expression", offset))
    }

    fn error(&self, reason: impl Into<String>, offset: usize) -> CompileError {
        CompileError::new(self.source, reason, offset)
    }
}

fn binary_op(op: &Pair<'_, Rule>) -> BinaryOp {
    match op.as_str() {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        // "^" and "**"
        _ => BinaryOp::Pow,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn num(v: f64) -> Box<Expr> {
        Box::new(Expr::Number(v))
    }

    fn pow(lhs: Box<Expr>, rhs: Box<Expr>) -> Expr {
        Expr::Binary {
            op: BinaryOp::Pow,
            lhs,
            rhs,
        }
    }

    #[test]
    fn precedence_of_mul_over_add() {
        let expr = parse("1 + 2 * t").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: num(1.0),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    lhs: num(2.0),
                    rhs: Box::new(Expr::Variable),
                }),
            }
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("t - 1 - 2").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Sub,
                lhs: Box::new(Expr::Binary {
                    op: BinaryOp::Sub,
                    lhs: Box::new(Expr::Variable),
                    rhs: num(1.0),
                }),
                rhs: num(2.0),
            }
        );
    }

    #[test]
    fn negation_applies_after_power() {
        let expr = parse("-t^2").unwrap();
        assert_eq!(
            expr,
            Expr::Neg(Box::new(pow(Box::new(Expr::Variable), num(2.0))))
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            parse("2^3^2").unwrap(),
            pow(num(2.0), Box::new(pow(num(3.0), num(2.0))))
        );
        assert_eq!(parse("2**3**2").unwrap(), parse("2^3^2").unwrap());
    }

    #[test]
    fn signed_exponent_covers_rest_of_chain() {
        assert_eq!(
            parse("2^-3^2").unwrap(),
            pow(
                num(2.0),
                Box::new(Expr::Neg(Box::new(pow(num(3.0), num(2.0)))))
            )
        );
    }

    #[test]
    fn unary_plus_is_dropped() {
        assert_eq!(parse("+t").unwrap(), Expr::Variable);
        assert_eq!(parse("--t").unwrap(), Expr::Neg(Box::new(Expr::Neg(Box::new(Expr::Variable)))));
    }

    #[test]
    fn numbers_with_fraction_and_exponent() {
        assert_eq!(parse(".5").unwrap(), Expr::Number(0.5));
        assert_eq!(parse("2.5e-3").unwrap(), Expr::Number(2.5e-3));
        assert_eq!(parse("4E2").unwrap(), Expr::Number(400.0));
        assert_eq!(parse("1.").unwrap(), Expr::Number(1.0));
    }

    #[test]
    fn trailing_e_is_not_an_exponent() {
        let err = parse("2e").unwrap_err();
        assert_eq!(err.offset, 1);
        assert!(err.reason.starts_with("unexpected 'e'"));
    }

    #[test]
    fn constants_fold_to_numbers() {
        assert_eq!(parse("pi").unwrap(), Expr::Number(std::f64::consts::PI));
        assert_eq!(parse("Math.E").unwrap(), Expr::Number(std::f64::consts::E));
    }

    #[test]
    fn math_prefix_only_qualifies_functions_and_constants() {
        assert_eq!(parse("Math.sin(Math.PI)").unwrap(), parse("sin(pi)").unwrap());
        assert_eq!(
            parse("Math.t").unwrap_err().reason,
            "unknown identifier 'Math.t'"
        );
        assert_eq!(
            parse("Math.pi").unwrap_err().reason,
            "unknown identifier 'Math.pi'"
        );
        assert_eq!(
            parse("Math.alert(t)").unwrap_err().reason,
            "function 'Math.alert' is not allowed"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse("   ").unwrap_err();
        assert_eq!(err.reason, "expression is empty");
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = parse("t + x").unwrap_err();
        assert_eq!(err.reason, "unknown identifier 'x'");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn unknown_character_is_rejected() {
        let err = parse("t; alert(1)").unwrap_err();
        assert_eq!(err.offset, 1);
        assert!(err.reason.contains("';'"));
        assert!(parse("t + .").is_err());
    }

    #[test]
    fn disallowed_function_is_rejected() {
        let err = parse("alert(t)").unwrap_err();
        assert_eq!(err.reason, "function 'alert' is not allowed");
    }

    #[test]
    fn function_without_call_is_rejected() {
        let err = parse("sin + 1").unwrap_err();
        assert!(err.reason.contains("parentheses"));
    }

    #[test]
    fn arity_is_checked() {
        let err = parse("pow(t)").unwrap_err();
        assert_eq!(err.reason, "wrong number of arguments to 'pow': 1 given");
        assert!(parse("sin(t, 2)").is_err());
        assert!(parse("max()").is_err());
        assert!(parse("max(t, 1, 2)").is_ok());
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            parse("(t + 1").unwrap_err().reason,
            "unexpected end of expression"
        );
        let err = parse("t + 1)").unwrap_err();
        assert_eq!(err.offset, 5);
        assert!(err.reason.starts_with("unexpected ')'"));
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(
            parse("t *").unwrap_err().reason,
            "unexpected end of expression"
        );
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let ok = format!("{}t{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&ok).unwrap(), Expr::Variable);

        let deep = format!("{}t{}", "(".repeat(2_000), ")".repeat(2_000));
        let err = parse(&deep).unwrap_err();
        assert_eq!(err.reason, TOO_DEEP);
        assert_eq!(err.offset, MAX_NESTING);
    }

    #[test]
    fn long_chains_are_rejected() {
        let signs = format!("{}t", "-".repeat(200_000));
        assert_eq!(parse(&signs).unwrap_err().reason, TOO_DEEP);

        let sum = format!("{}t", "t+".repeat(10_000));
        assert_eq!(parse(&sum).unwrap_err().reason, TOO_DEEP);

        let tower = format!("{}t", "t^".repeat(10_000));
        assert_eq!(parse(&tower).unwrap_err().reason, TOO_DEEP);

        let fits = format!("{}t", "t+".repeat(MAX_DEPTH - 2));
        assert!(parse(&fits).is_ok());
    }
}
