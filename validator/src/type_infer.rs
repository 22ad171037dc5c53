// type_infer.rs — Expression type inference
//
// A pure, bottom-up pass over one expression tree. Operands are inferred
// left to right, depth first; the first error found is the one returned.
//
// Typing rules:
//   literal integer / literal boolean      → numero / boolean
//   variable                               → its declared type
//   state query                            → fixed by the query
//   -e      (e: numero)                    → numero
//   ~e      (e: boolean)                   → boolean
//   + - * / (numero, numero)               → numero
//   > >= < <= (numero, numero)             → boolean
//   & |     (boolean, boolean)             → boolean
//   = !=    (T, T)                         → boolean
//
// Preconditions: `scope` holds every variable visible at the expression.
// Postconditions: on success, every variable referenced resolves in `scope`.
// Failure modes: undeclared variable, operand type mismatch.
// Side effects: none.

use std::fmt;

use crate::ast::{BinOp, Expr, OpClass, UnaryOp, ValueType};
use crate::diag::{codes, DiagCode};
use crate::scope::Scope;

/// Why an expression failed to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub code: DiagCode,
    pub message: String,
}

impl TypeError {
    fn new(code: DiagCode, message: String) -> Self {
        TypeError { code, message }
    }

    pub fn undeclared(name: &str) -> Self {
        TypeError::new(codes::E0401, format!("variable '{}' is not declared", name))
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Infer the type of `expr` under `scope`.
pub fn infer(expr: &Expr, scope: &Scope<'_>) -> Result<ValueType, TypeError> {
    match expr {
        Expr::Integer { .. } => Ok(ValueType::Number),
        Expr::Boolean { .. } => Ok(ValueType::Boolean),
        Expr::Variable { identifier } => scope
            .lookup(identifier)
            .ok_or_else(|| TypeError::undeclared(identifier)),
        Expr::State { identifier } => Ok(identifier.result_type()),
        Expr::Unary { operator, rhs } => {
            let operand = infer(rhs, scope)?;
            infer_unary(*operator, operand)
        }
        Expr::Binary { operator, lhs, rhs } => {
            let left = infer(lhs, scope)?;
            let right = infer(rhs, scope)?;
            infer_binary(*operator, left, right)
        }
    }
}

fn infer_unary(op: UnaryOp, operand: ValueType) -> Result<ValueType, TypeError> {
    let expected = match op {
        UnaryOp::Negate => ValueType::Number,
        UnaryOp::Not => ValueType::Boolean,
    };
    if operand != expected {
        return Err(TypeError::new(
            codes::E0402,
            format!(
                "operator '{}' cannot be applied to a value of type {}",
                op, operand
            ),
        ));
    }
    Ok(expected)
}

fn infer_binary(op: BinOp, left: ValueType, right: ValueType) -> Result<ValueType, TypeError> {
    let require = |side: Side, found: ValueType, want: ValueType| {
        if found == want {
            Ok(())
        } else {
            Err(TypeError::new(
                codes::E0402,
                format!(
                    "{} operand of operator '{}' must be of type {}",
                    side, op, want
                ),
            ))
        }
    };

    match op.class() {
        OpClass::Arithmetic | OpClass::Relational => {
            require(Side::Left, left, ValueType::Number)?;
            require(Side::Right, right, ValueType::Number)?;
            if op.class() == OpClass::Arithmetic {
                Ok(ValueType::Number)
            } else {
                Ok(ValueType::Boolean)
            }
        }
        OpClass::Logical => {
            require(Side::Left, left, ValueType::Boolean)?;
            require(Side::Right, right, ValueType::Boolean)?;
            Ok(ValueType::Boolean)
        }
        OpClass::Equality => {
            if left != right {
                return Err(TypeError::new(
                    codes::E0402,
                    format!(
                        "operands of operator '{}' must have the same type (left is {}, right is {})",
                        op, left, right
                    ),
                ));
            }
            Ok(ValueType::Boolean)
        }
    }
}
