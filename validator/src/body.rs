// body.rs — Statement and body checks
//
// Walks one declaration body in source order and stops at the first fault.
// Expression faults come back from `type_infer` as `TypeError` and are lifted
// here into a `Diagnostic` carrying the statement's category and one context
// link naming the construct they were found in.
//
// Preconditions: `scope` holds every variable visible in the body;
//   `signatures` holds every declared procedure.
// Postconditions: on success, every statement is well typed, every call
//   matches its callee's signature and every message target exists.
// Failure modes: first faulty statement in depth-first, left-to-right order.
// Side effects: none.

use crate::ast::{Expr, InformArg, ParamMode, Statement, ValueType, BROADCAST};
use crate::diag::{codes, Category, Diagnostic};
use crate::scope::{Scope, Signatures};
use crate::type_infer::{infer, TypeError};

/// Everything a statement may refer to.
#[derive(Debug, Clone, Copy)]
pub struct BodyContext<'a> {
    pub scope: &'a Scope<'a>,
    pub instances: &'a [&'a str],
    pub signatures: &'a Signatures<'a>,
}

pub fn validate_body(body: &[Statement], cx: &BodyContext<'_>) -> Result<(), Diagnostic> {
    body.iter().try_for_each(|stmt| validate_statement(stmt, cx))
}

pub fn validate_statement(stmt: &Statement, cx: &BodyContext<'_>) -> Result<(), Diagnostic> {
    match stmt {
        Statement::Assign { identifier, value } => check_assign(identifier, value, cx),
        Statement::Block { body } => validate_body(body, cx),
        Statement::If {
            condition,
            body,
            else_body,
        } => {
            check_condition("si", condition, ValueType::Boolean, cx)?;
            validate_statement(body, cx)?;
            if let Some(else_body) = else_body {
                validate_statement(else_body, cx)
                    .map_err(|d| d.with_context("in else branch of si"))?;
            }
            Ok(())
        }
        Statement::For { condition, body } => {
            check_condition("repetir", condition, ValueType::Number, cx)?;
            validate_statement(body, cx)
        }
        Statement::While { condition, body } => {
            check_condition("mientras", condition, ValueType::Boolean, cx)?;
            validate_statement(body, cx)
        }
        Statement::Inform { arg1, arg2 } => {
            let expr = match arg1 {
                InformArg::Text(_) => arg2.as_ref(),
                InformArg::Expr(e) => Some(e),
            };
            if let Some(expr) = expr {
                infer(expr, cx.scope).map_err(|e| {
                    lift(e, Category::InvalidParameter).with_context("in argument of Informar")
                })?;
            }
            Ok(())
        }
        Statement::ChangePosition { x, y } => {
            check_numeric_arg("x coordinate", "Pos", x, cx)?;
            check_numeric_arg("y coordinate", "Pos", y, cx)
        }
        Statement::GenerateNumber { identifier, min, max } => {
            check_random_target(identifier, cx)?;
            check_numeric_arg("minimum", "Random", min, cx)?;
            check_numeric_arg("maximum", "Random", max, cx)
        }
        Statement::Message { mode, value, who } => {
            let keyword = mode.keyword();
            infer(value, cx.scope).map_err(|e| {
                lift(e, Category::InvalidParameter)
                    .with_context(format!("in value of {}", keyword))
            })?;
            if who != BROADCAST && !cx.instances.contains(&who.as_str()) {
                return Err(Diagnostic::new(
                    codes::E0501,
                    Category::InvalidParameter,
                    format!(
                        "instance '{}' is not declared and is used as target of {}",
                        who, keyword
                    ),
                )
                .with_hint(format!("use '{}' to address every instance", BROADCAST)));
            }
            Ok(())
        }
        Statement::ControlCorner { mode, x, y } => {
            check_numeric_arg("x coordinate", mode.keyword(), x, cx)?;
            check_numeric_arg("y coordinate", mode.keyword(), y, cx)
        }
        Statement::Call {
            identifier,
            parameters,
        } => check_call(identifier, parameters, cx),
        Statement::Action { .. } => Ok(()),
    }
}

fn lift(err: TypeError, category: Category) -> Diagnostic {
    Diagnostic::new(err.code, category, err.message)
}

fn check_assign(identifier: &str, value: &Expr, cx: &BodyContext<'_>) -> Result<(), Diagnostic> {
    let context = || format!("in assignment of variable '{}'", identifier);

    let Some(declared) = cx.scope.lookup(identifier) else {
        return Err(lift(
            TypeError::undeclared(identifier),
            Category::InvalidValueAssignment,
        ));
    };
    let found = infer(value, cx.scope)
        .map_err(|e| lift(e, Category::InvalidValueAssignment).with_context(context()))?;
    if found != declared {
        return Err(Diagnostic::new(
            codes::E0404,
            Category::InvalidValueAssignment,
            format!(
                "cannot assign a value of type {} to a variable of type {}",
                found, declared
            ),
        )
        .with_context(context()));
    }
    Ok(())
}

fn check_condition(
    keyword: &str,
    condition: &Expr,
    expected: ValueType,
    cx: &BodyContext<'_>,
) -> Result<(), Diagnostic> {
    let found = infer(condition, cx.scope).map_err(|e| {
        lift(e, Category::InvalidCondition).with_context(format!("in condition of {}", keyword))
    })?;
    if found != expected {
        return Err(Diagnostic::new(
            codes::E0403,
            Category::InvalidConditionResult,
            format!(
                "condition of a '{}' statement must be of type {}, found {}",
                keyword, expected, found
            ),
        ));
    }
    Ok(())
}

/// Built-in arguments that must evaluate to `numero` (`Pos`, corner locks,
/// `Random` bounds).
fn check_numeric_arg(
    what: &str,
    keyword: &str,
    arg: &Expr,
    cx: &BodyContext<'_>,
) -> Result<(), Diagnostic> {
    let found = infer(arg, cx.scope).map_err(|e| {
        lift(e, Category::InvalidParameter).with_context(format!("in {} of {}", what, keyword))
    })?;
    if found != ValueType::Number {
        return Err(Diagnostic::new(
            codes::E0405,
            Category::InvalidParameter,
            format!(
                "{} of {} must be of type {}, found {}",
                what,
                keyword,
                ValueType::Number,
                found
            ),
        ));
    }
    Ok(())
}

fn check_random_target(identifier: &str, cx: &BodyContext<'_>) -> Result<(), Diagnostic> {
    match cx.scope.lookup(identifier) {
        None => Err(lift(TypeError::undeclared(identifier), Category::InvalidParameter)
            .with_context("in target of Random")),
        Some(ValueType::Number) => Ok(()),
        Some(found) => Err(Diagnostic::new(
            codes::E0405,
            Category::InvalidParameter,
            format!(
                "target variable '{}' of Random must be of type {}, found {}",
                identifier,
                ValueType::Number,
                found
            ),
        )),
    }
}

fn check_call(callee: &str, actuals: &[Expr], cx: &BodyContext<'_>) -> Result<(), Diagnostic> {
    let call_error = |code, message: String| {
        Diagnostic::new(code, Category::InvalidProcedureCall, message)
    };

    let Some(formals) = cx.signatures.get(callee) else {
        return Err(call_error(
            codes::E0502,
            format!("procedure '{}' is not declared", callee),
        ));
    };

    if actuals.len() != formals.len() {
        let (code, amount) = if actuals.len() < formals.len() {
            (codes::E0503, "too few")
        } else {
            (codes::E0504, "too many")
        };
        return Err(call_error(
            code,
            format!(
                "{} arguments in call to procedure '{}' (expected {}, found {})",
                amount,
                callee,
                formals.len(),
                actuals.len()
            ),
        ));
    }

    for (i, (formal, actual)) in formals.iter().zip(actuals).enumerate() {
        let position = i + 1;
        let found = match formal.type_parameter {
            ParamMode::ByReference => {
                let Some(name) = actual.as_variable() else {
                    return Err(call_error(
                        codes::E0505,
                        format!(
                            "argument {} in call to procedure '{}' must be a variable",
                            position, callee
                        ),
                    )
                    .with_hint(format!(
                        "parameter '{}' is declared {}, so it is passed by reference",
                        formal.identifier,
                        ParamMode::ByReference
                    )));
                };
                cx.scope.lookup(name).ok_or_else(|| {
                    lift(TypeError::undeclared(name), Category::InvalidProcedureCall)
                        .with_context(format!("in call to procedure '{}'", callee))
                })?
            }
            ParamMode::ByValue => infer(actual, cx.scope).map_err(|e| {
                lift(e, Category::InvalidProcedureCall).with_context(format!(
                    "in argument {} of call to procedure '{}'",
                    position, callee
                ))
            })?,
        };
        if found != formal.type_value {
            return Err(call_error(
                codes::E0506,
                format!(
                    "argument {} in call to procedure '{}' is of type {}, but parameter '{}' is declared {}",
                    position, callee, found, formal.identifier, formal.type_value
                ),
            ));
        }
    }
    Ok(())
}
