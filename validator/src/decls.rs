// decls.rs — Procedure and robot type declaration checks
//
// Top-level drivers for the two kinds of declarations that own a body.
// Each checks name uniqueness, builds the visible scope, and hands the body
// to `body::validate_body`. Faults raised inside a declaration pick up one
// context link naming it.
//
// Preconditions: `instances` holds the validated instance names.
// Postconditions: on success, every declaration body is well formed.
// Failure modes: first faulty declaration in source order.
// Side effects: logs a warning when a local shadows a parameter.

use crate::ast::{Procedure, RobotType};
use crate::body::{validate_body, BodyContext};
use crate::diag::{codes, Category, DiagCode, Diagnostic};
use crate::scope::{Scope, Signatures};

/// First pair of items sharing a name, as `(earlier, later, name)` with
/// 0-based positions.
pub fn find_duplicate<'a, T, S, F>(items: &'a [T], name_of: F) -> Option<(usize, usize, &'a str)>
where
    F: Fn(&'a T) -> &'a S,
    S: AsRef<str> + ?Sized + 'a,
{
    for (i, item) in items.iter().enumerate() {
        let name = name_of(item).as_ref();
        if let Some(j) = items[..i].iter().position(|e| name_of(e).as_ref() == name) {
            return Some((j, i, name));
        }
    }
    None
}

fn duplicate_in<'a, T, S, F>(
    items: &'a [T],
    name_of: F,
    code: DiagCode,
    category: Category,
    what: &str,
) -> Result<(), Diagnostic>
where
    F: Fn(&'a T) -> &'a S,
    S: AsRef<str> + ?Sized + 'a,
{
    match find_duplicate(items, name_of) {
        None => Ok(()),
        Some((first, second, name)) => Err(Diagnostic::new(
            code,
            category,
            format!(
                "identifier '{}' is used in {} {} and {}",
                name,
                what,
                first + 1,
                second + 1
            ),
        )),
    }
}

// ── Procedures ──

pub fn validate_procedures(
    procedures: &[Procedure],
    signatures: &Signatures<'_>,
    instances: &[&str],
) -> Result<(), Diagnostic> {
    duplicate_in(
        procedures,
        |p| &p.identifier,
        codes::E0601,
        Category::InvalidProcedureDeclaration,
        "procedure declarations",
    )?;

    for procedure in procedures {
        validate_procedure(procedure, signatures, instances).map_err(|d| {
            d.with_context(format!(
                "in declaration of procedure '{}'",
                procedure.identifier
            ))
        })?;
    }
    Ok(())
}

fn validate_procedure(
    procedure: &Procedure,
    signatures: &Signatures<'_>,
    instances: &[&str],
) -> Result<(), Diagnostic> {
    duplicate_in(
        &procedure.parameters,
        |p| &p.identifier,
        codes::E0602,
        Category::InvalidParameter,
        "parameter declarations",
    )?;
    duplicate_in(
        &procedure.local_variables,
        |v| &v.identifier,
        codes::E0603,
        Category::InvalidVariableDeclaration,
        "variable declarations",
    )?;

    for local in &procedure.local_variables {
        if procedure
            .parameters
            .iter()
            .any(|p| p.identifier == local.identifier)
        {
            log::warn!(
                "procedure '{}': local variable '{}' shadows a parameter of the same name",
                procedure.identifier,
                local.identifier
            );
        }
    }

    let scope = Scope::with_parameters(&procedure.local_variables, &procedure.parameters);
    let cx = BodyContext {
        scope: &scope,
        instances,
        signatures,
    };
    validate_body(&procedure.body, &cx)
}

// ── Robot types ──

pub fn validate_robot_types(
    robot_types: &[RobotType],
    signatures: &Signatures<'_>,
    instances: &[&str],
) -> Result<(), Diagnostic> {
    duplicate_in(
        robot_types,
        |t| &t.identifier,
        codes::E0604,
        Category::InvalidRobotTypeDeclaration,
        "robot type declarations",
    )?;

    for robot in robot_types {
        validate_robot_type(robot, signatures, instances).map_err(|d| {
            d.with_context(format!("in declaration of robot type '{}'", robot.identifier))
        })?;
    }
    Ok(())
}

fn validate_robot_type(
    robot: &RobotType,
    signatures: &Signatures<'_>,
    instances: &[&str],
) -> Result<(), Diagnostic> {
    duplicate_in(
        &robot.local_variables,
        |v| &v.identifier,
        codes::E0603,
        Category::InvalidVariableDeclaration,
        "variable declarations",
    )?;

    let scope = Scope::from_locals(&robot.local_variables);
    let cx = BodyContext {
        scope: &scope,
        instances,
        signatures,
    };
    validate_body(&robot.body, &cx)
}
