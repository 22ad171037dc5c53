// scope.rs — Name tables used while checking declaration bodies
//
// `Scope` is the flat set of variables visible inside one procedure or robot
// type: its locals followed by its parameters. Blocks never open a nested
// scope. `Signatures` maps procedure names to their formal parameter lists,
// built once before any body is checked so calls may refer forward.

use crate::ast::{Parameter, Procedure, ValueType, Variable};

/// Variables visible in one declaration body.
#[derive(Debug, Clone, Default)]
pub struct Scope<'p> {
    vars: Vec<(&'p str, ValueType)>,
}

impl<'p> Scope<'p> {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Scope of a robot type: locals only.
    pub fn from_locals(locals: &'p [Variable]) -> Self {
        Scope {
            vars: locals
                .iter()
                .map(|v| (v.identifier.as_str(), v.type_value))
                .collect(),
        }
    }

    /// Scope of a procedure. Locals are listed first, so a local that
    /// shares a parameter's name is the one a lookup finds.
    pub fn with_parameters(locals: &'p [Variable], params: &'p [Parameter]) -> Self {
        let mut scope = Scope::from_locals(locals);
        scope.vars.extend(
            params
                .iter()
                .map(|p| (p.identifier.as_str(), p.type_value)),
        );
        scope
    }

    pub fn lookup(&self, name: &str) -> Option<ValueType> {
        self.vars
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Procedure name → formal parameters.
#[derive(Debug, Clone, Default)]
pub struct Signatures<'p> {
    procs: Vec<(&'p str, &'p [Parameter])>,
}

impl<'p> Signatures<'p> {
    pub fn new(procedures: &'p [Procedure]) -> Self {
        Signatures {
            procs: procedures
                .iter()
                .map(|p| (p.identifier.as_str(), p.parameters.as_slice()))
                .collect(),
        }
    }

    /// First procedure declared under `name`.
    pub fn get(&self, name: &str) -> Option<&'p [Parameter]> {
        self.procs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, params)| *params)
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}
