// diag.rs — Diagnostics model for the validator
//
// Every validation stage returns `Result<_, Diagnostic>`: the first fault
// aborts the stage and travels upward by value, picking up one context link
// per enclosing construct. `Verdict` is the public outcome of a whole run.
//
// Preconditions: none (types only).
// Postconditions: none (types only).
// Failure modes: none.
// Side effects: none.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

// ── Diagnostic code ──────────────────────────────────────────────────────

/// A stable diagnostic code (e.g., `E0104`).
///
/// Once assigned, a code must never be reassigned to a different meaning;
/// the editor keys its help links on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiagCode(pub &'static str);

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub mod codes {
    use super::DiagCode;

    // E01xx: area geometry
    pub const E0101: DiagCode = DiagCode("E0101"); // corner outside the grid
    pub const E0102: DiagCode = DiagCode("E0102"); // corners out of order
    pub const E0103: DiagCode = DiagCode("E0103"); // duplicate area name
    pub const E0104: DiagCode = DiagCode("E0104"); // overlapping areas

    // E02xx: instance binding
    pub const E0201: DiagCode = DiagCode("E0201"); // duplicate instance name
    pub const E0202: DiagCode = DiagCode("E0202"); // unknown robot type

    // E03xx: resource initialization
    pub const E0301: DiagCode = DiagCode("E0301"); // unknown area in assignment
    pub const E0302: DiagCode = DiagCode("E0302"); // unknown instance in area assignment
    pub const E0303: DiagCode = DiagCode("E0303"); // area capacity exceeded
    pub const E0304: DiagCode = DiagCode("E0304"); // area assigned twice to an instance
    pub const E0305: DiagCode = DiagCode("E0305"); // area never assigned
    pub const E0306: DiagCode = DiagCode("E0306"); // instance without area
    pub const E0307: DiagCode = DiagCode("E0307"); // unknown instance in item assignment
    pub const E0308: DiagCode = DiagCode("E0308"); // unknown item kind
    pub const E0309: DiagCode = DiagCode("E0309"); // item quantity assigned twice
    pub const E0310: DiagCode = DiagCode("E0310"); // unknown instance in origin assignment
    pub const E0311: DiagCode = DiagCode("E0311"); // second origin for an instance
    pub const E0312: DiagCode = DiagCode("E0312"); // origin outside assigned areas
    pub const E0313: DiagCode = DiagCode("E0313"); // origin shared by two instances
    pub const E0314: DiagCode = DiagCode("E0314"); // instance without origin

    // E04xx: expression and value types
    pub const E0401: DiagCode = DiagCode("E0401"); // undeclared variable
    pub const E0402: DiagCode = DiagCode("E0402"); // operand type mismatch
    pub const E0403: DiagCode = DiagCode("E0403"); // condition type mismatch
    pub const E0404: DiagCode = DiagCode("E0404"); // assignment type mismatch
    pub const E0405: DiagCode = DiagCode("E0405"); // built-in argument type mismatch

    // E05xx: message targets and procedure calls
    pub const E0501: DiagCode = DiagCode("E0501"); // unknown message target
    pub const E0502: DiagCode = DiagCode("E0502"); // unknown procedure
    pub const E0503: DiagCode = DiagCode("E0503"); // too few arguments
    pub const E0504: DiagCode = DiagCode("E0504"); // too many arguments
    pub const E0505: DiagCode = DiagCode("E0505"); // ES argument is not a variable
    pub const E0506: DiagCode = DiagCode("E0506"); // argument type mismatch

    // E06xx: declarations
    pub const E0601: DiagCode = DiagCode("E0601"); // duplicate procedure
    pub const E0602: DiagCode = DiagCode("E0602"); // duplicate parameter
    pub const E0603: DiagCode = DiagCode("E0603"); // duplicate local variable
    pub const E0604: DiagCode = DiagCode("E0604"); // duplicate robot type
}

// ── Category ─────────────────────────────────────────────────────────────

/// Short, user-facing error category shown as the headline of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    InvalidAreaDeclaration,
    InvalidInstanceDeclaration,
    InvalidAreaAssignment,
    UnassignedArea,
    InvalidItemAssignment,
    InvalidInitialization,
    InvalidValueAssignment,
    InvalidCondition,
    InvalidConditionResult,
    InvalidParameter,
    InvalidProcedureCall,
    InvalidProcedureDeclaration,
    InvalidVariableDeclaration,
    InvalidRobotTypeDeclaration,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::InvalidAreaDeclaration => "invalid area declaration",
            Category::InvalidInstanceDeclaration => "invalid instance declaration",
            Category::InvalidAreaAssignment => "invalid area assignment",
            Category::UnassignedArea => "unassigned area",
            Category::InvalidItemAssignment => "invalid item assignment",
            Category::InvalidInitialization => "invalid initialization",
            Category::InvalidValueAssignment => "invalid value assignment",
            Category::InvalidCondition => "invalid condition",
            Category::InvalidConditionResult => "invalid condition result",
            Category::InvalidParameter => "invalid parameter declaration",
            Category::InvalidProcedureCall => "invalid procedure call",
            Category::InvalidProcedureDeclaration => "invalid procedure declaration",
            Category::InvalidVariableDeclaration => "invalid variable declaration",
            Category::InvalidRobotTypeDeclaration => "invalid robot type declaration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: DiagCode,
    pub category: Category,
    pub message: String,
    pub hint: Option<String>,
    /// Enclosing constructs, innermost first.
    pub context_chain: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: DiagCode, category: Category, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            hint: None,
            context_chain: Vec::new(),
        }
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Record one enclosing construct (e.g. `in declaration of procedure 'P'`).
    pub fn with_context(mut self, link: impl Into<String>) -> Self {
        self.context_chain.push(link.into());
        self
    }

    /// The message followed by every context link, innermost first.
    pub fn context(&self) -> String {
        let mut out = self.message.clone();
        for link in &self.context_chain {
            out.push_str(", ");
            out.push_str(link);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}: {}", self.code, self.category, self.context())?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

// ── Verdict ──────────────────────────────────────────────────────────────

/// Outcome of validating one program.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(Diagnostic),
}

impl Verdict {
    pub fn is_error(&self) -> bool {
        matches!(self, Verdict::Invalid(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(d) => Some(d),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.diagnostic().map(|d| d.category)
    }

    /// Rendered context string; empty for a valid program.
    pub fn context(&self) -> String {
        self.diagnostic().map(Diagnostic::context).unwrap_or_default()
    }
}

impl From<Result<(), Diagnostic>> for Verdict {
    fn from(result: Result<(), Diagnostic>) -> Self {
        match result {
            Ok(()) => Verdict::Valid,
            Err(d) => Verdict::Invalid(d),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verdict::Valid => {
                let mut s = serializer.serialize_struct("Verdict", 1)?;
                s.serialize_field("error", &false)?;
                s.end()
            }
            Verdict::Invalid(d) => {
                let mut s = serializer.serialize_struct("Verdict", 5)?;
                s.serialize_field("error", &true)?;
                s.serialize_field("code", &d.code)?;
                s.serialize_field("category", d.category.label())?;
                s.serialize_field("context", &d.context())?;
                s.serialize_field("hint", &d.hint)?;
                s.end()
            }
        }
    }
}
