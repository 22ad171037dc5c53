// rsv — RobotScript validator
//
// Library root. Static semantic checks for multi-robot city programs, run as
// an ordered set of passes over the parser's AST. `validate` is the entry
// point; `load` turns the parser's JSON output into an `ast::Program`.

pub mod ast;
pub mod body;
pub mod decls;
pub mod diag;
pub mod geometry;
pub mod inits;
pub mod instances;
pub mod load;
pub mod occupancy;
pub mod pass;
pub mod pipeline;
pub mod scope;
pub mod type_infer;

pub use diag::{Category, Diagnostic, Verdict};
pub use pipeline::validate;
