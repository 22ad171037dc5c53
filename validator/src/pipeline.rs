// pipeline.rs — Validation state and pass orchestration
//
// Holds the intermediate results shared between passes and runs the
// required passes for a terminal PassId in dependency order.
//
// Preconditions: the program was produced by `load` (well-formed shape).
// Postconditions: every required pass ran and succeeded, or the first
//   failing pass and its diagnostic are returned.
// Failure modes: the first diagnostic raised by any pass.
// Side effects: calls on_pass_complete after each pass; logs per-pass timing.

use std::time::{Duration, Instant};

use crate::ast::Program;
use crate::diag::{Diagnostic, Verdict};
use crate::inits::ResourcePlan;
use crate::pass::{descriptor, required_passes, PassId};
use crate::scope::Signatures;

// ── Validation state ───────────────────────────────────────────────────────

/// Results one pass hands to the passes after it. Created fresh per run.
pub struct ValidationState<'p> {
    pub program: &'p Program,
    /// Instance names in declaration order, set by the instances pass.
    pub instance_names: Option<Vec<&'p str>>,
    /// Area occupancy and per-instance ledgers, set by the inits pass.
    pub resources: Option<ResourcePlan>,
    /// Procedure signatures, built before any body is checked.
    pub signatures: Signatures<'p>,
}

impl<'p> ValidationState<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            instance_names: None,
            resources: None,
            signatures: Signatures::new(&program.procedures),
        }
    }

    fn instances(&self) -> &[&'p str] {
        self.instance_names.as_deref().unwrap_or_default()
    }
}

// ── Error type ─────────────────────────────────────────────────────────────

/// A pass rejected the program.
#[derive(Debug)]
pub struct PipelineError {
    /// The pass that produced the diagnostic.
    pub failing_pass: PassId,
    pub diagnostic: Diagnostic,
}

// ── Pipeline runner ────────────────────────────────────────────────────────

/// Per-pass post-processing: callback, timing log, error conversion.
fn finish_pass<T>(
    pass_id: PassId,
    result: Result<T, Diagnostic>,
    elapsed: Duration,
    on_pass_complete: &mut impl FnMut(PassId, Option<&Diagnostic>),
) -> Result<T, PipelineError> {
    on_pass_complete(pass_id, result.as_ref().err());
    log::debug!(
        "{} complete, {:.1}ms",
        descriptor(pass_id).name,
        elapsed.as_secs_f64() * 1000.0
    );
    result.map_err(|diagnostic| PipelineError {
        failing_pass: pass_id,
        diagnostic,
    })
}

/// Run the passes required by `terminal`.
///
/// Per-pass sequence: execute → on_pass_complete(callback) → timing log → error check.
pub fn run_pipeline(
    state: &mut ValidationState<'_>,
    terminal: PassId,
    mut on_pass_complete: impl FnMut(PassId, Option<&Diagnostic>),
) -> Result<(), PipelineError> {
    let program = state.program;

    for pass_id in required_passes(terminal) {
        let t = Instant::now();
        match pass_id {
            PassId::Geometry => {
                let result = crate::geometry::validate_areas(&program.areas);
                finish_pass(pass_id, result, t.elapsed(), &mut on_pass_complete)?;
            }
            PassId::Instances => {
                let result =
                    crate::instances::validate_instances(&program.instances, &program.robot_types);
                let names = finish_pass(pass_id, result, t.elapsed(), &mut on_pass_complete)?;
                state.instance_names = Some(names);
            }
            PassId::Inits => {
                let result = crate::inits::validate_inits(
                    &program.inits,
                    &program.instances,
                    &program.areas,
                );
                let plan = finish_pass(pass_id, result, t.elapsed(), &mut on_pass_complete)?;
                state.resources = Some(plan);
            }
            PassId::Procedures => {
                let result = crate::decls::validate_procedures(
                    &program.procedures,
                    &state.signatures,
                    state.instances(),
                );
                finish_pass(pass_id, result, t.elapsed(), &mut on_pass_complete)?;
            }
            PassId::RobotTypes => {
                let result = crate::decls::validate_robot_types(
                    &program.robot_types,
                    &state.signatures,
                    state.instances(),
                );
                finish_pass(pass_id, result, t.elapsed(), &mut on_pass_complete)?;
            }
        }
    }

    Ok(())
}

/// Validate a whole program: every pass, in dependency order, first fault wins.
pub fn validate(program: &Program) -> Verdict {
    let mut state = ValidationState::new(program);
    match run_pipeline(&mut state, PassId::RobotTypes, |_, _| {}) {
        Ok(()) => Verdict::Valid,
        Err(e) => Verdict::Invalid(e.diagnostic),
    }
}

// ── Provenance ─────────────────────────────────────────────────────────────

/// Provenance metadata attached to machine-readable verdicts.
///
/// `ast_hash`: SHA-256 of the canonical compact JSON of the loaded AST.
/// `validator_version`: crate version from `Cargo.toml`.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub ast_hash: [u8; 32],
    pub validator_version: &'static str,
}

impl Provenance {
    /// Hex string of the AST hash (64 characters).
    pub fn ast_hash_hex(&self) -> String {
        bytes_to_hex(&self.ast_hash)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "ast_hash": self.ast_hash_hex(),
            "validator_version": self.validator_version,
        })
    }
}

fn bytes_to_hex(bytes: &[u8; 32]) -> String {
    let mut s = String::with_capacity(64);
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
    }
    s
}

/// Compute provenance for a loaded program.
///
/// The hash covers the re-serialized AST rather than the input text, so
/// whitespace and key order in the source document do not affect it.
pub fn compute_provenance(program: &Program) -> Result<Provenance, serde_json::Error> {
    use sha2::{Digest, Sha256};

    let canonical = serde_json::to_string(program)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let result = hasher.finalize();
    let mut ast_hash = [0u8; 32];
    ast_hash.copy_from_slice(&result);

    Ok(Provenance {
        ast_hash,
        validator_version: env!("CARGO_PKG_VERSION"),
    })
}
