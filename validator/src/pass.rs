// pass.rs — Pass descriptor module: metadata and dependency resolution
//
// Declares the validator's 5 passes and their dependency edges. The pipeline
// runner asks for the passes required by a terminal pass and executes them in
// the returned order, stopping at the first failure.

use std::collections::HashSet;

// ── Pass identifiers ───────────────────────────────────────────────────────

/// Identifies each validation pass (loading is handled before the runner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassId {
    Geometry,
    Instances,
    Inits,
    Procedures,
    RobotTypes,
}

// ── Pass descriptor ────────────────────────────────────────────────────────

/// Static metadata about a validation pass.
pub struct PassDescriptor {
    /// Human-readable name for verbose output.
    pub name: &'static str,
    /// Passes whose results this pass relies on.
    pub inputs: &'static [PassId],
    /// What holds once the pass succeeds (documentation only).
    pub invariants: &'static str,
}

/// Return the static descriptor for a given pass.
pub fn descriptor(id: PassId) -> PassDescriptor {
    match id {
        PassId::Geometry => PassDescriptor {
            name: "geometry",
            inputs: &[],
            invariants: "areas inside the grid, ordered, uniquely named, pairwise disjoint",
        },
        PassId::Instances => PassDescriptor {
            name: "instances",
            inputs: &[],
            invariants: "instance names unique, every robot type declared",
        },
        PassId::Inits => PassDescriptor {
            name: "inits",
            inputs: &[PassId::Geometry, PassId::Instances],
            invariants: "capacities respected, every instance placed once inside its areas",
        },
        PassId::Procedures => PassDescriptor {
            name: "procedures",
            inputs: &[PassId::Inits],
            invariants: "procedure bodies well typed, calls match signatures",
        },
        PassId::RobotTypes => PassDescriptor {
            name: "robot_types",
            inputs: &[PassId::Procedures],
            invariants: "robot type bodies well typed, calls match signatures",
        },
    }
}

// ── Dependency resolution ──────────────────────────────────────────────────

/// All 5 pass IDs in declaration order.
pub const ALL_PASSES: [PassId; 5] = [
    PassId::Geometry,
    PassId::Instances,
    PassId::Inits,
    PassId::Procedures,
    PassId::RobotTypes,
];

/// Compute the minimal ordered set of passes needed to run `terminal`.
/// Returns passes in topological (execution) order.
pub fn required_passes(terminal: PassId) -> Vec<PassId> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    visit(terminal, &mut visited, &mut order);
    order
}

fn visit(id: PassId, visited: &mut HashSet<PassId>, order: &mut Vec<PassId>) {
    if !visited.insert(id) {
        return;
    }
    for &dep in descriptor(id).inputs {
        visit(dep, visited, order);
    }
    order.push(id);
}

// ── Tests ──────────────────────────────────────────────────────────────────
