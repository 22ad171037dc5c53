// inits.rs — Resource initialization checks
//
// Validates the program's start section against the declared areas and
// instances, in four strictly ordered blocks:
//   1. area assignments   (known names, capacity, no repeats)
//   2. coverage           (every area used, every instance placed)
//   3. item assignments   (known instance and item kind, no repeats)
//   4. origin assignments (one per instance, inside an assigned area, unique)
//
// Preconditions: areas passed `geometry`, instances passed `instances`.
// Postconditions: on success, returns the per-area occupancy and the
//   per-instance ledger; every area has 0 < usage <= capacity and every
//   instance has at least one area and exactly one origin inside it.
// Failure modes: first failing record; later blocks are not evaluated.
// Side effects: none.

use crate::ast::{Area, Inits, Instance, Point};
use crate::diag::{codes, Category, DiagCode, Diagnostic};
use crate::occupancy::OccupancyTable;

/// Items a robot can carry in its bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Flower,
    Paper,
}

impl ItemKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "flower" => Some(ItemKind::Flower),
            "paper" => Some(ItemKind::Paper),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ItemKind::Flower => "flower",
            ItemKind::Paper => "paper",
        }
    }
}

/// Starting resources accumulated for one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceLedger {
    pub name: String,
    pub areas: Vec<String>,
    pub flowers: Option<u32>,
    pub papers: Option<u32>,
    pub origin: Option<Point>,
}

impl InstanceLedger {
    fn new(name: &str) -> Self {
        InstanceLedger {
            name: name.to_string(),
            areas: Vec::new(),
            flowers: None,
            papers: None,
            origin: None,
        }
    }

    fn item_slot(&mut self, kind: ItemKind) -> &mut Option<u32> {
        match kind {
            ItemKind::Flower => &mut self.flowers,
            ItemKind::Paper => &mut self.papers,
        }
    }
}

/// Validated starting state handed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePlan {
    pub occupancy: OccupancyTable,
    pub instances: Vec<InstanceLedger>,
}

impl ResourcePlan {
    pub fn ledger(&self, instance: &str) -> Option<&InstanceLedger> {
        self.instances.iter().find(|l| l.name == instance)
    }
}

pub fn validate_inits(
    inits: &Inits,
    instances: &[Instance],
    areas: &[Area],
) -> Result<ResourcePlan, Diagnostic> {
    let mut plan = ResourcePlan {
        occupancy: OccupancyTable::new(areas, instances.len()),
        instances: instances
            .iter()
            .map(|i| InstanceLedger::new(&i.identifier))
            .collect(),
    };

    assign_areas(inits, &mut plan)?;
    check_coverage(&plan)?;
    assign_items(inits, &mut plan)?;
    assign_origins(inits, areas, &mut plan)?;

    Ok(plan)
}

fn assign_areas(inits: &Inits, plan: &mut ResourcePlan) -> Result<(), Diagnostic> {
    let err = |code: DiagCode, message: String| {
        Diagnostic::new(code, Category::InvalidAreaAssignment, message)
    };
    let exceeded = |area: &str, index: usize, maximum: usize| {
        err(
            codes::E0303,
            format!(
                "assignment limit for area '{}' exceeded in area assignment {} (capacity {})",
                area, index, maximum
            ),
        )
    };

    for (i, record) in inits.assign_areas.iter().enumerate() {
        let area = record.area.as_str();
        let instance = record.identifier.as_str();

        let Some(capacity) = plan.occupancy.get_mut(area) else {
            return Err(err(
                codes::E0301,
                format!(
                    "area '{}' is not declared and is used in area assignment {}",
                    area,
                    i + 1
                ),
            ));
        };
        let Some(ledger) = plan.instances.iter_mut().find(|l| l.name == instance) else {
            return Err(err(
                codes::E0302,
                format!(
                    "instance '{}' is not declared and is used in area assignment {}",
                    instance,
                    i + 1
                ),
            ));
        };

        if capacity.is_full() {
            return Err(exceeded(area, i + 1, capacity.maximum()));
        }
        if ledger.areas.iter().any(|a| a == area) {
            return Err(err(
                codes::E0304,
                format!(
                    "area '{}' is already assigned to instance '{}'",
                    area, instance
                ),
            ));
        }

        capacity
            .occupy()
            .map_err(|full| exceeded(area, i + 1, full.maximum))?;
        ledger.areas.push(area.to_string());
    }

    Ok(())
}

fn check_coverage(plan: &ResourcePlan) -> Result<(), Diagnostic> {
    if let Some(area) = plan.occupancy.first_unused() {
        return Err(Diagnostic::new(
            codes::E0305,
            Category::UnassignedArea,
            format!("area '{}' is not assigned to any instance", area),
        ));
    }
    if let Some(ledger) = plan.instances.iter().find(|l| l.areas.is_empty()) {
        return Err(Diagnostic::new(
            codes::E0306,
            Category::UnassignedArea,
            format!("instance '{}' has no assigned area", ledger.name),
        ));
    }
    Ok(())
}

fn assign_items(inits: &Inits, plan: &mut ResourcePlan) -> Result<(), Diagnostic> {
    let err = |code: DiagCode, message: String| {
        Diagnostic::new(code, Category::InvalidItemAssignment, message)
    };

    for (i, record) in inits.assign_items.iter().enumerate() {
        let instance = record.identifier.as_str();
        let Some(ledger) = plan.instances.iter_mut().find(|l| l.name == instance) else {
            return Err(err(
                codes::E0307,
                format!(
                    "instance '{}' is not declared and is used in item assignment {}",
                    instance,
                    i + 1
                ),
            ));
        };

        for token in &record.kinds {
            let Some(kind) = ItemKind::from_token(token) else {
                return Err(err(
                    codes::E0308,
                    format!(
                        "item kind '{}' is not valid and is used in item assignment {}",
                        token,
                        i + 1
                    ),
                )
                .with_hint("valid item kinds are 'flower' and 'paper'"));
            };
            let slot = ledger.item_slot(kind);
            if slot.is_some() {
                return Err(err(
                    codes::E0309,
                    format!(
                        "quantity of item '{}' is already assigned to instance '{}'",
                        kind.token(),
                        instance
                    ),
                ));
            }
            *slot = Some(record.value);
        }
    }

    Ok(())
}

fn assign_origins(
    inits: &Inits,
    areas: &[Area],
    plan: &mut ResourcePlan,
) -> Result<(), Diagnostic> {
    let err = |code: DiagCode, message: String| {
        Diagnostic::new(code, Category::InvalidInitialization, message)
    };

    for (i, record) in inits.assign_origins.iter().enumerate() {
        let instance = record.identifier.as_str();
        let origin = record.point();

        let Some(idx) = plan.instances.iter().position(|l| l.name == instance) else {
            return Err(err(
                codes::E0310,
                format!(
                    "instance '{}' is not declared and is used in origin assignment {}",
                    instance,
                    i + 1
                ),
            ));
        };

        let ledger = &plan.instances[idx];
        if ledger.origin.is_some() {
            return Err(err(
                codes::E0311,
                format!(
                    "instance '{}' may only have one origin, second origin in origin assignment {}",
                    instance,
                    i + 1
                ),
            ));
        }

        let inside = ledger.areas.iter().any(|name| {
            areas
                .iter()
                .find(|a| a.identifier == *name)
                .is_some_and(|a| a.rect().contains(origin))
        });
        if !inside {
            return Err(err(
                codes::E0312,
                format!(
                    "origin {} of instance '{}' is outside its assigned areas in origin assignment {}",
                    origin,
                    instance,
                    i + 1
                ),
            ));
        }

        if let Some(other) = plan.instances.iter().find(|l| l.origin == Some(origin)) {
            return Err(err(
                codes::E0313,
                format!(
                    "instances '{}' and '{}' have the same origin {}",
                    other.name, instance, origin
                ),
            ));
        }

        plan.instances[idx].origin = Some(origin);
    }

    if let Some(ledger) = plan.instances.iter().find(|l| l.origin.is_none()) {
        return Err(err(
            codes::E0314,
            format!("no origin assigned to instance '{}'", ledger.name),
        ));
    }

    Ok(())
}
