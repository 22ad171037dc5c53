// occupancy.rs — Area capacity accounting
//
// Each area admits a bounded number of robot instances, derived from its
// kind and the number of declared instances:
//   SHARED       → every instance
//   SEMI_PRIVATE → every instance but one (never below 1)
//   PRIVATE      → exactly one
//
// Invariant: `current <= maximum` for every entry at all times.

use crate::ast::{Area, AreaKind};

/// Current and maximum occupancy of one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    current: usize,
    maximum: usize,
}

/// Returned by `Capacity::occupy` when the area is already full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub maximum: usize,
}

impl Capacity {
    pub fn for_kind(kind: AreaKind, instance_count: usize) -> Self {
        let maximum = match kind {
            AreaKind::Shared => instance_count,
            AreaKind::SemiPrivate => instance_count.saturating_sub(1).max(1),
            AreaKind::Private => 1,
        };
        Capacity { current: 0, maximum }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub fn is_used(&self) -> bool {
        self.current > 0
    }

    /// Take one slot, or report the ceiling that was hit.
    pub fn occupy(&mut self) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                maximum: self.maximum,
            });
        }
        self.current += 1;
        Ok(())
    }
}

/// Capacity per area, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyTable {
    entries: Vec<(String, Capacity)>,
}

impl OccupancyTable {
    pub fn new(areas: &[Area], instance_count: usize) -> Self {
        let entries = areas
            .iter()
            .map(|a| {
                (
                    a.identifier.clone(),
                    Capacity::for_kind(a.kind, instance_count),
                )
            })
            .collect();
        OccupancyTable { entries }
    }

    pub fn get(&self, area: &str) -> Option<&Capacity> {
        self.entries
            .iter()
            .find(|(name, _)| name == area)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, area: &str) -> Option<&mut Capacity> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == area)
            .map(|(_, c)| c)
    }

    /// First area (in declaration order) nobody occupies.
    pub fn first_unused(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| !c.is_used())
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capacity)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }
}
