// geometry.rs — Area declaration checks
//
// Validates the city layout: every area corner lies on the 100×100 grid,
// corners are ordered, names are unique, and no two rectangles share a
// corner (closed rectangles, so edge contact counts as overlap).
//
// Preconditions: none; consumes the area list as declared.
// Postconditions: on success, the areas form a set of pairwise disjoint
//   rectangles inside [1,100]².
// Failure modes: first offending area in declaration order.
// Side effects: none.

use crate::ast::{Area, Point};
use crate::diag::{codes, Category, DiagCode, Diagnostic};

/// Smallest valid avenue/street number.
pub const GRID_MIN: i64 = 1;
/// Largest valid avenue/street number.
pub const GRID_MAX: i64 = 100;

/// A closed, axis-aligned rectangle spanned by lower-left `a` and
/// upper-right `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub a: Point,
    pub b: Point,
}

impl Rect {
    pub fn new(a: Point, b: Point) -> Self {
        Rect { a, b }
    }

    /// The whole city grid.
    pub fn grid() -> Self {
        Rect::new(Point::new(GRID_MIN, GRID_MIN), Point::new(GRID_MAX, GRID_MAX))
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.a.x..=self.b.x).contains(&p.x) && (self.a.y..=self.b.y).contains(&p.y)
    }

    pub fn is_ordered(&self) -> bool {
        self.a.x <= self.b.x && self.a.y <= self.b.y
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let disjoint = self.b.x < other.a.x
            || self.a.y > other.b.y
            || self.a.x > other.b.x
            || self.b.y < other.a.y;
        !disjoint
    }
}

impl Area {
    pub fn rect(&self) -> Rect {
        Rect::new(self.a, self.b)
    }
}

/// Check every area declaration, stopping at the first violation.
pub fn validate_areas(areas: &[Area]) -> Result<(), Diagnostic> {
    let grid = Rect::grid();

    for (i, area) in areas.iter().enumerate() {
        let name = &area.identifier;
        let a_ok = grid.contains(area.a);
        let b_ok = grid.contains(area.b);

        if !(a_ok && b_ok) {
            let which = match (a_ok, b_ok) {
                (false, true) => "first corner",
                (true, false) => "second corner",
                _ => "both corners",
            };
            return Err(invalid(
                codes::E0101,
                format!(
                    "{} of area '{}' must lie between {} and {} on each axis",
                    which, name, GRID_MIN, GRID_MAX
                ),
            ));
        }

        let rect = area.rect();
        if !rect.is_ordered() {
            return Err(invalid(
                codes::E0102,
                format!(
                    "second corner {} of area '{}' must not be below or left of first corner {}",
                    area.b, name, area.a
                ),
            )
            .with_hint("declare the lower-left corner first"));
        }

        for (j, earlier) in areas[..i].iter().enumerate() {
            if earlier.identifier == *name {
                return Err(invalid(
                    codes::E0103,
                    format!(
                        "identifier '{}' is used in area declarations {} and {}",
                        name,
                        j + 1,
                        i + 1
                    ),
                ));
            }
            if earlier.rect().overlaps(&rect) {
                return Err(invalid(
                    codes::E0104,
                    format!(
                        "area '{}' shares points with area '{}'",
                        earlier.identifier, name
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn invalid(code: DiagCode, message: String) -> Diagnostic {
    Diagnostic::new(code, Category::InvalidAreaDeclaration, message)
}
