// instances.rs — Robot instance binding checks
//
// Every instance must have a unique name and name a declared robot type.
//
// Preconditions: none.
// Postconditions: on success, returns the instance names in declaration
//   order; later stages resolve message targets and init records against it.
// Failure modes: first duplicate pair, then first unknown robot type.
// Side effects: none.

use crate::ast::{Instance, RobotType};
use crate::decls::find_duplicate;
use crate::diag::{codes, Category, Diagnostic};

pub fn validate_instances<'p>(
    instances: &'p [Instance],
    robot_types: &[RobotType],
) -> Result<Vec<&'p str>, Diagnostic> {
    if let Some((first, second, name)) = find_duplicate(instances, |i| &i.identifier) {
        return Err(Diagnostic::new(
            codes::E0201,
            Category::InvalidInstanceDeclaration,
            format!(
                "identifier '{}' is used in robot instance declarations {} and {}",
                name,
                first + 1,
                second + 1
            ),
        ));
    }

    for (i, instance) in instances.iter().enumerate() {
        let known = robot_types
            .iter()
            .any(|t| t.identifier == instance.robot_type);
        if !known {
            return Err(Diagnostic::new(
                codes::E0202,
                Category::InvalidInstanceDeclaration,
                format!(
                    "robot type '{}' is not declared and is used in instance declaration {}",
                    instance.robot_type,
                    i + 1
                ),
            ));
        }
    }

    Ok(instances.iter().map(|i| i.identifier.as_str()).collect())
}
