// Snapshot tests: lock the rendered form of diagnostics to detect unintended
// wording or context-chain changes.
//
// Uses inline `insta` snapshots of the Display rendering and the JSON verdict.
// Run `cargo insta review` after intentional output changes to update them.

use insta::assert_snapshot;
use rsv::ast::*;
use rsv::{validate, Verdict};

fn program(procedures: Vec<Procedure>, body: Vec<Statement>, locals: Vec<Variable>) -> Program {
    Program {
        name: ProgramName {
            identifier: "snap".into(),
        },
        procedures,
        areas: vec![
            Area::new("A", AreaKind::Shared, Point::new(1, 1), Point::new(10, 10)),
            Area::new("B", AreaKind::Private, Point::new(11, 11), Point::new(20, 20)),
        ],
        robot_types: vec![RobotType {
            identifier: "t".into(),
            local_variables: locals,
            body,
        }],
        instances: vec![Instance::new("r1", "t"), Instance::new("r2", "t")],
        inits: Inits {
            assign_areas: vec![
                AreaAssignment::new("r1", "A"),
                AreaAssignment::new("r2", "B"),
            ],
            assign_items: vec![],
            assign_origins: vec![
                OriginAssignment::new("r1", 2, 2),
                OriginAssignment::new("r2", 15, 15),
            ],
        },
    }
}

fn rendered(verdict: &Verdict) -> String {
    match verdict.diagnostic() {
        Some(d) => d.to_string(),
        None => "valid".to_string(),
    }
}

#[test]
fn snapshot_unordered_corners() {
    let mut p = program(vec![], vec![], vec![]);
    p.areas[1] = Area::new("B", AreaKind::Private, Point::new(20, 20), Point::new(11, 11));
    assert_snapshot!(rendered(&validate(&p)), @r###"
    error[E0102]: invalid area declaration: second corner (11, 11) of area 'B' must not be below or left of first corner (20, 20)
      hint: declare the lower-left corner first
    "###);
}

#[test]
fn snapshot_private_area_capacity() {
    let mut p = program(vec![], vec![], vec![]);
    p.inits.assign_areas.push(AreaAssignment::new("r1", "B"));
    assert_snapshot!(rendered(&validate(&p)), @"error[E0303]: invalid area assignment: assignment limit for area 'B' exceeded in area assignment 3 (capacity 1)");
}

#[test]
fn snapshot_nested_else_context() {
    let body = vec![Statement::While {
        condition: Expr::state(StateQuery::HayPapelEnLaBolsa),
        body: Box::new(Statement::If {
            condition: Expr::var("listo"),
            body: Box::new(Statement::Action {
                action: Action::DepositPaper,
            }),
            else_body: Some(Box::new(Statement::block(vec![Statement::ChangePosition {
                x: Expr::int(1),
                y: Expr::var("listo"),
            }]))),
        }),
    }];
    let p = program(
        vec![],
        body,
        vec![Variable::new("listo", ValueType::Boolean)],
    );
    assert_snapshot!(rendered(&validate(&p)), @"error[E0405]: invalid parameter declaration: y coordinate of Pos must be of type numero, found boolean, in else branch of si, in declaration of robot type 't'");
}

#[test]
fn snapshot_reference_argument_hint() {
    let procs = vec![Procedure {
        identifier: "contar".into(),
        parameters: vec![Parameter::new(
            ParamMode::ByReference,
            "total",
            ValueType::Number,
        )],
        local_variables: vec![],
        body: vec![],
    }];
    let body = vec![Statement::call(
        "contar",
        vec![Expr::binary(BinOp::Mul, Expr::int(2), Expr::int(3))],
    )];
    let p = program(procs, body, vec![]);
    assert_snapshot!(rendered(&validate(&p)), @r###"
    error[E0505]: invalid procedure call: argument 1 in call to procedure 'contar' must be a variable, in declaration of robot type 't'
      hint: parameter 'total' is declared ES, so it is passed by reference
    "###);
}

#[test]
fn snapshot_verdict_json() {
    let p = program(
        vec![],
        vec![Statement::assign("n", Expr::boolean(true))],
        vec![Variable::new("n", ValueType::Number)],
    );
    let json = serde_json::to_string_pretty(&validate(&p)).unwrap();
    assert_snapshot!(json, @r###"
    {
      "error": true,
      "code": "E0404",
      "category": "invalid value assignment",
      "context": "cannot assign a value of type boolean to a variable of type numero, in assignment of variable 'n', in declaration of robot type 't'",
      "hint": null
    }
    "###);
}

#[test]
fn snapshot_valid_verdict_json() {
    let p = program(vec![], vec![], vec![]);
    assert_snapshot!(serde_json::to_string(&validate(&p)).unwrap(), @r###"{"error":false}"###);
}
