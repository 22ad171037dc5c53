// Property-based tests for validator invariants.
//
// Five categories:
// 1. Geometry soundness: accepted area lists are disjoint and on the grid
// 2. Occupancy bounds: accepted init sections respect every capacity and
//    place each instance exactly once inside one of its areas
// 3. Type soundness: accepted expressions only reference declared variables
// 4. Call soundness: accepted calls match arity and ES positions hold
//    variables of the formal's type
// 5. Idempotence: validating twice yields the same verdict
//
// Uses proptest with explicit configuration to prevent CI flakiness.

use proptest::prelude::*;
use rsv::ast::*;
use rsv::geometry::{validate_areas, Rect};
use rsv::inits::validate_inits;
use rsv::scope::Scope;
use rsv::type_infer::infer;
use rsv::{validate, Verdict};

// ── Generators ──────────────────────────────────────────────────────────────

fn arb_kind() -> impl Strategy<Value = AreaKind> {
    prop_oneof![
        Just(AreaKind::Shared),
        Just(AreaKind::SemiPrivate),
        Just(AreaKind::Private),
    ]
}

fn arb_value_type() -> impl Strategy<Value = ValueType> {
    prop_oneof![Just(ValueType::Number), Just(ValueType::Boolean)]
}

/// Areas with coordinates straddling the grid bounds, so every geometry
/// check gets exercised.
fn arb_areas() -> impl Strategy<Value = Vec<Area>> {
    let coord = -5i64..=105;
    prop::collection::vec(
        (
            prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")],
            arb_kind(),
            (coord.clone(), coord.clone()),
            (coord.clone(), coord),
        ),
        0..=4,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(name, kind, a, b)| Area::new(name, kind, Point::new(a.0, a.1), Point::new(b.0, b.1)))
            .collect()
    })
}

/// Three fixed, disjoint 5×5 areas of random kinds.
fn arb_layout() -> impl Strategy<Value = Vec<Area>> {
    prop::collection::vec(arb_kind(), 3).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let x = 10 * i as i64 + 1;
                Area::new(
                    format!("Z{}", i),
                    kind,
                    Point::new(x, 1),
                    Point::new(x + 4, 5),
                )
            })
            .collect()
    })
}

const INSTANCE_NAMES: [&str; 4] = ["r0", "r1", "r2", "r3"];

/// A city layout plus random init records over up to four instances.
fn arb_city() -> impl Strategy<Value = (Vec<Area>, usize, Inits)> {
    (arb_layout(), 1usize..=4).prop_flat_map(|(areas, n)| {
        let instance = prop::sample::select(INSTANCE_NAMES[..n].to_vec());
        let area_name = prop::sample::select(vec!["Z0", "Z1", "Z2"]);
        let assigns = prop::collection::vec((instance.clone(), area_name), 0..=8);
        let origins = prop::collection::vec((instance, 1i64..=30, 1i64..=6), 0..=5);
        (Just(areas), Just(n), assigns, origins).prop_map(|(areas, n, assigns, origins)| {
            let inits = Inits {
                assign_areas: assigns
                    .into_iter()
                    .map(|(i, a)| AreaAssignment::new(i, a))
                    .collect(),
                assign_items: vec![],
                assign_origins: origins
                    .into_iter()
                    .map(|(i, x, y)| OriginAssignment::new(i, x, y))
                    .collect(),
            };
            (areas, n, inits)
        })
    })
}

fn instances(n: usize) -> Vec<Instance> {
    INSTANCE_NAMES[..n]
        .iter()
        .map(|name| Instance::new(*name, "t"))
        .collect()
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-10i64..10).prop_map(Expr::int),
        any::<bool>().prop_map(Expr::boolean),
        prop_oneof![Just("n"), Just("b"), Just("ghost")].prop_map(Expr::var),
        prop_oneof![
            Just(StateQuery::PosAv),
            Just(StateQuery::PosCa),
            Just(StateQuery::HayFlorEnLaEsquina),
            Just(StateQuery::HayPapelEnLaBolsa),
        ]
        .prop_map(Expr::state),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        let binop = prop_oneof![
            Just(BinOp::Add),
            Just(BinOp::Sub),
            Just(BinOp::Mul),
            Just(BinOp::Div),
            Just(BinOp::Gt),
            Just(BinOp::Le),
            Just(BinOp::And),
            Just(BinOp::Or),
            Just(BinOp::Eq),
            Just(BinOp::Ne),
        ];
        let unop = prop_oneof![Just(UnaryOp::Negate), Just(UnaryOp::Not)];
        prop_oneof![
            (binop, inner.clone(), inner.clone()).prop_map(|(op, l, r)| Expr::binary(op, l, r)),
            (unop, inner).prop_map(|(op, e)| Expr::unary(op, e)),
        ]
    })
}

fn variables_of(expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::Variable { identifier } => out.push(identifier.clone()),
        Expr::Unary { rhs, .. } => variables_of(rhs, out),
        Expr::Binary { lhs, rhs, .. } => {
            variables_of(lhs, out);
            variables_of(rhs, out);
        }
        Expr::Integer { .. } | Expr::Boolean { .. } | Expr::State { .. } => {}
    }
}

/// A procedure signature and a call to it from a robot with locals
/// `n: numero` and `b: boolean`.
fn arb_call() -> impl Strategy<Value = (Vec<Parameter>, Vec<Expr>)> {
    let formal = (
        prop_oneof![Just(ParamMode::ByValue), Just(ParamMode::ByReference)],
        arb_value_type(),
    );
    let actual = prop_oneof![
        Just(Expr::var("n")),
        Just(Expr::var("b")),
        Just(Expr::var("ghost")),
        Just(Expr::int(1)),
        Just(Expr::boolean(false)),
        Just(Expr::binary(BinOp::Add, Expr::var("n"), Expr::int(1))),
    ];
    (
        prop::collection::vec(formal, 0..=3),
        prop::collection::vec(actual, 0..=3),
    )
        .prop_map(|(formals, actuals)| {
            let params = formals
                .into_iter()
                .enumerate()
                .map(|(i, (mode, ty))| Parameter::new(mode, format!("p{}", i), ty))
                .collect();
            (params, actuals)
        })
}

fn call_program(params: Vec<Parameter>, actuals: Vec<Expr>) -> Program {
    Program {
        name: ProgramName {
            identifier: "prop".into(),
        },
        procedures: vec![Procedure {
            identifier: "p".into(),
            parameters: params,
            local_variables: vec![],
            body: vec![],
        }],
        areas: vec![Area::new(
            "A",
            AreaKind::Shared,
            Point::new(1, 1),
            Point::new(10, 10),
        )],
        robot_types: vec![RobotType {
            identifier: "t".into(),
            local_variables: vec![
                Variable::new("n", ValueType::Number),
                Variable::new("b", ValueType::Boolean),
            ],
            body: vec![Statement::call("p", actuals)],
        }],
        instances: vec![Instance::new("r0", "t")],
        inits: Inits {
            assign_areas: vec![AreaAssignment::new("r0", "A")],
            assign_items: vec![],
            assign_origins: vec![OriginAssignment::new("r0", 2, 2)],
        },
    }
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 200,
        .. ProptestConfig::default()
    })]

    #[test]
    fn accepted_areas_are_disjoint_and_on_grid(areas in arb_areas()) {
        if validate_areas(&areas).is_ok() {
            let grid = Rect::grid();
            for (i, a) in areas.iter().enumerate() {
                prop_assert!(grid.contains(a.a) && grid.contains(a.b));
                prop_assert!(a.rect().is_ordered());
                for b in &areas[..i] {
                    prop_assert_ne!(&a.identifier, &b.identifier);
                    prop_assert!(!a.rect().overlaps(&b.rect()));
                }
            }
        }
    }

    #[test]
    fn accepted_inits_respect_capacity_and_placement((areas, n, inits) in arb_city()) {
        let instances = instances(n);
        if let Ok(plan) = validate_inits(&inits, &instances, &areas) {
            for (_, capacity) in plan.occupancy.iter() {
                prop_assert!(capacity.current() > 0);
                prop_assert!(capacity.current() <= capacity.maximum());
            }
            for ledger in &plan.instances {
                prop_assert!(!ledger.areas.is_empty());
                let origin = ledger.origin;
                prop_assert!(origin.is_some());
                let inside = ledger.areas.iter().any(|name| {
                    areas
                        .iter()
                        .any(|a| &a.identifier == name && origin.is_some_and(|o| a.rect().contains(o)))
                });
                prop_assert!(inside, "origin {:?} of {} outside its areas", origin, ledger.name);
            }
        }
    }

    #[test]
    fn accepted_expressions_reference_declared_variables(expr in arb_expr()) {
        let locals = vec![
            Variable::new("n", ValueType::Number),
            Variable::new("b", ValueType::Boolean),
        ];
        let scope = Scope::from_locals(&locals);
        if infer(&expr, &scope).is_ok() {
            let mut vars = Vec::new();
            variables_of(&expr, &mut vars);
            for v in vars {
                prop_assert!(scope.lookup(&v).is_some(), "undeclared {} accepted", v);
            }
        }
    }

    #[test]
    fn accepted_calls_match_signature((params, actuals) in arb_call()) {
        let program = call_program(params.clone(), actuals.clone());
        if validate(&program) == Verdict::Valid {
            prop_assert_eq!(params.len(), actuals.len());
            let declared = &program.robot_types[0].local_variables;
            for (formal, actual) in params.iter().zip(&actuals) {
                if formal.type_parameter == ParamMode::ByReference {
                    let name = actual.as_variable();
                    prop_assert!(name.is_some());
                    let var = declared.iter().find(|v| Some(v.identifier.as_str()) == name);
                    prop_assert_eq!(var.map(|v| v.type_value), Some(formal.type_value));
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 100,
        .. ProptestConfig::default()
    })]

    #[test]
    fn validation_is_idempotent((areas, n, inits) in arb_city(), (params, actuals) in arb_call()) {
        let mut program = call_program(params, actuals);
        program.areas = areas;
        program.instances = instances(n);
        program.inits = inits;
        prop_assert_eq!(validate(&program), validate(&program));
    }
}
