// ast.rs — AST node types for RobotScript programs
//
// Mirrors the JSON document emitted by the editor's parser. Node kinds are
// closed sum types tagged by the `type` field, so the validator matches them
// exhaustively instead of comparing tag strings.
//
// Preconditions: produced by `load` from a syntactically well-formed document.
// Postconditions: none (data-only module).
// Failure modes: none; malformed documents are rejected by `load`.
// Side effects: none.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message target meaning "every instance".
pub const BROADCAST: &str = "*";

// ── Root ──

/// A complete RobotScript program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "NAME")]
    pub name: ProgramName,
    #[serde(rename = "PROCEDURES", default)]
    pub procedures: Vec<Procedure>,
    #[serde(rename = "AREAS")]
    pub areas: Vec<Area>,
    #[serde(rename = "ROBOT_TYPES")]
    pub robot_types: Vec<RobotType>,
    #[serde(rename = "INSTANCES")]
    pub instances: Vec<Instance>,
    #[serde(rename = "INITS")]
    pub inits: Inits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramName {
    pub identifier: String,
}

// ── Values and declarations ──

/// The two value types of the language (`numero`, `boolean`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "numero")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Number => write!(f, "numero"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A declared local variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub identifier: String,
    pub type_value: ValueType,
}

impl Variable {
    pub fn new(identifier: impl Into<String>, type_value: ValueType) -> Self {
        Variable {
            identifier: identifier.into(),
            type_value,
        }
    }
}

/// Parameter passing mode: `E` (by value) or `ES` (by reference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamMode {
    #[serde(rename = "E")]
    ByValue,
    #[serde(rename = "ES")]
    ByReference,
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::ByValue => write!(f, "E"),
            ParamMode::ByReference => write!(f, "ES"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub type_parameter: ParamMode,
    pub identifier: String,
    pub type_value: ValueType,
}

impl Parameter {
    pub fn new(mode: ParamMode, identifier: impl Into<String>, type_value: ValueType) -> Self {
        Parameter {
            type_parameter: mode,
            identifier: identifier.into(),
            type_value,
        }
    }
}

/// `proceso NAME(params) variables ... comenzar ... fin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub identifier: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub local_variables: Vec<Variable>,
    pub body: Vec<Statement>,
}

/// `robot NAME variables ... comenzar ... fin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotType {
    pub identifier: String,
    #[serde(default)]
    pub local_variables: Vec<Variable>,
    pub body: Vec<Statement>,
}

/// A named robot bound to a robot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub identifier: String,
    #[serde(rename = "type")]
    pub robot_type: String,
}

impl Instance {
    pub fn new(identifier: impl Into<String>, robot_type: impl Into<String>) -> Self {
        Instance {
            identifier: identifier.into(),
            robot_type: robot_type.into(),
        }
    }
}

// ── Geometry ──

/// A grid corner: `x` is the avenue, `y` the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Occupancy policy of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaKind {
    Shared,
    SemiPrivate,
    Private,
}

/// A named rectangle: `a` is the lower-left corner, `b` the upper-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub identifier: String,
    #[serde(rename = "type")]
    pub kind: AreaKind,
    pub a: Point,
    pub b: Point,
}

impl Area {
    pub fn new(identifier: impl Into<String>, kind: AreaKind, a: Point, b: Point) -> Self {
        Area {
            identifier: identifier.into(),
            kind,
            a,
            b,
        }
    }
}

// ── Initialization section ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inits {
    #[serde(default)]
    pub assign_areas: Vec<AreaAssignment>,
    #[serde(default)]
    pub assign_items: Vec<ItemAssignment>,
    #[serde(default)]
    pub assign_origins: Vec<OriginAssignment>,
}

/// `AsignarArea(instance, area)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaAssignment {
    /// Instance name.
    pub identifier: String,
    /// Area name.
    #[serde(rename = "type")]
    pub area: String,
}

impl AreaAssignment {
    pub fn new(instance: impl Into<String>, area: impl Into<String>) -> Self {
        AreaAssignment {
            identifier: instance.into(),
            area: area.into(),
        }
    }
}

/// `AsignarItem(instance, kind[, kind], quantity)`
///
/// Item kinds stay raw tokens; unknown kinds are a validation error, not a
/// load error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAssignment {
    pub identifier: String,
    #[serde(rename = "type")]
    pub kinds: Vec<String>,
    pub value: u32,
}

impl ItemAssignment {
    pub fn new(instance: impl Into<String>, kinds: &[&str], value: u32) -> Self {
        ItemAssignment {
            identifier: instance.into(),
            kinds: kinds.iter().map(|k| k.to_string()).collect(),
            value,
        }
    }
}

/// `AsignarOrigen(instance, x, y)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginAssignment {
    pub identifier: String,
    pub x: i64,
    pub y: i64,
}

impl OriginAssignment {
    pub fn new(instance: impl Into<String>, x: i64, y: i64) -> Self {
        OriginAssignment {
            identifier: instance.into(),
            x,
            y,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ── Expressions ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    #[serde(rename = "BINARY_OPERATION")]
    Binary {
        operator: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    #[serde(rename = "UNARY_OPERATION")]
    Unary { operator: UnaryOp, rhs: Box<Expr> },
    #[serde(rename = "LITERAL_INTEGER")]
    Integer { value: i64 },
    #[serde(rename = "LITERAL_BOOLEAN")]
    Boolean { value: bool },
    #[serde(rename = "VARIABLE")]
    Variable { identifier: String },
    #[serde(rename = "STATE_METHOD")]
    State { identifier: StateQuery },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Integer { value }
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Boolean { value }
    }

    pub fn var(identifier: impl Into<String>) -> Self {
        Expr::Variable {
            identifier: identifier.into(),
        }
    }

    pub fn state(identifier: StateQuery) -> Self {
        Expr::State { identifier }
    }

    pub fn binary(operator: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(operator: UnaryOp, rhs: Expr) -> Self {
        Expr::Unary {
            operator,
            rhs: Box::new(rhs),
        }
    }

    /// The variable name if this expression is a bare variable reference.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Expr::Variable { identifier } => Some(identifier),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "&")]
    And,
    #[serde(rename = "|")]
    Or,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

/// Operator families sharing one typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// numero × numero → numero
    Arithmetic,
    /// numero × numero → boolean
    Relational,
    /// boolean × boolean → boolean
    Logical,
    /// T × T → boolean
    Equality,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Eq => "=",
            BinOp::Ne => "!=",
        }
    }

    pub fn class(self) -> OpClass {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => OpClass::Arithmetic,
            BinOp::Gt | BinOp::Ge | BinOp::Lt | BinOp::Le => OpClass::Relational,
            BinOp::And | BinOp::Or => OpClass::Logical,
            BinOp::Eq | BinOp::Ne => OpClass::Equality,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "-")]
    Negate,
    #[serde(rename = "~")]
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::Not => write!(f, "~"),
        }
    }
}

/// Built-in robot state probes. They take no arguments; the probe alone
/// fixes the result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateQuery {
    PosAv,
    PosCa,
    HayFlorEnLaEsquina,
    HayPapelEnLaEsquina,
    HayFlorEnLaBolsa,
    HayPapelEnLaBolsa,
}

impl StateQuery {
    pub fn result_type(self) -> ValueType {
        match self {
            StateQuery::PosAv | StateQuery::PosCa => ValueType::Number,
            StateQuery::HayFlorEnLaEsquina
            | StateQuery::HayPapelEnLaEsquina
            | StateQuery::HayFlorEnLaBolsa
            | StateQuery::HayPapelEnLaBolsa => ValueType::Boolean,
        }
    }
}

// ── Statements ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "STATEMENT_ASSIGN")]
    Assign { identifier: String, value: Expr },
    #[serde(rename = "STATEMENT_BLOCK")]
    Block { body: Vec<Statement> },
    #[serde(rename = "IF")]
    If {
        condition: Expr,
        body: Box<Statement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_body: Option<Box<Statement>>,
    },
    /// `repetir (n)`: bounded-count repetition.
    #[serde(rename = "FOR")]
    For { condition: Expr, body: Box<Statement> },
    #[serde(rename = "WHILE")]
    While { condition: Expr, body: Box<Statement> },
    #[serde(rename = "INFORM")]
    Inform {
        arg1: InformArg,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arg2: Option<Expr>,
    },
    #[serde(rename = "CHANGE_POSITION")]
    ChangePosition { x: Expr, y: Expr },
    #[serde(rename = "GENERATE_NUMBER")]
    GenerateNumber {
        identifier: String,
        min: Expr,
        max: Expr,
    },
    #[serde(rename = "MESSAGE")]
    Message {
        mode: MessageMode,
        value: Expr,
        /// Instance name or `BROADCAST`.
        who: String,
    },
    #[serde(rename = "CONTROL_CORNER")]
    ControlCorner { mode: CornerMode, x: Expr, y: Expr },
    #[serde(rename = "CALL_PROCEDURE")]
    Call {
        identifier: String,
        #[serde(default)]
        parameters: Vec<Expr>,
    },
    #[serde(rename = "SIMPLE_ACTION")]
    Action { action: Action },
}

impl Statement {
    pub fn assign(identifier: impl Into<String>, value: Expr) -> Self {
        Statement::Assign {
            identifier: identifier.into(),
            value,
        }
    }

    pub fn call(identifier: impl Into<String>, parameters: Vec<Expr>) -> Self {
        Statement::Call {
            identifier: identifier.into(),
            parameters,
        }
    }

    pub fn block(body: Vec<Statement>) -> Self {
        Statement::Block { body }
    }
}

/// First argument of `Informar`: a string literal or an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InformArg {
    Text(TextLiteral),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLiteral {
    #[serde(rename = "type")]
    tag: TextTag,
    pub value: String,
}

impl TextLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        TextLiteral {
            tag: TextTag::StringLiteral,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum TextTag {
    #[serde(rename = "STRING_LITERAL")]
    StringLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageMode {
    Send,
    Receive,
}

impl MessageMode {
    pub fn keyword(self) -> &'static str {
        match self {
            MessageMode::Send => "EnviarMensaje",
            MessageMode::Receive => "RecibirMensaje",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CornerMode {
    Block,
    Release,
}

impl CornerMode {
    pub fn keyword(self) -> &'static str {
        match self {
            CornerMode::Block => "BloquearEsquina",
            CornerMode::Release => "LiberarEsquina",
        }
    }
}

/// Argument-free robot actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Move,
    TurnRight,
    TakeFlower,
    TakePaper,
    DepositFlower,
    DepositPaper,
}
