use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The syntax tree the front end hands over. The enums are a closed set:
/// anything they cannot express never reaches the code generator, and
/// anything they can express but the machine cannot is a named fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>, // { stmt }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Assign(Vec<String>, Expr),      // targets "=" value
    AugAssign(String, BinOp, Expr), // target op "=" value
    While(Expr, Vec<Stmt>),         // "while" test ":" body
    Expr(Expr),                     // value
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    Num(i64),                                  // num-lit
    Name(String),                              // ident
    Bool(bool),                                // "True" | "False"
    BinOp(Box<Expr>, BinOp, Box<Expr>),        // left op right
    Compare(Box<Expr>, Vec<CmpOp>, Vec<Expr>), // left { op comparator }
    Call(String, Vec<Expr>),                   // func "(" [ args ] ")"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add, // "+"
    Sub, // "-"
    Mult, // "*"
    Div, // "/"
    Mod, // "%"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,    // "<"
    LtE,   // "<="
    Gt,    // ">"
    GtE,   // ">="
    Eq,    // "=="
    NotEq, // "!="
}

impl Expr {
    /// Node kind name, used to identify rejected constructs.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Num(_) => "Num",
            Expr::Name(_) => "Name",
            Expr::Bool(_) => "Bool",
            Expr::BinOp(..) => "BinOp",
            Expr::Compare(..) => "Compare",
            Expr::Call(..) => "Call",
        }
    }
}

/// Deserialize a YAML rendering of the syntax tree. Enum nodes use the
/// `Variant: value` singleton-map form.
pub fn parse_tree(src: &str) -> Result<Module, Error> {
    let de = serde_yaml::Deserializer::from_str(src);
    Ok(serde_yaml::with::singleton_map_recursive::deserialize(de)?)
}
