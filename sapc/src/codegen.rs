use arch::op::OpKind;

use crate::ast::{BinOp, CmpOp, Expr, Module, Stmt};
use crate::emit::{self, Program};
use crate::error::Error;
use crate::inst::{Inst, Item};
use crate::label::{self, Labels};
use crate::optimize;
use crate::symbol::{Symbols, A_REG};

/// Compile one syntax tree into a `Program`, with fresh state.
pub fn compile(module: &Module) -> Result<Program, Error> {
    Compiler::new().compile(module)
}

/// Walks the tree and emits the item stream. All label and variable state
/// lives here; `compile` consumes the instance, so no state can leak into
/// a later run.
#[derive(Debug)]
pub struct Compiler {
    symbols: Symbols,
    labels: Labels,
    items: Vec<Item>,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            symbols: Symbols::new(),
            labels: Labels::new(),
            items: Vec::new(),
        }
    }

    pub fn compile(mut self, module: &Module) -> Result<Program, Error> {
        for stmt in &module.body {
            self.stmt(stmt)?;
        }
        self.emit(Inst::bare(OpKind::HLT));
        let items = optimize::run(self.items);
        let insts = label::resolve(items)?;
        emit::finish(insts, self.symbols)
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Assign(targets, value) => self.assign(targets, value),
            Stmt::AugAssign(target, op, value) => self.aug_assign(target, *op, value),
            Stmt::While(test, body) => self.while_loop(test, body),
            Stmt::Expr(value) => self.expr_stmt(value),
        }
    }

    /// `x = <literal | name | addition>`
    fn assign(&mut self, targets: &[String], value: &Expr) -> Result<(), Error> {
        let [target] = targets else {
            return Err(Error::MultipleAssignmentTargets(targets.len()));
        };
        // The sentinel target writes through the accumulator only.
        let store = match target.as_str() {
            A_REG => None,
            name => Some(self.symbols.allocate(name)),
        };
        match value {
            Expr::Num(n) => self.emit(Inst::imm(OpKind::LDI, literal(*n)?)),
            Expr::Name(id) => {
                let addr = self.lookup(id)?;
                self.emit(Inst::imm(OpKind::LDA, addr));
            }
            Expr::BinOp(left, op, right) => self.addition(left, *op, right)?,
            other => {
                return Err(Error::UnsupportedConstruct(format!(
                    "{} on the right of =",
                    other.kind()
                )))
            }
        }
        if let Some(addr) = store {
            self.emit(Inst::imm(OpKind::STA, addr));
        }
        Ok(())
    }

    /// Load the left operand, fold the right one into the accumulator.
    fn addition(&mut self, left: &Expr, op: BinOp, right: &Expr) -> Result<(), Error> {
        if op != BinOp::Add {
            return Err(Error::UnsupportedOperator(format!("{op:?}")));
        }
        match left {
            Expr::Num(n) => self.emit(Inst::imm(OpKind::LDI, literal(*n)?)),
            Expr::Name(id) => {
                let addr = self.lookup(id)?;
                self.emit(Inst::imm(OpKind::LDA, addr));
            }
            other => {
                return Err(Error::UnsupportedConstruct(format!(
                    "{} as addition operand",
                    other.kind()
                )))
            }
        }
        match right {
            Expr::Num(n) => self.emit(Inst::imm(OpKind::INC, literal(*n)?)),
            Expr::Name(id) => {
                let addr = self.lookup(id)?;
                self.emit(Inst::imm(OpKind::ADD, addr));
            }
            other => {
                return Err(Error::UnsupportedConstruct(format!(
                    "{} as addition operand",
                    other.kind()
                )))
            }
        }
        Ok(())
    }

    /// `x += <literal | name>`; the target must already have a cell.
    fn aug_assign(&mut self, target: &str, op: BinOp, value: &Expr) -> Result<(), Error> {
        if op != BinOp::Add {
            return Err(Error::UnsupportedOperator(format!("{op:?}=")));
        }
        let target_addr = self.lookup(target)?;
        self.emit(Inst::imm(OpKind::LDA, target_addr));
        match value {
            Expr::Num(n) => self.emit(Inst::imm(OpKind::INC, literal(*n)?)),
            Expr::Name(id) => {
                let addr = self.lookup(id)?;
                self.emit(Inst::imm(OpKind::ADD, addr));
            }
            other => {
                return Err(Error::UnsupportedConstruct(format!(
                    "{} on the right of +=",
                    other.kind()
                )))
            }
        }
        self.emit(Inst::imm(OpKind::STA, target_addr));
        Ok(())
    }

    /// The loop test picks the codegen shape; it is never evaluated at
    /// runtime.
    fn while_loop(&mut self, test: &Expr, body: &[Stmt]) -> Result<(), Error> {
        // `while False` never runs: the body is dead code.
        if matches!(test, Expr::Bool(false)) {
            return Ok(());
        }
        let start = self.labels.next_label();
        self.items.push(Item::Label(start.clone()));
        for stmt in body {
            self.stmt(stmt)?;
        }
        match test {
            Expr::Bool(_) => self.emit(Inst::sym(OpKind::JMP, start)),
            Expr::Compare(left, ops, comparators) => {
                self.loop_test(left, ops, comparators, start)?
            }
            other => {
                return Err(Error::UnsupportedComparison(format!(
                    "{} as loop condition",
                    other.kind()
                )))
            }
        }
        Ok(())
    }

    /// `<var> < <literal>`: subtract and jump back while the carry signals
    /// a borrow, i.e. while the variable is still below the bound.
    fn loop_test(
        &mut self,
        left: &Expr,
        ops: &[CmpOp],
        comparators: &[Expr],
        start: String,
    ) -> Result<(), Error> {
        let ([op], [comparator]) = (ops, comparators) else {
            return Err(Error::UnsupportedComparison(
                "only one operator and one comparator compile".into(),
            ));
        };
        if *op != CmpOp::Lt {
            return Err(Error::UnsupportedComparison(format!("{op:?}")));
        }
        let bound = match comparator {
            Expr::Num(n) if 0 < *n && *n < 16 => *n as u8,
            Expr::Num(n) => return Err(Error::LiteralOutOfRange(*n)),
            other => {
                return Err(Error::UnsupportedComparison(format!(
                    "{} as comparison bound",
                    other.kind()
                )))
            }
        };
        let var = match left {
            Expr::Name(id) => self.lookup(id)?,
            other => {
                return Err(Error::UnsupportedComparison(format!(
                    "{} on the left of <",
                    other.kind()
                )))
            }
        };
        self.emit(Inst::imm(OpKind::LDI, bound));
        self.emit(Inst::imm(OpKind::SUB, var));
        let end = self.labels.next_label();
        self.items.push(Item::Label(end));
        self.emit(Inst::sym(OpKind::JC, start));
        Ok(())
    }

    /// Statement-position expressions: only `print(<name | literal>)`.
    fn expr_stmt(&mut self, value: &Expr) -> Result<(), Error> {
        let Expr::Call(func, args) = value else {
            return Err(Error::UnsupportedConstruct(format!(
                "{} as a statement",
                value.kind()
            )));
        };
        if func != "print" {
            return Err(Error::UnsupportedCallable(func.clone()));
        }
        let [arg] = args.as_slice() else {
            return Err(Error::UnsupportedCallable(format!(
                "print with {} arguments",
                args.len()
            )));
        };
        match arg {
            Expr::Name(id) => {
                let addr = self.lookup(id)?;
                self.emit(Inst::imm(OpKind::DSP, addr));
            }
            Expr::Num(n) => self.emit(Inst::imm(OpKind::DSI, literal(*n)?)),
            other => {
                return Err(Error::UnsupportedConstruct(format!(
                    "print({})",
                    other.kind()
                )))
            }
        }
        Ok(())
    }

    fn emit(&mut self, inst: Inst) {
        self.items.push(Item::Inst(inst));
    }

    fn lookup(&self, name: &str) -> Result<u8, Error> {
        self.symbols
            .get(name)
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }
}

/// Literal operands must fit the 4-bit operand field.
fn literal(n: i64) -> Result<u8, Error> {
    if (0..16).contains(&n) {
        Ok(n as u8)
    } else {
        Err(Error::LiteralOutOfRange(n))
    }
}
