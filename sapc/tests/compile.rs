use arch::op::OpKind;
use sapc::ast::{BinOp, CmpOp, Expr, Module, Stmt};
use sapc::inst::Operand;
use sapc::Error;

fn num(n: i64) -> Expr {
    Expr::Num(n)
}

fn name(id: &str) -> Expr {
    Expr::Name(id.into())
}

fn add(left: Expr, right: Expr) -> Expr {
    Expr::BinOp(Box::new(left), BinOp::Add, Box::new(right))
}

fn assign(target: &str, value: Expr) -> Stmt {
    Stmt::Assign(vec![target.into()], value)
}

fn aug(target: &str, value: Expr) -> Stmt {
    Stmt::AugAssign(target.into(), BinOp::Add, value)
}

fn print_var(id: &str) -> Stmt {
    Stmt::Expr(Expr::Call("print".into(), vec![name(id)]))
}

fn while_lt(var: &str, bound: i64, body: Vec<Stmt>) -> Stmt {
    Stmt::While(
        Expr::Compare(Box::new(name(var)), vec![CmpOp::Lt], vec![num(bound)]),
        body,
    )
}

fn module(body: Vec<Stmt>) -> Module {
    Module { body }
}

fn listing(module: &Module) -> Result<String, Error> {
    Ok(sapc::compile(module)?.listing())
}

// ----------------------------------------------------------------------------
// End-to-end scenarios

#[test]
fn counter_loops_forever() {
    // x = 0; while True: x += 3; print(x)
    let tree = module(vec![
        assign("x", num(0)),
        Stmt::While(Expr::Bool(true), vec![aug("x", num(3)), print_var("x")]),
    ]);
    assert_eq!(
        listing(&tree).unwrap(),
        "0 LDI 0\n\
         1 STA 15\n\
         2 LDA 15\n\
         3 INC 3\n\
         4 STA 15\n\
         5 DSP 15\n\
         6 JMP 2\n\
         7 HLT"
    );
}

#[test]
fn bounded_loop_tests_with_sub_and_jc() {
    // x = 0; while x < 5: x += 1; print(x)
    let tree = module(vec![
        assign("x", num(0)),
        while_lt("x", 5, vec![aug("x", num(1)), print_var("x")]),
    ]);
    assert_eq!(
        listing(&tree).unwrap(),
        "0 LDI 0\n\
         1 STA 15\n\
         2 LDA 15\n\
         3 INC 1\n\
         4 STA 15\n\
         5 DSP 15\n\
         6 LDI 5\n\
         7 SUB 15\n\
         8 JC 2\n\
         9 HLT"
    );
}

#[test]
fn fresh_state_per_compilation() {
    let tree = module(vec![
        assign("x", num(0)),
        Stmt::While(Expr::Bool(true), vec![aug("x", num(3))]),
    ]);
    let first = listing(&tree).unwrap();
    // neither label numbering nor variable addresses leak across runs
    let noise = module(vec![assign("a", num(1)), assign("b", num(2))]);
    listing(&noise).unwrap();
    assert_eq!(listing(&tree).unwrap(), first);
}

#[test]
fn a_reg_writes_stay_in_the_accumulator() {
    // x = 1; A_REG = x + 1
    let tree = module(vec![
        assign("x", num(1)),
        assign("A_REG", add(name("x"), num(1))),
    ]);
    // no STA for the sentinel, no cell allocated, and the reload after the
    // store is elided
    assert_eq!(listing(&tree).unwrap(), "0 LDI 1\n1 STA 15\n2 INC 1\n3 HLT");
}

#[test]
fn dead_loop_emits_nothing() {
    let tree = module(vec![Stmt::While(
        Expr::Bool(false),
        vec![assign("x", num(1))],
    )]);
    assert_eq!(listing(&tree).unwrap(), "0 HLT");
}

#[test]
fn copy_between_variables() {
    // x = 2; y = x; print(y)
    let tree = module(vec![
        assign("x", num(2)),
        assign("y", name("x")),
        print_var("y"),
    ]);
    // the LDA 15 between the two stores rides on the accumulator
    assert_eq!(
        listing(&tree).unwrap(),
        "0 LDI 2\n1 STA 15\n2 STA 14\n3 DSP 14\n4 HLT"
    );
}

#[test]
fn add_two_variables() {
    // x = 1; y = 2; z = x + y
    let tree = module(vec![
        assign("x", num(1)),
        assign("y", num(2)),
        assign("z", add(name("x"), name("y"))),
    ]);
    assert_eq!(
        listing(&tree).unwrap(),
        "0 LDI 1\n1 STA 15\n2 LDI 2\n3 STA 14\n4 LDA 15\n5 ADD 14\n6 STA 13\n7 HLT"
    );
}

#[test]
fn print_literal_displays_immediate() {
    let tree = module(vec![Stmt::Expr(Expr::Call("print".into(), vec![num(7)]))]);
    assert_eq!(listing(&tree).unwrap(), "0 DSI 7\n1 HLT");
}

#[test]
fn aug_assign_stores_to_the_target() {
    // x = 1; y = 2; x += y: the store goes back to x, not to y
    let tree = module(vec![
        assign("x", num(1)),
        assign("y", num(2)),
        aug("x", name("y")),
    ]);
    assert_eq!(
        listing(&tree).unwrap(),
        "0 LDI 1\n1 STA 15\n2 LDI 2\n3 STA 14\n4 LDA 15\n5 ADD 14\n6 STA 15\n7 HLT"
    );
}

#[test]
fn resolved_operands_index_the_stripped_sequence() {
    let tree = module(vec![
        assign("x", num(0)),
        Stmt::While(Expr::Bool(true), vec![aug("x", num(3))]),
    ]);
    let program = sapc::compile(&tree).unwrap();
    // the loop-closing jump lands on the first body instruction
    let jmp = program
        .insts()
        .iter()
        .find(|i| i.op == OpKind::JMP)
        .unwrap();
    assert_eq!(jmp.operand, Some(Operand::Imm(2)));
}

#[test]
fn capacity_overflow_carries_the_listing() {
    // seven variables, two instructions each, plus the halt: 15 + 7 > 16
    let body: Vec<Stmt> = (0..7i64)
        .map(|i| assign(&format!("v{i}"), num(i)))
        .collect();
    match sapc::compile(&module(body)) {
        Err(Error::CapacityExceeded {
            listing,
            code,
            vars,
        }) => {
            assert_eq!(code, 15);
            assert_eq!(vars, 7);
            assert_eq!(listing.lines().count(), 15);
            assert!(listing.starts_with("0 LDI 0"));
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Rejected constructs

macro_rules! rejects {
    ($name:ident, $tree:expr, $err:pat) => {
        #[test]
        fn $name() {
            match sapc::compile(&$tree) {
                Err($err) => {}
                other => panic!("expected {}, got {:?}", stringify!($err), other),
            }
        }
    };
}

rejects!(
    multiplication,
    module(vec![Stmt::Assign(
        vec!["x".into()],
        Expr::BinOp(Box::new(num(5)), BinOp::Mult, Box::new(num(2))),
    )]),
    Error::UnsupportedOperator(_)
);

rejects!(
    chained_targets,
    module(vec![Stmt::Assign(vec!["x".into(), "y".into()], num(0))]),
    Error::MultipleAssignmentTargets(2)
);

rejects!(
    oversized_literal,
    module(vec![assign("x", num(16))]),
    Error::LiteralOutOfRange(16)
);

rejects!(
    negative_literal,
    module(vec![assign("x", num(-1))]),
    Error::LiteralOutOfRange(-1)
);

rejects!(
    read_before_write,
    module(vec![assign("x", name("y"))]),
    Error::UndefinedVariable(_)
);

rejects!(
    aug_assign_subtraction,
    module(vec![
        assign("x", num(1)),
        Stmt::AugAssign("x".into(), BinOp::Sub, num(1)),
    ]),
    Error::UnsupportedOperator(_)
);

rejects!(
    aug_assign_new_variable,
    module(vec![aug("x", num(1))]),
    Error::UndefinedVariable(_)
);

rejects!(
    unknown_callable,
    module(vec![Stmt::Expr(Expr::Call("input".into(), vec![]))]),
    Error::UnsupportedCallable(_)
);

rejects!(
    print_arity,
    module(vec![
        assign("x", num(0)),
        Stmt::Expr(Expr::Call("print".into(), vec![name("x"), num(1)])),
    ]),
    Error::UnsupportedCallable(_)
);

rejects!(
    bare_expression_statement,
    module(vec![Stmt::Expr(num(3))]),
    Error::UnsupportedConstruct(_)
);

rejects!(
    greater_equal_loop,
    module(vec![
        assign("x", num(0)),
        Stmt::While(
            Expr::Compare(Box::new(name("x")), vec![CmpOp::GtE], vec![num(5)]),
            vec![aug("x", num(1))],
        ),
    ]),
    Error::UnsupportedComparison(_)
);

rejects!(
    chained_comparison,
    module(vec![
        assign("x", num(0)),
        Stmt::While(
            Expr::Compare(
                Box::new(name("x")),
                vec![CmpOp::Lt, CmpOp::Lt],
                vec![num(3), num(5)],
            ),
            vec![aug("x", num(1))],
        ),
    ]),
    Error::UnsupportedComparison(_)
);

rejects!(
    zero_loop_bound,
    module(vec![
        assign("x", num(0)),
        while_lt("x", 0, vec![aug("x", num(1))]),
    ]),
    Error::LiteralOutOfRange(0)
);

rejects!(
    wide_loop_bound,
    module(vec![
        assign("x", num(0)),
        while_lt("x", 16, vec![aug("x", num(1))]),
    ]),
    Error::LiteralOutOfRange(16)
);

rejects!(
    variable_loop_bound,
    module(vec![
        assign("x", num(0)),
        assign("n", num(5)),
        Stmt::While(
            Expr::Compare(Box::new(name("x")), vec![CmpOp::Lt], vec![name("n")]),
            vec![aug("x", num(1))],
        ),
    ]),
    Error::UnsupportedComparison(_)
);

rejects!(
    truthy_variable_condition,
    module(vec![
        assign("x", num(1)),
        Stmt::While(name("x"), vec![aug("x", num(1))]),
    ]),
    Error::UnsupportedComparison(_)
);
