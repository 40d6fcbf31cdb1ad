use arch::op::OpKind;

use crate::inst::{Item, Operand};

/// Run both peephole passes: fixed order, one left-to-right sweep each,
/// not iterated to a fixed point.
pub fn run(items: Vec<Item>) -> Vec<Item> {
    redundant_jumps(accumulator_reuse(items))
}

/// A `STA n` (or `DSP n`) leaves the value in the A register, so a
/// directly following `LDA n` can be dropped. A label marker between the
/// two keeps the load: a jump landing there expects a fresh one.
pub fn accumulator_reuse(items: Vec<Item>) -> Vec<Item> {
    let mut kept: Vec<Item> = Vec::with_capacity(items.len());
    for item in items {
        if let (Item::Inst(inst), Some(Item::Inst(prev))) = (&item, kept.last()) {
            if inst.op == OpKind::LDA
                && matches!(prev.op, OpKind::STA | OpKind::DSP)
                && prev.operand == inst.operand
            {
                continue;
            }
        }
        kept.push(item);
    }
    kept
}

/// An unconditional `JMP` whose target marker comes directly after it
/// falls through to the target anyway. A trailing jump has nothing to
/// fall through to and stays.
pub fn redundant_jumps(items: Vec<Item>) -> Vec<Item> {
    let mut kept = Vec::with_capacity(items.len());
    let mut items = items.into_iter().peekable();
    while let Some(item) = items.next() {
        if let Item::Inst(inst) = &item {
            if inst.op == OpKind::JMP {
                if let (Some(Operand::Label(target)), Some(Item::Label(next))) =
                    (&inst.operand, items.peek())
                {
                    if target == next {
                        continue;
                    }
                }
            }
        }
        kept.push(item);
    }
    kept
}
