use indexmap::IndexMap;

use crate::error::Error;
use crate::inst::{Inst, Item, Operand};

/// Issues `label_N` jump-target tokens, N strictly increasing within one
/// compilation. Owned by the compiler instance, so runs never interfere.
#[derive(Debug)]
pub struct Labels {
    next: usize,
}

impl Labels {
    pub fn new() -> Self {
        Labels { next: 0 }
    }

    pub fn next_label(&mut self) -> String {
        let label = format!("label_{}", self.next);
        self.next += 1;
        label
    }
}

/// Replace symbolic jump targets with instruction addresses and drop the
/// label markers from the stream. Must run after both optimizer passes,
/// since they remove and shift instructions around markers.
///
/// A marker's identity belongs to the next real instruction. A marker
/// trailing the whole stream binds to the final instruction, the halt.
pub fn resolve(items: Vec<Item>) -> Result<Vec<Inst>, Error> {
    let mut at: IndexMap<String, usize> = IndexMap::new();
    let mut pc = 0;
    for item in &items {
        match item {
            Item::Label(name) => {
                at.insert(name.clone(), pc);
            }
            Item::Inst(_) => pc += 1,
        }
    }
    for addr in at.values_mut() {
        if *addr == pc && pc > 0 {
            *addr = pc - 1;
        }
    }

    let mut insts = Vec::with_capacity(pc);
    for item in items {
        if let Item::Inst(mut inst) = item {
            if let Some(Operand::Label(target)) = &inst.operand {
                match at.get(target) {
                    Some(addr) => inst.operand = Some(Operand::Imm(*addr as u8)),
                    None => return Err(Error::UnresolvedLabel(target.clone())),
                }
            }
            insts.push(inst);
        }
    }
    Ok(insts)
}
