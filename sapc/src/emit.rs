use color_print::cformat;

use crate::error::Error;
use crate::inst::Inst;
use crate::symbol::Symbols;

/// A compiled program: resolved instructions plus the data cells backing
/// its variables. Only exists once the capacity check has passed.
#[derive(Debug)]
pub struct Program {
    insts: Vec<Inst>,
    symbols: Symbols,
}

/// Final gate: code and data share the 16 memory words.
pub fn finish(insts: Vec<Inst>, symbols: Symbols) -> Result<Program, Error> {
    let program = Program { insts, symbols };
    let (code, vars) = (program.insts.len(), program.symbols.len());
    if code + vars > arch::MEM_WORDS {
        return Err(Error::CapacityExceeded {
            listing: program.listing(),
            code,
            vars,
        });
    }
    Ok(program)
}

impl Program {
    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// The numbered listing, one `<address> <MNEMONIC>[ <operand>]` line
    /// per instruction. The sole artifact the hardware programmer needs.
    pub fn listing(&self) -> String {
        self.insts
            .iter()
            .enumerate()
            .map(|(addr, inst)| format!("{addr} {inst}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Colored dump: address, instruction word, mnemonic, and the variable
    /// behind each memory operand, then the data cells.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (addr, inst) in self.insts.iter().enumerate() {
            let word = inst.encode();
            let var = match inst.op.arg() {
                Some(arch::op::Arg::Mem) => self
                    .symbols
                    .name_at(inst.operand_bits())
                    .map(|name| cformat!(" <g>; {}</>", name))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            out.push_str(&cformat!(
                "<w>{:>2}</> <m>{:04b} {:04b}</> | {}{}\n",
                addr,
                word >> 4,
                word & 0x0F,
                inst.cformat(),
                var
            ));
        }
        for addr in (0..arch::MEM_WORDS as u8).rev() {
            if let Some(name) = self.symbols.name_at(addr) {
                out.push_str(&cformat!("<w>{:>2}</> <c>@{}</>\n", addr, name));
            }
        }
        out
    }
}
