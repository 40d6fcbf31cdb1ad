use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

/// The 16 opcodes of the SAP-1 instruction set. The enum discriminant is
/// the 4-bit code burned into the opcode ROM.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum OpKind {
    #[default]
    NOP,
    LDA,
    ADD,
    SUB,
    STA,
    LDI,
    JMP,
    JC,
    JZ,
    INC,
    DEC,
    DSP,
    DSI,
    /// Slot 0b1101 has no microcode behind it. Legal table entry, never
    /// emitted by any tool.
    #[strum(serialize = "")]
    RES,
    OUT,
    HLT,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }
}

/// What the low nibble of an instruction word means for a given opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// A data memory cell.
    Mem,
    /// An immediate value.
    Imm,
    /// A code address.
    Jmp,
}

impl OpKind {
    pub fn arg(&self) -> Option<Arg> {
        use OpKind::*;
        match self {
            LDA | ADD | SUB | STA | DSP => Some(Arg::Mem),
            LDI | INC | DEC | DSI => Some(Arg::Imm),
            JMP | JC | JZ => Some(Arg::Jmp),
            NOP | RES | OUT | HLT => None,
        }
    }

    /// Pack into one instruction word: opcode in the high nibble, operand
    /// in the low nibble. The hardware programmer shifts these out in
    /// big-endian bit order.
    pub fn to_bin(self, operand: u8) -> u8 {
        (u8::from(self) << 4) | (operand & 0x0F)
    }
}

/// Split an instruction word back into opcode and operand.
pub fn decode(word: u8) -> (OpKind, u8) {
    (OpKind::from(word >> 4), word & 0x0F)
}
