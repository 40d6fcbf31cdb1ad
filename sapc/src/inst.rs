use arch::op::OpKind;
use color_print::cformat;
use std::fmt;

/// One machine instruction. Until label resolution runs, a jump operand
/// may still be a symbolic target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inst {
    pub op: OpKind,
    pub operand: Option<Operand>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Resolved operand, 0..=15.
    Imm(u8),
    /// Symbolic jump target, gone after resolution.
    Label(String),
}

/// Item of the generated stream. Label markers sit between real
/// instructions until resolution assigns them an address and drops them;
/// they never consume a memory word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Label(String),
    Inst(Inst),
}

impl Inst {
    pub fn bare(op: OpKind) -> Self {
        Inst { op, operand: None }
    }

    pub fn imm(op: OpKind, value: u8) -> Self {
        Inst {
            op,
            operand: Some(Operand::Imm(value)),
        }
    }

    pub fn sym(op: OpKind, target: String) -> Self {
        Inst {
            op,
            operand: Some(Operand::Label(target)),
        }
    }

    /// Resolved operand bits; operand-less instructions encode 0.
    pub fn operand_bits(&self) -> u8 {
        match &self.operand {
            Some(Operand::Imm(v)) => *v,
            _ => 0,
        }
    }

    /// Pack into the 8-bit instruction word.
    pub fn encode(&self) -> u8 {
        self.op.to_bin(self.operand_bits())
    }

    pub fn cformat(&self) -> String {
        match &self.operand {
            Some(Operand::Imm(v)) => cformat!("<r>{:<4}</><y>{:>2}</>", self.op, v),
            Some(Operand::Label(l)) => cformat!("<r>{:<4}</><r,u>{}</>", self.op, l),
            None => cformat!("<r>{}</>", self.op),
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(v) => write!(f, "{v}"),
            Operand::Label(l) => write!(f, "{l}"),
        }
    }
}
