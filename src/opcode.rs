//! Opcode set. A closed enum so dispatch is checked for exhaustiveness.

use std::fmt;

use crate::config::MAX_PUSH_SIZE;

pub const OPCODE_ADD: u8 = 0x01;
pub const OPCODE_MUL: u8 = 0x02;
pub const OPCODE_SUB: u8 = 0x03;
pub const OPCODE_DIV: u8 = 0x04;
pub const OPCODE_SDIV: u8 = 0x05;
pub const OPCODE_MOD: u8 = 0x06;
pub const OPCODE_SMOD: u8 = 0x07;
pub const OPCODE_ADDMOD: u8 = 0x08;
pub const OPCODE_MULMOD: u8 = 0x09;
pub const OPCODE_EXP: u8 = 0x0A;
pub const OPCODE_SIGNEXTEND: u8 = 0x0B;
pub const OPCODE_LT: u8 = 0x10;
pub const OPCODE_GT: u8 = 0x11;
pub const OPCODE_SLT: u8 = 0x12;
pub const OPCODE_SGT: u8 = 0x13;
pub const OPCODE_EQ: u8 = 0x14;
pub const OPCODE_ISZERO: u8 = 0x15;
pub const OPCODE_AND: u8 = 0x16;
pub const OPCODE_OR: u8 = 0x17;
pub const OPCODE_XOR: u8 = 0x18;
pub const OPCODE_NOT: u8 = 0x19;
pub const OPCODE_BYTE: u8 = 0x1A;
pub const OPCODE_SHL: u8 = 0x1B;
pub const OPCODE_SHR: u8 = 0x1C;
pub const OPCODE_SAR: u8 = 0x1D;
pub const OPCODE_POP: u8 = 0x50;
pub const OPCODE_MLOAD: u8 = 0x51;
pub const OPCODE_MSTORE: u8 = 0x52;
pub const OPCODE_MSTORE8: u8 = 0x53;
pub const OPCODE_MSIZE: u8 = 0x59;
pub const OPCODE_PUSH0: u8 = 0x5F;
pub const OPCODE_PUSH1: u8 = 0x60;
pub const OPCODE_PUSH32: u8 = 0x7F;

/// Every operation the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Mul,
    Sub,
    Div,
    SDiv,
    Mod,
    SMod,
    AddMod,
    MulMod,
    Exp,
    SignExtend,
    Lt,
    Gt,
    Slt,
    Sgt,
    Eq,
    IsZero,
    And,
    Or,
    Xor,
    Not,
    Byte,
    Shl,
    Shr,
    Sar,
    Pop,
    MLoad,
    MStore,
    MStore8,
    MSize,
    /// PUSH0..=PUSH32; the payload is the immediate size in bytes.
    Push(u8),
}

impl Opcode {
    /// Decode one code byte. `None` for bytes outside the instruction set.
    #[must_use]
    pub const fn decode(byte: u8) -> Option<Self> {
        let op = match byte {
            OPCODE_ADD => Self::Add,
            OPCODE_MUL => Self::Mul,
            OPCODE_SUB => Self::Sub,
            OPCODE_DIV => Self::Div,
            OPCODE_SDIV => Self::SDiv,
            OPCODE_MOD => Self::Mod,
            OPCODE_SMOD => Self::SMod,
            OPCODE_ADDMOD => Self::AddMod,
            OPCODE_MULMOD => Self::MulMod,
            OPCODE_EXP => Self::Exp,
            OPCODE_SIGNEXTEND => Self::SignExtend,
            OPCODE_LT => Self::Lt,
            OPCODE_GT => Self::Gt,
            OPCODE_SLT => Self::Slt,
            OPCODE_SGT => Self::Sgt,
            OPCODE_EQ => Self::Eq,
            OPCODE_ISZERO => Self::IsZero,
            OPCODE_AND => Self::And,
            OPCODE_OR => Self::Or,
            OPCODE_XOR => Self::Xor,
            OPCODE_NOT => Self::Not,
            OPCODE_BYTE => Self::Byte,
            OPCODE_SHL => Self::Shl,
            OPCODE_SHR => Self::Shr,
            OPCODE_SAR => Self::Sar,
            OPCODE_POP => Self::Pop,
            OPCODE_MLOAD => Self::MLoad,
            OPCODE_MSTORE => Self::MStore,
            OPCODE_MSTORE8 => Self::MStore8,
            OPCODE_MSIZE => Self::MSize,
            OPCODE_PUSH0..=OPCODE_PUSH32 => Self::Push(byte - OPCODE_PUSH0),
            _ => return None,
        };
        Some(op)
    }

    /// Inverse of [`Opcode::decode`].
    #[must_use]
    pub const fn byte(self) -> u8 {
        match self {
            Self::Add => OPCODE_ADD,
            Self::Mul => OPCODE_MUL,
            Self::Sub => OPCODE_SUB,
            Self::Div => OPCODE_DIV,
            Self::SDiv => OPCODE_SDIV,
            Self::Mod => OPCODE_MOD,
            Self::SMod => OPCODE_SMOD,
            Self::AddMod => OPCODE_ADDMOD,
            Self::MulMod => OPCODE_MULMOD,
            Self::Exp => OPCODE_EXP,
            Self::SignExtend => OPCODE_SIGNEXTEND,
            Self::Lt => OPCODE_LT,
            Self::Gt => OPCODE_GT,
            Self::Slt => OPCODE_SLT,
            Self::Sgt => OPCODE_SGT,
            Self::Eq => OPCODE_EQ,
            Self::IsZero => OPCODE_ISZERO,
            Self::And => OPCODE_AND,
            Self::Or => OPCODE_OR,
            Self::Xor => OPCODE_XOR,
            Self::Not => OPCODE_NOT,
            Self::Byte => OPCODE_BYTE,
            Self::Shl => OPCODE_SHL,
            Self::Shr => OPCODE_SHR,
            Self::Sar => OPCODE_SAR,
            Self::Pop => OPCODE_POP,
            Self::MLoad => OPCODE_MLOAD,
            Self::MStore => OPCODE_MSTORE,
            Self::MStore8 => OPCODE_MSTORE8,
            Self::MSize => OPCODE_MSIZE,
            Self::Push(size) => OPCODE_PUSH0 + size,
        }
    }

    /// Number of immediate bytes following the opcode in the code.
    #[must_use]
    pub const fn immediate_size(self) -> usize {
        match self {
            Self::Push(size) => size as usize,
            _ => 0,
        }
    }

    /// Minimum stack depth required before the instruction runs.
    #[must_use]
    pub const fn stack_inputs(self) -> usize {
        match self {
            Self::AddMod | Self::MulMod => 3,
            Self::Add
            | Self::Mul
            | Self::Sub
            | Self::Div
            | Self::SDiv
            | Self::Mod
            | Self::SMod
            | Self::Exp
            | Self::SignExtend
            | Self::Lt
            | Self::Gt
            | Self::Slt
            | Self::Sgt
            | Self::Eq
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Byte
            | Self::Shl
            | Self::Shr
            | Self::Sar
            | Self::MStore
            | Self::MStore8 => 2,
            Self::IsZero | Self::Not | Self::Pop | Self::MLoad => 1,
            Self::MSize | Self::Push(_) => 0,
        }
    }

    /// Words the instruction leaves on the stack.
    #[must_use]
    pub const fn stack_outputs(self) -> usize {
        match self {
            Self::Pop | Self::MStore | Self::MStore8 => 0,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::Sub => "SUB",
            Self::Div => "DIV",
            Self::SDiv => "SDIV",
            Self::Mod => "MOD",
            Self::SMod => "SMOD",
            Self::AddMod => "ADDMOD",
            Self::MulMod => "MULMOD",
            Self::Exp => "EXP",
            Self::SignExtend => "SIGNEXTEND",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Slt => "SLT",
            Self::Sgt => "SGT",
            Self::Eq => "EQ",
            Self::IsZero => "ISZERO",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Byte => "BYTE",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Sar => "SAR",
            Self::Pop => "POP",
            Self::MLoad => "MLOAD",
            Self::MStore => "MSTORE",
            Self::MStore8 => "MSTORE8",
            Self::MSize => "MSIZE",
            Self::Push(size) => PUSH_NAMES[size as usize],
        }
    }

    /// Every opcode, in byte order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=u8::MAX).filter_map(Self::decode)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const PUSH_NAMES: [&str; MAX_PUSH_SIZE + 1] = [
    "PUSH0", "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9",
    "PUSH10", "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18",
    "PUSH19", "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27",
    "PUSH28", "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];
