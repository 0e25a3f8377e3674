//! Disassembler: walk raw code into instructions without validating it.

use std::fmt;

use crate::codec::decode_immediate;
use crate::evm::get_registry;
use crate::opcode::Opcode;
use crate::types::Word;

/// One decoded position in the code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub pc: usize,
    pub byte: u8,
    /// `None` for bytes outside the instruction set.
    pub opcode: Option<Opcode>,
    /// Immediate bytes actually present in the code.
    pub immediate: Vec<u8>,
}

impl DecodedInstruction {
    /// Immediate as a word, right-padded the same way the engine pads it.
    #[must_use]
    pub fn immediate_value(&self) -> Option<Word> {
        self.opcode
            .filter(|op| op.immediate_size() > 0)
            .map(|op| decode_immediate(&self.immediate, op.immediate_size()))
    }

    /// The code ended before the full immediate.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.opcode
            .is_some_and(|op| self.immediate.len() < op.immediate_size())
    }

    /// Position of the following instruction.
    #[must_use]
    pub fn next_pc(&self) -> usize {
        self.pc + 1 + self.opcode.map_or(0, Opcode::immediate_size)
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}: ", self.pc)?;
        let handler = get_registry().get_handler(self.byte);
        match handler {
            Some(handler) => f.write_str(&handler.disassemble(&self.immediate))?,
            None => write!(f, "INVALID({:#04x})", self.byte)?,
        }
        if self.is_truncated() {
            f.write_str(" (truncated)")?;
        }
        Ok(())
    }
}

/// Iterator over the instructions of a code buffer.
pub struct Disassembler<'a> {
    code: &'a [u8],
    pc: usize,
}

impl<'a> Disassembler<'a> {
    #[must_use]
    pub const fn new(code: &'a [u8]) -> Self {
        Self { code, pc: 0 }
    }

    /// One line per instruction.
    #[must_use]
    pub fn listing(code: &[u8]) -> String {
        Disassembler::new(code)
            .map(|instruction| instruction.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Iterator for Disassembler<'_> {
    type Item = DecodedInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        let &byte = self.code.get(self.pc)?;
        let opcode = Opcode::decode(byte);
        let start = self.pc + 1;
        let size = opcode.map_or(0, Opcode::immediate_size);
        let end = start.saturating_add(size).min(self.code.len());
        let instruction = DecodedInstruction {
            pc: self.pc,
            byte,
            opcode,
            immediate: self.code[start..end].to_vec(),
        };
        self.pc = instruction.next_pc();
        Some(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_push_immediates() {
        let code = [0x60, 0x02, 0x60, 0x20, 0x52];
        let pcs: Vec<usize> = Disassembler::new(&code).map(|i| i.pc).collect();
        assert_eq!(pcs, vec![0, 2, 4]);
        assert_eq!(
            Disassembler::listing(&code),
            "0000: PUSH1 0x02\n0002: PUSH1 0x20\n0004: MSTORE"
        );
    }

    #[test]
    fn unknown_bytes_are_listed_not_rejected() {
        let code = [0xfe, 0x01];
        let decoded: Vec<_> = Disassembler::new(&code).collect();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].opcode, None);
        assert_eq!(decoded[0].to_string(), "0000: INVALID(0xfe)");
        assert_eq!(decoded[1].to_string(), "0001: ADD");
    }

    #[test]
    fn truncated_push_is_marked() {
        let decoded: Vec<_> = Disassembler::new(&[0x62, 0xab]).collect();
        assert_eq!(decoded.len(), 1);
        let push = &decoded[0];
        assert!(push.is_truncated());
        assert_eq!(push.next_pc(), 4);
        assert_eq!(push.immediate_value(), Some(Word::from(0xab_0000u64)));
        assert_eq!(push.to_string(), "0000: PUSH3 0xab (truncated)");
    }

    #[test]
    fn push0_has_no_immediate() {
        let decoded: Vec<_> = Disassembler::new(&[0x5f, 0x5f]).collect();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].immediate_value(), None);
        assert_eq!(decoded[1].to_string(), "0001: PUSH0");
    }

    #[test]
    fn empty_code_lists_nothing() {
        assert_eq!(Disassembler::new(&[]).count(), 0);
        assert_eq!(Disassembler::listing(&[]), "");
    }
}
