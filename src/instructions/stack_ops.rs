//! Stack instructions.
//! PUSH0..PUSH32, POP.

use crate::codec::decode_immediate;
use crate::instructions::base::InstructionHandler;
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult};

// --- PUSH0..PUSH32 (0x5F..0x7F) ---
/// Push the `size`-byte big-endian immediate. Missing trailing bytes read as zero.
#[derive(Clone, Copy, Debug)]
pub struct PushInstruction {
    size: u8,
}

impl PushInstruction {
    #[must_use]
    pub const fn new(size: u8) -> Self {
        Self { size }
    }
}

impl InstructionHandler for PushInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Push(self.size)
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let value = decode_immediate(context.immediate, usize::from(self.size));
        context.stack.push(value)
    }
}

// --- POP (0x50) ---
pub struct PopInstruction;

impl PopInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for PopInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Pop
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        context.stack.pop().map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fault;
    use crate::instructions::test_utils::{execute_with, word};
    use crate::memory::Memory;
    use crate::types::Word;

    #[test]
    fn push_decodes_immediate() {
        let stack = execute_with(&PushInstruction::new(2), &[], &mut Memory::new(), &[0x01, 0x02]).unwrap();
        assert_eq!(stack, vec![word(0x0102)]);
    }

    #[test]
    fn push0_pushes_zero() {
        let stack = execute_with(&PushInstruction::new(0), &[], &mut Memory::new(), &[]).unwrap();
        assert_eq!(stack, vec![Word::ZERO]);
    }

    #[test]
    fn push_zero_pads_truncated_immediate() {
        let stack = execute_with(&PushInstruction::new(4), &[], &mut Memory::new(), &[0xaa]).unwrap();
        assert_eq!(stack, vec![word(0xaa00_0000)]);
    }

    #[test]
    fn push32_full_width() {
        let stack = execute_with(&PushInstruction::new(32), &[], &mut Memory::new(), &[0xff; 32]).unwrap();
        assert_eq!(stack, vec![Word::MAX]);
    }

    #[test]
    fn push_disassembles_with_immediate() {
        assert_eq!(PushInstruction::new(1).disassemble(&[0x2a]), "PUSH1 0x2a");
        assert_eq!(PushInstruction::new(0).disassemble(&[]), "PUSH0");
        assert_eq!(PopInstruction.disassemble(&[]), "POP");
    }

    #[test]
    fn pop_discards_top() {
        let stack = execute_with(&PopInstruction, &[word(1), word(2)], &mut Memory::new(), &[]).unwrap();
        assert_eq!(stack, vec![word(2)]);
        assert_eq!(
            execute_with(&PopInstruction, &[], &mut Memory::new(), &[]),
            Err(Fault::StackUnderflow {
                required: 1,
                available: 0
            })
        );
    }
}
