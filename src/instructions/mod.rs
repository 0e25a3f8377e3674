//! Instruction set: one handler per opcode, grouped by family.

pub mod arithmetic;
pub mod base;
pub mod bitwise;
pub mod comparison;
pub mod memory;
pub mod registry;
pub mod registry_instructions;
pub mod shifts;
pub mod stack_ops;
