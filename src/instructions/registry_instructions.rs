//! Register all instruction handlers into the registry.

use super::arithmetic::{
    AddInstruction, AddModInstruction, DivInstruction, ExpInstruction, ModInstruction,
    MulInstruction, MulModInstruction, SDivInstruction, SModInstruction, SignExtendInstruction,
    SubInstruction,
};
use super::bitwise::{
    AndInstruction, ByteInstruction, NotInstruction, OrInstruction, XorInstruction,
};
use super::comparison::{
    EqInstruction, GtInstruction, IsZeroInstruction, LtInstruction, SgtInstruction,
    SltInstruction,
};
use super::memory::{MLoadInstruction, MSizeInstruction, MStore8Instruction, MStoreInstruction};
use super::registry::InstructionRegistry;
use super::shifts::{SarInstruction, ShlInstruction, ShrInstruction};
use super::stack_ops::{PopInstruction, PushInstruction};
use crate::config::MAX_PUSH_SIZE;

pub fn register_all_instructions(registry: &mut InstructionRegistry) {
    registry.register(Box::new(AddInstruction::new()));
    registry.register(Box::new(MulInstruction::new()));
    registry.register(Box::new(SubInstruction::new()));
    registry.register(Box::new(DivInstruction::new()));
    registry.register(Box::new(SDivInstruction::new()));
    registry.register(Box::new(ModInstruction::new()));
    registry.register(Box::new(SModInstruction::new()));
    registry.register(Box::new(AddModInstruction::new()));
    registry.register(Box::new(MulModInstruction::new()));
    registry.register(Box::new(ExpInstruction::new()));
    registry.register(Box::new(SignExtendInstruction::new()));

    registry.register(Box::new(LtInstruction::new()));
    registry.register(Box::new(GtInstruction::new()));
    registry.register(Box::new(SltInstruction::new()));
    registry.register(Box::new(SgtInstruction::new()));
    registry.register(Box::new(EqInstruction::new()));
    registry.register(Box::new(IsZeroInstruction::new()));

    registry.register(Box::new(AndInstruction::new()));
    registry.register(Box::new(OrInstruction::new()));
    registry.register(Box::new(XorInstruction::new()));
    registry.register(Box::new(NotInstruction::new()));
    registry.register(Box::new(ByteInstruction::new()));
    registry.register(Box::new(ShlInstruction::new()));
    registry.register(Box::new(ShrInstruction::new()));
    registry.register(Box::new(SarInstruction::new()));

    registry.register(Box::new(PopInstruction::new()));
    registry.register(Box::new(MLoadInstruction::new()));
    registry.register(Box::new(MStoreInstruction::new()));
    registry.register(Box::new(MStore8Instruction::new()));
    registry.register(Box::new(MSizeInstruction::new()));

    for size in 0..=MAX_PUSH_SIZE as u8 {
        registry.register(Box::new(PushInstruction::new(size)));
    }
}
