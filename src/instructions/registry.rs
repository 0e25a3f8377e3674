//! Instruction registry: code byte → handler.

use crate::instructions::base::InstructionHandler;

const TABLE_SIZE: usize = 256;

/// Central registry mapping opcode bytes to instruction handlers.
pub struct InstructionRegistry {
    handlers: Vec<Option<Box<dyn InstructionHandler>>>,
}

impl InstructionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: (0..TABLE_SIZE).map(|_| None).collect(),
        }
    }

    /// Register a handler under its opcode byte, replacing any previous one.
    pub fn register(&mut self, handler: Box<dyn InstructionHandler>) {
        let byte = usize::from(handler.opcode().byte());
        self.handlers[byte] = Some(handler);
    }

    #[must_use]
    pub fn get_handler(&self, byte: u8) -> Option<&dyn InstructionHandler> {
        self.handlers[usize::from(byte)].as_deref()
    }

    #[must_use]
    pub fn has_handler(&self, byte: u8) -> bool {
        self.handlers[usize::from(byte)].is_some()
    }

    /// Registered opcode bytes in ascending order.
    #[must_use]
    pub fn registered_opcodes(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&b| self.has_handler(b)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        for slot in &mut self.handlers {
            *slot = None;
        }
    }
}

impl Default for InstructionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
