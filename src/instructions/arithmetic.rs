//! Arithmetic instructions.
//! ADD, MUL, SUB, DIV, SDIV, MOD, SMOD, ADDMOD, MULMOD, EXP, SIGNEXTEND.
//!
//! Unless noted, results wrap modulo 2^256. For the division family the first
//! word popped (top of stack) is the divisor and the second is the dividend.

use crate::instructions::base::{apply_sign, binary_op, split_sign, InstructionHandler};
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult, Word};

// --- ADD (0x01) ---
/// a + b mod 2^256
pub struct AddInstruction;

impl AddInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for AddInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Add
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a.wrapping_add(b))
    }
}

// --- MUL (0x02) ---
/// a * b mod 2^256
pub struct MulInstruction;

impl MulInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MulInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Mul
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a.wrapping_mul(b))
    }
}

// --- SUB (0x03) ---
/// a - b mod 2^256
pub struct SubInstruction;

impl SubInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SubInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Sub
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a.wrapping_sub(b))
    }
}

// --- DIV (0x04) ---
/// 0 when divisor = 0, else floor(dividend / divisor)
pub struct DivInstruction;

impl DivInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for DivInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Div
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |divisor, dividend| {
            dividend.checked_div(divisor).unwrap_or(Word::ZERO)
        })
    }
}

// --- SDIV (0x05) ---
/// Two's-complement division truncating toward zero. 0 when divisor = 0;
/// MIN / -1 wraps to MIN.
pub struct SDivInstruction;

impl SDivInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SDivInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::SDiv
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, signed_div)
    }
}

fn signed_div(divisor: Word, dividend: Word) -> Word {
    if divisor.is_zero() {
        return Word::ZERO;
    }
    let (divisor_abs, divisor_negative) = split_sign(divisor);
    let (dividend_abs, dividend_negative) = split_sign(dividend);
    let quotient = dividend_abs.checked_div(divisor_abs).unwrap_or(Word::ZERO);
    apply_sign(quotient, divisor_negative != dividend_negative)
}

// --- MOD (0x06) ---
/// 0 when divisor = 0, else dividend mod divisor
pub struct ModInstruction;

impl ModInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for ModInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Mod
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |divisor, dividend| {
            dividend.checked_rem(divisor).unwrap_or(Word::ZERO)
        })
    }
}

// --- SMOD (0x07) ---
/// Two's-complement remainder; the result takes the dividend's sign. 0 when divisor = 0.
pub struct SModInstruction;

impl SModInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SModInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::SMod
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, signed_rem)
    }
}

fn signed_rem(divisor: Word, dividend: Word) -> Word {
    if divisor.is_zero() {
        return Word::ZERO;
    }
    let (divisor_abs, _) = split_sign(divisor);
    let (dividend_abs, dividend_negative) = split_sign(dividend);
    let remainder = dividend_abs.checked_rem(divisor_abs).unwrap_or(Word::ZERO);
    apply_sign(remainder, dividend_negative)
}

// --- ADDMOD (0x08) ---
/// (a + b) mod n without intermediate wraparound; 0 when n = 0
pub struct AddModInstruction;

impl AddModInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for AddModInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::AddMod
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let [a, b, modulus] = context.stack.pop_array()?;
        let result = if modulus.is_zero() {
            Word::ZERO
        } else {
            a.add_mod(b, modulus)
        };
        context.stack.push(result)
    }
}

// --- MULMOD (0x09) ---
/// (a * b) mod n without intermediate wraparound; 0 when n = 0
pub struct MulModInstruction;

impl MulModInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MulModInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::MulMod
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let [a, b, modulus] = context.stack.pop_array()?;
        let result = if modulus.is_zero() {
            Word::ZERO
        } else {
            a.mul_mod(b, modulus)
        };
        context.stack.push(result)
    }
}

// --- EXP (0x0A) ---
/// base ^ exponent mod 2^256
pub struct ExpInstruction;

impl ExpInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for ExpInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Exp
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |base, exponent| base.wrapping_pow(exponent))
    }
}

// --- SIGNEXTEND (0x0B) ---
/// Treat the low (b + 1) bytes of x as signed and extend to 256 bits. b >= 31 leaves x unchanged.
pub struct SignExtendInstruction;

impl SignExtendInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SignExtendInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::SignExtend
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, sign_extend)
    }
}

/// Sign-extend from byte `byte_index` (0 = least significant).
#[must_use]
pub fn sign_extend(byte_index: Word, value: Word) -> Word {
    if byte_index >= Word::from(31u64) {
        return value;
    }
    let sign_bit = byte_index.as_limbs()[0] as usize * 8 + 7;
    let mask = (Word::from(1u64) << (sign_bit + 1)) - Word::from(1u64);
    if value.bit(sign_bit) {
        value | !mask
    } else {
        value & mask
    }
}
