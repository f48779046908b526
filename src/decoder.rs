use serde::Serialize;

use crate::opcodes::{self, Field, Op};

/// One decoded program word.
///
/// `raw` is the immutable source of truth; `args` are fixed once decoded.
/// The resolver rewrites `mnemonic` and fills the derived text fields
/// exactly once, then the record is read-only until rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Instruction {
    pub address: usize,
    pub raw: u32,
    /// 5-bit primary opcode field, kept even when it maps to no table entry.
    pub opcode: u8,
    pub op: Op,
    pub mnemonic: &'static str,
    pub args: Vec<u32>,
    pub operands: Option<String>,
    pub comment: Option<String>,
    /// Name attached to this address when it is a known branch target.
    pub label: Option<String>,
    /// Label this instruction's own operand refers to (skip instructions only).
    pub target: Option<String>,
}

/// Extract each field of `fields` from `word`, table order.
pub fn decode_fields(word: u32, fields: &[Field]) -> Vec<u32> {
    fields.iter().map(|f| (word >> f.shift) & f.mask).collect()
}

/// Decode one 32-bit word. Total: every input produces an instruction;
/// opcodes outside the table degrade to the `raw` pseudo-op carrying the
/// whole word as its single argument.
pub fn decode(address: usize, word: u32) -> Instruction {
    let opcode = (word & 0x1f) as u8;
    let (op, mnemonic, args) = match opcodes::lookup(opcode) {
        Some(spec) => (spec.op, spec.mnemonic, decode_fields(word, spec.fields)),
        None => (Op::Raw, "raw", vec![word]),
    };
    Instruction {
        address,
        raw: word,
        opcode,
        op,
        mnemonic,
        args,
        operands: None,
        comment: None,
        label: None,
        target: None,
    }
}

/// Decode a program image into one instruction per complete big-endian
/// 32-bit word. Trailing partial words are ignored.
pub fn decode_program(source: &[u8]) -> Vec<Instruction> {
    let program: Vec<Instruction> = source
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .enumerate()
        .map(|(address, word)| decode(address, word))
        .collect();
    tracing::debug!(words = program.len(), "decoded program image");
    program
}
