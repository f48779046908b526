use serde::{Deserialize, Serialize};

/// Instruction kind, resolved once at decode time from the 5-bit opcode.
///
/// `Raw` covers every opcode value the table does not map; the whole
/// 32-bit word becomes the single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Rda,
    Rmpa,
    Wra,
    Wrap,
    Rdax,
    Rdfx,
    Wrax,
    Wrhx,
    Wrlx,
    Maxx,
    Mulx,
    Log,
    Exp,
    Sof,
    And,
    Or,
    Xor,
    Skp,
    Wldx,
    Jam,
    Cho,
    Raw,
}

/// One argument field: extracted as `(word >> shift) & mask`.
/// Fields carry no inter-field dependency.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub mask: u32,
    pub shift: u32,
}

const fn field(mask: u32, shift: u32) -> Field {
    Field { mask, shift }
}

#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    pub op: Op,
    pub mnemonic: &'static str,
    /// Most-significant argument first, matching the assembler operand order.
    pub fields: &'static [Field],
}

const fn spec(op: Op, mnemonic: &'static str, fields: &'static [Field]) -> OpSpec {
    OpSpec { op, mnemonic, fields }
}

/// Primary opcode table, indexed directly by the 5-bit opcode (0x00..=0x14).
pub static OP_TABLE: [OpSpec; 21] = [
    spec(Op::Rda, "rda", &[field(0x7fff, 5), field(0x7ff, 21)]),
    spec(Op::Rmpa, "rmpa", &[field(0x7ff, 21)]),
    spec(Op::Wra, "wra", &[field(0x7fff, 5), field(0x7ff, 21)]),
    spec(Op::Wrap, "wrap", &[field(0x7fff, 5), field(0x7ff, 21)]),
    spec(Op::Rdax, "rdax", &[field(0x3f, 5), field(0xffff, 16)]),
    spec(Op::Rdfx, "rdfx", &[field(0x3f, 5), field(0xffff, 16)]), // ldax alias lives in resolve
    spec(Op::Wrax, "wrax", &[field(0x3f, 5), field(0xffff, 16)]),
    spec(Op::Wrhx, "wrhx", &[field(0x3f, 5), field(0xffff, 16)]),
    spec(Op::Wrlx, "wrlx", &[field(0x3f, 5), field(0xffff, 16)]),
    spec(Op::Maxx, "maxx", &[field(0x3f, 5), field(0xffff, 16)]), // absa alias lives in resolve
    spec(Op::Mulx, "mulx", &[field(0x3f, 5)]),
    spec(Op::Log, "log", &[field(0xffff, 16), field(0x7ff, 5)]),
    spec(Op::Exp, "exp", &[field(0xffff, 16), field(0x7ff, 5)]),
    spec(Op::Sof, "sof", &[field(0xffff, 16), field(0x7ff, 5)]),
    spec(Op::And, "and", &[field(0xffffff, 8)]), // clr alias lives in resolve
    spec(Op::Or, "or", &[field(0xffffff, 8)]),
    spec(Op::Xor, "xor", &[field(0xffffff, 8)]), // not alias lives in resolve
    spec(Op::Skp, "skp", &[field(0x1f, 27), field(0x3f, 21)]),
    spec(Op::Wldx, "wldx", &[field(0xffffffff, 0)]), // wlds/wldr, re-decoded on bit 30
    spec(Op::Jam, "jam", &[field(0x03, 6)]),
    spec(
        Op::Cho,
        "cho",
        &[field(0x03, 30), field(0x03, 21), field(0x3f, 24), field(0xffff, 5)],
    ),
];

/// Look up the primary table entry for a 5-bit opcode.
pub fn lookup(opcode: u8) -> Option<&'static OpSpec> {
    OP_TABLE.get(opcode as usize)
}

/// Sub-format field layout for the sine LFO load (opcode 0x12, bit 30 clear):
/// LFO selector, 9-bit frequency, 15-bit amplitude.
pub static WLDS_FIELDS: &[Field] = &[field(0x01, 29), field(0x1ff, 20), field(0x7fff, 5)];

/// Sub-format field layout for the ramp LFO load (opcode 0x12, bit 30 set):
/// LFO selector, 16-bit signed frequency, 2-bit amplitude code.
pub static WLDR_FIELDS: &[Field] = &[field(0x03, 29), field(0xffff, 13), field(0x03, 5)];
