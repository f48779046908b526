//! Per-opcode canonicalization: rewrites generic decodes into the
//! idiomatic assembler forms (aliases, sub-format re-decodes, branch
//! targets) and accumulates pending skip labels along the way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decoder::{decode_fields, Instruction};
use crate::fixed::{INT15, S1_14, S1_9, S_10, S_15, S_23};
use crate::opcodes::{Op, WLDR_FIELDS, WLDS_FIELDS};
use crate::tables::{cho_type, join_flags, register_name, ChoFlags, LFO_SEL, RAMP_AMP, SkipFlags};

/// Rendering options supplied by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Options {
    /// Render skip offsets as raw numbers instead of `addrNN` labels.
    pub relative_skip: bool,
    /// Rewrite unmapped words to `nop` instead of `raw` hex literals.
    pub suppress_raw: bool,
}

/// Walks a decoded program in address order, canonicalizing each
/// instruction exactly once and collecting skip targets. Skips only ever
/// branch forward, so a target's label is always registered before the
/// walk reaches the target address.
pub struct Resolver {
    opts: Options,
    labels: BTreeMap<usize, String>,
}

impl Resolver {
    pub fn new(opts: Options) -> Self {
        Self { opts, labels: BTreeMap::new() }
    }

    /// Consume the decoded program, producing the canonicalized program
    /// and the pending-label map keyed by target address.
    pub fn resolve_program(
        mut self,
        program: Vec<Instruction>,
    ) -> (Vec<Instruction>, BTreeMap<usize, String>) {
        let program: Vec<Instruction> =
            program.into_iter().map(|inst| self.resolve(inst)).collect();
        tracing::debug!(labels = self.labels.len(), "resolved program");
        (program, self.labels)
    }

    fn resolve(&mut self, mut inst: Instruction) -> Instruction {
        match inst.op {
            Op::Skp => self.skp(&mut inst),
            Op::Rdax | Op::Wrax | Op::Maxx | Op::Rdfx | Op::Wrlx | Op::Wrhx => regmult(&mut inst),
            Op::Mulx => mulx(&mut inst),
            Op::Rda | Op::Wra | Op::Wrap => delayop(&mut inst),
            Op::Log | Op::Exp | Op::Sof => scaleoft(&mut inst),
            Op::Rmpa => rmpa(&mut inst),
            Op::Jam => jam(&mut inst),
            Op::Cho => cho(&mut inst),
            Op::Wldx => wldx(&mut inst),
            Op::And | Op::Or | Op::Xor => bitop(&mut inst),
            Op::Raw => raw(&mut inst, self.opts.suppress_raw),
        }
        if let Some(name) = self.labels.get(&inst.address) {
            inst.label = Some(name.clone());
        }
        inst
    }

    /// skp: condition flags plus forward offset. `skp 0,0` is a nop.
    fn skp(&mut self, inst: &mut Instruction) {
        let flags = inst.args[0];
        let offset = inst.args[1];
        if flags == 0 && offset == 0 {
            inst.mnemonic = "nop";
            inst.comment = Some("skp 0,0".to_string());
            return;
        }
        let target = if self.opts.relative_skip {
            offset.to_string()
        } else {
            let taddr = inst.address + offset as usize + 1;
            let name = format!("addr{taddr:02x}");
            self.labels.insert(taddr, name.clone());
            inst.target = Some(name.clone());
            name
        };
        inst.comment = Some(format!("flags:{flags:#04x} offset:{offset:#04x}"));
        let conds = join_flags(SkipFlags::from_bits_retain(flags), "0");
        inst.operands = Some(format!("{conds},{target}"));
    }
}

/// Register operand text: table name, or a hex literal for unmapped codes.
fn reg_text(code: u32) -> String {
    match register_name(code) {
        Some(name) => name.to_string(),
        None => format!("{code:#04x}"),
    }
}

/// rdax/wrax/maxx/rdfx/wrlx/wrhx: `op REG,k` with two aliased special cases.
fn regmult(inst: &mut Instruction) {
    let reg = inst.args[0];
    let mult = inst.args[1];
    if inst.op == Op::Rdfx && mult == 0 {
        inst.mnemonic = "ldax";
        inst.operands = Some(reg_text(reg));
        inst.comment = Some(format!("reg:{reg:#04x}"));
    } else if inst.op == Op::Maxx && mult == 0 && reg == 0 {
        inst.mnemonic = "absa";
        inst.comment = Some("maxx 0,0".to_string());
    } else {
        inst.comment = Some(format!("reg:{reg:#04x} k:{mult:#06x}"));
        inst.operands = Some(format!("{},{}", reg_text(reg), S1_14.render(mult)));
    }
}

fn mulx(inst: &mut Instruction) {
    let reg = inst.args[0];
    inst.comment = Some(format!("reg:{reg:#04x}"));
    inst.operands = Some(reg_text(reg));
}

/// rda/wra/wrap: `op delay,k`.
fn delayop(inst: &mut Instruction) {
    let offset = inst.args[0];
    let mult = inst.args[1];
    inst.comment = Some(format!("del:{offset:#06x} k:{mult:#05x}"));
    inst.operands = Some(format!("{offset},{}", S1_9.render(mult)));
}

/// log/exp/sof: `op k,const`.
fn scaleoft(inst: &mut Instruction) {
    let mult = inst.args[0];
    let offset = inst.args[1];
    inst.comment = Some(format!("k:{mult:#06x} const:{offset:#05x}"));
    inst.operands = Some(format!("{},{}", S1_14.render(mult), S_10.render(offset)));
}

fn rmpa(inst: &mut Instruction) {
    let mult = inst.args[0];
    inst.comment = Some(format!("k:{mult:#05x}"));
    inst.operands = Some(S1_9.render(mult));
}

/// jam: the selector is forced into the ramp half of the LFO table.
fn jam(inst: &mut Instruction) {
    let lfo = inst.args[0] | 0x2;
    inst.comment = Some(format!("lfo:{lfo:#03x}"));
    inst.operands = Some(LFO_SEL[lfo as usize].to_string());
}

/// and/or/xor: 24-bit mask, with clr/not aliases.
fn bitop(inst: &mut Instruction) {
    let mask = inst.args[0];
    if inst.op == Op::And && mask == 0 {
        inst.mnemonic = "clr";
        inst.comment = Some("and 0".to_string());
    } else if inst.op == Op::Xor && mask == 0xffffff {
        inst.mnemonic = "not";
        inst.comment = Some("xor 0xffffff".to_string());
    } else {
        // The comment carries only the fractional reading of the mask, not
        // the hex value; consumers rely on this exact shape.
        inst.comment = Some(format!("val:{}", S_23.render(mask)));
        inst.operands = Some(format!("{mask:#08x}"));
    }
}

fn cho(inst: &mut Instruction) {
    let typeval = inst.args[0];
    let sel = inst.args[1];
    let flags = inst.args[2];
    let d = inst.args[3];
    let typestr = cho_type(typeval);
    let selstr = LFO_SEL[sel as usize];
    let flagstr = join_flags(ChoFlags::from_bits_retain(flags), "SIN");
    match typestr {
        "rdal" => {
            inst.operands = Some(format!("rdal,{selstr},{flagstr}"));
            inst.comment = Some(format!("t:{typeval:#03x} n:{sel:#03x} c:{flags:#04x}"));
        }
        "sof" => {
            inst.operands = Some(format!("sof,{selstr},{flagstr},{}", S_15.render(d)));
            inst.comment =
                Some(format!("t:{typeval:#03x} n:{sel:#03x} c:{flags:#04x} d:{d:#06x}"));
        }
        _ => {
            inst.operands = Some(format!("rda,{selstr},{flagstr},{d}"));
            inst.comment =
                Some(format!("t:{typeval:#03x} n:{sel:#03x} c:{flags:#04x} addr:{d:#06x}"));
        }
    }
}

/// wldx splits on raw bit 30: the ramp and sine LFO loads share an opcode
/// but not a field layout.
fn wldx(inst: &mut Instruction) {
    if inst.raw & 0x4000_0000 != 0 {
        inst.args = decode_fields(inst.raw, WLDR_FIELDS);
        inst.mnemonic = "wldr";
        let lfo = inst.args[0] & 0x1;
        let freq = inst.args[1];
        let amp = inst.args[2];
        let ampstr = match RAMP_AMP.get(amp as usize) {
            Some(name) => name.to_string(),
            None => format!("{amp:01x}"),
        };
        inst.operands = Some(format!("RMP{lfo},{},{ampstr}", INT15.render(freq)));
        inst.comment = Some(format!("lfo:{lfo:#03x} f:{freq:#06x} a:{amp:#03x}"));
    } else {
        inst.args = decode_fields(inst.raw, WLDS_FIELDS);
        inst.mnemonic = "wlds";
        let lfo = inst.args[0] & 0x1;
        let freq = inst.args[1];
        let amp = inst.args[2];
        inst.operands = Some(format!("SIN{lfo},{freq},{amp}"));
        inst.comment = Some(format!("lfo:{lfo:#03x} f:{freq:#05x} a:{amp:#06x}"));
    }
}

/// Fallback for words outside the opcode table.
fn raw(inst: &mut Instruction, suppress: bool) {
    let val = inst.args[0];
    if suppress {
        inst.mnemonic = "nop";
    } else {
        inst.operands = Some(format!("{val:#010x}"));
    }
    let b = val.to_be_bytes();
    inst.comment = Some(format!(
        "bytes: {:02x} {:02x} {:02x} {:02x}",
        b[0], b[1], b[2], b[3]
    ));
}
