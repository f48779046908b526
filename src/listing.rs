use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::decoder::{decode_program, Instruction};
use crate::resolve::{Options, Resolver};

/// Words per program slot in an FV-1 image.
pub const PROGLEN: usize = 128;

/// Operand column minimum width in the rendered listing.
const OPERAND_WIDTH: usize = 23;

/// Seam for diagnostic text. The engine never touches the console or the
/// filesystem; informational messages flow through this sink and are
/// always non-fatal.
pub trait DiagSink {
    fn warn(&mut self, msg: &str);
}

impl<F: FnMut(&str)> DiagSink for F {
    fn warn(&mut self, msg: &str) {
        self(msg)
    }
}

/// A resolved, trimmed program plus its pending branch labels.
///
/// Every label key either falls inside the retained program (the label is
/// prefixed to that instruction) or beyond it (rendered as a standalone
/// trailing label line).
#[derive(Debug, Clone, Serialize)]
pub struct Disassembly {
    pub program: Vec<Instruction>,
    pub labels: BTreeMap<usize, String>,
}

impl Disassembly {
    /// Format the listing: one tab-separated line per instruction
    /// (label, mnemonic, operands, comment), then one bare `name:` line
    /// per label past the retained program end, ascending.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for inst in &self.program {
            let label = match &inst.label {
                Some(name) => format!("{name}:"),
                None => String::new(),
            };
            let operands = inst.operands.as_deref().unwrap_or("");
            let comment = match &inst.comment {
                Some(text) => format!("; {text}"),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "{label}\t{}\t{operands:<OPERAND_WIDTH$}\t{comment}",
                inst.mnemonic
            );
        }
        for (addr, name) in &self.labels {
            if *addr >= self.program.len() {
                let _ = writeln!(out, "{name}:");
            }
        }
        out
    }
}

/// Drop the trailing run of instructions whose final mnemonic is `nop` or
/// `skp` (fixed-size padding). The first instruction always survives, and
/// retained addresses are untouched. Idempotent.
pub fn trim(program: &mut Vec<Instruction>) {
    let before = program.len();
    while program.len() > 1 {
        match program.last().map(|inst| inst.mnemonic) {
            Some("nop") | Some("skp") => {
                program.pop();
            }
            _ => break,
        }
    }
    tracing::debug!(removed = before - program.len(), "trimmed trailing padding");
}

/// Disassemble a program image: decode every complete big-endian word,
/// canonicalize, trim trailing padding, and report the retained count
/// through the sink.
pub fn disassemble(source: &[u8], opts: Options, sink: &mut dyn DiagSink) -> Disassembly {
    let program = decode_program(source);
    let (mut program, labels) = Resolver::new(opts).resolve_program(program);
    trim(&mut program);
    sink.warn(&format!("info: Read {} instructions.", program.len()));
    Disassembly { program, labels }
}
