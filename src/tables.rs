use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Skip condition bits. Listed low-to-high; operand rendering joins the
    /// set names in this order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SkipFlags: u32 {
        const NEG = 0x01;
        const GEZ = 0x02;
        const ZRO = 0x04;
        const ZRC = 0x08;
        const RUN = 0x10;
    }
}

bitflags! {
    /// Chorus control bits. SIN has no bit of its own: an all-zero field
    /// renders as "SIN" by equality, never by masking.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChoFlags: u32 {
        const COS = 0x01;
        const REG = 0x02;
        const COMPC = 0x04;
        const COMPA = 0x08;
        const RPTR2 = 0x10;
        const NA = 0x20;
    }
}

/// Join a flag set's names with `|`, ascending bit order.
/// `empty_name` is the explicit zero-value label ("0" for skips, "SIN" for cho).
pub fn join_flags<F: bitflags::Flags>(flags: F, empty_name: &str) -> String {
    if flags.is_empty() {
        return empty_name.to_string();
    }
    flags
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join("|")
}

/// LFO selector names, indexed by the 2-bit selector code.
pub static LFO_SEL: [&str; 4] = ["SIN0", "SIN1", "RMP0", "RMP1"];

/// Ramp LFO amplitude names, indexed by the 2-bit amplitude code.
pub static RAMP_AMP: [&str; 4] = ["4096", "2048", "1024", "512"];

/// Chorus data-path form for the 2-bit type field. The invalid encoding 0x1
/// decodes through the same form as 0x0.
pub fn cho_type(code: u32) -> &'static str {
    match code & 0x3 {
        0x0 | 0x1 => "rda",
        0x2 => "sof",
        _ => "rdal",
    }
}

/// Register name for a 6-bit register code; unmapped codes have no name and
/// render as a hex literal at the call site.
pub fn register_name(code: u32) -> Option<&'static str> {
    Some(match code {
        0x00 => "SIN0_RATE",
        0x01 => "SIN0_RANGE",
        0x02 => "SIN1_RATE",
        0x03 => "SIN1_RANGE",
        0x04 => "RMP0_RATE",
        0x05 => "RMP0_RANGE",
        0x06 => "RMP1_RATE",
        0x07 => "RMP1_RANGE",
        0x10 => "POT0",
        0x11 => "POT1",
        0x12 => "POT2",
        0x14 => "ADCL",
        0x15 => "ADCR",
        0x16 => "DACL",
        0x17 => "DACR",
        0x18 => "ADDR_PTR",
        0x20 => "REG0",
        0x21 => "REG1",
        0x22 => "REG2",
        0x23 => "REG3",
        0x24 => "REG4",
        0x25 => "REG5",
        0x26 => "REG6",
        0x27 => "REG7",
        0x28 => "REG8",
        0x29 => "REG9",
        0x2a => "REG10",
        0x2b => "REG11",
        0x2c => "REG12",
        0x2d => "REG13",
        0x2e => "REG14",
        0x2f => "REG15",
        0x30 => "REG16",
        0x31 => "REG17",
        0x32 => "REG18",
        0x33 => "REG19",
        0x34 => "REG20",
        0x35 => "REG21",
        0x36 => "REG22",
        0x37 => "REG23",
        0x38 => "REG24",
        0x39 => "REG25",
        0x3a => "REG26",
        0x3b => "REG27",
        0x3c => "REG28",
        0x3d => "REG29",
        0x3e => "REG30",
        0x3f => "REG31",
        _ => return None,
    })
}
