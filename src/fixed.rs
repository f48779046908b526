//! Fixed-point rendering for FV-1 coefficient fields.
//!
//! Every numeric field decodes through the same rule: mask off the
//! magnitude, subtract the sign bit, divide by `2^frac_bits`. The result
//! is printed as an exact positional decimal with at least one fractional
//! digit ("0.0", never "0", never exponential form).

/// A signed fixed-point field layout: sign bit plus fractional width.
/// The magnitude mask is always `sign - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSpec {
    pub sign: u32,
    pub frac_bits: u32,
}

/// Raw signed 16-bit integer field (LFO frequency).
pub const INT15: FixedSpec = FixedSpec { sign: 1 << 15, frac_bits: 0 };
/// Register multipliers and scale constants.
pub const S1_14: FixedSpec = FixedSpec { sign: 1 << 15, frac_bits: 14 };
/// Delay-line multipliers.
pub const S1_9: FixedSpec = FixedSpec { sign: 1 << 10, frac_bits: 9 };
/// Defined by the instruction set but reached by no opcode path.
pub const S4_6: FixedSpec = FixedSpec { sign: 1 << 10, frac_bits: 6 };
/// Scale-offset constant.
pub const S_10: FixedSpec = FixedSpec { sign: 1 << 10, frac_bits: 10 };
/// Interpolation/offset constant.
pub const S_15: FixedSpec = FixedSpec { sign: 1 << 15, frac_bits: 15 };
/// Bitmask-as-fraction rendering.
pub const S_23: FixedSpec = FixedSpec { sign: 1 << 23, frac_bits: 23 };

impl FixedSpec {
    /// Two's-complement value of an extracted field.
    pub fn signed(self, v: u32) -> i64 {
        (v & (self.sign - 1)) as i64 - (v & self.sign) as i64
    }

    /// Render an extracted field as its exact decimal value.
    pub fn render(self, v: u32) -> String {
        decimal(self.signed(v), self.frac_bits)
    }
}

/// Exact decimal string of `signed / 2^frac_bits`.
///
/// `signed / 2^F` is a terminating decimal: scaling the fractional part by
/// `5^F` yields its digits outright. Trailing zeros are trimmed down to a
/// single mandatory fractional digit. u128 covers the widest case
/// (24-bit magnitude times 5^23).
fn decimal(signed: i64, frac_bits: u32) -> String {
    let sign = if signed < 0 { "-" } else { "" };
    let mag = signed.unsigned_abs() as u128;
    if frac_bits == 0 {
        return format!("{sign}{mag}.0");
    }
    let int_part = mag >> frac_bits;
    let frac_part = mag & ((1u128 << frac_bits) - 1);
    let scaled = frac_part * 5u128.pow(frac_bits);
    let mut digits = format!("{scaled:0width$}", width = frac_bits as usize);
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }
    format!("{sign}{int_part}.{digits}")
}
