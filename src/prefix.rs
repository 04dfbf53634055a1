//! Legacy-prefix and REX scanning.

use bit_field::BitField;

use crate::Result;
use crate::cursor::Cursor;
use crate::insn::Segment;

/// REX prefix (`0x40..=0x4F`) fields. The low nibble widens the operand
/// size (W) and extends the ModR/M `reg` (R), SIB `index` (X) and
/// `base`/`r/m` (B) fields by one bit each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rex {
    pub w: bool,
    pub r: bool,
    pub x: bool,
    pub b: bool,
}

impl Rex {
    pub fn from_byte(byte: u8) -> Option<Self> {
        if byte & 0xF0 == 0x40 {
            Some(Self {
                w: byte.get_bit(3),
                r: byte.get_bit(2),
                x: byte.get_bit(1),
                b: byte.get_bit(0),
            })
        } else {
            None
        }
    }
}

/// Prefix state accumulated ahead of the opcode bytes. A later prefix of
/// the same kind overwrites an earlier one; the last REX and the last
/// segment override win.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Prefixes {
    pub segment: Segment,
    pub rex: Option<Rex>,
    pub lock: bool,
    /// 0x66 — operand-size override; also selects the packed-double SSE
    /// variants.
    pub osize: bool,
    /// 0x67 — address-size override. Recognized so the byte is accounted
    /// for, but it changes nothing in 64-bit mode.
    #[allow(dead_code)]
    pub asize: bool,
    /// 0xF3 — REP; selects the scalar-single SSE variants.
    pub rep: bool,
    /// 0xF2 — REPNE; selects the scalar-double SSE variants.
    pub repne: bool,
}

impl Prefixes {
    /// Consume the (possibly empty) prefix run. Returns the accumulated
    /// prefix state and the first non-prefix byte; the cursor is left just
    /// past that byte.
    pub fn scan(cur: &mut Cursor<'_>) -> Result<(Self, u8)> {
        let mut p = Self::default();
        loop {
            let byte = cur.read_u8()?;
            match byte {
                0x40..=0x4F => p.rex = Rex::from_byte(byte),
                0xF0 => p.lock = true,
                0x66 => p.osize = true,
                0x67 => p.asize = true,
                0xF3 => p.rep = true,
                0xF2 => p.repne = true,
                0x2E => p.segment = Segment::Cs,
                0x36 => p.segment = Segment::Ss,
                0x3E => p.segment = Segment::Ds,
                0x26 => p.segment = Segment::Es,
                0x64 => p.segment = Segment::Fs,
                0x65 => p.segment = Segment::Gs,
                _ => return Ok((p, byte)),
            }
        }
    }

    pub fn rex_w(&self) -> bool {
        self.rex.is_some_and(|r| r.w)
    }

    /// REX.B as a high bit for `r/m`, `base` and `+r` register indices.
    pub fn rex_b(&self) -> u8 {
        self.rex.is_some_and(|r| r.b) as u8
    }

    /// REX.R as a high bit for ModR/M `reg` register indices.
    pub fn rex_r(&self) -> u8 {
        self.rex.is_some_and(|r| r.r) as u8
    }

    /// REX.X as a high bit for SIB `index` register indices.
    pub fn rex_x(&self) -> u8 {
        self.rex.is_some_and(|r| r.x) as u8
    }
}
