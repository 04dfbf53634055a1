//! The decoder: prefix scan, opcode-DFA walk, encoding-mode
//! interpretation, memory-operand parsing and operand-slot resolution.

use bit_field::BitField;

use crate::cursor::Cursor;
use crate::insn::{DataType, Gpr, InsnFlags, Instruction, Reg, Scale};
use crate::prefix::Prefixes;
use crate::tables::descs::InstKind;
use crate::tables::{self, DfaCell, EncodingMode, Tables};
use crate::{DecodeError, Result};

const MOD_INDIRECT: u8 = 0;
const MOD_INDIRECT_DISP8: u8 = 1;
const MOD_INDIRECT_DISP32: u8 = 2;
const MOD_DIRECT: u8 = 3;

/// `endbr64` is a prefix+opcode combination the table cannot express; it
/// is matched before the DFA runs.
const ENDBR64: [u8; 4] = [0xF3, 0x0F, 0x1E, 0xFA];

/// Immediate widths an encoding mode can request. `Unity` is the
/// shift-by-1 form: an implied immediate of 1 with no bytes consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Imm {
    #[default]
    None,
    Unity,
    W8,
    W16,
    W32,
    W64,
}

/// Structural facts derived from an encoding mode before any operand
/// bytes are read.
#[derive(Debug, Clone, Copy, Default)]
struct Shape {
    uses_modrm: bool,
    /// Reg-field operand is operand 0 (dest); r/m side is operand 1.
    direction: bool,
    uses_xmm: bool,
    single_operand: bool,
    implicit_rax: bool,
    implicit_cl: bool,
    /// The ModR/M `reg` field extends the opcode instead of naming an
    /// operand.
    rx_extension: bool,
    imm: Imm,
}

/// Decode one instruction from the start of `code`.
///
/// On success the record's `length` tells the caller how far to advance
/// for the next instruction. On failure the error's `length` reports how
/// many bytes were consumed before the problem was detected.
pub fn decode(code: &[u8]) -> Result<Instruction> {
    let mut cur = Cursor::new(code);
    let mut out = Instruction::default();

    if cur.remaining() >= 4 && code[..4] == ENDBR64 {
        cur.advance(4)?;
        out.kind = InstKind::Endbr64;
        out.length = cur.pos();
        return Ok(out);
    }

    let (prefixes, first_op) = Prefixes::scan(&mut cur)?;
    out.segment = prefixes.segment;
    if prefixes.lock {
        out.flags |= InsnFlags::LOCK;
    }

    let (kind, mode, plus_r, opcode_byte) = walk_dfa(&mut cur, &prefixes, first_op)?;
    out.kind = if kind.desc().has_cc {
        kind.with_cond(opcode_byte)
    } else {
        kind
    };

    let shape = shape_of(mode, plus_r);
    let modrm = if shape.uses_modrm {
        cur.read_u8()?
    } else {
        0
    };

    let (data_type, data_type2, two_types) = data_types(mode, &prefixes);
    out.data_type = override_for_kind(out.kind, data_type);
    if two_types {
        out.data_type2 = data_type2;
        out.flags |= InsnFlags::TWO_DATA_TYPES;
    }
    if shape.uses_xmm {
        out.flags |= InsnFlags::XMMREG;
    }
    if shape.direction {
        out.flags |= InsnFlags::DIRECTION;
    }

    if shape.uses_modrm {
        let (mod_, rx, rm) = (
            modrm.get_bits(6..8),
            modrm.get_bits(3..6),
            modrm.get_bits(0..3),
        );
        let (rx_slot, rm_slot) = if shape.direction { (0, 1) } else { (1, 0) };

        // an immediate-bearing form spends the reg field as an opcode
        // extension, so it names no register
        out.regs[rx_slot] = if shape.imm == Imm::None && !shape.rx_extension {
            let index = prefixes.rex_r() << 3 | rx;
            if mode == EncodingMode::Rm64Xmmreg {
                Reg::Xmm(index)
            } else {
                register_slot(index, out.data_type, &prefixes, shape.uses_xmm)
            }
        } else {
            Reg::None
        };

        let rm_width = if two_types {
            out.data_type2
        } else {
            out.data_type
        };
        out.regs[rm_slot] = match parse_memory_operand(&mut cur, &mut out, mod_, rm, &prefixes)? {
            Some(index) => register_slot(index, rm_width, &prefixes, shape.uses_xmm),
            None => Reg::None,
        };

        if shape.single_operand {
            out.regs[1] = Reg::None;
        } else if shape.implicit_cl {
            // rendered as cl through the byte-sized second data type
            out.regs[1] = Reg::Gpr(Gpr::Rcx);
        }
    } else if plus_r {
        let index = prefixes.rex_b() << 3 | opcode_byte.get_bits(0..3);
        out.regs[0] = register_slot(index, out.data_type, &prefixes, false);
    } else if shape.implicit_rax {
        out.regs[0] = Reg::Gpr(Gpr::Rax);
    }

    match shape.imm {
        Imm::None => {}
        Imm::Unity => {
            out.flags |= InsnFlags::IMMEDIATE;
            out.imm = 1;
        }
        Imm::W8 => {
            out.flags |= InsnFlags::IMMEDIATE;
            out.imm = cur.read_u8()? as i8 as i32;
        }
        Imm::W16 => {
            out.flags |= InsnFlags::IMMEDIATE;
            out.imm = cur.read_u16()? as i16 as i32;
        }
        Imm::W32 => {
            out.flags |= InsnFlags::IMMEDIATE;
            out.imm = cur.read_u32()? as i32;
        }
        Imm::W64 => {
            out.flags |= InsnFlags::ABSOLUTE;
            out.abs = cur.read_u64()?;
        }
    }

    out.length = cur.pos();
    Ok(out)
}

/// Run the opcode DFA. Returns the leaf's kind and mode, whether a `+r`
/// transition was crossed, and the opcode byte that selected the leaf
/// (needed for condition codes and `+r` register extraction).
fn walk_dfa(
    cur: &mut Cursor<'_>,
    prefixes: &Prefixes,
    first_op: u8,
) -> Result<(InstKind, EncodingMode, bool, u8)> {
    let t = tables::tables();
    let mut state = t.entry();

    // table-keying prefixes pre-dispatch in a fixed order. A 66h prefix
    // that keys no entry for this opcode is rolled back: it still selects
    // the 16-bit data type elsewhere but does not change opcode decoding.
    if prefixes.osize {
        let keyed = step(t, state, 0x66);
        state = if matches!(t.cell(keyed, first_op), DfaCell::Empty) {
            t.entry()
        } else {
            keyed
        };
    }
    if prefixes.rex_w() {
        state = step(t, state, 0x48);
    }
    if prefixes.rep {
        state = step(t, state, 0xF3);
    }
    if prefixes.repne {
        state = step(t, state, 0xF2);
    }

    let mut opcode_byte = first_op;
    let mut dispatch = first_op;
    loop {
        match t.cell(state, dispatch) {
            DfaCell::Empty => return Err(DecodeError::unknown_opcode(cur.pos())),
            DfaCell::Leaf { kind, mode, plus_r } => {
                return Ok((kind, mode, plus_r, opcode_byte));
            }
            DfaCell::Next { base, rx_dig } => {
                state = base;
                if rx_dig {
                    // dispatch on the ModR/M reg field without consuming
                    // the byte; the interpreter reads it for real
                    let modrm = cur.read_u8()?;
                    cur.rewind(1);
                    dispatch = modrm.get_bits(3..6);
                } else {
                    opcode_byte = cur.read_u8()?;
                    dispatch = opcode_byte;
                }
            }
        }
    }
}

/// Follow a pre-dispatch edge; anything but a plain transition lands in
/// the dead state.
fn step(t: &Tables, state: u32, byte: u8) -> u32 {
    match t.cell(state, byte) {
        DfaCell::Next { base, .. } => base,
        _ => 0,
    }
}

fn shape_of(mode: EncodingMode, plus_r: bool) -> Shape {
    use EncodingMode::*;
    let mut s = Shape::default();
    match mode {
        Void => {}
        ImmShort => s.imm = Imm::W8,
        Imm32Near | Imm64Near => s.imm = Imm::W32,
        Reg8Imm => {
            s.imm = Imm::W8;
            s.uses_modrm = !plus_r;
        }
        Rm8Imm | Rm8Imm8 | MemImm8 => {
            s.imm = Imm::W8;
            s.uses_modrm = true;
        }
        Reg8 | Reg16 | Reg32 | Reg64 => {
            s.uses_modrm = !plus_r;
            s.single_operand = true;
        }
        Rm8 | Rm16 | Rm32 | Rm64 => {
            s.uses_modrm = true;
            s.single_operand = true;
        }
        Rm8Unity | Rm16Unity | Rm32Unity | Rm64Unity => {
            s.imm = Imm::Unity;
            s.uses_modrm = true;
            s.single_operand = true;
        }
        Rm64RegCl => {
            s.uses_modrm = true;
            s.implicit_cl = true;
            s.rx_extension = true;
        }
        Rm8Reg8 | Rm16Reg16 | Rm32Reg32 | Rm64Reg64 | Reg32Reg32 | Reg64Reg64 | Rm64Xmmreg => {
            s.uses_modrm = true;
        }
        Reg8Rm8 | Reg16Rm16 | Reg32Rm32 | Reg64Rm64 | Reg8Mem | Reg16Mem | Reg32Mem | Reg64Mem => {
            s.uses_modrm = true;
            s.direction = true;
        }
        Rm32Imm8 | Rm64Imm8 => {
            s.uses_modrm = true;
            s.imm = Imm::W8;
        }
        Rm32Imm32 | Rm64Imm32 | MemImm32 | Rm64Imm => {
            s.uses_modrm = true;
            s.imm = Imm::W32;
        }
        Rm16Imm => {
            s.uses_modrm = true;
            s.imm = Imm::W16;
        }
        RegAlImm => {
            s.imm = Imm::W8;
            s.implicit_rax = true;
        }
        RegAxImm => {
            s.imm = Imm::W16;
            s.implicit_rax = true;
        }
        RegEaxImm | RegRaxImm => {
            s.imm = Imm::W32;
            s.implicit_rax = true;
        }
        RegEaxSbytedword | RegRaxSbytedword => {
            s.imm = Imm::W8;
            s.implicit_rax = true;
        }
        Reg32Imm => s.imm = Imm::W32,
        Reg64Imm => s.imm = Imm::W64,
        Reg32Rm8 | Reg32Rm16 | Reg64Rm8 | Reg64Rm16 | Reg64Rm32 => {
            s.uses_modrm = true;
            s.direction = true;
        }
        XmmregImm => {
            s.uses_modrm = true;
            s.uses_xmm = true;
            s.imm = Imm::W8;
            s.rx_extension = true;
        }
        MemXmmreg | XmmrmXmmreg | Xmmrm128Xmmreg => {
            s.uses_modrm = true;
            s.uses_xmm = true;
        }
        XmmregMem | XmmregXmmrm | XmmregXmmrm128 => {
            s.uses_modrm = true;
            s.uses_xmm = true;
            s.direction = true;
        }
    }
    s
}

/// The data-type assignment pass: the mode names the width directly,
/// except for the XMM modes where the F3/F2/66 prefixes pick the SSE
/// scalar/packed variant.
fn data_types(mode: EncodingMode, prefixes: &Prefixes) -> (DataType, DataType, bool) {
    use DataType::*;
    use EncodingMode::*;
    match mode {
        Void => (None, None, false),
        RegAlImm | Rm8Imm | Reg8Imm | Rm8Imm8 | MemImm8 | Reg8Rm8 | Reg8Mem | Rm8Reg8 | Rm8
        | Reg8 | Rm8Unity => (Byte, None, false),
        RegAxImm | Reg16Rm16 | Reg16Mem | Rm16Reg16 | Rm16 | Reg16 | Rm16Unity | Rm16Imm => {
            (Word, None, false)
        }
        Reg32Rm8 => (Dword, Byte, true),
        Reg32Rm16 => (Dword, Word, true),
        Reg64Rm8 => (Qword, Byte, true),
        Reg64Rm16 => (Qword, Word, true),
        Reg64Rm32 => (Qword, Dword, true),
        Rm64RegCl => (Qword, Byte, true),
        Rm32Imm8 | Rm32Imm32 | Reg32Imm | Reg32Rm32 | Reg32Mem | Rm32Reg32 | Reg32Reg32 | Rm32
        | Reg32 | RegEaxImm | MemImm32 | Rm32Unity => (Dword, None, false),
        Rm64Imm8 | Rm64Imm32 | Reg64Imm | Rm64Imm | Reg64Reg64 | Reg64Rm64 | Reg64Mem
        | Rm64Reg64 | Rm64Xmmreg | RegRaxImm | Rm64 | Reg64 | ImmShort | Imm32Near | Imm64Near
        | Rm64Unity | RegEaxSbytedword | RegRaxSbytedword => (Qword, None, false),
        MemXmmreg | XmmregMem | XmmrmXmmreg | XmmregXmmrm | Xmmrm128Xmmreg | XmmregXmmrm128 => {
            let dt = if prefixes.rep {
                SseSs
            } else if prefixes.repne {
                SseSd
            } else if prefixes.osize {
                SsePd
            } else {
                SsePs
            };
            (dt, None, false)
        }
        XmmregImm => (SseSs, None, false),
    }
}

/// The integer-SSE kinds carry packed data types the prefix rule cannot
/// produce; fix them up so memory operands print at their real width.
fn override_for_kind(kind: InstKind, data_type: DataType) -> DataType {
    match kind {
        InstKind::SseMovdqa | InstKind::SseMovdqu => DataType::XmmWord,
        InstKind::Paddd | InstKind::Psrld => DataType::PDword,
        _ => data_type,
    }
}

/// Turn a 4-bit register index into a slot value, applying the high-byte
/// aliasing rule: at BYTE width with no REX prefix, indices 4..=7 name
/// ah/ch/dh/bh instead of spl/bpl/sil/dil.
fn register_slot(index: u8, width: DataType, prefixes: &Prefixes, uses_xmm: bool) -> Reg {
    if uses_xmm {
        return Reg::Xmm(index);
    }
    if prefixes.rex.is_none() && width == DataType::Byte && (4..8).contains(&index) {
        return Reg::High(index - 4);
    }
    Reg::Gpr(Gpr::from_index(index))
}

/// Decode the r/m side. A direct register (`mod=3`) is returned; an
/// addressing form is stored into `out.mem` (with `USE_MEMOP`, and
/// `USE_RIPMEM` for the `mod=0, rm=5` form) and `None` comes back.
fn parse_memory_operand(
    cur: &mut Cursor<'_>,
    out: &mut Instruction,
    mod_: u8,
    rm: u8,
    prefixes: &Prefixes,
) -> Result<Option<u8>> {
    if mod_ == MOD_DIRECT {
        return Ok(Some(prefixes.rex_b() << 3 | rm));
    }

    out.flags |= InsnFlags::USE_MEMOP;
    let mut mod_ = mod_;

    if rm == 4 {
        let sib = cur.read_u8()?;
        let (scale, index, base) = (
            sib.get_bits(6..8),
            sib.get_bits(3..6),
            sib.get_bits(0..3),
        );

        // mod=0 with base=101 drops the base and forces a disp32, which is
        // why [rbp + rcx*2] only exists as [rbp + rcx*2 + 0]
        out.mem.base = if base == 5 && mod_ == MOD_INDIRECT {
            mod_ = MOD_INDIRECT_DISP32;
            Reg::None
        } else {
            Reg::Gpr(Gpr::from_index(prefixes.rex_b() << 3 | base))
        };
        // index=100 means "no index"; the encoding cannot scale rsp
        out.mem.index = if index == 4 {
            Reg::None
        } else {
            Reg::Gpr(Gpr::from_index(prefixes.rex_x() << 3 | index))
        };
        out.mem.scale = Scale::from_bits(scale);
    } else if mod_ == MOD_INDIRECT && rm == 5 {
        // RIP-relative: disp32 against the next instruction's address
        out.flags |= InsnFlags::USE_RIPMEM;
        out.mem.disp = cur.read_u32()? as i32;
        return Ok(None);
    } else {
        out.mem.base = Reg::Gpr(Gpr::from_index(prefixes.rex_b() << 3 | rm));
        out.mem.index = Reg::None;
        out.mem.scale = Scale::X1;
    }

    if mod_ == MOD_INDIRECT_DISP8 {
        out.mem.disp = cur.read_u8()? as i8 as i32;
    } else if mod_ == MOD_INDIRECT_DISP32 {
        out.mem.disp = cur.read_u32()? as i32;
    }
    Ok(None)
}

/// Iterator over consecutive instructions in a code slice. Yields decoded
/// records until the slice is exhausted; a decode failure is yielded once
/// and ends the iteration.
pub struct Instructions<'a> {
    code: &'a [u8],
    failed: bool,
}

impl<'a> Instructions<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Self {
            code,
            failed: false,
        }
    }
}

impl Iterator for Instructions<'_> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.code.is_empty() {
            return None;
        }
        match decode(self.code) {
            Ok(inst) => {
                self.code = &self.code[inst.length..];
                Some(Ok(inst))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
