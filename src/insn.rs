//! The decoded-instruction record and its operand types.

use bitflags::bitflags;

use crate::tables::descs::InstKind;

numeric_enum_macro::numeric_enum! {
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// General-purpose register indices as the hardware encodes them.
    pub enum Gpr {
        Rax = 0,
        Rcx = 1,
        Rdx = 2,
        Rbx = 3,
        Rsp = 4,
        Rbp = 5,
        Rsi = 6,
        Rdi = 7,
        R8 = 8,
        R9 = 9,
        R10 = 10,
        R11 = 11,
        R12 = 12,
        R13 = 13,
        R14 = 14,
        R15 = 15,
    }
}

impl Gpr {
    /// Build a register from a 4-bit hardware index (3 encoded bits plus
    /// one REX extension bit).
    pub(crate) fn from_index(index: u8) -> Self {
        Self::try_from(index & 0xF).unwrap_or(Gpr::Rax)
    }
}

numeric_enum_macro::numeric_enum! {
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// SIB scale factor, stored as the raw 2-bit field.
    pub enum Scale {
        X1 = 0,
        X2 = 1,
        X4 = 2,
        X8 = 3,
    }
}

impl Scale {
    pub(crate) fn from_bits(bits: u8) -> Self {
        Self::try_from(bits & 3).unwrap_or(Scale::X1)
    }

    /// The multiplier this scale applies to the index register.
    pub fn factor(self) -> u8 {
        1 << self as u8
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::X1
    }
}

/// Segment selected by an override prefix; `Default` when none was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    #[default]
    Default,
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
}

/// One register slot of an instruction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reg {
    #[default]
    None,
    Gpr(Gpr),
    /// One of the legacy high-byte registers ah/ch/dh/bh (0..=3). Only
    /// produced at BYTE width when no REX prefix was present and the
    /// decoded index was 4..=7.
    High(u8),
    Xmm(u8),
}

/// Operand width, including the SSE scalar/packed float variants selected
/// by the F3/F2/66 prefixes and the packed-integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    #[default]
    None,
    Byte,
    Word,
    Dword,
    Qword,
    PByte,
    PWord,
    PDword,
    PQword,
    /// Scalar single-precision float.
    SseSs,
    /// Scalar double-precision float.
    SseSd,
    /// Packed single-precision floats.
    SsePs,
    /// Packed double-precision floats.
    SsePd,
    /// A generic 128-bit value.
    XmmWord,
}

/// A `[base + index*scale + disp]` memory operand. `base`/`index` are
/// `Reg::None` when absent; RIP-relative operands store only `disp` (the
/// record's `USE_RIPMEM` flag marks them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemOperand {
    pub base: Reg,
    pub index: Reg,
    pub scale: Scale,
    pub disp: i32,
}

bitflags! {
    /// Packed facts about a decoded instruction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InsnFlags: u16 {
        /// The register slots hold XMM registers.
        const XMMREG = 1 << 0;
        /// A memory operand is present.
        const USE_MEMOP = 1 << 1;
        /// The memory operand is RIP-relative (`USE_MEMOP` is also set).
        const USE_RIPMEM = 1 << 2;
        /// A LOCK prefix was seen.
        const LOCK = 1 << 3;
        /// The signed 32-bit immediate is present.
        const IMMEDIATE = 1 << 4;
        /// The 64-bit absolute immediate is present (excludes `IMMEDIATE`).
        const ABSOLUTE = 1 << 5;
        /// The ModR/M reg-field operand is operand 0; the r/m side is
        /// operand 1.
        const DIRECTION = 1 << 6;
        /// `data_type2` holds the second operand's width (sign/zero
        /// extending moves, shift-by-CL).
        const TWO_DATA_TYPES = 1 << 7;
    }
}

/// A decoded instruction. Produced by [`crate::decode`], owned by the
/// caller; `length` is the exact number of bytes consumed, including every
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstKind,
    pub data_type: DataType,
    /// Second operand width, meaningful only with
    /// [`InsnFlags::TWO_DATA_TYPES`].
    pub data_type2: DataType,
    pub segment: Segment,
    pub flags: InsnFlags,
    pub length: usize,
    pub regs: [Reg; 4],
    /// Signed immediate or branch offset, with [`InsnFlags::IMMEDIATE`].
    pub imm: i32,
    /// 64-bit immediate payload, with [`InsnFlags::ABSOLUTE`].
    pub abs: u64,
    pub mem: MemOperand,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            kind: InstKind::None,
            data_type: DataType::None,
            data_type2: DataType::None,
            segment: Segment::Default,
            flags: InsnFlags::empty(),
            length: 0,
            regs: [Reg::None; 4],
            imm: 0,
            abs: 0,
            mem: MemOperand::default(),
        }
    }
}

impl Instruction {
    /// The Intel mnemonic. SSE float kinds resolve their suffix from the
    /// data type the prefixes selected.
    pub fn mnemonic(&self) -> &'static str {
        use DataType::{SsePd, SseSd, SseSs};
        use InstKind::*;
        match (self.kind, self.data_type) {
            (SseMovU, SseSs) => "movss",
            (SseMovU, SseSd) => "movsd",
            (SseMovU, SsePd) => "movupd",
            (SseMovU, _) => "movups",
            (SseMovA, SsePd) => "movapd",
            (SseMovA, _) => "movaps",
            (SseAdd, SseSs) => "addss",
            (SseAdd, SseSd) => "addsd",
            (SseAdd, SsePd) => "addpd",
            (SseAdd, _) => "addps",
            (SseMul, SseSs) => "mulss",
            (SseMul, SseSd) => "mulsd",
            (SseMul, SsePd) => "mulpd",
            (SseMul, _) => "mulps",
            (SseSub, SseSs) => "subss",
            (SseSub, SseSd) => "subsd",
            (SseSub, SsePd) => "subpd",
            (SseSub, _) => "subps",
            (SseDiv, SseSs) => "divss",
            (SseDiv, SseSd) => "divsd",
            (SseDiv, SsePd) => "divpd",
            (SseDiv, _) => "divps",
            (SseSqrt, SseSs) => "sqrtss",
            (SseSqrt, SseSd) => "sqrtsd",
            (SseSqrt, SsePd) => "sqrtpd",
            (SseSqrt, _) => "sqrtps",
            (SseRsqrt, SseSs) => "rsqrtss",
            (SseRsqrt, _) => "rsqrtps",
            (SseUcomi, SseSd | SsePd) => "ucomisd",
            (SseUcomi, _) => "ucomiss",
            (SseAnd, SsePd) => "andpd",
            (SseAnd, _) => "andps",
            (SseOr, SsePd) => "orpd",
            (SseOr, _) => "orps",
            (SseXor, SsePd) => "xorpd",
            (SseXor, _) => "xorps",
            (kind, _) => kind.desc().name,
        }
    }

    /// Walk the operand slots the way the record stores them: register
    /// slots in order, with the memory operand standing in for the slot it
    /// occupies and any immediate last.
    pub fn operands(&self) -> Operands<'_> {
        Operands {
            inst: self,
            slot: 0,
            mem_pending: self.flags.contains(InsnFlags::USE_MEMOP),
            imm_pending: self
                .flags
                .intersects(InsnFlags::IMMEDIATE | InsnFlags::ABSOLUTE),
        }
    }
}

/// One operand of a decoded instruction, as yielded by
/// [`Instruction::operands`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg {
        reg: Reg,
        width: DataType,
    },
    Mem {
        mem: MemOperand,
        width: DataType,
        segment: Segment,
    },
    /// RIP-relative memory operand; the effective address is the address
    /// of the *next* instruction plus `disp`.
    Rip {
        disp: i32,
        width: DataType,
        segment: Segment,
    },
    Imm(i32),
    /// Branch displacement relative to the next instruction.
    Offset(i32),
    Abs(u64),
}

/// Iterator over an instruction's operands.
pub struct Operands<'a> {
    inst: &'a Instruction,
    slot: usize,
    mem_pending: bool,
    imm_pending: bool,
}

impl Iterator for Operands<'_> {
    type Item = Operand;

    fn next(&mut self) -> Option<Operand> {
        let inst = self.inst;
        while self.slot < inst.regs.len() {
            let slot = self.slot;
            self.slot += 1;
            let width = if inst.flags.contains(InsnFlags::TWO_DATA_TYPES) && slot == 1 {
                inst.data_type2
            } else {
                inst.data_type
            };
            match inst.regs[slot] {
                Reg::None => {
                    if self.mem_pending {
                        self.mem_pending = false;
                        let op = if inst.flags.contains(InsnFlags::USE_RIPMEM) {
                            Operand::Rip {
                                disp: inst.mem.disp,
                                width,
                                segment: inst.segment,
                            }
                        } else {
                            Operand::Mem {
                                mem: inst.mem,
                                width,
                                segment: inst.segment,
                            }
                        };
                        return Some(op);
                    } else if self.imm_pending {
                        self.imm_pending = false;
                        let op = if inst.flags.contains(InsnFlags::ABSOLUTE) {
                            Operand::Abs(inst.abs)
                        } else if inst.kind.is_branch() {
                            Operand::Offset(inst.imm)
                        } else {
                            Operand::Imm(inst.imm)
                        };
                        return Some(op);
                    } else {
                        self.slot = inst.regs.len();
                        return None;
                    }
                }
                reg => return Some(Operand::Reg { reg, width }),
            }
        }
        None
    }
}
