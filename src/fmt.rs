//! Intel-syntax pretty printing.
//!
//! The output is lossy by design: zero displacements are elided and
//! numbers print as lower-case hex with an `h` suffix, so text does not
//! round-trip through an assembler expecting NASM or MASM exactly.

use core::fmt::{self, Display, Formatter};

use crate::insn::{DataType, Gpr, InsnFlags, Instruction, MemOperand, Operand, Reg, Segment};

const GPR_NAMES: [[&str; 16]; 4] = [
    [
        "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
        "r13b", "r14b", "r15b",
    ],
    [
        "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w",
        "r13w", "r14w", "r15w",
    ],
    [
        "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d",
        "r12d", "r13d", "r14d", "r15d",
    ],
    [
        "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
        "r13", "r14", "r15",
    ],
];

const HIGH_NAMES: [&str; 4] = ["ah", "ch", "dh", "bh"];

fn gpr_name(gpr: Gpr, width: DataType) -> &'static str {
    let row = match width {
        DataType::Byte => 0,
        DataType::Word => 1,
        DataType::Dword | DataType::SseSs => 2,
        _ => 3,
    };
    GPR_NAMES[row][gpr as usize]
}

/// Base and index registers always render at full width.
fn addr_reg_name(reg: Reg) -> &'static str {
    match reg {
        Reg::Gpr(gpr) => gpr_name(gpr, DataType::Qword),
        _ => "",
    }
}

/// Signed value as `1fh` / `-1fh`.
struct SignedHex(i64);

impl Display for SignedHex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{:x}h", -self.0)
        } else {
            write!(f, "{:x}h", self.0)
        }
    }
}

impl Display for DataType {
    /// The width keyword used ahead of memory operands.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::None => "none",
            DataType::Byte => "byte",
            DataType::Word => "word",
            DataType::Dword | DataType::SseSs => "dword",
            DataType::Qword | DataType::SseSd => "qword",
            _ => "xmmword",
        })
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Default => "",
            Segment::Es => "es",
            Segment::Cs => "cs",
            Segment::Ss => "ss",
            Segment::Ds => "ds",
            Segment::Fs => "fs",
            Segment::Gs => "gs",
        })
    }
}

impl Display for MemOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn disp_tail(f: &mut Formatter<'_>, disp: i32) -> fmt::Result {
            if disp < 0 {
                write!(f, "-{:x}h", -(disp as i64))
            } else if disp > 0 {
                write!(f, "+{:x}h", disp)
            } else {
                Ok(())
            }
        }

        f.write_str("[")?;
        match (self.base, self.index) {
            (Reg::None, Reg::None) => write!(f, "{:x}h", self.disp as u32)?,
            (base, Reg::None) => {
                f.write_str(addr_reg_name(base))?;
                disp_tail(f, self.disp)?;
            }
            (Reg::None, index) => {
                write!(f, "{}*{}", addr_reg_name(index), self.scale.factor())?;
                disp_tail(f, self.disp)?;
            }
            (base, index) => {
                write!(
                    f,
                    "{}+{}*{}",
                    addr_reg_name(base),
                    addr_reg_name(index),
                    self.scale.factor()
                )?;
                disp_tail(f, self.disp)?;
            }
        }
        f.write_str("]")
    }
}

fn write_mem_prefix(f: &mut Formatter<'_>, width: DataType, segment: Segment) -> fmt::Result {
    write!(f, "{width} ptr ")?;
    if segment != Segment::Default {
        write!(f, "{segment}:")?;
    }
    Ok(())
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Operand::Reg { reg, width } => match reg {
                Reg::None => Ok(()),
                Reg::Gpr(gpr) => f.write_str(gpr_name(gpr, width)),
                Reg::High(index) => f.write_str(HIGH_NAMES[index as usize & 3]),
                Reg::Xmm(index) => write!(f, "xmm{index}"),
            },
            Operand::Mem { mem, width, segment } => {
                write_mem_prefix(f, width, segment)?;
                mem.fmt(f)
            }
            Operand::Rip { disp, width, segment } => {
                write_mem_prefix(f, width, segment)?;
                if disp == 0 {
                    f.write_str("[rip]")
                } else if disp < 0 {
                    write!(f, "[rip - {:x}h]", -(disp as i64))
                } else {
                    write!(f, "[rip + {disp:x}h]")
                }
            }
            Operand::Imm(value) => SignedHex(value as i64).fmt(f),
            Operand::Offset(value) => write!(f, "{value:+}"),
            Operand::Abs(value) => write!(f, "{value:x}h"),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.flags.contains(InsnFlags::LOCK) {
            f.write_str("lock ")?;
        }
        f.write_str(self.mnemonic())?;
        for (i, op) in self.operands().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            op.fmt(f)?;
        }
        Ok(())
    }
}

/// One listing line: a 16-digit address column, up to six raw bytes, the
/// mnemonic padded to twelve columns, then the operands. Instructions
/// longer than six bytes continue their raw bytes on follow-up rows.
/// Because the line knows its address, RIP-relative operands and branch
/// offsets resolve to absolute targets.
pub struct DisplayLine<'a> {
    addr: u64,
    bytes: &'a [u8],
    inst: &'a Instruction,
}

impl<'a> DisplayLine<'a> {
    /// `bytes` is the code buffer starting at the instruction; only the
    /// instruction's own bytes are rendered.
    pub fn new(addr: u64, bytes: &'a [u8], inst: &'a Instruction) -> Self {
        Self { addr, bytes, inst }
    }
}

impl Display for DisplayLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let raw = &self.bytes[..self.inst.length.min(self.bytes.len())];

        write!(f, "    {:016X}: ", self.addr)?;
        for i in 0..6 {
            match raw.get(i) {
                Some(byte) => write!(f, "{byte:02X} ")?,
                None => f.write_str("   ")?,
            }
        }

        let lock = self.inst.flags.contains(InsnFlags::LOCK);
        let mnemonic = self.inst.mnemonic();
        if lock {
            f.write_str("lock ")?;
        }
        f.write_str(mnemonic)?;
        let written = mnemonic.len() + if lock { 5 } else { 0 };
        for _ in written..12 {
            f.write_str(" ")?;
        }

        let next_addr = self.addr.wrapping_add(self.inst.length as u64);
        for (i, op) in self.inst.operands().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match op {
                Operand::Rip { disp, width, segment } => {
                    write_mem_prefix(f, width, segment)?;
                    write!(f, "[{:016X}h]", next_addr.wrapping_add(disp as i64 as u64))?;
                }
                Operand::Offset(value) => {
                    write!(f, "{:016X}", next_addr.wrapping_add(value as i64 as u64))?;
                }
                op => op.fmt(f)?,
            }
        }

        if raw.len() > 6 {
            for chunk in raw[6..].chunks(6) {
                f.write_str("\n                      ")?;
                for byte in chunk {
                    write!(f, "{byte:02X} ")?;
                }
            }
        }
        Ok(())
    }
}
