#![no_std]
#![doc = include_str!("../README.md")]

#[macro_use]
extern crate log;

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests;

mod cursor;
mod decode;
mod insn;
mod prefix;
pub(crate) mod tables;

cfg_if::cfg_if! {
    if #[cfg(feature = "fmt")] {
        mod fmt;
        pub use fmt::DisplayLine;
    }
}

pub use decode::{Instructions, decode};
pub use insn::{
    DataType, Gpr, InsnFlags, Instruction, MemOperand, Operand, Operands, Reg, Scale, Segment,
};
pub use tables::descs::{InstDesc, InstKind};
pub use tables::{EncodingMode, dump_dfa};

/// Why a decode stopped without producing an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read would have run past the end of the input buffer.
    OutOfSpace,
    /// The opcode walk reached a byte sequence with no table entry: either
    /// a genuinely illegal encoding or one outside the supported subset.
    UnknownOpcode,
    /// A reserved ModR/M `reg` extension. Retained for API stability; the
    /// table-driven path reports these as [`ErrorKind::UnknownOpcode`].
    InvalidRx,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ErrorKind::OutOfSpace => "out of space",
            ErrorKind::UnknownOpcode => "unknown opcode",
            ErrorKind::InvalidRx => "invalid rx",
        })
    }
}

/// A failed decode. `length` is the number of bytes consumed before the
/// error was detected, so callers can report the offending byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub length: usize,
}

impl DecodeError {
    pub(crate) const fn out_of_space(length: usize) -> Self {
        Self {
            kind: ErrorKind::OutOfSpace,
            length,
        }
    }

    pub(crate) const fn unknown_opcode(length: usize) -> Self {
        Self {
            kind: ErrorKind::UnknownOpcode,
            length,
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} after {} bytes", self.kind, self.length)
    }
}

impl core::error::Error for DecodeError {}

pub type Result<T> = core::result::Result<T, DecodeError>;
