//! Unit tests for the decoder and formatter.

mod formatter;
mod memory_operands;
mod prefixes;
mod properties;
mod tables;

use crate::{Instruction, decode};

pub(crate) fn decode_ok(bytes: &[u8]) -> Instruction {
    match decode(bytes) {
        Ok(inst) => inst,
        Err(err) => panic!("decode of {bytes:02x?} failed: {err}"),
    }
}
