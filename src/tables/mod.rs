//! The two static decoding tables: the prefix-keyed opcode DFA and the
//! instruction descriptor table.
//!
//! The DFA is generated once, on first use, from the declarative encoding
//! list in [`encodings`]. States are 256-cell rows indexed by
//! `state_base + byte`; a cell is either empty (no transition), an edge to
//! another state, or a terminal leaf carrying the instruction kind and its
//! encoding mode. Two marks refine the walk: `plus_r` on a leaf says the
//! low three bits of the opcode byte encode a register, and `rx_dig` on an
//! edge says the next dispatch byte is the `reg` field of the upcoming
//! ModR/M byte, looked at without consuming it.

pub(crate) mod descs;
mod encodings;

use alloc::vec::Vec;
use core::fmt;

use spin::Lazy;

use descs::InstKind;
use encodings::{ENCODINGS, Encoding, Pat};

/// Operand-shape tag carried by each DFA leaf. This closed set drives the
/// interpreter: which extra bytes to read (ModR/M, immediate) and how the
/// operand slots are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    Void,
    ImmShort,
    Imm32Near,
    Imm64Near,
    Reg8Imm,
    Rm8Imm,
    Rm8Imm8,
    MemImm8,
    MemImm32,
    Rm32Imm8,
    Rm32Imm32,
    Rm64Imm8,
    Rm64Imm32,
    Rm64Imm,
    Rm16Imm,
    Reg8,
    Reg16,
    Reg32,
    Reg64,
    Rm8,
    Rm16,
    Rm32,
    Rm64,
    Rm8Unity,
    Rm16Unity,
    Rm32Unity,
    Rm64Unity,
    Rm64RegCl,
    Rm8Reg8,
    Rm16Reg16,
    Rm32Reg32,
    Rm64Reg64,
    Reg32Reg32,
    Reg64Reg64,
    Rm64Xmmreg,
    Reg8Rm8,
    Reg16Rm16,
    Reg32Rm32,
    Reg64Rm64,
    Reg8Mem,
    Reg16Mem,
    Reg32Mem,
    Reg64Mem,
    RegAlImm,
    RegAxImm,
    RegEaxImm,
    RegRaxImm,
    RegEaxSbytedword,
    RegRaxSbytedword,
    Reg32Imm,
    Reg64Imm,
    Reg32Rm8,
    Reg32Rm16,
    Reg64Rm8,
    Reg64Rm16,
    Reg64Rm32,
    XmmregImm,
    MemXmmreg,
    XmmregMem,
    XmmrmXmmreg,
    XmmregXmmrm,
    XmmregXmmrm128,
    Xmmrm128Xmmreg,
}

/// One cell of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DfaCell {
    /// No transition; the walk fails with an unknown opcode.
    Empty,
    Next {
        base: u32,
        rx_dig: bool,
    },
    Leaf {
        kind: InstKind,
        mode: EncodingMode,
        plus_r: bool,
    },
}

pub(crate) struct Tables {
    dfa: Vec<DfaCell>,
    entry: u32,
}

impl Tables {
    #[inline]
    pub fn cell(&self, state: u32, byte: u8) -> DfaCell {
        self.dfa[state as usize + byte as usize]
    }

    pub fn entry(&self) -> u32 {
        self.entry
    }
}

static TABLES: Lazy<Tables> = Lazy::new(build);

pub(crate) fn tables() -> &'static Tables {
    &TABLES
}

fn build() -> Tables {
    let mut dfa = Vec::new();
    // state 0 is the dead state: every transition out of it is empty, so a
    // pre-dispatch that finds no edge leads to an unknown-opcode result
    alloc_state(&mut dfa);
    let entry = alloc_state(&mut dfa);
    for enc in ENCODINGS {
        insert(&mut dfa, entry, enc);
    }
    debug!(
        "opcode dfa built: {} states from {} encodings",
        dfa.len() / 256,
        ENCODINGS.len()
    );
    Tables { dfa, entry }
}

fn alloc_state(dfa: &mut Vec<DfaCell>) -> u32 {
    let base = dfa.len() as u32;
    dfa.resize(dfa.len() + 256, DfaCell::Empty);
    base
}

fn insert(dfa: &mut Vec<DfaCell>, entry: u32, enc: &Encoding) {
    let mut state = entry;
    for (i, step) in enc.pattern.iter().enumerate() {
        let last = i + 1 == enc.pattern.len();
        // an Rx step marks the edge leading into it
        let rx_next = matches!(enc.pattern.get(i + 1), Some(Pat::Rx(_)));
        match *step {
            Pat::Byte(byte) if last => set_leaf(dfa, state, byte, enc, false),
            Pat::Byte(byte) => state = descend(dfa, state, byte, rx_next),
            Pat::Rx(digit) if last => set_leaf(dfa, state, digit, enc, false),
            Pat::Rx(digit) => state = descend(dfa, state, digit, rx_next),
            Pat::PlusR(base) => {
                assert!(last, "+r must terminate a pattern");
                for reg in 0..8 {
                    set_leaf(dfa, state, base + reg, enc, true);
                }
            }
            Pat::Cc(base) => {
                assert!(last, "a condition-code fan-out must terminate a pattern");
                for cond in 0..16 {
                    set_leaf(dfa, state, base + cond, enc, false);
                }
            }
        }
    }
}

fn descend(dfa: &mut Vec<DfaCell>, state: u32, byte: u8, rx_dig: bool) -> u32 {
    let idx = state as usize + byte as usize;
    match dfa[idx] {
        DfaCell::Empty => {
            let base = alloc_state(dfa);
            dfa[idx] = DfaCell::Next { base, rx_dig };
            base
        }
        DfaCell::Next {
            base,
            rx_dig: marked,
        } => {
            assert_eq!(marked, rx_dig, "conflicting rx-dig mark at {byte:#04x}");
            base
        }
        DfaCell::Leaf { .. } => panic!("encoding table conflict: {byte:#04x} is already a leaf"),
    }
}

fn set_leaf(dfa: &mut [DfaCell], state: u32, byte: u8, enc: &Encoding, plus_r: bool) {
    let idx = state as usize + byte as usize;
    let leaf = DfaCell::Leaf {
        kind: enc.kind,
        mode: enc.mode,
        plus_r,
    };
    match dfa[idx] {
        DfaCell::Empty => dfa[idx] = leaf,
        other => assert_eq!(other, leaf, "encoding table conflict at {byte:#04x}"),
    }
}

/// Render the DFA tree for debugging: one line per transition, indented by
/// depth, with `+r`/`rx` marks and the leaf mnemonic.
pub fn dump_dfa(out: &mut dyn fmt::Write) -> fmt::Result {
    let t = tables();
    dump_state(t, out, t.entry(), 0)
}

fn dump_state(t: &Tables, out: &mut dyn fmt::Write, state: u32, depth: usize) -> fmt::Result {
    for byte in 0..=0xFFu8 {
        match t.cell(state, byte) {
            DfaCell::Empty => {}
            DfaCell::Next { base, rx_dig } => {
                indent(out, depth)?;
                write!(out, "{byte:#04x}")?;
                if rx_dig {
                    out.write_str(" rx")?;
                }
                out.write_str("\n")?;
                dump_state(t, out, base, depth + 1)?;
            }
            DfaCell::Leaf { kind, plus_r, .. } => {
                indent(out, depth)?;
                write!(out, "{byte:#04x}")?;
                if plus_r {
                    out.write_str(" +r")?;
                }
                let kind = if kind.desc().has_cc {
                    kind.with_cond(byte)
                } else {
                    kind
                };
                writeln!(out, " {}", kind.desc().name)?;
            }
        }
    }
    Ok(())
}

fn indent(out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}
