//! Declarative encoding list the opcode DFA is generated from.
//!
//! Each entry is a byte pattern (read left to right from the entry state),
//! the instruction kind its leaf reports, and the encoding mode that
//! drives operand resolution. Pattern elements:
//!
//! - `B(byte)` — a literal opcode (or table-keying prefix) byte;
//! - `P(base)` — a `+r` opcode: eight leaves at `base..base+8`, each
//!   marked so the low three opcode bits name a register;
//! - `D(digit)` — a ModR/M `reg`-field opcode extension ("/digit"); the
//!   preceding edge is marked rx-dig so the driver peeks the ModR/M byte;
//! - `CC(base)` — a condition-code fan-out: sixteen leaves at
//!   `base..base+16` all reporting the family's base kind.
//!
//! Prefix-selected forms simply spell the prefix byte first (`0x66`,
//! `0x48` for REX.W, `0xF3`, `0xF2`), matching the driver's pre-dispatch
//! order.

use super::EncodingMode::{self, *};
use super::descs::InstKind::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pat {
    Byte(u8),
    PlusR(u8),
    Rx(u8),
    Cc(u8),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Encoding {
    pub pattern: &'static [Pat],
    pub kind: InstKind,
    pub mode: EncodingMode,
}

const fn e(pattern: &'static [Pat], kind: InstKind, mode: EncodingMode) -> Encoding {
    Encoding {
        pattern,
        kind,
        mode,
    }
}

use Pat::{Byte as B, Cc as CC, PlusR as P, Rx as D};

pub(crate) static ENCODINGS: &[Encoding] = &[
    // -- add / or / and / sub / xor / cmp ------------------------------
    e(&[B(0x00)], Add, Rm8Reg8),
    e(&[B(0x01)], Add, Rm32Reg32),
    e(&[B(0x66), B(0x01)], Add, Rm16Reg16),
    e(&[B(0x48), B(0x01)], Add, Rm64Reg64),
    e(&[B(0x02)], Add, Reg8Rm8),
    e(&[B(0x03)], Add, Reg32Rm32),
    e(&[B(0x66), B(0x03)], Add, Reg16Rm16),
    e(&[B(0x48), B(0x03)], Add, Reg64Rm64),
    e(&[B(0x04)], Add, RegAlImm),
    e(&[B(0x05)], Add, RegEaxImm),
    e(&[B(0x66), B(0x05)], Add, RegAxImm),
    e(&[B(0x48), B(0x05)], Add, RegRaxImm),
    e(&[B(0x80), D(0)], Add, Rm8Imm),
    e(&[B(0x81), D(0)], Add, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(0)], Add, Rm16Imm),
    e(&[B(0x48), B(0x81), D(0)], Add, Rm64Imm32),
    e(&[B(0x83), D(0)], Add, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(0)], Add, Rm64Imm8),
    e(&[B(0x08)], Or, Rm8Reg8),
    e(&[B(0x09)], Or, Rm32Reg32),
    e(&[B(0x66), B(0x09)], Or, Rm16Reg16),
    e(&[B(0x48), B(0x09)], Or, Rm64Reg64),
    e(&[B(0x0A)], Or, Reg8Rm8),
    e(&[B(0x0B)], Or, Reg32Rm32),
    e(&[B(0x66), B(0x0B)], Or, Reg16Rm16),
    e(&[B(0x48), B(0x0B)], Or, Reg64Rm64),
    e(&[B(0x0C)], Or, RegAlImm),
    e(&[B(0x0D)], Or, RegEaxImm),
    e(&[B(0x66), B(0x0D)], Or, RegAxImm),
    e(&[B(0x48), B(0x0D)], Or, RegRaxImm),
    e(&[B(0x80), D(1)], Or, Rm8Imm),
    e(&[B(0x81), D(1)], Or, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(1)], Or, Rm16Imm),
    e(&[B(0x48), B(0x81), D(1)], Or, Rm64Imm32),
    e(&[B(0x83), D(1)], Or, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(1)], Or, Rm64Imm8),
    e(&[B(0x20)], And, Rm8Reg8),
    e(&[B(0x21)], And, Rm32Reg32),
    e(&[B(0x66), B(0x21)], And, Rm16Reg16),
    e(&[B(0x48), B(0x21)], And, Rm64Reg64),
    e(&[B(0x22)], And, Reg8Rm8),
    e(&[B(0x23)], And, Reg32Rm32),
    e(&[B(0x66), B(0x23)], And, Reg16Rm16),
    e(&[B(0x48), B(0x23)], And, Reg64Rm64),
    e(&[B(0x24)], And, RegAlImm),
    e(&[B(0x25)], And, RegEaxImm),
    e(&[B(0x66), B(0x25)], And, RegAxImm),
    e(&[B(0x48), B(0x25)], And, RegRaxImm),
    e(&[B(0x80), D(4)], And, Rm8Imm),
    e(&[B(0x81), D(4)], And, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(4)], And, Rm16Imm),
    e(&[B(0x48), B(0x81), D(4)], And, Rm64Imm32),
    e(&[B(0x83), D(4)], And, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(4)], And, Rm64Imm8),
    e(&[B(0x28)], Sub, Rm8Reg8),
    e(&[B(0x29)], Sub, Rm32Reg32),
    e(&[B(0x66), B(0x29)], Sub, Rm16Reg16),
    e(&[B(0x48), B(0x29)], Sub, Rm64Reg64),
    e(&[B(0x2A)], Sub, Reg8Rm8),
    e(&[B(0x2B)], Sub, Reg32Rm32),
    e(&[B(0x66), B(0x2B)], Sub, Reg16Rm16),
    e(&[B(0x48), B(0x2B)], Sub, Reg64Rm64),
    e(&[B(0x2C)], Sub, RegAlImm),
    e(&[B(0x2D)], Sub, RegEaxImm),
    e(&[B(0x66), B(0x2D)], Sub, RegAxImm),
    e(&[B(0x48), B(0x2D)], Sub, RegRaxImm),
    e(&[B(0x80), D(5)], Sub, Rm8Imm),
    e(&[B(0x81), D(5)], Sub, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(5)], Sub, Rm16Imm),
    e(&[B(0x48), B(0x81), D(5)], Sub, Rm64Imm32),
    e(&[B(0x83), D(5)], Sub, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(5)], Sub, Rm64Imm8),
    e(&[B(0x30)], Xor, Rm8Reg8),
    e(&[B(0x31)], Xor, Rm32Reg32),
    e(&[B(0x66), B(0x31)], Xor, Rm16Reg16),
    e(&[B(0x48), B(0x31)], Xor, Rm64Reg64),
    e(&[B(0x32)], Xor, Reg8Rm8),
    e(&[B(0x33)], Xor, Reg32Rm32),
    e(&[B(0x66), B(0x33)], Xor, Reg16Rm16),
    e(&[B(0x48), B(0x33)], Xor, Reg64Rm64),
    e(&[B(0x34)], Xor, RegAlImm),
    e(&[B(0x35)], Xor, RegEaxImm),
    e(&[B(0x66), B(0x35)], Xor, RegAxImm),
    e(&[B(0x48), B(0x35)], Xor, RegRaxImm),
    e(&[B(0x80), D(6)], Xor, Rm8Imm),
    e(&[B(0x81), D(6)], Xor, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(6)], Xor, Rm16Imm),
    e(&[B(0x48), B(0x81), D(6)], Xor, Rm64Imm32),
    e(&[B(0x83), D(6)], Xor, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(6)], Xor, Rm64Imm8),
    e(&[B(0x38)], Cmp, Rm8Reg8),
    e(&[B(0x39)], Cmp, Rm32Reg32),
    e(&[B(0x66), B(0x39)], Cmp, Rm16Reg16),
    e(&[B(0x48), B(0x39)], Cmp, Rm64Reg64),
    e(&[B(0x3A)], Cmp, Reg8Rm8),
    e(&[B(0x3B)], Cmp, Reg32Rm32),
    e(&[B(0x66), B(0x3B)], Cmp, Reg16Rm16),
    e(&[B(0x48), B(0x3B)], Cmp, Reg64Rm64),
    e(&[B(0x3C)], Cmp, RegAlImm),
    e(&[B(0x3D)], Cmp, RegEaxImm),
    e(&[B(0x66), B(0x3D)], Cmp, RegAxImm),
    e(&[B(0x48), B(0x3D)], Cmp, RegRaxImm),
    e(&[B(0x80), D(7)], Cmp, Rm8Imm),
    e(&[B(0x81), D(7)], Cmp, Rm32Imm32),
    e(&[B(0x66), B(0x81), D(7)], Cmp, Rm16Imm),
    e(&[B(0x48), B(0x81), D(7)], Cmp, Rm64Imm32),
    e(&[B(0x83), D(7)], Cmp, Rm32Imm8),
    e(&[B(0x48), B(0x83), D(7)], Cmp, Rm64Imm8),
    // -- mov -----------------------------------------------------------
    e(&[B(0x88)], Mov, Rm8Reg8),
    e(&[B(0x89)], Mov, Rm32Reg32),
    e(&[B(0x66), B(0x89)], Mov, Rm16Reg16),
    e(&[B(0x48), B(0x89)], Mov, Rm64Reg64),
    e(&[B(0x8A)], Mov, Reg8Rm8),
    e(&[B(0x8B)], Mov, Reg32Rm32),
    e(&[B(0x66), B(0x8B)], Mov, Reg16Rm16),
    e(&[B(0x48), B(0x8B)], Mov, Reg64Rm64),
    e(&[P(0xB0)], Mov, Reg8Imm),
    e(&[P(0xB8)], Mov, Reg32Imm),
    e(&[B(0x48), P(0xB8)], Mov, Reg64Imm),
    e(&[B(0xC6), D(0)], Mov, Rm8Imm),
    e(&[B(0xC7), D(0)], Mov, MemImm32),
    e(&[B(0x66), B(0xC7), D(0)], Mov, Rm16Imm),
    e(&[B(0x48), B(0xC7), D(0)], Mov, Rm64Imm),
    // -- widening moves ------------------------------------------------
    e(&[B(0x0F), B(0xBE)], Movsx, Reg32Rm8),
    e(&[B(0x48), B(0x0F), B(0xBE)], Movsx, Reg64Rm8),
    e(&[B(0x0F), B(0xBF)], Movsx, Reg32Rm16),
    e(&[B(0x48), B(0x0F), B(0xBF)], Movsx, Reg64Rm16),
    e(&[B(0x0F), B(0xB6)], Movzx, Reg32Rm8),
    e(&[B(0x48), B(0x0F), B(0xB6)], Movzx, Reg64Rm8),
    e(&[B(0x0F), B(0xB7)], Movzx, Reg32Rm16),
    e(&[B(0x48), B(0x0F), B(0xB7)], Movzx, Reg64Rm16),
    e(&[B(0x48), B(0x63)], Movsxd, Reg64Rm32),
    // -- lea -----------------------------------------------------------
    e(&[B(0x8D)], Lea, Reg32Mem),
    e(&[B(0x66), B(0x8D)], Lea, Reg16Mem),
    e(&[B(0x48), B(0x8D)], Lea, Reg64Mem),
    // -- test ----------------------------------------------------------
    e(&[B(0x84)], Test, Rm8Reg8),
    e(&[B(0x85)], Test, Rm32Reg32),
    e(&[B(0x66), B(0x85)], Test, Rm16Reg16),
    e(&[B(0x48), B(0x85)], Test, Rm64Reg64),
    e(&[B(0xA8)], Test, RegAlImm),
    e(&[B(0xA9)], Test, RegEaxImm),
    e(&[B(0x48), B(0xA9)], Test, RegRaxImm),
    e(&[B(0xF6), D(0)], Test, Rm8Imm),
    e(&[B(0xF7), D(0)], Test, MemImm32),
    e(&[B(0x48), B(0xF7), D(0)], Test, Rm64Imm),
    // -- unary group 3 -------------------------------------------------
    e(&[B(0xF6), D(2)], Not, Rm8),
    e(&[B(0xF7), D(2)], Not, Rm32),
    e(&[B(0x48), B(0xF7), D(2)], Not, Rm64),
    e(&[B(0xF6), D(3)], Neg, Rm8),
    e(&[B(0xF7), D(3)], Neg, Rm32),
    e(&[B(0x48), B(0xF7), D(3)], Neg, Rm64),
    e(&[B(0xF6), D(4)], Mul, Rm8),
    e(&[B(0xF7), D(4)], Mul, Rm32),
    e(&[B(0x48), B(0xF7), D(4)], Mul, Rm64),
    e(&[B(0xF6), D(5)], Imul, Rm8),
    e(&[B(0xF7), D(5)], Imul, Rm32),
    e(&[B(0x48), B(0xF7), D(5)], Imul, Rm64),
    e(&[B(0xF6), D(6)], Div, Rm8),
    e(&[B(0xF7), D(6)], Div, Rm32),
    e(&[B(0x48), B(0xF7), D(6)], Div, Rm64),
    e(&[B(0xF6), D(7)], Idiv, Rm8),
    e(&[B(0xF7), D(7)], Idiv, Rm32),
    e(&[B(0x48), B(0xF7), D(7)], Idiv, Rm64),
    e(&[B(0x0F), B(0xAF)], Imul, Reg32Rm32),
    e(&[B(0x66), B(0x0F), B(0xAF)], Imul, Reg16Rm16),
    e(&[B(0x48), B(0x0F), B(0xAF)], Imul, Reg64Rm64),
    // -- inc / dec -----------------------------------------------------
    e(&[B(0xFE), D(0)], Inc, Rm8),
    e(&[B(0xFF), D(0)], Inc, Rm32),
    e(&[B(0x48), B(0xFF), D(0)], Inc, Rm64),
    e(&[B(0xFE), D(1)], Dec, Rm8),
    e(&[B(0xFF), D(1)], Dec, Rm32),
    e(&[B(0x48), B(0xFF), D(1)], Dec, Rm64),
    // -- shifts and rotates --------------------------------------------
    e(&[B(0xC0), D(0)], Rol, Rm8Imm8),
    e(&[B(0xC1), D(0)], Rol, Rm32Imm8),
    e(&[B(0x48), B(0xC1), D(0)], Rol, Rm64Imm8),
    e(&[B(0xD0), D(0)], Rol, Rm8Unity),
    e(&[B(0xD1), D(0)], Rol, Rm32Unity),
    e(&[B(0x66), B(0xD1), D(0)], Rol, Rm16Unity),
    e(&[B(0x48), B(0xD1), D(0)], Rol, Rm64Unity),
    e(&[B(0x48), B(0xD3), D(0)], Rol, Rm64RegCl),
    e(&[B(0xC0), D(1)], Ror, Rm8Imm8),
    e(&[B(0xC1), D(1)], Ror, Rm32Imm8),
    e(&[B(0x48), B(0xC1), D(1)], Ror, Rm64Imm8),
    e(&[B(0xD0), D(1)], Ror, Rm8Unity),
    e(&[B(0xD1), D(1)], Ror, Rm32Unity),
    e(&[B(0x66), B(0xD1), D(1)], Ror, Rm16Unity),
    e(&[B(0x48), B(0xD1), D(1)], Ror, Rm64Unity),
    e(&[B(0x48), B(0xD3), D(1)], Ror, Rm64RegCl),
    e(&[B(0xC0), D(4)], Shl, Rm8Imm8),
    e(&[B(0xC1), D(4)], Shl, Rm32Imm8),
    e(&[B(0x48), B(0xC1), D(4)], Shl, Rm64Imm8),
    e(&[B(0xD0), D(4)], Shl, Rm8Unity),
    e(&[B(0xD1), D(4)], Shl, Rm32Unity),
    e(&[B(0x66), B(0xD1), D(4)], Shl, Rm16Unity),
    e(&[B(0x48), B(0xD1), D(4)], Shl, Rm64Unity),
    e(&[B(0x48), B(0xD3), D(4)], Shl, Rm64RegCl),
    e(&[B(0xC0), D(5)], Shr, Rm8Imm8),
    e(&[B(0xC1), D(5)], Shr, Rm32Imm8),
    e(&[B(0x48), B(0xC1), D(5)], Shr, Rm64Imm8),
    e(&[B(0xD0), D(5)], Shr, Rm8Unity),
    e(&[B(0xD1), D(5)], Shr, Rm32Unity),
    e(&[B(0x66), B(0xD1), D(5)], Shr, Rm16Unity),
    e(&[B(0x48), B(0xD1), D(5)], Shr, Rm64Unity),
    e(&[B(0x48), B(0xD3), D(5)], Shr, Rm64RegCl),
    e(&[B(0xC0), D(7)], Sar, Rm8Imm8),
    e(&[B(0xC1), D(7)], Sar, Rm32Imm8),
    e(&[B(0x48), B(0xC1), D(7)], Sar, Rm64Imm8),
    e(&[B(0xD0), D(7)], Sar, Rm8Unity),
    e(&[B(0xD1), D(7)], Sar, Rm32Unity),
    e(&[B(0x66), B(0xD1), D(7)], Sar, Rm16Unity),
    e(&[B(0x48), B(0xD1), D(7)], Sar, Rm64Unity),
    e(&[B(0x48), B(0xD3), D(7)], Sar, Rm64RegCl),
    // -- stack ---------------------------------------------------------
    e(&[P(0x50)], Push, Reg64),
    e(&[P(0x58)], Pop, Reg64),
    e(&[B(0xFF), D(6)], Push, Rm64),
    e(&[B(0x8F), D(0)], Pop, Rm64),
    // -- control flow and no-ops ---------------------------------------
    e(&[B(0x90)], Nop, Void),
    e(&[B(0x0F), B(0x1F), D(0)], Nop, Rm32),
    e(&[B(0x66), B(0x0F), B(0x1F), D(0)], Nop, Rm16),
    e(&[B(0xC3)], Ret, Void),
    e(&[B(0xCC)], Int3, Void),
    e(&[B(0xCD)], Int, ImmShort),
    e(&[B(0xE8)], Call, Imm64Near),
    e(&[B(0xFF), D(2)], Call, Rm64),
    e(&[B(0xE9)], Jmp, Imm64Near),
    e(&[B(0xEB)], Jmp, ImmShort),
    e(&[B(0xFF), D(4)], Jmp, Rm64),
    e(&[CC(0x70)], Jo, ImmShort),
    e(&[B(0x0F), CC(0x80)], Jo, Imm32Near),
    e(&[B(0x0F), CC(0x40)], CmovO, Reg32Rm32),
    e(&[B(0x66), B(0x0F), CC(0x40)], CmovO, Reg16Rm16),
    e(&[B(0x48), B(0x0F), CC(0x40)], CmovO, Reg64Rm64),
    e(&[B(0x0F), CC(0x90)], SetO, Rm8),
    // -- sse, float ----------------------------------------------------
    e(&[B(0x0F), B(0x10)], SseMovU, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x10)], SseMovU, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x10)], SseMovU, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x10)], SseMovU, XmmregXmmrm),
    e(&[B(0x0F), B(0x11)], SseMovU, XmmrmXmmreg),
    e(&[B(0x66), B(0x0F), B(0x11)], SseMovU, XmmrmXmmreg),
    e(&[B(0xF3), B(0x0F), B(0x11)], SseMovU, XmmrmXmmreg),
    e(&[B(0xF2), B(0x0F), B(0x11)], SseMovU, XmmrmXmmreg),
    e(&[B(0x0F), B(0x28)], SseMovA, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x28)], SseMovA, XmmregXmmrm128),
    e(&[B(0x0F), B(0x29)], SseMovA, Xmmrm128Xmmreg),
    e(&[B(0x66), B(0x0F), B(0x29)], SseMovA, Xmmrm128Xmmreg),
    e(&[B(0x0F), B(0x2E)], SseUcomi, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x2E)], SseUcomi, XmmregXmmrm),
    e(&[B(0x0F), B(0x51)], SseSqrt, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x51)], SseSqrt, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x51)], SseSqrt, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x51)], SseSqrt, XmmregXmmrm),
    e(&[B(0x0F), B(0x52)], SseRsqrt, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x52)], SseRsqrt, XmmregXmmrm),
    e(&[B(0x0F), B(0x54)], SseAnd, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x54)], SseAnd, XmmregXmmrm128),
    e(&[B(0x0F), B(0x56)], SseOr, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x56)], SseOr, XmmregXmmrm128),
    e(&[B(0x0F), B(0x57)], SseXor, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x57)], SseXor, XmmregXmmrm128),
    e(&[B(0x0F), B(0x58)], SseAdd, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x58)], SseAdd, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x58)], SseAdd, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x58)], SseAdd, XmmregXmmrm),
    e(&[B(0x0F), B(0x59)], SseMul, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x59)], SseMul, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x59)], SseMul, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x59)], SseMul, XmmregXmmrm),
    e(&[B(0x0F), B(0x5C)], SseSub, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x5C)], SseSub, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x5C)], SseSub, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x5C)], SseSub, XmmregXmmrm),
    e(&[B(0x0F), B(0x5E)], SseDiv, XmmregXmmrm),
    e(&[B(0x66), B(0x0F), B(0x5E)], SseDiv, XmmregXmmrm),
    e(&[B(0xF3), B(0x0F), B(0x5E)], SseDiv, XmmregXmmrm),
    e(&[B(0xF2), B(0x0F), B(0x5E)], SseDiv, XmmregXmmrm),
    // -- sse, integer --------------------------------------------------
    e(&[B(0x66), B(0x0F), B(0x6F)], SseMovdqa, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x7F)], SseMovdqa, Xmmrm128Xmmreg),
    e(&[B(0xF3), B(0x0F), B(0x6F)], SseMovdqu, XmmregXmmrm128),
    e(&[B(0xF3), B(0x0F), B(0x7F)], SseMovdqu, Xmmrm128Xmmreg),
    e(&[B(0x66), B(0x0F), B(0xFE)], Paddd, XmmregXmmrm128),
    e(&[B(0x66), B(0x0F), B(0x72), D(2)], Psrld, XmmregImm),
    // movq between a 64-bit gpr/memory and an xmm register
    e(&[B(0x66), B(0x48), B(0x0F), B(0x7E)], Movq, Rm64Xmmreg),
];
