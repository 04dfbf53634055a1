//! Whole-decoder invariants checked across instruction corpora.

use alloc::vec::Vec;

use super::decode_ok;
use crate::{Gpr, InsnFlags, Instructions, Reg, Scale, decode};

/// A small stream of back-to-back encodings of varied shapes.
const STREAM: &[&[u8]] = &[
    &[0xF3, 0x0F, 0x1E, 0xFA],
    &[0x55],
    &[0x48, 0x89, 0xD8],
    &[0x48, 0x83, 0xC4, 0x10],
    &[0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00],
    &[0x0F, 0x84, 0x00, 0x01, 0x00, 0x00],
    &[0xF3, 0x0F, 0x10, 0x44, 0x24, 0x04],
    &[0x48, 0xB8, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11],
    &[0x66, 0x90],
    &[0x5D],
    &[0xC3],
];

#[test]
fn test_length_conservation() {
    let mut code = Vec::new();
    for enc in STREAM {
        code.extend_from_slice(enc);
    }

    let mut offset = 0;
    for (i, inst) in Instructions::new(&code).enumerate() {
        let inst = inst.expect("stream decodes cleanly");
        // each record's length matches the encoding it was built from
        assert_eq!(inst.length, STREAM[i].len(), "instruction {i}");
        offset += inst.length;
    }
    assert_eq!(offset, code.len());
}

#[test]
fn test_immediate_and_absolute_are_exclusive() {
    for enc in STREAM {
        let inst = decode_ok(enc);
        assert!(
            !inst
                .flags
                .contains(InsnFlags::IMMEDIATE | InsnFlags::ABSOLUTE),
            "both immediate flags set for {enc:02x?}"
        );
    }
}

#[test]
fn test_ripmem_canonical_form() {
    for enc in [
        &[0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00][..],
        &[0x8B, 0x0D, 0xF0, 0xFF, 0xFF, 0xFF][..],
        &[0xC7, 0x05, 0x00, 0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00][..],
    ] {
        let inst = decode_ok(enc);
        assert!(inst.flags.contains(InsnFlags::USE_RIPMEM));
        assert!(inst.flags.contains(InsnFlags::USE_MEMOP));
        assert_eq!(inst.mem.base, Reg::None);
        assert_eq!(inst.mem.index, Reg::None);
        assert_eq!(inst.mem.scale, Scale::X1);
    }
}

#[test]
fn test_memop_excludes_register_in_its_slot() {
    for enc in STREAM {
        let inst = decode_ok(enc);
        if inst.flags.contains(InsnFlags::USE_MEMOP) {
            let mem_slot = if inst.flags.contains(InsnFlags::DIRECTION) {
                1
            } else {
                0
            };
            assert_eq!(inst.regs[mem_slot], Reg::None, "for {enc:02x?}");
        }
    }
}

#[test]
fn test_high_byte_aliasing() {
    // no REX: index 4 at byte width is ah
    assert_eq!(decode_ok(&[0x88, 0xE0]).regs[1], Reg::High(0));
    // any REX present: the same index is spl
    assert_eq!(decode_ok(&[0x40, 0x88, 0xE0]).regs[1], Reg::Gpr(Gpr::Rsp));
    // indices below 4 never alias
    assert_eq!(decode_ok(&[0x88, 0xC8]).regs[1], Reg::Gpr(Gpr::Rcx));
}

#[test]
fn test_single_byte_sweep_never_panics() {
    for byte in 0..=0xFFu8 {
        if let Ok(inst) = decode(&[byte]) {
            assert_eq!(inst.length, 1, "byte {byte:#04x}");
        } else {
            let err = decode(&[byte]).unwrap_err();
            assert!(err.length <= 1, "byte {byte:#04x}");
        }
    }
}
