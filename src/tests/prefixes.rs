//! Prefix handling at the whole-instruction level.

use alloc::string::ToString;

use super::decode_ok;
use crate::{DataType, Segment};

#[test]
fn test_repeated_rex_keeps_last() {
    // only the last REX byte counts, so 48 49 8B 03 decodes like 49 8B 03
    let with_two = decode_ok(&[0x48, 0x49, 0x8B, 0x03]);
    let with_one = decode_ok(&[0x49, 0x8B, 0x03]);
    assert_eq!(with_two.kind, with_one.kind);
    assert_eq!(with_two.regs, with_one.regs);
    assert_eq!(with_two.mem, with_one.mem);
    assert_eq!(with_two.flags, with_one.flags);
    assert_eq!(with_two.length, with_one.length + 1);
    assert_eq!(with_two.to_string(), "mov rax, qword ptr [r11]");
}

#[test]
fn test_repeated_segment_keeps_last() {
    let with_two = decode_ok(&[0x2E, 0x3E, 0x48, 0x8B, 0x03]);
    let with_one = decode_ok(&[0x3E, 0x48, 0x8B, 0x03]);
    assert_eq!(with_two.segment, Segment::Ds);
    assert_eq!(with_one.segment, Segment::Ds);
    assert_eq!(with_two.length, with_one.length + 1);
}

#[test]
fn test_osize_rolls_back_when_unkeyed() {
    // 66h keys no nop entry; the prefix is tolerated and only counted
    let inst = decode_ok(&[0x66, 0x90]);
    assert_eq!(inst.to_string(), "nop");
    assert_eq!(inst.length, 2);
}

#[test]
fn test_osize_selects_word_immediate() {
    let inst = decode_ok(&[0x66, 0x05, 0x34, 0x12]);
    assert_eq!(inst.data_type, DataType::Word);
    assert_eq!(inst.imm, 0x1234);
    assert_eq!(inst.length, 4);
    assert_eq!(inst.to_string(), "add ax, 1234h");
}

#[test]
fn test_osize_imm16_group() {
    let inst = decode_ok(&[0x66, 0x81, 0xC3, 0x34, 0x12]);
    assert_eq!(inst.data_type, DataType::Word);
    assert_eq!(inst.imm, 0x1234);
    assert_eq!(inst.to_string(), "add bx, 1234h");
}

#[test]
fn test_asize_is_recognized_and_counted() {
    // 0x67 changes nothing in 64-bit mode but is part of the length
    let with_asize = decode_ok(&[0x67, 0x48, 0x8B, 0x03]);
    let without = decode_ok(&[0x48, 0x8B, 0x03]);
    assert_eq!(with_asize.kind, without.kind);
    assert_eq!(with_asize.regs, without.regs);
    assert_eq!(with_asize.length, without.length + 1);
}
