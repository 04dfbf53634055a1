//! Exact text output of the Intel-syntax formatter and the listing lines.

use alloc::string::ToString;

use pretty_assertions::assert_eq;

use super::decode_ok;
use crate::DisplayLine;

#[test]
fn test_listing_line_layout() {
    let bytes = [0x48, 0x89, 0xD8];
    let inst = decode_ok(&bytes);
    assert_eq!(
        DisplayLine::new(0, &bytes, &inst).to_string(),
        "    0000000000000000: 48 89 D8          mov         rax, rbx"
    );
}

#[test]
fn test_listing_line_rip_resolves_absolute() {
    let bytes = [0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00];
    let inst = decode_ok(&bytes);
    // next instruction is at 0x1007; displacement 0x10 lands on 0x1017
    assert_eq!(
        DisplayLine::new(0x1000, &bytes, &inst).to_string(),
        "    0000000000001000: 48 8B 05 10 00 00 mov         rax, qword ptr \
         [0000000000001017h]\n                      00 "
    );
}

#[test]
fn test_listing_line_branch_target() {
    let bytes = [0x0F, 0x84, 0x00, 0x01, 0x00, 0x00];
    let inst = decode_ok(&bytes);
    assert_eq!(
        DisplayLine::new(0x100, &bytes, &inst).to_string(),
        "    0000000000000100: 0F 84 00 01 00 00 je          0000000000000206"
    );
}

#[test]
fn test_listing_line_lock_padding() {
    let bytes = [0xF0, 0x48, 0x01, 0x18];
    let inst = decode_ok(&bytes);
    assert_eq!(
        DisplayLine::new(0, &bytes, &inst).to_string(),
        "    0000000000000000: F0 48 01 18       lock add    qword ptr [rax], rbx"
    );
}

#[test]
fn test_listing_line_continuation_rows() {
    let bytes = [0x48, 0xB8, 0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01];
    let inst = decode_ok(&bytes);
    assert_eq!(
        DisplayLine::new(0, &bytes, &inst).to_string(),
        "    0000000000000000: 48 B8 EF CD AB 89 mov         123456789abcdefh\
         \n                      67 45 23 01 "
    );
}

#[test]
fn test_memory_operand_variants() {
    assert_eq!(
        decode_ok(&[0x48, 0x8B, 0x44, 0x08, 0xF0]).to_string(),
        "mov rax, qword ptr [rax+rcx*1-10h]"
    );
    assert_eq!(
        decode_ok(&[0x48, 0x8B, 0x03]).to_string(),
        "mov rax, qword ptr [rbx]"
    );
    assert_eq!(
        decode_ok(&[0x8B, 0x04, 0xCD, 0x08, 0x00, 0x00, 0x00]).to_string(),
        "mov eax, dword ptr [rcx*8+8h]"
    );
}

#[test]
fn test_negative_immediate() {
    assert_eq!(
        decode_ok(&[0x48, 0x83, 0xC0, 0xF0]).to_string(),
        "add rax, -10h"
    );
}

#[test]
fn test_width_keywords() {
    assert_eq!(
        decode_ok(&[0x0F, 0xB6, 0x06]).to_string(),
        "movzx eax, byte ptr [rsi]"
    );
    assert_eq!(
        decode_ok(&[0x66, 0xC7, 0x00, 0x34, 0x12]).to_string(),
        "mov word ptr [rax], 1234h"
    );
}

#[test]
fn test_no_operand_instruction() {
    assert_eq!(decode_ok(&[0xC3]).to_string(), "ret");
}
