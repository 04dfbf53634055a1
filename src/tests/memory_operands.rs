//! ModR/M, SIB and displacement decoding.

use alloc::string::ToString;

use super::decode_ok;
use crate::{Gpr, InsnFlags, Reg, Scale, Segment};

#[test]
fn test_simple_indirect() {
    let inst = decode_ok(&[0x48, 0x8B, 0x03]);
    assert!(inst.flags.contains(InsnFlags::USE_MEMOP));
    assert_eq!(inst.mem.base, Reg::Gpr(Gpr::Rbx));
    assert_eq!(inst.mem.index, Reg::None);
    assert_eq!(inst.mem.scale, Scale::X1);
    assert_eq!(inst.mem.disp, 0);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbx]");
}

#[test]
fn test_disp8() {
    let inst = decode_ok(&[0x48, 0x8B, 0x43, 0x08]);
    assert_eq!(inst.mem.disp, 8);
    assert_eq!(inst.length, 4);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbx+8h]");
}

#[test]
fn test_disp8_negative() {
    let inst = decode_ok(&[0x48, 0x8B, 0x43, 0xF8]);
    assert_eq!(inst.mem.disp, -8);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbx-8h]");
}

#[test]
fn test_disp32() {
    let inst = decode_ok(&[0x48, 0x8B, 0x83, 0x78, 0x56, 0x34, 0x12]);
    assert_eq!(inst.mem.disp, 0x12345678);
    assert_eq!(inst.length, 7);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbx+12345678h]");
}

#[test]
fn test_sib_base_index_scale() {
    let inst = decode_ok(&[0x48, 0x8B, 0x04, 0x8B]);
    assert_eq!(inst.mem.base, Reg::Gpr(Gpr::Rbx));
    assert_eq!(inst.mem.index, Reg::Gpr(Gpr::Rcx));
    assert_eq!(inst.mem.scale, Scale::X4);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbx+rcx*4]");
}

#[test]
fn test_sib_rsp_base() {
    // rm=4 forces a SIB byte even for a plain [rsp]
    let inst = decode_ok(&[0x48, 0x8B, 0x04, 0x24]);
    assert_eq!(inst.mem.base, Reg::Gpr(Gpr::Rsp));
    assert_eq!(inst.mem.index, Reg::None);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rsp]");
}

#[test]
fn test_sib_base5_mod0_promotes_disp32() {
    // mod=0, base=101: no base register, disp32 follows
    let inst = decode_ok(&[0x8B, 0x04, 0xCD, 0x78, 0x56, 0x34, 0x12]);
    assert_eq!(inst.mem.base, Reg::None);
    assert_eq!(inst.mem.index, Reg::Gpr(Gpr::Rcx));
    assert_eq!(inst.mem.scale, Scale::X8);
    assert_eq!(inst.mem.disp, 0x12345678);
    assert_eq!(inst.length, 7);
    assert_eq!(inst.to_string(), "mov eax, dword ptr [rcx*8+12345678h]");
}

#[test]
fn test_sib_base5_mod1_keeps_rbp() {
    // with mod=1 the base is rbp, not the dropped-base form
    let inst = decode_ok(&[0x48, 0x8B, 0x44, 0x0D, 0x00]);
    assert_eq!(inst.mem.base, Reg::Gpr(Gpr::Rbp));
    assert_eq!(inst.mem.index, Reg::Gpr(Gpr::Rcx));
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rbp+rcx*1]");
}

#[test]
fn test_rip_relative() {
    let inst = decode_ok(&[0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
    assert!(inst.flags.contains(InsnFlags::USE_MEMOP));
    assert!(inst.flags.contains(InsnFlags::USE_RIPMEM));
    assert_eq!(inst.mem.base, Reg::None);
    assert_eq!(inst.mem.index, Reg::None);
    assert_eq!(inst.mem.scale, Scale::X1);
    assert_eq!(inst.mem.disp, 16);
    assert_eq!(inst.length, 7);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rip + 10h]");
}

#[test]
fn test_rip_relative_negative() {
    let inst = decode_ok(&[0x48, 0x8B, 0x05, 0xF0, 0xFF, 0xFF, 0xFF]);
    assert_eq!(inst.mem.disp, -16);
    assert_eq!(inst.to_string(), "mov rax, qword ptr [rip - 10h]");
}

#[test]
fn test_rex_b_and_r_extensions() {
    // REX.W+R+B: mov r15, [r12]
    let inst = decode_ok(&[0x4D, 0x8B, 0x3C, 0x24]);
    assert_eq!(inst.regs[0], Reg::Gpr(Gpr::R15));
    assert_eq!(inst.mem.base, Reg::Gpr(Gpr::R12));
    assert_eq!(inst.to_string(), "mov r15, qword ptr [r12]");
}

#[test]
fn test_rex_x_extends_index() {
    let inst = decode_ok(&[0x4A, 0x8B, 0x04, 0x8D, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(inst.mem.base, Reg::None);
    assert_eq!(inst.mem.index, Reg::Gpr(Gpr::R9));
    assert_eq!(inst.to_string(), "mov rax, qword ptr [r9*4]");
}

#[test]
fn test_mem_imm32() {
    let inst = decode_ok(&[0xC7, 0x00, 0x44, 0x33, 0x22, 0x11]);
    assert_eq!(inst.imm, 0x11223344);
    assert_eq!(inst.to_string(), "mov dword ptr [rax], 11223344h");
}

#[test]
fn test_byte_store_high_register() {
    let inst = decode_ok(&[0x88, 0x21]);
    assert_eq!(inst.regs[1], Reg::High(0));
    assert_eq!(inst.to_string(), "mov byte ptr [rcx], ah");
}

#[test]
fn test_segment_override() {
    let inst = decode_ok(&[0x64, 0x48, 0x8B, 0x04, 0x25, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(inst.segment, Segment::Fs);
    assert_eq!(inst.length, 9);
    assert_eq!(inst.to_string(), "mov rax, qword ptr fs:[10h]");
}
