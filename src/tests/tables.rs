//! Descriptor-table consistency and the DFA debug walker.

use alloc::string::String;

use crate::tables::descs::DESCS;
use crate::{InstKind, dump_dfa};

#[test]
fn test_descs_table_is_aligned_with_kinds() {
    assert_eq!(DESCS.len(), InstKind::COUNT);
    assert_eq!(InstKind::Nop.desc().name, "nop");
    assert_eq!(InstKind::Movsxd.desc().name, "movsxd");
    assert_eq!(InstKind::Je.desc().name, "je");
    assert_eq!(InstKind::CmovG.desc().name, "cmovg");
    assert_eq!(InstKind::SetNe.desc().name, "setne");
    assert_eq!(InstKind::Psrld.desc().name, "psrld");
}

#[test]
fn test_condition_code_families_are_contiguous() {
    let families = [
        (InstKind::Jo, "j"),
        (InstKind::CmovO, "cmov"),
        (InstKind::SetO, "set"),
    ];
    let suffixes = [
        "o", "no", "b", "ae", "e", "ne", "be", "a", "s", "ns", "p", "np", "l", "ge", "le", "g",
    ];
    for (base, prefix) in families {
        assert!(base.desc().has_cc);
        for (cond, suffix) in suffixes.iter().enumerate() {
            let kind = InstKind::try_from(base as u16 + cond as u16).unwrap();
            assert_eq!(kind.desc().name.strip_prefix(prefix), Some(*suffix));
            // only the family base carries the marker
            if cond != 0 {
                assert!(!kind.desc().has_cc);
            }
        }
    }
}

#[test]
fn test_with_cond_uses_low_nibble() {
    assert_eq!(InstKind::Jo.with_cond(0x84), InstKind::Je);
    assert_eq!(InstKind::CmovO.with_cond(0x4F), InstKind::CmovG);
    assert_eq!(InstKind::SetO.with_cond(0x90), InstKind::SetO);
}

#[test]
fn test_dump_renders_the_tree() {
    let mut out = String::new();
    dump_dfa(&mut out).unwrap();
    assert!(out.contains("0x90 nop"));
    assert!(out.contains("+r"));
    assert!(out.contains(" rx"));
    // endbr64 is the hard-coded shortcut, never a table leaf
    assert!(!out.contains("endbr"));
}
