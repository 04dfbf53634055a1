//! Instruction kinds and the descriptor table that names them.
//!
//! Kind discriminants are contiguous so `DESCS` can be indexed directly.
//! The three condition-code families (Jcc, CMOVcc, SETcc) each occupy 16
//! consecutive entries; the DFA stores the family base and the decoder
//! adds the low nibble of the triggering opcode byte.

numeric_enum_macro::numeric_enum! {
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InstKind {
        None = 0,
        Nop = 1,
        Endbr64 = 2,
        Int3 = 3,
        Int = 4,
        Ret = 5,
        Push = 6,
        Pop = 7,
        Mov = 8,
        Movsx = 9,
        Movzx = 10,
        Movsxd = 11,
        Movq = 12,
        Lea = 13,
        Add = 14,
        Or = 15,
        And = 16,
        Sub = 17,
        Xor = 18,
        Cmp = 19,
        Test = 20,
        Not = 21,
        Neg = 22,
        Mul = 23,
        Imul = 24,
        Div = 25,
        Idiv = 26,
        Rol = 27,
        Ror = 28,
        Shl = 29,
        Shr = 30,
        Sar = 31,
        Inc = 32,
        Dec = 33,
        Call = 34,
        Jmp = 35,
        Jo = 36,
        Jno = 37,
        Jb = 38,
        Jae = 39,
        Je = 40,
        Jne = 41,
        Jbe = 42,
        Ja = 43,
        Js = 44,
        Jns = 45,
        Jp = 46,
        Jnp = 47,
        Jl = 48,
        Jge = 49,
        Jle = 50,
        Jg = 51,
        CmovO = 52,
        CmovNo = 53,
        CmovB = 54,
        CmovAe = 55,
        CmovE = 56,
        CmovNe = 57,
        CmovBe = 58,
        CmovA = 59,
        CmovS = 60,
        CmovNs = 61,
        CmovP = 62,
        CmovNp = 63,
        CmovL = 64,
        CmovGe = 65,
        CmovLe = 66,
        CmovG = 67,
        SetO = 68,
        SetNo = 69,
        SetB = 70,
        SetAe = 71,
        SetE = 72,
        SetNe = 73,
        SetBe = 74,
        SetA = 75,
        SetS = 76,
        SetNs = 77,
        SetP = 78,
        SetNp = 79,
        SetL = 80,
        SetGe = 81,
        SetLe = 82,
        SetG = 83,
        SseMovU = 84,
        SseMovA = 85,
        SseMovdqu = 86,
        SseMovdqa = 87,
        SseAdd = 88,
        SseMul = 89,
        SseSub = 90,
        SseDiv = 91,
        SseSqrt = 92,
        SseRsqrt = 93,
        SseAnd = 94,
        SseOr = 95,
        SseXor = 96,
        SseUcomi = 97,
        Paddd = 98,
        Psrld = 99,
    }
}

/// Per-kind descriptor: the printable name and whether the bottom nibble
/// of the opcode byte holds a condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstDesc {
    pub name: &'static str,
    pub has_cc: bool,
}

const fn d(name: &'static str) -> InstDesc {
    InstDesc { name, has_cc: false }
}

const fn cc(name: &'static str) -> InstDesc {
    InstDesc { name, has_cc: true }
}

pub static DESCS: [InstDesc; InstKind::COUNT] = [
    d("(none)"),
    d("nop"),
    d("endbr64"),
    d("int3"),
    d("int"),
    d("ret"),
    d("push"),
    d("pop"),
    d("mov"),
    d("movsx"),
    d("movzx"),
    d("movsxd"),
    d("movq"),
    d("lea"),
    d("add"),
    d("or"),
    d("and"),
    d("sub"),
    d("xor"),
    d("cmp"),
    d("test"),
    d("not"),
    d("neg"),
    d("mul"),
    d("imul"),
    d("div"),
    d("idiv"),
    d("rol"),
    d("ror"),
    d("shl"),
    d("shr"),
    d("sar"),
    d("inc"),
    d("dec"),
    d("call"),
    d("jmp"),
    cc("jo"),
    d("jno"),
    d("jb"),
    d("jae"),
    d("je"),
    d("jne"),
    d("jbe"),
    d("ja"),
    d("js"),
    d("jns"),
    d("jp"),
    d("jnp"),
    d("jl"),
    d("jge"),
    d("jle"),
    d("jg"),
    cc("cmovo"),
    d("cmovno"),
    d("cmovb"),
    d("cmovae"),
    d("cmove"),
    d("cmovne"),
    d("cmovbe"),
    d("cmova"),
    d("cmovs"),
    d("cmovns"),
    d("cmovp"),
    d("cmovnp"),
    d("cmovl"),
    d("cmovge"),
    d("cmovle"),
    d("cmovg"),
    cc("seto"),
    d("setno"),
    d("setb"),
    d("setae"),
    d("sete"),
    d("setne"),
    d("setbe"),
    d("seta"),
    d("sets"),
    d("setns"),
    d("setp"),
    d("setnp"),
    d("setl"),
    d("setge"),
    d("setle"),
    d("setg"),
    d("movups"),
    d("movaps"),
    d("movdqu"),
    d("movdqa"),
    d("addps"),
    d("mulps"),
    d("subps"),
    d("divps"),
    d("sqrtps"),
    d("rsqrtps"),
    d("andps"),
    d("orps"),
    d("xorps"),
    d("ucomiss"),
    d("paddd"),
    d("psrld"),
];

impl InstKind {
    pub const COUNT: usize = 100;

    /// The descriptor-table entry for this kind.
    pub fn desc(self) -> &'static InstDesc {
        &DESCS[self as usize]
    }

    /// Resolve a condition-code family base against the trigger opcode's
    /// low nibble.
    pub(crate) fn with_cond(self, opcode_byte: u8) -> InstKind {
        InstKind::try_from(self as u16 + (opcode_byte & 0xF) as u16).unwrap_or(self)
    }

    /// Kinds whose immediate is a displacement from the next instruction.
    pub(crate) fn is_branch(self) -> bool {
        matches!(self, InstKind::Call | InstKind::Jmp)
            || (InstKind::Jo as u16..=InstKind::Jg as u16).contains(&(self as u16))
    }
}
