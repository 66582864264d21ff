//! Opcode tables for the 6502 family.
//!
//! Each supported processor variant has its own dense 256-entry table indexed by opcode value,
//! so a lookup never fails and the array length alone guarantees there are no gaps.
//! The NMOS table is derived from the 65C02 table at compile time by overriding every
//! opcode that only exists on the CMOS parts.
use std::fmt;

/// All the addressing modes used by the 6502 and 65C02.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum AddressingMode {
    Implied,
    ImpliedAccumulator,
    /// branch; the operand is a signed displacement from the following instruction
    Relative,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// (zp, X)
    IndexedIndirect,
    /// (zp), Y
    IndirectIndexed,
    /// (zp) -- 65C02 only
    Indirect,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// (abs)
    AbsoluteIndirect16,
    /// (abs, X) -- 65C02 only
    AbsoluteIndirectX,
}
impl AddressingMode {
    pub const ALL: [AddressingMode; 15] = [
        AddressingMode::Implied,
        AddressingMode::ImpliedAccumulator,
        AddressingMode::Relative,
        AddressingMode::Immediate,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::IndexedIndirect,
        AddressingMode::IndirectIndexed,
        AddressingMode::Indirect,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::AbsoluteIndirect16,
        AddressingMode::AbsoluteIndirectX,
    ];
}

/// Mnemonic used for opcodes that have no defined instruction.
pub const UNKNOWN_MNEMONIC: &str = "???";

/// The static description of one opcode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InstructionDescriptor {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
}
impl InstructionDescriptor {
    pub fn is_unknown(&self) -> bool { self.mnemonic == UNKNOWN_MNEMONIC }
}
impl fmt::Display for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}, {:?}", self.mnemonic, self.mode))
    }
}

/// Processor variant whose instruction set is being decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Variant {
    /// original NMOS 6502 (documented opcodes only)
    Nmos6502,
    /// WDC 65C02, including WAI and STP but not the Rockwell bit instructions
    #[default]
    Cmos65C02,
}
impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Nmos6502 => "6502",
            Variant::Cmos65C02 => "65C02",
        }
    }
}

/// A lookup table for one processor variant.
#[derive(Clone, Copy)]
pub struct OpcodeTable {
    variant: Variant,
    entries: &'static [InstructionDescriptor; 256],
}
impl OpcodeTable {
    pub fn for_variant(variant: Variant) -> OpcodeTable {
        let entries = match variant {
            Variant::Nmos6502 => &NMOS_6502,
            Variant::Cmos65C02 => &CMOS_65C02,
        };
        OpcodeTable { variant, entries }
    }
    pub fn lookup(&self, opcode: u8) -> &'static InstructionDescriptor { &self.entries[opcode as usize] }
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static InstructionDescriptor)> {
        let entries = self.entries;
        (0..=255u8).map(move |op| (op, &entries[op as usize]))
    }
}
impl fmt::Debug for OpcodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeTable").field("variant", &self.variant).finish()
    }
}

const fn d(mnemonic: &'static str, mode: AddressingMode) -> InstructionDescriptor {
    InstructionDescriptor { mnemonic, mode }
}
const UNKNOWN: InstructionDescriptor = d(UNKNOWN_MNEMONIC, AddressingMode::Implied);

use AddressingMode::*;
const CMOS_ENTRIES: [InstructionDescriptor; 256] = [
    /* 00 */ d("BRK", Immediate), d("ORA", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* 04 */ d("TSB", ZeroPage), d("ORA", ZeroPage), d("ASL", ZeroPage), d("???", Implied),
    /* 08 */ d("PHP", Implied), d("ORA", Immediate), d("ASL", ImpliedAccumulator), d("???", Implied),
    /* 0C */ d("TSB", Absolute), d("ORA", Absolute), d("ASL", Absolute), d("???", Implied),
    /* 10 */ d("BPL", Relative), d("ORA", IndirectIndexed), d("ORA", Indirect), d("???", Implied),
    /* 14 */ d("TRB", ZeroPage), d("ORA", ZeroPageX), d("ASL", ZeroPageX), d("???", Implied),
    /* 18 */ d("CLC", Implied), d("ORA", AbsoluteY), d("INC", ImpliedAccumulator), d("???", Implied),
    /* 1C */ d("TRB", Absolute), d("ORA", AbsoluteX), d("ASL", AbsoluteX), d("???", Implied),
    /* 20 */ d("JSR", Absolute), d("AND", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* 24 */ d("BIT", ZeroPage), d("AND", ZeroPage), d("ROL", ZeroPage), d("???", Implied),
    /* 28 */ d("PLP", Implied), d("AND", Immediate), d("ROL", ImpliedAccumulator), d("???", Implied),
    /* 2C */ d("BIT", Absolute), d("AND", Absolute), d("ROL", Absolute), d("???", Implied),
    /* 30 */ d("BMI", Relative), d("AND", IndirectIndexed), d("AND", Indirect), d("???", Implied),
    /* 34 */ d("BIT", ZeroPageX), d("AND", ZeroPageX), d("ROL", ZeroPageX), d("???", Implied),
    /* 38 */ d("SEC", Implied), d("AND", AbsoluteY), d("DEC", ImpliedAccumulator), d("???", Implied),
    /* 3C */ d("BIT", AbsoluteX), d("AND", AbsoluteX), d("ROL", AbsoluteX), d("???", Implied),
    /* 40 */ d("RTI", Implied), d("EOR", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* 44 */ d("???", ZeroPage), d("EOR", ZeroPage), d("LSR", ZeroPage), d("???", Implied),
    /* 48 */ d("PHA", Implied), d("EOR", Immediate), d("LSR", ImpliedAccumulator), d("???", Implied),
    /* 4C */ d("JMP", Absolute), d("EOR", Absolute), d("LSR", Absolute), d("???", Implied),
    /* 50 */ d("BVC", Relative), d("EOR", IndirectIndexed), d("EOR", Indirect), d("???", Implied),
    /* 54 */ d("???", ZeroPage), d("EOR", ZeroPageX), d("LSR", ZeroPageX), d("???", Implied),
    /* 58 */ d("CLI", Implied), d("EOR", AbsoluteY), d("PHY", Implied), d("???", Implied),
    /* 5C */ d("???", Absolute), d("EOR", AbsoluteX), d("LSR", AbsoluteX), d("???", Implied),
    /* 60 */ d("RTS", Implied), d("ADC", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* 64 */ d("STZ", ZeroPage), d("ADC", ZeroPage), d("ROR", ZeroPage), d("???", Implied),
    /* 68 */ d("PLA", Implied), d("ADC", Immediate), d("ROR", ImpliedAccumulator), d("???", Implied),
    /* 6C */ d("JMP", AbsoluteIndirect16), d("ADC", Absolute), d("ROR", Absolute), d("???", Implied),
    /* 70 */ d("BVS", Relative), d("ADC", IndirectIndexed), d("ADC", Indirect), d("???", Implied),
    /* 74 */ d("STZ", ZeroPageX), d("ADC", ZeroPageX), d("ROR", ZeroPageX), d("???", Implied),
    /* 78 */ d("SEI", Implied), d("ADC", AbsoluteY), d("PLY", Implied), d("???", Implied),
    /* 7C */ d("JMP", AbsoluteIndirectX), d("ADC", AbsoluteX), d("ROR", AbsoluteX), d("???", Implied),
    /* 80 */ d("BRA", Relative), d("STA", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* 84 */ d("STY", ZeroPage), d("STA", ZeroPage), d("STX", ZeroPage), d("???", Implied),
    /* 88 */ d("DEY", Implied), d("BIT", Immediate), d("TXA", Implied), d("???", Implied),
    /* 8C */ d("STY", Absolute), d("STA", Absolute), d("STX", Absolute), d("???", Implied),
    /* 90 */ d("BCC", Relative), d("STA", IndirectIndexed), d("STA", Indirect), d("???", Implied),
    /* 94 */ d("STY", ZeroPageX), d("STA", ZeroPageX), d("STX", ZeroPageY), d("???", Implied),
    /* 98 */ d("TYA", Implied), d("STA", AbsoluteY), d("TXS", Implied), d("???", Implied),
    /* 9C */ d("STZ", Absolute), d("STA", AbsoluteX), d("STZ", AbsoluteX), d("???", Implied),
    /* A0 */ d("LDY", Immediate), d("LDA", IndexedIndirect), d("LDX", Immediate), d("???", Implied),
    /* A4 */ d("LDY", ZeroPage), d("LDA", ZeroPage), d("LDX", ZeroPage), d("???", Implied),
    /* A8 */ d("TAY", Implied), d("LDA", Immediate), d("TAX", Implied), d("???", Implied),
    /* AC */ d("LDY", Absolute), d("LDA", Absolute), d("LDX", Absolute), d("???", Implied),
    /* B0 */ d("BCS", Relative), d("LDA", IndirectIndexed), d("LDA", Indirect), d("???", Implied),
    /* B4 */ d("LDY", ZeroPageX), d("LDA", ZeroPageX), d("LDX", ZeroPageY), d("???", Implied),
    /* B8 */ d("CLV", Implied), d("LDA", AbsoluteY), d("TSX", Implied), d("???", Implied),
    /* BC */ d("LDY", AbsoluteX), d("LDA", AbsoluteX), d("LDX", AbsoluteY), d("???", Implied),
    /* C0 */ d("CPY", Immediate), d("CMP", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* C4 */ d("CPY", ZeroPage), d("CMP", ZeroPage), d("DEC", ZeroPage), d("???", Implied),
    /* C8 */ d("INY", Implied), d("CMP", Immediate), d("DEX", Implied), d("WAI", Implied),
    /* CC */ d("CPY", Absolute), d("CMP", Absolute), d("DEC", Absolute), d("???", Implied),
    /* D0 */ d("BNE", Relative), d("CMP", IndirectIndexed), d("CMP", Indirect), d("???", Implied),
    /* D4 */ d("???", ZeroPage), d("CMP", ZeroPageX), d("DEC", ZeroPageX), d("???", Implied),
    /* D8 */ d("CLD", Implied), d("CMP", AbsoluteY), d("PHX", Implied), d("STP", Implied),
    /* DC */ d("???", Absolute), d("CMP", AbsoluteX), d("DEC", AbsoluteX), d("???", Implied),
    /* E0 */ d("CPX", Immediate), d("SBC", IndexedIndirect), d("???", Implied), d("???", Implied),
    /* E4 */ d("CPX", ZeroPage), d("SBC", ZeroPage), d("INC", ZeroPage), d("???", Implied),
    /* E8 */ d("INX", Implied), d("SBC", Immediate), d("NOP", Implied), d("???", Implied),
    /* EC */ d("CPX", Absolute), d("SBC", Absolute), d("INC", Absolute), d("???", Implied),
    /* F0 */ d("BEQ", Relative), d("SBC", IndirectIndexed), d("SBC", Indirect), d("???", Implied),
    /* F4 */ d("???", ZeroPage), d("SBC", ZeroPageX), d("INC", ZeroPageX), d("???", Implied),
    /* F8 */ d("SED", Implied), d("SBC", AbsoluteY), d("PLX", Implied), d("???", Implied),
    /* FC */ d("???", Absolute), d("SBC", AbsoluteX), d("INC", AbsoluteX), d("???", Implied),];
static CMOS_65C02: [InstructionDescriptor; 256] = CMOS_ENTRIES;

/// Opcodes that only the CMOS parts define.
const CMOS_ONLY: [u8; 36] = [
    0x04, 0x0c, 0x14, 0x1c, // TSB, TRB
    0x64, 0x74, 0x9c, 0x9e, // STZ
    0x80, // BRA
    0x5a, 0x7a, 0xda, 0xfa, // PHY, PLY, PHX, PLX
    0x1a, 0x3a, // INC A, DEC A
    0x34, 0x3c, 0x89, // BIT zp,X / abs,X / #
    0x12, 0x32, 0x52, 0x72, 0x92, 0xb2, 0xd2, 0xf2, // (zp)
    0x7c, // JMP (abs, X)
    0xcb, 0xdb, // WAI, STP
    0x44, 0x54, 0xd4, 0xf4, 0x5c, 0xdc, 0xfc, // multi-byte NOPs
];
const fn nmos_table() -> [InstructionDescriptor; 256] {
    let mut tbl = CMOS_ENTRIES;
    let mut i = 0;
    while i < CMOS_ONLY.len() {
        tbl[CMOS_ONLY[i] as usize] = UNKNOWN;
        i += 1;
    }
    tbl
}
static NMOS_6502: [InstructionDescriptor; 256] = nmos_table();
