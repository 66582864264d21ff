//! Addressing-mode resolution: instruction length and operand rendering.
use crate::opcodes::AddressingMode;
use crate::u8oru16::u8u16;

/// Size information for an addressing mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModeEncoding {
    /// total size in bytes including the opcode (1..=3)
    pub len: u8,
    /// number of operand bytes following the opcode
    pub operands: u8,
}
impl ModeEncoding {
    const fn new(len: u8) -> Self { ModeEncoding { len, operands: len - 1 } }
}

pub fn encoding_for(mode: AddressingMode) -> ModeEncoding {
    use AddressingMode::*;
    match mode {
        Implied | ImpliedAccumulator => ModeEncoding::new(1),
        Relative | Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed | Indirect => {
            ModeEncoding::new(2)
        }
        Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect16 | AbsoluteIndirectX => ModeEncoding::new(3),
    }
}

/// Renders an instruction as text.
///
/// `operands` are the bytes that followed the opcode, little-endian. If fewer bytes are given
/// than the mode needs (a truncated instruction) the missing digits are shown as `?`.
/// For branches the operand is shown as the target address `pc + 2 + displacement`,
/// where `pc` is the address the opcode was fetched from.
pub fn format(mnemonic: &str, mode: AddressingMode, operands: &[u8], pc: u16) -> String {
    use AddressingMode::*;
    let byte = operands.first().map(|&b| u8u16::u8(b).to_string()).unwrap_or_else(|| "??".to_string());
    let word = match operands {
        [lsb] => format!("??{:02X}", lsb),
        _ => u8u16::from_le_bytes(operands).map(|w| w.to_string()).unwrap_or_else(|| "????".to_string()),
    };
    match mode {
        Implied => mnemonic.to_string(),
        ImpliedAccumulator => format!("{} A", mnemonic),
        Relative => {
            let target = operands
                .first()
                .map(|&b| u8u16::u16(pc.wrapping_add(2)).signed_offset(u8u16::u8(b)).to_string())
                .unwrap_or_else(|| "????".to_string());
            format!("{} PC+{}", mnemonic, target)
        }
        Immediate => format!("{} #{}", mnemonic, byte),
        ZeroPage => format!("{} {}", mnemonic, byte),
        ZeroPageX => format!("{} {},X", mnemonic, byte),
        ZeroPageY => format!("{} {},Y", mnemonic, byte),
        IndexedIndirect => format!("{} ({}, X)", mnemonic, byte),
        IndirectIndexed => format!("{} ({}), Y", mnemonic, byte),
        Indirect => format!("{} ({})", mnemonic, byte),
        Absolute => format!("{} {}", mnemonic, word),
        AbsoluteX => format!("{} {}, X", mnemonic, word),
        AbsoluteY => format!("{} {}, Y", mnemonic, word),
        AbsoluteIndirect16 => format!("{} ({})", mnemonic, word),
        AbsoluteIndirectX => format!("{} ({}, X)", mnemonic, word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::{OpcodeTable, Variant};
    use AddressingMode::*;

    #[test]
    fn every_mode_has_an_encoding() {
        for mode in AddressingMode::ALL {
            let enc = encoding_for(mode);
            assert!((1..=3).contains(&enc.len), "{:?}", mode);
            assert_eq!(enc.operands + 1, enc.len);
        }
        for variant in [Variant::Nmos6502, Variant::Cmos65C02] {
            for (_, desc) in OpcodeTable::for_variant(variant).iter() {
                assert!((1..=3).contains(&encoding_for(desc.mode).len));
            }
        }
        assert_eq!(encoding_for(Implied).len, 1);
        assert_eq!(encoding_for(ImpliedAccumulator).len, 1);
        assert_eq!(encoding_for(Relative).len, 2);
        assert_eq!(encoding_for(Indirect).len, 2);
        assert_eq!(encoding_for(AbsoluteIndirectX).len, 3);
    }
    #[test]
    fn operand_templates() {
        assert_eq!(format("NOP", Implied, &[], 0), "NOP");
        assert_eq!(format("ASL", ImpliedAccumulator, &[], 0), "ASL A");
        assert_eq!(format("LDA", Immediate, &[0x05], 0), "LDA #05");
        assert_eq!(format("LDA", ZeroPage, &[0x80], 0), "LDA 80");
        assert_eq!(format("LDA", ZeroPageX, &[0x80], 0), "LDA 80,X");
        assert_eq!(format("LDX", ZeroPageY, &[0x80], 0), "LDX 80,Y");
        assert_eq!(format("LDA", IndexedIndirect, &[0x20], 0), "LDA (20, X)");
        assert_eq!(format("LDA", IndirectIndexed, &[0x20], 0), "LDA (20), Y");
        assert_eq!(format("LDA", Indirect, &[0x20], 0), "LDA (20)");
        assert_eq!(format("JMP", Absolute, &[0x34, 0x12], 0), "JMP 1234");
        assert_eq!(format("LDA", AbsoluteX, &[0x00, 0xc0], 0), "LDA C000, X");
        assert_eq!(format("LDA", AbsoluteY, &[0x00, 0xc0], 0), "LDA C000, Y");
        assert_eq!(format("JMP", AbsoluteIndirect16, &[0xfc, 0xff], 0), "JMP (FFFC)");
        assert_eq!(format("JMP", AbsoluteIndirectX, &[0x00, 0x80], 0), "JMP (8000, X)");
    }
    #[test]
    fn branch_targets() {
        assert_eq!(format("BPL", Relative, &[0x05], 0x0200), "BPL PC+0207");
        assert_eq!(format("BNE", Relative, &[0xfe], 0x0200), "BNE PC+0200");
        assert_eq!(format("BRA", Relative, &[0x80], 0x0010), "BRA PC+FF92");
        assert_eq!(format("BEQ", Relative, &[0x10], 0xfff0), "BEQ PC+0002");
    }
    #[test]
    fn partial_operands() {
        assert_eq!(format("LDA", Immediate, &[], 0), "LDA #??");
        assert_eq!(format("JMP", Absolute, &[0x34], 0), "JMP ??34");
        assert_eq!(format("JSR", Absolute, &[], 0), "JSR ????");
        assert_eq!(format("BPL", Relative, &[], 0x0200), "BPL PC+????");
    }
}
