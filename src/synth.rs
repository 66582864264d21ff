//! Builds bus traces from a program image by walking it linearly, one instruction after another.
//!
//! The trace has the shape a real 6502 produces for straight-line code: an opcode fetch,
//! the operand reads, and for single-byte instructions the dummy read of the following byte.
//! Branches are never taken and no data accesses are generated.
use crate::bus::RawCycle;
use crate::config::{DecoderConfig, UnknownLength};
use crate::modes;
use crate::opcodes::OpcodeTable;

pub fn synthesize(image: &[u8], origin: u16, config: &DecoderConfig) -> Vec<RawCycle> {
    let table = OpcodeTable::for_variant(config.variant);
    let mut cycles = Vec::with_capacity(image.len() * 2);
    let mut t = 0u64;
    let mut i = 0usize;
    while i < image.len() {
        let pc = origin.wrapping_add(i as u16);
        let desc = table.lookup(image[i]);
        let len = if desc.is_unknown() && config.unknown_length == UnknownLength::SingleByte {
            1
        } else {
            modes::encoding_for(desc.mode).len as usize
        };
        cycles.push(RawCycle::fetch(t, pc, image[i]));
        t += 1;
        for n in 1..len {
            if let Some(&b) = image.get(i + n) {
                cycles.push(RawCycle::read(t, pc.wrapping_add(n as u16), b));
                t += 1;
            }
        }
        if len == 1 {
            let next = image.get(i + 1).copied().unwrap_or(0xff);
            cycles.push(RawCycle::read(t, pc.wrapping_add(1), next));
            t += 1;
        }
        i += len;
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::CycleKind;
    use crate::opcodes::Variant;
    use crate::reconstructor::{Status, TruncateReason};
    use crate::{decode, Error};

    fn every_opcode(variant: Variant) -> (Vec<u8>, Vec<u8>) {
        let mut image = Vec::new();
        let mut lengths = Vec::new();
        let table = OpcodeTable::for_variant(variant);
        for (op, desc) in table.iter() {
            let len = if desc.is_unknown() { 1 } else { modes::encoding_for(desc.mode).len };
            image.push(op);
            image.extend_from_slice(&[0x34, 0x12][..len as usize - 1]);
            lengths.push(len);
        }
        (image, lengths)
    }

    #[test]
    fn well_formed_streams_decode_completely() -> Result<(), Error> {
        for variant in [Variant::Nmos6502, Variant::Cmos65C02] {
            let config = DecoderConfig {
                variant,
                ..Default::default()
            };
            let (image, lengths) = every_opcode(variant);
            let records = decode(synthesize(&image, 0x1000, &config), &config)?;
            assert_eq!(records.len(), 256);
            for (r, len) in records.iter().zip(lengths) {
                assert!(matches!(r.status, Status::Complete | Status::Unknown), "{}", r);
                assert_eq!(r.len(), len, "{}", r);
                assert_eq!(r.bytes().len(), len as usize, "{}", r);
            }
            let total: usize = records.iter().map(|r| r.len() as usize).sum();
            assert_eq!(total, image.len());
        }
        Ok(())
    }
    #[test]
    fn trace_shape() {
        let config = DecoderConfig::default();
        let cycles = synthesize(&[0xa9, 0x05, 0xea, 0x4c, 0x00, 0x02], 0x0200, &config);
        let kinds: Vec<CycleKind> = cycles.iter().map(|c| crate::bus::classify(c).kind).collect();
        use CycleKind::*;
        assert_eq!(kinds, vec![Fetch, Read, Fetch, Read, Fetch, Read, Read]);
        assert_eq!(cycles[2].address, 0x0202);
        assert_eq!(cycles[3].data, 0x4c);
        assert_eq!(cycles.last().map(|c| c.timestamp), Some(6));
    }
    #[test]
    fn image_ending_mid_instruction() -> Result<(), Error> {
        let config = DecoderConfig::default();
        let records = decode(synthesize(&[0xea, 0x20, 0x00], 0x0200, &config), &config)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, Status::Truncated(TruncateReason::EndOfStream));
        assert_eq!(records[1].text, "JSR ??00");
        Ok(())
    }
}
