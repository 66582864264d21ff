//! # A 6502/65C02 bus-trace instruction decoder written in Rust.
//!
//! Feed it the bus cycles captured by a logic analyzer (address, data, SYNC, RNW and
//! optionally RDY for every cycle) and it reconstructs the instructions the CPU executed,
//! each tagged with the span of samples it occupied.
//!
//! ```
//! use bus6502::{decode, DecoderConfig, RawCycle};
//! let trace = [RawCycle::fetch(0, 0x0200, 0xa9), RawCycle::read(1, 0x0201, 0x05)];
//! let records = decode(trace, &DecoderConfig::default()).unwrap();
//! assert_eq!(records[0].text, "LDA #05");
//! ```
#[macro_use]
mod macros;
pub mod bus;
pub mod capture;
pub mod config;
mod error;
pub mod modes;
pub mod opcodes;
pub mod reconstructor;
pub mod synth;
mod u8oru16;

pub use bus::{classify, BusCycle, CycleKind, Level, RawCycle};
pub use config::{DecoderConfig, OperandMatch, UnknownLength};
pub use error::{Error, ErrorKind};
pub use opcodes::{AddressingMode, InstructionDescriptor, OpcodeTable, Variant};
pub use reconstructor::{EmitFn, Emitter, Reconstructor, Record, State, Stats, Status, TruncateReason};

/// Classifies raw samples and drives a [`Reconstructor`] with them.
pub struct Decoder {
    reconstructor: Reconstructor,
}
impl Decoder {
    pub fn new(config: DecoderConfig) -> Decoder {
        Decoder {
            reconstructor: Reconstructor::new(config),
        }
    }
    pub fn stats(&self) -> &Stats { self.reconstructor.stats() }
    pub fn state(&self) -> State { self.reconstructor.state() }

    pub fn feed<E: Emitter + ?Sized>(&mut self, raw: &RawCycle, out: &mut E) -> Result<(), Error> {
        self.reconstructor.step(&classify(raw), out)
    }
    pub fn finish<E: Emitter + ?Sized>(&mut self, out: &mut E) { self.reconstructor.finish(out) }

    /// Consumes a whole capture. Whether it ends normally or with an error, any instruction
    /// still pending is emitted as truncated before returning: by the ambiguous cycle that
    /// stopped a strict run, otherwise by the end of the stream.
    pub fn run<I, E>(&mut self, samples: I, out: &mut E) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<RawCycle, Error>>,
        E: Emitter + ?Sized,
    {
        let mut res = Ok(());
        for raw in samples {
            res = raw.and_then(|raw| self.feed(&raw, out));
            if let Err(e) = &res {
                if e.kind == ErrorKind::AmbiguousBusCycle {
                    self.reconstructor.abandon(out);
                }
                break;
            }
        }
        self.finish(out);
        res
    }
}

/// Decodes a complete, in-memory trace.
pub fn decode<I>(samples: I, config: &DecoderConfig) -> Result<Vec<Record>, Error>
where
    I: IntoIterator<Item = RawCycle>,
{
    let mut out = Vec::new();
    Decoder::new(*config).run(samples.into_iter().map(Ok), &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decode_scenarios() -> Result<(), Error> {
        let config = DecoderConfig::default();
        let trace = vec![
            RawCycle::fetch(0, 0x0200, 0xa9),
            RawCycle::read(1, 0x0201, 0x05),
            RawCycle::fetch(2, 0x0202, 0x4c),
            RawCycle::read(3, 0x0203, 0x34),
            RawCycle::read(4, 0x0204, 0x12),
            RawCycle::fetch(5, 0x1234, 0x10),
            RawCycle::read(6, 0x1235, 0x05),
            RawCycle::fetch(7, 0x123c, 0x02),
        ];
        let records = decode(trace, &config)?;
        let text: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, vec!["LDA #05", "JMP 1234", "BPL PC+123B", "???"]);
        assert_eq!(records[3].status, Status::Unknown);
        Ok(())
    }
    #[test]
    fn run_from_capture() -> Result<(), Error> {
        let text = "0 0200 A9 1 1\n1 0201 05 0 1\n2 0202 4C 1 1\n3 0203 00 0 1\n";
        let mut out = Vec::new();
        let mut decoder = Decoder::new(DecoderConfig::default());
        decoder.run(capture::CaptureReader::new(Cursor::new(text)), &mut out)?;
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].status, Status::Truncated(TruncateReason::EndOfStream));
        assert_eq!(decoder.stats().cycles, 4);
        assert_eq!(decoder.state(), State::Idle);
        Ok(())
    }
    #[test]
    fn run_stops_at_syntax_error() {
        let text = "0 0200 4C 1 1\n1 0201 00 0 1\nnonsense\n2 0202 10 0 1\n";
        let mut out = Vec::new();
        let mut decoder = Decoder::new(DecoderConfig::default());
        let err = decoder.run(capture::CaptureReader::new(Cursor::new(text)), &mut out).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        // the open JMP is still reported
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].operands, vec![0x00]);
        assert!(out[0].is_truncated());
    }
    #[test]
    fn strict_decode_fails() {
        let config = DecoderConfig {
            strict: true,
            ..Default::default()
        };
        let trace = [RawCycle::fetch(0, 0x0200, 0xea), RawCycle::new(1, 0x0201, 0, Level::High, Level::Low)];
        let err = decode(trace, &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AmbiguousBusCycle);
        assert!(err.to_string().contains("@1 0201"));
    }
    #[test]
    fn strict_decode_reports_cut_off_instruction() {
        let config = DecoderConfig {
            strict: true,
            ..Default::default()
        };
        let trace = [
            RawCycle::fetch(0, 0x0200, 0x4c),
            RawCycle::read(1, 0x0201, 0x34),
            RawCycle::new(2, 0x0202, 0x12, Level::Unknown, Level::High),
        ];
        let mut out = Vec::new();
        let mut decoder = Decoder::new(config);
        let err = decoder.run(trace.into_iter().map(Ok), &mut out).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AmbiguousBusCycle);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "JMP ??34");
        assert_eq!(out[0].status, Status::Truncated(TruncateReason::Ambiguous));
        assert_eq!(decoder.stats().cycles, 2);
    }
}
