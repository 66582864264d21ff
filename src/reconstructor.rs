//! Rebuilds instructions from a stream of classified bus cycles.
//!
//! The reconstructor is a small state machine. An opcode fetch opens a pending instruction,
//! the following operand reads fill it in, and once the addressing mode's length is reached
//! the instruction is handed to an [`Emitter`]. Anything that breaks the sequence (an early
//! fetch, an ambiguous cycle, the end of the capture) closes the pending instruction as a
//! truncated record instead of dropping it.
use crate::{
    bus::{BusCycle, CycleKind},
    config::{DecoderConfig, OperandMatch, UnknownLength},
    modes,
    opcodes::{AddressingMode, InstructionDescriptor, OpcodeTable},
    Error,
};
use std::{fmt, mem};

/// Why an instruction was closed before all of its bytes were seen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TruncateReason {
    /// another opcode fetch arrived while operands were outstanding
    Interrupted,
    /// an ambiguous bus cycle forced a resync
    Ambiguous,
    /// the capture ended
    EndOfStream,
}
impl TruncateReason {
    pub fn is_desync(&self) -> bool { !matches!(self, TruncateReason::EndOfStream) }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Complete,
    /// the opcode has no defined instruction
    Unknown,
    Truncated(TruncateReason),
}

/// A decoded instruction, complete or not, with the span of samples it covers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Record {
    pub opcode: u8,
    pub mnemonic: &'static str,
    /// addressing mode used to size the instruction
    pub mode: AddressingMode,
    /// address the opcode was fetched from
    pub pc: u16,
    /// operand bytes actually observed
    pub operands: Vec<u8>,
    pub text: String,
    pub start: u64,
    pub end: u64,
    pub status: Status,
}
impl Record {
    /// Instruction length in bytes according to its addressing mode.
    pub fn len(&self) -> u8 { modes::encoding_for(self.mode).len }
    pub fn bytes(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(1 + self.operands.len());
        b.push(self.opcode);
        b.extend_from_slice(&self.operands);
        b
    }
    pub fn is_complete(&self) -> bool { self.status == Status::Complete }
    pub fn is_truncated(&self) -> bool { matches!(self.status, Status::Truncated(_)) }
}
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex = self.bytes().iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ");
        write!(
            f,
            "{:>10}-{:<10} {:04X}: {:9} {}",
            self.start, self.end, self.pc, hex, self.text
        )?;
        match self.status {
            Status::Complete => Ok(()),
            Status::Unknown => write!(f, "  ; unknown opcode"),
            Status::Truncated(TruncateReason::EndOfStream) => write!(f, "  ; truncated (end of capture)"),
            Status::Truncated(reason) => write!(f, "  ; truncated ({:?})", reason),
        }
    }
}

/// Receives records in the order they are decoded.
pub trait Emitter {
    fn emit(&mut self, record: Record);
}
impl Emitter for Vec<Record> {
    fn emit(&mut self, record: Record) { self.push(record) }
}
/// Adapts a closure into an [`Emitter`].
pub struct EmitFn<F: FnMut(Record)>(pub F);
impl<F: FnMut(Record)> Emitter for EmitFn<F> {
    fn emit(&mut self, record: Record) { (self.0)(record) }
}

/// Externally visible state of the reconstructor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Idle,
    AwaitingOperands { remaining: u8 },
    Resyncing,
}

/// Running totals for a decoding session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    pub cycles: u64,
    pub complete: u64,
    pub unknown: u64,
    pub truncated: u64,
    pub ambiguous: u64,
    pub waits: u64,
}
impl Stats {
    pub fn records(&self) -> u64 { self.complete + self.unknown + self.truncated }
}
impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} cycles; {} instructions ({} complete, {} unknown, {} truncated); {} ambiguous, {} wait cycles",
            self.cycles,
            self.records(),
            self.complete,
            self.unknown,
            self.truncated,
            self.ambiguous,
            self.waits
        )
    }
}

struct PendingInstruction {
    opcode: u8,
    desc: &'static InstructionDescriptor,
    mode: AddressingMode,
    pc: u16,
    operands: Vec<u8>,
    start: u64,
    end: u64,
}
impl PendingInstruction {
    fn remaining(&self) -> u8 { modes::encoding_for(self.mode).operands - self.operands.len() as u8 }
    fn next_address(&self) -> u16 { self.pc.wrapping_add(1 + self.operands.len() as u16) }
    fn into_record(self, status: Status) -> Record {
        Record {
            opcode: self.opcode,
            mnemonic: self.desc.mnemonic,
            mode: self.mode,
            pc: self.pc,
            text: modes::format(self.desc.mnemonic, self.mode, &self.operands, self.pc),
            operands: self.operands,
            start: self.start,
            end: self.end,
            status,
        }
    }
}

enum Phase {
    Idle,
    Awaiting(PendingInstruction),
    Resyncing,
}

pub struct Reconstructor {
    config: DecoderConfig,
    table: OpcodeTable,
    phase: Phase,
    stats: Stats,
}
impl Reconstructor {
    pub fn new(config: DecoderConfig) -> Reconstructor {
        Reconstructor {
            config,
            table: OpcodeTable::for_variant(config.variant),
            phase: Phase::Idle,
            stats: Stats::default(),
        }
    }
    pub fn stats(&self) -> &Stats { &self.stats }
    pub fn state(&self) -> State {
        match &self.phase {
            Phase::Idle => State::Idle,
            Phase::Awaiting(p) => State::AwaitingOperands { remaining: p.remaining() },
            Phase::Resyncing => State::Resyncing,
        }
    }

    /// Advances the state machine by one bus cycle.
    ///
    /// Only fails in strict mode, on an ambiguous cycle. The failing cycle is not consumed
    /// (nor counted) and any pending instruction is left open; the caller either keeps feeding
    /// or gives it up with [`abandon`](Self::abandon).
    pub fn step<E: Emitter + ?Sized>(&mut self, cycle: &BusCycle, out: &mut E) -> Result<(), Error> {
        if cycle.kind == CycleKind::Ambiguous && self.config.strict {
            return Err(ambiguous_err!(*cycle, "control lines do not identify the cycle"));
        }
        self.stats.cycles += 1;
        match cycle.kind {
            CycleKind::Ambiguous => {
                self.stats.ambiguous += 1;
                if matches!(self.phase, Phase::Awaiting(_)) {
                    verbose_println!("resync: dropping pending instruction at {}", cycle);
                }
                self.close(Status::Truncated(TruncateReason::Ambiguous), out);
                self.phase = Phase::Resyncing;
            }
            CycleKind::Fetch => {
                if matches!(self.phase, Phase::Awaiting(_)) {
                    verbose_println!("desync: opcode fetch while operands outstanding at {}", cycle);
                    self.close(Status::Truncated(TruncateReason::Interrupted), out);
                } else if matches!(self.phase, Phase::Resyncing) {
                    verbose_println!("resync: restarting at {}", cycle);
                }
                self.begin(cycle, out);
            }
            CycleKind::Read => {
                let operand_match = self.config.operand_match;
                if let Phase::Awaiting(p) = &mut self.phase {
                    if operand_match == OperandMatch::Address && cycle.address != p.next_address() {
                        return Ok(());
                    }
                    p.operands.push(cycle.data);
                    p.end = cycle.timestamp;
                    if p.remaining() == 0 {
                        self.close(Status::Complete, out);
                    }
                }
            }
            CycleKind::Wait => self.stats.waits += 1,
            CycleKind::Write => {}
        }
        Ok(())
    }

    /// Drops a pending instruction after a rejected ambiguous cycle. It is emitted as
    /// truncated by the ambiguity and decoding resumes at the next opcode fetch.
    pub fn abandon<E: Emitter + ?Sized>(&mut self, out: &mut E) {
        self.close(Status::Truncated(TruncateReason::Ambiguous), out);
        self.phase = Phase::Resyncing;
    }

    /// Ends the session: a pending instruction is emitted as truncated and the state returns to idle.
    pub fn finish<E: Emitter + ?Sized>(&mut self, out: &mut E) {
        self.close(Status::Truncated(TruncateReason::EndOfStream), out);
        self.phase = Phase::Idle;
    }

    fn begin<E: Emitter + ?Sized>(&mut self, cycle: &BusCycle, out: &mut E) {
        let desc = self.table.lookup(cycle.data);
        let mode = if desc.is_unknown() && self.config.unknown_length == UnknownLength::SingleByte {
            AddressingMode::Implied
        } else {
            desc.mode
        };
        self.phase = Phase::Awaiting(PendingInstruction {
            opcode: cycle.data,
            desc,
            mode,
            pc: cycle.address,
            operands: Vec::with_capacity(2),
            start: cycle.timestamp,
            end: cycle.timestamp,
        });
        if modes::encoding_for(mode).len == 1 {
            self.close(Status::Complete, out);
        }
    }

    /// Emits the pending instruction, if any, and returns to idle.
    /// A complete instruction with an undefined opcode is reported as unknown.
    fn close<E: Emitter + ?Sized>(&mut self, status: Status, out: &mut E) {
        if let Phase::Awaiting(p) = mem::replace(&mut self.phase, Phase::Idle) {
            let status = if status == Status::Complete && p.desc.is_unknown() {
                Status::Unknown
            } else {
                status
            };
            match status {
                Status::Complete => self.stats.complete += 1,
                Status::Unknown => self.stats.unknown += 1,
                Status::Truncated(_) => self.stats.truncated += 1,
            }
            out.emit(p.into_record(status));
        }
    }
}
