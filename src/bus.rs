//! Bus sample classification.
//!
//! A 6502 announces an opcode fetch by raising SYNC for the cycle that reads the opcode byte,
//! and RNW tells reads from writes. A 65C02 (or a 6502 with RDY wired) may also hold the bus with
//! RDY low, in which case the cycle repeats and carries no information.
use std::fmt;

/// Sampled level of a single control line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Low,
    High,
    /// the analyzer could not resolve the level (glitch or transition inside the sample window)
    Unknown,
}
impl Level {
    pub fn as_char(&self) -> char {
        match self {
            Level::Low => '0',
            Level::High => '1',
            Level::Unknown => 'x',
        }
    }
}

/// One bus transaction as delivered by the capture front end.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RawCycle {
    pub timestamp: u64,
    pub address: u16,
    pub data: u8,
    pub sync: Level,
    pub rnw: Level,
    /// None if RDY was not captured; the CPU is then assumed never to be stalled
    pub rdy: Option<Level>,
}
impl RawCycle {
    pub fn new(timestamp: u64, address: u16, data: u8, sync: Level, rnw: Level) -> RawCycle {
        RawCycle {
            timestamp,
            address,
            data,
            sync,
            rnw,
            rdy: None,
        }
    }
    pub fn fetch(timestamp: u64, address: u16, data: u8) -> RawCycle {
        RawCycle::new(timestamp, address, data, Level::High, Level::High)
    }
    pub fn read(timestamp: u64, address: u16, data: u8) -> RawCycle {
        RawCycle::new(timestamp, address, data, Level::Low, Level::High)
    }
    pub fn write(timestamp: u64, address: u16, data: u8) -> RawCycle {
        RawCycle::new(timestamp, address, data, Level::Low, Level::Low)
    }
    pub fn with_rdy(mut self, rdy: Level) -> RawCycle {
        self.rdy = Some(rdy);
        self
    }
}
impl fmt::Display for RawCycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:04X} {:02X} {} {}",
            self.timestamp,
            self.address,
            self.data,
            self.sync.as_char(),
            self.rnw.as_char()
        )?;
        if let Some(rdy) = self.rdy {
            write!(f, " {}", rdy.as_char())?;
        }
        Ok(())
    }
}

/// Classification of a bus cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CycleKind {
    /// opcode fetch (SYNC high, read)
    Fetch,
    /// any other read: operand bytes, data reads, dummy reads
    Read,
    Write,
    /// RDY held low; the CPU repeats this cycle
    Wait,
    /// control lines do not describe a valid cycle
    Ambiguous,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BusCycle {
    pub timestamp: u64,
    pub address: u16,
    pub data: u8,
    pub kind: CycleKind,
}
impl fmt::Display for BusCycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "@{} {:04X}: {:02X} ({:?})",
            self.timestamp, self.address, self.data, self.kind
        )
    }
}

/// Classifies a raw sample. This is a pure function of the sample.
pub fn classify(raw: &RawCycle) -> BusCycle {
    BusCycle {
        timestamp: raw.timestamp,
        address: raw.address,
        data: raw.data,
        kind: cycle_kind(raw.sync, raw.rnw, raw.rdy.unwrap_or(Level::High)),
    }
}
fn cycle_kind(sync: Level, rnw: Level, rdy: Level) -> CycleKind {
    use Level::*;
    if sync == Unknown || rnw == Unknown || rdy == Unknown {
        return CycleKind::Ambiguous;
    }
    if rdy == Low {
        return CycleKind::Wait;
    }
    match (sync, rnw) {
        (High, High) => CycleKind::Fetch,
        // opcode fetches are always reads
        (High, Low) => CycleKind::Ambiguous,
        (Low, High) => CycleKind::Read,
        _ => CycleKind::Write,
    }
}
