use crate::opcodes::Variant;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(on: bool) { VERBOSE.store(on, Ordering::Relaxed) }
pub fn verbose() -> bool { VERBOSE.load(Ordering::Relaxed) }

/// Decides which read cycles count as operand bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OperandMatch {
    /// every read while operands are outstanding is an operand byte
    #[default]
    Sequential,
    /// only reads at the address following the previous instruction byte are operand bytes
    Address,
}

/// Decides how many bytes an undefined opcode occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum UnknownLength {
    /// always a single byte, as if the opcode were implied
    #[default]
    SingleByte,
    /// use the addressing mode recorded in the opcode table
    Table,
}

/// Settings supplied by the host for one decoding session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DecoderConfig {
    pub variant: Variant,
    /// if true, an ambiguous bus cycle is an error instead of a resync
    pub strict: bool,
    pub operand_match: OperandMatch,
    pub unknown_length: UnknownLength,
}
