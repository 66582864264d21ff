use bus6502::{DecoderConfig, OperandMatch, UnknownLength, Variant};
use clap::{Parser, ValueEnum};
use clap_num::maybe_hex;
use lazy_static::lazy_static;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Cpu {
    /// NMOS 6502, documented opcodes only
    Nmos,
    /// WDC 65C02
    Cmos,
}

#[derive(Parser, Debug)]
#[command(author,version,about,long_about=None)]
pub struct Args {
    /// Capture file to decode (or a raw program image with --image)
    pub file: String,

    /// Instruction set to decode
    #[arg(long, value_enum, default_value_t = Cpu::Cmos)]
    pub variant: Cpu,

    /// Stop with an error on ambiguous bus cycles instead of resynchronizing
    #[arg(short, long)]
    pub strict: bool,

    /// Only count reads at the address following the previous instruction byte as operands
    #[arg(short = 'a', long)]
    pub match_address: bool,

    /// Size undefined opcodes by their table addressing mode instead of as single bytes
    #[arg(long)]
    pub table_length: bool,

    /// Treat the file as a raw program image and decode a synthesized linear trace of it
    #[arg(short, long)]
    pub image: bool,

    /// Load address of the program image (hex ok with '0x')
    #[arg(long,value_parser=maybe_hex::<u16>, default_value_t=0x0200_u16)]
    pub origin: u16,

    /// Print only the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Print decoding statistics when done
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            variant: match self.variant {
                Cpu::Nmos => Variant::Nmos6502,
                Cpu::Cmos => Variant::Cmos65C02,
            },
            strict: self.strict,
            operand_match: if self.match_address {
                OperandMatch::Address
            } else {
                OperandMatch::Sequential
            },
            unknown_length: if self.table_length {
                UnknownLength::Table
            } else {
                UnknownLength::SingleByte
            },
        }
    }
}

lazy_static! {
    pub static ref ARGS: Args = Args::parse();
}

pub fn summary() -> bool { ARGS.summary || ARGS.quiet }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["busdis", "trace.txt"]);
        assert_eq!(args.file, "trace.txt");
        assert_eq!(args.origin, 0x0200);
        assert_eq!(args.decoder_config(), DecoderConfig::default());
    }
    #[test]
    fn options() {
        let args = Args::parse_from([
            "busdis",
            "--variant",
            "nmos",
            "-s",
            "-a",
            "--table-length",
            "--image",
            "--origin",
            "0xc000",
            "prog.bin",
        ]);
        assert!(args.image);
        assert_eq!(args.origin, 0xc000);
        let config = args.decoder_config();
        assert_eq!(config.variant, Variant::Nmos6502);
        assert!(config.strict);
        assert_eq!(config.operand_match, OperandMatch::Address);
        assert_eq!(config.unknown_length, UnknownLength::Table);
    }
}
