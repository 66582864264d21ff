//! # busdis: decode 6502 instructions from a logic-analyzer bus capture.
//!
//! ## Getting Started
//! To decode a capture:
//! ```text
//! cargo run -- /path/to/capture.txt
//! ```
//! ...or to see how a program image decodes as straight-line code:
//! ```text
//! busdis --image --origin 0xc000 /path/to/program.bin
//! ```
//! ## Options
//! Help for command line options is available using -h or --help.
mod args;
use args::ARGS;
use bus6502::{capture::CaptureReader, general_err, info, synth, warn, Decoder, EmitFn, Error, Record, Stats};
use std::fs;
use std::path::Path;
use std::result::Result;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bus6502::config::set_verbose(ARGS.verbose);
    // process_file does all the work
    if let Err(e) = process_file(ARGS.file.as_str()) {
        println!("{}", e);
        return Err(Box::new(e));
    }
    Ok(())
}
/// process_file reads the capture (or image), decodes it and prints every record
fn process_file(filename: &str) -> Result<(), Error> {
    let config = ARGS.decoder_config();
    let path = Path::new(filename);
    let mut decoder = Decoder::new(config);
    let mut emitter = EmitFn(|r: Record| {
        if !ARGS.quiet {
            println!("{}", r)
        }
    });
    let res = if ARGS.image {
        let image = fs::read(path)?;
        if image.is_empty() {
            return Err(general_err!("program image is empty"));
        }
        if !ARGS.quiet {
            info!(
                "Decoding {} byte image at {:04X} as {}",
                image.len(),
                ARGS.origin,
                config.variant.name()
            );
        }
        let trace = synth::synthesize(&image, ARGS.origin, &config);
        decoder.run(trace.into_iter().map(Ok), &mut emitter)
    } else {
        if !ARGS.quiet {
            info!("Decoding {} as {}", filename, config.variant.name());
        }
        decoder.run(CaptureReader::open(path)?, &mut emitter)
    };
    report(decoder.stats());
    res
}
fn report(stats: &Stats) {
    if args::summary() {
        info!("{}", stats);
    }
    if stats.truncated > 0 {
        warn!("{} instruction(s) could not be fully decoded", stats.truncated);
    }
}
