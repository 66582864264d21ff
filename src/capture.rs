//! A plain-text capture format so traces from any logic analyzer can be fed to the decoder.
//!
//! One bus cycle per line:
//! ```text
//! ; sample addr data sync rnw [rdy]
//! 100 0200 A9 1 1 1
//! 101 0201 05 0 1
//! ```
//! The sample number is decimal, address and data are hex, and each control line is
//! `0`, `1` or `x` (also `X` or `?`) when the analyzer could not resolve the level.
//! Blank lines and lines starting with `;` or `#` are ignored.
use crate::bus::{Level, RawCycle};
use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

lazy_static! {
    static ref RE_CYCLE: Regex = Regex::new(
        r"^\s*(\d+)\s+([0-9a-fA-F]{1,4})\s+([0-9a-fA-F]{1,2})\s+([01xX?])\s+([01xX?])(?:\s+([01xX?]))?\s*(?:[;#].*)?$"
    )
    .expect("invalid capture regex");
    static ref RE_SKIP: Regex = Regex::new(r"^\s*(?:[;#].*)?$").expect("invalid capture regex");
}

fn level_from_str(s: &str) -> Level {
    match s {
        "0" => Level::Low,
        "1" => Level::High,
        _ => Level::Unknown,
    }
}

/// Parses a single line. Returns Ok(None) for blank and comment lines.
pub fn parse_line(line: &str, line_num: usize) -> Result<Option<RawCycle>, Error> {
    if RE_SKIP.is_match(line) {
        return Ok(None);
    }
    let c = RE_CYCLE
        .captures(line)
        .ok_or_else(|| syntax_err_line!(line_num, format!("unrecognized bus cycle \"{}\"", line.trim())))?;
    let field = |i: usize| c.get(i).map(|m| m.as_str()).unwrap_or_default();
    let timestamp = field(1)
        .parse::<u64>()
        .map_err(|_| syntax_err_line!(line_num, "sample number out of range"))?;
    // the regex limits these to 4 and 2 hex digits so they cannot overflow
    let address = u16::from_str_radix(field(2), 16).map_err(|e| syntax_err_line!(line_num, e))?;
    let data = u8::from_str_radix(field(3), 16).map_err(|e| syntax_err_line!(line_num, e))?;
    Ok(Some(RawCycle {
        timestamp,
        address,
        data,
        sync: level_from_str(field(4)),
        rnw: level_from_str(field(5)),
        rdy: c.get(6).map(|m| level_from_str(m.as_str())),
    }))
}

/// Lazily reads bus cycles from a capture.
pub struct CaptureReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}
impl<R: BufRead> CaptureReader<R> {
    pub fn new(reader: R) -> Self {
        CaptureReader {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}
impl CaptureReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, Error> { Ok(CaptureReader::new(BufReader::new(File::open(path)?))) }
}
impl<R: BufRead> Iterator for CaptureReader<R> {
    type Item = Result<RawCycle, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_num += 1;
            match parse_line(&line, self.line_num) {
                Ok(Some(cycle)) => return Some(Ok(cycle)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::io::Cursor;

    #[test]
    fn parse_lines() -> Result<(), Error> {
        assert_eq!(parse_line("", 1)?, None);
        assert_eq!(parse_line("   ; header", 1)?, None);
        assert_eq!(parse_line("# sample addr data sync rnw", 1)?, None);
        assert_eq!(parse_line("100 0200 A9 1 1", 1)?, Some(RawCycle::fetch(100, 0x0200, 0xa9)));
        assert_eq!(
            parse_line("101 201 5 0 1 1 ; operand", 1)?,
            Some(RawCycle::read(101, 0x0201, 0x05).with_rdy(Level::High))
        );
        assert_eq!(
            parse_line("102\tffff ff x ? X", 1)?,
            Some(RawCycle::new(102, 0xffff, 0xff, Level::Unknown, Level::Unknown).with_rdy(Level::Unknown))
        );
        Ok(())
    }
    #[test]
    fn bad_lines() {
        for bad in ["100 0200 A9 1", "100 10000 A9 1 1", "100 0200 A9 2 1", "x 0200 A9 1 1", "99999999999999999999999 0 0 1 1"] {
            let e = parse_line(bad, 7).unwrap_err();
            assert_eq!(e.kind, ErrorKind::Syntax, "{}", bad);
            assert!(e.msg.contains("line 7"), "{}", e.msg);
        }
    }
    #[test]
    fn reader() {
        let text = "; test capture\n0 0200 a9 1 1\n\n1 0201 05 0 1\nbogus\n2 0202 ea 1 1\n";
        let mut r = CaptureReader::new(Cursor::new(text));
        assert_eq!(r.next().map(|c| c.ok()), Some(Some(RawCycle::fetch(0, 0x0200, 0xa9))));
        assert_eq!(r.next().map(|c| c.ok()), Some(Some(RawCycle::read(1, 0x0201, 0x05))));
        match r.next() {
            Some(Err(e)) => assert!(e.msg.contains("line 5"), "{}", e.msg),
            _ => panic!("expected a syntax error"),
        }
        assert_eq!(r.next().map(|c| c.ok()), Some(Some(RawCycle::fetch(2, 0x0202, 0xea))));
        assert!(r.next().is_none());
    }
}
