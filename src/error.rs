use crate::bus::BusCycle;
use std::{convert::From, fmt};

/// Simple custom Error for the bus decoder
pub struct Error {
    pub kind: ErrorKind,
    pub ctx: Option<BusCycle>,
    pub msg: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// control lines did not resolve to a known bus cycle (strict mode only)
    AmbiguousBusCycle,
    /// malformed line in a capture file
    Syntax,
    /// underlying io error
    IO,
    /// catch-all for other errors
    General,
}

impl Error {
    pub fn new(kind: ErrorKind, ctx: Option<BusCycle>, message: &str) -> Error {
        Error {
            kind,
            ctx,
            msg: String::from(message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::new(ErrorKind::IO, None, e.to_string().as_str()) }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}: {}", red!("bus6502::Error"), self.msg) }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut res = write!(f, "{}", self.msg);
        if res.is_ok() {
            if let Some(ctx) = self.ctx {
                res = write!(f, "\nCycle: {}", ctx);
            }
        }
        res
    }
}
impl std::error::Error for Error {}
