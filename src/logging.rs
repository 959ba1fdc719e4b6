/*!
 * Logger setup. Log goes to stderr, level from `RUST_LOG`.
 * While stdin is a terminal it is switched to raw mode, so log lines end with `\r\n` then, like samples do.
 */

use std::fmt::Display;
use std::io::{self, Write};

use env_logger::{Builder, Env};
use log::Record;

/// Installs global logger; `raw_terminal` selects line ending.
pub fn init(raw_terminal: bool) {
    let eol = crate::input::line_ending(raw_terminal);
    Builder::from_env(Env::default())
        .format(move |buf, record| {
            let timestamp = buf.timestamp();
            write_record(buf, timestamp, record, eol)
        })
        .init();
}

fn write_record<W: Write>(out: &mut W, timestamp: impl Display, record: &Record, eol: &str) -> io::Result<()> {
    write!(out, "[{} {:<5} {}] {}{}", timestamp, record.level(), record.target(), record.args(), eol)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///
