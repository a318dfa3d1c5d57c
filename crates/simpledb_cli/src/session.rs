//! Input loop driving a [`Store`] through the command protocol.

use simpledb_core::{process_line, Reply, Store, StoreConfig};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

const BANNER: [&str; 3] = [
    "Welcome to the Simple Database program!",
    "To quit the program at any time, just enter END",
    "Please enter a command to get started:",
];

/// Why a session stopped reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// An `END` command was read.
    EndCommand,
    /// The input stream was exhausted.
    EndOfInput,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndCommand => "end-command",
            Self::EndOfInput => "end-of-input",
        }
    }
}

/// One client session: a store it owns exclusively plus an output sink.
pub struct Session<W: Write> {
    store: Store,
    out: W,
    lines: u64,
}

impl<W: Write> Session<W> {
    pub fn new(config: StoreConfig, out: W) -> Self {
        Self {
            store: Store::with_config(config),
            out,
            lines: 0,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Number of input lines processed so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        for line in BANNER {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Reads and executes lines until `END` or end of input.
    ///
    /// Only I/O failures are returned as errors; protocol errors are
    /// printed and the loop continues. Invalid UTF-8 is decoded lossily,
    /// so a garbled line is handled like any other malformed command.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<EndReason> {
        info!("session started");
        let mut end = EndReason::EndOfInput;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = raw {
                warn!(line = self.lines + 1, "input line is not valid UTF-8");
            }
            let line = raw.strip_suffix('\n').unwrap_or(&raw);
            let line = line.strip_suffix('\r').unwrap_or(line);
            if self.handle_line(line)?.is_end() {
                end = EndReason::EndCommand;
                break;
            }
        }
        self.out.flush()?;
        info!(
            lines = self.lines,
            reason = end.as_str(),
            depth = %self.store.depth(),
            "session ended"
        );
        Ok(end)
    }

    /// Executes one line and prints its output, if any.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Reply> {
        self.lines += 1;
        let reply = process_line(&mut self.store, line);
        if let Reply::Error(err) = &reply {
            debug!(line, error = %err, "command rejected");
        }
        if reply.has_output() {
            writeln!(self.out, "{reply}")?;
        }
        Ok(reply)
    }
}
