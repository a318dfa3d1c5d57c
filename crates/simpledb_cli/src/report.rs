//! Session statistics report.

use crate::session::{EndReason, Session};
use serde::Serialize;
use std::io::Write;

/// Summary of a finished session.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    /// Input lines processed.
    pub lines: u64,
    /// How the session ended.
    pub ended_by: &'static str,
    /// Transactions still open when input stopped.
    pub open_transactions: usize,
    /// Keys holding a value at the end of the session.
    pub live_keys: usize,
    /// Whether zero entries were kept in the count index.
    pub retain_zero_counts: bool,
    pub reads: u64,
    pub writes: u64,
    pub unsets: u64,
    pub count_queries: u64,
    pub transactions_begun: u64,
    pub transactions_committed: u64,
    pub transactions_rolled_back: u64,
    pub errors: u64,
}

impl SessionReport {
    pub fn new<W: Write>(session: &Session<W>, end: EndReason) -> Self {
        let store = session.store();
        let stats = store.stats().snapshot();
        Self {
            lines: session.lines(),
            ended_by: end.as_str(),
            open_transactions: store.depth().as_usize(),
            live_keys: store.len(),
            retain_zero_counts: store.config().retain_zero_counts,
            reads: stats.reads,
            writes: stats.writes,
            unsets: stats.unsets,
            count_queries: stats.count_queries,
            transactions_begun: stats.transactions_begun,
            transactions_committed: stats.transactions_committed,
            transactions_rolled_back: stats.transactions_rolled_back,
            errors: stats.errors,
        }
    }
}

/// Writes the report in the requested format (`json`, anything else is text).
pub fn print(
    report: &SessionReport,
    format: &str,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
        _ => print_text_output(report, out)?,
    }
    Ok(())
}

fn print_text_output(report: &SessionReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "SimpleDB Session")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Lines:     {} ({})", report.lines, report.ended_by)?;
    writeln!(out, "Live keys: {}", report.live_keys)?;
    writeln!(out, "Open transactions: {}", report.open_transactions)?;
    writeln!(out, "Retain zero counts: {}", report.retain_zero_counts)?;
    writeln!(out)?;
    writeln!(out, "Operations:")?;
    writeln!(out, "  GET:        {}", report.reads)?;
    writeln!(out, "  SET:        {}", report.writes)?;
    writeln!(out, "  UNSET:      {}", report.unsets)?;
    writeln!(out, "  NUMEQUALTO: {}", report.count_queries)?;
    writeln!(out)?;
    writeln!(out, "Transactions:")?;
    writeln!(out, "  Begun:       {}", report.transactions_begun)?;
    writeln!(out, "  Committed:   {}", report.transactions_committed)?;
    writeln!(out, "  Rolled back: {}", report.transactions_rolled_back)?;
    writeln!(out)?;
    writeln!(out, "Errors: {}", report.errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpledb_core::StoreConfig;
    use std::io;

    fn finished_session() -> (Session<io::Sink>, EndReason) {
        let mut session = Session::new(StoreConfig::default(), io::sink());
        let end = session
            .run("SET a 1\nBEGIN\nSET b 1\nGET a\nNUMEQUALTO 1\nBOGUS\n".as_bytes())
            .unwrap();
        (session, end)
    }

    #[test]
    fn report_reflects_session() {
        let (session, end) = finished_session();
        let report = SessionReport::new(&session, end);

        assert_eq!(report.lines, 6);
        assert_eq!(report.ended_by, "end-of-input");
        assert_eq!(report.open_transactions, 1);
        assert_eq!(report.live_keys, 2);
        assert_eq!(report.writes, 2);
        assert_eq!(report.reads, 1);
        assert_eq!(report.count_queries, 1);
        assert_eq!(report.errors, 1);
        assert!(!report.retain_zero_counts);
    }

    #[test]
    fn report_carries_store_config() {
        let mut session = Session::new(StoreConfig::new().retain_zero_counts(true), io::sink());
        let end = session.run("SET a 1\nEND\n".as_bytes()).unwrap();
        let report = SessionReport::new(&session, end);

        assert!(report.retain_zero_counts);
        assert_eq!(report.ended_by, "end-command");
    }

    #[test]
    fn json_format() {
        let (session, end) = finished_session();
        let report = SessionReport::new(&session, end);

        let mut out = Vec::new();
        print(&report, "json", &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["live_keys"], 2);
        assert_eq!(value["ended_by"], "end-of-input");
    }

    #[test]
    fn text_format() {
        let (session, end) = finished_session();
        let report = SessionReport::new(&session, end);

        let mut out = Vec::new();
        print(&report, "text", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("SimpleDB Session"));
        assert!(text.contains("Live keys: 2"));
    }
}
