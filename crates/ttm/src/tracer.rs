//! Per-call execution tracing (`-d t`, `tf`/`tn`).
//!
//! Mirrors the trait-based tracer split used elsewhere in this codebase:
//! a [`NoopTracer`] for the untraced path, a [`StderrTracer`] that reproduces
//! the source's `[dd] begin:`/`[dd] end:` transcript format, and a
//! [`RecordingTracer`] so tests can assert on the trace without scraping
//! stderr text.

use crate::frame::Frame;

/// One traced event, as collected by [`RecordingTracer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Begin { name: String, args: Vec<String>, active: bool },
    End { name: String, args: Vec<String>, active: bool, result: String },
}

/// Hook points the evaluator calls around every function invocation.
pub trait CallTracer {
    fn on_call_begin(&mut self, _frame: &Frame) {}
    fn on_call_end(&mut self, _frame: &Frame, _result: &str) {}
}

/// Default tracer: both hooks are no-ops and should inline away entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl CallTracer for NoopTracer {}

/// Reproduces the source's debug transcript on stderr.
///
/// ```text
/// [dd] begin: #<name;arg;...>
/// [dd] end: #<name;...> => "result"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTracer;

impl CallTracer for StderrTracer {
    fn on_call_begin(&mut self, frame: &Frame) {
        eprintln!("[dd] begin: {}", format_call(frame));
    }

    fn on_call_end(&mut self, frame: &Frame, result: &str) {
        eprintln!("[dd] end: {} => \"{}\"", format_call(frame), escape_trace(result));
    }
}

/// Collects every begin/end event for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    pub events: Vec<TraceEvent>,
}

impl CallTracer for RecordingTracer {
    fn on_call_begin(&mut self, frame: &Frame) {
        self.events.push(TraceEvent::Begin {
            name: frame.name().to_string(),
            args: frame.args.clone(),
            active: frame.active,
        });
    }

    fn on_call_end(&mut self, frame: &Frame, result: &str) {
        self.events.push(TraceEvent::End {
            name: frame.name().to_string(),
            args: frame.args.clone(),
            active: frame.active,
            result: result.to_string(),
        });
    }
}

fn format_call(frame: &Frame) -> String {
    let opener = if frame.active { "#<" } else { "##<" };
    format!("{opener}{}>", frame.args.join(";"))
}

/// Control characters as the source's escaped printable rendering; segment
/// and creation marks as `^NN`.
#[must_use]
pub fn escape_trace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
