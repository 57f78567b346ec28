//! An embeddable TTM (Tool for Textual Manipulation) string macro
//! interpreter: a scanner/evaluator pair that drives active/passive buffer
//! evolution over a dictionary of user-defined and built-in names.
//!
//! The interpreter is generic over its I/O and tracing collaborators
//! ([`OutputSink`]/[`InputSource`]/[`CallTracer`]) so the same core runs
//! headless inside a host process or attached to real process stdio.

mod body;
mod buffer;
mod builtins;
mod charclass;
mod error;
mod evaluator;
mod frame;
mod io;
mod name;
mod parser;
mod resource;
mod scanner;
mod tracer;
mod ttm;

pub use buffer::StringBuffer;
pub use charclass::{Charclass, ClassTable};
pub use error::{ErrorKind, FrameTrace, RunError};
pub use frame::{Frame, FrameStack};
pub use io::{CollectSink, InputSource, NullSink, OutputSink, StdSink, StdinSource, StringSource};
pub use name::{BodyElem, Dictionary, Name, NameKind, UserBody, MAXMARKS};
pub use resource::{ResourceLimits, DEFAULT_BUFFERSIZE, DEFAULT_EXECCOUNT, DEFAULT_STACKSIZE};
pub use tracer::{escape_trace, CallTracer, NoopTracer, RecordingTracer, StderrTracer, TraceEvent};
pub use ttm::{MetaChars, Ttm};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(program: &str) -> String {
        let mut ttm = Ttm::new(ResourceLimits::default(), CollectSink::default(), StringSource::default(), NoopTracer);
        ttm.install_startup_program().expect("startup program must succeed");
        ttm.run_str(program).expect("program must succeed")
    }

    #[test]
    fn defines_and_calls_a_name() {
        assert_eq!(run("#<ds;greet;hello>#<greet>"), "hello");
    }

    #[test]
    fn nested_call_in_body_is_evaluated_on_expansion() {
        assert_eq!(run("#<ds;f;<#<ad;1;2>>>#<f>"), "3");
    }

    #[test]
    fn segment_substitution_round_trips_through_a_call() {
        assert_eq!(run("#<ds;pair;<a;b>>#<ss;pair;a;b>#<pair;X;Y>"), "X;Y");
    }

    #[test]
    fn variadic_addition() {
        assert_eq!(run("#<ad;10;20;30>"), "60");
    }

    #[test]
    fn append_extends_an_existing_body() {
        assert_eq!(run("#<ds;x;foo>#<ap;x;bar>#<x>"), "foobar");
    }

    #[test]
    fn class_scan_consumes_a_prefix_and_advances_residual() {
        assert_eq!(run("#<dcl;dig;0123456789>#<ds;s;123abc>#<ccl;dig;s>"), "123");
    }

    #[test]
    fn passive_call_result_is_not_rescanned() {
        assert_eq!(run(r"#<ds;x;\#<ad;1;1>>##<x>"), "#<ad;1;1>");
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let mut ttm = Ttm::new(ResourceLimits::default(), CollectSink::default(), StringSource::default(), NoopTracer);
        ttm.install_startup_program().unwrap();
        let err = ttm.run_str("#<dv;1;0>").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EArithmetic);
    }

    #[test]
    fn erasing_a_locked_name_is_a_no_op() {
        let mut ttm = Ttm::new(ResourceLimits::default(), CollectSink::default(), StringSource::default(), NoopTracer);
        ttm.install_startup_program().unwrap();
        ttm.run_str("#<es;ad>").unwrap();
        assert!(ttm.dict.contains("ad"));
    }
}
