//! `ps`, `rs`, `psr`, `pf`, `cm`: standard stream access and meta-character
//! reassignment.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::{escape_trace, CallTracer};
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

pub(crate) fn builtin_ps<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let s = escape_trace(arg(args, 1));
    if arg(args, 2) == "stderr" {
        ttm.output.write_stderr(&s);
    } else {
        ttm.output.write_stdout(&s);
    }
    Ok(String::new())
}

pub(crate) fn builtin_rs<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    let stop = ttm.meta.metac;
    Ok(ttm.input.read_until(stop).unwrap_or_default())
}

pub(crate) fn builtin_psr<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    ttm.output.write_stdout(&escape_trace(arg(args, 1)));
    let stop = ttm.meta.metac;
    Ok(ttm.input.read_until(stop).unwrap_or_default())
}

pub(crate) fn builtin_pf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    Ok(String::new())
}

pub(crate) fn builtin_cm<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let s = arg(args, 1);
    let c = s.chars().next().ok_or_else(|| RunError::new(ErrorKind::EAscii, "cm requires one character"))?;
    if !c.is_ascii() || s.chars().count() != 1 {
        return Err(RunError::new(ErrorKind::EAscii, format!("{s:?} is not a single ASCII character")));
    }
    ttm.meta.metac = c;
    Ok(String::new())
}
