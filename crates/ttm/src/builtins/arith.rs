//! `ad`, `mu`, `su`, `dv`, `dvr`, `abs`, `eq`, `gt`, `lt`, `eq?`, `gt?`, `lt?`:
//! decimal-integer arithmetic and comparison.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

fn parse(s: &str) -> Result<i64, RunError> {
    s.parse::<i64>().map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{s:?} is not a decimal integer")))
}

pub(crate) fn builtin_ad<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let mut total: i64 = 0;
    for a in &args[1..] {
        total += parse(a)?;
    }
    Ok(total.to_string())
}

pub(crate) fn builtin_mu<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let mut total: i64 = 1;
    for a in &args[1..] {
        total *= parse(a)?;
    }
    Ok(total.to_string())
}

pub(crate) fn builtin_su<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok((parse(arg(args, 1))? - parse(arg(args, 2))?).to_string())
}

pub(crate) fn builtin_dv<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let a = parse(arg(args, 1))?;
    let b = parse(arg(args, 2))?;
    if b == 0 {
        return Err(RunError::new(ErrorKind::EArithmetic, "division by zero"));
    }
    Ok((a / b).to_string())
}

pub(crate) fn builtin_dvr<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let a = parse(arg(args, 1))?;
    let b = parse(arg(args, 2))?;
    if b == 0 {
        return Err(RunError::new(ErrorKind::EArithmetic, "division by zero"));
    }
    Ok((a % b).to_string())
}

pub(crate) fn builtin_abs<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(parse(arg(args, 1))?.abs().to_string())
}

pub(crate) fn builtin_eq<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let (a, b) = (parse(arg(args, 1))?, parse(arg(args, 2))?);
    Ok(if a == b { arg(args, 3) } else { arg(args, 4) }.to_string())
}

pub(crate) fn builtin_gt<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let (a, b) = (parse(arg(args, 1))?, parse(arg(args, 2))?);
    Ok(if a > b { arg(args, 3) } else { arg(args, 4) }.to_string())
}

pub(crate) fn builtin_lt<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let (a, b) = (parse(arg(args, 1))?, parse(arg(args, 2))?);
    Ok(if a < b { arg(args, 3) } else { arg(args, 4) }.to_string())
}

pub(crate) fn builtin_eq_logical<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(if arg(args, 1) == arg(args, 2) { arg(args, 3) } else { arg(args, 4) }.to_string())
}

pub(crate) fn builtin_gt_logical<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(if arg(args, 1) > arg(args, 2) { arg(args, 3) } else { arg(args, 4) }.to_string())
}

pub(crate) fn builtin_lt_logical<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(if arg(args, 1) < arg(args, 2) { arg(args, 3) } else { arg(args, 4) }.to_string())
}
