//! `dcl`, `dncl`, `ecl`, `ccl`, `scl`, `tcl`: character-class table
//! management and class membership scanning against a target name's
//! residual cursor.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::name::BodyElem;
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

fn define<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
    negative: bool,
) -> Result<String, RunError> {
    let name = arg(args, 1).to_string();
    let characters = arg(args, 2).to_string();
    ttm.classes.define(name, characters, negative);
    Ok(String::new())
}

pub(crate) fn builtin_dcl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    define(ttm, args, false)
}

pub(crate) fn builtin_dncl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    define(ttm, args, true)
}

pub(crate) fn builtin_ecl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    for name in &args[1..] {
        ttm.classes.erase(name);
    }
    Ok(String::new())
}

/// Consumes the maximal run of characters at `residual` that are members (or
/// non-members, per `take_members`) of `class`; returns the consumed text.
fn scan_class<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    class_name: &str,
    target_name: &str,
) -> Result<String, RunError> {
    let class = ttm
        .classes
        .get(class_name)
        .cloned()
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{class_name} is not a defined class")))?;
    let entry = ttm
        .dict
        .get_mut(target_name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{target_name} is not defined")))?;
    let body = entry
        .user_body_mut()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{target_name} is a builtin")))?;
    let mut out = String::new();
    while let Some(BodyElem::Char(c)) = body.body.get(body.residual) {
        if !class.contains(*c) {
            break;
        }
        out.push(*c);
        body.residual += 1;
    }
    Ok(out)
}

pub(crate) fn builtin_ccl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    scan_class(ttm, arg(args, 1), arg(args, 2))
}

pub(crate) fn builtin_scl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    scan_class(ttm, arg(args, 1), arg(args, 2))?;
    Ok(String::new())
}

pub(crate) fn builtin_tcl<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let class_name = arg(args, 1);
    let target_name = arg(args, 2);
    let t = arg(args, 3).to_string();
    let f = arg(args, 4).to_string();
    let class = ttm
        .classes
        .get(class_name)
        .cloned()
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{class_name} is not a defined class")))?;
    let entry = ttm
        .dict
        .get(target_name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{target_name} is not defined")))?;
    let body = entry
        .user_body()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{target_name} is a builtin")))?;
    Ok(match body.body.get(body.residual) {
        Some(BodyElem::Char(c)) if class.contains(*c) => t,
        _ => f,
    })
}
