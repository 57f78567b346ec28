//! `cc`, `cn`, `sn`, `cp`, `cs`, `scn`, `isc`, `rrp`, `eos`: primitives that
//! read and advance a name's residual cursor.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::name::{matches_body_at, render_elem, BodyElem, UserBody};
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

fn target<'a, O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &'a mut Ttm<O, I, Tr>,
    name: &str,
) -> Result<&'a mut UserBody, RunError> {
    let entry = ttm
        .dict
        .get_mut(name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{name} is not defined")))?;
    entry.user_body_mut().ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{name} is a builtin")))
}

fn parse_int(s: &str) -> Result<i64, RunError> {
    s.parse::<i64>().map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{s:?} is not a decimal integer")))
}

pub(crate) fn builtin_cc<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let body = target(ttm, arg(args, 1))?;
    let Some(elem) = body.body.get(body.residual) else {
        return Ok(String::new());
    };
    let out = render_elem(elem);
    body.residual += 1;
    Ok(out)
}

pub(crate) fn builtin_cn<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let n = parse_int(arg(args, 1))?;
    if n < 0 {
        return Err(RunError::new(ErrorKind::ENotNegative, "cn requires a non-negative count"));
    }
    let body = target(ttm, arg(args, 2))?;
    let remaining = body.body.len() - body.residual;
    let count = (n as usize).min(remaining);
    let out: String = body.body[body.residual..body.residual + count].iter().map(render_elem).collect();
    body.residual += count;
    Ok(out)
}

pub(crate) fn builtin_sn<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let n = parse_int(arg(args, 1))?;
    let body = target(ttm, arg(args, 2))?;
    let advanced = (i64::try_from(body.residual).unwrap_or(i64::MAX) + n).max(0);
    body.residual = (advanced as usize).min(body.body.len());
    Ok(String::new())
}

pub(crate) fn builtin_cp<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let semic = ttm.meta.semic;
    let openc = ttm.meta.openc;
    let closec = ttm.meta.closec;
    let body = target(ttm, arg(args, 1))?;
    let mut depth: i32 = 0;
    let mut i = body.residual;
    let mut out = String::new();
    while i < body.body.len() {
        match &body.body[i] {
            BodyElem::Char(c) if *c == semic && depth == 0 => {
                i += 1;
                break;
            }
            e @ BodyElem::Char(c) if *c == openc => {
                depth += 1;
                out.push_str(&render_elem(e));
            }
            e @ BodyElem::Char(c) if *c == closec => {
                depth -= 1;
                out.push_str(&render_elem(e));
            }
            e => out.push_str(&render_elem(e)),
        }
        i += 1;
    }
    body.residual = i;
    Ok(out)
}

pub(crate) fn builtin_cs<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let body = target(ttm, arg(args, 1))?;
    let mut i = body.residual;
    let mut out = String::new();
    while i < body.body.len() {
        match &body.body[i] {
            BodyElem::Char(c) => out.push(*c),
            BodyElem::Seg(_) | BodyElem::Create => {
                i += 1;
                body.residual = i;
                return Ok(out);
            }
        }
        i += 1;
    }
    body.residual = i;
    Ok(out)
}

pub(crate) fn builtin_scn<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let pattern: Vec<char> = arg(args, 1).chars().collect();
    let f = arg(args, 3).to_string();
    let body = target(ttm, arg(args, 2))?;
    if pattern.is_empty() {
        return Ok(f);
    }
    let start = body.residual;
    let found = (start..body.body.len()).find(|&i| matches_body_at(&body.body, i, &pattern));
    match found {
        Some(pos) if pos == start => {
            body.residual = start + pattern.len();
            Ok(String::new())
        }
        Some(pos) => Ok(body.body[start..pos].iter().map(render_elem).collect()),
        None => Ok(f),
    }
}

pub(crate) fn builtin_isc<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let pattern: Vec<char> = arg(args, 1).chars().collect();
    let t = arg(args, 3).to_string();
    let f = arg(args, 4).to_string();
    let body = target(ttm, arg(args, 2))?;
    if pattern.is_empty() {
        return Ok(t);
    }
    if matches_body_at(&body.body, body.residual, &pattern) {
        body.residual += pattern.len();
        Ok(t)
    } else {
        Ok(f)
    }
}

pub(crate) fn builtin_rrp<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let body = target(ttm, arg(args, 1))?;
    body.residual = 0;
    Ok(String::new())
}

pub(crate) fn builtin_eos<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let t = arg(args, 2).to_string();
    let f = arg(args, 3).to_string();
    let body = target(ttm, arg(args, 1))?;
    Ok(if body.residual >= body.body.len() { t } else { f })
}
