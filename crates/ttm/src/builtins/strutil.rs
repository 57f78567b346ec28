//! `gn`, `zlc`, `zlcp`, `flip`, `norm`: pure string utilities with no
//! dictionary interaction.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

pub(crate) fn builtin_gn<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let n: i64 = arg(args, 1)
        .parse()
        .map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{:?} is not a decimal integer", arg(args, 1))))?;
    let s = arg(args, 2);
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let count = (n.unsigned_abs() as usize).min(len);
    let slice = if n >= 0 { &chars[..count] } else { &chars[len - count..] };
    Ok(slice.iter().collect())
}

pub(crate) fn builtin_zlc<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let escapec = ttm.meta.escapec;
    let semic = ttm.meta.semic;
    let mut out = String::new();
    let mut depth: i32 = 0;
    let mut chars = arg(args, 1).chars();
    while let Some(c) = chars.next() {
        if c == escapec {
            out.push(c);
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else if c == '(' {
            depth += 1;
            out.push(c);
        } else if c == ')' {
            depth -= 1;
            out.push(c);
        } else if c == ',' && depth == 0 {
            out.push(semic);
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

pub(crate) fn builtin_zlcp<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let escapec = ttm.meta.escapec;
    let semic = ttm.meta.semic;
    let s = arg(args, 1);
    let mut out = String::new();
    let mut depth: i32 = 0;
    let mut pos = 0usize;
    let chars: Vec<char> = s.chars().collect();
    while pos < chars.len() {
        let c = chars[pos];
        if c == escapec {
            out.push(c);
            pos += 1;
            if pos < chars.len() {
                out.push(chars[pos]);
                pos += 1;
            }
            continue;
        }
        if c == '(' {
            if depth == 0 && pos > 0 {
                out.push(semic);
            }
            depth += 1;
            pos += 1;
            continue;
        }
        if c == ')' {
            depth -= 1;
            pos += 1;
            if depth == 0 && chars.get(pos) == Some(&',') {
                pos += 1;
            }
            continue;
        }
        if c == ',' && depth == 0 {
            out.push(semic);
            pos += 1;
            continue;
        }
        out.push(c);
        pos += 1;
    }
    Ok(out)
}

pub(crate) fn builtin_flip<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(arg(args, 1).chars().rev().collect())
}

pub(crate) fn builtin_norm<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    Ok(arg(args, 1).chars().count().to_string())
}
