//! `ds`, `ap`, `cf`, `es`, `cr`, `ss`, `sc`: dictionary entry creation and
//! body rewriting.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::name::{matches_body_at, BodyElem, Name, NameKind, UserBody, MAXMARKS};
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

fn to_chars(s: &str) -> Vec<BodyElem> {
    s.chars().map(BodyElem::Char).collect()
}

pub(crate) fn builtin_ds<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let name = arg(args, 1);
    let body = arg(args, 2);
    ttm.dict.insert(Name {
        name: name.to_string(),
        trace: false,
        locked: false,
        sideeffect: true,
        minargs: 0,
        kind: NameKind::User(UserBody { body: to_chars(body), residual: 0, maxsegmark: 0 }),
    });
    Ok(String::new())
}

pub(crate) fn builtin_ap<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let name = arg(args, 1);
    let suffix = arg(args, 2);
    let entry = ttm
        .dict
        .get_mut(name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{name} is not defined")))?;
    let body = entry
        .user_body_mut()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{name} is a builtin")))?;
    body.body.extend(to_chars(suffix));
    body.residual = body.body.len();
    Ok(String::new())
}

pub(crate) fn builtin_cf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let new_name = arg(args, 1);
    let old_name = arg(args, 2);
    let old = ttm
        .dict
        .get(old_name)
        .cloned()
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{old_name} is not defined")))?;
    ttm.dict.insert(Name { name: new_name.to_string(), ..old });
    Ok(String::new())
}

pub(crate) fn builtin_es<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    for name in &args[1..] {
        ttm.dict.erase(name);
    }
    Ok(String::new())
}

pub(crate) fn builtin_cr<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let name = arg(args, 1);
    let pattern: Vec<char> = arg(args, 2).chars().collect();
    let entry = ttm
        .dict
        .get_mut(name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{name} is not defined")))?;
    let body = entry
        .user_body_mut()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{name} is a builtin")))?;
    if pattern.is_empty() {
        return Ok(String::new());
    }
    let start = body.residual;
    let mut rewritten = body.body[..start].to_vec();
    let mut i = start;
    while i < body.body.len() {
        if matches_body_at(&body.body, i, &pattern) {
            rewritten.push(BodyElem::Create);
            i += pattern.len();
        } else {
            rewritten.push(body.body[i].clone());
            i += 1;
        }
    }
    body.body = rewritten;
    Ok(String::new())
}

/// Shared by `ss` and `sc`: replaces every occurrence of each `s_i` (in
/// order) with a fresh segment mark, accumulating across all substitutions
/// rather than restarting from the unmodified body each time.
fn segment_substitute(body: &mut UserBody, subs: &[String]) -> usize {
    let mut count = 0;
    for sub in subs {
        if sub.is_empty() || body.maxsegmark >= MAXMARKS {
            continue;
        }
        let mark = body.maxsegmark + 1;
        let pattern: Vec<char> = sub.chars().collect();
        let mut rewritten = Vec::with_capacity(body.body.len());
        let mut i = 0;
        while i < body.body.len() {
            if matches_body_at(&body.body, i, &pattern) {
                rewritten.push(BodyElem::Seg(mark));
                i += pattern.len();
                count += 1;
            } else {
                rewritten.push(body.body[i].clone());
                i += 1;
            }
        }
        body.body = rewritten;
        body.maxsegmark = mark;
    }
    count
}

pub(crate) fn builtin_ss<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let name = arg(args, 1);
    let entry = ttm
        .dict
        .get_mut(name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{name} is not defined")))?;
    let body = entry
        .user_body_mut()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{name} is a builtin")))?;
    segment_substitute(body, &args[2..]);
    Ok(String::new())
}

pub(crate) fn builtin_sc<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let name = arg(args, 1);
    let entry = ttm
        .dict
        .get_mut(name)
        .ok_or_else(|| RunError::new(ErrorKind::ENoName, format!("{name} is not defined")))?;
    let body = entry
        .user_body_mut()
        .ok_or_else(|| RunError::new(ErrorKind::ENoPrim, format!("{name} is a builtin")))?;
    let count = segment_substitute(body, &args[2..]);
    Ok(count.to_string())
}
