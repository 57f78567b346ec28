//! `names`, `classes`, `ndf`, `time`, `xtime`, `ctime`, `tf`, `tn`, `lf`,
//! `uf`, `include`, `argv`, `argc`, `exit`, `ttm`: everything that inspects
//! or reconfigures the interpreter itself rather than a single name's body.

use chrono::{DateTime, Utc};

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::CallTracer;
use crate::Ttm;

fn arg(args: &[String], i: usize) -> &str {
    args.get(i).map_or("", String::as_str)
}

pub(crate) fn builtin_names<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let all = args.len() > 1;
    Ok(ttm.dict.sorted_names(all).join(","))
}

pub(crate) fn builtin_classes<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    Ok(ttm.classes.sorted_names().join(","))
}

pub(crate) fn builtin_ndf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let t = arg(args, 2).to_string();
    let f = arg(args, 3).to_string();
    Ok(if ttm.dict.contains(arg(args, 1)) { t } else { f })
}

/// Hundredths of a second since the Unix epoch.
pub(crate) fn builtin_time<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    let now = Utc::now();
    let hundredths = now.timestamp() * 100 + i64::from(now.timestamp_subsec_millis()) / 10;
    Ok(hundredths.to_string())
}

/// Hundredths of a second of process wall-clock time since interpreter
/// construction, standing in for CPU time (no process CPU-time accessor is
/// in the dependency stack).
pub(crate) fn builtin_xtime<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    let hundredths = ttm.started_at.elapsed().as_millis() / 10;
    Ok(hundredths.to_string())
}

pub(crate) fn builtin_ctime<O: OutputSink, I: InputSource, Tr: CallTracer>(
    _ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let hundredths: i64 = arg(args, 1)
        .parse()
        .map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{:?} is not a decimal integer", arg(args, 1))))?;
    let secs = hundredths.div_euclid(100);
    let millis = u32::try_from(hundredths.rem_euclid(100) * 10).unwrap_or(0);
    let dt: DateTime<Utc> = DateTime::from_timestamp(secs, millis * 1_000_000)
        .ok_or_else(|| RunError::new(ErrorKind::ERange, "timestamp out of range"))?;
    Ok(dt.format("%a %b %e %H:%M:%S %Y").to_string())
}

pub(crate) fn builtin_tf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    for name in &args[1..] {
        if let Some(entry) = ttm.dict.get_mut(name) {
            entry.trace = true;
        }
    }
    Ok(String::new())
}

pub(crate) fn builtin_tn<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    if args.len() <= 1 {
        ttm.trace_flag = false;
    } else {
        for name in &args[1..] {
            if let Some(entry) = ttm.dict.get_mut(name) {
                entry.trace = false;
            }
        }
    }
    Ok(String::new())
}

pub(crate) fn builtin_lf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    for name in &args[1..] {
        if let Some(entry) = ttm.dict.get_mut(name) {
            entry.locked = true;
        }
    }
    Ok(String::new())
}

pub(crate) fn builtin_uf<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    for name in &args[1..] {
        if let Some(entry) = ttm.dict.get_mut(name) {
            entry.locked = false;
        }
    }
    Ok(String::new())
}

pub(crate) fn builtin_include<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let path = arg(args, 1);
    let contents = std::fs::read_to_string(path)
        .map_err(|e| RunError::new(ErrorKind::EInclude, format!("cannot read {path}: {e}")))?;
    ttm.active_insert(&contents)?;
    Ok(String::new())
}

pub(crate) fn builtin_argv<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    let i: usize = arg(args, 1)
        .parse()
        .map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{:?} is not a decimal integer", arg(args, 1))))?;
    ttm.argv.get(i).cloned().ok_or_else(|| RunError::new(ErrorKind::ERange, format!("argv index {i} out of range")))
}

pub(crate) fn builtin_argc<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    _args: &[String],
) -> Result<String, RunError> {
    Ok(ttm.argv.len().to_string())
}

pub(crate) fn builtin_exit<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    if args.len() > 1 {
        let code: i32 = arg(args, 1)
            .parse()
            .map_err(|_| RunError::new(ErrorKind::EDecimal, format!("{:?} is not a decimal integer", arg(args, 1))))?;
        ttm.exit_code = code;
    }
    ttm.exit_flag = true;
    Ok(String::new())
}

pub(crate) fn builtin_ttm<O: OutputSink, I: InputSource, Tr: CallTracer>(
    ttm: &mut Ttm<O, I, Tr>,
    args: &[String],
) -> Result<String, RunError> {
    match arg(args, 1) {
        "meta" => {
            let spec = arg(args, 2);
            let chars: Vec<char> = spec.chars().collect();
            if chars.len() != 5 {
                return Err(RunError::new(ErrorKind::ETtmCmd, "ttm;meta requires exactly 5 characters"));
            }
            ttm.meta.sharpc = chars[0];
            ttm.meta.openc = chars[1];
            ttm.meta.closec = chars[2];
            ttm.meta.semic = chars[3];
            ttm.meta.escapec = chars[4];
            Ok(String::new())
        }
        "info" => match arg(args, 2) {
            "name" => {
                let mut out = String::new();
                for name in &args[3..] {
                    let Some(entry) = ttm.dict.get(name) else { continue };
                    out.push_str(&format!(
                        "{name}: locked={} trace={} minargs={} builtin={}\n",
                        entry.locked,
                        entry.trace,
                        entry.minargs,
                        entry.is_builtin()
                    ));
                }
                Ok(out)
            }
            "class" => {
                let mut out = String::new();
                for name in &args[3..] {
                    let Some(class) = ttm.classes.get(name) else { continue };
                    out.push_str(&format!(
                        "{name}: negative={} characters={:?}\n",
                        class.negative, class.characters
                    ));
                }
                Ok(out)
            }
            _ => Err(RunError::new(ErrorKind::ETtmCmd, "ttm;info requires name or class")),
        },
        other => Err(RunError::new(ErrorKind::ETtmCmd, format!("unknown ttm subcommand {other:?}"))),
    }
}
