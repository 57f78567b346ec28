use std::fs::File;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::{env, fs};

use ttm::{
    CallTracer, CollectSink, ErrorKind, InputSource, NoopTracer, OutputSink, ResourceLimits, RunError, StderrTracer,
    StdinSource, StringSource, Ttm,
};

/// Writes stdout to a file (`-o`) while leaving stderr on the real stream.
struct FileSink {
    stdout: File,
}

impl OutputSink for FileSink {
    fn write_stdout(&mut self, s: &str) {
        let _ = self.stdout.write_all(s.as_bytes());
    }

    fn write_stderr(&mut self, s: &str) {
        eprint!("{s}");
    }
}

/// Writes both stdout and stderr to the real stdout (`-d T`).
#[derive(Default)]
struct MergedSink;

impl OutputSink for MergedSink {
    fn write_stdout(&mut self, s: &str) {
        print!("{s}");
        let _ = io::stdout().flush();
    }

    fn write_stderr(&mut self, s: &str) {
        print!("{s}");
        let _ = io::stdout().flush();
    }
}

#[derive(Debug, Default)]
struct DebugFlags {
    trace: bool,
    bare: bool,
    merge_stderr: bool,
}

fn parse_debug_flags(s: &str) -> DebugFlags {
    let mut flags = DebugFlags::default();
    for c in s.chars() {
        match c {
            't' => flags.trace = true,
            'b' => flags.bare = true,
            'T' => flags.merge_stderr = true,
            _ => {}
        }
    }
    flags
}

/// Parses an `-X` tag=value pair; `k`/`m` suffixes scale by 2^10/2^20.
fn apply_limit(limits: &mut ResourceLimits, spec: &str) -> Result<(), String> {
    let (tag, value) =
        spec.split_once('=').ok_or_else(|| format!("malformed -X argument {spec:?}, expected tag=value"))?;
    let (digits, scale) = match value.chars().last() {
        Some('k' | 'K') => (&value[..value.len() - 1], 1024u64),
        Some('m' | 'M') => (&value[..value.len() - 1], 1024 * 1024),
        _ => (value, 1),
    };
    let n: u64 = digits.parse().map_err(|_| format!("invalid -X value {value:?}"))?;
    let scaled = n * scale;
    match tag {
        "b" => limits.buffersize = scaled as usize,
        "s" => limits.stacksize = scaled as usize,
        "x" => limits.execcount = scaled as i64,
        other => return Err(format!("unknown -X tag {other:?}")),
    }
    Ok(())
}

struct Options {
    program: String,
    stdin_file: Option<String>,
    stdout_file: Option<String>,
    interactive: bool,
    quiet: bool,
    debug: DebugFlags,
    limits: ResourceLimits,
    argv: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut program = String::new();
    let mut stdin_file = None;
    let mut stdout_file = None;
    let mut interactive = false;
    let mut quiet = false;
    let mut debug = DebugFlags::default();
    let mut limits = ResourceLimits::default();
    let mut argv = Vec::new();

    let mut i = 0;
    let mut past_options = false;
    while i < args.len() {
        let a = &args[i];
        if past_options {
            argv.push(a.clone());
            i += 1;
            continue;
        }
        match a.as_str() {
            "--" => past_options = true,
            "-e" => {
                i += 1;
                program.push_str(args.get(i).ok_or("-e requires an argument")?);
            }
            "-p" => {
                i += 1;
                let path = args.get(i).ok_or("-p requires an argument")?;
                program.push_str(&fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?);
            }
            "-f" => {
                i += 1;
                stdin_file = Some(args.get(i).ok_or("-f requires an argument")?.clone());
            }
            "-o" => {
                i += 1;
                stdout_file = Some(args.get(i).ok_or("-o requires an argument")?.clone());
            }
            "-i" => interactive = true,
            "-q" => quiet = true,
            "-V" => {
                println!("ttm {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-d" => {
                i += 1;
                debug = parse_debug_flags(args.get(i).ok_or("-d requires an argument")?);
            }
            "-X" => {
                i += 1;
                apply_limit(&mut limits, args.get(i).ok_or("-X requires an argument")?)?;
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("unrecognized option {other:?}"));
            }
            other => argv.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Options { program, stdin_file, stdout_file, interactive, quiet, debug, limits, argv })
}

fn report_error(err: &RunError) {
    eprintln!("{err}");
    for frame in &err.frames {
        eprintln!("  in {frame}");
    }
}

fn exit_code_for(err: &RunError) -> u8 {
    match err.kind {
        ErrorKind::EIo | ErrorKind::EInclude => 2,
        _ => 1,
    }
}

/// Installs the startup program (unless `bare`), runs `program` to
/// completion, prints its output (unless `quiet`), and returns the process
/// exit code: the value `exit` set, 1 on fatal error, else 0.
fn drive<O: OutputSink, I: InputSource, Tr: CallTracer>(
    mut ttm: Ttm<O, I, Tr>,
    program: &str,
    argv: Vec<String>,
    trace: bool,
    bare: bool,
    quiet: bool,
) -> ExitCode {
    ttm.trace_flag = trace;
    ttm.set_argv(argv);
    if !bare {
        if let Err(e) = ttm.install_startup_program() {
            report_error(&e);
            return ExitCode::from(exit_code_for(&e));
        }
    }
    match ttm.run_str(program) {
        Ok(out) => {
            if !quiet {
                print!("{out}");
                let _ = io::stdout().flush();
            }
            let code = ttm.exit_code();
            if code == 0 { ExitCode::SUCCESS } else { ExitCode::from(u8::try_from(code).unwrap_or(1)) }
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if opts.interactive {
        return run_interactive(opts);
    }

    let input = match &opts.stdin_file {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => StringSource::new(s),
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => StringSource::default(),
    };

    let Options { program, stdout_file, quiet, debug, limits, argv, .. } = opts;
    let trace = debug.trace;
    let bare = debug.bare;

    if let Some(path) = stdout_file {
        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("cannot create {path}: {e}");
                return ExitCode::FAILURE;
            }
        };
        let ttm = Ttm::new(limits, FileSink { stdout: file }, input, StderrTracer);
        drive(ttm, &program, argv, trace, bare, quiet)
    } else if debug.merge_stderr {
        let ttm = Ttm::new(limits, MergedSink, input, NoopTracer);
        drive(ttm, &program, argv, trace, bare, quiet)
    } else {
        let ttm = Ttm::new(limits, CollectSink::default(), input, StderrTracer);
        drive(ttm, &program, argv, trace, bare, quiet)
    }
}

fn run_interactive(opts: Options) -> ExitCode {
    let mut ttm = Ttm::new(opts.limits, CollectSink::default(), StdinSource, NoopTracer);
    ttm.trace_flag = opts.debug.trace;
    ttm.set_argv(opts.argv);
    if !opts.debug.bare {
        if let Err(e) = ttm.install_startup_program() {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    }
    if !opts.program.is_empty() {
        match ttm.run_str(&opts.program) {
            Ok(out) => {
                if !opts.quiet {
                    print!("{out}");
                }
            }
            Err(e) => {
                report_error(&e);
                return ExitCode::from(exit_code_for(&e));
            }
        }
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match ttm.run_str(&line) {
            Ok(out) => {
                if !opts.quiet {
                    println!("{out}");
                }
            }
            Err(e) => {
                report_error(&e);
                return ExitCode::from(exit_code_for(&e));
            }
        }
        if ttm.exit_code() != 0 {
            return ExitCode::from(u8::try_from(ttm.exit_code()).unwrap_or(1));
        }
    }
    ExitCode::SUCCESS
}
