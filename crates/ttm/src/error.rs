//! Error kinds and the fatal-error value raised by the evaluator.
//!
//! TTM is fail-stop: the first error unwinds every pending frame. [`RunError`]
//! carries enough of the frame stack to reproduce the source's diagnostic dump
//! without the core knowing whether its caller will print it or keep running
//! as an embedded library.

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// One error code from the source implementation's fault table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ErrorKind {
    /// Unknown dictionary or class name.
    ENoName,
    /// Attempt to mutate or read the body of a builtin as if it were user-defined.
    ENoPrim,
    /// `argc - 1 < minargs`.
    EFewParms,
    /// `argc > 63`.
    EManyParms,
    /// Unexpected end of active buffer mid-call.
    EEos,
    /// Non-integer where an integer was required.
    EDecimal,
    /// Negative count where a non-negative one was required.
    ENotNegative,
    /// Division by zero.
    EArithmetic,
    /// `argv` index out of range.
    ERange,
    /// Frame stack would grow past `stacksize`.
    EStackOverflow,
    /// Frame stack popped while already empty.
    EStackUnderflow,
    /// Execution budget (`execcount`) exhausted.
    EExecCount,
    /// `include` could not read its target file.
    EInclude,
    /// General file I/O failure.
    EIo,
    /// Malformed `ttm;...` subcommand.
    ETtmCmd,
    /// Non-ASCII input where ASCII was required (e.g. `cm`).
    EAscii,
    /// An active or passive buffer, or a result buffer, would exceed `buffersize`.
    EBufferSize,
}

/// A snapshot of one pending call, kept for the frame-stack dump on fatal error.
#[derive(Debug, Clone)]
pub struct FrameTrace {
    pub name: String,
    pub active: bool,
    pub args: Vec<String>,
}

impl fmt::Display for FrameTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opener = if self.active { "#<" } else { "##<" };
        write!(f, "{opener}{}>", self.args.join(";"))
    }
}

/// The single error type the core ever returns.
///
/// Never calls `process::exit`: a host embedding the interpreter as a library
/// decides what to do with it. The CLI collaborator formats it, dumps
/// `frames`, and maps `kind` to an exit code.
#[derive(Debug, Clone)]
pub struct RunError {
    pub kind: ErrorKind,
    pub message: String,
    pub frames: Vec<FrameTrace>,
}

impl RunError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), frames: Vec::new() }
    }

    #[must_use]
    pub fn with_frames(mut self, frames: Vec<FrameTrace>) -> Self {
        self.frames = frames;
        self
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RunError {}
