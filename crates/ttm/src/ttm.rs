//! Global interpreter state and the top-level entry point.

use crate::builtins::register_builtins;
use crate::charclass::ClassTable;
use crate::error::{ErrorKind, RunError};
use crate::frame::FrameStack;
use crate::io::{InputSource, OutputSink};
use crate::name::Dictionary;
use crate::resource::ResourceLimits;
use crate::tracer::CallTracer;
use crate::StringBuffer;

/// The five reconfigurable metacharacters plus the I/O meta-character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaChars {
    pub sharpc: char,
    pub openc: char,
    pub closec: char,
    pub semic: char,
    pub escapec: char,
    pub metac: char,
}

impl Default for MetaChars {
    fn default() -> Self {
        Self { sharpc: '#', openc: '<', closec: '>', semic: ';', escapec: '\\', metac: '\n' }
    }
}

/// One interpreter instance: dictionary, class table, frame stack, budget
/// counters, flags, the active/passive buffers, and the pluggable I/O and
/// tracing collaborators.
pub struct Ttm<O: OutputSink, I: InputSource, Tr: CallTracer> {
    pub meta: MetaChars,
    pub dict: Dictionary,
    pub classes: ClassTable,
    pub frames: FrameStack,
    pub limits: ResourceLimits,
    pub execcount: i64,
    pub crcounter: u32,
    pub exit_flag: bool,
    pub exit_code: i32,
    pub trace_flag: bool,
    pub bare: bool,
    pub argv: Vec<String>,
    pub active: StringBuffer,
    pub passive: StringBuffer,
    pub output: O,
    pub input: I,
    pub tracer: Tr,
    pub(crate) started_at: std::time::Instant,
}

impl<O: OutputSink, I: InputSource, Tr: CallTracer> Ttm<O, I, Tr> {
    #[must_use]
    pub fn new(limits: ResourceLimits, output: O, input: I, tracer: Tr) -> Self {
        let mut ttm = Self {
            meta: MetaChars::default(),
            dict: Dictionary::new(),
            classes: ClassTable::new(),
            frames: FrameStack::new(),
            execcount: limits.execcount,
            limits,
            crcounter: 0,
            exit_flag: false,
            exit_code: 0,
            trace_flag: false,
            bare: false,
            argv: Vec::new(),
            active: StringBuffer::new(),
            passive: StringBuffer::new(),
            output,
            input,
            tracer,
            started_at: std::time::Instant::now(),
        };
        register_builtins(&mut ttm.dict);
        ttm
    }

    pub fn set_argv(&mut self, argv: Vec<String>) {
        self.argv = argv;
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Installs the source's two-line startup program (`comment`/`def`) and
    /// locks every name it defines, as the CLI does unless `-b` is given.
    pub fn install_startup_program(&mut self) -> Result<(), RunError> {
        const STARTUP: &str = "#<ds;comment;>\
#<ds;def;<##<ds;name;<text>>##<ss;name;subs>>>#<ss;def;name;subs;text>";
        self.run_str(STARTUP)?;
        self.dict.lock_all();
        Ok(())
    }

    /// Scans `program` to completion and returns everything written to the
    /// passive buffer: the output of one top-level run.
    pub fn run_str(&mut self, program: &str) -> Result<String, RunError> {
        self.active = StringBuffer::from_str(program);
        self.passive = StringBuffer::new();
        self.scan()?;
        Ok(self.passive.as_string())
    }

    /// Wraps an error with the current (already-unwound-to-here) frame trace.
    pub(crate) fn fatal(&self, kind: ErrorKind, message: impl Into<String>) -> RunError {
        RunError::new(kind, message).with_frames(self.frames.to_trace())
    }

    pub(crate) fn passive_put(&mut self, c: char) -> Result<(), RunError> {
        self.passive
            .put(c, self.limits.buffersize)
            .map_err(|k| self.fatal(k, "passive buffer exceeded buffersize"))
    }

    pub(crate) fn passive_append(&mut self, s: &str) -> Result<(), RunError> {
        self.passive
            .append(s, self.limits.buffersize)
            .map_err(|k| self.fatal(k, "passive buffer exceeded buffersize"))
    }

    /// Backfills the frame trace on an error a builtin raised with
    /// [`RunError::new`] directly, rather than through [`Self::fatal`].
    pub(crate) fn attach_trace(&self, mut err: RunError) -> RunError {
        if err.frames.is_empty() {
            err.frames = self.frames.to_trace();
        }
        err
    }

    pub(crate) fn active_insert(&mut self, s: &str) -> Result<(), RunError> {
        self.active
            .insert(s, self.limits.buffersize)
            .map_err(|k| self.fatal(k, "active buffer exceeded buffersize"))
    }
}
