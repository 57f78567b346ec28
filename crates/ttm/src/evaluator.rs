//! Locates the named function, checks arity, invokes the builtin or expands
//! the user body, and (for top-level calls) routes the result to the active
//! or passive buffer.

use crate::buffer::StringBuffer;
use crate::error::{ErrorKind, RunError};
use crate::frame::Frame;
use crate::io::{InputSource, OutputSink};
use crate::name::NameKind;
use crate::tracer::CallTracer;
use crate::Ttm;

impl<O: OutputSink, I: InputSource, Tr: CallTracer> Ttm<O, I, Tr> {
    /// Top-level call entry: runs the call and routes its result per `active`.
    pub(crate) fn evaluate(&mut self, active: bool) -> Result<(), RunError> {
        if let Some(s) = self.execute_call(active)? {
            if active {
                self.active_insert(&s)?;
            } else {
                self.passive_append(&s)?;
            }
        }
        Ok(())
    }

    /// Runs one call without routing its result: used both for top-level
    /// calls (by [`Self::evaluate`]) and for calls nested inside another
    /// call's arguments, whose result is spliced directly into the argument
    /// text regardless of whether the inner call was active or passive.
    pub(crate) fn execute_call(&mut self, active: bool) -> Result<Option<String>, RunError> {
        self.execcount -= 1;
        if self.execcount < 0 {
            return Err(self.fatal(ErrorKind::EExecCount, "execution budget exhausted"));
        }

        self.frames
            .push(Frame::new(active), self.limits.stacksize)
            .map_err(|k| self.fatal(k, "frame stack overflow"))?;

        let result = self.parse_call().and_then(|()| self.run_frame());

        self.frames.pop().map_err(|k| self.fatal(k, "frame stack underflow"))?;
        result
    }

    fn run_frame(&mut self) -> Result<Option<String>, RunError> {
        let name = self.frames.top().map(Frame::name).unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(self.fatal(ErrorKind::EEos, "call has no function name"));
        }

        let entry = self
            .dict
            .get(&name)
            .cloned()
            .ok_or_else(|| self.fatal(ErrorKind::ENoName, format!("{name} is not defined")))?;

        let argc = self.frames.top().map(Frame::argc).unwrap_or_default();
        if argc < 1 + entry.minargs {
            return Err(self.fatal(
                ErrorKind::EFewParms,
                format!("{name} requires at least {} argument(s), got {}", entry.minargs, argc.saturating_sub(1)),
            ));
        }

        if !entry.sideeffect {
            if let Some(frame) = self.frames.top_mut() {
                frame.result = Some(StringBuffer::new());
            }
        }

        let trace_on = self.trace_flag || entry.trace;
        if trace_on {
            if let Some(f) = self.frames.top().cloned() {
                self.tracer.on_call_begin(&f);
            }
        }

        let args = self.frames.top().map(|f| f.args.clone()).unwrap_or_default();
        let produced = match &entry.kind {
            NameKind::Builtin(b) => b.call(self, &args).map_err(|e| self.attach_trace(e))?,
            NameKind::User(body) => self.expand_body(body, &args)?,
        };

        let limit = self.limits.buffersize;
        let append_result = if let Some(buf) = self.frames.top_mut().and_then(|f| f.result.as_mut()) {
            buf.append(&produced, limit)
        } else {
            Ok(())
        };
        append_result.map_err(|k| self.fatal(k, "call result exceeded buffersize"))?;

        if trace_on {
            if let Some(f) = self.frames.top().cloned() {
                self.tracer.on_call_end(&f, &produced);
            }
        }

        Ok(self.frames.top().and_then(|f| f.result.as_ref()).map(StringBuffer::as_string))
    }
}
