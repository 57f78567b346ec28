//! Call parser: collects one call's arguments into the frame on top of the
//! stack, recursing into the evaluator for nested calls and the scanner's
//! angle-literal reader for nested quoted text.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::CallTracer;
use crate::Ttm;

impl<O: OutputSink, I: InputSource, Tr: CallTracer> Ttm<O, I, Tr> {
    /// Expects `active.pos` just past the call opener. Fills `args` on the
    /// frame currently on top of the stack and leaves `active.pos` just past
    /// the matching `closec`.
    pub(crate) fn parse_call(&mut self) -> Result<(), RunError> {
        let mut current = String::new();
        loop {
            let Some(c) = self.active.peek(0) else {
                return Err(self.fatal(ErrorKind::EEos, "unterminated call, missing closing bracket"));
            };

            if c == self.meta.escapec {
                self.active.skip(1);
                match self.active.next() {
                    Some(raw) => current.push(raw),
                    None => return Err(self.fatal(ErrorKind::EEos, "escape at end of active buffer")),
                }
                continue;
            }

            if c == self.meta.semic {
                self.active.skip(1);
                self.push_arg(std::mem::take(&mut current))?;
                continue;
            }

            if c == self.meta.closec {
                self.active.skip(1);
                self.push_arg(std::mem::take(&mut current))?;
                return Ok(());
            }

            if c == self.meta.sharpc {
                if self.active.peek(1) == Some(self.meta.openc) {
                    self.active.skip(2);
                    if let Some(s) = self.execute_call(true)? {
                        current.push_str(&s);
                    }
                    continue;
                }
                if self.active.peek(1) == Some(self.meta.sharpc) && self.active.peek(2) == Some(self.meta.openc) {
                    self.active.skip(3);
                    if let Some(s) = self.execute_call(false)? {
                        current.push_str(&s);
                    }
                    continue;
                }
                self.active.skip(1);
                current.push(c);
                continue;
            }

            if c == self.meta.openc {
                let inner = self.read_angle_literal()?;
                if current.is_empty() {
                    // A literal spanning the whole argument is stripped the
                    // same way the top-level scanner strips one: a stored
                    // body quoted this way must still read as a call once
                    // re-scanned after active-result re-insertion.
                    current.push_str(&inner);
                } else {
                    // A literal embedded after other text is protecting a
                    // fragment of the argument from semicolon-splitting, not
                    // standing in for the whole argument; its brackets stay
                    // as literal characters.
                    current.push(self.meta.openc);
                    current.push_str(&inner);
                    current.push(self.meta.closec);
                }
                continue;
            }

            self.active.skip(1);
            current.push(c);
        }
    }

    fn push_arg(&mut self, s: String) -> Result<(), RunError> {
        let too_many = self.frames.top().is_some_and(|f| f.args.len() >= 63);
        if too_many {
            return Err(self.fatal(ErrorKind::EManyParms, "call has more than 63 arguments"));
        }
        if let Some(frame) = self.frames.top_mut() {
            frame.args.push(s);
        }
        Ok(())
    }
}
