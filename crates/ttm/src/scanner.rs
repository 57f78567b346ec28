//! Top-level scan loop: walks the active buffer, handles escapes and
//! angle-quoted literals, and hands off to the evaluator at call starts.

use crate::error::{ErrorKind, RunError};
use crate::io::{InputSource, OutputSink};
use crate::tracer::CallTracer;
use crate::Ttm;

impl<O: OutputSink, I: InputSource, Tr: CallTracer> Ttm<O, I, Tr> {
    /// Drives the active buffer to end-of-string or until `exit_flag` is set.
    pub(crate) fn scan(&mut self) -> Result<(), RunError> {
        loop {
            if self.exit_flag {
                return Ok(());
            }
            let Some(c) = self.active.peek(0) else {
                return Ok(());
            };

            if c == self.meta.escapec {
                self.active.skip(1);
                match self.active.next() {
                    Some(raw) => self.passive_put(raw)?,
                    None => return Err(self.fatal(ErrorKind::EEos, "escape at end of active buffer")),
                }
                continue;
            }

            if c == self.meta.sharpc {
                if self.active.peek(1) == Some(self.meta.openc) {
                    self.active.skip(2);
                    self.evaluate(true)?;
                    continue;
                }
                if self.active.peek(1) == Some(self.meta.sharpc) && self.active.peek(2) == Some(self.meta.openc) {
                    self.active.skip(3);
                    self.evaluate(false)?;
                    continue;
                }
                self.active.skip(1);
                self.passive_put(c)?;
                continue;
            }

            if c == self.meta.openc {
                let content = self.read_angle_literal()?;
                self.passive_append(&content)?;
                continue;
            }

            self.active.skip(1);
            self.passive_put(c)?;
        }
    }

    /// Expects `active.pos` at an `openc`; consumes through the matching
    /// `closec` (tracking nested brackets and escapes) and returns the
    /// content with the outermost pair of brackets stripped.
    pub(crate) fn read_angle_literal(&mut self) -> Result<String, RunError> {
        let opener = self.active.next();
        debug_assert_eq!(opener, Some(self.meta.openc));
        let mut depth: u32 = 1;
        let mut out = String::new();
        loop {
            match self.active.next() {
                None => return Err(self.fatal(ErrorKind::EEos, "unterminated angle-quoted literal")),
                Some(c) if c == self.meta.escapec => match self.active.next() {
                    Some(raw) => out.push(raw),
                    None => return Err(self.fatal(ErrorKind::EEos, "escape at end of active buffer")),
                },
                Some(c) if c == self.meta.openc => {
                    depth += 1;
                    out.push(c);
                }
                Some(c) if c == self.meta.closec => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push(c);
                }
                Some(c) => out.push(c),
            }
        }
    }
}
