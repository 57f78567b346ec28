//! Body expander: walks a stored body substituting segment marks with
//! arguments and creation marks with a fresh counter value.

use crate::error::RunError;
use crate::io::{InputSource, OutputSink};
use crate::name::{BodyElem, UserBody};
use crate::tracer::CallTracer;
use crate::Ttm;

impl<O: OutputSink, I: InputSource, Tr: CallTracer> Ttm<O, I, Tr> {
    /// `args[0]` is the function name, per TTM convention; a segment mark
    /// `n` with `n >= args.len()` is silently skipped rather than erroring.
    pub(crate) fn expand_body(&mut self, body: &UserBody, args: &[String]) -> Result<String, RunError> {
        let mut out = String::new();
        let mut create_value: Option<String> = None;
        for elem in &body.body {
            match elem {
                BodyElem::Char(c) => out.push(*c),
                BodyElem::Seg(n) => {
                    if let Some(a) = args.get(*n as usize) {
                        out.push_str(a);
                    }
                }
                BodyElem::Create => {
                    if create_value.is_none() {
                        self.crcounter += 1;
                        create_value = Some(format!("{:04}", self.crcounter));
                    }
                    if let Some(v) = &create_value {
                        out.push_str(v);
                    }
                }
            }
        }
        Ok(out)
    }
}
