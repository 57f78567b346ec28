//! The dictionary entry type: either a builtin vtable slot or a stored body
//! with its own residual cursor and segment-mark bookkeeping.

use indexmap::IndexMap;

use crate::builtins::Builtin;

/// One element of a stored body. Plain text, a parameter slot (`ss`/`sc`), or
/// a creation-mark placeholder (`cr`).
///
/// The source packs these as private-use code points inside a raw character
/// buffer; that only works because its characters are at least 20 bits wide.
/// This tagged sum type carries the same contract without relying on spare
/// code-point ranges, and is the representation named in the design notes
/// for narrower character widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElem {
    Char(char),
    /// Segment-mark index, `0..=62`.
    Seg(u8),
    Create,
}

pub const MAXMARKS: u8 = 62;

/// Renders one body element as the text a scan primitive returns: plain
/// characters verbatim, marks in the source's debug-trace notation.
#[must_use]
pub(crate) fn render_elem(e: &BodyElem) -> String {
    match e {
        BodyElem::Char(c) => c.to_string(),
        BodyElem::Seg(n) => format!("^{n:02}"),
        BodyElem::Create => "^00".to_string(),
    }
}

/// True if `body[i..]` is a contiguous run of `BodyElem::Char` spelling `pattern`.
#[must_use]
pub(crate) fn matches_body_at(body: &[BodyElem], i: usize, pattern: &[char]) -> bool {
    if pattern.is_empty() || i + pattern.len() > body.len() {
        return false;
    }
    pattern.iter().enumerate().all(|(k, c)| matches!(&body[i + k], BodyElem::Char(bc) if bc == c))
}

/// A user-defined name's stored body plus its private read cursor.
#[derive(Debug, Clone, Default)]
pub struct UserBody {
    pub body: Vec<BodyElem>,
    pub residual: usize,
    pub maxsegmark: u8,
}

/// Whether a dictionary entry dispatches to a builtin function or expands a
/// stored body.
#[derive(Debug, Clone)]
pub enum NameKind {
    Builtin(Builtin),
    User(UserBody),
}

/// One dictionary entry.
#[derive(Debug, Clone)]
pub struct Name {
    pub name: String,
    pub trace: bool,
    pub locked: bool,
    /// When true, the frame's result buffer is not collected into the caller
    /// (e.g. `ds`, `ps`: side-effecting primitives with no meaningful result).
    pub sideeffect: bool,
    pub minargs: usize,
    pub kind: NameKind,
}

impl Name {
    #[must_use]
    pub fn new_user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trace: false,
            locked: false,
            sideeffect: false,
            minargs: 0,
            kind: NameKind::User(UserBody::default()),
        }
    }

    #[must_use]
    pub fn new_builtin(name: impl Into<String>, builtin: Builtin, minargs: usize, sideeffect: bool) -> Self {
        Self {
            name: name.into(),
            trace: false,
            locked: true,
            sideeffect,
            minargs,
            kind: NameKind::Builtin(builtin),
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, NameKind::Builtin(_))
    }

    #[must_use]
    pub fn user_body(&self) -> Option<&UserBody> {
        match &self.kind {
            NameKind::User(b) => Some(b),
            NameKind::Builtin(_) => None,
        }
    }

    pub fn user_body_mut(&mut self) -> Option<&mut UserBody> {
        match &mut self.kind {
            NameKind::User(b) => Some(b),
            NameKind::Builtin(_) => None,
        }
    }
}

/// Name-to-[`Name`] mapping. Insertion-ordered so builtin registration order
/// is stable; `names` sorts its own snapshot when reporting.
#[derive(Debug, Clone, Default)]
pub struct Dictionary(IndexMap<String, Name>);

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Name> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Name> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, entry: Name) {
        self.0.insert(entry.name.clone(), entry);
    }

    /// Deletes `name` unless it is locked or absent; returns whether it was deleted.
    pub fn erase(&mut self, name: &str) -> bool {
        match self.0.get(name) {
            Some(n) if n.locked => false,
            Some(_) => self.0.shift_remove(name).is_some(),
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sorted, comma-separated names as `names` reports them: user-defined
    /// only unless `all` is set.
    #[must_use]
    pub fn sorted_names(&self, all: bool) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .0
            .values()
            .filter(|n| all || !n.is_builtin())
            .map(|n| n.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Locks every currently-defined name (applied to the startup program's
    /// definitions before user code runs).
    pub fn lock_all(&mut self) {
        for n in self.0.values_mut() {
            n.locked = true;
        }
    }
}
