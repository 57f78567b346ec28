//! Named character sets, as created by `dcl`/`dncl` and consumed by `ccl`/`scl`/`tcl`.

use indexmap::IndexMap;

/// A named character set with an optional negation flag.
#[derive(Debug, Clone)]
pub struct Charclass {
    pub name: String,
    pub characters: String,
    pub negative: bool,
}

impl Charclass {
    #[must_use]
    pub fn new(name: impl Into<String>, characters: impl Into<String>, negative: bool) -> Self {
        Self { name: name.into(), characters: characters.into(), negative }
    }

    /// `c ∈ class` iff `(c ∈ characters) XOR negative`.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.characters.contains(c) ^ self.negative
    }
}

/// Name-to-[`Charclass`] mapping, insertion-ordered like the dictionary it sits beside.
#[derive(Debug, Clone, Default)]
pub struct ClassTable(IndexMap<String, Charclass>);

impl ClassTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, characters: impl Into<String>, negative: bool) {
        let name = name.into();
        self.0.insert(name.clone(), Charclass::new(name, characters, negative));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Charclass> {
        self.0.get(name)
    }

    pub fn erase(&mut self, name: &str) -> bool {
        self.0.shift_remove(name).is_some()
    }

    /// Sorted, comma-separated class names, as `classes` reports them.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
