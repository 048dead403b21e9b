//! Session-local string interning.
//!
//! The teacher's interner (`faxc-util::symbol`) is a global, thread-safe
//! `DashMap` because its compiler shares identifiers across a whole
//! invocation running many files concurrently. This compiler's concurrency
//! model is the opposite (spec §5: one file, one thread, no state crossing
//! file boundaries), so a global interner would be both unnecessary and
//! wrong — it would leak identifiers from one file's compilation into the
//! next. `Interner` is instead owned by the `Session` that drives one file.

use rustc_hash::FxHashMap;

/// A handle to an interned identifier string.
///
/// Comparing two `Symbol`s is an integer comparison; the backing text is
/// only needed when emitting VM code or formatting a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

/// Interns identifier text for one compilation session.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing `Symbol` if already seen.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(text) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, sym);
        sym
    }

    /// Resolves a previously interned `Symbol` back to its text.
    ///
    /// Panics if given a `Symbol` from a different `Interner` — this never
    /// happens in practice because each file's compilation owns exactly one
    /// `Interner` for its lifetime.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_interns_to_distinct_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let sym = interner.intern("counter");
        assert_eq!(interner.resolve(sym), "counter");
    }
}
