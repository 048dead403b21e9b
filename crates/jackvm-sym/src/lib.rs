//! jackvm-sym — the Symbol Table (spec §3, §4.2).
//!
//! A two-level scoped map: `class_scope` lives for the whole class
//! compilation, `subroutine_scope` is cleared at the start of each
//! subroutine. Each of the four storage kinds has its own independently
//! counted index space, assigned in definition order with no gaps.
//!
//! Grounded on the teacher's `faxc-sem::scope` rib-chain design, collapsed
//! from an arbitrary-depth scope stack to exactly the two levels this
//! grammar has (spec §4.2 names only `class_scope` and `subroutine_scope` —
//! there is no nested block scoping in the source language).

use rustc_hash::FxHashMap;

/// The storage class a declared name is defined with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Static,
    Field,
    Argument,
    Local,
}

/// The result of a kind lookup: a defined [`VarKind`], or `None` for a
/// name with no declaration in either scope (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
    None,
}

impl From<VarKind> for Kind {
    fn from(k: VarKind) -> Self {
        match k {
            VarKind::Static => Kind::Static,
            VarKind::Field => Kind::Field,
            VarKind::Argument => Kind::Argument,
            VarKind::Local => Kind::Local,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    declared_type: String,
    kind: VarKind,
    index: u16,
}

/// Per-kind "next index to assign" counters (spec §3).
#[derive(Default)]
struct Counters {
    static_count: u16,
    field_count: u16,
    argument_count: u16,
    local_count: u16,
}

impl Counters {
    fn slot(&mut self, kind: VarKind) -> &mut u16 {
        match kind {
            VarKind::Static => &mut self.static_count,
            VarKind::Field => &mut self.field_count,
            VarKind::Argument => &mut self.argument_count,
            VarKind::Local => &mut self.local_count,
        }
    }

    fn get(&self, kind: VarKind) -> u16 {
        match kind {
            VarKind::Static => self.static_count,
            VarKind::Field => self.field_count,
            VarKind::Argument => self.argument_count,
            VarKind::Local => self.local_count,
        }
    }
}

/// The scoped symbol table for one class compilation.
#[derive(Default)]
pub struct SymbolTable {
    class_scope: FxHashMap<String, Entry>,
    subroutine_scope: FxHashMap<String, Entry>,
    counters: Counters,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new subroutine: clears the subroutine scope and resets the
    /// `Argument`/`Local` counters. `Static`/`Field` (and `class_scope`)
    /// are untouched — they persist for the whole class.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.counters.argument_count = 0;
        self.counters.local_count = 0;
    }

    /// Defines `name` with the given declared type and kind, assigning it
    /// the next free index for that kind. Re-defining an already-defined
    /// name in the same scope silently overwrites the previous entry —
    /// the source language leaves redefinition undefined, so last write
    /// wins (spec §4.2, known limitation 5).
    pub fn define(&mut self, name: &str, declared_type: &str, kind: VarKind) {
        let index = *self.counters.slot(kind);
        *self.counters.slot(kind) += 1;
        let entry = Entry {
            declared_type: declared_type.to_string(),
            kind,
            index,
        };
        match kind {
            VarKind::Static | VarKind::Field => {
                self.class_scope.insert(name.to_string(), entry);
            }
            VarKind::Argument | VarKind::Local => {
                self.subroutine_scope.insert(name.to_string(), entry);
            }
        }
    }

    /// The number of names defined with `kind` in the live scope.
    pub fn var_count(&self, kind: VarKind) -> u16 {
        self.counters.get(kind)
    }

    /// Resolves `name`: subroutine scope first, then class scope (spec
    /// §3 — the source language forbids shadowing, so lookup order never
    /// changes which entry is found, only what `None` means).
    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    pub fn kind_of(&self, name: &str) -> Kind {
        self.lookup(name).map(|e| e.kind.into()).unwrap_or(Kind::None)
    }

    /// The declared type of `name`, or `""` if undeclared.
    pub fn type_of(&self, name: &str) -> String {
        self.lookup(name)
            .map(|e| e.declared_type.clone())
            .unwrap_or_default()
    }

    /// The assigned index of `name`, or `-1` if undeclared.
    pub fn index_of(&self, name: &str) -> i32 {
        self.lookup(name).map(|e| e.index as i32).unwrap_or(-1)
    }
}
