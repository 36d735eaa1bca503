//! The symbol table maps names to storage slots. Each table is one
//! scope; enclosed tables resolve names through their outer table when
//! they don't define the name themselves.
use std::fmt;

use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SymbolScope {
    Global,
    Local,
}

impl fmt::Display for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Global => "GLOBAL",
            Self::Local => "LOCAL",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub scope: SymbolScope,
    pub index: usize,
}

impl Symbol {
    pub fn new<S: Into<String>>(name: S, scope: SymbolScope, index: usize) -> Self {
        Self { name: name.into(), scope, index }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.scope, self.index)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    outer: Option<Box<SymbolTable>>,
    store: IndexMap<String, Symbol>,
    num_definitions: usize,
}

impl SymbolTable {
    /// Create a global table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a local table nested in `outer`.
    pub fn new_enclosed(outer: SymbolTable) -> Self {
        Self { outer: Some(Box::new(outer)), ..Self::default() }
    }

    pub fn outer(&self) -> Option<&SymbolTable> {
        self.outer.as_deref()
    }

    /// Discard this scope and return the enclosing one.
    pub fn into_outer(self) -> Option<SymbolTable> {
        self.outer.map(|outer| *outer)
    }

    pub fn scope(&self) -> SymbolScope {
        if self.outer.is_some() {
            SymbolScope::Local
        } else {
            SymbolScope::Global
        }
    }

    /// Define `name` in this scope in the next free slot. Redefining a
    /// name rebinds it to a new slot.
    pub fn define(&mut self, name: &str) -> Symbol {
        let symbol = Symbol::new(name, self.scope(), self.num_definitions);
        log::trace!("DEFINE: {symbol}");
        self.store.insert(name.to_owned(), symbol.clone());
        self.num_definitions += 1;
        symbol
    }

    /// Look up `name` here, then in each enclosing scope.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        match self.store.get(name) {
            Some(symbol) => Some(symbol),
            None => self.outer.as_ref()?.resolve(name),
        }
    }

    /// Number of distinct names defined in this scope.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of slots allocated in this scope, counting rebinds.
    pub fn num_definitions(&self) -> usize {
        self.num_definitions
    }

    /// Symbols in this scope in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.store.values()
    }
}
