//! Symbol registry mapping placeholder names to text generators

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A symbol text generator.
///
/// Handlers receive the symbol name they were registered under and the
/// context path of the file being expanded (they never see the template
/// stream itself). Returning `None` declines the symbol; the scanner
/// then reconstructs the token literally, exactly as if the symbol had
/// never been registered.
pub type SymbolHandler = Box<dyn Fn(&str, &Path) -> Option<String> + Send + Sync>;

/// Registry of symbol handlers, keyed by exact (case-sensitive) name.
///
/// Registration is first-write-wins: a name that is already taken keeps
/// its original handler and the new one is discarded. This lets callers
/// shadow any stock symbol by registering their own handler before the
/// built-ins are installed.
///
/// Registration is single-threaded; once populated, the registry is
/// read-only and may be shared across concurrent expansions.
#[derive(Default)]
pub struct SymbolRegistry {
    handlers: HashMap<String, SymbolHandler>,
}

impl SymbolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a symbol name.
    ///
    /// Returns `true` if the handler was inserted, `false` if the name
    /// was already taken (a no-op, not an error).
    pub fn register(&mut self, name: impl Into<String>, handler: SymbolHandler) -> bool {
        match self.handlers.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(handler);
                true
            }
        }
    }

    /// Register a closure without boxing at the call site
    pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(&str, &Path) -> Option<String> + Send + Sync + 'static,
    {
        self.register(name, Box::new(handler))
    }

    /// Get the handler for a symbol, exact match only
    pub fn lookup(&self, name: &str) -> Option<&SymbolHandler> {
        self.handlers.get(name)
    }

    /// Check if a symbol is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get all registered symbol names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|s| s.as_str())
    }

    /// Run the handler registered for `name`, if any.
    ///
    /// Returns `None` both for unknown symbols and for handlers that
    /// decline; the scanner treats the two cases identically.
    pub fn resolve(&self, name: &str, path: &Path) -> Option<String> {
        self.handlers.get(name).and_then(|handler| handler(name, path))
    }
}

impl fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("SymbolRegistry")
            .field("symbols", &names)
            .finish()
    }
}
