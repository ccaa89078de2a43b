use super::FunctionDef;
use super::builtins::BUILTIN_FUNCTIONS;
use std::collections::{BTreeMap, BTreeSet};

/// The immutable set of extension functions available to rules.
///
/// Built once at startup and shared by every evaluation. Lookup is an exact
/// match on the function name.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, &'static FunctionDef>,
}

impl FunctionRegistry {
    /// Creates a registry from a set of definitions. A later definition replaces an earlier one with the same name.
    #[must_use]
    pub fn new(defs: &'static [FunctionDef]) -> Self {
        Self {
            functions: defs.iter().map(|def| (def.name, def)).collect(),
        }
    }

    /// The registry holding the built-in verification functions.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_FUNCTIONS)
    }

    #[must_use]
    pub fn function_names(&self) -> BTreeSet<&'static str> {
        self.functions.keys().copied().collect()
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static FunctionDef> {
        self.functions.get(name).copied()
    }

    /// Iterates the definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FunctionDef> + '_ {
        self.functions.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
