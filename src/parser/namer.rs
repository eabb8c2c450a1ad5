use std::collections::BTreeMap;

use crate::expr::Name;
use crate::fmt::NameTable;


/// A context that binds identifiers to the correct names. The same identifier resolves
/// to the same name across multiple parsing calls against the same context.
pub struct NameContext {
    next_unique_name: Name,

    resolved: BTreeMap<String, Name>,

    rev_table: NameTable
}

impl NameContext {
    /// Creates a new [NameContext]
    pub fn new() -> Self {
        Self {
            next_unique_name: Name::any(),

            resolved: BTreeMap::new(),

            rev_table: NameTable::new()
        }
    }

    pub fn rev_table(&self) -> &NameTable {
        &self.rev_table
    }

    pub fn into_rev_table(self) -> NameTable {
        self.rev_table
    }

    /// Generates a new unique name
    fn new_name(&mut self) -> Name {
        return self.next_unique_name.incr();
    }

    /// Resolves an identifier to its name, interning it if it was not seen before.
    pub fn resolve(&mut self, str: String) -> Name {
        if let Some(name) = self.resolved.get(&str) {
            return *name;
        }

        let name = self.new_name();
        self.rev_table.add(name, str.clone());

        self.resolved.insert(str, name);

        name
    }
}

impl Default for NameContext {
    fn default() -> Self {
        Self::new()
    }
}
