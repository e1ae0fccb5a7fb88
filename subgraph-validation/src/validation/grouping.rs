use apollo_compiler::Name;
use indexmap::IndexMap;

use crate::definition::TypeDefinitionFragment;

/// Every subgraph's definition of one type name, in input order.
pub type DefinitionGroup<'a> = Vec<&'a TypeDefinitionFragment>;

/// Partitions `fragments` by type name. Names appear in the order they are first seen, so the
/// faults produced from the groups are deterministic for a given input.
pub fn group_definitions(
    fragments: &[TypeDefinitionFragment],
) -> IndexMap<Name, DefinitionGroup<'_>> {
    let mut groups: IndexMap<Name, DefinitionGroup<'_>> = IndexMap::new();
    for fragment in fragments {
        groups
            .entry(fragment.type_name.clone())
            .or_default()
            .push(fragment);
    }
    groups
}
