use std::fmt::Display;
use std::fmt::Formatter;

use apollo_compiler::Name;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::definition::TypeDefinitionFragment;
use crate::error::CompositionError;
use crate::error::ImpactedServices;

/// The value set of an enum, independent of declaration order.
///
/// Values are kept as a sorted sequence rather than a joined string, so equality never depends on
/// a separator being absent from value names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedEnumSignature(Vec<Name>);

impl NormalizedEnumSignature {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a Name>) -> Self {
        let mut values = values.into_iter().cloned().collect_vec();
        values.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        values.dedup();
        Self(values)
    }

    pub fn values(&self) -> &[Name] {
        &self.0
    }
}

impl Display for NormalizedEnumSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

/// Checks that every definition of the enum `type_name` declares the same set of values.
///
/// Definitions are grouped by value set, groups ordered by first occurrence. More than one group
/// yields a single [`CompositionError::EnumMismatch`] naming every group. Only enum definitions
/// with both a service name and values are compared.
pub fn check_enum_values(
    type_name: &Name,
    group: &[&TypeDefinitionFragment],
) -> Option<CompositionError> {
    let mut signature_groups: IndexMap<NormalizedEnumSignature, Vec<&TypeDefinitionFragment>> =
        IndexMap::new();
    for fragment in group.iter().filter(|fragment| fragment.is_enum()) {
        let (Some(_), Some(values)) = (&fragment.service_name, &fragment.enum_values) else {
            continue;
        };
        signature_groups
            .entry(NormalizedEnumSignature::new(values))
            .or_default()
            .push(*fragment);
    }

    if signature_groups.len() <= 1 {
        return None;
    }

    let mut impacted_services = ImpactedServices::new();
    let mut groups = Vec::with_capacity(signature_groups.len());
    for fragments in signature_groups.values() {
        let mut services = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            if let Some(service) = fragment.service_name.as_deref() {
                impacted_services.insert(service, fragment.location.clone());
                services.push(service.to_owned());
            }
        }
        groups.push(services);
    }

    Some(CompositionError::EnumMismatch {
        type_name: type_name.clone(),
        groups,
        impacted_services,
    })
}
