use apollo_compiler::Name;
use itertools::Itertools;
use tracing::warn;

use crate::definition::TypeDefinitionFragment;
use crate::error::CompositionError;
use crate::error::ImpactedServices;

/// Reports a type that is an enum in some subgraphs but not in others.
///
/// Definitions without a service name cannot be attributed and are left out. If that leaves
/// either side empty, no error is produced. With no named non-enum definition left, the group
/// behaves as an all-enum group, and its values still go through
/// [`crate::validation::check_enum_values`].
pub fn report_kind_conflict(
    type_name: &Name,
    group: &[&TypeDefinitionFragment],
) -> Option<CompositionError> {
    let (with_enum, without_enum): (Vec<&TypeDefinitionFragment>, Vec<&TypeDefinitionFragment>) =
        group
            .iter()
            .copied()
            .filter(|fragment| fragment.service_name.is_some())
            .partition(|fragment| fragment.is_enum());

    if with_enum.is_empty() || without_enum.is_empty() {
        warn!(
            type_name = %type_name,
            with_enum = with_enum.len(),
            without_enum = without_enum.len(),
            "not reporting enum kind mismatch: one side has no named service"
        );
        return None;
    }

    let mut impacted_services = ImpactedServices::new();
    for fragment in with_enum.iter().chain(&without_enum) {
        if let Some(service) = fragment.service_name.as_deref() {
            impacted_services.insert(service, fragment.location.clone());
        }
    }

    let service_names = |fragments: &[&TypeDefinitionFragment]| {
        fragments
            .iter()
            .filter_map(|fragment| fragment.service_name.clone())
            .collect_vec()
    };
    Some(CompositionError::EnumMismatchType {
        type_name: type_name.clone(),
        services_with_enum: service_names(&with_enum),
        services_without_enum: service_names(&without_enum),
        impacted_services,
    })
}
