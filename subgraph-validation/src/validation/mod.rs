//! Validation that enum types agree across every subgraph defining them.
//!
//! The check runs once per composition run over the type definitions of all subgraphs:
//!
//! 1. definitions are grouped by type name ([`group_definitions`]),
//! 2. each group is classified by how many of its definitions are enums ([`classify`]),
//! 3. all-enum groups must declare identical value sets ([`check_enum_values`]),
//! 4. groups mixing enums and other kinds are reported ([`report_kind_conflict`]).
//!
//! Errors are accumulated: every group is checked even after one of them fails.

// No panics allowed in this module
#![cfg_attr(
    not(test),
    deny(
        clippy::exit,
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing,
        clippy::unimplemented,
        clippy::todo
    )
)]

mod classify;
mod enum_values;
mod grouping;
mod kind_conflict;

pub use classify::GroupKind;
pub use classify::classify;
pub use enum_values::NormalizedEnumSignature;
pub use enum_values::check_enum_values;
pub use grouping::DefinitionGroup;
pub use grouping::group_definitions;
pub use kind_conflict::report_kind_conflict;
use serde::Deserialize;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::definition::TypeDefinitionFragment;
use crate::error::CompositionError;
use crate::error::ImpactedServices;
use crate::subgraph::Subgraph;

/// What to do with a definition that cannot be compared: an enum without a service name or
/// without values, or any other definition without a service name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MalformedFragments {
    /// Leave the definition out of the comparison and log a warning.
    #[default]
    Skip,
    /// Also produce an `INVALID_TYPE_DEFINITION` error for the definition.
    Report,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationOptions {
    pub malformed_fragments: MalformedFragments,
}

#[derive(Clone, Debug, Default)]
pub struct EnumConsistencyValidator {
    options: ValidationOptions,
}

impl EnumConsistencyValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Returns every inconsistency found in `fragments`, grouped by type name in the order names
    /// are first seen. An empty result means the enums are consistent.
    pub fn validate(&self, fragments: &[TypeDefinitionFragment]) -> Vec<CompositionError> {
        let groups = group_definitions(fragments);
        let mut errors = Vec::new();
        for (type_name, group) in &groups {
            let kind = classify(group);
            trace!(type_name = %type_name, ?kind, definitions = group.len(), "classified type");
            let error = match kind {
                GroupKind::NoneEnum => continue,
                GroupKind::AllEnum => {
                    self.check_malformed(group, &mut errors);
                    check_enum_values(type_name, group)
                }
                GroupKind::MixedKind => {
                    self.check_malformed(group, &mut errors);
                    // Without a named definition on both sides, only the enum values are left
                    // to compare.
                    report_kind_conflict(type_name, group)
                        .or_else(|| check_enum_values(type_name, group))
                }
            };
            errors.extend(error);
        }
        debug!(
            definitions = fragments.len(),
            types = groups.len(),
            errors = errors.len(),
            "validated enum consistency"
        );
        errors
    }

    fn check_malformed(
        &self,
        group: &[&TypeDefinitionFragment],
        errors: &mut Vec<CompositionError>,
    ) {
        for fragment in group {
            let Some(error) = malformed_fragment_error(fragment) else {
                continue;
            };
            match self.options.malformed_fragments {
                MalformedFragments::Skip => {
                    warn!(type_name = %fragment.type_name, "skipping definition: {error}");
                }
                MalformedFragments::Report => errors.push(error),
            }
        }
    }
}

fn malformed_fragment_error(fragment: &TypeDefinitionFragment) -> Option<CompositionError> {
    let Some(service_name) = &fragment.service_name else {
        return Some(CompositionError::MissingServiceName {
            type_name: fragment.type_name.clone(),
            impacted_services: ImpactedServices::new(),
        });
    };
    if fragment.is_enum() && fragment.enum_values.is_none() {
        let mut impacted_services = ImpactedServices::new();
        impacted_services.insert(service_name, fragment.location.clone());
        return Some(CompositionError::MissingEnumValues {
            type_name: fragment.type_name.clone(),
            service_name: service_name.clone(),
            impacted_services,
        });
    }
    None
}

/// Checks enum consistency with default options.
pub fn validate_enum_consistency(fragments: &[TypeDefinitionFragment]) -> Vec<CompositionError> {
    EnumConsistencyValidator::default().validate(fragments)
}

/// Checks enum consistency across `subgraphs`, in the `Result` shape used by composition
/// validations.
pub fn validate_subgraphs(
    subgraphs: &[Subgraph],
    options: ValidationOptions,
) -> Result<(), Vec<CompositionError>> {
    let fragments: Vec<TypeDefinitionFragment> = subgraphs
        .iter()
        .flat_map(Subgraph::type_definitions)
        .collect();
    let errors = EnumConsistencyValidator::new(options).validate(&fragments);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
