use std::ops::Range;

use apollo_compiler::Name;
use apollo_compiler::parser::LineColumn;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

/// A 0-indexed line/column reference to SDL source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub(crate) fn from_line_column_range(range: Range<LineColumn>) -> Range<Self> {
        Range {
            start: Self {
                line: range.start.line.saturating_sub(1),
                column: range.start.column.saturating_sub(1),
            },
            end: Self {
                line: range.end.line.saturating_sub(1),
                column: range.end.column.saturating_sub(1),
            },
        }
    }
}

/// The services affected by a [`CompositionError`], each with the source ranges of the offending
/// definitions in that service. Tools (e.g. editors) use this to annotate the right subgraph files.
///
/// Locations may be empty when a definition was not built from parsed SDL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImpactedServices(IndexMap<String, Vec<Range<Location>>>);

impl ImpactedServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `location` against `service`. A service recorded again keeps its first-seen
    /// position and adds `location` to its list.
    pub fn insert(&mut self, service: &str, location: Option<Range<Location>>) {
        let locations = self.0.entry(service.to_owned()).or_default();
        locations.extend(location);
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn locations(&self, service: &str) -> Option<&[Range<Location>]> {
        self.0.get(service).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A unique, per-error code to allow consuming tools to take specific actions. These codes
/// should not change once stabilized.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// An enum type does not declare the same set of values in every subgraph defining it.
    EnumMismatch,
    /// A type is an enum in some subgraphs but another kind of type in others.
    EnumMismatchType,
    /// A type definition is missing information needed to compare it across subgraphs.
    InvalidTypeDefinition,
}

impl ErrorCode {
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    pub fn definition(self) -> &'static str {
        match self {
            Self::EnumMismatch => {
                "An enum type has mismatched values between subgraphs that define it."
            }
            Self::EnumMismatchType => {
                "An enum type is defined as a different kind of type in another subgraph."
            }
            Self::InvalidTypeDefinition => {
                "A type definition lacks the subgraph name or values it was expected to carry."
            }
        }
    }
}

/// A composition fault found while comparing type definitions across subgraphs.
///
/// Faults are accumulated: finding one never stops the remaining type names from being checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error(
        "The `{type_name}` enum does not have identical values in all services. Groups of services with identical values are: {}",
        format_service_groups(.groups)
    )]
    EnumMismatch {
        type_name: Name,
        /// Services grouped by identical value sets, in the order each set was first seen.
        groups: Vec<Vec<String>>,
        impacted_services: ImpactedServices,
    },
    #[error(
        "{type_name} is an enum in [{}], but not in [{}]",
        .services_with_enum.join(", "),
        .services_without_enum.join(", ")
    )]
    EnumMismatchType {
        type_name: Name,
        services_with_enum: Vec<String>,
        services_without_enum: Vec<String>,
        impacted_services: ImpactedServices,
    },
    #[error("Type `{type_name}` is missing its service name")]
    MissingServiceName {
        type_name: Name,
        impacted_services: ImpactedServices,
    },
    #[error("Enum `{type_name}` in service `{service_name}` is missing its values")]
    MissingEnumValues {
        type_name: Name,
        service_name: String,
        impacted_services: ImpactedServices,
    },
}

impl CompositionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EnumMismatch { .. } => ErrorCode::EnumMismatch,
            Self::EnumMismatchType { .. } => ErrorCode::EnumMismatchType,
            Self::MissingServiceName { .. } | Self::MissingEnumValues { .. } => {
                ErrorCode::InvalidTypeDefinition
            }
        }
    }

    pub fn type_name(&self) -> &Name {
        match self {
            Self::EnumMismatch { type_name, .. }
            | Self::EnumMismatchType { type_name, .. }
            | Self::MissingServiceName { type_name, .. }
            | Self::MissingEnumValues { type_name, .. } => type_name,
        }
    }

    pub fn impacted_services(&self) -> &ImpactedServices {
        match self {
            Self::EnumMismatch {
                impacted_services, ..
            }
            | Self::EnumMismatchType {
                impacted_services, ..
            }
            | Self::MissingServiceName {
                impacted_services, ..
            }
            | Self::MissingEnumValues {
                impacted_services, ..
            } => impacted_services,
        }
    }
}

fn format_service_groups(groups: &[Vec<String>]) -> String {
    groups
        .iter()
        .map(|services| format!("[{}]", services.join(", ")))
        .join(", ")
}

/// Errors raised while loading a subgraph, before any cross-subgraph validation can happen.
#[derive(Debug, thiserror::Error)]
pub enum SubgraphError {
    #[error("Subgraph names must not be empty")]
    EmptyName,
    #[error("[{subgraph}] Invalid GraphQL: {message}")]
    InvalidGraphQL { subgraph: String, message: String },
}
