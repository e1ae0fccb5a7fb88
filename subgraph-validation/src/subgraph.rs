use std::ops::Range;

use apollo_compiler::Schema;
use apollo_compiler::schema::ExtendedType;

use crate::definition::TypeDefinitionFragment;
use crate::definition::TypeKind;
use crate::error::Location;
use crate::error::SubgraphError;

/// A subgraph schema as authored by one service. The schema is parsed but not validated: other
/// rules are responsible for federation-specific validation.
pub struct Subgraph {
    pub name: String,
    pub url: String,
    pub schema: Schema,
}

impl Subgraph {
    pub fn parse(name: &str, url: &str, schema_str: &str) -> Result<Self, SubgraphError> {
        if name.is_empty() {
            return Err(SubgraphError::EmptyName);
        }
        // Subgraphs commonly extend root types they never define, like `extend type Query`.
        let schema = Schema::builder()
            .adopt_orphan_extensions()
            .parse(schema_str, name)
            .build()
            .map_err(|with_errors| SubgraphError::InvalidGraphQL {
                subgraph: name.to_owned(),
                message: with_errors.errors.to_string(),
            })?;
        Ok(Self {
            name: name.to_owned(),
            url: url.to_owned(),
            schema,
        })
    }

    /// Returns one fragment per user-defined type, in schema order. Extensions are folded into
    /// the type they extend, so an enum's values include those added by `extend enum`.
    pub fn type_definitions(&self) -> Vec<TypeDefinitionFragment> {
        self.schema
            .types
            .iter()
            .filter(|(_, ty)| !ty.is_built_in())
            .map(|(type_name, ty)| TypeDefinitionFragment {
                type_name: type_name.clone(),
                service_name: Some(self.name.clone()),
                kind: TypeKind::from(ty),
                enum_values: match ty {
                    ExtendedType::Enum(enum_type) => {
                        Some(enum_type.values.keys().cloned().collect())
                    }
                    _ => None,
                },
                location: self.location_of(ty),
            })
            .collect()
    }

    fn location_of(&self, ty: &ExtendedType) -> Option<Range<Location>> {
        let sources = &self.schema.sources;
        let range = match ty {
            ExtendedType::Scalar(node) => node.line_column_range(sources),
            ExtendedType::Object(node) => node.line_column_range(sources),
            ExtendedType::Interface(node) => node.line_column_range(sources),
            ExtendedType::Union(node) => node.line_column_range(sources),
            ExtendedType::Enum(node) => node.line_column_range(sources),
            ExtendedType::InputObject(node) => node.line_column_range(sources),
        };
        range.map(Location::from_line_column_range)
    }
}

impl std::fmt::Debug for Subgraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "name: {}, url: {}", self.name, self.url)
    }
}
