use std::ops::Range;

use apollo_compiler::Name;
use apollo_compiler::schema::ExtendedType;

use crate::error::Location;

/// The kind of a GraphQL named type, as declared by one subgraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum)
    }
}

impl From<&ExtendedType> for TypeKind {
    fn from(ty: &ExtendedType) -> Self {
        match ty {
            ExtendedType::Scalar(_) => Self::Scalar,
            ExtendedType::Object(_) => Self::Object,
            ExtendedType::Interface(_) => Self::Interface,
            ExtendedType::Union(_) => Self::Union,
            ExtendedType::Enum(_) => Self::Enum,
            ExtendedType::InputObject(_) => Self::InputObject,
        }
    }
}

/// One type definition as contributed by one subgraph.
///
/// `service_name` is `None` and `enum_values` is `None` for an enum only when the fragment was
/// built from incomplete input. Such fragments are never compared against others; see
/// [`crate::MalformedFragments`] for how they are reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefinitionFragment {
    pub type_name: Name,
    pub service_name: Option<String>,
    pub kind: TypeKind,
    /// Value names in declaration order. Only present for enums.
    pub enum_values: Option<Vec<Name>>,
    pub location: Option<Range<Location>>,
}

impl TypeDefinitionFragment {
    pub fn enum_type(
        type_name: Name,
        service_name: impl Into<String>,
        values: impl IntoIterator<Item = Name>,
    ) -> Self {
        Self {
            type_name,
            service_name: Some(service_name.into()),
            kind: TypeKind::Enum,
            enum_values: Some(values.into_iter().collect()),
            location: None,
        }
    }

    pub fn other_type(type_name: Name, service_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            type_name,
            service_name: Some(service_name.into()),
            kind,
            enum_values: None,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Range<Location>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_enum(&self) -> bool {
        self.kind.is_enum()
    }
}
