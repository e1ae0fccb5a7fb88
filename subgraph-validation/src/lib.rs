//! Cross-subgraph checks run during federated schema composition, before subgraphs are merged
//! into a supergraph.
//!
//! When several subgraphs define a type with the same name, composition requires enum types to
//! agree: every subgraph must declare the same set of values (`ENUM_MISMATCH` otherwise), and a
//! type cannot be an enum in one subgraph and an object, scalar, etc. in another
//! (`ENUM_MISMATCH_TYPE`).
//!
//! ## Usage
//!
//! ```
//! use subgraph_validation::Subgraph;
//! use subgraph_validation::ValidationOptions;
//! use subgraph_validation::validate_subgraphs;
//!
//! let products = Subgraph::parse("products", "http://products", "enum Color { RED BLUE }")?;
//! let inventory = Subgraph::parse("inventory", "http://inventory", "enum Color { RED GREEN }")?;
//!
//! let errors = validate_subgraphs(&[products, inventory], ValidationOptions::default())
//!     .unwrap_err();
//! assert_eq!(
//!     errors[0].to_string(),
//!     "The `Color` enum does not have identical values in all services. \
//!      Groups of services with identical values are: [products], [inventory]"
//! );
//! # Ok::<(), subgraph_validation::SubgraphError>(())
//! ```

#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

mod definition;
pub mod error;
mod subgraph;
pub mod validation;

pub use crate::definition::TypeDefinitionFragment;
pub use crate::definition::TypeKind;
pub use crate::error::CompositionError;
pub use crate::error::ErrorCode;
pub use crate::error::ImpactedServices;
pub use crate::error::Location;
pub use crate::error::SubgraphError;
pub use crate::subgraph::Subgraph;
pub use crate::validation::EnumConsistencyValidator;
pub use crate::validation::MalformedFragments;
pub use crate::validation::ValidationOptions;
pub use crate::validation::validate_enum_consistency;
pub use crate::validation::validate_subgraphs;

const _: () = {
    const fn assert_thread_safe<T: Sync + Send>() {}

    assert_thread_safe::<TypeDefinitionFragment>();
    assert_thread_safe::<CompositionError>();
    assert_thread_safe::<EnumConsistencyValidator>();
};
