#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

mod ast;
mod diagnostics;
mod error;
mod model;
mod node_kind;
mod path;
mod recursion;
mod transform;
pub mod vocab;

pub use ast::{
    Ast, Features, IdentifierType, IntersectionType, ListType, LiteralType, MintingStrategy,
    ObjectIntersectionType, ObjectType, ObjectTypeRef, ObjectUnionType, Property, SetType,
    TermType, Type, UnionType,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ShapeParseError, ShastError, TransformError};
pub use model::{
    Annotations, Constraints, NodeShape, Ontology, PropertyShape, Shape, ShapeId, ShapesGraph,
};
pub use node_kind::{NodeKind, NodeKindSet};
pub use path::PropertyPath;
pub use recursion::is_object_type_property_recursive;
