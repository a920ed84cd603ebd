//! Error types for shape parsing and type transformation.

use oxrdf::{NamedNode, Term};

use crate::model::ShapeId;
use crate::node_kind::NodeKindSet;

/// Main error type for shape compilation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ShastError {
    /// Error parsing the shapes graph.
    #[error(transparent)]
    Parse(#[from] ShapeParseError),

    /// Error transforming a shape into an AST type.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Error type for parsing shapes from RDF graphs.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeParseError {
    /// Invalid shape definition.
    #[error("Invalid shape definition for {shape}: {message}")]
    InvalidShape { shape: Term, message: String },

    /// Invalid property path.
    #[error("Invalid property path in shape {shape}: {message}")]
    InvalidPropertyPath { shape: Term, message: String },

    /// Invalid RDF list.
    #[error("Invalid RDF list in shape {shape}: {message}")]
    InvalidRdfList { shape: Term, message: String },

    /// Invalid generator annotation.
    #[error("Invalid annotation on {shape}: {message}")]
    InvalidAnnotation { shape: Term, message: String },
}

impl ShapeParseError {
    /// Creates an invalid shape error.
    pub fn invalid_shape(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid property path error.
    pub fn invalid_property_path(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidPropertyPath {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid RDF list error.
    pub fn invalid_rdf_list(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidRdfList {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid annotation error.
    pub fn invalid_annotation(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidAnnotation {
            shape: shape.into(),
            message: message.into(),
        }
    }
}

/// Error type for the shape to AST type transformation.
///
/// All variants are data errors: they describe shapes graphs the compiler cannot
/// interpret as type definitions. Results are cached per shape, so the type is `Clone`.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The shape matches none of the recognized type patterns.
    #[error("{shape}: unable to transform shape into an AST type")]
    UnableToTransform { shape: ShapeId },

    /// An explicit `sh:nodeKind` widens the kinds allowed by a parent shape.
    #[error("{shape}: nodeKind not in parent's node kinds ({kinds} is not a subset of {parent_kinds})")]
    NodeKindNotInParent {
        shape: ShapeId,
        kinds: NodeKindSet,
        parent_kinds: NodeKindSet,
    },

    /// A constraint implies node kinds disjoint from the explicit `sh:nodeKind`.
    #[error("{shape}: {kinds} conflicts with sh:nodeKind {explicit}")]
    ConflictsWithNodeKind {
        shape: ShapeId,
        kinds: NodeKindSet,
        explicit: NodeKindSet,
    },

    /// Two constraints imply disjoint node kind sets.
    #[error("{shape}: {kinds} conflicts with other constraint node kinds {accumulated}")]
    ConstraintNodeKindConflict {
        shape: ShapeId,
        kinds: NodeKindSet,
        accumulated: NodeKindSet,
    },

    /// `sh:hasValue` names a term incompatible with the `sh:in` enumeration.
    #[error("{shape}: has-value conflicts with in")]
    HasValueConflictsWithIn { shape: ShapeId },

    /// A fixed, default or enumerated value of an identifier type is not an IRI.
    #[error("{shape}: identifier value is not an IRI")]
    NonIriIdentifierTerm { shape: ShapeId },

    /// `sh:class` or `sh:node` points at an identifier with no corresponding shape.
    #[error("no shape found for {id}")]
    UnresolvableReference { id: ShapeId },

    /// `sh:class` names a generic class placeholder that carries no schema.
    #[error("<{class}> is a generic class placeholder")]
    GenericClass { class: NamedNode },

    /// `sh:class` resolved to a shape that is not an object type.
    #[error("sh:class <{class}> did not resolve to an object type")]
    NonObjectClass { class: NamedNode },

    /// Intersection and union composition were mixed on object types.
    #[error("{shape}: incompatible compound type composition")]
    IncompatibleComposition { shape: ShapeId },

    /// A flat composite contains a nested composite of the opposite kind.
    #[error("{shape}: composite with a nested {nested} member")]
    NestedComposite {
        shape: ShapeId,
        nested: &'static str,
    },

    /// Flattened composite members lack distinguishing RDF types.
    #[error("{shape}: ambiguous discrimination between [{types}] with RDF types [{rdf_types}]")]
    AmbiguousDiscrimination {
        shape: ShapeId,
        types: String,
        rdf_types: String,
    },

    /// Flattened composite members support different generated feature sets.
    #[error("{shape}: composite member {member} has a mismatched feature set")]
    HeterogeneousFeatures { shape: ShapeId, member: String },

    /// The property shape's path is not a single predicate IRI.
    #[error("{shape}: property path is not a plain predicate")]
    NonPredicatePath { shape: ShapeId },
}

impl TransformError {
    /// Creates an unable-to-transform error.
    pub fn unable_to_transform(shape: impl Into<ShapeId>) -> Self {
        Self::UnableToTransform {
            shape: shape.into(),
        }
    }

    /// Creates an unresolvable reference error.
    pub fn unresolvable(id: impl Into<ShapeId>) -> Self {
        Self::UnresolvableReference { id: id.into() }
    }
}
