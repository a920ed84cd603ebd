//! The abstract type model compiled from a shapes graph.
//!
//! Types are descriptors for code generation, not values. Object-kind types
//! ([`ObjectType`], [`ObjectIntersectionType`], [`ObjectUnionType`]) live in the
//! [`Ast`] registry addressed by their shape id; [`Type`] refers to them by id so the
//! (potentially cyclic) type graph never chases owned pointers. Equality and hashing
//! of object-kind types are by shape id only.

use oxrdf::{Literal, NamedNode, NamedNodeRef, Term};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::ShapeId;
use crate::node_kind::NodeKindSet;
use crate::vocab::shast;

/// A type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// An IRI or blank node identifier.
    Identifier(IdentifierType),
    /// An intersection of non-object types.
    Intersection(IntersectionType),
    /// An RDF list.
    List(ListType),
    /// A literal.
    Literal(LiteralType),
    /// A reference to an [`ObjectType`] in the [`Ast`] registry.
    Object(ObjectTypeRef),
    /// A reference to an [`ObjectIntersectionType`] in the [`Ast`] registry.
    ObjectIntersection(ShapeId),
    /// A reference to an [`ObjectUnionType`] in the [`Ast`] registry.
    ObjectUnion(ShapeId),
    /// Zero or one value.
    Option(Box<Type>),
    /// Zero or more values.
    Set(SetType),
    /// Any RDF term of the given kinds.
    Term(TermType),
    /// A union of non-object types.
    Union(UnionType),
}

/// The payload of [`Type::Object`]: the target object type plus an optional
/// synthetic stub minted when the reference was re-entrant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectTypeRef {
    /// Shape id of the referenced object type.
    pub id: ShapeId,
    /// Shape id of the synthetic stub, for re-entrant references.
    pub stub: Option<ShapeId>,
}

/// A named product type compiled from a node shape.
#[derive(Debug, Clone)]
pub struct ObjectType {
    /// Shape id, the identity of the type.
    pub id: ShapeId,
    /// Derived or annotated name.
    pub name: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Abstract types never get a `from_rdf_type`.
    pub abstract_: bool,
    /// Externally defined; filtered from flat composite members.
    pub extern_: bool,
    /// Minted by the transformation rather than declared in the shapes graph.
    pub synthetic: bool,
    /// The `rdf:type` IRI instances are expected to carry, used for union
    /// discrimination.
    pub from_rdf_type: Option<NamedNode>,
    /// The `rdf:type` IRIs serializers must emit.
    pub to_rdf_types: Vec<NamedNode>,
    /// Node kinds of instance identifiers, a non-empty subset of {blank, IRI}.
    pub identifier_node_kinds: NodeKindSet,
    /// How identifiers are minted for new instances.
    pub identifier_minting_strategy: Option<MintingStrategy>,
    /// Features code generators should emit for this type.
    pub features: Features,
    /// Compiled properties, in `sh:order` order.
    pub properties: Vec<Property>,
    /// Direct superclass object types, filled by the linking pass.
    pub parent_object_types: Vec<ShapeId>,
    /// Direct subclass object types, filled by the linking pass.
    pub child_object_types: Vec<ShapeId>,
    /// Transitive superclass object types, filled by the linking pass.
    pub ancestor_object_types: Vec<ShapeId>,
    /// Transitive subclass object types, filled by the linking pass.
    pub descendant_object_types: Vec<ShapeId>,
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectType {}

impl std::hash::Hash for ObjectType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl ObjectType {
    /// Sorts object types so that every type appears after its parents.
    ///
    /// The sort is stable: types whose parents are already placed keep their input
    /// order. Parent links pointing outside `types` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the parent links between the given types form a cycle.
    pub fn toposort<'a>(types: &[&'a ObjectType]) -> Vec<&'a ObjectType> {
        let ids: FxHashSet<&ShapeId> = types.iter().map(|ty| &ty.id).collect();
        let mut emitted: FxHashSet<&ShapeId> = FxHashSet::default();
        let mut sorted = Vec::with_capacity(types.len());
        let mut remaining: Vec<&ObjectType> = types.to_vec();
        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|ty| {
                let ready = ty
                    .parent_object_types
                    .iter()
                    .all(|parent| !ids.contains(parent) || emitted.contains(parent));
                if ready {
                    emitted.insert(&ty.id);
                    sorted.push(*ty);
                }
                !ready
            });
            assert!(
                remaining.len() < before,
                "cycle in object type inheritance graph"
            );
        }
        sorted
    }
}

/// A compiled property of an [`ObjectType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Predicate IRI of the property path.
    pub path: NamedNode,
    /// Derived or annotated name.
    pub name: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `sh:description`.
    pub description: Option<String>,
    /// `sh:order`.
    pub order: Option<f64>,
    /// Value type.
    pub ty: Type,
    /// True if the property's type graph can reach back to its object type.
    pub recursive: bool,
}

/// A flat intersection of object types.
#[derive(Debug, Clone)]
pub struct ObjectIntersectionType {
    /// Shape id, the identity of the type.
    pub id: ShapeId,
    /// Derived or annotated name.
    pub name: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Flat member object type ids.
    pub members: Vec<ShapeId>,
    /// Unified feature set of the members.
    pub features: Features,
}

impl PartialEq for ObjectIntersectionType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectIntersectionType {}

/// A flat, discriminated union of object types.
#[derive(Debug, Clone)]
pub struct ObjectUnionType {
    /// Shape id, the identity of the type.
    pub id: ShapeId,
    /// Derived or annotated name.
    pub name: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Flat member object type ids.
    pub members: Vec<ShapeId>,
    /// Unified feature set of the members.
    pub features: Features,
}

impl PartialEq for ObjectUnionType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectUnionType {}

/// An IRI or blank node identifier type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifierType {
    /// Allowed identifier kinds, a non-empty subset of {blank, IRI}.
    pub node_kinds: NodeKindSet,
    /// `sh:hasValue`.
    pub has_value: Option<NamedNode>,
    /// `sh:defaultValue`.
    pub default_value: Option<NamedNode>,
    /// `sh:in` members.
    pub in_values: Vec<NamedNode>,
}

impl IdentifierType {
    pub(crate) fn is_refined(&self) -> bool {
        self.has_value.is_some() || self.default_value.is_some() || !self.in_values.is_empty()
    }
}

/// A literal type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiteralType {
    /// `sh:datatype`.
    pub datatype: Option<NamedNode>,
    /// `sh:languageIn` language tags.
    pub language_in: Vec<String>,
    /// `sh:hasValue`.
    pub has_value: Option<Literal>,
    /// `sh:defaultValue`.
    pub default_value: Option<Literal>,
    /// `sh:in` members.
    pub in_values: Vec<Literal>,
    /// `sh:minExclusive`.
    pub min_exclusive: Option<Literal>,
    /// `sh:minInclusive`.
    pub min_inclusive: Option<Literal>,
    /// `sh:maxExclusive`.
    pub max_exclusive: Option<Literal>,
    /// `sh:maxInclusive`.
    pub max_inclusive: Option<Literal>,
}

impl LiteralType {
    pub(crate) fn is_refined(&self) -> bool {
        !self.language_in.is_empty()
            || self.has_value.is_some()
            || self.default_value.is_some()
            || !self.in_values.is_empty()
            || self.min_exclusive.is_some()
            || self.min_inclusive.is_some()
            || self.max_exclusive.is_some()
            || self.max_inclusive.is_some()
    }
}

/// The fallback "any term of these kinds" type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermType {
    /// Allowed term kinds.
    pub node_kinds: NodeKindSet,
    /// `sh:hasValue`.
    pub has_value: Option<Term>,
    /// `sh:defaultValue`.
    pub default_value: Option<Term>,
    /// `sh:in` members.
    pub in_values: Vec<Term>,
}

/// An intersection of non-object types. Members are not flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionType {
    /// Member types.
    pub members: Vec<Type>,
}

/// A union of non-object types. Members are not flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    /// Member types.
    pub members: Vec<Type>,
}

/// An RDF list type.
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    /// Item type.
    pub item: Box<Type>,
    /// Node kinds of the list nodes themselves.
    pub identifier_node_kinds: NodeKindSet,
    /// How identifiers are minted for new list nodes.
    pub minting_strategy: Option<MintingStrategy>,
}

/// A multi-valued property wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct SetType {
    /// Item type.
    pub item: Box<Type>,
    /// `sh:minCount`.
    pub min_count: u64,
}

/// Bit set of the features code generators should emit for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Features(u8);

impl Features {
    /// No features.
    pub const EMPTY: Self = Self(0);
    /// Equality.
    pub const EQUALS: Self = Self(1);
    /// RDF deserialization.
    pub const FROM_RDF: Self = Self(1 << 1);
    /// Hashing.
    pub const HASH: Self = Self(1 << 2);
    /// RDF serialization.
    pub const TO_RDF: Self = Self(1 << 3);
    /// SPARQL query construction.
    pub const SPARQL: Self = Self(1 << 4);
    /// All features.
    pub const ALL: Self = Self(0b1_1111);

    /// Parses a `shast:_Feature_*` IRI.
    pub fn from_annotation(iri: NamedNodeRef<'_>) -> Option<Self> {
        if iri == shast::FEATURE_EQUALS {
            Some(Self::EQUALS)
        } else if iri == shast::FEATURE_FROM_RDF {
            Some(Self::FROM_RDF)
        } else if iri == shast::FEATURE_HASH {
            Some(Self::HASH)
        } else if iri == shast::FEATURE_TO_RDF {
            Some(Self::TO_RDF)
        } else if iri == shast::FEATURE_SPARQL {
            Some(Self::SPARQL)
        } else {
            None
        }
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns this set without the features in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if every feature in `other` is in this set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::fmt::Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::EQUALS, "Equals"),
            (Self::FROM_RDF, "FromRdf"),
            (Self::HASH, "Hash"),
            (Self::TO_RDF, "ToRdf"),
            (Self::SPARQL, "Sparql"),
        ];
        let mut first = true;
        for (feature, name) in names {
            if self.contains(feature) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        if first {
            write!(f, "(no features)")?;
        }
        Ok(())
    }
}

/// Strategy for minting identifiers of new instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MintingStrategy {
    /// Mint a fresh blank node.
    BlankNode,
    /// Derive an IRI from a SHA-256 hash of the instance contents.
    Sha256,
    /// Derive an IRI from a random UUIDv4.
    Uuidv4,
}

impl MintingStrategy {
    /// Parses a `shast:_MintingStrategy_*` IRI.
    pub fn from_annotation(iri: NamedNodeRef<'_>) -> Option<Self> {
        if iri == shast::MINTING_STRATEGY_BLANK_NODE {
            Some(Self::BlankNode)
        } else if iri == shast::MINTING_STRATEGY_SHA256 {
            Some(Self::Sha256)
        } else if iri == shast::MINTING_STRATEGY_UUIDV4 {
            Some(Self::Uuidv4)
        } else {
            None
        }
    }
}

/// Output of the shapes-to-types transformation.
///
/// The registries hold every compiled object-kind type, including types that are only
/// referenced from properties; the bucket accessors iterate the top-level types in
/// deterministic order.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub(crate) object_types_by_id: FxHashMap<ShapeId, ObjectType>,
    pub(crate) object_intersection_types_by_id: FxHashMap<ShapeId, ObjectIntersectionType>,
    pub(crate) object_union_types_by_id: FxHashMap<ShapeId, ObjectUnionType>,
    pub(crate) object_type_order: Vec<ShapeId>,
    pub(crate) object_intersection_type_order: Vec<ShapeId>,
    pub(crate) object_union_type_order: Vec<ShapeId>,
}

impl Ast {
    /// Gets an object type by shape id.
    pub fn object_type(&self, id: &ShapeId) -> Option<&ObjectType> {
        self.object_types_by_id.get(id)
    }

    /// Gets an object intersection type by shape id.
    pub fn object_intersection_type(&self, id: &ShapeId) -> Option<&ObjectIntersectionType> {
        self.object_intersection_types_by_id.get(id)
    }

    /// Gets an object union type by shape id.
    pub fn object_union_type(&self, id: &ShapeId) -> Option<&ObjectUnionType> {
        self.object_union_types_by_id.get(id)
    }

    /// Iterates the top-level object types, including synthetic stubs.
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.object_type_order
            .iter()
            .filter_map(|id| self.object_types_by_id.get(id))
    }

    /// Iterates the top-level object intersection types.
    pub fn object_intersection_types(&self) -> impl Iterator<Item = &ObjectIntersectionType> {
        self.object_intersection_type_order
            .iter()
            .filter_map(|id| self.object_intersection_types_by_id.get(id))
    }

    /// Iterates the top-level object union types.
    pub fn object_union_types(&self) -> impl Iterator<Item = &ObjectUnionType> {
        self.object_union_type_order
            .iter()
            .filter_map(|id| self.object_union_types_by_id.get(id))
    }

    pub(crate) fn object_type_mut(&mut self, id: &ShapeId) -> Option<&mut ObjectType> {
        self.object_types_by_id.get_mut(id)
    }
}
