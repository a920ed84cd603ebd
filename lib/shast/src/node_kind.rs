//! RDF node kinds and the node kind resolution algorithm.
//!
//! A shape constrains the kinds of RDF terms its values may take, either explicitly
//! through `sh:nodeKind` or implicitly through constraints that only make sense for
//! some kinds (`sh:datatype` implies literals, `sh:hasValue <iri>` implies IRIs, ...).
//! [`resolve`] combines both, detecting conflicts.

use oxrdf::{NamedNodeRef, Term};

use crate::error::TransformError;
use crate::model::{Constraints, ShapeId};
use crate::vocab::shacl;

/// A single RDF node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A blank node.
    BlankNode,
    /// An IRI.
    Iri,
    /// A literal.
    Literal,
}

impl NodeKind {
    /// Classifies an RDF term.
    pub fn of_term(term: &Term) -> Self {
        match term {
            Term::NamedNode(_) => Self::Iri,
            Term::BlankNode(_) => Self::BlankNode,
            Term::Literal(_) => Self::Literal,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::BlankNode => 1,
            Self::Iri => 1 << 1,
            Self::Literal => 1 << 2,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankNode => write!(f, "sh:BlankNode"),
            Self::Iri => write!(f, "sh:IRI"),
            Self::Literal => write!(f, "sh:Literal"),
        }
    }
}

/// A set of RDF node kinds, stored as a small bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeKindSet(u8);

impl NodeKindSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// All three node kinds.
    pub const ALL: Self = Self(0b111);
    /// The two identifier kinds, blank node and IRI.
    pub const IDENTIFIER: Self = Self(0b011);
    /// The literal kind alone.
    pub const LITERAL: Self = Self(0b100);

    /// Creates a set containing a single kind.
    pub const fn of(kind: NodeKind) -> Self {
        Self(kind.bit())
    }

    /// Parses one of the six SHACL `sh:nodeKind` IRIs.
    pub fn from_shacl(iri: NamedNodeRef<'_>) -> Option<Self> {
        if iri == shacl::BLANK_NODE {
            Some(Self::of(NodeKind::BlankNode))
        } else if iri == shacl::IRI {
            Some(Self::of(NodeKind::Iri))
        } else if iri == shacl::LITERAL {
            Some(Self::LITERAL)
        } else if iri == shacl::BLANK_NODE_OR_IRI {
            Some(Self::IDENTIFIER)
        } else if iri == shacl::BLANK_NODE_OR_LITERAL {
            Some(Self::of(NodeKind::BlankNode).union(Self::LITERAL))
        } else if iri == shacl::IRI_OR_LITERAL {
            Some(Self::of(NodeKind::Iri).union(Self::LITERAL))
        } else {
            None
        }
    }

    /// Inserts a kind into the set.
    pub fn insert(&mut self, kind: NodeKind) {
        self.0 |= kind.bit();
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns true if the set contains the kind.
    pub const fn contains(self, kind: NodeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns true if every kind in this set is also in `other`.
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns true if the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of kinds in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the kinds in the set.
    pub fn iter(self) -> impl Iterator<Item = NodeKind> {
        [NodeKind::BlankNode, NodeKind::Iri, NodeKind::Literal]
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<NodeKind> for NodeKindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl std::fmt::Display for NodeKindSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "(no node kinds)");
        }
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// The constraint a set of implicit node kinds was derived from.
///
/// The tag only matters for error reporting: a conflict introduced by `sh:hasValue`
/// while `sh:in` is present gets its own message.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Contribution {
    Constraint,
    HasValue,
}

/// Resolves the effective node kinds of a shape.
///
/// Explicit `sh:nodeKind` wins if present (validated to be a subset of every parent's
/// explicit kinds); otherwise constraints contribute implicit kinds in a fixed priority
/// order; otherwise the caller-supplied `default`; otherwise all three kinds.
pub(crate) fn resolve(
    shape: &ShapeId,
    constraints: &Constraints,
    parent_kinds: &[NodeKindSet],
    default: Option<NodeKindSet>,
    is_property_shape: bool,
) -> Result<NodeKindSet, TransformError> {
    let explicit = constraints.node_kinds;
    if let Some(kinds) = explicit {
        for parent in parent_kinds {
            if !kinds.is_subset(*parent) {
                return Err(TransformError::NodeKindNotInParent {
                    shape: shape.clone(),
                    kinds,
                    parent_kinds: *parent,
                });
            }
        }
    }

    // Implicit contributions in priority order. `sh:defaultValue` is deliberately
    // last and only applies when nothing else has determined kinds.
    let mut contributions: Vec<(NodeKindSet, Contribution)> = Vec::new();
    if constraints.datatype.is_some() {
        contributions.push((NodeKindSet::LITERAL, Contribution::Constraint));
    }
    if let Some(values) = &constraints.in_values {
        let kinds: NodeKindSet = values.iter().map(NodeKind::of_term).collect();
        if !kinds.is_empty() {
            contributions.push((kinds, Contribution::Constraint));
        }
    }
    if !constraints.language_in.is_empty() {
        contributions.push((NodeKindSet::LITERAL, Contribution::Constraint));
    }
    if constraints.has_range() {
        contributions.push((NodeKindSet::LITERAL, Contribution::Constraint));
    }
    if let Some(value) = &constraints.has_value {
        contributions.push((
            NodeKindSet::of(NodeKind::of_term(value)),
            Contribution::HasValue,
        ));
    }

    let mut implicit: Option<NodeKindSet> = None;
    for (kinds, contribution) in contributions {
        merge(shape, &mut implicit, kinds, contribution, explicit, constraints)?;
    }
    if is_property_shape && implicit.is_none() {
        if let Some(value) = &constraints.default_value {
            merge(
                shape,
                &mut implicit,
                NodeKindSet::of(NodeKind::of_term(value)),
                Contribution::Constraint,
                explicit,
                constraints,
            )?;
        }
    }

    Ok(explicit
        .or(implicit)
        .or(default)
        .unwrap_or(NodeKindSet::ALL))
}

fn merge(
    shape: &ShapeId,
    implicit: &mut Option<NodeKindSet>,
    kinds: NodeKindSet,
    contribution: Contribution,
    explicit: Option<NodeKindSet>,
    constraints: &Constraints,
) -> Result<(), TransformError> {
    if let Some(explicit) = explicit {
        if kinds.intersection(explicit).is_empty() {
            return Err(TransformError::ConflictsWithNodeKind {
                shape: shape.clone(),
                kinds,
                explicit,
            });
        }
    }
    match *implicit {
        None => *implicit = Some(kinds),
        Some(accumulated) => {
            let narrowed = accumulated.intersection(kinds);
            if narrowed.is_empty() {
                return Err(
                    if contribution == Contribution::HasValue && constraints.in_values.is_some() {
                        TransformError::HasValueConflictsWithIn {
                            shape: shape.clone(),
                        }
                    } else {
                        TransformError::ConstraintNodeKindConflict {
                            shape: shape.clone(),
                            kinds,
                            accumulated,
                        }
                    },
                );
            }
            *implicit = Some(narrowed);
        }
    }
    Ok(())
}
