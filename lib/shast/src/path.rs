//! SHACL property paths.
//!
//! Implements the property path forms defined by the SHACL specification:
//! - Predicate path (simple IRI)
//! - Sequence path (list of paths)
//! - Alternative path (sh:alternativePath)
//! - Inverse path (sh:inversePath)
//! - Zero-or-more path (sh:zeroOrMorePath)
//! - One-or-more path (sh:oneOrMorePath)
//! - Zero-or-one path (sh:zeroOrOnePath)
//!
//! Only the predicate form maps onto a generated type member; the others are parsed
//! so the shapes graph round-trips, and rejected later with a path error.

use oxrdf::{vocab::rdf, Graph, NamedNode, NamedNodeRef, Term, TermRef};
use std::fmt;

use crate::error::ShapeParseError;
use crate::vocab::shacl;

/// A SHACL property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    /// A simple predicate path (IRI).
    Predicate(NamedNode),

    /// A sequence of paths (traversed in order).
    Sequence(Vec<PropertyPath>),

    /// Alternative paths (any one can match).
    Alternative(Vec<PropertyPath>),

    /// Inverse path (traversed in reverse direction).
    Inverse(Box<PropertyPath>),

    /// Zero or more repetitions of the path.
    ZeroOrMore(Box<PropertyPath>),

    /// One or more repetitions of the path.
    OneOrMore(Box<PropertyPath>),

    /// Zero or one occurrence of the path.
    ZeroOrOne(Box<PropertyPath>),
}

impl PropertyPath {
    /// Creates a predicate path from a named node.
    pub fn predicate(predicate: impl Into<NamedNode>) -> Self {
        Self::Predicate(predicate.into())
    }

    /// Creates a sequence path from a list of paths.
    pub fn sequence(paths: Vec<PropertyPath>) -> Self {
        Self::Sequence(paths)
    }

    /// Creates an alternative path from a list of paths.
    pub fn alternative(paths: Vec<PropertyPath>) -> Self {
        Self::Alternative(paths)
    }

    /// Creates an inverse path.
    pub fn inverse(path: PropertyPath) -> Self {
        Self::Inverse(Box::new(path))
    }

    /// Parses a property path from a term in an RDF graph.
    pub fn parse(graph: &Graph, term: TermRef<'_>) -> Result<Self, ShapeParseError> {
        match term {
            // Simple predicate path (IRI)
            TermRef::NamedNode(node) => Ok(Self::Predicate(node.into_owned())),

            // Complex path (blank node with path operators)
            TermRef::BlankNode(bnode) => {
                let bnode_term: Term = bnode.into_owned().into();

                if let Some(list_head) = get_object(graph, &bnode_term, shacl::ALTERNATIVE_PATH) {
                    let paths = parse_path_list(graph, list_head, &bnode_term)?;
                    return Ok(Self::Alternative(paths));
                }

                if let Some(inner) = get_object(graph, &bnode_term, shacl::INVERSE_PATH) {
                    let inner_path = Self::parse(graph, inner.as_ref())?;
                    return Ok(Self::Inverse(Box::new(inner_path)));
                }

                if let Some(inner) = get_object(graph, &bnode_term, shacl::ZERO_OR_MORE_PATH) {
                    let inner_path = Self::parse(graph, inner.as_ref())?;
                    return Ok(Self::ZeroOrMore(Box::new(inner_path)));
                }

                if let Some(inner) = get_object(graph, &bnode_term, shacl::ONE_OR_MORE_PATH) {
                    let inner_path = Self::parse(graph, inner.as_ref())?;
                    return Ok(Self::OneOrMore(Box::new(inner_path)));
                }

                if let Some(inner) = get_object(graph, &bnode_term, shacl::ZERO_OR_ONE_PATH) {
                    let inner_path = Self::parse(graph, inner.as_ref())?;
                    return Ok(Self::ZeroOrOne(Box::new(inner_path)));
                }

                // Sequence path (RDF list starting from this blank node)
                if get_object(graph, &bnode_term, rdf::FIRST).is_some() {
                    let paths = parse_path_list(graph, bnode_term.clone(), &bnode_term)?;
                    if paths.len() >= 2 {
                        return Ok(Self::Sequence(paths));
                    }
                }

                Err(ShapeParseError::invalid_property_path(
                    bnode_term,
                    "Unknown property path structure",
                ))
            }

            TermRef::Literal(_) => Err(ShapeParseError::invalid_property_path(
                term.into_owned(),
                "Property path must be an IRI or blank node",
            )),
        }
    }

    /// Returns true if this is a simple predicate path.
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// Returns the predicate if this is a simple predicate path.
    pub fn as_predicate(&self) -> Option<&NamedNode> {
        match self {
            Self::Predicate(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(p) => write!(f, "<{}>", p.as_str()),
            Self::Sequence(paths) => {
                write!(f, "(")?;
                for (i, p) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, " / ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
            Self::Alternative(paths) => {
                write!(f, "(")?;
                for (i, p) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
            Self::Inverse(p) => write!(f, "^{p}"),
            Self::ZeroOrMore(p) => write!(f, "{p}*"),
            Self::OneOrMore(p) => write!(f, "{p}+"),
            Self::ZeroOrOne(p) => write!(f, "{p}?"),
        }
    }
}

fn get_object(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<Term> {
    match subject {
        Term::NamedNode(n) => graph
            .object_for_subject_predicate(n, predicate)
            .map(TermRef::into_owned),
        Term::BlankNode(b) => graph
            .object_for_subject_predicate(b, predicate)
            .map(TermRef::into_owned),
        Term::Literal(_) => None,
    }
}

fn parse_path_list(
    graph: &Graph,
    list_head: Term,
    shape: &Term,
) -> Result<Vec<PropertyPath>, ShapeParseError> {
    let mut paths = Vec::new();
    let mut current = list_head;

    loop {
        if let Term::NamedNode(n) = &current {
            if n.as_ref() == rdf::NIL {
                break;
            }
        }

        let first = get_object(graph, &current, rdf::FIRST)
            .ok_or_else(|| ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:first"))?;
        paths.push(PropertyPath::parse(graph, first.as_ref())?);

        current = get_object(graph, &current, rdf::REST)
            .ok_or_else(|| ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:rest"))?;
    }

    Ok(paths)
}
