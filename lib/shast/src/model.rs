//! SHACL shape model types.
//!
//! This module defines the parsed form of a shapes graph:
//! - [`ShapeId`] - Identifier for shapes (IRI or blank node)
//! - [`Constraints`] - Typed projection of one shape's constraint parameters
//! - [`Annotations`] - Generator annotations (`shast:` vocabulary)
//! - [`Shape`] - Data common to node and property shapes
//! - [`NodeShape`] / [`PropertyShape`] - The two shape kinds
//! - [`Ontology`] - An `owl:Ontology` carrying shape-level defaults
//! - [`ShapesGraph`] - Collection of shapes parsed from an RDF graph

use oxrdf::{
    vocab::{rdf, rdfs},
    BlankNode, Graph, Literal, NamedNode, NamedNodeRef, SubjectRef, Term, TermRef,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

use crate::ast::{Features, MintingStrategy};
use crate::error::ShapeParseError;
use crate::node_kind::NodeKindSet;
use crate::path::PropertyPath;
use crate::vocab::{owl, shacl, shast};

/// Unique identifier for a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    /// Named shape (IRI).
    Named(NamedNode),
    /// Anonymous shape (blank node).
    Blank(BlankNode),
}

impl ShapeId {
    /// Converts to a Term.
    pub fn to_term(&self) -> Term {
        match self {
            Self::Named(n) => Term::NamedNode(n.clone()),
            Self::Blank(b) => Term::BlankNode(b.clone()),
        }
    }

    /// Returns the shape ID as a named node if it is one.
    pub fn as_named(&self) -> Option<&NamedNode> {
        match self {
            Self::Named(n) => Some(n),
            Self::Blank(_) => None,
        }
    }

    /// Returns a short name derived from the identifier: the IRI fragment, the last
    /// IRI path segment, or the blank node label.
    pub fn local_name(&self) -> &str {
        match self {
            Self::Named(n) => iri_local_name(n.as_str()),
            Self::Blank(b) => b.as_str(),
        }
    }
}

impl From<NamedNode> for ShapeId {
    fn from(n: NamedNode) -> Self {
        Self::Named(n)
    }
}

impl From<BlankNode> for ShapeId {
    fn from(b: BlankNode) -> Self {
        Self::Blank(b)
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => write!(f, "<{}>", n.as_str()),
            Self::Blank(b) => write!(f, "_:{}", b.as_str()),
        }
    }
}

pub(crate) fn iri_local_name(iri: &str) -> &str {
    if let Some((_, fragment)) = iri.rsplit_once('#') {
        if !fragment.is_empty() {
            return fragment;
        }
    }
    if let Some((_, segment)) = iri.rsplit_once('/') {
        if !segment.is_empty() {
            return segment;
        }
    }
    iri
}

/// The SHACL constraint parameters of one shape, random-access by field.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// `sh:and` member shape ids.
    pub and: Vec<ShapeId>,
    /// `sh:or` member shape ids.
    pub or: Vec<ShapeId>,
    /// `sh:xone` member shape ids.
    pub xone: Vec<ShapeId>,
    /// `sh:class` IRIs.
    pub classes: Vec<NamedNode>,
    /// `sh:node` shape ids.
    pub nodes: Vec<ShapeId>,
    /// `sh:datatype`.
    pub datatype: Option<NamedNode>,
    /// Explicit `sh:nodeKind`, as a set.
    pub node_kinds: Option<NodeKindSet>,
    /// `sh:hasValue`.
    pub has_value: Option<Term>,
    /// `sh:in` values. `Some(vec![])` when the list is present but empty.
    pub in_values: Option<Vec<Term>>,
    /// `sh:languageIn` language tags.
    pub language_in: Vec<String>,
    /// `sh:minCount`.
    pub min_count: Option<u64>,
    /// `sh:maxCount`.
    pub max_count: Option<u64>,
    /// `sh:minExclusive`.
    pub min_exclusive: Option<Literal>,
    /// `sh:minInclusive`.
    pub min_inclusive: Option<Literal>,
    /// `sh:maxExclusive`.
    pub max_exclusive: Option<Literal>,
    /// `sh:maxInclusive`.
    pub max_inclusive: Option<Literal>,
    /// `sh:defaultValue`.
    pub default_value: Option<Term>,
}

impl Constraints {
    /// Returns true if any range bound is present.
    pub fn has_range(&self) -> bool {
        self.min_exclusive.is_some()
            || self.min_inclusive.is_some()
            || self.max_exclusive.is_some()
            || self.max_inclusive.is_some()
    }

    /// Returns true if any logical or reference composition is present.
    pub fn has_compound(&self) -> bool {
        !self.and.is_empty()
            || !self.or.is_empty()
            || !self.xone.is_empty()
            || !self.classes.is_empty()
            || !self.nodes.is_empty()
    }

    fn parse(graph: &Graph, shape_term: &Term) -> Result<Self, ShapeParseError> {
        let mut constraints = Self::default();

        if let Some(list_head) = get_object(graph, shape_term, shacl::AND) {
            constraints.and = parse_shape_list(graph, list_head, shape_term)?;
        }
        if let Some(list_head) = get_object(graph, shape_term, shacl::OR) {
            constraints.or = parse_shape_list(graph, list_head, shape_term)?;
        }
        if let Some(list_head) = get_object(graph, shape_term, shacl::XONE) {
            constraints.xone = parse_shape_list(graph, list_head, shape_term)?;
        }
        for obj in get_objects(graph, shape_term, shacl::CLASS) {
            if let Term::NamedNode(class) = obj {
                constraints.classes.push(class);
            }
        }
        for obj in get_objects(graph, shape_term, shacl::NODE) {
            constraints.nodes.push(term_to_shape_id(obj)?);
        }
        if let Some(Term::NamedNode(dt)) = get_object(graph, shape_term, shacl::DATATYPE) {
            constraints.datatype = Some(dt);
        }
        if let Some(Term::NamedNode(nk)) = get_object(graph, shape_term, shacl::NODE_KIND) {
            constraints.node_kinds = Some(NodeKindSet::from_shacl(nk.as_ref()).ok_or_else(
                || {
                    ShapeParseError::invalid_shape(
                        shape_term.clone(),
                        format!("Unknown sh:nodeKind <{}>", nk.as_str()),
                    )
                },
            )?);
        }
        constraints.has_value = get_object(graph, shape_term, shacl::HAS_VALUE);
        if let Some(list_head) = get_object(graph, shape_term, shacl::IN) {
            constraints.in_values = Some(parse_term_list(graph, list_head, shape_term)?);
        }
        if let Some(list_head) = get_object(graph, shape_term, shacl::LANGUAGE_IN) {
            constraints.language_in = parse_string_list(graph, list_head, shape_term)?;
        }
        constraints.min_count = get_u64(graph, shape_term, shacl::MIN_COUNT);
        constraints.max_count = get_u64(graph, shape_term, shacl::MAX_COUNT);
        constraints.min_exclusive = get_literal(graph, shape_term, shacl::MIN_EXCLUSIVE);
        constraints.min_inclusive = get_literal(graph, shape_term, shacl::MIN_INCLUSIVE);
        constraints.max_exclusive = get_literal(graph, shape_term, shacl::MAX_EXCLUSIVE);
        constraints.max_inclusive = get_literal(graph, shape_term, shacl::MAX_INCLUSIVE);
        constraints.default_value = get_object(graph, shape_term, shacl::DEFAULT_VALUE);

        Ok(constraints)
    }
}

/// Generator annotations read from the `shast:` vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// `shast:name` override for the derived type or property name.
    pub name: Option<String>,
    /// `shast:abstract`.
    pub abstract_: bool,
    /// `shast:extern`.
    pub extern_: bool,
    /// `shast:mintingStrategy`.
    pub minting_strategy: Option<MintingStrategy>,
    /// `shast:fromRdfType` override.
    pub from_rdf_type: Option<NamedNode>,
    /// `shast:toRdfType` additions.
    pub to_rdf_types: Vec<NamedNode>,
    /// `shast:include` feature set, if any annotation is present.
    pub include_features: Option<Features>,
    /// `shast:exclude` feature set, if any annotation is present.
    pub exclude_features: Option<Features>,
}

impl Annotations {
    fn parse(graph: &Graph, shape_term: &Term) -> Result<Self, ShapeParseError> {
        let mut minting_strategy = None;
        if let Some(strategy) = get_object(graph, shape_term, shast::MINTING_STRATEGY) {
            let Term::NamedNode(strategy) = strategy else {
                return Err(ShapeParseError::invalid_annotation(
                    shape_term.clone(),
                    "shast:mintingStrategy must be an IRI",
                ));
            };
            minting_strategy =
                Some(MintingStrategy::from_annotation(strategy.as_ref()).ok_or_else(|| {
                    ShapeParseError::invalid_annotation(
                        shape_term.clone(),
                        format!("Unknown minting strategy <{}>", strategy.as_str()),
                    )
                })?);
        }

        let mut from_rdf_type = None;
        if let Some(annotated) = get_object(graph, shape_term, shast::FROM_RDF_TYPE) {
            let Term::NamedNode(annotated) = annotated else {
                return Err(ShapeParseError::invalid_annotation(
                    shape_term.clone(),
                    "shast:fromRdfType must be an IRI",
                ));
            };
            from_rdf_type = Some(annotated);
        }

        let mut to_rdf_types = Vec::new();
        for to_rdf_type in get_objects(graph, shape_term, shast::TO_RDF_TYPE) {
            let Term::NamedNode(to_rdf_type) = to_rdf_type else {
                return Err(ShapeParseError::invalid_annotation(
                    shape_term.clone(),
                    "shast:toRdfType must be an IRI",
                ));
            };
            to_rdf_types.push(to_rdf_type);
        }

        Ok(Self {
            name: get_string(graph, shape_term, shast::NAME),
            abstract_: get_boolean(graph, shape_term, shast::ABSTRACT).unwrap_or(false),
            extern_: get_boolean(graph, shape_term, shast::EXTERN).unwrap_or(false),
            minting_strategy,
            from_rdf_type,
            to_rdf_types,
            include_features: parse_feature_set(graph, shape_term, shast::INCLUDE)?,
            exclude_features: parse_feature_set(graph, shape_term, shast::EXCLUDE)?,
        })
    }
}

fn parse_feature_set(
    graph: &Graph,
    shape_term: &Term,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<Features>, ShapeParseError> {
    let objects = get_objects(graph, shape_term, predicate);
    if objects.is_empty() {
        return Ok(None);
    }
    let mut features = Features::EMPTY;
    for object in objects {
        let Term::NamedNode(feature) = object else {
            return Err(ShapeParseError::invalid_annotation(
                shape_term.clone(),
                "Feature annotations must be IRIs",
            ));
        };
        features = features.union(Features::from_annotation(feature.as_ref()).ok_or_else(
            || {
                ShapeParseError::invalid_annotation(
                    shape_term.clone(),
                    format!("Unknown feature <{}>", feature.as_str()),
                )
            },
        )?);
    }
    Ok(Some(features))
}

/// Data common to node and property shapes.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Shape identifier.
    pub id: ShapeId,
    /// `rdfs:label` values.
    pub labels: Vec<String>,
    /// `rdfs:comment` values.
    pub comments: Vec<String>,
    /// Explicit `rdfs:isDefinedBy` ontology IRI.
    pub is_defined_by: Option<NamedNode>,
    /// Constraint parameters.
    pub constraints: Constraints,
    /// Generator annotations.
    pub annotations: Annotations,
}

impl Shape {
    fn parse(graph: &Graph, id: ShapeId) -> Result<Self, ShapeParseError> {
        let term = id.to_term();
        let mut is_defined_by = None;
        if let Some(Term::NamedNode(ontology)) = get_object(graph, &term, rdfs::IS_DEFINED_BY) {
            is_defined_by = Some(ontology);
        }
        Ok(Self {
            id,
            labels: get_strings(graph, &term, rdfs::LABEL),
            comments: get_strings(graph, &term, rdfs::COMMENT),
            is_defined_by,
            constraints: Constraints::parse(graph, &term)?,
            annotations: Annotations::parse(graph, &term)?,
        })
    }
}

/// A node shape.
#[derive(Debug, Clone)]
pub struct NodeShape {
    /// Common shape data.
    pub base: Shape,
    /// `sh:closed`.
    pub closed: bool,
    /// Declared property shape ids, in declaration order.
    pub properties: Vec<ShapeId>,
    /// True if the shape is also an RDFS/OWL class.
    pub is_class: bool,
    /// True if the shape is `rdf:List` or a transitive subclass of it.
    pub is_list: bool,
    /// Direct superclass shapes.
    pub parents: Vec<ShapeId>,
    /// Direct subclass shapes.
    pub children: Vec<ShapeId>,
    /// Transitive superclass shapes.
    pub ancestors: Vec<ShapeId>,
    /// Transitive subclass shapes.
    pub descendants: Vec<ShapeId>,
}

impl NodeShape {
    /// Returns a reference to the shape ID.
    pub fn id(&self) -> &ShapeId {
        &self.base.id
    }
}

/// A property shape.
#[derive(Debug, Clone)]
pub struct PropertyShape {
    /// Common shape data.
    pub base: Shape,
    /// Property path (required for property shapes).
    pub path: PropertyPath,
    /// `sh:name`.
    pub name: Option<String>,
    /// `sh:description`.
    pub description: Option<String>,
    /// `sh:order`.
    pub order: Option<f64>,
    /// `sh:group`.
    pub group: Option<NamedNode>,
}

impl PropertyShape {
    /// Returns a reference to the shape ID.
    pub fn id(&self) -> &ShapeId {
        &self.base.id
    }

    /// Returns a reference to the property path.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }
}

/// An `owl:Ontology` present in the shapes graph.
#[derive(Debug, Clone)]
pub struct Ontology {
    /// Ontology IRI.
    pub iri: NamedNode,
    /// Generator annotations used as shape-level defaults.
    pub annotations: Annotations,
}

/// Collection of shapes parsed from an RDF graph.
#[derive(Debug, Clone, Default)]
pub struct ShapesGraph {
    node_shapes: FxHashMap<ShapeId, Arc<NodeShape>>,
    property_shapes: FxHashMap<ShapeId, Arc<PropertyShape>>,
    /// Node shape ids in discovery order.
    node_shape_order: Vec<ShapeId>,
    ontologies: Vec<Arc<Ontology>>,
}

impl ShapesGraph {
    /// Parses shapes from an RDF graph.
    ///
    /// Shape discovery is structural rather than purely by `rdf:type`: subjects typed
    /// as shapes, objects of `sh:node` and `sh:property`, subjects declaring
    /// `sh:property`, and members of `sh:and`/`sh:or`/`sh:xone` lists are all shapes.
    pub fn from_graph(graph: &Graph) -> Result<Self, ShapeParseError> {
        let (node_shape_order, property_shape_order) = discover_shapes(graph)?;

        let mut property_shapes = FxHashMap::default();
        for id in &property_shape_order {
            if let Some(shape) = parse_property_shape(graph, id)? {
                property_shapes.insert(id.clone(), Arc::new(shape));
            }
        }

        let mut bases = FxHashMap::default();
        for id in &node_shape_order {
            let base = Shape::parse(graph, id.clone())?;
            let term = id.to_term();
            let closed = get_boolean(graph, &term, shacl::CLOSED).unwrap_or(false);
            let properties = get_objects(graph, &term, shacl::PROPERTY)
                .into_iter()
                .map(term_to_shape_id)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                // Property shapes without sh:path have been dropped.
                .filter(|property| property_shapes.contains_key(property))
                .collect();
            bases.insert(id.clone(), (base, closed, properties));
        }

        let links = entail_class_links(graph, &node_shape_order);

        let mut node_shapes = FxHashMap::default();
        for id in &node_shape_order {
            let Some((base, closed, properties)) = bases.remove(id) else {
                continue;
            };
            let Some(link) = links.get(id) else {
                continue;
            };
            node_shapes.insert(
                id.clone(),
                Arc::new(NodeShape {
                    base,
                    closed,
                    properties,
                    is_class: link.is_class,
                    is_list: link.is_list,
                    parents: link.parents.clone(),
                    children: link.children.clone(),
                    ancestors: link.ancestors.clone(),
                    descendants: link.descendants.clone(),
                }),
            );
        }

        let mut ontologies = Vec::new();
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, owl::ONTOLOGY) {
            if let TermRef::NamedNode(iri) = TermRef::from(subject) {
                let iri = iri.into_owned();
                let annotations =
                    Annotations::parse(graph, &Term::NamedNode(iri.clone()))?;
                ontologies.push(Arc::new(Ontology { iri, annotations }));
            }
        }

        Ok(Self {
            node_shapes,
            property_shapes,
            node_shape_order,
            ontologies,
        })
    }

    /// Gets a node shape by ID.
    pub fn node_shape(&self, id: &ShapeId) -> Option<&Arc<NodeShape>> {
        self.node_shapes.get(id)
    }

    /// Gets a property shape by ID.
    pub fn property_shape(&self, id: &ShapeId) -> Option<&Arc<PropertyShape>> {
        self.property_shapes.get(id)
    }

    /// Returns an iterator over all node shapes, in discovery order.
    pub fn node_shapes(&self) -> impl Iterator<Item = &Arc<NodeShape>> {
        self.node_shape_order
            .iter()
            .filter_map(|id| self.node_shapes.get(id))
    }

    /// Returns an iterator over all property shapes.
    pub fn property_shapes(&self) -> impl Iterator<Item = &Arc<PropertyShape>> {
        self.property_shapes.values()
    }

    /// Returns the ontologies declared in the shapes graph.
    pub fn ontologies(&self) -> &[Arc<Ontology>] {
        &self.ontologies
    }

    /// Resolves the ontology owning a shape: explicit `rdfs:isDefinedBy`, else the
    /// only ontology in the graph, else the unique ontology whose IRI prefixes the
    /// shape IRI.
    pub fn ontology_for(&self, shape: &Shape) -> Option<&Arc<Ontology>> {
        if let Some(defined_by) = &shape.is_defined_by {
            return self
                .ontologies
                .iter()
                .find(|ontology| ontology.iri == *defined_by);
        }
        if let [ontology] = self.ontologies.as_slice() {
            return Some(ontology);
        }
        let iri = shape.id.as_named()?;
        let mut matches = self
            .ontologies
            .iter()
            .filter(|ontology| iri.as_str().starts_with(ontology.iri.as_str()));
        match (matches.next(), matches.next()) {
            (Some(ontology), None) => Some(ontology),
            _ => None,
        }
    }

    /// Returns true if the shapes graph is empty.
    pub fn is_empty(&self) -> bool {
        self.node_shapes.is_empty() && self.property_shapes.is_empty()
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.node_shapes.len() + self.property_shapes.len()
    }
}

/// Finds all node and property shape ids in the graph, in deterministic order.
fn discover_shapes(graph: &Graph) -> Result<(Vec<ShapeId>, Vec<ShapeId>), ShapeParseError> {
    let mut node_order = Vec::new();
    let mut node_seen = FxHashSet::default();
    let mut property_order = Vec::new();
    let mut property_seen = FxHashSet::default();

    let add_node = |id: ShapeId, order: &mut Vec<ShapeId>, seen: &mut FxHashSet<ShapeId>| {
        if seen.insert(id.clone()) {
            order.push(id);
        }
    };

    // Explicitly typed shapes
    for subject in graph.subjects_for_predicate_object(rdf::TYPE, shacl::NODE_SHAPE) {
        if let Some(id) = subject_to_shape_id(subject) {
            add_node(id, &mut node_order, &mut node_seen);
        }
    }
    for subject in graph.subjects_for_predicate_object(rdf::TYPE, shacl::PROPERTY_SHAPE) {
        if let Some(id) = subject_to_shape_id(subject) {
            add_node(id, &mut property_order, &mut property_seen);
        }
    }

    // Subjects and objects of sh:property
    for triple in graph.triples_for_predicate(shacl::PROPERTY) {
        if let Some(id) = subject_to_shape_id(triple.subject) {
            add_node(id, &mut node_order, &mut node_seen);
        }
        if let Ok(id) = term_to_shape_id(triple.object.into_owned()) {
            add_node(id, &mut property_order, &mut property_seen);
        }
    }

    // Objects of sh:node
    for triple in graph.triples_for_predicate(shacl::NODE) {
        if let Ok(id) = term_to_shape_id(triple.object.into_owned()) {
            add_node(id, &mut node_order, &mut node_seen);
        }
    }

    // Members of logical composition lists; members with sh:path are property shapes
    for predicate in [shacl::AND, shacl::OR, shacl::XONE] {
        for triple in graph.triples_for_predicate(predicate) {
            let context = triple.subject;
            let members = parse_term_list(
                graph,
                triple.object.into_owned(),
                &TermRef::from(context).into_owned(),
            )?;
            for member in members {
                let id = term_to_shape_id(member)?;
                if get_object(graph, &id.to_term(), shacl::PATH).is_some() {
                    add_node(id, &mut property_order, &mut property_seen);
                } else {
                    add_node(id, &mut node_order, &mut node_seen);
                }
            }
        }
    }

    Ok((node_order, property_order))
}

struct ClassLinks {
    is_class: bool,
    is_list: bool,
    parents: Vec<ShapeId>,
    children: Vec<ShapeId>,
    ancestors: Vec<ShapeId>,
    descendants: Vec<ShapeId>,
}

/// Derives class flags and subclass links between node shapes from
/// `rdfs:subClassOf` edges.
fn entail_class_links(graph: &Graph, node_shapes: &[ShapeId]) -> FxHashMap<ShapeId, ClassLinks> {
    let shape_ids: FxHashSet<&ShapeId> = node_shapes.iter().collect();
    let mut links = FxHashMap::default();

    for id in node_shapes {
        let term = id.to_term();

        let typed_class = get_objects(graph, &term, rdf::TYPE).into_iter().any(|t| {
            matches!(&t, Term::NamedNode(n) if n.as_ref() == rdfs::CLASS || n.as_ref() == owl::CLASS)
        });

        let supers = get_objects(graph, &term, rdfs::SUB_CLASS_OF);
        let parents: Vec<ShapeId> = supers
            .iter()
            .filter_map(|t| term_to_shape_id(t.clone()).ok())
            .filter(|parent| shape_ids.contains(parent))
            .collect();
        let children: Vec<ShapeId> = graph
            .subjects_for_predicate_object(rdfs::SUB_CLASS_OF, term.as_ref())
            .filter_map(subject_to_shape_id)
            .filter(|child| shape_ids.contains(child))
            .collect();

        let has_subclass_edges = !supers.is_empty()
            || graph
                .subjects_for_predicate_object(rdfs::SUB_CLASS_OF, term.as_ref())
                .next()
                .is_some();

        links.insert(
            id.clone(),
            ClassLinks {
                is_class: typed_class || has_subclass_edges,
                is_list: entails_list(graph, &term),
                parents,
                children,
                ancestors: Vec::new(),
                descendants: Vec::new(),
            },
        );
    }

    // Transitive closure over the direct links
    for id in node_shapes {
        let ancestors = transitive_links(id, &links, |link| &link.parents);
        let descendants = transitive_links(id, &links, |link| &link.children);
        if let Some(link) = links.get_mut(id) {
            link.ancestors = ancestors;
            link.descendants = descendants;
        }
    }

    links
}

/// Returns true if the term is `rdf:List` or reaches it via `rdfs:subClassOf`.
fn entails_list(graph: &Graph, term: &Term) -> bool {
    let list_term = Term::from(rdf::LIST.into_owned());
    let mut queue = vec![term.clone()];
    let mut visited = FxHashSet::default();
    while let Some(current) = queue.pop() {
        if current == list_term {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        queue.extend(get_objects(graph, &current, rdfs::SUB_CLASS_OF));
    }
    false
}

fn transitive_links(
    start: &ShapeId,
    links: &FxHashMap<ShapeId, ClassLinks>,
    direct: impl Fn(&ClassLinks) -> &Vec<ShapeId>,
) -> Vec<ShapeId> {
    let mut result = Vec::new();
    let mut seen = FxHashSet::default();
    let mut queue: Vec<ShapeId> = links.get(start).map_or_else(Vec::new, |l| direct(l).clone());
    while let Some(current) = queue.pop() {
        if !seen.insert(current.clone()) {
            continue;
        }
        if let Some(link) = links.get(&current) {
            queue.extend(direct(link).iter().cloned());
        }
        result.push(current);
    }
    result
}

fn parse_property_shape(
    graph: &Graph,
    id: &ShapeId,
) -> Result<Option<PropertyShape>, ShapeParseError> {
    let term = id.to_term();

    // Property shapes must have sh:path
    let Some(path_term) = get_object(graph, &term, shacl::PATH) else {
        return Ok(None);
    };
    let path = PropertyPath::parse(graph, path_term.as_ref())?;

    let mut order = None;
    if let Some(lit) = get_literal(graph, &term, shacl::ORDER) {
        order = lit.value().parse().ok();
    }
    let mut group = None;
    if let Some(Term::NamedNode(g)) = get_object(graph, &term, shacl::GROUP) {
        group = Some(g);
    }

    Ok(Some(PropertyShape {
        base: Shape::parse(graph, id.clone())?,
        path,
        name: get_string(graph, &term, shacl::NAME),
        description: get_string(graph, &term, shacl::DESCRIPTION),
        order,
        group,
    }))
}

// Helper functions

fn subject_to_shape_id(subject: SubjectRef<'_>) -> Option<ShapeId> {
    match TermRef::from(subject) {
        TermRef::NamedNode(n) => Some(ShapeId::Named(n.into_owned())),
        TermRef::BlankNode(b) => Some(ShapeId::Blank(b.into_owned())),
        _ => None,
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

fn get_objects(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term> {
    match subject {
        Term::NamedNode(n) => graph
            .objects_for_subject_predicate(n, predicate)
            .map(TermRef::into_owned)
            .collect(),
        Term::BlankNode(b) => graph
            .objects_for_subject_predicate(b, predicate)
            .map(TermRef::into_owned)
            .collect(),
        Term::Literal(_) => Vec::new(),
    }
}

fn get_string(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<String> {
    get_object(graph, subject, predicate).and_then(|t| {
        if let Term::Literal(lit) = t {
            Some(lit.value().to_string())
        } else {
            None
        }
    })
}

fn get_strings(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Vec<String> {
    get_objects(graph, subject, predicate)
        .into_iter()
        .filter_map(|t| {
            if let Term::Literal(lit) = t {
                Some(lit.value().to_string())
            } else {
                None
            }
        })
        .collect()
}

fn get_u64(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<u64> {
    get_object(graph, subject, predicate).and_then(|t| {
        if let Term::Literal(lit) = t {
            lit.value().parse().ok()
        } else {
            None
        }
    })
}

fn get_boolean(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<bool> {
    get_object(graph, subject, predicate).and_then(|t| {
        if let Term::Literal(lit) = t {
            match lit.value() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            }
        } else {
            None
        }
    })
}

fn get_literal(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<Literal> {
    get_object(graph, subject, predicate).and_then(|t| {
        if let Term::Literal(lit) = t {
            Some(lit)
        } else {
            None
        }
    })
}

fn term_to_shape_id(term: Term) -> Result<ShapeId, ShapeParseError> {
    match term {
        Term::NamedNode(n) => Ok(ShapeId::Named(n)),
        Term::BlankNode(b) => Ok(ShapeId::Blank(b)),
        Term::Literal(_) => Err(ShapeParseError::invalid_shape(
            term,
            "Shape reference must be an IRI or blank node",
        )),
    }
}

fn parse_string_list(
    graph: &Graph,
    list_head: Term,
    shape: &Term,
) -> Result<Vec<String>, ShapeParseError> {
    Ok(parse_term_list(graph, list_head, shape)?
        .into_iter()
        .filter_map(|t| {
            if let Term::Literal(lit) = t {
                Some(lit.value().to_string())
            } else {
                None
            }
        })
        .collect())
}

fn parse_term_list(
    graph: &Graph,
    list_head: Term,
    shape: &Term,
) -> Result<Vec<Term>, ShapeParseError> {
    let mut terms = Vec::new();
    let mut current = list_head;

    loop {
        if let Term::NamedNode(n) = &current {
            if n.as_ref() == rdf::NIL {
                break;
            }
        }

        let first = get_object(graph, &current, rdf::FIRST)
            .ok_or_else(|| ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:first"))?;
        terms.push(first);

        current = get_object(graph, &current, rdf::REST)
            .ok_or_else(|| ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:rest"))?;
    }

    Ok(terms)
}

fn parse_shape_list(
    graph: &Graph,
    list_head: Term,
    shape: &Term,
) -> Result<Vec<ShapeId>, ShapeParseError> {
    parse_term_list(graph, list_head, shape)?
        .into_iter()
        .map(term_to_shape_id)
        .collect()
}
