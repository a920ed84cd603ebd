//! The shapes-to-types transformation engine.
//!
//! [`Ast::from_shapes_graph`] drives the run: every named, non-reserved node shape is
//! pushed through an ordered strategy chain (compound, list, object, identifier,
//! literal, term), successes are bucketed by kind, failures are recorded as warnings
//! in the diagnostics sink and skipped. Referenced shapes transform on demand; results
//! are cached per shape; re-entrant references are answered with synthetic stub types.

use oxrdf::{BlankNode, Literal, NamedNode, Term};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{
    Ast, Features, IdentifierType, IntersectionType, ListType, LiteralType, MintingStrategy,
    ObjectIntersectionType, ObjectType, ObjectTypeRef, ObjectUnionType, Property, SetType,
    TermType, Type, UnionType,
};
use crate::diagnostics::Diagnostics;
use crate::error::TransformError;
use crate::model::{iri_local_name, NodeShape, Shape, ShapeId, ShapesGraph};
use crate::node_kind::{self, NodeKindSet};
use crate::recursion::is_object_type_property_recursive;
use crate::vocab::{dash, owl, shacl, shast};

/// Vocabulary namespaces whose shapes only transform on demand, never top-level.
const RESERVED_NAMESPACES: &[&str] = &[
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.w3.org/2000/01/rdf-schema#",
    "http://www.w3.org/2001/XMLSchema#",
    owl::NAMESPACE,
    shacl::NAMESPACE,
    dash::NAMESPACE,
    shast::NAMESPACE,
];

impl Ast {
    /// Compiles a parsed shapes graph into the abstract type model.
    ///
    /// Shapes that fail to transform are skipped with a warning in `diagnostics`;
    /// the run itself never fails.
    pub fn from_shapes_graph(shapes: &ShapesGraph, diagnostics: &mut Diagnostics) -> Self {
        let mut transformer = Transformer::new(shapes, diagnostics);

        let mut object_type_order = Vec::new();
        let mut object_intersection_type_order = Vec::new();
        let mut object_union_type_order = Vec::new();

        for shape in shapes.node_shapes() {
            let id = shape.id();
            let Some(iri) = id.as_named() else {
                continue;
            };
            if RESERVED_NAMESPACES
                .iter()
                .any(|namespace| iri.as_str().starts_with(namespace))
            {
                continue;
            }
            match transformer.transform_node_shape(id) {
                Ok(Type::Object(reference)) if reference.id == *id => {
                    object_type_order.push(id.clone());
                }
                Ok(Type::ObjectIntersection(composite)) if composite == *id => {
                    object_intersection_type_order.push(id.clone());
                }
                Ok(Type::ObjectUnion(composite)) if composite == *id => {
                    object_union_type_order.push(id.clone());
                }
                // Top-level lists and non-object results carry no generated type
                Ok(_) => {}
                Err(error) => {
                    transformer
                        .diagnostics
                        .warning(Some(id.clone()), format!("skipping shape: {error}"));
                }
            }
        }

        // Synthetic stubs referenced from bucketed object types join the bucket
        let mut stub_ids = Vec::new();
        let mut seen_stubs = FxHashSet::default();
        for id in &object_type_order {
            if let Some(object_type) = transformer.object_types.get(id) {
                for property in &object_type.properties {
                    collect_stubs(&property.ty, &mut stub_ids, &mut seen_stubs);
                }
            }
        }
        object_type_order.extend(stub_ids);

        let Transformer {
            object_types,
            object_intersection_types,
            object_union_types,
            ..
        } = transformer;

        let mut ast = Self {
            object_types_by_id: object_types,
            object_intersection_types_by_id: object_intersection_types,
            object_union_types_by_id: object_union_types,
            object_type_order,
            object_intersection_type_order,
            object_union_type_order,
        };

        link_object_types(&mut ast, shapes);
        annotate_recursive_properties(&mut ast);

        ast
    }
}

/// Populates parent/child/ancestor/descendant links from the shape model's subclass
/// edges, filtered to ids that compiled to plain object types.
fn link_object_types(ast: &mut Ast, shapes: &ShapesGraph) {
    let mut links = Vec::new();
    for id in ast.object_types_by_id.keys() {
        let Some(shape) = shapes.node_shape(id) else {
            continue;
        };
        let filter = |ids: &[ShapeId]| -> Vec<ShapeId> {
            ids.iter()
                .filter(|linked| ast.object_types_by_id.contains_key(*linked))
                .cloned()
                .collect()
        };
        links.push((
            id.clone(),
            filter(&shape.parents),
            filter(&shape.children),
            filter(&shape.ancestors),
            filter(&shape.descendants),
        ));
    }
    for (id, parents, children, ancestors, descendants) in links {
        if let Some(object_type) = ast.object_type_mut(&id) {
            object_type.parent_object_types = parents;
            object_type.child_object_types = children;
            object_type.ancestor_object_types = ancestors;
            object_type.descendant_object_types = descendants;
        }
    }
}

fn annotate_recursive_properties(ast: &mut Ast) {
    let mut recursive = Vec::new();
    for object_type in ast.object_types() {
        for (index, property) in object_type.properties.iter().enumerate() {
            if is_object_type_property_recursive(ast, object_type, property) {
                recursive.push((object_type.id.clone(), index));
            }
        }
    }
    for (id, index) in recursive {
        if let Some(property) = ast
            .object_type_mut(&id)
            .and_then(|object_type| object_type.properties.get_mut(index))
        {
            property.recursive = true;
        }
    }
}

fn collect_stubs(ty: &Type, out: &mut Vec<ShapeId>, seen: &mut FxHashSet<ShapeId>) {
    match ty {
        Type::Object(reference) => {
            if let Some(stub) = &reference.stub {
                if seen.insert(stub.clone()) {
                    out.push(stub.clone());
                }
            }
        }
        Type::Option(item) => collect_stubs(item, out, seen),
        Type::Set(set) => collect_stubs(&set.item, out, seen),
        Type::List(list) => collect_stubs(&list.item, out, seen),
        Type::Union(union) => {
            for member in &union.members {
                collect_stubs(member, out, seen);
            }
        }
        Type::Intersection(intersection) => {
            for member in &intersection.members {
                collect_stubs(member, out, seen);
            }
        }
        Type::Identifier(_)
        | Type::Literal(_)
        | Type::Term(_)
        | Type::ObjectIntersection(_)
        | Type::ObjectUnion(_) => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Composition {
    Intersection,
    Union,
}

struct Transformer<'a> {
    shapes: &'a ShapesGraph,
    diagnostics: &'a mut Diagnostics,
    /// Finished results per shape, errors included.
    cache: FxHashMap<ShapeId, Result<Type, TransformError>>,
    /// Shapes currently being transformed, for re-entrancy detection.
    stack: Vec<ShapeId>,
    object_types: FxHashMap<ShapeId, ObjectType>,
    object_intersection_types: FxHashMap<ShapeId, ObjectIntersectionType>,
    object_union_types: FxHashMap<ShapeId, ObjectUnionType>,
    stubs_by_name: FxHashMap<String, ShapeId>,
}

impl<'a> Transformer<'a> {
    fn new(shapes: &'a ShapesGraph, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            shapes,
            diagnostics,
            cache: FxHashMap::default(),
            stack: Vec::new(),
            object_types: FxHashMap::default(),
            object_intersection_types: FxHashMap::default(),
            object_union_types: FxHashMap::default(),
            stubs_by_name: FxHashMap::default(),
        }
    }

    fn transform_node_shape(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        if let Some(result) = self.cache.get(id) {
            return result.clone();
        }
        if self.stack.contains(id) {
            // Re-entrant references are answered with a stub and never cached
            return self.reentrant_reference(id);
        }
        self.stack.push(id.clone());
        let result = self.transform_node_shape_inner(id);
        self.stack.pop();
        self.cache.insert(id.clone(), result.clone());
        result
    }

    fn transform_node_shape_inner(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        let shapes = self.shapes;
        let Some(shape) = shapes.node_shape(id) else {
            return Err(TransformError::unresolvable(id.clone()));
        };

        if shape.base.constraints.has_compound() {
            let constraints = &shape.base.constraints;
            let own_object = if (!constraints.classes.is_empty() || !constraints.nodes.is_empty())
                && (!shape.properties.is_empty() || shape.closed)
            {
                Some(self.transform_object(shape)?)
            } else {
                None
            };
            if let Some(ty) = self.transform_compound(&shape.base, own_object, false)? {
                return Ok(ty);
            }
        }

        if shape.is_list {
            return self.transform_list(shape);
        }

        if !shape.properties.is_empty() || shape.closed || shape.is_class {
            return self.transform_object(shape);
        }

        let parent_kinds = self.ancestor_node_kinds(shape);
        self.transform_scalar(&shape.base, &parent_kinds, false)
    }

    fn transform_property_shape(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        if let Some(result) = self.cache.get(id) {
            return result.clone();
        }
        if self.stack.contains(id) {
            return Err(TransformError::unable_to_transform(id.clone()));
        }
        self.stack.push(id.clone());
        let result = self.transform_property_shape_inner(id);
        self.stack.pop();
        self.cache.insert(id.clone(), result.clone());
        result
    }

    fn transform_property_shape_inner(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        let shapes = self.shapes;
        let Some(shape) = shapes.property_shape(id) else {
            return Err(TransformError::unresolvable(id.clone()));
        };
        let constraints = &shape.base.constraints;

        let mut inner = None;
        if constraints.has_compound() {
            inner = self.transform_compound(&shape.base, None, true)?;
        }
        let inner = match inner {
            Some(ty) => ty,
            None => self.transform_scalar(&shape.base, &[], true)?,
        };

        let min_count = constraints.min_count.unwrap_or(0);
        Ok(match (min_count, constraints.max_count) {
            (1, Some(1)) => inner,
            (0, Some(1)) => Type::Option(Box::new(inner)),
            (min_count, _) => Type::Set(SetType {
                item: Box::new(inner),
                min_count,
            }),
        })
    }

    /// Transforms a compound member, which may itself be a node or a property shape.
    fn transform_member(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        if self.shapes.property_shape(id).is_some() {
            self.transform_property_shape(id)
        } else {
            self.transform_node_shape(id)
        }
    }

    /// The compound strategy. Returns `Ok(None)` when a class/node composition is
    /// abandoned via soft recovery and the caller's chain should continue.
    fn transform_compound(
        &mut self,
        base: &Shape,
        own_object: Option<Type>,
        property_level: bool,
    ) -> Result<Option<Type>, TransformError> {
        let constraints = &base.constraints;
        let union_ids: Vec<ShapeId> = constraints
            .xone
            .iter()
            .chain(constraints.or.iter())
            .cloned()
            .collect();

        let mut intersection_refs: Vec<(ShapeId, Option<NamedNode>)> = Vec::new();
        for member in &constraints.and {
            intersection_refs.push((member.clone(), None));
        }
        for class in &constraints.classes {
            if class.as_ref() == owl::CLASS
                || class.as_ref() == owl::THING
                || class.as_ref() == oxrdf::vocab::rdfs::CLASS
            {
                return Err(TransformError::GenericClass {
                    class: class.clone(),
                });
            }
            intersection_refs.push((ShapeId::Named(class.clone()), Some(class.clone())));
        }
        for node in &constraints.nodes {
            intersection_refs.push((node.clone(), None));
        }

        if !union_ids.is_empty() && !intersection_refs.is_empty() {
            return Err(TransformError::IncompatibleComposition {
                shape: base.id.clone(),
            });
        }

        if !union_ids.is_empty() {
            let mut members = Vec::with_capacity(union_ids.len());
            for member in &union_ids {
                members.push(strip_cardinality(self.transform_member(member)?));
            }
            return self
                .compose(base, members, Composition::Union, property_level)
                .map(Some);
        }

        // Class/node compositions where every member fails recover softly: the
        // composition is abandoned and the chain continues.
        let recoverable = constraints.and.is_empty() && own_object.is_none();
        let mut members = Vec::new();
        let mut first_error = None;
        for (member, class) in &intersection_refs {
            match self.transform_member(member) {
                Ok(ty) => {
                    let ty = strip_cardinality(ty);
                    if let Some(class) = class {
                        if !is_object_kind(&ty) {
                            return Err(TransformError::NonObjectClass {
                                class: class.clone(),
                            });
                        }
                    }
                    members.push(ty);
                }
                Err(error) => {
                    if recoverable {
                        if first_error.is_none() {
                            first_error = Some(error);
                        }
                    } else {
                        return Err(error);
                    }
                }
            }
        }
        if let Some(error) = first_error {
            if members.is_empty() {
                self.diagnostics.info(
                    Some(base.id.clone()),
                    format!("abandoning composition: {error}"),
                );
                return Ok(None);
            }
            return Err(error);
        }
        if let Some(own) = own_object {
            members.push(own);
        }
        self.compose(base, members, Composition::Intersection, property_level)
            .map(Some)
    }

    fn compose(
        &mut self,
        base: &Shape,
        mut members: Vec<Type>,
        composition: Composition,
        property_level: bool,
    ) -> Result<Type, TransformError> {
        if members.len() == 1 {
            return Ok(members.remove(0));
        }

        if property_level
            && composition == Composition::Union
            && base.constraints.has_value.is_none()
        {
            if let Some(collapsed) = collapse_members(&members) {
                return Ok(collapsed);
            }
        }

        if members.iter().all(is_object_kind) {
            let (flat, features) = self.flatten(&base.id, &members, composition)?;
            let name = base
                .annotations
                .name
                .clone()
                .unwrap_or_else(|| base.id.local_name().to_string());
            let label = base.labels.first().cloned();
            let comment = base.comments.first().cloned();
            return Ok(match composition {
                Composition::Union => {
                    self.object_union_types.insert(
                        base.id.clone(),
                        ObjectUnionType {
                            id: base.id.clone(),
                            name,
                            label,
                            comment,
                            members: flat,
                            features,
                        },
                    );
                    Type::ObjectUnion(base.id.clone())
                }
                Composition::Intersection => {
                    self.object_intersection_types.insert(
                        base.id.clone(),
                        ObjectIntersectionType {
                            id: base.id.clone(),
                            name,
                            label,
                            comment,
                            members: flat,
                            features,
                        },
                    );
                    Type::ObjectIntersection(base.id.clone())
                }
            });
        }

        Ok(match composition {
            Composition::Union => Type::Union(UnionType { members }),
            Composition::Intersection => Type::Intersection(IntersectionType { members }),
        })
    }

    /// Flattens composite members into object type ids and validates the result:
    /// same-kind nested composites expand, non-extern feature sets must be uniform,
    /// and non-extern union members must be discriminable by `from_rdf_type`.
    fn flatten(
        &self,
        shape: &ShapeId,
        members: &[Type],
        composition: Composition,
    ) -> Result<(Vec<ShapeId>, Features), TransformError> {
        let mut flat: Vec<ShapeId> = Vec::new();
        for member in members {
            match member {
                Type::Object(reference) => flat.push(reference.id.clone()),
                Type::ObjectUnion(id) => {
                    if composition == Composition::Union {
                        if let Some(nested) = self.object_union_types.get(id) {
                            flat.extend(nested.members.iter().cloned());
                        }
                    } else {
                        return Err(TransformError::NestedComposite {
                            shape: shape.clone(),
                            nested: "union",
                        });
                    }
                }
                Type::ObjectIntersection(id) => {
                    if composition == Composition::Intersection {
                        if let Some(nested) = self.object_intersection_types.get(id) {
                            flat.extend(nested.members.iter().cloned());
                        }
                    } else {
                        return Err(TransformError::NestedComposite {
                            shape: shape.clone(),
                            nested: "intersection",
                        });
                    }
                }
                _ => {
                    return Err(TransformError::IncompatibleComposition {
                        shape: shape.clone(),
                    })
                }
            }
        }
        assert!(
            flat.len() >= members.len(),
            "flattening must not lose composite members"
        );

        // Extern members stay in the member list but sit out the feature and
        // discrimination validations: their generated code lives elsewhere.
        let member_types: Vec<&ObjectType> = flat
            .iter()
            .filter_map(|id| self.object_types.get(id))
            .filter(|object_type| !object_type.extern_)
            .collect();

        let features = member_types
            .first()
            .map_or_else(Features::default, |first| first.features);
        for member_type in &member_types {
            if member_type.features != features {
                return Err(TransformError::HeterogeneousFeatures {
                    shape: shape.clone(),
                    member: member_type.name.clone(),
                });
            }
        }

        if composition == Composition::Union {
            let discriminated: Vec<&NamedNode> = member_types
                .iter()
                .filter_map(|member_type| member_type.from_rdf_type.as_ref())
                .collect();
            let mut distinct = FxHashSet::default();
            let duplicated = !discriminated
                .iter()
                .all(|rdf_type| distinct.insert(rdf_type.as_str()));
            let mixed = !discriminated.is_empty() && discriminated.len() != member_types.len();
            if duplicated || mixed {
                let types = member_types
                    .iter()
                    .map(|member_type| member_type.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let rdf_types = discriminated
                    .iter()
                    .map(|rdf_type| format!("<{}>", rdf_type.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(TransformError::AmbiguousDiscrimination {
                    shape: shape.clone(),
                    types,
                    rdf_types,
                });
            }
        }

        Ok((flat, features))
    }

    /// The list strategy: the item type comes from the shape's `rdf:first` property.
    fn transform_list(&mut self, shape: &NodeShape) -> Result<Type, TransformError> {
        let shapes = self.shapes;
        let first_property = shape
            .properties
            .iter()
            .find(|property| {
                shapes.property_shape(property).is_some_and(|declared| {
                    declared
                        .path
                        .as_predicate()
                        .is_some_and(|predicate| predicate.as_ref() == oxrdf::vocab::rdf::FIRST)
                })
            })
            .cloned()
            .ok_or_else(|| TransformError::unable_to_transform(shape.id().clone()))?;

        let item = strip_cardinality(self.transform_property_shape(&first_property)?);

        let parent_kinds = self.ancestor_node_kinds(shape);
        let kinds = node_kind::resolve(
            &shape.base.id,
            &shape.base.constraints,
            &parent_kinds,
            Some(NodeKindSet::IDENTIFIER),
            false,
        )?
        .intersection(NodeKindSet::IDENTIFIER);
        let identifier_node_kinds = if kinds.is_empty() {
            NodeKindSet::IDENTIFIER
        } else {
            kinds
        };

        Ok(Type::List(ListType {
            item: Box::new(item),
            identifier_node_kinds,
            minting_strategy: self.minting_strategy_for(&shape.base),
        }))
    }

    /// The object strategy: compiles the shape's own properties into an
    /// [`ObjectType`] registered under the shape id.
    fn transform_object(&mut self, shape: &NodeShape) -> Result<Type, TransformError> {
        let shapes = self.shapes;
        let id = shape.id().clone();

        let mut properties = Vec::with_capacity(shape.properties.len());
        for property_id in &shape.properties {
            let Some(property_shape) = shapes.property_shape(property_id) else {
                return Err(TransformError::unresolvable(property_id.clone()));
            };
            let Some(predicate) = property_shape.path.as_predicate().cloned() else {
                return Err(TransformError::NonPredicatePath {
                    shape: property_id.clone(),
                });
            };
            let name = property_shape
                .base
                .annotations
                .name
                .clone()
                .or_else(|| property_shape.name.clone())
                .unwrap_or_else(|| iri_local_name(predicate.as_str()).to_string());
            let label = property_shape.base.labels.first().cloned();
            let description = property_shape.description.clone();
            let order = property_shape.order;
            let ty = self.transform_property_shape(property_id)?;
            properties.push(Property {
                path: predicate,
                name,
                label,
                description,
                order,
                ty,
                recursive: false,
            });
        }
        // Ordered properties first; ties and unordered properties fall back to
        // the predicate IRI so the output is stable across runs
        properties.sort_by(|a, b| match (a.order, b.order) {
            (Some(left), Some(right)) => left
                .total_cmp(&right)
                .then_with(|| a.path.as_str().cmp(b.path.as_str())),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.path.as_str().cmp(b.path.as_str()),
        });

        let annotations = &shape.base.annotations;
        let abstract_ = annotations.abstract_;

        let mut from_rdf_type = annotations.from_rdf_type.clone();
        let mut to_rdf_types = Vec::new();
        if shape.is_class && !abstract_ {
            if let Some(iri) = id.as_named() {
                if from_rdf_type.is_none() {
                    from_rdf_type = Some(iri.clone());
                }
                to_rdf_types.push(iri.clone());
            }
        }
        to_rdf_types.extend(annotations.to_rdf_types.iter().cloned());

        let parent_kinds = self.ancestor_node_kinds(shape);
        let identifier_node_kinds = node_kind::resolve(
            &shape.base.id,
            &shape.base.constraints,
            &parent_kinds,
            Some(NodeKindSet::IDENTIFIER),
            false,
        )?
        .intersection(NodeKindSet::IDENTIFIER);
        if identifier_node_kinds.is_empty() {
            return Err(TransformError::unable_to_transform(id));
        }

        self.object_types.insert(
            id.clone(),
            ObjectType {
                id: id.clone(),
                name: annotations
                    .name
                    .clone()
                    .unwrap_or_else(|| id.local_name().to_string()),
                label: shape.base.labels.first().cloned(),
                comment: shape.base.comments.first().cloned(),
                abstract_,
                extern_: annotations.extern_,
                synthetic: false,
                from_rdf_type,
                to_rdf_types,
                identifier_node_kinds,
                identifier_minting_strategy: self.minting_strategy_for(&shape.base),
                features: self.features_for(&shape.base),
                properties,
                parent_object_types: Vec::new(),
                child_object_types: Vec::new(),
                ancestor_object_types: Vec::new(),
                descendant_object_types: Vec::new(),
            },
        );

        Ok(Type::Object(ObjectTypeRef { id, stub: None }))
    }

    /// The scalar chain: identifier, then literal, then term.
    fn transform_scalar(
        &mut self,
        base: &Shape,
        parent_kinds: &[NodeKindSet],
        is_property_shape: bool,
    ) -> Result<Type, TransformError> {
        let constraints = &base.constraints;
        let kinds = node_kind::resolve(
            &base.id,
            constraints,
            parent_kinds,
            None,
            is_property_shape,
        )?;

        if !kinds.is_empty() && kinds.is_subset(NodeKindSet::IDENTIFIER) {
            let mut in_values = Vec::new();
            for term in constraints.in_values.iter().flatten() {
                match term {
                    Term::NamedNode(iri) => in_values.push(iri.clone()),
                    _ => {
                        return Err(TransformError::NonIriIdentifierTerm {
                            shape: base.id.clone(),
                        })
                    }
                }
            }
            return Ok(Type::Identifier(IdentifierType {
                node_kinds: kinds,
                has_value: identifier_value(base, constraints.has_value.as_ref())?,
                default_value: identifier_value(base, constraints.default_value.as_ref())?,
                in_values,
            }));
        }

        if constraints.datatype.is_some()
            || constraints.has_range()
            || !constraints.language_in.is_empty()
            || kinds == NodeKindSet::LITERAL
        {
            return Ok(Type::Literal(LiteralType {
                datatype: constraints.datatype.clone(),
                language_in: constraints.language_in.clone(),
                has_value: literal_value(constraints.has_value.as_ref()),
                default_value: literal_value(constraints.default_value.as_ref()),
                in_values: constraints
                    .in_values
                    .iter()
                    .flatten()
                    .filter_map(|term| literal_value(Some(term)))
                    .collect(),
                min_exclusive: constraints.min_exclusive.clone(),
                min_inclusive: constraints.min_inclusive.clone(),
                max_exclusive: constraints.max_exclusive.clone(),
                max_inclusive: constraints.max_inclusive.clone(),
            }));
        }

        Ok(Type::Term(TermType {
            node_kinds: kinds,
            has_value: constraints.has_value.clone(),
            default_value: constraints.default_value.clone(),
            in_values: constraints.in_values.clone().unwrap_or_default(),
        }))
    }

    /// Answers a reference to a shape currently on the stack with a synthetic stub
    /// object type, created once per name.
    fn reentrant_reference(&mut self, id: &ShapeId) -> Result<Type, TransformError> {
        let shapes = self.shapes;
        let Some(shape) = shapes.node_shape(id) else {
            return Err(TransformError::unresolvable(id.clone()));
        };

        let mut name = shape
            .base
            .annotations
            .name
            .clone()
            .unwrap_or_else(|| id.local_name().to_string());
        name.push_str("Stub");

        let stub_id = if let Some(existing) = self.stubs_by_name.get(&name) {
            existing.clone()
        } else {
            let kinds = node_kind::resolve(
                &shape.base.id,
                &shape.base.constraints,
                &[],
                Some(NodeKindSet::IDENTIFIER),
                false,
            )?
            .intersection(NodeKindSet::IDENTIFIER);
            let identifier_node_kinds = if kinds.is_empty() {
                NodeKindSet::IDENTIFIER
            } else {
                kinds
            };

            let stub_id = ShapeId::Blank(BlankNode::default());
            self.object_types.insert(
                stub_id.clone(),
                ObjectType {
                    id: stub_id.clone(),
                    name: name.clone(),
                    label: None,
                    comment: None,
                    abstract_: false,
                    extern_: false,
                    synthetic: true,
                    from_rdf_type: None,
                    to_rdf_types: Vec::new(),
                    identifier_node_kinds,
                    identifier_minting_strategy: self.minting_strategy_for(&shape.base),
                    features: self.features_for(&shape.base),
                    properties: Vec::new(),
                    parent_object_types: Vec::new(),
                    child_object_types: Vec::new(),
                    ancestor_object_types: Vec::new(),
                    descendant_object_types: Vec::new(),
                },
            );
            self.stubs_by_name.insert(name, stub_id.clone());
            stub_id
        };

        Ok(Type::Object(ObjectTypeRef {
            id: id.clone(),
            stub: Some(stub_id),
        }))
    }

    /// Collects the explicit node kind sets of the shape's ancestors.
    fn ancestor_node_kinds(&self, shape: &NodeShape) -> Vec<NodeKindSet> {
        shape
            .ancestors
            .iter()
            .filter_map(|ancestor| self.shapes.node_shape(ancestor))
            .filter_map(|ancestor| ancestor.base.constraints.node_kinds)
            .collect()
    }

    /// Feature set derivation: shape include, else ontology include, else all,
    /// minus shape exclude, else ontology exclude, else none.
    fn features_for(&self, base: &Shape) -> Features {
        let ontology = self.shapes.ontology_for(base);
        let include = base
            .annotations
            .include_features
            .or_else(|| ontology.and_then(|ontology| ontology.annotations.include_features))
            .unwrap_or(Features::ALL);
        let exclude = base
            .annotations
            .exclude_features
            .or_else(|| ontology.and_then(|ontology| ontology.annotations.exclude_features))
            .unwrap_or(Features::EMPTY);
        include.difference(exclude)
    }

    fn minting_strategy_for(&self, base: &Shape) -> Option<MintingStrategy> {
        base.annotations.minting_strategy.or_else(|| {
            self.shapes
                .ontology_for(base)
                .and_then(|ontology| ontology.annotations.minting_strategy)
        })
    }
}

/// Removes one cardinality wrapper, exposing the member type beneath.
fn strip_cardinality(ty: Type) -> Type {
    match ty {
        Type::Option(item) => *item,
        Type::Set(set) => *set.item,
        other => other,
    }
}

fn is_object_kind(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Object(_) | Type::ObjectIntersection(_) | Type::ObjectUnion(_)
    )
}

/// Property-level member collapses: a union of unrefined literal types becomes one
/// literal type (datatype kept only if unanimous); a union of unrefined identifier
/// types becomes one identifier type with the unioned kinds.
fn collapse_members(members: &[Type]) -> Option<Type> {
    let literals: Vec<&LiteralType> = members
        .iter()
        .filter_map(|member| match member {
            Type::Literal(literal) if !literal.is_refined() => Some(literal),
            _ => None,
        })
        .collect();
    if literals.len() == members.len() {
        let datatype = literals
            .first()
            .and_then(|first| first.datatype.clone())
            .filter(|datatype| {
                literals
                    .iter()
                    .all(|literal| literal.datatype.as_ref() == Some(datatype))
            });
        return Some(Type::Literal(LiteralType {
            datatype,
            ..LiteralType::default()
        }));
    }

    let identifiers: Vec<&IdentifierType> = members
        .iter()
        .filter_map(|member| match member {
            Type::Identifier(identifier) if !identifier.is_refined() => Some(identifier),
            _ => None,
        })
        .collect();
    if identifiers.len() == members.len() {
        let node_kinds = identifiers
            .iter()
            .fold(NodeKindSet::EMPTY, |kinds, identifier| {
                kinds.union(identifier.node_kinds)
            });
        return Some(Type::Identifier(IdentifierType {
            node_kinds,
            ..IdentifierType::default()
        }));
    }

    None
}

fn identifier_value(
    base: &Shape,
    term: Option<&Term>,
) -> Result<Option<NamedNode>, TransformError> {
    match term {
        None => Ok(None),
        Some(Term::NamedNode(iri)) => Ok(Some(iri.clone())),
        Some(_) => Err(TransformError::NonIriIdentifierTerm {
            shape: base.id.clone(),
        }),
    }
}

fn literal_value(term: Option<&Term>) -> Option<Literal> {
    match term {
        Some(Term::Literal(literal)) => Some(literal.clone()),
        _ => None,
    }
}
