//! Integration tests for compiling shapes graphs into the abstract type model.

use oxrdf::{Graph, NamedNode};
use oxrdfio::{RdfFormat, RdfParser};
use shast::{
    Ast, Diagnostics, Features, IdentifierType, LiteralType, NodeKindSet, ObjectType, Property,
    Severity, ShapeId, ShapesGraph, Type,
};

/// Helper to parse a Turtle string into a Graph.
fn parse_turtle(turtle: &str) -> Graph {
    let mut graph = Graph::new();
    let parser = RdfParser::from_format(RdfFormat::Turtle);
    for quad_result in parser.for_reader(turtle.as_bytes()) {
        let quad = quad_result.expect("Failed to parse turtle");
        graph.insert(quad.as_ref());
    }
    graph
}

/// Helper to parse shapes from Turtle.
fn parse_shapes(turtle: &str) -> ShapesGraph {
    let graph = parse_turtle(turtle);
    ShapesGraph::from_graph(&graph).expect("Failed to parse shapes")
}

/// Helper to compile Turtle shapes into an AST plus the collected diagnostics.
fn compile(turtle: &str) -> (Ast, Diagnostics) {
    let shapes = parse_shapes(turtle);
    let mut diagnostics = Diagnostics::new();
    let ast = Ast::from_shapes_graph(&shapes, &mut diagnostics);
    (ast, diagnostics)
}

fn shape_id(iri: &str) -> ShapeId {
    NamedNode::new(iri).expect("valid IRI").into()
}

fn named(iri: &str) -> NamedNode {
    NamedNode::new(iri).expect("valid IRI")
}

fn property_named<'a>(object_type: &'a ObjectType, name: &str) -> &'a Property {
    object_type
        .properties
        .iter()
        .find(|property| property.name == name)
        .unwrap_or_else(|| panic!("no property named {name}"))
}

// =============================================================================
// Object types and inheritance
// =============================================================================

#[test]
fn test_class_hierarchy_compiles_to_linked_object_types() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:AgentShape a sh:NodeShape, rdfs:Class ;
            sh:property [
                sh:path ex:name ;
                sh:datatype xsd:string ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
            ] .

        ex:PersonShape a sh:NodeShape, rdfs:Class ;
            rdfs:subClassOf ex:AgentShape ;
            sh:property [
                sh:path ex:age ;
                sh:datatype xsd:integer ;
                sh:maxCount 1 ;
            ] .
    "#,
    );

    assert!(diagnostics.is_empty(), "unexpected diagnostics");
    assert_eq!(ast.object_types().count(), 2);

    let agent_id = shape_id("http://example.org/AgentShape");
    let person_id = shape_id("http://example.org/PersonShape");
    let agent = ast.object_type(&agent_id).expect("AgentShape compiled");
    let person = ast.object_type(&person_id).expect("PersonShape compiled");

    assert_eq!(agent.name, "AgentShape");
    assert_eq!(
        agent.from_rdf_type,
        Some(named("http://example.org/AgentShape"))
    );
    assert_eq!(agent.to_rdf_types, vec![named("http://example.org/AgentShape")]);

    // Each object type carries only its own properties.
    assert_eq!(agent.properties.len(), 1);
    assert_eq!(
        agent.properties[0].ty,
        Type::Literal(LiteralType {
            datatype: Some(named("http://www.w3.org/2001/XMLSchema#string")),
            ..LiteralType::default()
        })
    );
    assert_eq!(person.properties.len(), 1);
    assert_eq!(
        person.properties[0].ty,
        Type::Option(Box::new(Type::Literal(LiteralType {
            datatype: Some(named("http://www.w3.org/2001/XMLSchema#integer")),
            ..LiteralType::default()
        })))
    );

    assert_eq!(person.parent_object_types, vec![agent_id.clone()]);
    assert_eq!(agent.child_object_types, vec![person_id.clone()]);
    assert_eq!(person.ancestor_object_types, vec![agent_id.clone()]);
    assert_eq!(agent.descendant_object_types, vec![person_id.clone()]);

    // Topological ordering puts the parent first, whatever the input order.
    let sorted = ObjectType::toposort(&[person, agent]);
    assert_eq!(sorted[0].id, agent_id);
    assert_eq!(sorted[1].id, person_id);
}

#[test]
fn test_cardinality_determines_property_wrapping() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:BookShape a sh:NodeShape ;
            sh:property [
                sh:path ex:title ;
                sh:datatype xsd:string ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
            ] ;
            sh:property [
                sh:path ex:subtitle ;
                sh:datatype xsd:string ;
                sh:maxCount 1 ;
            ] ;
            sh:property [
                sh:path ex:author ;
                sh:datatype xsd:string ;
                sh:minCount 2 ;
            ] .
    "#,
    );

    assert!(diagnostics.is_empty());
    let book = ast
        .object_type(&shape_id("http://example.org/BookShape"))
        .expect("BookShape compiled");

    let string_literal = Type::Literal(LiteralType {
        datatype: Some(named("http://www.w3.org/2001/XMLSchema#string")),
        ..LiteralType::default()
    });
    assert_eq!(property_named(book, "title").ty, string_literal);
    assert_eq!(
        property_named(book, "subtitle").ty,
        Type::Option(Box::new(string_literal.clone()))
    );
    match &property_named(book, "author").ty {
        Type::Set(set) => {
            assert_eq!(*set.item, string_literal);
            assert_eq!(set.min_count, 2);
        }
        other => panic!("expected a set type, got {other:?}"),
    }
}

#[test]
fn test_property_order_sorts_ordered_before_unordered() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.org/> .

        ex:RecordShape a sh:NodeShape ;
            sh:property [ sh:path ex:second ; sh:order 2 ] ;
            sh:property [ sh:path ex:first ; sh:order 1 ] ;
            sh:property [ sh:path ex:last ] .
    "#,
    );

    let record = ast
        .object_type(&shape_id("http://example.org/RecordShape"))
        .expect("RecordShape compiled");
    let names: Vec<&str> = record
        .properties
        .iter()
        .map(|property| property.name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second", "last"]);
}

#[test]
fn test_unordered_properties_sort_by_predicate_iri() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.org/> .

        ex:UnorderedShape a sh:NodeShape ;
            sh:property [ sh:path ex:delta ] ;
            sh:property [ sh:path ex:alpha ] ;
            sh:property [ sh:path ex:charlie ] ;
            sh:property [ sh:path ex:bravo ] .
    "#,
    );

    let unordered = ast
        .object_type(&shape_id("http://example.org/UnorderedShape"))
        .expect("UnorderedShape compiled");
    let names: Vec<&str> = unordered
        .properties
        .iter()
        .map(|property| property.name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn test_abstract_class_has_no_rdf_type_mapping() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        ex:ResourceShape a sh:NodeShape, rdfs:Class ;
            shast:abstract true ;
            shast:name "Resource" .
    "#,
    );

    let resource = ast
        .object_type(&shape_id("http://example.org/ResourceShape"))
        .expect("ResourceShape compiled");
    assert!(resource.abstract_);
    assert_eq!(resource.name, "Resource");
    assert_eq!(resource.from_rdf_type, None);
    assert!(resource.to_rdf_types.is_empty());
}

#[test]
fn test_ontology_feature_exclusion_applies_to_its_shapes() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        <http://example.org/> a owl:Ontology ;
            shast:exclude shast:_Feature_Sparql .

        ex:ConfiguredShape a sh:NodeShape, rdfs:Class .
    "#,
    );

    let configured = ast
        .object_type(&shape_id("http://example.org/ConfiguredShape"))
        .expect("ConfiguredShape compiled");
    assert_eq!(
        configured.features,
        Features::ALL.difference(Features::SPARQL)
    );
    assert!(configured.features.contains(Features::TO_RDF));
    assert!(!configured.features.contains(Features::SPARQL));
}

// =============================================================================
// Node kind resolution
// =============================================================================

#[test]
fn test_node_kind_narrows_within_parent() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:BaseShape a sh:NodeShape, rdfs:Class ;
            sh:nodeKind sh:BlankNodeOrIRI .

        ex:DerivedShape a sh:NodeShape, rdfs:Class ;
            rdfs:subClassOf ex:BaseShape ;
            sh:nodeKind sh:IRI .
    "#,
    );

    assert!(diagnostics.is_empty());
    let base = ast
        .object_type(&shape_id("http://example.org/BaseShape"))
        .expect("BaseShape compiled");
    let derived = ast
        .object_type(&shape_id("http://example.org/DerivedShape"))
        .expect("DerivedShape compiled");
    assert_eq!(base.identifier_node_kinds, NodeKindSet::IDENTIFIER);
    assert_eq!(derived.identifier_node_kinds.to_string(), "sh:IRI");
}

#[test]
fn test_node_kind_outside_parent_skips_shape() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:BaseShape a sh:NodeShape, rdfs:Class ;
            sh:nodeKind sh:IRI .

        ex:BadShape a sh:NodeShape, rdfs:Class ;
            rdfs:subClassOf ex:BaseShape ;
            sh:nodeKind sh:BlankNode .
    "#,
    );

    assert!(ast.object_type(&shape_id("http://example.org/BaseShape")).is_some());
    assert!(ast.object_type(&shape_id("http://example.org/BadShape")).is_none());
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning.message.contains("not in parent's node kinds"));
}

#[test]
fn test_node_kind_conflicting_with_datatype_skips_shape() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:BrokenShape a sh:NodeShape, rdfs:Class ;
            sh:property [
                sh:path ex:value ;
                sh:nodeKind sh:IRI ;
                sh:datatype xsd:string ;
            ] .
    "#,
    );

    assert!(ast.object_type(&shape_id("http://example.org/BrokenShape")).is_none());
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning.message.contains("conflicts with sh:nodeKind"));
}

// =============================================================================
// Compound compositions
// =============================================================================

#[test]
fn test_disjoint_class_union_compiles_to_object_union() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:CatShape a sh:NodeShape, rdfs:Class .
        ex:DogShape a sh:NodeShape, rdfs:Class .

        ex:PetShape a sh:NodeShape ;
            sh:or ( ex:CatShape ex:DogShape ) .
    "#,
    );

    assert!(diagnostics.is_empty());
    let pet = ast
        .object_union_type(&shape_id("http://example.org/PetShape"))
        .expect("PetShape compiled to a union");
    assert_eq!(pet.name, "PetShape");
    assert_eq!(
        pet.members,
        vec![
            shape_id("http://example.org/CatShape"),
            shape_id("http://example.org/DogShape"),
        ]
    );
    // Members keep their discriminating RDF type.
    for member in &pet.members {
        let member_type = ast.object_type(member).expect("member compiled");
        assert!(member_type.from_rdf_type.is_some());
    }
}

#[test]
fn test_extern_members_are_kept_but_exempt_from_discrimination() {
    // The extern member reuses the local member's RDF type; only non-extern
    // members take part in the discrimination check, so this is not ambiguous.
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        ex:RemoteShape a sh:NodeShape, rdfs:Class ;
            shast:extern true ;
            shast:fromRdfType ex:Thing .
        ex:LocalShape a sh:NodeShape, rdfs:Class ;
            shast:fromRdfType ex:Thing .

        ex:EitherShape a sh:NodeShape ;
            sh:or ( ex:RemoteShape ex:LocalShape ) .
    "#,
    );

    assert!(diagnostics.is_empty());
    let either = ast
        .object_union_type(&shape_id("http://example.org/EitherShape"))
        .expect("EitherShape compiled to a union");
    assert_eq!(
        either.members,
        vec![
            shape_id("http://example.org/RemoteShape"),
            shape_id("http://example.org/LocalShape"),
        ]
    );
}

#[test]
fn test_union_nesting_an_all_extern_union_flattens_cleanly() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        ex:RemoteAShape a sh:NodeShape, rdfs:Class ;
            shast:extern true .
        ex:RemoteBShape a sh:NodeShape, rdfs:Class ;
            shast:extern true .
        ex:AllExternShape a sh:NodeShape ;
            sh:or ( ex:RemoteAShape ex:RemoteBShape ) .

        ex:LocalShape a sh:NodeShape, rdfs:Class .
        ex:OuterShape a sh:NodeShape ;
            sh:or ( ex:AllExternShape ex:LocalShape ) .
    "#,
    );

    assert!(diagnostics.is_empty());
    let inner = ast
        .object_union_type(&shape_id("http://example.org/AllExternShape"))
        .expect("AllExternShape compiled to a union");
    assert_eq!(inner.members.len(), 2);
    let outer = ast
        .object_union_type(&shape_id("http://example.org/OuterShape"))
        .expect("OuterShape compiled to a union");
    assert_eq!(
        outer.members,
        vec![
            shape_id("http://example.org/RemoteAShape"),
            shape_id("http://example.org/RemoteBShape"),
            shape_id("http://example.org/LocalShape"),
        ]
    );
}

#[test]
fn test_union_with_mismatched_feature_sets_is_rejected() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        ex:QuietShape a sh:NodeShape, rdfs:Class ;
            shast:exclude shast:_Feature_Sparql .
        ex:LoudShape a sh:NodeShape, rdfs:Class .

        ex:MismatchShape a sh:NodeShape ;
            sh:or ( ex:QuietShape ex:LoudShape ) .
    "#,
    );

    assert!(
        ast.object_union_type(&shape_id("http://example.org/MismatchShape"))
            .is_none()
    );
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning.message.contains("mismatched feature set"));
}

#[test]
fn test_union_with_nested_intersection_member_is_rejected() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:FirstShape a sh:NodeShape, rdfs:Class .
        ex:SecondShape a sh:NodeShape, rdfs:Class .

        ex:BothShape a sh:NodeShape ;
            sh:and ( ex:FirstShape ex:SecondShape ) .

        ex:ChoiceShape a sh:NodeShape ;
            sh:or ( ex:BothShape ex:FirstShape ) .
    "#,
    );

    assert!(
        ast.object_intersection_type(&shape_id("http://example.org/BothShape"))
            .is_some()
    );
    assert!(
        ast.object_union_type(&shape_id("http://example.org/ChoiceShape"))
            .is_none()
    );
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning
        .message
        .contains("composite with a nested intersection member"));
}

#[test]
fn test_mixed_union_and_intersection_constraints_are_rejected() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:TargetShape a sh:NodeShape, rdfs:Class .

        ex:ConflictedShape a sh:NodeShape ;
            sh:or ( ex:TargetShape ) ;
            sh:class ex:TargetShape .
    "#,
    );

    assert!(ast.object_type(&shape_id("http://example.org/TargetShape")).is_some());
    assert!(
        ast.object_union_type(&shape_id("http://example.org/ConflictedShape"))
            .is_none()
    );
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning.message.contains("incompatible compound type composition"));
}

#[test]
fn test_union_with_duplicate_rdf_types_is_ambiguous() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix shast: <http://purl.org/shast/ontology#> .
        @prefix ex: <http://example.org/> .

        ex:FirstShape a sh:NodeShape, rdfs:Class ;
            shast:fromRdfType ex:Thing .
        ex:SecondShape a sh:NodeShape, rdfs:Class ;
            shast:fromRdfType ex:Thing .

        ex:AmbiguousShape a sh:NodeShape ;
            sh:or ( ex:FirstShape ex:SecondShape ) .
    "#,
    );

    assert!(
        ast.object_union_type(&shape_id("http://example.org/AmbiguousShape"))
            .is_none()
    );
    assert_eq!(diagnostics.count(Severity::Warning), 1);
    let warning = diagnostics.iter().next().expect("one diagnostic");
    assert!(warning.message.contains("ambiguous discrimination"));
}

#[test]
fn test_union_with_partial_rdf_types_is_ambiguous() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:TypedShape a sh:NodeShape, rdfs:Class .
        ex:UntypedShape a sh:NodeShape ;
            sh:property [ sh:path ex:value ] .

        ex:MixedShape a sh:NodeShape ;
            sh:or ( ex:TypedShape ex:UntypedShape ) .
    "#,
    );

    assert!(
        ast.object_union_type(&shape_id("http://example.org/MixedShape"))
            .is_none()
    );
    assert_eq!(diagnostics.count(Severity::Warning), 1);
}

#[test]
fn test_unresolvable_class_recovers_with_info_diagnostic() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
        @prefix ex: <http://example.org/> .

        ex:SubjectShape a sh:NodeShape ;
            sh:property [
                sh:path ex:about ;
                sh:class skos:Concept ;
            ] .
    "#,
    );

    // The composition is abandoned but the property still compiles.
    let subject = ast
        .object_type(&shape_id("http://example.org/SubjectShape"))
        .expect("SubjectShape compiled");
    match &property_named(subject, "about").ty {
        Type::Set(set) => match set.item.as_ref() {
            Type::Term(term) => assert_eq!(term.node_kinds, NodeKindSet::ALL),
            other => panic!("expected a term type, got {other:?}"),
        },
        other => panic!("expected a set type, got {other:?}"),
    }
    assert_eq!(diagnostics.count(Severity::Info), 1);
    assert_eq!(diagnostics.count(Severity::Warning), 0);
    let info = diagnostics.iter().next().expect("one diagnostic");
    assert!(info.message.contains("abandoning composition"));
}

// =============================================================================
// Property-level union collapses
// =============================================================================

#[test]
fn test_literal_union_collapses_to_single_literal_type() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:MeasurementShape a sh:NodeShape ;
            sh:property ex:ValueProperty .

        ex:ValueProperty sh:path ex:value ;
            sh:minCount 1 ;
            sh:maxCount 1 ;
            sh:or ( [ sh:datatype xsd:string ] [ sh:datatype xsd:integer ] ) .
    "#,
    );

    assert!(diagnostics.is_empty());
    let measurement = ast
        .object_type(&shape_id("http://example.org/MeasurementShape"))
        .expect("MeasurementShape compiled");
    // Mixed datatypes collapse to an unconstrained literal.
    assert_eq!(
        property_named(measurement, "value").ty,
        Type::Literal(LiteralType::default())
    );
}

#[test]
fn test_literal_union_keeps_unanimous_datatype() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:LabelShape a sh:NodeShape ;
            sh:property [
                sh:path ex:label ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
                sh:or ( [ sh:datatype xsd:string ] [ sh:datatype xsd:string ] ) ;
            ] .
    "#,
    );

    let label = ast
        .object_type(&shape_id("http://example.org/LabelShape"))
        .expect("LabelShape compiled");
    assert_eq!(
        property_named(label, "label").ty,
        Type::Literal(LiteralType {
            datatype: Some(named("http://www.w3.org/2001/XMLSchema#string")),
            ..LiteralType::default()
        })
    );
}

#[test]
fn test_identifier_union_collapses_to_merged_node_kinds() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.org/> .

        ex:LinkShape a sh:NodeShape ;
            sh:property [
                sh:path ex:target ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
                sh:or ( [ sh:nodeKind sh:IRI ] [ sh:nodeKind sh:BlankNode ] ) ;
            ] .
    "#,
    );

    let link = ast
        .object_type(&shape_id("http://example.org/LinkShape"))
        .expect("LinkShape compiled");
    assert_eq!(
        property_named(link, "target").ty,
        Type::Identifier(IdentifierType {
            node_kinds: NodeKindSet::IDENTIFIER,
            ..IdentifierType::default()
        })
    );
}

#[test]
fn test_has_value_suppresses_union_collapse() {
    let (ast, _) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.org/> .

        ex:PinnedShape a sh:NodeShape ;
            sh:property [
                sh:path ex:target ;
                sh:hasValue ex:fixed ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
                sh:or ( [ sh:nodeKind sh:IRI ] [ sh:nodeKind sh:BlankNode ] ) ;
            ] .
    "#,
    );

    let pinned = ast
        .object_type(&shape_id("http://example.org/PinnedShape"))
        .expect("PinnedShape compiled");
    match &property_named(pinned, "target").ty {
        Type::Union(inner) => {
            assert_eq!(inner.members.len(), 2);
            assert!(inner
                .members
                .iter()
                .all(|member| matches!(member, Type::Identifier(_))));
        }
        other => panic!("expected a union type, got {other:?}"),
    }
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn test_list_shape_compiles_to_list_type() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .

        ex:StringListShape a sh:NodeShape ;
            rdfs:subClassOf rdf:List ;
            sh:property [
                sh:path rdf:first ;
                sh:datatype xsd:string ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
            ] ;
            sh:property [
                sh:path rdf:rest ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
            ] .

        ex:HolderShape a sh:NodeShape ;
            sh:property [
                sh:path ex:items ;
                sh:node ex:StringListShape ;
                sh:minCount 1 ;
                sh:maxCount 1 ;
            ] .
    "#,
    );

    assert!(diagnostics.is_empty());
    // The list shape itself yields no object type.
    assert!(
        ast.object_type(&shape_id("http://example.org/StringListShape"))
            .is_none()
    );
    let holder = ast
        .object_type(&shape_id("http://example.org/HolderShape"))
        .expect("HolderShape compiled");
    match &property_named(holder, "items").ty {
        Type::List(list) => {
            assert_eq!(
                *list.item,
                Type::Literal(LiteralType {
                    datatype: Some(named("http://www.w3.org/2001/XMLSchema#string")),
                    ..LiteralType::default()
                })
            );
            assert_eq!(list.identifier_node_kinds, NodeKindSet::IDENTIFIER);
            assert_eq!(list.minting_strategy, None);
        }
        other => panic!("expected a list type, got {other:?}"),
    }
}

// =============================================================================
// Recursion
// =============================================================================

#[test]
fn test_self_referencing_shape_gets_stub_and_recursive_flag() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:TreeShape a sh:NodeShape, rdfs:Class ;
            sh:property [
                sh:path ex:child ;
                sh:node ex:TreeShape ;
            ] .
    "#,
    );

    assert!(diagnostics.is_empty());
    // The cycle is broken with exactly one synthetic stub type.
    assert_eq!(ast.object_types().count(), 2);
    let stub = ast
        .object_types()
        .find(|object_type| object_type.synthetic)
        .expect("a stub was minted");
    assert_eq!(stub.name, "TreeShapeStub");
    assert!(stub.properties.is_empty());

    let tree = ast
        .object_type(&shape_id("http://example.org/TreeShape"))
        .expect("TreeShape compiled");
    let child = property_named(tree, "child");
    assert!(child.recursive);
    match &child.ty {
        Type::Set(set) => match set.item.as_ref() {
            Type::Object(reference) => {
                assert_eq!(reference.id, shape_id("http://example.org/TreeShape"));
                assert_eq!(reference.stub.as_ref(), Some(&stub.id));
            }
            other => panic!("expected an object reference, got {other:?}"),
        },
        other => panic!("expected a set type, got {other:?}"),
    }
}

#[test]
fn test_acyclic_reference_chain_is_not_recursive() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        ex:AShape a sh:NodeShape, rdfs:Class ;
            sh:property [ sh:path ex:b ; sh:node ex:BShape ; sh:minCount 1 ; sh:maxCount 1 ] .
        ex:BShape a sh:NodeShape, rdfs:Class ;
            sh:property [ sh:path ex:c ; sh:node ex:CShape ; sh:minCount 1 ; sh:maxCount 1 ] .
        ex:CShape a sh:NodeShape, rdfs:Class .
    "#,
    );

    assert!(diagnostics.is_empty());
    assert_eq!(ast.object_types().count(), 3);
    assert!(ast.object_types().all(|object_type| !object_type.synthetic));
    let a = ast
        .object_type(&shape_id("http://example.org/AShape"))
        .expect("AShape compiled");
    assert!(!property_named(a, "b").recursive);
}

// =============================================================================
// Shape filtering
// =============================================================================

#[test]
fn test_reserved_and_blank_shapes_are_skipped_silently() {
    let (ast, diagnostics) = compile(
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ex: <http://example.org/> .

        sh:ReservedShape a sh:NodeShape, rdfs:Class .

        [] a sh:NodeShape ;
            sh:property [ sh:path ex:value ] .
    "#,
    );

    assert_eq!(ast.object_types().count(), 0);
    assert!(diagnostics.is_empty());
}
