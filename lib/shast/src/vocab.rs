//! Provides ready to use [`NamedNodeRef`](oxrdf::NamedNodeRef)s for the vocabularies
//! the shape compiler consumes beyond the ones `oxrdf` ships.

pub mod shacl {
    //! [SHACL](https://www.w3.org/TR/shacl/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The SHACL namespace: `http://www.w3.org/ns/shacl#`
    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#";

    /// The class of node shapes.
    pub const NODE_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#NodeShape");
    /// The class of property shapes.
    pub const PROPERTY_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#PropertyShape");

    /// Links a shape to its declared property shapes.
    pub const PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#property");
    /// The property path of a property shape.
    pub const PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path");
    /// Alternative path operator.
    pub const ALTERNATIVE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#alternativePath");
    /// Inverse path operator.
    pub const INVERSE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#inversePath");
    /// Zero-or-more path operator.
    pub const ZERO_OR_MORE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#zeroOrMorePath");
    /// One-or-more path operator.
    pub const ONE_OR_MORE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#oneOrMorePath");
    /// Zero-or-one path operator.
    pub const ZERO_OR_ONE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#zeroOrOnePath");

    /// Conjunction of shapes.
    pub const AND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#and");
    /// Disjunction of shapes.
    pub const OR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#or");
    /// Exclusive disjunction of shapes.
    pub const XONE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#xone");
    /// References a node shape values must conform to.
    pub const NODE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#node");
    /// The class values must be instances of.
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#class");
    /// The datatype of literal values.
    pub const DATATYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#datatype");
    /// The RDF node kind of values.
    pub const NODE_KIND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#nodeKind");
    /// A fixed value the property must take.
    pub const HAS_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#hasValue");
    /// An enumeration of the allowed values.
    pub const IN: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#in");
    /// The allowed language tags of literal values.
    pub const LANGUAGE_IN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#languageIn");
    /// The minimum cardinality of a property.
    pub const MIN_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minCount");
    /// The maximum cardinality of a property.
    pub const MAX_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxCount");
    /// Exclusive lower bound on literal values.
    pub const MIN_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minExclusive");
    /// Inclusive lower bound on literal values.
    pub const MIN_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minInclusive");
    /// Exclusive upper bound on literal values.
    pub const MAX_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxExclusive");
    /// Inclusive upper bound on literal values.
    pub const MAX_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxInclusive");
    /// The value to assume when the property is absent.
    pub const DEFAULT_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#defaultValue");
    /// Marks a node shape as closed.
    pub const CLOSED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#closed");

    /// Human-readable name of a property shape.
    pub const NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#name");
    /// Human-readable description of a property shape.
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#description");
    /// Relative order of a property shape.
    pub const ORDER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#order");
    /// The property group a property shape belongs to.
    pub const GROUP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#group");

    /// The IRI node kind.
    pub const IRI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#IRI");
    /// The literal node kind.
    pub const LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#Literal");
    /// The blank node node kind.
    pub const BLANK_NODE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#BlankNode");
    /// The compound blank node or IRI node kind.
    pub const BLANK_NODE_OR_IRI: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#BlankNodeOrIRI");
    /// The compound blank node or literal node kind.
    pub const BLANK_NODE_OR_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#BlankNodeOrLiteral");
    /// The compound IRI or literal node kind.
    pub const IRI_OR_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#IRIOrLiteral");
}

pub mod owl {
    //! The subset of the [OWL 2](https://www.w3.org/TR/owl2-syntax/) vocabulary the compiler reads.
    use oxrdf::NamedNodeRef;

    /// The OWL namespace: `http://www.w3.org/2002/07/owl#`
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    /// The class of all classes.
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
    /// The class containing every individual.
    pub const THING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    /// The class of ontologies.
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
}

pub mod dash {
    //! [DASH](https://datashapes.org/dash) data shapes vocabulary.
    //!
    //! Only the namespace is needed: DASH terms are reserved and never compiled into types.

    /// The DASH namespace: `http://datashapes.org/dash#`
    pub const NAMESPACE: &str = "http://datashapes.org/dash#";
}

pub mod shast {
    //! The generator annotation vocabulary read from shapes graphs to steer compilation.
    use oxrdf::NamedNodeRef;

    /// The annotation namespace: `http://purl.org/shast/ontology#`
    pub const NAMESPACE: &str = "http://purl.org/shast/ontology#";

    /// Overrides the derived type or property name.
    pub const NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#name");
    /// Marks an object type as abstract.
    pub const ABSTRACT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#abstract");
    /// Marks an object type as externally defined.
    pub const EXTERN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#extern");
    /// The identifier minting strategy of an object type.
    pub const MINTING_STRATEGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#mintingStrategy");
    /// Overrides the RDF type instances are expected to carry.
    pub const FROM_RDF_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#fromRdfType");
    /// An extra RDF type serializers must emit.
    pub const TO_RDF_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#toRdfType");
    /// A generated feature to include.
    pub const INCLUDE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#include");
    /// A generated feature to exclude.
    pub const EXCLUDE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#exclude");

    /// Mint identifiers as blank nodes.
    pub const MINTING_STRATEGY_BLANK_NODE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_MintingStrategy_BlankNode");
    /// Mint identifiers by hashing the object's contents.
    pub const MINTING_STRATEGY_SHA256: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_MintingStrategy_SHA256");
    /// Mint identifiers as random UUIDs.
    pub const MINTING_STRATEGY_UUIDV4: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_MintingStrategy_UUIDv4");

    /// The generated equality feature.
    pub const FEATURE_EQUALS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_Feature_Equals");
    /// The generated RDF deserialization feature.
    pub const FEATURE_FROM_RDF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_Feature_FromRdf");
    /// The generated hashing feature.
    pub const FEATURE_HASH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_Feature_Hash");
    /// The generated RDF serialization feature.
    pub const FEATURE_TO_RDF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_Feature_ToRdf");
    /// The generated SPARQL query building feature.
    pub const FEATURE_SPARQL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/shast/ontology#_Feature_Sparql");
}
