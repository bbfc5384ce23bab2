//! Constant IRIs for the RDF, RDFS, OWL 2 and XSD terms used by the mapping.

use oxigraph::model::NamedNodeRef;

macro_rules! terms {
    ($ns:literal; $($name:ident = $local:literal),* $(,)?) => {
        $(
            pub const $name: NamedNodeRef<'static> =
                NamedNodeRef::new_unchecked(concat!($ns, $local));
        )*
    };
}

pub mod rdf {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    terms! { "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
        TYPE = "type",
        FIRST = "first",
        REST = "rest",
        NIL = "nil",
        LIST = "List",
        PLAIN_LITERAL = "PlainLiteral",
        XML_LITERAL = "XMLLiteral",
        LANG_STRING = "langString",
        PROPERTY = "Property",
    }
}

pub mod rdfs {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    terms! { "http://www.w3.org/2000/01/rdf-schema#";
        SUB_CLASS_OF = "subClassOf",
        SUB_PROPERTY_OF = "subPropertyOf",
        DOMAIN = "domain",
        RANGE = "range",
        LABEL = "label",
        COMMENT = "comment",
        SEE_ALSO = "seeAlso",
        IS_DEFINED_BY = "isDefinedBy",
        DATATYPE = "Datatype",
        LITERAL = "Literal",
        CLASS = "Class",
        RESOURCE = "Resource",
    }
}

pub mod owl {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    terms! { "http://www.w3.org/2002/07/owl#";
        // declaration types
        CLASS = "Class",
        OBJECT_PROPERTY = "ObjectProperty",
        DATATYPE_PROPERTY = "DatatypeProperty",
        ANNOTATION_PROPERTY = "AnnotationProperty",
        NAMED_INDIVIDUAL = "NamedIndividual",
        ONTOLOGY = "Ontology",
        VERSION_IRI = "versionIRI",
        IMPORTS = "imports",
        // builtin entities
        THING = "Thing",
        NOTHING = "Nothing",
        TOP_OBJECT_PROPERTY = "topObjectProperty",
        BOTTOM_OBJECT_PROPERTY = "bottomObjectProperty",
        TOP_DATA_PROPERTY = "topDataProperty",
        BOTTOM_DATA_PROPERTY = "bottomDataProperty",
        REAL = "real",
        RATIONAL = "rational",
        DEPRECATED = "deprecated",
        VERSION_INFO = "versionInfo",
        PRIOR_VERSION = "priorVersion",
        BACKWARD_COMPATIBLE_WITH = "backwardCompatibleWith",
        INCOMPATIBLE_WITH = "incompatibleWith",
        // property characteristics
        FUNCTIONAL_PROPERTY = "FunctionalProperty",
        INVERSE_FUNCTIONAL_PROPERTY = "InverseFunctionalProperty",
        REFLEXIVE_PROPERTY = "ReflexiveProperty",
        IRREFLEXIVE_PROPERTY = "IrreflexiveProperty",
        SYMMETRIC_PROPERTY = "SymmetricProperty",
        ASYMMETRIC_PROPERTY = "AsymmetricProperty",
        TRANSITIVE_PROPERTY = "TransitiveProperty",
        // axiom predicates
        EQUIVALENT_CLASS = "equivalentClass",
        EQUIVALENT_PROPERTY = "equivalentProperty",
        DISJOINT_WITH = "disjointWith",
        DISJOINT_UNION_OF = "disjointUnionOf",
        PROPERTY_DISJOINT_WITH = "propertyDisjointWith",
        PROPERTY_CHAIN_AXIOM = "propertyChainAxiom",
        INVERSE_OF = "inverseOf",
        HAS_KEY = "hasKey",
        SAME_AS = "sameAs",
        DIFFERENT_FROM = "differentFrom",
        ALL_DISJOINT_CLASSES = "AllDisjointClasses",
        ALL_DISJOINT_PROPERTIES = "AllDisjointProperties",
        ALL_DIFFERENT = "AllDifferent",
        MEMBERS = "members",
        DISTINCT_MEMBERS = "distinctMembers",
        NEGATIVE_PROPERTY_ASSERTION = "NegativePropertyAssertion",
        SOURCE_INDIVIDUAL = "sourceIndividual",
        ASSERTION_PROPERTY = "assertionProperty",
        TARGET_INDIVIDUAL = "targetIndividual",
        TARGET_VALUE = "targetValue",
        // reification of annotated axioms
        AXIOM = "Axiom",
        ANNOTATION = "Annotation",
        ANNOTATED_SOURCE = "annotatedSource",
        ANNOTATED_PROPERTY = "annotatedProperty",
        ANNOTATED_TARGET = "annotatedTarget",
        // class expressions
        RESTRICTION = "Restriction",
        ON_PROPERTY = "onProperty",
        ON_PROPERTIES = "onProperties",
        ON_CLASS = "onClass",
        ON_DATA_RANGE = "onDataRange",
        ON_DATATYPE = "onDatatype",
        WITH_RESTRICTIONS = "withRestrictions",
        SOME_VALUES_FROM = "someValuesFrom",
        ALL_VALUES_FROM = "allValuesFrom",
        HAS_VALUE = "hasValue",
        HAS_SELF = "hasSelf",
        MIN_CARDINALITY = "minCardinality",
        MAX_CARDINALITY = "maxCardinality",
        CARDINALITY = "cardinality",
        MIN_QUALIFIED_CARDINALITY = "minQualifiedCardinality",
        MAX_QUALIFIED_CARDINALITY = "maxQualifiedCardinality",
        QUALIFIED_CARDINALITY = "qualifiedCardinality",
        INTERSECTION_OF = "intersectionOf",
        UNION_OF = "unionOf",
        COMPLEMENT_OF = "complementOf",
        DATATYPE_COMPLEMENT_OF = "datatypeComplementOf",
        ONE_OF = "oneOf",
    }
}

pub mod xsd {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    terms! { "http://www.w3.org/2001/XMLSchema#";
        STRING = "string",
        BOOLEAN = "boolean",
        DECIMAL = "decimal",
        INTEGER = "integer",
        DOUBLE = "double",
        FLOAT = "float",
        LONG = "long",
        INT = "int",
        SHORT = "short",
        BYTE = "byte",
        NON_NEGATIVE_INTEGER = "nonNegativeInteger",
        NON_POSITIVE_INTEGER = "nonPositiveInteger",
        POSITIVE_INTEGER = "positiveInteger",
        NEGATIVE_INTEGER = "negativeInteger",
        UNSIGNED_LONG = "unsignedLong",
        UNSIGNED_INT = "unsignedInt",
        UNSIGNED_SHORT = "unsignedShort",
        UNSIGNED_BYTE = "unsignedByte",
        DATE_TIME = "dateTime",
        DATE_TIME_STAMP = "dateTimeStamp",
        NORMALIZED_STRING = "normalizedString",
        TOKEN = "token",
        LANGUAGE = "language",
        NAME = "Name",
        NCNAME = "NCName",
        NMTOKEN = "NMTOKEN",
        HEX_BINARY = "hexBinary",
        BASE64_BINARY = "base64Binary",
        ANY_URI = "anyURI",
        // facets
        LENGTH = "length",
        MIN_LENGTH = "minLength",
        MAX_LENGTH = "maxLength",
        PATTERN = "pattern",
        MIN_INCLUSIVE = "minInclusive",
        MIN_EXCLUSIVE = "minExclusive",
        MAX_INCLUSIVE = "maxInclusive",
        MAX_EXCLUSIVE = "maxExclusive",
        TOTAL_DIGITS = "totalDigits",
        FRACTION_DIGITS = "fractionDigits",
    }

    /// The constraining facets allowed inside `owl:withRestrictions`.
    pub const FACETS: [NamedNodeRef<'static>; 10] = [
        LENGTH,
        MIN_LENGTH,
        MAX_LENGTH,
        PATTERN,
        MIN_INCLUSIVE,
        MIN_EXCLUSIVE,
        MAX_INCLUSIVE,
        MAX_EXCLUSIVE,
        TOTAL_DIGITS,
        FRACTION_DIGITS,
    ];

    /// The OWL 2 datatype map restricted to the `xsd:` namespace.
    pub const DATATYPES: [NamedNodeRef<'static>; 29] = [
        STRING,
        BOOLEAN,
        DECIMAL,
        INTEGER,
        DOUBLE,
        FLOAT,
        LONG,
        INT,
        SHORT,
        BYTE,
        NON_NEGATIVE_INTEGER,
        NON_POSITIVE_INTEGER,
        POSITIVE_INTEGER,
        NEGATIVE_INTEGER,
        UNSIGNED_LONG,
        UNSIGNED_INT,
        UNSIGNED_SHORT,
        UNSIGNED_BYTE,
        DATE_TIME,
        DATE_TIME_STAMP,
        NORMALIZED_STRING,
        TOKEN,
        LANGUAGE,
        NAME,
        NCNAME,
        NMTOKEN,
        HEX_BINARY,
        BASE64_BINARY,
        ANY_URI,
    ];
}

/// The nine annotation properties OWL 2 predefines.
pub const BUILTIN_ANNOTATION_PROPERTIES: [NamedNodeRef<'static>; 9] = [
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::DEPRECATED,
    owl::VERSION_INFO,
    owl::PRIOR_VERSION,
    owl::BACKWARD_COMPATIBLE_WITH,
    owl::INCOMPATIBLE_WITH,
];

/// Predicates that only ever build anonymous structure: `rdf:` and `owl:`
/// terms other than the builtin annotation properties, plus the facets.
pub fn is_structural_predicate(predicate: NamedNodeRef<'_>) -> bool {
    if BUILTIN_ANNOTATION_PROPERTIES.iter().any(|ap| *ap == predicate) {
        return false;
    }
    let iri = predicate.as_str();
    iri.starts_with(rdf::NS)
        || iri.starts_with(owl::NS)
        || xsd::FACETS.iter().any(|f| *f == predicate)
}

/// Whether the IRI lives in one of the W3C namespaces owned by the mapping.
pub fn is_system_namespace(iri: &str) -> bool {
    iri.starts_with(rdf::NS) || iri.starts_with(rdfs::NS) || iri.starts_with(owl::NS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_expand_to_full_iris() {
        assert_eq!(
            rdf::TYPE.as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(
            owl::ALL_DISJOINT_CLASSES.as_str(),
            "http://www.w3.org/2002/07/owl#AllDisjointClasses"
        );
        assert_eq!(xsd::INTEGER.as_str(), "http://www.w3.org/2001/XMLSchema#integer");
    }

    #[test]
    fn structural_predicates_exclude_annotations() {
        assert!(is_structural_predicate(rdf::FIRST));
        assert!(is_structural_predicate(owl::ON_PROPERTY));
        assert!(is_structural_predicate(xsd::MIN_INCLUSIVE));
        assert!(!is_structural_predicate(owl::VERSION_INFO));
        assert!(!is_structural_predicate(rdfs::COMMENT));
    }

    #[test]
    fn system_namespace_detection() {
        assert!(is_system_namespace(owl::CLASS.as_str()));
        assert!(is_system_namespace(rdfs::LABEL.as_str()));
        assert!(!is_system_namespace(xsd::STRING.as_str()));
        assert!(!is_system_namespace("http://example.org/onto#A"));
    }
}
