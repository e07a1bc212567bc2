//! Constants for the few vocabularies the codecs themselves rely on.

pub mod rdf {
    //! [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.
    use crate::model::IriTerm;

    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const FIRST: IriTerm =
        IriTerm::prevalidated("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
    pub const LANG_STRING: IriTerm =
        IriTerm::prevalidated("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
    pub const NIL: IriTerm =
        IriTerm::prevalidated("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
    pub const REST: IriTerm =
        IriTerm::prevalidated("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
    pub const TYPE: IriTerm =
        IriTerm::prevalidated("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

pub mod xsd {
    //! [XML Schema datatypes](https://www.w3.org/TR/xmlschema11-2/) used by literals.
    use crate::model::IriTerm;

    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const BOOLEAN: IriTerm = IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#boolean");
    pub const DECIMAL: IriTerm = IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#decimal");
    pub const DOUBLE: IriTerm = IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#double");
    pub const INTEGER: IriTerm = IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#integer");
    pub const STRING: IriTerm = IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#string");
}
