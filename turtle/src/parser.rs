//! Parser for [Turtle](https://www.w3.org/TR/turtle/) documents.

use crate::lexer::{tokenize, Token, TokenKind};
use oxiri::Iri;
use rdfio_api::error::{ParserError, RdfError, TextPosition};
use rdfio_api::graph::Graph;
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::parser::GraphParser;
use rdfio_api::vocab::{rdf, xsd};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A [Turtle](https://www.w3.org/TR/turtle/) parser.
///
/// The prefixes of the [`NamespaceMappings`] are available in every document without declaration.
/// `@prefix` and `PREFIX` directives add to them or shadow them.
///
/// Count the number of people using the [`GraphParser`] API:
/// ```
/// use rdfio_api::model::{IriTerm, Term};
/// use rdfio_api::vocab::rdf;
/// use rdfio_turtle::TurtleParser;
///
/// let file = "@prefix schema: <http://schema.org/> .
/// <http://example.com/foo> a schema:Person ;
///     schema:name  \"Foo\" .
/// <http://example.com/bar> a schema:Person ;
///     schema:name  \"Bar\" .";
///
/// let schema_person = Term::from(IriTerm::new("http://schema.org/Person")?);
/// let graph = TurtleParser::default().parse(file, None)?;
/// assert_eq!(graph.find_triples(None, Some(&rdf::TYPE), Some(&schema_person)).len(), 2);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurtleParser {
    mappings: NamespaceMappings,
}

impl TurtleParser {
    pub fn new(mappings: NamespaceMappings) -> Self {
        Self { mappings }
    }

    /// Parses a complete document.
    ///
    /// Relative IRIs are resolved against the `@base` directives, or `document_url` before the first one.
    /// Without any of them, relative IRIs are kept as they are written.
    pub fn parse(&self, input: &str, document_url: Option<&str>) -> Result<Graph, RdfError> {
        let tokens = tokenize(input)?;
        let base_iri = document_url
            .map(|url| {
                Iri::parse(url.to_owned()).map_err(|error| {
                    ParserError::new(format!("invalid document URL '{}': {}", url, error), None)
                })
            })
            .transpose()?;
        let mut state = TurtleState {
            tokens: &tokens,
            index: 0,
            base_iri,
            prefixes: self
                .mappings
                .iter()
                .map(|(prefix, namespace)| (prefix.to_owned(), namespace.to_owned()))
                .collect(),
            bnodes: HashMap::new(),
            graph: Graph::new(),
        };
        state.parse_turtle_doc()?;
        debug!(
            triples = state.graph.len(),
            tokens = tokens.len(),
            "parsed Turtle document"
        );
        Ok(state.graph)
    }
}

impl GraphParser for TurtleParser {
    fn parse(&self, input: &str, document_url: Option<&str>) -> Result<Graph, RdfError> {
        TurtleParser::parse(self, input, document_url)
    }
}

struct TurtleState<'t> {
    tokens: &'t [Token],
    index: usize,
    base_iri: Option<Iri<String>>,
    prefixes: HashMap<String, String>,
    bnodes: HashMap<String, BlankNodeTerm>,
    graph: Graph,
}

impl<'t> TurtleState<'t> {
    fn current(&self) -> &'t Token {
        // The token list always ends with Eof and the index never moves past it
        let tokens: &'t [Token] = self.tokens;
        &tokens[self.index]
    }

    fn peek(&self) -> &'t TokenKind {
        let tokens: &'t [Token] = self.tokens;
        &tokens[(self.index + 1).min(tokens.len() - 1)].kind
    }

    fn consume(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn expect(&mut self, expected: &TokenKind) -> Result<(), ParserError> {
        if &self.current().kind == expected {
            self.consume();
            Ok(())
        } else {
            Err(self.unexpected_token_error(&expected.to_string()))
        }
    }

    fn unexpected_token_error(&self, expected: &str) -> ParserError {
        let token = self.current();
        ParserError::at(
            format!("expected {}, found {}", expected, token.kind),
            token.position,
        )
    }

    fn parse_turtle_doc(&mut self) -> Result<(), ParserError> {
        // [1] 	turtleDoc 	::= 	statement*
        while self.current().kind != TokenKind::Eof {
            self.parse_statement()?;
        }
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<(), ParserError> {
        // [2] 	statement 	::= 	directive | triples '.'
        // [3] 	directive 	::= 	prefixID | base | sparqlPrefix | sparqlBase
        match self.current().kind {
            TokenKind::PrefixDirective => {
                // [4] 	prefixID 	::= 	'@prefix' PNAME_NS IRIREF '.'
                self.consume();
                self.parse_prefix_declaration()?;
                self.expect_statement_end()
            }
            TokenKind::BaseDirective => {
                // [5] 	base 	::= 	'@base' IRIREF '.'
                self.consume();
                self.parse_base_declaration()?;
                self.expect_statement_end()
            }
            TokenKind::SparqlPrefix => {
                // [6s] 	sparqlPrefix 	::= 	"PREFIX" PNAME_NS IRIREF
                self.consume();
                self.parse_prefix_declaration()
            }
            TokenKind::SparqlBase => {
                // [5s] 	sparqlBase 	::= 	"BASE" IRIREF
                self.consume();
                self.parse_base_declaration()
            }
            _ => {
                self.parse_triples()?;
                self.expect_statement_end()
            }
        }
    }

    fn expect_statement_end(&mut self) -> Result<(), ParserError> {
        let token = self.current();
        match token.kind {
            TokenKind::Dot => {
                self.consume();
                Ok(())
            }
            TokenKind::Eof => Err(ParserError::at(
                "missing '.' at the end of the statement",
                token.position,
            )),
            _ => Err(self.unexpected_token_error("'.'")),
        }
    }

    fn parse_prefix_declaration(&mut self) -> Result<(), ParserError> {
        let token = self.current();
        let prefix = match &token.kind {
            TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix.clone(),
            _ => return Err(self.unexpected_token_error("a prefix declaration like 'ex:'")),
        };
        self.consume();
        let token = self.current();
        let namespace = match &token.kind {
            TokenKind::IriRef(iri) => self.resolve_iri(iri, token.position)?,
            _ => return Err(self.unexpected_token_error("an IRI")),
        };
        self.consume();
        trace!(
            prefix = prefix.as_str(),
            namespace = namespace.as_str(),
            "prefix declared"
        );
        self.prefixes.insert(prefix, namespace.into_string());
        Ok(())
    }

    fn parse_base_declaration(&mut self) -> Result<(), ParserError> {
        let token = self.current();
        let iri = match &token.kind {
            TokenKind::IriRef(iri) => iri,
            _ => return Err(self.unexpected_token_error("an IRI")),
        };
        let base_iri = if let Some(base_iri) = &self.base_iri {
            base_iri.resolve(iri)
        } else {
            Iri::parse(iri.clone())
        }
        .map_err(|error| {
            ParserError::at(
                format!("invalid base IRI '{}': {}", iri, error),
                token.position,
            )
        })?;
        trace!(base_iri = base_iri.as_str(), "base IRI set");
        self.base_iri = Some(base_iri);
        self.consume();
        Ok(())
    }

    fn parse_triples(&mut self) -> Result<(), ParserError> {
        // [6] 	triples 	::= 	subject predicateObjectList | blankNodePropertyList predicateObjectList?
        if self.current().kind == TokenKind::OpenBracket && *self.peek() != TokenKind::CloseBracket {
            let subject = self.parse_blank_node_property_list()?;
            if self.current().kind != TokenKind::Dot {
                self.parse_predicate_object_list(&subject.into())?;
            }
            Ok(())
        } else {
            let subject = self.parse_subject()?;
            self.parse_predicate_object_list(&subject)
        }
    }

    fn parse_predicate_object_list(&mut self, subject: &Subject) -> Result<(), ParserError> {
        // [7] 	predicateObjectList 	::= 	verb objectList (';' (verb objectList)?)*
        loop {
            let predicate = self.parse_verb()?;
            self.parse_object_list(subject, &predicate)?;

            if self.current().kind != TokenKind::Semicolon {
                return Ok(());
            }
            while self.current().kind == TokenKind::Semicolon {
                self.consume();
            }
            if matches!(
                self.current().kind,
                TokenKind::Dot | TokenKind::CloseBracket | TokenKind::Eof
            ) {
                return Ok(());
            }
        }
    }

    fn parse_object_list(
        &mut self,
        subject: &Subject,
        predicate: &IriTerm,
    ) -> Result<(), ParserError> {
        // [8] 	objectList 	::= 	object (',' object)*
        loop {
            self.parse_object(subject, predicate)?;
            if self.current().kind != TokenKind::Comma {
                return Ok(());
            }
            self.consume();
        }
    }

    fn parse_verb(&mut self) -> Result<IriTerm, ParserError> {
        // [9] 	verb 	::= 	predicate | 'a'
        // [11] 	predicate 	::= 	iri
        let token = self.current();
        match &token.kind {
            TokenKind::A => {
                self.consume();
                Ok(rdf::TYPE)
            }
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => self.parse_iri(),
            TokenKind::BlankNodeLabel(_) | TokenKind::OpenBracket => Err(ParserError::at(
                "a blank node cannot be used as a predicate",
                token.position,
            )),
            kind if is_literal_start(kind) => Err(ParserError::at(
                "a literal cannot be used as a predicate",
                token.position,
            )),
            _ => Err(self.unexpected_token_error("a predicate")),
        }
    }

    fn parse_subject(&mut self) -> Result<Subject, ParserError> {
        // [10] 	subject 	::= 	iri | BlankNode | collection
        let token = self.current();
        match &token.kind {
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => Ok(self.parse_iri()?.into()),
            TokenKind::BlankNodeLabel(_) | TokenKind::OpenBracket => {
                Ok(self.parse_blank_node()?.into())
            }
            TokenKind::OpenParen => self.parse_collection(),
            kind if is_literal_start(kind) => Err(ParserError::at(
                "a literal cannot be used as a subject",
                token.position,
            )),
            _ => Err(self.unexpected_token_error("a subject")),
        }
    }

    fn parse_object(&mut self, subject: &Subject, predicate: &IriTerm) -> Result<(), ParserError> {
        // [12] 	object 	::= 	iri | BlankNode | collection | blankNodePropertyList | literal
        let token = self.current();
        match &token.kind {
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => {
                let object = self.parse_iri()?;
                self.emit_triple(subject, predicate, object.into());
            }
            TokenKind::OpenBracket if *self.peek() != TokenKind::CloseBracket => {
                let object = BlankNodeTerm::new();
                self.emit_triple(subject, predicate, object.into());
                self.parse_blank_node_property_list_content(object)?;
            }
            TokenKind::BlankNodeLabel(_) | TokenKind::OpenBracket => {
                let object = self.parse_blank_node()?;
                self.emit_triple(subject, predicate, object.into());
            }
            TokenKind::OpenParen => {
                let object = self.parse_collection()?;
                self.emit_triple(subject, predicate, object.into());
            }
            kind if is_literal_start(kind) => {
                let object = self.parse_literal()?;
                self.emit_triple(subject, predicate, object.into());
            }
            TokenKind::Eof => {
                return Err(ParserError::at(
                    "premature end of file, an object is missing",
                    token.position,
                ))
            }
            _ => return Err(self.unexpected_token_error("an object")),
        }
        Ok(())
    }

    fn emit_triple(&mut self, subject: &Subject, predicate: &IriTerm, object: Term) {
        self.graph.insert(Triple {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object,
        });
    }

    fn parse_blank_node_property_list(&mut self) -> Result<BlankNodeTerm, ParserError> {
        let node = BlankNodeTerm::new();
        self.parse_blank_node_property_list_content(node)?;
        Ok(node)
    }

    fn parse_blank_node_property_list_content(
        &mut self,
        node: BlankNodeTerm,
    ) -> Result<(), ParserError> {
        // [14] 	blankNodePropertyList 	::= 	'[' predicateObjectList ']'
        let open = self.current().position;
        self.expect(&TokenKind::OpenBracket)?;
        self.parse_predicate_object_list(&node.into())?;
        match self.current().kind {
            TokenKind::CloseBracket => {
                self.consume();
                Ok(())
            }
            TokenKind::Eof => Err(ParserError::at(
                "unbalanced '[': end of file reached before the matching ']'",
                open,
            )),
            _ => Err(self.unexpected_token_error("']'")),
        }
    }

    fn parse_collection(&mut self) -> Result<Subject, ParserError> {
        // [15] 	collection 	::= 	'(' object* ')'
        let open = self.current().position;
        self.expect(&TokenKind::OpenParen)?;
        let mut cells: Vec<BlankNodeTerm> = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::CloseParen => {
                    self.consume();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParserError::at(
                        "unbalanced '(': end of file reached before the matching ')'",
                        open,
                    ))
                }
                _ => {
                    let cell = BlankNodeTerm::new();
                    if let Some(previous) = cells.last() {
                        self.emit_triple(&(*previous).into(), &rdf::REST, cell.into());
                    }
                    cells.push(cell);
                    self.parse_object(&cell.into(), &rdf::FIRST)?;
                }
            }
        }
        Ok(match (cells.first(), cells.last()) {
            (Some(first), Some(last)) => {
                self.emit_triple(&(*last).into(), &rdf::REST, rdf::NIL.into());
                (*first).into()
            }
            _ => rdf::NIL.into(),
        })
    }

    fn parse_literal(&mut self) -> Result<LiteralTerm, ParserError> {
        // [13] 	literal 	::= 	RDFLiteral | NumericLiteral | BooleanLiteral
        // [16] 	NumericLiteral 	::= 	INTEGER | DECIMAL | DOUBLE
        // [133s] 	BooleanLiteral 	::= 	'true' | 'false'
        let token = self.current();
        let literal = match &token.kind {
            TokenKind::String(value) => {
                self.consume();
                return self.parse_rdf_literal(value, token.position);
            }
            TokenKind::Integer(value) => LiteralTerm::typed(value.as_str(), xsd::INTEGER),
            TokenKind::Decimal(value) => LiteralTerm::typed(value.as_str(), xsd::DECIMAL),
            TokenKind::Double(value) => LiteralTerm::typed(value.as_str(), xsd::DOUBLE),
            TokenKind::True => LiteralTerm::typed("true", xsd::BOOLEAN),
            TokenKind::False => LiteralTerm::typed("false", xsd::BOOLEAN),
            _ => return Err(self.unexpected_token_error("a literal")),
        };
        self.consume();
        Ok(literal)
    }

    fn parse_rdf_literal(
        &mut self,
        value: &str,
        position: TextPosition,
    ) -> Result<LiteralTerm, ParserError> {
        // [128s] 	RDFLiteral 	::= 	String (LANGTAG | '^^' iri)?
        let token = self.current();
        match &token.kind {
            TokenKind::LangTag(language) => {
                self.consume();
                LiteralTerm::language_tagged(value, language)
                    .map_err(|error| ParserError::at(error.message(), token.position))
            }
            TokenKind::DatatypeMarker => {
                self.consume();
                let datatype = self.parse_iri()?;
                LiteralTerm::new(value, Some(datatype), None)
                    .map_err(|error| ParserError::at(error.message(), position))
            }
            _ => Ok(LiteralTerm::simple(value)),
        }
    }

    fn parse_iri(&mut self) -> Result<IriTerm, ParserError> {
        // [135s] 	iri 	::= 	IRIREF | PrefixedName
        let token = self.current();
        let iri = match &token.kind {
            TokenKind::IriRef(iri) => self.resolve_iri(iri, token.position)?,
            TokenKind::PrefixedName { prefix, local } => {
                let namespace = self.prefixes.get(prefix).ok_or_else(|| {
                    ParserError::at(format!("unknown prefix '{}'", prefix), token.position)
                })?;
                IriTerm::new(format!("{}{}", namespace, local)).map_err(|error| {
                    ParserError::at(error.message(), token.position)
                })?
            }
            _ => return Err(self.unexpected_token_error("an IRI")),
        };
        self.consume();
        Ok(iri)
    }

    fn parse_blank_node(&mut self) -> Result<BlankNodeTerm, ParserError> {
        // [137s] 	BlankNode 	::= 	BLANK_NODE_LABEL | ANON
        // [162s] 	ANON 	::= 	'[' WS* ']'
        match &self.current().kind {
            TokenKind::BlankNodeLabel(label) => {
                let node = *self
                    .bnodes
                    .entry(label.clone())
                    .or_insert_with(BlankNodeTerm::new);
                self.consume();
                Ok(node)
            }
            TokenKind::OpenBracket => {
                self.consume();
                self.expect(&TokenKind::CloseBracket)?;
                Ok(BlankNodeTerm::new())
            }
            _ => Err(self.unexpected_token_error("a blank node")),
        }
    }

    fn resolve_iri(&self, iri: &str, position: TextPosition) -> Result<IriTerm, ParserError> {
        if let Some(base_iri) = &self.base_iri {
            base_iri
                .resolve(iri)
                .map(|iri| IriTerm::new_unchecked(iri.into_inner()))
                .map_err(|error| {
                    ParserError::at(
                        format!("invalid IRI '{}': {}", iri, error),
                        position,
                    )
                })
        } else {
            IriTerm::new(iri).map_err(|error| ParserError::at(error.message(), position))
        }
    }
}

fn is_literal_start(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::True
            | TokenKind::False
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Graph, RdfError> {
        TurtleParser::default().parse(input, None)
    }

    fn iri(value: &'static str) -> IriTerm {
        IriTerm::prevalidated(value)
    }

    fn parser_error_position(input: &str) -> Option<TextPosition> {
        parse(input).unwrap_err().textual_position()
    }

    #[test]
    fn simple_triple_with_language() -> Result<(), RdfError> {
        let graph = parse(
            "<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\"@en .",
        )?;
        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(
            triple.object,
            Term::from(LiteralTerm::language_tagged("Alice", "en")?)
        );
        Ok(())
    }

    #[test]
    fn type_shorthand() -> Result<(), RdfError> {
        assert_eq!(
            parse("<http://example.org/a> a <http://example.org/b> .")?,
            parse("<http://example.org/a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/b> .")?
        );
        Ok(())
    }

    #[test]
    fn predicate_and_object_lists() -> Result<(), RdfError> {
        let graph = parse(
            "@prefix ex: <http://example.org/> .
            ex:s ex:p ex:o1 , ex:o2 ; ex:q \"x\" ;; .",
        )?;
        assert_eq!(graph.len(), 3);
        let s = Subject::from(iri("http://example.org/s"));
        assert_eq!(
            graph
                .find_triples(Some(&s), Some(&iri("http://example.org/p")), None)
                .len(),
            2
        );
        Ok(())
    }

    #[test]
    fn default_prefixes_are_available() -> Result<(), RdfError> {
        let graph = parse("<http://example.org/s> foaf:name \"S\"^^xsd:string .")?;
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.predicate, iri("http://xmlns.com/foaf/0.1/name"));
        assert_eq!(triple.object, Term::from(LiteralTerm::simple("S")));
        Ok(())
    }

    #[test]
    fn later_prefix_shadows_earlier() -> Result<(), RdfError> {
        let graph = parse(
            "@prefix ex: <http://one.example/> .
            PREFIX ex: <http://two.example/>
            ex:s ex:p ex:o .",
        )?;
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.subject, Subject::from(iri("http://two.example/s")));
        Ok(())
    }

    #[test]
    fn custom_mappings_seed_prefixes() -> Result<(), RdfError> {
        let parser = TurtleParser::new(NamespaceMappings::custom([("ex", "http://example.org/")]));
        let graph = parser.parse("ex:s ex:p ex:o .", None)?;
        assert_eq!(graph.len(), 1);
        assert!(parse("ex:s ex:p ex:o .").is_err());
        Ok(())
    }

    #[test]
    fn relative_iris_are_resolved() -> Result<(), RdfError> {
        let graph = TurtleParser::default().parse(
            "<s> <p> <o> . @base <http://other.example/dir/> . <../s> <#p> <o> .",
            Some("http://example.org/doc"),
        )?;
        let iris: Vec<_> = graph.subjects().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            iris,
            vec!["<http://example.org/s>", "<http://other.example/s>"]
        );
        assert!(graph.has_triples(None, Some(&iri("http://other.example/dir/#p")), None));
        Ok(())
    }

    #[test]
    fn relative_iris_without_base_are_kept() -> Result<(), RdfError> {
        let graph = parse("<s> <p> <o> .")?;
        assert_eq!(graph.iter().next().unwrap().subject.to_string(), "<s>");
        Ok(())
    }

    #[test]
    fn numbers_and_booleans() -> Result<(), RdfError> {
        let graph = parse("<http://e.org/s> <http://e.org/p> 1, 1.5, 1e0, true .")?;
        let objects: Vec<_> = graph.objects().into_iter().cloned().collect();
        assert_eq!(
            objects,
            vec![
                Term::from(LiteralTerm::typed("1", xsd::INTEGER)),
                Term::from(LiteralTerm::typed("1.5", xsd::DECIMAL)),
                Term::from(LiteralTerm::typed("1e0", xsd::DOUBLE)),
                Term::from(LiteralTerm::typed("true", xsd::BOOLEAN)),
            ]
        );
        Ok(())
    }

    #[test]
    fn blank_node_labels_are_document_scoped() -> Result<(), RdfError> {
        let input = "_:a <http://e.org/p> _:b . _:b <http://e.org/p> _:a .";
        let graph = parse(input)?;
        assert_eq!(graph.blank_nodes().len(), 2);
        let other = parse(input)?;
        assert!(graph.blank_nodes().iter().all(|n| !other.blank_nodes().contains(n)));
        Ok(())
    }

    #[test]
    fn blank_node_property_lists() -> Result<(), RdfError> {
        let graph = parse(
            "[ <http://e.org/p> [ <http://e.org/q> 1 ] ] .
            [] <http://e.org/r> 2 .",
        )?;
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.blank_nodes().len(), 3);
        Ok(())
    }

    #[test]
    fn collections() -> Result<(), RdfError> {
        let graph = parse("<http://e.org/s> <http://e.org/p> (1 2) , () .")?;
        assert_eq!(graph.len(), 6);
        assert!(graph.has_triples(None, Some(&rdf::FIRST), None));
        assert_eq!(
            graph.find_triples(None, None, Some(&rdf::NIL.into())).len(),
            2
        );
        let graph = parse("(<http://e.org/a>) <http://e.org/p> <http://e.org/o> .")?;
        assert_eq!(graph.len(), 3);
        Ok(())
    }

    #[test]
    fn undefined_prefix() {
        let error = parse("\nundefined:s <http://e.org/p> <http://e.org/o> .").unwrap_err();
        assert!(error.to_string().contains("unknown prefix 'undefined'"));
        assert_eq!(error.textual_position(), Some(TextPosition::new(2, 1)));
    }

    #[test]
    fn missing_terminator() {
        assert_eq!(
            parser_error_position("<http://e.org/s> <http://e.org/p> <http://e.org/o>"),
            Some(TextPosition::new(1, 51))
        );
        assert!(parse("<http://e.org/s> <http://e.org/p> <http://e.org/o> <http://e.org/x> .").is_err());
    }

    #[test]
    fn literals_in_illegal_positions() {
        let error = parse("\"s\" <http://e.org/p> <http://e.org/o> .").unwrap_err();
        assert!(error.to_string().contains("subject"));
        let error = parse("<http://e.org/s> 1 <http://e.org/o> .").unwrap_err();
        assert!(error.to_string().contains("predicate"));
        let error = parse("<http://e.org/s> _:p <http://e.org/o> .").unwrap_err();
        assert!(error.to_string().contains("blank node"));
    }

    #[test]
    fn unbalanced_brackets() {
        assert_eq!(
            parser_error_position("<http://e.org/s> <http://e.org/p> [ <http://e.org/q> 1"),
            Some(TextPosition::new(1, 35))
        );
        assert_eq!(
            parser_error_position("<http://e.org/s> <http://e.org/p> ( 1 2"),
            Some(TextPosition::new(1, 35))
        );
    }

    #[test]
    fn invalid_literals() {
        assert!(parse("<http://e.org/s> <http://e.org/p> \"a\"^^rdf:langString .").is_err());
        assert!(parse("<http://e.org/s> <http://e.org/p> \"a\"@a-bad-tag-that-is-wrong1234 .").is_err());
    }

    #[test]
    fn tokenizer_errors_are_returned() {
        let error = parse("<http://e.org/s> <http://e.org/p> \"open .").unwrap_err();
        assert!(matches!(error, RdfError::Tokenizer(_)));
    }

    #[test]
    fn no_partial_graph_on_error() {
        assert!(parse("<http://e.org/s> <http://e.org/p> 1 . <http://e.org/s> <http://e.org/p>").is_err());
    }
}
