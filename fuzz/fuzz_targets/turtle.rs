#![no_main]
use libfuzzer_sys::fuzz_target;
use rdfio_turtle::lexer::tokenize;
use rdfio_turtle::{TurtleParser, TurtleSerializer};
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let _ = tokenize(input);
    let Ok(graph) = TurtleParser::default().parse(input, Some("http://example.com/")) else {
        return;
    };
    // Everything parsed must be written back and read again
    let turtle = TurtleSerializer::default()
        .write(&graph, None, &HashMap::new())
        .unwrap();
    let parsed = TurtleParser::default().parse(&turtle, None).unwrap();
    assert_eq!(parsed.len(), graph.len());
});
