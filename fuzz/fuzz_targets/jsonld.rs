#![no_main]
use libfuzzer_sys::fuzz_target;
use rdfio_jsonld::{JsonLdParser, JsonLdSerializer};
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = JsonLdParser::new().parse(input, Some("http://example.com/")) else {
        return;
    };
    let json = JsonLdSerializer::default()
        .write(&graph, None, &HashMap::new())
        .unwrap();
    // Decimals come back as doubles, so only the parse itself is checked
    JsonLdParser::new().parse(&json, None).unwrap();
});
