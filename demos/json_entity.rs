//! Configured Graphs Over JSON Documents
//!
//! This example demonstrates loading a graph from JSON configuration and
//! running it against entities that are themselves JSON documents.
//!
//! Key concepts:
//! - Graph configuration with named callbacks
//! - Resolving names through a callback registry
//! - Nested property paths
//!
//! Run with: cargo run --example json_entity

use multistate::access::JsonAccessor;
use multistate::{CallbackRegistry, Graph, Machine};
use serde_json::{json, Value};
use std::sync::Arc;

const ARTICLE_GRAPH: &str = r##"{
    "name": "article",
    "property_path": "meta.state",
    "states": ["draft", "proofread", "fact_checked", "published"],
    "transitions": {
        "submit": { "from": ["draft"], "to": ["proofread", "fact_checked"] },
        "publish": { "from": ["proofread", "fact_checked"], "to": ["published"] }
    },
    "callbacks": {
        "guard": [
            { "on": ["submit"], "do": "min_words", "args": [100] }
        ],
        "after": [
            { "to": ["published"], "do": "announce", "args": ["#newsroom"] }
        ]
    }
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Configured Article Workflow ===\n");

    let graph = Graph::from_json_str(ARTICLE_GRAPH)?;
    println!(
        "Loaded graph '{}' with transitions {:?}",
        graph.name(),
        graph.transition_names().collect::<Vec<_>>()
    );

    let registry = CallbackRegistry::<Value>::new()
        .register_with_args("min_words", |event, args| {
            let words = event.entity()["words"].as_u64().unwrap_or(0);
            words >= args.first().and_then(Value::as_u64).unwrap_or(0)
        })
        .register_with_args("announce", |event, args| {
            let channel = args.first().and_then(Value::as_str).unwrap_or("#general");
            println!("  [{channel}] published: {}", event.entity()["title"]);
            true
        });

    let builder = Machine::builder()
        .graph(graph)
        .accessor(Arc::new(JsonAccessor))
        .resolver(Arc::new(registry));

    let mut stub = json!({ "title": "Stub", "words": 12, "meta": { "state": ["draft"] } });
    let machine = builder.build(&mut stub)?;
    println!("'Stub' can be submitted: {}", machine.can("submit")?);

    let mut feature = json!({ "title": "Feature", "words": 1800, "meta": { "state": ["draft"] } });
    {
        let mut machine = builder.build(&mut feature)?;
        machine.apply("submit", false)?;
        println!("After submit: {}", machine.get_state()?);
        machine.apply("publish", false)?;
    }

    println!("\nStored document:\n{}", serde_json::to_string_pretty(&feature)?);

    Ok(())
}
