//! Store example with several domains and the built-in logger

use observact::{json, logger_middleware, Store, StoreConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Store Example ===\n");

    // Create a store with initial domains
    let store = StoreConfig::from_json(
        r#"{
            "domains": [
                { "key": "todos", "value": [] },
                { "key": "filter", "value": "all", "persist": true }
            ]
        }"#,
    )
    .expect("valid configuration")
    .middleware(logger_middleware())
    .build()
    .expect("unique domains");

    // Observe todo changes
    store
        .observe("todos", |todos| {
            let active = todos
                .as_array()
                .map(|items| items.iter().filter(|t| t["completed"] == false).count())
                .unwrap_or(0);
            println!("Todos updated! Active todos: {active}");
            Ok(())
        })
        .expect("todos is declared");

    // Add a todo
    println!("Adding todo...");
    store
        .update("todos", |todos| {
            if let Some(items) = todos.as_array_mut() {
                items.push(json!({ "id": 1, "text": "Learn Observact", "completed": false }));
            }
        })
        .expect("todos is declared");

    // Complete the todo
    println!("\nCompleting todo...");
    store
        .update("todos", |todos| todos[0]["completed"] = json!(true))
        .expect("todos is declared");

    // Unknown domains are rejected
    println!("\nWriting an undeclared domain...");
    if let Err(err) = store.set("user", json!("observee")) {
        println!("{err}");
    }

    // Rebuild a fresh store from the current state, as a UI binding would
    println!("\nRecreating store from snapshot...");
    let recreated = Store::new(store.snapshot()).expect("unique domains");
    for key in recreated.domain_keys() {
        println!("{key} = {}", recreated.get(&key).expect("key was listed"));
    }
}
