//! Counter application wiring observers, middleware and re-entrant writes

use observact::{create_middleware, json, Domain, StoreConfig, Value};

fn as_int(value: &Value) -> i64 {
    value.as_i64().unwrap_or(0)
}

fn main() {
    println!("=== Complete Counter Application ===\n");

    // Reject non-integer counts before they reach the store
    let integers_only = create_middleware(
        |ctx| {
            let mutation = ctx.incoming_mutation;
            if mutation.key == "count" && !mutation.value.is_i64() {
                return Err(format!("count must be an integer, got {}", mutation.value).into());
            }
            Ok(())
        },
        "integers-only",
    );

    println!("1. Initializing counter store");
    let store = StoreConfig::new()
        .domain(Domain::new("count", 0))
        .domain(Domain::new("step", 1))
        .domain(Domain::new("history", json!([0])))
        .middleware(integers_only)
        .build()
        .expect("counter domains are unique");

    // Every count change is appended to the history domain
    println!("\n2. Recording history from an observer");
    let recorder = store.clone();
    store
        .observe("count", move |value| {
            recorder.update("history", |history| {
                if let Value::Array(entries) = history {
                    entries.push(value.clone());
                }
            })?;
            Ok(())
        })
        .expect("count is declared");

    store
        .observe("count", |value| {
            let n = as_int(value);
            println!(
                "   [State] Count: {} | Positive: {} | Even: {} | Abs: {}",
                n,
                n > 0,
                n % 2 == 0,
                n.abs()
            );
            Ok(())
        })
        .expect("count is declared");

    let step_by = |sign: i64| {
        let step = as_int(&store.get("step").expect("step is declared"));
        store
            .update("count", |count| *count = json!(as_int(count) + sign * step))
            .expect("count is declared");
    };

    println!("\n3. Incrementing...");
    for _ in 0..3 {
        step_by(1);
    }

    println!("\n4. Changing step size to 5");
    store.set("step", json!(5)).expect("step is declared");

    println!("\n5. Incrementing with new step...");
    step_by(1);

    println!("\n6. Decrementing...");
    for _ in 0..3 {
        step_by(-1);
    }

    println!("\n7. Writing a string is rejected by middleware:");
    if let Err(err) = store.set("count", json!("eleven")) {
        println!("   {err}");
    }

    println!("\n8. History:");
    println!("   {}", store.get("history").expect("history is declared"));

    println!("\n9. Resetting...");
    store.set("count", json!(0)).expect("count is declared");

    println!("\n10. Final history:");
    store
        .read("history", |history| println!("   {history}"))
        .expect("history is declared");

    println!("\n✓ Counter application complete!");
}
