//! Integration tests for Observact

use observact::{
    create_middleware, create_store, json, logger_middleware, Domain, Store, StoreConfig,
    StoreError, Value,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::thread;

fn app_domains() -> Vec<Domain> {
    vec![
        Domain::new("theme", "light"),
        Domain::new("shopping-cart", json!([])),
        Domain::new(
            "profile",
            json!({
                "firstName": "Observee",
                "lastName": "Acticia",
                "email": "observee@acticia.doesnot.exist",
            }),
        ),
    ]
}

#[test]
fn store_integration() {
    let store = create_store(StoreConfig::from(app_domains())).unwrap();

    for domain in app_domains() {
        assert_eq!(store.get(&domain.key).unwrap(), domain.value);
    }

    store.set("theme", json!("dark")).unwrap();
    assert_eq!(store.get("theme").unwrap(), json!("dark"));

    store
        .update("profile", |profile| {
            profile["firstName"] = json!("N/A");
            profile["lastName"] = json!("N/A");
        })
        .unwrap();
    assert_eq!(
        store.get("profile").unwrap(),
        json!({
            "firstName": "N/A",
            "lastName": "N/A",
            "email": "observee@acticia.doesnot.exist",
        })
    );
}

#[test]
fn store_subscription() {
    let store = Store::new(app_domains()).unwrap();
    let theme = Arc::new(Mutex::new(Vec::new()));
    let profile = Arc::new(AtomicUsize::new(0));

    let theme_clone = theme.clone();
    store
        .observe("theme", move |value| {
            theme_clone.lock().unwrap().push(value.clone());
            Ok(())
        })
        .unwrap();
    let profile_clone = profile.clone();
    store
        .observe("profile", move |_| {
            profile_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    store.set("theme", json!("dark")).unwrap();
    store.set("profile", json!({})).unwrap();
    store.set("theme", json!("light")).unwrap();

    assert_eq!(*theme.lock().unwrap(), vec![json!("dark"), json!("light")]);
    assert_eq!(profile.load(Ordering::SeqCst), 1);

    store.clear_observers();
    store.set("theme", json!("light")).unwrap();
    store.set("profile", json!({})).unwrap();

    assert_eq!(theme.lock().unwrap().len(), 2);
    assert_eq!(profile.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_domain_never_stores_value() {
    let store = Store::new(app_domains()).unwrap();

    let err = store.set("nonexistent", json!(42)).unwrap_err();
    assert!(matches!(err, StoreError::DomainNotFound(ref key) if key == "nonexistent"));
    assert!(matches!(
        store.get("nonexistent"),
        Err(StoreError::DomainNotFound(_))
    ));
    assert_eq!(
        store.domain_keys(),
        vec!["theme", "shopping-cart", "profile"]
    );
}

#[test]
fn custom_middleware_receives_store_and_mutation() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    let middleware = create_middleware(
        move |ctx| {
            let mutation = ctx.incoming_mutation;
            calls_clone.lock().unwrap().push((
                mutation.key.to_string(),
                mutation.value.clone(),
                ctx.store.domain_keys(),
            ));
            Ok(())
        },
        "mock-middleware",
    );
    let store = StoreConfig::new()
        .domain(Domain::new("theme", "light"))
        .middleware(middleware)
        .build()
        .unwrap();

    store.set("theme", json!("light")).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![(
            "theme".to_string(),
            json!("light"),
            vec!["theme".to_string()]
        )]
    );
    assert_eq!(store.get("theme").unwrap(), json!("light"));
}

#[test]
fn built_in_logger_does_not_alter_writes() {
    let store = StoreConfig::from(app_domains())
        .middleware(logger_middleware())
        .build()
        .unwrap();

    store.set("theme", json!("dark")).unwrap();
    assert_eq!(store.get("theme").unwrap(), json!("dark"));
}

#[test]
fn validation_middleware_rejects_bad_writes() {
    let validator = create_middleware(
        |ctx| {
            let mutation = ctx.incoming_mutation;
            if mutation.key == "shopping-cart" && !mutation.value.is_array() {
                return Err(format!("cart must be a list, got {}", mutation.value).into());
            }
            Ok(())
        },
        "cart-validator",
    );
    let store = Store::with_middlewares(app_domains(), vec![validator]).unwrap();

    let err = store.set("shopping-cart", json!("apple")).unwrap_err();
    assert!(matches!(err, StoreError::Middleware { ref name, .. } if name == "cart-validator"));
    assert_eq!(store.get("shopping-cart").unwrap(), json!([]));

    store.set("shopping-cart", json!(["apple"])).unwrap();
    assert_eq!(store.get("shopping-cart").unwrap(), json!(["apple"]));
}

#[test]
fn concurrent_writers_keep_protocol_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let order_clone = order.clone();
    let tracer = create_middleware(
        move |ctx| {
            order_clone
                .lock()
                .unwrap()
                .push(format!("middleware:{}", ctx.incoming_mutation.value));
            Ok(())
        },
        "tracer",
    );
    let store = Store::with_middlewares(vec![Domain::new("count", 0)], vec![tracer]).unwrap();
    let order_clone = order.clone();
    store
        .observe("count", move |value| {
            order_clone.lock().unwrap().push(format!("observer:{value}"));
            Ok(())
        })
        .unwrap();

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let store = store.clone();
            thread::spawn(move || store.set("count", json!(n)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let order = order.lock().unwrap();
    assert_eq!(order.len(), 16);
    for pair in order.chunks(2) {
        let written = pair[0].trim_start_matches("middleware:");
        assert_eq!(pair[1], format!("observer:{written}"));
    }
    let last = order[15].trim_start_matches("observer:").to_string();
    assert_eq!(store.get("count").unwrap().to_string(), last);
}

#[test]
fn snapshot_round_trips_through_json() {
    let store = Store::new(app_domains()).unwrap();
    store.set("theme", json!("dark")).unwrap();

    let document = json!({ "domains": store.snapshot() }).to_string();
    let rebuilt = StoreConfig::from_json(&document).unwrap().build().unwrap();

    for key in store.domain_keys() {
        assert_eq!(rebuilt.get(&key).unwrap(), store.get(&key).unwrap());
    }
    assert_eq!(rebuilt.get("theme").unwrap(), Value::from("dark"));
}
