// ============================================================================
// lumen-store - Store Behavior Integration Tests
// End-to-end flows through the public surface
// ============================================================================

use lumen_store::{DataStore, NameKind, StoreError, SELECTOR_PREFIX};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn bulk_initialization_registers_values_and_placeholders() {
    let store = DataStore::new();
    store
        .initialize(
            json!({"uuid": null, "count": 3, "title": "draft"}),
            &["formatted", "selector::summary"],
        )
        .unwrap();

    assert_eq!(store.get("uuid").unwrap(), Value::Null);
    assert_eq!(store.get("count").unwrap(), json!(3));
    assert_eq!(store.get("title").unwrap(), json!("draft"));

    // Placeholders are defined and compute to null, bare or qualified
    assert_eq!(store.get("selector::formatted").unwrap(), Value::Null);
    assert_eq!(store.get("selector::summary").unwrap(), Value::Null);
}

#[test]
fn null_initialized_value_is_readable_where_unknown_is_not() {
    let store = DataStore::new();
    store.initialize(json!({"present": null}), &[]).unwrap();

    assert_eq!(store.get("present").unwrap(), Value::Null);
    assert_eq!(
        store.get("absent"),
        Err(StoreError::NotInitialized("absent".to_string()))
    );
}

#[test]
fn multi_dependency_selector_tracks_every_input() {
    let store = DataStore::new();
    store
        .initialize(json!({"first": "Ada", "last": "Lovelace"}), &[])
        .unwrap();

    store
        .define_selector("full_name", ["first", "last"], |inputs| {
            json!(format!(
                "{} {}",
                inputs[0].as_str().unwrap_or(""),
                inputs[1].as_str().unwrap_or("")
            ))
        })
        .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_inner = seen.clone();
    let _h = store
        .subscribe_to_selector(
            "full_name",
            move |value| seen_inner.borrow_mut().push(value.clone()),
            false,
        )
        .unwrap();

    store.update("first", json!("Grace")).unwrap();
    store.update("last", json!("Hopper")).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![json!("Grace Lovelace"), json!("Grace Hopper")]
    );
    assert_eq!(store.get("selector::full_name").unwrap(), json!("Grace Hopper"));
}

#[test]
fn one_update_cascades_through_all_dependent_selectors_synchronously() {
    let store = DataStore::new();
    store.update("n", json!(2)).unwrap();
    store
        .define_selector("double", "n", |inputs| {
            json!(inputs[0].as_i64().unwrap_or(0) * 2)
        })
        .unwrap();
    store
        .define_selector("square", "n", |inputs| {
            let n = inputs[0].as_i64().unwrap_or(0);
            json!(n * n)
        })
        .unwrap();

    let doubles = Rc::new(RefCell::new(Vec::new()));
    let squares = Rc::new(RefCell::new(Vec::new()));
    {
        let doubles = doubles.clone();
        let _h = store
            .subscribe_to_selector("double", move |v| doubles.borrow_mut().push(v.clone()), false)
            .unwrap();
    }
    {
        let squares = squares.clone();
        let _h = store
            .subscribe_to_selector("square", move |v| squares.borrow_mut().push(v.clone()), false)
            .unwrap();
    }

    store.update("n", json!(4)).unwrap();

    // Both fired exactly once, before update returned
    assert_eq!(*doubles.borrow(), vec![json!(8)]);
    assert_eq!(*squares.borrow(), vec![json!(16)]);
}

#[test]
fn shallow_object_diff_gates_notification() {
    let store = DataStore::new();
    store.update("config", json!({"a": 1, "b": 2})).unwrap();

    let fired = Rc::new(Cell::new(0));
    let fired_inner = fired.clone();
    let _h = store
        .subscribe_to_value("config", move |_, _| fired_inner.set(fired_inner.get() + 1), false)
        .unwrap();

    // Identical flat object: suppressed
    store.update("config", json!({"a": 1, "b": 2})).unwrap();
    assert_eq!(fired.get(), 0);

    // Difference in a non-first key: notified
    store.update("config", json!({"a": 1, "b": 3})).unwrap();
    assert_eq!(fired.get(), 1);

    // Nested object: shallow policy treats it as changed every time
    store.update("config", json!({"a": 1, "b": {"c": 3}})).unwrap();
    store.update("config", json!({"a": 1, "b": {"c": 3}})).unwrap();
    assert_eq!(fired.get(), 3);
}

#[test]
fn previous_value_reaches_listeners_before_selector_fanout() {
    let store = DataStore::new();
    store.update("x", json!("old")).unwrap();
    store
        .define_selector("echo", "x", |inputs| inputs[0].clone())
        .unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = events.clone();
        let _h = store
            .subscribe_to_value(
                "x",
                move |new, previous| {
                    events
                        .borrow_mut()
                        .push(format!("direct:{new}<-{:?}", previous.map(Value::to_string)));
                },
                false,
            )
            .unwrap();
    }
    {
        let events = events.clone();
        let _h = store
            .subscribe_to_selector("echo", move |v| events.borrow_mut().push(format!("echo:{v}")), false)
            .unwrap();
    }

    store.update("x", json!("new")).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            "direct:\"new\"<-Some(\"\\\"old\\\"\")".to_string(),
            "echo:\"new\"".to_string(),
        ]
    );
}

#[test]
fn unsubscribe_takes_effect_for_later_updates_only() {
    let store = DataStore::new();
    store.update("x", json!(0)).unwrap();

    let first_fired = Rc::new(Cell::new(0));
    let second_fired = Rc::new(Cell::new(0));

    // The first listener removes the second mid-pass; the second still
    // fires for the pass that captured it
    let second_handle: Rc<RefCell<Option<lumen_store::SubscriptionHandle>>> =
        Rc::new(RefCell::new(None));
    {
        let first_fired = first_fired.clone();
        let second_handle = second_handle.clone();
        let _h = store
            .subscribe_to_value(
                "x",
                move |_, _| {
                    first_fired.set(first_fired.get() + 1);
                    if let Some(handle) = second_handle.borrow().as_ref() {
                        handle.remove();
                    }
                },
                false,
            )
            .unwrap();
    }
    {
        let second_fired = second_fired.clone();
        let handle = store
            .subscribe_to_value("x", move |_, _| second_fired.set(second_fired.get() + 1), false)
            .unwrap();
        *second_handle.borrow_mut() = Some(handle);
    }

    store.update("x", json!(1)).unwrap();
    assert_eq!(first_fired.get(), 1);
    assert_eq!(second_fired.get(), 1);

    store.update("x", json!(2)).unwrap();
    assert_eq!(first_fired.get(), 2);
    assert_eq!(second_fired.get(), 1, "removed handle must stay silent");
}

#[test]
fn selector_names_route_by_kind() {
    assert_eq!(NameKind::of("plain"), NameKind::Value);
    assert_eq!(
        NameKind::of(&format!("{SELECTOR_PREFIX}derived")),
        NameKind::Selector
    );
}

#[test]
fn redefining_a_selector_changes_its_output_for_existing_subscribers() {
    let store = DataStore::new();
    store.update("x", json!(10)).unwrap();
    store
        .define_selector("view", "x", |inputs| inputs[0].clone())
        .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_inner = seen.clone();
    let _h = store
        .subscribe_to_selector("view", move |v| seen_inner.borrow_mut().push(v.clone()), false)
        .unwrap();

    store
        .define_selector("view", "x", |inputs| {
            json!(inputs[0].as_i64().unwrap_or(0) + 100)
        })
        .unwrap();

    store.update("x", json!(11)).unwrap();
    assert_eq!(*seen.borrow(), vec![json!(111)]);
}

#[test]
fn listener_reentry_observes_the_already_mutated_value() {
    let store = DataStore::new();
    store.update("x", json!(0)).unwrap();

    let observed = Rc::new(RefCell::new(Vec::new()));
    {
        let store_inner = store.clone();
        let observed = observed.clone();
        let _h = store
            .subscribe_to_value(
                "x",
                move |_, _| {
                    // Reads during notification see the post-mutation value
                    observed.borrow_mut().push(store_inner.get("x").unwrap());
                },
                false,
            )
            .unwrap();
    }

    store.update("x", json!(7)).unwrap();
    assert_eq!(*observed.borrow(), vec![json!(7)]);
}
