//! End-to-end inflation scenarios over the headless environment
use crate::dispatcher::{inflate, Inflater};
use crate::error::InflateError;
use crate::headless::HeadlessEnvironment;
use std::cell::RefCell;
use std::rc::Rc;
use trellis_model::{
    FieldDecl, KindDescriptor, LayoutMarker, Orientation, OrientationLock, Sizing, Specification,
    Value,
};

#[test]
fn test_parent_variable_reaches_child_binding() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout(
        "A",
        LayoutMarker::new("frame").size(Sizing::Wrap, Sizing::Wrap),
    )
    .field(FieldDecl::variable("controller", "X"))
    .nest(
        Specification::layout("B", LayoutMarker::new("button"))
            .field(FieldDecl::plain("text", "Press"))
            .field(FieldDecl::binding("onClick", "controller", Value::Null)),
    );

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().expect("root should be built");

    assert_eq!(root.kind(), "frame");
    let children = root.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind(), "button");
    assert_eq!(children[0].prop("text"), Some(Value::from("Press")));

    let b = inflater.scopes().find_frame("B").unwrap();
    assert_eq!(b.field("onClick"), Some(&Value::from("X")));
    assert!(!b.setters().contains_key("setOnClick"));

    assert!(inflater.diagnostics().is_empty());
    assert_eq!(env.constructed_kinds(), vec!["frame", "button"]);
}

#[test]
fn test_getter_result_overwrites_field() {
    let mut env = HeadlessEnvironment::with_standard_kinds();
    env.register_kind(
        KindDescriptor::new("badge")
            .extends("view")
            .method("getComputedTag", vec![], |obj, _| {
                Ok(Value::from(format!("badge-{}", obj.id())))
            }),
    );

    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let spec = Specification::layout("Badge", LayoutMarker::new("badge"))
        .field(FieldDecl::getter("computedTag", vec![]))
        .on_layout_complete(move |cx| {
            *sink.borrow_mut() = cx.field("computedTag").cloned();
        });

    let badge = inflate(&spec, &env).unwrap().unwrap();
    assert_eq!(
        *seen.borrow(),
        Some(Value::from(format!("badge-{}", badge.id())))
    );
}

#[test]
fn test_unsatisfiable_root_orientation_aborts_before_construction() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout(
        "Root",
        LayoutMarker::new("frame")
            .orientation(vec![Orientation::Portrait, Orientation::LandscapeLeft]),
    )
    .nest(Specification::layout("Child", LayoutMarker::new("text")));

    let err = inflate(&spec, &env).unwrap_err();
    assert_eq!(
        err,
        InflateError::UnsatisfiableOrientation {
            spec: "Root".to_string(),
            requested: vec![Orientation::Portrait, Orientation::LandscapeLeft],
        }
    );
    assert!(env.constructed_kinds().is_empty());
    assert!(env.orientation_requests().is_empty());
}

#[test]
fn test_only_root_orientation_is_requested() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout(
        "Root",
        LayoutMarker::new("frame")
            .orientation(vec![Orientation::LandscapeRight, Orientation::LandscapeLeft]),
    )
    .nest(Specification::layout(
        "Child",
        LayoutMarker::new("view").orientation(vec![Orientation::Portrait, Orientation::LandscapeLeft]),
    ));

    let root = inflate(&spec, &env).unwrap().unwrap();
    assert_eq!(root.child_count(), 1);
    assert_eq!(env.orientation_requests(), vec![OrientationLock::SensorLandscape]);
}

#[test]
fn test_default_orientation_is_full_sensor() {
    let env = HeadlessEnvironment::with_standard_kinds();
    inflate(&Specification::layout("Root", LayoutMarker::new("frame")), &env).unwrap();
    assert_eq!(env.orientation_requests(), vec![OrientationLock::FullSensor]);
}

#[test]
fn test_binding_prefers_immediate_parent_over_grandparent() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Grandparent", LayoutMarker::new("frame"))
        .field(FieldDecl::variable("accent", 0x111111))
        .nest(
            Specification::layout("Parent", LayoutMarker::new("linear"))
                .field(FieldDecl::variable("accent", 0x222222))
                .nest(
                    Specification::layout("Leaf", LayoutMarker::new("text"))
                        .field(FieldDecl::binding("textColor", "accent", 0)),
                ),
        );

    let mut inflater = Inflater::new(&env);
    inflater.inflate(&spec).unwrap().unwrap();
    let leaf = inflater.scopes().find_frame("Leaf").unwrap();
    assert_eq!(leaf.field("textColor"), Some(&Value::Int(0x222222)));
}

#[test]
fn test_unresolved_binding_applies_declared_default() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("frame")).nest(
        Specification::layout("Title", LayoutMarker::new("text"))
            .field(FieldDecl::binding("text", "title", "Untitled")),
    );

    let root = inflate(&spec, &env).unwrap().unwrap();
    assert_eq!(root.children()[0].prop("text"), Some(Value::from("Untitled")));
}

#[test]
fn test_completion_hook_sees_environment_object_and_fields() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let spec = Specification::layout("Root", LayoutMarker::new("frame"))
        .field(FieldDecl::plain("backgroundColor", 7))
        .on_layout_complete(move |cx| {
            let object = cx.object.expect("hook should receive the object");
            sink.borrow_mut().push((
                object.kind().to_string(),
                cx.field("backgroundColor").cloned(),
                cx.env.methods().contains("frame"),
            ));
        });

    inflate(&spec, &env).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![("frame".to_string(), Some(Value::Int(7)), true)]
    );
}

#[test]
fn test_hooks_run_children_first() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let order = Rc::new(RefCell::new(Vec::new()));
    let (outer, inner) = (order.clone(), order.clone());
    let spec = Specification::layout("Outer", LayoutMarker::new("frame"))
        .on_layout_complete(move |_| outer.borrow_mut().push("Outer"))
        .nest(
            Specification::layout("Inner", LayoutMarker::new("view"))
                .on_layout_complete(move |_| inner.borrow_mut().push("Inner")),
        );

    inflate(&spec, &env).unwrap();
    assert_eq!(*order.borrow(), vec!["Inner", "Outer"]);
}

#[test]
fn test_children_attach_in_declaration_order() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("List", LayoutMarker::new("linear"))
        .nest(Specification::layout("First", LayoutMarker::new("text")))
        .nest(Specification::layout("Second", LayoutMarker::new("image")))
        .nest(Specification::layout("Third", LayoutMarker::new("button")));

    let root = inflate(&spec, &env).unwrap().unwrap();
    let kinds: Vec<_> = root.children().iter().map(|c| c.kind().to_string()).collect();
    assert_eq!(kinds, vec!["text", "image", "button"]);
}

#[test]
fn test_frames_are_sealed_after_the_pass() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("frame"))
        .nest(Specification::layout("Child", LayoutMarker::new("view")));

    let mut inflater = Inflater::new(&env);
    inflater.inflate(&spec).unwrap();
    assert_eq!(inflater.scopes().len(), 2);
    assert!(inflater.scopes().frames().all(|(_, frame)| frame.is_sealed()));

    let root_frame = inflater.scopes().find_frame("Root").unwrap();
    assert!(root_frame.child("Child").is_some());
}

#[test]
fn test_initializer_reads_ancestor_variable() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("frame"))
        .field(FieldDecl::variable("base", 10))
        .nest(
            Specification::layout("Label", LayoutMarker::new("text")).field(
                FieldDecl::plain("textSize", Value::Null).computed(|scope| {
                    let base = scope.variable("base").and_then(|v| v.as_i32()).unwrap_or(0);
                    Value::Float(base as f32 * 1.5)
                }),
            ),
        );

    let root = inflate(&spec, &env).unwrap().unwrap();
    assert_eq!(root.children()[0].prop("textSize"), Some(Value::Float(15.0)));
}

#[test]
fn test_nested_spec_may_reuse_ancestor_name() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Row", LayoutMarker::new("frame")).nest(
        Specification::layout("Row", LayoutMarker::new("linear"))
            .nest(Specification::layout("Row", LayoutMarker::new("text"))),
    );

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();

    assert!(inflater.diagnostics().is_empty());
    assert_eq!(root.child_count(), 1);
    assert_eq!(root.children()[0].kind(), "linear");
    assert_eq!(root.children()[0].children()[0].kind(), "text");
}

#[test]
fn test_same_named_siblings_are_all_registered() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("List", LayoutMarker::new("frame"))
        .nest(Specification::layout("Item", LayoutMarker::new("text")).field(FieldDecl::plain("text", "one")))
        .nest(Specification::layout("Item", LayoutMarker::new("text")).field(FieldDecl::plain("text", "two")));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(root.child_count(), 2);

    let list = inflater.scopes().find_frame("List").unwrap();
    let texts: Vec<_> = list
        .children()
        .iter()
        .map(|(name, object)| (name.as_str(), object.prop("text")))
        .collect();
    assert_eq!(
        texts,
        vec![
            ("Item", Some(Value::from("one"))),
            ("Item", Some(Value::from("two"))),
        ]
    );
    assert_eq!(list.child("Item").unwrap().prop("text"), Some(Value::from("one")));
}
