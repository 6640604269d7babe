//! Per-marker builder behavior
use crate::builders::Builder;
use crate::dispatcher::{inflate, Inflater};
use crate::error::{InflateError, InflateResult};
use crate::headless::HeadlessEnvironment;
use crate::options::InflateOptions;
use crate::scope::ScopeId;
use crate::validator::{ValidationLevel, Validator};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use trellis_model::{
    AdapterMarker, Axis, EmbedMarker, FieldDecl, InvisibleMarker, KindDescriptor, LayoutMarker,
    LayoutParams, Marker, ObjectRef, Origin, Padding, ResourceMarker, Sizing, Specification, Value,
};

fn embed(name: &str, target: &str) -> Specification {
    Specification::new(name).marker(Marker::Embed(EmbedMarker {
        layout: target.to_string(),
    }))
}

fn invisible(name: &str, kind: &str) -> Specification {
    Specification::new(name).marker(Marker::Invisible(InvisibleMarker {
        kind: kind.to_string(),
    }))
}

// Layout

#[test]
fn test_layout_applies_construction_parameters() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout(
        "Column",
        LayoutMarker::new("linear")
            .origin(4.0, 8.0)
            .size(Sizing::Fill, Sizing::Fixed(120))
            .padding(vec![6])
            .axis(Axis::Vertical),
    );

    let column = inflate(&spec, &env).unwrap().unwrap();
    let layout = column.layout();
    assert_eq!(layout.origin, Origin::new(4.0, 8.0));
    assert_eq!(layout.width, Sizing::Fill);
    assert_eq!(layout.height, Sizing::Fixed(120));
    assert_eq!(layout.padding, Padding::uniform(6));
    assert_eq!(layout.axis, Some(Axis::Vertical));
}

#[test]
fn test_layout_padding_with_wrong_count_is_zero() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("frame").padding(vec![1, 2, 3]));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(root.layout().padding, Padding::default());
    assert!(inflater.diagnostics().is_empty());
}

#[test]
fn test_setters_run_after_construction_parameters() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("frame").padding(vec![1, 1, 1, 1]))
        .field(FieldDecl::setter(
            "padding",
            vec![Value::Int(9), Value::Int(8), Value::Int(7), Value::Int(6)],
        ));

    let root = inflate(&spec, &env).unwrap().unwrap();
    let padding = root.layout().padding;
    assert_eq!((padding.left, padding.top, padding.right, padding.bottom), (9, 8, 7, 6));
}

#[test]
fn test_unknown_kind_falls_back_to_default_container() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Odd", LayoutMarker::new("spaceship"))
        .nest(Specification::layout("Inside", LayoutMarker::new("text")));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(root.kind(), "frame");
    assert_eq!(root.child_count(), 1);
    assert!(matches!(
        inflater.diagnostics(),
        [InflateError::Construction { kind, .. }] if kind == "spaceship"
    ));
}

#[test]
fn test_fallback_kind_is_configurable() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let options = InflateOptions {
        default_container_kind: "linear".to_string(),
        ..InflateOptions::default()
    };
    let spec = Specification::layout("Odd", LayoutMarker::new("spaceship"));

    let root = Inflater::with_options(&env, options).inflate(&spec).unwrap().unwrap();
    assert_eq!(root.kind(), "linear");
}

#[test]
fn test_failed_fallback_yields_nothing() {
    let env = HeadlessEnvironment::new();
    let spec = Specification::layout("Odd", LayoutMarker::new("spaceship"));

    let mut inflater = Inflater::new(&env);
    assert_eq!(inflater.inflate(&spec).unwrap(), None);
    assert_eq!(inflater.diagnostics().len(), 2);
}

#[test]
fn test_leaf_kind_ignores_nested_specifications() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Label", LayoutMarker::new("text"))
        .nest(Specification::layout("Never", LayoutMarker::new("view")));

    let mut inflater = Inflater::new(&env);
    let label = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(label.child_count(), 0);
    assert_eq!(env.constructed_kinds(), vec!["text"]);
    assert!(inflater.diagnostics().is_empty());
}

// Embed

#[test]
fn test_embed_adopts_target_and_applies_own_fields() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let card = Specification::layout("Card", LayoutMarker::new("frame"))
        .field(FieldDecl::binding("tag", "theme", "light"))
        .nest(Specification::layout("CardTitle", LayoutMarker::new("text")));
    let root = Specification::layout("Root", LayoutMarker::new("linear"))
        .field(FieldDecl::variable("theme", "dark"))
        .nest(embed("Header", "Card").field(FieldDecl::plain("backgroundColor", 3)));

    let mut inflater = Inflater::new(&env);
    inflater.register_specification(card);
    let root_object = inflater.inflate(&root).unwrap().unwrap();

    let children = root_object.children();
    let header = &children[0];
    assert_eq!(header.kind(), "frame");
    assert_eq!(header.child_count(), 1);
    assert_eq!(header.prop("backgroundColor"), Some(Value::Int(3)));

    let card_frame = inflater.scopes().find_frame("Card").unwrap();
    assert_eq!(card_frame.field("tag"), Some(&Value::from("dark")));

    let scopes = inflater.scopes();
    let (header_id, header_frame) = scopes
        .frames()
        .find(|(_, f)| f.spec_name() == "Header")
        .unwrap();
    assert_eq!(header_frame.object(), Some(header));
    assert_eq!(scopes.find_child(header_id, "Card").as_ref(), Some(header));
    assert!(inflater.diagnostics().is_empty());
}

#[test]
fn test_embed_of_unknown_specification_is_skipped() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let root = Specification::layout("Root", LayoutMarker::new("frame"))
        .nest(embed("Header", "Missing"))
        .nest(Specification::layout("Body", LayoutMarker::new("text")));

    let mut inflater = Inflater::new(&env);
    let root_object = inflater.inflate(&root).unwrap().unwrap();
    assert_eq!(root_object.child_count(), 1);
    assert_eq!(
        inflater.diagnostics(),
        &[InflateError::UnknownSpecification {
            spec: "Header".to_string(),
            name: "Missing".to_string(),
        }]
    );
}

#[test]
fn test_embed_cycle_is_reported() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let looping = Specification::layout("Loop", LayoutMarker::new("frame")).nest(embed("Again", "Loop"));

    let mut inflater = Inflater::new(&env);
    inflater.register_specification(looping);
    let root = inflater.inflate_named("Loop").unwrap().unwrap();

    assert_eq!(root.child_count(), 0);
    assert_eq!(
        inflater.diagnostics(),
        &[InflateError::RecursiveSpecification {
            spec: "Loop".to_string(),
            call_stack: vec!["Loop".to_string(), "Again".to_string(), "Loop".to_string()],
        }]
    );
}

#[test]
fn test_same_target_embedded_twice_is_not_a_cycle() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let root = Specification::layout("Root", LayoutMarker::new("linear"))
        .nest(embed("First", "Card"))
        .nest(embed("Second", "Card"));

    let mut inflater = Inflater::new(&env);
    inflater.register_specification(Specification::layout("Card", LayoutMarker::new("text")));
    let root_object = inflater.inflate(&root).unwrap().unwrap();

    assert_eq!(root_object.child_count(), 2);
    assert!(inflater.diagnostics().is_empty());
}

#[test]
fn test_embed_target_does_not_see_embedding_node_variables() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let target = Specification::layout("Target", LayoutMarker::new("text"))
        .field(FieldDecl::binding("text", "caption", "default"));
    let card = embed("Card", "Target").field(FieldDecl::variable("caption", "from card"));

    let mut inflater = Inflater::new(&env);
    inflater.register_specification(target);
    let object = inflater.inflate(&card).unwrap().unwrap();
    assert_eq!(object.prop("text"), Some(Value::from("default")));

    let warnings = Validator::with_catalog(inflater.catalog()).validate(&card);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, ValidationLevel::Warning);
    assert_eq!(warnings[0].spec, "Target");
    assert!(warnings[0].message.contains("'caption'"));
}

// Resource

#[test]
fn test_resource_is_loaded_and_configured() {
    let mut env = HeadlessEnvironment::with_standard_kinds();
    env.add_resource_kind("main", "linear");
    let spec = Specification::new("Screen")
        .marker(Marker::Resource(ResourceMarker {
            width: Sizing::Fill,
            height: Sizing::Fill,
            ..ResourceMarker::new("R.layout.main")
        }))
        .field(FieldDecl::plain("backgroundColor", 5))
        .nest(Specification::layout("Extra", LayoutMarker::new("text")));

    let screen = inflate(&spec, &env).unwrap().unwrap();
    assert_eq!(screen.kind(), "linear");
    assert_eq!(screen.layout().width, Sizing::Fill);
    assert_eq!(screen.prop("backgroundColor"), Some(Value::Int(5)));
    assert_eq!(screen.child_count(), 1);
}

#[test]
fn test_missing_resource_is_reported() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::new("Screen").marker(Marker::Resource(ResourceMarker::new("R.layout.none")));

    let mut inflater = Inflater::new(&env);
    assert_eq!(inflater.inflate(&spec).unwrap(), None);
    assert!(matches!(
        inflater.diagnostics(),
        [InflateError::Construction { kind, .. }] if kind == "none"
    ));
}

// Adapter

fn adapter_spec(marker: AdapterMarker) -> Specification {
    Specification::new("Rows")
        .marker(Marker::Adapter(marker))
        .field(FieldDecl::plain("label", "rows"))
        .nest(Specification::layout("Row", LayoutMarker::new("text")))
}

#[test]
fn test_adapter_configured_after_asking_by_default() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let mut inflater = Inflater::new(&env);
    let view = inflater
        .inflate(&adapter_spec(AdapterMarker::new("adapter")))
        .unwrap()
        .unwrap();

    assert_eq!(view.kind(), "linear");
    assert_eq!(view.prop("tag"), Some(Value::Null));
    assert_eq!(view.child_count(), 1);
    assert!(inflater.diagnostics().is_empty());
}

#[test]
fn test_adapter_setters_first_shapes_the_object() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let marker = AdapterMarker {
        width: Sizing::Fill,
        ..AdapterMarker::new("adapter").setters_first()
    };
    let view = inflate(&adapter_spec(marker), &env).unwrap().unwrap();

    assert_eq!(view.prop("tag"), Some(Value::from("rows")));
    assert_eq!(view.prop("label"), None);
    assert_eq!(view.layout().width, Sizing::Fill);
}

#[test]
fn test_adapter_without_object_is_reported() {
    let mut env = HeadlessEnvironment::with_standard_kinds();
    env.register_kind(KindDescriptor::new("empty_adapter").method("getView", vec![], |_, _| Ok(Value::Null)));
    let spec = Specification::layout("Root", LayoutMarker::new("frame"))
        .nest(Specification::new("Empty").marker(Marker::Adapter(AdapterMarker::new("empty_adapter"))))
        .nest(Specification::new("Plain").marker(Marker::Adapter(AdapterMarker::new("view"))));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(root.child_count(), 0);

    let diagnostics = inflater.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(&diagnostics[0], InflateError::AdapterProducedNothing { kind, .. } if kind == "empty_adapter"));
    assert!(matches!(&diagnostics[1], InflateError::MethodResolution { method, .. } if method == "getView"));
}

// Invisible

#[test]
fn test_invisible_entity_is_registered_not_attached() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let hooked = Rc::new(RefCell::new(None));
    let sink = hooked.clone();
    let spec = Specification::layout("Root", LayoutMarker::new("frame"))
        .nest(
            invisible("Beep", "sound")
                .field(FieldDecl::plain("source", "beep.wav"))
                .on_layout_complete(move |cx| {
                    *sink.borrow_mut() = cx.object.map(|entity| entity.kind().to_string());
                }),
        )
        .nest(Specification::layout("Label", LayoutMarker::new("text")));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();

    assert_eq!(root.child_count(), 1);
    assert_eq!(*hooked.borrow(), Some("sound".to_string()));

    let root_frame = inflater.scopes().find_frame("Root").unwrap();
    let beep = root_frame.child("Beep").unwrap();
    assert_eq!(beep.prop("created"), Some(Value::Bool(true)));
    assert_eq!(beep.prop("source"), Some(Value::from("beep.wav")));
}

#[test]
fn test_invisible_root_yields_nothing() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let mut inflater = Inflater::new(&env);
    assert_eq!(inflater.inflate(&invisible("Beep", "sound")).unwrap(), None);
    assert!(inflater.diagnostics().is_empty());
    assert!(inflater.scopes().find_frame("Beep").unwrap().object().is_some());
}

// Custom markers

struct SpacerBuilder;

impl Builder for SpacerBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        let size = match spec.primary_marker() {
            Some(Marker::Custom { attributes, .. }) => {
                attributes.get("size").and_then(Value::as_i32).unwrap_or(0)
            }
            _ => 0,
        };
        let layout = LayoutParams {
            width: Sizing::Fixed(size),
            height: Sizing::Fixed(size),
            ..LayoutParams::default()
        };
        let spacer = pass.construct(spec, "view", &layout)?;
        pass.set_object(scope, spacer.clone());
        pass.configure(spec, scope, &spacer);
        pass.complete(spec, scope, Some(&spacer));
        Ok(Some(spacer))
    }
}

fn spacer(size: i32) -> Specification {
    let mut attributes = BTreeMap::new();
    attributes.insert("size".to_string(), Value::Int(size));
    Specification::new("Gap").marker(Marker::Custom {
        name: "Spacer".to_string(),
        attributes,
    })
}

#[test]
fn test_custom_marker_uses_registered_builder() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("linear")).nest(spacer(12));

    let mut inflater = Inflater::new(&env);
    inflater.register_builder("Spacer", Rc::new(|| Box::new(SpacerBuilder) as Box<dyn Builder>));
    let root = inflater.inflate(&spec).unwrap().unwrap();

    let children = root.children();
    let gap = &children[0];
    assert_eq!(gap.layout().width, Sizing::Fixed(12));
}

#[test]
fn test_custom_marker_without_builder() {
    let env = HeadlessEnvironment::with_standard_kinds();
    let spec = Specification::layout("Root", LayoutMarker::new("linear")).nest(spacer(12));

    let mut inflater = Inflater::new(&env);
    let root = inflater.inflate(&spec).unwrap().unwrap();
    assert_eq!(root.child_count(), 0);
    assert_eq!(
        inflater.diagnostics(),
        &[InflateError::BuilderNotFound {
            spec: "Gap".to_string(),
            identifier: "SpacerBuilder".to_string(),
        }]
    );
}
