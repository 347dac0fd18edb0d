//! Companion marking and synthesis.

use classmodel::{ClassType, TranslateError};

use crate::helpers::dia_fixtures::*;
use crate::helpers::model_assertions::*;

#[test]
fn test_static_operation_split_into_companion() {
    let model = model_from_objects(&[
        xml_class(
            "O1",
            "Counter",
            "",
            (0.0, 0.0),
            &[xml_attribute("value", "Int", false)],
            &[
                xml_operation("next", "Int", &[], false),
                xml_operation("zero", "Counter", &[], true),
            ],
        ),
        xml_class("O2", "Other", "", (10.0, 0.0), &[], &[]),
    ]);

    assert_entity_order(&model, &["O1", "O1_companion", "O2"]);
    let counter = get_entity(&model, "O1");
    assert!(counter.has_companion_object);
    assert_eq!(counter.operations.len(), 1);
    assert_eq!(counter.attributes.len(), 1);

    let companion = get_entity(&model, "O1_companion");
    assert_eq!(companion.class_type, ClassType::Object);
    assert_eq!(companion.reference, counter.reference);
    assert!(companion.attributes.is_empty());
    assert_eq!(companion.operations[0].name, "zero");
}

#[test]
fn test_drawn_object_marks_class() {
    let model = model_from_objects(&[
        xml_class("O1", "Config", "", (0.0, 0.0), &[], &[]),
        xml_class("O2", "Config", "object", (10.0, 0.0), &[], &[]),
    ]);
    assert!(get_entity(&model, "O1").has_companion_object);
    assert!(!get_entity(&model, "O2").has_companion_object);
    assert_eq!(model.entity_count(), 2);
}

#[test]
fn test_static_members_with_drawn_object_fail() {
    let err = error_from_objects(&[
        xml_class(
            "O1",
            "Config",
            "",
            (0.0, 0.0),
            &[xml_attribute("defaults", "Config", true)],
            &[],
        ),
        xml_class("O2", "Config", "singleton", (10.0, 0.0), &[], &[]),
    ]);
    assert!(matches!(err, TranslateError::CompanionExists { .. }));
}

#[test]
fn test_object_keeps_its_static_members() {
    let model = model_from_objects(&[xml_class(
        "O1",
        "Registry",
        "object",
        (0.0, 0.0),
        &[xml_attribute("count", "Int", true)],
        &[],
    )]);
    assert_entity_order(&model, &["O1"]);
    assert!(get_attribute(get_entity(&model, "O1"), "count").is_class_scope);
}
