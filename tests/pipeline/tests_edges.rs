//! Generalization, realization, dependency and association edges.

use rstest::rstest;

use classmodel::{ClassType, TranslateError};

use crate::helpers::dia_fixtures::*;
use crate::helpers::model_assertions::*;

fn animals() -> Vec<String> {
    vec![
        xml_class("O1", "Animal", "", (0.0, 0.0), &[], &[]),
        xml_class("O2", "Dog", "", (10.0, 0.0), &[], &[]),
        xml_class("O3", "Pet", "interface", (20.0, 0.0), &[], &[]),
    ]
}

#[test]
fn test_generalization_points_child_at_parent() {
    let mut objects = animals();
    objects.push(xml_edge("UML - Generalization", "E1", "", "O1", "O2"));
    let model = model_from_objects(&objects);

    let dog = get_entity(&model, "O2");
    assert_eq!(dog.extends_from.as_ref().unwrap().to_string(), "Animal");
    assert!(get_entity(&model, "O1").extends_from.is_none());
}

#[test]
fn test_two_generalizations_fail() {
    let mut objects = animals();
    objects.push(xml_edge("UML - Generalization", "E1", "", "O1", "O2"));
    objects.push(xml_edge("UML - Generalization", "E2", "", "O3", "O2"));
    let err = error_from_objects(&objects);
    assert_eq!(err.to_string(), "Multiple generalizations for entity 'Dog'");
}

#[test]
fn test_edge_to_missing_object_fails() {
    let mut objects = animals();
    objects.push(xml_edge("UML - Generalization", "E1", "", "O9", "O2"));
    let err = error_from_objects(&objects);
    assert!(matches!(err, TranslateError::UnresolvedConnection { .. }));
}

#[test]
fn test_realization_to_missing_object_fails() {
    let mut objects = animals();
    objects.push(xml_edge("UML - Realizes", "E1", "mixin", "O9", "O2"));
    let err = error_from_objects(&objects);
    assert!(matches!(err, TranslateError::UnresolvedConnection { id, .. } if id == "O9"));
}

#[test]
fn test_association_to_missing_object_fails() {
    let mut objects = animals();
    objects.push(xml_association(
        "E1",
        ("owner", "1", true),
        ("pets", "*", true),
        "O2",
        "O9",
    ));
    let err = error_from_objects(&objects);
    assert!(matches!(err, TranslateError::UnresolvedConnection { id, .. } if id == "O9"));
}

#[rstest]
#[case("", 1)]
#[case("mixin", 1)]
#[case("uses", 0)]
fn test_realization_stereotypes(#[case] stereotype: &str, #[case] mixins: usize) {
    let mut objects = animals();
    objects.push(xml_edge("UML - Realizes", "E1", stereotype, "O3", "O2"));
    let model = model_from_objects(&objects);
    assert_eq!(get_entity(&model, "O2").mixins.len(), mixins);
}

#[rstest]
#[case("hasA", true)]
#[case("companionOf", true)]
#[case("", false)]
#[case("calls", false)]
fn test_dependency_stereotypes(#[case] stereotype: &str, #[case] companion: bool) {
    let mut objects = animals();
    objects.push(xml_edge("UML - Dependency", "E1", stereotype, "O1", "O2"));
    let model = model_from_objects(&objects);

    let expected = if companion { ClassType::Object } else { ClassType::Class };
    assert_eq!(get_entity(&model, "O1").class_type, expected);
    assert_eq!(get_entity(&model, "O2").has_companion_object, companion);
}

#[rstest]
#[case("*", "Seq[Line]")]
#[case("0..*", "Seq[Line]")]
#[case("0..1", "Option[Line]")]
#[case("1", "Line")]
#[case("2..5", "Line")]
fn test_association_multiplicity(#[case] multiplicity: &str, #[case] expected: &str) {
    let model = model_from_objects(&[
        xml_class("O1", "Order", "", (0.0, 0.0), &[], &[]),
        xml_class("O2", "Line", "", (10.0, 0.0), &[], &[]),
        xml_association("E1", ("", "", false), ("lines", multiplicity, false), "O1", "O2"),
    ]);
    assert_attribute_type(get_entity(&model, "O1"), "lines", expected);
    assert!(get_entity(&model, "O2").attributes.is_empty());
}

#[test]
fn test_association_declared_type() {
    let model = model_from_objects(&[
        xml_class("O1", "Order", "", (0.0, 0.0), &[], &[]),
        xml_class("O2", "Line", "", (10.0, 0.0), &[], &[]),
        xml_association(
            "E1",
            ("order", "1", false),
            ("byNumber: Map[Int, Line]", "*", false),
            "O1",
            "O2",
        ),
    ]);
    assert_attribute_type(get_entity(&model, "O1"), "byNumber", "Map[Int, Line]");
    assert_attribute_type(get_entity(&model, "O2"), "order", "Order");
}

#[test]
fn test_association_arrow_without_role_fails() {
    let err = error_from_objects(&[
        xml_class("O1", "Order", "", (0.0, 0.0), &[], &[]),
        xml_class("O2", "Line", "", (10.0, 0.0), &[], &[]),
        xml_association("E1", ("", "", false), ("", "*", true), "O1", "O2"),
    ]);
    assert!(matches!(err, TranslateError::EmptyAttributeName { .. }));
}
