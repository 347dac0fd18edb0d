//! Model assertion helpers for pipeline tests.

use classmodel::{Attribute, ClassType, Entity, Model, Operation, TranslateError, Translator};

use crate::helpers::dia_fixtures::xml_diagram;

/// Translate Dia XML with no imports, panicking on failure.
pub fn model_from_xml(xml: &str) -> Model {
    Translator::new()
        .translate_str(xml)
        .unwrap_or_else(|e| panic!("Expected translation to succeed, got: {e}"))
}

/// Translate a diagram assembled from objects.
pub fn model_from_objects(objects: &[String]) -> Model {
    model_from_xml(&xml_diagram(objects))
}

/// Translate a diagram assembled from objects and return the error.
pub fn error_from_objects(objects: &[String]) -> TranslateError {
    match Translator::new().translate_str(&xml_diagram(objects)) {
        Ok(model) => panic!(
            "Expected translation to fail, got {} entities",
            model.entity_count()
        ),
        Err(e) => e,
    }
}

/// Assert an entity exists and return it.
pub fn get_entity<'a>(model: &'a Model, id: &str) -> &'a Entity {
    model
        .entity(id)
        .unwrap_or_else(|| panic!("Expected entity '{}' to exist", id))
}

/// Find an attribute by name.
pub fn get_attribute<'a>(entity: &'a Entity, name: &str) -> &'a Attribute {
    entity
        .attributes
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| {
            panic!(
                "Expected attribute '{}' on '{}', found: {:?}",
                name,
                entity.reference,
                entity.attributes.iter().map(|a| &a.name).collect::<Vec<_>>()
            )
        })
}

/// Find an operation by name.
pub fn get_operation<'a>(entity: &'a Entity, name: &str) -> &'a Operation {
    entity
        .operations
        .iter()
        .find(|o| o.name == name)
        .unwrap_or_else(|| panic!("Expected operation '{}' on '{}'", name, entity.reference))
}

/// Assert the rendered type of an attribute.
pub fn assert_attribute_type(entity: &Entity, name: &str, expected: &str) {
    let attribute = get_attribute(entity, name);
    let rendered = attribute
        .type_ref
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    assert_eq!(
        rendered, expected,
        "Attribute '{}' on '{}' has type '{}', expected '{}'",
        name, entity.reference, rendered, expected
    );
}

/// Assert the package and kind of an entity.
pub fn assert_entity(model: &Model, id: &str, package: &str, class_type: ClassType) {
    let entity = get_entity(model, id);
    assert_eq!(
        entity.package(),
        package,
        "Entity '{}' is in package '{}', expected '{}'",
        id,
        entity.package(),
        package
    );
    assert_eq!(
        entity.class_type, class_type,
        "Entity '{}' has kind {:?}, expected {:?}",
        id, entity.class_type, class_type
    );
}

/// Assert the entity ids in model order.
pub fn assert_entity_order(model: &Model, expected: &[&str]) {
    let ids: Vec<&str> = model.entities().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, expected, "Unexpected entity order");
}
