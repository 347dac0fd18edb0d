//! Domain constants: Dia object type names, child names and stereotype tokens.

// ============================================================================
// DIA OBJECT TYPES
// ============================================================================

/// Container kind of top-level diagram objects.
pub const OBJECT_KIND: &str = "object";
/// Container kind of nested records (attributes, operations, parameters).
pub const COMPOSITE_KIND: &str = "composite";

pub const LARGE_PACKAGE: &str = "UML - LargePackage";
pub const SMALL_PACKAGE: &str = "UML - SmallPackage";
pub const CLASS: &str = "UML - Class";
pub const GENERALIZATION: &str = "UML - Generalization";
pub const REALIZATION: &str = "UML - Realizes";
pub const DEPENDENCY: &str = "UML - Dependency";
pub const ASSOCIATION: &str = "UML - Association";

/// Object types that yield a package.
pub const PACKAGE_TYPES: &[&str] = &[LARGE_PACKAGE, SMALL_PACKAGE];

pub const UML_ATTRIBUTE: &str = "umlattribute";
pub const UML_OPERATION: &str = "umloperation";
pub const UML_PARAMETER: &str = "umlparameter";

// ============================================================================
// CHILD NAMES
// ============================================================================

pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const VALUE: &str = "value";
pub const STEREOTYPE: &str = "stereotype";
pub const VISIBILITY: &str = "visibility";
pub const CLASS_SCOPE: &str = "class_scope";
pub const ELEM_CORNER: &str = "elem_corner";
pub const ELEM_WIDTH: &str = "elem_width";
pub const ELEM_HEIGHT: &str = "elem_height";

/// Delimiter wrapped around every Dia string payload.
pub const STRING_SENTINEL: char = '#';

// ============================================================================
// STEREOTYPE TOKENS
// ============================================================================

/// Class stereotype tokens mapping to a trait.
pub const TRAIT_TOKENS: &[&str] = &["interface", "trait"];
/// Class stereotype tokens mapping to an enumeration.
pub const ENUMERATION_TOKENS: &[&str] = &["enum", "enumeration"];
/// Class stereotype tokens mapping to a singleton object.
pub const OBJECT_TOKENS: &[&str] = &["singleton", "object"];

pub const MUTABLE: &str = "mutable";
pub const IMMUTABLE: &str = "immutable";

/// Attribute stereotypes.
pub const VAL: &str = "val";
pub const VAR: &str = "var";
pub const LAZY: &str = "lazy";

/// Realization stereotype marking a mixin rather than a plain implementation.
pub const MIXIN: &str = "mixin";

/// Dependency stereotypes marking a companion relationship.
pub const COMPANION_TOKENS: &[&str] = &["hasA", "companionOf"];

/// Suffix appended to an entity id to form its synthesized companion's id.
pub const COMPANION_ID_SUFFIX: &str = "_companion";
