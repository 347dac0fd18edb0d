//! Dia XML fixtures for pipeline tests.
//!
//! Full diagrams are kept as constants; the `xml_*` builders produce
//! individual objects for diagrams assembled inside a test.

// Complete diagrams

/// Two packages, a trait realized by a class with a static member, a
/// companion declared through a dependency, and an association.
pub const SHOP_DIAGRAM: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<dia:diagram xmlns:dia="http://www.lysator.liu.se/~alla/dia/">
  <dia:layer name="Background" visible="true" active="true">
    <dia:object type="UML - LargePackage" version="0" id="P0">
      <dia:attribute name="elem_corner"><dia:point val="0,0"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="40"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="30"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#shop#</dia:string></dia:attribute>
    </dia:object>
    <dia:object type="UML - SmallPackage" version="0" id="P1">
      <dia:attribute name="elem_corner"><dia:point val="50,0"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="20"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="20"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#billing#</dia:string></dia:attribute>
    </dia:object>
    <dia:object type="UML - Class" version="0" id="O0">
      <dia:attribute name="elem_corner"><dia:point val="2,2"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="8"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="4"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#Item#</dia:string></dia:attribute>
      <dia:attribute name="stereotype"><dia:string>#trait#</dia:string></dia:attribute>
      <dia:attribute name="attributes">
        <dia:composite type="umlattribute">
          <dia:attribute name="name"><dia:string>#sku#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#String#</dia:string></dia:attribute>
          <dia:attribute name="value"><dia:string>##</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
        </dia:composite>
      </dia:attribute>
      <dia:attribute name="operations">
        <dia:composite type="umloperation">
          <dia:attribute name="name"><dia:string>#price#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#Money#</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
          <dia:attribute name="parameters"/>
        </dia:composite>
      </dia:attribute>
    </dia:object>
    <dia:object type="UML - Class" version="0" id="O1">
      <dia:attribute name="elem_corner"><dia:point val="2,12"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="8"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="4"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#Product#</dia:string></dia:attribute>
      <dia:attribute name="stereotype"><dia:string>#immutable#</dia:string></dia:attribute>
      <dia:attribute name="attributes">
        <dia:composite type="umlattribute">
          <dia:attribute name="name"><dia:string>#sku#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#String#</dia:string></dia:attribute>
          <dia:attribute name="value"><dia:string>##</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
        </dia:composite>
        <dia:composite type="umlattribute">
          <dia:attribute name="name"><dia:string>#&lt;&lt;lazy&gt;&gt; related#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#Seq[Product]#</dia:string></dia:attribute>
          <dia:attribute name="value"><dia:string>#Nil#</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="1"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
        </dia:composite>
        <dia:composite type="umlattribute">
          <dia:attribute name="name"><dia:string>#catalogue#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#Map[String, Product]#</dia:string></dia:attribute>
          <dia:attribute name="value"><dia:string>##</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="true"/></dia:attribute>
        </dia:composite>
      </dia:attribute>
      <dia:attribute name="operations">
        <dia:composite type="umloperation">
          <dia:attribute name="name"><dia:string>#price#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#Money#</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
          <dia:attribute name="parameters"/>
        </dia:composite>
        <dia:composite type="umloperation">
          <dia:attribute name="name"><dia:string>#discounted#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#Money#</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
          <dia:attribute name="parameters">
            <dia:composite type="umlparameter">
              <dia:attribute name="name"><dia:string>#at#</dia:string></dia:attribute>
              <dia:attribute name="type"><dia:string>#Instant#</dia:string></dia:attribute>
              <dia:attribute name="value"><dia:string>#Instant.now()#</dia:string></dia:attribute>
            </dia:composite>
          </dia:attribute>
        </dia:composite>
      </dia:attribute>
    </dia:object>
    <dia:object type="UML - Class" version="0" id="O2">
      <dia:attribute name="elem_corner"><dia:point val="20,12"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="8"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="4"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#Basket#</dia:string></dia:attribute>
      <dia:attribute name="stereotype"><dia:string>#mutable#</dia:string></dia:attribute>
      <dia:attribute name="attributes"/>
      <dia:attribute name="operations"/>
    </dia:object>
    <dia:object type="UML - Class" version="0" id="O3">
      <dia:attribute name="elem_corner"><dia:point val="55,5"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="8"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="4"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#Money#</dia:string></dia:attribute>
      <dia:attribute name="stereotype"><dia:string>##</dia:string></dia:attribute>
      <dia:attribute name="attributes">
        <dia:composite type="umlattribute">
          <dia:attribute name="name"><dia:string>#amount#</dia:string></dia:attribute>
          <dia:attribute name="type"><dia:string>#BigDecimal#</dia:string></dia:attribute>
          <dia:attribute name="value"><dia:string>##</dia:string></dia:attribute>
          <dia:attribute name="visibility"><dia:enum val="0"/></dia:attribute>
          <dia:attribute name="class_scope"><dia:boolean val="false"/></dia:attribute>
        </dia:composite>
      </dia:attribute>
      <dia:attribute name="operations"/>
    </dia:object>
    <dia:object type="UML - Class" version="0" id="O4">
      <dia:attribute name="elem_corner"><dia:point val="55,12"/></dia:attribute>
      <dia:attribute name="elem_width"><dia:real val="8"/></dia:attribute>
      <dia:attribute name="elem_height"><dia:real val="4"/></dia:attribute>
      <dia:attribute name="name"><dia:string>#Money#</dia:string></dia:attribute>
      <dia:attribute name="stereotype"><dia:string>##</dia:string></dia:attribute>
      <dia:attribute name="attributes"/>
      <dia:attribute name="operations"/>
    </dia:object>
    <dia:object type="UML - Realizes" version="1" id="E0">
      <dia:attribute name="stereotype"><dia:string>##</dia:string></dia:attribute>
      <dia:connections>
        <dia:connection handle="0" to="O0" connection="6"/>
        <dia:connection handle="1" to="O1" connection="1"/>
      </dia:connections>
    </dia:object>
    <dia:object type="UML - Dependency" version="1" id="E1">
      <dia:attribute name="stereotype"><dia:string>#companionOf#</dia:string></dia:attribute>
      <dia:connections>
        <dia:connection handle="0" to="O4" connection="6"/>
        <dia:connection handle="1" to="O3" connection="1"/>
      </dia:connections>
    </dia:object>
    <dia:object type="UML - Association" version="2" id="E2">
      <dia:attribute name="name"><dia:string>##</dia:string></dia:attribute>
      <dia:attribute name="role_a"><dia:string>##</dia:string></dia:attribute>
      <dia:attribute name="multipicity_a"><dia:string>##</dia:string></dia:attribute>
      <dia:attribute name="visibility_a"><dia:enum val="0"/></dia:attribute>
      <dia:attribute name="show_arrow_a"><dia:boolean val="false"/></dia:attribute>
      <dia:attribute name="role_b"><dia:string>#&lt;&lt;var&gt;&gt; products#</dia:string></dia:attribute>
      <dia:attribute name="multipicity_b"><dia:string>#*#</dia:string></dia:attribute>
      <dia:attribute name="visibility_b"><dia:enum val="1"/></dia:attribute>
      <dia:attribute name="show_arrow_b"><dia:boolean val="true"/></dia:attribute>
      <dia:connections>
        <dia:connection handle="0" to="O2" connection="4"/>
        <dia:connection handle="1" to="O1" connection="3"/>
      </dia:connections>
    </dia:object>
  </dia:layer>
</dia:diagram>
"##;

/// Import table text used together with [`SHOP_DIAGRAM`].
pub const SHOP_IMPORTS: &str = r#"
# time
import java.time.Instant;
java.util.UUID
"#;

// Builders

/// Wrap objects in a diagram with one layer.
pub fn xml_diagram(objects: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <dia:diagram xmlns:dia=\"http://www.lysator.liu.se/~alla/dia/\">\n\
         <dia:layer name=\"Background\" visible=\"true\">\n{}\n</dia:layer>\n</dia:diagram>\n",
        objects.join("\n")
    )
}

fn xml_string(name: &str, value: &str) -> String {
    let escaped = value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<dia:attribute name=\"{name}\"><dia:string>#{escaped}#</dia:string></dia:attribute>")
}

fn xml_geometry(x: f64, y: f64, w: f64, h: f64) -> String {
    format!(
        "<dia:attribute name=\"elem_corner\"><dia:point val=\"{x},{y}\"/></dia:attribute>\
         <dia:attribute name=\"elem_width\"><dia:real val=\"{w}\"/></dia:attribute>\
         <dia:attribute name=\"elem_height\"><dia:real val=\"{h}\"/></dia:attribute>"
    )
}

/// A large package at `(x, y)` of size `w × h`.
pub fn xml_package(id: &str, name: &str, x: f64, y: f64, w: f64, h: f64) -> String {
    format!(
        "<dia:object type=\"UML - LargePackage\" version=\"0\" id=\"{id}\">{}{}</dia:object>",
        xml_geometry(x, y, w, h),
        xml_string("name", name)
    )
}

/// An instance attribute record: `(name, type)`.
pub fn xml_attribute(name: &str, ty: &str, class_scope: bool) -> String {
    format!(
        "<dia:composite type=\"umlattribute\">{}{}{}\
         <dia:attribute name=\"visibility\"><dia:enum val=\"0\"/></dia:attribute>\
         <dia:attribute name=\"class_scope\"><dia:boolean val=\"{class_scope}\"/></dia:attribute>\
         </dia:composite>",
        xml_string("name", name),
        xml_string("type", ty),
        xml_string("value", "")
    )
}

/// An operation record with `(name, type)` parameters.
pub fn xml_operation(name: &str, ret: &str, params: &[(&str, &str)], class_scope: bool) -> String {
    let params: String = params
        .iter()
        .map(|(n, t)| {
            format!(
                "<dia:composite type=\"umlparameter\">{}{}{}</dia:composite>",
                xml_string("name", n),
                xml_string("type", t),
                xml_string("value", "")
            )
        })
        .collect();
    format!(
        "<dia:composite type=\"umloperation\">{}{}\
         <dia:attribute name=\"visibility\"><dia:enum val=\"0\"/></dia:attribute>\
         <dia:attribute name=\"class_scope\"><dia:boolean val=\"{class_scope}\"/></dia:attribute>\
         <dia:attribute name=\"parameters\">{params}</dia:attribute>\
         </dia:composite>",
        xml_string("name", name),
        xml_string("type", ret)
    )
}

/// A class at `(x, y)` with a 2 × 2 box.
pub fn xml_class(
    id: &str,
    name: &str,
    stereotype: &str,
    (x, y): (f64, f64),
    attributes: &[String],
    operations: &[String],
) -> String {
    format!(
        "<dia:object type=\"UML - Class\" version=\"0\" id=\"{id}\">{}{}{}\
         <dia:attribute name=\"attributes\">{}</dia:attribute>\
         <dia:attribute name=\"operations\">{}</dia:attribute>\
         </dia:object>",
        xml_geometry(x, y, 2.0, 2.0),
        xml_string("name", name),
        xml_string("stereotype", stereotype),
        attributes.concat(),
        operations.concat()
    )
}

/// A one-way edge (`UML - Generalization`, `UML - Realizes`,
/// `UML - Dependency`) attached by handle 0 to `handle0` and handle 1 to
/// `handle1`.
pub fn xml_edge(
    type_name: &str,
    id: &str,
    stereotype: &str,
    handle0: &str,
    handle1: &str,
) -> String {
    format!(
        "<dia:object type=\"{type_name}\" version=\"1\" id=\"{id}\">{}\
         <dia:connections>\
         <dia:connection handle=\"0\" to=\"{handle0}\" connection=\"1\"/>\
         <dia:connection handle=\"1\" to=\"{handle1}\" connection=\"6\"/>\
         </dia:connections></dia:object>",
        xml_string("stereotype", stereotype)
    )
}

/// An association from end `a` (handle 0) to end `b` (handle 1).
/// Each end is `(role, multiplicity, show_arrow)`.
pub fn xml_association(
    id: &str,
    a: (&str, &str, bool),
    b: (&str, &str, bool),
    handle0: &str,
    handle1: &str,
) -> String {
    let end = |suffix: &str, (role, multiplicity, arrow): (&str, &str, bool)| {
        format!(
            "{}{}<dia:attribute name=\"visibility_{suffix}\"><dia:enum val=\"0\"/></dia:attribute>\
             <dia:attribute name=\"show_arrow_{suffix}\"><dia:boolean val=\"{arrow}\"/></dia:attribute>",
            xml_string(&format!("role_{suffix}"), role),
            xml_string(&format!("multipicity_{suffix}"), multiplicity)
        )
    };
    format!(
        "<dia:object type=\"UML - Association\" version=\"2\" id=\"{id}\">{}{}\
         <dia:connections>\
         <dia:connection handle=\"0\" to=\"{handle0}\" connection=\"4\"/>\
         <dia:connection handle=\"1\" to=\"{handle1}\" connection=\"3\"/>\
         </dia:connections></dia:object>",
        end("a", a),
        end("b", b)
    )
}
