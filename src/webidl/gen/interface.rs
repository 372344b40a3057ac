//! Interface binding generation.
//!
//! Each interface becomes four declarations: an opaque handle tuple struct,
//! a capability trait (`NameOps`) with one signature per attribute accessor
//! and named operation, an `extern` block with the paired foreign
//! declarations, and a concrete impl delegating every member across the
//! boundary.
//!
//! Foreign declarations carry no optional markers; optionality is resolved
//! at the call site by substituting a materialized default. Where the
//! semantic and foreign types differ, `into_js`/`from_js` conversion calls
//! wrap the value in the appropriate direction.

use super::defaults::{materialize, ABSENT_VALUE};
use super::naming::{rust_ident, to_snake_case};
use super::types::{map_foreign, map_semantic, needs_conversion};
use super::GenError;
use crate::webidl::ast::{Argument, Attribute, DefinitionBody, Member, Operation};

pub fn generate(interface: &DefinitionBody) -> Result<String, GenError> {
    let mut trait_items: Vec<String> = Vec::new();
    let mut foreign_items: Vec<String> = Vec::new();
    let mut impl_items: Vec<String> = Vec::new();

    for member in &interface.members {
        match member {
            Member::Attribute(attr) => {
                generate_attribute(
                    interface,
                    attr,
                    &mut trait_items,
                    &mut foreign_items,
                    &mut impl_items,
                );
            }
            Member::Operation(op) => {
                generate_operation(
                    interface,
                    op,
                    &mut trait_items,
                    &mut foreign_items,
                    &mut impl_items,
                );
            }
            // Constant emission is a documented gap.
            Member::Const(_) => {}
            // Construction happens host-side; constructors are not part of
            // the capability.
            Member::Constructor(_) => {}
            Member::Unsupported => {}
            Member::Field(field) => {
                return Err(GenError::UnexpectedMember {
                    member: "field",
                    name: field.name.clone(),
                });
            }
        }
    }

    let name = &interface.name;
    let mut out = String::new();
    out.push_str(&format!("// ---- interface {name} ----\n\n"));
    out.push_str(&format!("pub struct {name}(pub JsValue);\n\n"));

    if trait_items.is_empty() {
        out.push_str(&format!("pub trait {name}Ops {{}}\n"));
    } else {
        out.push_str(&format!("pub trait {name}Ops {{\n"));
        for item in &trait_items {
            out.push_str(&format!("    {item};\n"));
        }
        out.push_str("}\n");
    }

    if !foreign_items.is_empty() {
        out.push_str("\nextern \"C\" {\n");
        for item in &foreign_items {
            out.push_str(item);
        }
        out.push_str("}\n");
    }

    out.push('\n');
    if impl_items.is_empty() {
        out.push_str(&format!("impl {name}Ops for {name} {{}}\n"));
    } else {
        out.push_str(&format!("impl {name}Ops for {name} {{\n"));
        out.push_str(&impl_items.join("\n"));
        out.push_str("}\n");
    }

    Ok(out)
}

fn generate_attribute(
    interface: &DefinitionBody,
    attr: &Attribute,
    trait_items: &mut Vec<String>,
    foreign_items: &mut Vec<String>,
    impl_items: &mut Vec<String>,
) {
    let iface = &interface.name;
    let iface_snake = to_snake_case(iface);
    let attr_snake = to_snake_case(&attr.name);
    let getter = rust_ident(&attr.name);
    let sem = map_semantic(&attr.idl_type);
    let frn = map_foreign(&attr.idl_type);
    let convert = needs_conversion(&attr.idl_type);

    let foreign_get = format!("{iface_snake}_get_{attr_snake}");
    trait_items.push(format!("fn {getter}(&self) -> {sem}"));
    foreign_items.push(format!(
        "    #[link_name = \"{iface}.{orig}\"]\n    fn {foreign_get}(target: &{iface}) -> {frn};\n",
        orig = attr.name
    ));
    let call = format!("unsafe {{ {foreign_get}(self) }}");
    let body = if convert {
        format!("from_js({call})")
    } else {
        call
    };
    impl_items.push(format!(
        "    fn {getter}(&self) -> {sem} {{\n        {body}\n    }}\n"
    ));

    if !attr.readonly {
        let setter = format!("set_{attr_snake}");
        let foreign_set = format!("{iface_snake}_set_{attr_snake}");
        trait_items.push(format!("fn {setter}(&self, value: {sem})"));
        foreign_items.push(format!(
            "    #[link_name = \"{iface}.set_{orig}\"]\n    fn {foreign_set}(target: &{iface}, value: {frn});\n",
            orig = attr.name
        ));
        let value = if convert { "into_js(value)" } else { "value" };
        impl_items.push(format!(
            "    fn {setter}(&self, value: {sem}) {{\n        unsafe {{ {foreign_set}(self, {value}) }}\n    }}\n"
        ));
    }
}

fn generate_operation(
    interface: &DefinitionBody,
    op: &Operation,
    trait_items: &mut Vec<String>,
    foreign_items: &mut Vec<String>,
    impl_items: &mut Vec<String>,
) {
    // Special operations (getters, stringifiers, ...) carry no name.
    let Some(op_name) = op.name.as_deref().filter(|n| !n.is_empty()) else {
        return;
    };

    let iface = &interface.name;
    let iface_snake = to_snake_case(iface);
    let method = rust_ident(op_name);
    let foreign_fn = format!("{iface_snake}_{}", to_snake_case(op_name));

    let sem_ret = op
        .idl_type
        .as_ref()
        .map(map_semantic)
        .unwrap_or_else(|| "()".to_string());
    let frn_ret = op
        .idl_type
        .as_ref()
        .map(map_foreign)
        .unwrap_or_else(|| "()".to_string());
    let ret_convert = op.idl_type.as_ref().is_some_and(needs_conversion);

    let mut trait_params = String::from("&self");
    let mut foreign_params = format!("target: &{iface}");
    let mut call_args = String::from("self");
    for arg in &op.arguments {
        let ident = rust_ident(&arg.name);
        let sem = map_semantic(&arg.idl_type);
        let frn = map_foreign(&arg.idl_type);
        if arg.optional {
            trait_params.push_str(&format!(", {ident}: Option<{sem}>"));
        } else {
            trait_params.push_str(&format!(", {ident}: {sem}"));
        }
        foreign_params.push_str(&format!(", {ident}: {frn}"));
        call_args.push_str(&format!(", {}", boundary_expr(&ident, arg)));
    }

    let trait_ret = return_suffix(&sem_ret);
    let foreign_ret = return_suffix(&frn_ret);
    trait_items.push(format!("fn {method}({trait_params}){trait_ret}"));
    foreign_items.push(format!(
        "    #[link_name = \"{iface}.{op_name}\"]\n    fn {foreign_fn}({foreign_params}){foreign_ret};\n"
    ));

    let call = format!("unsafe {{ {foreign_fn}({call_args}) }}");
    let body = if ret_convert {
        format!("from_js({call})")
    } else {
        call
    };
    impl_items.push(format!(
        "    fn {method}({trait_params}){trait_ret} {{\n        {body}\n    }}\n"
    ));
}

/// The call-site expression that carries one argument across the boundary,
/// applying conversion and default substitution as needed.
fn boundary_expr(ident: &str, arg: &Argument) -> String {
    match (needs_conversion(&arg.idl_type), arg.optional) {
        (true, true) => format!("{ident}.map(into_js).unwrap_or({ABSENT_VALUE})"),
        (true, false) => format!("into_js({ident})"),
        (false, true) => format!(
            "{ident}.unwrap_or({})",
            materialize(&arg.idl_type, arg.default.as_ref())
        ),
        (false, false) => ident.to_string(),
    }
}

fn return_suffix(ty: &str) -> String {
    if ty == "()" {
        String::new()
    } else {
        format!(" -> {ty}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::webidl::ast::{parse_ast, Definition};

    fn generate_one(json: &str) -> String {
        let defs = parse_ast(json).unwrap();
        let Definition::Interface(body) = &defs[0] else {
            panic!("expected interface");
        };
        generate(body).unwrap()
    }

    const EVENT_TARGET: &str = r#"[{
        "type": "interface",
        "name": "EventTarget",
        "members": [
            {"type": "attribute", "name": "enabled",
             "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "boolean"},
             "readonly": false},
            {"type": "operation", "name": "dispatch",
             "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "boolean"},
             "arguments": [
                {"name": "event",
                 "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "Event"},
                 "optional": false}
             ]}
        ]
    }]"#;

    #[test]
    fn test_event_target_scenario() {
        let code = generate_one(EVENT_TARGET);

        assert!(code.contains("pub struct EventTarget(pub JsValue);"));
        assert!(code.contains("pub trait EventTargetOps {"));
        assert!(code.contains("    fn enabled(&self) -> bool;"));
        assert!(code.contains("    fn set_enabled(&self, value: bool);"));
        assert!(code.contains("    fn dispatch(&self, event: Event) -> bool;"));

        // One foreign declaration per accessor and operation.
        assert!(code.contains("#[link_name = \"EventTarget.enabled\"]"));
        assert!(code.contains("fn event_target_get_enabled(target: &EventTarget) -> bool;"));
        assert!(code.contains("#[link_name = \"EventTarget.set_enabled\"]"));
        assert!(code.contains("fn event_target_set_enabled(target: &EventTarget, value: bool);"));
        assert!(code.contains("#[link_name = \"EventTarget.dispatch\"]"));
        assert!(
            code.contains("fn event_target_dispatch(target: &EventTarget, event: Event) -> bool;")
        );

        // Concrete implementation wires all four together.
        assert!(code.contains("impl EventTargetOps for EventTarget {"));
        assert!(code.contains("unsafe { event_target_get_enabled(self) }"));
        assert!(code.contains("unsafe { event_target_set_enabled(self, value) }"));
        assert!(code.contains("unsafe { event_target_dispatch(self, event) }"));
    }

    #[test]
    fn test_readonly_attribute_has_no_setter() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "Node",
                "members": [
                    {"type": "attribute", "name": "nodeName",
                     "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "DOMString"},
                     "readonly": true}
                ]
            }]"#,
        );
        assert!(code.contains("fn node_name(&self) -> String;"));
        assert!(!code.contains("set_node_name"));
    }

    #[test]
    fn test_camel_case_operation_keeps_original_link_target() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "EventTarget",
                "members": [
                    {"type": "operation", "name": "addEventListener", "arguments": [
                        {"name": "type",
                         "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "DOMString"},
                         "optional": false}
                    ]}
                ]
            }]"#,
        );
        // Normalized method name, original name in the binding target.
        assert!(code.contains("fn add_event_listener(&self, type_: String);"));
        assert!(code.contains("#[link_name = \"EventTarget.addEventListener\"]"));
        assert!(code.contains("fn event_target_add_event_listener(target: &EventTarget, type_: String);"));
    }

    #[test]
    fn test_optional_argument_defaulted_at_call_site() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "Element",
                "members": [
                    {"type": "operation", "name": "scroll", "arguments": [
                        {"name": "smooth",
                         "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "boolean"},
                         "optional": true,
                         "default": {"type": "boolean", "value": true}}
                    ]}
                ]
            }]"#,
        );
        assert!(code.contains("fn scroll(&self, smooth: Option<bool>);"));
        // The foreign declaration is not optional; the default lands in the impl.
        assert!(code.contains("fn element_scroll(target: &Element, smooth: bool);"));
        assert!(code.contains("unsafe { element_scroll(self, smooth.unwrap_or(true)) }"));
    }

    #[test]
    fn test_sequence_return_is_converted_on_the_way_back() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "Node",
                "members": [
                    {"type": "operation", "name": "childNames",
                     "idlType": {"generic": "sequence", "nullable": false, "union": false,
                                 "idlType": [{"generic": "", "nullable": false, "union": false,
                                              "idlType": "DOMString"}]},
                     "arguments": []}
                ]
            }]"#,
        );
        assert!(code.contains("fn child_names(&self) -> Vec<String>;"));
        assert!(code.contains("fn node_child_names(target: &Node) -> JsValue;"));
        assert!(code.contains("from_js(unsafe { node_child_names(self) })"));
    }

    #[test]
    fn test_sequence_argument_is_converted_on_the_way_in() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "Observer",
                "members": [
                    {"type": "operation", "name": "observe", "arguments": [
                        {"name": "targets",
                         "idlType": {"generic": "sequence", "nullable": false, "union": false,
                                     "idlType": [{"generic": "", "nullable": false, "union": false,
                                                  "idlType": "Node"}]},
                         "optional": false},
                        {"name": "extra",
                         "idlType": {"generic": "sequence", "nullable": false, "union": false,
                                     "idlType": [{"generic": "", "nullable": false, "union": false,
                                                  "idlType": "Node"}]},
                         "optional": true}
                    ]}
                ]
            }]"#,
        );
        assert!(code.contains("fn observe(&self, targets: Vec<Node>, extra: Option<Vec<Node>>);"));
        assert!(code.contains("into_js(targets)"));
        assert!(code.contains("extra.map(into_js).unwrap_or(JsValue::UNDEFINED)"));
    }

    #[test]
    fn test_constants_and_special_operations_are_skipped() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "Node",
                "members": [
                    {"type": "const", "name": "ELEMENT_NODE"},
                    {"type": "operation", "name": null, "arguments": []},
                    {"type": "constructor", "arguments": []},
                    {"type": "attribute", "name": "nodeType",
                     "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "unsigned short"},
                     "readonly": true}
                ]
            }]"#,
        );
        assert!(!code.contains("ELEMENT_NODE"));
        assert!(code.contains("fn node_type(&self) -> u16;"));
        // Exactly one foreign declaration emitted.
        assert_eq!(code.matches("#[link_name").count(), 1);
    }

    #[test]
    fn test_void_operation_has_no_return_arrow() {
        let code = generate_one(
            r#"[{
                "type": "interface", "name": "AbortController",
                "members": [
                    {"type": "operation", "name": "abort", "arguments": []}
                ]
            }]"#,
        );
        assert!(code.contains("fn abort(&self);"));
        assert!(code.contains("fn abort_controller_abort(target: &AbortController);"));
    }

    #[test]
    fn test_field_member_is_an_error() {
        let defs = parse_ast(
            r#"[{
                "type": "interface", "name": "Broken",
                "members": [
                    {"type": "field", "name": "oops",
                     "idlType": {"generic": "", "nullable": false, "union": false, "idlType": "boolean"}}
                ]
            }]"#,
        )
        .unwrap();
        let Definition::Interface(body) = &defs[0] else {
            panic!("expected interface");
        };
        let err = generate(body).unwrap_err();
        assert!(err.to_string().contains("field"));
    }
}
