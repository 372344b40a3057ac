//! Dictionary binding generation.
//!
//! Each dictionary becomes an opaque handle type, a foreign constructor
//! taking one foreign-mapped parameter per member, a public smart
//! constructor with optional parameters and materialized defaults, and a
//! default-factory declaration producing an empty dictionary.

use super::defaults::{materialize, ABSENT_VALUE};
use super::naming::rust_ident;
use super::types::{map_foreign, map_semantic, needs_conversion};
use super::GenError;
use crate::webidl::ast::{DefinitionBody, Field, Member};

pub fn generate(dictionary: &DefinitionBody) -> Result<String, GenError> {
    let mut fields: Vec<&Field> = Vec::new();
    for member in &dictionary.members {
        match member {
            Member::Field(field) => fields.push(field),
            Member::Unsupported => {}
            Member::Attribute(attr) => {
                return Err(GenError::UnexpectedMember {
                    member: "attribute",
                    name: attr.name.clone(),
                });
            }
            Member::Operation(op) => {
                return Err(GenError::UnexpectedMember {
                    member: "operation",
                    name: op.name.clone().unwrap_or_default(),
                });
            }
            Member::Const(constant) => {
                return Err(GenError::UnexpectedMember {
                    member: "const",
                    name: constant.name.clone(),
                });
            }
            Member::Constructor(_) => {
                return Err(GenError::UnexpectedMember {
                    member: "constructor",
                    name: dictionary.name.clone(),
                });
            }
        }
    }

    let name = &dictionary.name;
    let ctor = rust_ident(name);
    let foreign_ctor = format!("{ctor}_constructor");
    let foreign_empty = format!("{ctor}_empty");

    // Parameter lists in member declaration order.
    let mut foreign_params: Vec<String> = Vec::new();
    let mut public_params: Vec<String> = Vec::new();
    let mut forwards: Vec<String> = Vec::new();
    for field in &fields {
        let ident = rust_ident(&field.name);
        let sem = map_semantic(&field.idl_type);
        let frn = map_foreign(&field.idl_type);
        foreign_params.push(format!("{ident}: {frn}"));
        if field.required {
            public_params.push(format!("{ident}: {sem}"));
            forwards.push(if needs_conversion(&field.idl_type) {
                format!("into_js({ident})")
            } else {
                ident
            });
        } else {
            public_params.push(format!("{ident}: Option<{sem}>"));
            forwards.push(if needs_conversion(&field.idl_type) {
                format!("{ident}.map(into_js).unwrap_or({ABSENT_VALUE})")
            } else {
                format!(
                    "{ident}.unwrap_or({})",
                    materialize(&field.idl_type, field.default.as_ref())
                )
            });
        }
    }

    let mut out = String::new();
    out.push_str(&format!("// ---- dictionary {name} ----\n\n"));
    out.push_str(&format!("pub struct {name}(pub JsValue);\n\n"));

    out.push_str("extern \"C\" {\n");
    out.push_str(&format!("    #[link_name = \"{name}.constructor\"]\n"));
    out.push_str(&format!(
        "    fn {foreign_ctor}({}) -> {name};\n",
        foreign_params.join(", ")
    ));
    out.push_str("}\n\n");

    out.push_str(&format!(
        "pub fn {ctor}({}) -> {name} {{\n",
        public_params.join(", ")
    ));
    out.push_str(&format!(
        "    unsafe {{ {foreign_ctor}({}) }}\n",
        forwards.join(", ")
    ));
    out.push_str("}\n\n");

    out.push_str("extern \"C\" {\n");
    out.push_str("    #[link_name = \"dictionary.empty\"]\n");
    out.push_str(&format!("    fn {foreign_empty}() -> {name};\n"));
    out.push_str("}\n");

    Ok(out)
}
