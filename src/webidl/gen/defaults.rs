//! Default-value materialization.
//!
//! Optional arguments and dictionary members are defaulted at the call site
//! of the foreign declaration, since foreign signatures carry no optional
//! markers. This module turns a default descriptor, or a type-driven
//! fallback when none is declared, into a Rust literal expression. The
//! function is total: every type/default combination has a defined result.

use crate::webidl::ast::{DefaultValue, IdlType, IdlTypeInner};

/// The sentinel expression for an absent value at the foreign boundary.
pub const ABSENT_VALUE: &str = "JsValue::UNDEFINED";

/// Materialize a default literal expression for a value of `ty`.
pub fn materialize(ty: &IdlType, default: Option<&DefaultValue>) -> String {
    if let Some(default) = default {
        return match default {
            DefaultValue::Boolean { value } => value.to_string(),
            // Numeric defaults keep their source spelling verbatim.
            DefaultValue::Number { value } => value.to_string(),
            // The raw source value is quoted without further escaping; string
            // defaults containing quotes or backslashes are a known gap.
            DefaultValue::String { value } => format!("\"{value}\".to_string()"),
            // Empty-sequence and empty-dictionary defaults also land here.
            DefaultValue::Null | DefaultValue::Other => ABSENT_VALUE.to_string(),
        };
    }

    match base_name(ty) {
        Some("boolean") => "false".to_string(),
        Some("DOMString" | "USVString" | "ByteString") => "String::new()".to_string(),
        Some(
            "byte" | "octet" | "short" | "unsigned short" | "long" | "unsigned long" | "long long"
            | "unsigned long long",
        ) => "0".to_string(),
        Some("float" | "unrestricted float" | "double" | "unrestricted double") => {
            "0.0".to_string()
        }
        // Named, union, sequence, and anything unrecognized.
        _ => ABSENT_VALUE.to_string(),
    }
}

fn base_name(ty: &IdlType) -> Option<&str> {
    if ty.union || !ty.generic.is_empty() {
        return None;
    }
    match &ty.inner {
        IdlTypeInner::Name(name) => Some(name),
        IdlTypeInner::Wrapped(inner) => base_name(inner),
        IdlTypeInner::Nested(_) => None,
    }
}
