//! IDL type mapping.
//!
//! Every IDL type is mapped twice: once to the semantic Rust type used in
//! trait signatures, and once to the foreign-safe type used in `extern`
//! declarations. The foreign boundary can only carry primitives and opaque
//! handles, so container shapes collapse to the dynamic-value placeholder
//! there. Both mappings are pure and total.

use crate::webidl::ast::{IdlType, IdlTypeInner};

/// The dynamic-value placeholder used whenever a shape cannot be
/// represented foreign-safely (unions, generic containers, promises).
pub const DYNAMIC_TYPE: &str = "JsValue";

/// Map an IDL type to its semantic Rust type.
///
/// Nullability is stripped: the foreign-call boundary represents absence as
/// a runtime sentinel rather than a typed wrapper, so no `Option` is
/// introduced here. Callers are responsible for runtime null handling.
pub fn map_semantic(ty: &IdlType) -> String {
    if ty.union {
        return DYNAMIC_TYPE.to_string();
    }
    match ty.generic.as_str() {
        "" => map_base(&ty.inner, map_semantic),
        "sequence" => match ty.element_type() {
            Some(element) => format!("Vec<{}>", map_semantic(element)),
            None => DYNAMIC_TYPE.to_string(),
        },
        // Promise and remaining generic containers (record, FrozenArray, ...)
        // have no synchronous semantic representation.
        _ => DYNAMIC_TYPE.to_string(),
    }
}

/// Map an IDL type to its foreign-safe Rust type.
///
/// Sequences collapse to the placeholder regardless of element type:
/// foreign declarations cannot express nested container types.
pub fn map_foreign(ty: &IdlType) -> String {
    if ty.union || !ty.generic.is_empty() {
        return DYNAMIC_TYPE.to_string();
    }
    map_base(&ty.inner, map_foreign)
}

/// Whether a value of this type needs a boundary conversion call when
/// crossing between the semantic and foreign representations.
pub fn needs_conversion(ty: &IdlType) -> bool {
    map_semantic(ty) != map_foreign(ty)
}

fn map_base(inner: &IdlTypeInner, recurse: fn(&IdlType) -> String) -> String {
    match inner {
        IdlTypeInner::Name(name) => match primitive_type(name) {
            Some(mapped) => mapped.to_string(),
            // Interface/dictionary names pass verbatim as opaque handles;
            // unknown names pass verbatim too (forward-reference tolerant).
            None => name.clone(),
        },
        IdlTypeInner::Wrapped(ty) => recurse(ty),
        IdlTypeInner::Nested(_) => DYNAMIC_TYPE.to_string(),
    }
}

/// Fixed primitive lookup table; both mapping modes agree on these.
fn primitive_type(name: &str) -> Option<&'static str> {
    Some(match name {
        "boolean" => "bool",
        "byte" => "i8",
        "octet" => "u8",
        "short" => "i16",
        "unsigned short" => "u16",
        "long" => "i32",
        "unsigned long" => "u32",
        "long long" => "i64",
        "unsigned long long" => "u64",
        "float" | "unrestricted float" => "f32",
        "double" | "unrestricted double" => "f64",
        "DOMString" | "USVString" | "ByteString" => "String",
        "void" | "undefined" => "()",
        "any" | "object" => DYNAMIC_TYPE,
        _ => return None,
    })
}
