//! WebIDL AST structs for serde deserialization.
//!
//! This module defines a minimal subset of the JSON AST emitted by the
//! `webidl2.js` grammar parser, enough to generate Rust bindings for
//! interfaces and dictionaries. Unknown JSON fields are ignored; unknown
//! definition and member kinds deserialize to explicit `Unsupported`
//! variants so they can be skipped rather than rejected.

// Allow unused fields that are part of the webidl2.js AST for completeness.
#![allow(dead_code)]

use serde::Deserialize;
use std::fmt;

/// A top-level WebIDL definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Definition {
    #[serde(rename = "interface")]
    Interface(DefinitionBody),
    #[serde(rename = "dictionary")]
    Dictionary(DefinitionBody),
    #[serde(rename = "namespace")]
    Namespace(DefinitionBody),
    #[serde(rename = "enum")]
    Enum(NamedDefinition),
    #[serde(rename = "callback")]
    Callback(NamedDefinition),
    #[serde(rename = "typedef")]
    Typedef(NamedDefinition),
    #[serde(other)]
    Unsupported,
}

impl Definition {
    /// The definition's name, if the variant carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Interface(body)
            | Definition::Dictionary(body)
            | Definition::Namespace(body) => Some(&body.name),
            Definition::Enum(named) | Definition::Callback(named) | Definition::Typedef(named) => {
                Some(&named.name)
            }
            Definition::Unsupported => None,
        }
    }

    /// Human-readable kind label, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Definition::Interface(_) => "interface",
            Definition::Dictionary(_) => "dictionary",
            Definition::Namespace(_) => "namespace",
            Definition::Enum(_) => "enum",
            Definition::Callback(_) => "callback",
            Definition::Typedef(_) => "typedef",
            Definition::Unsupported => "unsupported",
        }
    }

    /// The member-carrying body for interface, dictionary, and namespace
    /// definitions.
    pub fn body(&self) -> Option<&DefinitionBody> {
        match self {
            Definition::Interface(body)
            | Definition::Dictionary(body)
            | Definition::Namespace(body) => Some(body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut DefinitionBody> {
        match self {
            Definition::Interface(body)
            | Definition::Dictionary(body)
            | Definition::Namespace(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<DefinitionBody> {
        match self {
            Definition::Interface(body)
            | Definition::Dictionary(body)
            | Definition::Namespace(body) => Some(body),
            _ => None,
        }
    }

    /// Whether this is a `partial` interface, dictionary, or namespace.
    pub fn is_partial(&self) -> bool {
        self.body().is_some_and(|body| body.partial)
    }
}

/// Shared body of member-carrying definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionBody {
    pub name: String,
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
}

/// Definitions that are passed through untouched (enum, callback, typedef).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedDefinition {
    pub name: String,
}

/// An extended attribute such as `[Exposed=Window]`. Only the name is
/// retained; the right-hand side is not interpreted by generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedAttribute {
    pub name: String,
}

/// A member of an interface, dictionary, or namespace.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Member {
    #[serde(rename = "attribute")]
    Attribute(Attribute),
    #[serde(rename = "operation")]
    Operation(Operation),
    #[serde(rename = "const")]
    Const(Constant),
    #[serde(rename = "constructor")]
    Constructor(Constructor),
    #[serde(rename = "field")]
    Field(Field),
    #[serde(other)]
    Unsupported,
}

/// An interface attribute: `readonly attribute DOMString href;`
#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    #[serde(default)]
    pub readonly: bool,
}

/// An interface operation. Special operations (getters, setters,
/// stringifiers) carry no name and are skipped by generation.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: Option<String>,
    /// Return type; absent means void.
    #[serde(default, rename = "idlType")]
    pub idl_type: Option<IdlType>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

/// A constant member. Recognized so it can be skipped explicitly; constant
/// emission is a documented gap.
#[derive(Debug, Clone, Deserialize)]
pub struct Constant {
    pub name: String,
}

/// A constructor member. Excluded from capability generation.
#[derive(Debug, Clone, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

/// A dictionary member: `boolean deep = false;`
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
}

/// An operation or constructor argument.
#[derive(Debug, Clone, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    /// Parsed but not generated; variadic arguments are a pass-through
    /// limitation.
    #[serde(default)]
    pub variadic: bool,
}

/// A (possibly nested) IDL type descriptor.
///
/// Exactly one of the inner shapes applies at each nesting level: a base
/// name, union members, or a generic wrapping. Nullability is orthogonal
/// and may wrap any shape.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlType {
    /// `""` for plain types, otherwise the generic name (`sequence`,
    /// `Promise`, `record`, `FrozenArray`, ...).
    #[serde(default)]
    pub generic: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub union: bool,
    #[serde(rename = "idlType")]
    pub inner: IdlTypeInner,
}

/// The payload of an `IdlType`: a base-name string, or nested types for
/// unions and generic arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlTypeInner {
    Name(String),
    Nested(Vec<IdlType>),
    Wrapped(Box<IdlType>),
}

impl IdlType {
    /// Build a plain named type, used by tests and internal synthesis.
    pub fn named(name: &str) -> Self {
        IdlType {
            generic: String::new(),
            nullable: false,
            union: false,
            inner: IdlTypeInner::Name(name.to_string()),
        }
    }

    /// The element type of a generic wrapping, when one is present.
    pub fn element_type(&self) -> Option<&IdlType> {
        match &self.inner {
            IdlTypeInner::Nested(types) => types.first(),
            IdlTypeInner::Wrapped(inner) => Some(inner),
            IdlTypeInner::Name(_) => None,
        }
    }
}

/// A default value descriptor attached to a dictionary member or optional
/// argument. Shapes other than the four literal kinds (empty sequence,
/// empty dictionary) fall back to the absent sentinel during
/// materialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum DefaultValue {
    #[serde(rename = "boolean")]
    Boolean { value: bool },
    #[serde(rename = "number")]
    Number { value: NumberValue },
    #[serde(rename = "string")]
    String { value: String },
    #[serde(rename = "null")]
    Null,
    #[serde(other)]
    Other,
}

/// webidl2.js serializes numeric defaults as source strings, preserving the
/// exact spelling; plain JSON numbers are accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Text(String),
    Numeric(serde_json::Number),
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Text(text) => f.write_str(text),
            NumberValue::Numeric(number) => write!(f, "{number}"),
        }
    }
}

/// Parse a webidl2.js AST from a JSON string.
pub fn parse_ast(json: &str) -> Result<Vec<Definition>, serde_json::Error> {
    serde_json::from_str(json)
}
