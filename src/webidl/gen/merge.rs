//! Partial-definition merging.
//!
//! WebIDL allows `partial interface Foo { ... }` fragments that contribute
//! members to a base definition of the same name, possibly declared later
//! in the document. Merging happens once, before any generator runs; the
//! lookup table built here is local to the pass and discarded with it.

use indexmap::IndexMap;

use super::Diagnostic;
use crate::webidl::ast::Definition;

/// Merge partial interface/dictionary/namespace definitions into their
/// bases.
///
/// Single left-to-right pass: the first non-partial sighting of a name wins
/// the table slot (a later duplicate is silently shadowed), partials are
/// collected aside, and every other definition kind passes through
/// untouched. Afterwards each partial's members and extended attributes are
/// appended onto its base; a partial with no base is dropped with a
/// diagnostic.
///
/// Output ordering: merged bases in first-sighting order, then the
/// untouched other-kind definitions in their original relative order. No
/// partials remain in the output, so the pass is idempotent.
pub fn merge(definitions: Vec<Definition>) -> (Vec<Definition>, Vec<Diagnostic>) {
    let mut bases: IndexMap<String, Definition> = IndexMap::new();
    let mut partials: Vec<Definition> = Vec::new();
    let mut others: Vec<Definition> = Vec::new();
    let mut diagnostics = Vec::new();

    for definition in definitions {
        match definition.body() {
            Some(body) if body.partial => partials.push(definition),
            Some(body) => {
                bases.entry(body.name.clone()).or_insert(definition);
            }
            None => others.push(definition),
        }
    }

    for partial in partials {
        let Some(body) = partial.into_body() else {
            continue;
        };
        match bases.get_mut(&body.name) {
            Some(base) => {
                if let Some(base_body) = base.body_mut() {
                    base_body.members.extend(body.members);
                    base_body.ext_attrs.extend(body.ext_attrs);
                }
            }
            None => diagnostics.push(Diagnostic::orphan_partial(&body.name)),
        }
    }

    let mut merged: Vec<Definition> = bases.into_values().collect();
    merged.extend(others);
    (merged, diagnostics)
}
