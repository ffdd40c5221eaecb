//! Resolve user-typed references to entities
//!
//! A reference matches, in order of preference: an exact id, a unique id
//! prefix, or a name (ignoring case). The first kind that matches anything
//! decides; more than one match of that kind is ambiguous.

/// Reference resolution error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing matched
    #[error("no {kind} matches '{reference}'")]
    NotFound { kind: &'static str, reference: String },

    /// Several entities matched
    #[error("'{reference}' matches {count} {kind}s; use a longer id")]
    Ambiguous {
        kind: &'static str,
        reference: String,
        count: usize,
    },
}

/// Find the single item `reference` points at
pub(crate) fn resolve<'a, T, I, F, G>(
    kind: &'static str,
    reference: &str,
    items: I,
    id: F,
    name: G,
) -> Result<&'a T, ResolveError>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &str,
    G: Fn(&T) -> &str,
{
    let reference = reference.trim();
    let items: Vec<&'a T> = items.into_iter().collect();

    if let Some(exact) = items.iter().find(|t| id(t) == reference) {
        return Ok(*exact);
    }

    let by_prefix: Vec<&'a T> = if reference.is_empty() {
        Vec::new()
    } else {
        items
            .iter()
            .copied()
            .filter(|t| id(t).starts_with(reference))
            .collect()
    };
    let lowered = reference.to_lowercase();
    let by_name: Vec<&'a T> = items
        .iter()
        .copied()
        .filter(|t| name(t).to_lowercase() == lowered)
        .collect();

    for found in [by_prefix, by_name] {
        match found.as_slice() {
            [] => {}
            [one] => return Ok(*one),
            many => {
                return Err(ResolveError::Ambiguous {
                    kind,
                    reference: reference.to_string(),
                    count: many.len(),
                })
            }
        }
    }

    Err(ResolveError::NotFound {
        kind,
        reference: reference.to_string(),
    })
}
