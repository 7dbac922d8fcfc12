//! Shared helpers for the canonical textual form of nodes.
//!
//! The rendering is meant for debugging and golden tests. It is stable for
//! identical input but is not guaranteed to be valid source text.

use std::fmt::{self, Display, Formatter};

/// Write `items` separated by `sep`.
pub(crate) fn write_separated<T: Display>(
    f: &mut Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Write `[A, B]`, or nothing when there are no generics.
pub(crate) fn write_generics<T: Display>(f: &mut Formatter<'_>, generics: &[T]) -> fmt::Result {
    if generics.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    write_separated(f, generics, ", ")?;
    f.write_str("]")
}

/// Write a parenthesized, comma separated list.
pub(crate) fn write_parenthesized<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("(")?;
    write_separated(f, items, ", ")?;
    f.write_str(")")
}

/// Write a body as `{ a; b }`, or `{}` when empty.
pub(crate) fn write_body<T: Display>(f: &mut Formatter<'_>, body: &[T]) -> fmt::Result {
    if body.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_separated(f, body, "; ")?;
    f.write_str(" }")
}
