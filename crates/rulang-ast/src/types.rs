//! Type references as written in source code.
//!
//! Types are plain values: composing a type (adding generics, wrapping it in
//! an array) always produces a new `TypeDeclaration`.
//!
//! Examples of the canonical form:
//! - `uint`, `string`
//! - `[]string`
//! - `[]List[[]T]`
//! - `func(Error, int)`

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Identifier;
use crate::render::{write_generics, write_parenthesized};

/// The type of a field, argument, return value or channel.
///
/// When `is_func` is set the declaration describes a callable whose
/// parameter types are `arguments`; `name`, `is_array` and `generics` are
/// then ignored. Such combinations are not rejected here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct TypeDeclaration {
    pub is_array: bool,
    pub name: Identifier,
    pub generics: Vec<GenericTypeDeclaration>,
    pub is_func: bool,
    pub arguments: Vec<TypeDeclaration>,
}

impl TypeDeclaration {
    /// Build a type from raw parts without any consistency check.
    pub fn new(
        is_array: bool,
        name: impl Into<Identifier>,
        generics: Vec<GenericTypeDeclaration>,
        is_func: bool,
        arguments: Vec<TypeDeclaration>,
    ) -> Self {
        Self {
            is_array,
            name: name.into(),
            generics,
            is_func,
            arguments,
        }
    }

    /// A plain named type: `int`, `Person`.
    pub fn named(name: impl Into<Identifier>) -> Self {
        Self::new(false, name, Vec::new(), false, Vec::new())
    }

    /// An array of the named type: `[]string`.
    pub fn array_of(name: impl Into<Identifier>) -> Self {
        Self::new(true, name, Vec::new(), false, Vec::new())
    }

    /// A function type over the given parameter types: `func(int, string)`.
    pub fn function(arguments: Vec<TypeDeclaration>) -> Self {
        Self::new(false, Identifier::new(), Vec::new(), true, arguments)
    }

    /// Returns a copy of this type carrying `generics`.
    pub fn with_generics(&self, generics: Vec<GenericTypeDeclaration>) -> Self {
        Self {
            generics,
            ..self.clone()
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.is_func && !self.generics.is_empty()
    }
}

impl Display for TypeDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_func {
            f.write_str("func")?;
            return write_parenthesized(f, &self.arguments);
        }
        if self.is_array {
            f.write_str("[]")?;
        }
        f.write_str(&self.name)?;
        write_generics(f, &self.generics)
    }
}

/// A single generic parameter or argument: `T` or `[]T`.
///
/// The array flag is independent of the enclosing type's, so "array of
/// `List[T]`" and "`List` of array of `T`" stay distinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct GenericTypeDeclaration {
    pub name: Identifier,
    pub is_array: bool,
}

impl GenericTypeDeclaration {
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
        }
    }

    pub fn array_of(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            is_array: true,
        }
    }
}

impl Display for GenericTypeDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_array {
            f.write_str("[]")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_named_and_array() {
        assert_snapshot!(TypeDeclaration::named("uint8"), @"uint8");
        assert_snapshot!(TypeDeclaration::array_of("string"), @"[]string");
    }

    #[test]
    fn test_array_of_generic_array() {
        let ty = TypeDeclaration::array_of("List")
            .with_generics(vec![GenericTypeDeclaration::array_of("T")]);
        assert!(ty.is_array);
        assert!(ty.generics[0].is_array);
        assert_snapshot!(ty, @"[]List[[]T]");
    }

    #[test]
    fn test_generic_nesting_is_unambiguous() {
        let outer = TypeDeclaration::array_of("List")
            .with_generics(vec![GenericTypeDeclaration::new("T")]);
        let inner = TypeDeclaration::named("List")
            .with_generics(vec![GenericTypeDeclaration::array_of("T")]);
        assert_ne!(outer, inner);
        assert_ne!(outer.to_string(), inner.to_string());
    }

    #[test]
    fn test_function_type_ignores_name_and_array() {
        let ty = TypeDeclaration::new(
            true,
            "ignored",
            vec![GenericTypeDeclaration::new("X")],
            true,
            vec![TypeDeclaration::named("T1"), TypeDeclaration::named("T2")],
        );
        assert!(ty.is_func);
        assert!(!ty.is_generic());
        assert_snapshot!(ty, @"func(T1, T2)");
        assert_eq!(
            ty.to_string(),
            TypeDeclaration::function(vec![
                TypeDeclaration::named("T1"),
                TypeDeclaration::named("T2"),
            ])
            .to_string()
        );
    }

    #[test]
    fn test_with_generics_leaves_original_untouched() {
        let base = TypeDeclaration::named("Map");
        let generic = base.with_generics(vec![
            GenericTypeDeclaration::new("K"),
            GenericTypeDeclaration::new("V"),
        ]);
        assert!(base.generics.is_empty());
        assert_snapshot!(generic, @"Map[K, V]");
    }
}
