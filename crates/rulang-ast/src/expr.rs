//! Literals, variable references, closures, struct literals and calls.
//!
//! Literal text is kept exactly as written. Integer and float literals are
//! not parsed into numbers: base, precision and overflow are decisions for
//! the consumer.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::decl::{ArgumentDeclaration, ReturnType};
use crate::error::{StructuralError, StructuralResult};
use crate::render::{write_body, write_generics, write_parenthesized, write_separated};
use crate::types::TypeDeclaration;
use crate::{Identifier, Node};

/// Raw text of a literal or identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct LiteralValue {
    pub value: String,
}

impl LiteralValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

macro_rules! literal_wrapper {
    ($(#[$meta:meta])* $name:ident, $open:literal, $close:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
        #[serde(transparent)]
        pub struct $name(pub LiteralValue);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(LiteralValue::new(value))
            }

            /// The text exactly as it was written.
            pub fn value(&self) -> &str {
                &self.0.value
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, concat!($open, "{}", $close), self.0.value)
            }
        }
    };
}

literal_wrapper!(
    /// String literal: `"hello"`
    StringLiteral, "\"", "\""
);
literal_wrapper!(
    /// Integer literal text: `42`, `0x2A`
    IntegerLiteral, "", ""
);
literal_wrapper!(
    /// Floating point literal text: `3.14`, `1e-9`
    FloatingPointLiteral, "", ""
);
literal_wrapper!(
    /// Bare identifier reference: `router`
    VariableLiteral, "", ""
);

impl VariableLiteral {
    pub fn name(&self) -> &str {
        self.value()
    }
}

/// Character literal holding a single code point: `'a'`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct CharacterLiteral {
    pub value: char,
}

impl CharacterLiteral {
    pub fn new(value: char) -> Self {
        Self { value }
    }
}

impl Display for CharacterLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value)
    }
}

/// String with embedded expressions, kept as raw text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct StringInterpolationLiteral {
    pub value: String,
}

impl StringInterpolationLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Display for StringInterpolationLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.value)
    }
}

/// Struct construction: `Person{"Bob", Age: 42}`, `List[int]{}`
///
/// Values are either bare expressions (positional) or
/// `StructFieldLiteral` nodes (named).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct StructLiteral {
    #[serde(rename = "type")]
    pub ty: Identifier,
    pub generics: Vec<TypeDeclaration>,
    pub values: Vec<Node>,
}

impl StructLiteral {
    pub fn new(ty: impl Into<Identifier>, generics: Vec<TypeDeclaration>, values: Vec<Node>) -> Self {
        Self {
            ty: ty.into(),
            generics,
            values,
        }
    }
}

impl Display for StructLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty)?;
        write_generics(f, &self.generics)?;
        f.write_str("{")?;
        write_separated(f, &self.values, ", ")?;
        f.write_str("}")
    }
}

/// Named initializer inside a struct literal: `Age: 42`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct StructFieldLiteral {
    pub field_name: Identifier,
    pub value: Box<Node>,
}

impl StructFieldLiteral {
    pub fn new(field_name: impl Into<Identifier>, value: Node) -> Self {
        Self {
            field_name: field_name.into(),
            value: Box::new(value),
        }
    }
}

impl Display for StructFieldLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_name, self.value)
    }
}

/// Anonymous closure: `func(w http.ResponseWriter) { ... }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct FunctionLiteral {
    pub arguments: Vec<ArgumentDeclaration>,
    pub return_type: ReturnType,
    pub body: Vec<Node>,
}

impl FunctionLiteral {
    pub fn new(arguments: Vec<ArgumentDeclaration>, return_type: ReturnType, body: Vec<Node>) -> Self {
        Self {
            arguments,
            return_type,
            body,
        }
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        write_parenthesized(f, &self.arguments)?;
        self.return_type.write_suffix(f)?;
        f.write_str(" ")?;
        write_body(f, &self.body)
    }
}

/// What a call addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub enum Callee {
    /// Free function, or a variable holding a function: `print(x)`
    Free { function: Identifier },
    /// Method on a receiver variable: `router.Run(":8080")`
    Method {
        variable: Identifier,
        method: Identifier,
    },
    /// Package-qualified function: `http.Default()`
    Qualified {
        package: Identifier,
        function: Identifier,
    },
}

impl Callee {
    /// Name of the function or method being called.
    pub fn name(&self) -> &str {
        match self {
            Callee::Free { function } | Callee::Qualified { function, .. } => function,
            Callee::Method { method, .. } => method,
        }
    }

    pub fn receiver(&self) -> Option<&str> {
        match self {
            Callee::Method { variable, .. } => Some(variable),
            Callee::Free { .. } | Callee::Qualified { .. } => None,
        }
    }

    pub fn package(&self) -> Option<&str> {
        match self {
            Callee::Qualified { package, .. } => Some(package),
            Callee::Free { .. } | Callee::Method { .. } => None,
        }
    }
}

impl Display for Callee {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Free { function } => f.write_str(function),
            Callee::Method { variable, method } => write!(f, "{variable}.{method}"),
            Callee::Qualified { package, function } => write!(f, "{package}::{function}"),
        }
    }
}

/// Function or method call with optional explicit generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct FunctionCall {
    pub callee: Callee,
    pub arguments: Vec<Node>,
    pub generics: Vec<TypeDeclaration>,
}

impl FunctionCall {
    pub fn new(callee: Callee, arguments: Vec<Node>, generics: Vec<TypeDeclaration>) -> Self {
        Self {
            callee,
            arguments,
            generics,
        }
    }

    pub fn free(
        function: impl Into<Identifier>,
        arguments: Vec<Node>,
        generics: Vec<TypeDeclaration>,
    ) -> Self {
        Self::new(
            Callee::Free {
                function: function.into(),
            },
            arguments,
            generics,
        )
    }

    pub fn method(
        variable: impl Into<Identifier>,
        method: impl Into<Identifier>,
        arguments: Vec<Node>,
        generics: Vec<TypeDeclaration>,
    ) -> Self {
        Self::new(
            Callee::Method {
                variable: variable.into(),
                method: method.into(),
            },
            arguments,
            generics,
        )
    }

    pub fn qualified(
        package: impl Into<Identifier>,
        function: impl Into<Identifier>,
        arguments: Vec<Node>,
        generics: Vec<TypeDeclaration>,
    ) -> Self {
        Self::new(
            Callee::Qualified {
                package: package.into(),
                function: function.into(),
            },
            arguments,
            generics,
        )
    }

    /// Build a call from the optional `package`/`variable`/`method` triple a
    /// parser collects.
    ///
    /// - `package` + `method`: qualified call
    /// - `variable` + `method`: method call
    /// - `variable` alone: free call of that name
    pub fn from_parts(
        package: Option<Identifier>,
        variable: Option<Identifier>,
        method: Option<Identifier>,
        arguments: Vec<Node>,
        generics: Vec<TypeDeclaration>,
    ) -> StructuralResult<Self> {
        let callee = match (package, variable, method) {
            (Some(package), None, Some(function)) => Callee::Qualified { package, function },
            (None, Some(variable), Some(method)) => Callee::Method { variable, method },
            (None, Some(function), None) => Callee::Free { function },
            (None, None, Some(method)) => {
                return StructuralError::MethodWithoutReceiver { method }.reject();
            }
            (None, None, None) => return StructuralError::MissingCallee.reject(),
            (package, variable, method) => {
                return StructuralError::AmbiguousCallee {
                    package,
                    variable,
                    method,
                }
                .reject();
            }
        };
        Ok(Self::new(callee, arguments, generics))
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.callee)?;
        write_generics(f, &self.generics)?;
        write_parenthesized(f, &self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_literals_render_verbatim() {
        assert_snapshot!(StringLiteral::new("hello \\n world"), @r#""hello \n world""#);
        assert_snapshot!(IntegerLiteral::new("0x2A"), @"0x2A");
        assert_snapshot!(FloatingPointLiteral::new("1e-9"), @"1e-9");
        assert_snapshot!(CharacterLiteral::new('λ'), @"'λ'");
        assert_snapshot!(StringInterpolationLiteral::new("hi {name}"), @"`hi {name}`");
    }

    #[test]
    fn test_literal_round_trip_by_hand() {
        let s = StringLiteral::new("say \"hi\"");
        let rendered = s.to_string();
        assert_eq!(&rendered[1..rendered.len() - 1], s.value());

        let i = IntegerLiteral::new("007");
        assert_eq!(i.to_string(), "007");

        let c = CharacterLiteral::new('\'');
        let rendered = c.to_string();
        let inner: Vec<char> = rendered.chars().collect();
        assert_eq!(inner[1], c.value);
    }

    #[test]
    fn test_struct_literal() {
        let lit = StructLiteral::new(
            "Person",
            vec![],
            vec![
                StringLiteral::new("Bob").into(),
                StructFieldLiteral::new("Age", IntegerLiteral::new("42").into()).into(),
            ],
        );
        assert_snapshot!(lit, @r#"Person{"Bob", Age: 42}"#);

        let empty = StructLiteral::new("List", vec![TypeDeclaration::named("int")], vec![]);
        assert_snapshot!(empty, @"List[int]{}");
    }

    #[test]
    fn test_call_addressing_modes() {
        let free = FunctionCall::free("print", vec![VariableLiteral::new("x").into()], vec![]);
        assert_snapshot!(free, @"print(x)");

        let method = FunctionCall::method(
            "router",
            "Run",
            vec![StringLiteral::new(":8080").into()],
            vec![],
        );
        assert_eq!(method.callee.receiver(), Some("router"));
        assert_snapshot!(method, @r#"router.Run(":8080")"#);

        let qualified = FunctionCall::qualified("http", "Default", vec![], vec![]);
        assert_eq!(qualified.callee.package(), Some("http"));
        assert_eq!(qualified.callee.name(), "Default");
        assert_snapshot!(qualified, @"http::Default()");

        let generic = FunctionCall::free("make", vec![], vec![TypeDeclaration::named("int")]);
        assert_snapshot!(generic, @"make[int]()");
    }

    #[test]
    fn test_from_parts_requires_receiver_for_methods() {
        let err = FunctionCall::from_parts(None, None, Some("GET".into()), vec![], vec![])
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::MethodWithoutReceiver {
                method: "GET".to_string()
            }
        );

        let ok = FunctionCall::from_parts(
            None,
            Some("router".into()),
            Some("GET".into()),
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(ok, FunctionCall::method("router", "GET", vec![], vec![]));
    }

    #[test]
    fn test_from_parts_other_combinations() {
        let qualified =
            FunctionCall::from_parts(Some("http".into()), None, Some("Default".into()), vec![], vec![])
                .unwrap();
        assert!(matches!(qualified.callee, Callee::Qualified { .. }));

        let free = FunctionCall::from_parts(None, Some("f".into()), None, vec![], vec![]).unwrap();
        assert!(matches!(free.callee, Callee::Free { .. }));

        assert_eq!(
            FunctionCall::from_parts(None, None, None, vec![], vec![]).unwrap_err(),
            StructuralError::MissingCallee
        );
        assert!(matches!(
            FunctionCall::from_parts(Some("p".into()), Some("v".into()), Some("m".into()), vec![], vec![]),
            Err(StructuralError::AmbiguousCallee { .. })
        ));
        assert!(matches!(
            FunctionCall::from_parts(Some("p".into()), None, None, vec![], vec![]),
            Err(StructuralError::AmbiguousCallee { .. })
        ));
    }

    #[test]
    fn test_function_literal() {
        let closure = FunctionLiteral::new(
            vec![ArgumentDeclaration::new("w", TypeDeclaration::named("Writer"))],
            ReturnType::none(),
            vec![FunctionCall::method("w", "String", vec![IntegerLiteral::new("200").into()], vec![]).into()],
        );
        assert_snapshot!(closure, @"func(w Writer) { w.String(200) }");
    }
}
