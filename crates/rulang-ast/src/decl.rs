//! Declarations: package metadata, type/enum/interface definitions,
//! functions, interface implementations, macros and operator overloads.
//!
//! Declarations refer to each other by name only (`extends`, the type an
//! implementation binds to). Resolving those names is left to later passes,
//! so declarations can appear in any order.
//!
//! Signature and implementation shapes are kept apart (`FunctionSignature`
//! vs `FunctionDefinition`, `InterfaceDefinition` vs
//! `InterfaceImplementation`, `MacroDefinition` vs `MacroImplementation`)
//! so a signature can exist before any body does.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{StructuralError, StructuralResult};
use crate::render::{write_body, write_generics, write_parenthesized, write_separated};
use crate::types::{GenericTypeDeclaration, TypeDeclaration};
use crate::{Identifier, Node};

/// Package name: `package rulang`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct Package {
    pub name: Identifier,
}

impl Package {
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self { name: name.into() }
    }
}

impl Display for Package {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "package {}", self.name)
    }
}

/// Import, optionally aliased: `import "os"`, `import ru "github.com/eliquious/rulang"`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct Import {
    pub alias: Option<Identifier>,
    pub module: String,
}

impl Import {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            alias: None,
            module: module.into(),
        }
    }

    pub fn aliased(alias: impl Into<Identifier>, module: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            module: module.into(),
        }
    }
}

impl Display for Import {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "import {alias} \"{}\"", self.module),
            None => write!(f, "import \"{}\"", self.module),
        }
    }
}

/// Field of a `TypeDefinition`.
///
/// Capitalized fields are public; lowercase fields are visible inside the
/// package only. Visibility is computed once, when the field is built.
/// Decoding ignores any stored `is_public` and derives it from the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
#[serde(from = "FieldDeclarationParts")]
pub struct FieldDeclaration {
    pub name: Identifier,
    pub is_public: bool,
    #[serde(rename = "type")]
    pub ty: TypeDeclaration,
}

#[derive(Deserialize)]
struct FieldDeclarationParts {
    name: Identifier,
    #[serde(rename = "type")]
    ty: TypeDeclaration,
}

impl From<FieldDeclarationParts> for FieldDeclaration {
    fn from(parts: FieldDeclarationParts) -> Self {
        Self::new(parts.name, parts.ty)
    }
}

impl FieldDeclaration {
    pub fn new(name: impl Into<Identifier>, ty: TypeDeclaration) -> Self {
        let name = name.into();
        let is_public = name.chars().next().is_some_and(char::is_uppercase);
        Self {
            name,
            is_public,
            ty,
        }
    }
}

impl Display for FieldDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// User-defined struct type.
///
/// ```text
/// type List [T] struct
///     Array []T
/// end
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
#[serde(try_from = "TypeDefinitionParts")]
pub struct TypeDefinition {
    name: Identifier,
    extends: Vec<Identifier>,
    generics: Vec<Identifier>,
    fields: Vec<FieldDeclaration>,
}

#[derive(Deserialize)]
struct TypeDefinitionParts {
    name: Identifier,
    #[serde(default)]
    extends: Vec<Identifier>,
    #[serde(default)]
    generics: Vec<Identifier>,
    #[serde(default)]
    fields: Vec<FieldDeclaration>,
}

impl TryFrom<TypeDefinitionParts> for TypeDefinition {
    type Error = StructuralError;

    fn try_from(parts: TypeDefinitionParts) -> StructuralResult<Self> {
        Self::new(parts.name, parts.extends, parts.generics, parts.fields)
    }
}

impl TypeDefinition {
    /// Fails with `DuplicateField` when two fields share a name.
    pub fn new(
        name: impl Into<Identifier>,
        extends: Vec<Identifier>,
        generics: Vec<Identifier>,
        fields: Vec<FieldDeclaration>,
    ) -> StructuralResult<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return StructuralError::DuplicateField {
                    type_name: name,
                    field: field.name.clone(),
                }
                .reject();
            }
        }
        Ok(Self {
            name,
            extends,
            generics,
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the interfaces this type claims to implement.
    pub fn extends(&self) -> &[Identifier] {
        &self.extends
    }

    pub fn generics(&self) -> &[Identifier] {
        &self.generics
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Display for TypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.name)?;
        write_generics(f, &self.generics)?;
        if !self.extends.is_empty() {
            f.write_str(" : ")?;
            write_separated(f, &self.extends, ", ")?;
        }
        f.write_str(" struct ")?;
        write_body(f, &self.fields)
    }
}

/// Enumeration with distinct labels.
///
/// ```text
/// enum StatusCode
///     Ok, InternalServerError, NotFound, Redirect
/// end
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
#[serde(try_from = "EnumDefinitionParts")]
pub struct EnumDefinition {
    name: Identifier,
    enumerations: Vec<Identifier>,
}

#[derive(Deserialize)]
struct EnumDefinitionParts {
    name: Identifier,
    #[serde(default)]
    enumerations: Vec<Identifier>,
}

impl TryFrom<EnumDefinitionParts> for EnumDefinition {
    type Error = StructuralError;

    fn try_from(parts: EnumDefinitionParts) -> StructuralResult<Self> {
        Self::new(parts.name, parts.enumerations)
    }
}

impl EnumDefinition {
    /// Fails with `DuplicateEnumeration` when a label repeats.
    pub fn new(
        name: impl Into<Identifier>,
        enumerations: Vec<Identifier>,
    ) -> StructuralResult<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for label in &enumerations {
            if !seen.insert(label.as_str()) {
                return StructuralError::DuplicateEnumeration {
                    enum_name: name,
                    label: label.clone(),
                }
                .reject();
            }
        }
        Ok(Self { name, enumerations })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enumerations(&self) -> &[Identifier] {
        &self.enumerations
    }
}

impl Display for EnumDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "enum {} ", self.name)?;
        if self.enumerations.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        write_separated(f, &self.enumerations, ", ")?;
        f.write_str(" }")
    }
}

/// Argument of a function, closure, macro or operator: `w http.ResponseWriter`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct ArgumentDeclaration {
    pub variable: Identifier,
    #[serde(rename = "type")]
    pub ty: TypeDeclaration,
}

impl ArgumentDeclaration {
    pub fn new(variable: impl Into<Identifier>, ty: TypeDeclaration) -> Self {
        Self {
            variable: variable.into(),
            ty,
        }
    }
}

impl Display for ArgumentDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variable, self.ty)
    }
}

/// Types a function returns, in order. Several types form a tuple.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct ReturnType {
    pub types: Vec<TypeDeclaration>,
}

impl ReturnType {
    pub fn new(types: Vec<TypeDeclaration>) -> Self {
        Self { types }
    }

    /// No return value.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(ty: TypeDeclaration) -> Self {
        Self { types: vec![ty] }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn is_tuple(&self) -> bool {
        self.types.len() > 1
    }

    /// Writes ` T` or ` (A, B)` after a parameter list; nothing when empty.
    pub(crate) fn write_suffix(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            Ok(())
        } else {
            write!(f, " {self}")
        }
    }
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.types.as_slice() {
            [] => Ok(()),
            [single] => write!(f, "{single}"),
            types => write_parenthesized(f, types),
        }
    }
}

/// Function shape without a body, as required by an interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct FunctionSignature {
    pub name: Identifier,
    pub generics: Vec<GenericTypeDeclaration>,
    pub arguments: Vec<ArgumentDeclaration>,
    pub return_type: ReturnType,
}

impl FunctionSignature {
    pub fn new(
        name: impl Into<Identifier>,
        generics: Vec<GenericTypeDeclaration>,
        arguments: Vec<ArgumentDeclaration>,
        return_type: ReturnType,
    ) -> Self {
        Self {
            name: name.into(),
            generics,
            arguments,
            return_type,
        }
    }
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "func {}", self.name)?;
        write_generics(f, &self.generics)?;
        write_parenthesized(f, &self.arguments)?;
        self.return_type.write_suffix(f)
    }
}

/// Function with a body. Functions can be generic and return tuples.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct FunctionDefinition {
    pub signature: FunctionSignature,
    pub body: Vec<Node>,
}

impl FunctionDefinition {
    pub fn new(signature: FunctionSignature, body: Vec<Node>) -> Self {
        Self { signature, body }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.signature)?;
        write_body(f, &self.body)
    }
}

/// Interface: a named set of required function signatures.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct InterfaceDefinition {
    pub name: Identifier,
    pub generics: Vec<GenericTypeDeclaration>,
    pub functions: Vec<FunctionSignature>,
}

impl InterfaceDefinition {
    pub fn new(
        name: impl Into<Identifier>,
        generics: Vec<GenericTypeDeclaration>,
        functions: Vec<FunctionSignature>,
    ) -> Self {
        Self {
            name: name.into(),
            generics,
            functions,
        }
    }
}

impl Display for InterfaceDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "interface {}", self.name)?;
        write_generics(f, &self.generics)?;
        f.write_str(" ")?;
        write_body(f, &self.functions)
    }
}

/// Binds a concrete type, by name, to the functions an interface requires.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct InterfaceImplementation {
    #[serde(rename = "type")]
    pub ty: Identifier,
    pub generics: Vec<Identifier>,
    pub functions: Vec<FunctionDefinition>,
}

impl InterfaceImplementation {
    pub fn new(
        ty: impl Into<Identifier>,
        generics: Vec<Identifier>,
        functions: Vec<FunctionDefinition>,
    ) -> Self {
        Self {
            ty: ty.into(),
            generics,
            functions,
        }
    }
}

impl Display for InterfaceImplementation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "impl {}", self.ty)?;
        write_generics(f, &self.generics)?;
        f.write_str(" ")?;
        write_body(f, &self.functions)
    }
}

/// Macro signature: name, generics and argument types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct MacroDefinition {
    pub name: Identifier,
    pub generics: Vec<GenericTypeDeclaration>,
    pub argument_types: Vec<TypeDeclaration>,
}

impl MacroDefinition {
    pub fn new(
        name: impl Into<Identifier>,
        generics: Vec<GenericTypeDeclaration>,
        argument_types: Vec<TypeDeclaration>,
    ) -> Self {
        Self {
            name: name.into(),
            generics,
            argument_types,
        }
    }
}

impl Display for MacroDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "macro {}", self.name)?;
        write_generics(f, &self.generics)?;
        write_parenthesized(f, &self.argument_types)
    }
}

/// A realized macro with named arguments and a body.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct MacroImplementation {
    pub name: Identifier,
    pub generics: Vec<TypeDeclaration>,
    pub arguments: Vec<ArgumentDeclaration>,
    pub body: Vec<Node>,
}

impl MacroImplementation {
    pub fn new(
        name: impl Into<Identifier>,
        generics: Vec<TypeDeclaration>,
        arguments: Vec<ArgumentDeclaration>,
        body: Vec<Node>,
    ) -> Self {
        Self {
            name: name.into(),
            generics,
            arguments,
            body,
        }
    }
}

impl Display for MacroImplementation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "macro {}", self.name)?;
        write_generics(f, &self.generics)?;
        write_parenthesized(f, &self.arguments)?;
        f.write_str(" ")?;
        write_body(f, &self.body)
    }
}

/// Overload of a binary operator such as `+` or `==`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct BinaryOperationDefinition {
    pub operation: Identifier,
    pub arguments: [ArgumentDeclaration; 2],
    pub return_type: ReturnType,
    pub body: Vec<Node>,
}

impl BinaryOperationDefinition {
    pub fn new(
        operation: impl Into<Identifier>,
        arguments: [ArgumentDeclaration; 2],
        return_type: ReturnType,
        body: Vec<Node>,
    ) -> Self {
        Self {
            operation: operation.into(),
            arguments,
            return_type,
            body,
        }
    }

    /// Build from a parsed argument list, which must hold exactly two entries.
    pub fn from_arguments(
        operation: impl Into<Identifier>,
        arguments: Vec<ArgumentDeclaration>,
        return_type: ReturnType,
        body: Vec<Node>,
    ) -> StructuralResult<Self> {
        let operation = operation.into();
        match <[ArgumentDeclaration; 2]>::try_from(arguments) {
            Ok(arguments) => Ok(Self::new(operation, arguments, return_type, body)),
            Err(arguments) => StructuralError::BinaryOperatorArity {
                operation,
                found: arguments.len(),
            }
            .reject(),
        }
    }

    pub fn lhs(&self) -> &ArgumentDeclaration {
        &self.arguments[0]
    }

    pub fn rhs(&self) -> &ArgumentDeclaration {
        &self.arguments[1]
    }
}

impl Display for BinaryOperationDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "operator {}", self.operation)?;
        write_parenthesized(f, &self.arguments)?;
        self.return_type.write_suffix(f)?;
        f.write_str(" ")?;
        write_body(f, &self.body)
    }
}

/// Overload of a unary operator such as `-` or `!`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct UnaryOperationDefinition {
    pub operation: Identifier,
    pub argument: ArgumentDeclaration,
    pub return_type: ReturnType,
    pub body: Vec<Node>,
}

impl UnaryOperationDefinition {
    pub fn new(
        operation: impl Into<Identifier>,
        argument: ArgumentDeclaration,
        return_type: ReturnType,
        body: Vec<Node>,
    ) -> Self {
        Self {
            operation: operation.into(),
            argument,
            return_type,
            body,
        }
    }

    /// Build from a parsed argument list, which must hold exactly one entry.
    pub fn from_arguments(
        operation: impl Into<Identifier>,
        arguments: Vec<ArgumentDeclaration>,
        return_type: ReturnType,
        body: Vec<Node>,
    ) -> StructuralResult<Self> {
        let operation = operation.into();
        let found = arguments.len();
        let mut arguments = arguments.into_iter();
        match (arguments.next(), arguments.next()) {
            (Some(argument), None) => Ok(Self::new(operation, argument, return_type, body)),
            _ => StructuralError::UnaryOperatorArity { operation, found }.reject(),
        }
    }
}

impl Display for UnaryOperationDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "operator {}({})", self.operation, self.argument)?;
        self.return_type.write_suffix(f)?;
        f.write_str(" ")?;
        write_body(f, &self.body)
    }
}
