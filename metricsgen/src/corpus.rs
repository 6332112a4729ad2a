use serde::{Deserialize, Serialize};

/// One marker attached to a declaration, as the host's parser saw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerUse {
    /// The name as spelled at the use site, e.g. `Counter` or
    /// `CounterAttribute`.
    pub name: String,
    /// Fully qualified symbol name, when the host resolved one. Hosts that
    /// only have syntax leave this unset and matching falls back to the
    /// spelled name.
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Positional and named arguments, in source order.
    #[serde(default)]
    pub arguments: Vec<MarkerArgument>,
}

impl MarkerUse {
    /// A marker with no resolved symbol and no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: None,
            arguments: Vec::new(),
        }
    }

    /// Attach arguments, in source order.
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = MarkerArgument>) -> Self {
        self.arguments = arguments.into_iter().collect();
        self
    }
}

/// A single marker argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerArgument {
    /// Set for named arguments (`targetNamespace: "..."`), unset for
    /// positional ones.
    #[serde(default)]
    pub name: Option<String>,
    pub value: String,
}

impl MarkerArgument {
    /// A positional argument.
    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    /// A named argument.
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

/// A member function of a container: a factory function producing one metric
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    /// Declared result type. Must be a concrete named type; it doubles as
    /// the source of the generated field's name.
    pub result_type: String,
    #[serde(default)]
    pub markers: Vec<MarkerUse>,
}

/// A type declaration from the host's compilation snapshot.
///
/// The snapshot is read-only input: discovery never mutates it, and nothing
/// is remembered between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    /// Enclosing namespace; `None` for types declared outside any namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub markers: Vec<MarkerUse>,
    /// Member functions in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}
