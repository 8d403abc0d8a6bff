//! Raw descriptor model as produced by an external schema parser.
//!
//! These types mirror the structural shape of a parsed `.proto` source. They
//! carry no wire metadata; [`compile`](crate::compile) turns a [`Descriptor`]
//! into the compiled form the codec consumes.

use std::collections::{BTreeSet, HashMap};

/// A field's declared type.
///
/// A map-shaped type carries key/value sub-types; a scalar or
/// message-reference type carries only `name`. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Type {
    pub name: String,
    pub key_type: Option<Box<Type>>,
    pub value_type: Option<Box<Type>>,
}

impl Type {
    /// Creates a scalar or message-reference type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_type: None,
            value_type: None,
        }
    }

    /// Creates a map-shaped type.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self {
            name: "map".to_string(),
            key_type: Some(Box::new(key)),
            value_type: Some(Box::new(value)),
        }
    }

    /// Returns `true` if this type carries key/value sub-types.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        self.key_type.is_some() && self.value_type.is_some()
    }
}

/// A named value within an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub name: String,
    pub values: HashMap<String, EnumValue>,
}

impl Enum {
    /// Creates an enum with no values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Adds a named value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: i64) -> Self {
        let name = name.into();
        self.values.insert(
            name.clone(),
            EnumValue { name, value },
        );
        self
    }
}

/// A field declaration within a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    /// Field number, unique within the owning message and greater than zero.
    pub tag: i64,
    pub ty: Type,
    pub repeated: bool,
    /// Oneof group label. Carried as metadata only; mutual exclusivity is
    /// not enforced.
    pub oneof_group: Option<String>,
}

impl Field {
    /// Creates a singular field.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: i64, ty: Type) -> Self {
        Self {
            name: name.into(),
            tag,
            ty,
            repeated: false,
            oneof_group: None,
        }
    }

    /// Marks the field repeated.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Attaches a oneof group label.
    #[must_use]
    pub fn oneof(mut self, group: impl Into<String>) -> Self {
        self.oneof_group = Some(group.into());
        self
    }
}

/// A message definition.
///
/// Nested messages and enums are navigational only: compilation hoists them
/// into the owning schema's global namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub name: String,
    pub fields: HashMap<String, Field>,
    pub nested_messages: Vec<Message>,
    pub nested_enums: Vec<Enum>,
}

impl Message {
    /// Creates a message with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: HashMap::new(),
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Adds a nested message.
    #[must_use]
    pub fn nested_message(mut self, message: Message) -> Self {
        self.nested_messages.push(message);
        self
    }

    /// Adds a nested enum.
    #[must_use]
    pub fn nested_enum(mut self, nested: Enum) -> Self {
        self.nested_enums.push(nested);
        self
    }
}

/// An RPC method. Carried through for completeness; not consumed by the
/// codec.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub name: String,
    pub request: String,
    pub response: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

/// A service definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    pub name: String,
    pub methods: HashMap<String, Method>,
}

/// The fully parsed, not-yet-compiled representation of a schema source.
///
/// Exactly one descriptor exists per loaded source. It is built once by the
/// parser, compiled once, and then discarded in favor of the compiled form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor {
    pub syntax: String,
    pub dependencies: BTreeSet<String>,
    pub enums: HashMap<String, Enum>,
    pub messages: HashMap<String, Message>,
    pub services: HashMap<String, Service>,
}

impl Descriptor {
    /// Creates an empty descriptor for the given syntax.
    #[must_use]
    pub fn new(syntax: impl Into<String>) -> Self {
        Self {
            syntax: syntax.into(),
            dependencies: BTreeSet::new(),
            enums: HashMap::new(),
            messages: HashMap::new(),
            services: HashMap::new(),
        }
    }

    /// Adds a top-level message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.insert(message.name.clone(), message);
        self
    }

    /// Adds a top-level enum.
    #[must_use]
    pub fn enumeration(mut self, enumeration: Enum) -> Self {
        self.enums.insert(enumeration.name.clone(), enumeration);
        self
    }

    /// Adds a service.
    #[must_use]
    pub fn service(mut self, service: Service) -> Self {
        self.services.insert(service.name.clone(), service);
        self
    }

    /// Records an import dependency.
    #[must_use]
    pub fn dependency(mut self, path: impl Into<String>) -> Self {
        self.dependencies.insert(path.into());
        self
    }
}
