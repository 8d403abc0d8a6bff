//! Two-pass descriptor compilation.
//!
//! Pass 1 hoists every nested message and enum into the schema's flat global
//! namespace. Pass 2 resolves each field against that namespace: wire kind,
//! scalar kind, packedness, and the precomputed tag code. Cross-references by
//! name are what make the two passes necessary; a field may reference a
//! message declared later in the source or nested in another scope, and two
//! messages may reference each other.

use std::collections::{BTreeSet, HashMap};

use wire::{WireKind, WireWriter};

use crate::descriptor::{Descriptor, Enum, Field, Message, Service};
use crate::error::{SchemaError, SchemaResult};

/// Prefix identifying well-known external types (`google.protobuf.Any`,
/// `google.protobuf.Duration`, ...). Recognized so they can be rejected
/// explicitly instead of mis-encoded.
pub const WELL_KNOWN_PREFIX: &str = "google.protobuf.";

/// Largest valid protobuf field number: `2^29 - 1`.
const MAX_FIELD_NUMBER: i64 = 536_870_911;

/// The value family a compiled field carries.
///
/// This closed set replaces per-field function pointers: the marshaler and
/// unmarshaler dispatch on the variant, keeping all resolution logic here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Sint32,
    Sint64,
    Fixed32,
    Sfixed32,
    Fixed64,
    Sfixed64,
    Float,
    Double,
    String,
    Bytes,
    /// An enum reference; encodes as a varint int32.
    Enum(String),
    /// An embedded message reference; encodes length-delimited.
    Message(String),
    /// A recognized but unsupported shape (map fields, well-known external
    /// types). Marshaling such a field fails rather than dropping data.
    Unsupported(String),
}

/// A field with its compiler-derived metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    /// Field number on the wire.
    pub tag: u32,
    pub scalar: ScalarKind,
    /// Wire kind of a single element (the kind the tag advertises for
    /// singular fields; packed fields advertise [`WireKind::Bytes`] instead).
    pub wire: WireKind,
    pub repeated: bool,
    /// Repeated scalar fields of varint/fixed kinds are written as one
    /// length-delimited concatenation.
    pub packed: bool,
    pub oneof_group: Option<String>,
    /// Varint-encoded `(tag << 3) | wire_kind`, precomputed with the on-wire
    /// kind.
    pub tag_code: Vec<u8>,
}

impl CompiledField {
    /// The wire kind this field's tag advertises.
    #[must_use]
    pub const fn tag_kind(&self) -> WireKind {
        if self.repeated {
            WireKind::Bytes
        } else {
            self.wire
        }
    }
}

/// A message with resolved fields and a canonical field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMessage {
    pub name: String,
    pub fields: HashMap<String, CompiledField>,
    /// Field names sorted ascending by tag. Marshal and unmarshal walk this
    /// order, never map-iteration order, so byte output is deterministic.
    pub order: Vec<String>,
    /// Tag number to field name, for decode dispatch.
    pub by_tag: HashMap<u32, String>,
}

impl CompiledMessage {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.get(name)
    }

    /// Looks up a field by tag number.
    #[must_use]
    pub fn field_by_tag(&self, tag: u32) -> Option<&CompiledField> {
        self.by_tag.get(&tag).and_then(|name| self.fields.get(name))
    }
}

/// A fully compiled, immutable schema.
///
/// Safe for unsynchronized concurrent reads; all marshal/unmarshal calls
/// share one compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    pub syntax: String,
    pub dependencies: BTreeSet<String>,
    pub enums: HashMap<String, Enum>,
    pub messages: HashMap<String, CompiledMessage>,
    /// Carried through for completeness; not consumed by the codec.
    pub services: HashMap<String, Service>,
}

impl CompiledSchema {
    /// Looks up a compiled message by name.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&CompiledMessage> {
        self.messages.get(name)
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name)
    }
}

/// Compiles a raw descriptor into ready-to-use codec metadata.
///
/// The descriptor is consumed; on failure nothing of the partially compiled
/// schema survives.
pub fn compile(descriptor: Descriptor) -> SchemaResult<CompiledSchema> {
    let Descriptor {
        syntax,
        dependencies,
        enums,
        messages,
        services,
    } = descriptor;

    // Pass 1: hoist nested definitions into flat name-keyed maps.
    let mut flat_enums: HashMap<String, Enum> = HashMap::new();
    let mut flat_messages: HashMap<String, FlatMessage> = HashMap::new();

    for (_, enumeration) in enums {
        insert_enum(&mut flat_enums, enumeration)?;
    }
    for (_, message) in messages {
        hoist_message(message, &mut flat_messages, &mut flat_enums)?;
    }
    for name in flat_enums.keys() {
        if flat_messages.contains_key(name) {
            return Err(SchemaError::DuplicateDefinition { name: name.clone() });
        }
    }

    // Pass 2: resolve every field against the completed namespace.
    let mut compiled_messages = HashMap::with_capacity(flat_messages.len());
    for (name, flat) in &flat_messages {
        let compiled = compile_message(name, &flat.fields, &flat_messages, &flat_enums)?;
        compiled_messages.insert(name.clone(), compiled);
    }

    Ok(CompiledSchema {
        syntax,
        dependencies,
        enums: flat_enums,
        messages: compiled_messages,
        services,
    })
}

/// A message stripped of its nested definitions after hoisting.
struct FlatMessage {
    fields: HashMap<String, Field>,
}

fn hoist_message(
    message: Message,
    messages: &mut HashMap<String, FlatMessage>,
    enums: &mut HashMap<String, Enum>,
) -> SchemaResult<()> {
    let Message {
        name,
        fields,
        nested_messages,
        nested_enums,
    } = message;

    if messages
        .insert(name.clone(), FlatMessage { fields })
        .is_some()
    {
        return Err(SchemaError::DuplicateDefinition { name });
    }
    for nested in nested_enums {
        insert_enum(enums, nested)?;
    }
    for nested in nested_messages {
        hoist_message(nested, messages, enums)?;
    }
    Ok(())
}

fn insert_enum(enums: &mut HashMap<String, Enum>, enumeration: Enum) -> SchemaResult<()> {
    let name = enumeration.name.clone();
    if enums.insert(name.clone(), enumeration).is_some() {
        return Err(SchemaError::DuplicateDefinition { name });
    }
    Ok(())
}

fn compile_message(
    message_name: &str,
    fields: &HashMap<String, Field>,
    messages: &HashMap<String, FlatMessage>,
    enums: &HashMap<String, Enum>,
) -> SchemaResult<CompiledMessage> {
    let mut compiled_fields = HashMap::with_capacity(fields.len());
    let mut by_tag = HashMap::with_capacity(fields.len());

    for field in fields.values() {
        if field.tag <= 0 || field.tag > MAX_FIELD_NUMBER {
            return Err(SchemaError::InvalidTag {
                message: message_name.to_string(),
                field: field.name.clone(),
                tag: field.tag,
            });
        }
        let tag = field.tag as u32;

        let (scalar, wire) = classify(message_name, field, messages, enums)?;
        let packed = field.repeated && wire != WireKind::Bytes;
        let tag_kind = if field.repeated { WireKind::Bytes } else { wire };

        let mut writer = WireWriter::new();
        writer.put_tag(tag, tag_kind);
        let compiled = CompiledField {
            name: field.name.clone(),
            tag,
            scalar,
            wire,
            repeated: field.repeated,
            packed,
            oneof_group: field.oneof_group.clone(),
            tag_code: writer.finish(),
        };

        if by_tag.insert(tag, field.name.clone()).is_some() {
            return Err(SchemaError::DuplicateTag {
                message: message_name.to_string(),
                tag: field.tag,
            });
        }
        compiled_fields.insert(field.name.clone(), compiled);
    }

    let mut order: Vec<String> = compiled_fields.keys().cloned().collect();
    order.sort_by_key(|name| compiled_fields[name].tag);

    Ok(CompiledMessage {
        name: message_name.to_string(),
        fields: compiled_fields,
        order,
        by_tag,
    })
}

fn classify(
    message_name: &str,
    field: &Field,
    messages: &HashMap<String, FlatMessage>,
    enums: &HashMap<String, Enum>,
) -> SchemaResult<(ScalarKind, WireKind)> {
    if field.ty.is_map() {
        return Ok((
            ScalarKind::Unsupported(field.ty.name.clone()),
            WireKind::Bytes,
        ));
    }

    let type_name = field.ty.name.as_str();
    let resolved = match type_name {
        "bool" => (ScalarKind::Bool, WireKind::Varint),
        "int32" => (ScalarKind::Int32, WireKind::Varint),
        "int64" => (ScalarKind::Int64, WireKind::Varint),
        "uint32" => (ScalarKind::UInt32, WireKind::Varint),
        "uint64" => (ScalarKind::UInt64, WireKind::Varint),
        "sint32" => (ScalarKind::Sint32, WireKind::Varint),
        "sint64" => (ScalarKind::Sint64, WireKind::Varint),
        "fixed64" => (ScalarKind::Fixed64, WireKind::Fixed64),
        "sfixed64" => (ScalarKind::Sfixed64, WireKind::Fixed64),
        "double" => (ScalarKind::Double, WireKind::Fixed64),
        "fixed32" => (ScalarKind::Fixed32, WireKind::Fixed32),
        "sfixed32" => (ScalarKind::Sfixed32, WireKind::Fixed32),
        "float" => (ScalarKind::Float, WireKind::Fixed32),
        "string" => (ScalarKind::String, WireKind::Bytes),
        "bytes" => (ScalarKind::Bytes, WireKind::Bytes),
        _ => {
            if enums.contains_key(type_name) {
                (ScalarKind::Enum(type_name.to_string()), WireKind::Varint)
            } else if messages.contains_key(type_name) {
                (ScalarKind::Message(type_name.to_string()), WireKind::Bytes)
            } else if type_name.starts_with(WELL_KNOWN_PREFIX) {
                (
                    ScalarKind::Unsupported(type_name.to_string()),
                    WireKind::Bytes,
                )
            } else {
                return Err(SchemaError::InvalidFieldType {
                    message: message_name.to_string(),
                    field: field.name.clone(),
                    type_name: type_name.to_string(),
                });
            }
        }
    };
    Ok(resolved)
}
