use crate::tags::{Tree, TagIdent, Field};
use crate::hash::hash_name;
use crate::error::BiniouError;

use serde::Deserializer;
use serde::de::{Visitor, DeserializeSeed, SeqAccess, MapAccess, EnumAccess, VariantAccess};

/// Deserializer over one decoded node.
///
/// Holds an `Option` so an absent value (a dropped record field, a variant without
/// a payload) deserializes as `None`/unit instead of needing a placeholder node.
pub struct BiniouDeserializer(pub(crate) Option<Tree>);

// Most leaf types follow one pattern: unwrap the expected kind, visit its payload,
// and report the found/expected pair on a mismatch.
macro_rules! expect {
    ($self:ident, $visitor:ident, $tree:ident => $visit:ident, $ident:ident, $when:expr) => {
        match $self.0 {
            Some(Tree::$tree(value)) => $visitor.$visit(value),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::$ident,
                when: $when.to_string()
            }),
            None => Err(BiniouError::NoData { when: $when.to_string() })
        }
    };
}

// Re-resolve decoded field names against the statically known set. The wire only
// carries hashes, so a document decoded without a registered unhash still matches
// as long as the hashes line up; unmatched fields keep their placeholder name and
// fall through the visitor's unknown-field handling.
fn resolve_fields(record: Vec<Field>, known: &'static [&'static str]) -> Vec<(String, Tree)> {
    record.into_iter().map(|field| {
        let name = known.iter()
            .find(|candidate| hash_name(candidate) == field.hash)
            .map(|candidate| candidate.to_string())
            .unwrap_or(field.name);
        (name, field.value)
    }).collect()
}

impl<'de> Deserializer<'de> for BiniouDeserializer {
    type Error = BiniouError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(tree) => match tree {
                Tree::Int8(v) => visitor.visit_u8(v),
                Tree::Int16(v) => visitor.visit_u16(v),
                Tree::Int32(v) => visitor.visit_i32(v),
                Tree::Int64(v) => visitor.visit_i64(v),
                Tree::Int128(v) => visitor.visit_bytes(&v),
                Tree::Float64(v) => visitor.visit_f64(v),
                Tree::Uvint(v) => visitor.visit_u64(v),
                Tree::Svint(v) => visitor.visit_i64(v),
                Tree::String(v) => visitor.visit_string(v),
                Tree::Array(_, elements) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
                Tree::Tuple(elements) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
                Tree::Record(fields) => visitor.visit_map(BiniouMapDeserializer::new(
                    fields.into_iter().map(|field| (field.name, field.value)).collect()
                )),
                tree => Err(BiniouError::UnserializableType {
                    type_name: tree.ident().to_string()
                }),
            }
            None => visitor.visit_none()
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        #[cfg(feature="serde_boolean")]
        return match self.0 {
            Some(Tree::Int8(value)) => visitor.visit_bool(value == 0x01),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Int8,
                when: "bool".to_string()
            }),
            None => Err(BiniouError::NoData { when: "bool".to_string() })
        };

        #[cfg(not(feature="serde_boolean"))]
        return Err(BiniouError::UnserializableType { type_name: "bool".to_string() })
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Svint => visit_i64, TAG_Svint, "i8")
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Svint => visit_i64, TAG_Svint, "i16")
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Int32 => visit_i32, TAG_Int32, "i32")
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Int64 => visit_i64, TAG_Int64, "i64")
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Int8 => visit_u8, TAG_Int8, "u8")
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Int16 => visit_u16, TAG_Int16, "u16")
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Uvint => visit_u64, TAG_Uvint, "u32")
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Uvint => visit_u64, TAG_Uvint, "u64")
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Float64 => visit_f64, TAG_Float64, "f32")
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, Float64 => visit_f64, TAG_Float64, "f64")
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::String(value)) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(BiniouError::InvalidChar)
                }
            }
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_String,
                when: "char".to_string()
            }),
            None => Err(BiniouError::NoData { when: "char".to_string() })
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, String => visit_string, TAG_String, "str")
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, String => visit_string, TAG_String, "string")
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::Int128(blob)) => visitor.visit_bytes(&blob),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Int128,
                when: "bytes".to_string()
            }),
            None => Err(BiniouError::NoData { when: "bytes".to_string() })
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(tree) => visitor.visit_some(BiniouDeserializer(Some(tree))),
            None => visitor.visit_none()
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::Array(_, elements)) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
            Some(Tree::Tuple(elements)) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Array,
                when: "a sequence".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a sequence".to_string() })
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::Tuple(elements)) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Tuple,
                when: "a tuple".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a tuple".to_string() })
        }
    }

    fn deserialize_tuple_struct<V>(self, _name: &'static str, len: usize, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::Record(fields)) => visitor.visit_map(BiniouMapDeserializer::new(
                fields.into_iter().map(|field| (field.name, field.value)).collect()
            )),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Record,
                when: "a map".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a map".to_string() })
        }
    }

    fn deserialize_struct<V>(self, _name: &'static str, fields: &'static [&'static str], visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            Some(Tree::Record(record)) => {
                visitor.visit_map(BiniouMapDeserializer::new(resolve_fields(record, fields)))
            }
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Record,
                when: "a struct".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a struct".to_string() })
        }
    }

    fn deserialize_enum<V>(self, _name: &'static str, variants: &'static [&'static str], visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.0 {
            // Hashed constructor: match the wire hash against the known variant names.
            Some(Tree::Variant(name, hash, payload)) => {
                let resolved = variants.iter()
                    .find(|candidate| hash_name(candidate) == hash)
                    .map(|candidate| candidate.to_string())
                    .unwrap_or(name);
                visitor.visit_enum(BiniouEnumDeserializer {
                    variant: resolved,
                    payload: payload.map(|payload| *payload)
                })
            }
            // Small integer constructor: the index selects by variant position.
            Some(Tree::NumVariant(index, payload)) => {
                match variants.get(index as usize) {
                    Some(candidate) => visitor.visit_enum(BiniouEnumDeserializer {
                        variant: candidate.to_string(),
                        payload: payload.map(|payload| *payload)
                    }),
                    None => Err(BiniouError::Custom(
                        format!("numeric variant index {} is out of range", index)
                    ))
                }
            }
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Variant,
                when: "an enum".to_string()
            }),
            None => Err(BiniouError::NoData { when: "an enum".to_string() })
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        expect!(self, visitor, String => visit_string, TAG_String, "an identifier")
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        visitor.visit_unit()
    }
}

pub struct BiniouSeqDeserializer {
    elements: std::vec::IntoIter<Tree>
}
impl BiniouSeqDeserializer {
    pub(crate) fn new(elements: Vec<Tree>) -> Self {
        Self { elements: elements.into_iter() }
    }
}

impl<'de> SeqAccess<'de> for BiniouSeqDeserializer {
    type Error = BiniouError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error> where
        T: DeserializeSeed<'de> {
        match self.elements.next() {
            Some(tree) => seed.deserialize(BiniouDeserializer(Some(tree))).map(Some),
            None => Ok(None)
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.elements.len())
    }
}

pub struct BiniouMapDeserializer {
    fields: std::vec::IntoIter<(String, Tree)>,
    value: Option<Tree>
}
impl BiniouMapDeserializer {
    pub(crate) fn new(fields: Vec<(String, Tree)>) -> Self {
        Self { fields: fields.into_iter(), value: None }
    }
}

impl<'de> MapAccess<'de> for BiniouMapDeserializer {
    type Error = BiniouError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error> where
        K: DeserializeSeed<'de> {
        match self.fields.next() {
            Some((name, value)) => {
                self.value = Some(value);
                seed.deserialize(BiniouDeserializer(Some(Tree::String(name)))).map(Some)
            }
            None => Ok(None)
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error> where
        V: DeserializeSeed<'de> {
        match self.value.take() {
            Some(tree) => seed.deserialize(BiniouDeserializer(Some(tree))),
            None => Err(BiniouError::NoData { when: "a map value".to_string() })
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

pub struct BiniouEnumDeserializer {
    variant: String,
    payload: Option<Tree>
}

impl<'de> EnumAccess<'de> for BiniouEnumDeserializer {
    type Error = BiniouError;
    type Variant = BiniouVariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Self::Error> where
        V: DeserializeSeed<'de> {
        let value = seed.deserialize(BiniouDeserializer(Some(Tree::String(self.variant))))?;
        Ok((value, BiniouVariantDeserializer { payload: self.payload }))
    }
}

pub struct BiniouVariantDeserializer {
    payload: Option<Tree>
}

impl<'de> VariantAccess<'de> for BiniouVariantDeserializer {
    type Error = BiniouError;

    fn unit_variant(self) -> Result<(), Self::Error> {
        match self.payload {
            None => Ok(()),
            Some(tree) => Err(BiniouError::Custom(
                format!("unexpected {} payload on a unit variant", tree.ident())
            ))
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Self::Error> where
        T: DeserializeSeed<'de> {
        match self.payload {
            Some(tree) => seed.deserialize(BiniouDeserializer(Some(tree))),
            None => Err(BiniouError::NoData { when: "a newtype variant".to_string() })
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.payload {
            Some(Tree::Tuple(elements)) => visitor.visit_seq(BiniouSeqDeserializer::new(elements)),
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Tuple,
                when: "a tuple variant".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a tuple variant".to_string() })
        }
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value, Self::Error> where
        V: Visitor<'de> {
        match self.payload {
            Some(Tree::Record(record)) => {
                visitor.visit_map(BiniouMapDeserializer::new(resolve_fields(record, fields)))
            }
            Some(tree) => Err(BiniouError::InvalidType {
                found: tree.ident(),
                expecting: TagIdent::TAG_Record,
                when: "a struct variant".to_string()
            }),
            None => Err(BiniouError::NoData { when: "a struct variant".to_string() })
        }
    }
}
