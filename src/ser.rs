use crate::tags::{Tree, TagIdent, Field};
use crate::hash::hash_name;
use crate::error::BiniouError;
use crate::encode::ensure_array_integrity;

use serde::{Serializer, Serialize};
use serde::ser::{SerializeSeq, SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, SerializeMap, SerializeStruct, SerializeStructVariant};
use std::fmt::Display;

pub struct BiniouSerializer;

// `Ok` is an Option so unit-likes and `None` can vanish: containers drop absent
// values instead of inventing a placeholder node for them.
#[allow(unused_variables)]
impl Serializer for BiniouSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;
    type SerializeSeq = BiniouSeqSerializer;
    type SerializeTuple = BiniouTupleSerializer;
    type SerializeTupleStruct = BiniouTupleSerializer;
    type SerializeTupleVariant = BiniouVariantSeqSerializer;
    type SerializeMap = BiniouMapSerializer;
    type SerializeStruct = BiniouStructSerializer;
    type SerializeStructVariant = BiniouVariantStructSerializer;


    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        #[cfg(feature="serde_boolean")]
        return Ok(Some(Tree::Int8(v as u8)));

        #[cfg(not(feature="serde_boolean"))]
        return Err(BiniouError::UnserializableType { type_name: "bool".to_string() })
    }

    // The signed small widths ride the zigzag varint; the unsigned ones have
    // fixed-width kinds of their own.
    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Svint(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Svint(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Int32(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Int64(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Int8(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Int16(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Uvint(v as u64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Uvint(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Float64(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Float64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        Err(BiniouError::UnserializableType { type_name: "bytes".to_string() })
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> where
        T: Serialize {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Variant(variant.to_string(), hash_name(variant), None)))
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<Self::Ok, Self::Error> where
        T: Serialize {
        value.serialize(Self)
    }

    fn serialize_newtype_variant<T: ?Sized>(self, _name: &'static str, _variant_index: u32, variant: &'static str, value: &T) -> Result<Self::Ok, Self::Error> where
        T: Serialize {
        match Serialize::serialize(value, self)? {
            Some(x) => Ok(Some(wrap_variant(&variant, x))),
            None => Ok(Some(Tree::Variant(variant.to_string(), hash_name(variant), None)))
        }
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(BiniouSeqSerializer::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(BiniouTupleSerializer::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(BiniouTupleSerializer::new())
    }

    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(BiniouVariantSeqSerializer::new(variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(BiniouMapSerializer::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(BiniouStructSerializer::new())
    }

    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(BiniouVariantStructSerializer::new(variant))
    }

    fn collect_str<T: ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> where
        T: Display {
        Ok(Some(Tree::String(value.to_string())))
    }
}

// Wrap a payload under a hashed variant constructor.
pub(crate) fn wrap_variant(variant: &str, value: Tree) -> Tree {
    Tree::Variant(variant.to_string(), hash_name(variant), Some(Box::new(value)))
}

// Sequences become arrays, which share one element tag. The tag comes off the
// first element; an empty sequence defaults to TAG_Int8 since no cells follow.
fn into_array(elements: Vec<Tree>) -> Result<Option<Tree>, BiniouError> {
    let ident = match elements.first() {
        Some(element) => element.ident(),
        None => TagIdent::TAG_Int8
    };
    ensure_array_integrity(ident, &elements)?;
    Ok(Some(Tree::Array(ident, elements)))
}

pub struct BiniouSeqSerializer {
    elements: Vec<Tree>,
}
impl BiniouSeqSerializer {
    pub fn new() -> Self { BiniouSeqSerializer { elements: Vec::new() } }
}

impl SerializeSeq for BiniouSeqSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> where
        T: Serialize {
        if let Some(value) = value.serialize(BiniouSerializer)? {
            self.elements.push(value);
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        into_array(self.elements)
    }
}

pub struct BiniouTupleSerializer {
    elements: Vec<Tree>,
}
impl BiniouTupleSerializer {
    pub fn new() -> Self { BiniouTupleSerializer { elements: Vec::new() } }
}

impl SerializeTuple for BiniouTupleSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> where T: Serialize {
        if let Some(value) = value.serialize(BiniouSerializer)? {
            self.elements.push(value);
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Tuple(self.elements)))
    }
}

impl SerializeTupleStruct for BiniouTupleSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> where T: Serialize {
        if let Some(value) = value.serialize(BiniouSerializer)? {
            self.elements.push(value);
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        SerializeTuple::end(self)
    }
}

pub struct BiniouVariantSeqSerializer {
    variant: String,
    elements: Vec<Tree>
}
impl BiniouVariantSeqSerializer {
    pub fn new(variant: &str) -> Self {
        Self {
            variant: variant.to_string(),
            elements: Vec::new()
        }
    }
}
impl SerializeTupleVariant for BiniouVariantSeqSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> where T: Serialize {
        if let Some(value) = value.serialize(BiniouSerializer)? {
            self.elements.push(value);
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(wrap_variant(&self.variant, Tree::Tuple(self.elements))))
    }
}

pub struct BiniouMapSerializer {
    fields: Vec<Field>,
    key: Option<String>
}
impl BiniouMapSerializer {
    pub fn new() -> Self { Self { fields: Vec::new(), key: None } }
}

impl SerializeMap for BiniouMapSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> where
        T: Serialize {
        if let Some(Tree::String(key)) = key.serialize(BiniouSerializer)? {
            self.key = Some(key);
        };
        Ok(())
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> where
        T: Serialize {
        if let Some(key) = self.key.take() {
            if let Some(v) = value.serialize(BiniouSerializer)? {
                self.fields.push(Field::new(&key, v));
            }
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Record(self.fields)))
    }
}


pub struct BiniouStructSerializer {
    fields: Vec<Field>
}
impl BiniouStructSerializer {
    pub fn new() -> Self { Self { fields: Vec::new() } }
}
impl SerializeStruct for BiniouStructSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error> where
        T: Serialize {
        if let Some(v) = value.serialize(BiniouSerializer)? {
            self.fields.push(Field::new(key, v));
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(Tree::Record(self.fields)))
    }
}

pub struct BiniouVariantStructSerializer {
    fields: Vec<Field>,
    variant: String
}
impl BiniouVariantStructSerializer {
    pub fn new(variant: &str) -> Self { Self { fields: Vec::new(), variant: variant.to_string() } }
}
impl SerializeStructVariant for BiniouVariantStructSerializer {
    type Ok = Option<Tree>;
    type Error = BiniouError;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error> where
        T: Serialize {
        if let Some(v) = value.serialize(BiniouSerializer)? {
            self.fields.push(Field::new(key, v));
        };
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(wrap_variant(&self.variant, Tree::Record(self.fields))))
    }
}
