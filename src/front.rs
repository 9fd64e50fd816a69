use crate::tags::{Tree, TagIdent};
use crate::hash::Unhash;
use crate::error::{BiniouResult, BiniouError};
use crate::blob::Blob;
use crate::encode::{write_tree, write_ident, write_record};
use crate::decode::{read_ident, read_body, read_record};

use std::io::{Write, Read, Cursor};

// Write Trait
pub trait BiniouWrite {
    fn write<W: Write>(&self, writer: &mut W) -> BiniouResult<()>;

    /// Encode into a fresh byte vector: the top-level node in tagged form.
    fn bytes(&self) -> BiniouResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

impl BiniouWrite for Tree {
    fn write<W: Write>(&self, writer: &mut W) -> BiniouResult<()> {
        write_tree(writer, &self)
    }
}
impl BiniouWrite for Blob {
    fn write<W: Write>(&self, writer: &mut W) -> BiniouResult<()> {
        write_ident(writer, TagIdent::TAG_Record)?;
        write_record(writer, &self.fields)
    }
}

// Read Trait
pub trait BiniouRead: Sized {
    /// Read one node, resolving field and variant names through `unhash`.
    fn read_with<R: Read>(reader: &mut R, unhash: &Unhash) -> BiniouResult<Self>;

    /// Read one node with no registered names; hashes resolve to `#`-hex placeholders.
    fn read<R: Read>(reader: &mut R) -> BiniouResult<Self> {
        Self::read_with(reader, &Unhash::new())
    }

    /// Decode one node from the front of a byte slice. Trailing bytes are not
    /// consumed; their presence is the caller's concern.
    fn from_bytes<B: AsRef<[u8]>>(data: B) -> BiniouResult<Self> {
        Self::read(&mut Cursor::new(data.as_ref()))
    }

    fn from_bytes_with<B: AsRef<[u8]>>(data: B, unhash: &Unhash) -> BiniouResult<Self> {
        Self::read_with(&mut Cursor::new(data.as_ref()), unhash)
    }
}

impl BiniouRead for Tree {
    fn read_with<R: Read>(reader: &mut R, unhash: &Unhash) -> BiniouResult<Self> {
        let ident = read_ident(reader)?;
        read_body(reader, &ident, unhash)
    }
}
impl BiniouRead for Blob {
    fn read_with<R: Read>(reader: &mut R, unhash: &Unhash) -> BiniouResult<Self> {
        let ident = read_ident(reader)?;
        if ident != TagIdent::TAG_Record {
            return Err(BiniouError::InvalidRoot { found: ident });
        }
        Ok(Blob { fields: read_record(reader, unhash)? })
    }
}

#[cfg(feature="serde")]
use serde::{Serialize, de::DeserializeOwned};
#[cfg(feature="serde")]
use crate::ser::BiniouSerializer;
#[cfg(feature="serde")]
use crate::de::BiniouDeserializer;

#[cfg(feature="serde")]
pub fn encode_tree<T: Serialize>(o: &T) -> BiniouResult<Option<Tree>> {
    o.serialize(BiniouSerializer)
}

#[cfg(feature="serde")]
pub fn encode<T: Serialize>(o: &T) -> BiniouResult<Blob> {
    match encode_tree(o)? {
        Some(Tree::Record(fields)) => Ok(Blob { fields }),
        Some(tree) => Err(BiniouError::InvalidRoot { found: tree.ident() }),
        None => Err(BiniouError::NoData { when: "a root record".to_string() })
    }
}

#[cfg(feature="serde")]
pub fn decode_tree<T: DeserializeOwned>(tree: Tree) -> BiniouResult<T> {
    T::deserialize(BiniouDeserializer(Some(tree)))
}

#[cfg(feature="serde")]
pub fn decode<T: DeserializeOwned>(blob: Blob) -> BiniouResult<T> {
    decode_tree(blob.record())
}
