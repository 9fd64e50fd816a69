//! # Biniou
//! Biniou is a self-describing, length-prefixed binary serialization format for a
//! tagged tree of typed values. Every node carries a one-byte type tag when written
//! in tagged form, and the tabular kinds factor the type schema out of row data so
//! tables stay compact.
//!
//! ## This Crate
//! This crate is __yet__ another implementation of a tagged binary tree format.
//!
//! ### Key features
//! - Support for Serialisation and Deserialization with the [Serde](https://serde.rs) framework.
//! - Ability to create partial or complete documents through the `Tree` and `Blob` objects.
//! - Ability to read/write from a socket or buffer.
//! - Collision-checked reverse lookup of the 31 bit field/variant name hashes.
//!
//! ### Cargo Features
//! - `serde`             (default) includes Serde serialisation and deserialization support.
//! - `serde_boolean`     (default) converts booleans to Int8 during serialisation and deserialization.
//! - `debug`             (default) debug for documents
//! - `clone`             (default) clone for tree nodes
//!
//! ### Operation
//! This crate has two seperate operations that allow data to be mutated.
//! 1. Read/Writing - `Trees/Blobs` `<--biniou-->` `Bytes/Buffer`
//! 2. Encoding/Decoding - `Trees/Blobs` `<--Serde-->` `Structs`
//!
//! ## Quick Start
//!
//! #### Trees
//! One way of creating partial biniou documents is with tree nodes.
//! ```
//! use biniou::{Tree, TagIdent};
//!
//! // An example of an Int8 node with value 42.
//! let byte = Tree::Int8(42);
//!
//! // An example of a String node with value "Hello!"
//! let string = Tree::String("Hello!".to_string());
//!
//! // An example of an Array of Int8, with values of [1,2,3].
//! // Arrays share one element tag, written once for the whole container.
//! let array = Tree::Array(TagIdent::TAG_Int8, vec![Tree::Int8(1), Tree::Int8(2), Tree::Int8(3)]);
//!
//! // An example of a variant constructor with no payload
//! let variant = Tree::variant("Started", None);
//! ```
//! #### Blobs
//! Blobs allow for you to create full biniou documents: a record of named fields.
//! Field names are hashed onto the wire; the names themselves are never serialized.
//! ```
//! use biniou::{Blob, Tree};
//!
//! // Creating a blob
//! let mut blob = Blob::new();
//!
//! // Inserting a field
//! blob.insert("age", Tree::Int8(18));
//!
//! // Using the ToTree trait to insert a field.
//! blob.insert("id", 69420_i32);
//! ```
//!
//! #### Encoding / Writing
//! You can encode a partial or full biniou document using the `BiniouWrite` trait.
//! ```
//! use biniou::{Tree, BiniouWrite};
//! let tree = Tree::Uvint(300);
//!
//! // Writing to a buffer
//! let mut buffer = Vec::new();
//! tree.write(&mut buffer).unwrap();
//!
//! // Outputting to a Vec.
//! let bytes = tree.bytes().unwrap();
//!
//! assert_eq!(bytes, vec![0x10, 0xac, 0x02]);
//! ```
//!
//! #### Decoding / Reading
//! ```
//! use biniou::{Tree, TagIdent, BiniouRead};
//! let data = /* vec![...] */
//! # vec![0x13, 0x03, 0x01, 0x01, 0x02, 0x03];
//!
//! // Reading from a buffer
//! use std::io::Cursor;
//! let mut cursor = Cursor::new(data.clone());
//! let one = Tree::read(&mut cursor).unwrap();
//! // Also works for: Blob::read(...)
//!
//! // Reading from vec
//! let two = Tree::from_bytes(data).unwrap();
//!
//! assert_eq!(two, Tree::Array(TagIdent::TAG_Int8, vec![Tree::Int8(1), Tree::Int8(2), Tree::Int8(3)]));
//! ```
//! Decoders that should report readable field names take an [`Unhash`] built from
//! the names the producer used; without one, names decode as `#`-hex placeholders
//! while the hashes round-trip untouched.
//!
//! ### Serde
//! This library has serde serialisation and deserialization support for the types in
//! the [serde data model](https://serde.rs/data-model.html) except byte arrays.
//! Struct fields and enum variants are matched by their name hashes, so decoding a
//! document does not require registering any names first.
//!
//! Serde support requires the `serde` cargo feature, which is enabled by default.
//!
//! #### Encoding
//! Here is an basic example for encoding between a struct and bytes
//! ```rust
//! use serde::Serialize;
//! use biniou::{encode, BiniouWrite};
//!
//! // Define a Serializable struct
//! #[derive(Serialize)]
//! pub struct HelloWorld {
//!     name: String
//! }
//!
//! // Instantiate
//! let hello = HelloWorld {
//!     name: "Dinnerbone".to_string()
//! };
//!
//! // Encode/Serialise the struct into a blob.
//! let blob = encode(&hello).unwrap();
//!
//! // get the bytes from the blob.
//! let bytes = blob.bytes().unwrap();
//!
//! assert_eq!(bytes, vec![21, 1, 200, 255, 114, 75, 18, 10, 68, 105, 110, 110, 101, 114, 98, 111, 110, 101])
//! ```
//!
//! #### Decoding
//! Here is the reverse operation for the above example
//! ```
//! use serde::Deserialize;
//! use biniou::{Blob, BiniouRead, decode};
//!
//! // Define a Deserialisable struct
//! #[derive(Deserialize, PartialEq, Debug)]
//! pub struct HelloWorld {
//!     name: String
//! }
//!
//! // Bytes
//! let bytes = vec![21, 1, 200, 255, 114, 75, 18, 10, 68, 105, 110, 110, 101, 114, 98, 111, 110, 101];
//!
//! // Create a blob from bytes
//! let blob = Blob::from_bytes(bytes).unwrap();
//!
//! // Deserialize the blob into the struct
//! let hello = decode::<HelloWorld>(blob).unwrap();
//!
//! assert_eq!(hello, HelloWorld {
//!     name: "Dinnerbone".to_string()
//! });
//! ```
//!
//! #### Serde Functions
//! - `BLOB --> SERDE` [`decode(...)`](crate::decode())
//! - `BLOB <-- SERDE` [`encode(...)`](crate::encode())
//! - `TREE --> SERDE` [`decode_tree(...)`](crate::decode_tree)
//! - `TREE <-- SERDE` [`encode_tree(...)`](crate::encode_tree)

pub(crate) mod tags;
pub(crate) mod error;
pub(crate) mod hash;
pub(crate) mod vint;
pub(crate) mod blob;
pub(crate) mod encode;
pub(crate) mod decode;
pub(crate) mod front;
pub(crate) mod util;

pub use util::{FromTree, ToTree};
pub use front::{BiniouWrite, BiniouRead};
pub use tags::{TagIdent, Tree, Field, Column};
pub use blob::Blob;
pub use hash::{hash_name, Unhash};
pub use error::{BiniouError, BiniouResult};

// Primitive helpers for consumers building custom encodings without materialising
// a whole tree. Fixed-width integers go straight through `byteorder`.
pub use encode::{write_tree, write_body, write_ident, write_string, write_hashtag, write_numtag};
pub use decode::{read_tree, read_body, read_ident, read_string, read_hashtag, read_field_hashtag, read_numtag};
pub use vint::{write_uvint, write_svint, read_uvint, read_svint};


#[cfg(test)]
pub mod tests;

#[cfg(feature= "serde")]
mod ser;
#[cfg(feature= "serde")]
mod de;

#[cfg(feature= "serde")]
pub use front::{encode, encode_tree, decode, decode_tree};
