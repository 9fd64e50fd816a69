use crate::hash::hash_name;
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Eq)]
#[allow(non_camel_case_types)]
/// The numerical representation of node kinds.
///
/// Used within the internal encode/decode process and hence is returned within errors.
/// The byte values are part of the wire contract: encoder and decoder agree on them
/// and an unknown byte fails the decode.
pub enum TagIdent {
    /// ## TAG_Int8 (1)
    /// A single unsigned byte
    TAG_Int8 = 1,

    /// ## TAG_Int16 (2)
    /// A single unsigned, big endian 16 bit integer
    TAG_Int16 = 2,

    /// ## TAG_Int32 (3)
    /// A single signed, big endian 32 bit integer
    TAG_Int32 = 3,

    /// ## TAG_Int64 (4)
    /// A single signed, big endian 64 bit integer
    TAG_Int64 = 4,

    /// ## TAG_Int128 (5)
    /// 16 raw bytes, treated as an opaque blob
    TAG_Int128 = 5,

    /// ## TAG_Float64 (12)
    /// A single, big endian IEEE-754 double-precision floating point number, written as
    /// the bit pattern of its 64 bit word (NaN possible, preserved bit-for-bit)
    TAG_Float64 = 12,

    /// ## TAG_Uvint (16)
    /// An unsigned variable-length integer, 7 bits per byte, low bits first
    TAG_Uvint = 16,

    /// ## TAG_Svint (17)
    /// A signed variable-length integer, zigzag-mapped onto the unsigned encoding
    TAG_Svint = 17,

    /// ## TAG_String (18)
    /// A uvint-length-prefixed sequence of bytes
    TAG_String = 18,

    /// ## TAG_Array (19)
    /// A homogeneous sequence of untagged nodes. The uvint length comes first, then one
    /// shared element tag, then the element bodies. Zero length arrays still carry the
    /// element tag.
    TAG_Array = 19,

    /// ## TAG_Tuple (20)
    /// A heterogeneous fixed-length sequence. A uvint length followed by self-tagged nodes.
    TAG_Tuple = 20,

    /// ## TAG_Record (21)
    /// A set of named fields, written in producer order. Each field is a hashtag (argument
    /// bit always set) followed by a self-tagged node. Field names are never serialized,
    /// only their 31 bit hashes.
    TAG_Record = 21,

    /// ## TAG_NumVariant (22)
    /// A small integer constructor in [0,127] with an optional self-tagged payload. The
    /// numtag byte carries the payload flag in its high bit.
    TAG_NumVariant = 22,

    /// ## TAG_Variant (23)
    /// A hashed-name constructor with an optional self-tagged payload. The hashtag carries
    /// the payload flag in the high bit of its first byte.
    TAG_Variant = 23,

    /// ## TAG_TupleTable (24)
    /// Row-major tuples with the column tags factored out into a header. A uvint row
    /// count, a uvint column count, the column tags, then untagged cells.
    TAG_TupleTable = 24,

    /// ## TAG_RecordTable (25)
    /// Row-major records with the field header factored out. Each header entry is a
    /// hashtag (argument bit set) plus a column tag; rows are untagged cells.
    TAG_RecordTable = 25,

    /// ## TAG_Matrix (26)
    /// A rectangular row-major array of one element tag. A uvint row count, a uvint
    /// column count, one tag byte, then untagged cells.
    TAG_Matrix = 26,
}

impl TagIdent {
    /// Parse a `u8` into a `TagIdent`
    pub fn parse(value: &u8) -> Option<TagIdent> {
        match value {
            1 => Some(TagIdent::TAG_Int8),
            2 => Some(TagIdent::TAG_Int16),
            3 => Some(TagIdent::TAG_Int32),
            4 => Some(TagIdent::TAG_Int64),
            5 => Some(TagIdent::TAG_Int128),
            12 => Some(TagIdent::TAG_Float64),
            16 => Some(TagIdent::TAG_Uvint),
            17 => Some(TagIdent::TAG_Svint),
            18 => Some(TagIdent::TAG_String),
            19 => Some(TagIdent::TAG_Array),
            20 => Some(TagIdent::TAG_Tuple),
            21 => Some(TagIdent::TAG_Record),
            22 => Some(TagIdent::TAG_NumVariant),
            23 => Some(TagIdent::TAG_Variant),
            24 => Some(TagIdent::TAG_TupleTable),
            25 => Some(TagIdent::TAG_RecordTable),
            26 => Some(TagIdent::TAG_Matrix),
            _ => None
        }
    }
}

impl fmt::Display for TagIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            TagIdent::TAG_Int8 => f.write_str("TAG_Int8"),
            TagIdent::TAG_Int16 => f.write_str("TAG_Int16"),
            TagIdent::TAG_Int32 => f.write_str("TAG_Int32"),
            TagIdent::TAG_Int64 => f.write_str("TAG_Int64"),
            TagIdent::TAG_Int128 => f.write_str("TAG_Int128"),
            TagIdent::TAG_Float64 => f.write_str("TAG_Float64"),
            TagIdent::TAG_Uvint => f.write_str("TAG_Uvint"),
            TagIdent::TAG_Svint => f.write_str("TAG_Svint"),
            TagIdent::TAG_String => f.write_str("TAG_String"),
            TagIdent::TAG_Array => f.write_str("TAG_Array"),
            TagIdent::TAG_Tuple => f.write_str("TAG_Tuple"),
            TagIdent::TAG_Record => f.write_str("TAG_Record"),
            TagIdent::TAG_NumVariant => f.write_str("TAG_NumVariant"),
            TagIdent::TAG_Variant => f.write_str("TAG_Variant"),
            TagIdent::TAG_TupleTable => f.write_str("TAG_TupleTable"),
            TagIdent::TAG_RecordTable => f.write_str("TAG_RecordTable"),
            TagIdent::TAG_Matrix => f.write_str("TAG_Matrix"),
        }
    }
}


#[derive(Debug, PartialEq)]
#[cfg_attr(feature="clone", derive(Clone))]
/// A biniou tree node, representing the 17 datatypes supported by the format.
///
/// A serialized document is exactly one top-level node written in tagged form; the
/// format is self-delimiting and carries no envelope.
pub enum Tree {
    Int8(u8),
    Int16(u16),
    Int32(i32),
    Int64(i64),
    Int128([u8; 16]),
    Float64(f64),
    Uvint(u64),
    Svint(i64),
    String(String),
    /// Shared element tag plus the elements. Every element must carry the declared tag.
    Array(TagIdent, Vec<Tree>),
    Tuple(Vec<Tree>),
    Record(Vec<Field>),
    NumVariant(u8, Option<Box<Tree>>),
    /// Constructor name, its 31 bit hash, and the optional payload. Only the hash goes
    /// on the wire; the name a decoder reports depends on the unhash it was given.
    Variant(String, i32, Option<Box<Tree>>),
    TupleTable(Vec<TagIdent>, Vec<Vec<Tree>>),
    RecordTable(Vec<Column>, Vec<Vec<Tree>>),
    /// Element tag, column count, rows. The column count is explicit so zero-row
    /// matrices keep their shape.
    Matrix(TagIdent, usize, Vec<Vec<Tree>>),
}

impl Tree {
    /// The `TagIdent` representation of a node.
    /// Used to identify the prefix of a type.
    pub fn ident(&self) -> TagIdent {
        match &self {
            Tree::Int8(_) => TagIdent::TAG_Int8,
            Tree::Int16(_) => TagIdent::TAG_Int16,
            Tree::Int32(_) => TagIdent::TAG_Int32,
            Tree::Int64(_) => TagIdent::TAG_Int64,
            Tree::Int128(_) => TagIdent::TAG_Int128,
            Tree::Float64(_) => TagIdent::TAG_Float64,
            Tree::Uvint(_) => TagIdent::TAG_Uvint,
            Tree::Svint(_) => TagIdent::TAG_Svint,
            Tree::String(_) => TagIdent::TAG_String,
            Tree::Array(_, _) => TagIdent::TAG_Array,
            Tree::Tuple(_) => TagIdent::TAG_Tuple,
            Tree::Record(_) => TagIdent::TAG_Record,
            Tree::NumVariant(_, _) => TagIdent::TAG_NumVariant,
            Tree::Variant(_, _, _) => TagIdent::TAG_Variant,
            Tree::TupleTable(_, _) => TagIdent::TAG_TupleTable,
            Tree::RecordTable(_, _) => TagIdent::TAG_RecordTable,
            Tree::Matrix(_, _, _) => TagIdent::TAG_Matrix,
        }
    }

    /// Build a variant node from a name, hashing it on the way.
    pub fn variant(name: &str, payload: Option<Tree>) -> Tree {
        Tree::Variant(name.to_string(), hash_name(name), payload.map(Box::new))
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature="clone", derive(Clone))]
/// A named record field. The hash is the wire identity; the name is whatever the
/// producer called the field, or whatever the unhash reported on decode.
pub struct Field {
    pub name: String,
    pub hash: i32,
    pub value: Tree
}

impl Field {
    /// Create a field from a name and payload, hashing the name.
    pub fn new(name: &str, value: Tree) -> Field {
        Field { name: name.to_string(), hash: hash_name(name), value }
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature="clone", derive(Clone))]
/// One record-table header entry: a named column and the tag its cells carry.
pub struct Column {
    pub name: String,
    pub hash: i32,
    pub tag: TagIdent
}

impl Column {
    pub fn new(name: &str, tag: TagIdent) -> Column {
        Column { name: name.to_string(), hash: hash_name(name), tag }
    }
}
