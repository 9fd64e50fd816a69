use crate::tags::{Tree, TagIdent, Field, Column};
use crate::hash::{Unhash, extend_sign};
use crate::error::{BiniouResult, BiniouError, digest_io};
use crate::vint::{read_uvint, read_svint};

use byteorder::{ReadBytesExt, BE};
use std::io::Read;

pub fn read_ident<R: Read>(reader: &mut R) -> BiniouResult<TagIdent> {
    let byte = digest_io(reader.read_u8())?;
    match TagIdent::parse(&byte) {
        Some(x) => Ok(x),
        None => Err(BiniouError::InvalidTag { found: byte })
    }
}

/// Read one self-tagged node: a tag byte followed by the matching body.
///
/// Field and variant hashes are resolved to names through `unhash`; an empty table
/// reports every name as its hex placeholder.
pub fn read_tree<R: Read>(reader: &mut R, unhash: &Unhash) -> BiniouResult<Tree> {
    let ident = read_ident(reader)?;
    read_body(reader, &ident, unhash)
}

/// Read the body of a node whose tag is already known.
///
/// This is the dispatch the shared-tag containers use: arrays, table columns and
/// matrices read their cells through here with the container's declared tag.
pub fn read_body<R: Read>(reader: &mut R, ident: &TagIdent, unhash: &Unhash) -> BiniouResult<Tree> {
    match ident {
        // read int8 (u8)
        TagIdent::TAG_Int8 => Ok(Tree::Int8(digest_io(reader.read_u8())?)),

        // read int16 (u16)
        TagIdent::TAG_Int16 => Ok(Tree::Int16(digest_io(reader.read_u16::<BE>())?)),

        // read int32 (i32)
        TagIdent::TAG_Int32 => Ok(Tree::Int32(digest_io(reader.read_i32::<BE>())?)),

        // read int64 (i64)
        TagIdent::TAG_Int64 => Ok(Tree::Int64(digest_io(reader.read_i64::<BE>())?)),

        // read the 16 opaque bytes of an int128
        TagIdent::TAG_Int128 => {
            let mut blob = [0u8; 16];
            digest_io(reader.read_exact(&mut blob))?;
            Ok(Tree::Int128(blob))
        }

        // read float64 from its bit pattern
        TagIdent::TAG_Float64 => Ok(Tree::Float64(digest_io(reader.read_f64::<BE>())?)),

        TagIdent::TAG_Uvint => Ok(Tree::Uvint(read_uvint(reader)?)),

        TagIdent::TAG_Svint => Ok(Tree::Svint(read_svint(reader)?)),

        // read string
        TagIdent::TAG_String => Ok(Tree::String(read_string(reader)?)),

        // read array
        TagIdent::TAG_Array => {
            // read length, then the one shared element tag
            let length = read_uvint(reader)? as usize;
            let ident = read_ident(reader)?;

            let mut elements = Vec::new();

            // read untagged elements through the shared tag
            for _ in 0..length {
                elements.push(read_body(reader, &ident, unhash)?);
            }

            Ok(Tree::Array(ident, elements))
        }

        // read tuple, each element self-tagged
        TagIdent::TAG_Tuple => {
            let length = read_uvint(reader)? as usize;

            let mut elements = Vec::new();
            for _ in 0..length {
                elements.push(read_tree(reader, unhash)?);
            }

            Ok(Tree::Tuple(elements))
        }

        // read record
        TagIdent::TAG_Record => Ok(Tree::Record(read_record(reader, unhash)?)),

        TagIdent::TAG_NumVariant => {
            let (index, has_arg) = read_numtag(reader)?;
            let payload = if has_arg {
                Some(Box::new(read_tree(reader, unhash)?))
            } else {
                None
            };
            Ok(Tree::NumVariant(index, payload))
        }

        TagIdent::TAG_Variant => {
            let (hash, has_arg) = read_hashtag(reader)?;
            let name = unhash.resolve(hash);
            let payload = if has_arg {
                Some(Box::new(read_tree(reader, unhash)?))
            } else {
                None
            };
            Ok(Tree::Variant(name, hash, payload))
        }

        TagIdent::TAG_TupleTable => {
            let row_num = read_uvint(reader)? as usize;
            let column_num = read_uvint(reader)? as usize;

            let mut idents = Vec::new();
            for _ in 0..column_num {
                idents.push(read_ident(reader)?);
            }

            // cells row-major, untagged, each through its column tag
            let mut rows = Vec::new();
            for _ in 0..row_num {
                let mut row = Vec::new();
                for ident in &idents {
                    row.push(read_body(reader, ident, unhash)?);
                }
                rows.push(row);
            }

            Ok(Tree::TupleTable(idents, rows))
        }

        TagIdent::TAG_RecordTable => {
            let row_num = read_uvint(reader)? as usize;
            let column_num = read_uvint(reader)? as usize;

            let mut columns = Vec::new();
            for _ in 0..column_num {
                let hash = read_field_hashtag(reader)?;
                let name = unhash.resolve(hash);
                let tag = read_ident(reader)?;
                columns.push(Column { name, hash, tag });
            }

            let mut rows = Vec::new();
            for _ in 0..row_num {
                let mut row = Vec::new();
                for column in &columns {
                    row.push(read_body(reader, &column.tag, unhash)?);
                }
                rows.push(row);
            }

            Ok(Tree::RecordTable(columns, rows))
        }

        TagIdent::TAG_Matrix => {
            let row_num = read_uvint(reader)? as usize;
            let column_num = read_uvint(reader)? as usize;
            let ident = read_ident(reader)?;

            let mut rows = Vec::new();
            for _ in 0..row_num {
                let mut row = Vec::new();
                for _ in 0..column_num {
                    row.push(read_body(reader, &ident, unhash)?);
                }
                rows.push(row);
            }

            Ok(Tree::Matrix(ident, column_num, rows))
        }
    }
}

// Bounded byte grab. The buffer grows only as bytes actually arrive, so a hostile
// declared length cannot reserve more memory than the input can back.
pub(crate) fn read_size<R: Read>(reader: &mut R, size: usize) -> BiniouResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let read = digest_io(reader.take(size as u64).read_to_end(&mut buffer))?;
    if read != size {
        return Err(BiniouError::IO { error: std::io::ErrorKind::UnexpectedEof.into() });
    }
    Ok(buffer)
}

pub fn read_string<R: Read>(reader: &mut R) -> BiniouResult<String> {
    let length = read_uvint(reader)? as usize;

    let buffer = read_size(reader, length)?;

    match String::from_utf8(buffer) {
        Ok(string) => Ok(string),
        Err(_) => Err(BiniouError::StringError)
    }
}

/// Read a 4 byte hashtag: the argument flag from the top bit, the 31 bit hash from
/// the rest, sign-extended from bit 30.
pub fn read_hashtag<R: Read>(reader: &mut R) -> BiniouResult<(i32, bool)> {
    let word = digest_io(reader.read_u32::<BE>())?;
    let has_arg = word & 0x8000_0000 != 0;
    Ok((extend_sign(word & 0x7fff_ffff), has_arg))
}

/// Read a record field hashtag. The argument bit is an invariant here, not data:
/// a record field always has a value, so a clear bit means a corrupt document.
pub fn read_field_hashtag<R: Read>(reader: &mut R) -> BiniouResult<i32> {
    let (hash, has_arg) = read_hashtag(reader)?;
    if !has_arg {
        return Err(BiniouError::InvalidFieldTag { hash });
    }
    Ok(hash)
}

/// Read a 1 byte numeric variant tag: 7 bit index plus the argument flag.
pub fn read_numtag<R: Read>(reader: &mut R) -> BiniouResult<(u8, bool)> {
    let byte = digest_io(reader.read_u8())?;
    Ok((byte & 0x7f, byte & 0x80 != 0))
}

// Record bodies are shared between `Tree::Record` and the blob document reader.
pub(crate) fn read_record<R: Read>(reader: &mut R, unhash: &Unhash) -> BiniouResult<Vec<Field>> {
    let length = read_uvint(reader)? as usize;

    let mut fields = Vec::new();
    for _ in 0..length {
        let hash = read_field_hashtag(reader)?;
        let name = unhash.resolve(hash);
        let value = read_tree(reader, unhash)?;
        fields.push(Field { name, hash, value });
    }
    Ok(fields)
}
