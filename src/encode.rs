use crate::tags::{Tree, TagIdent, Field, Column};
use crate::error::{BiniouResult, BiniouError, digest_io};
use crate::vint::{write_uvint, write_svint};

use byteorder::{BigEndian as BE, WriteBytesExt};
use std::io::Write;


/// Write a single tag byte.
pub fn write_ident<W: Write>(writer: &mut W, ident: TagIdent) -> BiniouResult<()> {
    digest_io(writer.write_u8(ident as u8))
}

/// Write a node in tagged form: its tag byte followed by its body.
pub fn write_tree<W: Write>(writer: &mut W, tree: &Tree) -> BiniouResult<()> {
    write_ident(writer, tree.ident())?;
    write_body(writer, tree)
}

/// Write the body of a node without its tag byte.
///
/// Used directly inside shared-tag containers (arrays, table cells, matrices) where
/// the tag has already been written once for the whole container.
pub fn write_body<W: Write>(writer: &mut W, tree: &Tree) -> BiniouResult<()> {
    match tree {
        // Writing an Int8 (u8)
        Tree::Int8(byte) => digest_io(writer.write_u8(*byte)),

        // Writing an Int16 (u16)
        Tree::Int16(short) => digest_io(writer.write_u16::<BE>(*short)),

        // Writing an Int32 (i32)
        Tree::Int32(int) => digest_io(writer.write_i32::<BE>(*int)),

        // Writing an Int64 (i64)
        Tree::Int64(long) => digest_io(writer.write_i64::<BE>(*long)),

        // Writing the 16 raw bytes of an Int128
        Tree::Int128(blob) => digest_io(writer.write_all(blob)),

        // Writing a Float64 as the big endian bytes of its bit pattern
        Tree::Float64(double) => digest_io(writer.write_f64::<BE>(*double)),

        Tree::Uvint(value) => write_uvint(writer, *value),

        Tree::Svint(value) => write_svint(writer, *value),

        // Write a length-prefixed string
        Tree::String(string) => write_string(writer, &string),

        Tree::Array(ident, elements) => {
            // Check every element carries the declared tag before committing bytes.
            ensure_array_integrity(*ident, &elements)?;

            // Write length, then the one shared element tag.
            write_uvint(writer, elements.len() as u64)?;
            write_ident(writer, *ident)?;

            // Write elements (without prefix)
            for element in elements {
                write_body(writer, element)?;
            }

            Ok(())
        }

        Tree::Tuple(elements) => {
            write_uvint(writer, elements.len() as u64)?;

            // Tuple elements are heterogeneous, so each is self-tagged.
            for element in elements {
                write_tree(writer, element)?;
            }

            Ok(())
        }

        Tree::Record(fields) => write_record(writer, fields),

        Tree::NumVariant(index, payload) => {
            write_numtag(writer, *index, payload.is_some())?;
            match payload {
                Some(value) => write_tree(writer, value),
                None => Ok(())
            }
        }

        // The name is not serialized, only the hash.
        Tree::Variant(_, hash, payload) => {
            write_hashtag(writer, *hash, payload.is_some())?;
            match payload {
                Some(value) => write_tree(writer, value),
                None => Ok(())
            }
        }

        Tree::TupleTable(idents, rows) => {
            write_uvint(writer, rows.len() as u64)?;
            write_uvint(writer, idents.len() as u64)?;
            for ident in idents {
                write_ident(writer, *ident)?;
            }

            // Cells row-major, untagged, checked against the column schema.
            for row in rows {
                ensure_row_integrity(&idents, row)?;
                for cell in row {
                    write_body(writer, cell)?;
                }
            }

            Ok(())
        }

        Tree::RecordTable(columns, rows) => {
            write_uvint(writer, rows.len() as u64)?;
            write_uvint(writer, columns.len() as u64)?;

            write_columns(writer, &columns)?;

            for row in rows {
                if row.len() != columns.len() {
                    return Err(BiniouError::InvalidRow { expecting: columns.len(), found: row.len() });
                }
                for (column, cell) in columns.iter().zip(row) {
                    if cell.ident() != column.tag {
                        return Err(BiniouError::InvalidList { found: cell.ident(), expecting: column.tag });
                    }
                    write_body(writer, cell)?;
                }
            }

            Ok(())
        }

        Tree::Matrix(ident, column_num, rows) => {
            write_uvint(writer, rows.len() as u64)?;
            write_uvint(writer, *column_num as u64)?;
            write_ident(writer, *ident)?;

            for row in rows {
                if row.len() != *column_num {
                    return Err(BiniouError::InvalidRow { expecting: *column_num, found: row.len() });
                }
                for cell in row {
                    if cell.ident() != *ident {
                        return Err(BiniouError::InvalidList { found: cell.ident(), expecting: *ident });
                    }
                    write_body(writer, cell)?;
                }
            }

            Ok(())
        }
    }
}


// Function checks through elements of an array to check they carry the declared tag.
// A shared-tag container that smuggled a differently-typed element in would decode
// as garbage, so this fails the encode instead.
pub(crate) fn ensure_array_integrity(ident: TagIdent, elements: &[Tree]) -> BiniouResult<()> {
    for element in elements {
        if element.ident() != ident {
            return Err(BiniouError::InvalidList { found: element.ident(), expecting: ident });
        }
    }
    Ok(())
}

// Row check for tuple tables: declared width, then per-cell column tags.
pub(crate) fn ensure_row_integrity(idents: &[TagIdent], row: &[Tree]) -> BiniouResult<()> {
    if row.len() != idents.len() {
        return Err(BiniouError::InvalidRow { expecting: idents.len(), found: row.len() });
    }
    for (ident, cell) in idents.iter().zip(row) {
        if cell.ident() != *ident {
            return Err(BiniouError::InvalidList { found: cell.ident(), expecting: *ident });
        }
    }
    Ok(())
}

// String writer.
// Strings are written the same way multiple times so this function exists.
pub fn write_string<W: Write>(writer: &mut W, string: &str) -> BiniouResult<()> {
    // Get the UTF-8 bytes of the string
    let bytes = string.as_bytes();

    // Write length of string
    write_uvint(writer, bytes.len() as u64)?;

    // Write the string.
    digest_io(writer.write_all(&bytes))
}

/// Write a 4 byte field/variant hashtag: the low 31 bits of the hash, big endian,
/// with the argument flag in the top bit of the first byte.
pub fn write_hashtag<W: Write>(writer: &mut W, hash: i32, has_arg: bool) -> BiniouResult<()> {
    let mut word = (hash as u32) & 0x7fff_ffff;
    if has_arg {
        word |= 0x8000_0000;
    }
    digest_io(writer.write_u32::<BE>(word))
}

/// Write a 1 byte numeric variant tag: 7 bit index, argument flag in the top bit.
pub fn write_numtag<W: Write>(writer: &mut W, index: u8, has_arg: bool) -> BiniouResult<()> {
    if index > 127 {
        return Err(BiniouError::InvalidNumTag { found: index });
    }
    let byte = if has_arg { index | 0x80 } else { index };
    digest_io(writer.write_u8(byte))
}

// Record bodies are shared between `Tree::Record` and the blob document writer.
pub(crate) fn write_record<W: Write>(writer: &mut W, fields: &[Field]) -> BiniouResult<()> {
    write_uvint(writer, fields.len() as u64)?;

    // Fields go out in producer order; the format does not sort them.
    for field in fields {
        write_hashtag(writer, field.hash, true)?;
        write_tree(writer, &field.value)?;
    }
    Ok(())
}

// Record-table headers. A record field always has a value, so every header hashtag
// carries the argument bit.
pub(crate) fn write_columns<W: Write>(writer: &mut W, columns: &[Column]) -> BiniouResult<()> {
    for column in columns {
        write_hashtag(writer, column.hash, true)?;
        write_ident(writer, column.tag)?;
    }
    Ok(())
}
