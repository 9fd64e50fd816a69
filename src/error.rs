use crate::tags::TagIdent;

#[derive(Debug)]
pub enum BiniouError {
    IO { error: std::io::Error },
    InvalidTag { found: u8 },
    InvalidFieldTag { hash: i32 },
    InvalidNumTag { found: u8 },
    InvalidVint,
    InvalidList { found: TagIdent, expecting: TagIdent },
    InvalidRow { expecting: usize, found: usize },
    InvalidRoot { found: TagIdent },
    HashCollision { hash: i32, existing: String, inserted: String },
    StringError,
    Custom(String),
    UnserializableType { type_name: String },
    InvalidType { found: TagIdent, expecting: TagIdent, when: String },
    InvalidChar,
    NoData { when: String }
}
pub type BiniouResult<T> = Result<T, BiniouError>;

pub(crate) fn digest_io<T>(r: Result<T, std::io::Error>) -> BiniouResult<T> {
    match r {
        Ok(s) => Ok(s),
        Err(e) => Err(BiniouError::IO { error: e })
    }
}


use std::fmt;

impl fmt::Display for BiniouError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            BiniouError::IO { error } => f.write_str(&format!("An IO error occurred: {:?}", error)),
            BiniouError::InvalidTag { found } => f.write_str(&format!("Invalid Tag Identifier with value {:02X}", found)),
            BiniouError::InvalidFieldTag { hash } => f.write_str(&format!("Field hashtag {:08x} is missing its argument bit", *hash as u32)),
            BiniouError::InvalidNumTag { found } => f.write_str(&format!("Numeric variant index {} does not fit in 7 bits", found)),
            BiniouError::InvalidVint => f.write_str("A variable-length integer did not fit in 64 bits"),
            BiniouError::InvalidList { found, expecting } => f.write_str(&format!("Invalid Array. Was expecting type {} but found {}", expecting, found)),
            BiniouError::InvalidRow { expecting, found } => f.write_str(&format!("Table row holds {} cells but the header declares {} columns", found, expecting)),
            BiniouError::InvalidRoot { found } => f.write_str(&format!("Biniou blob does not start with a record tag. Found {} tag", found)),
            BiniouError::HashCollision { hash, existing, inserted } => f.write_str(&format!("Names '{}' and '{}' both hash to {:08x}", existing, inserted, *hash as u32)),
            BiniouError::StringError => f.write_str("An error occurred while parsing a UTF-8 string"),
            BiniouError::Custom(e) => f.write_str(e),
            BiniouError::UnserializableType { type_name } => f.write_str(&format!("The type '{}' cannot be serialized into biniou", type_name)),
            BiniouError::InvalidType { found, expecting, when } => f.write_str(&format!("Found tag {}, was expecting {} when deserializing {}", found, expecting, when)),
            BiniouError::InvalidChar => f.write_str(&format!("Failed to deserialize char, length of {} was not 1", TagIdent::TAG_String)),
            BiniouError::NoData { when } => f.write_str(&format!("A value was required when deserializing {}, but none was given.", when)),
        }
    }
}

impl std::error::Error for BiniouError {}

#[cfg(feature= "serde")]
use serde::{ser::Error as SerializeError, de::Error as DeserializeError};

#[cfg(feature= "serde")]
impl SerializeError for BiniouError {
    fn custom<T>(msg: T) -> Self where T: fmt::Display {
        Self::Custom(msg.to_string())
    }
}
#[cfg(feature= "serde")]
impl DeserializeError for BiniouError {
    fn custom<T>(msg: T) -> Self where T: fmt::Display {
        Self::Custom(msg.to_string())
    }
}
