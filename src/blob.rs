use crate::tags::{Tree, Field};
use crate::util::{ToTree, FromTree};
use std::ops::Deref;

#[cfg_attr(feature="debug", derive(Debug))]
#[cfg_attr(feature="clone", derive(Clone))]
#[derive(PartialEq, Default)]
/// A biniou document: a root record under construction.
///
/// Unlike some tagged formats the root carries no name; a document is simply a
/// record node in tagged form. Fields keep the order they were inserted in, which
/// is the order they go out on the wire.
///
/// ## Example
/// ```
/// # use biniou::{Blob, BiniouWrite, BiniouRead};
///
/// // Creation
/// let mut blob = Blob::new();
/// blob.insert("name", "Bananrama");
///
/// // Encoding
/// let bytes = blob.bytes().unwrap();
///
/// // Decoding
/// let decoded = Blob::from_bytes(&bytes).unwrap();
///
/// // Retrieval (the hash survives the trip even without a registered name)
/// assert_eq!(decoded.fields[0].hash, biniou::hash_name("name"));
/// ```
///
pub struct Blob {
    /// Fields of the root record, in producer order
    pub fields: Vec<Field>
}

impl Blob {
    /// Create a new empty `Blob`.
    pub fn new() -> Blob {
        Blob { fields: Vec::new() }
    }

    /// Insert a field into the root record, hashing the name.
    ///
    /// The payload takes a `Tree` or any type that implements `ToTree`. Inserting a
    /// name that already exists replaces its value and returns the old one.
    /// ```
    /// # use biniou::{Blob, Tree};
    /// # let mut blob = Blob::new();
    /// blob.insert("name", "Hello World");
    /// blob.insert("age", Tree::Int8(18));
    /// ```
    pub fn insert<P: ToTree>(&mut self, name: &str, payload: P) -> Option<Tree> {
        let value = payload.into_tree();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => Some(std::mem::replace(&mut field.value, value)),
            None => {
                self.fields.push(Field::new(name, value));
                None
            }
        }
    }

    /// Get a field from the root record, with a given type.
    ///
    /// Uses the `FromTree` trait to convert a node into a desired type.
    /// ```
    /// # use biniou::Blob;
    /// # let mut blob = Blob::new();
    /// # blob.insert("name", "Hello World");
    /// let name = blob.get::<String>("name"); // Some("Hello World")
    /// let none = blob.get::<u8>("name"); // None
    /// # assert_eq!(name.unwrap(), &("Hello World".to_string()));
    /// # assert_eq!(none, None)
    /// ```
    pub fn get<T: FromTree>(&self, name: &str) -> Option<&T> where Self: Sized {
        T::from_borrowed_tree(&self.fields.iter().find(|field| field.name == name)?.value)
    }

    /// Get the raw node of a field.
    pub fn get_tree(&self, name: &str) -> Option<&Tree> {
        Some(&self.fields.iter().find(|field| field.name == name)?.value)
    }

    /// Get the blob as a record node.
    pub fn record(self) -> Tree {
        Tree::Record(self.fields)
    }
}

impl Deref for Blob {
    type Target = Vec<Field>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}
