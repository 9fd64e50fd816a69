use crate::tags::{Tree, TagIdent};

pub trait ToTree {
    fn into_tree(self) -> Tree;
}

pub trait FromTree: Sized {
    fn from_tree(tree: Tree) -> Option<Self>;
    fn from_borrowed_tree(tree: &Tree) -> Option<&Self>;
}


impl ToTree for Tree { fn into_tree(self) -> Tree { self } }

impl ToTree for u8 { fn into_tree(self) -> Tree { Tree::Int8(self) } }
impl ToTree for u16 { fn into_tree(self) -> Tree { Tree::Int16(self) } }
impl ToTree for i32 { fn into_tree(self) -> Tree { Tree::Int32(self) } }
impl ToTree for i64 { fn into_tree(self) -> Tree { Tree::Int64(self) } }
impl ToTree for [u8; 16] { fn into_tree(self) -> Tree { Tree::Int128(self) } }
impl ToTree for f64 { fn into_tree(self) -> Tree { Tree::Float64(self) } }
impl ToTree for u64 { fn into_tree(self) -> Tree { Tree::Uvint(self) } }
impl ToTree for String { fn into_tree(self) -> Tree { Tree::String(self) } }
impl ToTree for &str { fn into_tree(self) -> Tree { Tree::String(self.to_string()) } }

impl ToTree for Vec<u8> { fn into_tree(self) -> Tree { Tree::Array(TagIdent::TAG_Int8, self.into_iter().map(Tree::Int8).collect()) } }
impl ToTree for Vec<i32> { fn into_tree(self) -> Tree { Tree::Array(TagIdent::TAG_Int32, self.into_iter().map(Tree::Int32).collect()) } }
impl ToTree for Vec<i64> { fn into_tree(self) -> Tree { Tree::Array(TagIdent::TAG_Int64, self.into_iter().map(Tree::Int64).collect()) } }
impl ToTree for Vec<f64> { fn into_tree(self) -> Tree { Tree::Array(TagIdent::TAG_Float64, self.into_iter().map(Tree::Float64).collect()) } }
impl ToTree for Vec<String> { fn into_tree(self) -> Tree { Tree::Array(TagIdent::TAG_String, self.into_iter().map(Tree::String).collect()) } }

impl FromTree for u8 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Int8(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Int8(v) = tree { Some(v) } else { None } } }
impl FromTree for u16 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Int16(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Int16(v) = tree { Some(v) } else { None } } }
impl FromTree for i32 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Int32(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Int32(v) = tree { Some(v) } else { None } } }
impl FromTree for i64 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Int64(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Int64(v) = tree { Some(v) } else { None } } }
impl FromTree for [u8; 16] { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Int128(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Int128(v) = tree { Some(v) } else { None } } }
impl FromTree for f64 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Float64(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Float64(v) = tree { Some(v) } else { None } } }
impl FromTree for u64 { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::Uvint(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::Uvint(v) = tree { Some(v) } else { None } } }
impl FromTree for String { fn from_tree(tree: Tree) -> Option<Self> { if let Tree::String(v) = tree { Some(v) } else { None } } fn from_borrowed_tree(tree: &Tree) -> Option<&Self> { if let Tree::String(v) = tree { Some(v) } else { None } } }
