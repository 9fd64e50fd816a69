use crate::blob::Blob;
use crate::error::BiniouError;
use crate::hash::{hash_name, Unhash};
use crate::tags::{Column, Field, TagIdent, Tree};
use crate::front::{BiniouRead, BiniouWrite};
use crate::vint::{read_uvint, read_svint, write_uvint, write_svint};

use std::io::Cursor;

fn uvint_bytes(value: u64) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_uvint(&mut buffer, value).unwrap();
    buffer
}

fn svint_bytes(value: i64) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_svint(&mut buffer, value).unwrap();
    buffer
}

#[test]
fn uvint_literals() {
    assert_eq!(uvint_bytes(0), vec![0x00]);
    assert_eq!(uvint_bytes(127), vec![0x7f]);
    assert_eq!(uvint_bytes(128), vec![0x80, 0x01]);
    assert_eq!(uvint_bytes(300), vec![0xac, 0x02]);
}

#[test]
fn uvint_round_trip() {
    for value in vec![0, 1, 127, 128, 300, 16383, 16384, u64::max_value()] {
        let bytes = uvint_bytes(value);
        assert_eq!(read_uvint(&mut Cursor::new(&bytes)).unwrap(), value);
    }
}

#[test]
fn svint_zigzag_literals() {
    assert_eq!(svint_bytes(0), vec![0x00]);
    assert_eq!(svint_bytes(-1), vec![0x01]);
    assert_eq!(svint_bytes(1), vec![0x02]);
    assert_eq!(svint_bytes(-2), vec![0x03]);
}

#[test]
fn svint_round_trip() {
    for value in vec![0, -1, 1, -64, 64, i64::min_value(), i64::max_value()] {
        let bytes = svint_bytes(value);
        assert_eq!(read_svint(&mut Cursor::new(&bytes)).unwrap(), value);
    }
}

#[test]
fn uvint_overlong_fails() {
    // 11 continuation bytes push past 64 value bits.
    let bytes = vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
    assert!(matches!(read_uvint(&mut Cursor::new(&bytes)), Err(BiniouError::InvalidVint)));
}

#[test]
fn uvint_truncated_fails() {
    let bytes = vec![0x80];
    assert!(matches!(read_uvint(&mut Cursor::new(&bytes)), Err(BiniouError::IO { .. })));
}

#[test]
fn hash_literals() {
    assert_eq!(hash_name(""), 0);
    assert_eq!(hash_name("a"), 97);
    assert_eq!(hash_name("abc"), 0x0049_F062);
}

#[test]
fn hash_sign_extension() {
    // "name" lands with bit 30 set, so the 31 bit value reads negative.
    let hash = hash_name("name");
    assert!(hash < 0);
    assert_eq!(hash as u32, 0xc8ff_724b);
}

#[test]
fn unhash_resolves_registered_names() {
    let unhash = Unhash::build(vec!["name", "id"]).unwrap();
    assert_eq!(unhash.resolve(hash_name("name")), "name");
    assert_eq!(unhash.resolve(hash_name("id")), "id");
}

#[test]
fn unhash_placeholder_is_fixed_width_hex() {
    let unhash = Unhash::new();
    assert_eq!(unhash.resolve(0x2a), "#0000002a");
    assert_eq!(unhash.resolve(hash_name("name")), "#c8ff724b");
}

#[test]
fn unhash_accepts_duplicate_names() {
    assert!(Unhash::build(vec!["age", "age"]).is_ok());
}

#[test]
fn unhash_rejects_distinct_colliding_names() {
    // These two strings genuinely collide in the 31 bit hash space.
    assert_eq!(hash_name("az!za"), hash_name("hnLT}"));

    match Unhash::build(vec!["az!za", "hnLT}"]) {
        Err(BiniouError::HashCollision { existing, inserted, .. }) => {
            assert_eq!(existing, "az!za");
            assert_eq!(inserted, "hnLT}");
        }
        other => panic!("expected a collision, got {:?}", other.is_ok())
    }
}

#[test]
fn wire_literal_uvint_zero() {
    assert_eq!(Tree::Uvint(0).bytes().unwrap(), vec![0x10, 0x00]);
}

#[test]
fn wire_literal_int16() {
    assert_eq!(Tree::Int16(0x0102).bytes().unwrap(), vec![0x02, 0x01, 0x02]);
}

#[test]
fn wire_literal_string() {
    assert_eq!(Tree::String("ab".to_string()).bytes().unwrap(), vec![0x12, 0x02, 0x61, 0x62]);
}

#[test]
fn wire_literal_variant_without_payload() {
    let tree = Tree::variant("abc", None);
    assert_eq!(tree.bytes().unwrap(), vec![0x17, 0x00, 0x49, 0xf0, 0x62]);
}

#[test]
fn wire_literal_variant_with_payload() {
    let tree = Tree::variant("abc", Some(Tree::Int8(5)));
    assert_eq!(tree.bytes().unwrap(), vec![0x17, 0x80, 0x49, 0xf0, 0x62, 0x01, 0x05]);
}

#[test]
fn wire_literal_array() {
    let tree = Tree::Array(TagIdent::TAG_Int8, vec![Tree::Int8(1), Tree::Int8(2), Tree::Int8(3)]);
    assert_eq!(tree.bytes().unwrap(), vec![0x13, 0x03, 0x01, 0x01, 0x02, 0x03]);
}

#[test]
fn wire_literal_num_variant() {
    assert_eq!(Tree::NumVariant(3, None).bytes().unwrap(), vec![0x16, 0x03]);
    assert_eq!(
        Tree::NumVariant(3, Some(Box::new(Tree::Int8(0)))).bytes().unwrap(),
        vec![0x16, 0x83, 0x01, 0x00]
    );
}

#[test]
fn wire_literal_float64() {
    assert_eq!(
        Tree::Float64(1.0).bytes().unwrap(),
        vec![0x0c, 0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn first_byte_is_the_node_tag() {
    let samples = vec![
        Tree::Int8(7),
        Tree::Int64(-1),
        Tree::Svint(-20),
        Tree::Tuple(vec![Tree::Int8(1), Tree::String("x".to_string())]),
        Tree::Record(vec![Field::new("a", Tree::Int8(1))]),
        Tree::Matrix(TagIdent::TAG_Int8, 0, vec![]),
    ];
    for tree in samples {
        assert_eq!(tree.bytes().unwrap()[0], tree.ident() as u8);
    }
}

#[test]
fn round_trip_primitives() {
    let samples = vec![
        Tree::Int8(255),
        Tree::Int16(0xbeef),
        Tree::Int32(-123456789),
        Tree::Int64(i64::min_value()),
        Tree::Int128(*b"0123456789abcdef"),
        Tree::Float64(-2.5),
        Tree::Uvint(u64::max_value()),
        Tree::Svint(-3),
        Tree::String("hello world".to_string()),
    ];
    for tree in samples {
        let bytes = tree.bytes().unwrap();
        assert_eq!(Tree::from_bytes(&bytes).unwrap(), tree);
    }
}

#[test]
fn round_trip_nested_containers() {
    let unhash = Unhash::build(vec!["inner", "items", "Started"]).unwrap();
    let tree = Tree::Record(vec![
        Field::new("inner", Tree::Tuple(vec![
            Tree::variant("Started", Some(Tree::Uvint(9))),
            Tree::Array(TagIdent::TAG_String, vec![
                Tree::String("a".to_string()),
                Tree::String("b".to_string()),
            ]),
        ])),
        Field::new("items", Tree::NumVariant(7, None)),
    ]);

    let bytes = tree.bytes().unwrap();
    assert_eq!(Tree::from_bytes_with(&bytes, &unhash).unwrap(), tree);
}

#[test]
fn round_trip_tuple_table() {
    let unhash = Unhash::new();
    let tree = Tree::TupleTable(
        vec![TagIdent::TAG_Int8, TagIdent::TAG_String],
        vec![
            vec![Tree::Int8(1), Tree::String("a".to_string())],
            vec![Tree::Int8(2), Tree::String("bc".to_string())],
        ],
    );
    let bytes = tree.bytes().unwrap();
    assert_eq!(
        bytes,
        vec![0x18, 0x02, 0x02, 0x01, 0x12, 0x01, 0x01, 0x61, 0x02, 0x02, 0x62, 0x63]
    );
    assert_eq!(Tree::from_bytes_with(&bytes, &unhash).unwrap(), tree);
}

#[test]
fn round_trip_record_table() {
    let unhash = Unhash::build(vec!["id", "label"]).unwrap();
    let tree = Tree::RecordTable(
        vec![
            Column::new("id", TagIdent::TAG_Int32),
            Column::new("label", TagIdent::TAG_String),
        ],
        vec![
            vec![Tree::Int32(1), Tree::String("one".to_string())],
            vec![Tree::Int32(2), Tree::String("two".to_string())],
        ],
    );
    let bytes = tree.bytes().unwrap();
    assert_eq!(Tree::from_bytes_with(&bytes, &unhash).unwrap(), tree);

    // The header hashtags always carry the argument bit.
    assert_eq!(bytes[3] & 0x80, 0x80);
}

#[test]
fn round_trip_matrix() {
    let tree = Tree::Matrix(
        TagIdent::TAG_Int16,
        2,
        vec![
            vec![Tree::Int16(1), Tree::Int16(2)],
            vec![Tree::Int16(3), Tree::Int16(4)],
        ],
    );
    let bytes = tree.bytes().unwrap();
    assert_eq!(
        bytes,
        vec![0x1a, 0x02, 0x02, 0x02, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]
    );
    assert_eq!(Tree::from_bytes(&bytes).unwrap(), tree);
}

#[test]
fn zero_row_tables_keep_their_schema() {
    let table = Tree::TupleTable(vec![TagIdent::TAG_Int8, TagIdent::TAG_String], vec![]);
    let bytes = table.bytes().unwrap();
    assert_eq!(bytes, vec![0x18, 0x00, 0x02, 0x01, 0x12]);
    assert_eq!(Tree::from_bytes(&bytes).unwrap(), table);

    let matrix = Tree::Matrix(TagIdent::TAG_Float64, 3, vec![]);
    assert_eq!(Tree::from_bytes(&matrix.bytes().unwrap()).unwrap(), matrix);
}

#[test]
fn record_decoded_without_unhash_keeps_hashes() {
    let tree = Tree::Record(vec![Field::new("name", Tree::Int8(1))]);
    let decoded = Tree::from_bytes(&tree.bytes().unwrap()).unwrap();

    match decoded {
        Tree::Record(fields) => {
            assert_eq!(fields[0].hash, hash_name("name"));
            assert_eq!(fields[0].name, "#c8ff724b");
        }
        other => panic!("expected a record, got {}", other.ident())
    }
}

#[test]
fn record_fields_keep_producer_order() {
    let unhash = Unhash::build(vec!["b", "a"]).unwrap();
    let tree = Tree::Record(vec![
        Field::new("b", Tree::Int8(2)),
        Field::new("a", Tree::Int8(1)),
    ]);
    let decoded = Tree::from_bytes_with(&tree.bytes().unwrap(), &unhash).unwrap();
    match decoded {
        Tree::Record(fields) => {
            assert_eq!(fields[0].name, "b");
            assert_eq!(fields[1].name, "a");
        }
        other => panic!("expected a record, got {}", other.ident())
    }
}

#[test]
fn nan_bit_pattern_survives() {
    let nan = f64::from_bits(0x7ff8_0000_dead_beef);
    let bytes = Tree::Float64(nan).bytes().unwrap();
    match Tree::from_bytes(&bytes).unwrap() {
        Tree::Float64(value) => assert_eq!(value.to_bits(), 0x7ff8_0000_dead_beef),
        other => panic!("expected a float, got {}", other.ident())
    }
}

#[test]
fn trailing_bytes_are_left_alone() {
    let tree = Tree::from_bytes(vec![0x10, 0x00, 0xaa, 0xbb]).unwrap();
    assert_eq!(tree, Tree::Uvint(0));
}

#[test]
fn encode_rejects_mistyped_array_element() {
    let tree = Tree::Array(TagIdent::TAG_Int8, vec![Tree::Int8(1), Tree::Int16(2)]);
    assert!(matches!(
        tree.bytes(),
        Err(BiniouError::InvalidList { found: TagIdent::TAG_Int16, expecting: TagIdent::TAG_Int8 })
    ));
}

#[test]
fn encode_rejects_ragged_tuple_table() {
    let tree = Tree::TupleTable(
        vec![TagIdent::TAG_Int8, TagIdent::TAG_Int8],
        vec![vec![Tree::Int8(1)]],
    );
    assert!(matches!(
        tree.bytes(),
        Err(BiniouError::InvalidRow { expecting: 2, found: 1 })
    ));
}

#[test]
fn encode_rejects_ragged_matrix() {
    let tree = Tree::Matrix(
        TagIdent::TAG_Int8,
        2,
        vec![vec![Tree::Int8(1), Tree::Int8(2)], vec![Tree::Int8(3)]],
    );
    assert!(matches!(
        tree.bytes(),
        Err(BiniouError::InvalidRow { expecting: 2, found: 1 })
    ));
}

#[test]
fn encode_rejects_mistyped_table_cell() {
    let tree = Tree::RecordTable(
        vec![Column::new("id", TagIdent::TAG_Int32)],
        vec![vec![Tree::String("oops".to_string())]],
    );
    assert!(matches!(
        tree.bytes(),
        Err(BiniouError::InvalidList { found: TagIdent::TAG_String, expecting: TagIdent::TAG_Int32 })
    ));
}

#[test]
fn encode_rejects_wide_num_variant() {
    let tree = Tree::NumVariant(200, None);
    assert!(matches!(tree.bytes(), Err(BiniouError::InvalidNumTag { found: 200 })));
}

#[test]
fn decode_rejects_unknown_tag() {
    assert!(matches!(
        Tree::from_bytes(vec![0xff]),
        Err(BiniouError::InvalidTag { found: 0xff })
    ));
}

#[test]
fn decode_rejects_truncated_string() {
    assert!(matches!(
        Tree::from_bytes(vec![0x12, 0x05, 0x61]),
        Err(BiniouError::IO { .. })
    ));
}

#[test]
fn decode_rejects_invalid_utf8_string() {
    assert!(matches!(
        Tree::from_bytes(vec![0x12, 0x01, 0xff]),
        Err(BiniouError::StringError)
    ));
}

#[test]
fn decode_rejects_truncated_hashtag() {
    assert!(matches!(
        Tree::from_bytes(vec![0x17, 0x00, 0x4a]),
        Err(BiniouError::IO { .. })
    ));
}

#[test]
fn decode_rejects_field_hashtag_without_argument_bit() {
    // A record declaring one field whose hashtag has a clear top bit.
    let bytes = vec![0x15, 0x01, 0x00, 0x00, 0x00, 0x61, 0x01, 0x05];
    assert!(matches!(
        Tree::from_bytes(bytes),
        Err(BiniouError::InvalidFieldTag { hash: 0x61 })
    ));
}

#[test]
fn decode_rejects_overdeclared_array_length() {
    // Declares four elements but only carries two bytes of cells.
    assert!(matches!(
        Tree::from_bytes(vec![0x13, 0x04, 0x01, 0x01, 0x02]),
        Err(BiniouError::IO { .. })
    ));
}

#[test]
fn blob_insert_get_replace() {
    let mut blob = Blob::new();
    blob.insert("name", "Bananrama");
    blob.insert("age", Tree::Int8(18));

    assert_eq!(blob.get::<String>("name").unwrap(), &"Bananrama".to_string());
    assert_eq!(blob.get::<u8>("age").unwrap(), &18);
    assert_eq!(blob.get::<u8>("name"), None);

    let old = blob.insert("age", Tree::Int8(19));
    assert_eq!(old, Some(Tree::Int8(18)));
    assert_eq!(blob.fields.len(), 2);
}

#[test]
fn blob_round_trip() {
    let mut blob = Blob::new();
    blob.insert("name", "Bananrama");
    blob.insert("score", 42_i32);

    let unhash = Unhash::build(vec!["name", "score"]).unwrap();
    let decoded = Blob::from_bytes_with(&blob.bytes().unwrap(), &unhash).unwrap();
    assert_eq!(decoded, blob);
}

#[test]
fn blob_rejects_non_record_root() {
    assert!(matches!(
        Blob::from_bytes(vec![0x10, 0x00]),
        Err(BiniouError::InvalidRoot { found: TagIdent::TAG_Uvint })
    ));
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use crate::front::{encode, encode_tree, decode, decode_tree, BiniouRead, BiniouWrite};
    use crate::blob::Blob;
    use crate::tags::{TagIdent, Tree};
    use serde::{Serialize, Deserialize};
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Player {
        name: String,
        health: u8,
        mana: u16,
        score: i32,
        balance: i64,
        delta: i8,
        seed: u64,
        ratio: f64,
        alive: bool,
        motto: Option<String>,
        title: Option<String>,
        inventory: Vec<i32>,
    }

    fn player() -> Player {
        Player {
            name: "Dinnerbone".to_string(),
            health: 20,
            mana: 1000,
            score: -5,
            balance: 1 << 40,
            delta: -7,
            seed: u64::max_value(),
            ratio: 0.25,
            alive: true,
            motto: Some("onwards".to_string()),
            title: None,
            inventory: vec![1, 2, 3],
        }
    }

    #[test]
    fn struct_round_trip() {
        let blob = encode(&player()).unwrap();
        let bytes = blob.bytes().unwrap();
        let decoded = decode::<Player>(Blob::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, player());
    }

    #[test]
    fn dropped_option_field_is_absent_from_the_record() {
        let blob = encode(&player()).unwrap();
        assert!(blob.get_tree("motto").is_some());
        assert!(blob.get_tree("title").is_none());
    }

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    enum Event {
        Started,
        Scored(i32),
        Moved(i32, i32),
        Renamed { from: String, to: String },
    }

    #[test]
    fn enum_round_trips() {
        let events = vec![
            Event::Started,
            Event::Scored(12),
            Event::Moved(-1, 4),
            Event::Renamed { from: "a".to_string(), to: "b".to_string() },
        ];
        for event in events {
            let tree = encode_tree(&event).unwrap().unwrap();
            assert_eq!(tree.ident(), TagIdent::TAG_Variant);
            assert_eq!(decode_tree::<Event>(tree).unwrap(), event);
        }
    }

    #[test]
    fn numeric_variant_selects_by_position() {
        assert_eq!(decode_tree::<Event>(Tree::NumVariant(0, None)).unwrap(), Event::Started);
        assert_eq!(
            decode_tree::<Event>(Tree::NumVariant(1, Some(Box::new(Tree::Int32(3))))).unwrap(),
            Event::Scored(3)
        );
    }

    #[test]
    fn map_round_trip() {
        let mut map = HashMap::new();
        map.insert("one".to_string(), 1_i32);
        map.insert("two".to_string(), 2_i32);

        let tree = encode_tree(&map).unwrap().unwrap();
        assert_eq!(tree.ident(), TagIdent::TAG_Record);
        assert_eq!(decode_tree::<HashMap<String, i32>>(tree).unwrap(), map);
    }

    #[test]
    fn tuple_round_trip() {
        let value = (1_u8, "mixed".to_string(), -9.5_f64);
        let tree = encode_tree(&value).unwrap().unwrap();
        assert_eq!(tree.ident(), TagIdent::TAG_Tuple);
        assert_eq!(decode_tree::<(u8, String, f64)>(tree).unwrap(), value);
    }

    #[test]
    fn empty_sequence_round_trip() {
        let tree = encode_tree(&Vec::<i32>::new()).unwrap().unwrap();
        assert_eq!(tree, Tree::Array(TagIdent::TAG_Int8, vec![]));
        assert_eq!(decode_tree::<Vec<i32>>(tree).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn char_round_trip() {
        let tree = encode_tree(&'é').unwrap().unwrap();
        assert_eq!(decode_tree::<char>(tree).unwrap(), 'é');
    }

    #[test]
    fn unit_serializes_to_nothing() {
        assert_eq!(encode_tree(&()).unwrap(), None);
    }

    #[test]
    fn struct_fields_match_by_hash_without_registered_names() {
        // Encode, lose the names over the wire, decode with no unhash at all.
        let bytes = encode(&player()).unwrap().bytes().unwrap();
        let blob = Blob::from_bytes(&bytes).unwrap();
        assert!(blob.fields.iter().all(|field| field.name.starts_with('#')));
        assert_eq!(decode::<Player>(blob).unwrap(), player());
    }

    #[test]
    fn non_record_root_cannot_become_a_blob() {
        assert!(encode(&5_u8).is_err());
    }
}
