use pretty_assertions::assert_eq;
use qs_encode::{Config, Error, ErrorKind, Value};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Address {
    city: String,
    postcode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    address: Address,
    user_ids: Vec<u8>,
}

fn params() -> QueryParams {
    QueryParams {
        id: 42,
        name: "Acme".to_string(),
        phone: 12345,
        address: Address {
            city: "Carrot City".to_string(),
            postcode: "12345".to_string(),
        },
        user_ids: vec![1, 2, 3, 4],
    }
}

#[test]
fn serialize_struct() {
    assert_eq!(
        qs_encode::to_string(&params()).unwrap(),
        "address[city]=Carrot%20City&address[postcode]=12345&id=42&name=Acme&\
         phone=12345&user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4"
    );
}

#[test]
fn serialize_struct_in_field_order() {
    let config = Config::new().sort_keys(false).preserve_numeric_indexes(true);
    assert_eq!(
        config.serialize_string(&params()).unwrap(),
        "id=42&name=Acme&phone=12345&address[city]=Carrot%20City&\
         address[postcode]=12345&user_ids[0]=1&user_ids[1]=2&\
         user_ids[2]=3&user_ids[3]=4"
    );
}

#[test]
fn serialize_option() {
    #[derive(Serialize)]
    struct Query {
        vec: Option<Vec<u8>>,
        other: Option<String>,
    }

    let query = Query {
        vec: None,
        other: None,
    };
    assert_eq!(qs_encode::to_string(&query).unwrap(), "");

    let query = Query {
        vec: Some(vec![1, 2]),
        other: Some("x".into()),
    };
    assert_eq!(qs_encode::to_string(&query).unwrap(), "other=x&vec[]=1&vec[]=2");
}

#[test]
fn serialize_enum() {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum TestEnum {
        A,
        B(bool),
        C { x: u8, y: u8 },
        D(u8, u8),
    }

    #[derive(Serialize)]
    struct Query {
        e: TestEnum,
    }

    let config = Config::new().preserve_numeric_indexes(true);
    let cases = [
        (TestEnum::A, "e=a"),
        (TestEnum::B(true), "e[b]=1"),
        (TestEnum::C { x: 2, y: 3 }, "e[c][x]=2&e[c][y]=3"),
        (TestEnum::D(128, 1), "e[d][0]=128&e[d][1]=1"),
    ];
    for (e, expected) in cases {
        assert_eq!(config.serialize_string(&Query { e }).unwrap(), expected);
    }
}

#[test]
fn serialize_flatten() {
    #[derive(Serialize)]
    struct Query {
        a: u8,
        #[serde(flatten)]
        common: CommonParams,
    }

    #[derive(Serialize)]
    struct CommonParams {
        limit: u64,
        offset: u64,
    }

    let query = Query {
        a: 1,
        common: CommonParams {
            limit: 100,
            offset: 50,
        },
    };
    assert_eq!(qs_encode::to_string(&query).unwrap(), "a=1&limit=100&offset=50");
}

#[test]
fn serialize_maps_with_non_string_keys() {
    let mut map = BTreeMap::new();
    map.insert(3u8, "c");
    map.insert(1u8, "a");
    assert_eq!(
        qs_encode::to_value(&map).unwrap(),
        Value::from([("1", "a"), ("3", "c")])
    );

    let mut map = HashMap::new();
    map.insert(true, 1);
    assert_eq!(qs_encode::to_string(&map).unwrap(), "true=1");
}

#[test]
fn unsupported_map_keys() {
    let mut map = BTreeMap::new();
    map.insert(vec![1u8], "a");
    assert_eq!(qs_encode::to_value(&map).unwrap_err(), Error::Unsupported);
}

#[test]
fn bytes_are_unsupported() {
    #[derive(Serialize)]
    struct Upload {
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    }

    let upload = Upload { data: vec![0, 1] };
    assert_eq!(
        qs_encode::to_value(&upload).unwrap(),
        Value::from([("data", Value::Unsupported("bytes"))])
    );
    let err = qs_encode::to_string(&upload).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);
}

#[test]
fn primitives_at_top_level_are_rejected() {
    let err = qs_encode::to_string(&"hello").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = qs_encode::to_string(&5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn tuples_encode_as_sequences() {
    #[derive(Serialize)]
    struct Query {
        range: (u32, u32),
    }

    assert_eq!(
        qs_encode::to_string(&Query { range: (1, 10) }).unwrap(),
        "range[]=1&range[]=10"
    );
}

#[test]
fn floats_and_chars() {
    #[derive(Serialize)]
    struct Query {
        ratio: f32,
        grade: char,
    }

    assert_eq!(
        qs_encode::to_string(&Query {
            ratio: 0.1,
            grade: 'A'
        })
        .unwrap(),
        "grade=A&ratio=0.1"
    );
}

#[test]
fn json_values() {
    let data = serde_json::json!({
        "user": { "name": "John", "admin": false, "nickname": null },
        "tags": ["php", "curl"],
        "score": 9.75,
    });

    assert_eq!(
        qs_encode::to_string(&data).unwrap(),
        "score=9.75&tags[]=php&tags[]=curl&user[admin]=0&user[name]=John"
    );
}

#[test]
fn custom_errors_propagate() {
    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("nope"))
        }
    }

    let data = BTreeMap::from([("a", Failing)]);
    assert_eq!(
        qs_encode::to_string(&data).unwrap_err(),
        Error::Custom("nope".into())
    );
}

/// `Deep(n)` is `n` nested single-entry maps around a string.
struct Deep(usize);

impl Serialize for Deep {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        if self.0 == 0 {
            return serializer.serialize_str("x");
        }
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("a", &Deep(self.0 - 1))?;
        map.end()
    }
}

#[test]
fn deep_input_is_rejected_while_converting() {
    assert_eq!(
        qs_encode::to_string(&Deep(200_000)).unwrap_err(),
        Error::DepthExceeded(50)
    );
    assert_eq!(
        qs_encode::to_value(&Deep(200_000)).unwrap_err(),
        Error::DepthExceeded(50)
    );

    assert!(qs_encode::to_string(&Deep(50)).is_ok());
    assert_eq!(
        qs_encode::to_string(&Deep(51)).unwrap_err(),
        Error::DepthExceeded(50)
    );
}

#[test]
fn conversion_depth_follows_config() {
    let config = Config::new().max_depth(3);
    assert_eq!(config.serialize_string(&Deep(3)).unwrap(), "a[a][a]=x");
    assert_eq!(
        config.serialize_string(&Deep(4)).unwrap_err(),
        Error::DepthExceeded(3)
    );
    assert_eq!(
        config.serialize_string(&Deep(200_000)).unwrap_err(),
        Error::DepthExceeded(3)
    );
}

#[test]
fn enum_variants_count_towards_depth() {
    #[derive(Serialize)]
    enum Shape {
        Point { x: i32 },
    }

    let data = BTreeMap::from([("shape", Shape::Point { x: 1 })]);
    let config = Config::new().max_depth(3);
    assert_eq!(config.serialize_string(&data).unwrap(), "shape[Point][x]=1");

    let config = Config::new().max_depth(2);
    assert_eq!(
        config.serialize_string(&data).unwrap_err(),
        Error::DepthExceeded(2)
    );
}

/// Map with float keys, written in the given order.
struct FloatKeys(Vec<(f64, i32)>);

impl Serialize for FloatKeys {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[test]
fn float_keys_use_fixed_notation() {
    let data = FloatKeys(vec![(1e20, 1), (0.5, 2), (1234567.1, 3)]);
    assert_eq!(
        qs_encode::to_value(&data).unwrap(),
        Value::from([("100000000000000000000", 1), ("0.5", 2), ("1234567.1", 3)])
    );
    assert_eq!(
        qs_encode::to_string(&data).unwrap(),
        "0.5=2&100000000000000000000=1&1234567.1=3"
    );
}

#[test]
fn non_finite_float_keys_are_unsupported() {
    let data = FloatKeys(vec![(f64::NAN, 1)]);
    assert_eq!(qs_encode::to_value(&data).unwrap_err(), Error::Unsupported);

    let data = FloatKeys(vec![(f64::INFINITY, 1)]);
    assert_eq!(qs_encode::to_value(&data).unwrap_err(), Error::Unsupported);
}
