use bytes::Bytes;
use jksn::{vecmap::VecMap, Value};
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;

/// arbitrary Integer wider than 64 bits for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[0-1]{64,100}".prop_map(|n| -> BigInt { BigInt::from_str_radix(&n, 2).unwrap() })
}

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

/// arbitrary integer, weighted towards the encoding boundaries
pub fn arb_int() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-12i64..12).prop_map(Value::from),
        (-0x8100i64..0x8100).prop_map(Value::from),
        (0x1f_0000i64..0x21_0000).prop_map(Value::from),
        (-0x21_0000i64..-0x1f_0000).prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        arb_bigint().prop_map(Value::from),
    ]
}

/// arbitrary leaf value for use with proptest
pub fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Absent),
        any::<bool>().prop_map(Value::Bool),
        arb_int(),
        any::<f64>().prop_map(Value::from),
        any::<f32>().prop_map(Value::from),
        any::<String>().prop_map(Value::from),
        // a small alphabet so that strings repeat
        "[ab]{0,3}".prop_map(Value::from),
        "[漢字]{1,4}".prop_map(Value::from),
        arb_bs().prop_map(Value::Blob),
        prop::collection::vec(0u8..2, 0..3).prop_map(|b| Value::Blob(Bytes::from(b))),
    ]
}

/// arbitrary JKSN value for use with proptest
///
/// [`Value::Unspecified`] is never generated: inside a column-stored array it means
/// "no entry", so it does not survive a round trip there.
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(
        6,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::from),
                prop::collection::vec((arb_leaf(), inner.clone()), 0..6)
                    .prop_map(|pairs| Value::Map(pairs.into_iter().collect::<VecMap<_, _>>())),
                // rows sharing keys, to exercise column storage
                prop::collection::vec(
                    prop::collection::btree_map("[a-d]", inner, 0..4),
                    0..8
                )
                .prop_map(|rows| {
                    Value::from(
                        rows.into_iter()
                            .map(|row| {
                                Value::Map(
                                    row.into_iter()
                                        .map(|(k, v)| (Value::from(k), v))
                                        .collect(),
                                )
                            })
                            .collect::<Vec<_>>(),
                    )
                }),
            ]
        },
    )
}
