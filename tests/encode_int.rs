use jksn::{config::EncoderConfig, encoding::*, Value};
use jksn_strategy::*;
use proptest::prelude::*;

fn headerless(delta: bool) -> Encoder {
    Encoder::with_config(EncoderConfig::default().with_header(false).with_delta(delta))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode_small(i in proptest::num::i64::ANY) {
        let k = Value::from(i);
        let enc = encode_full(&k);

        let dec = decode(&enc).ok();

        if dec != Some(k.clone()) {
            panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", i, enc, dec)
        }
    }

    #[test]
    fn encode_decode_large(i in arb_bigint()) {
        let k = Value::from(i);
        let enc = encode_full(&k);

        let dec = decode(&enc).ok();

        if dec != Some(k.clone()) {
            panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", k, enc, dec)
        }
    }

    #[test]
    fn delta_never_longer(ints in prop::collection::vec(arb_int(), 1..20)) {
        let k = Value::from(ints);
        let with = headerless(true).encode(&k);
        let without = headerless(false).encode(&k);

        prop_assert!(with.len() <= without.len());
        prop_assert_eq!(decode_headerless(&with).unwrap(), k);
    }

    #[test]
    fn consecutive_ints(start in any::<i64>(), steps in prop::collection::vec(-300i64..300, 1..20)) {
        let mut n = start;
        let mut ints = vec![Value::from(n)];
        for s in steps {
            n = n.wrapping_add(s);
            ints.push(Value::from(n));
        }
        let k = Value::from(ints);
        prop_assert_eq!(decode(&encode_full(&k)).unwrap(), k);
    }
}

#[test]
fn int_widths() {
    let cases: Vec<(i64, usize)> = vec![
        (0, 1),
        (10, 1),
        (11, 2),
        (-128, 2),
        (-129, 3),
        (32767, 3),
        (32768, 4),
        (0x1f_ffff, 4),
        (0x20_0000, 5),
        (-0x20_0000, 5),
        (i32::max_value() as i64, 5),
        (i32::max_value() as i64 + 1, 6),
        (i64::max_value(), 10),
        (i64::min_value(), 11),
    ];
    for (n, len) in cases {
        let mut out = Vec::new();
        encode(&Value::from(n), &mut out);
        assert_eq!(out.len(), len, "{} encoded as {:x?}", n, out);
    }
}
