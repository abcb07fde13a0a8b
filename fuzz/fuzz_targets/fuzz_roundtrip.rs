#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsontree::{DeserializeError, DeserializerOptions, from_chars, from_str, from_str_with_options, to_string, to_string_pretty};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{a0}".as_bytes(),
    "\u{1680}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Usually defers to libFuzzer; one time in ten writes a fresh header and a
/// run of serde_json-generated documents padded with whitespace.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut written = HEADER;
        written += append_whitespace(&mut data[written..], max_size - written);
        written += append_value(&mut data[written..], size.max(16), max_size - written);
        written += append_whitespace(&mut data[written..], max_size - written);
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace code points without exceeding `limit`
/// bytes. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n_codepoints = rng.random_range(1..=limit.min(8));
        let mut written = 0;
        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("serde_json writes any Value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(22)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(i64::arbitrary(u)?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=21 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn roundtrip(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let Ok(text) = std::str::from_utf8(&data[HEADER..]) else {
        return;
    };

    let options = DeserializerOptions {
        allow_unicode_whitespace: flags & 1 != 0,
        max_depth: (flags & 2 != 0).then_some(64),
    };
    let whole = from_str_with_options(text, options);

    // Chunking the source must not change the outcome.
    if options == DeserializerOptions::default() {
        let chunks = split_into_safe_chunks(text, split_seed);
        let chunked = from_chars(chunks.iter().flat_map(|chunk| chunk.chars()));
        assert_eq!(chunked, whole, "chunked parse disagrees");
    }

    // Whatever serde_json accepts as plain JSON, so must we, except for the
    // depth limit and repeated keys, which serde_json resolves to the last value.
    if flags & 1 == 0 && whole.is_err() && serde_json::from_str::<Value>(text).is_ok() {
        let err = whole.as_ref().unwrap_err();
        let stricter = matches!(
            err,
            DeserializeError::DepthLimitExceeded { .. } | DeserializeError::DuplicateObjectKey { .. }
        );
        assert!(stricter, "serde_json accepted input rejected with {err}");
    }

    let Ok(value) = whole else {
        return;
    };
    let compact = to_string(&value);
    assert_eq!(from_str(&compact).as_ref(), Ok(&value), "compact text: {compact}");
    let pretty = to_string_pretty(&value);
    assert_eq!(from_str(&pretty).as_ref(), Ok(&value), "pretty text: {pretty}");
    if flags & 4 != 0 {
        assert_eq!(to_string(&from_str(&pretty).unwrap()), compact);
    }
}

fuzz_target!(|data: &[u8]| roundtrip(data));

/// Split a `&str` into char-boundary-safe chunks sized by `split_seed`. Every
/// chunk is at least one byte.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();

    while start < len {
        let remaining = len - start;
        let mut size = (split_seed as usize % remaining) + 1;
        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
    }

    chunks
}
