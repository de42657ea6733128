#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};
use streamjson::{
    BuilderOptions, ParseError, ParserOptions, ValueParser, chunk_utils::split_by_sizes,
    parse_to_value_with, validate_with,
};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace, plus code points that look like whitespace but must be
// rejected.
static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{FEFF}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || max_size < HEADER || seed.is_multiple_of(10) {
        if max_size < HEADER {
            return fuzzer_mutate(data, size, max_size);
        }
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let target = size.clamp(HEADER + 1, max_size);
        let mut prefix = HEADER;
        while prefix < target {
            let limit = max_size - prefix;
            let before = prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], target, max_size - prefix);
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
            if prefix == before {
                break;
            }
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends a few whitespace code points without exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let count = rng.random_range(1..=limit.min(4));
        let mut written = 0;
        for _ in 0..count {
            // Mostly JSON whitespace; the rest must fail to parse.
            let w = if rng.random_ratio(15, 16) {
                WS_TABLE[rng.random_range(0..4)]
            } else {
                WS_TABLE[rng.random_range(4..WS_TABLE.len())]
            };
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
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let n = with_rng(|rng| rng.random_range(1..=size.max(2)).min(limit.max(1)));
        let bytes: Vec<u8> = with_rng(|rng| (0..n).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let Ok(serialized) = serde_json::to_vec(&value.0) else {
        return 0;
    };
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
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(22)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3 => Value::from(u.arbitrary::<u64>()?),
            4 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            5..=11 => Value::String(u.arbitrary()?),
            12..=16 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let members: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(members.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Chunk sizes derived from `seed`, the way a caller reading from a socket
/// would see them.
fn split_sizes(seed: u32, len: usize) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    let count = rng.random_range(0..=len.min(64));
    (0..count).map(|_| rng.random_range(0..len.max(1))).collect()
}

fn parse_chunks(
    chunks: &[&[u8]],
    options: ParserOptions,
) -> Result<streamjson::Value, ParseError> {
    let mut parser = ValueParser::with_options(options, BuilderOptions::default());
    for chunk in chunks {
        parser.write(chunk)?;
    }
    parser.finish()?;
    parser.release()
}

/// Reads every concatenated document with `write_some`; returns how many
/// were complete.
fn parse_concatenated(mut input: &[u8], options: ParserOptions) -> usize {
    let mut parser = ValueParser::with_options(options, BuilderOptions::default());
    let mut count = 0;
    while !input.iter().all(u8::is_ascii_whitespace) {
        let Ok(n) = parser.write_some(input) else {
            break;
        };
        if parser.finish().is_err() {
            break;
        }
        assert!(parser.release().is_ok());
        count += 1;
        parser.reset();
        input = &input[n..];
    }
    count
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let data = &data[HEADER..];

    let options = ParserOptions {
        max_depth: if flags & 2 != 0 { 4 } else { ParserOptions::default().max_depth },
    };

    let whole = parse_to_value_with(data, options, BuilderOptions::default());
    assert_eq!(validate_with(data, options), whole.is_ok());

    let sizes = split_sizes(split_seed, data.len());
    let chunks = split_by_sizes(data, &sizes);
    let split = parse_chunks(&chunks, options);
    assert_eq!(split, whole, "chunks: {chunks:?}");

    if flags & 1 != 0 {
        let count = parse_concatenated(data, options);
        if whole.is_ok() {
            assert_eq!(count, 1);
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
