#![no_main]
use libfuzzer_sys::fuzz_target;
use streamjson::{Kind, parse_to_value};

/// Kind with the three number representations folded together, since
/// `serde_json` classifies `-0` differently.
fn folded(kind: Kind) -> Kind {
    match kind {
        Kind::Int64 | Kind::UInt64 | Kind::Double => Kind::Double,
        other => other,
    }
}

fn serde_kind(value: &serde_json::Value) -> Kind {
    match value {
        serde_json::Value::Null => Kind::Null,
        serde_json::Value::Bool(_) => Kind::Bool,
        serde_json::Value::Number(_) => Kind::Double,
        serde_json::Value::String(_) => Kind::String,
        serde_json::Value::Array(_) => Kind::Array,
        serde_json::Value::Object(_) => Kind::Object,
    }
}

fuzz_target!(|data: &[u8]| {
    // serde_json nests deeper than our default limit, so anything we accept
    // it must accept too.
    if let Ok(value) = parse_to_value(data) {
        let reference: serde_json::Value =
            serde_json::from_slice(data).expect("serde_json rejected a document we accepted");
        assert_eq!(serde_kind(&reference), folded(value.kind()));
    }
});
