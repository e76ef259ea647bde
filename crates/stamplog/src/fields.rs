//! Pairing of alternating key/value arguments

use stamplog_core_types::schema::BAD_KEY;
use stamplog_core_types::Value;

/// Pair a flat `[key, value, key, value, ...]` list into fields
///
/// A string followed by another element is a key/value pair. Anything else
/// (a non-string key, or a trailing key with no value) becomes its own field
/// under [`BAD_KEY`], and pairing resumes at the next element.
pub fn pair_fields(args: &[Value]) -> Vec<(&str, &Value)> {
    let mut fields = Vec::with_capacity(args.len() / 2 + 1);
    let mut i = 0;
    while i < args.len() {
        match (&args[i], args.get(i + 1)) {
            (Value::Str(key), Some(value)) => {
                fields.push((key.as_str(), value));
                i += 2;
            }
            (unpaired, _) => {
                fields.push((BAD_KEY, unpaired));
                i += 1;
            }
        }
    }
    fields
}
