use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::types::{parse_decimal as decimal_from_str, DecVector3};

/// Load a YAML document into the generic node tree.
pub fn load_document(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse YAML: {:?}", path))
}

/// Render a scalar node as text. Mappings and sequences have no scalar form.
fn scalar_text(node: &Value) -> Option<Cow<'_, str>> {
    match node {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Fetch an optional scalar field, defaulting on absence or failure.
///
/// Optional fields come and go across SDE revisions, so a missing or
/// non-scalar value silently yields the type's default. A value that is
/// present but unparsable is logged and still defaulted rather than
/// aborting the parse. Identifiers and names never go through this path.
pub fn get<T, F>(node: &Value, key: &str, parse: F) -> T
where
    T: Default,
    F: Fn(&str) -> Result<T>,
{
    let Some(value) = node.get(key) else {
        return T::default();
    };
    let Some(text) = scalar_text(value) else {
        return T::default();
    };
    match parse(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: field '{}' has unparsable value {:?}: {}", key, text, e);
            T::default()
        }
    }
}

/// Non-defaulting integer fetch for mandatory identifiers.
pub fn require_i64(node: &Value, key: &str) -> Result<i64> {
    let value = node
        .get(key)
        .ok_or_else(|| anyhow!("Missing required field '{}'", key))?;
    let text =
        scalar_text(value).ok_or_else(|| anyhow!("Required field '{}' is not a scalar", key))?;
    parse_i64(&text).with_context(|| format!("Required field '{}' is not an integer", key))
}

/// Fetch a required nested mapping section.
pub fn require_mapping<'a>(node: &'a Value, key: &str) -> Result<&'a Value> {
    let value = node
        .get(key)
        .ok_or_else(|| anyhow!("Missing required section '{}'", key))?;
    if !value.is_mapping() {
        bail!("Section '{}' is not a mapping", key);
    }
    Ok(value)
}

/// Iterate an identifier-keyed child map as (id, node) pairs.
///
/// Child records (planets, moons, asteroid belts) carry their own identifier
/// as the mapping key; a non-numeric key is a format violation and fatal for
/// that record. An absent or non-mapping section yields no pairs.
pub fn child_entries<'a>(node: &'a Value, key: &str) -> Result<Vec<(i64, &'a Value)>> {
    let Some(Value::Mapping(map)) = node.get(key) else {
        return Ok(Vec::new());
    };
    entries_of(map, key)
}

fn entries_of<'a>(map: &'a Mapping, section: &str) -> Result<Vec<(i64, &'a Value)>> {
    let mut entries = Vec::with_capacity(map.len());
    for (k, v) in map {
        let text = scalar_text(k)
            .ok_or_else(|| anyhow!("Non-scalar key in '{}' section", section))?;
        let id = parse_i64(&text)
            .with_context(|| format!("Non-numeric identifier key in '{}' section", section))?;
        entries.push((id, v));
    }
    Ok(entries)
}

/// Iterate a root-level identifier-keyed map (overlay files).
pub fn root_entries(node: &Value) -> Result<Vec<(i64, &Value)>> {
    match node {
        Value::Mapping(map) => entries_of(map, "document root"),
        _ => bail!("Document root is not a mapping"),
    }
}

/// Extract a required 3-component decimal vector from a sequence field.
/// Missing key or wrong arity is fatal for the vector.
pub fn vector3(node: &Value, key: &str) -> Result<DecVector3> {
    let value = node
        .get(key)
        .ok_or_else(|| anyhow!("Missing required vector '{}'", key))?;
    let Value::Sequence(seq) = value else {
        bail!("Vector '{}' is not a sequence", key);
    };
    if seq.len() != 3 {
        bail!("Vector '{}' must contain exactly 3 elements, got {}", key, seq.len());
    }

    let component = |i: usize| -> Result<Decimal> {
        let text = scalar_text(&seq[i])
            .ok_or_else(|| anyhow!("Vector '{}' component {} is not a scalar", key, i))?;
        parse_decimal(&text).with_context(|| format!("Vector '{}' component {}", key, i))
    };

    Ok(DecVector3::new(component(0)?, component(1)?, component(2)?))
}

pub fn parse_i64(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid integer: {:?}", s))
}

pub fn parse_f64(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid float: {:?}", s))
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim() {
        t if t.eq_ignore_ascii_case("true") => Ok(true),
        t if t.eq_ignore_ascii_case("false") => Ok(false),
        other => bail!("Invalid boolean: {:?}", other),
    }
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    decimal_from_str(s)
}

pub fn parse_string(s: &str) -> Result<String> {
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_get_missing_key_returns_default() {
        let node = doc("radius: 100");
        assert_eq!(get(&node, "luminosity", parse_f64), 0.0);
        assert_eq!(get(&node, "name", parse_string), String::new());
        assert!(!get(&node, "border", parse_bool));
    }

    #[test]
    fn test_get_non_scalar_returns_default() {
        let node = doc("radius: [1, 2]");
        assert_eq!(get(&node, "radius", parse_i64), 0);
    }

    #[test]
    fn test_get_unparsable_returns_default() {
        let node = doc("radius: banana");
        assert_eq!(get(&node, "radius", parse_i64), 0);
    }

    #[test]
    fn test_get_parses_present_scalar() {
        let node = doc("radius: 100\nborder: true\nsecurity: 0.5");
        assert_eq!(get(&node, "radius", parse_i64), 100);
        assert!(get(&node, "border", parse_bool));
        assert_eq!(get(&node, "security", parse_f64), 0.5);
    }

    #[test]
    fn test_require_i64() {
        let node = doc("regionID: 10000001");
        assert_eq!(require_i64(&node, "regionID").unwrap(), 10000001);
        assert!(require_i64(&node, "missing").is_err());

        let bad = doc("regionID: abc");
        assert!(require_i64(&bad, "regionID").is_err());
    }

    #[test]
    fn test_vector3() {
        let node = doc("center: [1.0, 2.0, 3.0]");
        let v = vector3(&node, "center").unwrap();
        assert_eq!(v.x, Decimal::from_str("1.0").unwrap());
        assert_eq!(v.z, Decimal::from_str("3.0").unwrap());
    }

    #[test]
    fn test_vector3_wrong_arity_is_fatal() {
        let node = doc("center: [1.0, 2.0]");
        assert!(vector3(&node, "center").is_err());
        let node = doc("center: [1.0, 2.0, 3.0, 4.0]");
        assert!(vector3(&node, "center").is_err());
        let node = doc("radius: 5");
        assert!(vector3(&node, "center").is_err());
    }

    #[test]
    fn test_vector3_round_trips_sequence() {
        let node = doc("center: [1.5, -2.25, 3000000000000000000]");
        let v = vector3(&node, "center").unwrap();
        let rebuilt = doc(&format!("center: [{}, {}, {}]", v.x, v.y, v.z));
        assert_eq!(vector3(&rebuilt, "center").unwrap(), v);
    }

    #[test]
    fn test_child_entries_strict_keys() {
        let node = doc("planets:\n  50000001:\n    radius: 1\n  50000002:\n    radius: 2");
        let entries = child_entries(&node, "planets").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|(id, _)| *id == 50000001));

        let bad = doc("planets:\n  notanumber:\n    radius: 1");
        assert!(child_entries(&bad, "planets").is_err());
    }

    #[test]
    fn test_child_entries_absent_section_is_empty() {
        let node = doc("radius: 1");
        assert!(child_entries(&node, "moons").unwrap().is_empty());
    }
}
