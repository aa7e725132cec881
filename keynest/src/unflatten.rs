//! Flat map → tree direction of the transform.
//!
//! Reconstruction runs in two passes. The resolve pass fixes the container
//! kind of every path prefix before anything is written, so a prefix used
//! both as an object and as an array is reported as a schema conflict up
//! front instead of being coerced mid-build. The build pass then inserts
//! each entry into a tagged node tree and converts the result to JSON.
//!
//! Because the resolve pass sees every path before any write, the outcome
//! (the tree, or the specific conflict error) does not depend on entry
//! order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    error::Error,
    path::{Segment, join, split_path},
    types::FlatMap,
};

/// Largest sequence index accepted. Holes in a sparse sequence are
/// materialized on serialization, so an unbounded index would let one flat
/// entry allocate an arbitrarily long array.
const MAX_SEQUENCE_INDEX: usize = 65_535;

/// The container kind a path prefix is required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Mapping,
    Sequence,
    Scalar,
}

impl Kind {
    /// Kind forced on a node by the segment that follows it.
    fn required_by(next: &Segment) -> Kind {
        if next.is_index() {
            Kind::Sequence
        } else {
            Kind::Mapping
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Kind::Mapping => "an object",
            Kind::Sequence => "an array",
            Kind::Scalar => "a value",
        }
    }
}

/// A node in the reconstructed tree, tagged with its resolved kind.
///
/// Sequences hold their children by explicit position so sparse input is
/// representable; holes only materialize at serialization time.
enum Node {
    Scalar(Value),
    Mapping(BTreeMap<String, Node>),
    Sequence(BTreeMap<usize, Node>),
}

impl Node {
    fn fresh(kind: Kind) -> Node {
        match kind {
            Kind::Mapping => Node::Mapping(BTreeMap::new()),
            Kind::Sequence => Node::Sequence(BTreeMap::new()),
            Kind::Scalar => Node::Scalar(Value::Null),
        }
    }

    /// Returns the child container at `segment`, creating it with `kind` if
    /// absent. The resolve pass has already fixed every prefix's kind, so
    /// the node and segment variants always agree here.
    fn child(&mut self, segment: &Segment, kind: Kind) -> &mut Node {
        match (self, segment) {
            (Node::Mapping(children), Segment::Name(name)) => children
                .entry(name.clone())
                .or_insert_with(|| Node::fresh(kind)),
            (Node::Sequence(children), Segment::Index(index)) => {
                children.entry(*index).or_insert_with(|| Node::fresh(kind))
            }
            _ => unreachable!("prefix kinds are fixed before the build pass"),
        }
    }

    /// Assigns a scalar at `segment`, overwriting any prior value there.
    fn assign(&mut self, segment: &Segment, value: Value) {
        match (self, segment) {
            (Node::Mapping(children), Segment::Name(name)) => {
                children.insert(name.clone(), Node::Scalar(value));
            }
            (Node::Sequence(children), Segment::Index(index)) => {
                children.insert(*index, Node::Scalar(value));
            }
            _ => unreachable!("prefix kinds are fixed before the build pass"),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Node::Scalar(value) => value,
            Node::Mapping(children) => Value::Object(
                children
                    .into_iter()
                    .map(|(name, child)| (name, child.into_value()))
                    .collect(),
            ),
            Node::Sequence(children) => {
                // Holes in a sparse sequence serialize as null. Indices are
                // capped in the resolve pass, so len stays bounded.
                let len = children
                    .keys()
                    .next_back()
                    .map_or(0, |last| last.saturating_add(1));
                let mut items = vec![Value::Null; len];
                for (index, child) in children {
                    items[index] = child.into_value();
                }
                Value::Array(items)
            }
        }
    }
}

/// Rebuilds a nested tree from a flat path → value map.
///
/// Each dotted path is split into segments; a pure-digit segment addresses
/// an array position, anything else an object key. Entries with a blank
/// path are skipped; an empty segment (consecutive dots) fails with
/// [`Error::MalformedPath`]; a prefix required to be both an object and an
/// array fails with [`Error::ConflictingSchema`]. An empty map produces an
/// empty object.
///
/// Sequence indices are capped (holes materialize as `null` on
/// serialization, so an unbounded index would allocate an arbitrarily long
/// array); an over-limit index fails with [`Error::UnsupportedValue`].
///
/// # Example
/// ```rust
/// use keynest::{FlatMap, unflatten};
/// use serde_json::json;
///
/// let mut flat = FlatMap::new();
/// flat.insert("list.0.name".to_string(), json!("a"));
/// flat.insert("list.1.name".to_string(), json!("b"));
/// assert_eq!(
///     unflatten(&flat)?,
///     json!({"list": [{"name": "a"}, {"name": "b"}]})
/// );
/// # Ok::<(), keynest::Error>(())
/// ```
pub fn unflatten(flat: &FlatMap) -> Result<Value, Error> {
    let mut entries = Vec::with_capacity(flat.len());
    for (path, value) in flat {
        // Blank paths are no-ops, not errors; sheets carry empty key cells.
        if path.trim().is_empty() {
            continue;
        }
        entries.push((path.as_str(), split_path(path)?, value));
    }

    let kinds = resolve_kinds(&entries)?;

    let Some((root_kind, _)) = kinds.get("") else {
        return Ok(Value::Object(serde_json::Map::new()));
    };
    let mut root = Node::fresh(*root_kind);
    for (_, segments, value) in entries {
        insert(&mut root, &segments, value.clone());
    }
    Ok(root.into_value())
}

/// Resolve pass: records the kind every prefix must have, keyed by the
/// canonical (re-joined) prefix string, failing on the first disagreement.
/// The root participates as the empty prefix, so mixed numeric and
/// non-numeric top-level segments surface as a root-level conflict.
fn resolve_kinds<'a>(
    entries: &[(&'a str, Vec<Segment>, &Value)],
) -> Result<BTreeMap<String, (Kind, &'a str)>, Error> {
    let mut kinds: BTreeMap<String, (Kind, &str)> = BTreeMap::new();
    for (path, segments, _) in entries {
        let mut prefix = String::new();
        for segment in segments {
            if let Segment::Index(index) = segment {
                if *index > MAX_SEQUENCE_INDEX {
                    return Err(Error::unsupported_value(format!(
                        "index {} in `{}` exceeds the supported maximum of {}",
                        index, path, MAX_SEQUENCE_INDEX
                    )));
                }
            }
            record(&mut kinds, &prefix, Kind::required_by(segment), *path)?;
            prefix = join(&prefix, &segment.to_string());
        }
        // The full path itself holds a scalar.
        record(&mut kinds, &prefix, Kind::Scalar, *path)?;
    }
    Ok(kinds)
}

fn record<'a>(
    kinds: &mut BTreeMap<String, (Kind, &'a str)>,
    prefix: &str,
    kind: Kind,
    path: &'a str,
) -> Result<(), Error> {
    match kinds.get(prefix) {
        None => {
            kinds.insert(prefix.to_string(), (kind, path));
            Ok(())
        }
        Some((existing, _)) if *existing == kind => Ok(()),
        Some((existing, first_path)) => Err(Error::conflicting_schema(
            prefix,
            *first_path,
            existing.describe(),
            path,
            kind.describe(),
        )),
    }
}

/// Build pass: walks one entry into the tree. Containers are created on
/// first visit; the terminal segment assigns the scalar, later entries at
/// the same exact path overwriting earlier ones.
fn insert(root: &mut Node, segments: &[Segment], value: Value) {
    let Some((last, inner)) = segments.split_last() else {
        return;
    };
    let mut node = root;
    for (i, segment) in inner.iter().enumerate() {
        let next = inner.get(i + 1).unwrap_or(last);
        node = node.child(segment, Kind::required_by(next));
    }
    node.assign(last, value);
}
