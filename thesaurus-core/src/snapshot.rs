//! JSON-LD taxonomy documents
//!
//! The same node-object shape is used for documents fetched from a taxonomy
//! source and for local snapshots:
//!
//! ```json
//! {
//!   "@context": {"skos": "http://www.w3.org/2004/02/skos/core#"},
//!   "@graph": [
//!     {
//!       "@id": "http://ex.org/jazz",
//!       "@type": "skos:Concept",
//!       "skos:prefLabel": [{"@value": "Jazz", "@language": "en"}],
//!       "skos:broader": [{"@id": "http://ex.org/music"}],
//!       ":own_frequency": 4.0,
//!       ":cum_frequency": 9.0
//!     }
//!   ]
//! }
//! ```
//!
//! Properties may be written as `skos:` compact IRIs or as full IRIs of
//! either SKOS namespace. Unknown properties are ignored. Only the fixed
//! `skos` prefix is understood; no general context processing happens.

use crate::concept::{ConceptId, LabelKind};
use crate::config::TaxonomyConfig;
use crate::error::{Error, Result};
use crate::taxonomy::{Taxonomy, TaxonomyBuilder};
use serde_json::{json, Map, Value as JsonValue};
use std::fs;
use std::path::Path;
use thesaurus_vocab::{internal, jsonld, skos, skos_local_name, skos_names};

/// Properties the reader understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Property {
    Label(LabelKind),
    Broader,
    Narrower,
    Related,
    TopConceptOf,
    HasTopConcept,
    OwnFrequency,
    CumFrequency,
}

fn property(key: &str) -> Option<Property> {
    match key {
        internal::OWN_FREQUENCY => return Some(Property::OwnFrequency),
        internal::CUM_FREQUENCY => return Some(Property::CumFrequency),
        _ => {}
    }
    match skos_local_name(key)? {
        skos_names::PREF_LABEL => Some(Property::Label(LabelKind::Preferred)),
        skos_names::ALT_LABEL => Some(Property::Label(LabelKind::Alternative)),
        skos_names::HIDDEN_LABEL => Some(Property::Label(LabelKind::Hidden)),
        skos_names::BROADER => Some(Property::Broader),
        skos_names::NARROWER => Some(Property::Narrower),
        skos_names::RELATED => Some(Property::Related),
        skos_names::TOP_CONCEPT_OF => Some(Property::TopConceptOf),
        skos_names::HAS_TOP_CONCEPT => Some(Property::HasTopConcept),
        _ => None,
    }
}

/// Treat a single value and an array of values alike
fn values(value: &JsonValue) -> impl Iterator<Item = &JsonValue> {
    let slice = match value {
        JsonValue::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    slice.iter()
}

fn reference(value: &JsonValue) -> Result<&str> {
    match value {
        JsonValue::String(s) => Ok(s.as_str()),
        JsonValue::Object(map) => map
            .get(jsonld::ID)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::invalid_document(format!("node reference without @id: {value}"))),
        other => Err(Error::invalid_document(format!(
            "expected node reference, found {other}"
        ))),
    }
}

fn literal(value: &JsonValue) -> Result<(&str, Option<&str>)> {
    match value {
        JsonValue::String(s) => Ok((s.as_str(), None)),
        JsonValue::Object(map) => {
            let text = map
                .get(jsonld::VALUE)
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::invalid_document(format!("label without @value: {value}")))?;
            let lang = map.get(jsonld::LANGUAGE).and_then(JsonValue::as_str);
            Ok((text, lang))
        }
        other => Err(Error::invalid_document(format!(
            "expected label literal, found {other}"
        ))),
    }
}

fn number(value: &JsonValue) -> Result<f64> {
    let inner = match value {
        JsonValue::Object(map) => map.get(jsonld::VALUE).unwrap_or(value),
        other => other,
    };
    inner
        .as_f64()
        .ok_or_else(|| Error::invalid_document(format!("expected number, found {value}")))
}

fn is_concept_type(value: &JsonValue) -> bool {
    values(value)
        .filter_map(JsonValue::as_str)
        .any(|t| skos_local_name(t) == Some(skos_names::CONCEPT))
}

fn node_objects(doc: &JsonValue) -> Result<Vec<&Map<String, JsonValue>>> {
    let nodes: Vec<&JsonValue> = match doc {
        JsonValue::Object(map) => match map.get(jsonld::GRAPH) {
            Some(graph) => values(graph).collect(),
            None => vec![doc],
        },
        JsonValue::Array(items) => items.iter().collect(),
        other => {
            return Err(Error::invalid_document(format!(
                "expected object or array at top level, found {other}"
            )))
        }
    };
    nodes
        .into_iter()
        .map(|n| {
            n.as_object()
                .ok_or_else(|| Error::invalid_document(format!("expected node object, found {n}")))
        })
        .collect()
}

fn read_node(builder: &mut TaxonomyBuilder, node: &Map<String, JsonValue>) -> Result<()> {
    let id = node
        .get(jsonld::ID)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::invalid_document("node object without @id"))?;

    builder.intern(id);
    if node.get(jsonld::TYPE).is_some_and(is_concept_type) {
        builder.add_concept(id);
    }

    for (key, value) in node {
        let Some(prop) = property(key) else {
            continue;
        };
        match prop {
            Property::Label(kind) => {
                for v in values(value) {
                    let (text, lang) = literal(v)?;
                    builder.add_label(id, kind, text, lang);
                }
            }
            Property::Broader => {
                for v in values(value) {
                    builder.add_broader(id, reference(v)?);
                }
            }
            Property::Narrower => {
                for v in values(value) {
                    builder.add_broader(reference(v)?, id);
                }
            }
            Property::Related => {
                for v in values(value) {
                    builder.add_related(id, reference(v)?);
                }
            }
            Property::TopConceptOf => {
                for v in values(value) {
                    builder.add_top_concept(id, reference(v)?);
                }
            }
            Property::HasTopConcept => {
                for v in values(value) {
                    builder.add_top_concept(reference(v)?, id);
                }
            }
            Property::OwnFrequency => builder.set_own_frequency(id, number(value)?),
            Property::CumFrequency => builder.set_cumulative_frequency(id, number(value)?),
        }
    }
    Ok(())
}

/// Populate a new builder from a JSON-LD document.
///
/// Declared top concepts of any scheme are linked under the root.
pub fn read_document(doc: &str, config: TaxonomyConfig) -> Result<TaxonomyBuilder> {
    let parsed: JsonValue = serde_json::from_str(doc)?;
    let mut builder = TaxonomyBuilder::new(config);
    let nodes = node_objects(&parsed)?;
    for node in &nodes {
        read_node(&mut builder, node)?;
    }
    let anchored = builder.anchor_top_concepts();
    tracing::debug!(nodes = nodes.len(), top_concepts = anchored, "taxonomy document read");
    Ok(builder)
}

/// Build a JSON object from key/value pairs
fn object<'a>(pairs: impl IntoIterator<Item = (&'a str, JsonValue)>) -> JsonValue {
    JsonValue::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn refs(t: &Taxonomy, ids: &[ConceptId]) -> JsonValue {
    let mut iris: Vec<&str> = ids.iter().map(|&id| t.iri(id)).collect();
    iris.sort_unstable();
    JsonValue::Array(
        iris.into_iter()
            .map(|iri| object([(jsonld::ID, json!(iri))]))
            .collect(),
    )
}

fn label_key(kind: LabelKind) -> String {
    let local = match kind {
        LabelKind::Preferred => skos_names::PREF_LABEL,
        LabelKind::Alternative => skos_names::ALT_LABEL,
        LabelKind::Hidden => skos_names::HIDDEN_LABEL,
    };
    format!("{}:{local}", skos::PREFIX)
}

fn write_node(t: &Taxonomy, id: ConceptId) -> JsonValue {
    let mut obj = Map::new();
    obj.insert(jsonld::ID.to_string(), json!(t.iri(id)));
    if t.is_concept(id) {
        obj.insert(
            jsonld::TYPE.to_string(),
            json!(format!("{}:{}", skos::PREFIX, skos_names::CONCEPT)),
        );
    }

    for kind in LabelKind::ALL {
        let labels: Vec<JsonValue> = t
            .raw_labels(id)
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| match &l.lang {
                Some(lang) => object([
                    (jsonld::VALUE, json!(l.text.as_ref())),
                    (jsonld::LANGUAGE, json!(lang.as_ref())),
                ]),
                None => object([(jsonld::VALUE, json!(l.text.as_ref()))]),
            })
            .collect();
        if !labels.is_empty() {
            obj.insert(label_key(kind), JsonValue::Array(labels));
        }
    }

    let edges = [
        (skos_names::BROADER, t.broader(id)),
        (skos_names::NARROWER, t.narrower(id)),
        (skos_names::RELATED, t.related(id)),
        (skos_names::TOP_CONCEPT_OF, t.top_concept_of(id)),
    ];
    for (name, ids) in edges {
        if !ids.is_empty() {
            obj.insert(format!("{}:{name}", skos::PREFIX), refs(t, ids));
        }
    }

    let (own, cum) = t.frequency_annotations(id);
    if let Some(own) = own {
        obj.insert(internal::OWN_FREQUENCY.to_string(), json!(own));
    }
    if let Some(cum) = cum {
        obj.insert(internal::CUM_FREQUENCY.to_string(), json!(cum));
    }
    JsonValue::Object(obj)
}

/// Serialize a taxonomy, nodes ordered by IRI.
pub fn write_document(t: &Taxonomy) -> JsonValue {
    let mut ids: Vec<ConceptId> = t.node_ids().collect();
    ids.sort_by(|&a, &b| t.iri(a).cmp(t.iri(b)));
    let graph: Vec<JsonValue> = ids.into_iter().map(|id| write_node(t, id)).collect();
    object([
        (jsonld::CONTEXT, object([(skos::PREFIX, json!(skos::NS))])),
        (jsonld::GRAPH, JsonValue::Array(graph)),
    ])
}

/// Write a snapshot file
pub fn save_snapshot(t: &Taxonomy, path: &Path) -> Result<()> {
    let doc = write_document(t);
    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    tracing::info!(path = %path.display(), nodes = t.len(), "taxonomy snapshot written");
    Ok(())
}

/// Read a snapshot file into a frozen taxonomy
pub fn load_snapshot(path: &Path, config: TaxonomyConfig) -> Result<Taxonomy> {
    let raw = fs::read_to_string(path)?;
    Ok(read_document(&raw, config)?.build())
}
