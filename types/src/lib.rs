use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

// ── Input dataset ────────────────────────────────────────────────────────

/// Top-level shape of `dataset-guides.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub guides: Vec<Guide>,
}

/// A travel guide record. Only the fields the analysis reads are modelled;
/// everything else in the source object is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guide {
    /// Opaque identifier, copied verbatim into the report.
    pub id: Value,
    pub title: Title,
    /// String, `{lang: string}` or `{lang: [item, ...]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// `[tip, ...]` or `{lang: [tip, ...]}`; a tip is a string or an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
}

/// A per-language mapping, or any other value used as the title as-is.
///
/// Language entries are not required to be strings; only `en` is ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Localized(Map<String, Value>),
    Plain(Value),
}

impl Title {
    /// The English title. `None` for a per-language mapping without `en`.
    pub fn english(&self) -> Option<&Value> {
        match self {
            Self::Localized(by_lang) => by_lang.get("en"),
            Self::Plain(t) => Some(t),
        }
    }
}

/// A citation already attached to a guide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ── Entity categories ────────────────────────────────────────────────────

/// The five keyword categories. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Websites,
    Apps,
    Brands,
    Stores,
    Services,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        Self::Websites,
        Self::Apps,
        Self::Brands,
        Self::Stores,
        Self::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Websites => "websites",
            Self::Apps => "apps",
            Self::Brands => "brands",
            Self::Stores => "stores",
            Self::Services => "services",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Report output format ─────────────────────────────────────────────────

/// One uncovered entity mention in one guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReference {
    pub guide_id: Value,
    /// The English title exactly as it appears in the dataset.
    pub guide_title: Value,
    pub entity: String,
    pub entity_type: EntityType,
    /// Up to 100 characters either side of the first mention, trimmed.
    pub mentioned_in_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_guides_analyzed: usize,
    pub total_missing_references: usize,
    pub unique_entities: usize,
}

/// Contents of `enrichments/missing-references-analysis.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub missing_references: Vec<MissingReference>,
    pub entity_frequency: EntityFrequency,
}

/// Per-entity occurrence counts, kept in first-seen order.
///
/// Serialized as a JSON object whose key order is that first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFrequency {
    counts: Vec<(String, usize)>,
}

impl EntityFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entity: &str) {
        match self.counts.iter_mut().find(|(e, _)| e == entity) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((entity.to_string(), 1)),
        }
    }

    pub fn get(&self, entity: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(e, _)| e == entity)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(e, c)| (e.as_str(), *c))
    }

    /// The `n` most frequent entities. Ties keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        ranked.sort_by_key(|(_, c)| std::cmp::Reverse(*c));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for EntityFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.counts.iter().map(|(e, c)| (e, c)))
    }
}

impl<'de> Deserialize<'de> for EntityFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrequencyVisitor;

        impl<'de> Visitor<'de> for FrequencyVisitor {
            type Value = EntityFrequency;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity name to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut counts = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((entity, count)) = map.next_entry::<String, usize>()? {
                    counts.push((entity, count));
                }
                Ok(EntityFrequency { counts })
            }
        }

        deserializer.deserialize_map(FrequencyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_english() {
        let plain: Title = serde_json::from_str(r#""Gas in Spain""#).unwrap();
        assert_eq!(plain.english(), Some(&json!("Gas in Spain")));

        let localized: Title =
            serde_json::from_str(r#"{"en": "Gas in Spain", "de": "Gas in Spanien"}"#).unwrap();
        assert_eq!(localized.english(), Some(&json!("Gas in Spain")));

        let german_only: Title = serde_json::from_str(r#"{"de": "Gas in Spanien"}"#).unwrap();
        assert_eq!(german_only.english(), None);
    }

    #[test]
    fn test_title_with_non_string_languages() {
        let dataset: Dataset = serde_json::from_value(json!({"guides": [{
            "id": "g1",
            "title": {"en": "Gas", "he": null, "pages": 3},
            "content": "Shop at Lidl"
        }]}))
        .unwrap();
        assert_eq!(dataset.guides[0].title.english(), Some(&json!("Gas")));

        let numeric: Title = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(numeric.english(), Some(&json!(42)));
    }

    #[test]
    fn test_guide_optional_fields() {
        let guide: Guide = serde_json::from_str(
            r#"{"id": "g1", "title": "Test", "category": "legal", "references": [{"url": "x"}]}"#,
        )
        .unwrap();
        assert!(guide.content.is_none());
        assert!(guide.tips.is_none());
        assert_eq!(guide.references, Some(vec![Reference { name: None }]));
    }

    #[test]
    fn test_guide_requires_id_and_title() {
        assert!(serde_json::from_str::<Guide>(r#"{"title": "Test"}"#).is_err());
        assert!(serde_json::from_str::<Guide>(r#"{"id": "g1"}"#).is_err());
    }

    #[test]
    fn test_entity_type_serializes_as_category_key() {
        assert_eq!(
            serde_json::to_string(&EntityType::Stores).unwrap(),
            r#""stores""#
        );
        assert_eq!(EntityType::Websites.to_string(), "websites");
    }

    #[test]
    fn test_frequency_keeps_first_seen_order() {
        let mut freq = EntityFrequency::new();
        for e in ["Lidl", "Aldi", "Lidl", "Waze", "Aldi", "Lidl"] {
            freq.record(e);
        }
        assert_eq!(freq.get("Lidl"), Some(3));
        assert_eq!(freq.get("Truma"), None);
        assert_eq!(
            serde_json::to_string(&freq).unwrap(),
            r#"{"Lidl":3,"Aldi":2,"Waze":1}"#
        );

        let back: EntityFrequency = serde_json::from_str(r#"{"Lidl":3,"Aldi":2,"Waze":1}"#).unwrap();
        assert_eq!(back, freq);
    }

    #[test]
    fn test_frequency_top_breaks_ties_by_first_seen() {
        let mut freq = EntityFrequency::new();
        for e in ["Waze", "Aldi", "Lidl", "Lidl"] {
            freq.record(e);
        }
        assert_eq!(freq.top(2), vec![("Lidl", 2), ("Waze", 1)]);
        assert_eq!(freq.top(10).len(), 3);
    }
}
