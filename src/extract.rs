use std::collections::{BTreeMap, HashSet};

use guide_types::EntityType;
use regex::Regex;

use crate::error::Result;
use crate::keywords::{WEBSITE_PATTERNS, build_keyword_regex, keywords_for};

/// Entities found in a text, per category, deduplicated.
///
/// Iterates in category declaration order. Empty for empty input; otherwise
/// every category is present, possibly with an empty list.
pub type Entities = BTreeMap<EntityType, Vec<String>>;

/// Compiled keyword and domain patterns, built once per run.
pub struct EntityExtractor {
    website_patterns: Vec<Regex>,
    keywords: Vec<(EntityType, &'static str, Regex)>,
}

impl EntityExtractor {
    pub fn new() -> Result<Self> {
        let website_patterns = WEBSITE_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut keywords = Vec::new();
        for entity_type in EntityType::ALL {
            for &keyword in keywords_for(entity_type) {
                let re = Regex::new(&build_keyword_regex(keyword))?;
                keywords.push((entity_type, keyword, re));
            }
        }

        Ok(EntityExtractor {
            website_patterns,
            keywords,
        })
    }

    /// Find every known entity mentioned in `text`.
    ///
    /// Domain patterns contribute the text as written; keyword hits
    /// contribute the canonical keyword. Deduplication is case-sensitive,
    /// so "amazon.de" from a domain match and the keyword "Amazon.de" are
    /// both kept.
    pub fn extract(&self, text: &str) -> Entities {
        if text.is_empty() {
            return Entities::new();
        }

        let mut hits: BTreeMap<EntityType, Vec<&str>> =
            EntityType::ALL.iter().map(|t| (*t, Vec::new())).collect();

        let websites = hits.entry(EntityType::Websites).or_default();
        for re in &self.website_patterns {
            websites.extend(re.find_iter(text).map(|m| m.as_str()));
        }

        for (entity_type, keyword, re) in &self.keywords {
            if re.is_match(text) {
                hits.entry(*entity_type).or_default().push(*keyword);
            }
        }

        hits.into_iter()
            .map(|(entity_type, found)| (entity_type, dedup_stripped(found)))
            .collect()
    }
}

/// Trim, drop empties, keep the first occurrence of each exact string.
fn dedup_stripped(found: Vec<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty() && seen.insert(*e))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new().unwrap()
    }

    fn found(entities: &Entities, t: EntityType) -> Vec<&str> {
        entities
            .get(&t)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_text_has_no_categories() {
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_non_empty_text_has_all_categories() {
        let entities = extractor().extract("nothing to see here");
        assert_eq!(entities.len(), 5);
        assert!(entities.values().all(Vec::is_empty));
    }

    #[test]
    fn test_keyword_any_case() {
        let entities = extractor().extract("we stopped at LIDL and later at decathlon");
        assert_eq!(found(&entities, EntityType::Stores), vec!["Lidl", "Decathlon"]);
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        let entities = extractor().extract("Nairobi and Waldi are not stores");
        assert!(found(&entities, EntityType::Stores).is_empty());
    }

    #[test]
    fn test_repeated_keyword_reported_once() {
        let entities = extractor().extract("Truma boiler, Truma heater, TRUMA combi");
        assert_eq!(found(&entities, EntityType::Brands), vec!["Truma"]);
    }

    #[test]
    fn test_domain_match_keeps_text_casing() {
        let entities = extractor().extract("order from www.amazon.de or amazon.de");
        // "www.amazon.de" and "amazon.de" from the pattern, "Amazon.de" from the keyword
        assert_eq!(
            found(&entities, EntityType::Websites),
            vec!["www.amazon.de", "amazon.de", "Amazon.de"]
        );
    }

    #[test]
    fn test_domain_and_keyword_collapse_when_identical() {
        let entities = extractor().extract("Buy it on Amazon.de today");
        assert_eq!(found(&entities, EntityType::Websites), vec!["Amazon.de"]);
    }

    #[test]
    fn test_overlapping_categories() {
        let entities = extractor().extract("Starlink works in remote areas");
        assert_eq!(found(&entities, EntityType::Brands), vec!["Starlink"]);
        assert_eq!(found(&entities, EntityType::Services), vec!["Starlink"]);
    }

    #[test]
    fn test_both_spellings_of_maps_me() {
        let entities = extractor().extract("download maps.me first");
        assert_eq!(found(&entities, EntityType::Apps), vec!["Maps.me", "MAPS.ME"]);
    }

    #[test]
    fn test_accented_store_name() {
        let entities = extractor().extract("Gas bottles at Intermarché or intermarche");
        assert_eq!(
            found(&entities, EntityType::Stores),
            vec!["Intermarché", "Intermarche"]
        );
    }

    #[test]
    fn test_multi_word_keyword() {
        let entities = extractor().extract("Navigate with google maps or Waze.");
        assert_eq!(found(&entities, EntityType::Apps), vec!["Waze", "Google Maps"]);
    }
}
