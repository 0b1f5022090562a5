use std::collections::HashSet;

use guide_types::Reference;

/// Lowercased names of the references a guide already cites.
pub fn existing_reference_names(references: Option<&[Reference]>) -> HashSet<String> {
    references
        .unwrap_or_default()
        .iter()
        .filter_map(|r| r.name.as_deref())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `entity` is already represented among `existing` names.
///
/// Deliberately loose: any substring overlap in either direction counts, and
/// so does any single word longer than three characters appearing inside an
/// existing name. "Aldi" is covered by "waldi's stellplatz list", and an
/// empty reference name covers everything.
pub fn is_already_referenced(entity: &str, existing: &HashSet<String>) -> bool {
    let entity = entity.to_lowercase();

    if existing
        .iter()
        .any(|name| name.contains(&entity) || entity.contains(name.as_str()))
    {
        return true;
    }

    entity
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .any(|word| existing.iter().any(|name| name.contains(word)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn named(name: &str) -> Reference {
        Reference {
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_reference_names_lowercased() {
        let refs = vec![named("Amazon.de"), Reference::default(), named("iOverlander")];
        assert_eq!(
            existing_reference_names(Some(refs.as_slice())),
            names(&["amazon.de", "ioverlander"])
        );
    }

    #[test]
    fn test_reference_names_absent() {
        assert!(existing_reference_names(None).is_empty());
        assert!(existing_reference_names(Some(&[][..])).is_empty());
    }

    #[test]
    fn test_entity_inside_reference_name() {
        assert!(is_already_referenced("Amazon", &names(&["amazon.de"])));
    }

    #[test]
    fn test_reference_name_inside_entity() {
        assert!(is_already_referenced("Amazon Germany", &names(&["amazon"])));
    }

    #[test]
    fn test_long_word_inside_reference_name() {
        assert!(is_already_referenced(
            "Park4Night",
            &names(&["park4night campsite finder"])
        ));
        assert!(is_already_referenced("Google Maps", &names(&["maps offline guide"])));
    }

    #[test]
    fn test_short_words_ignored() {
        // "de" would match but is too short to count on its own
        assert!(!is_already_referenced("Amazon DE", &names(&["de luxe camping"])));
        assert!(!is_already_referenced("Via-T", &names(&["via michelin"])));
    }

    #[test]
    fn test_loose_substring_cover() {
        assert!(is_already_referenced("Aldi", &names(&["waldi's stellplatz list"])));
        assert!(is_already_referenced("OBI", &names(&["nairobi camping"])));
    }

    #[test]
    fn test_empty_name_covers_everything() {
        assert!(is_already_referenced("Lidl", &names(&[""])));
    }

    #[test]
    fn test_not_covered() {
        assert!(!is_already_referenced("Lidl", &names(&["aldi süd", "carrefour"])));
        assert!(!is_already_referenced("Lidl", &HashSet::new()));
    }
}
