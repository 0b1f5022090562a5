use guide_types::EntityType;

/// Domain patterns for shops and marketplaces. Matched case-insensitively
/// anywhere in the text; every match is kept as the literal matched text
/// (so "www.Amazon.de" and "Amazon.de" are distinct hits).
pub const WEBSITE_PATTERNS: &[&str] = &[
    r"(?:www\.)?amazon\.de\b",
    r"(?:www\.)?amazon\.com\b",
    r"(?:www\.)?aliexpress\.com\b",
    r"(?:www\.)?ebay\.de\b",
    r"(?:www\.)?ebay\.com\b",
    r"(?:www\.)?mobile\.de\b",
    r"(?:www\.)?autoscout24\.de\b",
    r"(?:www\.)?caravan24\.com\b",
    r"(?:www\.)?reimo\.com\b",
    r"(?:www\.)?campingaz\.com\b",
    r"(?:www\.)?gaslow\.co\.uk\b",
    r"(?:www\.)?propangas\.de\b",
];

pub const WEBSITE_KEYWORDS: &[&str] = &[
    "Amazon Germany",
    "Amazon.de",
    "Amazon DE",
    "AliExpress",
    "eBay",
    "mobile.de",
    "AutoScout24",
];

pub const APP_KEYWORDS: &[&str] = &[
    "iOverlander",
    "Park4Night",
    "Sygic",
    "Polarsteps",
    "Maps.me",
    // Both spellings are listed; a hit on either reports that spelling.
    "MAPS.ME",
    "Campercontact",
    "SearchForSites",
    "ACSI",
    "Waze",
    "Google Maps",
];

pub const BRAND_KEYWORDS: &[&str] = &[
    // Heating / appliances
    "Truma", "Webasto", "Dometic", "Alde",
    // Gas
    "Gaslow", "GOK", "Campingaz",
    // Solar / batteries
    "Victron", "Renogy", "EPever", "Battle Born", "Lifos",
    // Camping gear
    "Coleman", "Fiamma", "Thule",
    // Connectivity
    "Teltonika", "Huawei", "TP-Link", "Starlink",
];

pub const STORE_KEYWORDS: &[&str] = &[
    // Earlier keyword lists had a mis-encoded "IntermarchÃ©" that never matched.
    "Intermarché",
    "Intermarche",
    "Lidl",
    "Aldi",
    "Carrefour",
    "Leclerc",
    "Decathlon",
    "Bauhaus",
    "Hornbach",
    "OBI",
    "Globus",
];

/// Starlink also appears under brands; both categories report it.
pub const SERVICE_KEYWORDS: &[&str] = &[
    "ADAC", "AXA", "Starlink", "TolCard", "Telepass", "Via-T", "DKV",
];

/// Keyword table for a category.
pub fn keywords_for(entity_type: EntityType) -> &'static [&'static str] {
    match entity_type {
        EntityType::Websites => WEBSITE_KEYWORDS,
        EntityType::Apps => APP_KEYWORDS,
        EntityType::Brands => BRAND_KEYWORDS,
        EntityType::Stores => STORE_KEYWORDS,
        EntityType::Services => SERVICE_KEYWORDS,
    }
}

/// Build a case-insensitive whole-word regex for a literal keyword.
pub fn build_keyword_regex(keyword: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(keyword))
}
