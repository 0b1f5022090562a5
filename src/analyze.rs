use guide_types::{EntityType, Guide, MissingReference};
use regex::Regex;
use serde_json::Value;

use crate::coverage::{existing_reference_names, is_already_referenced};
use crate::error::{AnalysisError, Result};
use crate::extract::EntityExtractor;
use crate::render::{render_plain, render_quoted};

/// Characters of surrounding text kept on each side of a mention.
const CONTEXT_RADIUS: usize = 100;

/// Finds entity mentions in a guide that its references don't cover.
pub struct GuideAnalyzer {
    extractor: EntityExtractor,
}

impl GuideAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(GuideAnalyzer {
            extractor: EntityExtractor::new()?,
        })
    }

    pub fn analyze(&self, guide: &Guide) -> Result<Vec<MissingReference>> {
        let existing = existing_reference_names(guide.references.as_deref());
        let text = guide_text(guide);
        let entities = self.extractor.extract(&text);

        let mut uncovered: Vec<(EntityType, &str)> = Vec::new();
        for (entity_type, found) in &entities {
            for entity in found {
                if !is_already_referenced(entity, &existing) {
                    uncovered.push((*entity_type, entity.as_str()));
                }
            }
        }

        tracing::debug!(
            guide = %display_id(&guide.id),
            extracted = entities.values().map(Vec::len).sum::<usize>(),
            missing = uncovered.len(),
            "analyzed guide"
        );

        if uncovered.is_empty() {
            return Ok(Vec::new());
        }

        let title = guide
            .title
            .english()
            .ok_or_else(|| AnalysisError::MissingEnglishTitle(display_id(&guide.id)))?;

        uncovered
            .into_iter()
            .map(|(entity_type, entity)| -> Result<MissingReference> {
                Ok(MissingReference {
                    guide_id: guide.id.clone(),
                    guide_title: title.clone(),
                    entity: entity.to_string(),
                    entity_type,
                    mentioned_in_content: mention_context(&text, entity)?,
                })
            })
            .collect()
    }
}

/// Concatenate the English content and tips of a guide into one blob.
///
/// Each part is followed by a single space. Tips that are neither strings
/// nor objects are skipped.
pub fn guide_text(guide: &Guide) -> String {
    let mut text = String::new();

    if let Some(content) = &guide.content {
        match content {
            Value::Object(by_lang) => match by_lang.get("en") {
                Some(Value::Array(items)) => {
                    let joined: Vec<String> = items.iter().map(render_plain).collect();
                    text.push_str(&joined.join(" "));
                }
                Some(en) => text.push_str(&render_plain(en)),
                None => {}
            },
            other => text.push_str(&render_plain(other)),
        }
        text.push(' ');
    }

    let tips: &[Value] = match &guide.tips {
        Some(Value::Object(by_lang)) => match by_lang.get("en") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    for tip in tips {
        match tip {
            Value::String(s) => text.push_str(s),
            Value::Object(_) => text.push_str(&render_quoted(tip)),
            _ => continue,
        }
        text.push(' ');
    }

    text
}

fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The first mention of `entity` (any case) with up to 100 characters of
/// same-line text either side, trimmed. Falls back to the entity itself.
fn mention_context(text: &str, entity: &str) -> Result<String> {
    let re = Regex::new(&format!(
        "(?i).{{0,{CONTEXT_RADIUS}}}{}.{{0,{CONTEXT_RADIUS}}}",
        regex::escape(entity)
    ))?;
    let context = re.find(text).map_or(entity, |m| m.as_str());
    Ok(context.trim().to_string())
}
