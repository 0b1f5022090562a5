use std::io::Write;
use std::path::Path;

use guide_types::{Dataset, EntityFrequency, EntityType, MissingReference, Report, Summary};

use crate::analyze::GuideAnalyzer;
use crate::error::{AnalysisError, Result};

/// A progress line is printed after every this many guides.
const PROGRESS_EVERY: usize = 10;

// ═══════════════════════════════════════════════════════════════════════
//  FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset: Dataset = serde_json::from_str(&json).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), guides = dataset.guides.len(), "loaded dataset");
    Ok(dataset)
}

/// Write the report as 2-space indented JSON. The parent directory must
/// already exist. Returns the number of bytes written.
pub fn write_report(path: &Path, report: &Report) -> Result<usize> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, &json).map_err(|source| AnalysisError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = json.len(), "wrote report");
    Ok(json.len())
}

// ═══════════════════════════════════════════════════════════════════════
//  ANALYSIS
// ═══════════════════════════════════════════════════════════════════════

/// Analyze every guide in order.
///
/// `on_progress(done, total)` is called after every tenth guide.
pub fn analyze_dataset(
    analyzer: &GuideAnalyzer,
    dataset: &Dataset,
    mut on_progress: impl FnMut(usize, usize) -> Result<()>,
) -> Result<Report> {
    let total = dataset.guides.len();
    let mut all_missing = Vec::new();

    for (i, guide) in dataset.guides.iter().enumerate() {
        all_missing.extend(analyzer.analyze(guide)?);

        if (i + 1) % PROGRESS_EVERY == 0 {
            on_progress(i + 1, total)?;
        }
    }

    Ok(build_report(total, all_missing))
}

pub fn build_report(total_guides: usize, missing: Vec<MissingReference>) -> Report {
    let mut frequency = EntityFrequency::new();
    for m in &missing {
        frequency.record(&m.entity);
    }

    Report {
        summary: Summary {
            total_guides_analyzed: total_guides,
            total_missing_references: missing.len(),
            unique_entities: frequency.len(),
        },
        missing_references: missing,
        entity_frequency: frequency,
    }
}

/// Record counts per category, in category order, skipping empty ones.
pub fn category_counts(report: &Report) -> Vec<(EntityType, usize)> {
    EntityType::ALL
        .iter()
        .map(|t| {
            let n = report
                .missing_references
                .iter()
                .filter(|m| m.entity_type == *t)
                .count();
            (*t, n)
        })
        .filter(|(_, n)| *n > 0)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
//  CONSOLE OUTPUT
// ═══════════════════════════════════════════════════════════════════════

/// Run the analysis, printing the start line and progress lines to `out`.
pub fn run_with_progress<W: Write>(
    analyzer: &GuideAnalyzer,
    dataset: &Dataset,
    out: &mut W,
) -> Result<Report> {
    writeln!(out, "Analyzing {} guides...", dataset.guides.len())?;
    analyze_dataset(analyzer, dataset, |done, total| {
        writeln!(out, "Processed {done}/{total} guides...")?;
        Ok(())
    })
}

/// Print the totals, the `top` most frequent entities and the per-category
/// breakdown.
pub fn print_summary<W: Write>(out: &mut W, report: &Report, top: usize) -> Result<()> {
    writeln!(
        out,
        "\nFound {} potentially missing references",
        report.summary.total_missing_references
    )?;

    writeln!(out, "\nTop entities mentioned without references:")?;
    for (entity, count) in report.entity_frequency.top(top) {
        writeln!(out, "  {entity}: {count} guides")?;
    }

    let by_category = category_counts(report);
    if !by_category.is_empty() {
        writeln!(out, "\nBy category:")?;
        for (entity_type, count) in by_category {
            writeln!(out, "  {entity_type}: {count}")?;
        }
    }
    Ok(())
}
