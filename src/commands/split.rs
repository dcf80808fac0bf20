use crate::commands::plan;
use crate::error::SplitError;
use crate::filename::FileNamer;
use crate::pdf::PdfDocument;
use crate::resolve::{resolve, validate_depth, SplitUnit};
use std::path::{Path, PathBuf};

pub struct SplitOptions {
    pub output_dir: PathBuf,
    /// Raw depth from the command line, validated before anything is read.
    pub depth: Option<i64>,
    pub dry_run: bool,
    pub json: bool,
}

#[derive(Debug, Default)]
pub struct SplitSummary {
    pub written: Vec<PathBuf>,
    pub skipped_empty: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    SkippedEmpty,
}

pub fn run<P: AsRef<Path>>(input: P, options: &SplitOptions) -> Result<SplitSummary, SplitError> {
    let input = input.as_ref();
    let max_depth = validate_depth(options.depth)?;

    if std::fs::File::open(input).is_err() {
        return Err(SplitError::InputNotFound(input.to_path_buf()));
    }

    log::info!("Opening PDF: {}", input.display());
    let doc = PdfDocument::open(input).map_err(|source| SplitError::Document {
        path: input.to_path_buf(),
        source,
    })?;
    let total_pages = doc.page_count();
    log::info!("PDF loaded successfully: {} pages", total_pages);

    let forest = doc.outline().map_err(|source| SplitError::Document {
        path: input.to_path_buf(),
        source,
    })?;
    if forest.is_empty() {
        return Err(SplitError::NoBookmarks(input.to_path_buf()));
    }

    let units = resolve(forest, max_depth, total_pages);
    if let Some(first) = units.first() {
        if first.pages.start > 0 {
            log::info!(
                "{} page(s) before the first bookmark are not part of any section",
                first.pages.start
            );
        }
    }
    log::info!("Processing {} sections", units.len());

    let names = assign_names(&units);

    if options.dry_run {
        plan::print(&units, &names, options.json);
        return Ok(SplitSummary::default());
    }

    let output_dir = &options.output_dir;
    std::fs::create_dir_all(output_dir).map_err(|source| SplitError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let mut summary = SplitSummary::default();
    for (unit, name) in units.iter().zip(&names) {
        match write_unit(&doc, unit, name, output_dir) {
            Ok(WriteOutcome::Written(path)) => summary.written.push(path),
            Ok(WriteOutcome::SkippedEmpty) => summary.skipped_empty += 1,
            Err(e) => {
                log::warn!("Error saving '{}.pdf': {:#}", name, anyhow::Error::from(e));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// File stems for every unit, in the same order.
pub fn assign_names(units: &[SplitUnit]) -> Vec<String> {
    let mut namer = FileNamer::new();
    units
        .iter()
        .enumerate()
        .map(|(i, unit)| namer.allocate(&unit.title, i))
        .collect()
}

/// Extract one unit's pages and write them to `output_dir/<stem>.pdf`.
///
/// `output_dir` must already exist.
pub fn write_unit(
    doc: &PdfDocument,
    unit: &SplitUnit,
    stem: &str,
    output_dir: &Path,
) -> Result<WriteOutcome, SplitError> {
    if unit.is_empty() {
        log::warn!("Skipping '{}': section has no pages", unit.title);
        return Ok(WriteOutcome::SkippedEmpty);
    }

    let output_path = output_dir.join(format!("{}.pdf", stem));
    log::info!("Creating: {}.pdf ({} pages)", stem, unit.page_count());

    let mut new_doc = doc
        .extract_range(&unit.pages)
        .map_err(|e| SplitError::write(&output_path, e))?;
    PdfDocument::save(&mut new_doc, &output_path).map_err(|e| SplitError::write(&output_path, e))?;

    Ok(WriteOutcome::Written(output_path))
}
