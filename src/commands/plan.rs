use crate::resolve::SplitUnit;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlanEntry {
    pub title: String,
    pub depth: u32,
    /// 1-indexed, inclusive; `None` for a section without pages
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    pub page_count: u32,
    pub file_name: Option<String>,
}

pub fn entries(units: &[SplitUnit], names: &[String]) -> Vec<PlanEntry> {
    units
        .iter()
        .zip(names)
        .map(|(unit, name)| {
            let (first_page, last_page, file_name) = if unit.is_empty() {
                (None, None, None)
            } else {
                (
                    Some(unit.pages.start + 1),
                    Some(unit.pages.end),
                    Some(format!("{}.pdf", name)),
                )
            };
            PlanEntry {
                title: unit.title.clone(),
                depth: unit.depth,
                first_page,
                last_page,
                page_count: unit.page_count(),
                file_name,
            }
        })
        .collect()
}

/// Print what a split would produce without writing anything.
pub fn print(units: &[SplitUnit], names: &[String], json: bool) {
    let plan = entries(units, names);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).unwrap_or_else(|e| format!("Error: {}", e))
        );
        return;
    }

    for entry in plan {
        let indent = "  ".repeat(entry.depth.saturating_sub(1) as usize);
        match (entry.first_page, entry.last_page, entry.file_name) {
            (Some(first), Some(last), Some(file_name)) => println!(
                "{}{} (pp. {}-{}) -> {}",
                indent, entry.title, first, last, file_name
            ),
            _ => println!("{}{} (no pages, skipped)", indent, entry.title),
        }
    }
}
