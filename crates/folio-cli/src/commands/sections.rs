use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use folio_core::page::SectionLayout;
use folio_core::Page;

use super::load_page;

#[derive(Debug, Serialize)]
struct SectionSummary<'a> {
    id: &'a str,
    title: &'a str,
    layout: SectionLayout,
    elements: usize,
}

fn summarize(page: &Page) -> Vec<SectionSummary<'_>> {
    page.sections()
        .iter()
        .enumerate()
        .map(|(index, section)| SectionSummary {
            id: &section.id,
            title: &section.title,
            layout: section.layout,
            elements: page.elements().iter().filter(|e| e.section == index).count(),
        })
        .collect()
}

pub fn run(path: Option<&Path>, json: bool) -> Result<()> {
    let page = load_page(path)?;
    let summaries = summarize(&page);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("The page has no sections.");
        return Ok(());
    }

    println!("{} ({} sections):\n", page.title, summaries.len());
    for (i, summary) in summaries.iter().enumerate() {
        println!(
            "  {}. {} - {} ({} elements)",
            i + 1,
            summary.id,
            summary.title,
            summary.elements
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_builtin() {
        let page = Page::builtin();
        let summaries = summarize(&page);
        let ids: Vec<&str> = summaries.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["hero", "services", "portfolio", "contact"]);
        // Every element belongs to exactly one section
        let total: usize = summaries.iter().map(|s| s.elements).sum();
        assert_eq!(total, page.elements().len());
    }

    #[test]
    fn test_summary_json_shape() {
        let page = Page::builtin();
        let json = serde_json::to_value(summarize(&page)).unwrap();
        assert_eq!(json[2]["id"], "portfolio");
        assert_eq!(json[2]["layout"], "portfolio");
    }
}
