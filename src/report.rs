use crate::index::FileIndex;
use crate::types::FileDetails;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

/// Width of the `=` rule between CLI entries and sections.
pub const RULE_WIDTH: usize = 100;

/// How results are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Entries and sections separated by `=` rules. Every requested section
    /// is printed, an empty `find` needle included.
    #[default]
    Cli,
    /// Search form text: blank fields are skipped, sections run together.
    Form,
}

/// What a single run asked for.
#[derive(Debug, Default)]
pub struct Request<'a> {
    pub find: Option<&'a str>,
    pub recent: Option<usize>,
    pub open: bool,
}

/// The four-line block shown per file.
#[must_use]
pub fn render_details_block(details: &FileDetails) -> String {
    format!(
        "\nFile Path: {}\nFile Size: {} bytes\nCreation Time: {}\nModification Time: {}\n",
        details.path, details.size, details.created, details.modified
    )
}

/// Builds the whole results text for `request`, section by section.
#[must_use]
pub fn render_results(index: &FileIndex, request: &Request<'_>, layout: Layout) -> String {
    match layout {
        Layout::Cli => render_cli(index, request),
        Layout::Form => render_form(index, request),
    }
}

/// Content of the first indexed file, or the layout's not-found message.
#[must_use]
pub fn render_open(index: &FileIndex, layout: Layout) -> String {
    let first = index.recent(1).first();
    match (layout, first) {
        (Layout::Cli, Some(path)) => format!("{}\n{}", rule(), index.open_file(path)),
        (Layout::Cli, None) => format!("{}\nFile not found!", rule()),
        (Layout::Form, Some(path)) => format!("\n\nFile Content:\n{}", index.open_file(path)),
        (Layout::Form, None) => "No recent files found to open.".to_string(),
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn details_blocks<'a>(index: &FileIndex, paths: impl Iterator<Item = &'a std::path::Path>) -> Vec<String> {
    paths
        .map(|p| render_details_block(&index.get_file_details(p)))
        .collect()
}

fn render_cli(index: &FileIndex, request: &Request<'_>) -> String {
    let separator = rule();
    let mut sections = Vec::new();

    if let Some(needle) = request.find {
        let blocks = details_blocks(index, index.find(needle).into_iter());
        if blocks.is_empty() {
            sections.push("No files found with the given substring.".to_string());
        } else {
            sections.push(blocks.join(&separator));
        }
    }

    if let Some(count) = request.recent {
        let blocks = details_blocks(index, index.recent(count).iter().map(|p| p.as_path()));
        if blocks.is_empty() {
            sections.push("No recent files found.".to_string());
        } else {
            sections.push(blocks.join(&separator));
        }
    }

    let mut out = sections.join(&format!("\n{separator}\n"));
    if request.open {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&render_open(index, Layout::Cli));
    }
    out
}

fn render_form(index: &FileIndex, request: &Request<'_>) -> String {
    let mut out = String::new();

    // A blank find box means no search
    if let Some(needle) = request.find.filter(|s| !s.is_empty()) {
        let blocks = details_blocks(index, index.find(needle).into_iter());
        if blocks.is_empty() {
            out.push_str("No files found with the given substring.");
        }
        out.push_str(&blocks.concat());
    }

    if let Some(count) = request.recent.filter(|&n| n > 0) {
        let blocks = details_blocks(index, index.recent(count).iter().map(|p| p.as_path()));
        if blocks.is_empty() {
            out.push_str("No recent files found.");
        } else {
            out.push_str("\nRecent Files:\n");
            out.push_str(&blocks.concat());
        }
    }

    if request.open {
        out.push_str(&render_open(index, Layout::Form));
    }

    out
}

pub fn print_details_table(title: &str, rows: &[FileDetails]) {
    println!("\n{}", format!("=== {title} ===").cyan());

    if rows.is_empty() {
        println!("{}", "No files.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Path", "Size", "Created", "Modified"]);

    for row in rows {
        let size = match row.size_bytes {
            Some(bytes) => Cell::new(human_bytes::human_bytes(bytes as f64)),
            None => Cell::new(&row.size).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&row.path),
            size,
            Cell::new(&row.created),
            Cell::new(&row.modified),
        ]);
    }

    println!("{table}");
}
