//! Export functionality for similarity reports.

use crate::core::scanner::FileEntry;
use crate::core::similar::SimilarityReport;
use crate::error::ReportError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

const STYLE: &str = ".left_info,.right_info{margin-bottom:5px}\
body{width:810px;background-color:#333;color:#cec;font-family:sans-serif}\
h2{margin:40px 40px 0;font-size:1em;color:#aba}\
.similar_set{height:400px;width:810px;margin:40px;margin-bottom:60px}\
div.left_image,div.right_image{float:left;background-color:#444}\
div.left_image{margin-right:5px}\
img.image_a,img.image_b{max-height:400px;max-width:400px}";

/// Path of `path` below `root`, or `path` itself when it is elsewhere
fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn display_relative(path: &Path, root: &Path) -> String {
    let relative = relative(path, root);
    if relative.as_os_str().is_empty() {
        ".".to_string()
    } else {
        relative.display().to_string()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_image<W: Write>(
    writer: &mut W,
    side: &str,
    class: &str,
    file: &FileEntry,
    root: &Path,
) -> std::io::Result<()> {
    write!(
        writer,
        "<div class='{side}_image'><div class='{side}_info'>{}</div>\
<img class='{class}' src='{}' title='{}' /></div>",
        escape_html(&file.description()),
        escape_html(&file.path.display().to_string()),
        escape_html(&display_relative(&file.path, root)),
    )
}

/// Export reports as one standalone HTML page
///
/// Directories without confirmed pairs are left out.
pub fn export_html<W: Write>(
    reports: &[SimilarityReport],
    root: &Path,
    mut writer: W,
) -> std::io::Result<()> {
    write!(
        writer,
        "<html><head><meta charset='UTF-8'><title>Similar images in {}</title>\
<style>{}</style></head><body>",
        escape_html(&root.display().to_string()),
        STYLE
    )?;

    for report in reports.iter().filter(|r| !r.is_empty()) {
        write!(
            writer,
            "<h2>{}</h2>",
            escape_html(&display_relative(&report.directory, root))
        )?;

        for pair in &report.pairs {
            let (a, b) = pair.key();
            write!(
                writer,
                "<div class='similar_set' id='{}'><div>Similarity: {}% ({})</div>",
                escape_html(&format!(
                    "{}|{}",
                    display_relative(a, root),
                    display_relative(b, root)
                )),
                pair.percent(),
                pair.perceptual_distance
            )?;
            write_image(&mut writer, "left", "image_a", &pair.left, root)?;
            write_image(&mut writer, "right", "image_b", &pair.right, root)?;
            write!(writer, "</div>")?;
        }
    }

    write!(writer, "</body></html>")?;
    writer.flush()
}

#[derive(Serialize)]
struct JsonDocument {
    root: PathBuf,
    generated_at: String,
    total_pairs: usize,
    directories: Vec<JsonDirectory>,
}

#[derive(Serialize)]
struct JsonDirectory {
    directory: String,
    pairs: Vec<JsonPair>,
}

#[derive(Serialize)]
struct JsonPair {
    left: String,
    right: String,
    left_info: String,
    right_info: String,
    similarity_percent: u32,
    lexical_score: f64,
    perceptual_distance: u32,
}

/// Export reports as a JSON document
pub fn export_json<W: Write>(
    reports: &[SimilarityReport],
    root: &Path,
    writer: W,
) -> Result<(), ReportError> {
    let directories: Vec<JsonDirectory> = reports
        .iter()
        .filter(|r| !r.is_empty())
        .map(|report| JsonDirectory {
            directory: display_relative(&report.directory, root),
            pairs: report
                .pairs
                .iter()
                .map(|pair| JsonPair {
                    left: display_relative(&pair.left.path, root),
                    right: display_relative(&pair.right.path, root),
                    left_info: pair.left.description(),
                    right_info: pair.right.description(),
                    similarity_percent: pair.percent(),
                    lexical_score: pair.lexical_score,
                    perceptual_distance: pair.perceptual_distance,
                })
                .collect(),
        })
        .collect();

    let document = JsonDocument {
        root: root.to_path_buf(),
        generated_at: chrono::Local::now().to_rfc3339(),
        total_pairs: directories.iter().map(|d| d.pairs.len()).sum(),
        directories,
    };

    serde_json::to_writer_pretty(writer, &document)
        .map_err(|e| ReportError::Serialize(e.to_string()))
}

/// Export reports to a file
pub fn export_to_file(
    reports: &[SimilarityReport],
    root: &Path,
    path: &Path,
    format: ReportFormat,
) -> Result<(), ReportError> {
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    match format {
        ReportFormat::Html => export_html(reports, root, &mut writer).map_err(write_error),
        ReportFormat::Json => {
            export_json(reports, root, &mut writer)?;
            writer.flush().map_err(write_error)
        }
    }
}
