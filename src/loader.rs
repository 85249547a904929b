use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use std::path::Path;

use crate::config::ColumnNames;
use crate::error::{Error, Result};

/// One row of the "nodes" sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: String,
    pub label: String,
    pub color: String,
}

/// One row of the "edges" sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// The two tables extracted from an uploaded workbook.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

/// Check that a filename carries the one accepted upload extension
///
/// Only `.xlsx` files are accepted; the extension check is case-insensitive
/// and happens before any parsing.
///
/// # Arguments
/// * `filename` - Name of the uploaded file
///
/// # Returns
/// * `Result<()>` - Ok for `.xlsx`, `Error::InvalidFileType` otherwise
pub fn check_extension(filename: &str) -> Result<()> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("xlsx") => Ok(()),
        _ => Err(Error::InvalidFileType(filename.to_string())),
    }
}

/// Load the node and edge tables from an Excel workbook
///
/// This function reads the sheets named "edges" and "nodes" (first three
/// columns each) into row-oriented tables. The header row of each sheet is
/// validated, case-sensitively, against the configured column names.
///
/// # Arguments
/// * `filepath` - Path to the `.xlsx` file to load
/// * `names` - Mapping of logical column roles to expected column names
///
/// # Returns
/// * `Result<SheetData>` - The extracted tables or an `Error::Load`
///
/// # Examples
/// ```no_run
/// use netgrid::config::ColumnNames;
/// use netgrid::loader::load_workbook;
///
/// match load_workbook("data.xlsx", &ColumnNames::default()) {
///     Ok(sheets) => println!("Loaded {} edge rows", sheets.edges.len()),
///     Err(e) => eprintln!("Error loading workbook: {}", e),
/// }
/// ```
pub fn load_workbook(filepath: impl AsRef<Path>, names: &ColumnNames) -> Result<SheetData> {
    let mut workbook: Xlsx<_> = open_workbook(filepath)?;

    let edge_range = sheet_range(&mut workbook, "edges")?;
    let node_range = sheet_range(&mut workbook, "nodes")?;

    let edges = parse_edge_rows(&edge_range, names)?;
    let nodes = parse_node_rows(&node_range, names)?;

    log::debug!(
        "loaded workbook: {} node rows, {} edge rows",
        nodes.len(),
        edges.len()
    );

    Ok(SheetData { nodes, edges })
}

// Fetch a worksheet by name and ensure it has at least three columns.
fn sheet_range(
    workbook: &mut Xlsx<std::io::BufReader<std::fs::File>>,
    sheet: &str,
) -> Result<Range<Data>> {
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| Error::Load(format!("sheet {:?}: {}", sheet, e)))?;

    if range.width() < 3 {
        return Err(Error::Load(format!(
            "sheet {:?} has {} columns, expected at least 3",
            sheet,
            range.width()
        )));
    }
    Ok(range)
}

// Validate that the first three header cells match the expected names exactly.
fn check_headers(range: &Range<Data>, sheet: &str, expected: [&str; 3]) -> Result<()> {
    let header = range
        .rows()
        .next()
        .ok_or_else(|| Error::Load(format!("sheet {:?} is empty", sheet)))?;

    for (cell, want) in header.iter().take(3).zip(expected) {
        let got = cell_text(cell).unwrap_or_default();
        if got != want {
            return Err(Error::Load(format!(
                "sheet {:?}: expected column {:?}, found {:?}",
                sheet, want, got
            )));
        }
    }
    Ok(())
}

fn parse_edge_rows(range: &Range<Data>, names: &ColumnNames) -> Result<Vec<EdgeRow>> {
    check_headers(range, "edges", [&names.source, &names.target, &names.weight])?;

    let mut edges = Vec::new();
    for (i, row) in range.rows().enumerate().skip(1) {
        if row_is_blank(row) {
            continue;
        }
        let source = cell_id(&row[0])
            .ok_or_else(|| Error::Load(format!("edges row {}: empty source id", i + 1)))?;
        let target = cell_id(&row[1])
            .ok_or_else(|| Error::Load(format!("edges row {}: empty target id", i + 1)))?;
        let weight = cell_number(&row[2])
            .ok_or_else(|| Error::Load(format!("edges row {}: non-numeric weight", i + 1)))?;
        edges.push(EdgeRow {
            source,
            target,
            weight,
        });
    }
    Ok(edges)
}

fn parse_node_rows(range: &Range<Data>, names: &ColumnNames) -> Result<Vec<NodeRow>> {
    check_headers(range, "nodes", [&names.id, &names.label, &names.color])?;

    let mut nodes = Vec::new();
    for (i, row) in range.rows().enumerate().skip(1) {
        if row_is_blank(row) {
            continue;
        }
        let id = cell_id(&row[0])
            .ok_or_else(|| Error::Load(format!("nodes row {}: empty id", i + 1)))?;
        let label = cell_text(&row[1])
            .ok_or_else(|| Error::Load(format!("nodes row {}: empty label", i + 1)))?;
        let color = cell_text(&row[2])
            .ok_or_else(|| Error::Load(format!("nodes row {}: empty color", i + 1)))?;
        nodes.push(NodeRow { id, label, color });
    }
    Ok(nodes)
}

fn row_is_blank(row: &[Data]) -> bool {
    row.iter().take(3).all(|cell| matches!(cell, Data::Empty))
}

// Normalize an identifier cell to a string key. Excel stores integer ids as
// floats, so whole floats become their integer form ("1", not "1.0").
fn cell_id(cell: &Data) -> Option<String> {
    match cell {
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Some((*f as i64).to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
