use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::deck::*;

pub fn simplify_file_name(path: &str) -> String {
    match Path::new(path).file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => path.to_string(),
    }
}

/// Builds the id given to rows that have none of their own: the file name
/// plus the line number.
pub fn make_default_id(path: &String) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path.as_str());
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Column positions of the response fields, as resolved from a header row.
/// The optional columns may be absent from the file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnIndexes {
    pub name: usize,
    pub comment: usize,
    pub primary: usize,
    pub secondary: Option<usize>,
    pub bucket: usize,
    pub closers: usize,
    pub status: usize,
    pub year: Option<usize>,
    pub cross_rush: Option<usize>,
}

/// Given the header of a file (names of each of the columns), finds the
/// position of every response field named in the configuration.
pub fn map_columns(
    header: &[Option<String>],
    names: &ColumnNames,
    path: &str,
) -> DeckResult<ColumnIndexes> {
    let mut col_names: HashMap<String, usize> = HashMap::new();
    for (idx, cell) in header.iter().enumerate() {
        if let Some(s) = cell {
            let col_name = s.trim().to_string();
            if let Some(prev_idx) = col_names.insert(col_name.clone(), idx) {
                warn!(
                    "map_columns: column {:?} appears several times in {:?} (positions {:?} and {:?}), using the last one",
                    col_name, path, prev_idx, idx
                );
            }
        }
    }
    debug!("map_columns: col_names: {:?}", col_names);

    let find = |column_name: &String| col_names.get(column_name.trim()).cloned();
    let required = |column_name: &String| {
        find(column_name).context(CannotFindColumnInHeaderSnafu {
            column_name: column_name.clone(),
            path: path.to_string(),
        })
    };

    Ok(ColumnIndexes {
        name: required(&names.rushee_name)?,
        comment: required(&names.rushee_information)?,
        primary: required(&names.primary)?,
        secondary: find(&names.secondary),
        bucket: required(&names.bucket)?,
        closers: required(&names.closers)?,
        status: required(&names.status)?,
        year: find(&names.year),
        cross_rush: find(&names.cross_rush),
    })
}

/// Formats one spreadsheet cell as the string the survey columns hold.
/// Numbers come up when a year column is typed as numeric in excel.
pub fn cell_to_string(cell: &DataType, lineno: u64) -> DeckResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::Empty => Ok(String::new()),
        _ => Err(DeckError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}

/// Opens a workbook and picks the worksheet to read.
///
/// With no configured worksheet name, a single-sheet workbook reads that
/// sheet and anything else is an error.
pub fn get_range(path: &str, source: &FileSource) -> DeckResult<Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &source.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path.to_string(),
    })?;

    match &source.excel_worksheet_name {
        Some(worksheet_name) => {
            let wrange = workbook
                .worksheet_range(worksheet_name)
                .context(MissingExcelWorksheetSnafu {
                    path: path.to_string(),
                    worksheet: worksheet_name.clone(),
                })?
                .context(OpeningExcelSnafu {
                    path: path.to_string(),
                })?;
            Ok(wrange)
        }
        None => {
            let mut all_worksheets = workbook.worksheets();
            if all_worksheets.len() > 1 {
                return Err(DeckError::AmbiguousExcelWorksheet {
                    path: path.to_string(),
                });
            }
            match all_worksheets.pop() {
                Some((worksheet_name, wrange)) => {
                    debug!("get_range: reading worksheet {:?}", worksheet_name);
                    Ok(wrange)
                }
                None => Err(DeckError::EmptyExcel {
                    path: path.to_string(),
                }),
            }
        }
    }
}
