// Primitives for reading xlsx exports.

use calamine::DataType;

use crate::deck::{
    io_common::{cell_to_string, get_range, make_default_id, map_columns},
    *,
};

pub fn read_xlsx_responses(path: String, source: &FileSource) -> BDeckResult<Vec<ParsedResponse>> {
    let default_id = make_default_id(&path);

    let wrange = get_range(&path, source)?;

    let header = wrange
        .rows()
        .next()
        .context(EmptyExcelSnafu { path: path.clone() })?;
    debug!("read_xlsx_responses: header: {:?}", header);
    let header_cells: Vec<Option<String>> = header
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    let cols = map_columns(&header_cells, &source.columns, &path)?;

    let mut iter = wrange.rows();
    iter.next();
    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Rows are numbered from 1 in the excel world and the header is row 1.
        let lineno = (idx + 2) as u64;
        debug!("read_xlsx_responses: lineno: {:?} row: {:?}", lineno, &row);

        let cell = |col: usize| -> DeckResult<String> {
            match row.get(col) {
                Some(dt) => cell_to_string(dt, lineno),
                None => Ok(String::new()),
            }
        };
        let opt_cell = |col_o: Option<usize>| -> DeckResult<String> {
            match col_o {
                Some(col) => cell(col),
                None => Ok(String::new()),
            }
        };

        let pb = ParsedResponse {
            id: Some(default_id(lineno as usize)),
            name: cell(cols.name)?,
            comment: cell(cols.comment)?,
            primary: cell(cols.primary)?,
            secondary: opt_cell(cols.secondary)?,
            bucket: cell(cols.bucket)?,
            closers: cell(cols.closers)?,
            status: cell(cols.status)?,
            year: opt_cell(cols.year)?,
            cross_rush: opt_cell(cols.cross_rush)?,
        };
        res.push(pb);
    }
    Ok(res)
}
