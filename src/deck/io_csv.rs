// Primitives for reading CSV files.

use std::fs::File;

use crate::deck::{
    io_common::{make_default_id, map_columns},
    *,
};

pub fn read_csv_responses(path: String, source: &FileSource) -> BDeckResult<Vec<ParsedResponse>> {
    let default_id = make_default_id(&path);

    let (header, records) = get_records(&path)?;
    let cols = map_columns(&header, &source.columns, &path)?;

    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header sits on line 1, the first response on line 2.
        let lineno = idx + 2;
        debug!("{:?} {:?}", lineno, line_r);
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        // Short rows are tolerated: a missing trailing cell reads as empty.
        let cell = |col: usize| line.get(col).unwrap_or("").to_string();
        let opt_cell = |col_o: Option<usize>| match col_o {
            Some(col) => cell(col),
            None => String::new(),
        };

        let pb = ParsedResponse {
            id: Some(default_id(lineno)),
            name: cell(cols.name),
            comment: cell(cols.comment),
            primary: cell(cols.primary),
            secondary: opt_cell(cols.secondary),
            bucket: cell(cols.bucket),
            closers: cell(cols.closers),
            status: cell(cols.status),
            year: opt_cell(cols.year),
            cross_rush: opt_cell(cols.cross_rush),
        };
        res.push(pb);
    }
    Ok(res)
}

fn get_records(
    path: &String,
) -> DeckResult<(Vec<Option<String>>, csv::StringRecordsIntoIter<File>)> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path: path.clone() })?;
    let mut records = rdr.into_records();
    let header = records
        .next()
        .context(EmptyCsvSnafu { path: path.clone() })?
        .context(CsvLineParseSnafu { lineno: 1usize })?;
    let header_cells: Vec<Option<String>> = header.iter().map(|s| Some(s.to_string())).collect();
    Ok((header_cells, records))
}
