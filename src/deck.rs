use log::{debug, info, warn};

use rush_roster::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::deck::config_reader::*;

pub mod config_reader;
pub mod html;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod photos;

#[derive(Debug, Snafu)]
pub enum DeckError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Spreadsheet {path} has no usable rows"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {worksheet} not found in {path}"))]
    MissingExcelWorksheet { path: String, worksheet: String },
    #[snafu(display("Several worksheets in {path}: set excelWorksheetName to pick one"))]
    AmbiguousExcelWorksheet { path: String },
    #[snafu(display("Unexpected cell content on line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("CSV file {path} has no header row"))]
    EmptyCsv { path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Column {column_name} not found in the header of {path}"))]
    CannotFindColumnInHeader { column_name: String, path: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Error aggregating the responses"))]
    Aggregating { source: rush_roster::RosterError },
    #[snafu(display("Difference detected between the generated summary and {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DeckResult<T> = Result<T, DeckError>;
pub type BDeckResult<T> = Result<T, Box<DeckError>>;

/// One spreadsheet row, as handed over by the providers.
///
/// Everything is still a raw string at this point: bucket labels have not
/// been validated and no whitespace has been stripped. `id` locates the row
/// in its source file for log messages.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedResponse {
    pub id: Option<String>,
    pub name: String,
    pub comment: String,
    pub primary: String,
    pub secondary: String,
    pub bucket: String,
    pub closers: String,
    pub status: String,
    pub year: String,
    pub cross_rush: String,
}

/// Turns the raw rows into response records, mapping bucket labels to
/// dispositions. An unrecognized label counts as no disposition and is
/// logged, not failed on.
pub fn validate_responses(parsed: &[ParsedResponse]) -> Vec<ResponseRecord> {
    let mut res: Vec<ResponseRecord> = Vec::new();
    for pb in parsed.iter() {
        let bucket = Bucket::from_label(&pb.bucket);
        if bucket == Bucket::None && !pb.bucket.trim().is_empty() {
            warn!(
                "validate_responses: response {:?}: unknown bucket label {:?}",
                pb.id, pb.bucket
            );
        }
        res.push(ResponseRecord {
            name: pb.name.clone(),
            comment: pb.comment.clone(),
            primary: pb.primary.clone(),
            secondary: pb.secondary.clone(),
            bucket,
            closers: pb.closers.clone(),
            status: pb.status.clone(),
            year: pb.year.clone(),
            cross_rush: pb.cross_rush.clone(),
        });
    }
    res
}

fn read_responses(root_path: &Path, source: &FileSource) -> BDeckResult<Vec<ParsedResponse>> {
    let p: PathBuf = root_path.join(&source.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read response file {:?}", p2);
    match source.provider_kind()? {
        ProviderKind::Csv => io_csv::read_csv_responses(p2, source),
        ProviderKind::Xlsx => io_xlsx::read_xlsx_responses(p2, source),
    }
}

fn load_config(args: &Args) -> BDeckResult<(DeckConfig, PathBuf)> {
    let (config, root_p) = match &args.config {
        Some(config_path) => {
            let config_str = fs::read_to_string(config_path.clone()).context(OpeningJsonSnafu {
                path: config_path.clone(),
            })?;
            let config: DeckConfig =
                serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?
                .to_path_buf();
            (config, root_p)
        }
        None => (DeckConfig::default_paths(), PathBuf::from(".")),
    };
    info!("config: {:?}", config);
    Ok((config, root_p))
}

fn build_summary_js(config: &DeckConfig, roster: &Roster, drop_handling: DropHandling) -> JSValue {
    let mut rushees: Vec<JSValue> = Vec::new();
    let mut slide_count: usize = 0;
    for record in roster.records.iter() {
        let included = !(drop_handling == DropHandling::Exclude && record.bucket == Bucket::Drop);
        if included {
            slide_count += 1;
        }
        rushees.push(json!({
            "name": record.name,
            "bucket": record.bucket.label(),
            "commentCount": record.comments.len(),
            "included": included,
        }));
    }
    let deck = DeckInfo {
        title: config.output_settings.deck_title.clone(),
        slide_count,
    };
    json!({ "deck": deck, "rushees": rushees })
}

pub fn run_generation(args: &Args) -> BDeckResult<()> {
    let (config, root_p) = load_config(args)?;

    // Where the responses come from. An --input flag replaces the configured
    // sources and is relative to the current directory, not the config file.
    let (sources, sources_root) = match &args.input {
        Some(input) => {
            let provider = args
                .input_type
                .clone()
                .unwrap_or_else(|| infer_provider(input));
            let source = FileSource {
                provider,
                file_path: input.clone(),
                excel_worksheet_name: args.excel_worksheet_name.clone(),
                columns: ColumnNames::default(),
            };
            (vec![source], PathBuf::from("."))
        }
        None => (config.response_sources.clone(), root_p.clone()),
    };

    let mut parsed: Vec<ParsedResponse> = Vec::new();
    for source in sources.iter() {
        let mut rows = read_responses(&sources_root, source)?;
        parsed.append(&mut rows);
    }
    info!("run_generation: {:?} response rows", parsed.len());

    let policy = MergePolicy {
        bucket_policy: config.rules.bucket_policy()?,
    };
    let drop_handling = config.rules.drop_handling()?;

    let responses = validate_responses(&parsed);
    let roster = build_roster(&responses, &policy).context(AggregatingSnafu {})?;

    // Render the deck.
    let image_dir = match &args.images {
        Some(images) => PathBuf::from(images),
        None => root_p.join(&config.image_settings.directory),
    };
    let mut slides: Vec<String> = Vec::new();
    for record in roster.records.iter() {
        if drop_handling == DropHandling::Exclude && record.bucket == Bucket::Drop {
            debug!("run_generation: leaving {:?} out of the deck", record.name);
            continue;
        }
        let photo = photos::resolve_photo(
            &image_dir,
            &config.image_settings.default_image,
            &record.name,
        );
        let photo_url = photo.as_path().display().to_string();
        slides.push(html::render_slide(record, &photo_url));
    }
    let document = html::render_document(&config.output_settings, &slides)?;
    let out_path = match &args.out {
        Some(out) => PathBuf::from(out),
        None => root_p.join(config.output_settings.output_path()),
    };
    html::write_deck(&out_path, &document)?;
    info!(
        "run_generation: wrote {:?} slides to {:?}",
        slides.len(),
        out_path.as_path().display().to_string()
    );

    // Assemble the final json
    let summary_js = build_summary_js(&config, &roster, drop_handling);
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    let summary_dest = args
        .summary
        .clone()
        .or_else(|| config.output_settings.summary_path.clone());
    match summary_dest {
        Some(dest) if dest == "stdout" => {
            println!("{}", pretty_js_summary);
        }
        Some(dest) => {
            // A --summary flag is relative to the current directory.
            let summary_path = match &args.summary {
                Some(_) => PathBuf::from(&dest),
                None => root_p.join(&dest),
            };
            let summary_path_str = summary_path.as_path().display().to_string();
            fs::write(&summary_path, &pretty_js_summary).context(WritingOutputSnafu {
                path: summary_path_str.clone(),
            })?;
            info!("run_generation: wrote summary to {:?}", summary_path_str);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p.clone())?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_str(),
                "\n",
            );
            return Err(Box::new(DeckError::ReferenceMismatch {
                path: summary_p.clone(),
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::html::escape_html;
    use crate::deck::io_common::cell_to_string;
    use crate::deck::photos::{photo_key, resolve_photo};
    use rush_roster::builder::Builder;

    fn test_dir() -> String {
        option_env!("RUSHDECK_TEST_DIR")
            .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data"))
            .to_string()
    }

    fn test_args(test_name: &str) -> Args {
        let dir = test_dir();
        Args {
            config: Some(format!("{}/{}/{}_config.json", dir, test_name, test_name)),
            reference: Some(format!(
                "{}/{}/{}_expected_summary.json",
                dir, test_name, test_name
            )),
            out: None,
            summary: None,
            input: None,
            input_type: None,
            excel_worksheet_name: None,
            images: None,
            verbose: false,
        }
    }

    /// Runs a full generation against the checked-in reference summary and
    /// returns the generated document.
    fn run_deck_test(test_name: &str) -> String {
        let _ = env_logger::builder().is_test(true).try_init();
        info!("Running test {}", test_name);
        let res = run_generation(&test_args(test_name));
        if let Err(e) = &res {
            eprintln!("An error occurred {}", e);
        }
        res.unwrap();
        let out_path = format!("{}/{}/out.html", test_dir(), test_name);
        let document = fs::read_to_string(&out_path).unwrap();
        let _ = fs::remove_file(&out_path);
        document
    }

    #[test]
    fn basic_roster() {
        let document = run_deck_test("basic_roster");

        // One slide per kept rushee, in first-seen order.
        assert_eq!(document.matches("<section>").count(), 3);
        let names: Vec<&str> = document
            .split("<h1>")
            .skip(1)
            .map(|part| part.split("</h1>").next().unwrap())
            .collect();
        assert_eq!(names, vec!["Alice Baker", "Bob Lee", "Charlie Fox"]);

        // Dana is bucketed Drop and stays out of the deck.
        assert!(!document.contains("Dana Quill"));

        // Photo probing: exact match, a .png fallback, then the default.
        assert!(document.contains("images/alice_baker.jpg"));
        assert!(document.contains("images/bob_lee.png"));
        assert!(document.contains("images/default.jpg"));

        // Free text is escaped.
        assert!(document.contains("Asked sharp questions about &lt;budget &amp; plans&gt;"));
        assert!(!document.contains("<budget"));

        // Comment items: two for Alice, two for Bob, none for Charlie.
        assert_eq!(document.matches("<li>").count(), 4);
    }

    #[test]
    fn keep_drops() {
        let document = run_deck_test("keep_drops");

        // dropHandling: include keeps Frank in the deck.
        assert_eq!(document.matches("<section>").count(), 2);
        assert!(document.contains("<h1>Frank Ode</h1>"));
        assert!(document.contains("<td>Drop</td>"));

        // bucketPolicy: firstNonEmpty keeps Eve's first disposition.
        assert!(document.contains("<td>Pass</td>"));
        assert!(!document.contains("<td>Pull</td>"));
    }

    #[test]
    fn bad_labels() {
        let document = run_deck_test("bad_labels");

        assert_eq!(document.matches("<section>").count(), 1);
        assert!(document.contains("<h1>Gus Hart</h1>"));
        // An unrecognized label lands in the N/A category.
        assert!(document.contains("<td>N/A</td>"));
        // The row without a rushee name was skipped.
        assert!(!document.contains("Orphan comment row"));
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = test_dir();
        let mut args = test_args("basic_roster");
        args.reference = Some(format!("{}/keep_drops/keep_drops_expected_summary.json", dir));
        let out_path = format!("{}/basic_roster/out_mismatch.html", dir);
        args.out = Some(out_path.clone());
        let res = run_generation(&args);
        assert!(matches!(
            *res.unwrap_err(),
            DeckError::ReferenceMismatch { .. }
        ));
        let _ = fs::remove_file(&out_path);
    }

    #[test]
    fn xlsx_roster() {
        let document = run_deck_test("xlsx_roster");

        // Two responses for Hana Ito fold into one slide; Ira Jones is
        // bucketed Drop and stays out.
        assert_eq!(document.matches("<section>").count(), 1);
        assert!(document.contains("<h1>Hana Ito</h1>"));
        assert!(!document.contains("Ira Jones"));
        assert_eq!(document.matches("<li>").count(), 2);

        // The numeric year cell renders without a fraction.
        assert!(document.contains("<td>2027</td>"));
    }

    fn xlsx_source(worksheet: Option<&str>) -> FileSource {
        FileSource {
            provider: "xlsx".to_string(),
            file_path: String::new(),
            excel_worksheet_name: worksheet.map(|s| s.to_string()),
            columns: ColumnNames::default(),
        }
    }

    #[test]
    fn xlsx_rows_parse_with_named_columns() {
        let rows = io_xlsx::read_xlsx_responses(
            format!("{}/xlsx_roster/responses.xlsx", test_dir()),
            &xlsx_source(None),
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        let first = &rows[0];
        assert_eq!(first.name, "Hana Ito");
        assert_eq!(first.comment, "Led the campus tour");
        assert_eq!(first.bucket, "Pass");
        assert_eq!(first.year, "2027");
        assert_eq!(first.id, Some("responses.xlsx-00000002".to_string()));
        // Cells left empty in the workbook read as empty strings.
        assert_eq!(rows[1].primary, "");
        assert_eq!(rows[2].comment, "");
    }

    #[test]
    fn xlsx_worksheets_select_by_name() {
        let path = format!("{}/xlsx_roster/two_sheets.xlsx", test_dir());

        // A configured name picks its worksheet regardless of the others.
        let rows = io_xlsx::read_xlsx_responses(path.clone(), &xlsx_source(Some("Responses")))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Kai Lund");

        // Several worksheets without a configured name are ambiguous.
        let res = io_xlsx::read_xlsx_responses(path.clone(), &xlsx_source(None));
        assert!(matches!(
            *res.unwrap_err(),
            DeckError::AmbiguousExcelWorksheet { .. }
        ));

        // A name absent from the workbook is reported with the name.
        let res = io_xlsx::read_xlsx_responses(path, &xlsx_source(Some("Rushees")));
        match *res.unwrap_err() {
            DeckError::MissingExcelWorksheet { worksheet, .. } => {
                assert_eq!(worksheet, "Rushees")
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn xlsx_without_rows_is_reported() {
        let res = io_xlsx::read_xlsx_responses(
            format!("{}/xlsx_roster/empty.xlsx", test_dir()),
            &xlsx_source(None),
        );
        assert!(matches!(*res.unwrap_err(), DeckError::EmptyExcel { .. }));
    }

    #[test]
    fn csv_rows_parse_with_named_columns() {
        let source = FileSource {
            provider: "csv".to_string(),
            file_path: String::new(),
            excel_worksheet_name: None,
            columns: ColumnNames::default(),
        };
        let rows = io_csv::read_csv_responses(
            format!("{}/basic_roster/rush_responses.csv", test_dir()),
            &source,
        )
        .unwrap();
        assert_eq!(rows.len(), 6);
        let first = &rows[0];
        assert_eq!(first.name, "Alice Baker");
        assert_eq!(first.comment, "Great energy at the BBQ");
        assert_eq!(first.primary, "Jordan");
        assert_eq!(first.bucket, "Pull");
        assert_eq!(first.id, Some("rush_responses.csv-00000002".to_string()));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let source = FileSource {
            provider: "csv".to_string(),
            file_path: String::new(),
            excel_worksheet_name: None,
            columns: ColumnNames::default(),
        };
        let res = io_csv::read_csv_responses(
            format!("{}/bad_labels/missing_bucket.csv", test_dir()),
            &source,
        );
        match *res.unwrap_err() {
            DeckError::CannotFindColumnInHeader { column_name, .. } => {
                assert_eq!(column_name, "Bucket")
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn duplicate_headers_use_the_last_column() {
        let header: Vec<Option<String>> = [
            "Rushee Name",
            "Rushee Information",
            "Primary",
            "Bucket",
            "Closers",
            "Status",
            "Primary",
        ]
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
        let cols = io_common::map_columns(&header, &ColumnNames::default(), "dup.csv").unwrap();
        assert_eq!(cols.primary, 6);
        assert_eq!(cols.name, 0);
    }

    #[test]
    fn validate_responses_normalizes_unknown_labels() {
        let parsed = [
            ParsedResponse {
                name: "Gus Hart".to_string(),
                bucket: "Maybe".to_string(),
                ..ParsedResponse::default()
            },
            ParsedResponse {
                name: "Gus Hart".to_string(),
                bucket: " Pull ".to_string(),
                ..ParsedResponse::default()
            },
        ];
        let records = validate_responses(&parsed);
        assert_eq!(records[0].bucket, Bucket::None);
        assert_eq!(records[1].bucket, Bucket::Pull);
    }

    #[test]
    fn summary_counts_excluded_rushees() {
        let mut builder = Builder::new(&MergePolicy::DEFAULT_POLICY).unwrap();
        builder
            .add_response_with_bucket("Alice Baker", "strong", "Pull")
            .unwrap();
        builder
            .add_response_with_bucket("Dana Quill", "dropped by once", "Drop")
            .unwrap();
        let roster = builder.roster().unwrap();
        let config = DeckConfig::default_paths();

        let js = build_summary_js(&config, &roster, DropHandling::Exclude);
        assert_eq!(js["deck"]["slideCount"], json!(1));
        assert_eq!(js["rushees"][0]["name"], json!("Alice Baker"));
        assert_eq!(js["rushees"][0]["included"], json!(true));
        assert_eq!(js["rushees"][1]["bucket"], json!("Drop"));
        assert_eq!(js["rushees"][1]["included"], json!(false));

        let js = build_summary_js(&config, &roster, DropHandling::Include);
        assert_eq!(js["deck"]["slideCount"], json!(2));
        assert_eq!(js["rushees"][1]["included"], json!(true));
    }

    #[test]
    fn configs_parse_with_defaults() {
        let config_str = fs::read_to_string(format!(
            "{}/basic_roster/basic_roster_config.json",
            test_dir()
        ))
        .unwrap();
        let config: DeckConfig = serde_json::from_str(&config_str).unwrap();
        assert_eq!(config.response_sources.len(), 1);
        assert_eq!(
            config.response_sources[0].provider_kind().unwrap(),
            ProviderKind::Csv
        );
        assert_eq!(config.response_sources[0].columns.rushee_name, "Rushee Name");
        assert_eq!(
            config.rules.bucket_policy().unwrap(),
            BucketPolicy::OrdinalMax
        );
        assert_eq!(config.rules.drop_handling().unwrap(), DropHandling::Exclude);
        assert_eq!(config.output_settings.theme().unwrap(), "black");
        assert_eq!(config.output_settings.output_path(), "out.html");
    }

    #[test]
    fn transitions_are_validated() {
        let mut settings = OutputSettings {
            deck_title: "Deck".to_string(),
            output_path: None,
            summary_path: None,
            theme: None,
            transition: None,
        };
        assert_eq!(settings.transition().unwrap(), "slide");
        settings.transition = Some("fade".to_string());
        assert_eq!(settings.transition().unwrap(), "fade");
        settings.transition = Some("wipe".to_string());
        assert!(settings.transition().is_err());
    }

    #[test]
    fn themes_are_validated() {
        let mut settings = OutputSettings {
            deck_title: "Deck".to_string(),
            output_path: None,
            summary_path: None,
            theme: None,
            transition: None,
        };
        assert_eq!(settings.theme().unwrap(), "black");
        settings.theme = Some("moon".to_string());
        assert_eq!(settings.theme().unwrap(), "moon");
        settings.theme = Some("neon".to_string());
        assert!(settings.theme().is_err());
    }

    #[test]
    fn providers_infer_from_the_extension() {
        assert_eq!(infer_provider("responses.xlsx"), "xlsx");
        assert_eq!(infer_provider("responses.csv"), "csv");
        assert_eq!(infer_provider("responses"), "csv");
    }

    #[test]
    fn excel_cells_format_as_strings() {
        assert_eq!(
            cell_to_string(&calamine::DataType::String("Pull".to_string()), 2).unwrap(),
            "Pull"
        );
        assert_eq!(cell_to_string(&calamine::DataType::Empty, 2).unwrap(), "");
        assert_eq!(
            cell_to_string(&calamine::DataType::Float(2027.0), 2).unwrap(),
            "2027"
        );
        assert_eq!(
            cell_to_string(&calamine::DataType::Float(2.5), 2).unwrap(),
            "2.5"
        );
        assert_eq!(cell_to_string(&calamine::DataType::Int(3), 2).unwrap(), "3");
        assert_eq!(
            cell_to_string(&calamine::DataType::Bool(true), 2).unwrap(),
            "true"
        );
        assert!(
            cell_to_string(&calamine::DataType::Error(calamine::CellErrorType::Div0), 2).is_err()
        );
    }

    #[test]
    fn photos_resolve_with_extension_probing() {
        let dir = PathBuf::from(format!("{}/basic_roster/images", test_dir()));
        assert_eq!(
            resolve_photo(&dir, "default.jpg", "Alice  Baker"),
            dir.join("alice_baker.jpg")
        );
        assert_eq!(
            resolve_photo(&dir, "default.jpg", "BOB lee"),
            dir.join("bob_lee.png")
        );
        assert_eq!(
            resolve_photo(&dir, "default.jpg", "Charlie Fox"),
            dir.join("default.jpg")
        );
    }

    #[test]
    fn photo_keys_normalize_whitespace() {
        assert_eq!(photo_key(" Alice   Baker "), "alice_baker");
        assert_eq!(photo_key("BOB"), "bob");
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
