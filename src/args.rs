use clap::Parser;

/// Generates a reveal.js presentation from rush survey responses.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration describing the response sources, the image
    /// directory and the output settings. Paths inside the configuration are relative to it.
    /// Without it, the defaults are rush_responses.xlsx, rushee_images/ and presentation.html
    /// in the current directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference roster summary in JSON format. If provided, rushdeck will check
    /// that the generated deck matches the reference and fail on any difference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) Where to write the HTML deck. Setting this option overrides the path that
    /// may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the roster summary will be written in JSON
    /// format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path or empty) The spreadsheet of responses. Setting this option replaces the
    /// response sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default inferred from the file extension) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the single worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (directory path) The directory of rushee photos. Setting this option overrides the
    /// directory that may be specified with the --config option.
    #[clap(long, value_parser)]
    pub images: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
