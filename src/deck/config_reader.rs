// ****** Configuration of a deck run ******
//
// The json schema mirrors the config files checked into test_data. All the
// keys are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::deck::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ProviderKind {
    Csv,
    Xlsx,
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct DeckConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "responseSources")]
    pub response_sources: Vec<FileSource>,
    #[serde(rename = "imageSettings", default)]
    pub image_settings: ImageSettings,
    #[serde(default)]
    pub rules: DeckRules,
}

impl DeckConfig {
    /// The configuration used when no config file is given: everything is
    /// looked up in the current directory under the historical names.
    pub fn default_paths() -> DeckConfig {
        DeckConfig {
            output_settings: OutputSettings {
                deck_title: "Rush Presentation".to_string(),
                output_path: None,
                summary_path: None,
                theme: None,
                transition: None,
            },
            response_sources: vec![FileSource {
                provider: "xlsx".to_string(),
                file_path: "rush_responses.xlsx".to_string(),
                excel_worksheet_name: None,
                columns: ColumnNames::default(),
            }],
            image_settings: ImageSettings::default(),
            rules: DeckRules::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct OutputSettings {
    #[serde(rename = "deckTitle")]
    pub deck_title: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    /// Where the json summary goes. The special value "stdout" prints it
    /// instead of writing a file.
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
    pub theme: Option<String>,
    pub transition: Option<String>,
}

impl OutputSettings {
    pub fn output_path(&self) -> String {
        self.output_path
            .clone()
            .unwrap_or_else(|| "presentation.html".to_string())
    }

    /// The stylesheet name, checked against the themes reveal.js ships
    /// under assets/css/theme/.
    pub fn theme(&self) -> DeckResult<String> {
        let res = self.theme.clone().unwrap_or_else(|| "black".to_string());
        match res.as_str() {
            "beige" | "black" | "blood" | "league" | "moon" | "night" | "serif" | "simple"
            | "sky" | "solarized" | "white" => Ok(res),
            _ => whatever!(
                "Unknown theme: {} (reveal.js ships beige/black/blood/league/moon/night/serif/simple/sky/solarized/white)",
                res
            ),
        }
    }

    /// The slide transition, checked against what reveal.js ships with.
    pub fn transition(&self) -> DeckResult<String> {
        let res = self
            .transition
            .clone()
            .unwrap_or_else(|| "slide".to_string());
        match res.as_str() {
            "none" | "fade" | "slide" | "convex" | "concave" | "zoom" => Ok(res),
            _ => whatever!(
                "Unknown transition: {} (reveal.js knows none/fade/slide/convex/concave/zoom)",
                res
            ),
        }
    }
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(default)]
    pub columns: ColumnNames,
}

impl FileSource {
    pub fn provider_kind(&self) -> DeckResult<ProviderKind> {
        match self.provider.as_str() {
            "csv" => Ok(ProviderKind::Csv),
            "xlsx" | "excel" => Ok(ProviderKind::Xlsx),
            _ => whatever!("Unknown provider: {}", self.provider),
        }
    }
}

/// Guesses the provider for inputs given on the command line, where no
/// config entry describes the file. Anything that is not an excel
/// extension reads as CSV.
pub fn infer_provider(path: &str) -> String {
    let lower = path.to_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        "xlsx".to_string()
    } else {
        "csv".to_string()
    }
}

/// The header names under which each response field is found.
/// The defaults match the historical form export.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct ColumnNames {
    #[serde(rename = "rusheeName", default = "default_rushee_name")]
    pub rushee_name: String,
    #[serde(rename = "rusheeInformation", default = "default_rushee_information")]
    pub rushee_information: String,
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_closers")]
    pub closers: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(rename = "crossRush", default = "default_cross_rush")]
    pub cross_rush: String,
}

impl Default for ColumnNames {
    fn default() -> ColumnNames {
        ColumnNames {
            rushee_name: default_rushee_name(),
            rushee_information: default_rushee_information(),
            primary: default_primary(),
            secondary: default_secondary(),
            bucket: default_bucket(),
            closers: default_closers(),
            status: default_status(),
            year: default_year(),
            cross_rush: default_cross_rush(),
        }
    }
}

fn default_rushee_name() -> String {
    "Rushee Name".to_string()
}
fn default_rushee_information() -> String {
    "Rushee Information".to_string()
}
fn default_primary() -> String {
    "Primary".to_string()
}
fn default_secondary() -> String {
    "Secondary".to_string()
}
fn default_bucket() -> String {
    "Bucket".to_string()
}
fn default_closers() -> String {
    "Closers".to_string()
}
fn default_status() -> String {
    "Status".to_string()
}
fn default_year() -> String {
    "Year".to_string()
}
fn default_cross_rush() -> String {
    "Cross-Rush".to_string()
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct ImageSettings {
    #[serde(default = "default_image_directory")]
    pub directory: String,
    #[serde(rename = "defaultImage", default = "default_image_file")]
    pub default_image: String,
}

impl Default for ImageSettings {
    fn default() -> ImageSettings {
        ImageSettings {
            directory: default_image_directory(),
            default_image: default_image_file(),
        }
    }
}

fn default_image_directory() -> String {
    "rushee_images".to_string()
}
fn default_image_file() -> String {
    "default.jpg".to_string()
}

#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone, Default)]
pub struct DeckRules {
    #[serde(rename = "bucketPolicy")]
    pub bucket_policy: Option<String>,
    #[serde(rename = "dropHandling")]
    pub drop_handling: Option<String>,
}

impl DeckRules {
    pub fn bucket_policy(&self) -> DeckResult<BucketPolicy> {
        match self.bucket_policy.as_deref() {
            None | Some("ordinalMax") => Ok(BucketPolicy::OrdinalMax),
            Some("firstNonEmpty") => Ok(BucketPolicy::FirstNonEmpty),
            Some(other) => whatever!("Unknown bucketPolicy: {}", other),
        }
    }

    pub fn drop_handling(&self) -> DeckResult<DropHandling> {
        match self.drop_handling.as_deref() {
            None | Some("exclude") => Ok(DropHandling::Exclude),
            Some("include") => Ok(DropHandling::Include),
            Some(other) => whatever!("Unknown dropHandling: {}", other),
        }
    }
}

// ****** Output summary ******

/// The deck header of the json summary.
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone)]
pub struct DeckInfo {
    pub title: String,
    #[serde(rename = "slideCount")]
    pub slide_count: usize,
}

/// Reads a summary file for comparison against a freshly generated one.
pub fn read_summary(path: String) -> BDeckResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(js)
}
