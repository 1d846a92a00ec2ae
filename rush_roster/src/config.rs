// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The recruiting disposition assigned to a rushee by a reviewer.
///
/// The variants are ordered: `None < Drop < Pass < Pull`. The ordinal-max
/// merge policy relies on this ordering to resolve conflicting submissions,
/// so a single `Pull` outranks any number of `Pass` or `Drop` entries.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Bucket {
    /// No disposition yet, or a label outside the recognized set.
    None,
    Drop,
    Pass,
    Pull,
}

impl Bucket {
    /// Maps a raw spreadsheet label to a bucket.
    ///
    /// The recognized labels are the exact strings `Drop`, `Pass` and `Pull`
    /// after trimming. Anything else, including the empty string, is
    /// [Bucket::None].
    pub fn from_label(label: &str) -> Bucket {
        match label.trim() {
            "Drop" => Bucket::Drop,
            "Pass" => Bucket::Pass,
            "Pull" => Bucket::Pull,
            _ => Bucket::None,
        }
    }

    /// The display label, as it appears in slides and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::None => "N/A",
            Bucket::Drop => "Drop",
            Bucket::Pass => "Pass",
            Bucket::Pull => "Pull",
        }
    }
}

impl Default for Bucket {
    fn default() -> Bucket {
        Bucket::None
    }
}

/// One reviewer's submission about one rushee.
///
/// Fields may be empty: a reviewer is not required to fill every column of
/// the survey. The aggregation normalizes whitespace, so values can be
/// passed as they were read.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ResponseRecord {
    pub name: String,
    pub comment: String,
    pub primary: String,
    pub secondary: String,
    pub bucket: Bucket,
    pub closers: String,
    pub status: String,
    pub year: String,
    pub cross_rush: String,
}

// ******** Output data structures *********

/// The consolidated view of one rushee across all submissions.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RusheeRecord {
    /// First-seen trimmed form of the submitted name.
    pub name: String,
    /// All non-empty comments, in the order the responses were seen.
    pub comments: Vec<String>,
    pub primary: String,
    pub secondary: String,
    pub bucket: Bucket,
    pub closers: String,
    pub status: String,
    pub year: String,
    pub cross_rush: String,
}

/// The aggregation output: one record per unique rushee name.
///
/// Invariant: normalized names are unique across `records`, and the order is
/// the order of first appearance in the input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    pub records: Vec<RusheeRecord>,
}

/// Errors that prevent the aggregation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterError {
    /// No response with a usable rushee name was provided.
    EmptyRoster,
}

impl Error for RosterError {}

impl Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyRoster => write!(f, "no usable responses to aggregate"),
        }
    }
}

// ********* Configuration **********

/// How conflicting bucket labels for the same rushee are resolved.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum BucketPolicy {
    /// Takes the maximum under the `None < Drop < Pass < Pull` ordering.
    OrdinalMax,
    /// Keeps the first disposition that is not [Bucket::None].
    FirstNonEmpty,
}

/// Whether records bucketed [Bucket::Drop] appear in the rendered deck.
///
/// This is a rendering decision, not a merge decision: dropped records are
/// aggregated and summarized either way.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DropHandling {
    Exclude,
    Include,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct MergePolicy {
    pub bucket_policy: BucketPolicy,
}

impl MergePolicy {
    pub const DEFAULT_POLICY: MergePolicy = MergePolicy {
        bucket_policy: BucketPolicy::OrdinalMax,
    };
}
