mod config;
use log::{debug, info, warn};

use std::collections::HashMap;

pub use crate::config::*;

pub mod builder;
pub mod manual;

/// The aggregation key for a rushee name: trimmed, then lowercased.
///
/// Two submissions naming `"Alice Baker"` and `" alice baker "` land on the
/// same record.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// First non-empty value wins and is never replaced afterwards.
fn merge_scalar(current: &str, incoming: &str) -> String {
    if current.is_empty() {
        incoming.to_string()
    } else {
        current.to_string()
    }
}

impl RusheeRecord {
    /// Builds the single-response record, trimming every field.
    ///
    /// An empty trimmed comment contributes no entry to the comment list.
    pub fn from_response(response: &ResponseRecord) -> RusheeRecord {
        let comment = response.comment.trim();
        RusheeRecord {
            name: response.name.trim().to_string(),
            comments: if comment.is_empty() {
                Vec::new()
            } else {
                vec![comment.to_string()]
            },
            primary: response.primary.trim().to_string(),
            secondary: response.secondary.trim().to_string(),
            bucket: response.bucket,
            closers: response.closers.trim().to_string(),
            status: response.status.trim().to_string(),
            year: response.year.trim().to_string(),
            cross_rush: response.cross_rush.trim().to_string(),
        }
    }

    /// Field-wise merge of two records describing the same rushee.
    ///
    /// `self` is the earlier record. Comments concatenate in order and are
    /// never deduplicated. Scalar fields keep the first non-empty value.
    /// The bucket is resolved according to the policy. Neither input is
    /// mutated.
    pub fn merge(&self, other: &RusheeRecord, policy: &MergePolicy) -> RusheeRecord {
        let mut comments = self.comments.clone();
        comments.extend(other.comments.iter().cloned());
        let bucket = match policy.bucket_policy {
            BucketPolicy::OrdinalMax => self.bucket.max(other.bucket),
            BucketPolicy::FirstNonEmpty => {
                if self.bucket == Bucket::None {
                    other.bucket
                } else {
                    self.bucket
                }
            }
        };
        RusheeRecord {
            name: self.name.clone(),
            comments,
            primary: merge_scalar(&self.primary, &other.primary),
            secondary: merge_scalar(&self.secondary, &other.secondary),
            bucket,
            closers: merge_scalar(&self.closers, &other.closers),
            status: merge_scalar(&self.status, &other.status),
            year: merge_scalar(&self.year, &other.year),
            cross_rush: merge_scalar(&self.cross_rush, &other.cross_rush),
        }
    }
}

impl Roster {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by name, with the same normalization as the
    /// aggregation itself.
    pub fn get(&self, name: &str) -> Option<&RusheeRecord> {
        let key = normalize_name(name);
        self.records.iter().find(|r| normalize_name(&r.name) == key)
    }
}

/// Folds the responses into a roster with the given merge policy.
///
/// Arguments:
/// * `coll` the collection of responses to process, in submission order
/// * `policy` the merge policy that resolves conflicting fields
///
/// Responses whose name normalizes to the empty string are skipped with a
/// warning. The resulting records are in order of first appearance.
pub fn build_roster(
    coll: &[ResponseRecord],
    policy: &config::MergePolicy,
) -> Result<Roster, RosterError> {
    info!(
        "build_roster: processing {:?} responses, policy: {:?}",
        coll.len(),
        policy
    );

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<RusheeRecord> = Vec::new();
    for (idx, response) in coll.iter().enumerate() {
        let key = normalize_name(&response.name);
        if key.is_empty() {
            warn!(
                "build_roster: skipping response {:?}: empty rushee name",
                idx
            );
            continue;
        }
        let incoming = RusheeRecord::from_response(response);
        match index.get(&key) {
            Some(&pos) => {
                debug!("build_roster: merging response {:?} into {:?}", idx, key);
                let merged = records[pos].merge(&incoming, policy);
                records[pos] = merged;
            }
            None => {
                debug!("build_roster: new rushee {:?} from response {:?}", key, idx);
                index.insert(key, records.len());
                records.push(incoming);
            }
        }
    }

    if records.is_empty() {
        return Err(RosterError::EmptyRoster);
    }
    info!("build_roster: aggregated {:?} rushees", records.len());
    Ok(Roster { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(name: &str, comment: &str, bucket: Bucket) -> ResponseRecord {
        ResponseRecord {
            name: name.to_string(),
            comment: comment.to_string(),
            bucket,
            ..ResponseRecord::default()
        }
    }

    #[test]
    fn comments_accumulate_in_first_seen_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let responses = [
            response("Alice Baker", "great energy", Bucket::Pass),
            response(" ALICE BAKER ", "   ", Bucket::None),
            response("alice baker", "asked sharp questions", Bucket::Pull),
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert_eq!(roster.len(), 1);
        let record = &roster.records[0];
        assert_eq!(record.name, "Alice Baker");
        assert_eq!(
            record.comments,
            vec!["great energy", "asked sharp questions"]
        );
    }

    #[test]
    fn scalars_keep_the_first_non_empty_value() {
        let responses = [
            ResponseRecord {
                name: "Bob Lee".to_string(),
                status: " met twice ".to_string(),
                ..ResponseRecord::default()
            },
            ResponseRecord {
                name: "bob lee".to_string(),
                primary: "Jordan".to_string(),
                status: "follow up".to_string(),
                ..ResponseRecord::default()
            },
            ResponseRecord {
                name: "BOB LEE".to_string(),
                primary: "Casey".to_string(),
                ..ResponseRecord::default()
            },
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        let record = &roster.records[0];
        assert_eq!(record.primary, "Jordan");
        assert_eq!(record.status, "met twice");
    }

    #[test]
    fn ordinal_max_resolves_conflicting_buckets() {
        assert!(Bucket::None < Bucket::Drop);
        assert!(Bucket::Drop < Bucket::Pass);
        assert!(Bucket::Pass < Bucket::Pull);

        let responses = [
            response("Eve Stone", "solid first meeting", Bucket::Drop),
            response("eve stone", "came back with questions", Bucket::Pass),
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert_eq!(roster.records[0].bucket, Bucket::Pass);

        let responses = [
            response("Eve Stone", "", Bucket::Pull),
            response("eve stone", "", Bucket::Drop),
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert_eq!(roster.records[0].bucket, Bucket::Pull);
    }

    #[test]
    fn first_non_empty_policy_keeps_the_first_disposition() {
        let policy = MergePolicy {
            bucket_policy: BucketPolicy::FirstNonEmpty,
        };
        let responses = [
            response("Eve Stone", "", Bucket::None),
            response("eve stone", "", Bucket::Pass),
            response("EVE STONE", "", Bucket::Pull),
        ];
        let roster = build_roster(&responses, &policy).unwrap();
        assert_eq!(roster.records[0].bucket, Bucket::Pass);
    }

    #[test]
    fn unknown_labels_map_to_none() {
        assert_eq!(Bucket::from_label("Maybe"), Bucket::None);
        assert_eq!(Bucket::from_label(""), Bucket::None);
        assert_eq!(Bucket::from_label("drop"), Bucket::None);
        assert_eq!(Bucket::from_label(" Pull "), Bucket::Pull);
        assert_eq!(Bucket::None.label(), "N/A");
    }

    #[test]
    fn empty_names_are_skipped() {
        let responses = [
            response("", "orphan comment", Bucket::Pass),
            response("   ", "another orphan", Bucket::Pass),
            response("Gus Hart", "keen on robotics", Bucket::None),
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records[0].name, "Gus Hart");
    }

    #[test]
    fn no_usable_responses_is_an_error() {
        let empty: [ResponseRecord; 0] = [];
        assert_eq!(
            build_roster(&empty, &MergePolicy::DEFAULT_POLICY),
            Err(RosterError::EmptyRoster)
        );
        let nameless = [response("  ", "comment", Bucket::Pass)];
        assert_eq!(
            build_roster(&nameless, &MergePolicy::DEFAULT_POLICY),
            Err(RosterError::EmptyRoster)
        );
    }

    #[test]
    fn merge_does_not_mutate_its_inputs() {
        let first = RusheeRecord::from_response(&response("Ada", "first note", Bucket::Pass));
        let second = RusheeRecord::from_response(&response("Ada", "second note", Bucket::Pull));
        let first_copy = first.clone();
        let second_copy = second.clone();
        let merged = first.merge(&second, &MergePolicy::DEFAULT_POLICY);
        assert_eq!(first, first_copy);
        assert_eq!(second, second_copy);
        assert_eq!(merged.comments.len(), 2);
        assert_eq!(merged.bucket, Bucket::Pull);
    }

    #[test]
    fn roster_lookup_normalizes_names() {
        let responses = [response("Alice Baker", "note", Bucket::Pass)];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert!(roster.get(" ALICE baker ").is_some());
        assert!(roster.get("alice").is_none());
    }

    #[test]
    fn dropped_rushees_stay_in_the_roster() {
        // Exclusion from the deck happens at rendering time.
        let responses = [
            response("Dana Quill", "dropped by once", Bucket::Drop),
            response("Alice Baker", "strong", Bucket::Pull),
        ];
        let roster = build_roster(&responses, &MergePolicy::DEFAULT_POLICY).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("dana quill").map(|r| r.bucket), Some(Bucket::Drop));
    }
}

