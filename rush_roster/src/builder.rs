pub use crate::config::*;

/// A builder for collecting responses without going through a spreadsheet.
///
/// ```
/// pub use rush_roster::builder::Builder;
/// pub use rush_roster::MergePolicy;
/// # use rush_roster::RosterError;
///
/// let mut builder = Builder::new(&MergePolicy::DEFAULT_POLICY)?;
///
/// builder.add_response_simple("Alice Baker", "great energy at the barbecue")?;
/// builder.add_response_simple("alice baker", "asked sharp questions")?;
///
/// let roster = builder.roster()?;
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster.records[0].comments.len(), 2);
///
/// # Ok::<(), RosterError>(())
/// ```
pub struct Builder {
    pub(crate) _policy: MergePolicy,
    pub(crate) _responses: Vec<ResponseRecord>,
}

impl Builder {
    pub fn new(policy: &MergePolicy) -> Result<Builder, RosterError> {
        Ok(Builder {
            _policy: *policy,
            _responses: Vec::new(),
        })
    }

    /// Adds a response carrying only a name and a comment.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_response_simple(&mut self, name: &str, comment: &str) -> Result<(), RosterError> {
        self.add_response(&ResponseRecord {
            name: name.to_string(),
            comment: comment.to_string(),
            ..ResponseRecord::default()
        })
    }

    /// Adds a response with a bucket label attached to it.
    ///
    /// The label goes through [Bucket::from_label]: unrecognized labels
    /// count as no disposition.
    pub fn add_response_with_bucket(
        &mut self,
        name: &str,
        comment: &str,
        bucket_label: &str,
    ) -> Result<(), RosterError> {
        self.add_response(&ResponseRecord {
            name: name.to_string(),
            comment: comment.to_string(),
            bucket: Bucket::from_label(bucket_label),
            ..ResponseRecord::default()
        })
    }

    pub fn add_response(&mut self, response: &ResponseRecord) -> Result<(), RosterError> {
        self._responses.push(response.clone());
        Ok(())
    }

    /// Folds everything added so far into a roster.
    pub fn roster(&self) -> Result<Roster, RosterError> {
        crate::build_roster(&self._responses, &self._policy)
    }
}
