//! Working set behind the "suggest, edit, confirm" flow for label lists.

use log::{info, warn};

use crate::curation::diff::diff;
use crate::models::{LabelSet, LabelSource};

/// Result of trying to add a label to the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    /// Input was blank after trimming.
    Empty,
    /// A label equal ignoring case is already present; carries the existing one.
    Duplicate(String),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// One curation attempt over a label list.
///
/// `original` is fixed at creation; edits only touch `working`. Confirming
/// is a pure function of both, so it can be repeated safely.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCuration {
    original: Vec<String>,
    working: Vec<String>,
    source: LabelSource,
}

impl LabelCuration {
    pub fn new(original: Vec<String>, source: LabelSource) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(original.len());
        for label in original {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        Self {
            working: unique.clone(),
            original: unique,
            source,
        }
    }

    pub fn original(&self) -> &[String] {
        &self.original
    }

    pub fn working(&self) -> &[String] {
        &self.working
    }

    pub fn source(&self) -> LabelSource {
        self.source
    }

    /// Append a label unless it is blank or already present ignoring case.
    /// Rejections are warnings, the working set is left as it was.
    pub fn add(&mut self, label: &str) -> AddOutcome {
        let label = label.trim();
        if label.is_empty() {
            warn!("Ignoring empty label");
            return AddOutcome::Empty;
        }

        let lowered = label.to_lowercase();
        if let Some(existing) = self.working.iter().find(|l| l.to_lowercase() == lowered) {
            warn!("Label '{}' already exists as '{}'", label, existing);
            return AddOutcome::Duplicate(existing.clone());
        }

        self.working.push(label.to_string());
        AddOutcome::Added(label.to_string())
    }

    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.working.len();
        self.working.retain(|l| l != label);
        before != self.working.len()
    }

    /// Replace the working set with the reviewer's final selection.
    ///
    /// Only labels already offered can be selected; anything else is dropped
    /// and counted in the return value.
    pub fn select<I, S>(&mut self, selection: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        let mut ignored = 0usize;

        for label in selection {
            let label = label.as_ref();
            if !self.working.iter().any(|l| l == label) {
                warn!("Selected label '{}' is not in the working set", label);
                ignored += 1;
                continue;
            }
            if !selected.iter().any(|l| l == label) {
                selected.push(label.to_string());
            }
        }

        self.working = selected;
        ignored
    }

    /// Snapshot the working set as a confirmed label set with provenance.
    pub fn confirm(&self) -> LabelSet {
        let delta = diff(&self.original, &self.working);
        info!(
            "Confirmed {} {} labels (+{} / -{})",
            self.working.len(),
            self.source.as_str(),
            delta.added.len(),
            delta.removed.len()
        );

        LabelSet {
            original: self.original.clone(),
            confirmed: self.working.clone(),
            added: delta.added,
            removed: delta.removed,
            source: self.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curation(labels: &[&str]) -> LabelCuration {
        LabelCuration::new(
            labels.iter().map(|s| s.to_string()).collect(),
            LabelSource::Generated,
        )
    }

    #[test]
    fn duplicate_add_is_a_case_insensitive_no_op() {
        let mut session = curation(&["students", "courses"]);

        let outcome = session.add("  Students ");

        assert_eq!(outcome, AddOutcome::Duplicate("students".into()));
        assert_eq!(session.working().len(), 2);
    }

    #[test]
    fn blank_add_is_rejected() {
        let mut session = curation(&["students"]);
        assert_eq!(session.add("   "), AddOutcome::Empty);
        assert_eq!(session.working(), ["students"]);
    }

    #[test]
    fn added_label_keeps_its_casing() {
        let mut session = curation(&["students"]);
        assert!(session.add("PhD Theses").is_added());
        assert_eq!(session.working(), ["students", "PhD Theses"]);
    }

    #[test]
    fn confirm_reports_provenance_and_delta() {
        let mut session = curation(&["students", "courses"]);
        session.add("grants");
        session.select(["students", "grants"]);

        let set = session.confirm();

        assert_eq!(set.original, vec!["students", "courses"]);
        assert_eq!(set.confirmed, vec!["students", "grants"]);
        assert_eq!(set.added, vec!["grants"]);
        assert_eq!(set.removed, vec!["courses"]);
        assert_eq!(set.source, LabelSource::Generated);
    }

    #[test]
    fn reconfirming_does_not_duplicate() {
        let mut session = curation(&["exams"]);
        session.add("theses");
        let first = session.confirm();
        let second = session.confirm();
        assert_eq!(first, second);
        assert_eq!(second.confirmed, vec!["exams", "theses"]);
    }

    #[test]
    fn selection_outside_working_set_is_ignored() {
        let mut session = curation(&["exams", "grades"]);
        let ignored = session.select(["grades", "lectures", "grades"]);
        assert_eq!(ignored, 1);
        assert_eq!(session.working(), ["grades"]);
    }

    #[test]
    fn suggested_duplicates_collapse() {
        let session = curation(&["exams", "exams", "grades"]);
        assert_eq!(session.original(), ["exams", "grades"]);
    }
}
