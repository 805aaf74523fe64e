use std::collections::BTreeSet;

/// Exact-match difference between a suggested and a curated label list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl LabelDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `added = final - original`, `removed = original - final`, both sorted.
///
/// Case-sensitive on purpose: the curation session already refuses
/// case-insensitive duplicates before they get here.
pub fn diff<S: AsRef<str>>(original: &[S], final_set: &[S]) -> LabelDiff {
    let original: BTreeSet<&str> = original.iter().map(AsRef::as_ref).collect();
    let final_set: BTreeSet<&str> = final_set.iter().map(AsRef::as_ref).collect();

    LabelDiff {
        added: final_set
            .difference(&original)
            .map(|s| s.to_string())
            .collect(),
        removed: original
            .difference(&final_set)
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_replace_courses() {
        let result = diff(&["students", "courses"], &["students", "grants"]);
        assert_eq!(result.added, vec!["grants"]);
        assert_eq!(result.removed, vec!["courses"]);
    }

    #[test]
    fn identical_sets_have_no_diff() {
        let labels = ["exams", "grades", "syllabi"];
        assert!(diff(&labels, &labels).is_empty());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let result = diff(&["Students"], &["students"]);
        assert_eq!(result.added, vec!["students"]);
        assert_eq!(result.removed, vec!["Students"]);
    }

    #[test]
    fn original_minus_removed_plus_added_is_final() {
        let original = ["a", "b", "c", "d"];
        let final_set = ["b", "d", "e", "f"];
        let result = diff(&original, &final_set);

        assert!(result.added.iter().all(|a| !result.removed.contains(a)));

        let mut rebuilt: BTreeSet<String> = original
            .iter()
            .map(|s| s.to_string())
            .filter(|s| !result.removed.contains(s))
            .collect();
        rebuilt.extend(result.added.iter().cloned());
        let expected: BTreeSet<String> = final_set.iter().map(|s| s.to_string()).collect();
        assert_eq!(rebuilt, expected);
    }
}
