//! Sort strategies for the flat row list
//!
//! Sorting is applied to the whole list, headers included, so any strategy
//! other than `Default` may separate a project header from its rows. All
//! sorts are stable: ties keep build order.

use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};
use taskgantt_core::{ProjectionEntry, SortStrategy};

/// Reorder `entries` in place
pub fn sort_entries(entries: &mut [ProjectionEntry], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Default => entries.sort_by_key(|e| e.ordinal),
        SortStrategy::StartDate => entries.sort_by_key(|e| e.start),
        SortStrategy::DueDate => entries.sort_by_key(|e| e.end),
        SortStrategy::Name => {
            let mut collator = name_collator();
            entries.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
        }
    }
}

/// Unicode collator for row names.
///
/// CLDR root order with non-ignorable punctuation, so symbols sort before
/// letters, accents are secondary differences and lowercase precedes
/// uppercase. Code point order breaks full ties.
pub fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Compare two names the way the `name` strategy orders them
pub fn collate(a: &str, b: &str) -> Ordering {
    name_collator().collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| collate(a, b));
        names
    }

    #[test]
    fn mixed_case_names_sort_alphabetically() {
        assert_eq!(sorted(&["Bravo", "alpha", "Charlie"]), vec!["alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_eq!(sorted(&["Apple", "apple"]), vec!["apple", "Apple"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(sorted(&["Report draft", "report"]), vec!["report", "Report draft"]);
    }

    #[test]
    fn non_ascii_folds() {
        assert_eq!(sorted(&["écrire", "Éclair"]), vec!["Éclair", "écrire"]);
        assert_eq!(sorted(&["Ölfilter", "öl"]), vec!["öl", "Ölfilter"]);
    }

    #[test]
    fn accents_are_secondary_to_base_letters() {
        assert_eq!(
            sorted(&["ezra", "écrire", "~tilde", "apple"]),
            vec!["~tilde", "apple", "écrire", "ezra"]
        );
        assert_eq!(sorted(&["Zoe", "Émile", "eve"]), vec!["Émile", "eve", "Zoe"]);
    }

    #[test]
    fn unaccented_form_sorts_first() {
        assert_eq!(sorted(&["résumé", "resume"]), vec!["resume", "résumé"]);
    }

    #[test]
    fn name_strategy_sorts_rows() {
        use chrono::NaiveDate;
        use taskgantt_core::{EntryKind, Ordinal};

        let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let row = |id: i64, name: &str| ProjectionEntry {
            id: id.to_string(),
            kind: EntryKind::Task,
            name: name.into(),
            start: at,
            end: at,
            progress: 0,
            parent_id: None,
            dependency_ids: None,
            collapsed: false,
            ordinal: Ordinal::Task(id),
        };
        let mut entries = vec![row(1, "Zahnarzt"), row(2, "Ärger"), row(3, "apfel")];
        sort_entries(&mut entries, SortStrategy::Name);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apfel", "Ärger", "Zahnarzt"]);
    }

    #[test]
    fn equal_names_are_equal() {
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }
}
