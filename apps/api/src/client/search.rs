use crate::models::prompt::PromptRecord;

/// Case-insensitive substring match of `term` against each record's text.
///
/// Order is preserved and `records` is never touched. A blank term keeps everything;
/// any other term is matched as given, surrounding whitespace included.
pub fn filter_by_search(records: &[PromptRecord], term: &str) -> Vec<PromptRecord> {
    if term.trim().is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.text.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
