//! Header normalisation shared by all row sources

use std::collections::HashSet;

/// Header used for columns whose title is blank
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Makes a header row usable as field names.
///
/// Names are kept verbatim (a leading UTF-8 byte-order mark is dropped).
/// Blank names become `__EMPTY`, `__EMPTY_1`, ... and a repeated name gets a
/// `_1`, `_2`, ... suffix, so every column keeps a distinct key.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (i, name) in raw.into_iter().enumerate() {
        let mut name = name.as_ref();
        if i == 0 {
            name = name.trim_start_matches('\u{feff}');
        }

        let base = if name.trim().is_empty() { EMPTY_HEADER } else { name };

        let mut candidate = base.to_string();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
