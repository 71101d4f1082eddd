//! Column name sanitization.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use etl_common::strip_accents;
use regex::Regex;
use tracing::warn;

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s.\-]+").expect("Invalid separator regex"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("Invalid character class regex"));

/// Turns a raw header into a column name of `[a-z0-9_]` characters.
///
/// The result may be empty. Applying it twice gives the same result as once.
///
/// ```
/// use etl_transform::sanitize;
///
/// assert_eq!(sanitize("Código Nº"), "codigo_num");
/// assert_eq!(sanitize("Precio Un."), "precio_un_");
/// ```
pub fn sanitize(name: &str) -> String {
    let replaced = name.replace("Nº", "num").replace('º', "");
    let folded = strip_accents(&replaced);
    let joined = SEPARATOR_RUNS.replace_all(&folded, "_");
    DISALLOWED.replace_all(&joined, "").to_lowercase()
}

/// Sanitizes a full header row into unique column names.
///
/// An empty result becomes `column_<index>`. A name already taken by an
/// earlier column gets the first free `_2`, `_3`, ... suffix.
pub fn sanitize_column_names<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, header) in headers.iter().enumerate() {
        let mut name = sanitize(header.as_ref());
        if name.is_empty() {
            name = format!("column_{idx}");
        }

        if taken.contains(&name) {
            let base = name;
            let mut suffix = 2;
            name = format!("{base}_{suffix}");
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{base}_{suffix}");
            }
            warn!(
                header = header.as_ref(),
                base = %base,
                renamed = %name,
                "Duplicate column name after sanitizing"
            );
        }

        taken.insert(name.clone());
        names.push(name);
    }

    names
}
