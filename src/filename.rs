use std::collections::HashSet;

/// Longest file stem we produce, in characters.
pub const MAX_STEM_CHARS: usize = 150;

/// Byte limit for a stem, leaving room for `.pdf` under the usual 255-byte
/// file name limit once multi-byte characters are involved.
pub const MAX_STEM_BYTES: usize = 240;

fn is_safe(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')
}

/// Replace characters that are unsafe in file names with `_` and cap the
/// length at [`MAX_STEM_CHARS`] characters and [`MAX_STEM_BYTES`] bytes.
/// Applying it twice changes nothing.
pub fn sanitize(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect();
    truncate(&safe, MAX_STEM_CHARS, MAX_STEM_BYTES).to_string()
}

/// Longest prefix of `s` within both limits, cut on a char boundary.
fn truncate(s: &str, max_chars: usize, max_bytes: usize) -> &str {
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take(max_chars)
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Hands out distinct file stems for the units of one split.
///
/// Names are compared case-insensitively so two titles differing only in
/// case do not overwrite each other on case-insensitive file systems.
#[derive(Debug, Default)]
pub struct FileNamer {
    used: HashSet<String>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stem for the unit at zero-based `index` titled `title`.
    pub fn allocate(&mut self, title: &str, index: usize) -> String {
        let mut base = sanitize(title);
        if base.is_empty() {
            base = format!("section_{:03}", index + 1);
        }

        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.to_lowercase()) {
            let suffix = format!("_{}", n);
            let kept = truncate(
                &base,
                MAX_STEM_CHARS - suffix.len(),
                MAX_STEM_BYTES - suffix.len(),
            );
            candidate = format!("{}{}", kept, suffix);
            n += 1;
        }
        candidate
    }
}
