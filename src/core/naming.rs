use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9@._-]").unwrap());

pub const FILE_PREFIX: &str = "qrcode_";
pub const FILE_EXTENSION: &str = "png";

/// Replaces every character outside `[A-Za-z0-9@._-]` with `_`.
pub fn normalize_file_stem(display_name: &str) -> String {
    UNSAFE_CHARS.replace_all(display_name, "_").into_owned()
}

/// Hands out unique file names for a batch. Repeated stems get `_2`, `_3`,
/// ... skipping any name already issued, so one token never overwrites
/// another.
#[derive(Debug, Default)]
pub struct FileNamer {
    issued: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&mut self, display_name: &str) -> String {
        let stem = normalize_file_stem(display_name);
        let mut candidate = stem.clone();
        if self.issued.contains(&candidate) {
            let suffix = self.next_suffix.entry(stem.clone()).or_insert(2);
            loop {
                candidate = format!("{}_{}", stem, suffix);
                *suffix += 1;
                if !self.issued.contains(&candidate) {
                    break;
                }
            }
        }
        self.issued.insert(candidate.clone());
        format!("{}{}.{}", FILE_PREFIX, candidate, FILE_EXTENSION)
    }
}
