use std::path::{Path, PathBuf};

/// True if `name` ends with one of `extensions` (case-insensitive).
pub fn is_allowed(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

/// Split `paths` into uploadable files and files with a disallowed extension.
pub fn partition_uploads(paths: &[PathBuf], extensions: &[String]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    paths
        .iter()
        .cloned()
        .partition(|p| is_allowed(&file_name(p), extensions))
}

/// Union of two file lists, keeping the first occurrence order.
pub fn merge_output_files(old: &[String], new: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(old.len() + new.len());
    for name in old.iter().chain(new) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}

/// Final path component as a string, or empty if there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec![".txt".to_string(), ".pdf".to_string()]
    }

    #[test]
    fn allowed_is_case_insensitive() {
        assert!(is_allowed("notas.txt", &exts()));
        assert!(is_allowed("INFORME.PDF", &exts()));
        assert!(!is_allowed("foto.png", &exts()));
        assert!(!is_allowed("txt", &exts()));
    }

    #[test]
    fn partition_keeps_order() {
        let paths = vec![
            PathBuf::from("a.txt"),
            PathBuf::from("dir/b.doc"),
            PathBuf::from("c.pdf"),
        ];
        let (accepted, rejected) = partition_uploads(&paths, &exts());
        assert_eq!(accepted, vec![PathBuf::from("a.txt"), PathBuf::from("c.pdf")]);
        assert_eq!(rejected, vec![PathBuf::from("dir/b.doc")]);
    }

    #[test]
    fn merge_deduplicates() {
        let old = vec!["a.txt".to_string(), "b.txt".to_string()];
        let new = vec!["b.txt".to_string(), "c.txt".to_string(), "a.txt".to_string()];
        assert_eq!(merge_output_files(&old, &new), vec!["a.txt", "b.txt", "c.txt"]);
    }
}
