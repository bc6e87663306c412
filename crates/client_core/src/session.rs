//! The selected directory and the files last observed in it.

/// Canonical separator form for directory paths handed to the service. Only
/// separators change; surrounding whitespace can be part of a real name.
pub fn normalize_directory(path: &str) -> String {
    path.replace('\\', "/")
}

/// Final path segment, accepting both separator styles.
pub fn path_basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return path;
    }
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilePreview {
    pub names: Vec<String>,
    /// Files left out of `names` once the preview limit was reached.
    pub remaining: usize,
}

#[derive(Debug, Default)]
pub struct DirectorySession {
    selected_directory: Option<String>,
    files: Vec<String>,
    refresh_required: bool,
}

impl DirectorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection and clears the previous listing. An empty path
    /// means the picker was cancelled and leaves the session untouched.
    pub fn select_directory(&mut self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }

        self.selected_directory = Some(normalize_directory(path));
        self.files = Vec::new();
        self.refresh_required = true;
        true
    }

    pub fn selected_directory(&self) -> Option<&str> {
        self.selected_directory.as_deref()
    }

    pub fn is_selected(&self, directory: &str) -> bool {
        self.selected_directory.as_deref() == Some(directory)
    }

    pub fn set_file_list(&mut self, files: Vec<String>) {
        self.files = files;
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Flags the selected directory for another listing. Returns `false`
    /// when nothing is selected.
    pub fn request_refresh(&mut self) -> bool {
        if self.selected_directory.is_none() {
            return false;
        }
        self.refresh_required = true;
        true
    }

    pub fn refresh_required(&self) -> bool {
        self.refresh_required
    }

    /// Consumes a pending refresh signal, yielding the directory to list.
    pub fn take_refresh_request(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.refresh_required) {
            return None;
        }
        self.selected_directory.clone()
    }

    pub fn preview(&self, limit: usize) -> FilePreview {
        FilePreview {
            names: self
                .files
                .iter()
                .take(limit)
                .map(|file| path_basename(file).to_string())
                .collect(),
            remaining: self.files.len().saturating_sub(limit),
        }
    }
}
