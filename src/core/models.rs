use std::path::{
    Path,
    PathBuf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Japanese,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub title: String, // File name, used for logging
    pub path: PathBuf, // Path to the markdown file
}

impl SourceFile {
    pub fn new(path: &Path) -> Self {
        let title = path.file_name().and_then(|n| n.to_str()).unwrap_or("Unknown").to_string();
        SourceFile { title, path: path.to_path_buf() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownDocument {
    pub title: Option<String>, // Frontmatter `title`, if any
    pub body: String,          // Content after the frontmatter block
}

impl MarkdownDocument {
    /// Text fed to the stripper: the title (when present) on its own line, then the body.
    pub fn text(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => format!("{}\n{}", title, self.body),
            _ => self.body.clone(),
        }
    }
}
