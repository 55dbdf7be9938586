use std::fs;

use crate::core::{
    CloudError,
    MarkdownDocument,
    SourceFile,
};

const FENCE: &str = "---";

pub fn read_markdown(source_file: &SourceFile) -> Result<MarkdownDocument, CloudError> {
    let content = fs::read_to_string(&source_file.path).map_err(|e| {
        CloudError::FailedToLoadFile(format!("{}: {}", source_file.path.display(), e))
    })?;

    Ok(parse_markdown(&content, &source_file.title))
}

/// Separates YAML frontmatter from the body. Malformed frontmatter is logged and the
/// whole content is kept as body.
pub fn parse_markdown(content: &str, name: &str) -> MarkdownDocument {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return MarkdownDocument { title: None, body: content.to_string() };
    };

    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(meta) => MarkdownDocument { title: frontmatter_title(&meta), body: body.to_string() },
        Err(e) => {
            tracing::warn!("Ignoring malformed frontmatter in {}: {}", name, e);
            MarkdownDocument { title: None, body: content.to_string() }
        }
    }
}

/// Returns `(yaml, body)` when the content opens with a `---` fence that is closed later.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn frontmatter_title(meta: &serde_yaml::Value) -> Option<String> {
    match meta.get("title")? {
        serde_yaml::Value::String(title) => Some(title.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
