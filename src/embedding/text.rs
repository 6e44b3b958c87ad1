//! Searchable text extraction from journal markdown.

/// Strip the leading `---` frontmatter block and `## ` section headers.
///
/// Returns the remaining body (blank-line runs collapsed, trimmed) and the
/// section titles in document order, as written in the headers.
pub fn extract_searchable_text(markdown: &str) -> (String, Vec<String>) {
    let body = strip_frontmatter(markdown);

    let mut sections = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    for line in body.lines() {
        if let Some(title) = line.strip_prefix("## ") {
            let title = title.trim();
            if !title.is_empty() {
                sections.push(title.to_string());
            }
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() && lines.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    (lines.join("\n").trim().to_string(), sections)
}

fn strip_frontmatter(markdown: &str) -> &str {
    let Some(rest) = markdown
        .strip_prefix("---\n")
        .or_else(|| markdown.strip_prefix("---\r\n"))
    else {
        return markdown;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end() == "---" {
            return &rest[offset..];
        }
    }
    // Unterminated block: treat the whole document as body.
    markdown
}

/// Read the `timestamp:` field from an entry's frontmatter, if any.
pub fn frontmatter_timestamp(markdown: &str) -> Option<i64> {
    let rest = markdown
        .strip_prefix("---\n")
        .or_else(|| markdown.strip_prefix("---\r\n"))?;
    rest.lines()
        .take_while(|line| line.trim_end() != "---")
        .find_map(|line| line.strip_prefix("timestamp:"))
        .and_then(|value| value.trim().parse().ok())
}
