//! Front-matter parsing
//!
//! A document may start with a key-value header block. Each supported
//! encoding implements [`HeaderFormat`], which only knows how to cut the
//! block off the document and decode it; rendering the remaining body is left
//! to [`MarkdownRenderer`](super::MarkdownRenderer).

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::helpers;

/// Accepts `tags: rust` as well as `tags: [rust, web]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    /// Short teaser shown on list pages
    #[serde(alias = "excerpt")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// An encoding for the header block at the top of a document
pub trait HeaderFormat {
    /// Split `content` into (header, body) if it starts with this format's block
    fn split<'a>(&self, content: &'a str) -> Option<(&'a str, &'a str)>;

    /// Decode a header block previously returned by [`HeaderFormat::split`]
    fn decode(&self, header: &str) -> Result<FrontMatter>;
}

/// `---` delimited YAML
pub struct YamlHeader;

/// `;;;` delimited or bare-object JSON
pub struct JsonHeader;

impl HeaderFormat for YamlHeader {
    fn split<'a>(&self, content: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = content.strip_prefix("---")?;
        let rest = rest.trim_start_matches(['\n', '\r']);

        let end = rest.find("\n---")?;
        let header = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        if header.trim().is_empty() {
            return Some((header, body));
        }

        // A `---` rule followed by prose is markdown, not a header
        if !looks_like_yaml(header) {
            return None;
        }

        Some((header, body))
    }

    fn decode(&self, header: &str) -> Result<FrontMatter> {
        if header.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        serde_yaml::from_str(header).map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))
    }
}

impl HeaderFormat for JsonHeader {
    fn split<'a>(&self, content: &'a str) -> Option<(&'a str, &'a str)> {
        if let Some(rest) = content.strip_prefix(";;;") {
            let end = rest.find(";;;")?;
            let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
            return Some((&rest[..end], body));
        }

        if !content.starts_with('{') {
            return None;
        }

        // Braces inside JSON strings do not count
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = content[i + 1..].trim_start_matches(['\n', '\r']);
                        return Some((&content[..=i], body));
                    }
                }
                _ => {}
            }
        }

        None
    }

    fn decode(&self, header: &str) -> Result<FrontMatter> {
        let header = header.trim();
        let header = if header.starts_with('{') {
            header.to_string()
        } else {
            format!("{{{}}}", header)
        };
        serde_json::from_str(&header).map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))
    }
}

/// At least one `key: value` line with a plain identifier key
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }

        let Some(colon) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon];
        let after = &trimmed[colon + 1..];

        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp")
            && (after.is_empty() || after.starts_with(' '))
    })
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if let Some((header, body)) = YamlHeader.split(content) {
            return match YamlHeader.decode(header) {
                Ok(fm) => Ok((fm, body)),
                Err(e) => {
                    tracing::warn!("{}, treating as content", e);
                    Ok((FrontMatter::default(), content))
                }
            };
        }

        if let Some((header, body)) = JsonHeader.split(content) {
            return match JsonHeader.decode(header) {
                Ok(fm) => Ok((fm, body)),
                Err(e) => {
                    tracing::debug!("{}, treating as content", e);
                    Ok((FrontMatter::default(), content))
                }
            };
        }

        Ok((FrontMatter::default(), content))
    }

    /// Milliseconds since the epoch; missing or unparseable dates give 0
    pub fn timestamp(&self) -> i64 {
        helpers::timestamp_or_epoch(self.date.as_deref())
    }
}
