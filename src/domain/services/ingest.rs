#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use tokio::fs;

pub const MAX_FILE_SIZE: u64 = 150 * 1024 * 1024;

// Declared media types accepted for attachment. Validation is declared-type
// based, not content-sniffed: a mislabeled file passes or fails on its
// declared type alone. Known weak point, carried forward deliberately since
// changing the strategy changes which files users can attach.
const ALLOWED_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "text/csv",
    "text/javascript",
    "text/typescript",
    "text/x-python",
    "text/x-java",
    "text/x-c",
    "text/x-cpp",
    "text/x-csharp",
    "text/x-go",
    "text/x-rust",
    "text/x-sql",
    "text/x-yaml",
    "text/x-json",
    "text/x-latex",
    "text/html",
    "text/css",
    "text/xml",
    "text/x-php",
    "text/x-ruby",
    "text/x-swift",
    "text/x-kotlin",
    "text/x-scala",
    "text/x-perl",
    "text/x-r",
    "text/x-lua",
    "text/x-shell",
    "text/x-dockerfile",
    "text/x-properties",
    "text/x-ini",
    "text/x-toml",
    "text/x-tex",
    "text/x-log",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub reason: Option<String>,
}

impl Validation {
    fn ok() -> Validation {
        return Validation {
            valid: true,
            reason: None,
        };
    }

    fn rejected(reason: &str) -> Validation {
        return Validation {
            valid: false,
            reason: Some(reason.to_string()),
        };
    }
}

pub struct Ingest {}

impl Ingest {
    /// The declared media type for a file name, derived from its extension.
    /// This stands in for the browser-reported type in the terminal client.
    pub fn declared_media_type(name: &str) -> Option<&'static str> {
        if name == "Dockerfile" {
            return Some("text/x-dockerfile");
        }

        let extension = Path::new(name)
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())?;

        let media_type = match extension.as_str() {
            "txt" => "text/plain",
            "md" | "markdown" => "text/markdown",
            "csv" => "text/csv",
            "js" | "mjs" => "text/javascript",
            "ts" => "text/typescript",
            "py" => "text/x-python",
            "java" => "text/x-java",
            "c" | "h" => "text/x-c",
            "cpp" | "cc" | "hpp" => "text/x-cpp",
            "cs" => "text/x-csharp",
            "go" => "text/x-go",
            "rs" => "text/x-rust",
            "sql" => "text/x-sql",
            "yaml" | "yml" => "text/x-yaml",
            "json" => "text/x-json",
            "html" | "htm" => "text/html",
            "css" => "text/css",
            "xml" => "text/xml",
            "php" => "text/x-php",
            "rb" => "text/x-ruby",
            "swift" => "text/x-swift",
            "kt" => "text/x-kotlin",
            "scala" => "text/x-scala",
            "pl" => "text/x-perl",
            "r" => "text/x-r",
            "lua" => "text/x-lua",
            "sh" | "bash" => "text/x-shell",
            "properties" => "text/x-properties",
            "ini" => "text/x-ini",
            "toml" => "text/x-toml",
            "tex" => "text/x-tex",
            "log" => "text/x-log",
            _ => return None,
        };

        return Some(media_type);
    }

    /// Pure function of file metadata; content is never read here.
    pub fn validate(name: &str, size: u64) -> Validation {
        let declared = Ingest::declared_media_type(name);
        if declared.is_none() || !ALLOWED_TYPES.contains(&declared.unwrap()) {
            return Validation::rejected("Invalid file type. Only text-like files are allowed.");
        }

        if size > MAX_FILE_SIZE {
            return Validation::rejected("File size exceeds 150MB limit.");
        }

        return Validation::ok();
    }

    /// Decodes the file as text and escapes the five HTML-significant
    /// characters so attached content can never be interpreted as live markup
    /// once embedded in a message.
    pub async fn read_content(path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| return format!("Failed to read file {}", path.display()))?;

        return Ok(escape_markup(&raw));
    }
}

fn escape_markup(content: &str) -> String {
    return content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;");
}
