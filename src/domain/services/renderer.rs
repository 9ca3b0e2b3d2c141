#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;
use syntect::util::as_24_bit_terminal_escaped;

use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::Block;
use crate::domain::models::Inline;

/// Converts one message's raw text to display blocks. Rendering is applied
/// independently per message, stateless across calls, and idempotent.
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Renderer {
        return Renderer { theme };
    }

    /// A two-state pass over the lines: outside a fence, lines are prose;
    /// inside, everything is code until the first closing fence. An
    /// unterminated fence consumes the remainder of the text as one block.
    pub fn render(&self, text: &str) -> Vec<Block> {
        let mut blocks: Vec<Block> = vec![];
        let mut fence: Option<(String, Vec<&str>)> = None;

        for line in text.split('\n') {
            if let Some((_, body)) = fence.as_mut() {
                if line.starts_with("```") {
                    let (language, body) = fence.take().unwrap();
                    blocks.push(self.code_block(&language, &body.join("\n")));
                } else {
                    body.push(line);
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("```") {
                fence = Some((rest.trim().to_string(), vec![]));
                continue;
            }

            if let Some((level, text)) = parse_header(line) {
                blocks.push(Block::Header { level, text });
                continue;
            }

            if line.is_empty() {
                blocks.push(Block::Break);
                continue;
            }

            blocks.push(Block::Text(parse_inline(line)));
        }

        if let Some((language, body)) = fence.take() {
            blocks.push(self.code_block(&language, &body.join("\n")));
        }

        return blocks;
    }

    fn code_block(&self, language: &str, code: &str) -> Block {
        let mut markup = code.to_string();

        if let Some(syntax) = Syntaxes::get(language) {
            let mut highlight = HighlightLines::new(syntax, &self.theme);
            let mut highlighted_lines: Vec<String> = vec![];

            for line in code.split('\n') {
                // Highlighting doesn't work accurately unless each line is
                // postfixed with '\n', especially when dealing with
                // multi-line code comments.
                let line_nl = format!("{line}\n");
                match highlight.highlight_line(&line_nl, &SYNTAX_SET) {
                    Ok(regions) => {
                        let escaped = as_24_bit_terminal_escaped(&regions, false);
                        highlighted_lines.push(escaped.trim_end().to_string());
                    }
                    Err(_) => {
                        highlighted_lines.push(line.to_string());
                    }
                }
            }

            markup = highlighted_lines.join("\n");
        }

        return Block::Code {
            language: language.to_string(),
            code: code.to_string(),
            markup,
        };
    }
}

fn parse_header(line: &str) -> Option<(u8, String)> {
    let level = line.chars().take_while(|e| return *e == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let text = line[level..].strip_prefix(' ')?;
    if text.is_empty() {
        return None;
    }

    return Some((level as u8, text.to_string()));
}

/// Best-effort inline emphasis, applied in fixed order per marker: bold,
/// italic, then inline code. Unmatched or malformed markers are left as
/// literal characters; ambiguous nesting is not guaranteed correct.
fn parse_inline(line: &str) -> Vec<Inline> {
    let chars = line.chars().collect::<Vec<char>>();
    let mut spans: Vec<Inline> = vec![];
    let mut plain = String::new();
    let mut idx = 0;

    let flush = |plain: &mut String, spans: &mut Vec<Inline>| {
        if !plain.is_empty() {
            spans.push(Inline::Plain(std::mem::take(plain)));
        }
    };

    while idx < chars.len() {
        if chars[idx] == '*' && idx + 1 < chars.len() && chars[idx + 1] == '*' {
            if let Some(end) = find_pair(&chars, idx + 2) {
                flush(&mut plain, &mut spans);
                spans.push(Inline::Bold(chars[idx + 2..end].iter().collect()));
                idx = end + 2;
                continue;
            }
        }

        if chars[idx] == '*' {
            if let Some(end) = find_char(&chars, idx + 1, '*') {
                flush(&mut plain, &mut spans);
                spans.push(Inline::Italic(chars[idx + 1..end].iter().collect()));
                idx = end + 1;
                continue;
            }
        }

        if chars[idx] == '`' {
            if let Some(end) = find_char(&chars, idx + 1, '`') {
                if end > idx + 1 {
                    flush(&mut plain, &mut spans);
                    spans.push(Inline::Code(chars[idx + 1..end].iter().collect()));
                    idx = end + 1;
                    continue;
                }
            }
        }

        plain.push(chars[idx]);
        idx += 1;
    }

    flush(&mut plain, &mut spans);

    return spans;
}

fn find_char(chars: &[char], from: usize, needle: char) -> Option<usize> {
    return (from..chars.len()).find(|idx| return chars[*idx] == needle);
}

fn find_pair(chars: &[char], from: usize) -> Option<usize> {
    let mut idx = from;
    while idx + 1 < chars.len() {
        if chars[idx] == '*' && chars[idx + 1] == '*' {
            return Some(idx);
        }
        idx += 1;
    }

    return None;
}
