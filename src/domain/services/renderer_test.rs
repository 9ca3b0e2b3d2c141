use anyhow::Result;
use test_utils::markdown_fixture;

use super::Renderer;
use crate::domain::models::Block;
use crate::domain::models::Inline;
use crate::domain::models::ThemePreference;
use crate::domain::services::Themes;

fn renderer() -> Renderer {
    return Renderer::new(Themes::get(ThemePreference::Dark).unwrap());
}

#[test]
fn it_renders_headers_emphasis_and_code() {
    let text = "# Title\n**bold** and *italic*\n```js\nconst x = 1;\n```";
    let blocks = renderer().render(text);

    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks[0],
        Block::Header {
            level: 1,
            text: "Title".to_string(),
        }
    );
    assert_eq!(
        blocks[1],
        Block::Text(vec![
            Inline::Bold("bold".to_string()),
            Inline::Plain(" and ".to_string()),
            Inline::Italic("italic".to_string()),
        ])
    );

    match &blocks[2] {
        Block::Code {
            language,
            code,
            markup,
        } => {
            assert_eq!(language, "js");
            assert_eq!(code, "const x = 1;");
            // The js tag resolves to a grammar, so the markup carries ANSI
            // escapes rather than the literal text.
            assert!(markup.contains('\u{1b}'));
        }
        _ => panic!("expected a code block"),
    }
}

#[test]
fn it_renders_all_header_levels() {
    let blocks = renderer().render("###### Six\n####### Seven");

    assert_eq!(
        blocks[0],
        Block::Header {
            level: 6,
            text: "Six".to_string(),
        }
    );
    // Seven hashes is not a header.
    assert_eq!(
        blocks[1],
        Block::Text(vec![Inline::Plain("####### Seven".to_string())])
    );
}

#[test]
fn it_renders_unterminated_fences_as_one_block() {
    let blocks = renderer().render("intro\n```\nlet a = 1;\nlet b = 2;");

    assert_eq!(blocks.len(), 2);
    match &blocks[1] {
        Block::Code {
            language,
            code,
            markup,
        } => {
            assert_eq!(language, "");
            assert_eq!(code, "let a = 1;\nlet b = 2;");
            assert_eq!(markup, code);
        }
        _ => panic!("expected a code block"),
    }
}

#[test]
fn it_keeps_headers_inside_fences_as_code() {
    let blocks = renderer().render("```\n# not a header\n```");

    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::Code { code, .. } => {
            assert_eq!(code, "# not a header");
        }
        _ => panic!("expected a code block"),
    }
}

#[test]
fn it_leaves_unmatched_markers_literal() {
    let blocks = renderer().render("a * lone star and `an open tick");

    assert_eq!(
        blocks[0],
        Block::Text(vec![Inline::Plain(
            "a * lone star and `an open tick".to_string()
        )])
    );
}

#[test]
fn it_renders_empty_lines_as_breaks() {
    let blocks = renderer().render("one\n\ntwo");

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1], Block::Break);
}

#[test]
fn it_renders_inline_code_spans() {
    let blocks = renderer().render("run `cargo test` now");

    assert_eq!(
        blocks[0],
        Block::Text(vec![
            Inline::Plain("run ".to_string()),
            Inline::Code("cargo test".to_string()),
            Inline::Plain(" now".to_string()),
        ])
    );
}

#[test]
fn it_is_idempotent() -> Result<()> {
    let renderer = renderer();
    let first = renderer.render(markdown_fixture());
    let second = renderer.render(markdown_fixture());

    assert_eq!(first, second);
    assert!(!first.is_empty());

    return Ok(());
}

#[test]
fn it_renders_the_markdown_fixture_structure() {
    let blocks = renderer().render(markdown_fixture());

    let headers = blocks
        .iter()
        .filter(|e| return matches!(e, Block::Header { .. }))
        .count();
    let code_blocks = blocks
        .iter()
        .filter(|e| return matches!(e, Block::Code { .. }))
        .count();

    assert_eq!(headers, 1);
    assert_eq!(code_blocks, 2);
}
