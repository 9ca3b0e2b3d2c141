use once_cell::sync::Lazy;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

pub struct Syntaxes {}

impl Syntaxes {
    /// Resolves a code fence language tag to a grammar. Tags are matched by
    /// name or file extension, so both `javascript` and `js` resolve.
    pub fn get(language: &str) -> Option<&'static SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        return SYNTAX_SET.find_syntax_by_token(language);
    }
}
