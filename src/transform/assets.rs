//! Asset re-export rewriting
//!
//! Asset index files list their assets as string constants:
//!
//! ```text
//! export const LOGO = './logo.svg';
//! ```
//!
//! Bundlers cannot follow a path held in a string, so each such statement is
//! rewritten into a default re-export the bundler does follow:
//!
//! ```text
//! export { default as LOGO } from './logo.svg';
//! ```
//!
//! A statement is rewritten when its initializer is one quoted literal and it
//! stands on its own: it starts a line or follows a `;`, and after the closing
//! quote comes `;`, a line end, or a comment. Anything else after the literal
//! (a second declarator, `+`, a member access) leaves the statement untouched.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ASSET_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"export[ \t]+(?:const|let|var)[ \t]+(?P<name>[A-Za-z_$][\w$]*)[ \t]*=[ \t]*(?P<literal>'[^'\n]+'|"[^"\n]+")"#,
    )
    .expect("valid asset export pattern")
});

/// Rewrite every asset constant export into a default re-export
///
/// Returns the input unchanged (borrowed) when nothing matches. Rewriting an
/// already rewritten file is a no-op.
pub fn rewrite_asset_exports(source: &str) -> Cow<'_, str> {
    let mut rewritten = String::new();
    let mut copied = 0;

    for caps in ASSET_EXPORT.captures_iter(source) {
        let Some(statement) = caps.get(0) else {
            continue;
        };
        if !starts_statement(&source[..statement.start()])
            || !ends_statement(&source[statement.end()..])
        {
            continue;
        }
        rewritten.push_str(&source[copied..statement.start()]);
        rewritten.push_str(&format!(
            "export {{ default as {} }} from {}",
            &caps["name"], &caps["literal"]
        ));
        copied = statement.end();
    }

    if copied == 0 {
        return Cow::Borrowed(source);
    }
    rewritten.push_str(&source[copied..]);
    Cow::Owned(rewritten)
}

/// Line start (column zero) or right after a previous statement's `;`
fn starts_statement(before: &str) -> bool {
    let line = before.rfind('\n').map_or(before, |i| &before[i + 1..]);
    line.is_empty() || line.trim_end_matches([' ', '\t']).ends_with(';')
}

/// `;`, a comment, or nothing but blanks until the line end
fn ends_statement(after: &str) -> bool {
    let line = after.find('\n').map_or(after, |i| &after[..i]);
    let rest = line.trim_end_matches('\r').trim_start_matches([' ', '\t']);
    rest.is_empty() || rest.starts_with(';') || rest.starts_with("//") || rest.starts_with("/*")
}
