// src/exec/expand.rs

//! Argument expansion: `~`, filename wildcards, and quote joining.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::RunErrorKind;
use crate::exec::env::ExecConfig;
use crate::exec::glob::expand_glob;

/// Paths each wildcard field expanded to, keyed by field index.
pub(crate) type ExpansionMap = BTreeMap<usize, Vec<String>>;

/// Expand `~` and wildcards in `fields[args_start..]`. Flags (fields starting
/// with `-`) are left alone.
pub(crate) fn expand_arguments(
    fields: &mut Vec<String>,
    args_start: usize,
    cfg: &ExecConfig,
) -> Result<(), RunErrorKind> {
    let cwd = cfg.cwd();
    let mut expansions = ExpansionMap::new();

    for (i, field) in fields.iter_mut().enumerate().skip(args_start) {
        if field.starts_with('-') {
            continue;
        }

        if let Some(expanded) = expand_tilde(field, cfg.home()) {
            *field = expanded;
        }

        let names = expand_glob(cfg.fs(), &cwd, field).map_err(|source| {
            RunErrorKind::GlobSyntax {
                pattern: field.clone(),
                source,
            }
        })?;
        if !names.is_empty() {
            debug!(pattern = %field, matches = names.len(), "expanded wildcard");
            expansions.insert(i, names);
        }
    }

    splice_expansions(fields, expansions);
    Ok(())
}

/// Replace `~` at the start of `~` or `~/...` with the home directory.
fn expand_tilde(field: &str, home: Option<&Path>) -> Option<String> {
    if field != "~" && !field.starts_with("~/") {
        return None;
    }
    match home {
        Some(home) => Some(format!("{}{}", home.display(), &field[1..])),
        None => {
            warn!(field, "no home directory configured; leaving `~` unexpanded");
            None
        }
    }
}

/// Splice from the highest index down so earlier indices stay valid.
fn splice_expansions(fields: &mut Vec<String>, expansions: ExpansionMap) {
    for (i, names) in expansions.into_iter().rev() {
        fields.splice(i..=i, names);
    }
}

enum QuoteState {
    Normal,
    InQuote {
        quote: char,
        joined: String,
        raw: Vec<String>,
    },
}

fn opening_quote(field: &str) -> Option<char> {
    field.chars().next().filter(|c| *c == '\'' || *c == '"')
}

/// Re-join fields that whitespace splitting cut out of a quoted string, and
/// strip the quotes.
///
/// `sh -c 'echo 123'` arrives as `["sh", "-c", "'echo", "123'"]` and leaves
/// as `["sh", "-c", "echo 123"]`. A quote that is still open when the stage
/// ends is left as it was written.
pub(crate) fn join_quoted(fields: Vec<String>, args_start: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(fields.len());
    let mut state = QuoteState::Normal;

    for (i, field) in fields.into_iter().enumerate() {
        if i < args_start {
            out.push(field);
            continue;
        }

        state = match state {
            QuoteState::Normal => match opening_quote(&field) {
                None => {
                    out.push(field);
                    QuoteState::Normal
                }
                Some(quote) => {
                    let inner = field[1..].to_string();
                    match inner.strip_suffix(quote) {
                        Some(unquoted) => {
                            out.push(unquoted.to_string());
                            QuoteState::Normal
                        }
                        None => QuoteState::InQuote {
                            quote,
                            joined: inner,
                            raw: vec![field],
                        },
                    }
                }
            },
            QuoteState::InQuote {
                quote,
                mut joined,
                mut raw,
            } => {
                joined.push(' ');
                let closing = field.strip_suffix(quote).map(str::to_owned);
                match closing {
                    Some(last) => {
                        joined.push_str(&last);
                        out.push(joined);
                        QuoteState::Normal
                    }
                    None => {
                        joined.push_str(&field);
                        raw.push(field);
                        QuoteState::InQuote { quote, joined, raw }
                    }
                }
            }
        };
    }

    if let QuoteState::InQuote { quote, raw, .. } = state {
        warn!(%quote, fields = ?raw, "unterminated quote; passing fields through unchanged");
        out.extend(raw);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fs::mock::MockFileSystem;

    fn fields(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn mock_config() -> ExecConfig {
        let fs = MockFileSystem::new();
        fs.add_file("/work/a.go");
        fs.add_file("/work/b.go");
        fs.add_file("/work/notes.txt");
        fs.add_file("/home/me/x.conf");
        fs.add_file("/home/me/y.conf");

        ExecConfig::boot()
            .with_fs(Arc::new(fs))
            .with_working_dir("/work")
            .with_home("/home/me")
    }

    #[test]
    fn wildcards_are_spliced_in_order() {
        let cfg = mock_config();
        let mut f = fields(&["ls", "*.go", "-l", "*.txt"]);
        expand_arguments(&mut f, 1, &cfg).unwrap();
        assert_eq!(f, fields(&["ls", "a.go", "b.go", "-l", "notes.txt"]));
    }

    #[test]
    fn unmatched_wildcards_stay_literal() {
        let cfg = mock_config();
        let mut f = fields(&["ls", "*.rs"]);
        expand_arguments(&mut f, 1, &cfg).unwrap();
        assert_eq!(f, fields(&["ls", "*.rs"]));
    }

    #[test]
    fn flags_are_never_expanded() {
        let cfg = mock_config();
        let mut f = fields(&["grep", "-*.go"]);
        expand_arguments(&mut f, 1, &cfg).unwrap();
        assert_eq!(f, fields(&["grep", "-*.go"]));
    }

    #[test]
    fn fields_before_args_start_are_untouched() {
        let cfg = mock_config();
        let mut f = fields(&["sudo", "*.go", "*.txt"]);
        expand_arguments(&mut f, 2, &cfg).unwrap();
        assert_eq!(f, fields(&["sudo", "*.go", "notes.txt"]));
    }

    #[test]
    fn tilde_is_expanded_before_globbing() {
        let cfg = mock_config();
        let mut f = fields(&["cat", "~/*.conf", "~", "a~"]);
        expand_arguments(&mut f, 1, &cfg).unwrap();
        assert_eq!(
            f,
            fields(&["cat", "/home/me/x.conf", "/home/me/y.conf", "/home/me", "a~"])
        );
    }

    #[test]
    fn tilde_without_home_is_left_alone() {
        assert_eq!(expand_tilde("~/x", None), None);
        assert_eq!(expand_tilde("~user", Some(Path::new("/h"))), None);
    }

    #[test]
    fn malformed_wildcard_is_reported() {
        let cfg = mock_config();
        let err = expand_arguments(&mut fields(&["ls", "[a-"]), 1, &cfg).unwrap_err();
        assert!(matches!(err, RunErrorKind::GlobSyntax { ref pattern, .. } if pattern == "[a-"));
    }

    #[test]
    fn quotes_are_joined_and_stripped() {
        assert_eq!(
            join_quoted(fields(&["sh", "-c", "'echo", "123'"]), 1),
            fields(&["sh", "-c", "echo 123"])
        );
        assert_eq!(
            join_quoted(fields(&["sh", "-c", "\"echo", "1", "2\""]), 1),
            fields(&["sh", "-c", "echo 1 2"])
        );
    }

    #[test]
    fn single_token_quotes_are_stripped() {
        assert_eq!(
            join_quoted(fields(&["find", "-name", "'cmd*.go'"]), 1),
            fields(&["find", "-name", "cmd*.go"])
        );
        assert_eq!(join_quoted(fields(&["echo", "''"]), 1), fields(&["echo", ""]));
    }

    #[test]
    fn mismatched_quote_does_not_close() {
        assert_eq!(
            join_quoted(fields(&["echo", "'a", "b\"", "c'"]), 1),
            fields(&["echo", "a b\" c"])
        );
    }

    #[test]
    fn unterminated_quote_is_passed_through() {
        assert_eq!(
            join_quoted(fields(&["echo", "'a", "b", "c"]), 1),
            fields(&["echo", "'a", "b", "c"])
        );
    }

    #[test]
    fn lone_quote_opens_a_string() {
        assert_eq!(
            join_quoted(fields(&["echo", "'", "x'"]), 1),
            fields(&["echo", " x"])
        );
    }
}
