// src/exec/tokenize.rs

use crate::errors::RunErrorKind;

/// Split a command line into stages on `|`, and each stage into
/// whitespace-separated fields.
///
/// Every stage must have at least one field: a leading, trailing or doubled
/// pipe is a [`RunErrorKind::DanglingPipe`].
pub(crate) fn split_stages(command: &str) -> Result<Vec<Vec<&str>>, RunErrorKind> {
    command
        .split('|')
        .map(|segment| {
            let fields: Vec<&str> = segment.split_whitespace().collect();
            if fields.is_empty() {
                Err(RunErrorKind::DanglingPipe)
            } else {
                Ok(fields)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_stages_and_fields() {
        let stages = split_stages("grep -i foo  file.txt |wc -l").unwrap();
        assert_eq!(stages, vec![vec!["grep", "-i", "foo", "file.txt"], vec!["wc", "-l"]]);
    }

    #[test]
    fn single_stage() {
        assert_eq!(split_stages("  true ").unwrap(), vec![vec!["true"]]);
    }

    #[test]
    fn dangling_pipes() {
        for cmd in ["| ls ", "| ls | wc", "ls|", "ls| wc|", "ls| |wc", "ls||wc", "", "   "] {
            assert!(
                matches!(split_stages(cmd), Err(RunErrorKind::DanglingPipe)),
                "expected DanglingPipe for {cmd:?}"
            );
        }
    }
}
