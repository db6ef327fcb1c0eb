//! Fenced code block extraction.

use super::error::{AssistError, Result};
use crate::constants::CODE_FENCE;

/// Returns the trimmed contents of the first fenced block in `reply`.
///
/// Everything up to and including the first newline inside the block is
/// treated as the language tag and dropped. A block without any newline is
/// returned as its trimmed single line. Later fences are ignored.
pub fn extract_code_block(reply: &str) -> Result<String> {
    let mut parts = reply.split(CODE_FENCE);
    let (_before, Some(block), Some(_after)) = (parts.next(), parts.next(), parts.next()) else {
        tracing::debug!(reply_len = reply.len(), "no fenced block in reply");
        return Err(AssistError::NoCodeBlock {
            reply: reply.to_string(),
        });
    };

    let code = match block.split_once('\n') {
        Some((_tag, rest)) => rest,
        None => block,
    };
    Ok(code.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag_dropped() {
        assert_eq!(
            extract_code_block("before ```bash\necho hi\n``` after").unwrap(),
            "echo hi"
        );
    }

    #[test]
    fn test_tag_line_with_leading_space_in_code() {
        let code = extract_code_block("before ```lang\n code here\n``` after").unwrap();
        assert_eq!(code, "code here");
    }

    #[test]
    fn test_no_fences() {
        let err = extract_code_block("no fences here").unwrap_err();
        match err {
            AssistError::NoCodeBlock { reply } => assert_eq!(reply, "no fences here"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_fence() {
        let err = extract_code_block("sure:\n```zsh\nls").unwrap_err();
        assert!(matches!(err, AssistError::NoCodeBlock { .. }));
    }

    #[test]
    fn test_single_line_block() {
        assert_eq!(extract_code_block("```x```").unwrap(), "x");
        assert_eq!(extract_code_block("run ``` ls -la ``` now").unwrap(), "ls -la");
    }

    #[test]
    fn test_untagged_block() {
        assert_eq!(extract_code_block("```\ndf -h\n```").unwrap(), "df -h");
    }

    #[test]
    fn test_only_first_block() {
        let reply = "Step 1:\n```zsh\nfind . -name '*.txt'\n```\nor\n```bash\nls *.txt\n```";
        assert_eq!(extract_code_block(reply).unwrap(), "find . -name '*.txt'");
    }

    #[test]
    fn test_multiline_block_keeps_inner_lines() {
        let reply = "```sh\nfor f in *; do\n  echo $f\ndone\n```";
        assert_eq!(
            extract_code_block(reply).unwrap(),
            "for f in *; do\n  echo $f\ndone"
        );
    }
}
