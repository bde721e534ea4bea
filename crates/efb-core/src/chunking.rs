//! Response chunking: split a long answer into message-sized pieces.
//!
//! Lines are packed greedily and never broken. Joining the returned chunks
//! with `'\n'` always gives back the original text.

/// Default bound, a little under the 2000-char message limit of common chat
/// platforms to leave room for formatting.
pub const DEFAULT_CHUNK_SIZE: usize = 1990;

const LINE_SEPARATOR: char = '\n';

/// Split `text` into ordered chunks of at most `chunk_size` characters.
///
/// Lengths are counted in Unicode scalar values, not bytes. A single line
/// longer than `chunk_size` is emitted on its own, unsplit, and is the only
/// way a chunk can exceed the bound. A `chunk_size` of zero behaves like one.
pub fn split_response(text: &str, chunk_size: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);

    if char_len(text) <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    // `None` until the first line of a chunk is taken; an empty line still counts.
    let mut current: Option<(String, usize)> = None;

    for line in text.split(LINE_SEPARATOR) {
        let line_len = char_len(line);
        current = Some(match current.take() {
            None => (line.to_string(), line_len),
            Some((buf, buf_len)) if buf_len + 1 + line_len > chunk_size => {
                chunks.push(buf);
                (line.to_string(), line_len)
            }
            Some((mut buf, buf_len)) => {
                buf.push(LINE_SEPARATOR);
                buf.push_str(line);
                (buf, buf_len + 1 + line_len)
            }
        });
    }

    if let Some((buf, _)) = current {
        chunks.push(buf);
    }

    chunks
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(chunks: &[String]) -> String {
        chunks.join("\n")
    }

    #[test]
    fn short_text_is_returned_unchanged() {
        assert_eq!(split_response("hello", DEFAULT_CHUNK_SIZE), vec!["hello"]);
        let exact = "y".repeat(DEFAULT_CHUNK_SIZE);
        assert_eq!(split_response(&exact, DEFAULT_CHUNK_SIZE), vec![exact]);
    }

    #[test]
    fn empty_text_yields_single_empty_chunk() {
        assert_eq!(split_response("", DEFAULT_CHUNK_SIZE), vec![String::new()]);
    }

    #[test]
    fn packs_lines_greedily() {
        assert_eq!(split_response("a\nb\nc", 3), vec!["a\nb", "c"]);
    }

    #[test]
    fn overlong_single_line_is_not_split() {
        let line = "x".repeat(2000);
        let chunks = split_response(&line, DEFAULT_CHUNK_SIZE);
        assert_eq!(chunks, vec![line]);
    }

    #[test]
    fn overlong_line_in_the_middle_gets_its_own_chunk() {
        let long = "L".repeat(12);
        let text = format!("ab\ncd\n{long}\nef");
        let chunks = split_response(&text, 6);
        assert_eq!(chunks, vec!["ab\ncd".to_string(), long, "ef".to_string()]);
        assert_eq!(rejoin(&chunks), text);
    }

    #[test]
    fn preserves_empty_lines_and_leading_separator() {
        let text = "\n\nabc\n\n\ndef\n";
        for size in 1..=text.len() {
            let chunks = split_response(text, size);
            assert_eq!(rejoin(&chunks), text, "size={size}");
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 7 chars, 13 bytes.
        let text = "ééé\nüüü";
        assert_eq!(split_response(text, 7), vec![text]);
        assert_eq!(split_response(text, 6), vec!["ééé", "üüü"]);
    }

    #[test]
    fn zero_chunk_size_behaves_like_one() {
        assert_eq!(split_response("a\nb", 0), vec!["a", "b"]);
    }

    #[test]
    fn round_trips_and_respects_bound_across_sizes() {
        let text = (0..60)
            .map(|i| "w".repeat((i * 7) % 23))
            .collect::<Vec<_>>()
            .join("\n");

        for size in [1usize, 2, 5, 10, 22, 23, 40, 100, 500] {
            let chunks = split_response(&text, size);
            assert!(!chunks.is_empty());
            assert_eq!(rejoin(&chunks), text, "size={size}");
            for c in &chunks {
                let len = c.chars().count();
                assert!(
                    len <= size || !c.contains('\n'),
                    "size={size} chunk of {len} chars spans several lines"
                );
            }
        }
    }

    #[test]
    fn chunks_are_maximal() {
        // Each sealed chunk could not have taken the next line.
        let text = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let size = 30;
        let chunks = split_response(&text, size);
        for pair in chunks.windows(2) {
            let next_first = pair[1].split('\n').next().unwrap_or("");
            assert!(pair[0].chars().count() + 1 + next_first.chars().count() > size);
        }
    }
}
