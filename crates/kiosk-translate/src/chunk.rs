//! Paragraph-aligned text chunking.
//!
//! Paragraphs are the `'\n'`-separated pieces of a text. Consecutive
//! paragraphs are packed greedily into chunks of at most `max_len`
//! characters, joined by the same separator. A paragraph that alone exceeds
//! `max_len` becomes its own oversized chunk; it is never cut.
//!
//! Every chunk is a contiguous slice of the input, and adjacent chunks are
//! separated by exactly one `'\n'`, so [`join`] restores the input exactly.

/// Separator between paragraphs, and between chunks on reassembly.
pub const SEPARATOR: char = '\n';

/// Split `text` into paragraph-aligned chunks of at most `max_len` characters
/// (except for single oversized paragraphs). The empty text has no chunks.
pub fn split(text: &str, max_len: usize) -> Vec<&str> {
  let max_len = max_len.max(1);
  let mut chunks = Vec::new();
  if text.is_empty() {
    return chunks;
  }

  // (start byte, end byte, length in chars) of the chunk being built.
  let mut current: Option<(usize, usize, usize)> = None;
  let mut offset = 0;

  for paragraph in text.split(SEPARATOR) {
    let p_start = offset;
    let p_end = offset + paragraph.len();
    let p_chars = paragraph.chars().count();
    offset = p_end + SEPARATOR.len_utf8();

    current = Some(match current {
      None => (p_start, p_end, p_chars),
      Some((start, _, chars)) if chars + 1 + p_chars <= max_len => {
        (start, p_end, chars + 1 + p_chars)
      }
      Some((start, end, _)) => {
        chunks.push(&text[start..end]);
        (p_start, p_end, p_chars)
      }
    });
  }

  if let Some((start, end, _)) = current {
    chunks.push(&text[start..end]);
  }
  chunks
}

/// Reassemble chunks in order with [`SEPARATOR`].
pub fn join<S: AsRef<str>>(chunks: &[S]) -> String {
  let mut out = String::new();
  for (i, chunk) in chunks.iter().enumerate() {
    if i > 0 {
      out.push(SEPARATOR);
    }
    out.push_str(chunk.as_ref());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLES: &[&str] = &[
    "",
    "a",
    "\n",
    "\n\n",
    "\nleading",
    "trailing\n",
    "one\ntwo\nthree",
    "para one\n\npara two\n\n\npara three",
    "a paragraph that is much longer than the limit\nshort\nx",
    "नमस्ते दुनिया\nਸਤਿ ਸ੍ਰੀ ਅਕਾਲ\nhello",
  ];

  #[test]
  fn join_restores_input_for_any_limit() {
    for text in SAMPLES {
      for max_len in 1..=24 {
        let chunks = split(text, max_len);
        assert_eq!(join(&chunks), *text, "text {text:?} max_len {max_len}");
      }
    }
  }

  #[test]
  fn chunks_respect_limit_unless_single_paragraph() {
    for text in SAMPLES {
      for max_len in 1..=24 {
        for chunk in split(text, max_len) {
          let fits = chunk.chars().count() <= max_len;
          let single_paragraph = !chunk.contains(SEPARATOR);
          assert!(fits || single_paragraph, "chunk {chunk:?} max_len {max_len}");
        }
      }
    }
  }

  #[test]
  fn empty_text_has_no_chunks() {
    assert!(split("", 10).is_empty());
  }

  #[test]
  fn short_text_is_one_chunk() {
    assert_eq!(split("one\ntwo", 500), vec!["one\ntwo"]);
  }

  #[test]
  fn packs_paragraphs_greedily() {
    assert_eq!(split("aa\nbb\ncc\ndd", 5), vec!["aa\nbb", "cc\ndd"]);
  }

  #[test]
  fn oversized_paragraph_is_not_cut() {
    let long = "x".repeat(30);
    let text = format!("head\n{long}\ntail");
    assert_eq!(split(&text, 10), vec!["head", long.as_str(), "tail"]);
  }

  #[test]
  fn limit_counts_characters_not_bytes() {
    // Devanagari: three bytes per char.
    let text = "नमस्ते\nनमस्ते";
    let per_paragraph = "नमस्ते".chars().count();
    assert_eq!(split(text, per_paragraph * 2 + 1), vec![text]);
  }
}
