//! Markup-stripping text normalizer.
//!
//! The first stage of the pipeline. Book content documents arrive as
//! XHTML-ish markup; the normalizer turns one of them into a single-line,
//! whitespace-collapsed plain-text string that the tokenizer can scan.
//!
//! ## What It Does
//!
//! Given raw input like `"<p>The  cat\nsat</p>"`, it produces `"The cat sat"`:
//!
//! 1. Double quotes become spaces (they only ever delimit dialogue or
//!    attributes, never words).
//! 2. Every well-formed tag or comment (`<...>`, `<!-- ... -->`) becomes a
//!    single space. Malformed markup is tolerated: an unclosed `<` simply
//!    never matches and is escaped in the next step instead of raising.
//! 3. The remaining text is entity-escaped (`&`, `<`, `>`), so a second trip
//!    through the tag pattern can never re-match anything.
//! 4. Whitespace runs collapse to a single space; leading and trailing
//!    whitespace is removed.
//!
//! ## Idempotence
//!
//! `normalize(normalize(x)) == normalize(x)` for every input. The escape
//! step preserves well-formed entities (`&amp;`, `&#x27;`, ...) instead of
//! re-escaping their ampersands, which is what makes the second pass a
//! no-op.
//!
//! Empty or whitespace-only input normalizes to the empty string; callers
//! skip such units entirely (no tokens are emitted for them).

use regex::Regex;

/// Configuration options for text normalization.
#[derive(Clone, Copy)]
pub struct NormalizerConfig {
    /// When enabled, entity-escapes `&`, `<` and `>` left over after tag
    /// stripping, so normalized output can never re-match the tag pattern.
    /// Disable it for text that is known to be markup-free already.
    pub escape_entities: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            escape_entities: true,
        }
    }
}

/// Markup-stripping, whitespace-collapsing text normalizer.
///
/// # Examples
///
/// ```
/// use zipfline_core::analyzer::normalizer::MarkupNormalizer;
///
/// let normalizer = MarkupNormalizer::default();
/// assert_eq!(normalizer.normalize("<p>Hello   world</p>"), "Hello world");
/// assert_eq!(normalizer.normalize("  \n\t "), "");
/// ```
pub struct MarkupNormalizer {
    config: NormalizerConfig,
    tag_re: Regex,
}

impl Default for MarkupNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl MarkupNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        // Comments first so `<!-- <b> -->` is consumed whole. `(?s)` lets a
        // comment span lines. An unclosed `<` matches neither alternative.
        let tag_re = Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag pattern is well-formed");
        Self { config, tag_re }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Reuses the buffer's capacity if sufficient. Clears the buffer before
    /// writing.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();

        let unquoted = input.replace('"', " ");
        let stripped = self.tag_re.replace_all(&unquoted, " ");

        if self.config.escape_entities {
            let mut escaped = String::with_capacity(stripped.len());
            escape_entities_into(&stripped, &mut escaped);
            collapse_whitespace_into(&escaped, out);
        } else {
            collapse_whitespace_into(&stripped, out);
        }
    }
}

/// Entity-escapes `&`, `<` and `>`.
///
/// An `&` that already begins a well-formed entity is copied verbatim, so
/// escaping is idempotent. Apostrophes pass through untouched; contractions
/// must survive into tokenization.
fn escape_entities_into(input: &str, out: &mut String) {
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'&' => {
                if let Some(len) = entity_len(&bytes[i..]) {
                    out.push_str(&input[i..i + len]);
                    i += len;
                } else {
                    out.push_str("&amp;");
                    i += 1;
                }
            }
            b'<' => {
                out.push_str("&lt;");
                i += 1;
            }
            b'>' => {
                out.push_str("&gt;");
                i += 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b'&' | b'<' | b'>') {
                    i += 1;
                }
                // Run boundaries sit on ASCII bytes, so the slice is valid UTF-8.
                out.push_str(&input[start..i]);
            }
        }
    }
}

/// Byte length of a well-formed entity at the start of `bytes`, if any.
///
/// Recognizes `&name;` (1..=32 alphanumeric chars, leading alphabetic),
/// `&#123;` (1..=7 decimal digits) and `&#xAB;` (1..=6 hex digits).
fn entity_len(bytes: &[u8]) -> Option<usize> {
    debug_assert_eq!(bytes.first(), Some(&b'&'));
    let rest = &bytes[1..];

    let body_len = if rest.first() == Some(&b'#') {
        let digits = &rest[1..];
        match digits.first() {
            Some(&b'x') | Some(&b'X') => 2 + run_len(&digits[1..], 6, u8::is_ascii_hexdigit)?,
            Some(_) => 1 + run_len(digits, 7, u8::is_ascii_digit)?,
            None => return None,
        }
    } else {
        if !rest.first().is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        run_len(rest, 32, u8::is_ascii_alphanumeric)?
    };

    if rest.get(body_len) == Some(&b';') {
        Some(1 + body_len + 1)
    } else {
        None
    }
}

/// Length of the leading run of bytes matching `pred`, if 1..=max.
fn run_len(bytes: &[u8], max: usize, pred: impl Fn(&u8) -> bool) -> Option<usize> {
    let len = bytes.iter().take(max + 1).take_while(|b| pred(*b)).count();
    if (1..=max).contains(&len) {
        Some(len)
    } else {
        None
    }
}

/// Collapses ASCII whitespace runs to a single space and trims both ends.
fn collapse_whitespace_into(input: &str, out: &mut String) {
    let mut prev_space = true; // swallows leading whitespace

    for ch in input.chars() {
        if ch.is_ascii_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
}
