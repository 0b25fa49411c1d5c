//! Math span protection for the markdown pipeline
//!
//! Markdown treats `_` as emphasis and `\` as an escape, both of which are
//! everywhere in LaTeX. Before markdown conversion every math span is swapped
//! for an opaque alphanumeric token; after conversion the tokens are swapped
//! back for the span in its normalized delimiter form (`\[...\]` for display
//! math, `\(...\)` for inline math), ready for a client-side typesetter.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Prefix shared by every placeholder token
pub const TOKEN_PREFIX: &str = "XFOLIOMATHSPAN";

/// Longest inner text accepted for inline math without a backslash
const SHORT_INLINE_MAX: usize = 9;

lazy_static! {
    static ref DISPLAY_DOLLARS: Regex = Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap();
    static ref DISPLAY_BRACKETS: Regex = Regex::new(r"(?s)\\\[(.+?)\\\]").unwrap();
    static ref INLINE_PARENS: Regex = Regex::new(r"(?s)\\\((.+?)\\\)").unwrap();
}

/// How a math span is typeset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Block,
    Inline,
}

/// A math span cut out of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    pub mode: MathMode,
    /// Placeholder standing in for the span while markdown runs
    pub token: String,
    /// Inner TeX, exactly as written between the delimiters
    pub tex: String,
    /// The whole span as written, delimiters included
    pub source: String,
}

impl MathSpan {
    /// The span in normalized delimiter form, escaped for HTML text
    pub fn normalized(&self) -> String {
        let tex = escape_tex(&self.tex);
        match self.mode {
            MathMode::Block => format!("\\[{}\\]", tex),
            MathMode::Inline => format!("\\({}\\)", tex),
        }
    }
}

/// Records the spans removed from one document so they can be put back
#[derive(Debug, Default)]
pub struct MathShield {
    spans: Vec<MathSpan>,
}

impl MathShield {
    /// Replace every math span in `raw` with a placeholder token.
    ///
    /// Fenced code blocks and inline code spans are copied through untouched.
    pub fn protect(raw: &str) -> (String, MathShield) {
        let mut shield = MathShield::default();
        let mut out = String::with_capacity(raw.len());

        for segment in split_code(raw) {
            match segment {
                Segment::Code(code) => out.push_str(code),
                Segment::Prose(text) => {
                    // Bracketed spans go before single dollars so that a `$n$`
                    // inside `\[...\]` stays part of the outer span.
                    let text = shield.protect_display_dollars(text);
                    let text = shield.protect_latex_delimiters(&text);
                    let text = shield.protect_inline_dollars(&text);
                    out.push_str(&text);
                }
            }
        }

        (out, shield)
    }

    /// Put every recorded span back into `html`, longest tokens first so
    /// that no token is ever rewritten through a shorter one.
    pub fn restore(&self, html: &str) -> String {
        if self.spans.is_empty() {
            return html.to_string();
        }

        let mut ordered: Vec<&MathSpan> = self.spans.iter().collect();
        ordered.sort_by(|a, b| b.token.len().cmp(&a.token.len()));

        let mut html = html.to_string();
        for span in ordered {
            html = html.replace(&span.token, &span.normalized());
        }
        html
    }

    pub fn spans(&self) -> &[MathSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn push(&mut self, mode: MathMode, tex: &str, source: &str) -> String {
        let kind = match mode {
            MathMode::Block => "BLOCK",
            MathMode::Inline => "INLINE",
        };
        let token = format!("{}{}{}X", TOKEN_PREFIX, kind, self.spans.len());
        let span = MathSpan {
            mode,
            token: token.clone(),
            tex: self.expand_nested(tex),
            source: self.expand_nested(source),
        };
        self.spans.push(span);
        token
    }

    /// Put the source text of earlier spans back wherever their tokens were
    /// swallowed by an enclosing span, so stored TeX never holds a token.
    fn expand_nested(&self, text: &str) -> String {
        if !text.contains(TOKEN_PREFIX) {
            return text.to_string();
        }
        let mut ordered: Vec<&MathSpan> = self.spans.iter().collect();
        ordered.sort_by(|a, b| b.token.len().cmp(&a.token.len()));

        let mut text = text.to_string();
        for span in ordered {
            text = text.replace(&span.token, &span.source);
        }
        text
    }

    fn protect_display_dollars(&mut self, text: &str) -> String {
        DISPLAY_DOLLARS
            .replace_all(text, |caps: &Captures| {
                if caps[1].trim().is_empty() {
                    caps[0].to_string()
                } else {
                    self.push(MathMode::Block, &caps[1], &caps[0])
                }
            })
            .into_owned()
    }

    /// Single-dollar spans. The first acceptable closing `$` on the same line
    /// wins; a rejected candidate's closing `$` may still open the next span.
    fn protect_inline_dollars(&mut self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut search = 0;

        while let Some(open) = find_dollar(bytes, search, false) {
            let Some(close) = find_dollar(bytes, open + 1, true) else {
                search = open + 1;
                continue;
            };

            let inner = &text[open + 1..close];
            if is_inline_math(inner) {
                out.push_str(&text[cursor..open]);
                out.push_str(&self.push(MathMode::Inline, inner, &text[open..=close]));
                cursor = close + 1;
                search = cursor;
            } else {
                search = close;
            }
        }

        out.push_str(&text[cursor..]);
        out
    }

    fn protect_latex_delimiters(&mut self, text: &str) -> String {
        let text = DISPLAY_BRACKETS.replace_all(text, |caps: &Captures| {
            self.push(MathMode::Block, &caps[1], &caps[0])
        });
        INLINE_PARENS
            .replace_all(&text, |caps: &Captures| {
                self.push(MathMode::Inline, &caps[1], &caps[0])
            })
            .into_owned()
    }
}

/// Inline candidates must either carry a TeX command (a backslash) or be a
/// short expression starting with a letter, which keeps prices like `$100`
/// and ticker symbols like `$HACHI` as plain text.
///
/// Padding whitespace only disqualifies short candidates; `$ \alpha $` is
/// still math.
fn is_inline_math(inner: &str) -> bool {
    if inner.trim().is_empty() {
        return false;
    }
    if inner.contains('\\') {
        return true;
    }

    let Some(first) = inner.chars().next() else {
        return false;
    };
    !first.is_whitespace()
        && !inner.ends_with(char::is_whitespace)
        && first.is_ascii_alphabetic()
        && inner.chars().count() <= SHORT_INLINE_MAX
}

/// Next unescaped `$` at or after `from`. With `same_line`, give up at a newline.
fn find_dollar(bytes: &[u8], from: usize, same_line: bool) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' if same_line => return None,
            b'$' if i == 0 || bytes[i - 1] != b'\\' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn escape_tex(tex: &str) -> String {
    tex.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A run of source text, either code (left alone) or prose (scanned for math)
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    Code(&'a str),
}

/// Split markdown into code and prose runs. Recognizes fenced code blocks
/// (backtick or tilde, closed by an equal or longer fence, or running to the
/// end of input) and backtick code spans.
fn split_code(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut prose_start = 0;
    let mut fence: Option<(u8, usize, usize)> = None; // (char, length, block start)
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match fence {
            None => {
                if let Some((ch, len)) = fence_marker(line) {
                    split_inline_code(&text[prose_start..line_start], &mut segments);
                    fence = Some((ch, len, line_start));
                }
            }
            Some((ch, len, start)) => {
                if closes_fence(line, ch, len) {
                    segments.push(Segment::Code(&text[start..offset]));
                    fence = None;
                    prose_start = offset;
                }
            }
        }
    }

    match fence {
        Some((_, _, start)) => segments.push(Segment::Code(&text[start..])),
        None => split_inline_code(&text[prose_start..], &mut segments),
    }

    segments
}

/// Opening fence: up to three spaces, then three or more backticks or tildes
fn fence_marker(line: &str) -> Option<(u8, usize)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = line[indent..].as_bytes();
    let ch = *rest.first()?;
    if ch != b'`' && ch != b'~' {
        return None;
    }
    let len = rest.iter().take_while(|&&b| b == ch).count();
    if len < 3 {
        return None;
    }
    // A backtick fence's info string may not contain backticks
    if ch == b'`' && rest[len..].contains(&b'`') {
        return None;
    }
    Some((ch, len))
}

fn closes_fence(line: &str, ch: u8, len: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let run = trimmed.bytes().take_while(|&b| b == ch).count();
    run >= len && trimmed[run..].trim().is_empty()
}

fn split_inline_code<'a>(text: &'a str, segments: &mut Vec<Segment<'a>>) {
    let bytes = text.as_bytes();
    let mut cursor = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        let run = i - run_start;

        if let Some(close) = find_backtick_run(bytes, i, run) {
            if cursor < run_start {
                segments.push(Segment::Prose(&text[cursor..run_start]));
            }
            segments.push(Segment::Code(&text[run_start..close + run]));
            cursor = close + run;
            i = cursor;
        }
    }

    if cursor < text.len() {
        segments.push(Segment::Prose(&text[cursor..]));
    }
}

/// Start of the next backtick run of exactly `len` characters
fn find_backtick_run(bytes: &[u8], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            if i - start == len {
                return Some(start);
            }
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protect(raw: &str) -> (String, MathShield) {
        MathShield::protect(raw)
    }

    #[test]
    fn test_display_dollars() {
        let (text, shield) = protect("before $$x^2$$ after");
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.spans()[0].mode, MathMode::Block);
        assert_eq!(shield.spans()[0].tex, "x^2");
        assert!(!text.contains('$'));
        assert_eq!(shield.restore(&text), r"before \[x^2\] after");
    }

    #[test]
    fn test_display_dollars_span_lines() {
        let raw = "$$\n\\sum_{i=1}^n i\n$$";
        let (text, shield) = protect(raw);
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.restore(&text), "\\[\n\\sum_{i=1}^n i\n\\]");
    }

    #[test]
    fn test_inline_rules() {
        assert!(is_inline_math(r"\frac{a}{b}"));
        assert!(is_inline_math("k_i"));
        assert!(is_inline_math("x"));
        assert!(is_inline_math(r"10 \times 3"));
        assert!(!is_inline_math("100"));
        assert!(!is_inline_math("abcdefghij"));
        assert!(!is_inline_math(" x"));
        assert!(!is_inline_math("x "));
        assert!(!is_inline_math(""));
        assert!(!is_inline_math("  "));
        assert!(is_inline_math(r" \alpha_1 + \beta_2 "));
    }

    #[test]
    fn test_currency_left_alone() {
        let (text, shield) = protect("$100 and $HACHI");
        assert!(shield.is_empty());
        assert_eq!(text, "$100 and $HACHI");
    }

    #[test]
    fn test_rejected_close_can_open() {
        let (text, shield) = protect("costs $5 and $x$ more");
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.spans()[0].tex, "x");
        assert_eq!(shield.restore(&text), r"costs $5 and \(x\) more");
    }

    #[test]
    fn test_inline_does_not_cross_lines() {
        let (text, shield) = protect("$a\nb$");
        assert!(shield.is_empty());
        assert_eq!(text, "$a\nb$");
    }

    #[test]
    fn test_escaped_dollar_is_literal() {
        let (_, shield) = protect(r"price \$x\$ only");
        assert!(shield.is_empty());
    }

    #[test]
    fn test_unterminated_dollar() {
        let (text, shield) = protect("just $x and nothing else");
        assert!(shield.is_empty());
        assert_eq!(text, "just $x and nothing else");
    }

    #[test]
    fn test_existing_latex_delimiters() {
        let (text, shield) = protect(r"see \(a_1\) and \[b_2\]");
        assert_eq!(shield.spans().len(), 2);
        assert!(!text.contains('\\'));
        assert_eq!(shield.restore(&text), r"see \(a_1\) and \[b_2\]");
    }

    #[test]
    fn test_dollars_inside_brackets_stay_in_outer_span() {
        let (text, shield) = protect(r"\[ f(n) = \text{number of $n$-cycles} \]");
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.spans()[0].tex, r" f(n) = \text{number of $n$-cycles} ");
        let restored = shield.restore(&text);
        assert_eq!(restored, r"\[ f(n) = \text{number of $n$-cycles} \]");
        assert!(!restored.contains(TOKEN_PREFIX));
    }

    #[test]
    fn test_dollars_inside_parens_stay_in_outer_span() {
        let (text, shield) = protect(r"so \(\text{$k$ items}\) and $m$");
        let restored = shield.restore(&text);
        assert_eq!(restored, r"so \(\text{$k$ items}\) and \(m\)");
        assert!(!restored.contains(TOKEN_PREFIX));
    }

    #[test]
    fn test_nested_display_dollars_keep_source() {
        let (text, shield) = protect(r"\[ a + $$b$$ \]");
        let restored = shield.restore(&text);
        assert_eq!(restored, r"\[ a + $$b$$ \]");
        assert!(!restored.contains(TOKEN_PREFIX));
    }

    #[test]
    fn test_padded_command_is_inline_math() {
        let (text, shield) = protect(r"Let $ \alpha_1 + \beta_2 $ hold.");
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.restore(&text), r"Let \( \alpha_1 + \beta_2 \) hold.");
    }

    #[test]
    fn test_tokens_are_unique_and_alphanumeric() {
        let raw = (0..12).map(|i| format!("$x_{}$", i)).collect::<Vec<_>>().join(" ");
        let (_, shield) = protect(&raw);
        let mut tokens: Vec<_> = shield.spans().iter().map(|s| s.token.clone()).collect();
        assert_eq!(tokens.len(), 12);
        assert!(tokens
            .iter()
            .all(|t| t.starts_with(TOKEN_PREFIX) && t.chars().all(|c| c.is_ascii_alphanumeric())));
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 12);
    }

    #[test]
    fn test_restore_many_spans_without_collisions() {
        let raw = (0..15).map(|i| format!("$v_{{{}}}$", i)).collect::<Vec<_>>().join(" ");
        let (text, shield) = protect(&raw);
        let restored = shield.restore(&text);
        for i in 0..15 {
            assert!(restored.contains(&format!(r"\(v_{{{}}}\)", i)));
        }
        assert!(!restored.contains(TOKEN_PREFIX));
    }

    #[test]
    fn test_normalized_escapes_html() {
        let (text, shield) = protect(r"$\alpha < \beta$");
        assert_eq!(shield.restore(&text), r"\(\alpha &lt; \beta\)");
    }

    #[test]
    fn test_code_is_not_scanned() {
        let raw = "Inline `$x$` code\n\n```\n$$y$$ and $z$\n```\n\nthen $w$";
        let (text, shield) = protect(raw);
        assert_eq!(shield.spans().len(), 1);
        assert_eq!(shield.spans()[0].tex, "w");
        assert!(text.contains("`$x$`"));
        assert!(text.contains("$$y$$ and $z$"));
    }

    #[test]
    fn test_split_code_unclosed_fence() {
        let segments = split_code("text\n~~~~\ncode $x$\n~~~\n");
        assert_eq!(
            segments,
            vec![
                Segment::Prose("text\n"),
                Segment::Code("~~~~\ncode $x$\n~~~\n"),
            ]
        );
    }

    #[test]
    fn test_split_inline_code_unmatched_backtick() {
        let segments = split_code("a ` b $x$");
        assert_eq!(segments, vec![Segment::Prose("a ` b $x$")]);
    }
}
