//! Literal encoding of values, and the regex to LIKE translation used by
//! dialects without regexp operators.

use chrono::{DateTime, FixedOffset};

use super::Renderer;
use crate::dialect::TimeFormat;
use crate::error::{BuildError, BuildResult};
use crate::value::Value;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write `value` inline, or as a placeholder in prepared mode.
    ///
    /// NULL is always inline. Lists are written element by element, so a
    /// prepared list gets one placeholder per element.
    pub(crate) fn write_value(&self, value: &Value, w: &mut SqlWriter) {
        match value {
            Value::Null => w.push(&self.opts().null_literal),
            Value::List(items) => self.write_list(items, w),
            Value::Timestamp(ts) => {
                let ts = ts.with_timezone(&self.config().time_zone);
                if w.is_prepared() {
                    w.push_placeholder(Value::Timestamp(ts));
                } else {
                    self.write_timestamp(&ts, w);
                }
            }
            Value::Float(f) if !f.is_finite() => w.set_error(BuildError::encode(f)),
            other if w.is_prepared() => w.push_placeholder(other.clone()),
            Value::Bool(true) => w.push(&self.opts().true_literal),
            Value::Bool(false) => w.push(&self.opts().false_literal),
            Value::Int(i) => w.push(&i.to_string()),
            Value::UInt(u) => w.push(&u.to_string()),
            Value::Float(f) => w.push(&f.to_string()),
            Value::String(s) => self.write_string(s, w),
            Value::Bytes(b) => self.write_string(&String::from_utf8_lossy(b), w),
            Value::Uuid(u) => self.write_string(&u.hyphenated().to_string(), w),
            Value::Json(j) => match serde_json::to_string(j) {
                Ok(text) => self.write_string(&text, w),
                Err(err) => w.set_error(BuildError::Encode(err.to_string())),
            },
        }
    }

    /// `TRUE`/`FALSE` tokens regardless of prepared mode.
    pub(crate) fn write_bool_literal(&self, b: bool, w: &mut SqlWriter) {
        if b {
            w.push(&self.opts().true_literal);
        } else {
            w.push(&self.opts().false_literal);
        }
    }

    fn write_list(&self, items: &[Value], w: &mut SqlWriter) {
        w.push_char('(');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_value(item, w);
        }
        w.push_char(')');
    }

    /// A quoted string literal, applying the dialect's escape table.
    pub(crate) fn write_string(&self, s: &str, w: &mut SqlWriter) {
        let opts = self.opts();
        let buf = w.buf_mut();
        buf.reserve(s.len() + 2);
        buf.push(opts.string_quote);
        for ch in s.chars() {
            match opts.escaped_chars.get(&ch) {
                Some(escaped) => buf.push_str(escaped),
                None => buf.push(ch),
            }
        }
        buf.push(opts.string_quote);
    }

    fn write_timestamp(&self, ts: &DateTime<FixedOffset>, w: &mut SqlWriter) {
        let text = match &self.opts().time_format {
            TimeFormat::Rfc3339 => rfc3339_nano(ts),
            TimeFormat::Layout(layout) => ts.format(layout).to_string(),
        };
        self.write_string(&text, w);
    }
}

/// RFC 3339 with fractional seconds trimmed of trailing zeros (omitted when
/// zero) and `Z` for a zero offset.
fn rfc3339_nano(ts: &DateTime<FixedOffset>) -> String {
    let mut out = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = ts.timestamp_subsec_nanos();
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    if ts.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&ts.format("%:z").to_string());
    }
    out
}

/// Translate a regular expression into an equivalent LIKE pattern.
///
/// Supports `^`/`$` anchors, `.*` and `.` wildcards and backslash-escaped
/// metacharacters. Literal `%` and `_` are escaped. Anything else that
/// LIKE cannot express is an [`BuildError::InvalidPattern`].
///
/// ```ignore
/// assert_eq!(like_pattern("^a.*b$")?, "a%b");
/// assert_eq!(like_pattern("ab")?, "%ab%");
/// ```
pub fn like_pattern(regex: &str) -> BuildResult<String> {
    let invalid = || BuildError::InvalidPattern(regex.to_owned());

    let mut body = regex;
    let anchored_start = body.starts_with('^');
    if anchored_start {
        body = &body[1..];
    }
    let anchored_end = body.ends_with('$') && !ends_escaped(body);
    if anchored_end {
        body = &body[..body.len() - 1];
    }

    let mut out = String::with_capacity(regex.len() + 2);
    // Set while `out` ends with an unescaped `%`.
    let mut wildcard = !anchored_start;
    if wildcard {
        out.push('%');
    }
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '.' if chars.peek() == Some(&'*') => {
                chars.next();
                if !wildcard {
                    out.push('%');
                }
                wildcard = true;
                continue;
            }
            '.' => out.push('_'),
            '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '\\' => match chars.next() {
                Some(c @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(c);
                }
                Some(c) if is_meta(c) => out.push(c),
                _ => return Err(invalid()),
            },
            c if is_meta(c) => return Err(invalid()),
            c => out.push(c),
        }
        wildcard = false;
    }
    if !anchored_end && !wildcard {
        out.push('%');
    }
    Ok(out)
}

fn is_meta(c: char) -> bool {
    matches!(
        c,
        '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\'
    )
}

/// Whether the final `$` of `s` is escaped by an odd run of backslashes.
fn ends_escaped(s: &str) -> bool {
    let backslashes = s[..s.len() - 1]
        .chars()
        .rev()
        .take_while(|&c| c == '\\')
        .count();
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn like_pattern_anchors() {
        assert_eq!(like_pattern("^abc$").unwrap(), "abc");
        assert_eq!(like_pattern("^abc").unwrap(), "abc%");
        assert_eq!(like_pattern("abc$").unwrap(), "%abc");
        assert_eq!(like_pattern("abc").unwrap(), "%abc%");
    }

    #[test]
    fn like_pattern_wildcards() {
        assert_eq!(like_pattern("^a.*c$").unwrap(), "a%c");
        assert_eq!(like_pattern("^a.c$").unwrap(), "a_c");
        assert_eq!(like_pattern("^100%$").unwrap(), "100\\%");
        assert_eq!(like_pattern("^a\\.b$").unwrap(), "a.b");
        assert_eq!(like_pattern("^cost\\$$").unwrap(), "cost$");
    }

    #[test]
    fn like_pattern_never_doubles_wildcards() {
        assert_eq!(like_pattern("^ab.*").unwrap(), "ab%");
        assert_eq!(like_pattern(".*ab$").unwrap(), "%ab");
        assert_eq!(like_pattern("a.*.*b").unwrap(), "%a%b%");
        assert_eq!(like_pattern("").unwrap(), "%");
        assert_eq!(like_pattern("^100%.*").unwrap(), "100\\%%");
    }

    #[test]
    fn like_pattern_rejects_classes() {
        let err = like_pattern("^[ab]").unwrap_err();
        assert!(matches!(err, BuildError::InvalidPattern(p) if p == "^[ab]"));
        assert!(like_pattern("a+").is_err());
        assert!(like_pattern("a|b").is_err());
    }

    #[test]
    fn rfc3339_trims_nanos() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let ts = utc.with_ymd_and_hms(2021, 3, 3, 3, 3, 3).unwrap()
            + chrono::Duration::nanoseconds(3);
        assert_eq!(rfc3339_nano(&ts), "2021-03-03T03:03:03.000000003Z");

        let ts = utc.with_ymd_and_hms(2019, 10, 1, 15, 1, 0).unwrap();
        assert_eq!(rfc3339_nano(&ts), "2019-10-01T15:01:00Z");

        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            rfc3339_nano(&ts.with_timezone(&shanghai)),
            "2019-10-01T23:01:00+08:00"
        );
    }
}
