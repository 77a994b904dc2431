//! Secret redaction for log output.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::io;
use std::sync::LazyLock;
use tracing_subscriber::fmt::MakeWriter;

/// Compiled patterns for every kind of secret redacted from logs.
struct SecretPatterns {
    api_key: Regex,
    bearer: Regex,
    token: Regex,
    password: Regex,
}

static PATTERNS: LazyLock<SecretPatterns> = LazyLock::new(|| SecretPatterns {
    // Anthropic API keys: sk-ant-api03-...
    api_key: Regex::new(r"sk-ant-[A-Za-z0-9_-]+").expect("valid api key regex"),
    bearer: Regex::new(r"Bearer\s+[A-Za-z0-9_.-]+").expect("valid bearer regex"),
    token: Regex::new(
        r#"["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*["']?[A-Za-z0-9_.-]{20,}["']?"#,
    )
    .expect("valid token regex"),
    password: Regex::new(r#"["']?password["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#)
        .expect("valid password regex"),
});

/// Keep the field name of a `name: value` / `name=value` match, drop the value.
fn redact_assignment(caps: &Captures<'_>) -> String {
    let matched = &caps[0];
    match matched.find([':', '=']) {
        Some(pos) => format!("{}{}[REDACTED]", &matched[..pos], &matched[pos..=pos]),
        None => "[REDACTED]".to_string(),
    }
}

/// Short, loggable form of an API key: the first 8 characters at most.
pub fn redact_api_key(key: &str) -> String {
    match key.char_indices().nth(8) {
        Some((idx, _)) => format!("{}...[REDACTED]", &key[..idx]),
        None => "[REDACTED]".to_string(),
    }
}

/// Redact API keys, bearer tokens, token/secret assignments and passwords.
///
/// Borrows the input when nothing matched.
pub fn scrub_secrets(message: &str) -> Cow<'_, str> {
    let patterns = &*PATTERNS;
    let found = [
        &patterns.api_key,
        &patterns.bearer,
        &patterns.token,
        &patterns.password,
    ]
    .iter()
    .any(|pattern| pattern.is_match(message));
    if !found {
        return Cow::Borrowed(message);
    }

    let scrubbed = patterns
        .api_key
        .replace_all(message, "[API_KEY_REDACTED]")
        .into_owned();
    let scrubbed = patterns
        .bearer
        .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
        .into_owned();
    let scrubbed = patterns
        .token
        .replace_all(&scrubbed, redact_assignment)
        .into_owned();
    let scrubbed = patterns
        .password
        .replace_all(&scrubbed, redact_assignment)
        .into_owned();
    Cow::Owned(scrubbed)
}

/// `MakeWriter` wrapper that scrubs secrets from every formatted line.
#[derive(Debug, Clone)]
pub struct ScrubbingMakeWriter<M> {
    inner: M,
}

impl<M> ScrubbingMakeWriter<M> {
    /// Wrap `inner` so everything it writes passes through [`scrub_secrets`].
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for ScrubbingMakeWriter<M> {
    type Writer = ScrubbingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ScrubbingWriter {
            inner: self.inner.make_writer(),
        }
    }
}

/// Writer handed out by [`ScrubbingMakeWriter`].
pub struct ScrubbingWriter<W> {
    inner: W,
}

impl<W: io::Write> io::Write for ScrubbingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        match scrub_secrets(&text) {
            Cow::Owned(scrubbed) => self.inner.write_all(scrubbed.as_bytes())?,
            Cow::Borrowed(_) => self.inner.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
