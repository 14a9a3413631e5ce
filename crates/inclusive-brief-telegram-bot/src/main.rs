use dotenvy::dotenv;
use inclusive_brief_core::config::BriefSettings;
use inclusive_brief_transport_telegram::config::{BotSettings, TelegramSettings};
use inclusive_brief_transport_telegram::runner::run_bot;
use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Regex patterns for redacting sensitive data
struct RedactionPatterns {
    token1: Regex,
    token2: Regex,
    token3: Regex,
    gemini_key: Regex,
    query_key: Regex,
    header_key: Regex,
}

impl RedactionPatterns {
    /// Initialize all regex patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token1: Regex::new(r"(https?://[^/]+/(?:file/)?bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
            token2: Regex::new(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})")?,
            token3: Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
            gemini_key: Regex::new(r"AIza[0-9A-Za-z_-]{35}")?,
            query_key: Regex::new(r"([?&]key=)[^\s&]+")?,
            header_key: Regex::new(r#"(?i)(x-goog-api-key"?\s*[:=]\s*"?)[^\s",}]+"#)?,
        })
    }

    fn redact(&self, input: &str) -> String {
        let mut output = input.to_string();
        output = self
            .token1
            .replace_all(&output, "$1[TELEGRAM_TOKEN]$3")
            .to_string();
        output = self
            .token2
            .replace_all(&output, "[TELEGRAM_TOKEN]")
            .to_string();
        output = self
            .token3
            .replace_all(&output, "$1[TELEGRAM_TOKEN]")
            .to_string();
        output = self
            .gemini_key
            .replace_all(&output, "[API_KEY]")
            .to_string();
        output = self
            .query_key
            .replace_all(&output, "$1[MASKED]")
            .to_string();
        output = self
            .header_key
            .replace_all(&output, "$1[MASKED]")
            .to_string();
        output
    }
}

struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // The caller's buffer was fully consumed even if the redacted length differs
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<F> RedactingMakeWriter<F> {
    const fn new(make_inner: F, patterns: Arc<RedactionPatterns>) -> Self {
        Self {
            make_inner,
            patterns,
        }
    }
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)(), self.patterns.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Compiled before logging so nothing is ever written unredacted
    let patterns = Arc::new(RedactionPatterns::new().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?);

    init_logging(patterns);

    info!("Starting Inclusive Brief Telegram bot...");

    let settings = init_settings();

    run_bot(settings).await;

    Ok(())
}

fn init_logging(patterns: Arc<RedactionPatterns>) {
    let make_writer = RedactingMakeWriter::new(io::stderr, patterns);

    let debug_mode = std::env::var("DEBUG_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let filter = if debug_mode {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "inclusive_brief_core=info,inclusive_brief_runtime=info,inclusive_brief_transport_telegram=info,inclusive_brief_telegram_bot=info,teloxide=warn,hyper=warn,h2=error,reqwest=warn,tokio=warn,tower=warn",
            )
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();
}

fn init_settings() -> Arc<BotSettings> {
    let core_settings = match BriefSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load AI configuration (API_KEY): {}", e);
            std::process::exit(1);
        }
    };
    let telegram_settings = match TelegramSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load telegram configuration (TOKEN): {}", e);
            std::process::exit(1);
        }
    };

    info!(
        text_model = %core_settings.text_model,
        vision_model = %core_settings.vision_model,
        "Configuration loaded successfully."
    );
    Arc::new(BotSettings::new(core_settings, telegram_settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> RedactionPatterns {
        RedactionPatterns::new().expect("patterns compile")
    }

    #[test]
    fn test_file_download_url_token_masked() {
        let line = "GET https://api.telegram.org/file/bot1234567890:AAFakeTokenValue_abcdefghijklmnopqrstu/photos/file_1.jpg";
        let redacted = patterns().redact(line);
        assert!(!redacted.contains("AAFakeTokenValue"), "{redacted}");
        assert!(redacted.contains("[TELEGRAM_TOKEN]"));
    }

    #[test]
    fn test_bare_bot_token_masked() {
        let line = "token=1234567890:AAFakeTokenValue_abcdefghijklmnopqr";
        let redacted = patterns().redact(line);
        assert_eq!(redacted, "token=[TELEGRAM_TOKEN]");
    }

    #[test]
    fn test_gemini_key_masked() {
        let key = format!("AIza{}", "x".repeat(35));
        let redacted = patterns().redact(&format!("api_key: {key}"));
        assert_eq!(redacted, "api_key: [API_KEY]");
    }

    #[test]
    fn test_query_key_masked() {
        let redacted = patterns().redact("POST /v1beta/models/m:generateContent?key=secret123&alt=json");
        assert_eq!(
            redacted,
            "POST /v1beta/models/m:generateContent?key=[MASKED]&alt=json"
        );
    }

    #[test]
    fn test_header_key_masked() {
        let redacted = patterns().redact(r#"headers: {"x-goog-api-key": "secret123"}"#);
        assert!(!redacted.contains("secret123"), "{redacted}");
    }

    #[test]
    fn test_plain_text_untouched() {
        let line = "INFO inclusive_brief_runtime: Command completed command=\"analyse\"";
        assert_eq!(patterns().redact(line), line);
    }

    #[test]
    fn test_writer_reports_full_length() {
        let mut out = Vec::new();
        let input = b"bot1234567890:secret";
        {
            let mut writer = RedactingWriter::new(&mut out, Arc::new(patterns()));
            assert_eq!(writer.write(input).ok(), Some(input.len()));
        }
        assert_eq!(String::from_utf8_lossy(&out), "bot1234567890:[TELEGRAM_TOKEN]");
    }
}
