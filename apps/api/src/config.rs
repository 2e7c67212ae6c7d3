use anyhow::{bail, Context, Result};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or out of range.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// Settings bound into the completion client at construction.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature, 0.0 – 1.0
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm = LlmConfig {
            api_key: require_env("GROQ_API_KEY")?,
            base_url: optional_env("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: optional_env("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_temperature(optional_env("GROQ_TEMPERATURE").as_deref())?,
            max_tokens: parse_positive("GROQ_MAX_TOKENS", optional_env("GROQ_MAX_TOKENS").as_deref(), 1024)?,
            timeout_secs: parse_positive("GROQ_TIMEOUT_SECS", optional_env("GROQ_TIMEOUT_SECS").as_deref(), 60)?,
        };

        Ok(Config {
            llm,
            max_upload_bytes: parse_positive(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES").as_deref(),
                10 * 1024 * 1024,
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_temperature(raw: Option<&str>) -> Result<f32> {
    let Some(raw) = raw else {
        return Ok(0.2);
    };
    let value = raw
        .trim()
        .parse::<f32>()
        .with_context(|| format!("GROQ_TEMPERATURE must be a number, got '{raw}'"))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("GROQ_TEMPERATURE must be between 0 and 1, got {value}");
    }
    Ok(value)
}

fn parse_positive<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .ok()
        .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
    if value <= T::default() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_defaults_when_unset() {
        assert!((parse_temperature(None).unwrap() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temperature_accepts_bounds() {
        assert_eq!(parse_temperature(Some("0")).unwrap(), 0.0);
        assert_eq!(parse_temperature(Some("1.0")).unwrap(), 1.0);
        assert!((parse_temperature(Some(" 0.7 ")).unwrap() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temperature_rejects_out_of_range() {
        assert!(parse_temperature(Some("1.5")).is_err());
        assert!(parse_temperature(Some("-0.1")).is_err());
        assert!(parse_temperature(Some("warm")).is_err());
    }

    #[test]
    fn test_positive_uses_default_when_unset() {
        assert_eq!(parse_positive::<u32>("GROQ_MAX_TOKENS", None, 1024).unwrap(), 1024);
    }

    #[test]
    fn test_positive_rejects_zero_and_garbage() {
        assert!(parse_positive::<u32>("GROQ_MAX_TOKENS", Some("0"), 1024).is_err());
        assert!(parse_positive::<u32>("GROQ_MAX_TOKENS", Some("-5"), 1024).is_err());
        assert!(parse_positive::<u64>("GROQ_TIMEOUT_SECS", Some("soon"), 60).is_err());
    }

    #[test]
    fn test_positive_parses_value() {
        assert_eq!(parse_positive::<usize>("MAX_UPLOAD_BYTES", Some("2048"), 1).unwrap(), 2048);
    }
}
