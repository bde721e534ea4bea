use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{chunking::DEFAULT_CHUNK_SIZE, errors::Error, Result};

pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_COMMAND_PREFIX: &str = "!EVE ";
pub const DEFAULT_STATUS: &str = "EVE Frontier Development";

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    // Chat platform
    pub telegram_bot_token: String,
    pub command_prefix: String,
    pub bot_status: String,
    /// Empty means everyone may use the bot.
    pub allowed_users: Vec<i64>,

    // Anthropic
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub anthropic_base_url: String,
    pub max_tokens: u32,
    pub query_timeout: Duration,

    // Delivery
    pub chunk_size: usize,

    // Documentation context
    pub docs_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment, after merging `./.env` (existing
    /// variables win).
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_source(env_str)
    }

    /// Build the config from any key/value source.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            get(key).and_then(non_empty).ok_or_else(|| {
                Error::Config(format!("{key} environment variable is required"))
            })
        };

        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let anthropic_api_key = required("ANTHROPIC_API_KEY")?;

        // Keep the prefix verbatim: the trailing space is part of `!EVE `.
        let command_prefix = get("COMMAND_PREFIX")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
        let bot_status = get("BOT_STATUS")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        let allowed_users = parse_csv_i64(get("ALLOWED_USERS"));

        let anthropic_model = get("ANTHROPIC_MODEL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let anthropic_base_url = get("ANTHROPIC_BASE_URL")
            .and_then(non_empty)
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let max_tokens = parse_num::<u32>(&get, "ANTHROPIC_MAX_TOKENS")?
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let query_timeout =
            Duration::from_millis(parse_num::<u64>(&get, "QUERY_TIMEOUT_MS")?.unwrap_or(120_000));

        let chunk_size = parse_num::<usize>(&get, "CHUNK_SIZE")?.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(Error::Config("CHUNK_SIZE must be positive".to_string()));
        }

        let docs_dir = get("EVE_DOCS_DIR").and_then(non_empty).map(PathBuf::from);

        Ok(Self {
            telegram_bot_token,
            command_prefix,
            bot_status,
            allowed_users,
            anthropic_api_key,
            anthropic_model,
            anthropic_base_url,
            max_tokens,
            query_timeout,
            chunk_size,
            docs_dir,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_num<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = get(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a number, got {raw:?}")))
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn applies_defaults() {
        let cfg = Config::from_source(source(&[
            ("TELEGRAM_BOT_TOKEN", "tg"),
            ("ANTHROPIC_API_KEY", "sk"),
        ]))
        .unwrap();

        assert_eq!(cfg.command_prefix, "!EVE ");
        assert_eq!(cfg.bot_status, "EVE Frontier Development");
        assert_eq!(cfg.anthropic_model, DEFAULT_MODEL);
        assert_eq!(cfg.anthropic_base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.max_tokens, 4096);
        assert_eq!(cfg.chunk_size, 1990);
        assert_eq!(cfg.query_timeout, Duration::from_secs(120));
        assert!(cfg.allowed_users.is_empty());
        assert!(cfg.docs_dir.is_none());
    }

    #[test]
    fn requires_credentials() {
        let err = Config::from_source(source(&[("TELEGRAM_BOT_TOKEN", "tg")])).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));

        let err = Config::from_source(source(&[
            ("TELEGRAM_BOT_TOKEN", "  "),
            ("ANTHROPIC_API_KEY", "sk"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn parses_overrides() {
        let cfg = Config::from_source(source(&[
            ("TELEGRAM_BOT_TOKEN", "tg"),
            ("ANTHROPIC_API_KEY", "sk"),
            ("ALLOWED_USERS", "1, 2,x,3"),
            ("CHUNK_SIZE", "500"),
            ("ANTHROPIC_BASE_URL", "http://localhost:8080/"),
            ("COMMAND_PREFIX", "?eve "),
            ("EVE_DOCS_DIR", "/srv/docs"),
        ]))
        .unwrap();

        assert_eq!(cfg.allowed_users, vec![1, 2, 3]);
        assert_eq!(cfg.chunk_size, 500);
        assert_eq!(cfg.anthropic_base_url, "http://localhost:8080");
        assert_eq!(cfg.command_prefix, "?eve ");
        assert_eq!(cfg.docs_dir, Some(PathBuf::from("/srv/docs")));
    }

    #[test]
    fn rejects_bad_numbers() {
        let base = [("TELEGRAM_BOT_TOKEN", "tg"), ("ANTHROPIC_API_KEY", "sk")];

        let mut pairs = base.to_vec();
        pairs.push(("CHUNK_SIZE", "0"));
        assert!(Config::from_source(source(&pairs)).is_err());

        let mut pairs = base.to_vec();
        pairs.push(("QUERY_TIMEOUT_MS", "soon"));
        let err = Config::from_source(source(&pairs)).unwrap_err();
        assert!(err.to_string().contains("QUERY_TIMEOUT_MS"));
    }

    #[test]
    fn parses_dotenv_lines() {
        let parsed = parse_dotenv(
            "# comment\n\nTELEGRAM_BOT_TOKEN=abc\nexport ANTHROPIC_API_KEY=\"sk-1\"\nBAD\n=novalue\nQ='x y'\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("TELEGRAM_BOT_TOKEN".to_string(), "abc".to_string()),
                ("ANTHROPIC_API_KEY".to_string(), "sk-1".to_string()),
                ("Q".to_string(), "x y".to_string()),
            ]
        );
    }
}
