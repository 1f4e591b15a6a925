use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Parameters of the outbound chat-completion call.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration
}

impl Default for ChatSettings {
    fn default() -> Self {
        ChatSettings {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout: Duration::from_secs(30)
        }
    }
}

/// Process configuration, built once at startup and shared read-only
/// with every handler.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub chat: ChatSettings,
    pub max_question_chars: usize,
    pub static_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub request_log: Option<PathBuf>
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            chat: ChatSettings::default(),
            max_question_chars: 8000,
            static_dir: PathBuf::from("frontend"),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            request_log: None
        }
    }
}

// never print the credential
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("chat", &self.chat)
            .field("max_question_chars", &self.max_question_chars)
            .field("static_dir", &self.static_dir)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("request_log", &self.request_log)
            .finish()
    }
}

impl Config {

    pub fn from_env() -> Self {

        Self::from_lookup(|key| std::env::var(key).ok())

    }

    /// Builds the config from any key/value source; unset keys keep their
    /// defaults and unparseable values fall back with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>
    {

        let defaults = Config::default();

        // an empty key is as good as no key
        let api_key = lookup("DEEPSEEK_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let chat = ChatSettings {
            api_url: lookup("CHAT_API_URL").unwrap_or(defaults.chat.api_url),
            model: lookup("CHAT_MODEL").unwrap_or(defaults.chat.model),
            temperature: parse_or(&lookup, "CHAT_TEMPERATURE", defaults.chat.temperature),
            max_tokens: parse_or(&lookup, "CHAT_MAX_TOKENS", defaults.chat.max_tokens),
            timeout: Duration::from_secs(
                parse_or(&lookup, "CHAT_TIMEOUT_SECS", defaults.chat.timeout.as_secs())
            )
        };

        Config {
            api_key,
            chat,
            max_question_chars: parse_or(&lookup, "MAX_QUESTION_CHARS", defaults.max_question_chars),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            host: parse_or(&lookup, "HOST", defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            request_log: lookup("REQUEST_LOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
        }

    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr
{

    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {}={:?}, using default", key, raw);
                default
            }
        },
        None => default
    }

}
