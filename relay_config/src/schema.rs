use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub twilio: TwilioConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        3000
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "TwilioConfig::default_base_url")]
    pub base_url: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

impl TwilioConfig {
    fn default_base_url() -> String {
        "https://api.twilio.com".to_string()
    }

    /// Both credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.account_sid.trim().is_empty() && !self.auth_token.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "OpenAiConfig::default_model")]
    pub model: String,
    #[serde(default = "OpenAiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "OpenAiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::default_model(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl OpenAiConfig {
    fn default_model() -> String {
        "gpt-3.5-turbo".to_string()
    }

    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConversationConfig {
    #[serde(default = "ConversationConfig::default_history_limit")]
    pub history_limit: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_limit: Self::default_history_limit(),
        }
    }
}

impl ConversationConfig {
    const fn default_history_limit() -> usize {
        50
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("relaybot"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/relaybot/config.json` (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::from_json(&std::fs::read_to_string(&config_path)?)?
        } else {
            info!(
                "No config file at {}, using defaults and environment",
                config_path.display()
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply `PORT`, `HOST`, `TWILIO_*` and `OPENAI_*` overrides from `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value {port:?}: {e}"))?;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(sid) = get("TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = sid;
        }
        if let Some(token) = get("TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = token;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your Twilio account SID and auth token");
        println!("   2. Optionally add an OpenAI API key for AI replies and summaries");
        println!("   3. Run 'relaybot check' to verify the Twilio credentials");
        println!("   4. Run 'relaybot serve' and point the WhatsApp sandbox at /webhook");
        println!();
        println!("🔧 Environment variables override the file:");
        println!("   PORT, HOST, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN,");
        println!("   OPENAI_API_KEY, OPENAI_MODEL, OPENAI_BASE_URL");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "server": {
    "host": "0.0.0.0",
    "port": 3000
  },
  "twilio": {
    "account_sid": "",
    "auth_token": "",
    "base_url": "https://api.twilio.com"
  },
  "openai": {
    "api_key": "",
    "model": "gpt-3.5-turbo",
    "base_url": "https://api.openai.com/v1",
    "timeout_secs": 30
  },
  "conversation": {
    "history_limit": 50
  }
}"#;
