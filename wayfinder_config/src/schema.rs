use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

// RouterConfig lives in wayfinder_core; this file only derives it.
use wayfinder_core::{GenerationOptions, RouterConfig};

/// Key shipped in sample environments; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "demo-key";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub contacts: ContactsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub active: ProviderKind,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub openai: ProviderConfig,
}

impl ProvidersConfig {
    #[must_use]
    pub const fn active_provider(&self) -> &ProviderConfig {
        match self.active {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    #[must_use]
    pub fn has_usable_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RouterSettings {
    #[serde(default = "RouterSettings::default_timeout")]
    pub ai_timeout_secs: u64,
    #[serde(default = "RouterSettings::default_temperature")]
    pub extraction_temperature: f32,
    #[serde(default = "RouterSettings::default_extraction_tokens")]
    pub extraction_max_tokens: u32,
    #[serde(default = "RouterSettings::default_temperature")]
    pub matching_temperature: f32,
    #[serde(default = "RouterSettings::default_matching_tokens")]
    pub matching_max_tokens: u32,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            ai_timeout_secs: Self::default_timeout(),
            extraction_temperature: Self::default_temperature(),
            extraction_max_tokens: Self::default_extraction_tokens(),
            matching_temperature: Self::default_temperature(),
            matching_max_tokens: Self::default_matching_tokens(),
        }
    }
}

impl RouterSettings {
    const fn default_timeout() -> u64 {
        15
    }

    const fn default_temperature() -> f32 {
        0.1
    }

    const fn default_extraction_tokens() -> u32 {
        GenerationOptions::extraction().max_output_tokens
    }

    const fn default_matching_tokens() -> u32 {
        GenerationOptions::matching().max_output_tokens
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// JSON file with an array of services; the built-in catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContactsConfig {
    #[serde(default = "ContactsConfig::default_enabled")]
    pub enabled: bool,
    /// JSON-lines file; contacts are kept in memory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            path: None,
        }
    }
}

impl ContactsConfig {
    const fn default_enabled() -> bool {
        true
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("wayfinder"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'wayfinder init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config.apply_env_overrides())
    }

    /// Like [`Config::load`], but a missing file yields the defaults, which
    /// run the router on local heuristics only.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            return Self::load();
        }
        warn!(
            "No config at {}, using defaults (AI tier disabled unless an API key is in the environment)",
            config_path.display()
        );
        Ok(Self::default().apply_env_overrides())
    }

    #[must_use]
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// `GEMINI_API_KEY` and `OPENAI_API_KEY` replace the configured keys.
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.providers.gemini.api_key = key;
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.providers.openai.api_key = key;
        }
        self
    }

    /// Feature flags for the query router.
    #[must_use]
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            ai_enabled: self.providers.active_provider().has_usable_key(),
            persist_contacts: self.contacts.enabled,
            ai_timeout: Duration::from_secs(self.router.ai_timeout_secs.max(1)),
            extraction: GenerationOptions {
                temperature: self.router.extraction_temperature,
                max_output_tokens: self.router.extraction_max_tokens,
            },
            matching: GenerationOptions {
                temperature: self.router.matching_temperature,
                max_output_tokens: self.router.matching_max_tokens,
            },
        }
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

        let contacts_path = config_dir.join("contacts.jsonl");
        let config_template = format!(
            r#"{{
  "providers": {{
    "active": "gemini",
    "gemini": {{
      "api_key": "{PLACEHOLDER_API_KEY}",
      "model": "gemini-pro"
    }},
    "openai": {{
      "api_key": "",
      "model": "gpt-4o-mini"
    }}
  }},
  "router": {{
    "ai_timeout_secs": 15,
    "extraction_temperature": 0.1,
    "extraction_max_tokens": 256,
    "matching_temperature": 0.1,
    "matching_max_tokens": 1024
  }},
  "catalog": {{}},
  "contacts": {{
    "enabled": true,
    "path": {}
  }}
}}"#,
            serde_json::to_string(&contacts_path)?
        );

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Gemini API key");
        println!("   2. Optionally point catalog.path at a JSON list of services");
        println!("   3. Run 'wayfinder chat' to try some queries");
        println!();
        println!("🔧 Without a usable API key every query runs on the local heuristics.");
        println!();
        Ok(())
    }
}
