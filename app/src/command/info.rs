use wayfinder_config::{Config, ProviderConfig, ProviderKind};

use super::load_catalog;

/// Strategy for displaying the effective configuration.
///
/// API keys are masked. A missing config file shows the defaults.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let router = config.router_config();

        println!("=== wayfinder Configuration ===\n");

        println!("Config File: {}", Config::config_path()?.display());
        println!();

        println!("Providers:");
        let active = match config.providers.active {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        };
        println!("  Active: {active}");
        print_provider("Gemini", &config.providers.gemini);
        print_provider("OpenAI", &config.providers.openai);
        println!(
            "  AI Tier: {}",
            if router.ai_enabled { "enabled" } else { "disabled (local heuristics only)" }
        );
        println!();

        println!("Router:");
        println!("  AI Timeout: {}s", router.ai_timeout.as_secs());
        println!(
            "  Extraction: temperature {}, max tokens {}",
            router.extraction.temperature, router.extraction.max_output_tokens
        );
        println!(
            "  Matching: temperature {}, max tokens {}",
            router.matching.temperature, router.matching.max_output_tokens
        );
        println!();

        println!("Catalog:");
        match &config.catalog.path {
            Some(path) => println!("  Path: {}", path.display()),
            None => println!("  Path: (built-in)"),
        }
        match load_catalog(&config).await {
            Ok(catalog) => println!("  Services: {}", catalog.len()),
            Err(e) => {
                println!("  Status: Failed to load");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Contacts:");
        println!("  Persist: {}", config.contacts.enabled);
        match &config.contacts.path {
            Some(path) => println!("  Path: {}", path.display()),
            None => println!("  Path: (in memory)"),
        }

        Ok(())
    }
}

fn print_provider(label: &str, provider: &ProviderConfig) {
    println!("  {label}:");
    println!("    API Key: {}", mask_key(&provider.api_key));
    if let Some(model) = &provider.model {
        println!("    Model: {model}");
    }
    if let Some(base_url) = &provider.base_url {
        println!("    Base URL: {base_url}");
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_keys() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("short"), "***");
        assert_eq!(mask_key("AIzaSyExample1234"), "AIza...1234");
    }
}
