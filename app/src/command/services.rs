use wayfinder_config::Config;

use super::load_catalog;

/// Input parameters for the Services command strategy.
#[derive(Debug, Clone)]
pub struct ServicesInput {
    /// Page URL of a single service, with or without the leading slash
    pub url: Option<String>,
}

/// Strategy for browsing the catalog: featured first, then by name.
#[derive(Debug, Clone, Copy)]
pub struct ServicesStrategy;

impl super::CommandStrategy for ServicesStrategy {
    type Input = ServicesInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let catalog = load_catalog(&config).await?;

        if let Some(url) = input.url {
            let service = catalog
                .find_by_page_url(&url)
                .ok_or_else(|| anyhow::anyhow!("Service not found: {url}"))?;
            println!("{}", serde_json::to_string_pretty(service)?);
            return Ok(());
        }

        for service in catalog.list_sorted() {
            let star = if service.featured { "*" } else { " " };
            println!(
                "{star} {:<24} {:<14} {:.1} ({} reviews)",
                service.name, service.page_url, service.rating, service.reviews
            );
        }
        Ok(())
    }
}
