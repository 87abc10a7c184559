//! Admin operations on the contact store.

use clap::Subcommand;
use std::sync::Arc;
use uuid::Uuid;
use wayfinder_catalog::JsonlContactStore;
use wayfinder_config::Config;
use wayfinder_core::{ContactQuery, ContactStatus, ContactStore, ContactSubmission};

#[derive(Debug, Clone, Subcommand)]
pub enum ContactsAction {
    /// List stored contacts, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Only contacts with this status (new, contacted, resolved)
        #[arg(long)]
        status: Option<String>,
    },
    /// Change the status of one contact
    Status {
        id: Uuid,

        /// new, contacted or resolved
        status: String,
    },
    /// Submit contact details directly
    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        service_interest: Option<String>,
    },
}

/// Strategy for the contact admin subcommands.
///
/// Works against the configured JSON-lines store; an in-memory store would
/// be empty on every run.
#[derive(Debug, Clone, Copy)]
pub struct ContactsStrategy;

impl super::CommandStrategy for ContactsStrategy {
    type Input = ContactsAction;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let path = config.contacts.path.clone().ok_or_else(|| {
            anyhow::anyhow!("No contacts.path configured. Run 'wayfinder init' or edit the config.")
        })?;
        let store: Arc<dyn ContactStore> = Arc::new(JsonlContactStore::new(path));

        match input {
            ContactsAction::List {
                page,
                limit,
                status,
            } => {
                let status = status.as_deref().map(str::parse::<ContactStatus>).transpose()?;
                let page = store
                    .list_contacts(&ContactQuery {
                        page,
                        limit,
                        status,
                    })
                    .await?;
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
            ContactsAction::Status { id, status } => {
                let status: ContactStatus = status.parse()?;
                let record = store
                    .update_status(&id, status)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Contact not found: {id}"))?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            ContactsAction::Add {
                name,
                email,
                phone,
                description,
                service_interest,
            } => {
                let record = ContactSubmission {
                    name,
                    email,
                    phone,
                    description,
                    service_interest,
                    original_query: None,
                }
                .into_record()?;
                let id = store.save_contact(&record).await?;
                println!("Contact saved: {id}");
            }
        }
        Ok(())
    }
}
