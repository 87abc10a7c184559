//! Outward JSON contract of the router.
//!
//! Every constructor here only decides field presence; the pipeline decides
//! which one to call.

use serde::{Deserialize, Serialize};

use crate::catalog::MatchResult;
use crate::contact::{ContactField, ExtractedContact};
use crate::util::{fallback_search_link, search_links};

pub const HOME_MATCH: &str = "Home Page";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalRoute {
    #[serde(rename = "match")]
    pub matched: Option<String>,
    pub route: Option<String>,
}

impl InternalRoute {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            matched: None,
            route: None,
        }
    }

    #[must_use]
    pub fn home() -> Self {
        Self {
            matched: Some(HOME_MATCH.to_string()),
            route: Some(HOME_ROUTE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAction {
    FillForm,
    NavigateHome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterResponse {
    pub internal: InternalRoute,
    #[serde(default)]
    pub external: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_action: Option<SpecialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<ExtractedContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_form: Option<bool>,
}

impl RouterResponse {
    const fn bare(internal: InternalRoute, external: Vec<String>) -> Self {
        Self {
            internal,
            external,
            special_action: None,
            form_data: None,
            message: None,
            ask_form: None,
        }
    }

    /// Contact details were found; the client should fill its form.
    #[must_use]
    pub fn contact_captured(contact: ExtractedContact) -> Self {
        let message = confirmation_message(&contact);
        Self {
            special_action: Some(SpecialAction::FillForm),
            form_data: Some(contact),
            message: Some(message),
            ..Self::bare(InternalRoute::none(), Vec::new())
        }
    }

    #[must_use]
    pub fn home() -> Self {
        Self::bare(InternalRoute::home(), Vec::new())
    }

    /// Navigation outcome. A missing match always carries external links.
    #[must_use]
    pub fn navigation(result: &MatchResult, external: Vec<String>, query: &str) -> Self {
        let internal = result.service.as_ref().map_or_else(InternalRoute::none, |s| InternalRoute {
            matched: Some(s.name.clone()),
            route: Some(s.page_url.clone()),
        });
        let external = if internal.matched.is_none() && external.is_empty() {
            search_links(query)
        } else {
            external
        };
        Self::bare(internal, external)
    }

    #[must_use]
    pub const fn with_ask_form(mut self, ask_form: bool) -> Self {
        self.ask_form = Some(ask_form);
        self
    }

    /// Body used when anything past validation failed unexpectedly.
    #[must_use]
    pub fn degraded(query: &str) -> Self {
        Self::bare(InternalRoute::none(), vec![fallback_search_link(query)])
    }

    #[must_use]
    pub const fn is_contact_capture(&self) -> bool {
        matches!(self.special_action, Some(SpecialAction::FillForm))
    }
}

fn confirmation_message(contact: &ExtractedContact) -> String {
    let greeting = contact
        .name
        .as_ref()
        .map_or_else(|| "Thank you".to_string(), |name| format!("Thank you, {name}"));
    let fields = contact
        .present_fields()
        .iter()
        .map(ContactField::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if fields.is_empty() {
        format!("{greeting}! I've captured your information.")
    } else {
        format!("{greeting}! I've captured your information: {fields}.")
    }
}
