//! Launch settings: defaults, then `agreement.toml`, then environment.

use std::{collections::HashMap, fs};

use shared::domain::ClientMetadata;
use url::form_urlencoded;

pub const DEFAULT_WEBHOOK_URL: &str =
    "https://hook.eu2.make.com/em6i6rh7dh7x5htpyn7wqczpefxqz18d";

#[derive(Debug, Clone)]
pub struct Settings {
    pub webhook_url: String,
    pub metadata: ClientMetadata,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.into(),
            metadata: ClientMetadata::default(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("agreement.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("webhook_url") {
                settings.webhook_url = v.clone();
            }
            if let Some(v) = file_cfg.get("company") {
                settings.metadata.company = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("address") {
                settings.metadata.address = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("email") {
                settings.metadata.email = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("phone") {
                settings.metadata.phone = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("contact") {
                settings.metadata.contact = Some(v.clone());
            }
        }
    }

    if let Ok(v) = std::env::var("AGREEMENT_WEBHOOK_URL") {
        settings.webhook_url = v;
    }
    if let Ok(v) = std::env::var("AGREEMENT_COMPANY") {
        settings.metadata.company = Some(v);
    }
    if let Ok(v) = std::env::var("AGREEMENT_ADDRESS") {
        settings.metadata.address = Some(v);
    }
    if let Ok(v) = std::env::var("AGREEMENT_EMAIL") {
        settings.metadata.email = Some(v);
    }
    if let Ok(v) = std::env::var("AGREEMENT_PHONE") {
        settings.metadata.phone = Some(v);
    }
    if let Ok(v) = std::env::var("AGREEMENT_CONTACT") {
        settings.metadata.contact = Some(v);
    }

    settings
}

/// Parse a launch-link query string (`company=Acme%20Ltd&email=...`) into
/// client metadata. Percent-decoding is handled by the parser; unknown
/// keys are ignored and blank values are treated as absent.
pub fn metadata_from_query(query: &str) -> ClientMetadata {
    let query = query.trim_start_matches('?');
    let mut metadata = ClientMetadata::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        let value = value.into_owned();
        match key.as_ref() {
            "company" => metadata.company = Some(value),
            "address" => metadata.address = Some(value),
            "email" => metadata.email = Some(value),
            "phone" => metadata.phone = Some(value),
            "contact" => metadata.contact = Some(value),
            _ => {}
        }
    }
    metadata
}
