use serde::{Deserialize, Serialize};

use super::atom::Vault;
use super::shares::Shares;
use crate::error::CoreError;

/// A wallet identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<Position>,
}

impl Account {
    /// The label when one is set, otherwise the shortened address.
    pub fn display_name(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            _ => short_address(&self.id),
        }
    }
}

/// One account's stake in a vault.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Shares>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Vault>,
}

impl Position {
    pub fn shares(&self) -> Shares {
        self.shares.unwrap_or_default()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.id.as_str())
    }

    pub fn account_label(&self) -> Option<&str> {
        self.account.as_ref().and_then(|a| a.label.as_deref())
    }

    pub fn holder_name(&self) -> String {
        self.account
            .as_ref()
            .map(Account::display_name)
            .unwrap_or_else(|| "?".to_string())
    }
}

/// First ten characters of an address followed by `...`.
pub fn short_address(address: &str) -> String {
    if address.is_empty() {
        return "?".to_string();
    }
    match address.char_indices().nth(10) {
        Some((idx, _)) => format!("{}...", &address[..idx]),
        None => address.to_string(),
    }
}

/// Validate a full `0x`-prefixed 20-byte address and lower-case it.
pub fn normalize_address(address: &str) -> Result<String, CoreError> {
    let trimmed = address.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| CoreError::InvalidAddress(address.to_string()))?;

    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidAddress(address.to_string()));
    }
    Ok(format!("0x{}", hex.to_ascii_lowercase()))
}
