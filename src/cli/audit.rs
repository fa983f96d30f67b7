//! Audit log CLI command

use crate::audit::EntityType;
use crate::error::{XpenseError, XpenseResult};
use crate::storage::Storage;

fn parse_entity(value: &str) -> XpenseResult<EntityType> {
    match value.trim().to_lowercase().as_str() {
        "expense" | "expenses" => Ok(EntityType::Expense),
        "wallet" | "wallets" => Ok(EntityType::Wallet),
        "settings" | "config" => Ok(EntityType::Settings),
        "sheet" | "sync" => Ok(EntityType::Sheet),
        _ => Err(XpenseError::Validation(format!(
            "Unknown entity '{}'. Valid entities: expense, wallet, settings, sheet",
            value
        ))),
    }
}

/// Print the most recent audit entries
pub fn handle_audit_command(storage: &Storage, limit: usize, entity: Option<String>) -> XpenseResult<()> {
    let entries = match entity {
        Some(entity) => storage.audit().read_recent_for(parse_entity(&entity)?, limit)?,
        None => storage.audit().read_recent(limit)?,
    };

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!("\nShowing {} of {} entries", entries.len(), storage.audit().entry_count()?);

    Ok(())
}
