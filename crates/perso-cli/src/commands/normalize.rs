//! Label inspection command

use anyhow::Result;
use perso_core::config::ReviewConfig;
use perso_core::{extract_card_member, is_cheque_label, normalize_label, CardMap};

/// Normalized form, cheque flag and card member of a raw label
pub fn describe_label(label: &str, card_members: &CardMap) -> String {
    let cheque = if is_cheque_label(label) { "yes" } else { "no" };
    let card = extract_card_member(label, card_members).unwrap_or_else(|| "-".to_string());

    format!(
        "{}\n   → {}\n   cheque: {} │ card: {}\n",
        label,
        normalize_label(label),
        cheque,
        card
    )
}

pub fn cmd_normalize(config: &ReviewConfig, labels: &[String]) -> Result<()> {
    for label in labels {
        print!("{}", describe_label(label, &config.card_members));
    }

    Ok(())
}
