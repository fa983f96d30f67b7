//! Wallet display formatting

use crate::models::Wallet;

/// Format the wallet registry; the first wallet is marked as the default
pub fn format_wallet_list(wallets: &[Wallet]) -> String {
    if wallets.is_empty() {
        return "No wallets found.".to_string();
    }

    let name_width = wallets
        .iter()
        .map(|w| w.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<8}  {}\n",
        "ID",
        "Name",
        "Type",
        "",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<8}\n",
        "",
        "",
        "",
        name_width = name_width
    ));

    for (index, wallet) in wallets.iter().enumerate() {
        let marker = if index == 0 { "(default)" } else { "" };
        output.push_str(
            format!(
                "{:<12}  {:<name_width$}  {:<8}  {}",
                wallet.id.to_string(),
                wallet.name,
                wallet.wallet_type.to_string(),
                marker,
                name_width = name_width
            )
            .trim_end(),
        );
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletType;

    #[test]
    fn test_default_marker() {
        let wallets = vec![Wallet::default_cash(), Wallet::new("bKash", WalletType::Digital)];
        let output = format_wallet_list(&wallets);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[2].contains("Cash") && lines[2].ends_with("(default)"));
        assert!(lines[3].contains("bKash") && lines[3].ends_with("Digital"));
    }
}
