//! Links command implementation.

use anyhow::{Context, Result};
use mintwizard_client::links::{explorer_tx_url, marketplace_url};
use mintwizard_client::{TokenId, TxHash, WALLET_ACQUISITION};
use mintwizard_config::Config;

pub fn run(config: &Config, token_id: Option<u64>, tx: Option<&str>) -> Result<()> {
    println!("{}", render(config, token_id, tx)?);
    Ok(())
}

fn render(config: &Config, token_id: Option<u64>, tx: Option<&str>) -> Result<String> {
    if let Some(id) = token_id {
        return Ok(marketplace_url(
            &config.links,
            &config.contract.address,
            TokenId(id),
        ));
    }
    if let Some(tx) = tx {
        let hash = TxHash::parse(tx).context("Invalid transaction hash")?;
        return Ok(explorer_tx_url(&config.links, &hash));
    }
    Ok(WALLET_ACQUISITION.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_link_uses_configured_contract() {
        let mut config = Config::default();
        config.contract.address = "0x1111111111111111111111111111111111111111".to_string();

        let url = render(&config, Some(5), None).unwrap();

        assert_eq!(
            url,
            "https://testnets.opensea.io/assets/0x1111111111111111111111111111111111111111/5"
        );
    }

    #[test]
    fn test_tx_link() {
        let url = render(&Config::default(), None, Some("0xabc123")).unwrap();
        assert_eq!(url, "https://rinkeby.etherscan.io/tx/0xabc123");
    }

    #[test]
    fn test_invalid_tx_hash_is_rejected() {
        assert!(render(&Config::default(), None, Some("abc")).is_err());
    }

    #[test]
    fn test_without_arguments_prints_wallet_downloads() {
        let text = render(&Config::default(), None, None).unwrap();
        assert!(text.contains("https://metamask.io/download.html"));
    }
}
