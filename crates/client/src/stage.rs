//! Wizard stages.

use std::fmt;
use std::str::FromStr;

/// A stage of the onboarding wizard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Connect a wallet.
    #[default]
    Wallet,
    /// Fund the connected account.
    Fund,
    /// Mint the token.
    Mint,
    /// Minting finished.
    Success,
}

impl Stage {
    /// All stages in wizard order.
    pub const ALL: [Stage; 4] = [Stage::Wallet, Stage::Fund, Stage::Mint, Stage::Success];

    /// Stable lowercase identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::Wallet => "wallet",
            Stage::Fund => "fund",
            Stage::Mint => "mint",
            Stage::Success => "success",
        }
    }

    /// Title shown above the stage.
    pub const fn title(&self) -> &'static str {
        match self {
            Stage::Wallet => "Create a wallet",
            Stage::Fund => "Fund your wallet",
            Stage::Mint => "Mint your first NFT",
            Stage::Success => "Congratulations",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown stage name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stage '{0}'. Expected one of: wallet, fund, mint, success")]
pub struct ParseStageError(String);

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStageError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            Stage::ALL.map(|s| s.as_str()),
            ["wallet", "fund", "mint", "success"]
        );
        assert_eq!(Stage::default(), Stage::Wallet);
    }

    #[test]
    fn test_stage_titles() {
        assert_eq!(
            Stage::ALL.map(|s| s.title()),
            [
                "Create a wallet",
                "Fund your wallet",
                "Mint your first NFT",
                "Congratulations"
            ]
        );
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("fund".parse::<Stage>(), Ok(Stage::Fund));
        assert_eq!(" MINT ".parse::<Stage>(), Ok(Stage::Mint));
        assert!("done".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_display_round_trips() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string().parse::<Stage>(), Ok(stage));
        }
    }
}
