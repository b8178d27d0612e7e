//! User prompts for the wizard.
//!
//! Responsibilities:
//! - Ask the confirm/choose questions each wizard stage needs.
//! - Honor `--yes` so the wizard can run without a terminal.
//!
//! Prompts render on STDERR through dialoguer's default terminal.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

/// What to do while waiting on the funding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingAction {
    Continue,
    Refresh,
    Quit,
}

impl FundingAction {
    const CHOICES: [FundingAction; 3] = [
        FundingAction::Continue,
        FundingAction::Refresh,
        FundingAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            FundingAction::Continue => "Continue to mint",
            FundingAction::Refresh => "Refresh balance",
            FundingAction::Quit => "Quit",
        }
    }
}

/// Prompts, or their non-interactive stand-in.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    assume_yes: bool,
}

impl Prompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Ask a yes/no question, defaulting to yes.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .context("Failed to read confirmation")
    }

    /// Ask what to do on the funding stage.
    pub fn funding_action(&self, balance: &str) -> Result<FundingAction> {
        if self.assume_yes {
            return Ok(FundingAction::Continue);
        }

        let labels: Vec<&str> = FundingAction::CHOICES.iter().map(|a| a.label()).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Balance: {balance}. Fund the account, then continue"))
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to read funding choice")?;

        Ok(FundingAction::CHOICES
            .get(index)
            .copied()
            .unwrap_or(FundingAction::Quit))
    }
}
