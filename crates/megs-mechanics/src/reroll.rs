//! The roll/reroll loop for MEGS dice.
//!
//! Each round rolls two dice and appends them to the sequence. Double 1s end
//! the loop as an automatic failure. Any other doubles ask the confirmer
//! whether to roll again; the new pair is added on top. A non-matching pair
//! ends the loop. There is no round cap: termination is up to the dice and
//! the confirmer.

use serde::{Deserialize, Serialize};

use crate::dice::{DiePair, DiceRoller, RerollConfirmer, extract_pair};

/// Prompt passed to the confirmer after doubles.
pub const REROLL_PROMPT: &str = "Doubles! Continue rolling?";

/// Where the coordinator is in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerollState {
    /// About to roll (or take the caller's initial pair).
    Rolling,
    /// Rolled non-1 doubles; waiting for the confirmer.
    AwaitRerollDecision,
    /// Finished.
    Done,
}

/// State after a pair lands.
pub fn next_state(pair: DiePair) -> RerollState {
    if pair.is_double_ones() {
        RerollState::Done
    } else if pair.is_doubles() {
        RerollState::AwaitRerollDecision
    } else {
        RerollState::Done
    }
}

/// Every die rolled for one action, across all rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSequence {
    /// Die values in roll order, two per round.
    pub dice: Vec<u32>,
    /// How many rerolls were accepted.
    pub rerolls: u32,
}

impl DiceSequence {
    /// Sum of every die in the sequence.
    pub fn total(&self) -> u32 {
        self.dice.iter().fold(0u32, |acc, d| acc.saturating_add(*d))
    }

    /// The most recent pair, if any.
    pub fn last_pair(&self) -> Option<DiePair> {
        match self.dice.as_slice() {
            [.., a, b] => Some(DiePair(*a, *b)),
            _ => None,
        }
    }

    /// The final pair came up double 1s.
    pub fn is_double_ones(&self) -> bool {
        self.last_pair().is_some_and(DiePair::is_double_ones)
    }
}

/// Drives the reroll loop against injected providers.
pub struct RerollCoordinator<'a> {
    dice: &'a dyn DiceRoller,
    confirm: &'a dyn RerollConfirmer,
    formula: &'a str,
}

impl<'a> RerollCoordinator<'a> {
    /// Roll `formula` through `dice`, asking `confirm` after doubles.
    pub fn new(
        dice: &'a dyn DiceRoller,
        confirm: &'a dyn RerollConfirmer,
        formula: &'a str,
    ) -> Self {
        Self {
            dice,
            confirm,
            formula,
        }
    }

    /// Run the loop to completion.
    ///
    /// `initial` stands in for the first roll when the caller already has one.
    pub async fn run(&self, initial: Option<DiePair>) -> DiceSequence {
        let mut sequence = DiceSequence::default();
        let mut pending = initial;
        let mut state = RerollState::Rolling;

        loop {
            state = match state {
                RerollState::Rolling => {
                    let pair = match pending.take() {
                        Some(pair) => pair,
                        None => extract_pair(&self.dice.roll(self.formula).await),
                    };
                    sequence.dice.extend([pair.0, pair.1]);
                    tracing::debug!(%pair, total = sequence.total(), "rolled");
                    next_state(pair)
                }
                RerollState::AwaitRerollDecision => {
                    if self.confirm.confirm(REROLL_PROMPT).await {
                        sequence.rerolls += 1;
                        tracing::debug!(rerolls = sequence.rerolls, "reroll accepted");
                        RerollState::Rolling
                    } else {
                        tracing::debug!("reroll declined");
                        RerollState::Done
                    }
                }
                RerollState::Done => break,
            };
        }

        sequence
    }
}
