//! Dice-roll and reroll-confirmation providers.
//!
//! Callers plug in implementations so resolution can run against real
//! randomness, a player prompt, or scripted fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::formula::DiceFormula;
use super::roll::RolledDice;

/// Evaluates a dice formula.
#[async_trait]
pub trait DiceRoller: Send + Sync {
    /// Roll `formula` and report the dice.
    ///
    /// Providers that fail should still return something; pair extraction
    /// falls back to 1 for any die it can't read.
    async fn roll(&self, formula: &str) -> RolledDice;
}

/// Decides whether to keep rolling after doubles.
#[async_trait]
pub trait RerollConfirmer: Send + Sync {
    /// Answer `prompt` with yes (`true`) or no.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Rolls formulas with a seedable RNG.
#[derive(Debug)]
pub struct RandomDice {
    rng: Mutex<StdRng>,
}

impl RandomDice {
    /// Reproducible dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Dice seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

#[async_trait]
impl DiceRoller for RandomDice {
    async fn roll(&self, formula: &str) -> RolledDice {
        let parsed = match DiceFormula::parse(formula) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(formula, error = %e, "cannot roll formula");
                return RolledDice::default();
            }
        };
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RolledDice::from_values(parsed.roll(&mut rng))
    }
}

/// Replays a fixed sequence of results, then reports unreadable dice.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    rolls: Mutex<VecDeque<RolledDice>>,
}

impl ScriptedDice {
    /// Replay the given provider results in order.
    pub fn new(rolls: Vec<RolledDice>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into()),
        }
    }

    /// Replay die pairs in order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(a, b)| RolledDice::from_values(vec![a, b]))
                .collect(),
        )
    }

    /// How many scripted results are left.
    pub fn remaining(&self) -> usize {
        self.rolls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl DiceRoller for ScriptedDice {
    async fn roll(&self, formula: &str) -> RolledDice {
        let next = self
            .rolls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        next.unwrap_or_else(|| {
            tracing::warn!(formula, "scripted dice exhausted");
            RolledDice::default()
        })
    }
}

/// Always keeps rolling after doubles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReroll;

#[async_trait]
impl RerollConfirmer for AlwaysReroll {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Never rerolls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverReroll;

#[async_trait]
impl RerollConfirmer for NeverReroll {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Replays scripted answers, then declines. Records every prompt it sees.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    /// Answer with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of times a decision was requested.
    pub fn asked(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl RerollConfirmer for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DiePair, extract_pair};

    #[tokio::test]
    async fn random_dice_roll_two_d10() {
        let dice = RandomDice::seeded(42);
        for _ in 0..100 {
            let pair = extract_pair(&dice.roll("1d10 + 1d10").await);
            assert!((1..=10).contains(&pair.0));
            assert!((1..=10).contains(&pair.1));
        }
    }

    #[tokio::test]
    async fn random_dice_deterministic_with_seed() {
        let a = RandomDice::seeded(5);
        let b = RandomDice::seeded(5);
        for _ in 0..10 {
            assert_eq!(a.roll("2d10").await, b.roll("2d10").await);
        }
    }

    #[tokio::test]
    async fn random_dice_bad_formula_is_unreadable() {
        let dice = RandomDice::from_os();
        let rolled = dice.roll("banana").await;
        assert_eq!(extract_pair(&rolled), DiePair(1, 1));
    }

    #[tokio::test]
    async fn scripted_dice_replay_then_exhaust() {
        let dice = ScriptedDice::from_pairs([(2, 2), (3, 4)]);
        assert_eq!(dice.remaining(), 2);
        assert_eq!(extract_pair(&dice.roll("2d10").await), DiePair(2, 2));
        assert_eq!(extract_pair(&dice.roll("2d10").await), DiePair(3, 4));
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll("2d10").await, RolledDice::default());
    }

    #[tokio::test]
    async fn fixed_confirmers() {
        assert!(AlwaysReroll.confirm("again?").await);
        assert!(!NeverReroll.confirm("again?").await);
    }

    #[tokio::test]
    async fn scripted_confirm_records_prompts() {
        let confirm = ScriptedConfirm::new([true, false, true]);
        assert!(confirm.confirm("one").await);
        assert!(!confirm.confirm("two").await);
        assert!(confirm.confirm("three").await);
        assert!(!confirm.confirm("four").await);
        assert_eq!(confirm.asked(), 4);
    }
}
