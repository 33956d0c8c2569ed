use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use megs_mechanics::dice::{AlwaysReroll, NeverReroll, RandomDice, ScriptedDice};
use megs_mechanics::{
    BoundsPolicy, DiceRoller, HeroPointSpend, ManeuverTable, OutcomeKind, RerollConfirmer,
    ResolveRequest, Resolver, ResolverConfig, ResultData, RollValues,
};

/// How to answer "roll again?" after doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RerollMode {
    /// Prompt on stdin
    Ask,
    /// Always roll again
    Always,
    /// Never roll again
    Never,
}

#[derive(Debug, Args)]
pub struct RollArgs {
    /// Action Value
    #[arg(long)]
    pub av: i32,

    /// Opposing Value
    #[arg(long)]
    pub ov: i32,

    /// Effect Value
    #[arg(long)]
    pub ev: i32,

    /// Resistance Value
    #[arg(long)]
    pub rv: i32,

    /// Hero Points spent on AV
    #[arg(long, default_value = "0")]
    pub hp_av: i32,

    /// Hero Points spent on OV
    #[arg(long, default_value = "0")]
    pub hp_ov: i32,

    /// Hero Points spent on EV
    #[arg(long, default_value = "0")]
    pub hp_ev: i32,

    /// Hero Points spent on RV
    #[arg(long, default_value = "0")]
    pub hp_rv: i32,

    /// Combat maneuver key (see `megs maneuvers`)
    #[arg(short, long)]
    pub maneuver: Option<String>,

    /// Extra result column shifts (may be negative)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub shifts: i32,

    /// The actor lacks the skill
    #[arg(long)]
    pub unskilled: bool,

    /// Label shown with the result
    #[arg(short, long, default_value = "Action")]
    pub label: String,

    /// Dice formula (must roll exactly two dice)
    #[arg(long)]
    pub formula: Option<String>,

    /// RNG seed for reproducible rolls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scripted die pairs instead of random dice, e.g. "6,6;3,4"
    #[arg(long)]
    pub dice: Option<String>,

    /// Whether to keep rolling after doubles
    #[arg(long, value_enum, default_value_t = RerollMode::Ask)]
    pub reroll: RerollMode,

    /// Tables JSON file (default: bundled tables)
    #[arg(short, long)]
    pub tables: Option<PathBuf>,

    /// Fail on out-of-bounds table lookups instead of clamping
    #[arg(long)]
    pub strict: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &RollArgs) -> Result<(), String> {
    let tables = super::load_tables(args.tables.as_deref())?;
    let maneuvers = ManeuverTable::bundled().map_err(|e| e.to_string())?;

    let mut config = ResolverConfig::default();
    if let Some(formula) = &args.formula {
        config = config.with_formula(formula.clone());
    }
    if args.strict {
        config = config.with_bounds(BoundsPolicy::Strict);
    }
    let resolver = Resolver::new(&tables, &maneuvers, config).map_err(|e| e.to_string())?;

    let dice: Box<dyn DiceRoller> = match (&args.dice, args.seed) {
        (Some(script), _) => Box::new(ScriptedDice::from_pairs(parse_dice_script(script)?)),
        (None, Some(seed)) => Box::new(RandomDice::seeded(seed)),
        (None, None) => Box::new(RandomDice::from_os()),
    };
    let confirm: Box<dyn RerollConfirmer> = match args.reroll {
        RerollMode::Ask => Box::new(StdinConfirm::new()),
        RerollMode::Always => Box::new(AlwaysReroll),
        RerollMode::Never => Box::new(NeverReroll),
    };

    let result = resolver
        .resolve(&build_request(args), dice.as_ref(), confirm.as_ref())
        .await
        .map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_result(&result);
    }

    Ok(())
}

fn build_request(args: &RollArgs) -> ResolveRequest {
    let roll = RollValues::new(args.label.clone(), args.av, args.ov, args.ev, args.rv)
        .with_unskilled(args.unskilled);
    let mut request = ResolveRequest::new(roll)
        .with_hero_points(HeroPointSpend {
            av: args.hp_av,
            ov: args.hp_ov,
            ev: args.hp_ev,
            rv: args.hp_rv,
        })
        .with_extra_shifts(args.shifts);
    if let Some(maneuver) = &args.maneuver {
        request = request.with_maneuver(maneuver.clone());
    }
    request
}

/// Parse `"a,b;c,d"` into die pairs.
fn parse_dice_script(script: &str) -> Result<Vec<(u32, u32)>, String> {
    script
        .split(';')
        .map(|pair| {
            let (a, b) = pair
                .split_once(',')
                .ok_or_else(|| format!("invalid --dice pair '{pair}', expected 'a,b'"))?;
            let parse = |s: &str| {
                s.trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid --dice value '{}'", s.trim()))
            };
            Ok((parse(a)?, parse(b)?))
        })
        .collect()
}

/// Asks the player on stdin. End of input counts as "no".
struct StdinConfirm {
    input: Mutex<BufReader<Stdin>>,
}

impl StdinConfirm {
    fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

#[async_trait]
impl RerollConfirmer for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = tokio::io::stderr();
        let question = format!("{prompt} [y/N] ");
        if stderr.write_all(question.as_bytes()).await.is_err() || stderr.flush().await.is_err() {
            return false;
        }

        let mut line = String::new();
        match self.input.lock().await.read_line(&mut line).await {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read reroll answer");
                false
            }
        }
    }
}

fn print_result(result: &ResultData) {
    let headline = match result.outcome {
        OutcomeKind::Success | OutcomeKind::AllResult => result.outcome.to_string().green(),
        OutcomeKind::NoEffect => result.outcome.to_string().yellow(),
        OutcomeKind::Failure | OutcomeKind::DoubleOnes => result.outcome.to_string().red(),
    };
    println!("  {} {}", headline.bold(), result.label.dimmed());
    println!();

    let dice = result
        .dice
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" + ");
    let raps = result
        .effect
        .map(|e| e.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "AV", "OV", "EV", "RV", "Success #", "Dice", "Total", "Shifts", "RAPs",
    ]);
    table.add_row(vec![
        result.action_value.to_string(),
        result.opposing_value.to_string(),
        result.effect_value.to_string(),
        result.resistance_value.to_string(),
        result.difficulty.to_string(),
        dice,
        result.roll_total.to_string(),
        result.column_shifts.to_string(),
        raps,
    ]);

    println!("{table}");
    if result.rerolls > 0 {
        println!();
        println!("  {} after {} reroll(s)", "Doubles".bold(), result.rerolls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_script() {
        assert_eq!(
            parse_dice_script("2,2;3, 4").unwrap(),
            vec![(2, 2), (3, 4)]
        );
        assert!(parse_dice_script("2").is_err());
        assert!(parse_dice_script("2,x").is_err());
        assert!(parse_dice_script("").is_err());
    }
}
