use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use koikoi_engine::game::{MatchSummary, Phase, RoundSummary, RuleConfig};
use koikoi_engine::service::{take_provider_turn, GameState, HeuristicProvider};

// 單局最多的決策步數，防止狀態機出錯時無窮迴圈
const MAX_STEPS_PER_MATCH: usize = 10_000;

/// 內建啟發式對內建啟發式的 Koi-Koi 對局模擬
#[derive(Parser, Debug)]
#[command(name = "koikoi-sim", version, about)]
struct Args {
    /// 第一場的亂數種子，之後每場 +1
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// 對局場數
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// JSON 規則設定檔
    #[arg(long)]
    config: Option<PathBuf>,

    /// 局數上限（覆寫設定檔）
    #[arg(long)]
    max_rounds: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchRecord {
    seed: u64,
    summary: MatchSummary,
    rounds: Vec<RoundSummary>,
}

fn load_config(args: &Args) -> Result<RuleConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            RuleConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RuleConfig::default(),
    };
    if args.max_rounds.is_some() {
        config.max_rounds = args.max_rounds;
    }
    Ok(config)
}

async fn play_match(seed: u64, config: RuleConfig) -> Result<MatchRecord> {
    let mut state = GameState::new(seed, config);
    state.start_round()?;

    for _ in 0..MAX_STEPS_PER_MATCH {
        match state.phase {
            Phase::GameOver => break,
            Phase::RoundOver => state.next_round()?,
            phase => match phase.acting_side() {
                Some(side) => {
                    take_provider_turn(&mut state, side, &HeuristicProvider).await;
                }
                None => bail!("match {} stuck in phase {:?}", seed, phase),
            },
        }
    }

    let summary = match state.match_summary.clone() {
        Some(summary) => summary,
        None => state.abandon(),
    };
    Ok(MatchRecord { seed, summary, rounds: state.round_history })
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    info!("simulating {} matches from seed {} with {:?}", args.matches, args.seed, config);

    for i in 0..args.matches {
        let seed = args.seed.wrapping_add(i as u64);
        let record = play_match(seed, config.clone()).await?;
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
