//! Ladder Settlement Service
//!
//! Reads `{ bet, result }` requests as line-delimited JSON on stdin and
//! answers each with `{ status, body }` on stdout. Logs go to stderr.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ladder_settlement::{
    adapter::serve_lines,
    game::rules::{COMBO3_MULTIPLIER, LINES_MULTIPLIER, MIN_STAKE},
    settle_with_receipt, AdapterConfig, Bet, LadderBoard, LineCount, Picks, Side, VERSION,
};

fn main() -> anyhow::Result<()> {
    let config = AdapterConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Ladder Settlement v{}", VERSION);
    info!(
        "Min stake: {}, per-leg multiplier: {}x, COMBO3 multiplier: {}x",
        MIN_STAKE, LINES_MULTIPLIER, COMBO3_MULTIPLIER
    );
    info!(
        "Max request: {} bytes, receipts: {}",
        config.max_request_bytes, config.include_receipt
    );

    if config.demo {
        demo_rounds()?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stats = serve_lines(stdin.lock(), stdout.lock(), &config)?;

    info!(
        "Served {} requests ({} settled, {} rejected)",
        stats.requests, stats.settled, stats.rejected
    );
    Ok(())
}

/// Demo: reveal a few boards, settle bets on them and check receipts replay.
fn demo_rounds() -> anyhow::Result<()> {
    info!("=== Starting Demo Rounds ===");

    let boards = [
        LadderBoard::from_rows(Side::Left, &[1, 3, 5])?,
        LadderBoard::from_rows(Side::Right, &[0, 2, 4, 6])?,
        LadderBoard::from_rows(Side::Left, &[0, 1, 4, 5])?,
    ];

    let bets = [
        Bet::single(Picks::new().with_start(Side::Left), 1000),
        Bet::single(Picks::new().with_start(Side::Left).with_end(Side::Right), 1000),
        Bet::single(Picks::new().with_lines(LineCount::Four).with_end(Side::Right), 250),
        Bet::combo3(Side::Left, LineCount::Four, Side::Left, 500),
    ];

    let mut digests = Vec::new();

    for (round, board) in boards.iter().enumerate() {
        let result = board.reveal()?;
        let outcome = board.outcome()?;
        info!(
            "Round {}: start {}, {} rungs, end {}",
            round + 1,
            outcome.start,
            outcome.lines,
            outcome.end
        );

        for bet in &bets {
            let receipt = settle_with_receipt(bet, &result)?;
            let settlement = &receipt.settlement;
            info!(
                "  {:?} {:?}: win={} multiplier={}x payout={}",
                bet.bet_type.get(),
                bet.picks.prediction_entries(),
                settlement.win,
                settlement.multiplier,
                settlement.payout
            );
            digests.push(receipt.digest);
        }
    }

    // Verify determinism by settling everything again
    info!("=== Verifying Determinism ===");
    let mut replay = Vec::new();
    for board in &boards {
        let result = board.reveal()?;
        for bet in &bets {
            replay.push(settle_with_receipt(bet, &result)?.digest);
        }
    }

    if digests == replay {
        info!("DETERMINISM VERIFIED: {} receipts match!", digests.len());
    } else {
        warn!("DETERMINISM FAILURE: receipts differ!");
    }

    Ok(())
}
