use std::collections::BTreeMap;

use crate::model::{
    ActivityWindow, FlagCounts, FreeSpinFlag, GameSummary, RoundRecord, RoundTotals, RoundsSummary,
};

/// Group rounds by game name, sum bets/payouts, and track the activity window.
///
/// The game name is used verbatim (case-sensitive, untrimmed). Groups come
/// out ordered by game name.
pub fn aggregate_rounds(rounds: &[RoundRecord]) -> RoundsSummary {
    let mut groups: BTreeMap<&str, (usize, f64, f64)> = BTreeMap::new();
    let mut window = ActivityWindow::default();
    let mut flags = FlagCounts::default();

    for round in rounds {
        let entry = groups.entry(round.game.as_str()).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += round.bet;
        entry.2 += round.payout;

        if let Some(ts) = round.timestamp {
            window.first = Some(window.first.map_or(ts, |f| f.min(ts)));
            window.last = Some(window.last.map_or(ts, |l| l.max(ts)));
        }

        match round.free_spin {
            FreeSpinFlag::RealMoney => flags.real_money += 1,
            FreeSpinFlag::FreeSpin => flags.free_spin += 1,
            FreeSpinFlag::Unknown => flags.unknown += 1,
        }
    }

    let games: Vec<GameSummary> = groups
        .into_iter()
        .map(|(game, (count, bet, payout))| GameSummary {
            game: game.to_string(),
            round_count: count,
            total_bet: bet,
            total_payout: payout,
            net_result: payout - bet,
        })
        .collect();

    let mut totals = RoundTotals::default();
    for g in &games {
        totals.round_count += g.round_count;
        totals.total_bet += g.total_bet;
        totals.total_payout += g.total_payout;
    }
    totals.net_result = totals.total_payout - totals.total_bet;

    RoundsSummary {
        window,
        games,
        totals,
        flags,
    }
}
