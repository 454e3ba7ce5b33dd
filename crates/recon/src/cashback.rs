use crate::model::{CashbackSummary, RoundRecord};

/// Lower bound (inclusive) of each tier and its rate, highest first.
/// Each tier runs up to the next bound minus one; below 25 rounds there is no cashback.
const TIERS: &[(usize, f64)] = &[
    (445, 0.17),
    (410, 0.16),
    (375, 0.15),
    (340, 0.14),
    (305, 0.13),
    (270, 0.12),
    (235, 0.11),
    (200, 0.10),
    (165, 0.09),
    (130, 0.08),
    (95, 0.07),
    (60, 0.06),
    (25, 0.05),
];

pub fn percentage_for(round_count: usize) -> f64 {
    TIERS
        .iter()
        .find(|(min, _)| round_count >= *min)
        .map(|(_, pct)| *pct)
        .unwrap_or(0.0)
}

/// Cashback over real-money rounds only.
///
/// `cashback = (total_bet - total_payout) * percentage_for(eligible_rounds)`.
/// A net win yields a negative figure; it is not clamped.
pub fn compute_cashback(rounds: &[RoundRecord]) -> CashbackSummary {
    let mut summary = CashbackSummary::default();

    for round in rounds.iter().filter(|r| r.free_spin.is_cashback_eligible()) {
        summary.eligible_rounds += 1;
        summary.total_bet += round.bet;
        summary.total_payout += round.payout;
    }

    summary.net_loss = summary.total_bet - summary.total_payout;
    summary.percentage = percentage_for(summary.eligible_rounds);
    summary.cashback = summary.net_loss * summary.percentage;
    summary
}
