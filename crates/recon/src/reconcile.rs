use crate::config::{StatusFilter, STATUS_COMPLETED, STATUS_MANUAL_APPROVE_REQUIRED};
use crate::model::{Category, CategoryTotals, FinancialSummary, SolvencyVerdict, TransactionRecord};

/// Sum amounts per category. `Other` transactions are not counted.
pub fn sum_by_category<'a>(transactions: impl IntoIterator<Item = &'a TransactionRecord>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions {
        match tx.category {
            Category::Deposit => totals.deposits += tx.amount,
            Category::Withdrawal => totals.withdrawals += tx.amount,
            Category::Other => {}
        }
    }
    totals
}

/// Split transactions into headline, completed and pending totals.
///
/// `status_known` is false when the export had no processing-status column;
/// the completed/pending buckets are then left out.
pub fn reconcile(
    transactions: &[TransactionRecord],
    status_filter: StatusFilter,
    status_known: bool,
) -> FinancialSummary {
    let headline = sum_by_category(
        transactions
            .iter()
            .filter(|tx| status_filter.admits(&tx.processing_status)),
    );

    let (completed, pending) = if status_known {
        let completed = sum_by_category(
            transactions
                .iter()
                .filter(|tx| tx.processing_status == STATUS_COMPLETED),
        );
        let pending = sum_by_category(
            transactions
                .iter()
                .filter(|tx| tx.processing_status == STATUS_MANUAL_APPROVE_REQUIRED),
        );
        (Some(completed), Some(pending))
    } else {
        (None, None)
    };

    FinancialSummary {
        status_filter,
        deposits: headline.deposits,
        withdrawals: headline.withdrawals,
        completed,
        pending,
        transaction_count: transactions.len(),
    }
}

/// Point-in-time check of whether pending withdrawals are covered.
///
/// `net_player_value = completed_deposits + game_net_result`; approvable when
/// it is `>=` the pending withdrawals. Bonuses, withdrawals already paid and
/// non-deposit/withdrawal movements are not considered.
pub fn solvency(
    completed_deposits: f64,
    game_net_result: f64,
    pending_withdrawals: f64,
) -> SolvencyVerdict {
    let net_player_value = completed_deposits + game_net_result;
    let is_approvable = net_player_value >= pending_withdrawals;
    SolvencyVerdict {
        completed_deposits,
        game_net_result,
        net_player_value,
        pending_withdrawals,
        is_approvable,
        shortfall: if is_approvable {
            0.0
        } else {
            pending_withdrawals - net_player_value
        },
    }
}
