use std::path::PathBuf;

use roundbook_recon::columns::Role;
use roundbook_recon::config::{ReportConfig, StatusFilter};
use roundbook_recon::engine::generate;
use roundbook_recon::model::{PlayerReport, ReportWarning, TableKind};
use roundbook_recon::render::render;
use roundbook_recon::table::read_file;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    read_file(&fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("cannot read fixture {name}: {e}"))
}

fn run(config: &ReportConfig, rounds: &str, transactions: &str) -> PlayerReport {
    generate(config, &fixture(rounds), &fixture(transactions)).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// -------------------------------------------------------------------------
// Detailed report (default config)
// -------------------------------------------------------------------------

#[test]
fn detailed_report_totals() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");

    assert_eq!(report.player_id, "48213");
    assert_eq!(report.rounds.totals.round_count, 6);
    assert!(approx(report.rounds.totals.total_bet, 1224.0));
    assert!(approx(report.rounds.totals.total_payout, 1030.7));
    assert!(approx(report.rounds.totals.net_result, -193.3));

    assert_eq!(report.rounds.flags.real_money, 5);
    assert_eq!(report.rounds.flags.free_spin, 1);

    assert_eq!(report.financials.status_filter, StatusFilter::Completed);
    assert!(approx(report.financials.deposits, 800.0));
    assert!(approx(report.financials.withdrawals, 150.0));
    let pending = report.financials.pending.unwrap();
    assert!(approx(pending.deposits, 0.0));
    assert!(approx(pending.withdrawals, 400.0));
    assert!(report.warnings.is_empty());
}

#[test]
fn detailed_report_games_in_name_order() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");
    let names: Vec<&str> = report.rounds.games.iter().map(|g| g.game.as_str()).collect();
    assert_eq!(names, vec!["Aviator", "Fortune Tiger", "Sweet Bonanza"]);

    let aviator = &report.rounds.games[0];
    assert_eq!(aviator.round_count, 2);
    assert!(approx(aviator.total_bet, 20.0));
    assert!(approx(aviator.net_result, 5.0));

    let bonanza = &report.rounds.games[2];
    assert_eq!(bonanza.round_count, 3);
    assert!(approx(bonanza.total_payout, 5.7));
}

#[test]
fn grouping_is_lossless() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");
    let bet_sum: f64 = report.rounds.games.iter().map(|g| g.total_bet).sum();
    let count_sum: usize = report.rounds.games.iter().map(|g| g.round_count).sum();
    assert!(approx(bet_sum, report.rounds.totals.total_bet));
    assert_eq!(count_sum, report.rounds.totals.round_count);
}

#[test]
fn solvency_approvable() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");
    let v = report.solvency.unwrap();
    assert!(approx(v.completed_deposits, 800.0));
    assert!(approx(v.net_player_value, 606.7));
    assert!(approx(v.pending_withdrawals, 400.0));
    assert!(v.is_approvable);
    assert_eq!(v.shortfall, 0.0);
}

#[test]
fn solvency_shortfall() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions-shortfall.csv");
    let v = report.solvency.unwrap();
    assert!(!v.is_approvable);
    assert!(approx(v.shortfall, 93.3));
}

#[test]
fn rendered_report_layout() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");
    let text = render(&report);

    assert!(text.starts_with("RELATÓRIO DETALHADO DO JOGADOR\n"));
    assert!(text.contains("ID DO JOGADOR: 48213"));
    assert!(text.contains("Primeira jogada ....: 01/02/2026 10:00"));
    assert!(text.contains("Última jogada ......: 05/02/2026 23:59"));
    assert!(text.contains("TRANSAÇÕES FINANCEIRAS (COMPLETAS)"));
    assert!(text.contains("Depósitos ..........: R$800,00"));
    assert!(text.contains("Saques pendentes ...: R$400,00"));
    assert!(text.contains("Veredito ...........: APROVÁVEL"));
    assert!(text.contains("JOGO: Fortune Tiger"));
    assert!(text.contains("Apostado .........: R$1.200,00"));
    assert!(text.contains("Resultado ........: R$-200,00"));
    assert!(!text.contains("CASHBACK"));

    // Section order is fixed.
    let period = text.find("PERÍODO DE ATIVIDADE").unwrap();
    let financial = text.find("TRANSAÇÕES FINANCEIRAS").unwrap();
    let pending = text.find("TRANSAÇÕES PENDENTES").unwrap();
    let solvency = text.find("ANÁLISE DE SOLVÊNCIA").unwrap();
    let games = text.find("RESUMO POR JOGO").unwrap();
    assert!(period < financial && financial < pending && pending < solvency && solvency < games);

    let aviator = text.find("JOGO: Aviator").unwrap();
    let tiger = text.find("JOGO: Fortune Tiger").unwrap();
    let bonanza = text.find("JOGO: Sweet Bonanza").unwrap();
    assert!(aviator < tiger && tiger < bonanza);
}

#[test]
fn rendered_shortfall_verdict() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions-shortfall.csv");
    let text = render(&report);
    assert!(text.contains("NÃO APROVÁVEL (faltam R$93,30)"));
}

// -------------------------------------------------------------------------
// Config-driven variants
// -------------------------------------------------------------------------

#[test]
fn all_statuses_variant_from_config() {
    let config = ReportConfig::from_toml(&fixture("all-statuses.toml")).unwrap();
    let report = run(&config, "rounds.csv", "transactions-no-status.csv");

    assert_eq!(report.financials.status_filter, StatusFilter::All);
    assert!(approx(report.financials.deposits, 1000.0));
    assert!(approx(report.financials.withdrawals, 250.5));
    assert!(report.financials.completed.is_none());
    assert!(report.financials.pending.is_none());
    assert!(report.solvency.is_none());

    let cashback = report.cashback.unwrap();
    assert_eq!(cashback.eligible_rounds, 5);
    assert_eq!(cashback.percentage, 0.0);

    let text = render(&report);
    assert!(text.contains("TRANSAÇÕES FINANCEIRAS (TODAS)"));
    assert!(!text.contains("TRANSAÇÕES PENDENTES"));
    assert!(!text.contains("ANÁLISE DE SOLVÊNCIA"));
    assert!(text.contains("CASHBACK"));
}

#[test]
fn all_filter_on_status_export_counts_every_status() {
    let mut config = ReportConfig::default();
    config.report.status_filter = StatusFilter::All;
    let report = run(&config, "rounds.csv", "transactions.csv");
    // 500 + 300 completed, 100 failed
    assert!(approx(report.financials.deposits, 900.0));
    assert!(approx(report.financials.withdrawals, 550.0));
    // Solvency still uses completed deposits only.
    assert!(approx(report.solvency.unwrap().completed_deposits, 800.0));
}

#[test]
fn detailed_variant_needs_status_column() {
    let err = generate(
        &ReportConfig::default(),
        &fixture("rounds.csv"),
        &fixture("transactions-no-status.csv"),
    )
    .unwrap_err();
    // Default type keywords do not match "Tipo"; required roles fail in table order.
    assert_eq!(err.missing_role(), Some(Role::Type));
    assert!(err.to_string().starts_with("transactions table"));
}

#[test]
fn empty_rounds_still_renders() {
    let report = generate(
        &ReportConfig::default(),
        "Game;Bet;Payout\n",
        &fixture("transactions.csv"),
    )
    .unwrap();
    assert_eq!(
        report.warnings,
        vec![ReportWarning::EmptyInput { table: TableKind::Rounds }]
    );
    assert!(report.rounds.games.is_empty());

    let text = render(&report);
    assert!(text.contains("Primeira jogada ....: -"));
    assert!(text.contains("RESUMO POR JOGO"));
}

#[test]
fn report_serializes_to_json() {
    let report = run(&ReportConfig::default(), "rounds.csv", "transactions.csv");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["player_id"], "48213");
    assert_eq!(json["financials"]["status_filter"], "completed");
    assert_eq!(json["rounds"]["games"].as_array().unwrap().len(), 3);
    assert_eq!(json["solvency"]["is_approvable"], true);
    assert!(json.get("cashback").is_none());
}
