// Plaintext report rendering. Section order is fixed so reports diff cleanly.

use chrono::NaiveDateTime;

use crate::config::StatusFilter;
use crate::model::{CashbackSummary, FinancialSummary, PlayerReport, SolvencyVerdict};

const RULE_HEAVY: &str = "==================================================";
const RULE_LIGHT: &str = "--------------------------------------------------";

/// Brazilian Real: `R$`, `.` thousands, `,` decimals, always two decimals.
///
/// `1234.5` → `R$1.234,50`, `-5.0` → `R$-5,00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("R${sign}{grouped},{frac_part}")
}

/// `DD/MM/YYYY HH:MM`, or `-` when absent.
pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn format_percentage(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

fn section(out: &mut String, title: &str, rule: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(rule);
    out.push('\n');
}

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn headline_title(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "TRANSAÇÕES FINANCEIRAS (TODAS)",
        StatusFilter::Completed => "TRANSAÇÕES FINANCEIRAS (COMPLETAS)",
        StatusFilter::ManualApproveRequired => "TRANSAÇÕES FINANCEIRAS (MANUAL APPROVE REQUIRED)",
    }
}

fn render_financials(out: &mut String, fin: &FinancialSummary) {
    section(out, headline_title(fin.status_filter), RULE_LIGHT);
    line(out, "Depósitos ..........", &format_currency(fin.deposits));
    line(out, "Saques .............", &format_currency(fin.withdrawals));

    if let Some(pending) = fin.pending {
        section(out, "TRANSAÇÕES PENDENTES (MANUAL APPROVE REQUIRED)", RULE_LIGHT);
        line(out, "Depósitos pendentes ", &format_currency(pending.deposits));
        line(out, "Saques pendentes ...", &format_currency(pending.withdrawals));
    }
}

fn render_solvency(out: &mut String, v: &SolvencyVerdict) {
    section(out, "ANÁLISE DE SOLVÊNCIA", RULE_LIGHT);
    line(out, "Depósitos completos ", &format_currency(v.completed_deposits));
    line(out, "Resultado em jogos .", &format_currency(v.game_net_result));
    line(out, "Valor líquido ......", &format_currency(v.net_player_value));
    line(out, "Saques pendentes ...", &format_currency(v.pending_withdrawals));
    let verdict = if v.is_approvable {
        "APROVÁVEL".to_string()
    } else {
        format!("NÃO APROVÁVEL (faltam {})", format_currency(v.shortfall))
    };
    line(out, "Veredito ...........", &verdict);
}

fn render_cashback_lines(out: &mut String, c: &CashbackSummary) {
    line(out, "Rodadas elegíveis ..", &c.eligible_rounds.to_string());
    line(out, "Apostado ...........", &format_currency(c.total_bet));
    line(out, "Payout .............", &format_currency(c.total_payout));
    line(out, "Perda líquida ......", &format_currency(c.net_loss));
    line(out, "Percentual .........", &format_percentage(c.percentage));
    line(out, "Cashback ...........", &format_currency(c.cashback));
}

/// Render the full player report.
pub fn render(report: &PlayerReport) -> String {
    let mut out = String::new();

    out.push_str("RELATÓRIO DETALHADO DO JOGADOR\n");
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");
    line(&mut out, "ID DO JOGADOR", &report.player_id);

    let rounds = &report.rounds;
    section(&mut out, "PERÍODO DE ATIVIDADE", RULE_LIGHT);
    line(&mut out, "Primeira jogada ....", &format_datetime(rounds.window.first));
    line(&mut out, "Última jogada ......", &format_datetime(rounds.window.last));
    line(&mut out, "Rodadas totais .....", &rounds.totals.round_count.to_string());
    line(&mut out, "Rodadas reais ......", &rounds.flags.real_money.to_string());
    line(&mut out, "Rodadas free spin ..", &rounds.flags.free_spin.to_string());
    if rounds.flags.unknown > 0 {
        line(&mut out, "Rodadas sem flag ...", &rounds.flags.unknown.to_string());
    }

    render_financials(&mut out, &report.financials);

    if let Some(ref verdict) = report.solvency {
        render_solvency(&mut out, verdict);
    }

    if let Some(ref cashback) = report.cashback {
        section(&mut out, "CASHBACK", RULE_LIGHT);
        render_cashback_lines(&mut out, cashback);
    }

    section(&mut out, "RESUMO POR JOGO", RULE_HEAVY);
    for game in &rounds.games {
        section(&mut out, &format!("JOGO: {}", game.game), RULE_LIGHT);
        line(&mut out, "Rodadas ..........", &game.round_count.to_string());
        line(&mut out, "Apostado .........", &format_currency(game.total_bet));
        line(&mut out, "Payout ...........", &format_currency(game.total_payout));
        line(&mut out, "Resultado ........", &format_currency(game.net_result));
    }

    section(&mut out, "TOTAL", RULE_LIGHT);
    line(&mut out, "Apostado .........", &format_currency(rounds.totals.total_bet));
    line(&mut out, "Payout ...........", &format_currency(rounds.totals.total_payout));
    line(&mut out, "Resultado ........", &format_currency(rounds.totals.net_result));

    out
}

/// Standalone cashback statement.
pub fn render_cashback(player_id: &str, cashback: &CashbackSummary) -> String {
    let mut out = String::new();
    out.push_str("CASHBACK DO JOGADOR\n");
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");
    line(&mut out, "ID DO JOGADOR", player_id);
    out.push('\n');
    render_cashback_lines(&mut out, cashback);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn currency_basic() {
        assert_eq!(format_currency(1234.5), "R$1.234,50");
        assert_eq!(format_currency(-5.0), "R$-5,00");
        assert_eq!(format_currency(0.0), "R$0,00");
        assert_eq!(format_currency(999.999), "R$1.000,00");
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(12.0), "R$12,00");
        assert_eq!(format_currency(123456.78), "R$123.456,78");
        assert_eq!(format_currency(1234567.0), "R$1.234.567,00");
        assert_eq!(format_currency(-1234567.891), "R$-1.234.567,89");
    }

    #[test]
    fn datetime_format() {
        let dt = NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(format_datetime(Some(dt)), "04/03/2026 07:05");
        assert_eq!(format_datetime(None), "-");
    }

    #[test]
    fn percentage_format() {
        assert_eq!(format_percentage(0.05), "5%");
        assert_eq!(format_percentage(0.17), "17%");
        assert_eq!(format_percentage(0.0), "0%");
    }

    #[test]
    fn cashback_statement() {
        let c = CashbackSummary {
            eligible_rounds: 60,
            total_bet: 120.0,
            total_payout: 60.0,
            net_loss: 60.0,
            percentage: 0.06,
            cashback: 3.6,
        };
        let text = render_cashback("P-1", &c);
        assert!(text.contains("ID DO JOGADOR: P-1"));
        assert!(text.contains("Percentual .........: 6%"));
        assert!(text.contains("Cashback ...........: R$3,60"));
    }
}
