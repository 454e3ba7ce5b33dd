use crate::model::Category;

const DEPOSIT_KEYWORDS: &[&str] = &["deposit", "cash in", "add"];
const WITHDRAWAL_KEYWORDS: &[&str] = &["withdraw", "cash out"];

/// Classify free-text transaction type into a category.
///
/// Deposit keywords are checked before withdrawal keywords, so text matching
/// both (e.g. "withdraw deposit") is a deposit.
pub fn classify(type_text: &str) -> Category {
    let text = type_text.to_lowercase();

    if DEPOSIT_KEYWORDS.iter().any(|k| text.contains(k)) {
        Category::Deposit
    } else if WITHDRAWAL_KEYWORDS.iter().any(|k| text.contains(k)) {
        Category::Withdrawal
    } else {
        Category::Other
    }
}
