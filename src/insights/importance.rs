const INTENSE_WORDS: [&str; 7] = [
    "very",
    "extremely",
    "deeply",
    "profound",
    "intense",
    "significant",
    "meaningful",
];

/// A memory is important when it carries two or more emotions, or when its
/// summary uses an intensity word (case-insensitive substring match).
pub fn is_important(emotions: &[String], summary: &str) -> bool {
    if emotions.len() >= 2 {
        return true;
    }

    let summary = summary.to_lowercase();
    INTENSE_WORDS.iter().any(|word| summary.contains(word))
}
