pub const NEUTRAL: &str = "😐";

const EMOTION_EMOJI: [(&str, &str); 26] = [
    ("happy", "😄"),
    ("excited", "😄"),
    ("joy", "😄"),
    ("great", "😄"),
    ("positive", "😄"),
    ("awkward", "😬"),
    ("uncomfortable", "😬"),
    ("tense", "😬"),
    ("sad", "😢"),
    ("upset", "😢"),
    ("disappointed", "😢"),
    ("negative", "😢"),
    ("angry", "😠"),
    ("frustrated", "😠"),
    ("annoyed", "😠"),
    ("surprised", "😲"),
    ("shocked", "😲"),
    ("inspired", "✨"),
    ("motivated", "✨"),
    ("curious", "🤔"),
    ("confused", "🤔"),
    ("love", "❤️"),
    ("affection", "❤️"),
    ("miss", "💭"),
    ("nostalgia", "💭"),
    ("neutral", NEUTRAL),
];

/// First emotion (in list order) containing any table keyword decides the
/// glyph; among keywords the table order wins.
pub fn emoji_for(emotions: &[String]) -> &'static str {
    emotions
        .iter()
        .find_map(|emotion| {
            let emotion = emotion.to_lowercase();
            EMOTION_EMOJI
                .iter()
                .find(|(key, _)| emotion.contains(key))
                .map(|(_, glyph)| *glyph)
        })
        .unwrap_or(NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emotions(items: &[&str]) -> Vec<String> {
        items.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(emoji_for(&[]), "😐");
    }

    #[test]
    fn first_emotion_wins() {
        assert_eq!(emoji_for(&emotions(&["excited", "angry"])), "😄");
        assert_eq!(emoji_for(&emotions(&["angry", "excited"])), "😠");
    }

    #[test]
    fn unmatched_emotions_are_skipped() {
        assert_eq!(emoji_for(&emotions(&["calm", "Deep Nostalgia"])), "💭");
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        assert_eq!(emoji_for(&emotions(&["Very Happy"])), "😄");
        assert_eq!(emoji_for(&emotions(&["lovely"])), "❤️");
    }

    #[test]
    fn table_order_breaks_ties_within_one_emotion() {
        // contains both "sad" and "happy"; "happy" is declared first
        assert_eq!(emoji_for(&emotions(&["happy-sad"])), "😄");
        // "unhappy" still contains "happy"
        assert_eq!(emoji_for(&emotions(&["unhappy"])), "😄");
    }

    #[test]
    fn nothing_matching_is_neutral() {
        assert_eq!(emoji_for(&emotions(&["calm", "bored"])), "😐");
    }
}
