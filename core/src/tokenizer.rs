/// Tokenize text into lowercase terms split on Unicode whitespace.
///
/// No stemming and no stopword removal: every whitespace-separated word is a term,
/// punctuation included.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
