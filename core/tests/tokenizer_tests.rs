use ircore::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits_on_whitespace() {
    let words = tokenize("Running Runners RUN! The café's menu.");
    assert_eq!(words, vec!["running", "runners", "run!", "the", "café's", "menu."]);
}

#[test]
fn it_keeps_stopwords_and_does_not_stem() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(words.contains(&"the".to_string()));
    assert!(words.contains(&"and".to_string()));
    assert_eq!(words.len(), 8);
}
