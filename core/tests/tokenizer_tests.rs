use boolsearch_core::tokenizer::{Normalizer, SnowballPreprocessor};

#[test]
fn it_normalizes_and_stems() {
    let n = Normalizer::default();
    let words = n.normalize("Le CHAPEAU et le pardessus, sur le cou !");
    assert_eq!(words, vec!["chapeau", "pardessus", "cou"]);
}

#[test]
fn it_filters_stopwords() {
    let n = Normalizer::new(SnowballPreprocessor::new(false));
    let words = n.normalize("Il était une fois dans un autobus");
    assert_eq!(words, vec!["fois", "autobus"]);
}

#[test]
fn it_drops_elided_and_numbered_tokens() {
    let n = Normalizer::new(SnowballPreprocessor::new(false));
    let words = n.normalize("l’autobus S 84, «vers» midi");
    assert_eq!(words, vec!["vers", "midi"]);
}

#[test]
fn normalization_is_idempotent_across_calls() {
    let n = Normalizer::default();
    let text = "Dans l'autobus, un jeune homme au long cou portait un chapeau mou.";
    assert_eq!(n.normalize(text), n.normalize(text));
}

#[test]
fn decomposed_accents_are_alphabetic() {
    let n = Normalizer::new(SnowballPreprocessor::new(false));
    // "ampoulé" with a combining acute accent
    let words = n.normalize("ampoule\u{301}");
    assert_eq!(words, vec!["ampoulé"]);
}
