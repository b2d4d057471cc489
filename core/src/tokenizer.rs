use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::Term;

lazy_static! {
    // Word runs keep inner apostrophes and hyphens (`l'homme`, `celui-ci`); punctuation runs are tokens of their own.
    static ref RE: Regex = Regex::new(r"(?u)\w+(?:['\-]\w+)*|[^\w\s]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::French);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "au","aux","avec","ce","ces","dans","de","des","du","elle","en","et","eux","il","ils","je",
            "la","le","les","leur","lui","ma","mais","me","même","mes","moi","mon","ne","nos","notre","nous",
            "on","ou","par","pas","pour","qu","que","qui","sa","se","ses","son","sur","ta","te","tes","toi",
            "ton","tu","un","une","vos","votre","vous",
            "c","d","j","l","à","m","n","s","t","y",
            "été","étée","étées","étés","étant","étante","étants","étantes",
            "suis","es","est","sommes","êtes","sont","serai","seras","sera","serons","serez","seront",
            "serais","serait","serions","seriez","seraient","étais","était","étions","étiez","étaient",
            "fus","fut","fûmes","fûtes","furent","sois","soit","soyons","soyez","soient",
            "fusse","fusses","fût","fussions","fussiez","fussent",
            "ayant","ayante","ayantes","ayants","eu","eue","eues","eus",
            "ai","as","avons","avez","ont","aurai","auras","aura","aurons","aurez","auront",
            "aurais","aurait","aurions","auriez","auraient","avais","avait","avions","aviez","avaient",
            "eut","eûmes","eûtes","eurent","aie","aies","ait","ayons","ayez","aient",
            "eusse","eusses","eût","eussions","eussiez","eussent",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Tokenization and lemmatization, the two language-specific steps of normalization.
pub trait LinguisticPreprocessor {
    /// Split text into word-level tokens, in document order.
    fn tokenize(&self, text: &str) -> Vec<String>;
    /// Map a lowercased token to its canonical form.
    fn lemmatize(&self, token: &str) -> String;
}

/// Regex segmentation plus the Snowball French stemmer.
#[derive(Debug, Clone, Copy)]
pub struct SnowballPreprocessor {
    stemming: bool,
}

impl SnowballPreprocessor {
    pub fn new(stemming: bool) -> Self { Self { stemming } }
}

impl Default for SnowballPreprocessor {
    fn default() -> Self { Self::new(true) }
}

impl LinguisticPreprocessor for SnowballPreprocessor {
    fn tokenize(&self, text: &str) -> Vec<String> {
        RE.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    fn lemmatize(&self, token: &str) -> String {
        if self.stemming { STEMMER.stem(token).into_owned() } else { token.to_string() }
    }
}

/// Fold typographic quotes to their ASCII forms before segmentation.
pub fn fold_quotes(text: &str) -> String {
    text.nfc()
        .map(|c| match c {
            '’' => '\'',
            '«' | '»' => '"',
            c => c,
        })
        .collect()
}

fn is_alphabetic_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Turns raw document text into the canonical term stream.
pub struct Normalizer {
    preprocessor: Box<dyn LinguisticPreprocessor + Send + Sync>,
}

impl Normalizer {
    pub fn new<P>(preprocessor: P) -> Self
    where
        P: LinguisticPreprocessor + Send + Sync + 'static,
    {
        Self { preprocessor: Box::new(preprocessor) }
    }

    pub fn preprocessor(&self) -> &dyn LinguisticPreprocessor { self.preprocessor.as_ref() }

    /// Quote folding, segmentation, lowercase + alphabetic filter, stopword removal, lemmatization.
    pub fn normalize(&self, raw: &str) -> Vec<Term> {
        let folded = fold_quotes(raw);
        self.preprocessor
            .tokenize(&folded)
            .into_iter()
            .map(|token| token.to_lowercase())
            .filter(|token| is_alphabetic_word(token))
            .filter(|token| !is_stopword(token))
            .map(|token| self.preprocessor.lemmatize(&token))
            .collect()
    }

    /// Bring a single query word into index form. Stopwords are kept; a word
    /// that fails the alphabetic test yields `None`.
    pub fn normalize_query_term(&self, word: &str) -> Option<Term> {
        let token = fold_quotes(word.trim()).to_lowercase();
        if !is_alphabetic_word(&token) {
            return None;
        }
        Some(self.preprocessor.lemmatize(&token))
    }
}

impl Default for Normalizer {
    fn default() -> Self { Self::new(SnowballPreprocessor::default()) }
}
