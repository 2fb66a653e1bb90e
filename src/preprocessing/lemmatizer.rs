use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

lazy_static! {
    /// Irregular plural nouns and their base forms
    static ref EXCEPTIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "people"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("oxen", "ox"),
        ("dice", "die"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "datum"),
        ("media", "medium"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("hypotheses", "hypothesis"),
        ("diagnoses", "diagnosis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("lives", "life"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
        ("calves", "calf"),
        ("selves", "self"),
        ("cacti", "cactus"),
        ("fungi", "fungus"),
        ("nuclei", "nucleus"),
        ("alumni", "alumnus"),
        ("stimuli", "stimulus"),
        ("buses", "bus"),
        ("gases", "gas"),
        ("heroes", "hero"),
        ("potatoes", "potato"),
        ("tomatoes", "tomato"),
        ("echoes", "echo"),
        ("vetoes", "veto"),
    ]);

    /// Words that end like a plural but are already in base form
    static ref INVARIANT: HashSet<&'static str> = HashSet::from([
        "news", "series", "species", "means", "physics", "economics", "politics", "mathematics",
        "ethics", "athletics", "gymnastics", "measles", "chess", "lens", "specimen", "abdomen",
        "omen", "stamen", "regimen", "semen", "acumen", "always", "perhaps", "whereas",
        "towards", "afterwards", "sometimes", "thus", "yes", "this", "was", "has", "does",
        "plus", "bonus", "campus", "census", "corpus", "status", "virus", "gas", "bias", "atlas",
    ]);
}

/// Suffix rewrites for regular plural nouns, tried in order
static SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("men", "man"),
    ("ies", "y"),
];

/// Suffixes that never lose their trailing `s`
static KEEP_S: &[&str] = &["ss", "us", "is", "ous"];

/// Rule-based plural stripping: a small table of irregular plurals and invariant words, then
/// suffix rules. Words no rule covers are left as they are; there is no full lexicon behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Creates a new lemmatizer
    pub fn new() -> Self {
        Self
    }

    /// Return the base form of a lowercase word
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = EXCEPTIONS.get(word) {
            return (*lemma).to_string();
        }

        if INVARIANT.contains(word) {
            return word.to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            // The stem left behind must keep at least two characters
            if word.len() > suffix.len() + 1 {
                if let Some(stem) = word.strip_suffix(suffix) {
                    return format!("{stem}{replacement}");
                }
            }
        }

        if word.len() > 3 && word.ends_with('s') && !KEEP_S.iter().any(|s| word.ends_with(s)) {
            return word[..word.len() - 1].to_string();
        }

        word.to_string()
    }
}
