use std::collections::HashSet;

use wordwise_types::Difficulty;

/// Difficulty classifier backed by embedded frequency lists
#[derive(Clone, Default)]
pub struct WordFrequency {
    common: HashSet<String>,
    intermediate: HashSet<String>,
}

impl WordFrequency {
    /// Create empty lists; everything classifies as advanced
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with embedded high-frequency English words
    pub fn with_defaults() -> Self {
        let common = [
            "the", "be", "to", "of", "and", "a", "in", "that", "have", "it",
            "for", "not", "on", "with", "he", "as", "you", "do", "at", "this",
            "but", "his", "by", "from", "they", "we", "say", "her", "she", "or",
            "an", "will", "my", "one", "all", "would", "there", "their", "what", "so",
            "up", "out", "if", "about", "who", "get", "which", "go", "me", "when",
            "make", "can", "like", "time", "no", "just", "him", "know", "take", "people",
            "into", "year", "your", "good", "some", "could", "them", "see", "other", "than",
            "then", "now", "look", "only", "come", "its", "over", "think", "also", "back",
            "after", "use", "two", "how", "our", "work", "first", "well", "way", "even",
            "new", "want", "because", "any", "these", "give", "day", "most", "us", "hello",
            "house", "water", "word", "book", "friend", "happy", "school", "world", "small", "big",
        ];

        let intermediate = [
            "abandon", "accurate", "achieve", "acquire", "adequate", "adjacent", "advocate",
            "allocate", "ambiguous", "analyse", "anticipate", "apparent", "arbitrary", "assess",
            "assume", "attribute", "coherent", "coincide", "compatible", "compile", "comprehensive",
            "concept", "conclude", "consequence", "considerable", "consistent", "constitute",
            "contradict", "contrary", "convince", "crucial", "deduce", "demonstrate", "derive",
            "diligent", "distinct", "diverse", "dominant", "eliminate", "emerge", "emphasis",
            "empirical", "enhance", "evident", "explicit", "facilitate", "fluctuate", "fundamental",
            "hypothesis", "implicit", "inevitable", "inherent", "integrity", "interpret", "intrinsic",
            "justify", "notion", "obvious", "persist", "phenomenon", "plausible", "precise",
            "predominant", "presume", "resilient", "rigid", "subsequent", "sufficient", "tedious",
            "tentative", "ubiquitous", "valid", "versatile", "vivid", "widespread",
        ];

        Self {
            common: common.iter().map(|w| w.to_string()).collect(),
            intermediate: intermediate.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn classify(&self, word: &str) -> Difficulty {
        let word = word.to_lowercase();
        if self.common.contains(&word) {
            Difficulty::Common
        } else if self.intermediate.contains(&word) {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let frequency = WordFrequency::with_defaults();
        assert_eq!(frequency.classify("Water"), Difficulty::Common);
        assert_eq!(frequency.classify("ubiquitous"), Difficulty::Intermediate);
        assert_eq!(frequency.classify("perspicacious"), Difficulty::Advanced);
        assert_eq!(WordFrequency::new().classify("water"), Difficulty::Advanced);
    }
}
