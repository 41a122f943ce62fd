use rand::Rng;
use rand::seq::{SliceRandom, index};
use regex::RegexBuilder;
use wordwise_types::{Answer, Question, QuizOption, QuizType, VocabularyEntry};

use crate::error::CoreError;

/// Entries needed for one correct answer and three distractors
pub const MIN_POOL: usize = 4;
/// Marker substituted for the target word in fill-in-the-blank sentences
pub const BLANK: &str = "______";

/// Build one question of the requested type from the vocabulary pool.
///
/// Entries without a word or definition are ignored. Fill-in-the-blank needs
/// four entries with an example sentence and degrades to a definition question
/// otherwise.
pub fn generate<R>(
    pool: &[VocabularyEntry],
    quiz_type: QuizType,
    rng: &mut R,
) -> Result<Question, CoreError>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&VocabularyEntry> = pool
        .iter()
        .filter(|e| !e.word.trim().is_empty() && !e.definition.trim().is_empty())
        .collect();

    if candidates.len() < MIN_POOL {
        return Err(CoreError::InsufficientPool {
            required: MIN_POOL,
            available: candidates.len(),
        });
    }

    if quiz_type == QuizType::FillBlank {
        let with_examples: Vec<&VocabularyEntry> = candidates
            .iter()
            .copied()
            .filter(|e| e.examples.first().is_some_and(|ex| !ex.trim().is_empty()))
            .collect();

        if with_examples.len() >= MIN_POOL {
            let (correct, distractors) = draw(&with_examples, rng);
            return Ok(fill_blank(correct, &distractors, rng));
        }
        return Ok(definition(&candidates, rng));
    }

    Ok(match quiz_type {
        QuizType::Reverse => {
            let (correct, distractors) = draw(&candidates, rng);
            let options = shuffled_options(
                correct.word.clone(),
                distractors.iter().map(|e| e.word.clone()),
                rng,
            );
            Question {
                quiz_type: QuizType::Reverse,
                prompt: "Which word matches this definition?".to_string(),
                clue: correct.definition.clone(),
                word: correct.word.clone(),
                phonetic: None,
                audio_ref: None,
                difficulty: correct.difficulty,
                options,
                answer: correct.word.clone(),
            }
        }
        QuizType::Spelling => {
            let (correct, _) = draw(&candidates, rng);
            Question {
                quiz_type: QuizType::Spelling,
                prompt: "Listen and type the word:".to_string(),
                clue: correct.definition.clone(),
                word: correct.word.clone(),
                phonetic: non_empty(&correct.phonetic),
                audio_ref: correct.audio_ref.clone(),
                difficulty: correct.difficulty,
                options: Vec::new(),
                answer: correct.word.clone(),
            }
        }
        QuizType::Definition | QuizType::FillBlank => definition(&candidates, rng),
    })
}

/// Grade a reply. Spelling compares trimmed text case-insensitively, every
/// other type reads the chosen option's correctness flag.
pub fn check_answer(question: &Question, answer: &Answer) -> bool {
    match (question.quiz_type, answer) {
        (QuizType::Spelling, Answer::Spelling(text)) => {
            text.trim().to_lowercase() == question.answer.trim().to_lowercase()
        }
        (QuizType::Spelling, Answer::Option(_)) => false,
        (_, Answer::Option(index)) => question.options.get(*index).is_some_and(|o| o.is_correct),
        (_, Answer::Spelling(_)) => false,
    }
}

/// Replace every case-insensitive occurrence of `word` in `sentence` with [`BLANK`].
///
/// Occurrences inside longer words are replaced too.
pub fn blank_out(sentence: &str, word: &str) -> String {
    if word.is_empty() {
        return sentence.to_string();
    }

    match RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(sentence, BLANK).into_owned(),
        Err(_) => sentence.to_string(),
    }
}

fn definition<R>(candidates: &[&VocabularyEntry], rng: &mut R) -> Question
where
    R: Rng + ?Sized,
{
    let (correct, distractors) = draw(candidates, rng);
    let options = shuffled_options(
        correct.definition.clone(),
        distractors.iter().map(|e| e.definition.clone()),
        rng,
    );

    Question {
        quiz_type: QuizType::Definition,
        prompt: "What does this word mean?".to_string(),
        clue: correct.word.clone(),
        word: correct.word.clone(),
        phonetic: non_empty(&correct.phonetic),
        audio_ref: None,
        difficulty: correct.difficulty,
        options,
        answer: correct.definition.clone(),
    }
}

fn fill_blank<R>(correct: &VocabularyEntry, distractors: &[&VocabularyEntry], rng: &mut R) -> Question
where
    R: Rng + ?Sized,
{
    let sentence = correct.examples.first().map(String::as_str).unwrap_or_default();
    let options = shuffled_options(
        correct.word.clone(),
        distractors.iter().map(|e| e.word.clone()),
        rng,
    );

    Question {
        quiz_type: QuizType::FillBlank,
        prompt: "Fill in the blank:".to_string(),
        clue: blank_out(sentence, &correct.word),
        word: correct.word.clone(),
        phonetic: None,
        audio_ref: None,
        difficulty: correct.difficulty,
        options,
        answer: correct.word.clone(),
    }
}

/// One correct entry and three distinct distractors, sampled without replacement.
/// Callers guarantee `candidates.len() >= MIN_POOL`.
fn draw<'a, R>(
    candidates: &[&'a VocabularyEntry],
    rng: &mut R,
) -> (&'a VocabularyEntry, Vec<&'a VocabularyEntry>)
where
    R: Rng + ?Sized,
{
    let picked: Vec<&VocabularyEntry> = index::sample(rng, candidates.len(), MIN_POOL)
        .into_iter()
        .map(|i| candidates[i])
        .collect();

    (picked[0], picked[1..].to_vec())
}

fn shuffled_options<R>(
    correct: String,
    distractors: impl Iterator<Item = String>,
    rng: &mut R,
) -> Vec<QuizOption>
where
    R: Rng + ?Sized,
{
    let mut options: Vec<QuizOption> = std::iter::once(QuizOption {
        text: correct,
        is_correct: true,
    })
    .chain(distractors.map(|text| QuizOption {
        text,
        is_correct: false,
    }))
    .collect();

    options.shuffle(rng);
    options
}

fn non_empty(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn entry(word: &str, example: Option<&str>) -> VocabularyEntry {
        let mut e = VocabularyEntry::new(word, Utc::now());
        e.definition = format!("definition of {word}");
        e.phonetic = format!("/{word}/");
        e.examples = example.map(|s| vec![s.to_string()]).unwrap_or_default();
        e
    }

    fn pool(words: &[&str]) -> Vec<VocabularyEntry> {
        words.iter().map(|w| entry(w, None)).collect()
    }

    #[test]
    fn test_definition_question_shape() {
        let pool = pool(&["alpha", "bravo", "charlie", "delta", "echo"]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let q = generate(&pool, QuizType::Definition, &mut rng).unwrap();

            assert_eq!(q.quiz_type, QuizType::Definition);
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);

            let correct = q.options.iter().find(|o| o.is_correct).unwrap();
            let source = pool.iter().find(|e| e.word == q.word).unwrap();
            assert_eq!(correct.text, source.definition);
            assert_eq!(q.clue, q.word);
            assert_eq!(q.answer, source.definition);

            let mut texts: Vec<&str> = q.options.iter().map(|o| o.text.as_str()).collect();
            texts.sort_unstable();
            texts.dedup();
            assert_eq!(texts.len(), 4, "distractors must be distinct");
        }
    }

    #[test]
    fn test_reverse_question_offers_words() {
        let pool = pool(&["alpha", "bravo", "charlie", "delta"]);
        let mut rng = StdRng::seed_from_u64(11);
        let q = generate(&pool, QuizType::Reverse, &mut rng).unwrap();

        let correct = q.options.iter().find(|o| o.is_correct).unwrap();
        assert_eq!(correct.text, q.word);
        assert_eq!(q.clue, format!("definition of {}", q.word));
        assert!(q.options.iter().all(|o| pool.iter().any(|e| e.word == o.text)));
    }

    #[test]
    fn test_fill_blank_uses_example() {
        let pool = vec![
            entry("alpha", Some("Alpha comes first; alpha always does.")),
            entry("bravo", Some("Bravo, well done.")),
            entry("charlie", Some("Ask Charlie.")),
            entry("delta", Some("The river delta.")),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let q = generate(&pool, QuizType::FillBlank, &mut rng).unwrap();

        assert_eq!(q.quiz_type, QuizType::FillBlank);
        assert!(q.clue.contains(BLANK));
        assert!(!q.clue.to_lowercase().contains(&q.word));
        assert_eq!(q.options.len(), 4);
    }

    #[test]
    fn test_fill_blank_falls_back_to_definition() {
        let mut pool = pool(&["alpha", "bravo", "charlie", "delta"]);
        pool[0].examples = vec!["alpha example".to_string()];
        let mut rng = StdRng::seed_from_u64(5);

        let q = generate(&pool, QuizType::FillBlank, &mut rng).unwrap();
        assert_eq!(q.quiz_type, QuizType::Definition);
    }

    #[test]
    fn test_spelling_question_has_no_options() {
        let mut pool = pool(&["alpha", "bravo", "charlie", "delta"]);
        for e in &mut pool {
            e.audio_ref = Some(format!("https://audio/{}.mp3", e.word));
        }
        let mut rng = StdRng::seed_from_u64(2);
        let q = generate(&pool, QuizType::Spelling, &mut rng).unwrap();

        assert!(q.options.is_empty());
        assert_eq!(q.answer, q.word);
        assert_eq!(q.audio_ref, Some(format!("https://audio/{}.mp3", q.word)));
        assert!(check_answer(&q, &Answer::Spelling(format!("  {} ", q.word.to_uppercase()))));
        assert!(!check_answer(&q, &Answer::Spelling("zulu".to_string())));
        assert!(!check_answer(&q, &Answer::Option(0)));
    }

    #[test]
    fn test_check_option_answers() {
        let pool = pool(&["alpha", "bravo", "charlie", "delta"]);
        let mut rng = StdRng::seed_from_u64(9);
        let q = generate(&pool, QuizType::Definition, &mut rng).unwrap();

        let right = q.options.iter().position(|o| o.is_correct).unwrap();
        let wrong = (right + 1) % q.options.len();
        assert!(check_answer(&q, &Answer::Option(right)));
        assert!(!check_answer(&q, &Answer::Option(wrong)));
        assert!(!check_answer(&q, &Answer::Option(99)));
    }

    #[test]
    fn test_three_words_is_not_enough() {
        let pool = pool(&["alpha", "bravo", "charlie"]);
        let mut rng = StdRng::seed_from_u64(0);

        for quiz_type in [
            QuizType::Definition,
            QuizType::Reverse,
            QuizType::FillBlank,
            QuizType::Spelling,
        ] {
            assert_eq!(
                generate(&pool, quiz_type, &mut rng).unwrap_err(),
                CoreError::InsufficientPool {
                    required: 4,
                    available: 3
                }
            );
        }
    }

    #[test]
    fn test_entries_without_definition_are_skipped() {
        let mut pool = pool(&["alpha", "bravo", "charlie", "delta"]);
        pool[3].definition.clear();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            generate(&pool, QuizType::Definition, &mut rng),
            Err(CoreError::InsufficientPool { available: 3, .. })
        ));
    }

    #[test]
    fn test_same_seed_same_question() {
        let pool = pool(&["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"]);
        let a = generate(&pool, QuizType::Reverse, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&pool, QuizType::Reverse, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_out_is_case_insensitive() {
        assert_eq!(
            blank_out("Run! RUN while you can run.", "run"),
            "______! ______ while you can ______."
        );
        assert_eq!(blank_out("a+b", "a+b"), BLANK);
        // substring occurrences are blanked as well
        assert_eq!(blank_out("cater to the cat", "cat"), "______er to the ______");
    }
}
