//! Multiple-choice quiz over a saved word list.
//!
//! Questions show a word and offer its first definition among up to three
//! first definitions of other words from the same list.

use crate::error::QuizError;
use crate::lists::review_list;
use crate::logger;
use crate::models::{Question, WordEntry, WordList};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const MIN_WORDS_FOR_QUIZ: usize = 2;
pub const MAX_DISTRACTORS: usize = 3;
pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
}

/// Lists with enough words to build a question.
pub fn select_eligible_lists(lists: &[WordList]) -> Vec<WordList> {
    lists
        .iter()
        .filter(|l| l.words.len() >= MIN_WORDS_FOR_QUIZ)
        .cloned()
        .collect()
}

/// The list a new quiz starts on: the default list when eligible, otherwise
/// the first eligible one.
pub fn preferred_list(eligible: &[WordList]) -> Option<&WordList> {
    review_list(eligible, None)
}

fn first_definition(entry: &WordEntry) -> Result<String, QuizError> {
    entry
        .first_definition()
        .map(str::to_string)
        .ok_or_else(|| QuizError::MissingDefinition(entry.word.clone()))
}

/// Builds one question from `words`.
///
/// Only the first definition of each word is used. Lists of 2 or 3 words
/// produce fewer than 4 options.
pub fn generate_question<R: Rng + ?Sized>(
    words: &[WordEntry],
    rng: &mut R,
) -> Result<Question, QuizError> {
    if words.len() < MIN_WORDS_FOR_QUIZ {
        return Err(QuizError::NotEnoughWords { found: words.len() });
    }

    let correct = words
        .choose(rng)
        .ok_or(QuizError::NotEnoughWords { found: 0 })?;
    let correct_answer = first_definition(correct)?;

    let mut pool: Vec<&WordEntry> = words.iter().filter(|w| w.word != correct.word).collect();
    pool.shuffle(rng);

    let mut options = Vec::with_capacity(MAX_DISTRACTORS + 1);
    options.push(correct_answer.clone());
    for distractor in pool.into_iter().take(MAX_DISTRACTORS) {
        options.push(first_definition(distractor)?);
    }
    options.shuffle(rng);

    Ok(Question {
        word: correct.word.clone(),
        correct_answer,
        options,
        etymology: correct.etymology.clone(),
    })
}

/// Exact string comparison against the correct answer.
pub fn record_answer(question: &Question, chosen: &str) -> AnswerOutcome {
    AnswerOutcome {
        is_correct: chosen == question.correct_answer,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    /// Question shown, no answer yet.
    Asking(Question),
    /// Question answered and the correct option revealed.
    Revealed {
        question: Question,
        chosen: String,
        is_correct: bool,
    },
}

/// Per-session quiz progress. There is no end state: a session runs until the
/// caller exits it.
#[derive(Debug)]
pub struct QuizSession<R = StdRng> {
    list: Option<WordList>,
    state: QuizState,
    score: u32,
    questions_answered: u32,
    rng: R,
}

impl QuizSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic session, for reproducible question order.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for QuizSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            list: None,
            state: QuizState::NotStarted,
            score: 0,
            questions_answered: 0,
            rng,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn selected_list(&self) -> Option<&WordList> {
        self.list.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.state != QuizState::NotStarted
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            QuizState::NotStarted => None,
            QuizState::Asking(question) | QuizState::Revealed { question, .. } => Some(question),
        }
    }

    /// Switching lists starts over with zeroed counters.
    pub fn select_list(&mut self, list: WordList) {
        logger::log(&format!(
            "Quiz list selected: \"{}\" ({} words)",
            list.name,
            list.words.len()
        ));
        self.list = Some(list);
        self.reset();
    }

    /// Clears counters and the current question, keeping the selected list.
    /// Called whenever the quiz view regains focus.
    pub fn reset(&mut self) {
        self.state = QuizState::NotStarted;
        self.score = 0;
        self.questions_answered = 0;
    }

    pub fn start(&mut self) -> Result<Question, QuizError> {
        self.ask()
    }

    /// Replaces the current question, answered or not, with a fresh one.
    pub fn next_question(&mut self) -> Result<Question, QuizError> {
        self.ask()
    }

    fn ask(&mut self) -> Result<Question, QuizError> {
        let list = self.list.as_ref().ok_or(QuizError::NoListSelected)?;
        let question = generate_question(&list.words, &mut self.rng)?;
        self.state = QuizState::Asking(question.clone());
        Ok(question)
    }

    /// Records the chosen option for the open question and reveals it.
    pub fn answer(&mut self, chosen: &str) -> Result<AnswerOutcome, QuizError> {
        let question = match std::mem::replace(&mut self.state, QuizState::NotStarted) {
            QuizState::Asking(question) => question,
            other => {
                self.state = other;
                return Err(QuizError::NoOpenQuestion);
            }
        };

        let outcome = record_answer(&question, chosen);
        self.questions_answered += 1;
        if outcome.is_correct {
            self.score += POINTS_PER_CORRECT_ANSWER;
        }

        self.state = QuizState::Revealed {
            question,
            chosen: chosen.to_string(),
            is_correct: outcome.is_correct,
        };
        Ok(outcome)
    }

    /// Leaves the quiz. Counters survive until the next reset.
    pub fn exit(&mut self) {
        self.state = QuizState::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_LIST_ID, Definition};
    use chrono::Utc;

    fn entry(word: &str, definition: &str) -> WordEntry {
        WordEntry {
            id: format!("id-{}", word),
            word: word.to_string(),
            definitions: vec![Definition::new(definition)],
            etymology: Some(format!("origin of {}", word)),
            added_at: Utc::now(),
        }
    }

    fn list_with(id: &str, words: Vec<WordEntry>) -> WordList {
        let mut list = WordList::new(id, id, Utc::now());
        list.words = words;
        list
    }

    fn six_words() -> Vec<WordEntry> {
        vec![
            entry("casa", "vivienda"),
            entry("perro", "animal doméstico"),
            entry("correr", "desplazarse rápido"),
            entry("azul", "color del cielo"),
            entry("mesa", "mueble con patas"),
            entry("libro", "conjunto de hojas"),
        ]
    }

    #[test]
    fn test_select_eligible_lists() {
        let lists = vec![
            list_with("empty", vec![]),
            list_with("one", vec![entry("casa", "vivienda")]),
            list_with("two", vec![entry("casa", "vivienda"), entry("perro", "animal")]),
        ];

        let eligible = select_eligible_lists(&lists);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "two");
    }

    #[test]
    fn test_preferred_list_prefers_default() {
        let two = || vec![entry("casa", "vivienda"), entry("perro", "animal")];
        let eligible = vec![list_with("verbos", two()), list_with(DEFAULT_LIST_ID, two())];
        assert_eq!(preferred_list(&eligible).unwrap().id, DEFAULT_LIST_ID);

        let eligible = vec![list_with("verbos", two())];
        assert_eq!(preferred_list(&eligible).unwrap().id, "verbos");

        assert!(preferred_list(&[]).is_none());
    }

    #[test]
    fn test_two_words_give_two_options() {
        let words = vec![entry("casa", "vivienda"), entry("correr", "desplazarse rápido")];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = generate_question(&words, &mut rng).unwrap();

            assert_eq!(question.options.len(), 2);
            assert!(question.options.contains(&question.correct_answer));
            assert!(question.word == "casa" || question.word == "correr");
        }
    }

    #[test]
    fn test_three_words_give_three_options() {
        let words = six_words()[..3].to_vec();
        let mut rng = StdRng::seed_from_u64(7);
        let question = generate_question(&words, &mut rng).unwrap();
        assert_eq!(question.options.len(), 3);
    }

    #[test]
    fn test_many_words_give_four_distinct_options() {
        let words = six_words();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = generate_question(&words, &mut rng).unwrap();

            assert_eq!(question.options.len(), 4);
            let mut unique = question.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);

            let correct = words.iter().find(|w| w.word == question.word).unwrap();
            assert_eq!(question.correct_answer, correct.definitions[0].definition);
            assert_eq!(question.etymology, correct.etymology);
            assert!(question.options.contains(&question.correct_answer));
        }
    }

    #[test]
    fn test_same_seed_same_question() {
        let words = six_words();
        let a = generate_question(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_question(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_first_definition_is_used() {
        let mut casa = entry("casa", "vivienda");
        casa.definitions.push(Definition::new("familia o linaje"));
        let mut perro = entry("perro", "animal doméstico");
        perro.definitions.push(Definition::new("persona despreciable"));
        let words = vec![casa, perro];

        for seed in 0..20 {
            let question = generate_question(&words, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(!question.options.iter().any(|o| o == "familia o linaje"));
            assert!(!question.options.iter().any(|o| o == "persona despreciable"));
        }
    }

    #[test]
    fn test_not_enough_words() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_question(&[entry("casa", "vivienda")], &mut rng);
        assert_eq!(result, Err(QuizError::NotEnoughWords { found: 1 }));
    }

    #[test]
    fn test_missing_definition_is_reported() {
        let mut bare = entry("nada", "x");
        bare.definitions.clear();
        let mut other = entry("algo", "y");
        other.definitions.clear();

        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_question(&[bare, other], &mut rng);
        assert!(matches!(result, Err(QuizError::MissingDefinition(_))));
    }

    #[test]
    fn test_record_answer_exact_match() {
        let question = Question {
            word: "casa".to_string(),
            correct_answer: "vivienda".to_string(),
            options: vec!["vivienda".to_string(), "animal".to_string()],
            etymology: None,
        };

        assert!(record_answer(&question, "vivienda").is_correct);
        assert!(!record_answer(&question, "Vivienda").is_correct);
        assert!(!record_answer(&question, "animal").is_correct);
    }

    #[test]
    fn test_session_scores_and_counts() {
        let mut session = QuizSession::with_seed(3);
        session.select_list(list_with(DEFAULT_LIST_ID, six_words()));
        assert!(!session.is_started());

        let question = session.start().unwrap();
        assert!(session.is_started());
        let outcome = session.answer(&question.correct_answer).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(session.score(), POINTS_PER_CORRECT_ANSWER);
        assert_eq!(session.questions_answered(), 1);

        let question = session.next_question().unwrap();
        let wrong = question
            .options
            .iter()
            .find(|o| **o != question.correct_answer)
            .unwrap()
            .clone();
        let outcome = session.answer(&wrong).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(session.score(), POINTS_PER_CORRECT_ANSWER);
        assert_eq!(session.questions_answered(), 2);

        match session.state() {
            QuizState::Revealed {
                chosen, is_correct, ..
            } => {
                assert_eq!(chosen, &wrong);
                assert!(!is_correct);
            }
            other => panic!("expected revealed state, got {:?}", other),
        }
    }

    #[test]
    fn test_answer_twice_is_rejected() {
        let mut session = QuizSession::with_seed(9);
        session.select_list(list_with(DEFAULT_LIST_ID, six_words()));
        let question = session.start().unwrap();

        session.answer(&question.correct_answer).unwrap();
        let again = session.answer(&question.correct_answer);

        assert_eq!(again, Err(QuizError::NoOpenQuestion));
        assert_eq!(session.questions_answered(), 1);
        assert_eq!(session.current_question(), Some(&question));
    }

    #[test]
    fn test_answer_without_question_is_rejected() {
        let mut session = QuizSession::with_seed(9);
        assert_eq!(session.answer("vivienda"), Err(QuizError::NoOpenQuestion));
        assert_eq!(session.state(), &QuizState::NotStarted);
    }

    #[test]
    fn test_start_without_list() {
        let mut session = QuizSession::with_seed(1);
        assert_eq!(session.start(), Err(QuizError::NoListSelected));
    }

    #[test]
    fn test_switching_lists_resets_counters() {
        let mut session = QuizSession::with_seed(5);
        session.select_list(list_with(DEFAULT_LIST_ID, six_words()));
        let question = session.start().unwrap();
        session.answer(&question.correct_answer).unwrap();
        assert_eq!(session.score(), 10);

        session.select_list(list_with("verbos", six_words()[..2].to_vec()));

        assert_eq!(session.score(), 0);
        assert_eq!(session.questions_answered(), 0);
        assert_eq!(session.state(), &QuizState::NotStarted);
        assert_eq!(session.selected_list().unwrap().id, "verbos");
    }

    #[test]
    fn test_exit_keeps_counters_and_reset_clears_them() {
        let mut session = QuizSession::with_seed(11);
        session.select_list(list_with(DEFAULT_LIST_ID, six_words()));
        let question = session.start().unwrap();
        session.answer(&question.correct_answer).unwrap();

        session.exit();
        assert_eq!(session.state(), &QuizState::NotStarted);
        assert!(session.current_question().is_none());
        assert_eq!(session.score(), 10);

        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.questions_answered(), 0);
        assert!(session.selected_list().is_some());
    }
}
