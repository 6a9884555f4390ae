//! Single-answer quizzes: one click grades and locks the quiz.

use serde::{Deserialize, Serialize};

pub const CORRECT_MESSAGE: &str = "正解です！よくできました。";
pub const INCORRECT_MESSAGE: &str = "残念！もう一度考えてみましょう。";

/// Visual mark on a quiz option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Unmarked,
    Correct,
    Incorrect,
}

impl Mark {
    /// CSS class applied to the option element, if any.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Unmarked => None,
            Self::Correct => Some("correct"),
            Self::Incorrect => Some("incorrect"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => CORRECT_MESSAGE,
            Self::Incorrect => INCORRECT_MESSAGE,
        }
    }

    /// Full class attribute for the feedback element.
    pub fn feedback_class(self) -> &'static str {
        match self {
            Self::Correct => "quiz-feedback correct",
            Self::Incorrect => "quiz-feedback incorrect",
        }
    }
}

/// What the view must show after a graded click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grading {
    pub verdict: Verdict,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    answers: Vec<bool>,
    marks: Vec<Mark>,
    verdict: Option<Verdict>,
}

impl Quiz {
    /// `answers[i]` says whether option `i` is a correct answer.
    pub fn new(answers: Vec<bool>) -> Self {
        let marks = vec![Mark::Unmarked; answers.len()];
        Self {
            answers,
            marks,
            verdict: None,
        }
    }

    pub fn option_count(&self) -> usize {
        self.answers.len()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Once graded, further clicks are ignored.
    pub fn is_locked(&self) -> bool {
        self.verdict.is_some()
    }

    /// Grades a click on `option`.
    ///
    /// Every correct option is revealed; the clicked option is marked
    /// incorrect if it was wrong. Returns `None` when the quiz is already
    /// locked or the option does not exist.
    pub fn select(&mut self, option: usize) -> Option<Grading> {
        if self.is_locked() {
            return None;
        }
        let chosen_correct = *self.answers.get(option)?;
        for (mark, &correct) in self.marks.iter_mut().zip(&self.answers) {
            if correct {
                *mark = Mark::Correct;
            }
        }
        let verdict = if chosen_correct {
            Verdict::Correct
        } else {
            self.marks[option] = Mark::Incorrect;
            Verdict::Incorrect
        };
        self.verdict = Some(verdict);
        Some(Grading {
            verdict,
            marks: self.marks.clone(),
        })
    }
}
