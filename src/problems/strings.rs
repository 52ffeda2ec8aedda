//! Turning a word into another one letter at a time.
//!
//! Only the first letter that differs from the target may change, one step
//! up or down a circular `A..=Z` alphabet.

use smallvec::SmallVec;
use thiserror::Error;

use crate::space::State;

pub const ALPHABET_START: u8 = b'A';
pub const ALPHABET_END: u8 = b'Z';

/// Words up to this length don't allocate.
const INLINE_LETTERS: usize = 16;

pub type Letters = SmallVec<[u8; INLINE_LETTERS]>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StringsParseError {
    #[error("Invalid letter '{ch}' at {index}. Only 'A' to 'Z' are allowed.")]
    InvalidLetter { ch: char, index: usize },
    #[error("Words differ in length ({start} vs {finish}).")]
    LengthMismatch { start: usize, finish: usize },
}

fn parse_letters(word: &str) -> Result<Letters, StringsParseError> {
    word.chars()
        .enumerate()
        .map(|(index, ch)| {
            if ch.is_ascii_uppercase() {
                Ok(ch as u8)
            } else {
                Err(StringsParseError::InvalidLetter { ch, index })
            }
        })
        .collect()
}

/// One letter down, wrapping from 'A' to 'Z'.
#[inline(always)]
pub fn previous_letter(l: u8) -> u8 {
    if l == ALPHABET_START {
        ALPHABET_END
    } else {
        l - 1
    }
}

/// One letter up, wrapping from 'Z' to 'A'.
#[inline(always)]
pub fn next_letter(l: u8) -> u8 {
    if l == ALPHABET_END {
        ALPHABET_START
    } else {
        l + 1
    }
}

/// Fewest single steps between two letters around the alphabet.
pub fn wrap_distance(a: u8, b: u8) -> usize {
    let size = (ALPHABET_END - ALPHABET_START + 1) as usize;
    let d = (a as usize + size - b as usize) % size;
    d.min(size - d)
}

/// The current word, carrying the target it converges to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StringsState {
    current: Letters,
    target: Letters,
}

impl StringsState {
    /// Builds the start of a puzzle turning `start` into `finish`.
    pub fn parse(start: &str, finish: &str) -> Result<Self, StringsParseError> {
        let current = parse_letters(start)?;
        let target = parse_letters(finish)?;
        if current.len() != target.len() {
            return Err(StringsParseError::LengthMismatch {
                start: current.len(),
                finish: target.len(),
            });
        }

        Ok(Self { current, target })
    }

    /// The solved State for the same puzzle.
    pub fn finish(&self) -> Self {
        Self {
            current: self.target.clone(),
            target: self.target.clone(),
        }
    }

    pub fn current(&self) -> &[u8] {
        &self.current
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Fewest moves left, as letters must be fixed left to right.
    pub fn distance(&self) -> usize {
        self.current
            .iter()
            .zip(self.target.iter())
            .map(|(a, b)| wrap_distance(*a, *b))
            .sum()
    }

    fn with_letter(&self, i: usize, l: u8) -> Self {
        let mut current = self.current.clone();
        current[i] = l;
        Self {
            current,
            target: self.target.clone(),
        }
    }
}

impl State for StringsState {
    fn is_goal(&self) -> bool {
        self.current == self.target
    }

    /// Only the first mismatch changes, decrementing first.
    fn neighbours(&self) -> Vec<Self> {
        let mismatch = self
            .current
            .iter()
            .zip(self.target.iter())
            .position(|(c, t)| c != t);

        match mismatch {
            Some(i) => {
                let l = self.current[i];
                vec![
                    self.with_letter(i, previous_letter(l)),
                    self.with_letter(i, next_letter(l)),
                ]
            }
            None => vec![],
        }
    }
}

impl std::fmt::Display for StringsState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for l in &self.current {
            write!(f, "{}", *l as char)?;
        }
        Ok(())
    }
}
