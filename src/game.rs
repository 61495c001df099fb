//! Game logic of the finger counting game.
//!
//! Only the state machine lives here; rendering and sound belong to whatever frontend drives it.
//! A challenge only counts as matched after a short grace period, so a hand that happens to pass
//! through the target count while forming a gesture does not score.

use std::time::{Duration, Instant};

use rand::Rng;

/// Minimum challenge age before a matching count scores.
const MIN_CHALLENGE_TIME: Duration = Duration::from_millis(500);

/// How long the success feedback lasts before the next challenge starts.
const SUCCESS_DISPLAY_TIME: Duration = Duration::from_secs(2);

const COUNTING_POINTS: u32 = 10;
const MATCHING_POINTS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Counting,
    Matching,
    FreePlay,
}

/// What the frontend should present for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Menu,
    /// Ask the player to show this many fingers.
    ShowFingers(u8),
    /// The challenge was just matched; points were awarded.
    Success { score: u32 },
    /// Free play: mirror the current count back at the player.
    Count(u8),
}

pub struct Game {
    mode: Mode,
    score: u32,
    target: Option<Target>,
}

struct Target {
    number: u8,
    started: Instant,
    succeeded: Option<Instant>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            mode: Mode::Menu,
            score: 0,
            target: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Switches the game mode, abandoning any pending challenge.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.target = None;
    }

    /// Advances the game with one observed finger count. Returns what to present.
    pub fn observe(&mut self, finger_count: u8, now: Instant) -> Prompt {
        match self.mode {
            Mode::Menu => Prompt::Menu,
            Mode::FreePlay => Prompt::Count(finger_count),
            Mode::Counting => self.challenge(finger_count, now, COUNTING_POINTS),
            Mode::Matching => self.challenge(finger_count, now, MATCHING_POINTS),
        }
    }

    fn challenge(&mut self, finger_count: u8, now: Instant, points: u32) -> Prompt {
        let target = self.target.get_or_insert_with(|| Target {
            number: rand::thread_rng().gen_range(1..=5),
            started: now,
            succeeded: None,
        });

        if let Some(at) = target.succeeded {
            if now.duration_since(at) < SUCCESS_DISPLAY_TIME {
                return Prompt::Success { score: self.score };
            }
            // Success display is over, roll the next challenge.
            self.target = None;
            return self.challenge(finger_count, now, points);
        }

        if finger_count == target.number
            && now.duration_since(target.started) >= MIN_CHALLENGE_TIME
        {
            target.succeeded = Some(now);
            self.score += points;
            return Prompt::Success { score: self.score };
        }

        Prompt::ShowFingers(target.number)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
