//! Console version of the finger counting game.
//!
//! Drives the game state machine with the scripted detector instead of a camera and prints
//! prompts to stdout. The graphics and sound of the original desktop variant are a frontend
//! concern and have no place here.

use std::time::Instant;

use yubi::detector::{HandDetector, ScriptedDetector};
use yubi::game::{Game, Mode, Prompt};
use yubi::hand::{fingers, landmark::Hand};
use yubi::source::{FrameSource, SyntheticSource};

const ROUNDS: u32 = 40;

fn main() -> Result<(), yubi::Error> {
    env_logger::init();

    let mut source = SyntheticSource::new(1280, 720, 10);
    let mut detector = ScriptedDetector::demo();
    let mut game = Game::new();
    game.set_mode(Mode::Counting);

    println!("Hand counting game! Show fingers to the (scripted) camera.");

    let mut last_prompt = None;
    for _ in 0..ROUNDS {
        let frame = source.capture()?;

        let mut count = 0;
        for landmarks in detector.detect(&frame)? {
            match Hand::from_slice(&landmarks) {
                Ok(hand) => count += fingers::classify(&hand).extended_count(),
                Err(e) => log::warn!("skipping hand: {e}"),
            }
        }

        let prompt = game.observe(count, Instant::now());
        if last_prompt != Some(prompt) {
            match prompt {
                Prompt::Menu => println!("Pick a mode to start playing"),
                Prompt::ShowFingers(n) => println!("Show me {n} fingers!"),
                Prompt::Success { score } => println!("Great job! Score: {score}"),
                Prompt::Count(n) => println!("Your fingers: {n}"),
            }
            last_prompt = Some(prompt);
        }
    }

    println!("Final score: {}", game.score());
    Ok(())
}
