//! Uniform integer draws
//!
//! The engine never owns a random source. Anything implementing `rand::Rng`
//! is a `DrawSource`; tests replay fixed draws through `ScriptedDraws`.

use std::collections::VecDeque;

use rand::Rng;

/// Supplier of uniform draws in `0..domain`
pub trait DrawSource {
    fn draw(&mut self, domain: u32) -> u32;
}

impl<R: Rng + ?Sized> DrawSource for R {
    fn draw(&mut self, domain: u32) -> u32 {
        self.gen_range(0..domain)
    }
}

/// Replays a fixed sequence of draws, then wraps around
///
/// Values are returned as given, so a script can deliberately step outside
/// the requested domain.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    script: VecDeque<u32>,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: draws.into_iter().collect(),
        }
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, _domain: u32) -> u32 {
        match self.script.pop_front() {
            Some(value) => {
                self.script.push_back(value);
                value
            }
            None => 0,
        }
    }
}
