//! Trainer mode: three candidate next utterances per turn.
//!
//! Options belong to exactly one point in history (identified by the turn
//! sequence that produced them). The display order is a pseudo-random
//! permutation chosen once per options set, so re-rendering the same set
//! never reshuffles it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The intent behind a candidate utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OptionTone {
    /// Likely to advance the user's objective.
    Positive,
    /// Passive; keeps the conversation where it is.
    Neutral,
    /// Likely to hurt the user's objective.
    Negative,
}

/// The triple returned by the trainer-options call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainerOptions {
    pub positive: String,
    pub neutral: String,
    pub negative: String,
}

impl TrainerOptions {
    pub fn text(&self, tone: OptionTone) -> &str {
        match tone {
            OptionTone::Positive => &self.positive,
            OptionTone::Neutral => &self.neutral,
            OptionTone::Negative => &self.negative,
        }
    }
}

/// A triple tied to the turn that produced it, with a fixed display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerOptionsSet {
    turn_seq: u64,
    options: TrainerOptions,
    order: [OptionTone; 3],
}

impl TrainerOptionsSet {
    pub fn new(turn_seq: u64, options: TrainerOptions) -> Self {
        let mut hasher = DefaultHasher::new();
        turn_seq.hash(&mut hasher);
        options.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());

        let mut order = [OptionTone::Positive, OptionTone::Neutral, OptionTone::Negative];
        order.shuffle(&mut rng);
        Self {
            turn_seq,
            options,
            order,
        }
    }

    pub fn turn_seq(&self) -> u64 {
        self.turn_seq
    }

    pub fn options(&self) -> &TrainerOptions {
        &self.options
    }

    /// Options in display order.
    pub fn ordered(&self) -> impl Iterator<Item = (OptionTone, &str)> + '_ {
        self.order
            .iter()
            .map(move |tone| (*tone, self.options.text(*tone)))
    }

    /// The option at a displayed position (0-based).
    pub fn pick(&self, index: usize) -> Option<(OptionTone, &str)> {
        self.order
            .get(index)
            .map(|tone| (*tone, self.options.text(*tone)))
    }
}

/// The single trainer-options slot of a session (last writer wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrainerSlot {
    #[default]
    Empty,
    /// A request for this turn is in flight.
    Pending { turn_seq: u64 },
    Ready(TrainerOptionsSet),
}

impl TrainerSlot {
    /// Clears whatever was shown and waits for `turn_seq`'s options.
    pub fn begin(&mut self, turn_seq: u64) {
        *self = TrainerSlot::Pending { turn_seq };
    }

    pub fn clear(&mut self) {
        *self = TrainerSlot::Empty;
    }

    /// Applies a resolution; returns `false` when it is stale and was dropped.
    pub fn resolve(&mut self, turn_seq: u64, options: TrainerOptions) -> bool {
        match self {
            TrainerSlot::Pending { turn_seq: pending } if *pending == turn_seq => {
                *self = TrainerSlot::Ready(TrainerOptionsSet::new(turn_seq, options));
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TrainerSlot::Pending { .. })
    }

    pub fn ready(&self) -> Option<&TrainerOptionsSet> {
        match self {
            TrainerSlot::Ready(set) => Some(set),
            _ => None,
        }
    }
}
