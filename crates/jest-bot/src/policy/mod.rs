mod random;
mod scripted;

pub use random::RandomPolicy;
pub use scripted::{DefensivePolicy, GreedyPolicy};

use core::fmt;
use core::str::FromStr;
use jest_core::model::card::Card;
use jest_core::model::jest::Jest;
use jest_core::model::offer::{CardChoice, OfferView};
use jest_core::{DecisionContext, PlayerId};
use serde::{Deserialize, Serialize};

/// Context provided to policies for decision-making
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: PlayerId,
    pub round: u32,
    pub jest: &'a Jest,
}

impl<'a> From<&DecisionContext<'a>> for PolicyContext<'a> {
    fn from(ctx: &DecisionContext<'a>) -> Self {
        Self {
            seat: ctx.player,
            round: ctx.round,
            jest: ctx.jest,
        }
    }
}

/// One seat's decision maker. The engine validates every answer, so a policy
/// only has to pick among the options it is shown.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Pick the card of `hand` to place face down.
    fn choose_hidden(&mut self, ctx: &PolicyContext, hand: &[Card]) -> Card;

    /// Pick the owner of one of the `offers`.
    fn choose_target(&mut self, ctx: &PolicyContext, offers: &[OfferView]) -> PlayerId;

    /// Pick a card inside the chosen offer.
    fn choose_card(&mut self, ctx: &PolicyContext, offer: &OfferView) -> CardChoice;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotStyle {
    Random,
    Greedy,
    Defensive,
}

impl BotStyle {
    pub const ALL: [BotStyle; 3] = [BotStyle::Random, BotStyle::Greedy, BotStyle::Defensive];

    pub const fn as_str(self) -> &'static str {
        match self {
            BotStyle::Random => "random",
            BotStyle::Greedy => "greedy",
            BotStyle::Defensive => "defensive",
        }
    }

    /// Builds a fresh policy. Only the random style consumes `seed`.
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            BotStyle::Random => Box::new(RandomPolicy::new(seed)),
            BotStyle::Greedy => Box::new(GreedyPolicy),
            BotStyle::Defensive => Box::new(DefensivePolicy),
        }
    }
}

impl fmt::Display for BotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown bot style '{}' (expected random, greedy or defensive)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for BotStyle {
    type Err = UnknownStyle;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(BotStyle::Random),
            "greedy" => Ok(BotStyle::Greedy),
            "defensive" => Ok(BotStyle::Defensive),
            _ => Err(UnknownStyle(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BotStyle;

    #[test]
    fn styles_parse_case_insensitively() {
        assert_eq!("Greedy".parse::<BotStyle>(), Ok(BotStyle::Greedy));
        assert_eq!(" defensive ".parse::<BotStyle>(), Ok(BotStyle::Defensive));
        assert_eq!("random".parse::<BotStyle>(), Ok(BotStyle::Random));
        let err = "moon".parse::<BotStyle>().unwrap_err();
        assert!(err.to_string().contains("moon"));
    }

    #[test]
    fn built_policies_report_their_style() {
        for style in BotStyle::ALL {
            assert_eq!(style.build(7).name(), style.as_str());
        }
    }
}
