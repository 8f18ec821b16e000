pub mod rules;

use crate::model::card::Card;
use crate::model::extension::Extension;
use crate::model::jest::Jest;
use crate::model::variant::RuleVariant;
use rules::{MAGIC_RULE, RuleParams, STANDARD_RULES, ScoreRule};
use serde::Serialize;

/// Whether a pass includes trophy cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePass {
    Base,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RulePartial {
    pub rule: &'static str,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub parts: Vec<RulePartial>,
    pub total: i32,
}

impl ScoreBreakdown {
    pub fn points_for(&self, rule: &str) -> Option<i32> {
        self.parts
            .iter()
            .find(|part| part.rule == rule)
            .map(|part| part.points)
    }
}

#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    rules: Vec<ScoreRule>,
    params: RuleParams,
}

impl ScoreCalculator {
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
            params: RuleParams::default(),
        }
    }

    pub fn for_game(variant: &impl RuleVariant, extension: Option<Extension>) -> Self {
        let mut calculator = Self::standard();
        calculator.params.black_pair_bonus = variant.black_pair_bonus();
        if let Some(Extension::Magic) = extension {
            calculator.rules.push(MAGIC_RULE);
        }
        calculator
    }

    pub fn with_rule(mut self, rule: ScoreRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ScoreRule] {
        &self.rules
    }

    pub fn score(&self, jest: &Jest, pass: ScorePass) -> ScoreBreakdown {
        let cards = jest.scoring_cards(matches!(pass, ScorePass::Final));
        self.score_cards(&cards)
    }

    /// Runs every rule over `cards`. The result does not depend on card order.
    pub fn score_cards(&self, cards: &[Card]) -> ScoreBreakdown {
        let parts: Vec<RulePartial> = self
            .rules
            .iter()
            .map(|rule| RulePartial {
                rule: rule.name,
                points: (rule.apply)(cards, &self.params),
            })
            .collect();
        let total = parts.iter().map(|part| part.points).sum();
        ScoreBreakdown { parts, total }
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScoreCalculator, ScorePass};
    use crate::model::card::{Card, MagicCard};
    use crate::model::extension::Extension;
    use crate::model::jest::Jest;
    use crate::model::suit::Suit;
    use crate::model::trophy::Trophy;
    use crate::model::variant::Variant;

    fn s(suit: Suit, value: u8) -> Card {
        Card::suited(suit, value)
    }

    #[test]
    fn black_pair_of_twos_scores_six() {
        let jest = Jest::with_cards(vec![s(Suit::Spades, 2), s(Suit::Clubs, 2)]);
        let breakdown = ScoreCalculator::standard().score(&jest, ScorePass::Base);
        assert_eq!(breakdown.total, 6);
        assert_eq!(breakdown.points_for("black_pairs"), Some(2));
        assert_eq!(breakdown.parts.len(), 5);
    }

    #[test]
    fn lone_joker_scores_four() {
        let jest = Jest::with_cards(vec![Card::Joker]);
        assert_eq!(ScoreCalculator::standard().score(&jest, ScorePass::Base).total, 4);
    }

    #[test]
    fn total_is_sum_of_partials_and_order_independent() {
        let cards = vec![
            s(Suit::Hearts, 3),
            Card::Joker,
            s(Suit::Diamonds, 1),
            s(Suit::Spades, 4),
            s(Suit::Clubs, 4),
            s(Suit::Spades, 1),
        ];
        let calculator = ScoreCalculator::standard();
        let forward = calculator.score_cards(&cards);
        let mut reversed = cards.clone();
        reversed.reverse();
        let backward = calculator.score_cards(&reversed);
        assert_eq!(forward, backward);
        let sum: i32 = forward.parts.iter().map(|p| p.points).sum();
        assert_eq!(forward.total, sum);
        // 4 + 1 spades, 4 clubs, -5 diamond, -3 heart, pair of 4s.
        assert_eq!(forward.total, 4 + 1 + 4 - 5 - 3 + 2);
    }

    #[test]
    fn second_card_of_suit_flips_ace_to_one() {
        let calculator = ScoreCalculator::standard();
        let mut jest = Jest::with_cards(vec![s(Suit::Clubs, 1)]);
        assert_eq!(calculator.score(&jest, ScorePass::Base).total, 5);
        jest.add(s(Suit::Clubs, 2));
        assert_eq!(calculator.score(&jest, ScorePass::Base).total, 3);
    }

    #[test]
    fn diamond_trophy_rescored_as_penalty() {
        let calculator = ScoreCalculator::standard();
        let mut jest = Jest::with_cards(vec![s(Suit::Diamonds, 2), s(Suit::Spades, 4)]);
        let base = calculator.score(&jest, ScorePass::Base).total;
        jest.add_trophy(Trophy::from_card(s(Suit::Diamonds, 3)));
        let final_score = calculator.score(&jest, ScorePass::Final).total;
        assert_eq!(final_score - base, -3);
        assert_eq!(calculator.score(&jest, ScorePass::Base).total, base);
    }

    #[test]
    fn ace_trophy_is_worth_five_only_without_same_suit() {
        let calculator = ScoreCalculator::standard();
        let mut lonely = Jest::with_cards(vec![s(Suit::Hearts, 4)]);
        lonely.add_trophy(Trophy::from_card(s(Suit::Spades, 1)));
        assert_eq!(calculator.score(&lonely, ScorePass::Final).total, 5);

        let mut crowded = Jest::with_cards(vec![s(Suit::Spades, 3)]);
        crowded.add_trophy(Trophy::from_card(s(Suit::Spades, 1)));
        assert_eq!(calculator.score(&crowded, ScorePass::Final).total, 4);
    }

    #[test]
    fn game_calculator_follows_variant_and_extension() {
        let calculator = ScoreCalculator::for_game(&Variant::quick(), Some(Extension::Magic));
        assert_eq!(calculator.rules().len(), 6);
        let jest = Jest::with_cards(vec![
            s(Suit::Spades, 3),
            s(Suit::Clubs, 3),
            Card::Magic(MagicCard::Shield),
            s(Suit::Diamonds, 4),
        ]);
        let breakdown = calculator.score(&jest, ScorePass::Base);
        assert_eq!(breakdown.points_for("black_pairs"), Some(3));
        assert_eq!(breakdown.points_for("magic"), Some(4));
        assert_eq!(breakdown.total, 3 + 3 - 4 + 3 + 4);
    }
}
