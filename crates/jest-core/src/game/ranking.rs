use crate::model::card::Card;
use crate::model::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Final placing of one player. Players whose score and strongest card are
/// both equal share a rank and are marked `tied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: i32,
    pub rank: usize,
    pub tied: bool,
}

pub fn rank_players(players: &[Player], scores: &[i32]) -> Vec<Standing> {
    let mut keyed: Vec<(&Player, i32, Option<(u8, u8)>)> = players
        .iter()
        .zip(scores.iter().copied())
        .map(|(player, score)| {
            let strongest = player.jest().strongest_card().map(Card::strength);
            (player, score, strongest)
        })
        .collect();
    keyed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));

    let mut standings: Vec<Standing> = Vec::with_capacity(keyed.len());
    for (position, (player, score, strongest)) in keyed.iter().enumerate() {
        let same_as_previous = position > 0 && {
            let (_, prev_score, prev_strongest) = keyed[position - 1];
            prev_score == *score && prev_strongest == *strongest
        };
        let rank = if same_as_previous {
            standings[position - 1].rank
        } else {
            position + 1
        };
        if same_as_previous {
            standings[position - 1].tied = true;
        }
        standings.push(Standing {
            player: player.id(),
            name: player.name().to_string(),
            score: *score,
            rank,
            tied: same_as_previous,
        });
    }
    standings
}

pub fn winners(standings: &[Standing]) -> impl Iterator<Item = &Standing> {
    standings.iter().filter(|standing| standing.rank == 1)
}

#[cfg(test)]
mod tests {
    use super::{rank_players, winners};
    use crate::model::card::Card;
    use crate::model::jest::Jest;
    use crate::model::player::{Player, PlayerId};
    use crate::model::suit::Suit;

    fn player(index: u8, cards: Vec<Card>) -> Player {
        Player::with_jest(PlayerId::new(index), format!("p{index}"), Jest::with_cards(cards))
    }

    #[test]
    fn sorts_by_score_descending() {
        let players = [
            player(0, vec![Card::suited(Suit::Spades, 2)]),
            player(1, vec![Card::suited(Suit::Spades, 4)]),
            player(2, vec![Card::suited(Suit::Clubs, 3)]),
        ];
        let standings = rank_players(&players, &[2, 4, 3]);
        let order: Vec<PlayerId> = standings.iter().map(|s| s.player).collect();
        assert_eq!(order, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]);
        assert_eq!(standings[0].rank, 1);
        assert!(standings.iter().all(|s| !s.tied));
    }

    #[test]
    fn equal_scores_fall_back_to_strongest_card() {
        let players = [
            player(0, vec![Card::suited(Suit::Hearts, 4)]),
            player(1, vec![Card::suited(Suit::Spades, 4)]),
            player(2, vec![Card::suited(Suit::Clubs, 1)]),
        ];
        let standings = rank_players(&players, &[0, 0, 5]);
        assert_eq!(standings[0].player, PlayerId::new(2));
        assert_eq!(standings[1].player, PlayerId::new(1));
        assert_eq!(standings[2].player, PlayerId::new(0));
        assert_eq!(standings[2].rank, 3);
    }

    #[test]
    fn unbreakable_ties_are_reported() {
        let players = [
            player(0, vec![]),
            player(1, vec![]),
            player(2, vec![Card::Joker]),
        ];
        let standings = rank_players(&players, &[0, 0, 0]);
        assert_eq!(standings[0].player, PlayerId::new(2));
        assert!(!standings[0].tied);
        assert!(standings[1].tied && standings[2].tied);
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[2].rank, 2);
        assert_eq!(winners(&standings).count(), 1);
    }
}
