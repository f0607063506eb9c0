//! Points, the level-clear threshold and summary ranks

use serde::{Deserialize, Serialize};

use crate::tuning::{PointsTable, RankCutoffs};

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
    Untiered,
}

impl Tier {
    /// Difficulty of the question attached to a moving platform
    pub fn for_platform(index: usize) -> Self {
        match index {
            2 | 4 => Tier::Tier1,
            0 | 1 => Tier::Tier2,
            3 | 5 => Tier::Tier3,
            _ => Tier::Untiered,
        }
    }

    /// Whether the overlay offers the hint assistant for this tier
    pub fn assist_offered(self) -> bool {
        self == Tier::Tier3
    }
}

/// An answered question, as reported by the quiz overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub tier: Tier,
    /// The hint assistant was used
    pub assisted: bool,
    pub correct: bool,
}

impl ScoreAward {
    pub fn points(&self, table: &PointsTable) -> u32 {
        if !self.correct {
            return 0;
        }
        match (self.tier, self.assisted) {
            (Tier::Tier1, _) => table.tier_1,
            (Tier::Tier2, _) => table.tier_2,
            (Tier::Tier3, false) => table.tier_3,
            (Tier::Tier3, true) => table.tier_3_assisted,
            (Tier::Untiered, false) => table.untiered,
            (Tier::Untiered, true) => table.untiered_assisted,
        }
    }
}

/// Points accumulator for one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGate {
    /// Points this attempt; never decreases until reset
    pub points: u32,
    pub threshold: u32,
    /// Points carried from levels already cleared this run
    pub banked: u32,
}

impl ScoreGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            points: 0,
            threshold,
            banked: 0,
        }
    }

    /// Add an award; returns the points it was worth
    pub fn award(&mut self, award: &ScoreAward, table: &PointsTable) -> u32 {
        let gained = award.points(table);
        self.points = self.points.saturating_add(gained);
        gained
    }

    /// Exact equality counts as a pass
    pub fn passes(&self) -> bool {
        self.points >= self.threshold
    }

    pub fn reset_attempt(&mut self) {
        self.points = 0;
    }

    /// Move this attempt's points into the run total
    pub fn bank(&mut self) {
        self.banked = self.banked.saturating_add(self.points);
        self.points = 0;
    }

    /// Run total including the current attempt
    pub fn total(&self) -> u32 {
        self.banked.saturating_add(self.points)
    }
}

/// Summary-screen rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Legend,
    Gladiator,
    Warrior,
}

impl Rank {
    pub fn for_points(points: u32, cutoffs: &RankCutoffs) -> Option<Self> {
        if points >= cutoffs.legend {
            Some(Rank::Legend)
        } else if points >= cutoffs.gladiator {
            Some(Rank::Gladiator)
        } else if points >= cutoffs.warrior {
            Some(Rank::Warrior)
        } else {
            None
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Rank::Legend => "Legend",
            Rank::Gladiator => "Gladiator",
            Rank::Warrior => "Warrior",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correct(tier: Tier, assisted: bool) -> ScoreAward {
        ScoreAward {
            tier,
            assisted,
            correct: true,
        }
    }

    #[test]
    fn test_points_table() {
        let table = PointsTable::default();
        assert_eq!(correct(Tier::Tier1, false).points(&table), 3);
        assert_eq!(correct(Tier::Tier2, true).points(&table), 5);
        assert_eq!(correct(Tier::Tier3, false).points(&table), 8);
        assert_eq!(correct(Tier::Tier3, true).points(&table), 6);
        assert_eq!(correct(Tier::Untiered, false).points(&table), 5);
        assert_eq!(correct(Tier::Untiered, true).points(&table), 3);

        let wrong = ScoreAward {
            correct: false,
            ..correct(Tier::Tier3, false)
        };
        assert_eq!(wrong.points(&table), 0);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut gate = ScoreGate::new(20);
        gate.points = 19;
        assert!(!gate.passes());
        gate.points = 20;
        assert!(gate.passes());
    }

    #[test]
    fn test_award_bank_and_reset() {
        let table = PointsTable::default();
        let mut gate = ScoreGate::new(20);
        assert_eq!(gate.award(&correct(Tier::Tier3, false), &table), 8);
        gate.award(&correct(Tier::Tier2, false), &table);
        assert_eq!(gate.points, 13);

        gate.bank();
        assert_eq!(gate.points, 0);
        assert_eq!(gate.banked, 13);

        gate.award(&correct(Tier::Tier1, false), &table);
        assert_eq!(gate.total(), 16);
        gate.reset_attempt();
        assert_eq!(gate.total(), 13);
    }

    #[test]
    fn test_platform_tiers() {
        assert_eq!(Tier::for_platform(0), Tier::Tier2);
        assert_eq!(Tier::for_platform(2), Tier::Tier1);
        assert_eq!(Tier::for_platform(5), Tier::Tier3);
        assert_eq!(Tier::for_platform(6), Tier::Untiered);
        assert!(Tier::for_platform(3).assist_offered());
        assert!(!Tier::for_platform(1).assist_offered());
    }

    #[test]
    fn test_ranks() {
        let cutoffs = RankCutoffs::default();
        assert_eq!(Rank::for_points(35, &cutoffs), Some(Rank::Legend));
        assert_eq!(Rank::for_points(24, &cutoffs), Some(Rank::Gladiator));
        assert_eq!(Rank::for_points(20, &cutoffs), Some(Rank::Warrior));
        assert_eq!(Rank::for_points(19, &cutoffs), None);
    }
}
