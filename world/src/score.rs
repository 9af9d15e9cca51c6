//! Score accumulator and the in-memory high-score table.

use serde::{Deserialize, Serialize};
use snake_core::Difficulty;

/// Points earned by a player on a difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    difficulty: Difficulty,
    player_name: String,
    value: u32,
}

impl Score {
    /// Creates an empty score for an anonymous player.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_player(difficulty, String::new(), 0)
    }

    /// Creates a score for a named player.
    #[must_use]
    pub fn with_player(difficulty: Difficulty, player_name: impl Into<String>, value: u32) -> Self {
        Self {
            difficulty,
            player_name: player_name.into(),
            value,
        }
    }

    /// Difficulty the score was earned on.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Name of the player the score belongs to.
    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Renames the player the score belongs to.
    pub fn set_player_name(&mut self, player_name: impl Into<String>) {
        self.player_name = player_name.into();
    }

    /// Accumulated points.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Adds points, saturating at `u32::MAX`, and returns the new total.
    pub fn add(&mut self, points: u32) -> u32 {
        self.value = self.value.saturating_add(points);
        self.value
    }
}

/// Criteria used to select scores from a [`ScoreTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreFilter<'a> {
    /// Only scores belonging to this player.
    pub player: Option<&'a str>,
    /// Only scores earned on this difficulty.
    pub difficulty: Option<Difficulty>,
    /// Only scores worth at least this many points.
    pub at_least: u32,
}

impl ScoreFilter<'_> {
    fn matches(&self, score: &Score) -> bool {
        self.player.map_or(true, |player| player == score.player_name)
            && self
                .difficulty
                .map_or(true, |difficulty| difficulty == score.difficulty)
            && score.value >= self.at_least
    }
}

/// High-score collection kept in descending order of value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: Vec<Score>,
}

impl ScoreTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from existing scores.
    #[must_use]
    pub fn from_scores(mut scores: Vec<Score>) -> Self {
        scores.sort_by(|a, b| b.value.cmp(&a.value));
        Self { scores }
    }

    /// Inserts a score after every entry worth at least as much.
    pub fn add(&mut self, score: Score) {
        let position = self
            .scores
            .partition_point(|existing| existing.value >= score.value);
        self.scores.insert(position, score);
    }

    /// Every score, best first.
    #[must_use]
    pub fn all(&self) -> &[Score] {
        &self.scores
    }

    /// Scores earned on `difficulty`, best first.
    #[must_use]
    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&Score> {
        self.filter(&ScoreFilter {
            difficulty: Some(difficulty),
            ..ScoreFilter::default()
        })
    }

    /// Scores matching every criterion of `filter`, best first.
    #[must_use]
    pub fn filter(&self, filter: &ScoreFilter<'_>) -> Vec<&Score> {
        self.scores
            .iter()
            .filter(|score| filter.matches(score))
            .collect()
    }

    /// Number of stored scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Reports whether the table holds no scores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ScoreTable {
        ScoreTable::from_scores(vec![
            Score::with_player(Difficulty::Easy, "ada", 12),
            Score::with_player(Difficulty::Hard, "ada", 40),
            Score::with_player(Difficulty::Easy, "lin", 30),
            Score::with_player(Difficulty::Medium, "lin", 3),
        ])
    }

    #[test]
    fn scores_are_sorted_best_first() {
        let values: Vec<u32> = table().all().iter().map(Score::value).collect();
        assert_eq!(values, vec![40, 30, 12, 3]);
    }

    #[test]
    fn added_scores_keep_the_order() {
        let mut table = table();
        table.add(Score::with_player(Difficulty::Medium, "kim", 30));
        let entries: Vec<(&str, u32)> = table
            .all()
            .iter()
            .map(|score| (score.player_name(), score.value()))
            .collect();
        assert_eq!(
            entries,
            vec![("ada", 40), ("lin", 30), ("kim", 30), ("ada", 12), ("lin", 3)]
        );
    }

    #[test]
    fn filters_combine() {
        let table = table();
        let easy = table.by_difficulty(Difficulty::Easy);
        assert_eq!(easy.len(), 2);

        let ada_high = table.filter(&ScoreFilter {
            player: Some("ada"),
            at_least: 20,
            ..ScoreFilter::default()
        });
        assert_eq!(ada_high.len(), 1);
        assert_eq!(ada_high[0].difficulty(), Difficulty::Hard);
    }

    #[test]
    fn add_saturates() {
        let mut score = Score::with_player(Difficulty::Easy, "", u32::MAX - 1);
        assert_eq!(score.add(5), u32::MAX);
    }
}
