//! Attribute allocation during a level-up

use serde::Serialize;

use crate::domain::value_objects::{Attribute, Stats};

/// Rejections while spending level-up points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("No attribute points left to spend")]
    NoPointsRemaining,
    #[error("{attribute} cannot drop below {baseline}")]
    BelowBaseline { attribute: Attribute, baseline: u32 },
    #[error("{remaining} attribute point(s) still to distribute")]
    PointsUnspent { remaining: u32 },
    #[error("Allocation spends {excess} point(s) more than granted")]
    Overspent { excess: u32 },
}

/// An in-progress level-up
///
/// `baseline` is the stat block at the moment the level-up started; nothing
/// may be lowered below it. `pending` is the draft the player is editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUpSession {
    pub baseline: Stats,
    pub pending: Stats,
    pub points_granted: u32,
}

impl LevelUpSession {
    pub fn new(baseline: Stats, points_granted: u32) -> Self {
        Self {
            baseline,
            pending: baseline,
            points_granted,
        }
    }

    /// Points spent in `stats` relative to the baseline, ignoring decreases
    fn spent(&self, stats: &Stats) -> u32 {
        Attribute::ALL
            .iter()
            .map(|a| stats.get(*a).saturating_sub(self.baseline.get(*a)))
            .sum()
    }

    pub fn points_remaining(&self) -> u32 {
        self.points_granted.saturating_sub(self.spent(&self.pending))
    }

    pub fn increment(&mut self, attribute: Attribute) -> Result<(), AllocationError> {
        if self.points_remaining() == 0 {
            return Err(AllocationError::NoPointsRemaining);
        }
        *self.pending.get_mut(attribute) += 1;
        Ok(())
    }

    pub fn decrement(&mut self, attribute: Attribute) -> Result<(), AllocationError> {
        let baseline = self.baseline.get(attribute);
        let value = self.pending.get_mut(attribute);
        if *value <= baseline {
            return Err(AllocationError::BelowBaseline {
                attribute,
                baseline,
            });
        }
        *value -= 1;
        Ok(())
    }

    /// Check that `stats` is a complete allocation of the granted points
    pub fn validate(&self, stats: &Stats) -> Result<(), AllocationError> {
        for attribute in Attribute::ALL {
            let baseline = self.baseline.get(attribute);
            if stats.get(attribute) < baseline {
                return Err(AllocationError::BelowBaseline {
                    attribute,
                    baseline,
                });
            }
        }

        let spent = self.spent(stats);
        if spent < self.points_granted {
            Err(AllocationError::PointsUnspent {
                remaining: self.points_granted - spent,
            })
        } else if spent > self.points_granted {
            Err(AllocationError::Overspent {
                excess: spent - self.points_granted,
            })
        } else {
            Ok(())
        }
    }
}
