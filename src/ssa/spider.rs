//! A single search agent and its three per-iteration behaviours.

use super::position::{Position, Vibration};
use rand::Rng;

/// One search agent.
///
/// Owns its position, the vibration it currently follows, a per-dimension
/// mask choosing between that target and a random population member, a
/// per-dimension momentum and a counter of iterations without a better
/// target.
#[derive(Debug, Clone)]
pub struct Spider {
    position: Position,
    target_vibr: Vibration,
    dimension_mask: Box<[bool]>,
    previous_move: Box<[f64]>,
    inactive_deg: u32,
}

impl Spider {
    /// Creates a spider at `position`, following its own position with zero
    /// intensity.
    pub fn new(position: Position) -> Self {
        let n = position.len();
        let target_vibr = Vibration::with_intensity(0.0, position.clone());
        Self {
            position,
            target_vibr,
            dimension_mask: vec![false; n].into_boxed_slice(),
            previous_move: vec![0.0; n].into_boxed_slice(),
            inactive_deg: 0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub fn target_vibration(&self) -> &Vibration {
        &self.target_vibr
    }

    pub fn dimension_mask(&self) -> &[bool] {
        &self.dimension_mask
    }

    pub fn previous_move(&self) -> &[f64] {
        &self.previous_move
    }

    /// Iterations since the followed vibration last changed.
    pub fn inactive_deg(&self) -> u32 {
        self.inactive_deg
    }

    /// Adopts the strongest perceived vibration if it beats the current
    /// target.
    ///
    /// `distances[i]` is the distance from this spider to the emitter of
    /// `vibrations[i]`. Vibrations coming from the target's own position
    /// are skipped. The first strictly stronger candidate wins ties. The
    /// stored target keeps the attenuated intensity so later comparisons
    /// stay against perceived values.
    pub fn choose_vibration(
        &mut self,
        vibrations: &[Vibration],
        distances: &[f64],
        attenuation_factor: f64,
    ) {
        assert_eq!(
            vibrations.len(),
            distances.len(),
            "one distance per vibration"
        );

        let mut max_index = None;
        let mut max_intensity = self.target_vibr.intensity();
        for (i, vibration) in vibrations.iter().enumerate() {
            if vibration.position().equals(self.target_vibr.position()) {
                continue;
            }
            let intensity = vibration.attenuated(attenuation_factor, distances[i]);
            if intensity > max_intensity {
                max_index = Some(i);
                max_intensity = intensity;
            }
        }

        match max_index {
            Some(i) => {
                self.target_vibr =
                    Vibration::with_intensity(max_intensity, vibrations[i].position().clone());
                self.inactive_deg = 0;
            }
            None => self.inactive_deg = self.inactive_deg.saturating_add(1),
        }
    }

    /// Possibly re-rolls the dimension mask.
    ///
    /// The mask changes with probability `1 - p_change^inactive_deg`, so a
    /// spider that has been stuck longer is more likely to diversify. On a
    /// re-roll the per-dimension probability is `p_mask` scaled by a fresh
    /// uniform draw.
    pub fn mask_changing<R: Rng>(&mut self, p_change: f64, p_mask: f64, rng: &mut R) {
        let u: f64 = rng.random();
        if u > p_change.powf(f64::from(self.inactive_deg)) {
            self.inactive_deg = 0;
            let threshold = p_mask * rng.random::<f64>();
            self.reroll_mask(threshold, rng);
        }
    }

    /// Sets every mask bit to `uniform() < threshold`.
    pub(crate) fn reroll_mask<R: Rng>(&mut self, threshold: f64, rng: &mut R) {
        for bit in self.dimension_mask.iter_mut() {
            *bit = rng.random::<f64>() < threshold;
        }
    }

    /// Moves the spider with a momentum-blended random walk.
    ///
    /// Per dimension the momentum decays by a uniform factor, then gains a
    /// uniform fraction of the gap to the target coordinate: the followed
    /// vibration's, or a random member of `vibrations` where the mask bit is
    /// set. The result is not clamped to the problem bounds and the new
    /// position is left unevaluated.
    pub fn random_walk<R: Rng>(&mut self, vibrations: &[Vibration], rng: &mut R) {
        let n = self.position.len();
        assert_eq!(self.dimension_mask.len(), n, "mask sized at construction");
        assert_eq!(self.previous_move.len(), n, "momentum sized at construction");

        let target = self.target_vibr.position().solution();
        let solution = self.position.solution_mut();
        for i in 0..n {
            self.previous_move[i] *= rng.random::<f64>();
            let target_coord = if self.dimension_mask[i] && !vibrations.is_empty() {
                let member = rng.random_range(0..vibrations.len());
                vibrations[member].position().solution()[i]
            } else {
                target[i]
            };
            self.previous_move[i] += rng.random::<f64>() * (target_coord - solution[i]);
            solution[i] += self.previous_move[i];
        }
        self.position.set_fitness(super::types::UNEVALUATED_FITNESS);
    }
}
