use crate::collector::group_by_crop;
use crate::error::{FootprintError, Result};
use crate::factors::FactorSource;
use crate::models::{Contribution, CropActivity, FootprintResult, Scope, normalize_crop};

/// Emissions of one activity: quantity times factor, in kg CO2e.
#[inline]
pub fn activity_contribution(quantity: f64, factor: f64) -> f64 {
    quantity * factor
}

/// Sum contributions strictly in the given order.
///
/// Float addition is not associative, so the order is part of the result.
pub fn sum_in_order(contributions: &[Contribution]) -> f64 {
    let mut total = 0.0;
    for c in contributions {
        total += c.contribution;
    }
    total
}

/// Turns validated activities into footprints.
pub trait FootprintCalculator {
    /// Footprint of one crop instance.
    ///
    /// Fails without a partial result if any activity has no factor.
    fn calculate(
        &self,
        crop: &str,
        activities: &[CropActivity],
        scope: Scope,
    ) -> Result<FootprintResult>;

    /// Footprints of every crop in the submission, in order of first appearance.
    ///
    /// Fails as a whole if any crop instance fails.
    fn calculate_all(
        &self,
        activities: &[CropActivity],
        scope: Scope,
    ) -> Result<Vec<FootprintResult>> {
        group_by_crop(activities)
            .iter()
            .map(|group| self.calculate(&group.crop, &group.activities, scope))
            .collect()
    }
}

/// Weighted-sum calculator over any factor source.
pub struct StandardCalculator<'a, F: FactorSource + ?Sized> {
    factors: &'a F,
}

impl<'a, F: FactorSource + ?Sized> StandardCalculator<'a, F> {
    pub fn new(factors: &'a F) -> Self {
        Self { factors }
    }
}

impl<F: FactorSource + ?Sized> FootprintCalculator for StandardCalculator<'_, F> {
    fn calculate(
        &self,
        crop: &str,
        activities: &[CropActivity],
        scope: Scope,
    ) -> Result<FootprintResult> {
        let crop = normalize_crop(crop);
        let mut contributions = Vec::with_capacity(activities.len());

        for (index, activity) in activities.iter().enumerate() {
            if activity.crop() != crop {
                return Err(FootprintError::InvalidActivityInput {
                    index,
                    reason: format!(
                        "activity for crop '{}' submitted with crop '{}'",
                        activity.crop(),
                        crop
                    ),
                });
            }

            let factor = self
                .factors
                .lookup(&crop, activity.category(), scope)?;
            let value = activity_contribution(activity.quantity(), factor.coefficient);
            if !value.is_finite() {
                return Err(FootprintError::InvalidActivityInput {
                    index,
                    reason: format!(
                        "{} {} x {} overflows the contribution",
                        activity.quantity(),
                        activity.unit(),
                        factor.coefficient
                    ),
                });
            }

            tracing::debug!(
                crop = %crop,
                activity = %activity.category(),
                quantity = activity.quantity(),
                factor = factor.coefficient,
                contribution = value,
                "activity contribution"
            );

            contributions.push(Contribution {
                activity: activity.category(),
                quantity: activity.quantity(),
                unit: activity.unit(),
                factor: factor.coefficient,
                contribution: value,
                source: factor.source.clone(),
            });
        }

        let total = sum_in_order(&contributions);
        if !total.is_finite() {
            return Err(FootprintError::InvalidActivityInput {
                index: contributions.len().saturating_sub(1),
                reason: format!("total footprint of '{}' overflows", crop),
            });
        }
        tracing::debug!(crop = %crop, %scope, total, "crop footprint");

        Ok(FootprintResult {
            crop,
            scope,
            contributions,
            total,
        })
    }
}
