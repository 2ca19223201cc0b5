use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PlateLoadError;
use crate::models::{PlateSet, PlateSpec, WeightUnit, convert};

/// Share of the sleeve that may be covered before the diagram counts as full.
pub const SLEEVE_CAPACITY_PERCENT: f64 = 93.0;

/// Tolerance used for the leftover check and for floating point slack in the
/// greedy division and sleeve accounting.
pub const LOAD_EPSILON: f64 = 1e-6;

const COLLAR_WIDTH_PERCENT: f64 = 7.0;
const COLLAR_HEIGHT_FACTOR: f64 = 0.2;
const COLLAR_COLOR: &str = "#242526";
const SLEEVE_CAP_MAX_WIDTH_PERCENT: f64 = 5.0;
const SLEEVE_CAP_HEIGHT_FACTOR: f64 = 0.1;
const SLEEVE_CAP_COLOR: &str = "silver";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateKind {
    Plate,
    Collar,
    Sleeve,
}

/// One element drawn on the bar, in loading order from the inside out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedPlate {
    pub kind: PlateKind,
    pub weight: f64,
    pub width_percent: f64,
    pub height_factor: f64,
    pub color: String,
}

impl LoadedPlate {
    fn plate(spec: &PlateSpec) -> Self {
        Self {
            kind: PlateKind::Plate,
            weight: spec.weight,
            width_percent: spec.width_percent,
            height_factor: spec.height_factor,
            color: spec.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateCount {
    pub weight: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStatus {
    Complete,
    /// The decomposition is valid but not every element fit on the sleeve.
    SleeveFull,
}

/// A feasible per-side loading plus its drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateLayout {
    /// Unit of the plate set; every weight below is expressed in it.
    pub unit: WeightUnit,
    pub target: f64,
    pub bar_weight: f64,
    pub per_side: f64,
    /// Arithmetic result of the greedy pass, heaviest first, zero counts omitted.
    pub counts: Vec<PlateCount>,
    /// Elements accepted on the sleeve, collar and sleeve cap included.
    pub plates: Vec<LoadedPlate>,
    pub rejected: usize,
    pub sleeve_percent: f64,
    pub status: LayoutStatus,
}

impl PlateLayout {
    pub fn is_sleeve_full(&self) -> bool {
        self.status == LayoutStatus::SleeveFull
    }

    pub fn plate_count(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Breaks a bar weight down into the plates to put on each side.
///
/// The decomposition is a single greedy pass over the denominations, heaviest
/// first, with no backtracking. It is exact for the bundled plate sets at
/// realistic totals and may report a combination as impossible for
/// hand-made sets that a search would solve.
#[derive(Debug, Clone)]
pub struct PlateLoadSolver {
    plate_set: PlateSet,
}

impl PlateLoadSolver {
    pub fn new(plate_set: PlateSet) -> Self {
        Self { plate_set }
    }

    pub fn for_unit(unit: WeightUnit) -> Self {
        Self::new(PlateSet::for_unit(unit))
    }

    pub fn plate_set(&self) -> &PlateSet {
        &self.plate_set
    }

    pub fn sleeve_capacity() -> f64 {
        SLEEVE_CAPACITY_PERCENT
    }

    pub fn solve(&self, target: f64, unit: WeightUnit) -> Result<PlateLayout, PlateLoadError> {
        solve(target, unit, &self.plate_set)
    }
}

/// `target` is the full bar weight expressed in `unit`; it is converted into
/// the plate set's unit before solving.
pub fn solve(target: f64, unit: WeightUnit, set: &PlateSet) -> Result<PlateLayout, PlateLoadError> {
    let target = convert(target, unit, set.unit);

    if !target.is_finite() {
        return Err(PlateLoadError::InfeasibleCombination { remainder: target });
    }
    if target < set.bar_weight {
        debug!(weight = target, bar_weight = set.bar_weight, "Target below bar weight");
        return Err(PlateLoadError::BelowBarWeight {
            target,
            bar_weight: set.bar_weight,
        });
    }

    let per_side = (target - set.bar_weight) / 2.0;
    let mut to_load = per_side;
    let mut needed = Vec::with_capacity(set.plates.len());

    for plate in &set.plates {
        let count = (to_load / plate.weight + LOAD_EPSILON).floor().max(0.0);
        if count > f64::from(u32::MAX) {
            debug!(weight = target, plate = plate.weight, count, "Plate count out of range");
            return Err(PlateLoadError::TooManyPlates {
                plate: plate.weight,
                count,
            });
        }
        to_load -= count * plate.weight;
        needed.push(count as u32);
    }

    if to_load.abs() > LOAD_EPSILON {
        debug!(weight = target, remainder = to_load, "Plate combination not possible");
        return Err(PlateLoadError::InfeasibleCombination { remainder: to_load });
    }

    let mut sleeve = Sleeve::default();
    for (plate, &count) in set.plates.iter().zip(&needed) {
        for offered in 0..count {
            if !sleeve.offer(LoadedPlate::plate(plate)) {
                // the rest of this denomination is just as wide
                sleeve.rejected += (count - offered - 1) as usize;
                break;
            }
        }
    }

    sleeve.offer(LoadedPlate {
        kind: PlateKind::Collar,
        weight: 0.0,
        width_percent: COLLAR_WIDTH_PERCENT,
        height_factor: COLLAR_HEIGHT_FACTOR,
        color: COLLAR_COLOR.to_string(),
    });
    let cap_width = (SLEEVE_CAPACITY_PERCENT - sleeve.loaded).min(SLEEVE_CAP_MAX_WIDTH_PERCENT);
    sleeve.offer(LoadedPlate {
        kind: PlateKind::Sleeve,
        weight: 0.0,
        width_percent: cap_width,
        height_factor: SLEEVE_CAP_HEIGHT_FACTOR,
        color: SLEEVE_CAP_COLOR.to_string(),
    });

    let status = if sleeve.rejected > 0 {
        warn!(
            weight = target,
            rejected = sleeve.rejected,
            "Too many plates, bar sleeve full"
        );
        LayoutStatus::SleeveFull
    } else {
        LayoutStatus::Complete
    };

    let counts = set
        .plates
        .iter()
        .zip(needed)
        .filter(|(_, count)| *count > 0)
        .map(|(plate, count)| PlateCount {
            weight: plate.weight,
            count,
        })
        .collect();

    debug!(weight = target, per_side, unit = %set.unit, "Plates loaded");

    Ok(PlateLayout {
        unit: set.unit,
        target,
        bar_weight: set.bar_weight,
        per_side,
        counts,
        plates: sleeve.accepted,
        rejected: sleeve.rejected,
        sleeve_percent: sleeve.loaded,
        status,
    })
}

#[derive(Default)]
struct Sleeve {
    accepted: Vec<LoadedPlate>,
    loaded: f64,
    rejected: usize,
}

impl Sleeve {
    /// Each element is judged on its own, so a smaller one may still fit
    /// after a larger one was turned away.
    fn offer(&mut self, plate: LoadedPlate) -> bool {
        if self.loaded + plate.width_percent <= SLEEVE_CAPACITY_PERCENT + LOAD_EPSILON {
            self.loaded += plate.width_percent;
            self.accepted.push(plate);
            true
        } else {
            self.rejected += 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlateSpec;

    fn reduced_kg_set() -> PlateSet {
        let full = PlateSet::kilogram();
        let plates: Vec<PlateSpec> = full.plates.into_iter().take(7).collect();
        PlateSet::new(WeightUnit::Kg, plates, 20.0).unwrap()
    }

    fn weights(layout: &PlateLayout) -> Vec<f64> {
        layout
            .plates
            .iter()
            .filter(|p| p.kind == PlateKind::Plate)
            .map(|p| p.weight)
            .collect()
    }

    #[test]
    fn test_greedy_decomposition() {
        let solver = PlateLoadSolver::new(reduced_kg_set());
        let layout = solver.solve(100.0, WeightUnit::Kg).unwrap();

        assert_eq!(layout.per_side, 40.0);
        assert_eq!(
            layout.counts,
            vec![
                PlateCount { weight: 25.0, count: 1 },
                PlateCount { weight: 15.0, count: 1 },
            ]
        );
        assert_eq!(weights(&layout), vec![25.0, 15.0]);
        assert_eq!(layout.status, LayoutStatus::Complete);
        assert_eq!(layout.rejected, 0);
    }

    #[test]
    fn test_trailing_collar_and_sleeve_cap() {
        let solver = PlateLoadSolver::new(reduced_kg_set());
        let layout = solver.solve(100.0, WeightUnit::Kg).unwrap();

        let kinds: Vec<PlateKind> = layout.plates.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PlateKind::Plate,
                PlateKind::Plate,
                PlateKind::Collar,
                PlateKind::Sleeve
            ]
        );
        let cap = layout.plates.last().unwrap();
        assert_eq!(cap.width_percent, 5.0);
        assert!((layout.sleeve_percent - (6.24 + 4.85 + 7.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_remainder() {
        let solver = PlateLoadSolver::new(reduced_kg_set());
        let err = solver.solve(101.0, WeightUnit::Kg).unwrap_err();

        match err {
            PlateLoadError::InfeasibleCombination { remainder } => {
                assert!((remainder - 0.5).abs() < 1e-9)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_full_kg_set_covers_half_kilos() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        let layout = solver.solve(101.0, WeightUnit::Kg).unwrap();
        assert_eq!(weights(&layout), vec![25.0, 15.0, 0.5]);
    }

    #[test]
    fn test_below_bar_weight() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        assert_eq!(
            solver.solve(15.0, WeightUnit::Kg).unwrap_err(),
            PlateLoadError::BelowBarWeight {
                target: 15.0,
                bar_weight: 20.0
            }
        );
    }

    #[test]
    fn test_empty_bar() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        let layout = solver.solve(20.0, WeightUnit::Kg).unwrap();
        assert_eq!(layout.plate_count(), 0);
        assert!(layout.counts.is_empty());
        assert_eq!(layout.plates.len(), 2);
    }

    #[test]
    fn test_epsilon_absorbs_float_error() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        // 0.1 + 0.2 style drift must not break an exact combination
        let layout = solver.solve(20.0 + 2.0 * (2.5 + 1.25 + 0.25) + 1e-12, WeightUnit::Kg);
        assert_eq!(weights(&layout.unwrap()), vec![2.5, 1.25, 0.25]);
    }

    #[test]
    fn test_pound_set() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Lb);
        let layout = solver.solve(315.0, WeightUnit::Lb).unwrap();
        assert_eq!(layout.counts, vec![PlateCount { weight: 45.0, count: 3 }]);
        assert_eq!(layout.unit, WeightUnit::Lb);
    }

    #[test]
    fn test_target_converted_into_set_unit() {
        // 100 kg is 220.5 lb, leaving 87.75 lb per side: 45+35+5+2.5 and 0.25 over
        let solver = PlateLoadSolver::for_unit(WeightUnit::Lb);
        assert!(matches!(
            solver.solve(100.0, WeightUnit::Kg),
            Err(PlateLoadError::InfeasibleCombination { .. })
        ));

        let kg_solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        let layout = kg_solver.solve(220.5, WeightUnit::Lb).unwrap();
        assert!((layout.target - 100.0).abs() < 1e-9);
        assert_eq!(weights(&layout), vec![25.0, 15.0]);
    }

    #[test]
    fn test_sleeve_full_is_distinct_from_infeasible() {
        // 390 kg per side: fifteen 25s and a 15, too wide for one sleeve
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        let layout = solver.solve(800.0, WeightUnit::Kg).unwrap();

        assert!(layout.is_sleeve_full());
        assert_eq!(layout.plate_count(), 16);
        assert_eq!(layout.rejected, 2);
        // the 15 still fits after the last 25 is turned away
        assert_eq!(weights(&layout).len(), 15);
        assert_eq!(*weights(&layout).last().unwrap(), 15.0);
        assert!(layout.sleeve_percent <= SLEEVE_CAPACITY_PERCENT + LOAD_EPSILON);
        assert_eq!(layout.plates.last().unwrap().kind, PlateKind::Sleeve);
    }

    #[test]
    fn test_non_finite_target() {
        let solver = PlateLoadSolver::for_unit(WeightUnit::Kg);
        assert!(matches!(
            solver.solve(f64::NAN, WeightUnit::Kg),
            Err(PlateLoadError::InfeasibleCombination { .. })
        ));
        assert!(solver.solve(f64::INFINITY, WeightUnit::Kg).is_err());
    }

    #[test]
    fn test_custom_set_greedy_does_not_backtrack() {
        let set = PlateSet::new(
            WeightUnit::Kg,
            vec![
                PlateSpec::new(5.0, 10.0, 1.0, "red"),
                PlateSpec::new(3.0, 8.0, 0.8, "blue"),
            ],
            0.0,
        )
        .unwrap();

        let layout = solve(16.0, WeightUnit::Kg, &set).unwrap();
        assert_eq!(weights(&layout), vec![5.0, 3.0]);

        // 3 + 3 per side would do, but the 5 is taken first
        assert_eq!(
            solve(12.0, WeightUnit::Kg, &set).unwrap_err(),
            PlateLoadError::InfeasibleCombination { remainder: 1.0 }
        );
    }

    fn half_kilo_set() -> PlateSet {
        PlateSet::new(
            WeightUnit::Kg,
            vec![PlateSpec::new(0.5, 1.0, 0.2, "silver")],
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_overflowing_denomination_is_counted_not_drawn() {
        let layout = solve(10_000.0, WeightUnit::Kg, &half_kilo_set()).unwrap();

        assert_eq!(
            layout.counts,
            vec![PlateCount {
                weight: 0.5,
                count: 10_000
            }]
        );
        assert_eq!(weights(&layout).len(), 93);
        // 9907 plates and the collar stay off the sleeve
        assert_eq!(layout.rejected, 9_908);
        assert!(layout.is_sleeve_full());
    }

    #[test]
    fn test_plate_count_beyond_range_is_an_error() {
        let err = solve(1e10, WeightUnit::Kg, &half_kilo_set()).unwrap_err();
        assert!(matches!(err, PlateLoadError::TooManyPlates { plate, .. } if plate == 0.5));
    }
}
