use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Competitor, Division, WeightClass, classification_key};

/// Every competitor of the meet, partitioned by `"<weightClass>-<division>"`.
///
/// Groups keep judging-entry order. The roster owns its competitors; readers
/// get borrowed views and have to clone explicitly when they need a copy
/// they can reorder.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    groups: HashMap<String, Vec<Competitor>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, competitor: Competitor) -> Uuid {
        let id = competitor.id();
        let key = competitor.classification_key();

        debug!(
            competitor = %competitor.full_name(),
            group = %key,
            "Adding competitor to roster"
        );

        self.groups.entry(key).or_default().push(competitor);
        id
    }

    /// Removes by identity. Returns `None` when nobody with that id is entered.
    pub fn remove(&mut self, id: Uuid) -> Option<Competitor> {
        let (key, idx) = self.locate(id)?;
        let group = self.groups.get_mut(&key)?;
        let removed = group.remove(idx);

        debug!(
            competitor = %removed.full_name(),
            group = %key,
            "Removed competitor from roster"
        );

        Some(removed)
    }

    pub fn group_for(&self, weight_class: WeightClass, division: Division) -> &[Competitor] {
        self.group_for_key(&classification_key(weight_class, division))
    }

    /// Looks a group up by its raw key. Keys must match exactly; anything
    /// unknown reads as an empty group.
    pub fn group_for_key(&self, key: &str) -> &[Competitor] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn snapshot(&self, weight_class: WeightClass, division: Division) -> Vec<Competitor> {
        self.group_for(weight_class, division).to_vec()
    }

    pub fn get(&self, id: Uuid) -> Option<&Competitor> {
        self.iter().find(|c| c.id() == id)
    }

    /// Classification never changes after construction, so a competitor
    /// edited through this reference stays in the right group.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Competitor> {
        self.groups
            .values_mut()
            .flat_map(|group| group.iter_mut())
            .find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.groups.values().flat_map(|group| group.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locate(&self, id: Uuid) -> Option<(String, usize)> {
        self.groups.iter().find_map(|(key, group)| {
            group
                .iter()
                .position(|c| c.id() == id)
                .map(|idx| (key.clone(), idx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttemptStatus, Lift, WeightUnit};

    fn competitor(first: &str, age: i32, bodyweight: f64) -> Competitor {
        Competitor::new(first, "Lifter", age, "Town", bodyweight, WeightUnit::Kg)
    }

    #[test]
    fn test_insert_groups_by_classification() {
        let mut roster = Roster::new();
        roster.insert(competitor("A", 30, 80.0));
        roster.insert(competitor("B", 30, 82.0));
        roster.insert(competitor("C", 45, 80.0));

        let open = roster.group_for(WeightClass::Up83, Division::Open);
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].first_name(), "A");
        assert_eq!(open[1].first_name(), "B");

        assert_eq!(roster.group_for(WeightClass::Up83, Division::Masters1).len(), 1);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_absent_group_is_empty() {
        let roster = Roster::new();
        assert!(roster.group_for(WeightClass::Up59, Division::Junior).is_empty());
        assert!(roster.group_for_key("83kgs/183lbs-open").is_empty());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_group_for_key_is_exact() {
        let mut roster = Roster::new();
        roster.insert(competitor("A", 30, 80.0));
        assert_eq!(roster.group_for_key("83kgs/183lbs-Open").len(), 1);
        assert!(roster.group_for_key("83kgs/183lbs-open").is_empty());
        assert!(roster.group_for_key("83kgs-Open").is_empty());
    }

    #[test]
    fn test_remove_by_identity() {
        let mut roster = Roster::new();
        let a = roster.insert(competitor("A", 30, 80.0));
        let b = roster.insert(competitor("B", 30, 80.0));

        let removed = roster.remove(a).unwrap();
        assert_eq!(removed.first_name(), "A");

        let group = roster.group_for(WeightClass::Up83, Division::Open);
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].id(), b);

        assert!(roster.remove(a).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_mutation_is_visible_through_group() {
        let mut roster = Roster::new();
        let id = roster.insert(competitor("A", 30, 80.0));

        roster
            .get_mut(id)
            .unwrap()
            .set_attempt(Lift::Squat, 1, 200.0, AttemptStatus::Good, WeightUnit::Kg)
            .unwrap();

        let group = roster.group_for(WeightClass::Up83, Division::Open);
        assert_eq!(group[0].total().get_weight(WeightUnit::Kg), 200.0);
        assert_eq!(roster.get(id).unwrap().first_name(), "A");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut roster = Roster::new();
        let id = roster.insert(competitor("A", 30, 80.0));
        let snapshot = roster.snapshot(WeightClass::Up83, Division::Open);

        roster
            .get_mut(id)
            .unwrap()
            .set_attempt(Lift::Bench, 1, 100.0, AttemptStatus::Good, WeightUnit::Kg)
            .unwrap();

        assert_eq!(snapshot[0].total().get_weight(WeightUnit::Kg), 0.0);
    }
}
