use crate::config::LayoutConfig;
use crate::solver::CpmSolution;
use std::collections::BTreeMap;

/// Activities sharing a zone label, as positions into
/// [`CpmSolution::activities`] in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneGroup {
    pub name: String,
    pub members: Vec<usize>,
}

/// Groups solved activities by zone. Zones come back sorted by label so
/// repeated runs over the same batch draw identically.
pub fn partition_zones(solution: &CpmSolution, config: &LayoutConfig) -> Vec<ZoneGroup> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, solved) in solution.activities.iter().enumerate() {
        let zone = config.zone_for(solved.activity.zone_label());
        groups.entry(zone).or_default().push(idx);
    }

    groups
        .into_iter()
        .map(|(name, members)| ZoneGroup {
            name: name.to_string(),
            members,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;
    use crate::solver::solve;

    #[test]
    fn zones_sorted_and_unset_goes_to_default() {
        let activities = vec![
            Activity::new("A", "", 1.0).with_zone("Tower B"),
            Activity::new("B", "", 1.0),
            Activity::new("C", "", 1.0).with_zone("Basement"),
            Activity::new("D", "", 1.0).with_zone("Tower B"),
        ];
        let solution = solve(&activities).unwrap();
        let zones = partition_zones(&solution, &LayoutConfig::default());

        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Basement", "Default", "Tower B"]);
        assert_eq!(zones[2].members, vec![0, 3]);
        assert_eq!(zones[1].members, vec![1]);
    }
}
