use schedule_layout::{Activity, LayoutConfig, partition_zones, solve};

#[test]
fn zones_are_ordered_lexicographically() {
    let activities = vec![
        Activity::new("1", "", 1.0).with_zone("zeta"),
        Activity::new("2", "", 1.0).with_zone("Alpha"),
        Activity::new("3", "", 1.0).with_zone("beta"),
        Activity::new("4", "", 1.0).with_zone("Alpha"),
    ];
    let solution = solve(&activities).unwrap();
    let zones = partition_zones(&solution, &LayoutConfig::default());

    // Byte order: uppercase sorts before lowercase.
    let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    assert_eq!(zones[0].members, vec![1, 3]);
}

#[test]
fn unset_and_blank_zones_share_the_default_label() {
    let activities = vec![
        Activity::new("1", "", 1.0),
        Activity::new("2", "", 1.0).with_zone("  "),
        Activity::new("3", "", 1.0).with_zone("Roof"),
    ];
    let solution = solve(&activities).unwrap();

    let zones = partition_zones(&solution, &LayoutConfig::default());
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name, "Default");
    assert_eq!(zones[0].members, vec![0, 1]);

    let config = LayoutConfig {
        default_zone: "Unassigned".into(),
        ..LayoutConfig::default()
    };
    let zones = partition_zones(&solution, &config);
    let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["Roof", "Unassigned"]);
}

#[test]
fn partitioning_is_deterministic() {
    let activities = vec![
        Activity::new("1", "", 1.0).with_zone("B"),
        Activity::new("2", "", 1.0).with_zone("A"),
        Activity::new("3", "", 1.0),
    ];
    let solution = solve(&activities).unwrap();
    let config = LayoutConfig::default();
    assert_eq!(
        partition_zones(&solution, &config),
        partition_zones(&solution, &config)
    );
}
