use schedule_layout::{Activity, DependencyKind, LayoutConfig, analyze};

fn network() -> Vec<Activity> {
    vec![
        Activity::new("A", "Excavate", 20.0),
        Activity::new("B", "Structure", 90.0).with_predecessors(["A"]),
        Activity::new("C", "Services", 30.0).with_predecessors(["A"]),
        Activity::new("D", "Handover", 5.0).with_predecessors(["B", "C"]),
    ]
}

#[test]
fn every_edge_is_classified_in_activity_order() {
    let layout = analyze(&network(), &LayoutConfig::default()).unwrap();
    let edges: Vec<(&str, &str, DependencyKind)> = layout
        .dependencies
        .iter()
        .map(|l| (l.from.as_str(), l.to.as_str(), l.kind))
        .collect();

    assert_eq!(
        edges,
        vec![
            ("A", "B", DependencyKind::Contiguous),
            ("A", "C", DependencyKind::Contiguous),
            ("B", "D", DependencyKind::Contiguous),
            ("C", "D", DependencyKind::FreeFloat),
        ]
    );
}

#[test]
fn links_carry_endpoint_rows() {
    let layout = analyze(&network(), &LayoutConfig::default()).unwrap();

    // A, B and D form the aligned chain on row 0; C is pushed to row 1.
    let c_to_d = layout
        .dependencies
        .iter()
        .find(|l| l.from == "C" && l.to == "D")
        .unwrap();
    assert_eq!(c_to_d.gap, 60.0);
    assert_eq!(c_to_d.from_row, 1);
    assert_eq!(c_to_d.to_row, 0);
    assert!(!c_to_d.same_row());

    let a_to_b = layout
        .dependencies
        .iter()
        .find(|l| l.from == "A" && l.to == "B")
        .unwrap();
    assert!(a_to_b.same_row());
    assert_eq!(a_to_b.gap, 0.0);
}

#[test]
fn gap_is_never_negative() {
    let activities = vec![
        Activity::new("A", "", 3.0),
        Activity::new("B", "", 8.0),
        Activity::new("C", "", 1.0).with_predecessors(["A", "B"]),
    ];
    let layout = analyze(&activities, &LayoutConfig::default()).unwrap();
    for link in &layout.dependencies {
        assert!(link.gap >= 0.0, "negative gap on {} -> {}", link.from, link.to);
        if link.gap == 0.0 {
            assert_eq!(link.kind, DependencyKind::Contiguous);
        }
    }
    let a_to_c = layout.dependencies.iter().find(|l| l.from == "A").unwrap();
    assert_eq!(a_to_c.gap, 5.0);
    assert!(a_to_c.is_free_float());
}

#[test]
fn tiny_gap_inside_tolerance_stays_contiguous() {
    let activities = vec![
        Activity::new("A", "", 1.0),
        Activity::new("B", "", 1.005),
        Activity::new("C", "", 1.0).with_predecessors(["A", "B"]),
    ];
    let layout = analyze(&activities, &LayoutConfig::default()).unwrap();
    let a_to_c = layout.dependencies.iter().find(|l| l.from == "A").unwrap();
    assert_eq!(a_to_c.kind, DependencyKind::Contiguous);

    let strict = LayoutConfig {
        contiguity_tolerance: 0.0,
        ..LayoutConfig::default()
    };
    let layout = analyze(&activities, &strict).unwrap();
    let a_to_c = layout.dependencies.iter().find(|l| l.from == "A").unwrap();
    assert_eq!(a_to_c.kind, DependencyKind::FreeFloat);
}

#[test]
fn cross_zone_edges_are_classified() {
    let activities = vec![
        Activity::new("A", "", 2.0).with_zone("North"),
        Activity::new("B", "", 2.0).with_zone("South").with_predecessors(["A"]),
    ];
    let layout = analyze(&activities, &LayoutConfig::default()).unwrap();
    let link = &layout.dependencies[0];
    assert_eq!(link.from_row, 0);
    assert_eq!(link.to_row, 3);
    assert_eq!(link.kind, DependencyKind::Contiguous);
}
