use listing_audit::flow::{
    standard_diagram, Anchor, FlowCanvas, FlowLayoutEngine, FlowTopology, LinkRef, LinkSpec,
    NodeSpec, StackSpec, VerticalPlacement,
};
use listing_audit::legality::{classify, rules, Category, CategoryCounts};
use listing_audit::listings::{Listing, ListingDatasetLoader, APARTMENT, ENTIRE_HOME};
use std::collections::HashSet;
use std::path::PathBuf;

const NYC: &str = "New York, New York, United States";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/listings_sample.csv")
}

fn listing(
    property_type: &str,
    room_type: &str,
    min_stay: u32,
    host_listings: u32,
    host_location: Option<&str>,
) -> Listing {
    Listing {
        property_type: property_type.to_string(),
        room_type: room_type.to_string(),
        min_stay,
        calculated_host_listings_count: host_listings,
        host_location: host_location.map(str::to_string),
        price: 100.0,
        latitude: 40.73,
        longitude: -73.99,
        illegal: None,
    }
}

/// 100 listings: 40 houses, 20 long-stay apartments and 40 short-term
/// apartments split 10 entire-home, 5 multi-listing, 3 out-of-town, 22 hosted.
fn scenario_listings() -> Vec<Listing> {
    let mut listings = Vec::new();
    listings.extend((0..40).map(|_| listing("House", ENTIRE_HOME, 1, 1, Some(NYC))));
    listings.extend((0..20).map(|_| listing(APARTMENT, "Private room", 30, 1, Some(NYC))));
    listings.extend((0..10).map(|_| listing(APARTMENT, ENTIRE_HOME, 2, 1, Some(NYC))));
    listings.extend((0..5).map(|_| listing(APARTMENT, "Private room", 2, 2, Some(NYC))));
    listings.extend(
        (0..3).map(|_| listing(APARTMENT, "Private room", 2, 1, Some("Los Angeles"))),
    );
    listings.extend((0..22).map(|_| listing(APARTMENT, "Private room", 2, 1, Some(NYC))));
    listings
}

fn canvas() -> FlowCanvas {
    FlowCanvas::new(958.0, 294.0, 40.0)
}

#[test]
fn fixture_snapshot_classifies_into_expected_funnel() {
    let dataset = ListingDatasetLoader::from_path(fixture_path()).expect("fixture loads");
    assert_eq!(dataset.len(), 12);

    let missing_location = &dataset.listings()[6];
    assert_eq!(missing_location.host_location, None);
    assert_eq!(dataset.listings()[4].price, 1250.0);

    let counts = classify(dataset.listings()).counts();
    assert_eq!(
        counts,
        CategoryCounts {
            all: 12,
            apartment: 9,
            short_term: 8,
            full_apt: 2,
            host_mult: 2,
            host_away: 1,
            illegal: 5,
            legal: 7,
        }
    );
    assert_eq!(counts.flow(Category::All, Category::Legal), 3);
    assert_eq!(counts.flow(Category::Apartment, Category::Legal), 1);
    assert_eq!(counts.flow(Category::ShortTerm, Category::Legal), 3);
}

#[test]
fn categories_partition_every_listing() {
    let dataset = ListingDatasetLoader::from_path(fixture_path()).expect("fixture loads");
    for listings in [dataset.listings().to_vec(), scenario_listings(), Vec::new()] {
        let classification = classify(&listings);
        let counts = classification.counts();

        assert_eq!(counts.legal + counts.illegal, counts.all);
        assert_eq!(
            counts.full_apt + counts.host_mult + counts.host_away,
            counts.illegal
        );

        let mut seen = HashSet::new();
        for reason in Category::illegal_reasons() {
            for member in classification.members(reason) {
                let address = *member as *const Listing;
                assert!(seen.insert(address), "listing counted in two reasons");
            }
        }
    }
}

#[test]
fn missing_host_location_is_never_away() {
    let listings = vec![
        listing(APARTMENT, "Private room", 1, 1, None),
        listing(APARTMENT, "Shared room", 3, 1, None),
    ];

    let classification = classify(&listings);
    assert!(classification.members(Category::HostAway).is_empty());
    assert_eq!(classification.counts().illegal, 0);
    assert!(listings.iter().all(|listing| !rules::is_host_away(listing)));
}

#[test]
fn mixed_scenario_counts_eighteen_illegal() {
    let counts = classify(&scenario_listings()).counts();

    assert_eq!(counts.all, 100);
    assert_eq!(counts.apartment, 60);
    assert_eq!(counts.short_term, 40);
    assert_eq!(counts.full_apt, 10);
    assert_eq!(counts.host_mult, 5);
    assert_eq!(counts.host_away, 3);
    assert_eq!(counts.illegal, 18);
    assert_eq!(counts.legal, 82);
}

#[test]
fn entire_home_with_many_listings_counts_once() {
    let listings = vec![listing(APARTMENT, ENTIRE_HOME, 1, 5, Some("Los Angeles"))];

    let classification = classify(&listings);
    let counts = classification.counts();
    assert_eq!(counts.full_apt, 1);
    assert_eq!(counts.host_mult, 0);
    assert_eq!(counts.host_away, 0);
    assert_eq!(counts.illegal, 1);
}

#[test]
fn chained_links_stack_without_overlap() {
    let node = |category, placement| NodeSpec {
        category,
        placement,
    };
    let topology = FlowTopology::new(
        vec![
            node(Category::FullApt, VerticalPlacement::Stacked),
            node(Category::HostMult, VerticalPlacement::Stacked),
            node(Category::Illegal, VerticalPlacement::Top),
        ],
        vec![
            LinkSpec {
                source: Category::FullApt,
                target: Category::Illegal,
                start: Anchor::Center,
                end: Anchor::Top,
            },
            LinkSpec {
                source: Category::HostMult,
                target: Category::Illegal,
                start: Anchor::Center,
                end: Anchor::ChainedAfter(LinkRef::new(Category::FullApt, Category::Illegal)),
            },
        ],
        StackSpec::default(),
    );
    let counts = CategoryCounts {
        full_apt: 12,
        host_mult: 6,
        illegal: 18,
        ..CategoryCounts::default()
    };

    let diagram = FlowLayoutEngine::new(topology, canvas())
        .layout(&counts)
        .expect("layout succeeds");
    let first = diagram
        .link(Category::FullApt, Category::Illegal)
        .expect("first link");
    let second = diagram
        .link(Category::HostMult, Category::Illegal)
        .expect("second link");
    let illegal = diagram.node(Category::Illegal).expect("illegal node");

    let first_expected = illegal.vertical_start + first.thickness / 2.0;
    assert!((first.vertical_end - first_expected).abs() < 1e-9);
    let expected = first.vertical_end + first.thickness / 2.0 + second.thickness / 2.0;
    assert!((second.vertical_end - expected).abs() < 1e-9);
    let first_bottom = first.vertical_end + first.thickness / 2.0;
    assert!(second.vertical_end - second.thickness / 2.0 >= first_bottom - 1e-9);
    assert!(second.vertical_end + second.thickness / 2.0 <= illegal.vertical_end() + 1e-9);
}

#[test]
fn chained_link_starts_below_the_previous_one() {
    let counts = classify(&scenario_listings()).counts();
    let diagram = standard_diagram(&counts, canvas()).expect("layout succeeds");

    let short = diagram.node(Category::ShortTerm).expect("short node");
    let full = diagram
        .link(Category::ShortTerm, Category::FullApt)
        .expect("short-full-apt link");
    let mult = diagram
        .link(Category::ShortTerm, Category::HostMult)
        .expect("short-host-mult link");
    let away = diagram
        .link(Category::ShortTerm, Category::HostAway)
        .expect("short-host-away link");

    let full_expected = short.vertical_start + full.thickness / 2.0;
    assert!((full.vertical_start - full_expected).abs() < 1e-9);

    let mult_expected = full.vertical_start + full.thickness / 2.0 + mult.thickness / 2.0;
    assert!((mult.vertical_start - mult_expected).abs() < 1e-9);

    let away_expected = mult.vertical_start + mult.thickness / 2.0 + away.thickness / 2.0;
    assert!((away.vertical_start - away_expected).abs() < 1e-9);
}

#[test]
fn bottom_anchored_links_leave_from_the_node_bottom() {
    let counts = classify(&scenario_listings()).counts();
    let diagram = standard_diagram(&counts, canvas()).expect("layout succeeds");

    let all = diagram.node(Category::All).expect("all node");
    let legal = diagram.node(Category::Legal).expect("legal node");
    let all_legal = diagram
        .link(Category::All, Category::Legal)
        .expect("all-legal link");
    let half = all_legal.thickness / 2.0;
    assert!((all_legal.vertical_start - (all.vertical_end() - half)).abs() < 1e-9);
    assert!((all_legal.vertical_end - (legal.vertical_end() - half)).abs() < 1e-9);

    let all_apts = diagram
        .link(Category::All, Category::Apartment)
        .expect("all-apts link");
    let half = all_apts.thickness / 2.0;
    assert!((all_apts.vertical_start - (all.vertical_start + half)).abs() < 1e-9);

    let short = diagram.node(Category::ShortTerm).expect("short node");
    let short_legal = diagram
        .link(Category::ShortTerm, Category::Legal)
        .expect("short-legal link");
    let half = short_legal.thickness / 2.0;
    assert!((short_legal.vertical_start - (short.vertical_end() - half)).abs() < 1e-9);
}

#[test]
fn link_thickness_never_exceeds_node_heights() {
    let counts = classify(&scenario_listings()).counts();
    let diagram = standard_diagram(&counts, canvas()).expect("layout succeeds");

    for link in &diagram.links {
        let source = diagram.node(link.source).expect("source node");
        let target = diagram.node(link.target).expect("target node");
        assert!(link.thickness <= source.height + 1e-9, "{} too thick", link.id);
        assert!(link.thickness <= target.height + 1e-9, "{} too thick", link.id);
    }

    let mut nodes: Vec<_> = diagram.nodes.iter().collect();
    nodes.sort_by_key(|node| node.count);
    for pair in nodes.windows(2) {
        assert!(pair[0].height <= pair[1].height);
    }
}

#[test]
fn empty_dataset_lays_out_flat_diagram() {
    let counts = classify(&[]).counts();
    assert_eq!(counts, CategoryCounts::default());

    let diagram = standard_diagram(&counts, canvas()).expect("layout succeeds");
    for node in &diagram.nodes {
        for value in [node.x_start, node.x_end, node.vertical_start, node.height] {
            assert!(value.is_finite() && value >= 0.0, "{} has {value}", node.id);
        }
        assert_eq!(node.height, 0.0);
    }
    for link in &diagram.links {
        for value in [
            link.x_start,
            link.x_end,
            link.vertical_start,
            link.vertical_end,
            link.thickness,
        ] {
            assert!(value.is_finite() && value >= 0.0, "{} has {value}", link.id);
        }
        assert!(!link.path_data().contains("NaN"));
    }
}

#[test]
fn legend_lists_reason_counts() {
    let counts = classify(&scenario_listings()).counts();
    let diagram = standard_diagram(&counts, canvas()).expect("layout succeeds");

    let legend: Vec<(&str, &str, usize)> = diagram
        .legend
        .iter()
        .map(|entry| (entry.code, entry.label, entry.count))
        .collect();
    assert_eq!(
        legend,
        vec![
            ("A", "full home rentals", 10),
            ("B", "host has multiple listings", 5),
            ("C", "host not in NYC", 3),
        ]
    );

    let all = diagram.node(Category::All).expect("all node");
    assert_eq!(all.label, "100 total listings");
}
