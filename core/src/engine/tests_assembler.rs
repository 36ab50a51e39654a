use super::*;
use crate::config::EngineConfig;
use crate::geometry::{ApproxEq, Coordinate3};
use crate::model::{
    BoxCatalog, BoxDimensions, BoxType, ConfigurationSet, Layer, LayerPlacement,
    PalletConfiguration, PalletCorners, Stack,
};

fn square_corners(size: f64) -> PalletCorners {
    PalletCorners::new(
        Coordinate3::new(0.0, size, 0.0),
        Coordinate3::new(0.0, 0.0, 0.0),
        Coordinate3::new(size, 0.0, 0.0),
    )
}

fn catalog() -> BoxCatalog {
    let mut catalog = BoxCatalog::new();
    catalog
        .add(BoxType::new(
            "cube",
            BoxDimensions::new(100.0, 100.0, 50.0),
            Coordinate3::new(1000.0, 0.0, -200.0),
        ))
        .unwrap();
    catalog
        .add(BoxType::new(
            "slab",
            BoxDimensions::new(200.0, 100.0, 30.0),
            Coordinate3::new(1000.0, 300.0, -200.0),
        ))
        .unwrap();
    catalog
}

fn two_layer_pallet() -> PalletConfiguration {
    let mut pallet = PalletConfiguration::new("P1", square_corners(500.0));
    let l0 = pallet.add_layer(
        Layer::new("L0")
            .with_placement(LayerPlacement::new("cube", 0.0, 0.0, false))
            .with_placement(LayerPlacement::new("cube", 0.2, 0.0, false)),
    );
    let l1 = pallet.add_layer(Layer::new("L1").with_placement(LayerPlacement::new("slab", 0.0, 0.0, true)));
    pallet.stack = Stack::new(vec![l0, l1, l0]);
    pallet
}

#[test]
fn test_single_box_scenario() {
    let catalog = catalog();
    let mut pallet = PalletConfiguration::new("square", square_corners(500.0));
    let l0 = pallet.add_layer(Layer::new("L0").with_placement(LayerPlacement::new("cube", 0.0, 1.0, false)));
    pallet.stack.push(l0);

    let coords = assemble_coordinates(&pallet, &catalog).unwrap();
    assert_eq!(coords.len(), 1);

    let c = &coords[0];
    assert!(c.drop_location.position.approx_eq(&Coordinate3::new(50.0, -50.0, -50.0)));
    assert!(!c.drop_location.rotated);
    assert_eq!(c.dimensions, BoxDimensions::new(100.0, 100.0, 50.0));
    assert_eq!(c.pick_location, Coordinate3::new(1000.0, 0.0, -200.0));
    assert_eq!(c.pallet_index, 0);
    assert_eq!(c.stack_index, 0);
}

#[test]
fn test_emission_order_and_count() {
    let catalog = catalog();
    let pallet = two_layer_pallet();

    let coords = assemble_coordinates(&pallet, &catalog).unwrap();
    assert_eq!(Some(coords.len()), pallet.placed_box_count());
    assert_eq!(coords.len(), 5);

    let order: Vec<(usize, &str)> = coords.iter().map(|c| (c.stack_index, c.box_name.as_str())).collect();
    assert_eq!(
        order,
        vec![(0, "cube"), (0, "cube"), (1, "slab"), (2, "cube"), (2, "cube")]
    );

    // first box of each stack position sits at x = 50; the second is 100 mm further
    assert!(coords[0].drop_location.position.x.approx_eq(&50.0));
    assert!(coords[1].drop_location.position.x.approx_eq(&150.0));
}

#[test]
fn test_z_levels_follow_stack() {
    let catalog = catalog();
    let coords = assemble_coordinates(&two_layer_pallet(), &catalog).unwrap();

    let z: Vec<f64> = coords.iter().map(|c| c.drop_location.position.z).collect();
    assert!(z[0].approx_eq(&-50.0));
    assert!(z[1].approx_eq(&-50.0));
    assert!(z[2].approx_eq(&-80.0));
    assert!(z[3].approx_eq(&-130.0));
    assert!(z[4].approx_eq(&-130.0));
}

#[test]
fn test_rotated_drop_angle_and_position() {
    let catalog = catalog();
    let coords = assemble_coordinates(&two_layer_pallet(), &catalog).unwrap();
    let slab = &coords[2];

    assert!(slab.drop_location.rotated);
    assert!(slab.drop_location.angle_deg.approx_eq(&90.0));
    assert!(coords[0].drop_location.angle_deg.approx_eq(&0.0));
    // rotated 200 x 100 footprint: centre 100 along x, 450 along y
    assert!(slab.drop_location.position.approx_eq(&Coordinate3::new(100.0, 450.0, -80.0)));
}

#[test]
fn test_linear_path_distance() {
    let catalog = catalog();
    let coords = assemble_coordinates(&two_layer_pallet(), &catalog).unwrap();

    for c in &coords {
        let expected = c.pick_location.distance(&c.drop_location.position);
        assert!(c.linear_path_distance.approx_eq(&expected));
    }
}

#[test]
fn test_rotated_and_raised_pallet() {
    let catalog = catalog();
    // pallet turned 90°: x axis runs along machine +Y, y axis along machine -X
    let corners = PalletCorners::new(
        Coordinate3::new(200.0, 100.0, 30.0),
        Coordinate3::new(1000.0, 100.0, 30.0),
        Coordinate3::new(1000.0, 1300.0, 30.0),
    );
    let mut pallet = PalletConfiguration::new("turned", corners);
    let l0 = pallet.add_layer(Layer::new("L0").with_placement(LayerPlacement::new("cube", 0.0, 0.0, false)));
    pallet.stack.push(l0);

    let coords = assemble_coordinates(&pallet, &catalog).unwrap();
    let c = &coords[0];
    // 50 along x (machine +Y), 750 along y (machine -X)
    assert!(c.drop_location.position.approx_eq(&Coordinate3::new(250.0, 150.0, -20.0)));
    assert!(c.drop_location.angle_deg.approx_eq(&90.0));
}

#[test]
fn test_assembly_is_idempotent() {
    let catalog = catalog();
    let pallet = two_layer_pallet();
    let before = pallet.clone();

    let first = assemble_coordinates(&pallet, &catalog).unwrap();
    let second = assemble_coordinates(&pallet, &catalog).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.drop_location.position.x.to_bits(), b.drop_location.position.x.to_bits());
        assert_eq!(a.drop_location.position.y.to_bits(), b.drop_location.position.y.to_bits());
        assert_eq!(a.drop_location.position.z.to_bits(), b.drop_location.position.z.to_bits());
    }
    assert_eq!(pallet, before);
}

#[test]
fn test_degenerate_pallet_fails_whole_assembly() {
    let catalog = catalog();
    let mut pallet = two_layer_pallet();
    pallet.corners.corner3 = pallet.corners.corner2;

    let result = assemble_coordinates(&pallet, &catalog);
    assert!(matches!(result, Err(LayoutError::DegenerateGeometry(_))));
}

#[test]
fn test_bad_stack_reference_fails_whole_assembly() {
    let catalog = catalog();
    let mut pallet = two_layer_pallet();
    pallet.stack.push(9);

    let result = assemble_coordinates(&pallet, &catalog);
    assert!(matches!(
        result,
        Err(LayoutError::InvalidStackReference { position: 3, index: 9, layer_count: 2 })
    ));
}

#[test]
fn test_validation_does_not_change_output() {
    let catalog = catalog();
    let mut pallet = two_layer_pallet();
    // overlapping placement only produces a warning
    pallet.layers[0].placements.push(LayerPlacement::new("cube", 0.05, 0.0, false));

    let config = EngineConfig::default().with_validation();
    let validated = assemble_coordinates_with(&pallet, 0, &catalog, &config).unwrap();
    let plain = assemble_coordinates(&pallet, &catalog).unwrap();
    assert_eq!(validated, plain);
}

#[test]
fn test_configuration_isolates_pallet_failures() {
    let mut set = ConfigurationSet::new("line");
    set.boxes = catalog();

    let mut broken = two_layer_pallet();
    broken.name = "broken".to_string();
    broken.corners.corner1 = broken.corners.corner2;

    set.pallets = vec![two_layer_pallet(), broken, two_layer_pallet()];

    let resolution = resolve_configuration(&set);
    assert!(!resolution.is_complete());
    assert_eq!(resolution.failures.len(), 1);
    assert_eq!(resolution.failures[0].pallet_index, 1);
    assert_eq!(resolution.failures[0].pallet_name, "broken");
    assert!(resolution.failures[0].to_string().contains("broken"));

    assert_eq!(resolution.coordinates.len(), 10);
    assert!(resolution.coordinates[..5].iter().all(|c| c.pallet_index == 0));
    assert!(resolution.coordinates[5..].iter().all(|c| c.pallet_index == 2));

    let saved = resolution.into_saved(set.clone());
    assert!(!saved.complete);
    assert_eq!(saved.config, set);
}

#[test]
fn test_complete_configuration_saves_complete() {
    let mut set = ConfigurationSet::new("line");
    set.boxes = catalog();
    set.pallets = vec![two_layer_pallet()];

    let saved = resolve_configuration(&set).into_saved(set.clone());
    assert!(saved.complete);
    assert_eq!(saved.box_coordinates.len(), 5);

    let json = serde_json::to_string(&saved).unwrap();
    assert!(json.contains("\"boxCoordinates\""));
    assert!(json.contains("\"dropLocation\""));
}

#[test]
fn test_non_finite_corner_fails_assembly() {
    let catalog = catalog();
    for bad in [f64::NAN, f64::INFINITY] {
        let mut pallet = two_layer_pallet();
        pallet.corners.corner3 = Coordinate3::new(bad, 0.0, 0.0);

        let result = assemble_coordinates(&pallet, &catalog);
        assert!(matches!(result, Err(LayoutError::DegenerateGeometry(_))));
    }
}
