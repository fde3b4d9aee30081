use verlet_cloth::{ClothGrid, Corners, Vec3};

fn skewed() -> ClothGrid {
    ClothGrid::new(
        5,
        3,
        Corners::new(
            Vec3::new(-1.0, 1.0, 0.5),
            Vec3::new(2.0, 1.5, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(2.5, -0.5, -0.5),
        ),
    )
    .unwrap()
}

#[test]
fn origin_sample_is_upper_left() {
    let grid = skewed();
    assert_eq!(grid.sample_position(0.0, 0.0), grid.upper_left());
    assert_eq!(grid.sample_rest_position(0.0, 0.0), grid.upper_left());
}

#[test]
fn far_corner_sample_is_near_lower_right() {
    let grid = skewed();
    let p = grid.sample_position(1.0, 1.0);
    assert!((p - grid.lower_right()).length() < 1e-5, "{:?}", p);
    let q = grid.sample_position(0.0, 1.0);
    assert!((q - grid.lower_left()).length() < 1e-5, "{:?}", q);
    let r = grid.sample_position(1.0, 0.0);
    assert!((r - grid.upper_right()).length() < 1e-5, "{:?}", r);
}

#[test]
fn lattice_points_sample_exactly() {
    let mut grid = skewed();
    grid.set_velocity(7, Vec3::new(0.0, 0.0, 3600.0));
    grid.update(1.0 / 60.0, 2, 1);

    for y in 0..2 {
        for x in 0..4 {
            let u = x as f64 / 4.0;
            let v = y as f64 / 2.0;
            assert_eq!(grid.sample_position(u, v), grid.position(grid.index(x, y)));
        }
    }
}

#[test]
fn lattice_points_sample_exactly_at_odd_resolution() {
    let mut grid: ClothGrid = ClothGrid::new(
        50,
        50,
        Corners::new(
            Vec3::new(-1.0, 1.0, 0.5),
            Vec3::new(2.0, 1.5, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(2.5, -0.5, -0.5),
        ),
    )
    .unwrap();
    grid.set_velocity(1234, Vec3::new(0.0, 0.0, 3600.0));
    grid.update(1.0 / 60.0, 2, 1);

    for y in 0..49 {
        for x in 0..49 {
            let u = x as f64 / 49.0;
            let v = y as f64 / 49.0;
            let i = grid.index(x, y);
            assert_eq!(grid.sample_position(u, v), grid.position(i), "({}, {})", x, y);
            assert_eq!(grid.sample_rest_position(u, v), grid.rest_position(i), "({}, {})", x, y);
        }
    }
}

#[test]
fn rest_sampling_ignores_motion() {
    let mut grid = skewed();
    let before = grid.sample_rest_position(0.3, 0.6);
    grid.set_global_velocity(Vec3::new(0.0, 0.0, 100.0));
    grid.update(1.0 / 60.0, 2, 1);
    assert_eq!(grid.sample_rest_position(0.3, 0.6), before);
    assert_ne!(grid.sample_position(0.3, 0.6), before);
}

#[test]
fn out_of_range_lookups_are_clamped() {
    let grid = skewed();
    assert_eq!(grid.sample_position(-3.0, -0.1), grid.upper_left());
    assert_eq!(grid.sample_position(7.0, 2.0), grid.sample_position(1.0, 1.0));
}

#[test]
fn normals_follow_current_positions() {
    let mut grid: ClothGrid = ClothGrid::new(3, 3, Corners::default()).unwrap();
    let flat = grid.sample_normal(0.5, 0.5);
    assert_eq!(flat.z, 0.0);

    let south = grid.index(1, 2);
    grid.set_position(south, grid.position(south) + Vec3::new(0.0, 0.0, 1.0), 1.0);

    // The centre vertex picks up `self - south` = (.., .., -1) over four neighbours.
    let bent = grid.sample_normal(0.5, 0.5);
    assert!((bent.z + 0.25).abs() < 1e-12, "{:?}", bent);
    assert_eq!(grid.normals().len(), 9);
}

#[test]
fn batched_normals_match_single_lookups() {
    let mut grid = skewed();
    grid.set_velocity(6, Vec3::new(0.0, 0.0, 1800.0));
    grid.update(1.0 / 60.0, 2, 1);

    let lookups = [(0.0, 0.0), (0.2, 0.7), (0.5, 0.5), (1.0, 1.0)];
    let batch = grid.sample_normals(&lookups);
    for (&(u, v), n) in lookups.iter().zip(&batch) {
        assert_eq!(grid.sample_normal(u, v), *n);
    }
}
