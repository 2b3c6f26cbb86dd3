// tests/tile_resolution.rs
use glam::Vec3;
use robot_tilegrid::{
    DefaultTile, GridConfig, GridError, PlaceholderFactory, SampleTileFactory, TileFactory,
    TileObject, TileResolver, TileType, parse, resolve_grid, resolve_placeholders,
};
use std::collections::HashSet;

/// Test factory: `>` is floor plus robot, `.` is floor, everything else invalid.
struct StackingFactory;

#[derive(Clone, Debug, PartialEq)]
enum Obj {
    Placeholder,
    Floor,
    Robot,
}

impl DefaultTile for Obj {
    fn default_tile() -> Self {
        Obj::Placeholder
    }
}

impl TileFactory for StackingFactory {
    type Tile = Obj;

    fn is_valid_tile(&self, ch: char) -> bool {
        ch == '.' || ch == '>'
    }

    fn resolve(&self, ch: char) -> Option<Vec<Obj>> {
        match ch {
            '>' => Some(vec![Obj::Floor, Obj::Robot]),
            _ => Some(vec![Obj::Floor]),
        }
    }
}

/// Accepts everything but never produces a result.
struct BrokenFactory;

impl TileFactory for BrokenFactory {
    type Tile = Obj;

    fn is_valid_tile(&self, _ch: char) -> bool {
        true
    }

    fn resolve(&self, _ch: char) -> Option<Vec<Obj>> {
        None
    }
}

#[test]
fn test_placeholders_cover_every_cell_once() {
    let grid = parse(&["3x4", "abcd", "efgh", "ijkl"]).unwrap();
    let resolved = resolve_placeholders::<TileObject>(&grid);

    assert_eq!(resolved.object_count(), 12);

    let positions: Vec<Vec3> = resolved.placements().map(|p| p.position).collect();
    let distinct: HashSet<(i32, i32)> = positions
        .iter()
        .map(|p| ((p.x * 2.0) as i32, (p.z * 2.0) as i32))
        .collect();
    assert_eq!(distinct.len(), 12, "Every placeholder on its own cell");

    // offset_row = -1.0, offset_col = -1.5
    for p in resolved.placements() {
        assert!(p.object.is_placeholder());
        assert_eq!(
            p.position,
            Vec3::new(p.row as f32 - 1.0, 0.0, p.col as f32 - 1.5)
        );
    }
}

#[test]
fn test_missing_factory_uses_default_tile() {
    let grid = parse(&["1x2", "?!"]).unwrap();
    let resolved = resolve_grid::<StackingFactory>(&grid, None).unwrap();

    assert_eq!(resolved.cell(0, 0), Some(&[Obj::Placeholder][..]));
    assert_eq!(resolved.cell(0, 1), Some(&[Obj::Placeholder][..]));
}

#[test]
fn test_placeholder_factory_matches_no_factory() {
    let grid = parse(&["2x2", "..", ".."]).unwrap();
    let with_factory =
        resolve_grid(&grid, Some(&PlaceholderFactory::<TileObject>::new())).unwrap();
    let without = resolve_placeholders::<TileObject>(&grid);
    assert_eq!(with_factory, without);
}

#[test]
fn test_stacked_objects_share_a_position() {
    let grid = parse(&["1x1", ">"]).unwrap();
    let resolved = resolve_grid(&grid, Some(&StackingFactory)).unwrap();

    let placements: Vec<_> = resolved.placements().collect();
    assert_eq!(placements.len(), 2);
    assert_eq!(*placements[0].object, Obj::Floor);
    assert_eq!(*placements[1].object, Obj::Robot);
    assert_eq!(placements[0].position, Vec3::ZERO);
    assert_eq!(placements[1].position, Vec3::ZERO);
}

#[test]
fn test_invalid_character_names_char_and_cell() {
    let grid = parse(&["2x3", "...", ".#."]).unwrap();
    let err = resolve_grid(&grid, Some(&StackingFactory)).unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidTileCharacter {
            ch: '#',
            row: 1,
            col: 1
        }
    );
    assert!(err.to_string().contains("'#'"));
    assert!(err.to_string().contains("1x1"));
}

#[test]
fn test_null_result_fails() {
    let grid = parse(&["1x1", "."]).unwrap();
    let err = resolve_grid(&grid, Some(&BrokenFactory)).unwrap_err();
    assert_eq!(
        err,
        GridError::NullTileResult {
            ch: '.',
            row: 0,
            col: 0
        }
    );
}

#[test]
fn test_cell_size_and_floor_height_scale_positions() {
    let config = GridConfig {
        cell_size: 2.0,
        floor_height: 0.5,
        ..Default::default()
    };
    let grid = parse(&["1x3", "..."]).unwrap();
    let resolved = TileResolver::new(config)
        .resolve(&grid, Some(&StackingFactory))
        .unwrap();

    let xs: Vec<Vec3> = resolved.placements().map(|p| p.position).collect();
    assert_eq!(
        xs,
        vec![
            Vec3::new(0.0, 0.5, -2.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 2.0),
        ]
    );
}

#[test]
fn test_sample_factory_stacks_markers_on_floor() {
    let grid = parse(&["1x5", ".>vX#"]).unwrap();
    let resolved = resolve_grid(&grid, Some(&SampleTileFactory::default())).unwrap();

    let types = |col| -> Vec<Option<TileType>> {
        resolved
            .cell(0, col)
            .unwrap()
            .iter()
            .map(|o| o.tile_type)
            .collect()
    };
    assert_eq!(types(0), vec![Some(TileType::Floor)]);
    assert_eq!(types(1), vec![Some(TileType::Floor), Some(TileType::Robot)]);
    assert_eq!(types(2), vec![Some(TileType::Floor), Some(TileType::Robot)]);
    assert_eq!(types(3), vec![Some(TileType::Floor), Some(TileType::Exit)]);
    assert_eq!(types(4), vec![Some(TileType::Floor), Some(TileType::Wall)]);
    assert_eq!(resolved.object_count(), 9);

    // `v` faces +row (scene +X), `>` faces +col (scene +Z).
    let east = resolved.cell(0, 1).unwrap()[1].rotation * Vec3::Z;
    let south = resolved.cell(0, 2).unwrap()[1].rotation * Vec3::Z;
    assert!(east.abs_diff_eq(Vec3::Z, 1e-5));
    assert!(south.abs_diff_eq(Vec3::X, 1e-5));
}

#[test]
fn test_sample_factory_rejects_unknown_characters() {
    let grid = parse(&["1x2", ".?"]).unwrap();
    let err = resolve_grid(&grid, Some(&SampleTileFactory::default())).unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidTileCharacter {
            ch: '?',
            row: 0,
            col: 1
        }
    );
}
