//! Property-based tests for the core containers.
//!
//! 1. **Stack add/remove** - `add(t)` followed by `remove(&t)` restores the
//!    previous sequence exactly whenever `t` was not already in the stack.
//! 2. **Duplicate add** - adding an item whose name exists leaves membership,
//!    order and index unchanged and reports rejection.
//! 3. **Region queries** - every reported cell lies inside the queried
//!    rectangle, is non-empty, and appears in row-major order.

use proptest::prelude::*;
use stackmap_core::{
    NamedResource, NamedResourceCollection, Tile, TileCoord, TileGrid, TilePool, TileRect,
    TileStack,
};

fn pool_tiles(n: usize) -> Vec<Tile> {
    let mut pool = TilePool::new("Props", 16, 16);
    (0..n as u32).map(|i| pool.add_tile(i)).collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Named {
    name: String,
    tag: usize,
}

impl NamedResource for Named {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

proptest! {
    #[test]
    fn stack_add_then_remove_restores(picks in prop::collection::vec(0usize..4, 0..12), extra in 0usize..4) {
        let tiles = pool_tiles(4);
        let mut stack: TileStack = picks.iter().map(|&i| tiles[i].clone()).collect();
        let before = stack.clone();

        stack.add(tiles[extra].clone());
        stack.remove(&tiles[extra]);

        // remove() takes the lowest match, so when the tile was already
        // present the pushed copy stays on top instead.

        if before.contains(&tiles[extra]) {
            prop_assert_eq!(stack.len(), before.len());
            let mut expected: Vec<Tile> = before.tiles().to_vec();
            let pos = expected.iter().position(|t| *t == tiles[extra]).unwrap();
            expected.remove(pos);
            expected.push(tiles[extra].clone());
            prop_assert_eq!(stack.tiles(), expected.as_slice());
        } else {
            prop_assert_eq!(stack, before);
        }
    }

    #[test]
    fn duplicate_add_changes_nothing(names in prop::collection::btree_set("[a-e]{1,2}", 1..8), pick in any::<prop::sample::Index>()) {
        let names: Vec<String> = names.into_iter().collect();
        let mut collection = NamedResourceCollection::new();
        for (tag, name) in names.iter().enumerate() {
            collection.add(Named { name: name.clone(), tag }).unwrap();
        }
        let dup = pick.get(&names).clone();

        let result = collection.add(Named { name: dup.clone(), tag: usize::MAX });

        prop_assert!(result.is_err());
        prop_assert_eq!(collection.len(), names.len());
        let order: Vec<String> = collection.names().map(str::to_string).collect();
        prop_assert_eq!(order, names.clone());
        let expected_tag = names.iter().position(|n| *n == dup).unwrap();
        prop_assert_eq!(collection[dup.as_str()].tag, expected_tag);
    }

    #[test]
    fn region_reports_sorted_non_empty_cells(
        cells in prop::collection::vec((0i32..10, 0i32..10, any::<bool>()), 0..30),
        rect in (-2i32..10, -2i32..10, 0u32..8, 0u32..8),
    ) {
        let tiles = pool_tiles(1);
        let mut grid = TileGrid::new(10, 10, 16, 16);
        for &(x, y, filled) in &cells {
            let stack = if filled { TileStack::from_tiles([tiles[0].clone()]) } else { TileStack::new() };
            grid.set_stack(TileCoord::new(x, y), Some(stack));
        }
        let rect = TileRect::new(rect.0, rect.1, rect.2, rect.3);

        let found: Vec<TileCoord> = grid.region(rect).map(|(c, _)| c).collect();

        let mut expected: Vec<TileCoord> = rect
            .coords()
            .filter(|c| grid.stack(*c).map(|s| !s.is_empty()).unwrap_or(false))
            .collect();
        expected.sort();
        prop_assert_eq!(found, expected);
    }
}
