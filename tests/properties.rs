use proptest::prelude::*;
use room_layout::{
    DungeonGenerator, DungeonSettings, LayoutGenerator, MazeGenerator, MazeSettings,
};

fn dungeon_settings() -> impl Strategy<Value = DungeonSettings> {
    (any::<u64>(), 0.0..=1.0f64, 0usize..8, 1usize..4, any::<bool>(), 0.5f32..4.0).prop_map(
        |(seed, density, iterations, path_width, smooth_edges, height)| DungeonSettings {
            seed,
            density,
            iterations,
            path_width,
            smooth_edges,
            height,
        },
    )
}

fn maze_settings() -> impl Strategy<Value = MazeSettings> {
    (any::<u64>(), 0usize..12, 0.0..=1.0f64, any::<bool>(), 0.5f32..4.0).prop_map(
        |(seed, loop_count, dead_end_keep_chance, smooth_edges, height)| MazeSettings {
            seed,
            loop_count,
            dead_end_keep_chance,
            smooth_edges,
            height,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dungeon_output_is_deterministic_walled_and_connected(
        settings in dungeon_settings(),
        width in 3usize..40,
        height in 3usize..40,
    ) {
        let mut generator = DungeonGenerator::new(settings.clone()).unwrap();
        let grid = generator.generate(width, height).unwrap();

        prop_assert_eq!(grid.size(), (width, height));
        prop_assert!(grid.border_is_wall());
        prop_assert!(grid.regions().len() <= 1);

        let again = DungeonGenerator::new(settings).unwrap().generate(width, height).unwrap();
        prop_assert_eq!(grid, again);
    }

    #[test]
    fn maze_output_is_deterministic_walled_and_connected(
        settings in maze_settings(),
        width in 3usize..40,
        height in 3usize..40,
    ) {
        let mut generator = MazeGenerator::new(settings.clone()).unwrap();
        let grid = generator.generate(width, height).unwrap();

        prop_assert_eq!(grid.size(), (width, height));
        prop_assert!(grid.border_is_wall());
        prop_assert!(grid.regions().len() <= 1);

        let again = MazeGenerator::new(settings).unwrap().generate(width, height).unwrap();
        prop_assert_eq!(grid, again);
    }

    #[test]
    fn fully_pruned_mazes_have_no_dead_ends(
        seed in any::<u64>(),
        loop_count in 0usize..12,
        width in 3usize..40,
        height in 3usize..40,
    ) {
        let settings = MazeSettings::default()
            .with_seed(seed)
            .with_loop_count(loop_count)
            .with_dead_end_keep_chance(0.0);
        let grid = MazeGenerator::new(settings).unwrap().generate(width, height).unwrap();
        prop_assert!(grid.dead_ends().is_empty());
    }
}
