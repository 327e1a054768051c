//! Tests for mosaic planning, rendering and pixelation

#[cfg(test)]
mod tests {
    use ndarray::{Array3, s};
    use photomosaic::MosaicError;
    use photomosaic::algorithm::assembler::{MosaicAssembler, assemble, pixelate};
    use photomosaic::algorithm::pool::SourcePool;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn solid(height: usize, width: usize, rgb: [u8; 3]) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(_, _, c)| {
            rgb.get(c).copied().unwrap_or(0)
        })
    }

    fn red_blue_pool(side: usize) -> SourcePool {
        let paths = ["red.png", "blue.png"];
        SourcePool::build(&paths, |path| {
            if path.ends_with("red.png") {
                Ok(solid(side, side, RED))
            } else {
                Ok(solid(side, side, BLUE))
            }
        })
        .unwrap()
    }

    // Tests a uniform input maps every cell to the matching tile
    // Verified by matching against the last tile only
    #[test]
    fn test_all_red_input() {
        let pool = red_blue_pool(2);
        let input = solid(4, 4, RED);

        let output = assemble(&input, 2, &pool).unwrap();
        assert_eq!(output, solid(4, 4, RED));
    }

    // Tests single-pixel cells pick tiles independently
    // Verified by reusing the first cell's match for every cell
    #[test]
    fn test_single_pixel_cells() {
        let pool = red_blue_pool(2);
        let mut input = solid(2, 2, BLUE);
        input.slice_mut(s![0, 0, ..]).assign(&ndarray::arr1(&RED));

        let output = assemble(&input, 1, &pool).unwrap();
        assert_eq!(output, input);
    }

    // Tests output dimensions drop the trailing remainder
    // Verified by keeping partial cells
    #[test]
    fn test_output_dimensions_trimmed() {
        let pool = red_blue_pool(3);
        for (height, width, tile) in [(7, 5, 2), (9, 9, 3), (10, 4, 4), (5, 11, 5)] {
            let input = solid(height, width, BLUE);
            let output = assemble(&input, tile, &pool).unwrap();
            assert_eq!(
                output.dim(),
                (height - height % tile, width - width % tile, 3)
            );
        }
    }

    // Tests tile size exceeding the input is rejected
    // Verified by returning an empty output instead
    #[test]
    fn test_oversized_tile_rejected() {
        let pool = red_blue_pool(2);
        let input = solid(3, 8, RED);

        let result = assemble(&input, 4, &pool);
        assert!(matches!(result, Err(MosaicError::InvalidTileSize { .. })));
        assert!(matches!(
            assemble(&input, 0, &pool),
            Err(MosaicError::InvalidTileSize { .. })
        ));
    }

    // Tests non-RGB inputs are rejected
    // Verified by averaging only the first channel
    #[test]
    fn test_non_rgb_input_rejected() {
        let pool = red_blue_pool(2);
        let input = Array3::<u8>::zeros((4, 4, 4));
        assert!(matches!(
            assemble(&input, 2, &pool),
            Err(MosaicError::InvalidImage { .. })
        ));
    }

    // Tests plan records each cell's match in row-major position
    // Verified by transposing the assignment grid
    #[test]
    fn test_plan_assignments() {
        let pool = red_blue_pool(2);
        let mut input = solid(4, 6, BLUE);
        input.slice_mut(s![2.., 4.., ..]).assign(&solid(2, 2, RED));

        let assembler = MosaicAssembler::new(&pool, 2);
        let plan = assembler.plan(&input).unwrap();

        assert_eq!(plan.cells().dim(), (2, 3));
        assert_eq!(plan.tile_at(1, 2), Some(0));
        assert_eq!(plan.tile_at(0, 0), Some(1));
        assert_eq!(plan.tile_at(2, 0), None);
        assert_eq!(plan.distinct_tiles(), vec![0, 1]);
        assert_eq!(plan.grid().cell_count(), 6);
        assert_eq!(plan.cells()[(1, 2)].colour, [255.0, 0.0, 0.0]);
    }

    // Tests the cell observer fires once per cell
    // Verified by observing only the first row
    #[test]
    fn test_plan_with_observes_every_cell() {
        let pool = red_blue_pool(2);
        let input = solid(6, 8, RED);
        let seen = AtomicUsize::new(0);

        let assembler = MosaicAssembler::new(&pool, 2);
        let plan = assembler
            .plan_with(&input, |_, _| {
                seen.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();

        assert_eq!(seen.load(Ordering::Relaxed), plan.grid().cell_count());
        assert_eq!(seen.load(Ordering::Relaxed), 12);
    }

    // Tests tiles larger than the cell are shrunk into place
    // Verified by copying the unresized tile corner
    #[test]
    fn test_tiles_resized_to_cell() {
        let pool = red_blue_pool(5);
        let mut input = solid(4, 4, RED);
        input.slice_mut(s![..2, 2.., ..]).assign(&solid(2, 2, BLUE));

        let assembler = MosaicAssembler::new(&pool, 2);
        let output = assembler.assemble(&input).unwrap();

        assert_eq!(output, input);
        assert_eq!(assembler.tile_size(), 2);
    }

    // Tests rendering a plan with a different tile size fails
    // Verified by skipping the tile size comparison
    #[test]
    fn test_render_rejects_mismatched_plan() {
        let pool = red_blue_pool(2);
        let input = solid(4, 4, RED);

        let plan = MosaicAssembler::new(&pool, 2).plan(&input).unwrap();
        let result = MosaicAssembler::new(&pool, 1).render(&plan);
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }

    // Tests pixelation paints each cell with its rounded mean colour
    // Verified by painting the first pixel's colour instead
    #[test]
    fn test_pixelate_cells() {
        let mut input = solid(2, 5, [0, 0, 0]);
        input.slice_mut(s![0, 0, ..]).assign(&ndarray::arr1(&[255, 255, 255]));
        input.slice_mut(s![.., 2.., ..]).assign(&solid(2, 3, [10, 20, 30]));

        let output = pixelate(&input, 2).unwrap();

        assert_eq!(output.dim(), (2, 4, 3));
        assert_eq!(output.slice(s![.., ..2, ..]), solid(2, 2, [64, 64, 64]));
        assert_eq!(output.slice(s![.., 2.., ..]), solid(2, 2, [10, 20, 30]));
    }
}
