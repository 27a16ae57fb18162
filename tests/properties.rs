// BSL 1.0 License

//! Randomized properties of clip accumulation, checked against a plain pixel set.

use chalkboard_clip::{
    intersect, Arena, ClipAccumulator, ClipPath, PixelBox, PixelBoxExt, RectSink, FULL_RANGE,
};
use chalkboard_geometry::point2;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

const ROUNDS: u64 = 64;
const EXTENT: i32 = 32;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_rects(rng: &mut ChaCha8Rng, count: usize) -> Vec<PixelBox> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(-4..EXTENT);
            let y = rng.gen_range(-4..EXTENT);
            let w = rng.gen_range(1..12);
            let h = rng.gen_range(1..8);
            PixelBox::from_xywh(x, y, w, h)
        })
        .collect()
}

fn pixels<I: IntoIterator<Item = PixelBox>>(rects: I) -> BTreeSet<(i32, i32)> {
    let mut set = BTreeSet::new();
    for rect in rects {
        for y in rect.min.y..rect.max.y {
            for x in rect.min.x..rect.max.x {
                set.insert((x, y));
            }
        }
    }
    set
}

fn accumulate(arena: &Arena, rects: &[PixelBox], transpose: bool) -> ClipPath {
    let mut accum = ClipAccumulator::begin(arena, transpose);
    for rect in rects {
        accum.fill_box(*rect).unwrap();
        if let Err(violation) = accum.validate() {
            panic!("after inserting {:?}: {}", rect, violation);
        }
    }
    accum.end().unwrap()
}

#[test]
fn region_matches_pixel_set() {
    init();
    let arena = Arena::new();

    for seed in 0..ROUNDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.gen_range(1..40);
        let rects = random_rects(&mut rng, count);

        let clip = accumulate(&arena, &rects, false);
        let expected = pixels(rects.iter().copied());

        let area: u64 = clip.rects().map(|rect| rect.pixel_area()).sum();
        assert_eq!(area, expected.len() as u64, "seed {}", seed);
        assert_eq!(pixels(clip.rects()), expected, "seed {}", seed);

        for y in -6..EXTENT + 14 {
            for x in -6..EXTENT + 14 {
                assert_eq!(
                    clip.contains_point(x, y),
                    expected.contains(&(x, y)),
                    "seed {} at ({}, {})",
                    seed,
                    x,
                    y
                );
            }
        }
    }

    assert_eq!(arena.live_nodes(), 0);
}

#[test]
fn order_does_not_matter() {
    init();
    let arena = Arena::new();

    for seed in 0..ROUNDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.gen_range(2..30);
        let mut rects = random_rects(&mut rng, count);

        let reference: Vec<_> = accumulate(&arena, &rects, false).rects().collect();
        for _ in 0..4 {
            rects.shuffle(&mut rng);
            let shuffled: Vec<_> = accumulate(&arena, &rects, false).rects().collect();
            assert_eq!(shuffled, reference, "seed {}", seed);
        }
    }
}

#[test]
fn disjoint_rects_in_any_order() {
    init();
    let arena = Arena::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    // a grid of cells with random gaps between them
    let mut rects = vec![];
    for row in 0..6 {
        for column in 0..6 {
            if rng.gen_bool(0.7) {
                rects.push(PixelBox::from_xywh(column * 5, row * 4, 5, 4));
            }
        }
    }

    let reference: Vec<_> = accumulate(&arena, &rects, false).rects().collect();
    for _ in 0..16 {
        rects.shuffle(&mut rng);
        let shuffled: Vec<_> = accumulate(&arena, &rects, false).rects().collect();
        assert_eq!(shuffled, reference);
    }
}

#[test]
fn accumulating_twice_changes_nothing() {
    init();
    let arena = Arena::new();

    for seed in 0..ROUNDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.gen_range(1..25);
        let rects = random_rects(&mut rng, count);

        let once: Vec<_> = accumulate(&arena, &rects, false).rects().collect();
        let doubled: Vec<_> = rects.iter().chain(rects.iter()).copied().collect();
        let twice: Vec<_> = accumulate(&arena, &doubled, false).rects().collect();
        assert_eq!(once, twice, "seed {}", seed);
    }
}

#[test]
fn transposed_region_covers_the_same_pixels() {
    init();
    let arena = Arena::new();

    for seed in 0..ROUNDS / 4 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rects = random_rects(&mut rng, 20);

        let clip = accumulate(&arena, &rects, true);
        assert!(clip.is_transposed());
        assert_eq!(pixels(clip.rects()), pixels(rects.iter().copied()));
        assert_eq!(clip.bbox(), clip.outer_box());
    }
}

#[test]
fn clip_box_limits_the_region() {
    init();
    let arena = Arena::new();

    for seed in 0..ROUNDS / 4 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rects = random_rects(&mut rng, 20);
        let clip_box = PixelBox::new(
            point2(rng.gen_range(0..10), rng.gen_range(0..10)),
            point2(rng.gen_range(15..30), rng.gen_range(15..30)),
        );

        let mut accum = ClipAccumulator::begin(&arena, false);
        accum.set_pixel_clip_box(clip_box);
        for rect in &rects {
            accum.fill_box(*rect).unwrap();
        }
        let clip = accum.end().unwrap();

        let expected: BTreeSet<_> = pixels(rects.iter().copied())
            .into_iter()
            .filter(|&(x, y)| clip_box.contains(point2(x, y)))
            .collect();
        assert_eq!(pixels(clip.rects()), expected, "seed {}", seed);
        assert!(clip.rects().all(|rect| clip_box.covers(&rect)));
    }
}

#[test]
fn intersection_matches_pixel_set() {
    init();
    let arena = Arena::new();
    let full = ClipPath::from_rect(&arena, FULL_RANGE);

    for seed in 0..ROUNDS / 4 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let first = random_rects(&mut rng, 15);
        let second = random_rects(&mut rng, 15);

        let base = intersect(&arena, &full, &first[..], false).unwrap();
        let clip = intersect(&arena, &base, &second[..], false).unwrap();

        let expected: BTreeSet<_> = pixels(first.iter().copied())
            .intersection(&pixels(second.iter().copied()))
            .copied()
            .collect();
        assert_eq!(pixels(clip.rects()), expected, "seed {}", seed);

        for rect in &second {
            let inside = pixels(Some(*rect)).iter().all(|pixel| expected.contains(pixel));
            assert_eq!(clip.contains_rect(*rect), inside, "seed {} {:?}", seed, rect);
        }
    }
}

#[test]
fn allocation_failure_is_contained() {
    init();

    for seed in 0..ROUNDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rects = random_rects(&mut rng, 30);
        let arena = Arena::with_limit(rng.gen_range(3..24));

        let mut accum = ClipAccumulator::begin(&arena, false);
        let mut failed = false;
        for rect in &rects {
            match accum.fill_box(*rect) {
                Ok(()) => {}
                Err(err) => {
                    assert!(err.is_out_of_memory(), "seed {}: {}", seed, err);
                    failed = true;
                    break;
                }
            }
        }

        accum.validate().unwrap();
        if failed {
            assert!(accum.is_poisoned());
            assert!(accum.fill_box(rects[0]).unwrap_err().is_poisoned());
            accum.discard();
        } else {
            drop(accum.end().unwrap());
        }

        assert_eq!(arena.live_nodes(), 0, "seed {}", seed);
    }
}
