//! Per-frame rain tick
//!
//! Spawn, compact, draw and grow the rings, in that order.

use rand::Rng;

use super::draw::DrawList;
use super::ring::{Ring, Viewport};
use super::state::RainState;
use crate::color::hue_saturation_lightness_to_rgb;
use crate::consts::*;

/// Advance the rain by one tick and append the frame's draw calls to `out`.
///
/// Returns the number of rings alive after the tick.
pub fn advance_and_render(state: &mut RainState, viewport: Viewport, out: &mut DrawList) -> usize {
    state.time_ticks += 1;

    // Empty sky always gets a ring; otherwise roll for one while there is room
    let spawn = state.live_count() == 0
        || (!state.is_full() && {
            let intensity = state.config.rain_intensity;
            state.rng_mut().random_range(0..SPAWN_ROLL_RANGE) < intensity
        });
    if spawn {
        let config = state.config.clone();
        let ring = Ring::spawn(state.rng_mut(), viewport, &config);
        log::trace!(
            "spawn ring at ({}, {}) r={}..{} hue={}",
            ring.center.x,
            ring.center.y,
            ring.inner_radius,
            ring.outer_radius,
            ring.hue
        );
        state.rings_mut().push(ring);
    }

    // Stable compaction of finished rings
    state.rings_mut().retain(|ring| !ring.is_spent());

    for ring in state.rings() {
        draw_ring(ring, out);
    }

    let closing_gap = state.config.closing_gap;
    for ring in state.rings_mut() {
        ring.advance(closing_gap);
    }

    // A ring dies the tick its inner edge crosses the outer edge
    state.rings_mut().retain(|ring| !ring.is_spent());

    state.live_count()
}

/// Draw the current rings without advancing them (e.g. to repaint after a resize)
pub fn render_only(state: &RainState, out: &mut DrawList) {
    for ring in state.rings().iter().filter(|r| !r.is_spent()) {
        draw_ring(ring, out);
    }
}

/// One color call, then a circle for every radius across the band
fn draw_ring(ring: &Ring, out: &mut DrawList) {
    let rgb = hue_saturation_lightness_to_rgb(
        ring.hue as f32,
        RING_SATURATION,
        RING_LIGHTNESS,
        out.range(),
    );
    out.set_color(rgb, RING_ALPHA);

    let center = ring.center.as_vec2();
    for radius in ring.radii() {
        out.circle(center, radius as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ChannelRange;
    use crate::sim::config::{RainConfig, RainPreset};
    use crate::sim::draw::DrawCall;
    use glam::{IVec2, Vec2};
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport::new(800, 600);

    fn state_with(capacity: usize, seed: u64) -> RainState {
        let config = RainConfig {
            capacity,
            ..Default::default()
        };
        RainState::new(seed, config).unwrap()
    }

    fn ring(outer: i32, inner: i32, outer_rate: i32, inner_rate: i32) -> Ring {
        Ring {
            center: IVec2::new(100, 100),
            outer_radius: outer,
            inner_radius: inner,
            outer_rate,
            inner_rate,
            hue: 0,
        }
    }

    #[test]
    fn test_forced_spawn_on_empty() {
        let mut state = state_with(1, 12345);
        let mut out = DrawList::new(ChannelRange::Unit);

        let live = advance_and_render(&mut state, VIEW, &mut out);
        assert_eq!(live, 1);

        // Replay the spawn from the same seed to learn its initial geometry
        let mut replay = state_with(1, 12345);
        let config = replay.config.clone();
        let spawned = Ring::spawn(replay.rng_mut(), VIEW, &config);

        let ring = state.rings()[0];
        assert_eq!(ring.inner_rate, spawned.inner_rate);
        assert_eq!(ring.inner_radius, spawned.inner_radius + spawned.inner_rate);
        assert_eq!(ring.center, spawned.center);
        assert_eq!(out.circle_count(), spawned.band_width() as usize);
    }

    #[test]
    fn test_ring_retires_after_crossing() {
        let mut state = state_with(2, 1);
        state.push_ring(ring(50, 49, 0, 5));
        // No random rain, so the test ring is the only one
        state.config.rain_intensity = 0;
        let mut out = DrawList::new(ChannelRange::Unit);

        // Draws radius 49 once, then the inner edge jumps past 50
        assert_eq!(advance_and_render(&mut state, VIEW, &mut out), 0);
        assert_eq!(out.circle_count(), 1);
        assert!(state.rings().is_empty());

        // Empty sky: the next tick spawns a fresh ring
        out.clear();
        assert_eq!(advance_and_render(&mut state, VIEW, &mut out), 1);
    }

    #[test]
    fn test_full_state_does_not_spawn() {
        let mut state = state_with(1, 3);
        state.config.rain_intensity = SPAWN_ROLL_RANGE;
        state.push_ring(ring(200, 10, 1, 2));
        let mut out = DrawList::new(ChannelRange::Unit);

        assert_eq!(advance_and_render(&mut state, VIEW, &mut out), 1);
        assert_eq!(state.rings()[0].inner_radius, 12);
    }

    #[test]
    fn test_certain_rain_fills_capacity() {
        let mut state = state_with(4, 3);
        state.config.rain_intensity = SPAWN_ROLL_RANGE;
        let mut out = DrawList::new(ChannelRange::Unit);

        for _ in 0..4 {
            advance_and_render(&mut state, VIEW, &mut out);
        }
        assert_eq!(state.live_count(), 4);
    }

    #[test]
    fn test_no_rain_keeps_single_ring() {
        let mut state = state_with(7, 9);
        state.config.rain_intensity = 0;
        let mut out = DrawList::new(ChannelRange::Unit);

        for _ in 0..200 {
            let live = advance_and_render(&mut state, VIEW, &mut out);
            assert!(live <= 1);
        }
    }

    #[test]
    fn test_compaction_is_stable() {
        let mut state = state_with(4, 1);
        state.config.rain_intensity = 0;
        let a = Ring { hue: 1, ..ring(80, 10, 1, 2) };
        let spent = Ring { hue: 2, ..ring(30, 30, 1, 2) };
        let b = Ring { hue: 3, ..ring(90, 20, 1, 2) };
        state.push_ring(a);
        state.push_ring(spent);
        state.push_ring(b);

        let mut out = DrawList::new(ChannelRange::Unit);
        assert_eq!(advance_and_render(&mut state, VIEW, &mut out), 2);
        let hues: Vec<u8> = state.rings().iter().map(|r| r.hue).collect();
        assert_eq!(hues, vec![1, 3]);
    }

    #[test]
    fn test_draw_calls_per_ring() {
        let mut state = state_with(2, 1);
        state.config.rain_intensity = 0;
        state.push_ring(ring(30, 27, 1, 2));
        let mut out = DrawList::new(ChannelRange::Byte);
        advance_and_render(&mut state, VIEW, &mut out);

        let calls = out.calls();
        assert_eq!(calls.len(), 4);
        match calls[0] {
            DrawCall::Color { rgb, alpha } => {
                assert_eq!(rgb.to_bytes(), [255, 0, 0]);
                assert_eq!(alpha, RING_ALPHA);
            }
            other => panic!("expected color first, got {other:?}"),
        }
        let radii: Vec<f32> = calls[1..]
            .iter()
            .map(|c| match c {
                DrawCall::Circle { radius, center } => {
                    assert_eq!(*center, Vec2::new(100.0, 100.0));
                    *radius
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(radii, vec![27.0, 28.0, 29.0]);
    }

    #[test]
    fn test_render_only_does_not_advance() {
        let mut state = state_with(2, 1);
        state.push_ring(ring(30, 27, 1, 2));
        let mut out = DrawList::new(ChannelRange::Unit);
        render_only(&state, &mut out);
        assert_eq!(out.circle_count(), 3);
        assert_eq!(state.rings()[0].inner_radius, 27);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_same_seed_same_rain() {
        let mut a = RainState::new(77, RainConfig::from_preset(RainPreset::Classic)).unwrap();
        let mut b = RainState::new(77, RainConfig::from_preset(RainPreset::Classic)).unwrap();
        let mut out_a = DrawList::new(ChannelRange::Unit);
        let mut out_b = DrawList::new(ChannelRange::Unit);
        for _ in 0..100 {
            advance_and_render(&mut a, VIEW, &mut out_a);
            advance_and_render(&mut b, VIEW, &mut out_b);
        }
        assert_eq!(a.rings(), b.rings());
        assert_eq!(out_a.calls(), out_b.calls());
    }

    #[test]
    fn test_colors_are_configured_range() {
        let mut state = state_with(1, 4);
        let mut out = DrawList::new(ChannelRange::Byte);
        advance_and_render(&mut state, VIEW, &mut out);

        let hue = state.rings()[0].hue as f32;
        let expected = hue_saturation_lightness_to_rgb(hue, 1.0, 0.5, ChannelRange::Byte);
        assert_eq!(
            out.calls()[0],
            DrawCall::Color {
                rgb: expected,
                alpha: RING_ALPHA
            }
        );
        assert!(expected.r.max(expected.g).max(expected.b) > 254.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn live_rings_never_spent_nor_over_capacity(
            seed in any::<u64>(),
            capacity in 1usize..12,
            intensity in 0u32..=256,
            closing_gap in any::<bool>(),
            w in 0u32..2000,
            h in 0u32..2000,
        ) {
            let config = RainConfig {
                capacity,
                rain_intensity: intensity,
                closing_gap,
                ..Default::default()
            };
            let mut state = RainState::new(seed, config).unwrap();
            let mut out = DrawList::new(ChannelRange::Unit);
            for _ in 0..150 {
                out.clear();
                let live = advance_and_render(&mut state, Viewport::new(w, h), &mut out);
                prop_assert!(live <= capacity);
                prop_assert_eq!(live, state.live_count());
                prop_assert!(state.rings().iter().all(|r| r.inner_radius < r.outer_radius));
                // One color call per ring drawn; some of those may have retired since
                let colors = out.len() - out.circle_count();
                prop_assert!(colors >= live);
                prop_assert!(colors <= capacity);
            }
        }

        #[test]
        fn ring_lifetime_bounded_by_spawn_gap(
            seed in any::<u64>(),
            closing_gap in any::<bool>(),
        ) {
            use rand::SeedableRng;
            let config = RainConfig { closing_gap, ..Default::default() };
            let mut rng = rand_pcg::Pcg32::seed_from_u64(seed);
            let mut ring = Ring::spawn(&mut rng, VIEW, &config);
            let bound = ring.band_width();
            let mut age = 0;
            while !ring.is_spent() {
                ring.advance(closing_gap);
                age += 1;
                prop_assert!(age <= bound, "ring outlived its gap: {:?}", ring);
            }
        }
    }
}
