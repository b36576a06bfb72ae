//! Pairwise mass transfer and popping
//!
//! Every overlapping pair moves a little radius from the smaller body to the
//! larger one. A winner that grows past [`POP_SIZE`] shrinks and bursts into
//! four diagonal fragments.
//!
//! The scan runs over the bodies present when it starts. Removals and pop
//! fragments are buffered in a [`PairScan`] and applied once every pair has
//! been looked at, so no index shifts mid-scan.

use glam::Vec2;
use rand::Rng;

use super::collision::bodies_overlap;
use super::state::{Body, World};
use crate::consts::*;

/// Diagonal directions pop fragments fly off in
const POP_DIAGONALS: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// Outcome of one transfer between a winner and a loser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Loser fell to zero radius or below
    pub loser_destroyed: bool,
    /// Winner crossed the growth ceiling and was divided
    pub winner_popped: bool,
}

/// Deferred mutations collected during a pair scan
#[derive(Debug, Default)]
pub struct PairScan {
    /// Store indices of destroyed bodies (snapshot indexing)
    pub removals: Vec<usize>,
    /// Bodies spawned by pops, appended after removals
    pub spawns: Vec<Body>,
    /// Number of overlapping pairs resolved
    pub contacts: usize,
}

/// Index of the winner for an overlapping pair `(i, j)` with `i < j`
///
/// Strictly larger radius wins; ties go to `j`, since only a strictly larger
/// first operand beats the second.
#[inline]
pub fn pick_winner(bodies: &[Body], i: usize, j: usize) -> (usize, usize) {
    if bodies[i].radius > bodies[j].radius {
        (i, j)
    } else {
        (j, i)
    }
}

/// Move radius from `loser` to `winner` and pop the winner if it outgrew the
/// ceiling. Pop fragments go to `spawns`; `random` supplies uniform [0, 1).
pub fn transfer_mass(
    winner: &mut Body,
    loser: &mut Body,
    spawns: &mut Vec<Body>,
    mut random: impl FnMut() -> f32,
) -> Transfer {
    let eaten = if loser.radius < THIN_THRESHOLD {
        THIN_TRANSFER
    } else {
        TRANSFER
    };
    winner.radius += TRANSFER;
    loser.radius -= eaten;

    let winner_popped = winner.radius > POP_SIZE;
    if winner_popped {
        winner.radius /= POP_DIVISOR;
        for dir in POP_DIAGONALS {
            spawns.push(pop_fragment(winner, dir, Vec2::new(random(), random())));
        }
    }

    Transfer {
        loser_destroyed: loser.is_destroyed(),
        winner_popped,
    }
}

/// A fragment thrown out of a popped body along diagonal `dir`
///
/// Each velocity component takes its own random magnitude from `speed`,
/// signed by `dir`.
pub fn pop_fragment(parent: &Body, dir: Vec2, speed: Vec2) -> Body {
    Body {
        pos: parent.pos + dir * POP_SPREAD,
        vel: dir * speed,
        ..*parent
    }
}

/// Two distinct elements of a slice, mutably
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert!(a != b);
    if a < b {
        let (head, tail) = bodies.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

/// Resolve every overlapping pair in the world, O(n²)
///
/// Radius changes apply immediately and are seen by later pairs. Bodies
/// destroyed earlier in the scan take no further part in it.
pub fn resolve_collisions(world: &mut World) -> PairScan {
    let mut scan = PairScan::default();
    let count = world.bodies.len();
    let mut destroyed = vec![false; count];

    for i in 0..count {
        for j in (i + 1)..count {
            if destroyed[i] {
                break;
            }
            if destroyed[j] {
                continue;
            }

            let World { bodies, rng, .. } = &mut *world;
            if !bodies_overlap(&bodies.as_slice()[i], &bodies.as_slice()[j]) {
                continue;
            }
            let (w, l) = pick_winner(bodies.as_slice(), i, j);

            let (winner, loser) = pair_mut(bodies.as_mut_slice(), w, l);
            let result =
                transfer_mass(winner, loser, &mut scan.spawns, || rng.random::<f32>());
            scan.contacts += 1;

            if result.winner_popped {
                log::debug!(
                    "Body {} popped at {:?} (radius now {:.2})",
                    w,
                    winner.pos,
                    winner.radius
                );
            }
            if result.loser_destroyed {
                log::debug!("Body {} destroyed by body {}", l, w);
                destroyed[l] = true;
                scan.removals.push(l);
            }
        }
    }

    scan
}

/// Apply a finished scan: drop destroyed bodies, then append pop fragments
pub fn apply_scan(world: &mut World, scan: &mut PairScan) {
    world.bodies.remove_indices(&scan.removals);
    world.bodies.extend(scan.spawns.drain(..));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;

    fn world_with(bodies: &[Body]) -> World {
        let mut world = World::empty(Arena::new(1000.0, 1000.0), 3);
        world.bodies.extend(bodies.iter().copied());
        world
    }

    fn body(x: f32, y: f32, r: f32, player: bool) -> Body {
        Body::new(Vec2::new(x, y), Vec2::ZERO, r, player)
    }

    fn collide(world: &mut World) -> PairScan {
        let mut scan = resolve_collisions(world);
        apply_scan(world, &mut scan);
        scan
    }

    #[test]
    fn test_basic_transfer() {
        let mut world = world_with(&[body(100.0, 100.0, 5.0, false), body(106.0, 100.0, 3.0, false)]);
        let scan = collide(&mut world);

        assert_eq!(scan.contacts, 1);
        assert_eq!(world.bodies.len(), 2);
        assert!((world.bodies.get(0).unwrap().radius - 5.1).abs() < 1e-5);
        assert!((world.bodies.get(1).unwrap().radius - 2.9).abs() < 1e-5);
    }

    #[test]
    fn test_winner_is_larger_regardless_of_order() {
        let mut world = world_with(&[body(100.0, 100.0, 3.0, false), body(106.0, 100.0, 5.0, false)]);
        collide(&mut world);
        assert!((world.bodies.get(0).unwrap().radius - 2.9).abs() < 1e-5);
        assert!((world.bodies.get(1).unwrap().radius - 5.1).abs() < 1e-5);
    }

    #[test]
    fn test_tie_goes_to_later_body() {
        let bodies = [body(0.0, 0.0, 4.0, false), body(1.0, 0.0, 4.0, false)];
        assert_eq!(pick_winner(&bodies, 0, 1), (1, 0));
    }

    #[test]
    fn test_separate_bodies_untouched() {
        let a = body(100.0, 100.0, 5.0, false);
        let b = body(108.0, 100.0, 3.0, true);
        let mut world = world_with(&[a, b]);
        let scan = collide(&mut world);

        assert_eq!(scan.contacts, 0);
        assert_eq!(world.bodies.as_slice(), &[a, b]);
    }

    #[test]
    fn test_thin_loser_loses_double_and_is_removed() {
        let mut world = world_with(&[body(100.0, 100.0, 5.0, false), body(101.0, 100.0, 0.15, true)]);
        let scan = collide(&mut world);

        assert_eq!(scan.removals, vec![1]);
        assert_eq!(world.bodies.len(), 1);
        assert!((world.bodies.get(0).unwrap().radius - 5.1).abs() < 1e-5);
    }

    #[test]
    fn test_thin_transfer_amount() {
        let mut winner = body(0.0, 0.0, 5.0, false);
        let mut loser = body(1.0, 0.0, 0.15, false);
        let mut spawns = Vec::new();
        let result = transfer_mass(&mut winner, &mut loser, &mut spawns, || 0.5);

        assert!(result.loser_destroyed);
        assert!((loser.radius - (-0.05)).abs() < 1e-5);
    }

    #[test]
    fn test_loser_at_threshold_loses_normal_amount() {
        let mut winner = body(0.0, 0.0, 5.0, false);
        let mut loser = body(1.0, 0.0, 0.25, false);
        let mut spawns = Vec::new();
        let result = transfer_mass(&mut winner, &mut loser, &mut spawns, || 0.5);

        assert!(!result.loser_destroyed);
        assert!((loser.radius - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_pop_spawns_four_fragments() {
        let winner = body(500.0, 500.0, 74.95, true);
        let loser = body(520.0, 500.0, 10.0, false);
        let mut world = world_with(&[winner, loser]);
        let scan = collide(&mut world);

        assert!(scan.removals.is_empty());
        assert_eq!(world.bodies.len(), 6);

        let popped = *world.bodies.get(0).unwrap();
        let expected = (74.95 + 0.1) / 5.0;
        assert!((popped.radius - expected).abs() < 1e-4);
        assert_eq!(popped.pos, Vec2::new(500.0, 500.0));

        let fragments: Vec<Body> = world.bodies.iter().skip(2).copied().collect();
        assert_eq!(fragments.len(), 4);
        for (fragment, dir) in fragments.iter().zip(POP_DIAGONALS) {
            assert_eq!(fragment.radius, popped.radius);
            assert!(fragment.player);
            assert_eq!(fragment.pos, popped.pos + dir * POP_SPREAD);
            // Velocity follows the diagonal's signs
            assert!(fragment.vel.x * dir.x >= 0.0);
            assert!(fragment.vel.y * dir.y >= 0.0);
            assert!(fragment.vel.x.abs() < 1.0 && fragment.vel.y.abs() < 1.0);
        }
    }

    #[test]
    fn test_pop_fragment_axes_draw_separate_samples() {
        let mut winner = body(500.0, 500.0, 74.95, false);
        let mut loser = body(520.0, 500.0, 10.0, false);
        let mut spawns = Vec::new();
        let mut samples = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8].into_iter();
        let result = transfer_mass(&mut winner, &mut loser, &mut spawns, || {
            samples.next().unwrap()
        });

        assert!(result.winner_popped);
        assert_eq!(spawns.len(), 4);
        assert_eq!(spawns[0].vel, Vec2::new(-0.1, -0.2));
        assert_eq!(spawns[1].vel, Vec2::new(-0.3, 0.4));
        assert_eq!(spawns[2].vel, Vec2::new(0.5, -0.6));
        assert_eq!(spawns[3].vel, Vec2::new(0.7, 0.8));
    }

    #[test]
    fn test_pop_fragments_of_autonomous_body_are_autonomous() {
        let mut world = world_with(&[body(500.0, 500.0, 74.95, false), body(520.0, 500.0, 10.0, true)]);
        collide(&mut world);
        assert_eq!(world.bodies.len(), 6);
        assert!(world.bodies.iter().skip(2).all(|b| !b.player));
    }

    #[test]
    fn test_pop_fragments_not_scanned_same_tick() {
        // A fragment lands on the bystander but must not touch it this tick
        let winner = body(500.0, 500.0, 74.95, false);
        let loser = body(520.0, 500.0, 10.0, false);
        let bystander = body(530.0, 530.0, 2.0, false);
        let mut world = world_with(&[winner, loser, bystander]);
        let scan = collide(&mut world);

        assert_eq!(scan.contacts, 1);
        assert_eq!(world.bodies.len(), 7);
        assert_eq!(world.bodies.get(2).unwrap().radius, 2.0);
    }

    #[test]
    fn test_destroyed_body_drops_out_of_scan() {
        // The tiny body dies against `a` and must not feed `c` afterwards
        let a = body(100.0, 100.0, 10.0, false);
        let tiny = body(105.0, 100.0, 0.1, false);
        let c = body(112.0, 100.0, 9.0, false);
        let mut world = world_with(&[a, tiny, c]);
        let scan = collide(&mut world);

        assert_eq!(scan.removals, vec![1]);
        assert_eq!(scan.contacts, 2);
        assert_eq!(world.bodies.len(), 2);
        assert!((world.bodies.get(0).unwrap().radius - 10.2).abs() < 1e-5);
        assert!((world.bodies.get(1).unwrap().radius - 8.9).abs() < 1e-5);
    }

    #[test]
    fn test_radius_changes_visible_to_later_pairs() {
        // `a` starts smaller than `c` but has already grown by the time they meet
        let a = body(100.0, 100.0, 5.0, false);
        let b = body(104.0, 100.0, 4.95, false);
        let c = body(100.0, 104.0, 5.02, false);
        let mut world = world_with(&[a, b, c]);
        let scan = collide(&mut world);

        assert_eq!(scan.contacts, 3);
        assert!((world.bodies.get(0).unwrap().radius - 5.2).abs() < 1e-5);
        assert!((world.bodies.get(1).unwrap().radius - 4.75).abs() < 1e-5);
        assert!((world.bodies.get(2).unwrap().radius - 5.02).abs() < 1e-5);
    }
}
