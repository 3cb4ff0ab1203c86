//! Confetti for a won game.
//!
//! The match emits [`Burst`]s on a repeating timer; [`Confetti`] turns them
//! into particles the terminal UI can paint. Nothing here affects the game.

use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;
use tracing::{debug, instrument};

/// Peak particle count of a single burst.
pub const PEAK_PARTICLES: f64 = 50.0;

const START_VELOCITY: f64 = 30.0;
const LIFETIME_TICKS: u32 = 60;
const GRAVITY: f64 = 1.0;
const DECAY: f64 = 0.9;

/// One spray of confetti, origin in unit screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// How many particles to spawn.
    pub particle_count: usize,
    /// Horizontal origin, 0.0 = left edge, 1.0 = right edge.
    pub origin_x: f64,
    /// Vertical origin, 0.0 = top. May be slightly negative (above the screen).
    pub origin_y: f64,
}

/// The pair of bursts fired on one celebration tick.
///
/// Intensity fades linearly with the time left in the celebration. Returns an
/// empty list once no time is left.
#[instrument(skip(rng))]
pub fn bursts_for_tick<R>(time_left: Duration, duration: Duration, rng: &mut R) -> Vec<Burst>
where
    R: Rng + ?Sized,
{
    if time_left.is_zero() || duration.is_zero() {
        return Vec::new();
    }
    let ratio = (time_left.as_secs_f64() / duration.as_secs_f64()).min(1.0);
    let particle_count = (PEAK_PARTICLES * ratio).round() as usize;

    let left = Burst {
        particle_count,
        origin_x: rng.random_range(0.1..0.3),
        origin_y: rng.random::<f64>() - 0.2,
    };
    let right = Burst {
        particle_count,
        origin_x: rng.random_range(0.7..0.9),
        origin_y: rng.random::<f64>() - 0.2,
    };
    debug!(particle_count, "Celebration tick");
    vec![left, right]
}

/// A single confetti particle, position in unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    vx: f64,
    vy: f64,
    ticks_left: u32,
    /// Palette slot used for colouring.
    pub hue: u8,
}

impl Particle {
    /// Remaining fraction of life, 1.0 when freshly spawned.
    pub fn life(&self) -> f64 {
        f64::from(self.ticks_left) / f64::from(LIFETIME_TICKS)
    }
}

/// Live particle field.
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the particles of `burst`, spread through a full circle.
    #[instrument(skip(self, rng))]
    pub fn spawn<R>(&mut self, burst: Burst, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for _ in 0..burst.particle_count {
            let angle = rng.random_range(0.0..TAU);
            let speed = START_VELOCITY * rng.random_range(0.5..1.0);
            self.particles.push(Particle {
                x: burst.origin_x,
                y: burst.origin_y,
                // Unit coordinates: scale velocity down to a fraction of the screen per tick.
                vx: angle.cos() * speed / 1000.0,
                vy: angle.sin() * speed / 1000.0,
                ticks_left: LIFETIME_TICKS,
                hue: rng.random_range(0..6),
            });
        }
    }

    /// Advances every particle one tick and drops the dead ones.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vx *= DECAY;
            p.vy = p.vy * DECAY + GRAVITY / 1000.0;
            p.ticks_left = p.ticks_left.saturating_sub(1);
        }
        self.particles.retain(|p| p.ticks_left > 0);
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// True when nothing is on screen.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_intensity_decays_with_time_left() {
        let mut rng = StdRng::seed_from_u64(1);
        let total = Duration::from_millis(3000);
        let early = bursts_for_tick(Duration::from_millis(2750), total, &mut rng);
        let late = bursts_for_tick(Duration::from_millis(250), total, &mut rng);
        assert_eq!(early.len(), 2);
        assert_eq!(early[0].particle_count, 46);
        assert_eq!(late[0].particle_count, 4);
        assert!(bursts_for_tick(Duration::ZERO, total, &mut rng).is_empty());
    }

    #[test]
    fn test_origins_fall_in_side_bands() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let pair = bursts_for_tick(Duration::from_secs(1), Duration::from_secs(3), &mut rng);
            assert!((0.1..0.3).contains(&pair[0].origin_x));
            assert!((0.7..0.9).contains(&pair[1].origin_x));
            assert!((-0.2..0.8).contains(&pair[0].origin_y));
        }
    }

    #[test]
    fn test_particles_die_after_lifetime() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut confetti = Confetti::new();
        confetti.spawn(
            Burst {
                particle_count: 10,
                origin_x: 0.5,
                origin_y: 0.5,
            },
            &mut rng,
        );
        assert_eq!(confetti.particles().len(), 10);
        for _ in 0..LIFETIME_TICKS {
            confetti.step();
        }
        assert!(confetti.is_empty());
    }
}
