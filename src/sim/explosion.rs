//! Explosion effect: an expanding ring plus a burst of particles
//!
//! Explosions never wrap. Any ring or particle cell that falls outside the
//! grid is simply not drawn.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Segment;
use super::grid::Grid;
use crate::consts::{EXPLOSION_MAX_AGE, EXPLOSION_MAX_RADIUS, EXPLOSION_PARTICLES};
use crate::palette;

/// A debris point flying away from the blast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub origin: IVec2,
    pub radius: i32,
    /// Steps survived so far
    pub age: u32,
    pub particles: Vec<Particle>,
    pub segments: Vec<Segment>,
}

impl Explosion {
    /// Start a blast centered on `origin`, scattering particles all around
    pub fn new<R: Rng + ?Sized>(origin: IVec2, grid: &Grid, rng: &mut R) -> Self {
        let center = origin.as_vec2();
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|i| {
                let base = std::f32::consts::TAU * i as f32 / EXPLOSION_PARTICLES as f32;
                let jitter = (rng.random::<f32>() - 0.5) * 0.5;
                let speed = 1.0 + rng.random::<f32>() * 2.0;
                Particle {
                    pos: center,
                    vel: Vec2::from_angle(base + jitter) * speed,
                    color: palette::WHITE,
                }
            })
            .collect();

        let mut explosion = Self {
            origin,
            radius: 0,
            age: 0,
            particles,
            segments: Vec::new(),
        };
        explosion.rebuild_segments(grid, rng);
        explosion
    }

    /// Age the blast by one step. Returns `false` once it has burned out.
    pub fn update<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        self.age += 1;
        if self.age % 2 == 0 && self.radius < EXPLOSION_MAX_RADIUS {
            self.radius += 1;
        }
        self.rebuild_segments(grid, rng);
        self.age < EXPLOSION_MAX_AGE
    }

    fn rebuild_segments<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.segments.clear();

        let r = self.radius;
        for dx in -r..=r {
            for dy in -r..=r {
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if (distance - r as f32).abs() > 1.0 {
                    continue;
                }
                let cell = self.origin + IVec2::new(dx, dy);
                if grid.contains(cell) {
                    // White is reserved for debris
                    let color = if rng.random_bool(0.5) {
                        palette::ORANGE
                    } else {
                        palette::GOLD
                    };
                    self.segments.push(Segment::colored(cell, color));
                }
            }
        }

        for particle in &mut self.particles {
            particle.pos += particle.vel;
            let cell = particle.pos.floor().as_ivec2();
            if grid.contains(cell) {
                self.segments.push(Segment::colored(cell, particle.color));
            }
        }
    }
}
