//! Disc flight integration
//!
//! Discrete-time integrator for the shared projectile: gravity, ground
//! bounce with restitution, horizontal friction, spin damping, and the
//! settle detector that ends a throw.

use glam::Vec3;

use super::state::GameEvent;
use crate::consts::*;

/// The single active projectile. Re-spawned at the current player's hand
/// each turn; replaced, never pooled.
#[derive(Debug, Clone)]
pub struct Disc {
    pub pos: Vec3,
    pub vel: Vec3,
    pub spin: Vec3,
    /// Speed rating of the disc model being thrown
    pub speed_rating: u8,
    pub in_flight: bool,
    /// Consecutive ticks below the settle speed threshold
    grounded_ticks: u32,
    /// Set once per throw when the settle event fires
    settled: bool,
}

impl Disc {
    /// A disc at rest in a player's hand, ready to launch
    pub fn at_rest(pos: Vec3, speed_rating: u8) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            spin: Vec3::ZERO,
            speed_rating,
            in_flight: false,
            grounded_ticks: 0,
            settled: false,
        }
    }

    /// Current speed magnitude
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Launch with a charge power in [0, 100] along a horizontal aim
    /// direction. Callers must reject zero-length aim vectors; `aim` is
    /// normalized here against accumulated float error only.
    pub fn launch(&mut self, aim: Vec3, power: f32) {
        let aim = Vec3::new(aim.x, 0.0, aim.z).normalize();
        let power = power.clamp(0.0, 100.0);

        let speed =
            (self.speed_rating as f32 / 10.0) * (power / 100.0) * LAUNCH_SPEED_SCALE;
        self.vel = aim * speed + Vec3::Y * power * LAUNCH_LIFT_PER_POWER;
        // Spin axis perpendicular to the aim, scaled with power
        self.spin = Vec3::new(-aim.z, 0.0, aim.x) * (power / 100.0) * LAUNCH_SPIN_RATE;
        self.in_flight = true;
        self.settled = false;
        self.grounded_ticks = 0;
    }

    /// Advance one tick. No-op once settled (until the next launch).
    pub fn step(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if !self.in_flight {
            return;
        }

        self.vel.y -= GRAVITY * dt;
        self.pos += self.vel * dt;

        // Ground contact: clamp, bounce, rub off speed
        if self.pos.y < FLOOR_OFFSET {
            self.pos.y = FLOOR_OFFSET;
            if self.vel.y < 0.0 {
                events.push(GameEvent::GroundTouch {
                    position: self.pos,
                    impact_speed: -self.vel.y,
                });
                self.vel.y = -self.vel.y * RESTITUTION;
            }
            self.vel.x *= GROUND_FRICTION;
            self.vel.z *= GROUND_FRICTION;
            self.spin *= SPIN_DAMPING;
        }

        // Settle detection: sustained near-zero speed ends the throw
        if self.speed() < SETTLE_SPEED {
            self.grounded_ticks += 1;
        } else {
            self.grounded_ticks = 0;
        }
        if self.grounded_ticks >= SETTLE_TICKS && !self.settled {
            self.settled = true;
            self.in_flight = false;
            self.vel = Vec3::ZERO;
            self.spin = Vec3::ZERO;
            events.push(GameEvent::DiscSettled { position: self.pos });
        }
    }

    /// Consume the settle flag (true exactly once per throw)
    pub fn take_settled(&mut self) -> bool {
        std::mem::take(&mut self.settled)
    }

    /// Knock the disc down after striking an obstacle: most horizontal
    /// speed is lost and reversed, spin is halved.
    pub fn deflect(&mut self) {
        self.vel.x *= -0.25;
        self.vel.z *= -0.25;
        self.vel.y = self.vel.y.min(0.0);
        self.spin *= 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizontal_speed;
    use proptest::prelude::*;

    fn launched(vel: Vec3) -> Disc {
        let mut disc = Disc::at_rest(Vec3::new(0.0, FLOOR_OFFSET, 0.0), 12);
        disc.in_flight = true;
        disc.vel = vel;
        disc
    }

    #[test]
    fn bounce_inverts_and_attenuates_vertical_velocity() {
        let dt = SIM_DT;
        let mut disc = launched(Vec3::new(1.0, -2.0, 0.0));
        let mut events = Vec::new();
        disc.step(dt, &mut events);

        // Gravity applies before contact, then the bounce law
        let vy_at_contact = -2.0 - GRAVITY * dt;
        let expected = -vy_at_contact * RESTITUTION;
        assert!((disc.vel.y - expected).abs() < 1e-5);
        // Horizontal friction
        assert!((disc.vel.x - 1.0 * GROUND_FRICTION).abs() < 1e-5);
        assert!(matches!(events[0], GameEvent::GroundTouch { .. }));
    }

    #[test]
    fn spin_damps_on_contact() {
        let mut disc = launched(Vec3::new(0.0, -1.0, 0.0));
        disc.spin = Vec3::new(0.0, 4.0, 0.0);
        let mut events = Vec::new();
        disc.step(SIM_DT, &mut events);
        assert!((disc.spin.y - 4.0 * SPIN_DAMPING).abs() < 1e-5);
    }

    #[test]
    fn settles_exactly_once_after_sustained_rest() {
        let mut disc = launched(Vec3::new(0.005, 0.0, 0.0));
        let mut events = Vec::new();
        for _ in 0..SETTLE_TICKS + 10 {
            disc.step(SIM_DT, &mut events);
        }
        let settles = events
            .iter()
            .filter(|e| matches!(e, GameEvent::DiscSettled { .. }))
            .count();
        assert_eq!(settles, 1);
        assert!(disc.take_settled());
        assert!(!disc.take_settled());
        assert!(!disc.in_flight);
    }

    #[test]
    fn fast_disc_resets_settle_counter() {
        let mut disc = launched(Vec3::new(0.005, 0.0, 0.0));
        let mut events = Vec::new();
        for _ in 0..SETTLE_TICKS - 1 {
            disc.step(SIM_DT, &mut events);
        }
        // A late gust of speed must restart the countdown
        disc.vel = Vec3::new(1.0, 0.0, 0.0);
        disc.step(SIM_DT, &mut events);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::DiscSettled { .. })));
    }

    #[test]
    fn launch_scales_with_rating_and_power() {
        let mut disc = Disc::at_rest(Vec3::ZERO, 10);
        disc.launch(Vec3::new(0.0, 0.0, -1.0), 50.0);
        let expected = (10.0 / 10.0) * (50.0 / 100.0) * LAUNCH_SPEED_SCALE;
        assert!((horizontal_speed(disc.vel) - expected).abs() < 1e-4);
        assert!((disc.vel.y - 50.0 * LAUNCH_LIFT_PER_POWER).abs() < 1e-5);
        assert!(disc.in_flight);
    }

    #[test]
    fn launch_resets_spin_from_direction() {
        let mut disc = Disc::at_rest(Vec3::ZERO, 12);
        disc.spin = Vec3::splat(99.0);
        disc.launch(Vec3::X, 100.0);
        assert!((disc.spin.z - LAUNCH_SPIN_RATE).abs() < 1e-5);
        assert!(disc.spin.x.abs() < 1e-5);
    }

    proptest! {
        /// Bounce law holds for any downward contact velocity
        #[test]
        fn bounce_law_property(vy in -50.0f32..-0.1, vx in -10.0f32..10.0) {
            let mut disc = launched(Vec3::new(vx, vy, 0.0));
            let mut events = Vec::new();
            disc.step(SIM_DT, &mut events);

            let vy_at_contact = vy - GRAVITY * SIM_DT;
            prop_assert!((disc.vel.y - (-vy_at_contact * RESTITUTION)).abs() < 1e-4);
            prop_assert!(disc.vel.y >= 0.0);
            prop_assert!((disc.vel.x - vx * GROUND_FRICTION).abs() < 1e-4);
        }
    }
}
