//! Damped spring animation of a single scalar.
//!
//! The spring is solved analytically (damped harmonic oscillator), so the
//! result only depends on elapsed time and not on frame pacing. Time only
//! moves forward through [`AnimationDriver::tick`], which the host calls from
//! its rendering clock.

use std::time::Duration;

/// Physical constants of the spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance to the target under which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed (px/s) under which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    /// Quick settle with a slight overshoot.
    fn default() -> Self {
        Self {
            stiffness: 240.0,
            damping: 24.0,
            mass: 0.9,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}

impl SpringConfig {
    /// Damping ratio; below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

/// One spring transition from `from` toward `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringAnimation {
    config: SpringConfig,
    from: f64,
    to: f64,
    /// px/s at t = 0
    initial_velocity: f64,
    elapsed: f64,
}

impl SpringAnimation {
    pub fn new(config: SpringConfig, from: f64, to: f64, initial_velocity: f64) -> Self {
        Self {
            config,
            from,
            to,
            initial_velocity,
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Position and velocity `t` seconds after the start.
    pub fn sample(&self, t: f64) -> (f64, f64) {
        let zeta = self.config.damping_ratio();
        let omega0 = self.config.natural_frequency();
        let x0 = self.to - self.from;
        let v0 = -self.initial_velocity;

        if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let a = (v0 + zeta * omega0 * x0) / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            let position = self.to - envelope * (a * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
                - envelope * (a * omega1 * cos - x0 * omega1 * sin);
            (position, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = self.to - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        }
    }

    /// Advance by `dt`. Returns the new position, velocity and whether the spring is at rest.
    pub fn advance(&mut self, dt: Duration) -> (f64, f64, bool) {
        self.elapsed += dt.as_secs_f64();
        let (position, velocity) = self.sample(self.elapsed);
        let resting = velocity.abs() <= self.config.rest_speed
            && (self.to - position).abs() <= self.config.rest_displacement;
        if resting {
            (self.to, 0.0, true)
        } else {
            (position, velocity, false)
        }
    }
}

/// A finished transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    pub target: f64,
}

/// Owns the live animated value and at most one running spring.
///
/// Starting a new transition replaces the running one; the replaced transition
/// never reports completion.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    animation: Option<SpringAnimation>,
}

impl AnimationDriver {
    pub fn new(position: f64) -> Self {
        Self::with_config(position, SpringConfig::default())
    }

    pub fn with_config(position: f64, config: SpringConfig) -> Self {
        Self {
            config,
            position,
            velocity: 0.0,
            animation: None,
        }
    }

    /// Live value, including any in-flight transition.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the running transition, if any.
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(SpringAnimation::target)
    }

    /// Cancel any running transition and return the live value.
    pub fn stop(&mut self) -> f64 {
        if self.animation.take().is_some() {
            log::debug!("spring stopped at {:.1}", self.position);
        }
        self.velocity = 0.0;
        self.position
    }

    /// Set the value directly, cancelling any running transition.
    pub fn set_position(&mut self, position: f64) {
        self.animation = None;
        self.velocity = 0.0;
        self.position = position;
    }

    /// Start a transition to `target` from the live value and velocity.
    pub fn animate_to(&mut self, target: f64) {
        self.animation = Some(SpringAnimation::new(
            self.config,
            self.position,
            target,
            self.velocity,
        ));
    }

    /// Advance the running transition. Returns `Some` exactly once, on the
    /// frame the transition comes to rest.
    pub fn tick(&mut self, dt: Duration) -> Option<Settled> {
        let animation = self.animation.as_mut()?;
        let (position, velocity, resting) = animation.advance(dt);
        self.position = position;
        self.velocity = velocity;
        if resting {
            let target = animation.target();
            self.animation = None;
            Some(Settled { target })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_to_rest(driver: &mut AnimationDriver) -> (usize, Settled) {
        for frame in 1..=600 {
            if let Some(settled) = driver.tick(FRAME) {
                return (frame, settled);
            }
        }
        panic!("spring did not settle");
    }

    #[test]
    fn default_spring_is_underdamped() {
        let config = SpringConfig::default();
        let zeta = config.damping_ratio();
        assert!(zeta > 0.7 && zeta < 1.0, "zeta = {}", zeta);
    }

    #[test]
    fn sample_starts_at_origin() {
        let anim = SpringAnimation::new(SpringConfig::default(), 500.0, 100.0, 0.0);
        let (position, velocity) = anim.sample(0.0);
        assert!((position - 500.0).abs() < 1e-9);
        assert!(velocity.abs() < 1e-9);
    }

    #[test]
    fn settles_on_target_within_a_second() {
        let mut driver = AnimationDriver::new(820.0);
        driver.animate_to(160.0);
        let (frames, settled) = run_to_rest(&mut driver);
        assert_eq!(settled.target, 160.0);
        assert_eq!(driver.position(), 160.0);
        assert!(!driver.is_animating());
        assert!(frames < 90, "took {} frames", frames);
    }

    #[test]
    fn overshoots_slightly() {
        let mut driver = AnimationDriver::new(820.0);
        driver.animate_to(160.0);
        let mut lowest = f64::MAX;
        while driver.tick(FRAME).is_none() {
            lowest = lowest.min(driver.position());
        }
        assert!(lowest < 160.0, "expected overshoot, lowest {}", lowest);
        assert!(lowest > 140.0, "overshoot too large, lowest {}", lowest);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(100.0);
        run_to_rest(&mut driver);
        for _ in 0..10 {
            assert!(driver.tick(FRAME).is_none());
        }
    }

    #[test]
    fn retarget_starts_from_live_value() {
        let mut driver = AnimationDriver::new(820.0);
        driver.animate_to(160.0);
        for _ in 0..5 {
            assert!(driver.tick(FRAME).is_none());
        }
        let live = driver.position();
        assert!(live < 820.0 && live > 160.0);

        driver.animate_to(820.0);
        // first frame continues from the live value, not from a snap point
        driver.tick(Duration::from_millis(1));
        assert!((driver.position() - live).abs() < 20.0);
        let (_, settled) = run_to_rest(&mut driver);
        assert_eq!(settled.target, 820.0);
    }

    #[test]
    fn stop_cancels_without_completion() {
        let mut driver = AnimationDriver::new(820.0);
        driver.animate_to(160.0);
        driver.tick(FRAME);
        let live = driver.stop();
        assert_eq!(live, driver.position());
        assert!(!driver.is_animating());
        assert!(driver.tick(FRAME).is_none());
        assert_eq!(driver.position(), live);
    }

    #[test]
    fn animating_to_current_value_settles_immediately() {
        let mut driver = AnimationDriver::new(160.0);
        driver.animate_to(160.0);
        assert_eq!(driver.tick(FRAME), Some(Settled { target: 160.0 }));
    }
}
