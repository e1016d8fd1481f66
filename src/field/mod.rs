//! The bubble simulation.
//!
//! A fixed set of bubbles drifts inside a rectangular container,
//! bounces off its edges, knocks into each other and keeps picking
//! new sizes, either on a random 1-5 s timer or whenever it hits
//! another bubble.

pub mod surface;
pub mod timers;


use std::{ops::Range, time::Duration};

use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::{
    graphics::blend::Argb,
    math::{rng::RandomExt, Vec2},
};

use surface::{BackgroundStyle, BubbleLook, Container, Renderable};
use timers::{ResizeTimers, TimerHandle};

pub const DEFAULT_BUBBLE_COUNT: usize = 30;

pub const PALETTE: [Argb; 8] = [
    0xFF_FF_6B_6B,
    0xFF_4E_CD_C4,
    0xFF_45_B7_D1,
    0xFF_FF_A0_7A,
    0xFF_98_D8_C8,
    0xFF_F7_DC_6F,
    0xFF_BB_8F_CE,
    0xFF_85_C1_E2,
];

/// Tunables of a field. `Default` gives the stock behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    /// Diameter range of freshly created bubbles.
    pub spawn_size: Range<f32>,
    pub min_size: f32,
    pub max_size: f32,
    /// How far a single resize moves the target.
    pub size_step: Range<f32>,
    pub resize_delay: Range<Duration>,
    /// Fraction of the remaining distance to the target covered per frame.
    pub easing: f32,
    /// Size differences at or below this are left alone.
    pub settle: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_BUBBLE_COUNT,
            spawn_size: 100.0..200.0,
            min_size: 20.0,
            max_size: 120.0,
            size_step: 10.0..30.0,
            resize_delay: Duration::from_millis(1000)..Duration::from_millis(5000),
            easing: 0.05,
            settle: 0.5,
        }
    }
}

/// Everything needed to place a bubble by hand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BubbleSeed {
    pub position: Vec2<f32>,
    pub size: f32,
    pub velocity: Vec2<f32>,
    pub color: Argb,
}

#[derive(Debug)]
pub struct Bubble<S> {
    pos: Vec2<f32>,
    vel: Vec2<f32>,
    size: f32,
    target_size: f32,
    color: Argb,
    resize_timer: Option<TimerHandle>,
    sprite: S,
}

impl<S> Bubble<S> {
    pub fn position(&self) -> Vec2<f32> {
        self.pos
    }

    pub fn velocity(&self) -> Vec2<f32> {
        self.vel
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn target_size(&self) -> f32 {
        self.target_size
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn resize_timer(&self) -> Option<TimerHandle> {
        self.resize_timer
    }

    pub fn sprite(&self) -> &S {
        &self.sprite
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn center(&self) -> Vec2<f32> {
        self.pos + Vec2::splat(self.radius())
    }
}

pub struct BubbleField<S> {
    bubbles: Vec<Bubble<S>>,
    extent: Vec2<f32>,
    params: FieldParams,
    rng: StdRng,
    timers: ResizeTimers,
}

impl<S: Renderable> BubbleField<S> {
    /// A field with no bubbles yet. The extent is fixed from here on.
    pub fn empty(extent: Vec2<f32>, params: FieldParams, rng: StdRng) -> Self {
        Self {
            bubbles: Vec::with_capacity(params.count),
            extent,
            params,
            rng,
            timers: ResizeTimers::new(),
        }
    }

    /// Styles the container and fills it with `params.count`
    /// randomly placed bubbles.
    pub fn init<C>(container: &mut C, params: FieldParams, rng: StdRng) -> Self
    where
        C: Container<Sprite = S>,
    {
        container.apply_background(&BackgroundStyle::default());

        let mut field = Self::empty(container.extent(), params, rng);

        for _ in 0..field.params.count {
            field.create_bubble(container);
        }

        info!(
            bubbles = field.bubbles.len(),
            width = field.extent.x,
            height = field.extent.y,
            "bubble field initialised"
        );

        field
    }

    /// Adds one bubble with random size, placement, heading and color.
    pub fn create_bubble<C>(&mut self, container: &mut C) -> usize
    where
        C: Container<Sprite = S>,
    {
        let seed = self.random_seed();

        let sprite = container.spawn(&BubbleLook::new(seed.position, seed.size, seed.color));

        self.insert(seed, sprite)
    }

    /// Adds a bubble exactly as described and arms its first resize timer.
    pub fn insert(&mut self, seed: BubbleSeed, sprite: S) -> usize {
        let id = self.bubbles.len();

        self.bubbles.push(Bubble {
            pos: seed.position,
            vel: seed.velocity,
            size: seed.size,
            target_size: seed.size,
            color: seed.color,
            resize_timer: None,
            sprite,
        });

        self.arm_timer(id);

        id
    }

    fn random_seed(&mut self) -> BubbleSeed {
        let Range { start, end } = self.params.spawn_size.clone();
        let size = self.rng.uniform(start, end);

        let position = Vec2::new(
            self.rng.uniform(0.0, self.extent.x - size),
            self.rng.uniform(0.0, self.extent.y - size),
        );

        let velocity = Vec2::new(self.rng.uniform(-1.0, 1.0), self.rng.uniform(-1.0, 1.0));

        let color = self.rng.pick(&PALETTE).copied().unwrap_or(PALETTE[0]);

        BubbleSeed {
            position,
            size,
            velocity,
            color,
        }
    }

    /// Moves the virtual clock, fires due resize timers, then runs
    /// one frame.
    pub fn advance(&mut self, dt: Duration) {
        self.timers.advance(dt);

        while let Some((handle, id)) = self.timers.pop_due() {
            trace!(bubble = id, "resize timer fired");

            if let Some(bubble) = self.bubbles.get_mut(id) {
                if bubble.resize_timer == Some(handle) {
                    bubble.resize_timer = None;
                }
            }

            self.change_size(id);
        }

        self.frame_step();
    }

    /// One display refresh worth of motion, collisions and easing.
    pub fn frame_step(&mut self) {
        let extent = self.extent;

        for i in 0..self.bubbles.len() {
            {
                let b = &mut self.bubbles[i];
                b.pos += b.vel;
                bounce(&mut b.pos.x, &mut b.vel.x, extent.x - b.size);
                bounce(&mut b.pos.y, &mut b.vel.y, extent.y - b.size);
            }

            for j in i + 1..self.bubbles.len() {
                self.check_collision(i, j);
            }

            let (easing, settle) = (self.params.easing, self.params.settle);
            let b = &mut self.bubbles[i];

            if (b.size - b.target_size).abs() > settle {
                b.size += (b.target_size - b.size) * easing;
                b.sprite.set_size(b.size);
            }

            b.sprite.set_position(b.pos);
        }
    }

    /// Resolves an overlap between bubbles `i` and `j`, if any.
    /// Returns whether they collided.
    pub fn check_collision(&mut self, i: usize, j: usize) -> bool {
        if i == j || i.max(j) >= self.bubbles.len() {
            return false;
        }

        let (a, b) = pair_mut(&mut self.bubbles, i, j);

        let d = a.center() - b.center();
        let dist = d.mag();
        let reach = a.radius() + b.radius();

        if dist >= reach {
            return false;
        }

        let normal = Vec2::from_angle(d.angle());

        // Into the collision frame, where x runs along the normal.
        let va = a.vel * normal.conj();
        let vb = b.vel * normal.conj();

        // Trade the normal components, keep the tangential ones.
        a.vel = Vec2::new(vb.x, va.y) * normal;
        b.vel = Vec2::new(va.x, vb.y) * normal;

        let push = normal * ((reach - dist) / 2.0);
        a.pos += push;
        b.pos -= push;

        debug!(a = i, b = j, overlap = reach - dist, "bubbles collided");

        self.change_size(i);
        self.change_size(j);

        true
    }

    /// Picks a new target size for bubble `id` and restarts its timer.
    pub fn change_size(&mut self, id: usize) {
        let Some(bubble) = self.bubbles.get_mut(id) else {
            return;
        };

        if let Some(handle) = bubble.resize_timer.take() {
            self.timers.cancel(handle);
        }

        let p = &self.params;
        let step = self.rng.uniform(p.size_step.start, p.size_step.end);

        let target = if self.rng.coin() {
            bubble.size + step
        } else {
            bubble.size - step
        };

        // Clamped on both sides so a freshly spawned oversized
        // bubble is pulled into range by its first resize.
        bubble.target_size = target.clamp(p.min_size, p.max_size);

        self.arm_timer(id);
    }

    fn arm_timer(&mut self, id: usize) {
        let Range { start, end } = self.params.resize_delay.clone();
        let ms = self
            .rng
            .uniform(start.as_millis() as f32, end.as_millis() as f32);

        let handle = self
            .timers
            .schedule(id, Duration::from_secs_f32(ms / 1000.0));

        if let Some(bubble) = self.bubbles.get_mut(id) {
            bubble.resize_timer = Some(handle);
        }
    }
}

impl<S> BubbleField<S> {
    pub fn bubbles(&self) -> &[Bubble<S>] {
        &self.bubbles
    }

    pub fn bubble(&self, id: usize) -> Option<&Bubble<S>> {
        self.bubbles.get(id)
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn extent(&self) -> Vec2<f32> {
        self.extent
    }

    /// Virtual time the field has been advanced by.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.timers.is_pending(handle)
    }

    pub fn sprites(&self) -> impl Iterator<Item = &S> {
        self.bubbles.iter().map(|b| &b.sprite)
    }

    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.bubbles.iter_mut().map(|b| &mut b.sprite)
    }
}

// Reflect off the low wall, then off the high wall. Both checks run,
// so a bubble wider than its container ends up pinned at `max`.
fn bounce(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos <= 0.0 {
        *pos = 0.0;
        *vel = -*vel;
    }

    if *pos >= max {
        *pos = max;
        *vel = -*vel;
    }
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
