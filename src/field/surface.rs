//! What the simulation needs from whatever displays it.
//!
//! The field never draws. It hands a [`BubbleLook`] to its
//! [`Container`] once per bubble and afterwards only pushes
//! position and size into the returned [`Renderable`].

use std::time::Duration;

use crate::{graphics::blend::Argb, math::Vec2};

pub trait Renderable {
    fn set_position(&mut self, pos: Vec2<f32>);
    fn set_size(&mut self, size: f32);
}

pub trait Container {
    type Sprite: Renderable;

    /// Width and height available to bubbles. Read once when
    /// the field is initialised.
    fn extent(&self) -> Vec2<f32>;

    fn apply_background(&mut self, style: &BackgroundStyle);

    fn spawn(&mut self, look: &BubbleLook) -> Self::Sprite;
}

/// Full-bleed backdrop drawn behind the bubbles. It covers the
/// whole container with no margin, and nothing outside the
/// container is ever shown.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStyle {
    /// CSS gradient angle: 0 points up, 90 points right.
    pub angle_deg: f32,
    pub from: Argb,
    pub to: Argb,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            angle_deg: 135.0,
            from: 0xFF_66_7E_EA,
            to: 0xFF_76_4B_A2,
        }
    }
}

/// Initial presentation of a bubble. Bubbles sit between the
/// backdrop and any other content and never receive input.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleLook {
    pub position: Vec2<f32>,
    pub size: f32,
    pub color: Argb,
    pub opacity: f32,
    pub blur: f32,
    /// Duration of the eased width/height transition applied by
    /// the display on top of the simulation's own size easing.
    pub transition: Duration,
}

pub const BUBBLE_OPACITY: f32 = 0.9;
pub const BUBBLE_BLUR: f32 = 3.0;
pub const BUBBLE_TRANSITION: Duration = Duration::from_secs(2);

impl BubbleLook {
    pub fn new(position: Vec2<f32>, size: f32, color: Argb) -> Self {
        Self {
            position,
            size,
            color,
            opacity: BUBBLE_OPACITY,
            blur: BUBBLE_BLUR,
            transition: BUBBLE_TRANSITION,
        }
    }
}
