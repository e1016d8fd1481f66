use rand::Rng;

/// Draw helpers shaped after `Math.random()` arithmetic: a unit
/// sample scaled into a span. Unlike `gen_range` these never panic
/// on empty or inverted spans, which happens when a bubble is
/// larger than its container.
pub trait RandomExt: Rng + Sized {
    fn unit(&mut self) -> f32 {
        self.gen::<f32>()
    }

    /// `lo + U[0, 1) * (hi - lo)`.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    fn coin(&mut self) -> bool {
        self.unit() > 0.5
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let i = (self.unit() * items.len() as f32) as usize;
        items.get(i.min(items.len().saturating_sub(1)))
    }
}

impl<R: Rng> RandomExt for R {}
