mod ceq;
mod toppe;

pub use ceq::*;
pub use toppe::*;

/// Used to address the gradient columns of a block / module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientChannel {
    X,
    Y,
    Z,
}

impl GradientChannel {
    pub const ALL: [GradientChannel; 3] = [Self::X, Self::Y, Self::Z];
}

impl ParentBlock {
    pub fn gradient(&self, channel: GradientChannel) -> Option<&Gradient> {
        match channel {
            GradientChannel::X => self.gx.as_ref(),
            GradientChannel::Y => self.gy.as_ref(),
            GradientChannel::Z => self.gz.as_ref(),
        }
    }
}
