use derive_more::Display;

/// A point in the scene, in scene units (the rendered globe's radius is the scale).
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "({}, {}, {})", "x", "y", "z")]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_vector(&self) -> na::Vector3<f64> {
        na::Vector3::new(self.x, self.y, self.z)
    }

    /// Distance from the scene origin (the Earth's center)
    pub fn norm(&self) -> f64 {
        self.as_vector().norm()
    }

    pub fn distance(&self, other: &CartesianPosition) -> f64 {
        (self.as_vector() - other.as_vector()).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<na::Vector3<f64>> for CartesianPosition {
    fn from(v: na::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<CartesianPosition> for na::Vector3<f64> {
    fn from(p: CartesianPosition) -> Self {
        p.as_vector()
    }
}
