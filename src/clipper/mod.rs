//! View-space polygon clipping.
//!
//! Triangles are clipped against the six frustum planes with the
//! Sutherland-Hodgman algorithm before projection, so nothing behind the
//! camera ever reaches the perspective divide. The surviving convex polygon
//! is fan-triangulated back into triangles.

pub mod plane;
pub mod polygon;

pub use plane::{FrustumPlanes, FrustumSide, Plane};
pub use polygon::{Polygon, MAX_POLYGON_VERTICES};
