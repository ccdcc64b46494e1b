mod closest_wall;

pub use closest_wall::{closest_wall_among, ClosestWall, FindClosestWall, WallCandidate};
