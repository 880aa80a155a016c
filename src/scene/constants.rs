use bevy::math::Vec3;

/// Camera height above the floor inside every sphere.
pub const EYE_HEIGHT: f32 = 1.6;

/// Name and floor position of each panorama sphere. Zones link them in a ring,
/// each one pointing at the next.
pub const SPHERES: [(&str, Vec3); 3] = [
    ("Lobby", Vec3::new(0.0, EYE_HEIGHT, 0.0)),
    ("Gallery", Vec3::new(12.0, EYE_HEIGHT, -8.0)),
    ("Courtyard", Vec3::new(-10.0, EYE_HEIGHT, -14.0)),
];

pub const SPHERE_RADIUS: f32 = 1.2;

/// How far from its sphere a zone sits, toward the sphere it links to.
pub const ZONE_OFFSET: f32 = 4.0;
pub const ZONE_RADIUS: f32 = 0.8;
pub const ZONE_HEIGHT: f32 = 0.2;

pub const FLOOR_SIZE: f32 = 80.0;
pub const FLOOR_THICKNESS: f32 = 0.1;

pub const MARKER_RADIUS: f32 = 0.35;
/// Lifts the marker just off the floor so it doesn't z-fight.
pub const MARKER_HEIGHT: f32 = 0.02;
