//! Navigable-surface queries for validating teleport destinations.
//!
//! [`NavMesh`] stores walkable floor as convex polygons, the same layout
//! pathfinding meshes use: a shared vertex list and cells indexing into it.
use cgmath::{InnerSpace, Vector3, vec3};
use serde::{Deserialize, Serialize};

pub trait NavigableSurface {
    /// Snap `point` to the nearest walkable location whose offset from `point`
    /// fits inside the box of half-size `extent`.
    fn project_point(&self, point: Vector3<f32>, extent: Vector3<f32>) -> Option<Vector3<f32>>;
}

/// A convex floor polygon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavCell {
    pub vertex_indices: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavMesh {
    pub vertices: Vec<Vector3<f32>>,
    pub cells: Vec<NavCell>,
}

impl NavMesh {
    pub fn new(vertices: Vec<Vector3<f32>>, cells: Vec<NavCell>) -> Self {
        Self { vertices, cells }
    }

    /// Append a flat, axis-aligned rectangle at `height`.
    pub fn add_rect(&mut self, min_x: f32, max_x: f32, min_z: f32, max_z: f32, height: f32) {
        let base = self.vertices.len() as u32;
        self.vertices.extend([
            vec3(min_x, height, min_z),
            vec3(max_x, height, min_z),
            vec3(max_x, height, max_z),
            vec3(min_x, height, max_z),
        ]);
        self.cells.push(NavCell {
            vertex_indices: vec![base, base + 1, base + 2, base + 3],
        });
    }

    fn cell_vertices(&self, cell: &NavCell) -> Option<Vec<Vector3<f32>>> {
        cell.vertex_indices
            .iter()
            .map(|&idx| self.vertices.get(idx as usize).copied())
            .collect()
    }

    /// Closest point on a cell to `point`, measured in the XZ plane and lifted
    /// onto the cell's plane.
    fn closest_point_on_cell(
        &self,
        point: Vector3<f32>,
        vertices: &[Vector3<f32>],
    ) -> Option<Vector3<f32>> {
        if vertices.len() < 3 {
            return None;
        }

        let normal = newell_normal(vertices);
        // Walls and degenerate cells can't be stood on
        if normal.y.abs() <= 1.0e-4 {
            return None;
        }

        let (x, z) = if point_in_polygon_xz(point, vertices) {
            (point.x, point.z)
        } else {
            closest_on_boundary_xz(point, vertices)
        };

        let anchor = vertices[0];
        let y = anchor.y - (normal.x * (x - anchor.x) + normal.z * (z - anchor.z)) / normal.y;
        Some(vec3(x, y, z))
    }
}

impl NavigableSurface for NavMesh {
    fn project_point(&self, point: Vector3<f32>, extent: Vector3<f32>) -> Option<Vector3<f32>> {
        self.cells
            .iter()
            .filter_map(|cell| self.cell_vertices(cell))
            .filter_map(|vertices| self.closest_point_on_cell(point, &vertices))
            .filter(|candidate| within_extent(*candidate - point, extent))
            .min_by(|a, b| {
                (*a - point)
                    .magnitude2()
                    .total_cmp(&(*b - point).magnitude2())
            })
    }
}

/// True when every component of `offset` fits inside the half-size `extent`.
pub fn within_extent(offset: Vector3<f32>, extent: Vector3<f32>) -> bool {
    offset.x.abs() <= extent.x && offset.y.abs() <= extent.y && offset.z.abs() <= extent.z
}

fn newell_normal(vertices: &[Vector3<f32>]) -> Vector3<f32> {
    let mut normal = vec3(0.0, 0.0, 0.0);
    for (i, current) in vertices.iter().enumerate() {
        let next = vertices[(i + 1) % vertices.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    if normal.magnitude2() <= f32::EPSILON {
        return normal;
    }
    normal.normalize()
}

/// Convex polygon containment in the XZ plane: the point must sit on the same
/// side of every edge. Works for either winding.
fn point_in_polygon_xz(point: Vector3<f32>, vertices: &[Vector3<f32>]) -> bool {
    let mut sign = 0.0f32;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b.x - a.x) * (point.z - a.z) - (b.z - a.z) * (point.x - a.x);
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

fn closest_on_boundary_xz(point: Vector3<f32>, vertices: &[Vector3<f32>]) -> (f32, f32) {
    let mut best = (vertices[0].x, vertices[0].z);
    let mut best_distance = f32::MAX;

    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let (ex, ez) = (b.x - a.x, b.z - a.z);
        let length2 = ex * ex + ez * ez;
        let t = if length2 <= f32::EPSILON {
            0.0
        } else {
            (((point.x - a.x) * ex + (point.z - a.z) * ez) / length2).clamp(0.0, 1.0)
        };
        let (cx, cz) = (a.x + ex * t, a.z + ez * t);
        let distance = (point.x - cx).powi(2) + (point.z - cz).powi(2);
        if distance < best_distance {
            best_distance = distance;
            best = (cx, cz);
        }
    }

    best
}
