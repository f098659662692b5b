//! Demo geometry: a cube and a subdivided floor.
//!
//! Meshes live in model space. [`Mesh::to_polygons`] places one in front of
//! the camera and hands back the camera-space polygons the engine consumes.

use crate::colors::Color;
use crate::math::Vec3;
use crate::polygon::{facet_normal, Polygon, Vertex};
use crate::transform::Transform;

/// A polygonal face: indices into [`Mesh::vertices`], counter-clockwise when
/// seen from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Axis-aligned cube centered on the origin with edge length `size`.
    pub fn cube(size: f64) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let faces = vec![
            Face::new([4, 5, 6, 7]), // front  (+z)
            Face::new([1, 0, 3, 2]), // back   (-z)
            Face::new([5, 1, 2, 6]), // right  (+x)
            Face::new([0, 4, 7, 3]), // left   (-x)
            Face::new([7, 6, 2, 3]), // top    (+y)
            Face::new([0, 1, 5, 4]), // bottom (-y)
        ];
        Self::new(vertices, faces)
    }

    /// Square in the y = 0 plane, `size` across, cut into `divisions` ×
    /// `divisions` quads facing +Y.
    pub fn floor(size: f64, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let step = size / divisions as f64;
        let start = -size * 0.5;
        let row = divisions + 1;

        let mut vertices = Vec::with_capacity(row * row);
        for i in 0..row {
            for j in 0..row {
                vertices.push(Vec3::new(
                    start + j as f64 * step,
                    0.0,
                    start + i as f64 * step,
                ));
            }
        }

        let mut faces = Vec::with_capacity(divisions * divisions);
        for i in 0..divisions {
            for j in 0..divisions {
                let a = i * row + j;
                // a -> +z -> +x+z -> +x winds counter-clockwise seen from above
                faces.push(Face::new([a, a + row, a + row + 1, a + 1]));
            }
        }
        Self::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Unit normal of face `index` from its winding.
    pub fn face_normal(&self, index: usize) -> Vec3 {
        let vertices: Vec<Vertex> = self.faces[index]
            .indices
            .iter()
            .map(|&i| self.vertices[i].into())
            .collect();
        facet_normal(&vertices).normalize()
    }

    /// Per-vertex normals: the average of the normals of every face that
    /// uses the vertex.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for (face_index, face) in self.faces.iter().enumerate() {
            let normal = self.face_normal(face_index);
            for &i in &face.indices {
                sums[i] = sums[i] + normal;
            }
        }
        sums.iter().map(Vec3::normalize).collect()
    }

    /// Transforms every face into camera space.
    ///
    /// With `smooth` each vertex carries its averaged normal, so a lit mesh is
    /// Gouraud shaded; otherwise only the facet normal is set.
    pub fn to_polygons(&self, transform: &Transform, color: Color, smooth: bool) -> Vec<Polygon> {
        let model = transform.to_matrix();
        let normal_matrix = transform.normal_matrix();
        let positions: Vec<Vec3> = self.vertices.iter().map(|v| v.transform(&model)).collect();
        let normals: Option<Vec<Vec3>> = smooth.then(|| {
            self.vertex_normals()
                .iter()
                .map(|n| n.transform_direction(&normal_matrix).normalize())
                .collect()
        });

        self.faces
            .iter()
            .enumerate()
            .map(|(face_index, face)| {
                let vertices = face
                    .indices
                    .iter()
                    .map(|&i| match &normals {
                        Some(normals) => Vertex::with_normal(positions[i], normals[i]),
                        None => Vertex::new(positions[i]),
                    })
                    .collect();
                let normal = self
                    .face_normal(face_index)
                    .transform_direction(&normal_matrix);
                Polygon::with_normal(vertices, normal, color)
            })
            .collect()
    }
}

/// The demo scene: a cube hovering over a floor, both in front of the
/// camera. `angle` spins the cube about its vertical axis.
pub fn demo_scene(angle: f64, smooth: bool) -> Vec<Polygon> {
    let mut floor_transform = Transform::new();
    floor_transform.set_position_xyz(0.0, -1.0, -12.0);
    let mut polygons = Mesh::floor(15.0, 6).to_polygons(&floor_transform, crate::colors::FLOOR, false);

    let mut cube_transform = Transform::new();
    cube_transform
        .set_position_xyz(0.0, 0.5, -8.0)
        .rotate_x(0.4)
        .rotate_y(angle);
    polygons.extend(Mesh::cube(2.0).to_polygons(&cube_transform, crate::colors::CUBE, smooth));
    polygons
}
