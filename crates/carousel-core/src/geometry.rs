use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Angular width of one slide on the full circle.
#[inline]
pub fn angle_per_slide(total: usize) -> f32 {
    TAU / total.max(1) as f32
}

/// Fixed Y rotation of panel `index`.
///
/// The `-π/2` turns panel 0 toward the camera; the extra half slide centers
/// each panel's span on its anchor instead of aligning its leading edge.
pub fn panel_rotation(index: usize, total: usize) -> f32 {
    let step = angle_per_slide(total);
    -(index as f32) * step - FRAC_PI_2 - step / 2.0
}

/// Group rotation that brings slide `active` to the front.
#[inline]
pub fn group_rotation_for(active: usize, total: usize) -> f32 {
    active as f32 * angle_per_slide(total)
}

/// World transform of a panel: group spin, then panel anchor, then the
/// X mirror that keeps textures readable from inside the cylinder.
pub fn panel_model_matrix(group_rotation: f32, panel_rotation: f32) -> Mat4 {
    Mat4::from_rotation_y(group_rotation)
        * Mat4::from_rotation_y(panel_rotation)
        * Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0))
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PanelVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Open partial cylinder wall shared by every panel.
#[derive(Debug, Clone)]
pub struct PanelMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl PanelMesh {
    /// Interleaved vertex data for a single vertex buffer.
    pub fn vertices(&self) -> Vec<PanelVertex> {
        self.positions
            .iter()
            .zip(&self.uvs)
            .map(|(&position, &uv)| PanelVertex { position, uv })
            .collect()
    }
}

/// Build a cylinder wall spanning `theta_length` radians from angle 0.
///
/// Vertices follow `x = r·sin θ`, `z = r·cos θ`. UV `v` is 0 at the top edge
/// so texture row 0 maps to the top of the panel.
pub fn build_panel_mesh(radius: f32, height: f32, radial_segments: u32, theta_length: f32) -> PanelMesh {
    let segments = radial_segments.max(1) as usize;
    let half_height = height / 2.0;
    let mut positions = Vec::with_capacity((segments + 1) * 2);
    let mut uvs = Vec::with_capacity((segments + 1) * 2);
    let mut indices = Vec::with_capacity(segments * 6);

    for row in 0..=1usize {
        let v = row as f32;
        let y = half_height - v * height;
        for col in 0..=segments {
            let u = col as f32 / segments as f32;
            let theta = u * theta_length;
            positions.push([radius * theta.sin(), y, radius * theta.cos()]);
            uvs.push([u, v]);
        }
    }

    let stride = (segments + 1) as u32;
    for col in 0..segments as u32 {
        let a = col;
        let b = col + stride;
        let c = col + stride + 1;
        let d = col + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    PanelMesh {
        positions,
        uvs,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_has_expected_counts() {
        let mesh = build_panel_mesh(18.0, 15.0, 32, angle_per_slide(4));
        assert_eq!(mesh.positions.len(), 66);
        assert_eq!(mesh.uvs.len(), 66);
        assert_eq!(mesh.indices.len(), 32 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn mesh_vertices_lie_on_cylinder() {
        let mesh = build_panel_mesh(18.0, 15.0, 8, 1.0);
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!((r - 18.0).abs() < 1e-4);
            assert!((p[1].abs() - 7.5).abs() < 1e-6);
        }
    }
}
