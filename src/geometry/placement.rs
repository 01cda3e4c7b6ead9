use super::address::CrystalAddress;
use crate::layout::LayoutConstants;
use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use serde::Serialize;

/// Position and orientation of one manufactured copy.
///
/// Orientation is a pure rotation about the detector axis (+z).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub position: Point3<f64>,
    /// Rotation angle about +z in radians.
    pub rotation_z: f64,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation_z: 0.0,
        }
    }

    /// Place at cylindrical coordinates `(rho, phi, z)`.
    pub fn from_cylindrical(rho: f64, phi: f64, z: f64, rotation_z: f64) -> Self {
        Self {
            position: Point3::new(rho * phi.cos(), rho * phi.sin(), z),
            rotation_z,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.position == Point3::origin() && self.rotation_z == 0.0
    }

    pub fn rho(&self) -> f64 {
        self.position.x.hypot(self.position.y)
    }

    pub fn phi(&self) -> f64 {
        self.position.y.atan2(self.position.x)
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation_z)
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.position.coords),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.rotation_z),
        )
    }
}

/// Axial offset of a ring centre from the detector centre.
fn ring_centre_z(ring: usize, n_rings: usize, layout: &LayoutConstants) -> f64 {
    (ring as f64 - (n_rings as f64 - 1.0) / 2.0) * layout.ring_pitch()
}

/// Placement of a single crystal.
///
/// Blocks are flat, so a crystal displaced by `ta` along the block face sits at
/// angle `atan2(ta, R)` from the block centre and slightly further out than
/// `R`. The crystal is turned by the same corrected angle so it faces the axis.
pub fn crystal_placement(
    addr: &CrystalAddress,
    layout: &LayoutConstants,
    n_rings: usize,
) -> Placement {
    let phi = layout.block_delta_phi() * addr.block as f64;

    let dz = layout.crystal_pitch
        * (addr.block_axial as f64 - layout.crystals_per_block_axial as f64 / 2.0);
    let z = ring_centre_z(addr.ring, n_rings, layout) + dz;

    let ta = layout.crystal_pitch
        * (addr.block_trans as f64 - layout.crystals_per_block_trans as f64 / 2.0);
    let d_phi = ta.atan2(layout.ring_radius);
    let d_r = ta * d_phi.sin() / 2.0;

    Placement::from_cylindrical(layout.ring_radius + d_r, phi + d_phi, z, -(phi + d_phi))
}

/// Placement of a whole block at its ring centre.
pub fn block_placement(
    ring: usize,
    block: usize,
    layout: &LayoutConstants,
    n_rings: usize,
) -> Placement {
    let phi = layout.block_delta_phi() * block as f64;
    let z = ring_centre_z(ring, n_rings, layout);
    Placement::from_cylindrical(layout.ring_radius, phi, z, -phi)
}

/// Placement of a panel spanning the full axial length.
pub fn panel_placement(block: usize, layout: &LayoutConstants) -> Placement {
    let phi = layout.block_delta_phi() * block as f64;
    Placement::from_cylindrical(layout.ring_radius, phi, 0.0, -phi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn wrap(angle: f64) -> f64 {
        angle.rem_euclid(std::f64::consts::TAU)
    }

    #[test]
    fn siemens_copy_2607_position() {
        let layout = LayoutConstants::siemens_quadra();
        let addr = CrystalAddress::from_copy_number(2607, &layout);
        let p = crystal_placement(&addr, &layout, 32);

        let ta: f64 = -32.0;
        let d_phi = ta.atan2(410.0);
        let d_r = ta * d_phi.sin() / 2.0;
        let phi = 13.0 * std::f64::consts::TAU / 38.0;

        assert!(approx_eq(p.position.z, -489.6));
        assert!(approx_eq(p.rho(), 410.0 + d_r));
        assert!(d_r > 0.0);
        assert!(approx_eq(wrap(p.phi()), wrap(phi + d_phi)));
        assert!(approx_eq(p.rotation_z, -(phi + d_phi)));
    }

    #[test]
    fn centre_column_has_no_curvature_correction() {
        let layout = LayoutConstants::siemens_quadra();
        let addr = CrystalAddress {
            ring: 16,
            in_ring: 0,
            block: 0,
            in_block: 0,
            block_trans: 10,
            block_axial: 5,
        };
        let p = crystal_placement(&addr, &layout, 32);
        assert!(approx_eq(p.position.x, 410.0));
        assert!(approx_eq(p.position.y, 0.0));
        assert!(approx_eq(p.position.z, 16.0));
        assert!(approx_eq(p.rotation_z, 0.0));
    }

    #[test]
    fn orientation_tracks_corrected_angle() {
        let layout = LayoutConstants::explorer();
        for copy_no in (0..layout.crystals_per_ring() * 2).step_by(997) {
            let addr = CrystalAddress::from_copy_number(copy_no, &layout);
            let p = crystal_placement(&addr, &layout, 8);
            assert!(approx_eq(wrap(p.phi()), wrap(-p.rotation_z)));
            // Crystal centres lie on the flat block face, outside the ring radius.
            assert!(p.rho() >= layout.ring_radius - 1e-9);
        }
    }

    #[test]
    fn rotation_turns_crystal_towards_axis() {
        let layout = LayoutConstants::siemens_quadra();
        let p = block_placement(0, 19, &layout, 1);
        // Block 19 of 38 sits at phi = pi; its local x axis must point along -x.
        let local_x = p.rotation().inverse() * Vector3::x();
        assert!(approx_eq(local_x.x, -1.0));
        let world = p.isometry() * Point3::origin();
        assert!(approx_eq(world.x, -410.0));
    }

    #[test]
    fn panels_are_axially_centred() {
        let layout = LayoutConstants::explorer();
        let p = panel_placement(6, &layout);
        assert!(approx_eq(p.position.z, 0.0));
        assert!(approx_eq(p.position.y, layout.ring_radius));
    }

    #[test]
    fn blocks_are_symmetric_about_the_centre() {
        let layout = LayoutConstants::explorer();
        let first = block_placement(0, 0, &layout, 8);
        let last = block_placement(7, 0, &layout, 8);
        assert!(approx_eq(first.position.z, -last.position.z));
        assert!(approx_eq(last.position.z, 3.5 * layout.ring_pitch()));
    }
}
