use super::record::HitRecord;
use crate::geometry::CopyNumber;

/// One energy deposit, already converted to detector coordinates.
///
/// `time` is measured from the start of the event's decay; `rho`, `phi` and
/// `z` are the cylindrical coordinates of the deposit position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deposit {
    pub energy: f64,
    pub time: f64,
    pub rho: f64,
    pub phi: f64,
    pub z: f64,
}

impl Deposit {
    pub fn new(energy: f64, time: f64, rho: f64, phi: f64, z: f64) -> Self {
        Self {
            energy,
            time,
            rho,
            phi,
            z,
        }
    }
}

/// Energy-weighted running sums for one crystal within one event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrystalAccumulator {
    pub total_energy: f64,
    pub sum_time: f64,
    pub sum_rho: f64,
    pub sum_phi: f64,
    pub sum_z: f64,
}

impl CrystalAccumulator {
    /// Add a deposit. Non-positive and non-finite energies are ignored.
    pub fn push(&mut self, deposit: &Deposit) {
        let e = deposit.energy;
        if !e.is_finite() || e <= 0.0 {
            return;
        }
        self.total_energy += e;
        self.sum_time += deposit.time * e;
        self.sum_rho += deposit.rho * e;
        self.sum_phi += deposit.phi * e;
        self.sum_z += deposit.z * e;
    }

    pub fn is_empty(&self) -> bool {
        self.total_energy <= 0.0
    }

    /// Energy-weighted averages, or `None` when nothing was deposited.
    pub fn to_record(&self, event_id: u64, crystal_id: CopyNumber) -> Option<HitRecord> {
        if self.is_empty() {
            return None;
        }
        let e = self.total_energy;
        Some(HitRecord {
            event_id,
            crystal_id,
            energy: e,
            avg_time: self.sum_time / e,
            avg_rho: self.sum_rho / e,
            avg_phi: self.sum_phi / e,
            avg_z: self.sum_z / e,
        })
    }
}
