use super::accumulator::Deposit;
use super::aggregator::HitSink;
use crate::geometry::CopyNumber;
use nalgebra::Point3;
use serde::Serialize;

/// A transport step inside a sensitive crystal, as reported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPoint {
    /// Replica number from the touch history, when the engine supplies one.
    pub history_replica: Option<CopyNumber>,
    /// Replica number of the pre-step touchable.
    pub touchable_replica: CopyNumber,
    pub energy_deposit: f64,
    /// Global time at the post-step point.
    pub global_time: f64,
    /// Post-step position.
    pub position: Point3<f64>,
}

impl StepPoint {
    /// Step without touch history; the touchable replica identifies the crystal.
    pub fn new(
        crystal_id: CopyNumber,
        energy_deposit: f64,
        global_time: f64,
        position: Point3<f64>,
    ) -> Self {
        Self {
            history_replica: None,
            touchable_replica: crystal_id,
            energy_deposit,
            global_time,
            position,
        }
    }

    /// Crystal copy number struck by this step. The touch history wins over
    /// the pre-step touchable.
    pub fn crystal_id(&self) -> CopyNumber {
        self.history_replica.unwrap_or(self.touchable_replica)
    }

    /// Deposit with time measured from `decay_time` and position in
    /// cylindrical coordinates.
    pub fn deposit(&self, decay_time: f64) -> Deposit {
        let p = &self.position;
        Deposit {
            energy: self.energy_deposit,
            time: self.global_time - decay_time,
            rho: p.x.hypot(p.y),
            phi: p.y.atan2(p.x),
            z: p.z,
        }
    }
}

/// Forward one step to a sink.
pub fn process_step<S: HitSink + ?Sized>(sink: &mut S, step: &StepPoint, decay_time: f64) {
    sink.record_hit(step.crystal_id(), &step.deposit(decay_time));
}
