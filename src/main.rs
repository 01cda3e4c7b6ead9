use pet_ring::geometry::PlacementProvider;
use pet_ring::units::MM;
use pet_ring::detector::Material;
use pet_ring::{build_detector, DetectorKind, DetectorMode, DetectorRequest};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Demo: build both presets at their default length and place one crystal.
    for (kind, material) in [
        (DetectorKind::SiemensQuadra, Material::NaI),
        (DetectorKind::Explorer, Material::Lyso),
    ] {
        let request = DetectorRequest::new(kind, DetectorMode::Crystal).with_material(material);
        let build = match build_detector(&request) {
            Ok(build) => build,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        };
        let placement = build.placements.compute_transformation(2607);
        println!(
            "{kind} ({material}): rings={} copies={} length_mm={:.2} mass_kg={:.1} build_ms={:.3}",
            build.n_rings(),
            build.copy_count(),
            build.length() / MM,
            build.report.mass.detector_mass_kg,
            build.report.timings.total_ms
        );
        println!(
            "  copy 2607 -> rho={:.3} phi={:.5} z={:.3} rot={:.5}",
            placement.rho() / MM,
            placement.phi(),
            placement.position.z / MM,
            placement.rotation_z
        );
    }
}
