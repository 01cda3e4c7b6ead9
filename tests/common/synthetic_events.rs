use std::fmt::Write;

/// Deterministic deposit file: `events` events, each hitting `hits_per_event`
/// crystals of the first ring with two steps apiece.
///
/// Crystal `c` of event `e` is `(e * 37 + k * 101) % crystals_per_ring` and
/// receives `100 + k` keV split 3:1 across its steps.
#[allow(dead_code)]
pub fn deposit_text(events: u64, hits_per_event: u64, crystals_per_ring: u64) -> String {
    assert!(crystals_per_ring > 0, "ring must hold crystals");
    let mut text = String::from("# synthetic deposits\n");
    for event in 0..events {
        let decay_ns = 10.0 * event as f64;
        writeln!(text, "# decay {event} {decay_ns}").unwrap();
        for k in 0..hits_per_event {
            let crystal = (event * 37 + k * 101) % crystals_per_ring;
            let energy = 100.0 + k as f64;
            let phi = crystal as f64 * 1e-3;
            let (x, y) = (410.0 * phi.cos(), 410.0 * phi.sin());
            writeln!(
                text,
                "{event} {crystal} {} {} {x} {y} -20",
                energy * 0.75,
                decay_ns + 1.0
            )
            .unwrap();
            writeln!(
                text,
                "{event} {crystal} {} {} {x} {y} -20",
                energy * 0.25,
                decay_ns + 5.0
            )
            .unwrap();
        }
    }
    text
}

/// Relative comparison for derived floating-point values.
#[allow(dead_code)]
pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}
