//! Walks one classification session through its whole lifecycle, printing
//! each transition. Run with `cargo run -p session --example walkthrough`.

use datagen::GeneratorConfig;
use session::{Session, SessionError};

fn main() -> Result<(), SessionError> {
    let mut session = Session::seeded(GeneratorConfig::default(), 0.3, 42)?;
    println!(
        "generated {} training points, state {:?}",
        session.dataset().len(),
        session.state()
    );

    // Actions out of order are rejected, not crashed.
    if let Err(e) = session.classify() {
        println!("classify before ranking: {}", e);
    }

    session.place_query_point(380.0, 280.0)?;
    println!("placed query point, state {:?}", session.state());

    session.find_k_nearest(5)?;
    for (point, distance) in session.neighbor_points() {
        println!(
            "  neighbor [{:6.1}, {:6.1}] class {:?} at distance {:.1}",
            point.x(),
            point.y(),
            point.label,
            distance
        );
    }

    let outcome = session.classify()?;
    println!(
        "classified as {:?} with {}/{} votes ({:.0}% confidence)",
        outcome.label,
        outcome.votes,
        outcome.total,
        outcome.confidence() * 100.0
    );

    session.reset();
    println!("reset, state {:?}", session.state());

    session.regenerate(0.8)?;
    println!(
        "regenerated {} points at mixing level {:.1}",
        session.dataset().len(),
        session.mixing_level()
    );

    Ok(())
}
