// This is a simple example showing how to use the knnlab library
use knnlab::{GeneratorConfig, Session};

fn main() {
    println!("knnlab library example");

    let mut session = Session::seeded(GeneratorConfig::default(), 0.2, 7)
        .expect("mixing level 0.2 is in range");
    println!("Generated {} training points", session.dataset().len());

    session
        .place_query_point(380.0, 280.0)
        .expect("the plot center is inside the bounds");
    session.find_k_nearest(5).expect("a query point is placed");

    let outcome = session.classify().expect("neighbors are ranked");
    println!(
        "Query at (380, 280) classified as {:?} with {}/{} votes",
        outcome.label, outcome.votes, outcome.total
    );
}
