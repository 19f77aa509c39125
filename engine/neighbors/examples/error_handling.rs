//! Example demonstrating proper error handling with the neighbor ranking
//! and majority-vote functions.
//!
//! This example shows how to handle the error conditions that can occur when
//! ranking and classifying, replacing panics with proper Result-based error
//! handling.

use knnlab_helpers::{L2Dist, LabeledPoint};
use ndarray::array;
use neighbors::{KnnError, find_k_nearest, majority_vote};

fn main() {
    println!("Neighbor Ranking Error Handling Examples");
    println!("========================================");

    let training_data = vec![
        LabeledPoint::from_xy(1.0, 1.0, "A"),
        LabeledPoint::from_xy(2.0, 2.0, "A"),
        LabeledPoint::from_xy(8.0, 8.0, "B"),
        LabeledPoint::from_xy(9.0, 8.0, "B"),
    ];

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    let query = array![2.5, 2.5];
    match find_k_nearest(query.view(), &training_data, 0, &L2Dist) {
        Ok(_) => println!("   Ranking succeeded"),
        Err(KnnError::InvalidK) => println!("   ✓ Caught expected error: {}", KnnError::InvalidK),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Handle an empty neighbor set (empty training data)
    println!("\n2. Handling an empty neighbor set:");
    let empty_data: Vec<LabeledPoint<&str, f64>> = vec![];
    let neighbors = find_k_nearest(query.view(), &empty_data, 3, &L2Dist)
        .expect("k=3 is a valid ranking request");
    println!("   Ranking over empty data returned {} neighbors", neighbors.len());
    match majority_vote(&empty_data, &neighbors) {
        Ok(outcome) => println!("   Classified as {}", outcome.label),
        Err(KnnError::EmptyNeighborSet) => {
            println!("   ✓ Caught expected error: {}", KnnError::EmptyNeighborSet)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: Successful ranking and classification
    println!("\n3. Successful ranking and classification:");
    match find_k_nearest(query.view(), &training_data, 3, &L2Dist) {
        Ok(neighbors) => {
            for neighbor in &neighbors {
                let point = &training_data[neighbor.index];
                println!(
                    "   neighbor [{:.1}, {:.1}] label {} at distance {:.3}",
                    point.x(),
                    point.y(),
                    point.label,
                    neighbor.distance
                );
            }
            match majority_vote(&training_data, &neighbors) {
                Ok(outcome) => println!(
                    "   ✓ Classified as {} with {}/{} votes ({:.0}% confidence)",
                    outcome.label,
                    outcome.votes,
                    outcome.total,
                    outcome.confidence() * 100.0
                ),
                Err(e) => println!("   ✗ Classification failed: {}", e),
            }
        }
        Err(e) => println!("   ✗ Ranking failed: {}", e),
    }

    // Example 4: Demonstrate error propagation in a function
    println!("\n4. Error propagation in functions:");

    fn classify_with_error_handling() -> Result<String, KnnError> {
        let training_data = vec![
            LabeledPoint::from_xy(1.0, 0.0, "positive"),
            LabeledPoint::from_xy(-1.0, 0.0, "negative"),
        ];

        let query = array![0.5, 0.0];
        let neighbors = find_k_nearest(query.view(), &training_data, 1, &L2Dist)?;
        let outcome = majority_vote(&training_data, &neighbors)?;
        Ok(outcome.label.to_string())
    }

    match classify_with_error_handling() {
        Ok(result) => println!("   ✓ Classification result: {}", result),
        Err(e) => println!("   ✗ Classification failed: {}", e),
    }

    println!("\nAll examples completed successfully!");
}
