//! # ltcorrection Basic Usage Example
//!
//! This example builds a life table from a skeletal assemblage, extracts its indices and
//! corrects it for missing infants and young children.
//!
//! Run with `RUST_LOG=debug` to see the intermediate steps.

use ltcorrection::prelude::*;

fn main() -> LTResult<()> {
    env_logger::init();

    println!("ltcorrection Basic Usage Example");
    println!("================================");
    println!();

    // Death counts per age class: 0, 1-4, 5-9, ... then 10-year adult classes
    println!("Loading death counts...");
    let data = ltdf! {
        "a" => [1_u32, 4, 5, 5, 5, 5, 10, 10, 10, 10, 10],
        "Dx" => [4.0_f64, 6.0, 5.0, 6.0, 8.0, 9.0, 14.0, 16.0, 15.0, 12.0, 5.0],
    }?;
    println!("✓ {} age classes, {} individuals", data.len(), data.total_deaths()?);
    println!();

    // Uncorrected life table
    let config = LifeTableConfig::builder()
        .agecor(true)
        .agecorfac(vec![0.3])
        .build()?;
    let lt = life_table().data(&data).config(&config).call()?;
    println!("Uncorrected life table:");
    println!("{}", lt.dataframe);
    println!("e0 = {:.3}", lt.e0()?);
    println!();

    // Indices
    let indices = lt_indices().lt(&lt).call()?;
    println!("Indices:");
    println!("  child_i        = {:.4}", indices.child_i);
    println!("  juvenile_i     = {:.4}", indices.juvenile_i);
    println!("  senility_i     = {:.4}", indices.senility_i);
    println!("  D0-14/D        = {:.4}", indices.d0_14_d);
    println!("  D15-49/D15+    = {:.4}", indices.d15_49_d15plus);
    println!();

    // Correction
    let result = lt_correction().lt(&lt).config(&config).call()?;
    println!("Corrected estimates:");
    println!("{}", result.indices_table()?);
    let q5_0 = result.index(IndexName::Q5_0);
    println!(
        "5q0 = {} (range {} to {})",
        q5_0.value, q5_0.range_start, q5_0.range_end
    );
    println!();

    println!("Corrected life table:");
    println!("{}", result.life_table.dataframe);
    println!("e0 = {:.3}", result.life_table.e0()?);
    println!();

    // Several sites at once
    let tables = vec![
        ("site_a".to_string(), lt.clone()),
        ("site_b".to_string(), lt),
    ];
    let output = lt_correction_input().input(tables.into()).call()?;
    if let CorrectionOutput::Collection(results) = output {
        for (name, result) in &results {
            println!("{name}: e0 = {}", result.index(IndexName::E0).value);
        }
    }
    println!();

    // Layouts other than 0-4 or 0 / 1-4 are rejected
    let odd = ltdf! {
        "a" => [3_u32, 2, 5, 10, 20, 20, 20],
        "Dx" => [2.0_f64, 3.0, 6.0, 9.0, 30.0, 25.0, 15.0],
    }?;
    let odd_lt = life_table().data(&odd).call()?;
    match lt_correction().lt(&odd_lt).call() {
        Ok(_) => println!("unexpected success"),
        Err(err) => match err.downcast_ref::<CorrectionError>() {
            Some(CorrectionError::UnsupportedLayout { widths }) => {
                println!("✓ rejected first class widths {widths:?}")
            }
            _ => return Err(err),
        },
    }

    Ok(())
}
