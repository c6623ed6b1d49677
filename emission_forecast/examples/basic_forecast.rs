use emission_forecast::models::default_extrapolators;
use emission_forecast::{DataLoader, SeriesSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Emission Forecast: Basic Extrapolation Example");
    println!("==============================================\n");

    let dataset = DataLoader::builtin()?;
    let series = dataset
        .lookup("India")
        .ok_or("India is missing from the builtin dataset")?;

    let baseline = series.last();
    println!(
        "Loaded {} observations for {} (last: {} = {:.0} kt)\n",
        series.len(),
        series.entity_id(),
        baseline.year,
        baseline.value
    );

    // Each method on its own, ten years ahead
    let values = series.values();
    for extrapolator in default_extrapolators() {
        let forecast = extrapolator.extrapolate(&values, 10);
        println!("{:<24}", extrapolator.name());
        for (step, value) in forecast.values().iter().enumerate().step_by(3) {
            println!("  {}: {:>12.0} kt", baseline.year + 1 + step as i32, value);
        }
    }

    Ok(())
}
