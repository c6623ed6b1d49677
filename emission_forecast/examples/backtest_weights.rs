use emission_forecast::{DataLoader, ForecastConfig, ForecastReport, ForecastRequest, Forecaster};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Emission Forecast: Backtest and Ensemble Weights");
    println!("================================================\n");

    let forecaster = Forecaster::new(DataLoader::builtin()?, ForecastConfig::default())?;
    let result = forecaster.forecast(&ForecastRequest::global(2050))?;

    println!("Backtest errors (RMSE, kt):");
    for score in &result.scores {
        println!("  {:<24} {:>14.0}", score.method.label(), score.rmse);
    }

    println!("\nEnsemble weights:");
    for (method, weight) in result.weights.iter() {
        println!("  {:<24} {:>8.3}", method.label(), weight);
    }

    println!(
        "\nEnsemble forecast for {}: {:.0} kt ({:+.1}%)",
        result.target_year, result.ensemble_prediction, result.percentage_change
    );

    let report = ForecastReport::from(&result);
    println!("\nChart rows in report: {}", report.chart_data.len());

    Ok(())
}
