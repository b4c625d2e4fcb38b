use clap::Args;
use vehicle_credit::credit::{
    CreditClassifier, CreditType, EligibilityEvaluator, NotQualified, VehicleCategory,
};
use vehicle_credit::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Applicant age in whole years
    #[arg(long)]
    pub(crate) age: u32,
    /// Declared monthly income
    #[arg(long)]
    pub(crate) income: f64,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Applicant age in whole years
    #[arg(long)]
    pub(crate) age: u32,
    /// Declared monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Vehicle category (HATCH or SUV, case-insensitive)
    #[arg(long)]
    pub(crate) vehicle: String,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let tier = classify_summary(args.age, args.income)?;
    println!("{tier}");
    Ok(())
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let category: VehicleCategory = args.vehicle.parse()?;
    println!("{}", check_summary(args.age, args.income, category));
    Ok(())
}

fn classify_summary(age: u32, income: f64) -> Result<String, NotQualified> {
    let tier: CreditType = CreditClassifier::new().classify(age, income)?;
    Ok(format!(
        "age {age}, income {income:.2}: {} at {:.1}%",
        tier.label(),
        tier.interest_rate()
    ))
}

fn check_summary(age: u32, income: f64, category: VehicleCategory) -> String {
    let verdict = if EligibilityEvaluator::new().is_eligible(age, income, category) {
        "eligible"
    } else {
        "not eligible"
    };
    format!("age {age}, income {income:.2}: {verdict} for {category}")
}
