/// quick start - quote a time deposit and check a feeds loan
use coop_finance_rs::{FinancialEngine, LoanType, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = FinancialEngine::default();
    let time = SafeTimeProvider::new(TimeSource::System);

    // 6 month placement of 150,000
    let quote = engine.compute_deposit_now(Money::from_major(150_000), 6, &time)?;
    println!("rate:     {}", quote.interest_rate);
    println!("interest: {}", quote.interest);
    println!("payout:   {}", quote.payout);
    println!("matures:  {}", quote.maturity_date.date_naive());

    // feeds loan for a member with 14,000 share capital
    let max_sacks = engine.sack_limit(Money::from_major(14_000), LoanType::Feeds);
    let check = engine.validate_loan_request(LoanType::Feeds, 6, max_sacks, Money::from_major(1_650));
    println!("\nfeeds limit: {} sacks, request valid: {}", max_sacks, check.valid);

    Ok(())
}
