/// deposit lifecycle - open, partially withdraw, mature and roll over
use chrono::{Duration, TimeZone, Utc};
use coop_finance_rs::{FinancialEngine, Money, RolloverOptions, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = FinancialEngine::default();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let control = time.test_control().unwrap();

    let mut deposit = engine.open_deposit("M-0001", Money::from_major(250_000), 6, &time)?;
    println!("opened {} at {}, payout {} on {}",
        deposit.principal, deposit.interest_rate, deposit.payout_amount,
        deposit.maturity_date.date_naive());

    // two months in the member needs 50,000
    control.advance(Duration::days(60));
    let withdrawal = engine.withdraw_early(&mut deposit, Money::from_major(50_000), &time)?;
    println!("\nearly withdrawal after {} days: receives {} ({} interest), {} stays placed",
        withdrawal.days_elapsed, withdrawal.total_withdrawal_amount,
        withdrawal.new_interest, withdrawal.remaining_balance);

    // run to maturity
    let days_left = deposit.days_to_maturity(time.now());
    control.advance(Duration::days(days_left as i64));
    deposit.mark_matured(time.now());
    println!("\nmatured: {:?}, payout {}", deposit.status, deposit.payout_amount);

    // renew for a year with interest and a top-up
    let options = RolloverOptions::new(12)
        .include_interest(true)
        .additional_deposit(Money::from_major(100_000));
    let (rollover, renewed) = engine.roll_over(&mut deposit, &options, &time)?;
    println!("\nrolled over {} at {} until {}",
        rollover.total_amount, rollover.new_interest_rate,
        rollover.new_maturity_date.date_naive());

    println!("\nevents on the closed deposit:");
    for event in deposit.events() {
        println!("  {:?}", event);
    }
    println!("\nrenewed deposit {} payout {}", renewed.id, renewed.payout_amount);

    Ok(())
}
