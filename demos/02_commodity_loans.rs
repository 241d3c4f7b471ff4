/// commodity loans - sack limits under both rules and cash loan ceilings
use coop_finance_rs::{
    CommodityLoanRequest, EngineConfig, FinancialEngine, LoanType, Money, Rate, SackLimitRule,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let per_commodity = FinancialEngine::default();
    let uniform = FinancialEngine::new(
        EngineConfig::standard().with_sack_limit_rule(SackLimitRule::Uniform),
    )?;

    println!("share capital | feeds (per commodity) | feeds (uniform) | rice");
    for capital in [3_000, 6_000, 10_000, 15_000, 19_999, 20_000, 40_000] {
        let share_capital = Money::from_major(capital);
        println!("{:>13} | {:>21} | {:>15} | {:>4}",
            capital,
            per_commodity.sack_limit(share_capital, LoanType::Feeds),
            uniform.sack_limit(share_capital, LoanType::Feeds),
            per_commodity.sack_limit(share_capital, LoanType::Rice));
    }

    // rice request financed at 80%
    let request = CommodityLoanRequest::new(LoanType::Rice, 4, Money::from_major(2_300))
        .with_loan_percentage(Rate::from_percentage(80));
    let assessment = per_commodity.assess_commodity_loan(&request, Money::from_major(8_000))?;
    println!("\nrice: {} sacks allowed, requested {}, financed {}, valid {}",
        assessment.max_sacks, assessment.validation.requested_amount,
        assessment.financed_amount, assessment.validation.valid);

    // a request over the limit
    let over = per_commodity.validate_loan_request(LoanType::Feeds, 20, 10, Money::from_major(1_000));
    if let Some(err) = &over.error {
        println!("feeds: {}", err);
    }

    // cash loans
    let marketing = per_commodity.validate_cash_loan(LoanType::Marketing, Money::from_major(90_000), Money::ZERO)?;
    println!("marketing: valid {} (ceiling {})", marketing.valid, marketing.loanable_amount);

    let b2b = per_commodity.validate_cash_loan(LoanType::BackToBack, Money::from_major(12_000), Money::from_major(15_000))?;
    println!("back-to-back: valid {} (ceiling {})", b2b.valid, b2b.loanable_amount);

    Ok(())
}
