use rstest::rstest;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments should parse")
}

#[test]
fn login_takes_email_and_password() {
    let cli = parse(&[
        "spv",
        "login",
        "--email",
        "ada@example.com",
        "--password",
        "secret",
    ]);
    let Command::Login { email, password } = cli.command else {
        panic!("expected login command");
    };
    assert_eq!(email, "ada@example.com");
    assert_eq!(password, "secret");
}

#[test]
fn apply_accepts_grouped_naira_amounts() {
    let cli = parse(&[
        "spv",
        "apply",
        "--full-name",
        "Ada Obi",
        "--national-id",
        "12345678901",
        "--employment-status",
        "employed",
        "--location",
        "Lagos",
        "--option",
        "outright",
        "--amount",
        "₦750,000",
    ]);
    let Command::Apply(args) = cli.command else {
        panic!("expected apply command");
    };
    assert_eq!(args.amount, Some(NairaAmount::new(750_000)));
    assert_eq!(args.option, Some(InvestmentOptionArg::Outright));
    assert!(!args.credit_consent);
}

#[test]
fn apply_leaves_the_option_to_draft_validation() {
    let cli = parse(&[
        "spv",
        "apply",
        "--full-name",
        "Ada Obi",
        "--national-id",
        "12345678901",
        "--employment-status",
        "employed",
        "--location",
        "Lagos",
    ]);
    let Command::Apply(args) = cli.command else {
        panic!("expected apply command");
    };

    let draft = args.to_draft();
    assert_eq!(draft.investment_option, None);
    assert!(draft.validate().is_err());
}

#[test]
fn apply_rejects_unparsable_amounts() {
    let result = Cli::try_parse_from([
        "spv",
        "apply",
        "--full-name",
        "Ada Obi",
        "--national-id",
        "12345678901",
        "--employment-status",
        "employed",
        "--location",
        "Lagos",
        "--amount",
        "half a cow",
    ]);
    assert!(result.is_err());
}

#[test]
fn financing_draft_carries_consent_flag() {
    let cli = parse(&[
        "spv",
        "apply",
        "--full-name",
        "Ada Obi",
        "--national-id",
        "12345678901",
        "--employment-status",
        "self-employed",
        "--location",
        "Kano",
        "--option",
        "financing",
        "--credit-consent",
    ]);
    let Command::Apply(args) = cli.command else {
        panic!("expected apply command");
    };

    let draft = args.to_draft();
    assert_eq!(
        draft.investment_option,
        Some(InvestmentOption::Financing)
    );
    assert!(draft.credit_consent);
    assert!(draft.validate().is_ok());
}

#[rstest]
#[case::asset_allocation("asset-allocation", ServiceRequestKind::AssetAllocation)]
#[case::management_change("management-change", ServiceRequestKind::ManagementChange)]
#[case::information_update("information-update", ServiceRequestKind::InformationUpdate)]
#[case::withdrawal("withdrawal", ServiceRequestKind::Withdrawal)]
fn request_kinds_bridge_to_domain_labels(
    #[case] value: &str,
    #[case] expected: ServiceRequestKind,
) {
    let cli = parse(&[
        "spv",
        "request",
        "--kind",
        value,
        "--description",
        "please update my records",
    ]);
    let Command::Request { kind, .. } = cli.command else {
        panic!("expected request command");
    };
    assert_eq!(ServiceRequestKind::from(kind), expected);
}

#[test]
fn preset_amount_bypasses_the_prompt() {
    let prompt = StdinAmountPrompt::new(Some(NairaAmount::new(900_000)));
    assert_eq!(
        prompt.request_amount(InvestmentOption::Outright),
        Some(NairaAmount::new(900_000))
    );
}
