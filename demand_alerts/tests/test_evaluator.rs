use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use demand_alerts::{
    AlertEvaluator, AlertEvent, AlertKind, AlertRule, AlertSettings, ProductSnapshot, RuleError,
    RuleOutcome, SupplyChainRule,
};
use demand_forecast::{ProductProfile, SalesHistory};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 9, 30, 0).unwrap()
}

fn history_ending_today(quantities: &[u32]) -> SalesHistory {
    let last = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
    SalesHistory::from_daily_quantities(last - Duration::days(quantities.len() as i64 - 1), quantities)
}

#[derive(Debug)]
struct BrokenRule;

impl AlertRule for BrokenRule {
    fn kind(&self) -> AlertKind {
        AlertKind::ForecastAccuracy
    }

    fn check(&self, _snapshot: &ProductSnapshot<'_>) -> demand_alerts::Result<Option<AlertEvent>> {
        Err(RuleError::InvalidData("corrupt forecast record".to_string()))
    }
}

#[test]
fn test_default_rules_in_order() {
    assert_eq!(
        AlertEvaluator::default().rule_kinds(),
        vec![
            AlertKind::StockoutRisk,
            AlertKind::UnusualDemand,
            AlertKind::ForecastAccuracy,
            AlertKind::SeasonalAnomaly,
            AlertKind::SupplyChainRisk,
        ]
    );
}

#[test]
fn test_several_rules_fire_for_one_product() {
    // Two flat weeks at 10, then a week ending on three days at 40
    let mut quantities = vec![10; 14];
    quantities.extend([10, 10, 10, 10, 40, 40, 40]);
    let history = history_ending_today(&quantities);
    let product = ProductProfile::new("sku-1", "Fans").with_lead_time(20, 5);
    let snapshot = ProductSnapshot::new(&product, &history, &[], now());

    let alerts = AlertEvaluator::default().evaluate_product(&snapshot);
    let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();

    assert_eq!(
        kinds,
        vec![
            AlertKind::StockoutRisk,
            AlertKind::UnusualDemand,
            AlertKind::SupplyChainRisk
        ]
    );
    assert!(alerts.iter().all(|a| a.product_id == "sku-1"));
}

#[test]
fn test_failing_rule_does_not_stop_others() {
    let evaluator =
        AlertEvaluator::with_rules(vec![Box::new(BrokenRule), Box::new(SupplyChainRule::default())]);
    let product = ProductProfile::new("sku-2", "Pallets").with_lead_time(30, 0);
    let history = SalesHistory::default();
    let snapshot = ProductSnapshot::new(&product, &history, &[], now());

    let report = evaluator.report(&snapshot);
    assert_eq!(report.len(), 2);
    assert_eq!(
        report[0].outcome,
        RuleOutcome::Failed {
            error: "Invalid data: corrupt forecast record".to_string()
        }
    );
    assert!(matches!(report[1].outcome, RuleOutcome::Fired { .. }));

    let alerts = evaluator.evaluate_product(&snapshot);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::SupplyChainRisk);
}

#[test]
fn test_evaluate_all_products() {
    let quiet = ProductProfile::new("sku-a", "Paper");
    let slow = ProductProfile::new("sku-b", "Steel").with_lead_time(45, 10);
    let flat = history_ending_today(&[12; 30]);
    let empty = SalesHistory::default();

    let snapshots = [
        ProductSnapshot::new(&quiet, &flat, &[], now()),
        ProductSnapshot::new(&slow, &empty, &[], now()),
    ];
    let alerts = AlertEvaluator::default().evaluate_all(&snapshots);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].product_id, "sku-b");
    assert_eq!(alerts[0].evidence["lead_time"], 45);
}

#[test]
fn test_report_serializes_with_status() {
    let product = ProductProfile::new("sku-c", "Rope");
    let history = SalesHistory::default();
    let snapshot = ProductSnapshot::new(&product, &history, &[], now());

    let report = AlertEvaluator::default().report(&snapshot);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0]["kind"], "stockout_risk");
    assert_eq!(json[0]["status"], "quiet");
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut settings = AlertSettings::default();
    settings.forecast_accuracy.max_age_days = 3;
    assert!(matches!(
        AlertEvaluator::new(settings),
        Err(RuleError::InvalidSettings(_))
    ));
}

#[test]
fn test_unbounded_forecast_age_is_contained() {
    let mut settings = AlertSettings::default();
    settings.forecast_accuracy.max_age_days = 100_000_000;
    assert!(matches!(
        AlertEvaluator::new(settings.clone()),
        Err(RuleError::InvalidSettings(_))
    ));

    let evaluator = AlertEvaluator::with_rules(vec![
        Box::new(settings.forecast_accuracy),
        Box::new(SupplyChainRule::default()),
    ]);
    let product = ProductProfile::new("sku-d", "Cement").with_lead_time(30, 0);
    let history = history_ending_today(&[8; 20]);
    let snapshot = ProductSnapshot::new(&product, &history, &[], now());

    let report = evaluator.report(&snapshot);
    assert!(matches!(report[0].outcome, RuleOutcome::Failed { .. }));
    assert!(matches!(report[1].outcome, RuleOutcome::Fired { .. }));
}
