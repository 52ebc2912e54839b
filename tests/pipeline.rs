//! End to end: variables, rules, inference and defuzzification.

use std::sync::Arc;
use std::thread;

use fuzzy_infer::{
    AndOp, CentroidDefuzzifier, DegeneratePolicy, Defuzzifier, Error, FuzzyOutput, FuzzyRule, FuzzySet, GridCentroid,
    Inference, Inputs, LinguisticVariable, MaximumDefuzzifier, MaximumOp, MembershipFunction, OrOp, Output, Rules,
};

struct Hvac {
    rules: Rules,
}

fn set(label: &str, function: fuzzy_infer::Result<MembershipFunction>) -> FuzzySet {
    FuzzySet::new(label, function.unwrap()).unwrap()
}

fn hvac() -> Hvac {
    let temperature = Arc::new(
        LinguisticVariable::new(
            "temperature",
            0. ..=40.,
            [
                set("cold", MembershipFunction::trapezoidal(0., 0., 10., 18.)),
                set("comfortable", MembershipFunction::triangular(15., 21., 27.)),
                set("hot", MembershipFunction::trapezoidal_open_right(24., 32.)),
            ],
        )
        .unwrap(),
    );
    let humidity = Arc::new(
        LinguisticVariable::new(
            "humidity",
            0. ..=100.,
            [
                set("dry", MembershipFunction::trapezoidal(0., 0., 30., 50.)),
                set("humid", MembershipFunction::trapezoidal_open_right(40., 70.)),
            ],
        )
        .unwrap(),
    );
    let fan = Arc::new(
        LinguisticVariable::new(
            "fan",
            0. ..=100.,
            [
                set("off", MembershipFunction::singleton(0.)),
                set("low", MembershipFunction::triangular(10., 30., 50.)),
                set("high", MembershipFunction::triangular(50., 75., 100.)),
            ],
        )
        .unwrap(),
    );
    let heater = Arc::new(
        LinguisticVariable::new(
            "heater",
            0. ..=10.,
            [
                set("off", MembershipFunction::singleton(0.)),
                set("on", MembershipFunction::triangular(4., 7., 10.)),
            ],
        )
        .unwrap(),
    );

    let rules = [
        FuzzyRule::builder("hot or humid", temperature.is("hot").unwrap())
            .unwrap()
            .or(humidity.is("humid").unwrap())
            .then(fan.is("high").unwrap())
            .also(heater.is("off").unwrap())
            .build(),
        FuzzyRule::builder("comfortable and dry", temperature.is("comfortable").unwrap())
            .unwrap()
            .and(humidity.is("dry").unwrap())
            .then(fan.is("low").unwrap())
            .build(),
        FuzzyRule::builder("cold", temperature.is("cold").unwrap())
            .unwrap()
            .then(heater.is("on").unwrap())
            .also(fan.is("off").unwrap())
            .build(),
    ]
    .into_iter()
    .collect();

    Hvac { rules }
}

fn inputs(temperature: f64, humidity: f64) -> Inputs {
    Inputs::new()
        .with("temperature", temperature)
        .unwrap()
        .with("humidity", humidity)
        .unwrap()
}

#[test]
fn test_hot_room_runs_fan() {
    let hvac = hvac();
    let model = Inference::<CentroidDefuzzifier>::default();
    let outputs = model.eval(&hvac.rules, &inputs(35., 20.)).unwrap();

    // Only "hot or humid" fires: fan high at 1, heater off at 1.
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs.value("fan"), Some(75.));
    assert_eq!(outputs.value("heater"), Some(0.));
    assert_eq!(outputs.max_firing_strength().value(), 1.);
}

#[test]
fn test_cold_room_runs_heater() {
    let hvac = hvac();
    let model = Inference::<CentroidDefuzzifier>::default();
    let outputs = model.eval(&hvac.rules, &inputs(5., 20.)).unwrap();

    // heater: off@0 (singleton 0) and on@1 -> centroid of on's knots 4,7,10
    assert_eq!(outputs.value("heater"), Some(7.));
    // fan: high@0, low@0, off@1 -> singleton at 0
    assert_eq!(outputs.value("fan"), Some(0.));
}

#[test]
fn test_mild_room_mixes_conclusions() {
    let hvac = hvac();
    let model = Inference::new(
        AndOp::Min,
        OrOp::Max,
        CentroidDefuzzifier::new(3).unwrap(),
        DegeneratePolicy::Fail,
    );
    let outputs = model.eval(&hvac.rules, &inputs(16., 45.)).unwrap();

    // cold = 0.25, comfortable = 1/6, dry = 0.25, humid = 1/6, hot = 0
    // fan knots: 0 (off@0.25), 10, 30, 50 (low@1/6), 50, 75, 100 (high@1/6)
    // weights: 0*0.25 + 30/6 + 75/6 over 0.25 + 2/6
    let expected = (30. / 6. + 75. / 6.) / (0.25 + 2. / 6.);

    assert!((outputs.value("fan").unwrap() - expected).abs() < 1e-3);
}

#[test]
fn test_alternative_defuzzifiers() {
    let hvac = hvac();
    let grid = Inference::new(
        AndOp::Min,
        OrOp::Max,
        GridCentroid::new(1001, 2).unwrap(),
        DegeneratePolicy::Fail,
    );
    let mom = Inference::new(
        AndOp::Min,
        OrOp::Max,
        MaximumDefuzzifier::new(MaximumOp::Mean, 2).unwrap(),
        DegeneratePolicy::Fail,
    );

    assert_eq!(grid.eval(&hvac.rules, &inputs(35., 20.)).unwrap().value("fan"), Some(75.));
    assert_eq!(mom.eval(&hvac.rules, &inputs(35., 20.)).unwrap().value("fan"), Some(75.));
    assert_eq!(grid.defuzzifier().precision(), 2);
}

/// Middle of the combined support, whatever fired.
struct SupportMidpoint;

impl Defuzzifier for SupportMidpoint {
    fn defuzzify(&self, outputs: &[FuzzyOutput]) -> fuzzy_infer::Result<Output> {
        let first = outputs.first().ok_or(Error::EmptyInput)?;
        let (min, max) = outputs
            .iter()
            .flat_map(|o| o.output_function().knots())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (x, _)| (min.min(x), max.max(x)));

        Ok(Output::new(first.subject().clone(), (min + max) / 2.))
    }

    fn precision(&self) -> u32 {
        0
    }
}

#[test]
fn test_custom_defuzzifier() {
    let hvac = hvac();
    let model = Inference::new(AndOp::Min, OrOp::Max, SupportMidpoint, DegeneratePolicy::Fail);
    let outputs = model.eval(&hvac.rules, &inputs(35., 20.)).unwrap();

    // fan sets span 0..=100, heater sets 0..=10
    assert_eq!(outputs.value("fan"), Some(50.));
    assert_eq!(outputs.value("heater"), Some(5.));
}

#[test]
fn test_missing_humidity_fails() {
    let hvac = hvac();
    let model = Inference::<CentroidDefuzzifier>::default();
    let inputs = Inputs::new().with("temperature", 20.).unwrap();

    match model.eval(&hvac.rules, &inputs) {
        Err(Error::MissingInput(name)) => assert_eq!(name.as_str(), "humidity"),
        other => panic!("expected a missing input, got {other:?}"),
    }
}

#[test]
fn test_rules_shared_across_threads() {
    let hvac = hvac();
    // At 21 degrees nothing concludes anything about the heater
    let model = Inference::new(
        AndOp::Min,
        OrOp::Max,
        CentroidDefuzzifier::default(),
        DegeneratePolicy::DomainMidpoint,
    );
    let temperatures = [5., 16., 21., 35.];

    let concurrent: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = temperatures
            .iter()
            .map(|&t| {
                let (rules, model) = (&hvac.rules, &model);
                s.spawn(move || model.eval(rules, &inputs(t, 20.)).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let sequential: Vec<_> = temperatures
        .iter()
        .map(|&t| model.eval(&hvac.rules, &inputs(t, 20.)).unwrap())
        .collect();

    assert_eq!(concurrent, sequential);
    assert_eq!(concurrent[2].value("heater"), Some(5.));
    assert_eq!(concurrent[2].value("fan"), Some(30.));
}
