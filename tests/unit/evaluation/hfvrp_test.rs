use super::*;
use crate::helpers::*;
use crate::models::problem::PowertrainClass;
use proptest::prelude::*;

fn create_rich_evaluation() -> HfvrpEvaluation {
    let economics = EconomicParameters {
        depot_utility_cost: 30.,
        maintenance_overhead: 5.,
        electricity_price: 0.3,
        diesel_price: 1.8,
        wage_standard: 120.,
        wage_heavy: 180.,
        toll_rate: 0.4,
        daily_revenue: 400.,
        green_share: 0.05,
        ..Default::default()
    };

    let diesel = VehicleTypeBuilder::default()
        .capacity_weight(800.)
        .capacity_volume(6.)
        .max_range(150.)
        .acquisition_cost(30_000.)
        .consumption_liquid(0.12)
        .maintenance_cost_per_km(0.08)
        .build();
    let electric = VehicleTypeBuilder::default()
        .capacity_weight(600.)
        .capacity_volume(5.)
        .max_range(120.)
        .acquisition_cost(45_000.)
        .consumption_electric(0.25)
        .maintenance_cost_per_km(0.05)
        .powertrain(PowertrainClass::Electric)
        .initial_count(1)
        .build();
    let heavy = VehicleTypeBuilder::default()
        .capacity_weight(4000.)
        .capacity_volume(20.)
        .max_range(300.)
        .acquisition_cost(80_000.)
        .consumption_liquid(0.3)
        .maintenance_cost_per_km(0.15)
        .daily_lease_cost(60.)
        .build();

    create_test_evaluation_with_economics(vec![diesel, electric, heavy], economics)
}

fn customer_leg() -> impl Strategy<Value = (VertexAttributes, ArcAttributes)> {
    ((0f64..100., 0f64..5., 0f64..600.), (0f64..50., 0f64..1800., 0f64..10.)).prop_map(
        |((demand_weight, demand_volume, service_time), (distance, travel_time, toll))| {
            (
                customer(demand_weight, demand_volume, service_time),
                ArcAttributes { distance, travel_time, toll_distance: toll.min(distance) },
            )
        },
    )
}

fn route_strategy() -> impl Strategy<Value = (Vec<VertexAttributes>, Vec<ArcAttributes>)> {
    (prop::collection::vec(customer_leg(), 1..8), (0f64..50., 0f64..1800., 0f64..10.)).prop_map(
        |(legs, (distance, travel_time, toll))| {
            let mut vertices = vec![depot()];
            let mut arcs = vec![];

            legs.into_iter().for_each(|(vertex, arc)| {
                vertices.push(vertex);
                arcs.push(arc);
            });

            vertices.push(depot());
            arcs.push(ArcAttributes { distance, travel_time, toll_distance: toll.min(distance) });

            (vertices, arcs)
        },
    )
}

fn totals_strategy() -> impl Strategy<Value = RouteTotals> {
    (0f64..500., 0f64..100., 0f64..5000., 0f64..30., 0f64..40_000.).prop_map(
        |(distance, toll, load_weight, load_volume, work_time)| RouteTotals {
            distance,
            toll_distance: toll.min(distance),
            load_weight,
            load_volume,
            work_time,
        },
    )
}

#[test]
fn concatenation_at_the_depot_charges_the_departure_cost() {
    let evaluation = create_rich_evaluation();
    let vertices = [depot(), customer(100., 2., 300.), depot()];
    let arcs = [toll_arc(20., 1200., 5.), arc(15., 900.)];

    let forward = forward_labels(&evaluation, &vertices, &arcs);
    let backward = backward_labels(&evaluation, &vertices, &arcs);
    let route_cost = evaluation.compute_cost(forward.last().unwrap());

    let at_customer = evaluation.concatenate(&forward[1], &backward[1], &vertices[1]);
    let at_depot = evaluation.concatenate(&forward[0], &backward[0], &vertices[0]);

    assert!((at_customer - route_cost).abs() < 1e-9);
    assert!((at_depot - (route_cost + 35.)).abs() < 1e-9);
}

#[test]
fn feasibility_requires_all_violations_to_be_zero() {
    let evaluation = create_test_evaluation(vec![test_vehicle_type()]);

    let feasible = ForwardLabel { distance: 50., load_weight: 500., ..Default::default() };
    let overloaded = ForwardLabel { load_weight: 1200., ..Default::default() };
    let bulky = ForwardLabel { load_volume: 11., ..Default::default() };
    let too_far = ForwardLabel { distance: 101., ..Default::default() };
    let overtime = ForwardLabel { work_time: DEFAULT_WORK_TIME_LIMIT + 1., ..Default::default() };

    assert!(evaluation.is_feasible(&feasible));
    assert!(!evaluation.is_feasible(&overloaded));
    assert!(!evaluation.is_feasible(&bulky));
    assert!(!evaluation.is_feasible(&too_far));
    assert!(!evaluation.is_feasible(&overtime));
}

#[test]
fn feasibility_is_judged_against_the_cost_optimal_vehicle() {
    // the small type overloads, the spacious one absorbs the route without violations
    let small = VehicleTypeBuilder::default().capacity_weight(500.).build();
    let spacious =
        VehicleTypeBuilder::default().capacity_weight(2000.).maintenance_cost_per_km(1.).build();
    let evaluation = create_test_evaluation(vec![small, spacious]);

    let label = ForwardLabel { distance: 10., load_weight: 800., ..Default::default() };

    assert!(evaluation.is_feasible(&label));
}

#[test]
fn cost_components_keep_their_contractual_order() {
    let evaluation = create_test_evaluation(vec![test_vehicle_type()]);
    let label = ForwardLabel {
        distance: 130.,
        toll_distance: 12.,
        load_weight: 1020.,
        load_volume: 13.,
        work_time: DEFAULT_WORK_TIME_LIMIT + 45.,
    };

    let components = evaluation.get_cost_components(&label);

    assert_eq!(components, vec![130., 30., 20., 3., 45., 12.]);
}

#[test]
fn penalty_factor_setters_reconfigure_the_whole_instance() {
    let mut evaluation = create_test_evaluation(vec![test_vehicle_type()]);
    let label = ForwardLabel { load_weight: 1100., ..Default::default() };

    assert_eq!(evaluation.compute_cost(&label), 100.);

    evaluation.set_overload_penalty_factor(5.);

    assert_eq!(evaluation.overload_penalty_factor(), 5.);
    assert_eq!(evaluation.compute_cost(&label), 500.);
}

#[test]
fn best_vehicle_id_of_route_is_read_from_the_end_label() {
    let small = VehicleTypeBuilder::default().capacity_weight(500.).build();
    let spacious =
        VehicleTypeBuilder::default().capacity_weight(2000.).maintenance_cost_per_km(1.).build();
    let evaluation = create_test_evaluation(vec![small, spacious]);

    let light_route =
        TestRoute::new(ForwardLabel { distance: 10., load_weight: 100., ..Default::default() });
    let heavy_route =
        TestRoute::new(ForwardLabel { distance: 10., load_weight: 800., ..Default::default() });

    assert_eq!(evaluation.compute_best_vehicle_id_of_route(&light_route), 0);
    assert_eq!(evaluation.compute_best_vehicle_id_of_route(&heavy_route), 1);
}

#[test]
fn route_summary_reports_the_billed_total() {
    let evaluation = create_rich_evaluation();
    let label = ForwardLabel {
        distance: 40.,
        toll_distance: 8.,
        load_weight: 500.,
        load_volume: 4.,
        work_time: 7200.,
    };
    let route = TestRoute::new(label);

    let summary = evaluation.summarize_route(&route);
    let breakdown = evaluation.choose_vehicle(&RouteTotals::from(&label)).1;

    assert_eq!(summary.distance, 40.);
    assert_eq!(summary.toll_distance, 8.);
    assert_eq!(summary.duration, 7200.);
    assert_eq!(summary.load_weight, 500.);
    assert_eq!(summary.load_volume, 4.);
    assert_eq!(summary.fixed_cost, 35.);
    assert_eq!(summary.vehicle_type, evaluation.compute_best_vehicle_id_of_route(&route));
    assert!((summary.cost - (breakdown.total + 35.)).abs() < 1e-9);
}

proptest! {
    #[test]
    fn concatenation_at_any_split_matches_a_full_forward_scan((vertices, arcs) in route_strategy()) {
        let evaluation = create_rich_evaluation();

        let forward = forward_labels(&evaluation, &vertices, &arcs);
        let backward = backward_labels(&evaluation, &vertices, &arcs);
        let expected = evaluation.compute_cost(forward.last().unwrap());

        for split_idx in 1..vertices.len() - 1 {
            let actual = evaluation.concatenate(&forward[split_idx], &backward[split_idx], &vertices[split_idx]);
            prop_assert!((actual - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn chosen_vehicle_is_never_beaten_by_another_type(totals in totals_strategy()) {
        let evaluation = create_rich_evaluation();
        let (_, best) = evaluation.choose_vehicle(&totals);

        let cost_model = CostModel::new(
            evaluation.fleet().clone(),
            evaluation.economics().clone(),
            PenaltyWeights::default(),
        );

        for type_idx in 0..evaluation.fleet().vehicle_types.len() {
            prop_assert!(best.total <= cost_model.cost_for_vehicle(type_idx, &totals).total + 1e-9);
        }
    }

    #[test]
    fn cost_never_decreases_when_a_total_grows(totals in totals_strategy(), delta in 0f64..200.) {
        let evaluation = create_rich_evaluation();
        let base = evaluation.choose_vehicle(&totals).1.total;

        let increased = [
            RouteTotals { distance: totals.distance + delta, ..totals },
            RouteTotals { load_weight: totals.load_weight + delta, ..totals },
            RouteTotals { load_volume: totals.load_volume + delta, ..totals },
            RouteTotals { work_time: totals.work_time + delta, ..totals },
        ];

        for totals in increased {
            prop_assert!(evaluation.choose_vehicle(&totals).1.total >= base - 1e-9);
        }
    }

    #[test]
    fn feasibility_agrees_with_zero_penalty(totals in totals_strategy()) {
        let evaluation = create_rich_evaluation();
        let label = ForwardLabel {
            distance: totals.distance,
            toll_distance: totals.toll_distance,
            load_weight: totals.load_weight,
            load_volume: totals.load_volume,
            work_time: totals.work_time,
        };

        let (_, breakdown) = evaluation.choose_vehicle(&totals);

        prop_assert_eq!(evaluation.is_feasible(&label), breakdown.penalty == 0.);
    }
}
