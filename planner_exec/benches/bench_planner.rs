//! # Trajectory Planner Benchmark

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use nalgebra::Vector2;
use planner_lib::{
    loc::{AckermannState, Pose2},
    map::{CostGrid, CostGridParams, CostSurface, CostmapModel, DistanceField, MapGrid},
    planner::{GlobalPlan, LocalPlannerParams, TrajectoryPlanner},
};

fn planner_benchmark(c: &mut Criterion) {
    // ---- Build the cost grid and planner ----

    let cost_grid = Arc::new(
        CostGrid::from_params(&CostGridParams {
            num_cells: [240, 240],
            resolution_m: 0.05,
            origin_m: [-3.0, -6.0],
            obstacles_m: vec![[2.225, 0.275], [1.5, -0.8], [3.0, 0.6]],
        })
        .unwrap(),
    );

    let plan = GlobalPlan::direct(Vector2::new(0.0, 0.0), Vector2::new(5.0, 0.0), 0.05);
    let local_goal_m = plan.local_goal(cost_grid.geometry()).unwrap();

    let planner = TrajectoryPlanner::new(
        cost_grid.clone(),
        CostmapModel::new(cost_grid.clone()),
        MapGrid::new(cost_grid.geometry().clone()),
        LocalPlannerParams::default(),
    )
    .unwrap();
    planner.update_plan(plan.clone(), true).unwrap();

    let pose = Pose2::new(0.0, 0.0, 0.0);
    let state = AckermannState {
        speed_ms: 0.2,
        ..Default::default()
    };

    // Distance field propagation alone
    let mut map_grid = MapGrid::new(cost_grid.geometry().clone());
    c.bench_function("MapGrid::recompute", |b| {
        b.iter(|| map_grid.recompute(&cost_grid, &plan.points_m, &local_goal_m))
    });

    // Full planning cycle
    c.bench_function("TrajectoryPlanner::find_best_path", |b| {
        b.iter(|| planner.find_best_path(&pose, &state).unwrap())
    });
}

criterion_group!(benches, planner_benchmark);
criterion_main!(benches);
