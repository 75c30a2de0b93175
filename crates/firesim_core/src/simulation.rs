//! Simulation drivers
//!
//! [`run_simulation`] steps a household forward until the horizon or until it
//! goes broke. [`run_fire_simulation`] searches for the earliest month after
//! which salary can stop while wealth still lasts for the horizon.

use rust_decimal::Decimal;

use crate::inflation::InflationSource;
use crate::model::{FireSearchResult, FireSimulation};
use crate::transition::simulate_next;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

fn step(
    prev: &FireSimulation,
    inflation: &mut Option<&mut dyn InflationSource>,
) -> FireSimulation {
    match inflation {
        Some(source) => simulate_next(prev, Some(&mut **source)),
        None => simulate_next(prev, None),
    }
}

/// Apply the transition once per month for `months` months.
///
/// The returned sequence starts with a copy of `init`. If wealth including
/// property drops below zero the run stops, and the failing month is the last
/// element.
pub fn run_simulation(
    init: &FireSimulation,
    months: usize,
    mut inflation: Option<&mut dyn InflationSource>,
) -> Vec<FireSimulation> {
    let mut simulations = Vec::with_capacity(months + 1);
    simulations.push(init.clone());

    for _ in 0..months {
        let next = step(&simulations[simulations.len() - 1], &mut inflation);
        let insolvent = next.wealth_inc_properties() < Decimal::ZERO;
        let date = next.date;
        simulations.push(next);

        if insolvent {
            tracing::debug!(%date, months = simulations.len() - 1, "wealth exhausted");
            break;
        }
    }

    simulations
}

/// One candidate of the retirement search.
///
/// Salary is paid through month `last_working_month`; from the step after it
/// the previous state's income is zeroed before transitioning. The run stops
/// before appending a month whose wealth including property is not positive.
fn run_candidate(
    init: &FireSimulation,
    expected_months: usize,
    last_working_month: usize,
    inflation: &mut Option<&mut dyn InflationSource>,
) -> Vec<FireSimulation> {
    let mut simulations = Vec::with_capacity(expected_months + 1);
    simulations.push(init.clone());

    for month in 0..expected_months {
        let prev = &simulations[simulations.len() - 1];
        let next = if month > last_working_month {
            step(&prev.with_monthly_income(Decimal::ZERO), inflation)
        } else {
            step(prev, inflation)
        };

        if next.wealth_inc_properties() <= Decimal::ZERO {
            break;
        }
        simulations.push(next);
    }

    simulations
}

/// Accept a candidate that lasts within two months of the horizon.
fn sustains(simulations: &[FireSimulation], expected_months: usize) -> bool {
    simulations.len() >= expected_months.saturating_sub(2)
}

/// Find the earliest month after which salary can stop.
///
/// Candidates are tried in order from month 0. The first one whose trajectory
/// reaches `expected_months - 2` states is accepted. When none is, the last
/// trajectory tried is returned with `accepted_month` unset. A single
/// inflation source is shared across all candidates, so later candidates see
/// later values of the sequence.
pub fn run_fire_simulation(
    init: &FireSimulation,
    expected_months: usize,
    mut inflation: Option<&mut dyn InflationSource>,
) -> FireSearchResult {
    let mut simulations = vec![init.clone()];

    for candidate in 0..expected_months {
        simulations = run_candidate(init, expected_months, candidate, &mut inflation);

        if sustains(&simulations, expected_months) {
            tracing::debug!(
                candidate,
                months = simulations.len() - 1,
                "retirement candidate accepted"
            );
            return FireSearchResult {
                simulations,
                attempts: candidate + 1,
                accepted_month: Some(candidate),
            };
        }
    }

    tracing::debug!(expected_months, "no retirement candidate sustained the horizon");
    FireSearchResult {
        simulations,
        attempts: expected_months,
        accepted_month: None,
    }
}

/// Parallel version of [`run_fire_simulation`].
///
/// Candidates are evaluated in batches across the rayon pool and the lowest
/// accepted month wins, so the answer matches the sequential search. Each
/// candidate gets its own source from `make_source`; every trajectory
/// therefore starts from the beginning of the inflation sequence, unlike the
/// sequential search which shares one source.
#[cfg(feature = "parallel")]
pub fn run_fire_simulation_par<S, F>(
    init: &FireSimulation,
    expected_months: usize,
    make_source: F,
) -> FireSearchResult
where
    S: InflationSource,
    F: Fn() -> Option<S> + Sync,
{
    let batch_size = rayon::current_num_threads().max(1);
    let mut last_tried = vec![init.clone()];
    let mut start = 0;

    while start < expected_months {
        let end = (start + batch_size).min(expected_months);

        let mut runs: Vec<(usize, Vec<FireSimulation>)> = (start..end)
            .into_par_iter()
            .map(|candidate| {
                let mut source = make_source();
                let mut inflation = source
                    .as_mut()
                    .map(|s| s as &mut dyn InflationSource);
                let simulations =
                    run_candidate(init, expected_months, candidate, &mut inflation);
                (candidate, simulations)
            })
            .collect();

        if let Some(index) = runs
            .iter()
            .position(|(_, simulations)| sustains(simulations, expected_months))
        {
            let (candidate, simulations) = runs.swap_remove(index);
            tracing::debug!(candidate, "retirement candidate accepted");
            return FireSearchResult {
                simulations,
                attempts: candidate + 1,
                accepted_month: Some(candidate),
            };
        }

        if let Some((_, simulations)) = runs.pop() {
            last_tried = simulations;
        }
        start = end;
    }

    tracing::debug!(expected_months, "no retirement candidate sustained the horizon");
    FireSearchResult {
        simulations: last_tried,
        attempts: expected_months,
        accepted_month: None,
    }
}
