// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Concurrent customer driver.
//!
//! One tokio task per customer, all sharing a single [`Banker`]:
//!
//! ```text
//! round ──► need ──► strategy.next_request ──► try_hold
//!                                                 │
//!                      ┌──────────────────────────┴──────────┐
//!                      ▼                                     ▼
//!               Held: sleep work,                    Denied: sleep
//!               release hold                         retry delay
//! ```
//!
//! The banker's API is synchronous, so no task ever awaits while holding
//! the banker's lock.

use crate::config::customer_seed;
use crate::report::{CustomerReport, SimulationReport};
use crate::{random_claims, DemandStrategy, SimulationConfig, SimulationError};
use allocator::{Banker, DenialReason, HoldOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// A configured simulation, ready to [`run`](Simulation::run).
///
/// # Example
/// ```
/// use simulation::{Simulation, SimulationConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), simulation::SimulationError> {
/// let config = SimulationConfig {
///     seed: Some(7),
///     max_work_ms: 0,
///     retry_delay_ms: 0,
///     ..Default::default()
/// };
/// let report = Simulation::new(config)?.run().await?;
/// assert!(report.fully_released());
/// # Ok(())
/// # }
/// ```
pub struct Simulation {
    config: SimulationConfig,
    banker: Banker,
    strategies: Vec<Box<dyn DemandStrategy>>,
    seed: u64,
}

impl Simulation {
    /// Builds the ledger and one strategy per customer from `config`.
    ///
    /// Claims come from `config.maximum` when set, otherwise they are drawn
    /// from the run's seed.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let seed = config.resolve_seed();
        let strategies = (0..config.customers)
            .map(|customer| config.create_strategy(customer, seed))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(config, strategies, seed)
    }

    /// Like [`new`](Self::new), but with caller-supplied strategies, one per
    /// customer in customer order.
    pub fn with_strategies(
        config: SimulationConfig,
        strategies: Vec<Box<dyn DemandStrategy>>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        if strategies.len() != config.customers {
            return Err(SimulationError::Config(format!(
                "{} strategies supplied for {} customers",
                strategies.len(),
                config.customers
            )));
        }
        let seed = config.resolve_seed();
        Self::build(config, strategies, seed)
    }

    fn build(
        config: SimulationConfig,
        strategies: Vec<Box<dyn DemandStrategy>>,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let supply = config.supply();
        let claims = match config.claims() {
            Some(claims) => claims,
            None => random_claims(
                &supply,
                config.customers,
                &mut ChaCha8Rng::seed_from_u64(seed),
            ),
        };
        for (customer, claim) in claims.iter().enumerate() {
            tracing::debug!("customer {customer} claims {claim}");
        }

        let banker = Banker::with_claims(supply, claims)?;
        tracing::info!(
            "simulation ready: {} customers, supply {}, {} rounds, seed {seed}",
            banker.num_customers(),
            banker.available(),
            config.rounds,
        );

        Ok(Self {
            config,
            banker,
            strategies,
            seed,
        })
    }

    /// The shared banker; clones observe the live ledger.
    pub fn banker(&self) -> &Banker {
        &self.banker
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs every customer to completion and collects the report.
    ///
    /// Fails if any customer task panics or misuses the allocator.
    pub async fn run(self) -> Result<SimulationReport, SimulationError> {
        let Simulation {
            config,
            banker,
            strategies,
            seed,
        } = self;
        let start = Instant::now();
        let strategy = strategies
            .first()
            .map(|s| s.name().to_string())
            .unwrap_or_default();

        let handles: Vec<_> = strategies
            .into_iter()
            .enumerate()
            .map(|(id, strategy)| {
                let customer = Customer {
                    id,
                    banker: banker.clone(),
                    strategy,
                    rng: ChaCha8Rng::seed_from_u64(customer_seed(seed, id, 1)),
                    rounds: config.rounds,
                    max_work: config.max_work(),
                    retry_delay: config.retry_delay(),
                };
                tokio::spawn(customer.run())
            })
            .collect();

        let mut customers = Vec::with_capacity(handles.len());
        for handle in handles {
            let report = handle
                .await
                .map_err(|e| SimulationError::Task(e.to_string()))??;
            customers.push(report);
        }

        let report = SimulationReport {
            seed,
            strategy,
            total_duration: start.elapsed(),
            customers,
            stats: banker.stats(),
            final_state: banker.snapshot(),
        };
        tracing::info!("{}", report.summary());
        Ok(report)
    }
}

/// One simulated customer, owned by its task.
struct Customer {
    id: usize,
    banker: Banker,
    strategy: Box<dyn DemandStrategy>,
    rng: ChaCha8Rng,
    rounds: usize,
    max_work: Duration,
    retry_delay: Duration,
}

impl Customer {
    async fn run(mut self) -> Result<CustomerReport, SimulationError> {
        let mut report = CustomerReport::new(self.id);

        for round in 0..self.rounds {
            let need = self.banker.need(self.id)?;
            let request = self.strategy.next_request(self.id, &need);
            if request.is_zero() {
                tracing::debug!("customer {} has nothing to request in round {round}", self.id);
                report.skipped += 1;
                continue;
            }

            report.attempts += 1;
            tracing::debug!("customer {} requests {request}", self.id);
            match self.banker.try_hold(self.id, request)? {
                HoldOutcome::Held(hold) => {
                    report.granted += 1;
                    tracing::info!("customer {} request granted", self.id);

                    tokio::time::sleep(self.work_duration()).await;

                    hold.release()?;
                    report.released += 1;
                    tracing::info!("customer {} released resources", self.id);
                }
                HoldOutcome::Denied(reason) => {
                    report.record_denial(&reason);
                    let retries = round + 1 < self.rounds;
                    tracing::info!("{}", denial_message(self.id, &reason, retries));
                    if retries {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Ok(report)
    }

    fn work_duration(&mut self) -> Duration {
        let max = self.max_work.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(0..=max))
    }
}

fn denial_message(customer: usize, reason: &DenialReason, retries: bool) -> String {
    if retries {
        format!("customer {customer} request denied ({reason}); will retry")
    } else {
        format!("customer {customer} request denied ({reason})")
    }
}
