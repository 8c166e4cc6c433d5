//! Offer board - lifecycle of open contract offers
//!
//! The board owns the unaccepted offers. The accepted contract lives in the
//! game state; `accept` moves an offer there, so an offer is never both open
//! and active.

use serde::{Deserialize, Serialize};

use super::generator::{Contract, ContractGenerator};
use crate::core::config::SimulationConfig;
use crate::core::error::CommandError;
use crate::core::random::RandomSource;
use crate::core::types::{ContractId, LocationId, Tick};

/// What one maintenance pass changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceReport {
    /// Offers dropped because their deadline passed
    pub expired: Vec<Contract>,
    /// Offer taken by a rival hauler, if any
    pub snatched: Option<Contract>,
    /// Offers added by replenishment or recovery
    pub posted: Vec<ContractId>,
}

impl MaintenanceReport {
    pub fn is_quiet(&self) -> bool {
        self.expired.is_empty() && self.snatched.is_none() && self.posted.is_empty()
    }
}

/// Where the player is, as far as the board cares
#[derive(Debug, Clone, Copy)]
pub struct BoardContext<'a> {
    pub tick: Tick,
    /// Station new offers are posted from
    pub station: Option<&'a LocationId>,
    pub docked: bool,
}

/// Pool of open offers in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferBoard {
    offers: Vec<Contract>,
    /// Salt for the next generated contract; never reused
    next_salt: u32,
}

impl OfferBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offers(&self) -> &[Contract] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn get(&self, id: ContractId) -> Option<&Contract> {
        self.offers.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ContractId) -> bool {
        self.get(id).is_some()
    }

    /// Post an externally built offer
    pub fn post(&mut self, contract: Contract) {
        self.offers.push(contract);
    }

    fn next_salt(&mut self) -> u32 {
        let salt = self.next_salt;
        self.next_salt = self.next_salt.wrapping_add(1);
        salt
    }

    fn generate_one(
        &mut self,
        generator: &ContractGenerator<'_>,
        station: &LocationId,
        tick: Tick,
        rng: &mut impl RandomSource,
    ) -> Option<ContractId> {
        let salt = self.next_salt();
        let contract = generator.generate(station, tick, salt, rng)?;
        let id = contract.id;
        self.offers.push(contract);
        Some(id)
    }

    /// Replace the whole pool with `count` fresh offers posted at `station`
    ///
    /// Called once per arrival. Returns how many offers were generated.
    pub fn spawn_offers(
        &mut self,
        generator: &ContractGenerator<'_>,
        station: &LocationId,
        tick: Tick,
        count: usize,
        rng: &mut impl RandomSource,
    ) -> usize {
        self.offers.clear();
        (0..count)
            .filter_map(|_| self.generate_one(generator, station, tick, rng))
            .count()
    }

    /// Per-tick upkeep: expiry, rival snatch, replenishment, recovery
    ///
    /// Random draws happen in that order and only when their guard holds,
    /// so a seeded source replays a run exactly.
    pub fn maintain(
        &mut self,
        ctx: BoardContext<'_>,
        generator: &ContractGenerator<'_>,
        config: &SimulationConfig,
        rng: &mut impl RandomSource,
    ) -> MaintenanceReport {
        let mut report = MaintenanceReport::default();

        // 1. Expiry
        let (expired, open): (Vec<Contract>, Vec<Contract>) = std::mem::take(&mut self.offers)
            .into_iter()
            .partition(|c| c.is_expired(ctx.tick));
        self.offers = open;
        report.expired = expired;

        // 2. Rival snatch
        if !self.offers.is_empty() && rng.chance(config.snatch_chance) {
            let idx = rng.index(self.offers.len());
            report.snatched = Some(self.offers.remove(idx));
        }

        // 3. Replenish toward the floor
        if self.offers.len() < config.offer_floor {
            if let Some(station) = ctx.station {
                if rng.chance(config.replenish_chance) {
                    report
                        .posted
                        .extend(self.generate_one(generator, station, ctx.tick, rng));
                }
            }
        }

        // 4. Recovery for an empty board while docked
        if self.offers.is_empty() && ctx.docked {
            if let Some(station) = ctx.station {
                if rng.chance(config.recovery_chance) {
                    report
                        .posted
                        .extend(self.generate_one(generator, station, ctx.tick, rng));
                }
            }
        }

        report
    }

    /// Move an offer into the active slot
    ///
    /// Fails without touching the pool if a contract is already active or
    /// the offer does not exist.
    pub fn accept(
        &mut self,
        id: ContractId,
        active: &mut Option<Contract>,
    ) -> Result<(), CommandError> {
        if let Some(current) = active {
            return Err(CommandError::ContractAlreadyActive(current.id));
        }
        let idx = self
            .offers
            .iter()
            .position(|c| c.id == id)
            .ok_or(CommandError::UnknownContract(id))?;
        *active = Some(self.offers.remove(idx));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::location::{Location, LocationKind};
    use crate::contracts::template::ContractTemplate;
    use crate::core::random::{ScriptedRandom, SeededRandom};
    use crate::core::types::{Faction, RiskLevel};

    fn locations() -> Vec<Location> {
        vec![
            Location::new("hub", "Hub", LocationKind::Station).with_orbit(100.0, 0.1, 0.0),
            Location::new("luna", "Luna", LocationKind::Moon).with_orbit(150.0, 0.2, 90.0),
        ]
    }

    fn templates() -> Vec<ContractTemplate> {
        vec![ContractTemplate::new("Med", "To {destination}", 100, Faction::Federation)]
    }

    fn offer(salt: u32, expires_at: Tick) -> Contract {
        Contract {
            id: ContractId::new(0, salt),
            title: "Test".into(),
            description: String::new(),
            destination: LocationId::new("luna"),
            pay: 100,
            risk: RiskLevel::Low,
            faction: Faction::Neutral,
            expires_at,
        }
    }

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            snatch_chance: 0.0,
            replenish_chance: 0.0,
            recovery_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_replaces_pool() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(3);
        let mut board = OfferBoard::new();
        board.post(offer(999, 50));

        let hub = LocationId::new("hub");
        assert_eq!(board.spawn_offers(&gen, &hub, 10, 3, &mut rng), 3);
        assert_eq!(board.len(), 3);
        assert!(!board.contains(ContractId::new(0, 999)));

        let mut ids: Vec<_> = board.offers().iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_expired_offer_dropped() {
        let (locs, temps, config) = (locations(), templates(), quiet_config());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(3);
        let mut board = OfferBoard::new();
        board.post(offer(1, 99));
        board.post(offer(2, 100));
        board.post(offer(3, 101));

        let ctx = BoardContext { tick: 100, station: None, docked: true };
        let report = board.maintain(ctx, &gen, &config, &mut rng);

        assert_eq!(report.expired.len(), 2);
        assert_eq!(board.len(), 1);
        assert!(board.contains(ContractId::new(0, 3)));
    }

    #[test]
    fn test_snatch_removes_one_offer() {
        let (locs, temps) = (locations(), templates());
        let config = SimulationConfig {
            snatch_chance: 1.0,
            replenish_chance: 0.0,
            recovery_chance: 0.0,
            ..Default::default()
        };
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = ScriptedRandom::constant(0.0);
        let mut board = OfferBoard::new();
        board.post(offer(1, 5000));
        board.post(offer(2, 5000));

        let ctx = BoardContext { tick: 1, station: None, docked: true };
        let report = board.maintain(ctx, &gen, &config, &mut rng);

        assert_eq!(report.snatched.map(|c| c.id), Some(ContractId::new(0, 1)));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_snatch_skipped_on_empty_board() {
        let (locs, temps) = (locations(), templates());
        let config = SimulationConfig {
            snatch_chance: 1.0,
            replenish_chance: 0.0,
            recovery_chance: 0.0,
            ..Default::default()
        };
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = ScriptedRandom::constant(0.0);
        let mut board = OfferBoard::new();
        let ctx = BoardContext { tick: 1, station: None, docked: true };
        assert!(board.maintain(ctx, &gen, &config, &mut rng).is_quiet());
    }

    #[test]
    fn test_replenish_below_floor() {
        let (locs, temps) = (locations(), templates());
        let config = SimulationConfig {
            snatch_chance: 0.0,
            replenish_chance: 1.0,
            recovery_chance: 0.0,
            ..Default::default()
        };
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(11);
        let mut board = OfferBoard::new();
        let hub = LocationId::new("hub");

        for tick in 1..=10 {
            let ctx = BoardContext { tick, station: Some(&hub), docked: false };
            board.maintain(ctx, &gen, &config, &mut rng);
        }
        assert_eq!(board.len(), config.offer_floor);
    }

    #[test]
    fn test_no_replenish_without_station() {
        let (locs, temps) = (locations(), templates());
        let config = SimulationConfig {
            snatch_chance: 0.0,
            replenish_chance: 1.0,
            recovery_chance: 1.0,
            ..Default::default()
        };
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(11);
        let mut board = OfferBoard::new();
        let ctx = BoardContext { tick: 1, station: None, docked: true };
        board.maintain(ctx, &gen, &config, &mut rng);
        assert!(board.is_empty());
    }

    #[test]
    fn test_recovery_only_when_docked() {
        let (locs, temps) = (locations(), templates());
        let config = SimulationConfig {
            snatch_chance: 0.0,
            replenish_chance: 0.0,
            recovery_chance: 1.0,
            ..Default::default()
        };
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(11);
        let hub = LocationId::new("hub");
        let mut board = OfferBoard::new();

        let flying = BoardContext { tick: 1, station: Some(&hub), docked: false };
        board.maintain(flying, &gen, &config, &mut rng);
        assert!(board.is_empty());

        let docked = BoardContext { tick: 2, station: Some(&hub), docked: true };
        let report = board.maintain(docked, &gen, &config, &mut rng);
        assert_eq!(report.posted.len(), 1);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_accept_moves_offer() {
        let mut board = OfferBoard::new();
        board.post(offer(1, 5000));
        board.post(offer(2, 5000));
        let mut active = None;

        assert_eq!(board.accept(ContractId::new(0, 2), &mut active), Ok(()));
        assert_eq!(active.as_ref().map(|c| c.id), Some(ContractId::new(0, 2)));
        assert!(!board.contains(ContractId::new(0, 2)));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_accept_while_active_leaves_pool() {
        let mut board = OfferBoard::new();
        board.post(offer(1, 5000));
        let mut active = Some(offer(7, 5000));

        let before = board.offers().to_vec();
        assert_eq!(
            board.accept(ContractId::new(0, 1), &mut active),
            Err(CommandError::ContractAlreadyActive(ContractId::new(0, 7)))
        );
        assert_eq!(board.offers(), before.as_slice());
    }

    #[test]
    fn test_accept_unknown_offer() {
        let mut board = OfferBoard::new();
        let mut active = None;
        assert_eq!(
            board.accept(ContractId::new(4, 4), &mut active),
            Err(CommandError::UnknownContract(ContractId::new(4, 4)))
        );
        assert!(active.is_none());
    }
}
