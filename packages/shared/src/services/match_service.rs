use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::models::game_match::{Match, MatchConfig, Round, MATCH_ID_SPACE};
use crate::models::position::PositionId;
use crate::services::archive_service::ArchiveService;
use crate::services::catalog_service::CatalogService;
use crate::services::errors::catalog_service_errors::CatalogServiceError;
use crate::services::errors::match_service_errors::MatchServiceError;
use crate::services::position_service::PositionService;

/// Upper bound on match id draws before giving up.
pub const MAX_ID_ATTEMPTS: usize = 10_000;

/// Owns the solver caches and the match currently being played.
///
/// The session is idle while `current_match()` is `None` and active
/// otherwise. Reaching a terminal position does not end the session; only
/// `exit_match` does.
pub struct MatchService {
    catalog: CatalogService,
    positions: PositionService,
    archive: ArchiveService,
    current: Option<Match>,
    rng: StdRng,
}

impl MatchService {
    pub fn new(catalog: CatalogService, positions: PositionService, archive: ArchiveService) -> Self {
        Self::with_rng(catalog, positions, archive, StdRng::from_entropy())
    }

    pub fn with_rng(
        catalog: CatalogService,
        positions: PositionService,
        archive: ArchiveService,
        rng: StdRng,
    ) -> Self {
        MatchService {
            catalog,
            positions,
            archive,
            current: None,
            rng,
        }
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogService {
        &mut self.catalog
    }

    pub fn positions(&self) -> &PositionService {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut PositionService {
        &mut self.positions
    }

    pub fn archive(&self) -> &ArchiveService {
        &self.archive
    }

    pub fn current_match(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    fn active(&self) -> Result<&Match, MatchServiceError> {
        self.current.as_ref().ok_or(MatchServiceError::NoActiveMatch)
    }

    fn active_mut(&mut self) -> Result<&mut Match, MatchServiceError> {
        self.current.as_mut().ok_or(MatchServiceError::NoActiveMatch)
    }

    /// Rounds 1 through the current round of the active match.
    pub fn history(&self) -> Result<&[Round], MatchServiceError> {
        Ok(self.active()?.history())
    }

    pub fn is_end_of_match(&self) -> Result<bool, MatchServiceError> {
        Ok(self.active()?.is_end_of_match())
    }

    pub fn maximum_remoteness(&self, from: u32, to: u32) -> Result<u32, MatchServiceError> {
        Ok(self.active()?.maximum_remoteness(from, to))
    }

    /// Draws an id from `0..MATCH_ID_SPACE` that none of the players has in
    /// their archive.
    pub async fn generate_match_id(&mut self, players: &[String]) -> Result<u32, MatchServiceError> {
        let reserved = self.archive.reserved_match_ids(players).await?;
        if reserved.len() >= MATCH_ID_SPACE as usize {
            return Err(MatchServiceError::MatchIdSpaceExhausted);
        }

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.rng.gen_range(0..MATCH_ID_SPACE);
            if !reserved.contains(&id) {
                return Ok(id);
            }
        }

        Err(MatchServiceError::MatchIdSpaceExhausted)
    }

    /// Loads the variant and its start position, then makes a new match the
    /// current one.
    pub async fn initiate_match(&mut self, config: MatchConfig) -> Result<&Match, MatchServiceError> {
        let now = Utc::now();

        let start_id = self
            .positions
            .load_start_position_at(
                &mut self.catalog,
                config.game_type,
                &config.game_id,
                &config.variant_id,
                now,
            )
            .await?;
        let start = self
            .positions
            .position(&start_id)
            .cloned()
            .ok_or_else(|| CatalogServiceError::UnknownPosition(start_id.position.clone()))?;

        let id = self
            .generate_match_id(&config.match_type.players())
            .await?;

        if let Some(previous) = &self.current {
            warn!("Replacing match {} without archiving it", previous.id);
        }

        info!(
            "Starting match {} of {}/{} ({:?})",
            id, config.game_id, config.variant_id, config.match_type
        );
        Ok(self.current.insert(Match::new(id, &config, start, now)))
    }

    /// Plays `move_label` from the current round. The target position is
    /// resolved first, so a failed fetch leaves the match unchanged. Playing
    /// from an undone round drops the rounds after it.
    pub async fn run_move(&mut self, move_label: &str) -> Result<&Match, MatchServiceError> {
        let now = Utc::now();

        let (target, move_value) = {
            let game_match = self.active()?;
            let chosen = game_match
                .round()
                .position
                .available_moves
                .get(move_label)
                .ok_or_else(|| MatchServiceError::MoveNotAvailable(move_label.to_string()))?;
            let target = PositionId::new(
                game_match.game_type,
                &game_match.game_id,
                &game_match.variant_id,
                &chosen.position,
            );
            (target, chosen.move_value)
        };

        let position = self
            .positions
            .load_position_at(&target, false, now)
            .await?
            .clone();

        let game_match = self.active_mut()?;
        let completed_id = game_match.current_round_id;
        game_match.rounds.truncate(completed_id as usize);
        if let Some(completed) = game_match.rounds.last_mut() {
            completed.move_label = Some(move_label.to_string());
            completed.move_value = Some(move_value);
        }

        let next_id = completed_id + 1;
        game_match.turn = game_match.match_type.next_turn(game_match.turn);
        let player_id = game_match.player_for_turn(game_match.turn);
        game_match
            .rounds
            .push(Round::new(next_id, &player_id, position));
        game_match.current_round_id = next_id;
        game_match.last_played = now;

        debug!(
            "Match {}: {} played {}, round {}",
            game_match.id, player_id, move_label, next_id
        );
        Ok(game_match)
    }

    pub fn undo_move(&mut self) -> Result<&Match, MatchServiceError> {
        let game_match = self.active_mut()?;
        if game_match.current_round_id <= 1 {
            return Err(MatchServiceError::NoPreviousRound);
        }
        let previous_id = game_match.current_round_id - 1;
        Self::move_to_round(game_match, previous_id);
        Ok(game_match)
    }

    pub fn redo_move(&mut self) -> Result<&Match, MatchServiceError> {
        let game_match = self.active_mut()?;
        let next_id = game_match.current_round_id + 1;
        if game_match.round_by_id(next_id).is_none() {
            return Err(MatchServiceError::NoNextRound);
        }
        Self::move_to_round(game_match, next_id);
        Ok(game_match)
    }

    fn move_to_round(game_match: &mut Match, round_id: u32) {
        game_match.current_round_id = round_id;
        game_match.turn = game_match.turn_at_round(round_id);
        game_match.last_played = Utc::now();
    }

    /// Leaves the current match. Matches where a move was taken are stamped
    /// and archived for every player; untouched ones are dropped. Returns the
    /// archived match, if any. If archiving fails the match stays current.
    pub async fn exit_match(&mut self) -> Result<Option<Match>, MatchServiceError> {
        let now = Utc::now();
        let game_match = self.active()?;

        if !game_match.has_progressed() {
            info!("Discarding match {} with no moves", game_match.id);
            self.current = None;
            return Ok(None);
        }

        let mut archived = game_match.clone();
        archived.last_played = now;
        if archived.is_end_of_match() {
            archived.ended = Some(now);
        }
        self.archive.archive(&archived, &archived.players).await?;

        self.current = None;
        Ok(Some(archived))
    }

    /// Exits the current match and starts a fresh one from the same start
    /// position and starting player.
    pub async fn restart_match(&mut self) -> Result<&Match, MatchServiceError> {
        let now = Utc::now();
        let previous = self.active()?.clone();
        self.exit_match().await?;

        let first_round = previous
            .rounds
            .first()
            .ok_or(MatchServiceError::NoActiveMatch)?;
        let config = MatchConfig {
            starting_player_id: first_round.player_id.clone(),
            ..previous.config()
        };
        let id = self.generate_match_id(&previous.players).await?;

        info!("Restarting match {} as {}", previous.id, id);
        Ok(self.current.insert(Match::new(
            id,
            &config,
            first_round.position.clone(),
            now,
        )))
    }
}
