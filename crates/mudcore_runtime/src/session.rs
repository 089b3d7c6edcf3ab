//! Session state for the shell.
//!
//! A session owns the world, the dispatcher, and the mailbox that collects
//! output. It plays one local character; whatever is emitted to that
//! character is handed back from [`Session::submit`] and [`Session::tick`].
//! Output addressed to anyone else is discarded.

use std::time::Duration;

use mudcore_dispatch::{DispatchOutcome, Dispatcher, Mailbox};
use mudcore_foundation::{CharacterId, Error, ErrorKind, Result};
use mudcore_world::World;

/// One local player's view of a running world.
pub struct Session {
    world: World,
    dispatcher: Dispatcher,
    mailbox: Mailbox,
    player: CharacterId,
    last_outcome: DispatchOutcome,
}

impl Session {
    /// Creates a session playing `player`.
    ///
    /// # Errors
    ///
    /// Returns an error if `player` does not exist in `world`.
    pub fn new(world: World, dispatcher: Dispatcher, player: CharacterId) -> Result<Self> {
        if world.character(player).is_none() {
            return Err(Error::character_not_found(player));
        }
        Ok(Self {
            world,
            dispatcher,
            mailbox: Mailbox::new(),
            player,
            last_outcome: DispatchOutcome::Empty,
        })
    }

    /// The character this session plays.
    #[must_use]
    pub fn player(&self) -> CharacterId {
        self.player
    }

    /// Switches the session to another character.
    ///
    /// # Errors
    ///
    /// Returns an error if `player` does not exist.
    pub fn set_player(&mut self, player: CharacterId) -> Result<()> {
        if self.world.character(player).is_none() {
            return Err(Error::character_not_found(player));
        }
        self.player = player;
        Ok(())
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The dispatcher, mutably (for registering commands).
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// How the most recent line was handled.
    #[must_use]
    pub fn last_outcome(&self) -> DispatchOutcome {
        self.last_outcome
    }

    /// Runs one line as the player and returns what they were told.
    pub fn submit(&mut self, line: &str) -> Vec<String> {
        self.submit_as(self.player, line)
    }

    /// Runs one line as `actor`, returning what the player was told.
    pub fn submit_as(&mut self, actor: CharacterId, line: &str) -> Vec<String> {
        self.last_outcome = self
            .dispatcher
            .dispatch(&mut self.world, &mut self.mailbox, actor, line);
        self.collect()
    }

    /// Advances logical time and returns what the player was told.
    pub fn tick(&mut self, delta: Duration) -> Vec<String> {
        self.dispatcher.tick(&mut self.world, &mut self.mailbox, delta);
        self.collect()
    }

    /// Verifies the player still exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the player was despawned.
    pub fn check_player(&self) -> Result<()> {
        match self.world.character(self.player) {
            Some(_) => Ok(()),
            None => Err(Error::new(ErrorKind::Internal(format!(
                "player {} is no longer in the world",
                self.player
            )))),
        }
    }

    fn collect(&mut self) -> Vec<String> {
        let out = self.mailbox.take_for(self.player);
        // Everyone else's output has no reader.
        self.mailbox.take();
        out
    }
}
