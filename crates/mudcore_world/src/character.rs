//! Characters: players and NPCs.

use std::collections::BTreeMap;
use std::time::Duration;

use mudcore_foundation::{
    CharacterId, ConversationId, ItemId, Result, RoomId, ZonedKey, build_zoned_key,
};

use crate::container::{HoldsItems, ItemContainer};

/// A player or non-player character.
#[derive(Clone, Debug)]
pub struct Character {
    id: CharacterId,
    key: ZonedKey,
    name: String,
    keywords: Vec<String>,
    player: bool,
    admin: bool,
    pub(crate) room: Option<RoomId>,
    inventory: ItemContainer,
    pub(crate) equipment: BTreeMap<String, ItemId>,
    pub(crate) balance_until: Option<Duration>,
    conversation: Option<ConversationId>,
}

impl Character {
    /// The character's id.
    #[must_use]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// The zoned key of the character's definition.
    #[must_use]
    pub fn key(&self) -> &ZonedKey {
        &self.key
    }

    /// Display name ("a burly guard", "Alice").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authored keyword aliases.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether this character is controlled by a connected participant.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.player
    }

    /// Whether this character may use admin-only commands.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Grants or revokes admin privilege.
    pub fn set_admin(&mut self, admin: bool) {
        self.admin = admin;
    }

    /// The room the character stands in, if placed.
    #[must_use]
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    /// Worn equipment by slot name.
    #[must_use]
    pub fn equipment(&self) -> &BTreeMap<String, ItemId> {
        &self.equipment
    }

    /// The outermost conversation currently holding this character's input.
    #[must_use]
    pub fn conversation(&self) -> Option<ConversationId> {
        self.conversation
    }

    /// Sets or clears the conversation holding this character.
    pub fn set_conversation(&mut self, conversation: Option<ConversationId>) {
        self.conversation = conversation;
    }

    /// Remaining time off balance at `now`, if any.
    #[must_use]
    pub fn balance_remaining(&self, now: Duration) -> Option<Duration> {
        self.balance_until
            .and_then(|until| until.checked_sub(now))
            .filter(|left| !left.is_zero())
    }
}

impl HoldsItems for Character {
    fn container(&self) -> &ItemContainer {
        &self.inventory
    }

    fn container_mut(&mut self) -> &mut ItemContainer {
        &mut self.inventory
    }
}

/// Blueprint for spawning a character.
#[derive(Clone, Debug)]
pub struct CharacterTemplate {
    key: String,
    name: String,
    keywords: Vec<String>,
    player: bool,
    admin: bool,
}

impl CharacterTemplate {
    /// A player character.
    #[must_use]
    pub fn player(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            keywords: Vec::new(),
            player: true,
            admin: false,
        }
    }

    /// A non-player character.
    #[must_use]
    pub fn npc(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            player: false,
            ..Self::player(key, name)
        }
    }

    /// Adds keyword aliases.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Grants admin privilege.
    #[must_use]
    pub fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Builds an unplaced character, scoping a bare key to `default_zone`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the template key cannot be canonicalized.
    pub fn build(self, id: CharacterId, default_zone: &str) -> Result<Character> {
        Ok(Character {
            id,
            key: build_zoned_key(&self.key, default_zone)?,
            name: self.name,
            keywords: self.keywords,
            player: self.player,
            admin: self.admin,
            room: None,
            inventory: ItemContainer::new(),
            equipment: BTreeMap::new(),
            balance_until: None,
            conversation: None,
        })
    }
}
