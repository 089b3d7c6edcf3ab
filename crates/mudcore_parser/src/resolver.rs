//! Argument resolution.
//!
//! Walks a compiled [`Grammar`] against a command's parameters, binding each
//! typed token to a live world object.

use mudcore_foundation::{CharacterId, ItemId, ZoneId};
use mudcore_world::{Character, Direction, Exit, HoldsItems, Item, Room, World};

use crate::grammar::{
    CharacterScope, CharacterSelector, ExitSelector, Grammar, GrammarToken, ItemSelector,
};
use crate::matcher::EntityMatcher;

/// One resolved value, tagged by the grammar token that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// From a `char` token.
    Character(CharacterId),
    /// From an `item` token.
    Item(ItemId),
    /// From an `exit` token.
    Exit(Direction),
    /// From a `zone` token.
    Zone(ZoneId),
    /// From a `word` token.
    Word(String),
    /// From a `string` token.
    Text(String),
}

impl Argument {
    /// The character, if this is a character argument.
    #[must_use]
    pub fn as_character(&self) -> Option<CharacterId> {
        match self {
            Self::Character(id) => Some(*id),
            _ => None,
        }
    }

    /// The item, if this is an item argument.
    #[must_use]
    pub fn as_item(&self) -> Option<ItemId> {
        match self {
            Self::Item(id) => Some(*id),
            _ => None,
        }
    }

    /// The direction, if this is an exit argument.
    #[must_use]
    pub fn as_exit(&self) -> Option<Direction> {
        match self {
            Self::Exit(d) => Some(*d),
            _ => None,
        }
    }

    /// The zone, if this is a zone argument.
    #[must_use]
    pub fn as_zone(&self) -> Option<ZoneId> {
        match self {
            Self::Zone(id) => Some(*id),
            _ => None,
        }
    }

    /// The text of a word or string argument.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Word(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Everything resolution needs: the world and who is asking.
#[derive(Clone, Copy)]
pub struct ResolveContext<'w> {
    world: &'w World,
    actor: CharacterId,
}

impl<'w> ResolveContext<'w> {
    /// Creates a context for `actor`.
    #[must_use]
    pub fn new(world: &'w World, actor: CharacterId) -> Self {
        Self { world, actor }
    }

    /// The world being queried.
    #[must_use]
    pub fn world(&self) -> &'w World {
        self.world
    }

    /// The acting character's id.
    #[must_use]
    pub fn actor(&self) -> CharacterId {
        self.actor
    }

    fn actor_character(&self) -> Option<&'w Character> {
        self.world.character(self.actor)
    }

    fn actor_room(&self) -> Option<&'w Room> {
        self.world.room(self.actor_character()?.room()?)
    }
}

/// Binds parameters to world objects following a grammar.
pub struct ArgumentResolver;

impl ArgumentResolver {
    /// Resolves `params` against `grammar`.
    ///
    /// Returns `None` when a required token cannot be bound. After a `|`
    /// token, any failure returns the values bound so far instead. Literal
    /// tokens produce no value; parameters left over at the end are ignored.
    #[must_use]
    pub fn resolve(
        ctx: &ResolveContext<'_>,
        grammar: &Grammar,
        params: &[String],
    ) -> Option<Vec<Argument>> {
        let mut cursor = 0;
        let mut best_effort = false;
        let mut resolved = Vec::with_capacity(grammar.arity());

        for element in grammar.elements() {
            let bound = match &element.token {
                GrammarToken::BestEffort => {
                    best_effort = true;
                    continue;
                }
                GrammarToken::Literal(word) => {
                    if params.get(cursor).is_some_and(|p| p == word) {
                        cursor += 1;
                        continue;
                    }
                    if element.optional {
                        continue;
                    }
                    None
                }
                GrammarToken::Rest => (cursor < params.len()).then(|| {
                    let text = params[cursor..].join(" ");
                    cursor = params.len();
                    Argument::Text(text)
                }),
                token => params.get(cursor).and_then(|param| {
                    let arg = Self::resolve_one(ctx, token, param)?;
                    cursor += 1;
                    Some(arg)
                }),
            };

            match bound {
                Some(arg) => resolved.push(arg),
                None if best_effort => {
                    tracing::trace!(
                        grammar = grammar.source(),
                        bound = resolved.len(),
                        "partial match"
                    );
                    return Some(resolved);
                }
                None => {
                    tracing::trace!(grammar = grammar.source(), cursor, "no match");
                    return None;
                }
            }
        }

        Some(resolved)
    }

    fn resolve_one(
        ctx: &ResolveContext<'_>,
        token: &GrammarToken,
        param: &str,
    ) -> Option<Argument> {
        match token {
            GrammarToken::Character(sel) => {
                Self::character(ctx, *sel, param).map(Argument::Character)
            }
            GrammarToken::Item(sel) => Self::item(ctx, *sel, param).map(Argument::Item),
            GrammarToken::Exit(sel) => Self::exit(ctx, *sel, param).map(Argument::Exit),
            GrammarToken::Zone => ctx.world().lookup_zone(param).map(Argument::Zone),
            GrammarToken::Word => Some(Argument::Word(param.to_string())),
            GrammarToken::Rest | GrammarToken::Literal(_) | GrammarToken::BestEffort => None,
        }
    }

    fn character(
        ctx: &ResolveContext<'_>,
        sel: CharacterSelector,
        param: &str,
    ) -> Option<CharacterId> {
        let world = ctx.world();
        let pool = match sel.scope {
            CharacterScope::Room => ctx.actor_room()?.characters(),
            CharacterScope::Zone => world.zone(world.character_zone(ctx.actor())?)?.characters(),
        };
        let candidates = pool
            .iter()
            .filter(|id| !(sel.no_self && **id == ctx.actor()))
            .filter_map(|id| world.character(*id))
            .filter(|c| !(sel.npc_only && c.is_player()))
            .filter(|c| !(sel.player_only && !c.is_player()));
        EntityMatcher::select(candidates, param).map(Character::id)
    }

    fn item(ctx: &ResolveContext<'_>, sel: ItemSelector, param: &str) -> Option<ItemId> {
        let world = ctx.world();
        let actor = ctx.actor_character()?;
        let mut ids: Vec<ItemId> = Vec::new();
        if sel.inventory {
            ids.extend(actor.items().iter().copied());
        }
        if sel.equipment {
            ids.extend(actor.equipment().values().copied());
        }
        if sel.room {
            if let Some(room) = ctx.actor_room() {
                ids.extend(room.items().iter().copied());
            }
        }
        let candidates = ids.iter().filter_map(|id| world.item(*id));
        EntityMatcher::select(candidates, param).map(Item::id)
    }

    fn exit(ctx: &ResolveContext<'_>, sel: ExitSelector, param: &str) -> Option<Direction> {
        let actor = ctx.actor_character()?;
        let allowed = |exit: &Exit| {
            (!sel.visible || exit.is_visible_to(actor))
                && (!sel.passable || exit.is_passable_by(actor))
                && (!sel.peekable || exit.is_peekable_by(actor))
                && (!sel.closeable || exit.is_closeable())
                && (!sel.openable || exit.is_openable())
        };
        ctx.actor_room()?
            .exits()
            .filter(|e| allowed(*e))
            .find(|e| e.direction.matches(param))
            .map(|e| e.direction)
    }
}
