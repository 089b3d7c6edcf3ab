//! Argument grammars.
//!
//! Each command may declare a grammar: a space-separated list of tokens that
//! says how to bind its parameters. Grammars are compiled once, when the
//! command is defined, so malformed grammars fail at startup.
//!
//! | Token                 | Consumes | Produces                  |
//! |-----------------------|----------|---------------------------|
//! | `char[.mods]`         | 1        | [`Argument::Character`]   |
//! | `item[.mods]`         | 1        | [`Argument::Item`]        |
//! | `exit[.mods]`         | 1        | [`Argument::Exit`]        |
//! | `zone`                | 1        | [`Argument::Zone`]        |
//! | `word`                | 1        | [`Argument::Word`]        |
//! | `string`              | the rest | [`Argument::Text`]        |
//! | `to`, `in`, ...       | 1        | nothing (literal)         |
//! | `[to]`                | 0 or 1   | nothing (optional literal)|
//! | `\|`                  | 0        | switches to best-effort   |
//!
//! [`Argument::Character`]: crate::resolver::Argument::Character
//! [`Argument::Item`]: crate::resolver::Argument::Item
//! [`Argument::Exit`]: crate::resolver::Argument::Exit
//! [`Argument::Zone`]: crate::resolver::Argument::Zone
//! [`Argument::Word`]: crate::resolver::Argument::Word
//! [`Argument::Text`]: crate::resolver::Argument::Text

use std::fmt;
use std::str::FromStr;

use mudcore_foundation::{Error, Result};

/// Which characters a `char` token searches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CharacterScope {
    /// The actor's room.
    #[default]
    Room,
    /// The actor's whole zone.
    Zone,
}

/// Compiled `char` token.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterSelector {
    /// Where to look.
    pub scope: CharacterScope,
    /// Exclude the actor.
    pub no_self: bool,
    /// Exclude players.
    pub npc_only: bool,
    /// Exclude NPCs.
    pub player_only: bool,
}

/// Compiled `item` token: the union of the listed places.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemSelector {
    /// The actor's inventory.
    pub inventory: bool,
    /// The actor's worn equipment.
    pub equipment: bool,
    /// The floor of the actor's room.
    pub room: bool,
}

impl Default for ItemSelector {
    fn default() -> Self {
        Self {
            inventory: true,
            equipment: true,
            room: true,
        }
    }
}

/// Compiled `exit` token: every listed predicate must hold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExitSelector {
    /// Not hidden behind a closed secret door.
    pub visible: bool,
    /// The actor could walk through now.
    pub passable: bool,
    /// The actor can see through.
    pub peekable: bool,
    /// Has an open door.
    pub closeable: bool,
    /// Has a closed door.
    pub openable: bool,
}

/// One compiled grammar token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarToken {
    /// `char[.mods]`
    Character(CharacterSelector),
    /// `item[.mods]`
    Item(ItemSelector),
    /// `exit[.mods]`
    Exit(ExitSelector),
    /// `zone`
    Zone,
    /// `word`
    Word,
    /// `string`
    Rest,
    /// A filler word that must appear verbatim.
    Literal(String),
    /// `|`: from here on, running out of input returns what was bound so far.
    BestEffort,
}

/// A token plus its optional marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarElement {
    /// The token.
    pub token: GrammarToken,
    /// Wrapped in `[...]`.
    pub optional: bool,
}

/// A compiled argument grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    source: String,
    elements: Vec<GrammarElement>,
}

impl Grammar {
    /// Compiles a grammar string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrammar` for unknown or conflicting modifiers,
    /// modifiers on tokens that take none, empty or malformed brackets, and
    /// optional typed tokens (only literals may be optional).
    pub fn compile(source: &str) -> Result<Self> {
        let mut elements = Vec::new();

        for raw in source.split_whitespace() {
            let mut raw = raw;
            if let Some(stripped) = raw.strip_prefix('|') {
                elements.push(GrammarElement {
                    token: GrammarToken::BestEffort,
                    optional: false,
                });
                if stripped.is_empty() {
                    continue;
                }
                raw = stripped;
            }

            let (inner, optional) = match (raw.strip_prefix('['), raw.strip_suffix(']')) {
                (Some(_), Some(_)) if raw.len() > 2 => (&raw[1..raw.len() - 1], true),
                (None, None) => (raw, false),
                _ => return Err(Error::invalid_grammar(source, format!("malformed token {raw:?}"))),
            };
            if inner.contains(['[', ']', '|']) {
                return Err(Error::invalid_grammar(source, format!("malformed token {raw:?}")));
            }

            let token = compile_token(source, inner)?;
            if optional && !matches!(token, GrammarToken::Literal(_)) {
                return Err(Error::invalid_grammar(
                    source,
                    format!("only literals may be optional, got {raw:?}"),
                ));
            }
            elements.push(GrammarElement { token, optional });
        }

        Ok(Self {
            source: source.to_string(),
            elements,
        })
    }

    /// The grammar as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Compiled elements in order.
    #[must_use]
    pub fn elements(&self) -> &[GrammarElement] {
        &self.elements
    }

    /// Number of values a full match produces.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| !matches!(e.token, GrammarToken::Literal(_) | GrammarToken::BestEffort))
            .count()
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compile_token(source: &str, text: &str) -> Result<GrammarToken> {
    let mut parts = text.split('.');
    let head = parts.next().unwrap_or_default();
    let modifiers: Vec<&str> = parts.collect();
    let bad = |message: String| Error::invalid_grammar(source, message);

    match head {
        "char" => {
            let mut sel = CharacterSelector::default();
            let mut scoped = false;
            for m in modifiers {
                match m {
                    "room" | "zone" if scoped => {
                        return Err(bad(format!("{text:?} names more than one scope")));
                    }
                    "room" => scoped = true,
                    "zone" => {
                        scoped = true;
                        sel.scope = CharacterScope::Zone;
                    }
                    "noself" => sel.no_self = true,
                    "npc" => sel.npc_only = true,
                    "player" => sel.player_only = true,
                    other => return Err(bad(format!("unknown char modifier {other:?}"))),
                }
            }
            if sel.npc_only && sel.player_only {
                return Err(bad(format!("{text:?} excludes every character")));
            }
            Ok(GrammarToken::Character(sel))
        }
        "item" => {
            if modifiers.is_empty() {
                return Ok(GrammarToken::Item(ItemSelector::default()));
            }
            let mut sel = ItemSelector {
                inventory: false,
                equipment: false,
                room: false,
            };
            for m in modifiers {
                match m {
                    "inv" => sel.inventory = true,
                    "eq" => sel.equipment = true,
                    "room" => sel.room = true,
                    other => return Err(bad(format!("unknown item modifier {other:?}"))),
                }
            }
            Ok(GrammarToken::Item(sel))
        }
        "exit" => {
            let mut sel = ExitSelector::default();
            for m in modifiers {
                match m {
                    "visible" => sel.visible = true,
                    "passable" => sel.passable = true,
                    "peekable" => sel.peekable = true,
                    "closeable" => sel.closeable = true,
                    "openable" => sel.openable = true,
                    other => return Err(bad(format!("unknown exit modifier {other:?}"))),
                }
            }
            Ok(GrammarToken::Exit(sel))
        }
        "zone" | "word" | "string" if !modifiers.is_empty() => {
            Err(bad(format!("{head:?} takes no modifiers")))
        }
        "zone" => Ok(GrammarToken::Zone),
        "word" => Ok(GrammarToken::Word),
        "string" => Ok(GrammarToken::Rest),
        _ => Ok(GrammarToken::Literal(text.to_string())),
    }
}
